//! Raw terminal input decoding.
//!
//! Bytes arrive through a [`ByteSource`] with a bounded read timeout; the
//! [`KeyDecoder`] folds them into logical [`Key`]s. Escape sequences that are
//! truncated or unrecognized degrade to [`Key::Escape`] rather than erroring.

mod decoder;

pub use decoder::{CursorReply, KeyDecoder, parse_cursor_report, read_cursor_report};

use std::collections::VecDeque;
use std::time::Duration;

/// Default per-byte read timeout (one decisecond, as with `VTIME = 1`).
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

pub const ESC: u8 = 0x1b;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read from terminal: {0}")]
    Read(#[from] std::io::Error),
}

/// Logical key produced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte not otherwise classified (printable or control).
    Char(u8),
    /// Ctrl + lowercase letter (`Ctrl(b'q')` for byte 17).
    Ctrl(u8),
    Enter,
    Backspace,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

impl Key {
    /// Classify a single non-escape byte.
    pub fn from_byte(b: u8) -> Key {
        match b {
            b'\r' => Key::Enter,
            127 => Key::Backspace,
            ESC => Key::Escape,
            b'\t' => Key::Char(b),
            1..=26 => Key::Ctrl(b'a' + b - 1),
            _ => Key::Char(b),
        }
    }
}

/// A blocking-with-timeout byte stream.
pub trait ByteSource {
    /// Read one byte, waiting at most `timeout`. `Ok(None)` means no byte
    /// arrived in time.
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>, InputError>;
}

/// In-memory source; an exhausted queue behaves like a read timeout.
impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self, _timeout: Duration) -> Result<Option<u8>, InputError> {
        Ok(self.pop_front())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>, InputError> {
        (**self).read_byte(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_classification() {
        assert_eq!(Key::from_byte(13), Key::Enter);
        assert_eq!(Key::from_byte(127), Key::Backspace);
        assert_eq!(Key::from_byte(9), Key::Char(9));
        assert_eq!(Key::from_byte(17), Key::Ctrl(b'q'));
        assert_eq!(Key::from_byte(8), Key::Ctrl(b'h'));
        assert_eq!(Key::from_byte(1), Key::Ctrl(b'a'));
        assert_eq!(Key::from_byte(26), Key::Ctrl(b'z'));
        assert_eq!(Key::from_byte(b'x'), Key::Char(b'x'));
        assert_eq!(Key::from_byte(0), Key::Char(0));
        assert_eq!(Key::from_byte(28), Key::Char(28));
        assert_eq!(Key::from_byte(200), Key::Char(200));
    }
}
