//! Terminal backend: raw mode, stdin byte source and window size queries.

use anyhow::{Result, bail};
use core_input::{ByteSource, KeyDecoder};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{Write, stdout};
use std::sync::atomic::{AtomicBool, Ordering};

mod stdin;
pub use stdin::StdinBytes;

/// Clear the whole screen and home the cursor.
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

/// Set while raw mode and the alternate screen are active.
static ENTERED: AtomicBool = AtomicBool::new(false);

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// Leaves the terminal on drop, including on early `?` returns.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            self.entered = true;
            ENTERED.store(true, Ordering::SeqCst);
            tracing::debug!(target: "runtime", "terminal_entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            let mut out = stdout();
            out.write_all(CLEAR_SCREEN)?;
            execute!(out, LeaveAlternateScreen)?;
            disable_raw_mode()?;
            self.entered = false;
            ENTERED.store(false, Ordering::SeqCst);
            tracing::debug!(target: "runtime", "terminal_restored");
        }
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.backend.leave() {
            tracing::warn!(target: "runtime", error = %err, "terminal_restore_failed");
        }
    }
}

/// Best-effort restore for contexts without access to the backend (panic hook).
///
/// Does nothing unless a backend is currently entered, so output printed
/// before raw mode or after the guard restored the terminal stays visible.
pub fn restore_terminal() {
    restore_entered(&mut stdout());
}

fn restore_entered<W: Write>(out: &mut W) -> bool {
    if !ENTERED.swap(false, Ordering::SeqCst) {
        return false;
    }
    let _ = out.write_all(CLEAR_SCREEN);
    let _ = execute!(out, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    true
}

/// Terminal size as `(rows, cols)` from the ioctl-backed crossterm query.
///
/// Never touches stdin; `None` when the query fails or reports no columns.
pub fn ioctl_size() -> Option<(u16, u16)> {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 => Some((rows, cols)),
        _ => None,
    }
}

/// Terminal size as `(rows, cols)`, measured once at startup.
///
/// Uses [`ioctl_size`] first and falls back to moving the cursor to the
/// bottom-right corner and asking for its position.
pub fn window_size<S: ByteSource, W: Write>(
    decoder: &mut KeyDecoder<S>,
    out: &mut W,
) -> Result<(u16, u16)> {
    if let Some(size) = ioctl_size() {
        return Ok(size);
    }
    tracing::debug!(target: "runtime", "window_size_fallback");
    size_from_cursor_report(decoder, out)
}

/// Fallback size query through `ESC[6n`.
///
/// Keys typed while waiting for the reply stay queued in `decoder`.
pub fn size_from_cursor_report<S: ByteSource, W: Write>(
    decoder: &mut KeyDecoder<S>,
    out: &mut W,
) -> Result<(u16, u16)> {
    out.write_all(b"\x1b[999C\x1b[999B")?;
    out.write_all(b"\x1b[6n")?;
    out.flush()?;
    match decoder.query_cursor_report()? {
        Some(size) => Ok(size),
        None => bail!("unable to determine window size"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_input::Key;
    use std::collections::VecDeque;

    fn decoder(bytes: &[u8]) -> KeyDecoder<VecDeque<u8>> {
        KeyDecoder::new(bytes.iter().copied().collect())
    }

    #[test]
    fn fallback_writes_probe_and_parses_reply() {
        let mut dec = decoder(b"\x1b[40;120R");
        let mut out = Vec::new();
        let size = size_from_cursor_report(&mut dec, &mut out).unwrap();
        assert_eq!(size, (40, 120));
        assert_eq!(out, b"\x1b[999C\x1b[999B\x1b[6n");
    }

    #[test]
    fn fallback_without_reply_is_an_error() {
        let mut dec = decoder(b"");
        let mut out = Vec::new();
        assert!(size_from_cursor_report(&mut dec, &mut out).is_err());
    }

    #[test]
    fn fallback_keeps_typed_ahead_key() {
        let mut dec = decoder(b"x\x1b[24;80R");
        let mut out = Vec::new();
        let size = size_from_cursor_report(&mut dec, &mut out).unwrap();
        assert_eq!(size, (24, 80));
        assert_eq!(dec.read_key().unwrap(), Key::Char(b'x'));
        assert!(dec.try_read_key().unwrap().is_none());
    }

    #[test]
    fn failed_fallback_still_delivers_keys() {
        let mut dec = decoder(b"ab");
        let mut out = Vec::new();
        assert!(size_from_cursor_report(&mut dec, &mut out).is_err());
        assert_eq!(dec.read_key().unwrap(), Key::Char(b'a'));
        assert_eq!(dec.read_key().unwrap(), Key::Char(b'b'));
    }

    #[test]
    fn restore_only_runs_while_entered() {
        let mut out = Vec::new();
        ENTERED.store(false, Ordering::SeqCst);
        assert!(!restore_entered(&mut out));
        assert!(out.is_empty());

        ENTERED.store(true, Ordering::SeqCst);
        assert!(restore_entered(&mut out));
        assert!(out.starts_with(CLEAR_SCREEN));
        assert!(!ENTERED.load(Ordering::SeqCst));

        out.clear();
        assert!(!restore_entered(&mut out), "second restore is a no-op");
        assert!(out.is_empty());
    }
}
