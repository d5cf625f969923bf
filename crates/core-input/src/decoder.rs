use crate::{ByteSource, ESC, InputError, Key, READ_TIMEOUT};
use std::collections::VecDeque;
use std::time::Duration;

/// Upper bound on bytes read while waiting for a cursor position report,
/// typed-ahead keys included.
const REPLY_LIMIT: usize = 64;

pub struct KeyDecoder<S> {
    source: S,
    timeout: Duration,
    /// Bytes read ahead of time that still have to be decoded as keys.
    pending: VecDeque<u8>,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            timeout: READ_TIMEOUT,
            pending: VecDeque::new(),
        }
    }

    /// Read a cursor position report from the source.
    ///
    /// Keystrokes that arrive around the report are queued and decoded by
    /// later `read_key` calls. `Ok(None)` when no well-formed report came.
    pub fn query_cursor_report(&mut self) -> Result<Option<(u16, u16)>, InputError> {
        let reply = read_cursor_report(&mut self.source, self.timeout)?;
        self.pending.extend(reply.stray);
        Ok(reply.size)
    }

    /// Block until a key is available.
    pub fn read_key(&mut self) -> Result<Key, InputError> {
        loop {
            if let Some(key) = self.try_read_key()? {
                return Ok(key);
            }
        }
    }

    /// Single poll: `Ok(None)` when no byte arrived within the timeout.
    pub fn try_read_key(&mut self) -> Result<Option<Key>, InputError> {
        let Some(b) = self.next()? else {
            return Ok(None);
        };
        let key = if b == ESC {
            self.decode_escape()?
        } else {
            Key::from_byte(b)
        };
        tracing::trace!(target: "input", ?key, "key");
        Ok(Some(key))
    }

    fn next(&mut self) -> Result<Option<u8>, InputError> {
        match self.pending.pop_front() {
            Some(b) => Ok(Some(b)),
            None => self.source.read_byte(self.timeout),
        }
    }

    fn decode_escape(&mut self) -> Result<Key, InputError> {
        let Some(s0) = self.next()? else {
            return Ok(Key::Escape);
        };
        let Some(s1) = self.next()? else {
            tracing::trace!(target: "input", s0, "escape_truncated");
            return Ok(Key::Escape);
        };
        let key = match (s0, s1) {
            (b'[', d @ b'0'..=b'9') => {
                let Some(s2) = self.next()? else {
                    tracing::trace!(target: "input", s0, s1, "escape_truncated");
                    return Ok(Key::Escape);
                };
                if s2 != b'~' {
                    None
                } else {
                    match d {
                        b'1' | b'7' => Some(Key::Home),
                        b'4' | b'8' => Some(Key::End),
                        b'3' => Some(Key::Delete),
                        b'5' => Some(Key::PageUp),
                        b'6' => Some(Key::PageDown),
                        _ => None,
                    }
                }
            }
            (b'[', b'A') => Some(Key::ArrowUp),
            (b'[', b'B') => Some(Key::ArrowDown),
            (b'[', b'C') => Some(Key::ArrowRight),
            (b'[', b'D') => Some(Key::ArrowLeft),
            (b'[' | b'O', b'H') => Some(Key::Home),
            (b'[' | b'O', b'F') => Some(Key::End),
            _ => None,
        };
        Ok(key.unwrap_or_else(|| {
            tracing::trace!(target: "input", s0, s1, "escape_unknown");
            Key::Escape
        }))
    }
}

/// Parse a cursor position report `ESC [ rows ; cols R`.
pub fn parse_cursor_report(buf: &[u8]) -> Option<(u16, u16)> {
    let body = buf.strip_prefix(&[ESC, b'['])?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// Outcome of waiting for a cursor position report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorReply {
    /// Parsed `(rows, cols)`, when a well-formed report arrived.
    pub size: Option<(u16, u16)>,
    /// Bytes that were not part of the report, in arrival order.
    pub stray: Vec<u8>,
}

/// Read from `source` until a complete `ESC [ rows ; cols R` report has
/// arrived, the source times out, or the read limit is hit.
pub fn read_cursor_report<S: ByteSource>(
    source: &mut S,
    timeout: Duration,
) -> Result<CursorReply, InputError> {
    let mut buf = Vec::with_capacity(REPLY_LIMIT);
    while buf.len() < REPLY_LIMIT {
        let Some(b) = source.read_byte(timeout)? else {
            break;
        };
        buf.push(b);
        if b == b'R'
            && let Some(reply) = split_report(&buf)
        {
            return Ok(reply);
        }
    }
    tracing::debug!(target: "input", stray = buf.len(), "cursor_report_missing");
    Ok(CursorReply {
        size: None,
        stray: buf,
    })
}

/// Split `buf`, which ends in `R`, into stray bytes and the trailing report.
fn split_report(buf: &[u8]) -> Option<CursorReply> {
    let start = buf.windows(2).rposition(|w| w == [ESC, b'['])?;
    let size = parse_cursor_report(&buf[start..])?;
    Some(CursorReply {
        size: Some(size),
        stray: buf[..start].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn decode(bytes: &[u8]) -> Key {
        let src: VecDeque<u8> = bytes.iter().copied().collect();
        let mut dec = KeyDecoder::new(src);
        dec.read_key().unwrap()
    }

    #[test]
    fn cursor_report_parses() {
        assert_eq!(parse_cursor_report(b"\x1b[24;80R"), Some((24, 80)));
        assert_eq!(parse_cursor_report(b"\x1b[24;80"), Some((24, 80)));
        assert_eq!(parse_cursor_report(b"24;80R"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24R"), None);
        assert_eq!(parse_cursor_report(b"\x1b[a;bR"), None);
    }

    #[test]
    fn cursor_report_from_source_stops_at_terminator() {
        let mut src: VecDeque<u8> = b"\x1b[50;132Rx".iter().copied().collect();
        let got = read_cursor_report(&mut src, READ_TIMEOUT).unwrap();
        assert_eq!(got.size, Some((50, 132)));
        assert!(got.stray.is_empty());
        assert_eq!(src.pop_front(), Some(b'x'));
    }

    #[test]
    fn cursor_report_keeps_typed_ahead_bytes() {
        let mut src: VecDeque<u8> = b"aR\x1b[A\x1b[24;80R".iter().copied().collect();
        let got = read_cursor_report(&mut src, READ_TIMEOUT).unwrap();
        assert_eq!(got.size, Some((24, 80)));
        assert_eq!(got.stray, b"aR\x1b[A");
    }

    #[test]
    fn missing_report_returns_everything_as_stray() {
        let mut src: VecDeque<u8> = b"hi".iter().copied().collect();
        let got = read_cursor_report(&mut src, READ_TIMEOUT).unwrap();
        assert_eq!(got.size, None);
        assert_eq!(got.stray, b"hi");
    }

    #[test]
    fn stray_bytes_from_size_query_decode_as_keys() {
        let src: VecDeque<u8> = b"x\x1b[C\x1b[24;80Ry".iter().copied().collect();
        let mut dec = KeyDecoder::new(src);
        assert_eq!(dec.query_cursor_report().unwrap(), Some((24, 80)));
        assert_eq!(dec.read_key().unwrap(), Key::Char(b'x'));
        assert_eq!(dec.read_key().unwrap(), Key::ArrowRight);
        assert_eq!(dec.read_key().unwrap(), Key::Char(b'y'));
        assert!(dec.try_read_key().unwrap().is_none());
    }

    #[test]
    fn arrow_sequences() {
        assert_eq!(decode(b"\x1b[A"), Key::ArrowUp);
        assert_eq!(decode(b"\x1b[B"), Key::ArrowDown);
        assert_eq!(decode(b"\x1b[C"), Key::ArrowRight);
        assert_eq!(decode(b"\x1b[D"), Key::ArrowLeft);
    }

    #[test]
    fn truncated_escape_is_escape() {
        assert_eq!(decode(b"\x1b"), Key::Escape);
        assert_eq!(decode(b"\x1b["), Key::Escape);
        assert_eq!(decode(b"\x1b[5"), Key::Escape);
    }

    #[test]
    fn try_read_key_reports_timeout() {
        let mut dec = KeyDecoder::new(VecDeque::new());
        assert!(dec.try_read_key().unwrap().is_none());
    }
}
