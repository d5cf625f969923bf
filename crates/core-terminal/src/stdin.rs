use core_input::{ByteSource, InputError};
use std::io;
use std::time::Duration;

/// Raw stdin reader with a poll-based timeout.
#[derive(Debug, Default)]
pub struct StdinBytes;

impl StdinBytes {
    pub fn new() -> Self {
        Self
    }
}

fn transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
    )
}

impl ByteSource for StdinBytes {
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>, InputError> {
        let mut pfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;
        // SAFETY: `pfd` is a valid pollfd for the duration of the call.
        let ready = unsafe { libc::poll(&mut pfd, 1, millis) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            return if transient(&err) { Ok(None) } else { Err(err.into()) };
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = 0u8;
        // SAFETY: reads at most one byte into a live stack slot.
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            // Readable but empty: the other end is gone.
            0 => Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
            _ => {
                let err = io::Error::last_os_error();
                if transient(&err) {
                    Ok(None)
                } else {
                    tracing::error!(target: "input", error = %err, "stdin_read_failed");
                    Err(err.into())
                }
            }
        }
    }
}
