//! Timed key reads.

use std::time::Duration;

use super::decode::decode;
use super::key::KeyEvent;
use crate::error::{Result, TermError};
use crate::terminal::{Backend, Terminal};

/// Upper bound on one read; enough for any single key's encoding.
pub const MAX_KEY_BYTES: usize = 32;

impl<B: Backend> Terminal<B> {
    /// Wait for one keypress.
    ///
    /// Blocks until input is readable or `timeout` elapses (`None` waits
    /// forever). Returns `Ok(None)` on timeout. Reads a single chunk and
    /// decodes its first key; anything else in the chunk is dropped.
    ///
    /// # Errors
    /// `NotInRawMode` when the terminal is cooked, `MalformedInput` when
    /// input reached end-of-file.
    pub fn read_key(&mut self, timeout: Option<Duration>) -> Result<Option<KeyEvent>> {
        if !self.is_raw() {
            return Err(TermError::NotInRawMode);
        }

        if !self.backend_mut().wait_readable(timeout)? {
            return Ok(None);
        }

        let mut buf = [0u8; MAX_KEY_BYTES];
        let n = self.backend_mut().read(&mut buf)?;
        if n == 0 {
            return Err(TermError::MalformedInput("input closed".to_string()));
        }

        let key = decode(&buf[..n]);
        tracing::trace!(bytes = ?&buf[..n], ?key, "decoded key");
        Ok(key)
    }

    /// Block until a key arrives.
    pub fn next_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Some(key) = self.read_key(None)? {
                return Ok(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NamedKey;
    use crate::terminal::ScriptedBackend;

    fn raw_terminal(input: &[&[u8]]) -> Terminal<ScriptedBackend> {
        let mut term = Terminal::new(ScriptedBackend::tty().with_input(input));
        term.enter().unwrap();
        term
    }

    #[test]
    fn read_key_requires_raw_mode() {
        let mut term = Terminal::new(ScriptedBackend::tty().with_input(&[b"a"]));
        assert!(matches!(
            term.read_key(Some(Duration::from_millis(10))),
            Err(TermError::NotInRawMode)
        ));
    }

    #[test]
    fn read_key_decodes_each_chunk() {
        let mut term = raw_terminal(&[b"\x1b[A", b"x", b"\r"]);
        assert_eq!(term.read_key(None).unwrap(), Some(NamedKey::Up.into()));
        assert_eq!(term.read_key(None).unwrap(), Some(KeyEvent::char('x')));
        assert_eq!(term.read_key(None).unwrap(), Some(NamedKey::Enter.into()));
    }

    #[test]
    fn read_key_times_out_without_input() {
        let mut term = raw_terminal(&[]);
        let key = term.read_key(Some(Duration::from_millis(5))).unwrap();
        assert_eq!(key, None);
    }

    #[test]
    fn read_key_reports_closed_input() {
        let mut term = raw_terminal(&[b""]);
        assert!(matches!(
            term.read_key(None),
            Err(TermError::MalformedInput(_))
        ));
    }

    #[test]
    fn garbled_sequence_reads_as_esc() {
        let mut term = raw_terminal(&[b"\x1b[Q"]);
        assert_eq!(term.read_key(None).unwrap(), Some(NamedKey::Esc.into()));
    }
}
