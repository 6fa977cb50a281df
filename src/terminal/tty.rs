//! The real terminal on stdin/stdout.

use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

use super::backend::Backend;
use super::safety;
use super::state::{Size, StateFlags};

/// Backend over the process's standard input and output.
///
/// Input is read straight from the file descriptor (bypassing std's
/// buffered stdin) so readiness polling reflects what is actually unread.
pub struct TtyBackend {
    stdin: io::Stdin,
    stdout: io::Stdout,
    winch: Option<Arc<AtomicBool>>,
}

impl TtyBackend {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            winch: None,
        }
    }
}

impl Default for TtyBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags cleared on input to get byte-at-a-time reads without echo.
fn make_raw(termios: &mut Termios) {
    termios.input_flags &= !(InputFlags::BRKINT
        | InputFlags::ICRNL
        | InputFlags::INPCK
        | InputFlags::ISTRIP
        | InputFlags::IXON);
    termios.control_flags |= ControlFlags::CS8;
    termios.local_flags &=
        !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);
    termios.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
    termios.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
}

/// Canonical mode with echo, used when no original mode was captured.
fn make_cooked(termios: &mut Termios) {
    termios.input_flags |= InputFlags::BRKINT | InputFlags::ICRNL | InputFlags::IXON;
    termios.output_flags |= OutputFlags::OPOST;
    termios.local_flags |=
        LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG;
}

/// Milliseconds until `deadline` for `poll`, rounded up so a
/// sub-millisecond remainder still waits; -1 waits forever.
fn poll_timeout(deadline: Option<Instant>) -> i32 {
    match deadline {
        None => -1,
        Some(deadline) => {
            let left = deadline.saturating_duration_since(Instant::now());
            let ms = (left.as_micros() + 999) / 1000;
            ms.min(i32::MAX as u128) as i32
        }
    }
}

impl Backend for TtyBackend {
    type Mode = Termios;

    fn input_is_tty(&self) -> bool {
        atty::is(atty::Stream::Stdin)
    }

    fn output_is_tty(&self) -> bool {
        atty::is(atty::Stream::Stdout)
    }

    fn capture_mode(&mut self) -> io::Result<Self::Mode> {
        Ok(termios::tcgetattr(&self.stdin)?)
    }

    fn enable_raw(&mut self, original: &Self::Mode) -> io::Result<()> {
        let mut raw = original.clone();
        make_raw(&mut raw);
        Ok(termios::tcsetattr(&self.stdin, SetArg::TCSAFLUSH, &raw)?)
    }

    fn restore_mode(&mut self, saved: Option<&Self::Mode>) -> io::Result<()> {
        let termios = match saved {
            Some(termios) => termios.clone(),
            None => {
                let mut termios = termios::tcgetattr(&self.stdin)?;
                make_cooked(&mut termios);
                termios
            }
        };
        Ok(termios::tcsetattr(&self.stdin, SetArg::TCSAFLUSH, &termios)?)
    }

    fn wait_readable(&mut self, timeout: Option<Duration>) -> io::Result<bool> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            let mut fds = [PollFd::new(&self.stdin, PollFlags::POLLIN)];
            match poll(&mut fds, poll_timeout(deadline)) {
                Ok(0) => return Ok(false),
                Ok(_) => return Ok(true),
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match nix::unistd::read(self.stdin.as_raw_fd(), buf) {
                Ok(n) => return Ok(n),
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stdout.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn window_size(&self) -> Option<Size> {
        terminal_size::terminal_size()
            .map(|(terminal_size::Width(w), terminal_size::Height(h))| Size::new(w, h))
            .filter(|size| size.cols > 0 && size.rows > 0)
    }

    fn arm_exit_guard(&mut self, saved: &Self::Mode) {
        safety::arm(self.stdin.as_raw_fd(), saved.clone());
    }

    fn track_flags(&mut self, flags: StateFlags) {
        safety::track(flags);
    }

    fn disarm_exit_guard(&mut self) {
        safety::disarm();
    }

    fn resize_signal(&mut self) -> Option<Arc<AtomicBool>> {
        if self.winch.is_none() {
            let flag = Arc::new(AtomicBool::new(false));
            match signal_hook::flag::register(signal_hook::consts::SIGWINCH, Arc::clone(&flag)) {
                Ok(_) => self.winch = Some(flag),
                Err(e) => tracing::warn!(error = %e, "failed to watch SIGWINCH"),
            }
        }
        self.winch.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Termios {
        // SAFETY: an all-zero termios is valid plain data.
        Termios::from(unsafe { std::mem::zeroed::<libc::termios>() })
    }

    #[test]
    fn raw_mode_clears_echo_and_canonical() {
        let mut termios = blank();
        termios.local_flags = LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::ISIG;
        termios.input_flags = InputFlags::ICRNL;
        make_raw(&mut termios);
        assert!(!termios.local_flags.intersects(
            LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::ISIG
        ));
        assert!(!termios.input_flags.contains(InputFlags::ICRNL));
        assert!(termios.control_flags.contains(ControlFlags::CS8));
        assert_eq!(termios.control_chars[SpecialCharacterIndices::VMIN as usize], 1);
    }

    #[test]
    fn cooked_mode_restores_echo() {
        let mut termios = blank();
        make_cooked(&mut termios);
        assert!(termios.local_flags.contains(LocalFlags::ECHO | LocalFlags::ICANON));
        assert!(termios.output_flags.contains(OutputFlags::OPOST));
    }

    #[test]
    fn poll_timeout_rounds_up() {
        assert_eq!(poll_timeout(None), -1);
        let soon = Instant::now() + Duration::from_micros(1500);
        assert!(matches!(poll_timeout(Some(soon)), 1 | 2));
        let past = Instant::now() - Duration::from_millis(5);
        assert_eq!(poll_timeout(Some(past)), 0);
    }
}
