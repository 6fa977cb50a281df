//! The OS seam under [`Terminal`](super::Terminal).

use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use super::state::{Size, StateFlags};

/// Device operations a [`Terminal`](super::Terminal) needs.
///
/// [`TtyBackend`](super::TtyBackend) talks to the real terminal;
/// [`ScriptedBackend`](super::ScriptedBackend) replays canned input and
/// records output for tests.
pub trait Backend {
    /// Saved line-discipline settings, opaque to the terminal.
    type Mode: Clone;

    /// Whether input comes from an interactive device.
    fn input_is_tty(&self) -> bool;

    /// Whether output goes to an interactive device.
    fn output_is_tty(&self) -> bool;

    /// Capture the current line discipline.
    fn capture_mode(&mut self) -> io::Result<Self::Mode>;

    /// Switch to raw input, starting from `original`.
    fn enable_raw(&mut self, original: &Self::Mode) -> io::Result<()>;

    /// Put back `saved`, or a sane cooked mode with echo when `None`.
    fn restore_mode(&mut self, saved: Option<&Self::Mode>) -> io::Result<()>;

    /// Wait until input is readable. `Ok(false)` means the timeout elapsed.
    fn wait_readable(&mut self, timeout: Option<Duration>) -> io::Result<bool>;

    /// Read whatever input is available into `buf`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Window size reported by the device, if any.
    fn window_size(&self) -> Option<Size>;

    /// Arrange for `saved` to be restored if the process dies while raw.
    fn arm_exit_guard(&mut self, _saved: &Self::Mode) {}

    /// Keep the exit guard's copy of the mode flags current.
    fn track_flags(&mut self, _flags: StateFlags) {}

    /// The terminal was restored normally; the guard has nothing left to do.
    fn disarm_exit_guard(&mut self) {}

    /// A flag the OS sets when the window changes size.
    ///
    /// `None` means there is no such signal and callers must compare sizes.
    fn resize_signal(&mut self) -> Option<Arc<AtomicBool>> {
        None
    }
}

/// Lets a [`Terminal`](super::Terminal) borrow a backend it does not own.
impl<B: Backend + ?Sized> Backend for &mut B {
    type Mode = B::Mode;

    fn input_is_tty(&self) -> bool {
        (**self).input_is_tty()
    }

    fn output_is_tty(&self) -> bool {
        (**self).output_is_tty()
    }

    fn capture_mode(&mut self) -> io::Result<Self::Mode> {
        (**self).capture_mode()
    }

    fn enable_raw(&mut self, original: &Self::Mode) -> io::Result<()> {
        (**self).enable_raw(original)
    }

    fn restore_mode(&mut self, saved: Option<&Self::Mode>) -> io::Result<()> {
        (**self).restore_mode(saved)
    }

    fn wait_readable(&mut self, timeout: Option<Duration>) -> io::Result<bool> {
        (**self).wait_readable(timeout)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn window_size(&self) -> Option<Size> {
        (**self).window_size()
    }

    fn arm_exit_guard(&mut self, saved: &Self::Mode) {
        (**self).arm_exit_guard(saved)
    }

    fn track_flags(&mut self, flags: StateFlags) {
        (**self).track_flags(flags)
    }

    fn disarm_exit_guard(&mut self) {
        (**self).disarm_exit_guard()
    }

    fn resize_signal(&mut self) -> Option<Arc<AtomicBool>> {
        (**self).resize_signal()
    }
}
