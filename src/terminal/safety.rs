//! Process-exit safety net.
//!
//! When a [`TtyBackend`](super::TtyBackend) enters raw mode it arms this
//! guard with the original termios. If the process receives a terminating
//! signal, calls `exit`, or aborts on panic without restoring the
//! terminal, the guard writes the same cursor/alt-screen reset bytes as a
//! normal exit and applies the saved termios.
//!
//! Unwinding panics are left to `Drop for Terminal`: a panic that is
//! caught (a joined worker thread, `catch_unwind`) must not put the device
//! back into cooked mode underneath a terminal that still believes it is
//! raw.
//!
//! Everything reachable from [`restore_now`] is async-signal-safe:
//! atomics, `try_lock`, `write(2)` and `tcsetattr(3)`.

use std::os::fd::BorrowedFd;
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Mutex, Once, TryLockError};

use nix::sys::termios::{self, SetArg, Termios};
use signal_hook::consts::{SIGHUP, SIGQUIT, SIGTERM};

use super::state::StateFlags;
use crate::render::ansi;

/// Signals that terminate the process by default and must not leave the
/// terminal raw. `SIGINT` is not generated by the keyboard in raw mode.
const GUARDED_SIGNALS: [i32; 3] = [SIGTERM, SIGHUP, SIGQUIT];

static INSTALL: Once = Once::new();
static ARMED: AtomicBool = AtomicBool::new(false);
static FLAGS: AtomicU8 = AtomicU8::new(0);
static SAVED: Mutex<Option<Saved>> = Mutex::new(None);

struct Saved {
    fd: RawFd,
    termios: Termios,
}

/// Arm the guard for `fd` with its original `termios`.
///
/// A negative `fd` arms the reset bytes only.
pub(crate) fn arm(fd: RawFd, termios: Termios) {
    install_hooks();
    match SAVED.lock() {
        Ok(mut saved) => *saved = Some(Saved { fd, termios }),
        Err(poisoned) => *poisoned.into_inner() = Some(Saved { fd, termios }),
    }
    FLAGS.store(StateFlags::RAW.bits(), Ordering::SeqCst);
    ARMED.store(true, Ordering::SeqCst);
    tracing::debug!(fd, "exit guard armed");
}

/// Mirror the terminal's current flags.
pub(crate) fn track(flags: StateFlags) {
    FLAGS.store(flags.bits(), Ordering::SeqCst);
}

/// Stand down after a normal restore.
pub(crate) fn disarm() {
    if ARMED.swap(false, Ordering::SeqCst) {
        tracing::debug!("exit guard disarmed");
    }
    FLAGS.store(0, Ordering::SeqCst);
    if let Ok(mut saved) = SAVED.try_lock() {
        *saved = None;
    }
}

/// Whether the guard would restore anything right now.
pub fn is_armed() -> bool {
    ARMED.load(Ordering::SeqCst)
}

/// Restore the terminal if armed. Runs at most once per arming.
///
/// Returns whether a restore was attempted.
pub fn restore_now() -> bool {
    if !ARMED.swap(false, Ordering::SeqCst) {
        return false;
    }

    let flags = StateFlags::from_bits_truncate(FLAGS.swap(0, Ordering::SeqCst));
    write_reset(flags, write_stdout);

    let guard = match SAVED.try_lock() {
        Ok(guard) => Some(guard),
        Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => None,
    };
    if let Some(saved) = guard.as_ref().and_then(|g| g.as_ref()) {
        if saved.fd >= 0 {
            // SAFETY: the descriptor is stdin, which stays open for the
            // life of the process.
            let fd = unsafe { BorrowedFd::borrow_raw(saved.fd) };
            let _ = termios::tcsetattr(fd, SetArg::TCSANOW, &saved.termios);
        }
    }
    true
}

/// Emit the reset sequence for `flags`: show the cursor, then leave the
/// alternate screen, each only if set.
fn write_reset(flags: StateFlags, mut write: impl FnMut(&[u8])) {
    if flags.contains(StateFlags::CURSOR_HIDDEN) {
        write(ansi::SHOW_CURSOR.as_bytes());
    }
    if flags.contains(StateFlags::ALT_SCREEN) {
        write(ansi::LEAVE_ALT_SCREEN.as_bytes());
    }
}

fn write_stdout(bytes: &[u8]) {
    let _ = nix::unistd::write(libc::STDOUT_FILENO, bytes);
}

extern "C" fn restore_at_exit() {
    restore_now();
}

fn install_hooks() {
    INSTALL.call_once(|| {
        #[cfg(panic = "abort")]
        {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                restore_now();
                previous(info);
            }));
        }

        for signal in GUARDED_SIGNALS {
            // SAFETY: the handler only calls async-signal-safe functions.
            let registered = unsafe {
                signal_hook::low_level::register(signal, move || {
                    restore_now();
                    let _ = signal_hook::low_level::emulate_default_handler(signal);
                })
            };
            if let Err(e) = registered {
                tracing::warn!(signal, error = %e, "failed to register signal guard");
            }
        }

        // SAFETY: registering a plain extern "C" function with no captures.
        if unsafe { libc::atexit(restore_at_exit) } != 0 {
            tracing::warn!("failed to register atexit guard");
        }
    });
}
