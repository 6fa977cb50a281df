//! The raw-mode controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::backend::Backend;
use super::state::{Size, StateFlags, TerminalState};
use crate::capability::{self, ColorCapability};
use crate::env::{Environment, ProcessEnv};
use crate::error::{Result, TermError};
use crate::render::{self, ansi, StyleSpec};

/// How long `cursor_position` waits for the terminal's reply.
const CURSOR_REPLY_TIMEOUT: Duration = Duration::from_millis(100);

type ResizeListener = Box<dyn FnMut(Size)>;

/// One terminal session: a backend plus everything known about its state.
///
/// Raw mode is entered explicitly with [`enter`](Self::enter) and left with
/// [`exit`](Self::exit) or on drop. Screen and cursor operations emit their
/// escape bytes only when the corresponding flag actually changes.
pub struct Terminal<B: Backend> {
    backend: B,
    state: TerminalState<B::Mode>,
    env: Box<dyn Environment>,
    capability_override: Option<ColorCapability>,
    resize_listeners: Vec<ResizeListener>,
    resize_signal: Option<Arc<AtomicBool>>,
}

#[cfg(unix)]
impl Terminal<super::TtyBackend> {
    /// The process's own terminal on stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(super::TtyBackend::new())
    }
}

impl<B: Backend> Terminal<B> {
    pub fn new(backend: B) -> Self {
        Self::with_env(backend, ProcessEnv)
    }

    /// Use `env` instead of the process environment for capability and
    /// size fallbacks.
    pub fn with_env(backend: B, env: impl Environment + 'static) -> Self {
        Self {
            backend,
            state: TerminalState::new(),
            env: Box::new(env),
            capability_override: None,
            resize_listeners: Vec::new(),
            resize_signal: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn state(&self) -> &TerminalState<B::Mode> {
        &self.state
    }

    pub fn is_raw(&self) -> bool {
        self.state.is_raw()
    }

    /// Switch the terminal into raw mode.
    ///
    /// Captures the current mode so [`exit`](Self::exit) can put it back,
    /// refreshes the cached size and capability, and arms the process-exit
    /// guard. Does nothing if already raw.
    ///
    /// # Errors
    /// `NotATerminal` when stdin is not interactive, `Io` when the mode
    /// cannot be read or changed.
    pub fn enter(&mut self) -> Result<()> {
        if !self.backend.input_is_tty() {
            return Err(TermError::NotATerminal);
        }
        if self.state.is_raw() {
            return Ok(());
        }

        let original = self.backend.capture_mode()?;
        self.backend.enable_raw(&original)?;
        self.backend.arm_exit_guard(&original);
        self.state.mark_raw(original);
        self.backend.track_flags(self.state.flags());

        let size = self.current_size();
        self.state.set_size(size);
        let capability = self.detect_capability();
        self.state.set_capability(Some(capability));

        tracing::debug!(%size, capability = capability.name(), "entered raw mode");
        Ok(())
    }

    /// Restore the terminal. Never fails; problems are logged.
    pub fn exit(&mut self) {
        if let Err(e) = self.try_exit() {
            tracing::warn!(error = %e, "terminal restore failed");
        }
    }

    /// Like [`exit`](Self::exit) but reports a failed restore.
    ///
    /// Every step runs even if an earlier one fails, and the flags are
    /// cleared regardless, so a second call is a no-op.
    ///
    /// # Errors
    /// `RestoreFailed` when the original mode could not be applied.
    pub fn try_exit(&mut self) -> Result<()> {
        if !self.state.is_raw() {
            return Ok(());
        }

        let flags = self.state.flags();
        let mut reset = String::new();
        if flags.contains(StateFlags::CURSOR_HIDDEN) {
            reset.push_str(ansi::SHOW_CURSOR);
        }
        if flags.contains(StateFlags::ALT_SCREEN) {
            reset.push_str(ansi::LEAVE_ALT_SCREEN);
        }
        let written = if reset.is_empty() {
            Ok(())
        } else {
            self.backend
                .write_all(reset.as_bytes())
                .and_then(|_| self.backend.flush())
        };

        let saved = self.state.mark_cooked();
        let restored = self.backend.restore_mode(saved.as_ref());
        self.backend.disarm_exit_guard();

        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write terminal reset sequence");
        }
        restored.map_err(TermError::RestoreFailed)?;
        tracing::debug!("left raw mode");
        Ok(())
    }

    /// Write `text` as-is.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.backend.write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.backend.flush()?;
        Ok(())
    }

    fn emit(&mut self, bytes: &str) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.backend.write_all(bytes.as_bytes())?;
        self.backend.flush()?;
        Ok(())
    }

    /// Emit `bytes` and update `flag` only when it differs from `on`.
    fn toggle(&mut self, flag: StateFlags, on: bool, bytes: &str) -> Result<()> {
        if self.state.flags().contains(flag) == on {
            return Ok(());
        }
        self.emit(bytes)?;
        self.state.set_flag(flag, on);
        self.backend.track_flags(self.state.flags());
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        self.toggle(StateFlags::CURSOR_HIDDEN, true, ansi::HIDE_CURSOR)
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        self.toggle(StateFlags::CURSOR_HIDDEN, false, ansi::SHOW_CURSOR)
    }

    pub fn enter_alternate_screen(&mut self) -> Result<()> {
        self.toggle(StateFlags::ALT_SCREEN, true, ansi::ENTER_ALT_SCREEN)
    }

    pub fn leave_alternate_screen(&mut self) -> Result<()> {
        self.toggle(StateFlags::ALT_SCREEN, false, ansi::LEAVE_ALT_SCREEN)
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        self.emit(ansi::CLEAR_SCREEN)
    }

    pub fn clear_line(&mut self) -> Result<()> {
        self.emit(ansi::CLEAR_LINE)
    }

    /// Move to a 0-indexed cell.
    pub fn move_to(&mut self, col: u16, row: u16) -> Result<()> {
        self.emit(&ansi::move_to(col, row))
    }

    pub fn move_up(&mut self, n: u16) -> Result<()> {
        self.emit(&ansi::move_up(n))
    }

    pub fn move_down(&mut self, n: u16) -> Result<()> {
        self.emit(&ansi::move_down(n))
    }

    pub fn move_forward(&mut self, n: u16) -> Result<()> {
        self.emit(&ansi::move_forward(n))
    }

    pub fn move_back(&mut self, n: u16) -> Result<()> {
        self.emit(&ansi::move_back(n))
    }

    /// Ask the terminal where the cursor is, as 0-indexed `(col, row)`.
    ///
    /// # Errors
    /// `NotInRawMode` when cooked; `MalformedInput` when no well-formed
    /// reply arrives within 100 ms.
    pub fn cursor_position(&mut self) -> Result<(u16, u16)> {
        if !self.state.is_raw() {
            return Err(TermError::NotInRawMode);
        }
        self.emit(ansi::QUERY_CURSOR_POSITION)?;

        let deadline = Instant::now() + CURSOR_REPLY_TIMEOUT;
        let mut reply = Vec::new();
        let mut buf = [0u8; 32];
        while !reply.contains(&b'R') {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() || !self.backend.wait_readable(Some(left))? {
                break;
            }
            let n = self.backend.read(&mut buf)?;
            if n == 0 {
                break;
            }
            reply.extend_from_slice(&buf[..n]);
        }

        ansi::parse_cursor_report(&reply).ok_or_else(|| {
            TermError::MalformedInput(format!(
                "bad cursor position reply: {:?}",
                String::from_utf8_lossy(&reply)
            ))
        })
    }

    /// Size as of the last refresh.
    pub fn size(&self) -> Size {
        self.state.size()
    }

    /// Query the size now: the device, then `COLUMNS`/`LINES`, then 80x24.
    pub fn current_size(&self) -> Size {
        self.backend
            .window_size()
            .or_else(|| size_from_env(self.env.as_ref()))
            .unwrap_or(Size::FALLBACK)
    }

    /// Call `listener` with the new size whenever [`poll_resize`](Self::poll_resize)
    /// observes a change.
    pub fn on_resize(&mut self, listener: impl FnMut(Size) + 'static) {
        if self.resize_signal.is_none() {
            self.resize_signal = self.backend.resize_signal();
        }
        self.resize_listeners.push(Box::new(listener));
    }

    /// Check for a size change and notify listeners synchronously.
    ///
    /// Returns the new size if it changed.
    pub fn poll_resize(&mut self) -> Option<Size> {
        if let Some(signal) = &self.resize_signal {
            if !signal.swap(false, Ordering::SeqCst) {
                return None;
            }
        }

        let size = self.current_size();
        if size == self.state.size() {
            return None;
        }
        tracing::debug!(from = %self.state.size(), to = %size, "terminal resized");
        self.state.set_size(size);
        for listener in &mut self.resize_listeners {
            listener(size);
        }
        Some(size)
    }

    /// Pin the capability regardless of the environment. `None` resumes
    /// detection.
    pub fn set_capability_override(&mut self, capability: Option<ColorCapability>) {
        self.capability_override = capability;
    }

    /// Color capability, detected on first use and cached.
    pub fn capability(&mut self) -> ColorCapability {
        if let Some(pinned) = self.capability_override {
            return pinned;
        }
        if let Some(cached) = self.state.capability() {
            return cached;
        }
        let detected = self.detect_capability();
        self.state.set_capability(Some(detected));
        detected
    }

    fn detect_capability(&self) -> ColorCapability {
        let capability = capability::detect(self.env.as_ref(), self.backend.output_is_tty());
        tracing::debug!(capability = capability.name(), "detected color capability");
        capability
    }

    /// Style `text` for this terminal; plain text when colors are off.
    pub fn style(&mut self, text: &str, spec: &StyleSpec) -> String {
        match self.capability() {
            ColorCapability::None => text.to_string(),
            capability => render::style(text, spec, capability),
        }
    }
}

impl<B: Backend> Drop for Terminal<B> {
    fn drop(&mut self) {
        self.exit();
    }
}

fn size_from_env(env: &dyn Environment) -> Option<Size> {
    let parse = |key: &str| {
        env.var(key)
            .and_then(|v| v.trim().parse::<u16>().ok())
            .filter(|&n| n > 0)
    };
    Some(Size::new(parse("COLUMNS")?, parse("LINES")?))
}
