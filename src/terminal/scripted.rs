//! An in-memory backend for tests.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::backend::Backend;
use super::state::{Size, StateFlags};

/// One call into the backend's mode or guard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeCall {
    Capture,
    EnableRaw,
    /// `true` when a saved mode was supplied
    Restore(bool),
    Arm,
    Disarm,
}

/// Saved mode for [`ScriptedBackend`]; a counter so captures are distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedMode(pub u32);

/// Backend that replays canned input and records everything written.
///
/// Each input chunk becomes readable in turn and is returned by a single
/// `read`. An empty chunk reads as end-of-file. Once the script runs out,
/// timed waits report a timeout and untimed waits fail with
/// `UnexpectedEof` instead of blocking forever.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    tty: bool,
    input: VecDeque<Vec<u8>>,
    output: Vec<u8>,
    size: Option<Size>,
    calls: Vec<ModeCall>,
    tracked: Option<StateFlags>,
    captures: u32,
    fail_restore: bool,
    fail_capture: bool,
}

impl ScriptedBackend {
    /// A backend that claims to be an interactive terminal.
    pub fn tty() -> Self {
        Self {
            tty: true,
            ..Self::default()
        }
    }

    /// A backend whose input is a pipe or file.
    pub fn not_tty() -> Self {
        Self::default()
    }

    /// Queue input chunks.
    pub fn with_input(mut self, chunks: &[&[u8]]) -> Self {
        self.input.extend(chunks.iter().map(|c| c.to_vec()));
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Make every `restore_mode` call fail.
    pub fn failing_restore(mut self) -> Self {
        self.fail_restore = true;
        self
    }

    /// Make `capture_mode` fail.
    pub fn failing_capture(mut self) -> Self {
        self.fail_capture = true;
        self
    }

    /// Queue another input chunk.
    pub fn push_input(&mut self, chunk: &[u8]) {
        self.input.push_back(chunk.to_vec());
    }

    pub fn set_size(&mut self, size: Option<Size>) {
        self.size = size;
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output as lossy text.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Return and clear the recorded output.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    pub fn calls(&self) -> &[ModeCall] {
        &self.calls
    }

    /// Last flags mirrored into the exit guard.
    pub fn tracked_flags(&self) -> Option<StateFlags> {
        self.tracked
    }

    /// Input chunks not yet read.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

impl Backend for ScriptedBackend {
    type Mode = ScriptedMode;

    fn input_is_tty(&self) -> bool {
        self.tty
    }

    fn output_is_tty(&self) -> bool {
        self.tty
    }

    fn capture_mode(&mut self) -> io::Result<Self::Mode> {
        self.calls.push(ModeCall::Capture);
        if self.fail_capture {
            return Err(io::Error::new(io::ErrorKind::Other, "capture failed"));
        }
        self.captures += 1;
        Ok(ScriptedMode(self.captures))
    }

    fn enable_raw(&mut self, _original: &Self::Mode) -> io::Result<()> {
        self.calls.push(ModeCall::EnableRaw);
        Ok(())
    }

    fn restore_mode(&mut self, saved: Option<&Self::Mode>) -> io::Result<()> {
        self.calls.push(ModeCall::Restore(saved.is_some()));
        if self.fail_restore {
            return Err(io::Error::new(io::ErrorKind::Other, "restore failed"));
        }
        Ok(())
    }

    fn wait_readable(&mut self, timeout: Option<Duration>) -> io::Result<bool> {
        if !self.input.is_empty() {
            return Ok(true);
        }
        match timeout {
            Some(_) => Ok(false),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted input exhausted",
            )),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut chunk) = self.input.pop_front() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            chunk.drain(..n);
            self.input.push_front(chunk);
        }
        Ok(n)
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn window_size(&self) -> Option<Size> {
        self.size
    }

    fn arm_exit_guard(&mut self, _saved: &Self::Mode) {
        self.calls.push(ModeCall::Arm);
    }

    fn track_flags(&mut self, flags: StateFlags) {
        self.tracked = Some(flags);
    }

    fn disarm_exit_guard(&mut self) {
        self.calls.push(ModeCall::Disarm);
        self.tracked = None;
    }
}
