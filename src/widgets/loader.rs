//! Braille spinner driven by caller ticks.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::capability::ColorCapability;
use crate::render::{style, StyleSpec};

/// Spinner frames, in order.
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Time each frame stays on screen.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(60);

/// An indeterminate activity indicator.
///
/// There is no timer thread: the caller calls [`tick`](Self::tick) as
/// often as it likes and the spinner advances one frame per elapsed
/// interval.
#[derive(Debug, Clone)]
pub struct Loader {
    message: String,
    frame: usize,
    last: Instant,
    glyph: StyleSpec,
    capability: ColorCapability,
}

impl Loader {
    pub fn new(message: impl Into<String>) -> Self {
        Self::starting_at(message, Instant::now())
    }

    /// A loader whose first frame began at `now`.
    pub fn starting_at(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            frame: 0,
            last: now,
            glyph: StyleSpec::default(),
            capability: ColorCapability::None,
        }
    }

    /// Style the spinner glyph.
    pub fn styled(mut self, glyph: StyleSpec, capability: ColorCapability) -> Self {
        self.glyph = glyph;
        self.capability = capability;
        self
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Advance by the number of whole intervals since the last step.
    ///
    /// Returns whether the frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last);
        let steps = elapsed.as_millis() / FRAME_INTERVAL.as_millis();
        if steps == 0 {
            return false;
        }
        self.frame = (self.frame + (steps % FRAMES.len() as u128) as usize) % FRAMES.len();
        let advance = FRAME_INTERVAL.as_millis() * steps;
        self.last += u64::try_from(advance).map_or(elapsed, Duration::from_millis);
        true
    }

    /// Current glyph followed by the message.
    pub fn render_line(&self) -> String {
        format!(
            "{} {}",
            style(FRAMES[self.frame], &self.glyph, self.capability),
            self.message
        )
    }

    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "\r\x1b[2K{}", self.render_line())?;
        out.flush()
    }

    /// Replace the spinner line with `message` and end the line.
    pub fn finish(&self, out: &mut impl Write, message: &str) -> io::Result<()> {
        write!(out, "\r\x1b[2K{message}\r\n")?;
        out.flush()
    }
}
