//! Single-line progress bar.
//!
//! Renders `label [████░░░░] 42% 21/50 3.5/s ETA 00:08` sized to a fixed
//! width and redraws it in place with a carriage return.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use super::clock::{format_duration, Clock, SystemClock};
use crate::capability::ColorCapability;
use crate::render::{display_width, style, StyleSpec};

const FILLED: char = '█';
const EMPTY: char = '░';

/// Progress toward a known total.
#[derive(Debug, Clone)]
pub struct ProgressBar<C: Clock = SystemClock> {
    total: u64,
    current: u64,
    width: usize,
    label: Option<String>,
    fill: StyleSpec,
    capability: ColorCapability,
    clock: C,
    start: Instant,
}

impl ProgressBar<SystemClock> {
    /// A bar for `total` units drawn `width` columns wide.
    pub fn new(total: u64, width: usize) -> Self {
        Self::with_clock(total, width, SystemClock)
    }
}

impl<C: Clock> ProgressBar<C> {
    pub fn with_clock(total: u64, width: usize, clock: C) -> Self {
        let start = clock.now();
        Self {
            total,
            current: 0,
            width,
            label: None,
            fill: StyleSpec::default(),
            capability: ColorCapability::None,
            clock,
            start,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Style the filled part of the bar.
    pub fn styled(mut self, fill: StyleSpec, capability: ColorCapability) -> Self {
        self.fill = fill;
        self.capability = capability;
        self
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    /// Set progress, clamped to the total.
    pub fn set(&mut self, current: u64) {
        self.current = current.min(self.total);
    }

    pub fn inc(&mut self, n: u64) {
        self.set(self.current.saturating_add(n));
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start)
    }

    /// Units completed per second since the bar was created.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.current as f64 / secs
        } else {
            0.0
        }
    }

    /// Time left at the current rate; `None` until some progress is made.
    pub fn eta(&self) -> Option<Duration> {
        let rate = self.rate();
        if rate <= 0.0 {
            return None;
        }
        let remaining = (self.total - self.current) as f64;
        Some(Duration::from_secs_f64(remaining / rate))
    }

    /// Completed fraction in percent, 100 for an empty total.
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            100
        } else {
            (u128::from(self.current) * 100 / u128::from(self.total)) as u64
        }
    }

    /// The bar line, at most `width` columns, without escape codes for
    /// positioning.
    pub fn render_line(&self) -> String {
        let eta = self
            .eta()
            .map(format_duration)
            .unwrap_or_else(|| "--:--".to_string());
        let suffix = format!(
            " {}% {}/{} {:.1}/s ETA {}",
            self.percent(),
            self.current,
            self.total,
            self.rate(),
            eta
        );
        let prefix = self
            .label
            .as_ref()
            .map(|label| format!("{label} "))
            .unwrap_or_default();

        let chrome = display_width(&prefix) + display_width(&suffix) + 2;
        let bar_width = self.width.saturating_sub(chrome);
        let filled = if self.total == 0 {
            bar_width
        } else {
            (bar_width as u128 * u128::from(self.current) / u128::from(self.total)) as usize
        };

        let mut done: String = std::iter::repeat(FILLED).take(filled).collect();
        if !done.is_empty() {
            done = style(&done, &self.fill, self.capability);
        }
        let rest: String = std::iter::repeat(EMPTY).take(bar_width - filled).collect();
        format!("{prefix}[{done}{rest}]{suffix}")
    }

    /// Redraw the bar over the current line.
    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "\r\x1b[2K{}", self.render_line())?;
        out.flush()
    }

    /// Fill the bar, draw it once more and end the line.
    pub fn finish(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.set(self.total);
        self.draw(out)?;
        out.write_all(b"\r\n")?;
        out.flush()
    }
}
