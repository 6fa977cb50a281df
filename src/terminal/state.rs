//! Terminal state types.

use std::fmt;

use crate::capability::ColorCapability;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Size used when nothing better is known.
    pub const FALLBACK: Size = Size { cols: 80, rows: 24 };

    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Set of terminal modes currently switched on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateFlags(u8);

impl StateFlags {
    pub const RAW: StateFlags = StateFlags(1);
    pub const ALT_SCREEN: StateFlags = StateFlags(1 << 1);
    pub const CURSOR_HIDDEN: StateFlags = StateFlags(1 << 2);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Rebuild from raw bits, dropping unknown ones.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0b111)
    }

    pub const fn contains(self, other: StateFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: StateFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: StateFlags) {
        self.0 &= !other.0;
    }
}

impl fmt::Debug for StateFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (Self::RAW, "RAW"),
            (Self::ALT_SCREEN, "ALT_SCREEN"),
            (Self::CURSOR_HIDDEN, "CURSOR_HIDDEN"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| *name)
        .collect();
        write!(f, "StateFlags({})", names.join(" | "))
    }
}

/// Everything a [`Terminal`](super::Terminal) knows about the device.
///
/// `M` is the backend's saved line-discipline type. The RAW flag is set
/// exactly when a saved mode is held.
#[derive(Debug, Clone)]
pub struct TerminalState<M> {
    flags: StateFlags,
    size: Size,
    capability: Option<ColorCapability>,
    saved: Option<M>,
}

impl<M> TerminalState<M> {
    pub(crate) fn new() -> Self {
        Self {
            flags: StateFlags::empty(),
            size: Size::FALLBACK,
            capability: None,
            saved: None,
        }
    }

    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    pub fn is_raw(&self) -> bool {
        self.flags.contains(StateFlags::RAW)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Cached capability, if detection has run.
    pub fn capability(&self) -> Option<ColorCapability> {
        self.capability
    }

    pub(crate) fn set_flag(&mut self, flag: StateFlags, on: bool) {
        debug_assert!(flag != StateFlags::RAW, "RAW follows the saved mode");
        if on {
            self.flags.insert(flag);
        } else {
            self.flags.remove(flag);
        }
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub(crate) fn set_capability(&mut self, capability: Option<ColorCapability>) {
        self.capability = capability;
    }

    /// Store the original mode and mark the terminal raw.
    pub(crate) fn mark_raw(&mut self, saved: M) {
        self.saved = Some(saved);
        self.flags.insert(StateFlags::RAW);
    }

    /// Drop the saved mode and clear every flag.
    pub(crate) fn mark_cooked(&mut self) -> Option<M> {
        self.flags = StateFlags::empty();
        self.saved.take()
    }
}
