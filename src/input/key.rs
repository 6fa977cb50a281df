//! Key event types.

use std::fmt;

/// A non-printable key produced by control bytes or escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    Enter,
    Tab,
    Backspace,
    Esc,
    /// Control plus a lowercase letter (or one of the punctuation bytes
    /// that follow `z` in the control range)
    Ctrl(char),
}

impl NamedKey {
    /// Stable lowercase name, e.g. `pagedown` or `ctrl+c`.
    pub fn name(self) -> String {
        let fixed = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Home => "home",
            Self::End => "end",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::PageUp => "pageup",
            Self::PageDown => "pagedown",
            Self::F1 => "f1",
            Self::F2 => "f2",
            Self::F3 => "f3",
            Self::F4 => "f4",
            Self::Enter => "enter",
            Self::Tab => "tab",
            Self::Backspace => "backspace",
            Self::Esc => "esc",
            Self::Ctrl(c) => return format!("ctrl+{c}"),
        };
        fixed.to_string()
    }
}

/// Up to four raw bytes of one UTF-8 encoded character.
///
/// Stored inline so [`KeyEvent`] stays `Copy`. Invalid input is kept as
/// the raw byte rather than rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grapheme {
    bytes: [u8; 4],
    len: u8,
}

impl Grapheme {
    /// Build from 1-4 bytes; longer input is truncated to four bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(4);
        let mut buf = [0u8; 4];
        buf[..len].copy_from_slice(&bytes[..len]);
        Self {
            bytes: buf,
            len: len as u8,
        }
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// The bytes as text, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    /// The single character, if the bytes decode to exactly one.
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.as_str()?.chars();
        let c = chars.next()?;
        chars.next().is_none().then_some(c)
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false for decoded input.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for Grapheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "Grapheme({s:?})"),
            None => write!(f, "Grapheme({:?})", self.as_bytes()),
        }
    }
}

/// One decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// A printable character
    Char(Grapheme),
    /// A named, non-printable key
    Named(NamedKey),
}

impl KeyEvent {
    /// A `Char` event for `c`.
    pub fn char(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::Char(Grapheme::from_bytes(c.encode_utf8(&mut buf).as_bytes()))
    }

    /// Whether this is the named key `key`.
    pub fn is(&self, key: NamedKey) -> bool {
        matches!(self, Self::Named(k) if *k == key)
    }

    /// Whether this is the printable character `c`.
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Self::Char(g) if g.as_char() == Some(c))
    }

    /// The character, for `Char` events holding valid UTF-8.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(g) => g.as_char(),
            Self::Named(_) => None,
        }
    }

    /// Whether the user asked to abort: Esc or Ctrl+C.
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Named(NamedKey::Esc | NamedKey::Ctrl('c')))
    }
}

impl From<NamedKey> for KeyEvent {
    fn from(key: NamedKey) -> Self {
        Self::Named(key)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(key) => f.write_str(&key.name()),
            Self::Char(g) => match g.as_str() {
                Some(s) => f.write_str(s),
                None => write!(f, "{:02x?}", g.as_bytes()),
            },
        }
    }
}
