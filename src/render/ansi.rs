//! ANSI escape sequences.
//!
//! The exact bytes written for screen and cursor control, plus helpers to
//! strip CSI sequences back out of rendered text.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

pub const ESC: &str = "\x1b";
pub const RESET: &str = "\x1b[0m";
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
pub const CLEAR_LINE: &str = "\x1b[2K\r";
pub const ENTER_ALT_SCREEN: &str = "\x1b[?1049h";
pub const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const QUERY_CURSOR_POSITION: &str = "\x1b[6n";

/// Absolute move; `col` and `row` are 0-indexed, the wire is 1-indexed.
pub fn move_to(col: u16, row: u16) -> String {
    format!("\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1)
}

/// Relative move up `n` rows. Empty for `n == 0`.
pub fn move_up(n: u16) -> String {
    relative(n, 'A')
}

/// Relative move down `n` rows. Empty for `n == 0`.
pub fn move_down(n: u16) -> String {
    relative(n, 'B')
}

/// Relative move right `n` columns. Empty for `n == 0`.
pub fn move_forward(n: u16) -> String {
    relative(n, 'C')
}

/// Relative move left `n` columns. Empty for `n == 0`.
pub fn move_back(n: u16) -> String {
    relative(n, 'D')
}

fn relative(n: u16, letter: char) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}{letter}")
    }
}

/// Wrap `text` in an SGR sequence built from `codes`.
pub fn sgr(codes: &[String], text: &str) -> String {
    format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
}

fn csi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("valid CSI pattern"))
}

/// Remove `ESC [ <params> <letter>` sequences.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    csi_pattern().replace_all(text, "")
}

/// Parse a cursor position report `ESC [ <row> ; <col> R`.
///
/// Returns 0-indexed `(col, row)`. Leading bytes before the report (for
/// instance keys typed while waiting) are skipped.
pub fn parse_cursor_report(bytes: &[u8]) -> Option<(u16, u16)> {
    let text = std::str::from_utf8(bytes).ok()?;
    let start = text.rfind("\x1b[")?;
    let body = text[start + 2..].strip_suffix('R')?;
    let (row, col) = body.split_once(';')?;
    let row: u16 = row.parse().ok()?;
    let col: u16 = col.parse().ok()?;
    Some((col.checked_sub(1)?, row.checked_sub(1)?))
}
