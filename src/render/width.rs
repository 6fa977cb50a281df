//! Display width of rendered text.
//!
//! This is a heuristic, not full Unicode East Asian Width or grapheme
//! cluster handling: code points in a fixed set of wide ranges count as
//! two columns, controls as zero, everything else as one. Combining
//! marks and zero-width joiners are therefore over-counted, and emoji
//! outside the listed blocks are under-counted.

use super::ansi::strip_ansi;

/// Code point ranges rendered two columns wide.
const WIDE_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x115F),   // Hangul Jamo
    (0x2E80, 0x303E),   // CJK radicals, punctuation
    (0x3041, 0x33FF),   // Hiragana, Katakana, CJK compatibility
    (0x3400, 0x4DBF),   // CJK extension A
    (0x4E00, 0x9FFF),   // CJK unified ideographs
    (0xA000, 0xA4CF),   // Yi
    (0xAC00, 0xD7A3),   // Hangul syllables
    (0xF900, 0xFAFF),   // CJK compatibility ideographs
    (0xFE30, 0xFE4F),   // CJK compatibility forms
    (0xFF00, 0xFF60),   // Fullwidth forms
    (0xFFE0, 0xFFE6),   // Fullwidth signs
    (0x1F300, 0x1F64F), // Misc symbols and pictographs, emoticons
    (0x1F900, 0x1F9FF), // Supplemental symbols and pictographs
    (0x20000, 0x2FFFD), // CJK extension B and beyond
    (0x30000, 0x3FFFD), // CJK extension G
];

/// Columns occupied by one code point.
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    if cp < 0x20 || cp == 0x7F {
        return 0;
    }
    if is_wide(cp) {
        2
    } else {
        1
    }
}

fn is_wide(cp: u32) -> bool {
    WIDE_RANGES
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Columns occupied by `text` once its escape sequences are removed.
pub fn display_width(text: &str) -> usize {
    strip_ansi(text).chars().map(char_width).sum()
}

/// Cut `text` so it fits in `max` columns.
///
/// Escape sequences are dropped from the result. Wide characters that
/// would straddle the limit are left out entirely.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let plain = strip_ansi(text);
    let mut out = String::with_capacity(plain.len());
    let mut used = 0;
    for c in plain.chars() {
        let w = char_width(c);
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Horizontal alignment inside a fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Pad `text` with spaces to `width` columns.
///
/// Text already at least `width` wide is returned as is. Centering puts
/// the odd column of slack on the right.
pub fn pad_to_width(text: &str, width: usize, align: Align) -> String {
    let slack = width.saturating_sub(display_width(text));
    let (left, right) = match align {
        Align::Left => (0, slack),
        Align::Right => (slack, 0),
        Align::Center => (slack / 2, slack - slack / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
