//! Byte-to-key decoding.
//!
//! Turns one chunk of raw-mode input into a single [`KeyEvent`].
//! Malformed or unknown escape sequences collapse to `Esc`: lossy, but
//! never an error, which is what an interactive prompt wants.

use super::key::{Grapheme, KeyEvent, NamedKey};

const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

/// Decode the key at the start of `bytes`.
///
/// Returns `None` only for empty input. Bytes after the first key are
/// ignored.
pub fn decode(bytes: &[u8]) -> Option<KeyEvent> {
    let (&first, rest) = bytes.split_first()?;

    let key = match first {
        ESC => KeyEvent::Named(decode_escape(rest)),
        b'\r' | b'\n' => KeyEvent::Named(NamedKey::Enter),
        b'\t' => KeyEvent::Named(NamedKey::Tab),
        0x08 | DEL => KeyEvent::Named(NamedKey::Backspace),
        b if b < 0x20 => KeyEvent::Named(NamedKey::Ctrl(char::from(b + 0x60))),
        b => {
            let len = utf8_len(b).min(bytes.len());
            KeyEvent::Char(Grapheme::from_bytes(&bytes[..len]))
        }
    };
    Some(key)
}

/// Length of a UTF-8 sequence implied by its leading byte.
///
/// Continuation bytes and invalid leaders count as a single byte.
pub fn utf8_len(lead: u8) -> usize {
    if lead & 0x80 == 0 {
        1
    } else if lead & 0xe0 == 0xc0 {
        2
    } else if lead & 0xf0 == 0xe0 {
        3
    } else if lead & 0xf8 == 0xf0 {
        4
    } else {
        1
    }
}

/// Decode what follows an `ESC` byte.
fn decode_escape(rest: &[u8]) -> NamedKey {
    match rest.split_first() {
        Some((b'[', params)) => decode_csi(params),
        Some((b'O', params)) => decode_ss3(params),
        _ => NamedKey::Esc,
    }
}

/// `ESC [` sequences: a single final byte, or a digit run ended by `~`.
fn decode_csi(params: &[u8]) -> NamedKey {
    let Some(&final_byte) = params.first() else {
        return NamedKey::Esc;
    };

    match final_byte {
        b'A' => return NamedKey::Up,
        b'B' => return NamedKey::Down,
        b'C' => return NamedKey::Right,
        b'D' => return NamedKey::Left,
        b'H' => return NamedKey::Home,
        b'F' => return NamedKey::End,
        _ => {}
    }

    let digits = params.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || params.get(digits) != Some(&b'~') {
        return NamedKey::Esc;
    }

    // Only ASCII digits here, so the slice is valid UTF-8.
    let code: u32 = match std::str::from_utf8(&params[..digits])
        .ok()
        .and_then(|s| s.parse().ok())
    {
        Some(code) => code,
        None => return NamedKey::Esc,
    };

    match code {
        1 | 7 => NamedKey::Home,
        2 => NamedKey::Insert,
        3 => NamedKey::Delete,
        4 | 8 => NamedKey::End,
        5 => NamedKey::PageUp,
        6 => NamedKey::PageDown,
        11 => NamedKey::F1,
        12 => NamedKey::F2,
        13 => NamedKey::F3,
        14 => NamedKey::F4,
        _ => NamedKey::Esc,
    }
}

/// `ESC O` sequences sent by keypads in application mode.
fn decode_ss3(params: &[u8]) -> NamedKey {
    match params.first() {
        Some(b'P') => NamedKey::F1,
        Some(b'Q') => NamedKey::F2,
        Some(b'R') => NamedKey::F3,
        Some(b'S') => NamedKey::F4,
        Some(b'A') => NamedKey::Up,
        Some(b'B') => NamedKey::Down,
        Some(b'C') => NamedKey::Right,
        Some(b'D') => NamedKey::Left,
        Some(b'H') => NamedKey::Home,
        Some(b'F') => NamedKey::End,
        _ => NamedKey::Esc,
    }
}
