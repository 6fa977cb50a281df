//! Keyboard input.
//!
//! - `key`: the [`KeyEvent`] value type
//! - `decode`: pure byte-to-key decoding
//! - `reader`: timed reads from a raw-mode [`Terminal`](crate::Terminal)

mod decode;
mod key;
mod reader;

pub use decode::{decode, utf8_len};
pub use key::{Grapheme, KeyEvent, NamedKey};
pub use reader::MAX_KEY_BYTES;
