//! Rendering primitives.
//!
//! This module contains the text-level building blocks used by prompts
//! and widgets: escape sequences, display width, colors, styling and
//! table layout. Nothing here touches the terminal directly.

pub mod ansi;
mod color;
mod style;
mod table;
mod width;

pub use ansi::strip_ansi;
pub use color::{resolve, rgb_to_256, rgb_to_basic, BaseColor, Color, Layer, ParseColorError};
pub use style::{style, StyleSpec};
pub use table::{table, BorderStyle, TableOptions};
pub use width::{char_width, display_width, pad_to_width, truncate_to_width, Align};
