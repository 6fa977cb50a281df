//! Glyphs and colors used by the prompts.

use serde::Deserialize;

use crate::render::{display_width, BaseColor, Color, StyleSpec};

/// How prompts mark the cursor row and selected options.
///
/// Loaded from the `[prompt]` section of the config file; every field
/// falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PromptTheme {
    /// Marker in front of the option under the cursor
    pub pointer: String,
    /// Marker for a selected option in multi-select
    pub checked: String,
    /// Marker for an unselected option in multi-select
    pub unchecked: String,
    /// Style applied to the row under the cursor
    pub highlight: StyleSpec,
}

impl Default for PromptTheme {
    fn default() -> Self {
        Self {
            pointer: "❯".to_string(),
            checked: "◉".to_string(),
            unchecked: "◯".to_string(),
            highlight: StyleSpec::new().fg(Color::named(BaseColor::Cyan)),
        }
    }
}

impl PromptTheme {
    /// Plain ASCII markers for terminals without good glyph coverage.
    pub fn ascii() -> Self {
        Self {
            pointer: ">".to_string(),
            checked: "[x]".to_string(),
            unchecked: "[ ]".to_string(),
            ..Self::default()
        }
    }

    /// Blank space as wide as the pointer, for rows without it.
    pub(crate) fn pointer_gap(&self) -> String {
        " ".repeat(display_width(&self.pointer))
    }
}
