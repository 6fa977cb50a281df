//! Styled text encoding.

use serde::Deserialize;

use super::ansi::sgr;
use super::color::{resolve, Color, Layer};
use crate::capability::ColorCapability;

/// Colors and attributes to apply to a span of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
    #[serde(with = "color_token")]
    pub fg: Option<Color>,
    #[serde(with = "color_token")]
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink: bool,
    pub reverse: bool,
}

impl StyleSpec {
    /// An empty style.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn blink(mut self) -> Self {
        self.blink = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// True when no option is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// SGR parameters in emission order: fg, bg, then 1/2/3/4/5/7.
    pub fn codes(&self, capability: ColorCapability) -> Vec<String> {
        let mut codes = Vec::new();
        if let Some(fg) = self.fg {
            codes.push(resolve(fg, Layer::Foreground, capability));
        }
        if let Some(bg) = self.bg {
            codes.push(resolve(bg, Layer::Background, capability));
        }
        let attrs = [
            (self.bold, "1"),
            (self.dim, "2"),
            (self.italic, "3"),
            (self.underline, "4"),
            (self.blink, "5"),
            (self.reverse, "7"),
        ];
        codes.extend(
            attrs
                .iter()
                .filter(|(on, _)| *on)
                .map(|(_, code)| code.to_string()),
        );
        codes
    }
}

/// Wrap `text` in the SGR codes for `spec`.
///
/// Returns `text` unchanged when the spec is empty, so unstyled output
/// never carries escape codes.
pub fn style(text: &str, spec: &StyleSpec, capability: ColorCapability) -> String {
    let codes = spec.codes(capability);
    if codes.is_empty() {
        return text.to_string();
    }
    sgr(&codes, text)
}

/// Serde adapter reading colors from tokens like `"bright_red"` or `"#ff8800"`.
mod color_token {
    use serde::{de::Error, Deserialize, Deserializer};

    use super::Color;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token: Option<String> = Option::deserialize(deserializer)?;
        token
            .map(|t| t.parse::<Color>().map_err(D::Error::custom))
            .transpose()
    }
}
