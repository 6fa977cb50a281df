//! Colors and their resolution to SGR codes.
//!
//! RGB colors degrade with the terminal's capability: direct 24-bit
//! codes, then the nearest 6x6x6 cube entry of the 256-color palette,
//! then the closest of the 8 base colors (bright when the color is light).

use std::fmt;
use std::str::FromStr;

use crate::capability::ColorCapability;

/// The 8 base ANSI colors, in SGR order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl BaseColor {
    const ALL: [BaseColor; 8] = [
        BaseColor::Black,
        BaseColor::Red,
        BaseColor::Green,
        BaseColor::Yellow,
        BaseColor::Blue,
        BaseColor::Magenta,
        BaseColor::Cyan,
        BaseColor::White,
    ];

    /// Offset from the layer's base SGR code (30/40/90/100).
    pub fn index(self) -> u8 {
        self as u8
    }

    fn from_index(index: u8) -> Self {
        Self::ALL[(index & 7) as usize]
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

/// A color as written by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's own default foreground or background
    Default,
    /// One of the 16 named colors
    Named { base: BaseColor, bright: bool },
    /// An explicit RGB triple
    Rgb(u8, u8, u8),
}

impl Color {
    /// A normal-intensity named color.
    pub const fn named(base: BaseColor) -> Self {
        Self::Named {
            base,
            bright: false,
        }
    }

    /// A bright named color.
    pub const fn bright(base: BaseColor) -> Self {
        Self::Named { base, bright: true }
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let mut parts = [0u8; 3];
                for (i, part) in parts.iter_mut().enumerate() {
                    let digit = u8::from_str_radix(&hex[i..i + 1], 16).ok()?;
                    *part = digit * 17;
                }
                Some(Self::Rgb(parts[0], parts[1], parts[2]))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::Rgb(r, g, b))
            }
            _ => None,
        }
    }
}

/// Error returned when a color token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown color: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts `default`, `red`, `bright_red`, `#f00` and `#ff0000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        if token == "default" {
            return Ok(Self::Default);
        }
        if let Some(base) = BaseColor::from_name(&token) {
            return Ok(Self::named(base));
        }
        if let Some(base) = token.strip_prefix("bright_").and_then(BaseColor::from_name) {
            return Ok(Self::bright(base));
        }
        if token.starts_with('#') {
            if let Some(color) = Self::from_hex(&token) {
                return Ok(color);
            }
        }
        Err(ParseColorError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Named { base, bright: false } => f.write_str(base.name()),
            Self::Named { base, bright: true } => write!(f, "bright_{}", base.name()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::Rgb(r, g, b)
    }
}

/// Whether a color applies to the text or the cell behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

impl Layer {
    fn base_code(self) -> u8 {
        match self {
            Self::Foreground => 30,
            Self::Background => 40,
        }
    }

    fn extended_prefix(self) -> u8 {
        match self {
            Self::Foreground => 38,
            Self::Background => 48,
        }
    }
}

/// Brightness above which a degraded RGB color uses the bright variant.
const BRIGHT_THRESHOLD: u16 = 384;

/// Index into the 6x6x6 cube of the 256-color palette.
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    16 + 36 * (r / 51) + 6 * (g / 51) + b / 51
}

/// Closest base color and whether it should be bright.
pub fn rgb_to_basic(r: u8, g: u8, b: u8) -> (BaseColor, bool) {
    let index = u8::from(r > 127) | (u8::from(g > 127) << 1) | (u8::from(b > 127) << 2);
    let brightness = u16::from(r) + u16::from(g) + u16::from(b);
    (BaseColor::from_index(index), brightness > BRIGHT_THRESHOLD)
}

/// SGR parameter string for `color` on `layer` at `capability`.
pub fn resolve(color: Color, layer: Layer, capability: ColorCapability) -> String {
    match color {
        Color::Default => (layer.base_code() + 9).to_string(),
        Color::Named { base, bright } => named_code(base, bright, layer).to_string(),
        Color::Rgb(r, g, b) => match capability {
            ColorCapability::TrueColor => {
                format!("{};2;{};{};{}", layer.extended_prefix(), r, g, b)
            }
            ColorCapability::Extended256 => {
                format!("{};5;{}", layer.extended_prefix(), rgb_to_256(r, g, b))
            }
            ColorCapability::Basic16 | ColorCapability::None => {
                let (base, bright) = rgb_to_basic(r, g, b);
                named_code(base, bright, layer).to_string()
            }
        },
    }
}

fn named_code(base: BaseColor, bright: bool, layer: Layer) -> u8 {
    let offset = if bright { 60 } else { 0 };
    layer.base_code() + offset + base.index()
}
