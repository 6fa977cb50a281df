//! Configuration file support.
//!
//! Settings live in `<config dir>/ttykit/config.toml`. Every section and
//! field is optional; a missing file means all defaults.
//!
//! ```toml
//! [color]
//! mode = "auto"   # auto | always | never
//!
//! [prompt]
//! pointer = ">"
//! checked = "[x]"
//! unchecked = "[ ]"
//! highlight = { fg = "cyan", bold = true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::capability::ColorCapability;
use crate::prompt::PromptTheme;
use crate::terminal::{Backend, Terminal};

/// Whether to emit colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Follow the detected capability
    #[default]
    Auto,
    /// Color even when detection says no (at least the 16 base colors)
    Always,
    /// Never color
    Never,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub mode: ColorMode,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub color: ColorConfig,
    pub prompt: PromptTheme,
}

impl Config {
    /// `<config dir>/ttykit/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ttykit").join("config.toml"))
    }

    /// Load from the default path, or defaults when there is no file.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply the color mode to `term`.
    pub fn apply<B: Backend>(&self, term: &mut Terminal<B>) {
        let pinned = match self.color.mode {
            ColorMode::Auto => None,
            ColorMode::Never => Some(ColorCapability::None),
            ColorMode::Always => {
                term.set_capability_override(None);
                Some(term.capability().max(ColorCapability::Basic16))
            }
        };
        term.set_capability_override(pinned);
    }
}
