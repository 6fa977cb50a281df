//! Color capability detection.
//!
//! Classifies how many colors the terminal can show from environment
//! signals alone. Detection is a pure function of its inputs; callers
//! cache the result.

use crate::env::Environment;

/// Maximum color depth the terminal is believed to support.
///
/// Ordered from least to most capable, so "supports X" is `self >= X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ColorCapability {
    /// No color output at all
    #[default]
    None,
    /// The 8 base colors and their bright variants
    Basic16,
    /// The xterm 256-color palette
    Extended256,
    /// Direct 24-bit RGB
    TrueColor,
}

impl ColorCapability {
    /// Whether this tier includes `other`.
    pub fn supports(self, other: ColorCapability) -> bool {
        self >= other
    }

    /// Short lowercase label for display.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic16 => "16",
            Self::Extended256 => "256",
            Self::TrueColor => "truecolor",
        }
    }
}

/// `TERM` substrings that indicate at least the 16 base colors.
const BASIC_TERMS: &[&str] = &[
    "color", "xterm", "screen", "vt100", "rxvt", "linux", "ansi", "cygwin",
];

/// Detect the color capability from environment signals.
///
/// `is_tty` is whether the output stream is an interactive terminal; it
/// only decides the fallback when no variable is conclusive.
pub fn detect(env: &dyn Environment, is_tty: bool) -> ColorCapability {
    if env.var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return ColorCapability::None;
    }

    if let Some(forced) = env.var("FORCE_COLOR") {
        match forced.trim().to_ascii_lowercase().as_str() {
            "0" | "false" => return ColorCapability::None,
            "" | "1" | "true" => return ColorCapability::Basic16,
            "2" => return ColorCapability::Extended256,
            "3" => return ColorCapability::TrueColor,
            _ => {}
        }
    }

    if let Some(colorterm) = env.var("COLORTERM") {
        let colorterm = colorterm.to_ascii_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return ColorCapability::TrueColor;
        }
    }

    if let Some(term) = env.var("TERM") {
        let term = term.to_ascii_lowercase();
        if term.contains("truecolor") || term.contains("24bit") || term.contains("direct") {
            return ColorCapability::TrueColor;
        }
        if term.contains("256") {
            return ColorCapability::Extended256;
        }
        if term == "dumb" {
            return ColorCapability::None;
        }
        if BASIC_TERMS.iter().any(|t| term.contains(t)) {
            return ColorCapability::Basic16;
        }
    }

    if is_tty {
        ColorCapability::Basic16
    } else {
        ColorCapability::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn capabilities_are_ordered() {
        assert!(ColorCapability::TrueColor > ColorCapability::Extended256);
        assert!(ColorCapability::Extended256 > ColorCapability::Basic16);
        assert!(ColorCapability::Basic16 > ColorCapability::None);
        assert!(ColorCapability::TrueColor.supports(ColorCapability::Basic16));
        assert!(!ColorCapability::Basic16.supports(ColorCapability::Extended256));
    }

    #[test]
    fn colorterm_truecolor_wins_over_term() {
        let env = MapEnv::new()
            .with("COLORTERM", "truecolor")
            .with("TERM", "dumb");
        assert_eq!(detect(&env, false), ColorCapability::TrueColor);

        let env = MapEnv::new().with("COLORTERM", "24bit");
        assert_eq!(detect(&env, true), ColorCapability::TrueColor);
    }

    #[test]
    fn term_substrings_classify_tiers() {
        let cases = [
            ("xterm-256color", ColorCapability::Extended256),
            ("screen-256color", ColorCapability::Extended256),
            ("xterm-direct", ColorCapability::TrueColor),
            ("xterm", ColorCapability::Basic16),
            ("linux", ColorCapability::Basic16),
            ("vt100", ColorCapability::Basic16),
            ("dumb", ColorCapability::None),
        ];
        for (term, expected) in cases {
            let env = MapEnv::new().with("TERM", term);
            assert_eq!(detect(&env, false), expected, "TERM={term}");
        }
    }

    #[test]
    fn fallback_depends_on_tty() {
        let env = MapEnv::new();
        assert_eq!(detect(&env, true), ColorCapability::Basic16);
        assert_eq!(detect(&env, false), ColorCapability::None);

        let env = MapEnv::new().with("TERM", "unknown-terminal");
        assert_eq!(detect(&env, true), ColorCapability::Basic16);
    }

    #[test]
    fn no_color_disables_everything() {
        let env = MapEnv::new()
            .with("NO_COLOR", "1")
            .with("COLORTERM", "truecolor");
        assert_eq!(detect(&env, true), ColorCapability::None);

        // An empty NO_COLOR is ignored
        let env = MapEnv::new().with("NO_COLOR", "").with("TERM", "xterm");
        assert_eq!(detect(&env, false), ColorCapability::Basic16);
    }

    #[test]
    fn force_color_levels() {
        let cases = [
            ("0", ColorCapability::None),
            ("1", ColorCapability::Basic16),
            ("2", ColorCapability::Extended256),
            ("3", ColorCapability::TrueColor),
        ];
        for (level, expected) in cases {
            let env = MapEnv::new().with("FORCE_COLOR", level);
            assert_eq!(detect(&env, false), expected, "FORCE_COLOR={level}");
        }
    }

    #[test]
    fn detection_is_deterministic() {
        let env = MapEnv::new().with("TERM", "xterm-256color");
        let first = detect(&env, true);
        for _ in 0..10 {
            assert_eq!(detect(&env, true), first);
        }
    }
}
