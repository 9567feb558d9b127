//! Hex color literals and resolved style pairs

use std::fmt::{Display, Formatter};

/// A validated `#rrggbb` or `#rrggbbaa` color literal.
///
/// The original spelling is kept (case included) so rendered output matches
/// what the theme author wrote.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Parse a hex literal. Returns `None` for anything that is not `#`
    /// followed by exactly 6 or 8 hex digits.
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#')?;
        if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A foreground/background pair with both channels resolved to literals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<HexColor>,
    pub bg: Option<HexColor>,
}

impl Style {
    pub fn fg(color: HexColor) -> Self {
        Self {
            fg: Some(color),
            bg: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_six_and_eight_digit_literals() {
        assert_eq!(HexColor::parse("#1e1e2e").unwrap().as_str(), "#1e1e2e");
        assert_eq!(HexColor::parse("#1E1E2EFF").unwrap().as_str(), "#1E1E2EFF");
    }

    #[test]
    fn rejects_other_shapes() {
        for value in ["1e1e2e", "#fff", "#1e1e2", "#1e1e2e0", "#gggggg", "base", ""] {
            assert!(HexColor::parse(value).is_none(), "{value} should be rejected");
        }
    }

    #[test]
    fn empty_style() {
        assert!(Style::default().is_empty());
        assert!(!Style::fg(HexColor::parse("#000000").unwrap()).is_empty());
    }
}
