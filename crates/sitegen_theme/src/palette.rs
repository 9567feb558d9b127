//! Palette lookup and color normalization
//!
//! Scope values may name a palette entry (`"mauve"`) instead of spelling out
//! a hex literal. Normalization swaps every such reference for its literal,
//! so nothing downstream ever sees a palette key.

use indexmap::IndexMap;
use tracing::debug;

use crate::color::{HexColor, Style};
use crate::document::{ColorPair, ThemeDocument, ThemeValue};
use crate::error::{Result, ThemeError};

/// Palette-normalized styles of one theme, keyed by dotted scope name.
pub type ThemeStyles = IndexMap<String, Style>;

/// A theme's symbolic color names mapped to hex literals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: IndexMap<String, HexColor>,
}

impl Palette {
    /// Read the `palette` table of an (inheritance-resolved) document.
    pub fn from_document(theme: &str, document: &ThemeDocument) -> Result<Self> {
        let Some(table) = document.palette() else {
            return Ok(Self::default());
        };

        let mut colors = IndexMap::with_capacity(table.len());
        for (key, value) in table {
            let scope = format!("{}.{}", ThemeDocument::PALETTE_KEY, key);
            let color = value
                .as_str()
                .and_then(HexColor::parse)
                .ok_or_else(|| invalid_color(theme, &scope, &describe(value)))?;
            colors.insert(key.clone(), color);
        }

        Ok(Self { colors })
    }

    pub fn get(&self, key: &str) -> Option<&HexColor> {
        self.colors.get(key)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Turn a color reference into a literal: `#..` strings are validated,
    /// anything else must be a palette key.
    pub fn resolve(&self, theme: &str, scope: &str, reference: &str) -> Result<HexColor> {
        if reference.starts_with('#') {
            return HexColor::parse(reference).ok_or_else(|| invalid_color(theme, scope, reference));
        }

        self.get(reference)
            .cloned()
            .ok_or_else(|| ThemeError::UnresolvedPaletteKey {
                theme: theme.to_string(),
                scope: scope.to_string(),
                key: reference.to_string(),
            })
    }

    fn resolve_pair(&self, theme: &str, scope: &str, pair: &ColorPair) -> Result<Style> {
        let channel = |reference: &Option<String>| {
            reference
                .as_deref()
                .map(|reference| self.resolve(theme, scope, reference))
                .transpose()
        };

        Ok(Style {
            fg: channel(&pair.fg)?,
            bg: channel(&pair.bg)?,
        })
    }
}

/// Normalize every scope of `document` against its own palette.
///
/// Values that are neither colors nor pairs are ignored.
pub fn normalize(theme: &str, document: &ThemeDocument) -> Result<ThemeStyles> {
    let palette = Palette::from_document(theme, document)?;
    if palette.is_empty() {
        debug!("Theme `{}` has no palette", theme);
    } else {
        debug!("Theme `{}` palette has {} colors", theme, palette.len());
    }

    let mut styles = ThemeStyles::new();
    let scopes = document.entries().iter().filter(|(key, _)| {
        key.as_str() != ThemeDocument::PALETTE_KEY && key.as_str() != ThemeDocument::INHERITS_KEY
    });
    for (key, value) in scopes {
        collect(theme, &palette, key, value, &mut styles)?;
    }

    Ok(styles)
}

fn collect(
    theme: &str,
    palette: &Palette,
    scope: &str,
    value: &ThemeValue,
    styles: &mut ThemeStyles,
) -> Result<()> {
    match value {
        ThemeValue::Str(reference) => {
            let color = palette.resolve(theme, scope, reference)?;
            styles.insert(scope.to_string(), Style::fg(color));
        }
        ThemeValue::Pair(pair) => {
            styles.insert(scope.to_string(), palette.resolve_pair(theme, scope, pair)?);
        }
        ThemeValue::Table(_) | ThemeValue::Other(_) => {}
    }
    Ok(())
}

fn invalid_color(theme: &str, scope: &str, value: &str) -> ThemeError {
    ThemeError::InvalidColor {
        theme: theme.to_string(),
        scope: scope.to_string(),
        value: value.to_string(),
    }
}

fn describe(value: &ThemeValue) -> String {
    match value {
        ThemeValue::Str(s) => s.clone(),
        ThemeValue::Pair(_) => "a color pair".to_string(),
        ThemeValue::Table(_) => "a table".to_string(),
        ThemeValue::Other(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hex(value: &str) -> HexColor {
        HexColor::parse(value).unwrap()
    }

    fn normalize_src(src: &str) -> Result<ThemeStyles> {
        normalize("test", &ThemeDocument::from_toml_str(src).unwrap())
    }

    #[test]
    fn replaces_palette_keys_with_literals() {
        let styles = normalize_src(
            r##"
keyword = "mauve"
"ui.background" = { fg = "text", bg = "#1e1e2e" }

[palette]
mauve = "#cba6f7"
text = "#cdd6f4"
"##,
        )
        .unwrap();

        assert_eq!(styles["keyword"], Style::fg(hex("#cba6f7")));
        assert_eq!(
            styles["ui.background"],
            Style {
                fg: Some(hex("#cdd6f4")),
                bg: Some(hex("#1e1e2e")),
            }
        );
        assert!(!styles.contains_key("palette"));
    }

    #[test]
    fn every_normalized_color_is_a_literal() {
        let styles = normalize_src(
            r##"
inherits = "other"
keyword = "red"
comment = { fg = "grey" }
"ui.statusline" = { bg = "#000000" }
rainbow = ["red"]

[palette]
red = "#ff0000"
grey = "#888888"
"##,
        )
        .unwrap();

        for (scope, style) in &styles {
            for color in [&style.fg, &style.bg].into_iter().flatten() {
                assert!(color.as_str().starts_with('#'), "{scope}: {color}");
            }
        }
        assert!(!styles.contains_key("inherits"));
        assert!(!styles.contains_key("rainbow"));
    }

    #[test]
    fn missing_palette_key_fails_loudly() {
        let err = normalize_src("keyword = \"mauve\"\n").unwrap_err();
        match err {
            ThemeError::UnresolvedPaletteKey { theme, scope, key } => {
                assert_eq!(theme, "test");
                assert_eq!(scope, "keyword");
                assert_eq!(key, "mauve");
            }
            other => panic!("expected unresolved key, got {other:?}"),
        }
    }

    #[test]
    fn malformed_literal_is_rejected() {
        let err = normalize_src("keyword = \"#abc\"\n").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { .. }));
    }

    #[test]
    fn palette_entries_must_be_literals() {
        let err = normalize_src("[palette]\nred = \"crimson\"\n").unwrap_err();
        match err {
            ThemeError::InvalidColor { scope, value, .. } => {
                assert_eq!(scope, "palette.red");
                assert_eq!(value, "crimson");
            }
            other => panic!("expected invalid color, got {other:?}"),
        }
    }

    #[test]
    fn nested_tables_flatten_to_dotted_scopes() {
        let styles = normalize_src("[ui.virtual]\nruler = { bg = \"#222222\" }\n").unwrap();
        assert_eq!(
            styles["ui.virtual.ruler"],
            Style {
                fg: None,
                bg: Some(hex("#222222")),
            }
        );
    }
}
