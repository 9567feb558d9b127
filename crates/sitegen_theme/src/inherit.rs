//! Theme inheritance
//!
//! A theme with `inherits = "parent"` is the parent with the child's values
//! merged on top. Nested mappings (the palette) merge key-by-key;
//! every other value in the child replaces the parent's wholesale, so a child
//! overriding `{ fg = .. }` does not keep the parent's `bg`.
//!
//! Resolution runs a fixed number of passes over the whole set. Each pass
//! reads from the previous pass's snapshot and writes fresh documents, so
//! parents shared by several children are never modified in place.

use tracing::debug;

use crate::document::{ThemeDocument, ThemeTable, ThemeValue};
use crate::error::{Result, ThemeError};
use crate::loader::ThemeSet;

/// Number of resolution passes, i.e. the deepest inheritance chain that
/// fully resolves (A inherits B inherits C).
pub const INHERITANCE_PASSES: usize = 2;

/// Merge `child` over `parent`, returning the merged table.
pub fn deep_merge(mut parent: ThemeTable, child: &ThemeTable) -> ThemeTable {
    for (key, value) in child {
        match value {
            ThemeValue::Table(child_table) => match parent.get_mut(key) {
                Some(ThemeValue::Table(existing)) => {
                    *existing = deep_merge(std::mem::take(existing), child_table);
                }
                _ => {
                    let merged = deep_merge(ThemeTable::new(), child_table);
                    parent.insert(key.clone(), ThemeValue::Table(merged));
                }
            },
            leaf => {
                parent.insert(key.clone(), leaf.clone());
            }
        }
    }
    parent
}

/// Resolve one level of inheritance for `document`.
///
/// Documents without `inherits` come back unchanged. Otherwise the parent is
/// looked up in `themes`, copied, and the document merged over the copy.
pub fn resolve_inheritance(
    name: &str,
    document: &ThemeDocument,
    themes: &ThemeSet,
) -> Result<ThemeDocument> {
    let Some(parent_name) = document.inherits() else {
        return Ok(document.clone());
    };

    let parent = themes
        .get(parent_name)
        .ok_or_else(|| ThemeError::UnknownParent {
            theme: name.to_string(),
            parent: parent_name.to_string(),
        })?;

    debug!("Merging theme `{}` over `{}`", name, parent_name);
    Ok(ThemeDocument::new(deep_merge(
        parent.entries().clone(),
        document.entries(),
    )))
}

/// Resolve inheritance across the whole set.
///
/// Runs [`INHERITANCE_PASSES`] passes. Chains deeper than that are left
/// partially resolved: the deepest ancestors never get merged in.
pub fn resolve_all(themes: &ThemeSet) -> Result<ThemeSet> {
    let mut current = themes.clone();
    for pass in 0..INHERITANCE_PASSES {
        debug!("Inheritance pass {}", pass + 1);
        current = current
            .iter()
            .map(|(name, doc)| {
                resolve_inheritance(name, doc, &current).map(|resolved| (name.to_string(), resolved))
            })
            .collect::<Result<ThemeSet>>()?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ColorPair;
    use crate::palette::normalize;
    use pretty_assertions::assert_eq;

    fn doc(src: &str) -> ThemeDocument {
        ThemeDocument::from_toml_str(src).unwrap()
    }

    fn set(themes: &[(&str, &str)]) -> ThemeSet {
        themes
            .iter()
            .map(|(name, src)| (name.to_string(), doc(src)))
            .collect()
    }

    #[test]
    fn theme_without_parent_is_unchanged() {
        let themes = set(&[("solo", "keyword = \"#ff0000\"\n[palette]\nred = \"#ff0000\"\n")]);
        let solo = themes.get("solo").unwrap();
        assert_eq!(&resolve_inheritance("solo", solo, &themes).unwrap(), solo);
    }

    #[test]
    fn child_merges_over_parent() {
        let themes = set(&[
            (
                "parent",
                r##"
keyword = "red"
"ui.background" = { fg = "text", bg = "base" }
comment = "#777777"

[palette]
red = "#ff0000"
text = "#eeeeee"
base = "#111111"
"##,
            ),
            (
                "child",
                r##"
inherits = "parent"
"ui.background" = { fg = "text" }
comment = { fg = "#888888" }

[palette]
red = "#ee0000"
green = "#00ff00"
"##,
            ),
        ]);

        let child = resolve_inheritance("child", themes.get("child").unwrap(), &themes).unwrap();

        // Parent-only keys survive.
        assert_eq!(child.get("keyword"), Some(&ThemeValue::Str("red".into())));

        // Pairs are replaced whole: the parent's bg does not leak through.
        assert_eq!(
            child.get("ui.background"),
            Some(&ThemeValue::Pair(ColorPair {
                fg: Some("text".into()),
                bg: None,
            }))
        );

        // A pair replaces a string outright.
        assert!(matches!(child.get("comment"), Some(ThemeValue::Pair(_))));

        // Nested mappings merge key-by-key, child wins.
        let palette = child.palette().unwrap();
        assert_eq!(palette.get("red"), Some(&ThemeValue::Str("#ee0000".into())));
        assert_eq!(palette.get("green"), Some(&ThemeValue::Str("#00ff00".into())));
        assert_eq!(palette.get("text"), Some(&ThemeValue::Str("#eeeeee".into())));

        assert_eq!(child.inherits(), Some("parent"));
    }

    #[test]
    fn parent_is_not_mutated() {
        let themes = set(&[
            ("parent", "[palette]\nred = \"#ff0000\"\n"),
            ("a", "inherits = \"parent\"\n[palette]\nred = \"#aa0000\"\n"),
            ("b", "inherits = \"parent\"\n[palette]\nblue = \"#0000ff\"\n"),
        ]);
        let before = themes.get("parent").unwrap().clone();

        let resolved = resolve_all(&themes).unwrap();

        assert_eq!(themes.get("parent").unwrap(), &before);
        assert_eq!(resolved.get("parent").unwrap(), &before);
        let b_palette = resolved.get("b").unwrap().palette().unwrap();
        assert_eq!(b_palette.get("red"), Some(&ThemeValue::Str("#ff0000".into())));
    }

    #[test]
    fn two_level_chain_resolves() {
        let themes = set(&[
            ("c", "comment = \"#cccccc\"\nkeyword = \"#c0c0c0\"\n"),
            ("b", "inherits = \"c\"\nkeyword = \"#bbbbbb\"\n"),
            ("a", "inherits = \"b\"\n"),
        ]);

        let resolved = resolve_all(&themes).unwrap();
        let a = resolved.get("a").unwrap();

        assert_eq!(a.get("comment"), Some(&ThemeValue::Str("#cccccc".into())));
        assert_eq!(a.get("keyword"), Some(&ThemeValue::Str("#bbbbbb".into())));
    }

    #[test]
    fn three_level_chain_is_not_fully_resolved() {
        let themes = set(&[
            ("d", "comment = \"#dddddd\"\n"),
            ("c", "inherits = \"d\"\n"),
            ("b", "inherits = \"c\"\n"),
            ("a", "inherits = \"b\"\n"),
        ]);

        let resolved = resolve_all(&themes).unwrap();

        assert_eq!(resolved.get("a").unwrap().get("comment"), None);
        assert_eq!(
            resolved.get("b").unwrap().get("comment"),
            Some(&ThemeValue::Str("#dddddd".into()))
        );
    }

    #[test]
    fn unknown_parent_is_an_error() {
        let themes = set(&[("orphan", "inherits = \"missing\"\n")]);
        let err = resolve_all(&themes).unwrap_err();
        match err {
            ThemeError::UnknownParent { theme, parent } => {
                assert_eq!(theme, "orphan");
                assert_eq!(parent, "missing");
            }
            other => panic!("expected unknown parent, got {other:?}"),
        }
    }

    #[test]
    fn child_table_replaces_parent_leaf() {
        let parent: ThemeTable = [("palette".to_string(), ThemeValue::Str("none".into()))]
            .into_iter()
            .collect();
        let child = doc("[palette]\nwhite = \"#ffffff\"\n");

        let merged = deep_merge(parent, child.entries());
        let palette = merged.get("palette").and_then(ThemeValue::as_table).unwrap();
        assert_eq!(palette.get("white"), Some(&ThemeValue::Str("#ffffff".into())));
    }

    #[test]
    fn dotted_child_override_beats_quoted_parent_key() {
        let themes = set(&[
            (
                "parent",
                r##"
"ui.virtual.ruler" = { bg = "#222222" }
ui.text = "#eeeeee"
"ui.background" = { bg = "#111111" }
"##,
            ),
            (
                "child",
                r##"
inherits = "parent"
ui.background = { bg = "#000000" }
"##,
            ),
        ]);

        let resolved = resolve_all(&themes).unwrap();
        let styles = normalize("child", resolved.get("child").unwrap()).unwrap();

        assert_eq!(
            styles["ui.background"].bg.as_ref().map(|c| c.as_str()),
            Some("#000000")
        );
        assert_eq!(styles["ui.text"].fg.as_ref().map(|c| c.as_str()), Some("#eeeeee"));
    }
}
