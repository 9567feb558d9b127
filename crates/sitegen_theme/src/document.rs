//! Theme documents as read from disk
//!
//! A theme file is a TOML table whose keys are scope names (`"ui.background"`,
//! `keyword`, ...) plus two reserved keys: `palette` and `inherits`. Values are
//! classified once at load time into a small closed set of shapes so the
//! inheritance merge can recurse over them without re-inspecting raw TOML.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Result, ThemeError};

/// Ordered mapping of keys to theme values.
pub type ThemeTable = IndexMap<String, ThemeValue>;

/// Keys allowed in a style table (`{ fg = "..", bg = "..", modifiers = [..] }`).
const STYLE_KEYS: [&str; 4] = ["fg", "bg", "underline", "modifiers"];

/// One value inside a theme document.
#[derive(Clone, Debug, PartialEq)]
pub enum ThemeValue {
    /// Nested mapping, merged key-by-key on inheritance (e.g. `palette`).
    Table(ThemeTable),
    /// Foreground/background pair. Replaced wholesale on inheritance.
    Pair(ColorPair),
    /// Plain string: a color reference, or the `inherits` target.
    Str(String),
    /// Any other TOML value (arrays, numbers, booleans). Carried, never read.
    Other(toml::Value),
}

/// Unresolved color pair: each channel is a palette key or a hex literal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorPair {
    pub fg: Option<String>,
    pub bg: Option<String>,
}

impl ThemeValue {
    fn from_toml(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Str(s),
            toml::Value::Table(table) if is_style_table(&table) => Self::Pair(ColorPair {
                fg: table.get("fg").and_then(toml::Value::as_str).map(str::to_string),
                bg: table.get("bg").and_then(toml::Value::as_str).map(str::to_string),
            }),
            toml::Value::Table(table) => Self::Table(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Self::from_toml(value)))
                    .collect(),
            ),
            other => Self::Other(other),
        }
    }

    pub fn as_table(&self) -> Option<&ThemeTable> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

fn is_style_table(table: &toml::Table) -> bool {
    !table.is_empty()
        && table.keys().all(|key| STYLE_KEYS.contains(&key.as_str()))
        && ["fg", "bg"]
            .iter()
            .all(|channel| table.get(*channel).map_or(true, toml::Value::is_str))
}

fn flatten_into(flat: &mut ThemeTable, prefix: &str, table: ThemeTable) {
    for (key, value) in table {
        let scope = format!("{prefix}.{key}");
        match value {
            ThemeValue::Table(nested) => flatten_into(flat, &scope, nested),
            value => {
                flat.insert(scope, value);
            }
        }
    }
}

/// A parsed theme file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemeDocument {
    entries: ThemeTable,
}

impl ThemeDocument {
    pub const INHERITS_KEY: &'static str = "inherits";
    pub const PALETTE_KEY: &'static str = "palette";

    /// Build a document, flattening nested scope tables into dotted names.
    ///
    /// `ui.background = {..}` and `"ui.background" = {..}` name the same
    /// scope, so both end up under the key `ui.background`. The palette
    /// stays nested. Later keys win when two spellings collide.
    pub fn new(entries: ThemeTable) -> Self {
        let mut flat = ThemeTable::with_capacity(entries.len());
        for (key, value) in entries {
            match value {
                ThemeValue::Table(table) if key != Self::PALETTE_KEY => {
                    flatten_into(&mut flat, &key, table);
                }
                value => {
                    flat.insert(key, value);
                }
            }
        }
        Self { entries: flat }
    }

    /// Parse a theme from TOML source.
    pub fn from_toml_str(src: &str) -> std::result::Result<Self, toml::de::Error> {
        let table: toml::Table = toml::from_str(src)?;
        Ok(Self::new(
            table
                .into_iter()
                .map(|(key, value)| (key, ThemeValue::from_toml(value)))
                .collect(),
        ))
    }

    /// Read and parse a theme file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ThemeError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Name of the parent theme, if this theme extends another.
    pub fn inherits(&self) -> Option<&str> {
        self.entries.get(Self::INHERITS_KEY)?.as_str()
    }

    /// The theme-local palette table, if any.
    pub fn palette(&self) -> Option<&ThemeTable> {
        self.entries.get(Self::PALETTE_KEY)?.as_table()
    }

    pub fn get(&self, key: &str) -> Option<&ThemeValue> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> &ThemeTable {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
