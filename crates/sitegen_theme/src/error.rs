use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, resolving or rendering themes.
///
/// Every variant names the theme (or file) it came from so a failing site
/// build points straight at the offending input.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse theme file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("theme `{theme}` inherits from unknown theme `{parent}`")]
    UnknownParent { theme: String, parent: String },

    #[error("theme `{theme}`: scope `{scope}` references palette key `{key}` which is not defined")]
    UnresolvedPaletteKey {
        theme: String,
        scope: String,
        key: String,
    },

    #[error("theme `{theme}`: `{scope}` has invalid color `{value}` (expected #rrggbb or #rrggbbaa)")]
    InvalidColor {
        theme: String,
        scope: String,
        value: String,
    },

    #[error("theme `{theme}`: `{scope}` has no {channel} color")]
    MissingColor {
        theme: String,
        scope: String,
        channel: Channel,
    },

    #[error("theme `{name}` was not loaded")]
    UnknownTheme { name: String },
}

/// Color channel of a style pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Foreground,
    Background,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Foreground => f.write_str("foreground"),
            Self::Background => f.write_str("background"),
        }
    }
}

pub type Result<T, E = ThemeError> = std::result::Result<T, E>;
