//! Theme discovery and loading
//!
//! Every `*.toml` file in the theme directory is loaded eagerly, keyed by its
//! file stem. A separate default theme file can be added on top. Loading is
//! all-or-nothing: the first unreadable or malformed file aborts.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::document::ThemeDocument;
use crate::error::{Result, ThemeError};

/// Theme files that are never loaded: the base16 variants that rely on the
/// terminal's own palette and have no hex colors to show.
pub const DEFAULT_SKIP: &[&str] = &["base16_terminal.toml", "base16_transparent.toml"];

const THEME_EXTENSION: &str = "toml";

/// All loaded themes, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct ThemeSet {
    themes: FxHashMap<String, ThemeDocument>,
}

impl ThemeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, document: ThemeDocument) -> Option<ThemeDocument> {
        self.themes.insert(name.into(), document)
    }

    pub fn get(&self, name: &str) -> Option<&ThemeDocument> {
        self.themes.get(name)
    }

    /// Look up a theme, failing with [`ThemeError::UnknownTheme`].
    pub fn require(&self, name: &str) -> Result<&ThemeDocument> {
        self.get(name).ok_or_else(|| ThemeError::UnknownTheme {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Theme names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeDocument)> {
        self.themes.iter().map(|(name, doc)| (name.as_str(), doc))
    }
}

impl FromIterator<(String, ThemeDocument)> for ThemeSet {
    fn from_iter<I: IntoIterator<Item = (String, ThemeDocument)>>(iter: I) -> Self {
        Self {
            themes: iter.into_iter().collect(),
        }
    }
}

/// Builder for loading a [`ThemeSet`] from disk.
#[derive(Clone, Debug)]
pub struct ThemeLoader {
    dir: PathBuf,
    default_theme: Option<PathBuf>,
    skip: Vec<String>,
}

impl ThemeLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            default_theme: None,
            skip: DEFAULT_SKIP.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Also load the theme at `path`, which lives outside the theme directory.
    pub fn with_default_theme(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_theme = Some(path.into());
        self
    }

    /// Replace the denylist of file names.
    pub fn skip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn load(&self) -> Result<ThemeSet> {
        info!("Loading themes from {}", self.dir.display());

        let mut themes = ThemeSet::new();
        for path in self.theme_files()? {
            let name = theme_name(&path);
            debug!("Loading theme `{}` from {}", name, path.display());
            themes.insert(name, ThemeDocument::from_path(&path)?);
        }

        if let Some(path) = &self.default_theme {
            let name = theme_name(path);
            debug!("Loading default theme `{}` from {}", name, path.display());
            let document = ThemeDocument::from_path(path)?;
            if themes.contains(&name) {
                warn!(
                    "Default theme {} replaces theme `{}` from {}",
                    path.display(),
                    name,
                    self.dir.display()
                );
            }
            themes.insert(name, document);
        }

        info!("Loaded {} themes", themes.len());
        Ok(themes)
    }

    /// Theme files in the directory, sorted by file name, denylist applied.
    fn theme_files(&self) -> Result<Vec<PathBuf>> {
        let read_error = |source| ThemeError::Read {
            path: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != THEME_EXTENSION) {
                continue;
            }

            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.skip.iter().any(|skipped| *skipped == file_name) {
                debug!("Skipping denylisted theme {}", file_name);
                continue;
            }

            files.push(path);
        }

        files.sort();
        Ok(files)
    }
}

/// Theme name derived from the file name, extension stripped.
fn theme_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
