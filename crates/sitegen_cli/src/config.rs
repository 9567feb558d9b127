//! sitegen configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level sitegen configuration (sitegen.toml)
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SitegenConfig {
    #[serde(default)]
    pub themes: ThemesConfig,
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Theme preview configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ThemesConfig {
    /// Directory with one TOML file per theme
    #[serde(default = "default_theme_dir")]
    pub dir: String,
    /// Default theme, kept outside the theme directory (empty to disable)
    #[serde(default = "default_theme_file")]
    pub default_theme: Option<String>,
    /// Theme file names never loaded
    #[serde(default = "default_skip")]
    pub skip: Vec<String>,
    /// Themes rendered when none are given on the command line
    #[serde(default = "default_render")]
    pub render: Vec<String>,
}

fn default_theme_dir() -> String {
    "runtime/themes".to_string()
}

fn default_theme_file() -> Option<String> {
    Some("theme.toml".to_string())
}

fn default_skip() -> Vec<String> {
    sitegen_theme::DEFAULT_SKIP
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_render() -> Vec<String> {
    vec!["catppuccin_mocha".to_string()]
}

impl Default for ThemesConfig {
    fn default() -> Self {
        Self {
            dir: default_theme_dir(),
            default_theme: default_theme_file(),
            skip: default_skip(),
            render: default_render(),
        }
    }
}

/// Screenshot barrel configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScaffoldConfig {
    /// Asset root; every directory below it gets a barrel
    #[serde(default = "default_scaffold_root")]
    pub root: String,
    /// File name of the generated barrel
    #[serde(default = "default_index_name")]
    pub index_name: String,
    /// Also write a barrel for files directly in the root
    #[serde(default)]
    pub include_root: bool,
}

fn default_scaffold_root() -> String {
    "src/assets/screenshots".to_string()
}

fn default_index_name() -> String {
    sitegen_scaffold::DEFAULT_INDEX_NAME.to_string()
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            root: default_scaffold_root(),
            index_name: default_index_name(),
            include_root: false,
        }
    }
}

impl Default for SitegenConfig {
    fn default() -> Self {
        Self {
            themes: ThemesConfig::default(),
            scaffold: ScaffoldConfig::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl SitegenConfig {
    pub const FILE_NAME: &'static str = "sitegen.toml";

    /// Load configuration from a file, or from a directory containing sitegen.toml
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(Self::FILE_NAME)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `sitegen init` to create one.",
                Self::FILE_NAME,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: SitegenConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Load an explicit config path, else `./sitegen.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_dir(path),
            None if Path::new(Self::FILE_NAME).is_file() => Self::load_from_dir(Path::new(".")),
            None => {
                tracing::debug!("No {} found, using defaults", Self::FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    /// Resolve a configured path against the config file's directory
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
