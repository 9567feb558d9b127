//! Theme previews for the documentation site
//!
//! Turns the editor's TOML theme files into static HTML code samples.
//!
//! # Pipeline
//!
//! 1. [`ThemeLoader`] reads every theme file into a [`ThemeSet`].
//! 2. [`resolve_all`] applies `inherits` (two levels deep).
//! 3. [`normalize`] replaces palette keys with hex literals.
//! 4. [`resolve_scopes`] fills every [`Scope`] through its fallback chain.
//! 5. [`render_snippet`] draws the resolved theme as HTML.
//!
//! ```rust,ignore
//! use sitegen_theme::{render_themes, ThemeLoader};
//!
//! let themes = ThemeLoader::new("runtime/themes")
//!     .with_default_theme("theme.toml")
//!     .load()?;
//! let html = render_themes(&themes, &["catppuccin_mocha"])?;
//! ```

pub mod color;
pub mod document;
mod error;
pub mod inherit;
pub mod loader;
pub mod palette;
pub mod render;
pub mod scope;

pub use color::{HexColor, Style};
pub use document::{ColorPair, ThemeDocument, ThemeTable, ThemeValue};
pub use error::{Channel, Result, ThemeError};
pub use inherit::{deep_merge, resolve_all, resolve_inheritance, INHERITANCE_PASSES};
pub use loader::{ThemeLoader, ThemeSet, DEFAULT_SKIP};
pub use palette::{normalize, Palette, ThemeStyles};
pub use render::{render_snippet, Snippet};
pub use scope::{resolve_scopes, ResolvedTheme, Scope};

use tracing::info;

/// Resolve one theme of an inheritance-resolved set.
pub fn resolve_theme(name: &str, themes: &ThemeSet) -> Result<ResolvedTheme> {
    let document = themes.require(name)?;
    let styles = normalize(name, document)?;
    resolve_scopes(name, &styles)
}

/// Resolve inheritance across `themes`, then render the named themes in
/// order, concatenating their snippets.
pub fn render_themes<I>(themes: &ThemeSet, names: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let resolved = resolve_all(themes)?;

    let mut html = String::new();
    for name in names {
        let theme = resolve_theme(name.as_ref(), &resolved)?;
        info!("Rendering theme `{}`", theme.name());
        html.push_str(&render_snippet(&theme));
    }
    Ok(html)
}
