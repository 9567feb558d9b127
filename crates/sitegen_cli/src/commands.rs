//! Subcommand implementations

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sitegen_scaffold::ScaffoldGenerator;
use sitegen_theme::{render_themes, ThemeLoader};

use crate::config::SitegenConfig;

/// Arguments for `sitegen theme`
#[derive(Args, Debug, Default)]
pub struct ThemeArgs {
    /// Theme to render (repeatable; defaults to `themes.render` from the config)
    #[arg(short, long = "theme", value_name = "NAME")]
    pub themes: Vec<String>,

    /// Render every loaded theme
    #[arg(long, conflicts_with = "themes")]
    pub all: bool,

    /// Write the HTML to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `sitegen scaffold`
#[derive(Args, Debug, Default)]
pub struct ScaffoldArgs {
    /// Asset root (overrides `scaffold.root`)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Barrel file name (overrides `scaffold.index_name`)
    #[arg(long)]
    pub index_name: Option<String>,
}

/// Render theme previews and return the HTML
pub fn render(config: &SitegenConfig, args: &ThemeArgs) -> Result<String> {
    let themes_config = &config.themes;

    let mut loader = ThemeLoader::new(config.resolve(&themes_config.dir))
        .skip(themes_config.skip.iter().cloned());
    if let Some(default_theme) = themes_config
        .default_theme
        .as_deref()
        .filter(|path| !path.is_empty())
    {
        loader = loader.with_default_theme(config.resolve(default_theme));
    }

    let themes = loader.load().context("Failed to load themes")?;

    let names: Vec<String> = if args.all {
        themes.names().into_iter().map(str::to_string).collect()
    } else if !args.themes.is_empty() {
        args.themes.clone()
    } else {
        themes_config.render.clone()
    };

    render_themes(&themes, &names).context("Failed to render theme previews")
}

/// `sitegen theme`
pub fn theme(config: &SitegenConfig, args: &ThemeArgs) -> Result<()> {
    let html = render(config, args)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// `sitegen scaffold`
pub fn scaffold(config: &SitegenConfig, args: &ScaffoldArgs) -> Result<()> {
    let scaffold_config = &config.scaffold;
    let root = args
        .root
        .clone()
        .unwrap_or_else(|| config.resolve(&scaffold_config.root));
    let index_name = args
        .index_name
        .clone()
        .unwrap_or_else(|| scaffold_config.index_name.clone());

    let report = ScaffoldGenerator::new(&root)
        .index_name(index_name)
        .include_root(scaffold_config.include_root)
        .run()
        .with_context(|| format!("Failed to scaffold {}", root.display()))?;

    for path in &report.written {
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}

/// `sitegen init`: write a default sitegen.toml into `dir`
pub fn init(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(SitegenConfig::FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(&path, SitegenConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Created {}", path.display());
    Ok(path)
}
