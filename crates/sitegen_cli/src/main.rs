//! sitegen - documentation site build helpers
//!
//! Commands:
//! - `sitegen theme`: render editor theme previews as HTML snippets
//! - `sitegen scaffold`: write import barrels for screenshot directories
//! - `sitegen init`: create a default sitegen.toml

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

use commands::{ScaffoldArgs, ThemeArgs};
use config::SitegenConfig;

/// Build helpers for the documentation site
#[derive(Parser, Debug)]
#[command(name = "sitegen")]
#[command(about = "Theme previews and asset barrels for the documentation site")]
#[command(version)]
struct Cli {
    /// Path to sitegen.toml (defaults to ./sitegen.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render theme preview snippets
    Theme(ThemeArgs),

    /// Generate barrel files for screenshot directories
    Scaffold(ScaffoldArgs),

    /// Create a default sitegen.toml
    Init {
        /// Directory to create the config in
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Theme(args) => {
            let config = SitegenConfig::discover(cli.config.as_deref())?;
            commands::theme(&config, &args)
        }
        Commands::Scaffold(args) => {
            let config = SitegenConfig::discover(cli.config.as_deref())?;
            commands::scaffold(&config, &args)
        }
        Commands::Init { path, force } => commands::init(&path, force).map(|_| ()),
    }
}
