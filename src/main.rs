//! Folio - page props builder for content-driven static sites.

mod budget;
mod build;
mod cli;
mod config;
mod content;
mod inspect;
mod logger;
mod props;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::FolioConfig;
use inspect::{ResolveOptions, list_paths, resolve_page};
use props::GLOBAL_PROPS_CACHE;
use std::{
    io::{Write, stdout},
    path::Path,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Resolve {
            url_path,
            pretty,
            raw,
            ..
        } => {
            let options = ResolveOptions {
                pretty: *pretty,
                raw: *raw,
            };
            let json = resolve_page(&config, &GLOBAL_PROPS_CACHE, url_path, options)?;
            writeln!(stdout().lock(), "{json}")?;
            Ok(())
        }
        Commands::Paths => {
            let mut out = stdout().lock();
            for path in list_paths(&config)? {
                writeln!(out, "{path}")?;
            }
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
///
/// A missing config file means defaults.
fn load_config(cli: &Cli) -> Result<FolioConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        FolioConfig::from_path(&config_path)?
    } else {
        FolioConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
