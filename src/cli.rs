//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio page props builder CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Payload budget overrides shared by Build and Resolve
#[derive(clap::Args, Debug, Clone)]
pub struct BudgetArgs {
    /// Override the payload ceiling (e.g. "512KB", "25MB")
    #[arg(long)]
    pub ceiling: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve and budget every page, writing `<output>/<url>/props.json`
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        #[command(flatten)]
        budget: BudgetArgs,
    },

    /// Print the props of one page to stdout
    Resolve {
        /// URL path of the page, e.g. `/blog/my-post`
        url_path: String,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Skip the payload budgeter
        #[arg(long)]
        raw: bool,
    },

    /// List every routable URL path
    Paths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["folio", "build", "--clean", "--ceiling", "1MB"]);
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
        match cli.command {
            Commands::Build { clean, budget } => {
                assert!(clean);
                assert_eq!(budget.ceiling.as_deref(), Some("1MB"));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_parse_resolve_with_globals() {
        let cli = Cli::parse_from([
            "folio", "-C", "site.toml", "-c", "data", "resolve", "/blog", "--pretty",
        ]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert_eq!(cli.content, Some(PathBuf::from("data")));
        match cli.command {
            Commands::Resolve { url_path, pretty, raw, budget } => {
                assert_eq!(url_path, "/blog");
                assert!(pretty);
                assert!(!raw);
                assert!(budget.ceiling.is_none());
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_resolve_requires_path() {
        assert!(Cli::try_parse_from(["folio", "resolve"]).is_err());
    }
}
