//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[build]`   | Content and output directories                 |
//! | `[budget]`  | Payload ceiling, warning threshold, caps       |
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"
//! output = "public"
//!
//! [budget]
//! ceiling = "25MB"
//! warn_threshold = "128KB"
//!
//! [budget.standard]
//! sections = 2
//! collections = 3
//! section_refs = 2
//! ```

mod budget;
mod build;
pub mod defaults;
mod error;

pub use budget::{BudgetConfig, Caps};

use build::BuildConfig;
use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Size suffixes accepted in size strings.
const SIZE_SUFFIXES: [&str; 4] = ["B", "KB", "MB", "GB"];

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, MB, GB (binary multiples). Case-insensitive,
/// spaces allowed. Unparseable numbers yield 0.
///
/// # Examples
/// ```ignore
/// parse_size_string("20KB") // → 20480
/// parse_size_string("5MB")  // → 5242880
/// parse_size_string("100B") // → 100
/// parse_size_string("100")  // → 100 (defaults to bytes)
/// ```
fn parse_size_string(s: &str) -> usize {
    let s = s.trim().to_uppercase();
    let (multiplier, suffix_len) = if s.ends_with("GB") {
        (1024 * 1024 * 1024, 2)
    } else if s.ends_with("MB") {
        (1024 * 1024, 2)
    } else if s.ends_with("KB") {
        (1024, 2)
    } else if s.ends_with('B') {
        (1, 1)
    } else {
        (1, 0)
    };
    let value: usize = s[..s.len() - suffix_len].trim().parse().unwrap_or(0);
    value.saturating_mul(multiplier)
}

/// Whether `s` is a number followed by one of [`SIZE_SUFFIXES`].
fn is_size_string(s: &str) -> bool {
    let s = s.trim().to_uppercase();
    let number = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &s[number.len()..];
    SIZE_SUFFIXES.contains(&suffix) && number.trim().parse::<usize>().is_ok()
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Payload budget settings
    #[serde(default)]
    pub budget: BudgetConfig,
}

impl FolioConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { clean, budget } => {
                self.build.clean |= *clean;
                Self::update_option(&mut self.budget.ceiling, budget.ceiling.as_ref());
            }
            Commands::Resolve { budget, .. } => {
                Self::update_option(&mut self.budget.ceiling, budget.ceiling.as_ref());
            }
            Commands::Paths => {}
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory.
    fn update_path_with_root(&mut self, root: &Path, config: &Path) {
        let root = Self::normalize_path(&Self::expand_tilde(root));
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config));
        self.build.content = Self::normalize_path(&root.join(Self::expand_tilde(&self.build.content)));
        self.build.output = Self::normalize_path(&root.join(Self::expand_tilde(&self.build.output)));
    }

    /// Expand a leading `~`; joining an absolute result onto the root keeps it as is.
    fn expand_tilde(path: &Path) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before running a command
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("[budget.ceiling]", &self.budget.ceiling),
            ("[budget.warn_threshold]", &self.budget.warn_threshold),
        ] {
            if !is_size_string(value) {
                bail!(ConfigError::Size {
                    field,
                    value: value.clone(),
                });
            }
        }

        if self.budget.ceiling_bytes() == 0 {
            bail!(ConfigError::Invalid("[budget.ceiling] must be > 0".into()));
        }

        if self.budget.text_limit == 0 {
            bail!(ConfigError::Invalid("[budget.text_limit] must be > 0".into()));
        }

        for (table, caps) in [
            ("[budget.critical]", &self.budget.critical),
            ("[budget.standard]", &self.budget.standard),
        ] {
            if caps.sections == 0 || caps.collections == 0 || caps.section_refs == 0 {
                bail!(ConfigError::ZeroCap(table));
            }
        }

        if let Some(path) = self.budget.critical_paths.iter().find(|p| !p.starts_with('/')) {
            bail!(ConfigError::Invalid(format!(
                "[budget.critical_paths] entry `{path}` must start with `/`"
            )));
        }

        if !self.build.content.is_dir() {
            bail!(ConfigError::Invalid(format!(
                "[build.content] directory `{}` not found",
                self.build.content.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
