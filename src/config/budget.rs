//! `[budget]` section configuration.
//!
//! Controls the payload budgeter: the byte ceiling, the soft warning
//! threshold and the caps used when collections have to be cut.

use super::{defaults, parse_size_string};
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[budget]` section in folio.toml.
///
/// # Example
/// ```toml
/// [budget]
/// ceiling = "25MB"
/// warn_threshold = "128KB"
/// text_limit = 50000
/// critical_paths = ["/", "/info"]
///
/// [budget.critical]
/// sections = 5
/// collections = 5
/// section_refs = 3
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetConfig {
    /// Maximum serialized props size (e.g. "25MB", "512KB").
    #[serde(default = "defaults::budget::ceiling")]
    #[educe(Default = defaults::budget::ceiling())]
    pub ceiling: String,

    /// Final size above which a large-payload warning is logged.
    #[serde(default = "defaults::budget::warn_threshold")]
    #[educe(Default = defaults::budget::warn_threshold())]
    pub warn_threshold: String,

    /// Character limit for long text fields once truncation kicks in.
    #[serde(default = "defaults::budget::text_limit")]
    #[educe(Default = defaults::budget::text_limit())]
    pub text_limit: usize,

    /// Pages that keep more content when collections are capped.
    #[serde(default = "defaults::budget::critical_paths")]
    #[educe(Default = defaults::budget::critical_paths())]
    pub critical_paths: Vec<String>,

    /// Caps applied on critical paths.
    #[serde(default = "defaults::budget::critical")]
    #[educe(Default = defaults::budget::critical())]
    pub critical: Caps,

    /// Caps applied everywhere else.
    #[serde(default = "defaults::budget::standard")]
    #[educe(Default = defaults::budget::standard())]
    pub standard: Caps,
}

/// Collection caps for one class of page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Caps {
    /// Max `sections`/`bottomSections` entries.
    pub sections: usize,

    /// Max `items`/`posts`/`projects` entries.
    pub collections: usize,

    /// Max references and actions kept per section.
    pub section_refs: usize,
}

impl BudgetConfig {
    pub fn ceiling_bytes(&self) -> usize {
        parse_size_string(&self.ceiling)
    }

    pub fn warn_bytes(&self) -> usize {
        parse_size_string(&self.warn_threshold)
    }

    pub fn is_critical(&self, url_path: &str) -> bool {
        self.critical_paths.iter().any(|p| p == url_path)
    }

    /// Caps for `url_path`.
    pub fn caps_for(&self, url_path: &str) -> Caps {
        if self.is_critical(url_path) {
            self.critical
        } else {
            self.standard
        }
    }
}
