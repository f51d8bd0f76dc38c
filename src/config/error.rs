//! Errors raised while loading or checking `folio.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed folio.toml")]
    Toml(#[from] toml::de::Error),

    /// A byte size setting that is not `<number><B|KB|MB|GB>`.
    #[error("{field} expects a size such as 512KB or 25MB, got `{value}`")]
    Size { field: &'static str, value: String },

    /// A `[budget.critical]`/`[budget.standard]` table with a zero cap.
    #[error("{0} caps must all be at least 1")]
    ZeroCap(&'static str),

    #[error("invalid setting: {0}")]
    Invalid(String),
}
