//! Props pipeline errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropsError {
    /// No content object is routed at the path. Maps to a 404 page.
    #[error("page not found: {0}")]
    NotFound(String),

    #[error("invalid url path `{0}`: must start with `/`")]
    InvalidPath(String),

    #[error("failed to serialize props")]
    Serialize(#[from] serde_json::Error),
}
