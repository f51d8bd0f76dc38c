//! Content loading errors.

use super::frontmatter::FrontMatterError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content directory `{0}` not found")]
    MissingDir(PathBuf),

    #[error("failed to walk content directory `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("`{0}` must contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("front matter error in `{0}`")]
    FrontMatter(PathBuf, #[source] FrontMatterError),

    #[error("invalid `__metadata` in `{0}`")]
    Metadata(PathBuf, #[source] serde_json::Error),
}
