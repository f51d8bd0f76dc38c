//! Content model and store.
//!
//! The content store is the read-only input of the props pipeline: a flat,
//! ordered collection of typed content objects (pages, posts, projects,
//! site config, theme), each tagged with a model name and, for routable
//! objects, a URL path.
//!
//! ```text
//! content/
//! ├── data/config.json        → Config       (no urlPath)
//! ├── data/style.json         → ThemeStyle   (no urlPath)
//! └── pages/
//!     ├── index.md            → PageLayout   "/"
//!     ├── blog/index.md       → PostFeedLayout "/blog"
//!     └── blog/my-post.md     → PostLayout   "/blog/my-post"
//! ```

mod error;
pub mod frontmatter;
mod loader;
pub mod path;
mod store;
mod types;

pub use path::normalize_url_path;
pub use store::ContentStore;
pub use types::{ContentObject, ContentRef, Metadata, ModelName};

#[cfg(test)]
pub(crate) use store::tests::object;
