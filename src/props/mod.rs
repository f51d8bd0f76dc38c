//! Page props pipeline: content store → typed, serializable page props.
//!
//! ```text
//! url_path ──► Resolver::resolve ──► PageProps ──► Budgeter::fit ──► props.json
//!                   │
//!                   ├── ContentStore (page lookup, reference targets)
//!                   └── PropsCache   (global props, post/project listings)
//! ```
//!
//! Every object in the tree carries `__metadata` with its `modelName` and
//! `id`; the types make that non-optional.

mod cache;
mod error;
mod feed;
mod fields;
mod resolve;
pub mod types;

pub use cache::{GLOBAL_PROPS_CACHE, PropsCache};
pub use error::PropsError;
pub use resolve::Resolver;
pub use types::PageProps;

#[cfg(test)]
pub(crate) use resolve::tests::fixture;
