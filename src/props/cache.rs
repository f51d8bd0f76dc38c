//! Process-wide memoization of data shared by every page.
//!
//! Global site/theme props and the full post/project listings are identical
//! for all pages of one build, so they are computed once and shared.
//!
//! # Invalidation
//!
//! Entries are never invalidated implicitly. Call [`PropsCache::clear`] at
//! the start of each build (the `build` command does) or whenever the content
//! store is replaced in a long-lived process.

use super::{feed::FeedKind, types::{GlobalProps, Summary}};
use crate::log;
use parking_lot::RwLock;
use std::sync::{Arc, LazyLock};

/// Cache shared by the CLI commands.
pub static GLOBAL_PROPS_CACHE: LazyLock<PropsCache> = LazyLock::new(PropsCache::new);

/// Thread-safe memoized props.
///
/// Uses `RwLock` so that rayon workers read concurrently once an entry is
/// populated; population takes the write lock and re-checks.
#[derive(Debug, Default)]
pub struct PropsCache {
    global: RwLock<Option<Arc<GlobalProps>>>,
    posts: RwLock<Option<Arc<[Summary]>>>,
    projects: RwLock<Option<Arc<[Summary]>>>,
}

impl PropsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every memoized entry.
    pub fn clear(&self) {
        *self.global.write() = None;
        *self.posts.write() = None;
        *self.projects.write() = None;
    }

    /// Global props, computed by `init` on first use.
    pub fn global(&self, init: impl FnOnce() -> GlobalProps) -> Arc<GlobalProps> {
        get_or_init(&self.global, || {
            log!("cache"; "assembling global site props");
            Arc::new(init())
        })
    }

    /// Full sorted listing of `kind`, computed by `init` on first use.
    pub fn listing(&self, kind: FeedKind, init: impl FnOnce() -> Vec<Summary>) -> Arc<[Summary]> {
        let slot = match kind {
            FeedKind::Posts => &self.posts,
            FeedKind::Projects => &self.projects,
        };
        get_or_init(slot, || {
            let items = init();
            log!("cache"; "listed {} {}", items.len(), kind);
            Arc::from(items)
        })
    }
}

fn get_or_init<T: ?Sized>(slot: &RwLock<Option<Arc<T>>>, init: impl FnOnce() -> Arc<T>) -> Arc<T> {
    // Fast path: read lock only
    if let Some(value) = slot.read().as_ref() {
        return Arc::clone(value);
    }

    let mut guard = slot.write();
    // Double-check after acquiring write lock
    if let Some(value) = guard.as_ref() {
        return Arc::clone(value);
    }
    let value = init();
    *guard = Some(Arc::clone(&value));
    value
}
