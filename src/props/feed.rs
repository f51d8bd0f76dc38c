//! Post/project listings.
//!
//! Feed pages list every post (or project) as a [`Summary`], newest first.
//! Sections embed the same summaries for their hand-picked references.

use super::{
    fields::{derive_id, opt_text, take_metadata, text, value},
    types::{Summary, SummaryDetail},
};
use crate::{
    content::{ContentRef, ContentStore, Metadata, ModelName},
    log,
    utils::date::newest_first_key,
};
use serde_json::{Map, Value};
use std::fmt;

/// Which kind of content a listing or reference collection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Posts,
    Projects,
}

impl FeedKind {
    pub const ALL: [Self; 2] = [Self::Posts, Self::Projects];

    /// Model name of the listed objects.
    pub fn model(self) -> ModelName {
        match self {
            Self::Posts => ModelName::PostLayout,
            Self::Projects => ModelName::ProjectLayout,
        }
    }

    /// Section field holding references of this kind.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Projects => "projects",
        }
    }

    /// Section types that list every object of a kind.
    pub fn of_listing_section(section_type: &str) -> Option<Self> {
        match section_type {
            "PostFeedSection" => Some(Self::Posts),
            "ProjectFeedSection" => Some(Self::Projects),
            _ => None,
        }
    }

    /// Feed layout that renders the full listing.
    pub fn of_layout(model: &ModelName) -> Option<Self> {
        match model {
            ModelName::PostFeedLayout => Some(Self::Posts),
            ModelName::ProjectFeedLayout => Some(Self::Projects),
            _ => None,
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Reduce a post/project to its listing form.
///
/// A missing `slug` falls back to the last segment of the routed URL.
pub fn summarize(
    store: &ContentStore,
    fields: &Map<String, Value>,
    metadata: Metadata,
    kind: FeedKind,
) -> Summary {
    let detail = match kind {
        FeedKind::Posts => SummaryDetail::Post {
            author: resolve_author(store, value(fields, "author"), &metadata.id),
        },
        FeedKind::Projects => SummaryDetail::Project {
            client: text(fields, "client"),
        },
    };

    Summary {
        kind: opt_text(fields, "type").unwrap_or_else(|| kind.model().to_string()),
        title: text(fields, "title"),
        slug: opt_text(fields, "slug")
            .or_else(|| url_slug(metadata.url_path.as_deref()))
            .unwrap_or_default(),
        description: text(fields, "description"),
        excerpt: text(fields, "excerpt"),
        date: opt_text(fields, "date"),
        featured_image: value(fields, "featuredImage"),
        detail,
        metadata,
    }
}

/// Resolve an `author` field to the `Person` object it names.
///
/// Reference strings are looked up by id and must point at a `Person`;
/// anything unresolvable becomes `None`. Inline objects are kept and get a
/// `__metadata` block when they have none.
pub fn resolve_author(store: &ContentStore, raw: Option<Value>, owner: &str) -> Option<Value> {
    match ContentRef::from_value(raw?)? {
        ContentRef::Reference(reference) => {
            let person = store
                .get_by_id(&reference)
                .filter(|obj| *obj.model_name() == ModelName::Person);
            if person.is_none() {
                log!("resolve"; "{}: unresolved author `{}`", owner, reference);
            }
            serde_json::to_value(person?).ok()
        }
        ContentRef::Inline(mut fields) => {
            let metadata = take_metadata(&mut fields, ModelName::Person.as_str(), || {
                derive_id("person", &[owner])
            });
            fields.insert("__metadata".into(), serde_json::to_value(metadata).ok()?);
            Some(Value::Object(fields))
        }
    }
}

fn url_slug(url_path: Option<&str>) -> Option<String> {
    url_path?
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_owned)
}

/// Stable sort, newest first; undated entries keep their order at the end.
pub fn sort_newest_first(items: &mut [Summary]) {
    items.sort_by_cached_key(|item| newest_first_key(item.date.as_deref()));
}

/// Every object of `kind` in the store, summarized and sorted.
pub fn build_listing(store: &ContentStore, kind: FeedKind) -> Vec<Summary> {
    let model = kind.model();
    let mut items: Vec<Summary> = store
        .of_model(&model)
        .map(|obj| summarize(store, &obj.fields, obj.metadata.clone(), kind))
        .collect();
    sort_newest_first(&mut items);
    items
}
