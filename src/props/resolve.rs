//! Props resolution: URL path + content store → [`PageProps`].
//!
//! # Per-model assembly
//!
//! | Model                | Adds                                                  |
//! |----------------------|-------------------------------------------------------|
//! | `PostLayout`         | `markdownContent`, `media`, `bottomSections`,         |
//! |                      | `prevPost`/`nextPost`                                 |
//! | `ProjectLayout`      | same as posts, plus `client`, with                    |
//! |                      | `prevProject`/`nextProject`                           |
//! | `PostFeedLayout`     | `sections`, `items` (all posts, newest first)         |
//! | `ProjectFeedLayout`  | `sections`, `items` (all projects, newest first)      |
//! | anything else        | `sections`, plus `posts`/`projects` listings when a   |
//! |                      | `PostFeedSection`/`ProjectFeedSection` is embedded     |
//!
//! Every page gets `global` (site config + theme) from the [`PropsCache`].
//! Section references (`content/pages/<kind>/<slug>.md` strings or inline
//! objects) are resolved into [`Summary`] values; unresolvable ones are
//! dropped, so no path strings reach the renderer. The same holds for
//! `author`, which resolves to a `Person` object.

use super::{
    cache::PropsCache,
    error::PropsError,
    feed::{FeedKind, build_listing, resolve_author, summarize},
    fields::{
        derive_id, opt_text, strip_keys, take_array, take_metadata, take_opt_text, take_text,
        take_value,
    },
    types::{GlobalProps, PageProps, Section, SiteProps, Summary, ThemeProps},
};
use crate::{
    content::{
        ContentObject, ContentRef, ContentStore, ModelName, normalize_url_path,
        path::reference_slug,
    },
    log,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Page keys consumed by typed [`PageProps`] fields.
const PAGE_KEYS: &[&str] = &[
    "type", "title", "slug", "description", "excerpt", "date", "author", "featuredImage",
    "colors", "backgroundImage", "markdownContent", "media", "client", "sections",
    "bottomSections", "items", "posts", "projects", "prevPost", "nextPost", "prevProject",
    "nextProject", "global", "__metadata",
];

/// Section keys consumed by typed [`Section`] fields.
const SECTION_KEYS: &[&str] = &[
    "type", "title", "subtitle", "text", "actions", "posts", "projects", "__metadata",
];

/// Config keys consumed by typed [`SiteProps`] fields.
const SITE_KEYS: &[&str] = &[
    "type", "fixedLabel", "favicon", "titleSuffix", "defaultSocialImage", "defaultMetaTags",
    "header", "footer", "__metadata",
];

const DEFAULT_SECTION_TYPE: &str = "Section";
const DEFAULT_SITE_ID: &str = "site";

const META_TAGS_CAP: usize = 3;
const PRIMARY_LINKS_CAP: usize = 10;
const SECONDARY_LINKS_CAP: usize = 5;

/// Resolves pages of one content store.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a ContentStore,
    cache: &'a PropsCache,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a ContentStore, cache: &'a PropsCache) -> Self {
        Self { store, cache }
    }

    /// Resolve the full props tree for `url_path`.
    pub fn resolve(&self, url_path: &str) -> Result<PageProps, PropsError> {
        let path = normalize_url_path(url_path)
            .ok_or_else(|| PropsError::InvalidPath(url_path.to_owned()))?;
        let page = self
            .store
            .get_by_url(&path)
            .ok_or_else(|| PropsError::NotFound(path.to_string()))?;

        let global = self.cache.global(|| global_props(self.store));
        Ok(self.page_props(page, &path, GlobalProps::clone(&global)))
    }

    fn page_props(&self, page: &ContentObject, path: &str, global: GlobalProps) -> PageProps {
        let model = page.model_name();
        let mut fields = page.fields.clone();

        let slug = take_opt_text(&mut fields, "slug")
            .or_else(|| page.slug().map(str::to_owned))
            .unwrap_or_default();
        let sections = self.sections(take_array(&mut fields, "sections"), path, "sections");

        let mut props = PageProps {
            kind: model.to_string(),
            title: take_text(&mut fields, "title"),
            slug,
            description: take_text(&mut fields, "description"),
            excerpt: take_text(&mut fields, "excerpt"),
            date: take_opt_text(&mut fields, "date"),
            author: resolve_author(self.store, take_value(&mut fields, "author"), page.id()),
            featured_image: take_value(&mut fields, "featuredImage"),
            colors: take_value(&mut fields, "colors"),
            background_image: take_value(&mut fields, "backgroundImage"),
            markdown_content: None,
            media: None,
            client: None,
            sections,
            bottom_sections: Vec::new(),
            items: None,
            posts: None,
            projects: None,
            prev_post: None,
            next_post: None,
            prev_project: None,
            next_project: None,
            extra: Map::new(),
            metadata: page.metadata.clone(),
            global,
        };

        match model {
            ModelName::PostLayout | ModelName::ProjectLayout => {
                props.markdown_content = Some(take_text(&mut fields, "markdownContent"));
                props.media = take_value(&mut fields, "media");
                if *model == ModelName::ProjectLayout {
                    props.client = Some(take_text(&mut fields, "client"));
                    (props.prev_project, props.next_project) =
                        self.adjacent(FeedKind::Projects, page.id());
                } else {
                    (props.prev_post, props.next_post) = self.adjacent(FeedKind::Posts, page.id());
                }
                props.bottom_sections =
                    self.sections(take_array(&mut fields, "bottomSections"), path, "bottomSections");
            }
            _ => {
                if let Some(kind) = FeedKind::of_layout(model) {
                    props.items = Some(self.listing(kind).to_vec());
                } else {
                    for kind in FeedKind::ALL {
                        let embedded = props
                            .sections
                            .iter()
                            .any(|s| FeedKind::of_listing_section(&s.kind) == Some(kind));
                        if !embedded {
                            continue;
                        }
                        let listing = Some(self.listing(kind).to_vec());
                        match kind {
                            FeedKind::Posts => props.posts = listing,
                            FeedKind::Projects => props.projects = listing,
                        }
                    }
                }
            }
        }

        strip_keys(&mut fields, PAGE_KEYS);
        props.extra = fields;
        props
    }

    fn listing(&self, kind: FeedKind) -> Arc<[Summary]> {
        self.cache.listing(kind, || build_listing(self.store, kind))
    }

    /// Older and newer neighbours of `id` in the listing of `kind`.
    fn adjacent(&self, kind: FeedKind, id: &str) -> (Option<Summary>, Option<Summary>) {
        let listing = self.listing(kind);
        let Some(index) = listing.iter().position(|item| item.metadata.id == id) else {
            return (None, None);
        };
        let older = listing.get(index + 1).cloned();
        let newer = index.checked_sub(1).and_then(|i| listing.get(i)).cloned();
        (older, newer)
    }

    fn sections(&self, raw: Vec<Value>, path: &str, group: &str) -> Vec<Section> {
        raw.into_iter()
            .enumerate()
            .filter_map(|(position, value)| match value {
                Value::Object(fields) => Some(self.section(fields, path, group, position)),
                _ => {
                    log!("resolve"; "{}: skipping malformed entry {} in `{}`", path, position, group);
                    None
                }
            })
            .collect()
    }

    fn section(
        &self,
        mut fields: Map<String, Value>,
        path: &str,
        group: &str,
        position: usize,
    ) -> Section {
        let kind = take_opt_text(&mut fields, "type").unwrap_or_else(|| DEFAULT_SECTION_TYPE.into());
        let metadata = take_metadata(&mut fields, &kind, || {
            derive_id("section", &[path, group, &position.to_string(), &kind])
        });

        let posts = self.take_references(&mut fields, FeedKind::Posts, path, &metadata.id);
        let projects = self.take_references(&mut fields, FeedKind::Projects, path, &metadata.id);

        Section {
            title: take_text(&mut fields, "title"),
            subtitle: take_text(&mut fields, "subtitle"),
            text: take_text(&mut fields, "text"),
            actions: take_array(&mut fields, "actions"),
            posts,
            projects,
            extra: {
                strip_keys(&mut fields, SECTION_KEYS);
                fields
            },
            kind,
            metadata,
        }
    }

    /// Resolve a section's `posts`/`projects` field, if it has one.
    fn take_references(
        &self,
        fields: &mut Map<String, Value>,
        kind: FeedKind,
        path: &str,
        owner: &str,
    ) -> Option<Vec<Summary>> {
        if !fields.contains_key(kind.field()) {
            return None;
        }
        let raw = take_array(fields, kind.field());
        Some(self.references(raw, kind, path, owner))
    }

    fn references(&self, raw: Vec<Value>, kind: FeedKind, path: &str, owner: &str) -> Vec<Summary> {
        raw.into_iter()
            .enumerate()
            .filter_map(|(position, entry)| match ContentRef::from_value(entry) {
                Some(ContentRef::Reference(reference)) => {
                    let found = self.lookup(&reference, kind);
                    if found.is_none() {
                        log!("resolve"; "{}: unresolved {} reference `{}`", path, kind, reference);
                    }
                    found.map(|obj| summarize(self.store, &obj.fields, obj.metadata.clone(), kind))
                }
                Some(ContentRef::Inline(mut fields)) => {
                    let model = opt_text(&fields, "type").unwrap_or_else(|| kind.model().to_string());
                    let metadata = take_metadata(&mut fields, &model, || {
                        derive_id(kind.field(), &[owner, &position.to_string()])
                    });
                    Some(summarize(self.store, &fields, metadata, kind))
                }
                None => {
                    log!("resolve"; "{}: skipping malformed {} entry {}", path, kind, position);
                    None
                }
            })
            .collect()
    }

    /// Find the object a reference string names: by id, then by slug.
    fn lookup(&self, reference: &str, kind: FeedKind) -> Option<&'a ContentObject> {
        let model = kind.model();
        if let Some(obj) = self.store.get_by_id(reference)
            && *obj.model_name() == model
        {
            return Some(obj);
        }
        reference_slug(reference).and_then(|slug| self.store.find_by_slug(&model, slug))
    }
}

/// Assemble `global` from the first `Config` and `ThemeStyle` objects.
fn global_props(store: &ContentStore) -> GlobalProps {
    let site = store
        .first_of(&ModelName::Config)
        .map(site_props)
        .unwrap_or_default();
    let theme = store
        .first_of(&ModelName::ThemeStyle)
        .map(|theme| ThemeProps {
            fields: theme.fields.clone(),
            metadata: Some(theme.metadata.clone()),
        })
        .unwrap_or_default();

    GlobalProps { site, theme }
}

fn site_props(config: &ContentObject) -> SiteProps {
    let mut fields = config.fields.clone();
    let mut metadata = config.metadata.clone();
    if metadata.id.is_empty() {
        metadata.id = DEFAULT_SITE_ID.into();
    }

    SiteProps {
        kind: take_opt_text(&mut fields, "type").unwrap_or_else(|| ModelName::Config.to_string()),
        fixed_label: take_opt_text(&mut fields, "fixedLabel"),
        favicon: take_opt_text(&mut fields, "favicon"),
        title_suffix: take_opt_text(&mut fields, "titleSuffix"),
        default_social_image: take_value(&mut fields, "defaultSocialImage"),
        default_meta_tags: take_array(&mut fields, "defaultMetaTags")
            .into_iter()
            .take(META_TAGS_CAP)
            .collect(),
        header: take_value(&mut fields, "header").map(trim_navigation),
        footer: take_value(&mut fields, "footer").map(trim_navigation),
        extra: {
            strip_keys(&mut fields, SITE_KEYS);
            fields
        },
        metadata,
    }
}

/// Cap the link lists of a header/footer navigation block.
fn trim_navigation(mut nav: Value) -> Value {
    if let Value::Object(map) = &mut nav {
        for (key, cap) in [("primaryLinks", PRIMARY_LINKS_CAP), ("secondaryLinks", SECONDARY_LINKS_CAP)] {
            if let Some(Value::Array(links)) = map.get_mut(key) {
                links.truncate(cap);
            }
        }
    }
    nav
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::object;
    use crate::props::types::SummaryDetail;
    use serde_json::json;

    fn links(count: usize) -> Value {
        Value::Array((0..count).map(|i| json!({"label": format!("L{i}"), "url": format!("/{i}")})).collect())
    }

    /// A small portfolio site exercising every layout.
    pub(crate) fn fixture() -> ContentStore {
        ContentStore::new(vec![
            object(
                "Config",
                "content/data/config.json",
                None,
                json!({
                    "favicon": "/favicon.svg",
                    "titleSuffix": " | Portfolio",
                    "defaultMetaTags": [1, 2, 3, 4, 5],
                    "header": {"title": "Home", "primaryLinks": links(12), "secondaryLinks": links(7)},
                    "footer": {"text": "(c) 2024", "primaryLinks": links(2)},
                    "contactEmail": "hi@example.com"
                }),
            ),
            object("ThemeStyle", "content/data/style.json", None, json!({"fontBody": "sans"})),
            object(
                "Person",
                "content/data/team/alice.json",
                None,
                json!({"firstName": "Alice", "lastName": "Doe"}),
            ),
            object(
                "PageLayout",
                "content/pages/index.md",
                Some("/"),
                json!({
                    "title": "Home",
                    "sections": [
                        {"type": "HeroSection", "title": "Hi", "text": "Welcome"},
                        {
                            "type": "FeaturedProjectsSection",
                            "title": "Work",
                            "projects": [
                                "content/pages/projects/alpha.md",
                                {"title": "Inline", "slug": "inline", "client": "Self"},
                                "content/pages/projects/missing.md"
                            ],
                            "variant": "three-col",
                            "__metadata": {"modelName": "FeaturedProjectsSection", "id": "featured"}
                        },
                        {"type": "PostFeedSection", "title": "Recent"},
                        "not a section"
                    ]
                }),
            ),
            object(
                "PostFeedLayout",
                "content/pages/blog/index.md",
                Some("/blog"),
                json!({"title": "Blog", "postFeed": {"showDate": true}}),
            ),
            object(
                "PostLayout",
                "content/pages/blog/first.md",
                Some("/blog/first"),
                json!({
                    "title": "First",
                    "date": "2024-01-10",
                    "author": "content/data/team/alice.json",
                    "markdownContent": "# First",
                    "bottomSections": [{"type": "PostFeedSection", "posts": ["content/pages/blog/second.md"]}]
                }),
            ),
            object(
                "PostLayout",
                "content/pages/blog/second.md",
                Some("/blog/second"),
                json!({
                    "title": "Second",
                    "date": "2024-02-10",
                    "author": "content/data/team/nobody.json",
                    "markdownContent": "# Second"
                }),
            ),
            object(
                "PostLayout",
                "content/pages/blog/draft.md",
                Some("/blog/draft"),
                json!({"title": "Undated", "author": {"firstName": "Bob"}}),
            ),
            object(
                "ProjectFeedLayout",
                "content/pages/projects/index.md",
                Some("/projects"),
                json!({"title": "Projects"}),
            ),
            object(
                "ProjectLayout",
                "content/pages/projects/alpha.md",
                Some("/projects/alpha"),
                json!({"title": "Alpha", "client": "ACME", "date": "2023-05-01", "media": [1, 2, 3, 4]}),
            ),
            object(
                "ProjectLayout",
                "content/pages/projects/beta.md",
                Some("/projects/beta"),
                json!({"title": "Beta", "date": "2023-06-01"}),
            ),
        ])
    }

    #[test]
    fn test_model_name_matches_source_for_every_page() {
        let store = fixture();
        let cache = PropsCache::new();
        let resolver = Resolver::new(&store, &cache);

        for path in store.url_paths() {
            let props = resolver.resolve(path).unwrap();
            let source = store.get_by_url(path).unwrap();
            assert_eq!(&props.metadata.model_name, source.model_name(), "{path}");
            assert_eq!(props.kind, source.model_name().as_str());
        }
    }

    #[test]
    fn test_not_found_and_invalid_path() {
        let store = fixture();
        let cache = PropsCache::new();
        let resolver = Resolver::new(&store, &cache);

        assert!(matches!(resolver.resolve("/nope"), Err(PropsError::NotFound(p)) if p == "/nope"));
        assert!(matches!(resolver.resolve("blog"), Err(PropsError::InvalidPath(_))));
        assert!(matches!(resolver.resolve(""), Err(PropsError::InvalidPath(_))));
        assert!(resolver.resolve("/blog/").is_ok());
    }

    #[test]
    fn test_feed_layout_items_sorted() {
        let store = fixture();
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/blog").unwrap();

        let items = props.items.unwrap();
        let titles: Vec<_> = items.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First", "Undated"]);
        assert_eq!(props.extra["postFeed"], json!({"showDate": true}));
        assert!(props.posts.is_none());
    }

    #[test]
    fn test_project_feed_layout() {
        let store = fixture();
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/projects").unwrap();

        let items = props.items.unwrap();
        assert_eq!(items[0].title, "Beta");
        assert_eq!(items[1].detail, SummaryDetail::Project { client: "ACME".into() });
    }

    #[test]
    fn test_home_sections_and_references() {
        let store = fixture();
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/").unwrap();

        assert_eq!(props.sections.len(), 3);

        let hero = &props.sections[0];
        assert_eq!(hero.kind, "HeroSection");
        assert_eq!(hero.metadata.model_name.as_str(), "HeroSection");
        assert!(hero.metadata.id.starts_with("section-"));
        assert!(hero.posts.is_none());

        let featured = &props.sections[1];
        assert_eq!(featured.metadata.id, "featured");
        assert_eq!(featured.extra["variant"], json!("three-col"));
        let projects = featured.projects.as_ref().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Alpha");
        assert_eq!(projects[0].metadata.id, "content/pages/projects/alpha.md");
        assert_eq!(projects[1].title, "Inline");
        assert_eq!(projects[1].metadata.model_name, ModelName::ProjectLayout);
        assert!(projects[1].metadata.id.starts_with("projects-"));

        // A post feed section pulls in the full post listing
        assert_eq!(props.posts.as_ref().map(Vec::len), Some(3));
        assert!(props.projects.is_none());
    }

    #[test]
    fn test_post_layout() {
        let store = fixture();
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/blog/first").unwrap();

        assert_eq!(props.markdown_content.as_deref(), Some("# First"));
        assert_eq!(props.slug, "first");
        assert_eq!(props.date.as_deref(), Some("2024-01-10"));
        let author = props.author.as_ref().unwrap();
        assert_eq!(author["firstName"], json!("Alice"));
        assert_eq!(author["lastName"], json!("Doe"));
        assert_eq!(author["__metadata"]["modelName"], json!("Person"));
        assert_eq!(author["__metadata"]["id"], json!("content/data/team/alice.json"));
        assert!(props.client.is_none());
        assert_eq!(props.bottom_sections.len(), 1);
        let posts = props.bottom_sections[0].posts.as_ref().unwrap();
        assert_eq!(posts[0].title, "Second");
        assert!(props.items.is_none());
    }

    #[test]
    fn test_unresolved_and_inline_authors() {
        let store = fixture();
        let cache = PropsCache::new();
        let resolver = Resolver::new(&store, &cache);

        let second = resolver.resolve("/blog/second").unwrap();
        assert_eq!(second.author, None);

        let draft = resolver.resolve("/blog/draft").unwrap();
        let author = draft.author.unwrap();
        assert_eq!(author["firstName"], json!("Bob"));
        assert_eq!(author["__metadata"]["modelName"], json!("Person"));
        assert!(author["__metadata"]["id"].is_string());
    }

    #[test]
    fn test_post_neighbours() {
        let store = fixture();
        let cache = PropsCache::new();
        let resolver = Resolver::new(&store, &cache);
        let slug = |s: &Option<Summary>| s.as_ref().map(|s| s.slug.clone());

        // Listing order: second, first, draft
        let newest = resolver.resolve("/blog/second").unwrap();
        assert_eq!(slug(&newest.prev_post).as_deref(), Some("first"));
        assert_eq!(newest.next_post, None);

        let middle = resolver.resolve("/blog/first").unwrap();
        assert_eq!(slug(&middle.prev_post).as_deref(), Some("draft"));
        assert_eq!(slug(&middle.next_post).as_deref(), Some("second"));
        assert!(middle.prev_project.is_none() && middle.next_project.is_none());

        let oldest = resolver.resolve("/blog/draft").unwrap();
        assert_eq!(oldest.prev_post, None);
        assert_eq!(slug(&oldest.next_post).as_deref(), Some("first"));
    }

    #[test]
    fn test_project_neighbours_serialize() {
        let store = fixture();
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/projects/alpha").unwrap();
        let value = serde_json::to_value(&props).unwrap();

        assert_eq!(value["nextProject"]["slug"], json!("beta"));
        assert_eq!(value["nextProject"]["title"], json!("Beta"));
        assert!(value["nextProject"]["__metadata"]["id"].is_string());
        assert!(value.get("prevProject").is_none());
        assert!(value.get("prevPost").is_none());

        let home = serde_json::to_value(Resolver::new(&store, &cache).resolve("/").unwrap()).unwrap();
        assert!(home.get("nextPost").is_none());
    }

    #[test]
    fn test_project_layout() {
        let store = fixture();
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/projects/alpha").unwrap();

        assert_eq!(props.client.as_deref(), Some("ACME"));
        assert_eq!(props.media, Some(json!([1, 2, 3, 4])));
    }

    #[test]
    fn test_global_props() {
        let store = fixture();
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/").unwrap();
        let site = &props.global.site;

        assert_eq!(site.kind, "Config");
        assert_eq!(site.favicon.as_deref(), Some("/favicon.svg"));
        assert_eq!(site.default_meta_tags.len(), 3);
        assert_eq!(site.metadata.id, "content/data/config.json");
        assert_eq!(site.extra["contactEmail"], json!("hi@example.com"));

        let header = site.header.as_ref().unwrap();
        assert_eq!(header["primaryLinks"].as_array().unwrap().len(), 10);
        assert_eq!(header["secondaryLinks"].as_array().unwrap().len(), 5);
        assert!(site.footer.is_some());

        assert_eq!(props.global.theme.fields["fontBody"], json!("sans"));
    }

    #[test]
    fn test_missing_config_defaults_site() {
        let store = ContentStore::new(vec![object("PageLayout", "p", Some("/"), json!({}))]);
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/").unwrap();

        assert_eq!(props.global.site, SiteProps::default());
        assert_eq!(props.global.theme, ThemeProps::default());
        assert_eq!(props.title, "");
        assert!(props.sections.is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let store = fixture();
        let first = Resolver::new(&store, &PropsCache::new()).resolve("/").unwrap();
        let second = Resolver::new(&store, &PropsCache::new()).resolve("/").unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_serialized_tree_has_no_dangling_references() {
        let store = fixture();
        let cache = PropsCache::new();
        let resolver = Resolver::new(&store, &cache);

        for path in store.url_paths() {
            let value = serde_json::to_value(resolver.resolve(path).unwrap()).unwrap();
            assert!(!value["author"].is_string(), "{path}: author");
            for item in value.get("items").and_then(Value::as_array).into_iter().flatten() {
                assert!(!item["author"].is_string(), "{path}: item author");
            }
            for group in ["sections", "bottomSections"] {
                let Some(sections) = value.get(group).and_then(Value::as_array) else {
                    continue;
                };
                for section in sections {
                    for field in ["posts", "projects"] {
                        for item in section.get(field).and_then(Value::as_array).into_iter().flatten() {
                            assert!(!item["author"].is_string(), "{path}: {field} author");
                        }
                    }
                    assert!(section["__metadata"]["modelName"].is_string());
                    assert!(section["__metadata"]["id"].is_string());
                    for field in ["posts", "projects"] {
                        if let Some(refs) = section.get(field).and_then(Value::as_array) {
                            assert!(refs.iter().all(Value::is_object), "{path}: {field}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_reserved_extra_keys_do_not_duplicate() {
        let store = fixture();
        let cache = PropsCache::new();
        let props = Resolver::new(&store, &cache).resolve("/").unwrap();

        for key in PAGE_KEYS {
            assert!(!props.extra.contains_key(*key), "{key}");
        }
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json.matches("\"global\":").count(), 1);
    }
}
