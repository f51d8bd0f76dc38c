//! In-memory content store.
//!
//! Holds the flat, ordered collection of content objects for one build and
//! indexes it by URL path and by id. The store is immutable once built, so
//! it can be shared freely across rayon workers.

use super::{
    path::normalize_url_path,
    types::{ContentObject, ModelName},
};
use crate::log;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct ContentStore {
    objects: Vec<ContentObject>,
    by_url: FxHashMap<String, usize>,
    by_id: FxHashMap<String, usize>,
}

impl ContentStore {
    /// Build a store from objects, keeping their order.
    ///
    /// When two objects claim the same URL path (or id) the first one wins.
    pub fn new(objects: Vec<ContentObject>) -> Self {
        let mut by_url = FxHashMap::default();
        let mut by_id = FxHashMap::default();

        for (index, obj) in objects.iter().enumerate() {
            if let Some(raw) = obj.url_path() {
                match normalize_url_path(raw) {
                    Some(url) if by_url.contains_key(url.as_ref()) => {
                        log!("content"; "duplicate url path `{}` in `{}`, keeping first", url, obj.id());
                    }
                    Some(url) => {
                        by_url.insert(url.into_owned(), index);
                    }
                    None => log!("content"; "invalid url path `{}` in `{}`, not routed", raw, obj.id()),
                }
            }
            if !obj.id().is_empty() {
                by_id.entry(obj.id().to_owned()).or_insert(index);
            }
        }

        Self {
            objects,
            by_url,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Object routed at `url_path` (already normalized).
    pub fn get_by_url(&self, url_path: &str) -> Option<&ContentObject> {
        self.by_url.get(url_path).map(|&i| &self.objects[i])
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ContentObject> {
        self.by_id.get(id).map(|&i| &self.objects[i])
    }

    /// All objects of a model, in store order.
    pub fn of_model<'a>(&'a self, model: &'a ModelName) -> impl Iterator<Item = &'a ContentObject> {
        self.objects.iter().filter(move |obj| obj.model_name() == model)
    }

    /// First object of a model (site config, theme).
    pub fn first_of(&self, model: &ModelName) -> Option<&ContentObject> {
        self.objects.iter().find(|obj| obj.model_name() == model)
    }

    pub fn find_by_slug(&self, model: &ModelName, slug: &str) -> Option<&ContentObject> {
        self.objects
            .iter()
            .find(|obj| obj.model_name() == model && obj.slug() == Some(slug))
    }

    /// Every routable URL path, in store order, without duplicates.
    pub fn url_paths(&self) -> Vec<&str> {
        let mut paths: Vec<(usize, &str)> = self
            .by_url
            .iter()
            .map(|(url, &index)| (index, url.as_str()))
            .collect();
        paths.sort_unstable_by_key(|(index, _)| *index);
        paths.into_iter().map(|(_, url)| url).collect()
    }
}
