//! Filesystem loader for the content store.
//!
//! Walks the content directory in file-name order and turns every `.json`
//! and `.md` file into a [`ContentObject`]. Files that carry no
//! `__metadata` get one derived from their `type`/`layout` field and their
//! location (see [`super::path`]).

use super::{
    error::ContentError,
    frontmatter::parse_markdown,
    path::{content_id, url_path_for},
    store::ContentStore,
    types::{ContentObject, Metadata},
};
use crate::log;
use serde_json::{Map, Value};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Key of the embedded metadata block.
const METADATA_KEY: &str = "__metadata";

/// Fields that name the model when `__metadata` is absent, in priority order.
const MODEL_FIELDS: &[&str] = &["type", "layout"];

impl ContentStore {
    /// Load every content file under `dir`.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        if !dir.is_dir() {
            return Err(ContentError::MissingDir(dir.to_path_buf()));
        }

        let mut objects = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|err| ContentError::Walk(dir.to_path_buf(), err))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(dir).unwrap_or(path);
            if let Some(obj) = load_file(path, relative)? {
                objects.push(obj);
            }
        }

        Ok(Self::new(objects))
    }
}

/// Load one file. Returns `None` for unsupported files and model-less data.
fn load_file(path: &Path, relative: &Path) -> Result<Option<ContentObject>, ContentError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let fields = match ext.as_deref() {
        Some("json") => {
            let text = read(path)?;
            match serde_json::from_str::<Value>(&text)
                .map_err(|err| ContentError::Json(path.to_path_buf(), err))?
            {
                Value::Object(map) => map,
                _ => return Err(ContentError::NotAnObject(path.to_path_buf())),
            }
        }
        Some("md" | "markdown") => {
            let text = read(path)?;
            parse_markdown(&text).map_err(|err| ContentError::FrontMatter(path.to_path_buf(), err))?
        }
        _ => return Ok(None),
    };

    into_object(fields, path, relative)
}

fn read(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))
}

/// Split raw fields into metadata and the remaining fields.
fn into_object(
    mut fields: Map<String, Value>,
    path: &Path,
    relative: &Path,
) -> Result<Option<ContentObject>, ContentError> {
    let metadata = match fields.remove(METADATA_KEY) {
        Some(raw) => {
            let mut metadata: Metadata = serde_json::from_value(raw)
                .map_err(|err| ContentError::Metadata(path.to_path_buf(), err))?;
            if metadata.id.is_empty() {
                metadata.id = content_id(relative);
            }
            if metadata.url_path.is_none() {
                metadata.url_path = url_path_for(relative);
            }
            metadata
        }
        None => {
            let model = MODEL_FIELDS
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .filter(|model| !model.is_empty());
            let Some(model) = model else {
                log!("content"; "skipping `{}`: no `type` or `layout` field", relative.display());
                return Ok(None);
            };
            let mut metadata = Metadata::new(model, content_id(relative));
            metadata.url_path = url_path_for(relative);
            metadata
        }
    };

    Ok(Some(ContentObject::new(metadata, fields)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::ModelName;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_markdown_and_json() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "pages/index.md", "---\ntype: PageLayout\ntitle: Home\n---\nWelcome");
        write(
            dir.path(),
            "pages/blog/first.md",
            "---\ntype: PostLayout\ntitle: First\ndate: '2024-01-15'\n---\nBody",
        );
        write(dir.path(), "data/config.json", r#"{"type": "Config", "favicon": "/f.svg"}"#);

        let store = ContentStore::load(dir.path()).unwrap();
        assert_eq!(store.len(), 3);

        let home = store.get_by_url("/").unwrap();
        assert_eq!(home.model_name(), &ModelName::PageLayout);
        assert_eq!(home.id(), "content/pages/index.md");
        assert_eq!(home.str_field("markdownContent"), Some("Welcome"));

        let post = store.get_by_url("/blog/first").unwrap();
        assert_eq!(post.id(), "content/pages/blog/first.md");
        assert_eq!(post.str_field("date"), Some("2024-01-15"));

        let config = store.first_of(&ModelName::Config).unwrap();
        assert_eq!(config.url_path(), None);
        assert_eq!(config.id(), "content/data/config.json");
    }

    #[test]
    fn test_load_keeps_explicit_metadata() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "pages/about.json",
            r#"{"__metadata": {"modelName": "PageLayout", "id": "about-page", "urlPath": "/about-us"}, "title": "About"}"#,
        );

        let store = ContentStore::load(dir.path()).unwrap();
        let page = store.get_by_url("/about-us").unwrap();
        assert_eq!(page.id(), "about-page");
        assert!(store.get_by_url("/about").is_none());
    }

    #[test]
    fn test_load_skips_modelless_and_unknown_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "data/misc.json", r#"{"title": "no model"}"#);
        write(dir.path(), "images/logo.svg", "<svg/>");
        write(dir.path(), "pages/index.md", "---\nlayout: PageLayout\n---\n");

        let store = ContentStore::load(dir.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.url_paths(), vec!["/"]);
    }

    #[test]
    fn test_load_reports_bad_json_with_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "data/broken.json", "{ not json");

        let err = ContentStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::Json(..)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_rejects_non_object_json() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "data/list.json", "[1, 2]");

        let err = ContentStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::NotAnObject(_)));
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = ContentStore::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ContentError::MissingDir(_)));
    }
}
