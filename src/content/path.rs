//! URL path and content id utilities.
//!
//! Content files live under the content root; routable pages under `pages/`.
//!
//! | Source (relative)         | id                                | urlPath         |
//! |---------------------------|-----------------------------------|-----------------|
//! | `pages/index.md`          | `content/pages/index.md`          | `/`             |
//! | `pages/blog/index.md`     | `content/pages/blog/index.md`     | `/blog`         |
//! | `pages/blog/my-post.md`   | `content/pages/blog/my-post.md`   | `/blog/my-post` |
//! | `data/config.json`        | `content/data/config.json`        | -               |

use regex::Regex;
use std::{
    borrow::Cow,
    path::{Component, Path},
    sync::LazyLock,
};

/// Directory (relative to the content root) holding routable pages.
const PAGES_DIR: &str = "pages";

/// Prefix of content ids, matching the form used by section references.
const ID_PREFIX: &str = "content";

/// Normalize a requested URL path.
///
/// Returns `None` for empty or relative paths and for paths with `.` or `..`
/// segments. A trailing `/` is dropped except for the root.
pub fn normalize_url_path(path: &str) -> Option<Cow<'_, str>> {
    let path = path.trim();
    if !path.starts_with('/') || path.split('/').any(|s| s == "." || s == "..") {
        return None;
    }
    let trimmed = path.trim_end_matches('/');
    Some(match trimmed {
        "" => Cow::Borrowed("/"),
        t if t.len() == path.len() => Cow::Borrowed(path),
        t => Cow::Owned(t.to_owned()),
    })
}

/// Forward-slash segments of a relative path.
fn segments(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Content id for a file: `content/<relative path>`.
pub fn content_id(relative: &Path) -> String {
    let mut id = String::from(ID_PREFIX);
    for segment in segments(relative) {
        id.push('/');
        id.push_str(&segment);
    }
    id
}

/// URL path for a file under `pages/`, `None` for everything else.
pub fn url_path_for(relative: &Path) -> Option<String> {
    let mut parts = segments(relative);
    if parts.first().map(String::as_str) != Some(PAGES_DIR) {
        return None;
    }
    parts.remove(0);

    let file = parts.pop()?;
    let stem = Path::new(&file).file_stem()?.to_string_lossy().into_owned();
    if stem != "index" {
        parts.push(stem);
    }

    Some(format!("/{}", parts.join("/")))
}

/// Slug named by a path-like reference such as `content/pages/projects/alpha.md`.
pub fn reference_slug(reference: &str) -> Option<&str> {
    static RE_CONTENT_REF: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^(?:content/)?pages/(?:[^/]+/)*(?P<slug>[^/]+)\.(?:md|markdown|json)$").unwrap()
    });

    RE_CONTENT_REF
        .captures(reference.trim())
        .and_then(|caps| caps.name("slug"))
        .map(|m| m.as_str())
        .filter(|slug| *slug != "index")
}
