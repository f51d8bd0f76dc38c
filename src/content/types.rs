//! Content object types as supplied by the content store.
//!
//! Every object carries `__metadata` with a model name tag; everything else is
//! kept as an untyped JSON map and read through the accessors below.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Model name tag from `__metadata.modelName`.
///
/// Unknown tags are preserved verbatim in [`ModelName::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelName {
    PageLayout,
    PostLayout,
    ProjectLayout,
    PostFeedLayout,
    ProjectFeedLayout,
    Config,
    ThemeStyle,
    Person,
    Other(CompactString),
}

impl ModelName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PageLayout => "PageLayout",
            Self::PostLayout => "PostLayout",
            Self::ProjectLayout => "ProjectLayout",
            Self::PostFeedLayout => "PostFeedLayout",
            Self::ProjectFeedLayout => "ProjectFeedLayout",
            Self::Config => "Config",
            Self::ThemeStyle => "ThemeStyle",
            Self::Person => "Person",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for ModelName {
    fn from(name: &str) -> Self {
        match name {
            "PageLayout" => Self::PageLayout,
            "PostLayout" => Self::PostLayout,
            "ProjectLayout" => Self::ProjectLayout,
            "PostFeedLayout" => Self::PostFeedLayout,
            "ProjectFeedLayout" => Self::ProjectFeedLayout,
            "Config" => Self::Config,
            "ThemeStyle" => Self::ThemeStyle,
            "Person" => Self::Person,
            other => Self::Other(other.into()),
        }
    }
}

impl From<String> for ModelName {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ModelName> for String {
    fn from(name: ModelName) -> Self {
        name.as_str().to_owned()
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `__metadata` block of a content object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub model_name: ModelName,

    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,

    /// Anything else the store attached (source paths, editor annotations).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    pub fn new(model_name: impl Into<ModelName>, id: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            id: id.into(),
            url_path: None,
            extra: Map::new(),
        }
    }
}

/// One item of site content: a page, post, project, site config or theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentObject {
    #[serde(rename = "__metadata")]
    pub metadata: Metadata,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ContentObject {
    pub fn new(metadata: Metadata, fields: Map<String, Value>) -> Self {
        Self { metadata, fields }
    }

    #[inline]
    pub fn model_name(&self) -> &ModelName {
        &self.metadata.model_name
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    #[inline]
    pub fn url_path(&self) -> Option<&str> {
        self.metadata.url_path.as_deref()
    }

    /// Field value, treating `null` as absent.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Non-empty string field.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The object's slug: the `slug` field, else the last segment of its URL path.
    pub fn slug(&self) -> Option<&str> {
        self.str_field("slug").or_else(|| {
            self.url_path()
                .and_then(|path| path.rsplit('/').next())
                .filter(|s| !s.is_empty())
        })
    }
}

/// An entry of a section's `posts`/`projects` collection.
///
/// Content files mix path-like references (`content/pages/blog/<slug>.md`)
/// with already-inlined objects in the same field.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentRef {
    Reference(String),
    Inline(Map<String, Value>),
}

impl ContentRef {
    /// Classify a raw collection entry. Anything but a string or object is `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(path) if !path.is_empty() => Some(Self::Reference(path)),
            Value::Object(map) => Some(Self::Inline(map)),
            _ => None,
        }
    }
}
