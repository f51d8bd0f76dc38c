//! Resolved page props.
//!
//! These types are serialized to JSON and handed to the page renderer. Every
//! props object carries a required `__metadata` block: the renderer
//! dispatches on `modelName`/`id`, so no reduction step can remove it.

use crate::content::Metadata;
use serde::Serialize;
use serde_json::{Map, Value};

/// Props for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    /// Model name of the page (`PostLayout`, `PageLayout`, ...)
    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,

    pub slug: String,

    pub description: String,

    pub excerpt: String,

    pub date: Option<String>,

    pub author: Option<Value>,

    pub featured_image: Option<Value>,

    pub colors: Option<Value>,

    pub background_image: Option<Value>,

    /// Long-form body of posts and projects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    pub sections: Vec<Section>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bottom_sections: Vec<Section>,

    /// Feed listing of `PostFeedLayout`/`ProjectFeedLayout` pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Summary>>,

    /// Sibling post listing for pages embedding a post feed section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Summary>>,

    /// Sibling project listing for pages embedding a project feed section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Summary>>,

    /// Older neighbour in the post listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_post: Option<Summary>,

    /// Newer neighbour in the post listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_post: Option<Summary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_project: Option<Summary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_project: Option<Summary>,

    /// Pass-through fields of the source object
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(rename = "__metadata")]
    pub metadata: Metadata,

    pub global: GlobalProps,
}

/// One entry of `sections`/`bottomSections`, keyed by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,

    pub subtitle: String,

    pub text: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Summary>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Summary>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(rename = "__metadata")]
    pub metadata: Metadata,
}

/// Listing form of a post or project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,

    pub slug: String,

    pub description: String,

    pub excerpt: String,

    pub date: Option<String>,

    pub featured_image: Option<Value>,

    #[serde(flatten)]
    pub detail: SummaryDetail,

    #[serde(rename = "__metadata")]
    pub metadata: Metadata,
}

/// Fields that only one listing kind carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryDetail {
    Post { author: Option<Value> },
    Project { client: String },
}

/// Site-wide props shared by every page.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GlobalProps {
    pub site: SiteProps,
    pub theme: ThemeProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProps {
    #[serde(rename = "type")]
    pub kind: String,

    pub fixed_label: Option<String>,

    pub favicon: Option<String>,

    pub title_suffix: Option<String>,

    pub default_social_image: Option<Value>,

    pub default_meta_tags: Vec<Value>,

    pub header: Option<Value>,

    pub footer: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(rename = "__metadata")]
    pub metadata: Metadata,
}

impl Default for SiteProps {
    fn default() -> Self {
        Self {
            kind: "Config".into(),
            fixed_label: None,
            favicon: None,
            title_suffix: None,
            default_social_image: None,
            default_meta_tags: Vec::new(),
            header: None,
            footer: None,
            extra: Map::new(),
            metadata: Metadata::new("Config", "site"),
        }
    }
}

/// Theme object; serializes as `{}` when the site has no theme.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThemeProps {
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    #[serde(rename = "__metadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
