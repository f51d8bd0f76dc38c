//! Reduction tiers, most content-preserving first.
//!
//! Every tier only removes or shortens data, so the serialized size never
//! grows from one tier to the next. Fields the renderer dispatches on
//! (`type`, `title`, `slug`, `__metadata`, `global.site.header`/`footer`)
//! are never touched.

use crate::{config::Caps, props::PageProps};
use std::fmt;

/// Appended to text fields cut by [`Tier::TruncateText`].
pub const TRUNCATION_NOTICE: &str = "... [Content truncated for memory optimization]";

/// Max media entries kept once collections are capped.
const MEDIA_CAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Cap sections, listings, section references and media.
    CapCollections,
    /// Cut long markdown bodies and section texts.
    TruncateText,
    /// Drop bottom sections, neighbour links, pass-through extras and media.
    StripAuxiliary,
}

impl Tier {
    /// Tiers in the order they are tried.
    pub const LADDER: [Self; 3] = [Self::CapCollections, Self::TruncateText, Self::StripAuxiliary];

    pub const fn name(self) -> &'static str {
        match self {
            Self::CapCollections => "cap-collections",
            Self::TruncateText => "truncate-text",
            Self::StripAuxiliary => "strip-auxiliary",
        }
    }

    pub fn apply(self, props: &mut PageProps, caps: &Caps, text_limit: usize) {
        match self {
            Self::CapCollections => cap_collections(props, caps),
            Self::TruncateText => truncate_text(props, text_limit),
            Self::StripAuxiliary => strip_auxiliary(props),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn cap_collections(props: &mut PageProps, caps: &Caps) {
    props.sections.truncate(caps.sections);
    props.bottom_sections.truncate(caps.sections);

    for listing in [&mut props.items, &mut props.posts, &mut props.projects]
        .into_iter()
        .flatten()
    {
        listing.truncate(caps.collections);
    }

    for section in props.sections.iter_mut().chain(props.bottom_sections.iter_mut()) {
        section.actions.truncate(caps.section_refs);
        for refs in [&mut section.posts, &mut section.projects].into_iter().flatten() {
            refs.truncate(caps.section_refs);
        }
    }

    if let Some(serde_json::Value::Array(media)) = &mut props.media {
        media.truncate(MEDIA_CAP);
    }
}

fn truncate_text(props: &mut PageProps, limit: usize) {
    if let Some(body) = &mut props.markdown_content {
        truncate_field(body, limit);
    }
    for section in props.sections.iter_mut().chain(props.bottom_sections.iter_mut()) {
        truncate_field(&mut section.text, limit);
    }
}

/// Cut `text` to `limit` chars plus [`TRUNCATION_NOTICE`].
///
/// Left alone unless the cut tail is longer than the notice, so the field
/// never grows. Returns whether the text was cut.
fn truncate_field(text: &mut String, limit: usize) -> bool {
    let Some((cut, _)) = text.char_indices().nth(limit) else {
        return false;
    };
    if text[cut..].chars().count() <= TRUNCATION_NOTICE.len() {
        return false;
    }
    text.truncate(cut);
    text.push_str(TRUNCATION_NOTICE);
    true
}

fn strip_auxiliary(props: &mut PageProps) {
    props.bottom_sections.clear();
    props.prev_post = None;
    props.next_post = None;
    props.prev_project = None;
    props.next_project = None;
    props.media = None;
    props.extra.clear();
    for section in &mut props.sections {
        section.extra.clear();
    }
    props.global.site.extra.clear();
}
