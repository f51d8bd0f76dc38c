//! Markdown front matter parsing.
//!
//! Supports YAML between `---` fences and TOML between `+++` fences. The
//! markdown body becomes the `markdownContent` field.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Field the markdown body is stored under.
pub const BODY_FIELD: &str = "markdownContent";

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid TOML front matter")]
    Toml(#[from] toml::de::Error),

    #[error("front matter must be a mapping")]
    NotAMapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    Yaml,
    Toml,
}

impl Fence {
    const fn marker(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split a markdown document into `(fence, front matter, body)`.
fn split(content: &str) -> Option<(Fence, &str, &str)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    let fence = if trimmed.starts_with(Fence::Yaml.marker()) {
        Fence::Yaml
    } else if trimmed.starts_with(Fence::Toml.marker()) {
        Fence::Toml
    } else {
        return None;
    };

    let after = &trimmed[3..];
    let closing = format!("\n{}", fence.marker());
    let end = after.find(&closing)?;
    let body = &after[end + closing.len()..];
    // Drop the rest of the closing fence line
    let body = body.split_once('\n').map_or("", |(_, rest)| rest);
    Some((fence, after[..end].trim(), body))
}

/// Parse a markdown document into content fields.
///
/// Documents without front matter yield just the body field.
pub fn parse_markdown(content: &str) -> Result<Map<String, Value>, FrontMatterError> {
    let Some((fence, front, body)) = split(content) else {
        let mut fields = Map::new();
        fields.insert(BODY_FIELD.into(), Value::String(content.trim().to_owned()));
        return Ok(fields);
    };

    let value = match fence {
        Fence::Yaml if front.is_empty() => Value::Object(Map::new()),
        Fence::Yaml => serde_yaml_ng::from_str::<Value>(front)?,
        Fence::Toml => toml_to_json(toml::Value::Table(toml::from_str::<toml::Table>(front)?)),
    };

    let mut fields = match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => return Err(FrontMatterError::NotAMapping),
    };
    fields.insert(BODY_FIELD.into(), Value::String(body.trim().to_owned()));
    Ok(fields)
}

/// Convert TOML into JSON, rendering datetimes as their string form.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_front_matter() {
        let fields = parse_markdown("---\ntype: PostLayout\ntitle: Hi\n---\n\n# Body\n").unwrap();
        assert_eq!(fields["type"], json!("PostLayout"));
        assert_eq!(fields["title"], json!("Hi"));
        assert_eq!(fields[BODY_FIELD], json!("# Body"));
    }

    #[test]
    fn test_toml_front_matter_with_date() {
        let doc = "+++\ntype = \"PostLayout\"\ndate = 2024-01-15\ntags = [\"a\", \"b\"]\n+++\nText";
        let fields = parse_markdown(doc).unwrap();
        assert_eq!(fields["type"], json!("PostLayout"));
        assert_eq!(fields["date"], json!("2024-01-15"));
        assert_eq!(fields["tags"], json!(["a", "b"]));
        assert_eq!(fields[BODY_FIELD], json!("Text"));
    }

    #[test]
    fn test_no_front_matter() {
        let fields = parse_markdown("# Just markdown").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[BODY_FIELD], json!("# Just markdown"));
    }

    #[test]
    fn test_empty_yaml_front_matter() {
        let fields = parse_markdown("---\n---\nbody").unwrap();
        assert_eq!(fields[BODY_FIELD], json!("body"));
    }

    #[test]
    fn test_front_matter_not_a_mapping() {
        let err = parse_markdown("---\n- a\n- b\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(parse_markdown("---\ntitle: [unclosed\n---\nbody").is_err());
    }
}
