//! Typed records for catalog responses.
//!
//! The remote API is loose about field presence and types, so every record
//! is built through a lenient raw form: anything missing, `null`, of the
//! wrong type or empty becomes an absent value rather than an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque title identifier, kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleId(String);

impl TitleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TitleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A cataloged game returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSummary {
    /// Unique within one search response.
    pub id: TitleId,
    /// Display name. Not unique.
    pub name: String,
    /// Platforms in API order.
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Free-text introduction.
    #[serde(default)]
    pub introduction: String,
    /// Banner image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

/// A single download/patch/save listing attached to a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Download link(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ResourceEntry {
    /// Name to show for this entry, with a placeholder when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("未知资源")
    }
}

// ============================================================================
// Raw API shapes (private)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawTitle {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    platform: Option<Value>,
    #[serde(default)]
    introduction: Option<Value>,
    #[serde(default)]
    banner: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawResource {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    password: Option<Value>,
}

/// Non-empty string, or nothing.
fn text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn identifier(value: Option<Value>) -> Option<TitleId> {
    match value {
        Some(Value::Number(n)) => Some(TitleId(n.to_string())),
        other => text(other).map(TitleId),
    }
}

fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(|v| text(Some(v))).collect(),
        other => text(other).into_iter().collect(),
    }
}

/// `content` is usually a string but the API also sends arrays of links.
fn links_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::Array(items)) => {
            let links = string_list(Some(Value::Array(items)));
            if links.is_empty() {
                None
            } else {
                Some(links.join(","))
            }
        }
        other => text(other),
    }
}

impl TitleSummary {
    /// Build a title from one element of the `galgames` array.
    ///
    /// Returns `None` when the element has no usable id.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let raw: RawTitle = serde_json::from_value(value).ok()?;
        Some(Self {
            id: identifier(raw.id)?,
            name: text(raw.name).unwrap_or_default(),
            platforms: string_list(raw.platform),
            introduction: text(raw.introduction).unwrap_or_default(),
            banner: text(raw.banner),
        })
    }
}

impl ResourceEntry {
    /// Build an entry from one element of the resource listing.
    ///
    /// Never fails: malformed elements become entries with absent fields.
    pub(crate) fn from_value(value: Value) -> Self {
        let raw: RawResource = if value.is_object() {
            serde_json::from_value(value).unwrap_or_default()
        } else {
            RawResource::default()
        };
        Self {
            name: text(raw.name),
            content: links_field(raw.content),
            password: text(raw.password),
        }
    }
}
