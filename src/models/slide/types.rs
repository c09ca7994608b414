use serde::{Deserialize, Serialize};

/// Content given to slides created without any.
pub const DEFAULT_CONTENT: &str = "# New Slide\n\nStart typing here...";
pub const DEFAULT_LAYOUT: &str = "default";

/// A persisted slide. `order` is its position in the deck, stored as `sort_order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Slide {
    pub id: i64,
    pub content: String,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
    pub layout: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Body of a create request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSlide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

/// Body of an update request. Omitted or empty `content`/`layout` keep the
/// stored value; a present `order` moves the slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlidePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl SlidePatch {
    pub fn content(content: impl Into<String>) -> Self {
        SlidePatch {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn order(order: i64) -> Self {
        SlidePatch {
            order: Some(order),
            ..Default::default()
        }
    }
}
