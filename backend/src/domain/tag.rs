//! User-defined labels attached to contacts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;

/// Hex colour in `#RRGGBB` form.
///
/// # Examples
/// ```
/// use backend::domain::TagColor;
///
/// assert_eq!(TagColor::new("#10b981").map(|c| c.to_string()), Ok("#10B981".to_owned()));
/// assert!(TagColor::new("red").is_err());
/// assert_eq!(TagColor::default().as_str(), "#3B82F6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "#3B82F6")]
pub struct TagColor(String);

/// Error returned for colours not in `#RRGGBB` form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("color must be a #RRGGBB hex value, got {0:?}")]
pub struct InvalidTagColor(pub String);

impl TagColor {
    /// Colour used when a tag is created without one.
    pub const DEFAULT: &'static str = "#3B82F6";

    /// Validate a colour, normalising the hex digits to upper case.
    pub fn new(raw: &str) -> Result<Self, InvalidTagColor> {
        let digits = raw
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| InvalidTagColor(raw.to_owned()))?;
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// Colour string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TagColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TagColor {
    type Error = InvalidTagColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TagColor> for String {
    fn from(value: TagColor) -> Self {
        value.0
    }
}

/// Stored tag. Names are unique per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(example = "Investor")]
    pub name: String,
    pub color: TagColor,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    pub name: String,
    pub color: TagColor,
}
