//! Directed edges between two of a user's contacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Strength, UserId};

/// Type applied when a relationship is created without one.
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "connected";

/// Stored relationship. Both endpoints belong to `user_id` and differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub user_id: UserId,
    pub from_contact_id: Uuid,
    pub to_contact_id: Uuid,
    #[schema(example = "colleague")]
    pub relationship_type: String,
    #[schema(value_type = i32, minimum = 1, maximum = 5, example = 2)]
    pub strength: Strength,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDraft {
    pub from_contact_id: Uuid,
    pub to_contact_id: Uuid,
    pub relationship_type: String,
    pub strength: Strength,
    pub notes: Option<String>,
}
