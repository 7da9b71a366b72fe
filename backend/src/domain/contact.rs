//! Contacts: the people tracked in a user's network.
//!
//! ## Lifecycle
//! - `updated_at` moves forward on every edit and whenever an interaction
//!   with the contact is logged, so "most recently active" ordering works.
//! - Deleting a contact removes its interactions, every relationship that
//!   references it, and its tag assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Interaction, Strength, Tag, UserId};

/// Stored contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact identifier.
    pub id: Uuid,
    /// Owning user.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Given name.
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Lovelace")]
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    /// Social profile URL.
    pub linkedin_url: Option<String>,
    /// Free-form grouping such as `work`, `client` or `mentor`.
    #[schema(example = "mentor")]
    pub category: String,
    /// Closeness score in `1..=5`.
    #[schema(value_type = i32, minimum = 1, maximum = 5, example = 3)]
    pub relationship_strength: Strength,
    /// How the user met this person.
    pub contact_source: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Display name used by graph nodes: first name, a space, last name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated fields for a new contact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub category: String,
    pub relationship_strength: Strength,
    pub contact_source: Option<String>,
    pub notes: Option<String>,
}

/// Validated partial update.
///
/// Outer `None` leaves a field untouched. For nullable columns `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub company: Option<Option<String>>,
    pub title: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub linkedin_url: Option<Option<String>>,
    pub category: Option<String>,
    pub relationship_strength: Option<Strength>,
    pub contact_source: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl ContactPatch {
    /// Whether the patch changes no field (only `updated_at` will move).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Contact together with its interaction history and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(flatten)]
    pub contact: Contact,
    /// Interactions, newest first.
    pub interactions: Vec<Interaction>,
    /// Assigned tags ordered by name.
    pub tags: Vec<Tag>,
}

impl ContactDetails {
    /// Wrap a contact that has no interactions or tags yet.
    pub fn without_history(contact: Contact) -> Self {
        Self {
            contact,
            interactions: Vec::new(),
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    fn sample_contact() -> Contact {
        let at = DateTime::<Utc>::UNIX_EPOCH;
        Contact {
            id: Uuid::nil(),
            user_id: UserId::from(Uuid::nil()),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: None,
            phone: None,
            company: Some("Analytical Engines".to_owned()),
            title: None,
            location: None,
            linkedin_url: None,
            category: "mentor".to_owned(),
            relationship_strength: Strength::default(),
            contact_source: None,
            notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn display_name_joins_first_and_last() {
        assert_eq!(sample_contact().display_name(), "Ada Lovelace");
    }

    #[test]
    fn details_flatten_contact_fields() {
        let details = ContactDetails::without_history(sample_contact());
        let value = serde_json::to_value(details).expect("serialise");
        assert_eq!(value.get("firstName"), Some(&json!("Ada")));
        assert_eq!(value.get("relationshipStrength"), Some(&json!(1)));
        assert_eq!(value.get("interactions"), Some(&json!([])));
        assert_eq!(value.get("tags"), Some(&json!([])));
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(ContactPatch::default().is_empty());
        let patch = ContactPatch {
            notes: Some(None),
            ..ContactPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
