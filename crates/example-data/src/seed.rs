//! Generated demo-network types.
//!
//! These types are independent of backend domain types. Timestamps are
//! expressed as day offsets so the consumer anchors them to its own clock.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Demo account generated from the registry profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoUserSeed {
    /// Stable identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// A generated contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSeed {
    /// Stable identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Employer.
    pub company: String,
    /// Job title.
    pub title: String,
    /// City and region.
    pub location: String,
    /// Profile URL.
    pub linkedin_url: String,
    /// Category such as `colleague` or `client`.
    pub category: String,
    /// Score in `1..=5`.
    pub relationship_strength: u8,
    /// Where the contact was met.
    pub contact_source: String,
    /// Free-form notes.
    pub notes: String,
}

/// A generated interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSeed {
    /// Stable identifier.
    pub id: Uuid,
    /// Contact the row belongs to.
    pub contact_id: Uuid,
    /// Channel, serialised as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short summary.
    pub subject: String,
    /// Free-form notes.
    pub notes: String,
    /// `positive`, `neutral` or `negative`.
    pub outcome: String,
    /// Days before the anchor time the interaction happened.
    pub days_ago: u32,
    /// Days after the anchor time a follow-up is due.
    pub follow_up_in_days: Option<u32>,
}

/// A generated relationship between two distinct contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipSeed {
    /// Stable identifier.
    pub id: Uuid,
    /// Contact making the connection.
    pub from_contact_id: Uuid,
    /// Contact being connected to.
    pub to_contact_id: Uuid,
    /// Kind of connection, e.g. `introduced_by`.
    pub relationship_type: String,
    /// Score in `1..=5`.
    pub strength: u8,
    /// Free-form notes.
    pub notes: String,
}

/// A tag from the registry palette with a generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSeed {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Hex colour `#RRGGBB`.
    pub color: String,
}

/// One contact/tag assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactTagSeed {
    /// Contact the row belongs to.
    pub contact_id: Uuid,
    /// Assigned tag.
    pub tag_id: Uuid,
}

/// Everything needed to populate one demo account.
///
/// # Example
///
/// ```
/// use example_data::{DemoNetworkSeed, DemoUserSeed};
/// use uuid::Uuid;
///
/// let network = DemoNetworkSeed {
///     user: DemoUserSeed {
///         id: Uuid::nil(),
///         username: "demo_user".to_owned(),
///         email: "demo@example.com".to_owned(),
///         first_name: "John".to_owned(),
///         last_name: "Smith".to_owned(),
///     },
///     contacts: vec![],
///     interactions: vec![],
///     relationships: vec![],
///     tags: vec![],
///     contact_tags: vec![],
/// };
///
/// assert!(network.contacts.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoNetworkSeed {
    /// Account owning the network.
    pub user: DemoUserSeed,
    /// Generated contacts.
    pub contacts: Vec<ContactSeed>,
    /// Interactions for the leading contacts.
    pub interactions: Vec<InteractionSeed>,
    /// Connections between contacts.
    pub relationships: Vec<RelationshipSeed>,
    /// Tag palette.
    pub tags: Vec<TagSeed>,
    /// Tag assignments.
    pub contact_tags: Vec<ContactTagSeed>,
}
