//! Logged engagements with a contact.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Contact, UserId};

/// How an interaction went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InteractionOutcome {
    Positive,
    Neutral,
    Negative,
}

impl InteractionOutcome {
    /// Every accepted outcome, in display order.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Storage and wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for InteractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("outcome must be one of positive, neutral or negative, got {0:?}")]
pub struct UnknownOutcome(pub String);

impl FromStr for InteractionOutcome {
    type Err = UnknownOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|outcome| outcome.as_str() == s)
            .ok_or_else(|| UnknownOutcome(s.to_owned()))
    }
}

/// Stored interaction. `created_at` is fixed at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub user_id: UserId,
    pub contact_id: Uuid,
    /// Channel such as `meeting`, `call` or `email`.
    #[serde(rename = "type")]
    #[schema(example = "meeting")]
    pub kind: String,
    pub subject: Option<String>,
    pub notes: Option<String>,
    pub outcome: Option<InteractionOutcome>,
    /// When to follow up, if at all.
    pub follow_up_required: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionDraft {
    pub contact_id: Uuid,
    pub kind: String,
    pub subject: Option<String>,
    pub notes: Option<String>,
    pub outcome: Option<InteractionOutcome>,
    pub follow_up_required: Option<DateTime<Utc>>,
    /// Past timestamp when back-filling an earlier engagement.
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Validated partial update; contact and creation time are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionPatch {
    pub kind: Option<String>,
    pub subject: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub outcome: Option<Option<InteractionOutcome>>,
    pub follow_up_required: Option<Option<DateTime<Utc>>>,
}

/// Interaction joined with the contact it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InteractionWithContact {
    #[serde(flatten)]
    pub interaction: Interaction,
    pub contact: Contact,
}
