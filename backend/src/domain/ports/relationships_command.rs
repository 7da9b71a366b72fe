//! Driving port for relationship mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Relationship, RelationshipDraft, UserId};

/// Add and remove edges in the user's network graph.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipsCommand: Send + Sync {
    /// `not_found` when either endpoint is not one of the user's contacts.
    async fn create(
        &self,
        user_id: &UserId,
        draft: RelationshipDraft,
    ) -> Result<Relationship, Error>;

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<(), Error>;
}
