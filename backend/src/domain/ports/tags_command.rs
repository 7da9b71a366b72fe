//! Driving port for tag mutations and assignment.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Tag, TagDraft, UserId};

/// Manage tags and their attachment to contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagsCommand: Send + Sync {
    /// `conflict` when the user already has a tag with this name.
    async fn create(&self, user_id: &UserId, draft: TagDraft) -> Result<Tag, Error>;

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<(), Error>;

    /// Idempotent; `not_found` when the contact or tag is not the user's.
    async fn assign(&self, user_id: &UserId, contact_id: Uuid, tag_id: Uuid)
    -> Result<(), Error>;

    /// `not_found` when the assignment does not exist.
    async fn unassign(
        &self,
        user_id: &UserId,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), Error>;
}
