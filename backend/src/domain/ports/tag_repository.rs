//! Driven port for tags and their assignment to contacts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Tag, TagDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by tag repository adapters.
    pub enum TagRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "tag repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "tag repository query failed: {message}" as InternalError,
        /// The user already has a tag with this name.
        DuplicateName { name: String } => "a tag named {name:?} already exists" as Conflict,
    }
}

/// Port for labels and the contact/tag join rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// All of the user's tags ordered by name.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Tag>, TagRepositoryError>;

    /// Insert a tag; names are unique per user.
    async fn create(
        &self,
        user_id: &UserId,
        draft: &TagDraft,
        now: DateTime<Utc>,
    ) -> Result<Tag, TagRepositoryError>;

    /// Delete a tag and its assignments. `false` when nothing matched.
    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<bool, TagRepositoryError>;

    /// Attach a tag to a contact; repeating an assignment is a no-op.
    /// `false` when either row is not owned by `user_id`.
    async fn assign(
        &self,
        user_id: &UserId,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<bool, TagRepositoryError>;

    /// Detach a tag. `false` when no such assignment exists for the user.
    async fn unassign(
        &self,
        user_id: &UserId,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<bool, TagRepositoryError>;
}
