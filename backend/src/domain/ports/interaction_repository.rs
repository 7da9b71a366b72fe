//! Driven port for interaction persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Interaction, InteractionDraft, InteractionPatch, InteractionWithContact, ListLimit, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by interaction repository adapters.
    pub enum InteractionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "interaction repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "interaction repository query failed: {message}" as InternalError,
    }
}

/// Port for the per-contact engagement log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Newest first, joined with the contact, optionally for one contact.
    async fn list(
        &self,
        user_id: &UserId,
        contact_id: Option<Uuid>,
        limit: ListLimit,
    ) -> Result<Vec<InteractionWithContact>, InteractionRepositoryError>;

    /// Insert the interaction and set the contact's `updated_at` to `now` in
    /// one transaction. The interaction's `created_at` is
    /// `draft.occurred_at` when present, otherwise `now`.
    ///
    /// Returns `None` when the contact is not owned by `user_id`.
    async fn create(
        &self,
        user_id: &UserId,
        draft: &InteractionDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Interaction>, InteractionRepositoryError>;

    /// Apply a patch. `None` when nothing matched.
    async fn update(
        &self,
        user_id: &UserId,
        id: Uuid,
        patch: &InteractionPatch,
    ) -> Result<Option<Interaction>, InteractionRepositoryError>;

    /// `false` when nothing matched.
    async fn delete(&self, user_id: &UserId, id: Uuid)
    -> Result<bool, InteractionRepositoryError>;
}
