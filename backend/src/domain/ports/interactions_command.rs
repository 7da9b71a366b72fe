//! Driving port for interaction mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Interaction, InteractionDraft, InteractionPatch, UserId};

/// Log, edit and remove interactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionsCommand: Send + Sync {
    /// Log an interaction and mark its contact as recently active.
    async fn create(&self, user_id: &UserId, draft: InteractionDraft)
    -> Result<Interaction, Error>;

    /// Apply a partial update; `not_found` when the interaction is absent.
    async fn update(
        &self,
        user_id: &UserId,
        id: Uuid,
        patch: InteractionPatch,
    ) -> Result<Interaction, Error>;

    /// Remove an interaction.
    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<(), Error>;
}
