//! Driving port for interaction reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, InteractionWithContact, ListLimit, UserId};

/// Read the interaction log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionsQuery: Send + Sync {
    /// Newest first, optionally restricted to one contact.
    async fn list(
        &self,
        user_id: &UserId,
        contact_id: Option<Uuid>,
        limit: ListLimit,
    ) -> Result<Vec<InteractionWithContact>, Error>;
}
