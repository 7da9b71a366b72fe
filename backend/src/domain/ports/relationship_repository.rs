//! Driven port for relationship persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Relationship, RelationshipDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by relationship repository adapters.
    pub enum RelationshipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "relationship repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "relationship repository query failed: {message}" as InternalError,
    }
}

/// Port for graph edges between contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// All of the user's relationships, oldest first.
    async fn list(&self, user_id: &UserId)
    -> Result<Vec<Relationship>, RelationshipRepositoryError>;

    /// `None` when either endpoint is not owned by `user_id`.
    async fn create(
        &self,
        user_id: &UserId,
        draft: &RelationshipDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Relationship>, RelationshipRepositoryError>;

    /// `false` when nothing matched.
    async fn delete(
        &self,
        user_id: &UserId,
        id: Uuid,
    ) -> Result<bool, RelationshipRepositoryError>;
}
