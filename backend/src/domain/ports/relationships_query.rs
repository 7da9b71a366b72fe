//! Driving port for relationship reads.

use async_trait::async_trait;

use crate::domain::{Error, Relationship, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipsQuery: Send + Sync {
    /// Every relationship the user owns.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Relationship>, Error>;
}
