//! Driving port for tag reads.

use async_trait::async_trait;

use crate::domain::{Error, Tag, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagsQuery: Send + Sync {
    /// The user's tags ordered by name.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Tag>, Error>;
}
