//! Driving port for contact reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ContactDetails, Error, ListLimit, UserId};

/// Read a user's contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Most recently active first.
    async fn list(&self, user_id: &UserId, limit: ListLimit) -> Result<Vec<ContactDetails>, Error>;

    /// Case-insensitive substring search; `query` must be non-blank.
    async fn search(&self, user_id: &UserId, query: &str) -> Result<Vec<ContactDetails>, Error>;

    /// One contact; `not_found` when absent or owned by someone else.
    async fn get(&self, user_id: &UserId, id: Uuid) -> Result<ContactDetails, Error>;
}
