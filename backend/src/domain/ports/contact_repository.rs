//! Driven port for contact persistence.
//!
//! Every method takes the acting user explicitly; adapters must filter every
//! read and write by it so rows owned by other users look absent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Contact, ContactDetails, ContactDraft, ContactPatch, ListLimit, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}" as InternalError,
    }
}

/// Port for reading and writing a user's contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Most recently active contacts first, each with its interactions and
    /// tags.
    async fn list(
        &self,
        user_id: &UserId,
        limit: ListLimit,
    ) -> Result<Vec<ContactDetails>, ContactRepositoryError>;

    /// Case-insensitive substring match over names, email, company and
    /// title. `query` is matched literally.
    async fn search(
        &self,
        user_id: &UserId,
        query: &str,
    ) -> Result<Vec<ContactDetails>, ContactRepositoryError>;

    /// Fetch one contact with its interactions (newest first) and tags.
    async fn find(
        &self,
        user_id: &UserId,
        id: Uuid,
    ) -> Result<Option<ContactDetails>, ContactRepositoryError>;

    /// Insert a contact with `created_at = updated_at = now`.
    async fn create(
        &self,
        user_id: &UserId,
        draft: &ContactDraft,
        now: DateTime<Utc>,
    ) -> Result<Contact, ContactRepositoryError>;

    /// Apply a patch and set `updated_at = now`. `None` when nothing matched.
    async fn update(
        &self,
        user_id: &UserId,
        id: Uuid,
        patch: &ContactPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Delete a contact and everything that references it. `false` when
    /// nothing matched.
    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<bool, ContactRepositoryError>;
}
