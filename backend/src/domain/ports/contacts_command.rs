//! Driving port for contact mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Contact, ContactDraft, ContactPatch, Error, UserId};

/// Create, edit and delete contacts on behalf of a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Store a new contact.
    async fn create(&self, user_id: &UserId, draft: ContactDraft) -> Result<Contact, Error>;

    /// Apply a partial update; `not_found` when the contact is absent.
    async fn update(
        &self,
        user_id: &UserId,
        id: Uuid,
        patch: ContactPatch,
    ) -> Result<Contact, Error>;

    /// Delete a contact with its interactions, relationships and tag links.
    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<(), Error>;
}
