//! Contact domain service implementing the contact driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ContactRepository, ContactsCommand, ContactsQuery};
use crate::domain::{
    Contact, ContactDetails, ContactDraft, ContactPatch, Error, ListLimit, UserId,
};

pub(crate) const CONTACT_NOT_FOUND: &str = "contact not found";

/// Contact service backed by a [`ContactRepository`].
#[derive(Clone)]
pub struct ContactService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactService<R> {
    /// Create a service over the given repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactService<R>
where
    R: ContactRepository,
{
    async fn list(&self, user_id: &UserId, limit: ListLimit) -> Result<Vec<ContactDetails>, Error> {
        Ok(self.repo.list(user_id, limit).await?)
    }

    async fn search(&self, user_id: &UserId, query: &str) -> Result<Vec<ContactDetails>, Error> {
        let needle = query.trim();
        if needle.is_empty() {
            return Err(Error::invalid_request("search query must not be empty"));
        }
        Ok(self.repo.search(user_id, needle).await?)
    }

    async fn get(&self, user_id: &UserId, id: Uuid) -> Result<ContactDetails, Error> {
        self.repo
            .find(user_id, id)
            .await?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND))
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactService<R>
where
    R: ContactRepository,
{
    async fn create(&self, user_id: &UserId, draft: ContactDraft) -> Result<Contact, Error> {
        let contact = self.repo.create(user_id, &draft, self.clock.utc()).await?;
        debug!(contact_id = %contact.id, "contact created");
        Ok(contact)
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: Uuid,
        patch: ContactPatch,
    ) -> Result<Contact, Error> {
        self.repo
            .update(user_id, id, &patch, self.clock.utc())
            .await?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND))
    }

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<(), Error> {
        if self.repo.delete(user_id, id).await? {
            debug!(contact_id = %id, "contact deleted");
            Ok(())
        } else {
            Err(Error::not_found(CONTACT_NOT_FOUND))
        }
    }
}
