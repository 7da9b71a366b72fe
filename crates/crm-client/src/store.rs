//! Cached reads and invalidating writes over one API session.

use std::sync::Arc;

use uuid::Uuid;

use crate::api::{ApiClient, searchable};
use crate::cache::{QueryCache, QueryState};
use crate::error::ClientError;
use crate::model::{
    Contact, ContactDetails, ContactUpdate, Interaction, InteractionUpdate,
    InteractionWithContact, MessageResponse, NetworkGraph, NetworkStats, NewContact,
    NewInteraction, NewRelationship, NewTag, Relationship, Tag, User,
};
use crate::query::{Mutation, QueryKey};

/// Reads go through a [`QueryCache`]; writes invalidate what they change.
///
/// Clones share the cache and the session.
#[derive(Debug, Clone)]
pub struct CrmStore {
    api: ApiClient,
    cache: QueryCache,
}

impl CrmStore {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    /// Underlying client for calls that bypass the cache.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Current state of a cached read.
    #[must_use]
    pub fn state<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        self.cache.state(key)
    }

    /// Sign in and start from an empty cache.
    ///
    /// # Errors
    ///
    /// Returns the login failure; the cache is left alone then.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let user = self.api.login(username, password).await?;
        self.cache.clear();
        Ok(user)
    }

    /// Sign out and forget every cached read.
    ///
    /// # Errors
    ///
    /// Returns transport failures. The cache is cleared regardless.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self.api.logout().await;
        self.cache.clear();
        result
    }

    /// # Errors
    ///
    /// Returns the request failure, shared with concurrent readers.
    pub async fn contacts(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<ContactDetails>, Arc<ClientError>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Contacts { limit }, move || async move {
                api.list_contacts(limit).await
            })
            .await
    }

    /// # Errors
    ///
    /// Returns the request failure, shared with concurrent readers.
    pub async fn contact(&self, id: Uuid) -> Result<ContactDetails, Arc<ClientError>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Contact(id), move || async move {
                api.get_contact(id).await
            })
            .await
    }

    /// Cached search keyed by the trimmed query. Short queries resolve to an
    /// empty list without touching the cache.
    ///
    /// # Errors
    ///
    /// Returns the request failure, shared with concurrent readers.
    pub async fn search_contacts(
        &self,
        query: &str,
    ) -> Result<Vec<ContactDetails>, Arc<ClientError>> {
        let Some(query) = searchable(query).map(str::to_owned) else {
            return Ok(Vec::new());
        };
        let api = self.api.clone();
        let key = QueryKey::ContactSearch(query.clone());
        self.cache
            .fetch(key, move || async move { api.search_contacts(&query).await })
            .await
    }

    /// # Errors
    ///
    /// Returns the request failure, shared with concurrent readers.
    pub async fn interactions(
        &self,
        contact_id: Option<Uuid>,
    ) -> Result<Vec<InteractionWithContact>, Arc<ClientError>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Interactions { contact_id }, move || async move {
                api.list_interactions(contact_id, None).await
            })
            .await
    }

    /// # Errors
    ///
    /// Returns the request failure, shared with concurrent readers.
    pub async fn relationships(&self) -> Result<Vec<Relationship>, Arc<ClientError>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Relationships, move || async move {
                api.list_relationships().await
            })
            .await
    }

    /// # Errors
    ///
    /// Returns the request failure, shared with concurrent readers.
    pub async fn tags(&self) -> Result<Vec<Tag>, Arc<ClientError>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Tags, move || async move { api.list_tags().await })
            .await
    }

    /// # Errors
    ///
    /// Returns the request failure, shared with concurrent readers.
    pub async fn stats(&self) -> Result<NetworkStats, Arc<ClientError>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Stats, move || async move {
                api.network_stats().await
            })
            .await
    }

    /// # Errors
    ///
    /// Returns the request failure, shared with concurrent readers.
    pub async fn graph(&self) -> Result<NetworkGraph, Arc<ClientError>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Graph, move || async move {
                api.network_graph().await
            })
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn create_contact(&self, contact: &NewContact) -> Result<Contact, ClientError> {
        self.cache
            .mutate(Mutation::CreateContact, self.api.create_contact(contact))
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn update_contact(
        &self,
        id: Uuid,
        update: &ContactUpdate,
    ) -> Result<Contact, ClientError> {
        self.cache
            .mutate(
                Mutation::UpdateContact { id },
                self.api.update_contact(id, update),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn delete_contact(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.cache
            .mutate(Mutation::DeleteContact { id }, self.api.delete_contact(id))
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn assign_tag(&self, contact_id: Uuid, tag_id: Uuid) -> Result<(), ClientError> {
        self.cache
            .mutate(
                Mutation::AssignTag { contact_id },
                self.api.assign_tag(contact_id, tag_id),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn unassign_tag(&self, contact_id: Uuid, tag_id: Uuid) -> Result<(), ClientError> {
        self.cache
            .mutate(
                Mutation::UnassignTag { contact_id },
                self.api.unassign_tag(contact_id, tag_id),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn create_interaction(
        &self,
        interaction: &NewInteraction,
    ) -> Result<Interaction, ClientError> {
        self.cache
            .mutate(
                Mutation::CreateInteraction {
                    contact_id: interaction.contact_id,
                },
                self.api.create_interaction(interaction),
            )
            .await
    }

    /// The owning contact's detail read is dropped using the contact id the
    /// server returns.
    ///
    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn update_interaction(
        &self,
        id: Uuid,
        update: &InteractionUpdate,
    ) -> Result<Interaction, ClientError> {
        let updated = self.api.update_interaction(id, update).await?;
        let mutation = Mutation::UpdateInteraction {
            contact_id: Some(updated.contact_id),
        };
        self.cache.invalidate(&mutation.invalidates());
        Ok(updated)
    }

    /// `contact_id` names the owning contact when known so its detail read
    /// is dropped too.
    ///
    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn delete_interaction(
        &self,
        id: Uuid,
        contact_id: Option<Uuid>,
    ) -> Result<MessageResponse, ClientError> {
        self.cache
            .mutate(
                Mutation::DeleteInteraction { contact_id },
                self.api.delete_interaction(id),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> Result<Relationship, ClientError> {
        self.cache
            .mutate(
                Mutation::CreateRelationship,
                self.api.create_relationship(relationship),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn delete_relationship(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.cache
            .mutate(
                Mutation::DeleteRelationship,
                self.api.delete_relationship(id),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn create_tag(&self, tag: &NewTag) -> Result<Tag, ClientError> {
        self.cache
            .mutate(Mutation::CreateTag, self.api.create_tag(tag))
            .await
    }

    /// # Errors
    ///
    /// Returns the write failure; no cached read is dropped then.
    pub async fn delete_tag(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.cache
            .mutate(Mutation::DeleteTag, self.api.delete_tag(id))
            .await
    }
}
