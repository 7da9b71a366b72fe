//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! Contact lists are loaded in three round trips regardless of size: the
//! contact rows, then every interaction and every tag link for those contacts.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{
    Contact, ContactDetails, ContactDraft, ContactPatch, Interaction, ListLimit, Tag, UserId,
};

use super::diesel_basic_error_mapping::{
    escape_like, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{
    ContactChangeset, ContactRow, CorruptRow, InteractionRow, NewContactRow, TagRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{contact_tags, contacts, interactions, tags};

/// Diesel-backed implementation of the contact repository port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    map_basic_pool_error(error, ContactRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    map_basic_diesel_error(
        error,
        ContactRepositoryError::query,
        ContactRepositoryError::connection,
    )
}

fn map_corrupt_row(error: CorruptRow) -> ContactRepositoryError {
    ContactRepositoryError::query(error.to_string())
}

/// Attach interactions (newest first) and tags (by name) to contact rows,
/// preserving the order of `rows`.
async fn load_details(
    conn: &mut AsyncPgConnection,
    rows: Vec<ContactRow>,
) -> Result<Vec<ContactDetails>, ContactRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let interaction_rows: Vec<InteractionRow> = interactions::table
        .filter(interactions::contact_id.eq_any(&ids))
        .order((interactions::created_at.desc(), interactions::id.desc()))
        .select(InteractionRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let tag_rows: Vec<(Uuid, TagRow)> = contact_tags::table
        .inner_join(tags::table)
        .filter(contact_tags::contact_id.eq_any(&ids))
        .order((tags::name.asc(), tags::id.asc()))
        .select((contact_tags::contact_id, TagRow::as_select()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut history: HashMap<Uuid, Vec<Interaction>> = HashMap::new();
    for row in interaction_rows {
        let interaction = Interaction::try_from(row).map_err(map_corrupt_row)?;
        history
            .entry(interaction.contact_id)
            .or_default()
            .push(interaction);
    }

    let mut labels: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for (contact_id, row) in tag_rows {
        let tag = Tag::try_from(row).map_err(map_corrupt_row)?;
        labels.entry(contact_id).or_default().push(tag);
    }

    rows.into_iter()
        .map(|row| {
            let contact = Contact::try_from(row).map_err(map_corrupt_row)?;
            Ok(ContactDetails {
                interactions: history.remove(&contact.id).unwrap_or_default(),
                tags: labels.remove(&contact.id).unwrap_or_default(),
                contact,
            })
        })
        .collect()
}

fn contact_from_draft(user_id: &UserId, draft: &ContactDraft, now: DateTime<Utc>) -> Contact {
    Contact {
        id: Uuid::new_v4(),
        user_id: *user_id,
        first_name: draft.first_name.clone(),
        last_name: draft.last_name.clone(),
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        company: draft.company.clone(),
        title: draft.title.clone(),
        location: draft.location.clone(),
        linkedin_url: draft.linkedin_url.clone(),
        category: draft.category.clone(),
        relationship_strength: draft.relationship_strength,
        contact_source: draft.contact_source.clone(),
        notes: draft.notes.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list(
        &self,
        user_id: &UserId,
        limit: ListLimit,
    ) -> Result<Vec<ContactDetails>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .filter(contacts::user_id.eq(user_id.as_uuid()))
            .order((contacts::updated_at.desc(), contacts::id.desc()))
            .limit(limit.get())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        load_details(&mut conn, rows).await
    }

    async fn search(
        &self,
        user_id: &UserId,
        query: &str,
    ) -> Result<Vec<ContactDetails>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = format!("%{}%", escape_like(query));

        let rows: Vec<ContactRow> = contacts::table
            .filter(contacts::user_id.eq(user_id.as_uuid()))
            .filter(
                contacts::first_name
                    .ilike(&pattern)
                    .or(contacts::last_name.ilike(&pattern))
                    .or(contacts::email.ilike(&pattern))
                    .or(contacts::company.ilike(&pattern))
                    .or(contacts::title.ilike(&pattern)),
            )
            .order((contacts::updated_at.desc(), contacts::id.desc()))
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        load_details(&mut conn, rows).await
    }

    async fn find(
        &self,
        user_id: &UserId,
        id: Uuid,
    ) -> Result<Option<ContactDetails>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = contacts::table
            .filter(contacts::id.eq(id))
            .filter(contacts::user_id.eq(user_id.as_uuid()))
            .select(ContactRow::as_select())
            .first::<ContactRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(load_details(&mut conn, vec![row]).await?.into_iter().next())
    }

    async fn create(
        &self,
        user_id: &UserId,
        draft: &ContactDraft,
        now: DateTime<Utc>,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let contact = contact_from_draft(user_id, draft, now);

        diesel::insert_into(contacts::table)
            .values(NewContactRow::from(&contact))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(contact)
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: Uuid,
        patch: &ContactPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            contacts::table
                .filter(contacts::id.eq(id))
                .filter(contacts::user_id.eq(user_id.as_uuid())),
        )
        .set(ContactChangeset::from_patch(patch, now))
        .returning(ContactRow::as_returning())
        .get_result::<ContactRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(Contact::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            contacts::table
                .filter(contacts::id.eq(id))
                .filter(contacts::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
