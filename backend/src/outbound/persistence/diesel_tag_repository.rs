//! PostgreSQL-backed `TagRepository` implementation using Diesel ORM.
//!
//! Assignment checks that both the contact and the tag belong to the caller
//! before touching `contact_tags`, which carries no owner column of its own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{TagRepository, TagRepositoryError};
use crate::domain::{Tag, TagDraft, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewContactTagRow, NewTagRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::{contact_tags, contacts, tags};

const TAG_NAME_CONSTRAINT: &str = "tags_user_name_key";

/// Diesel-backed implementation of the tag repository port.
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TagRepositoryError {
    map_basic_pool_error(error, TagRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TagRepositoryError {
    map_basic_diesel_error(
        error,
        TagRepositoryError::query,
        TagRepositoryError::connection,
    )
}

async fn owns_contact_and_tag(
    conn: &mut AsyncPgConnection,
    user_id: &UserId,
    contact_id: Uuid,
    tag_id: Uuid,
) -> Result<bool, TagRepositoryError> {
    let contact_owned: bool = diesel::select(diesel::dsl::exists(
        contacts::table
            .filter(contacts::id.eq(contact_id))
            .filter(contacts::user_id.eq(user_id.as_uuid())),
    ))
    .get_result(conn)
    .await
    .map_err(map_diesel_error)?;
    if !contact_owned {
        return Ok(false);
    }

    diesel::select(diesel::dsl::exists(
        tags::table
            .filter(tags::id.eq(tag_id))
            .filter(tags::user_id.eq(user_id.as_uuid())),
    ))
    .get_result(conn)
    .await
    .map_err(map_diesel_error)
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn list(&self, user_id: &UserId) -> Result<Vec<Tag>, TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TagRow> = tags::table
            .filter(tags::user_id.eq(user_id.as_uuid()))
            .order((tags::name.asc(), tags::id.asc()))
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| Tag::try_from(row).map_err(|err| TagRepositoryError::query(err.to_string())))
            .collect()
    }

    async fn create(
        &self,
        user_id: &UserId,
        draft: &TagDraft,
        now: DateTime<Utc>,
    ) -> Result<Tag, TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let tag = Tag {
            id: Uuid::new_v4(),
            user_id: *user_id,
            name: draft.name.clone(),
            color: draft.color.clone(),
            created_at: now,
        };

        diesel::insert_into(tags::table)
            .values(NewTagRow::from(&tag))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, TAG_NAME_CONSTRAINT) {
                    TagRepositoryError::duplicate_name(tag.name.clone())
                } else {
                    map_diesel_error(err)
                }
            })?;

        Ok(tag)
    }

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<bool, TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            tags::table
                .filter(tags::id.eq(id))
                .filter(tags::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn assign(
        &self,
        user_id: &UserId,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<bool, TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if !owns_contact_and_tag(&mut conn, user_id, contact_id, tag_id).await? {
            return Ok(false);
        }

        diesel::insert_into(contact_tags::table)
            .values(NewContactTagRow { contact_id, tag_id })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(true)
    }

    async fn unassign(
        &self,
        user_id: &UserId,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<bool, TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owned_contacts = contacts::table
            .filter(contacts::user_id.eq(*user_id.as_uuid()))
            .select(contacts::id);
        let deleted = diesel::delete(
            contact_tags::table
                .filter(contact_tags::contact_id.eq(contact_id))
                .filter(contact_tags::tag_id.eq(tag_id))
                .filter(contact_tags::contact_id.eq_any(owned_contacts)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
