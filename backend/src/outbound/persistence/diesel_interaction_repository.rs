//! PostgreSQL-backed `InteractionRepository` implementation using Diesel ORM.
//!
//! Logging an interaction touches the parent contact's `updated_at` in the same
//! transaction, so a contact never looks older than its newest interaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{InteractionRepository, InteractionRepositoryError};
use crate::domain::{
    Contact, Interaction, InteractionDraft, InteractionPatch, InteractionWithContact, ListLimit,
    UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    ContactRow, CorruptRow, InteractionChangeset, InteractionRow, NewInteractionRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{contacts, interactions};

/// Diesel-backed implementation of the interaction repository port.
#[derive(Clone)]
pub struct DieselInteractionRepository {
    pool: DbPool,
}

impl DieselInteractionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InteractionRepositoryError {
    map_basic_pool_error(error, InteractionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InteractionRepositoryError {
    map_basic_diesel_error(
        error,
        InteractionRepositoryError::query,
        InteractionRepositoryError::connection,
    )
}

fn map_corrupt_row(error: CorruptRow) -> InteractionRepositoryError {
    InteractionRepositoryError::query(error.to_string())
}

fn interaction_from_draft(
    user_id: &UserId,
    draft: &InteractionDraft,
    now: DateTime<Utc>,
) -> Interaction {
    Interaction {
        id: Uuid::new_v4(),
        user_id: *user_id,
        contact_id: draft.contact_id,
        kind: draft.kind.clone(),
        subject: draft.subject.clone(),
        notes: draft.notes.clone(),
        outcome: draft.outcome,
        follow_up_required: draft.follow_up_required,
        created_at: draft.occurred_at.unwrap_or(now),
    }
}

#[async_trait]
impl InteractionRepository for DieselInteractionRepository {
    async fn list(
        &self,
        user_id: &UserId,
        contact_id: Option<Uuid>,
        limit: ListLimit,
    ) -> Result<Vec<InteractionWithContact>, InteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = interactions::table
            .inner_join(contacts::table)
            .filter(interactions::user_id.eq(*user_id.as_uuid()))
            .select((InteractionRow::as_select(), ContactRow::as_select()))
            .into_boxed();
        if let Some(contact) = contact_id {
            query = query.filter(interactions::contact_id.eq(contact));
        }

        let rows: Vec<(InteractionRow, ContactRow)> = query
            .order((interactions::created_at.desc(), interactions::id.desc()))
            .limit(limit.get())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(interaction, contact)| {
                Ok(InteractionWithContact {
                    interaction: Interaction::try_from(interaction).map_err(map_corrupt_row)?,
                    contact: Contact::try_from(contact).map_err(map_corrupt_row)?,
                })
            })
            .collect()
    }

    async fn create(
        &self,
        user_id: &UserId,
        draft: &InteractionDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Interaction>, InteractionRepositoryError> {
        let interaction = interaction_from_draft(user_id, draft, now);
        let owner = *user_id.as_uuid();
        let pending = interaction.clone();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = conn
            .transaction(|conn| {
                async move {
                    let row = NewInteractionRow::from(&pending);
                    let touched = diesel::update(
                        contacts::table
                            .filter(contacts::id.eq(row.contact_id))
                            .filter(contacts::user_id.eq(owner)),
                    )
                    .set(contacts::updated_at.eq(now))
                    .execute(conn)
                    .await?;

                    if touched == 0 {
                        return Ok(false);
                    }

                    diesel::insert_into(interactions::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.then_some(interaction))
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: Uuid,
        patch: &InteractionPatch,
    ) -> Result<Option<Interaction>, InteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = if *patch == InteractionPatch::default() {
            interactions::table
                .filter(interactions::id.eq(id))
                .filter(interactions::user_id.eq(user_id.as_uuid()))
                .select(InteractionRow::as_select())
                .first::<InteractionRow>(&mut conn)
                .await
        } else {
            diesel::update(
                interactions::table
                    .filter(interactions::id.eq(id))
                    .filter(interactions::user_id.eq(user_id.as_uuid())),
            )
            .set(InteractionChangeset::from(patch))
            .returning(InteractionRow::as_returning())
            .get_result::<InteractionRow>(&mut conn)
            .await
        };
        let row = result.optional().map_err(map_diesel_error)?;

        row.map(Interaction::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<bool, InteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            interactions::table
                .filter(interactions::id.eq(id))
                .filter(interactions::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
