//! PostgreSQL-backed `RelationshipRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RelationshipRepository, RelationshipRepositoryError};
use crate::domain::{Relationship, RelationshipDraft, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRelationshipRow, RelationshipRow};
use super::pool::{DbPool, PoolError};
use super::schema::{contacts, relationships};

/// Diesel-backed implementation of the relationship repository port.
#[derive(Clone)]
pub struct DieselRelationshipRepository {
    pool: DbPool,
}

impl DieselRelationshipRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RelationshipRepositoryError {
    map_basic_pool_error(error, RelationshipRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RelationshipRepositoryError {
    map_basic_diesel_error(
        error,
        RelationshipRepositoryError::query,
        RelationshipRepositoryError::connection,
    )
}

#[async_trait]
impl RelationshipRepository for DieselRelationshipRepository {
    async fn list(&self, user_id: &UserId) -> Result<Vec<Relationship>, RelationshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RelationshipRow> = relationships::table
            .filter(relationships::user_id.eq(user_id.as_uuid()))
            .order((relationships::created_at.desc(), relationships::id.desc()))
            .select(RelationshipRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| {
                Relationship::try_from(row)
                    .map_err(|err| RelationshipRepositoryError::query(err.to_string()))
            })
            .collect()
    }

    async fn create(
        &self,
        user_id: &UserId,
        draft: &RelationshipDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Relationship>, RelationshipRepositoryError> {
        let relationship = Relationship {
            id: Uuid::new_v4(),
            user_id: *user_id,
            from_contact_id: draft.from_contact_id,
            to_contact_id: draft.to_contact_id,
            relationship_type: draft.relationship_type.clone(),
            strength: draft.strength,
            notes: draft.notes.clone(),
            created_at: now,
        };
        let owner = *user_id.as_uuid();
        let pending = relationship.clone();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Endpoints stay share-locked until commit; a concurrent contact
        // delete waits for the insert.
        let inserted = conn
            .transaction(|conn| {
                async move {
                    let endpoints = [pending.from_contact_id, pending.to_contact_id];
                    let owned: Vec<Uuid> = contacts::table
                        .filter(contacts::user_id.eq(owner))
                        .filter(contacts::id.eq_any(endpoints))
                        .select(contacts::id)
                        .for_share()
                        .load(conn)
                        .await?;
                    if owned.len() != 2 {
                        return Ok(false);
                    }

                    diesel::insert_into(relationships::table)
                        .values(NewRelationshipRow::from(&pending))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.then_some(relationship))
    }

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<bool, RelationshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            relationships::table
                .filter(relationships::id.eq(id))
                .filter(relationships::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
