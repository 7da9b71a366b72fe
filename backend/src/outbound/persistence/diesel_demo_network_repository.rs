//! PostgreSQL-backed demo network seeding adapter.
//!
//! The demo account and everything it owns are inserted in one transaction.
//! An existing account with the same username makes the whole request a
//! no-op, so restarts never duplicate data.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{
    DemoNetworkRepository, DemoNetworkRepositoryError, DemoNetworkSeedRequest, SeedingResult,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    NewContactRow, NewContactTagRow, NewInteractionRow, NewRelationshipRow, NewTagRow, NewUserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{contact_tags, contacts, interactions, relationships, tags, users};

/// Rows per multi-row insert; keeps every statement under PostgreSQL's bind
/// parameter limit.
const INSERT_CHUNK: usize = 500;

/// Diesel-backed implementation of the demo network seeding repository.
#[derive(Clone)]
pub struct DieselDemoNetworkRepository {
    pool: DbPool,
}

impl DieselDemoNetworkRepository {
    /// Create a new seeding repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use backend::outbound::persistence::{
    ///     DbPool, DieselDemoNetworkRepository, PoolConfig,
    /// };
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost")).await?;
    /// let repository = DieselDemoNetworkRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DemoNetworkRepositoryError {
    map_basic_pool_error(error, DemoNetworkRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DemoNetworkRepositoryError {
    map_basic_diesel_error(
        error,
        DemoNetworkRepositoryError::query,
        DemoNetworkRepositoryError::connection,
    )
}

#[async_trait]
impl DemoNetworkRepository for DieselDemoNetworkRepository {
    async fn seed(
        &self,
        request: &DemoNetworkSeedRequest,
    ) -> Result<SeedingResult, DemoNetworkRepositoryError> {
        let user_row = NewUserRow::from(&request.user);
        let contact_rows: Vec<NewContactRow<'_>> =
            request.contacts.iter().map(NewContactRow::from).collect();
        let interaction_rows: Vec<NewInteractionRow<'_>> = request
            .interactions
            .iter()
            .map(NewInteractionRow::from)
            .collect();
        let relationship_rows: Vec<NewRelationshipRow<'_>> = request
            .relationships
            .iter()
            .map(NewRelationshipRow::from)
            .collect();
        let tag_rows: Vec<NewTagRow<'_>> = request.tags.iter().map(NewTagRow::from).collect();
        let link_rows: Vec<NewContactTagRow> = request
            .contact_tags
            .iter()
            .map(|&(contact_id, tag_id)| NewContactTagRow { contact_id, tag_id })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let inserted = diesel::insert_into(users::table)
                    .values(&user_row)
                    .on_conflict(users::username)
                    .do_nothing()
                    .execute(conn)
                    .await?;
                if inserted == 0 {
                    return Ok(SeedingResult::AlreadySeeded);
                }

                for chunk in contact_rows.chunks(INSERT_CHUNK) {
                    diesel::insert_into(contacts::table)
                        .values(chunk)
                        .execute(conn)
                        .await?;
                }
                for chunk in interaction_rows.chunks(INSERT_CHUNK) {
                    diesel::insert_into(interactions::table)
                        .values(chunk)
                        .execute(conn)
                        .await?;
                }
                for chunk in relationship_rows.chunks(INSERT_CHUNK) {
                    diesel::insert_into(relationships::table)
                        .values(chunk)
                        .execute(conn)
                        .await?;
                }
                for chunk in tag_rows.chunks(INSERT_CHUNK) {
                    diesel::insert_into(tags::table)
                        .values(chunk)
                        .execute(conn)
                        .await?;
                }
                for chunk in link_rows.chunks(INSERT_CHUNK) {
                    diesel::insert_into(contact_tags::table)
                        .values(chunk)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                }

                Ok::<_, diesel::result::Error>(SeedingResult::Applied)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
