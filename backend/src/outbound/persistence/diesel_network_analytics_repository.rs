//! PostgreSQL-backed `NetworkAnalyticsRepository` implementation.
//!
//! Statistics are computed by one aggregate statement so the four counters
//! observe the same snapshot.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Int4, Timestamptz};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{NetworkAnalyticsRepository, NetworkAnalyticsRepositoryError};
use crate::domain::{GraphLink, GraphNode, NetworkGraph, NetworkStats, StatsWindow, Strength, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{contacts, relationships};

const STATS_SQL: &str = r"
SELECT
    (SELECT COUNT(*) FROM contacts WHERE user_id = $1) AS total_contacts,
    (SELECT COUNT(*) FROM contacts
        WHERE user_id = $1 AND relationship_strength >= $2) AS strong_connections,
    (SELECT COUNT(*) FROM interactions
        WHERE user_id = $1 AND created_at >= $3) AS recent_interactions,
    (SELECT COUNT(*) FROM contacts c
        WHERE c.user_id = $1
          AND NOT EXISTS (
              SELECT 1 FROM interactions i
              WHERE i.contact_id = c.id AND i.created_at >= $4
          )) AS dormant_contacts
";

#[derive(Debug, QueryableByName)]
struct StatsRow {
    #[diesel(sql_type = BigInt)]
    total_contacts: i64,
    #[diesel(sql_type = BigInt)]
    strong_connections: i64,
    #[diesel(sql_type = BigInt)]
    recent_interactions: i64,
    #[diesel(sql_type = BigInt)]
    dormant_contacts: i64,
}

impl From<StatsRow> for NetworkStats {
    fn from(row: StatsRow) -> Self {
        Self {
            total_contacts: row.total_contacts,
            strong_connections: row.strong_connections,
            recent_interactions: row.recent_interactions,
            dormant_contacts: row.dormant_contacts,
        }
    }
}

type NodeColumns = (Uuid, String, String, String, i32, Option<String>);

fn node_from_columns((id, first_name, last_name, category, strength, company): NodeColumns) -> GraphNode {
    GraphNode {
        id,
        name: format!("{first_name} {last_name}"),
        category,
        strength,
        company,
    }
}

/// Diesel-backed implementation of the analytics repository port.
#[derive(Clone)]
pub struct DieselNetworkAnalyticsRepository {
    pool: DbPool,
}

impl DieselNetworkAnalyticsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NetworkAnalyticsRepositoryError {
    map_basic_pool_error(error, NetworkAnalyticsRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NetworkAnalyticsRepositoryError {
    map_basic_diesel_error(
        error,
        NetworkAnalyticsRepositoryError::query,
        NetworkAnalyticsRepositoryError::connection,
    )
}

#[async_trait]
impl NetworkAnalyticsRepository for DieselNetworkAnalyticsRepository {
    async fn stats(
        &self,
        user_id: &UserId,
        window: StatsWindow,
    ) -> Result<NetworkStats, NetworkAnalyticsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: StatsRow = sql_query(STATS_SQL)
            .bind::<diesel::sql_types::Uuid, _>(*user_id.as_uuid())
            .bind::<Int4, _>(i32::from(Strength::STRONG_THRESHOLD))
            .bind::<Timestamptz, _>(window.recent_since)
            .bind::<Timestamptz, _>(window.dormant_before)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn graph(&self, user_id: &UserId) -> Result<NetworkGraph, NetworkAnalyticsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let nodes: Vec<NodeColumns> = contacts::table
            .filter(contacts::user_id.eq(user_id.as_uuid()))
            .order((contacts::last_name.asc(), contacts::first_name.asc(), contacts::id.asc()))
            .select((
                contacts::id,
                contacts::first_name,
                contacts::last_name,
                contacts::category,
                contacts::relationship_strength,
                contacts::company,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let links: Vec<(Uuid, Uuid, String, i32)> = relationships::table
            .filter(relationships::user_id.eq(user_id.as_uuid()))
            .order((relationships::created_at.asc(), relationships::id.asc()))
            .select((
                relationships::from_contact_id,
                relationships::to_contact_id,
                relationships::relationship_type,
                relationships::strength,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(NetworkGraph {
            nodes: nodes.into_iter().map(node_from_columns).collect(),
            links: links
                .into_iter()
                .map(|(source, target, kind, strength)| GraphLink {
                    source,
                    target,
                    kind,
                    strength,
                })
                .collect(),
        })
    }
}
