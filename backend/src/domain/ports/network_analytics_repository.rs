//! Driven port for aggregate network queries.

use async_trait::async_trait;

use crate::domain::{NetworkGraph, NetworkStats, StatsWindow, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by analytics adapters.
    pub enum NetworkAnalyticsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "analytics repository connection failed: {message}" as ServiceUnavailable,
        /// Query failed during execution.
        Query { message: String } => "analytics repository query failed: {message}" as InternalError,
    }
}

/// Port for dashboard counts and the graph projection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkAnalyticsRepository: Send + Sync {
    /// Counts evaluated against `window` at query time.
    async fn stats(
        &self,
        user_id: &UserId,
        window: StatsWindow,
    ) -> Result<NetworkStats, NetworkAnalyticsRepositoryError>;

    /// Every contact as a node and every relationship as a link.
    async fn graph(&self, user_id: &UserId)
    -> Result<NetworkGraph, NetworkAnalyticsRepositoryError>;
}
