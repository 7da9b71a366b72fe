//! Driving port for dashboard analytics and the network graph.

use async_trait::async_trait;

use crate::domain::{Error, NetworkGraph, NetworkStats, UserId};

/// Read-only aggregate views of a user's network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkQuery: Send + Sync {
    /// Counts evaluated against the current time.
    async fn stats(&self, user_id: &UserId) -> Result<NetworkStats, Error>;

    /// Nodes and links for the force-directed view.
    async fn graph(&self, user_id: &UserId) -> Result<NetworkGraph, Error>;
}
