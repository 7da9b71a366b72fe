//! Network analytics service: dashboard counters and graph data.
//!
//! Dormancy and recency are evaluated against the injected clock at query
//! time, never stored.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{NetworkAnalyticsRepository, NetworkQuery};
use crate::domain::{Error, NetworkGraph, NetworkStats, StatsWindow, UserId};

/// Analytics service backed by a [`NetworkAnalyticsRepository`].
#[derive(Clone)]
pub struct AnalyticsService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AnalyticsService<R> {
    /// Create a service over the given repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> NetworkQuery for AnalyticsService<R>
where
    R: NetworkAnalyticsRepository,
{
    async fn stats(&self, user_id: &UserId) -> Result<NetworkStats, Error> {
        let window = StatsWindow::ending_at(self.clock.utc());
        Ok(self.repo.stats(user_id, window).await?)
    }

    async fn graph(&self, user_id: &UserId) -> Result<NetworkGraph, Error> {
        Ok(self.repo.graph(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockNetworkAnalyticsRepository, NetworkAnalyticsRepositoryError};
    use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp};
    use chrono::Duration;

    #[tokio::test]
    async fn stats_window_is_anchored_to_the_clock() {
        let mut repo = MockNetworkAnalyticsRepository::new();
        repo.expect_stats()
            .withf(|_, window| {
                window.recent_since == fixture_timestamp() - Duration::days(7)
                    && window.dormant_before == fixture_timestamp() - Duration::days(30)
            })
            .times(1)
            .return_once(|_, _| {
                Ok(NetworkStats {
                    total_contacts: 3,
                    strong_connections: 1,
                    recent_interactions: 2,
                    dormant_contacts: 1,
                })
            });

        let service = AnalyticsService::new(Arc::new(repo), fixture_clock());
        let stats = service.stats(&UserId::random()).await.expect("stats");
        assert_eq!(stats.total_contacts, 3);
        assert_eq!(stats.dormant_contacts, 1);
    }

    #[tokio::test]
    async fn graph_connection_failure_is_unavailable() {
        let mut repo = MockNetworkAnalyticsRepository::new();
        repo.expect_graph()
            .times(1)
            .return_once(|_| Err(NetworkAnalyticsRepositoryError::connection("refused")));

        let service = AnalyticsService::new(Arc::new(repo), fixture_clock());
        let error = service
            .graph(&UserId::random())
            .await
            .expect_err("connection failure");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
