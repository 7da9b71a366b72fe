//! Keyed query cache with shared in-flight requests.
//!
//! Values are stored type-erased and read back through the same type they
//! were fetched as. The entry map sits behind a `Mutex` that is never held
//! across an `.await`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tracing::debug;

use crate::error::ClientError;
use crate::query::{Invalidation, Mutation, QueryKey};

type CachedValue = Arc<dyn Any + Send + Sync>;
type FetchOutcome = Result<CachedValue, Arc<ClientError>>;
type InFlight = Shared<BoxFuture<'static, FetchOutcome>>;

enum Entry {
    Pending { ticket: u64, fetch: InFlight },
    Ready(CachedValue),
    Failed(Arc<ClientError>),
}

/// Observable state of one cached read.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// Never fetched, or dropped by an invalidation.
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request succeeded with this value.
    Success(T),
    /// The last request failed; the next read retries.
    Error(Arc<ClientError>),
}

impl<T> QueryState<T> {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Shared cache of read results keyed by [`QueryKey`].
///
/// Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Entry>>>,
    tickets: Arc<AtomicU64>,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.lock().len())
            .finish_non_exhaustive()
    }
}

impl QueryCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached value for `key`, joining an in-flight request or
    /// starting one with `fetch`.
    ///
    /// A failed fetch is reported to every waiter and retried on the next
    /// call. A result that lands after `key` was invalidated is returned to
    /// its waiters but not stored.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or [`ClientError::CachedTypeMismatch`] when
    /// `key` holds a value of another type.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, Arc<ClientError>>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (ticket, in_flight) = {
            let mut entries = self.lock();
            match entries.get(&key) {
                Some(Entry::Ready(value)) => return downcast(&key, value),
                Some(Entry::Pending { ticket, fetch }) => (*ticket, fetch.clone()),
                Some(Entry::Failed(_)) | None => {
                    let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
                    let in_flight = fetch()
                        .map(|result| {
                            result
                                .map(|value| Arc::new(value) as CachedValue)
                                .map_err(Arc::new)
                        })
                        .boxed()
                        .shared();
                    debug!(%key, "query started");
                    entries.insert(
                        key.clone(),
                        Entry::Pending {
                            ticket,
                            fetch: in_flight.clone(),
                        },
                    );
                    (ticket, in_flight)
                }
            }
        };

        let outcome = in_flight.await;

        {
            let mut entries = self.lock();
            let still_current = matches!(
                entries.get(&key),
                Some(Entry::Pending { ticket: current, .. }) if *current == ticket
            );
            if still_current {
                let entry = match &outcome {
                    Ok(value) => Entry::Ready(Arc::clone(value)),
                    Err(error) => Entry::Failed(Arc::clone(error)),
                };
                entries.insert(key.clone(), entry);
            }
        }

        downcast(&key, &outcome?)
    }

    /// Current state of `key`.
    #[must_use]
    pub fn state<T>(&self, key: &QueryKey) -> QueryState<T>
    where
        T: Clone + 'static,
    {
        match self.lock().get(key) {
            None => QueryState::Idle,
            Some(Entry::Pending { .. }) => QueryState::Pending,
            Some(Entry::Failed(error)) => QueryState::Error(Arc::clone(error)),
            Some(Entry::Ready(value)) => match downcast(key, value) {
                Ok(value) => QueryState::Success(value),
                Err(error) => QueryState::Error(error),
            },
        }
    }

    /// Drop every entry covered by `invalidations`.
    pub fn invalidate(&self, invalidations: &[Invalidation]) {
        self.lock().retain(|key, _| {
            let stale = invalidations.iter().any(|inv| inv.covers(key));
            if stale {
                debug!(%key, "query invalidated");
            }
            !stale
        });
    }

    /// Drop every entry, e.g. when the session changes hands.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Run a write and, when it succeeds, drop the reads it makes stale.
    ///
    /// # Errors
    ///
    /// Returns the write's error untouched; nothing is invalidated then.
    pub async fn mutate<T, Fut>(&self, mutation: Mutation, write: Fut) -> Result<T, ClientError>
    where
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let result = write.await?;
        self.invalidate(&mutation.invalidates());
        Ok(result)
    }
}

fn downcast<T>(key: &QueryKey, value: &CachedValue) -> Result<T, Arc<ClientError>>
where
    T: Clone + 'static,
{
    value.downcast_ref::<T>().cloned().ok_or_else(|| {
        Arc::new(ClientError::CachedTypeMismatch {
            key: key.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use reqwest::StatusCode;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::model::NetworkStats;

    #[fixture]
    fn cache() -> QueryCache {
        QueryCache::new()
    }

    fn stats(total: i64) -> NetworkStats {
        NetworkStats {
            total_contacts: total,
            ..NetworkStats::default()
        }
    }

    fn counting_fetch(
        calls: &Arc<AtomicUsize>,
        value: NetworkStats,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<NetworkStats, ClientError>> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::task::yield_now().await;
                Ok(value)
            }
            .boxed()
        }
    }

    fn server_error() -> ClientError {
        ClientError::from_response_body(
            StatusCode::SERVICE_UNAVAILABLE,
            br#"{"code":"service_unavailable","message":"database unavailable"}"#,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_reads_share_one_request(cache: QueryCache) {
        let calls = Arc::new(AtomicUsize::new(0));
        let (first, second) = tokio::join!(
            cache.fetch(QueryKey::Stats, counting_fetch(&calls, stats(3))),
            cache.fetch(QueryKey::Stats, counting_fetch(&calls, stats(99))),
        );

        assert_eq!(first.expect("first read"), stats(3));
        assert_eq!(second.expect("second read"), stats(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn cached_value_is_served_without_refetching(cache: QueryCache) {
        let calls = Arc::new(AtomicUsize::new(0));
        cache
            .fetch(QueryKey::Stats, counting_fetch(&calls, stats(1)))
            .await
            .expect("first read");
        let again = cache
            .fetch(QueryKey::Stats, counting_fetch(&calls, stats(2)))
            .await
            .expect("cached read");

        assert_eq!(again, stats(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn state_follows_the_query_lifecycle(cache: QueryCache) {
        assert!(matches!(
            cache.state::<NetworkStats>(&QueryKey::Stats),
            QueryState::Idle
        ));

        let calls = Arc::new(AtomicUsize::new(0));
        cache
            .fetch(QueryKey::Stats, counting_fetch(&calls, stats(5)))
            .await
            .expect("read");

        assert!(matches!(
            cache.state::<NetworkStats>(&QueryKey::Stats),
            QueryState::Success(value) if value == stats(5)
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn failures_are_surfaced_then_retried(cache: QueryCache) {
        let error = cache
            .fetch::<NetworkStats, _, _>(QueryKey::Stats, || async { Err(server_error()) })
            .await
            .expect_err("fetch should fail");
        assert_eq!(error.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(matches!(
            cache.state::<NetworkStats>(&QueryKey::Stats),
            QueryState::Error(_)
        ));

        let calls = Arc::new(AtomicUsize::new(0));
        let value = cache
            .fetch(QueryKey::Stats, counting_fetch(&calls, stats(8)))
            .await
            .expect("retry succeeds");
        assert_eq!(value, stats(8));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn successful_mutation_drops_dependent_reads(cache: QueryCache) {
        let calls = Arc::new(AtomicUsize::new(0));
        cache
            .fetch(QueryKey::Stats, counting_fetch(&calls, stats(1)))
            .await
            .expect("stats");
        cache
            .fetch::<Vec<String>, _, _>(QueryKey::Tags, || async {
                Ok(vec!["Investor".to_owned()])
            })
            .await
            .expect("tags");

        cache
            .mutate(Mutation::CreateContact, async { Ok(()) })
            .await
            .expect("mutation");

        assert!(matches!(
            cache.state::<NetworkStats>(&QueryKey::Stats),
            QueryState::Idle
        ));
        assert!(matches!(
            cache.state::<Vec<String>>(&QueryKey::Tags),
            QueryState::Success(_)
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_mutation_keeps_cached_reads(cache: QueryCache) {
        let calls = Arc::new(AtomicUsize::new(0));
        cache
            .fetch(QueryKey::Stats, counting_fetch(&calls, stats(1)))
            .await
            .expect("stats");

        let result: Result<(), ClientError> = cache
            .mutate(Mutation::CreateContact, async { Err(server_error()) })
            .await;

        assert!(result.is_err());
        assert!(matches!(
            cache.state::<NetworkStats>(&QueryKey::Stats),
            QueryState::Success(_)
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn result_landing_after_invalidation_is_not_stored(cache: QueryCache) {
        let (release, gate) = tokio::sync::oneshot::channel::<()>();
        let reader = cache.clone();
        let read = tokio::spawn(async move {
            reader
                .fetch(QueryKey::Stats, move || async move {
                    gate.await.ok();
                    Ok(stats(4))
                })
                .await
        });

        while !cache.state::<NetworkStats>(&QueryKey::Stats).is_pending() {
            tokio::task::yield_now().await;
        }
        cache.invalidate(&Mutation::CreateContact.invalidates());
        release.send(()).expect("reader waiting");

        let value = read.await.expect("reader task").expect("read");
        assert_eq!(value, stats(4));
        assert!(matches!(
            cache.state::<NetworkStats>(&QueryKey::Stats),
            QueryState::Idle
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn reading_back_as_another_type_is_an_error(cache: QueryCache) {
        cache
            .fetch::<u32, _, _>(QueryKey::Graph, || async { Ok(7) })
            .await
            .expect("seed value");
        let error = cache
            .fetch::<String, _, _>(QueryKey::Graph, || async { Ok(String::new()) })
            .await
            .expect_err("type mismatch");
        assert!(matches!(*error, ClientError::CachedTypeMismatch { .. }));
    }
}
