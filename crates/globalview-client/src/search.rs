//! Debounced free-text search.
//!
//! Every keystroke calls [`SearchDebouncer::run`]. Only the last query in a
//! burst reaches the server, and a response for a query that has since been
//! superseded is discarded (last write wins). Superseded requests are not
//! cancelled; their results are simply dropped.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default debounce window for leader and investor search.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(450);

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Waits out the debounce window, then runs `fetch(query)` unless a newer
    /// call arrived in the meantime.
    ///
    /// Returns `None` when this call was superseded, either before the fetch
    /// started or while it was in flight.
    pub async fn run<T, F, Fut>(&self, query: String, fetch: F) -> Option<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(query = %query, "search superseded before fetch");
            return None;
        }
        let result = fetch(query).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!("search result superseded in flight, discarding");
            return None;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn single_query_runs_after_delay() {
        let debouncer = SearchDebouncer::default();
        let start = tokio::time::Instant::now();
        let result = debouncer
            .run("ana".to_string(), |q| async move { q.to_uppercase() })
            .await;
        assert_eq!(result.as_deref(), Some("ANA"));
        assert!(start.elapsed() >= DEFAULT_SEARCH_DEBOUNCE);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_only_fetches_last_query() {
        let debouncer = SearchDebouncer::from_millis(450);
        let fetched = Arc::new(Mutex::new(Vec::new()));

        let run = |query: &str| {
            let debouncer = debouncer.clone();
            let fetched = Arc::clone(&fetched);
            let query = query.to_string();
            tokio::spawn(async move {
                debouncer
                    .run(query, |q| async move {
                        fetched.lock().unwrap().push(q.clone());
                        q
                    })
                    .await
            })
        };

        let first = run("a");
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = run("an");
        tokio::time::sleep(Duration::from_millis(100)).await;
        let third = run("ana");

        assert_eq!(first.await.unwrap(), None);
        assert_eq!(second.await.unwrap(), None);
        assert_eq!(third.await.unwrap().as_deref(), Some("ana"));
        assert_eq!(*fetched.lock().unwrap(), ["ana"]);
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_result_is_discarded_when_superseded() {
        let debouncer = SearchDebouncer::from_millis(50);
        let slow = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move {
                debouncer
                    .run("slow".to_string(), |q| async move {
                        tokio::time::sleep(Duration::from_millis(500)).await;
                        q
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(200)).await;
        let fast = debouncer
            .run("fast".to_string(), |q| async move { q })
            .await;

        assert_eq!(fast.as_deref(), Some("fast"));
        assert_eq!(slow.await.unwrap(), None);
    }
}
