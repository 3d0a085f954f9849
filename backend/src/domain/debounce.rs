//! Debounced vehicle search.
//!
//! Each call waits for the debounce window before scanning the snapshot. A
//! call issued while an earlier one is still waiting supersedes it: the
//! earlier call wakes up, sees a newer generation and returns `None`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use super::{RegistrySnapshot, VehicleMatch};

/// Quiet period a query must survive before it runs.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Last-write-wins search over a replaceable snapshot.
pub struct DebouncedSearch {
    snapshot: RwLock<RegistrySnapshot>,
    generation: AtomicU64,
    delay: Duration,
}

impl DebouncedSearch {
    /// Search `snapshot` with the default [`SEARCH_DEBOUNCE`] window.
    pub fn new(snapshot: RegistrySnapshot) -> Self {
        Self::with_delay(snapshot, SEARCH_DEBOUNCE)
    }

    pub fn with_delay(snapshot: RegistrySnapshot, delay: Duration) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            generation: AtomicU64::new(0),
            delay,
        }
    }

    /// Swap in a freshly loaded snapshot.
    pub async fn replace_snapshot(&self, snapshot: RegistrySnapshot) {
        *self.snapshot.write().await = snapshot;
    }

    /// Run `query` once the debounce window passes without a newer call.
    ///
    /// Returns `None` when a newer query superseded this one.
    pub async fn search(&self, query: &str) -> Option<Vec<VehicleMatch>> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            return None;
        }
        let snapshot = self.snapshot.read().await;
        Some(snapshot.search_vehicles(query))
    }
}

#[cfg(test)]
mod tests {
    //! Timing tests run on a paused Tokio clock.

    use super::*;
    use crate::test_support::registry::{apartment, block, resident, vehicle};
    use rstest::{fixture, rstest};

    #[fixture]
    fn snapshot() -> RegistrySnapshot {
        let block_a = block("b-a", "A");
        let a101 = apartment("ap-1", &block_a, "101");
        let an = resident("r-1", "An", "0901", &a101);
        RegistrySnapshot::new(
            vec![block_a],
            vec![a101.clone()],
            vec![an.clone()],
            vec![
                vehicle("v-1", "51A-12345", &an, &a101),
                vehicle("v-2", "51B-11111", &an, &a101),
            ],
        )
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn lone_query_runs_after_window(snapshot: RegistrySnapshot) {
        let search = DebouncedSearch::new(snapshot);
        let started = tokio::time::Instant::now();

        let results = search.search("51b").await.expect("query runs");

        assert!(started.elapsed() >= SEARCH_DEBOUNCE);
        assert_eq!(results.len(), 1);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn newer_query_supersedes_pending_one(snapshot: RegistrySnapshot) {
        let search = DebouncedSearch::new(snapshot);

        let (first, second) = tokio::join!(search.search("51a"), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            search.search("51b").await
        });

        assert!(first.is_none());
        let second = second.expect("latest query runs");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].vehicle.plate_number.as_ref(), "51B11111");
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn sequential_queries_both_run(snapshot: RegistrySnapshot) {
        let search = DebouncedSearch::new(snapshot);

        assert!(search.search("51a").await.is_some());
        assert!(search.search("51b").await.is_some());
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn replaced_snapshot_is_searched(snapshot: RegistrySnapshot) {
        let search = DebouncedSearch::new(RegistrySnapshot::default());
        assert_eq!(search.search("51a").await, Some(Vec::new()));

        search.replace_snapshot(snapshot).await;

        assert_eq!(search.search("51a").await.map(|found| found.len()), Some(1));
    }
}
