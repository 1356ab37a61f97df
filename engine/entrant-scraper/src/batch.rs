//! Batched concurrent fetching.
//!
//! Each fetch owns an expensive exclusive session, so the scheduler runs the
//! entrant list in fixed-size batches instead of all at once: everything in a
//! batch runs concurrently, the whole batch is awaited before the next one
//! starts, and results come back in input order regardless of completion
//! order within a batch.

use std::future::Future;

use futures::future::join_all;
use tracing::info;

/// Default number of concurrent fetches per batch
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Runs an async operation over a list in order-preserving batches
#[derive(Debug, Clone, Copy)]
pub struct BatchScheduler {
    batch_size: usize,
}

impl BatchScheduler {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size: batch_size.max(1) }
    }

    /// Apply `fetch` to every item, `batch_size` at a time.
    ///
    /// The output always has one entry per input, in input order. A slow or
    /// failed item only affects its own slot; whether a failure surfaces at
    /// all is up to `fetch` (entrant fetches resolve to fallback records
    /// rather than errors).
    pub async fn run<T, R, F, Fut>(&self, items: Vec<T>, fetch: F) -> Vec<R>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = R>,
    {
        let total = items.len();
        let total_batches = total.div_ceil(self.batch_size);
        let mut results = Vec::with_capacity(total);
        let mut items = items.into_iter();
        let mut batch_index = 0;

        loop {
            let chunk: Vec<T> = items.by_ref().take(self.batch_size).collect();
            if chunk.is_empty() {
                break;
            }
            batch_index += 1;
            info!("Fetching batch {} of {} ({} entrants)", batch_index, total_batches, chunk.len());
            results.extend(join_all(chunk.into_iter().map(&fetch)).await);
        }

        results
    }
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}
