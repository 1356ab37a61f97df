//! Bounded retry.
//!
//! The cross-reference registry often needs a fresh search before its fields
//! resolve, so entrant fetches are wrapped in a bounded retry: run the
//! attempt again while the result is still incomplete, up to a fixed cap,
//! and always hand back the best record obtained.

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, warn};

use crate::fetcher::EntrantFetcher;
use crate::session::SessionFactory;
use crate::types::RawEntrant;

/// Default attempt cap per entrant
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Run `operation` until it yields a complete result or attempts run out.
///
/// A result is complete when `is_incomplete` returns false; the first
/// complete result is returned immediately. Failed attempts are logged and
/// retried. Returns the last successful (possibly incomplete) result, or
/// `None` when every attempt errored.
pub async fn retry_until<T, E, F, Fut, P>(
    max_attempts: u32,
    mut operation: F,
    mut is_incomplete: P,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
    P: FnMut(&T) -> bool,
{
    let mut last = None;

    for attempt in 1..=max_attempts.max(1) {
        match operation().await {
            Ok(value) => {
                if !is_incomplete(&value) {
                    return Some(value);
                }
                debug!(attempt, "result still incomplete");
                last = Some(value);
            }
            Err(e) => {
                warn!(attempt, error = %e, "attempt failed");
            }
        }
    }

    last
}

/// Entrant fetcher that retries while cross-reference fields are unresolved.
///
/// Every attempt runs on its own session; an attempt that dies mid-fetch
/// releases that session and costs one try, nothing more. A record is always
/// produced: after the cap it is the last one obtained, or the all-fallback
/// placeholder when no attempt got off the ground.
pub struct RetryingEntrantFetcher<F: SessionFactory> {
    fetcher: EntrantFetcher<F>,
    max_attempts: u32,
}

impl<F: SessionFactory> RetryingEntrantFetcher<F> {
    pub fn new(fetcher: EntrantFetcher<F>) -> Self {
        Self { fetcher, max_attempts: DEFAULT_MAX_ATTEMPTS }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Fetch one entrant, retrying incomplete results. Never fails.
    pub async fn fetch(&self, profile: &str) -> RawEntrant {
        retry_until(
            self.max_attempts,
            || self.fetcher.fetch(profile),
            |record: &RawEntrant| record.is_incomplete(),
        )
        .await
        .unwrap_or_else(|| RawEntrant::placeholder(profile))
    }
}
