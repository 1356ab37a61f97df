//! Entrant Scraper
//!
//! Collects per-entrant rating data for a tennis tournament from the primary
//! registry and a name-keyed cross-reference registry. Fetches run in
//! order-preserving batches with bounded per-entrant retry, and every field
//! degrades to a documented fallback instead of failing.

pub mod batch;
pub mod discovery;
pub mod fetcher;
pub mod retry;
pub mod selectors;
pub mod session;
pub mod types;

pub use batch::{BatchScheduler, DEFAULT_BATCH_SIZE};
pub use discovery::{AgeGroupListing, DrawMetadata, TournamentDiscovery};
pub use fetcher::{EntrantFetcher, FetchTimeouts};
pub use retry::{retry_until, RetryingEntrantFetcher, DEFAULT_MAX_ATTEMPTS};
pub use session::{
    ElementHandle, HttpPageSession, HttpSessionFactory, PageSession, ScrapeError, SessionFactory,
};
pub use types::{EntrantSet, RawEntrant};
