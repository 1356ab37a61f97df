//! Tournament Report Service
//!
//! Orchestrates the entrant acquisition and seeding pipeline: discovery,
//! batched fetching, normalization, ranking, and document rendering.

pub mod cli;
pub mod config;
pub mod logging;
pub mod service;

pub use cli::{Cli, Commands, SortArg};
pub use config::{ReportConfig, ScrapeConfig, ServiceConfig};
pub use logging::initialize_logging;
pub use service::{PipelineOutcome, TournamentPipeline};
