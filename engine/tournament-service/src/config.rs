//! Service configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use entrant_scraper::{FetchTimeouts, DEFAULT_BATCH_SIZE, DEFAULT_MAX_ATTEMPTS};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Fetch pipeline configuration
    pub scrape: ScrapeConfig,

    /// Report output configuration
    pub report: ReportConfig,
}

/// Fetch pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Concurrent fetches per batch
    pub batch_size: usize,

    /// Fetch attempts per entrant before settling for an incomplete record
    pub max_attempts: u32,

    /// Page navigation budget in seconds
    pub navigation_timeout_secs: u64,

    /// Single field lookup budget in seconds
    pub field_timeout_secs: u64,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the report artifact is written to
    pub output_dir: PathBuf,

    /// Optional path for a JSON snapshot of the raw fetched records
    pub raw_snapshot: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            navigation_timeout_secs: 15,
            field_timeout_secs: 10,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("./reports"), raw_snapshot: None }
    }
}

impl ScrapeConfig {
    /// Time limits in the form the fetcher takes them
    pub fn timeouts(&self) -> FetchTimeouts {
        FetchTimeouts {
            navigation: Duration::from_secs(self.navigation_timeout_secs),
            field: Duration::from_secs(self.field_timeout_secs),
        }
    }
}

impl ServiceConfig {
    /// Load configuration: defaults, then the TOML file if given, then
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Override settings from environment variables if present
    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("TOURNAMENT_REPORT_OUTPUT_DIR") {
            self.report.output_dir = PathBuf::from(dir);
        }
        if let Ok(size) = std::env::var("TOURNAMENT_REPORT_BATCH_SIZE") {
            if let Ok(size) = size.parse() {
                self.scrape.batch_size = size;
            }
        }
        if let Ok(attempts) = std::env::var("TOURNAMENT_REPORT_MAX_ATTEMPTS") {
            if let Ok(attempts) = attempts.parse() {
                self.scrape.max_attempts = attempts;
            }
        }
    }
}
