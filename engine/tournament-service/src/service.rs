//! Pipeline orchestration.
//!
//! `run_report` wires the stages together: discover the tournament, fetch
//! every matching entrant in batches, normalize, rank, and render. All
//! operator decisions (age group, sort criterion when the source is
//! ambiguous) are inputs here; nothing prompts mid-run.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

use entrant_scraper::{
    AgeGroupListing, BatchScheduler, EntrantFetcher, EntrantSet, RetryingEntrantFetcher,
    SessionFactory, TournamentDiscovery,
};
use ranking_engine::{
    normalize_all, parse_draw_size, rank_entrants, resolve_sort_hint, DrawConfig, SortCriterion,
    SortResolution,
};
use report_builder::{
    artifact_stem, build_rows, summarize_utrs, summary_lines, DocumentRenderer, TournamentReport,
};

use crate::config::ServiceConfig;

/// Result of a report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Report rendered successfully
    Report {
        /// Where the artifact was written
        path: PathBuf,
        /// Number of entrants in the table
        entrant_count: usize,
    },
    /// No entrant matched the selected age group; nothing was rendered
    NoEntrants,
}

/// The full acquisition-to-report pipeline
pub struct TournamentPipeline<F, R> {
    config: ServiceConfig,
    factory: F,
    renderer: R,
}

impl<F, R> TournamentPipeline<F, R>
where
    F: SessionFactory + Clone,
    R: DocumentRenderer,
{
    pub fn new(config: ServiceConfig, factory: F, renderer: R) -> Self {
        Self { config, factory, renderer }
    }

    /// Discover the level and selectable age groups for a tournament.
    pub async fn age_groups(&self, url: &str) -> Result<AgeGroupListing> {
        let overview_url = normalize_tournament_url(url);
        self.discovery()
            .age_groups(&overview_url)
            .await
            .context("Failed to discover tournament age groups")
    }

    /// Run the whole pipeline for one tournament and age group.
    ///
    /// `sort_override` is required up front when the event's selection
    /// metadata does not resolve on its own.
    pub async fn run_report(
        &self,
        url: &str,
        age_group: &str,
        sort_override: Option<SortCriterion>,
    ) -> Result<PipelineOutcome> {
        let overview_url = normalize_tournament_url(url);
        let discovery = self.discovery();

        let listing = discovery
            .age_groups(&overview_url)
            .await
            .context("Failed to discover tournament age groups")?;
        if !listing.age_groups.iter().any(|group| group == age_group) {
            bail!(
                "Age group '{age_group}' not found; available: {}",
                listing.age_groups.join(", ")
            );
        }

        let title = discovery
            .tournament_name(&overview_url)
            .await
            .context("Failed to read tournament name")?;

        let metadata = discovery
            .draw_metadata(&events_url(&overview_url), age_group)
            .await
            .context("Failed to read draw metadata")?;
        let draw_size = parse_draw_size(&metadata.draw_size);
        let sort = match sort_override {
            Some(sort) => sort,
            None => match resolve_sort_hint(&metadata.sort_hint) {
                SortResolution::Resolved(sort) => sort,
                SortResolution::Ambiguous => bail!(
                    "Selection metadata '{}' does not determine a sort order; \
                     choose points or wtn explicitly",
                    metadata.sort_hint.trim()
                ),
            },
        };

        let links = discovery
            .entrant_links(&players_url(&overview_url), age_group)
            .await
            .context("Failed to collect entrant links")?;
        if links.is_empty() {
            info!("No entrants found for age group '{}'", age_group);
            return Ok(PipelineOutcome::NoEntrants);
        }

        info!("Found {} entrants. Starting information search...", links.len());
        let fetcher = RetryingEntrantFetcher::new(
            EntrantFetcher::new(self.factory.clone(), age_group)
                .with_timeouts(self.config.scrape.timeouts()),
        )
        .with_max_attempts(self.config.scrape.max_attempts);
        let scheduler = BatchScheduler::new(self.config.scrape.batch_size);

        let fetcher = &fetcher;
        let raw = scheduler
            .run(links, |link| async move { fetcher.fetch(&link).await })
            .await;

        if let Some(snapshot_path) = &self.config.report.raw_snapshot {
            let snapshot = EntrantSet::new(age_group, raw.clone());
            let json = serde_json::to_string_pretty(&snapshot)
                .context("Failed to serialize raw snapshot")?;
            std::fs::write(snapshot_path, json).with_context(|| {
                format!("Failed to write raw snapshot to {}", snapshot_path.display())
            })?;
            info!("Raw snapshot saved to: {}", snapshot_path.display());
        }

        info!("Completed. Analyzing data...");
        let entrant_count = raw.len();
        let records = normalize_all(&raw);
        let ranking = rank_entrants(records, &listing.level, DrawConfig { draw_size, sort });

        let rows = build_rows(&ranking.entrants, draw_size);
        let buckets =
            summarize_utrs(ranking.entrants.iter().map(|entrant| entrant.record.utr.as_str()));

        let report = TournamentReport {
            file_stem: artifact_stem(&title, Utc::now().date_naive(), ranking.sort_label),
            title,
            summary_lines: summary_lines(&buckets),
            rows,
        };
        let path = self
            .renderer
            .render(&report)
            .context("Failed to render report document")?;

        Ok(PipelineOutcome::Report { path, entrant_count })
    }

    fn discovery(&self) -> TournamentDiscovery<F> {
        TournamentDiscovery::new(self.factory.clone())
            .with_timeouts(self.config.scrape.timeouts())
    }
}

/// The registry serves tournament pages under lowercase paths.
fn normalize_tournament_url(url: &str) -> String {
    url.trim().to_ascii_lowercase()
}

fn events_url(overview_url: &str) -> String {
    overview_url.replace("overview", "events")
}

fn players_url(overview_url: &str) -> String {
    overview_url.replace("overview", "players")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tournament_urls_normalize_to_lowercase() {
        assert_eq!(
            normalize_tournament_url(" https://Example.com/T/1/Overview "),
            "https://example.com/t/1/overview"
        );
    }

    #[test]
    fn sibling_pages_derive_from_the_overview_url() {
        let overview = "https://example.com/t/1/overview";
        assert_eq!(events_url(overview), "https://example.com/t/1/events");
        assert_eq!(players_url(overview), "https://example.com/t/1/players");
    }
}
