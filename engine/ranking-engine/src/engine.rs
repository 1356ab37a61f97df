//! Ranking pipeline stage.
//!
//! Takes normalized entrants in source-page order, computes seed assignments
//! over that order, then applies the tier-dependent sort. Seeds attach to
//! entrants, so they travel with their rows through the sort.

use tracing::info;

use crate::seeding::assign_seeds;
use crate::sort::{sort_entrants, SortLabel};
use crate::types::{DrawConfig, RankedEntrant, TierClassification};

/// A ranked, seeded entrant table ready for report assembly
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub entrants: Vec<RankedEntrant>,
    pub sort_label: SortLabel,
}

/// Seed and sort a normalized entrant list.
pub fn rank_entrants(
    entrants: Vec<crate::types::EntrantRecord>,
    level: &str,
    config: DrawConfig,
) -> Ranking {
    let tier = TierClassification::from_level(level);
    let seeds = assign_seeds(&entrants, config.draw_size);

    let mut ranked: Vec<RankedEntrant> = entrants
        .into_iter()
        .zip(seeds)
        .map(|(record, seed)| RankedEntrant { record, seed })
        .collect();

    let sort_label = sort_entrants(&mut ranked, tier, config.sort);
    info!(
        "Ranked {} entrants ({} order, {} seeded)",
        ranked.len(),
        sort_label,
        ranked.iter().filter(|e| e.seed.is_some()).count()
    );

    Ranking { entrants: ranked, sort_label }
}
