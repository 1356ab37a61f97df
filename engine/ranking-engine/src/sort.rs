//! Tier-dependent ordering.
//!
//! Level 7 feeds its strongest entrants in last, Level 6 first, and any
//! other level falls back to points regardless of the configured criterion.
//! The sort is stable, so equal keys keep their source-page order and a
//! re-run reproduces the table exactly.

use std::cmp::Ordering;
use std::fmt;

use crate::types::{RankedEntrant, SortCriterion, TierClassification};

/// Label embedded in the report filename describing the applied order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortLabel {
    Points,
    Wtn,
    Mixed,
}

impl fmt::Display for SortLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortLabel::Points => write!(f, "points"),
            SortLabel::Wtn => write!(f, "wtn"),
            SortLabel::Mixed => write!(f, "mixed"),
        }
    }
}

fn by_points(a: &RankedEntrant, b: &RankedEntrant) -> Ordering {
    a.record.points.cmp(&b.record.points)
}

/// `total_cmp` keeps this panic-free; a NaN rating compares greater than
/// every real value.
fn by_rating(a: &RankedEntrant, b: &RankedEntrant) -> Ordering {
    a.record.rating_wtn.total_cmp(&b.record.rating_wtn)
}

/// Sort entrants in place per the tier policy and report the label used.
pub fn sort_entrants(
    entrants: &mut [RankedEntrant],
    tier: TierClassification,
    criterion: SortCriterion,
) -> SortLabel {
    match (tier, criterion) {
        (TierClassification::Level7, SortCriterion::ByPoints) => {
            entrants.sort_by(by_points);
            SortLabel::Points
        }
        (TierClassification::Level7, SortCriterion::ByRating) => {
            entrants.sort_by(|a, b| by_rating(b, a));
            SortLabel::Wtn
        }
        (TierClassification::Level6, SortCriterion::ByPoints) => {
            entrants.sort_by(|a, b| by_points(b, a));
            SortLabel::Points
        }
        (TierClassification::Level6, SortCriterion::ByRating) => {
            entrants.sort_by(by_rating);
            SortLabel::Wtn
        }
        (TierClassification::Other, _) => {
            entrants.sort_by(|a, b| by_points(b, a));
            SortLabel::Mixed
        }
    }
}
