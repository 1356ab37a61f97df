//! Ranking Engine
//!
//! Normalizes scraped entrant records into typed form, applies the
//! tier-dependent sort policy, and computes seed assignments with their tie
//! and default-value rules.

pub mod engine;
pub mod normalize;
pub mod seeding;
pub mod sort;
pub mod types;

pub use engine::{rank_entrants, Ranking};
pub use normalize::{normalize, normalize_all};
pub use seeding::{assign_seeds, seed_quota};
pub use sort::{sort_entrants, SortLabel};
pub use types::{
    parse_draw_size, resolve_sort_hint, DrawConfig, EntrantRecord, GradeClass, GradeYear,
    RankedEntrant, RecruitingTier, SortCriterion, SortResolution, TierClassification,
    DEFAULT_DRAW_SIZE, DEFAULT_POINTS, DEFAULT_RANK, DEFAULT_WTN,
};
