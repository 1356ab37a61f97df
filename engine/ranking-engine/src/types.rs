use serde::{Deserialize, Serialize};
use std::fmt;

/// Rating value standing in for an entrant with no published WTN
pub const DEFAULT_WTN: f64 = 40.0;

/// Points value standing in for an entrant with no standings row
pub const DEFAULT_POINTS: u64 = 0;

/// National rank standing in for an entrant with no standings row
pub const DEFAULT_RANK: u64 = 20_000;

/// Draw size used when the event facts are unparseable
pub const DEFAULT_DRAW_SIZE: u64 = 100_000;

/// Star-based recruiting classification parsed from the badge image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecruitingTier {
    Unknown,
    Star(u8),
    BlueChip,
}

impl fmt::Display for RecruitingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecruitingTier::Unknown => write!(f, "Unknown"),
            RecruitingTier::Star(stars) => write!(f, "{stars} Star"),
            RecruitingTier::BlueChip => write!(f, "Blue Chip"),
        }
    }
}

/// School year reported by the cross-reference registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeYear {
    Graduate,
    Senior,
    Junior,
    Sophomore,
    Freshman,
    EighthGrader,
    SeventhGrader,
    SixthGrader,
    Unknown,
}

impl GradeYear {
    pub fn label(&self) -> &'static str {
        match self {
            GradeYear::Graduate => "Graduate",
            GradeYear::Senior => "Senior",
            GradeYear::Junior => "Junior",
            GradeYear::Sophomore => "Sophomore",
            GradeYear::Freshman => "Freshman",
            GradeYear::EighthGrader => "8th Grader",
            GradeYear::SeventhGrader => "7th Grader",
            GradeYear::SixthGrader => "6th Grader",
            GradeYear::Unknown => "Unknown",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "Graduate" => GradeYear::Graduate,
            "Senior" => GradeYear::Senior,
            "Junior" => GradeYear::Junior,
            "Sophomore" => GradeYear::Sophomore,
            "Freshman" => GradeYear::Freshman,
            "8th Grader" => GradeYear::EighthGrader,
            "7th Grader" => GradeYear::SeventhGrader,
            "6th Grader" => GradeYear::SixthGrader,
            _ => GradeYear::Unknown,
        }
    }
}

/// Grade class with its provisional marker ("Senior?" when the listing is
/// not yet confirmed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeClass {
    pub year: GradeYear,
    pub provisional: bool,
}

impl GradeClass {
    pub fn unknown() -> Self {
        Self { year: GradeYear::Unknown, provisional: false }
    }

    /// Parse the scraped grade text, e.g. "Senior" or "8th Grader?".
    pub fn from_raw(text: &str) -> Self {
        let trimmed = text.trim();
        let provisional = trimmed.ends_with('?');
        let year = GradeYear::from_label(trimmed.trim_end_matches('?'));
        if year == GradeYear::Unknown {
            Self::unknown()
        } else {
            Self { year, provisional }
        }
    }
}

impl fmt::Display for GradeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.provisional && self.year != GradeYear::Unknown {
            write!(f, "{}?", self.year.label())
        } else {
            write!(f, "{}", self.year.label())
        }
    }
}

/// One entrant with every field coerced to its typed form.
///
/// Each field holds either a parsed value or its numeric sentinel; nothing
/// is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrantRecord {
    pub name: String,
    pub profile: String,
    pub location: String,
    pub district: String,
    pub rating_wtn: f64,
    pub points: u64,
    pub national_rank: u64,
    pub recruiting_tier: RecruitingTier,
    pub grade: GradeClass,
    pub utr: String,
}

/// Which metric orders the entrant table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortCriterion {
    ByPoints,
    ByRating,
}

/// Outcome of reading the event's selection-type metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortResolution {
    Resolved(SortCriterion),
    /// Metadata absent or unrecognized; the operator must choose.
    Ambiguous,
}

/// Draw size and sort criterion governing one report run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawConfig {
    pub draw_size: u64,
    pub sort: SortCriterion,
}

/// Tournament classification driving the comparator and seeding direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierClassification {
    Level6,
    Level7,
    Other,
}

impl TierClassification {
    pub fn from_level(level: &str) -> Self {
        if level.contains("Level 7") {
            TierClassification::Level7
        } else if level.contains("Level 6") {
            TierClassification::Level6
        } else {
            TierClassification::Other
        }
    }
}

/// An entrant paired with its seed assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntrant {
    pub record: EntrantRecord,
    pub seed: Option<u32>,
}

/// Parse the draw-size fact, falling back to the open-ended sentinel.
pub fn parse_draw_size(text: &str) -> u64 {
    text.trim().parse().unwrap_or(DEFAULT_DRAW_SIZE)
}

/// Map the selection-type metadata to a sort criterion.
///
/// "Manual" events are ordered by points in practice; anything else the
/// source does not spell out stays ambiguous and needs an operator choice
/// before the pipeline runs.
pub fn resolve_sort_hint(text: &str) -> SortResolution {
    let hint = text.trim().to_lowercase();
    if hint.contains("ranking") || hint.contains("manual") {
        SortResolution::Resolved(SortCriterion::ByPoints)
    } else if hint.contains("wtn") {
        SortResolution::Resolved(SortCriterion::ByRating)
    } else {
        SortResolution::Ambiguous
    }
}
