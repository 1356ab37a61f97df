use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback used for any text field whose source element never resolves.
pub const UNKNOWN: &str = "Unknown";

/// Name fallback when the profile page loads but the name heading does not.
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// Rating fallback; parses to the 40.0 numeric sentinel downstream.
pub const WTN_FALLBACK: &str = "40.00";

/// Standings points when no standings row matches the age group.
pub const POINTS_DEFAULT: &str = "0";

/// National rank when no standings row matches the age group.
pub const RANK_DEFAULT: &str = "20000";

/// National rank when the standings lookup itself fails.
pub const RANK_FALLBACK: &str = "20,000";

/// UTR placeholder; also the "still unresolved" marker for the retry loop.
pub const UTR_PLACEHOLDER: &str = "0.xx";

/// Grade labels recognized on the cross-reference profile, most senior first.
pub const GRADE_LABELS: [&str; 8] = [
    "Graduate",
    "Senior",
    "Junior",
    "Sophomore",
    "Freshman",
    "8th Grader",
    "7th Grader",
    "6th Grader",
];

/// One entrant's attributes exactly as read off the remote sources.
///
/// Every field always holds either scraped text or its documented fallback,
/// never an empty placeholder. Each fetch attempt builds a fresh value; a
/// retry replaces the whole record rather than patching fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntrant {
    /// Entrant name from the profile page
    pub name: String,
    /// Profile link the record was fetched from
    pub profile: String,
    /// Location line from the profile page
    pub location: String,
    /// Section district from the profile page
    pub district: String,
    /// World Tennis Number as displayed (e.g. "24.51")
    pub wtn: String,
    /// Standings points for the selected age group
    pub points: String,
    /// National standings rank for the selected age group
    pub national_rank: String,
    /// Recruiting badge image source (e.g. ".../4star.gif"), not yet mapped
    pub recruiting_badge: String,
    /// Grade class text (e.g. "Senior", "8th Grader?" when provisional)
    pub grade: String,
    /// UTR text, usually the rounded "N.xx" form
    pub utr: String,
}

impl RawEntrant {
    /// All-fallback record for an entrant whose every fetch attempt failed.
    pub fn placeholder(profile: impl Into<String>) -> Self {
        Self {
            name: UNKNOWN.to_string(),
            profile: profile.into(),
            location: UNKNOWN.to_string(),
            district: UNKNOWN.to_string(),
            wtn: WTN_FALLBACK.to_string(),
            points: POINTS_DEFAULT.to_string(),
            national_rank: RANK_FALLBACK.to_string(),
            recruiting_badge: UNKNOWN.to_string(),
            grade: UNKNOWN.to_string(),
            utr: UTR_PLACEHOLDER.to_string(),
        }
    }

    /// True while the cross-reference fields are still at their fallbacks.
    ///
    /// The secondary registry is flaky; its three fields are the ones worth
    /// another pass. Primary-registry fields keep whatever the last attempt
    /// produced.
    pub fn is_incomplete(&self) -> bool {
        self.recruiting_badge == UNKNOWN || self.grade == UNKNOWN || self.utr == UTR_PLACEHOLDER
    }
}

/// Container for one run's worth of fetched entrants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrantSet {
    /// Age group the entrants were selected by
    pub age_group: String,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
    /// Fetched records, in source-page order
    pub entrants: Vec<RawEntrant>,
}

impl EntrantSet {
    /// Create a new entrant set stamped with the current time
    pub fn new(age_group: impl Into<String>, entrants: Vec<RawEntrant>) -> Self {
        Self { age_group: age_group.into(), fetched_at: Utc::now(), entrants }
    }
}
