//! Report row assembly.
//!
//! One pass over the ranked table produces display-ready rows: 1-based
//! position, formatted metrics, seed marker, and the beyond-cutoff flag for
//! entrants past the draw size.

use ranking_engine::RankedEntrant;

/// Marker shown for unseeded entrants
pub const UNSEEDED: &str = "-";

/// Column headings, in table order
pub const COLUMNS: [&str; 11] = [
    "No",
    "Name",
    "Location",
    "District",
    "Seed",
    "WTN",
    "Points",
    "Ranking",
    "Recruiting",
    "Grade",
    "UTR",
];

/// One display-ready row of the final table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// 1-based table position
    pub position: usize,
    pub name: String,
    /// Profile link backing the name cell
    pub profile: String,
    pub location: String,
    pub district: String,
    /// Seed number, or "-" when unseeded
    pub seed: String,
    pub wtn: String,
    /// Thousands-separated points
    pub points: String,
    /// Thousands-separated national rank
    pub national_rank: String,
    pub recruiting: String,
    pub grade: String,
    pub utr: String,
    /// True when the row sits past the draw size
    pub beyond_cutoff: bool,
}

/// Group digits in threes: 1200 -> "1,200".
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, ch) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Build display rows from the ranked table.
pub fn build_rows(ranked: &[RankedEntrant], draw_size: u64) -> Vec<ReportRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, entrant)| {
            let position = index + 1;
            ReportRow {
                position,
                name: entrant.record.name.clone(),
                profile: entrant.record.profile.clone(),
                location: entrant.record.location.clone(),
                district: entrant.record.district.clone(),
                seed: entrant
                    .seed
                    .map(|seed| seed.to_string())
                    .unwrap_or_else(|| UNSEEDED.to_string()),
                wtn: format!("{:.2}", entrant.record.rating_wtn),
                points: format_thousands(entrant.record.points),
                national_rank: format_thousands(entrant.record.national_rank),
                recruiting: entrant.record.recruiting_tier.to_string(),
                grade: entrant.record.grade.to_string(),
                utr: entrant.record.utr.clone(),
                beyond_cutoff: position as u64 > draw_size,
            }
        })
        .collect()
}
