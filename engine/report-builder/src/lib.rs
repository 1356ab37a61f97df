//! Report Builder
//!
//! Turns a ranked entrant table into the final report: display rows with
//! cutoff highlighting, the UTR distribution summary, and the rendered
//! document artifact.

pub mod render;
pub mod rows;
pub mod summary;

pub use render::{
    artifact_stem, sanitize_title, DocumentRenderer, HtmlReportRenderer, RenderError,
    TournamentReport,
};
pub use rows::{build_rows, format_thousands, ReportRow, COLUMNS, UNSEEDED};
pub use summary::{summarize_utrs, summary_lines, RatingBucket};
