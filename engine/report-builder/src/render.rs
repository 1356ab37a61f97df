//! Document rendering boundary.
//!
//! The pipeline hands a finished [`TournamentReport`] to a
//! [`DocumentRenderer`] and gets back the artifact's path. The built-in
//! renderer writes a self-contained HTML document; anything fancier (PDF,
//! spreadsheet) slots in behind the same trait.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::rows::{ReportRow, COLUMNS};
use ranking_engine::SortLabel;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while writing the report artifact
#[derive(Error, Debug)]
pub enum RenderError {
    /// I/O errors (directory creation, file write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the renderer needs to produce the artifact
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentReport {
    /// Tournament title, shown as the document heading
    pub title: String,
    /// UTR distribution sentences
    pub summary_lines: Vec<String>,
    /// Display-ready table rows
    pub rows: Vec<ReportRow>,
    /// Artifact filename without extension
    pub file_stem: String,
}

/// Renders an assembled report into a downloadable artifact
pub trait DocumentRenderer {
    fn render(&self, report: &TournamentReport) -> Result<PathBuf>;
}

/// Keep only alphanumerics, spaces, and hyphens; everything else becomes a
/// hyphen so the title stays filesystem-safe.
pub fn sanitize_title(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == ' ' || c == '-' { c } else { '-' })
        .collect()
}

/// Artifact filename stem: `{sanitized title}_{ISO date}_{sort label}`.
pub fn artifact_stem(title: &str, date: NaiveDate, sort_label: SortLabel) -> String {
    format!("{}_{}_{}", sanitize_title(title), date.format("%Y-%m-%d"), sort_label)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// HTML renderer writing `{file_stem}.html` into a fixed output directory
#[derive(Debug, Clone)]
pub struct HtmlReportRenderer {
    output_dir: PathBuf,
}

impl HtmlReportRenderer {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self { output_dir: output_dir.as_ref().to_path_buf() }
    }

    fn document(report: &TournamentReport) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(&report.title)));
        html.push_str(
            "<style>\n\
             table { border-collapse: collapse; }\n\
             th, td { border: 1px solid #888; padding: 4px 8px; text-align: left; }\n\
             th { background: #2e7d32; color: #fafafa; }\n\
             tr.beyond-cutoff td { background: lightcoral; }\n\
             </style>\n</head>\n<body>\n",
        );
        html.push_str(&format!("<h1>{}</h1>\n", escape(&report.title)));

        html.push_str("<p>\n");
        for line in &report.summary_lines {
            html.push_str(&format!(" - {}<br>\n", escape(line)));
        }
        html.push_str("</p>\n<hr>\n");

        html.push_str("<table>\n<tr>");
        for column in COLUMNS {
            html.push_str(&format!("<th>{column}</th>"));
        }
        html.push_str("</tr>\n");

        for row in &report.rows {
            if row.beyond_cutoff {
                html.push_str("<tr class=\"beyond-cutoff\">");
            } else {
                html.push_str("<tr>");
            }
            html.push_str(&format!("<td>{}</td>", row.position));
            if row.profile.is_empty() {
                html.push_str(&format!("<td>{}</td>", escape(&row.name)));
            } else {
                html.push_str(&format!(
                    "<td><a href=\"{}\">{}</a></td>",
                    escape(&row.profile),
                    escape(&row.name)
                ));
            }
            for cell in [
                &row.location,
                &row.district,
                &row.seed,
                &row.wtn,
                &row.points,
                &row.national_rank,
                &row.recruiting,
                &row.grade,
                &row.utr,
            ] {
                html.push_str(&format!("<td>{}</td>", escape(cell)));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</table>\n</body>\n</html>\n");
        html
    }
}

impl DocumentRenderer for HtmlReportRenderer {
    fn render(&self, report: &TournamentReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.html", report.file_stem));
        fs::write(&path, Self::document(report))?;
        info!("Report saved to: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::build_rows;
    use ranking_engine::{EntrantRecord, GradeClass, RankedEntrant, RecruitingTier};

    fn sample_report() -> TournamentReport {
        let table = vec![RankedEntrant {
            record: EntrantRecord {
                name: "Alex <Morgan>".to_string(),
                profile: "https://example.com/p/1".to_string(),
                location: "Austin, TX".to_string(),
                district: "Capital".to_string(),
                rating_wtn: 24.5,
                points: 1200,
                national_rank: 87,
                recruiting_tier: RecruitingTier::Star(4),
                grade: GradeClass::unknown(),
                utr: "11.xx".to_string(),
            },
            seed: Some(1),
        }];
        TournamentReport {
            title: "Spring Open".to_string(),
            summary_lines: vec!["There is 1 UTR rated 11.xx in this tournament (100%).".to_string()],
            rows: build_rows(&table, 0),
            file_stem: "Spring Open_2026-08-04_points".to_string(),
        }
    }

    #[test]
    fn titles_sanitize_to_safe_characters() {
        assert_eq!(sanitize_title("Spring Open 2026"), "Spring Open 2026");
        assert_eq!(sanitize_title("Boys/Girls: L6"), "Boys-Girls- L6");
        assert_eq!(sanitize_title("Été #1"), "Été -1");
    }

    #[test]
    fn artifact_stem_combines_title_date_and_label() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        assert_eq!(
            artifact_stem("Spring: Open", date, SortLabel::Wtn),
            "Spring- Open_2026-08-04_wtn"
        );
    }

    #[test]
    fn renderer_writes_the_document_with_highlighting() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = HtmlReportRenderer::new(dir.path());

        let path = renderer.render(&sample_report()).unwrap();

        assert_eq!(path, dir.path().join("Spring Open_2026-08-04_points.html"));
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("<h1>Spring Open</h1>"));
        assert!(html.contains("Alex &lt;Morgan&gt;"));
        assert!(html.contains("class=\"beyond-cutoff\""), "draw size 0 flags every row");
        assert!(html.contains("There is 1 UTR rated 11.xx"));
    }
}
