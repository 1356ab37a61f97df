//! Command line interface

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ranking_engine::SortCriterion;

/// Tournament entrant analysis and seeding report generator
#[derive(Parser)]
#[command(name = "tournament-report")]
#[command(about = "Fetches tournament entrant ratings and renders a seeding report")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List a tournament's level and selectable age groups
    AgeGroups {
        /// Tournament overview link
        url: String,
    },
    /// Fetch entrants for one age group and render the report
    Report {
        /// Tournament overview link
        url: String,

        /// Age group to analyze (as listed by age-groups)
        #[arg(long)]
        age_group: String,

        /// Sort criterion; required when the event metadata is ambiguous
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
}

/// Operator-selectable sort criterion
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Order by standings points
    Points,
    /// Order by World Tennis Number
    Wtn,
}

impl From<SortArg> for SortCriterion {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Points => SortCriterion::ByPoints,
            SortArg::Wtn => SortCriterion::ByRating,
        }
    }
}
