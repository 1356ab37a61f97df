//! Tournament report CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use entrant_scraper::HttpSessionFactory;
use report_builder::HtmlReportRenderer;
use tournament_service::{
    initialize_logging, Cli, Commands, PipelineOutcome, ServiceConfig, TournamentPipeline,
};

#[tokio::main]
async fn main() -> Result<()> {
    initialize_logging()?;

    let cli = Cli::parse();
    info!("Starting tournament report service v{}", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::AgeGroups { url } => {
            let pipeline = pipeline(config);
            let listing = pipeline.age_groups(&url).await?;

            println!("Tournament level: {}", listing.level);
            if !listing.level_recognized {
                println!("(no dedicated seeding policy for this level; points order applies)");
            }
            println!("Age groups:");
            for age_group in &listing.age_groups {
                println!("  - {age_group}");
            }
        }
        Commands::Report { url, age_group, sort } => {
            let pipeline = pipeline(config);
            let outcome =
                pipeline.run_report(&url, &age_group, sort.map(Into::into)).await?;

            match outcome {
                PipelineOutcome::Report { path, entrant_count } => {
                    println!(
                        "Report for {entrant_count} entrants saved to {}",
                        path.display()
                    );
                }
                PipelineOutcome::NoEntrants => {
                    println!("No entrants matched age group '{age_group}'; nothing rendered.");
                }
            }
        }
    }

    Ok(())
}

fn pipeline(config: ServiceConfig) -> TournamentPipeline<HttpSessionFactory, HtmlReportRenderer> {
    let renderer = HtmlReportRenderer::new(&config.report.output_dir);
    TournamentPipeline::new(config, HttpSessionFactory::new(), renderer)
}
