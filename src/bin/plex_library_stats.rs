use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::{error, LevelFilter};
use plex_toolbox::config::{ArrSettings, Settings};
use plex_toolbox::logging::setup_logging;
use plex_toolbox::radarr::RadarrClient;
use plex_toolbox::report::{movie_table, series_summary_table, ResultsDocument};
use plex_toolbox::sonarr::SonarrClient;
use plex_toolbox::stats::{MovieStats, SeriesStats};
use std::fs;

#[derive(Parser)]
#[command(name = "plex-library-stats")]
#[command(about = "Generate media library statistics from Radarr and Sonarr", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "plex_config.toml")]
    config: String,

    /// Output file for JSON results
    #[arg(long)]
    output: Option<String>,

    /// Log level for the log file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

async fn movie_stats(radarr: &ArrSettings) -> Result<MovieStats> {
    let client = RadarrClient::new(&radarr.base_url, &radarr.api_key)?;
    let movies = client.movies().await?;
    let pb = progress_bar(movies.len() as u64, "Processing movies");
    let stats = MovieStats::from_movies(movies.iter().progress_with(pb));
    Ok(stats)
}

async fn tv_stats(sonarr: &ArrSettings) -> Result<SeriesStats> {
    let client = SonarrClient::new(&sonarr.base_url, &sonarr.api_key)?;
    let series = client.series().await?;
    let pb = progress_bar(series.len() as u64, "Processing TV series");
    let stats = SeriesStats::from_series(series.iter().progress_with(pb));
    Ok(stats)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging("plex_library_stats.log", cli.log_level)?;

    let settings = Settings::load(&cli.config)?;
    let radarr = settings.radarr()?;
    let sonarr = settings.sonarr()?;

    println!("{}", "Movie Statistics:".cyan().bold());
    let movies = match movie_stats(radarr).await {
        Ok(stats) => {
            println!(
                "{}",
                format!("Total Movies (downloaded): {}", stats.total).green()
            );
            println!("{}", movie_table(&stats).yellow());
            Some(stats)
        }
        Err(e) => {
            error!("Error fetching movie data: {e:#}");
            println!("{}", "Failed to retrieve movie statistics.".red());
            None
        }
    };

    println!("\n{}", "TV Show Statistics:".cyan().bold());
    let tv_shows = match tv_stats(sonarr).await {
        Ok(stats) => {
            println!("{}", series_summary_table(&stats).yellow());
            Some(stats)
        }
        Err(e) => {
            error!("Error fetching TV data: {e:#}");
            println!("{}", "Failed to retrieve TV show statistics.".red());
            None
        }
    };

    if let Some(output) = &cli.output {
        let document = ResultsDocument {
            movies: movies.as_ref(),
            tv_shows: tv_shows.as_ref(),
        };
        fs::write(output, document.to_json()?)
            .with_context(|| format!("Failed to write results to {output}"))?;
        println!("{}", format!("Results saved to {output}").green());
    }

    Ok(())
}
