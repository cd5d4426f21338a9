use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, LevelFilter};
use plex_toolbox::config::Settings;
use plex_toolbox::logging::setup_logging;
use plex_toolbox::plex::PlexClient;
use plex_toolbox::report::{per_show_table, tv_summary_table};
use plex_toolbox::stats::{ShowStats, TvStats};
use std::process::exit;

#[derive(Parser)]
#[command(name = "plex-tv-stats")]
#[command(about = "Report episode completeness for a Plex TV library", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "plex_config.toml")]
    config: String,

    /// TV library to report on (default: the config file's library, else "TV Shows")
    #[arg(long)]
    library: Option<String>,

    /// Also print the per-series table
    #[arg(long)]
    per_series: bool,

    /// Log level for the log file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging("plex_tv_stats.log", cli.log_level)?;

    let settings = Settings::load(&cli.config)?;
    let plex_settings = settings.plex()?;

    let client = PlexClient::new(&plex_settings.base_url, &plex_settings.token)?;
    if let Err(e) = client.check().await {
        eprintln!("{}", format!("Error connecting to Plex: {e:#}").red());
        exit(1);
    }

    let library_name = cli
        .library
        .as_deref()
        .or(plex_settings.library.as_deref())
        .unwrap_or("TV Shows");

    let sections = client.sections().await?;
    let Some(library) = sections
        .iter()
        .find(|s| s.title == library_name && s.is_show_section())
    else {
        eprintln!(
            "{}",
            format!("Error: TV library '{library_name}' not found").red()
        );
        error!("TV library not found: {library_name}");
        exit(1);
    };

    println!("{}", format!("Processing library: {}", library.title).cyan());

    let shows = client.section_items(library).await?;
    let pb = ProgressBar::new(shows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Processing {}", library.title));

    let mut stats = TvStats::default();
    for show in &shows {
        let episodes = client.show_episodes(&show.rating_key).await?;
        stats.push(ShowStats::from_episodes(&show.title, &episodes));
        pb.inc(1);
    }
    pb.finish_and_clear();
    info!(
        "Processed {} series in library '{}'",
        stats.total_series, library.title
    );

    println!("{}", tv_summary_table(&stats).yellow());
    if cli.per_series {
        println!();
        println!("{}", per_show_table(&stats.shows).yellow());
    }

    Ok(())
}
