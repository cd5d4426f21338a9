use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, LevelFilter};
use plex_toolbox::config::Settings;
use plex_toolbox::logging::setup_logging;
use plex_toolbox::plex::{PlexClient, Section};
use plex_toolbox::rules::RuleSet;
use std::process::exit;

#[derive(Parser)]
#[command(name = "plex-rating-updater")]
#[command(about = "Update Plex content ratings based on title patterns", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "plex_config.toml")]
    config: String,

    /// Path to rating rules YAML file
    #[arg(long, default_value = "rating_rules.yml")]
    rules: String,

    /// Specific library to process (overrides config file)
    #[arg(long)]
    library: Option<String>,

    /// Log level for the log file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging("plex_rating_updater.log", cli.log_level)?;

    let settings = match Settings::load(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format!("Error reading config file: {e:#}").red());
            eprintln!("Make sure your {} contains:", cli.config);
            eprintln!("[plex]");
            eprintln!("base_url = \"http://localhost:32400\"");
            eprintln!("token = \"your_plex_token\"");
            eprintln!("library = \"your_library_name\"  # optional");
            exit(1);
        }
    };
    let plex_settings = settings.plex()?;

    let rules = match RuleSet::load(&cli.rules) {
        Ok(rules) => rules,
        Err(e) => {
            error!("Error loading rating rules: {e:#}");
            eprintln!(
                "{}",
                "No rating rules found. Please check your rules file.".red()
            );
            exit(1);
        }
    };
    if rules.is_empty() {
        eprintln!(
            "{}",
            "No rating rules found. Please check your rules file.".red()
        );
        exit(1);
    }

    let client = PlexClient::new(&plex_settings.base_url, &plex_settings.token)?;
    if let Err(e) = client.check().await {
        eprintln!("{}", format!("Error connecting to Plex: {e:#}").red());
        exit(1);
    }

    println!("{}", "Starting Content Rating Updates...".cyan().bold());

    let library_name = cli
        .library
        .as_deref()
        .or(plex_settings.library.as_deref());
    let total_updates = update_library_ratings(&client, &rules, library_name).await?;

    println!(
        "{}",
        format!("\nUpdates completed: {total_updates} items updated").green()
    );
    Ok(())
}

/// Apply the rules to every item of the named library, or of all libraries
/// when no name is given. Returns the number of items updated.
async fn update_library_ratings(
    client: &PlexClient,
    rules: &RuleSet,
    library_name: Option<&str>,
) -> Result<u64> {
    let mut updates = 0;

    let sections = client.sections().await?;
    let targets: Vec<Section> = match library_name {
        Some(name) => {
            let found: Vec<Section> = sections.into_iter().filter(|s| s.title == name).collect();
            if found.is_empty() {
                eprintln!("{}", format!("Error: Library '{name}' not found").red());
                error!("Library not found: {name}");
                return Ok(updates);
            }
            found
        }
        None => sections,
    };

    for library in targets {
        println!("{}", format!("\nProcessing library: {}", library.title).cyan());

        let items = client.section_items(&library).await?;
        let pb = ProgressBar::new(items.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(format!("Processing {}", library.title));

        for item in &items {
            pb.inc(1);
            let Some(new_rating) = rules.rating_for(&item.title) else {
                continue;
            };
            if item.content_rating.as_deref() == Some(new_rating) {
                continue;
            }
            match client.update_content_rating(&item.rating_key, new_rating).await {
                Ok(()) => {
                    updates += 1;
                    info!("Updated rating for '{}' to {new_rating}", item.title);
                    pb.println(format!(
                        "{}",
                        format!("Updated: {} → {new_rating}", item.title).green()
                    ));
                }
                Err(e) => {
                    error!("Error updating '{}': {e:#}", item.title);
                    pb.println(format!(
                        "{}",
                        format!("Failed to update: {}", item.title).red()
                    ));
                }
            }
        }
        pb.finish_and_clear();
    }

    Ok(updates)
}
