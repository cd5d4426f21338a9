//! Terminal tables and the JSON results document.

use crate::stats::{MovieStats, SeriesStats, ShowStats, TvStats};
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ResolutionRow {
    #[tabled(rename = "Resolution")]
    resolution: &'static str,
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Percentage")]
    percentage: String,
}

/// Resolution breakdown table in the fixed bucket order.
pub fn movie_table(stats: &MovieStats) -> String {
    let rows: Vec<ResolutionRow> = stats
        .resolutions
        .iter()
        .map(|row| ResolutionRow {
            resolution: row.resolution.name(),
            count: row.count,
            percentage: format!("{:.2}%", row.percentage),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(1), Alignment::right())
        .modify(Columns::single(2), Alignment::right());
    table.to_string()
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Statistic")]
    statistic: &'static str,
    #[tabled(rename = "Value")]
    value: u64,
}

fn summary_table(rows: [(&'static str, u64); 5]) -> String {
    let rows: Vec<SummaryRow> = rows
        .into_iter()
        .map(|(statistic, value)| SummaryRow { statistic, value })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(1), Alignment::right());
    table.to_string()
}

/// Five-counter TV summary from the Sonarr fold.
pub fn series_summary_table(stats: &SeriesStats) -> String {
    summary_table([
        ("Total TV Series", stats.total_series),
        ("Total Episodes", stats.total_episodes),
        ("Available Episodes", stats.available_episodes),
        ("Complete Series", stats.complete_series),
        ("Partial Series", stats.partial_series),
    ])
}

/// Five-counter TV summary from the Plex fold.
pub fn tv_summary_table(stats: &TvStats) -> String {
    summary_table([
        ("Total TV Series", stats.total_series),
        ("Total Episodes", stats.total_episodes),
        ("Available Episodes", stats.available_episodes),
        ("Complete Series", stats.complete_series),
        ("Partial Series", stats.partial_series),
    ])
}

#[derive(Tabled)]
struct ShowRow<'a> {
    #[tabled(rename = "Series")]
    series: &'a str,
    #[tabled(rename = "Episodes")]
    episodes: u64,
    #[tabled(rename = "Available")]
    available: u64,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Per-show detail table for the `--per-series` report.
pub fn per_show_table(shows: &[ShowStats]) -> String {
    let rows: Vec<ShowRow> = shows
        .iter()
        .map(|show| ShowRow {
            series: &show.title,
            episodes: show.total_episodes,
            available: show.available_episodes,
            status: if show.is_complete() {
                "complete"
            } else {
                "partial"
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(1), Alignment::right())
        .modify(Columns::single(2), Alignment::right());
    table.to_string()
}

/// JSON dump for `plex-library-stats --output`. Only the halves that
/// succeeded are present.
#[derive(Serialize)]
pub struct ResultsDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<&'a MovieStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tv_shows: Option<&'a SeriesStats>,
}

impl ResultsDocument<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
