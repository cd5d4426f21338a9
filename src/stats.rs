//! Pure folds from API lists into report counters. No I/O here.

use crate::plex::Episode;
use crate::radarr::Movie;
use crate::sonarr::Series;
use serde::Serialize;
use std::fmt;

/// Resolution bucket for the movie quality report, classified by frame width.
/// Variants are declared in report order; the discriminant is the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolutionClass {
    #[serde(rename = "4K")]
    FourK,
    #[serde(rename = "1080p+")]
    FullHd,
    #[serde(rename = "720p")]
    Hd,
    #[serde(rename = "Under 720p")]
    Sd,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ResolutionClass {
    /// Fixed report order.
    pub const ALL: [ResolutionClass; 5] = [
        ResolutionClass::FourK,
        ResolutionClass::FullHd,
        ResolutionClass::Hd,
        ResolutionClass::Sd,
        ResolutionClass::Unknown,
    ];

    /// Bucket a "WIDTHxHEIGHT" resolution string by its width.
    pub fn classify(resolution: Option<&str>) -> Self {
        let width = resolution
            .and_then(|r| r.split('x').next())
            .and_then(|w| w.trim().parse::<u32>().ok());
        match width {
            Some(w) if w >= 3840 => ResolutionClass::FourK,
            Some(w) if w >= 1920 => ResolutionClass::FullHd,
            Some(w) if w >= 1280 => ResolutionClass::Hd,
            Some(_) => ResolutionClass::Sd,
            None => ResolutionClass::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResolutionClass::FourK => "4K",
            ResolutionClass::FullHd => "1080p+",
            ResolutionClass::Hd => "720p",
            ResolutionClass::Sd => "Under 720p",
            ResolutionClass::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ResolutionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the resolution report.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionCount {
    pub resolution: ResolutionClass,
    pub count: u64,
    pub percentage: f64,
}

/// Downloaded-movie counts per resolution bucket.
#[derive(Debug, Clone, Serialize)]
pub struct MovieStats {
    pub total: u64,
    pub resolutions: Vec<ResolutionCount>,
}

impl MovieStats {
    /// Count only movies that are downloaded (`hasFile` plus a file record);
    /// a downloaded movie without media info lands in `Unknown`.
    pub fn from_movies<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Self {
        let mut counts = [0u64; ResolutionClass::ALL.len()];
        for movie in movies {
            if !movie.has_file {
                continue;
            }
            let Some(file) = &movie.movie_file else {
                continue;
            };
            let resolution = file
                .media_info
                .as_ref()
                .and_then(|info| info.resolution.as_deref());
            counts[ResolutionClass::classify(resolution) as usize] += 1;
        }

        let total: u64 = counts.iter().sum();
        let resolutions = ResolutionClass::ALL
            .iter()
            .zip(counts)
            .map(|(&resolution, count)| ResolutionCount {
                resolution,
                count,
                percentage: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                },
            })
            .collect();

        MovieStats { total, resolutions }
    }
}

/// Episode completeness summary across a Sonarr series list.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesStats {
    pub total_series: u64,
    pub total_episodes: u64,
    pub available_episodes: u64,
    pub complete_series: u64,
    pub partial_series: u64,
}

impl SeriesStats {
    pub fn from_series<'a>(series: impl IntoIterator<Item = &'a Series>) -> Self {
        let mut stats = SeriesStats {
            total_series: 0,
            total_episodes: 0,
            available_episodes: 0,
            complete_series: 0,
            partial_series: 0,
        };

        for entry in series {
            stats.total_series += 1;
            let mut complete = true;
            for season in &entry.seasons {
                let Some(season_stats) = &season.statistics else {
                    continue;
                };
                stats.total_episodes += season_stats.total_episode_count;
                stats.available_episodes += season_stats.episode_file_count;
                if season_stats.episode_file_count < season_stats.total_episode_count {
                    complete = false;
                }
            }
            if complete {
                stats.complete_series += 1;
            } else {
                stats.partial_series += 1;
            }
        }

        stats
    }
}

/// Per-show episode tally from a Plex `allLeaves` listing.
#[derive(Debug, Clone, Serialize)]
pub struct ShowStats {
    pub title: String,
    pub total_episodes: u64,
    pub available_episodes: u64,
}

impl ShowStats {
    pub fn from_episodes(title: &str, episodes: &[Episode]) -> Self {
        let available = episodes.iter().filter(|e| e.is_available()).count() as u64;
        ShowStats {
            title: title.to_string(),
            total_episodes: episodes.len() as u64,
            available_episodes: available,
        }
    }

    /// A show with no missing episodes; an empty show counts as complete.
    pub fn is_complete(&self) -> bool {
        self.available_episodes == self.total_episodes
    }
}

/// Library-wide aggregation of [`ShowStats`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct TvStats {
    pub total_series: u64,
    pub total_episodes: u64,
    pub available_episodes: u64,
    pub complete_series: u64,
    pub partial_series: u64,
    pub shows: Vec<ShowStats>,
}

impl TvStats {
    pub fn push(&mut self, show: ShowStats) {
        self.total_series += 1;
        self.total_episodes += show.total_episodes;
        self.available_episodes += show.available_episodes;
        if show.is_complete() {
            self.complete_series += 1;
        } else {
            self.partial_series += 1;
        }
        self.shows.push(show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_buckets_by_width() {
        assert_eq!(
            ResolutionClass::classify(Some("3840x2160")),
            ResolutionClass::FourK
        );
        assert_eq!(
            ResolutionClass::classify(Some("1920x1080")),
            ResolutionClass::FullHd
        );
        assert_eq!(
            ResolutionClass::classify(Some("1280x720")),
            ResolutionClass::Hd
        );
        assert_eq!(
            ResolutionClass::classify(Some("720x576")),
            ResolutionClass::Sd
        );
    }

    #[test]
    fn report_order_matches_discriminants() {
        for (index, class) in ResolutionClass::ALL.iter().enumerate() {
            assert_eq!(*class as usize, index);
        }
    }

    #[test]
    fn classify_handles_garbage() {
        assert_eq!(ResolutionClass::classify(None), ResolutionClass::Unknown);
        assert_eq!(
            ResolutionClass::classify(Some("Unknown")),
            ResolutionClass::Unknown
        );
        assert_eq!(
            ResolutionClass::classify(Some("x1080")),
            ResolutionClass::Unknown
        );
    }

    fn movie(json: &str) -> Movie {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn movie_stats_counts_only_downloaded() {
        let movies = vec![
            movie(r#"{"title": "A", "hasFile": true, "movieFile": {"mediaInfo": {"resolution": "3840x2160"}}}"#),
            movie(r#"{"title": "B", "hasFile": true, "movieFile": {"mediaInfo": {"resolution": "1920x1080"}}}"#),
            movie(r#"{"title": "C", "hasFile": true, "movieFile": {}}"#),
            movie(r#"{"title": "D", "hasFile": false}"#),
            movie(r#"{"title": "E", "hasFile": true}"#),
        ];

        let stats = MovieStats::from_movies(&movies);
        assert_eq!(stats.total, 3);

        let count_of = |class: ResolutionClass| {
            stats
                .resolutions
                .iter()
                .find(|row| row.resolution == class)
                .unwrap()
                .count
        };
        assert_eq!(count_of(ResolutionClass::FourK), 1);
        assert_eq!(count_of(ResolutionClass::FullHd), 1);
        assert_eq!(count_of(ResolutionClass::Unknown), 1);
    }

    #[test]
    fn movie_stats_rows_follow_report_order() {
        let stats = MovieStats::from_movies(&[]);
        assert_eq!(stats.total, 0);
        let order: Vec<_> = stats.resolutions.iter().map(|r| r.resolution).collect();
        assert_eq!(order, ResolutionClass::ALL);
        assert!(stats.resolutions.iter().all(|r| r.percentage == 0.0));
    }

    fn series(json: &str) -> Series {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn series_stats_tallies_completeness() {
        let list = vec![
            series(
                r#"{"title": "Done", "seasons": [
                    {"seasonNumber": 1, "statistics": {"episodeFileCount": 10, "totalEpisodeCount": 10}},
                    {"seasonNumber": 2, "statistics": {"episodeFileCount": 8, "totalEpisodeCount": 8}}
                ]}"#,
            ),
            series(
                r#"{"title": "Gappy", "seasons": [
                    {"seasonNumber": 1, "statistics": {"episodeFileCount": 3, "totalEpisodeCount": 10}}
                ]}"#,
            ),
            series(r#"{"title": "Empty", "seasons": []}"#),
        ];

        let stats = SeriesStats::from_series(&list);
        assert_eq!(stats.total_series, 3);
        assert_eq!(stats.total_episodes, 28);
        assert_eq!(stats.available_episodes, 21);
        assert_eq!(stats.complete_series, 2); // empty series counts as complete
        assert_eq!(stats.partial_series, 1);
    }

    fn episode(available: bool) -> Episode {
        let media = if available { r#"[{"id": 1}]"# } else { "[]" };
        serde_json::from_str(&format!(r#"{{"title": "ep", "Media": {media}}}"#)).unwrap()
    }

    #[test]
    fn show_stats_counts_available_episodes() {
        let episodes = vec![episode(true), episode(true), episode(false)];
        let show = ShowStats::from_episodes("Show", &episodes);
        assert_eq!(show.total_episodes, 3);
        assert_eq!(show.available_episodes, 2);
        assert!(!show.is_complete());

        let empty = ShowStats::from_episodes("Empty", &[]);
        assert!(empty.is_complete());
    }

    #[test]
    fn tv_stats_aggregates_shows() {
        let mut stats = TvStats::default();
        stats.push(ShowStats::from_episodes(
            "Full",
            &[episode(true), episode(true)],
        ));
        stats.push(ShowStats::from_episodes(
            "Partial",
            &[episode(true), episode(false)],
        ));

        assert_eq!(stats.total_series, 2);
        assert_eq!(stats.total_episodes, 4);
        assert_eq!(stats.available_episodes, 3);
        assert_eq!(stats.complete_series, 1);
        assert_eq!(stats.partial_series, 1);
        assert_eq!(stats.shows.len(), 2);
    }
}
