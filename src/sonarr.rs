//! Typed client for the Sonarr v3 API.

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

pub struct SonarrClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub title: String,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_number: u32,
    pub statistics: Option<SeasonStatistics>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStatistics {
    #[serde(default)]
    pub episode_file_count: u64,
    #[serde(default)]
    pub total_episode_count: u64,
}

impl SonarrClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid Sonarr base URL: {base_url}"))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Append `path` to the base URL, preserving any path prefix the
    /// configured base carries.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}")).context("Invalid Sonarr endpoint")
    }

    /// `GET /api/v3/series`: the full series list with per-season statistics.
    pub async fn series(&self) -> Result<Vec<Series>> {
        let url = self.endpoint("/api/v3/series")?;
        let series = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .context("Failed to fetch TV data from Sonarr")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse Sonarr series data")?;
        Ok(series)
    }
}
