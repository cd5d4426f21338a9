//! Typed client for the Radarr v3 API.

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

pub struct RadarrClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub has_file: bool,
    pub movie_file: Option<MovieFile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFile {
    pub media_info: Option<MediaInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    /// "WIDTHxHEIGHT" string as reported by the service.
    pub resolution: Option<String>,
}

impl RadarrClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid Radarr base URL: {base_url}"))?;
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
        Url::parse(&format!("{base}{path}")).context("Invalid Radarr endpoint")
    }

    /// `GET /api/v3/movie`: the full movie list.
    pub async fn movies(&self) -> Result<Vec<Movie>> {
        let url = self.endpoint("/api/v3/movie")?;
        let movies = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .context("Failed to fetch movie data from Radarr")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse Radarr movie data")?;
        Ok(movies)
    }
}
