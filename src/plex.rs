//! Thin typed client for the Plex server HTTP API.
//!
//! JSON responses are requested via `Accept: application/json`; every request
//! carries the `X-Plex-Token` header. Only the fields the tools read are
//! modeled.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use url::Url;

pub struct PlexClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct SectionsResponse {
    #[serde(rename = "MediaContainer")]
    media_container: SectionsContainer,
}

#[derive(Debug, Default, Deserialize)]
struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    directory: Vec<Section>,
}

/// One library section (`MediaContainer.Directory` entry).
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Section {
    pub fn is_show_section(&self) -> bool {
        self.kind == "show"
    }
}

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    #[serde(rename = "MediaContainer")]
    media_container: ItemsContainer,
}

#[derive(Debug, Default, Deserialize)]
struct ItemsContainer {
    #[serde(rename = "Metadata", default)]
    metadata: Vec<Item>,
}

/// One library item (movie or show) as listed by `/library/sections/{key}/all`.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    #[serde(rename = "ratingKey")]
    pub rating_key: String,
    pub title: String,
    #[serde(rename = "contentRating")]
    pub content_rating: Option<String>,
    pub year: Option<u32>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct EpisodesResponse {
    #[serde(rename = "MediaContainer")]
    media_container: EpisodesContainer,
}

#[derive(Debug, Default, Deserialize)]
struct EpisodesContainer {
    #[serde(rename = "Metadata", default)]
    metadata: Vec<Episode>,
}

/// One episode from a show's flattened `allLeaves` listing. An episode is
/// available when it has at least one `Media` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub title: String,
    #[serde(rename = "grandparentTitle")]
    pub grandparent_title: Option<String>,
    #[serde(rename = "parentIndex")]
    pub parent_index: Option<u32>,
    pub index: Option<u32>,
    #[serde(rename = "Media", default)]
    pub media: Vec<Media>,
}

impl Episode {
    pub fn is_available(&self) -> bool {
        !self.media.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: Option<u64>,
}

impl PlexClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid Plex base URL: {base_url}"))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut token_value =
            HeaderValue::from_str(token).context("Plex token is not a valid header value")?;
        token_value.set_sensitive(true);
        headers.insert("X-Plex-Token", token_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Append `path` to the base URL. The base may carry a path prefix
    /// (reverse-proxy deployments), so this concatenates rather than joins.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .with_context(|| format!("Invalid Plex endpoint path: {path}"))
    }

    /// `GET /identity`: cheap connectivity and token check before any work.
    pub async fn check(&self) -> Result<()> {
        let url = self.endpoint("/identity")?;
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to reach Plex server")?
            .error_for_status()
            .context("Plex server rejected the identity request")?;
        Ok(())
    }

    pub async fn sections(&self) -> Result<Vec<Section>> {
        let url = self.endpoint("/library/sections")?;
        let response: SectionsResponse = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch library sections")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse library sections")?;
        Ok(response.media_container.directory)
    }

    pub async fn section_items(&self, section: &Section) -> Result<Vec<Item>> {
        let url = self.endpoint(&format!("/library/sections/{}/all", section.key))?;
        let response: ItemsResponse = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch items for library '{}'", section.title))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("Failed to parse items for library '{}'", section.title))?;
        Ok(response.media_container.metadata)
    }

    /// Flattened episode list for one show.
    pub async fn show_episodes(&self, rating_key: &str) -> Result<Vec<Episode>> {
        let url = self.endpoint(&format!("/library/metadata/{rating_key}/allLeaves"))?;
        let response: EpisodesResponse = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch episode list")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse episode list")?;
        Ok(response.media_container.metadata)
    }

    /// Set and lock an item's content rating.
    pub async fn update_content_rating(&self, rating_key: &str, rating: &str) -> Result<()> {
        let mut url = self.endpoint(&format!("/library/metadata/{rating_key}"))?;
        url.query_pairs_mut()
            .append_pair("contentRating.value", rating)
            .append_pair("contentRating.locked", "1");
        self.client
            .put(url)
            .send()
            .await
            .context("Failed to send rating update")?
            .error_for_status()
            .context("Plex server rejected the rating update")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_deserialize() {
        let body = r#"{
            "MediaContainer": {
                "Directory": [
                    {"key": "1", "title": "Movies", "type": "movie"},
                    {"key": "2", "title": "TV Shows", "type": "show"}
                ]
            }
        }"#;
        let response: SectionsResponse = serde_json::from_str(body).unwrap();
        let sections = response.media_container.directory;
        assert_eq!(sections.len(), 2);
        assert!(!sections[0].is_show_section());
        assert!(sections[1].is_show_section());
        assert_eq!(sections[1].key, "2");
    }

    #[test]
    fn empty_container_omits_arrays() {
        let response: ItemsResponse =
            serde_json::from_str(r#"{"MediaContainer": {"size": 0}}"#).unwrap();
        assert!(response.media_container.metadata.is_empty());
    }

    #[test]
    fn item_content_rating_is_optional() {
        let body = r#"{
            "MediaContainer": {
                "Metadata": [
                    {"ratingKey": "101", "title": "Rated", "contentRating": "PG", "year": 2001, "type": "movie"},
                    {"ratingKey": "102", "title": "Unrated", "type": "movie"}
                ]
            }
        }"#;
        let response: ItemsResponse = serde_json::from_str(body).unwrap();
        let items = response.media_container.metadata;
        assert_eq!(items[0].content_rating.as_deref(), Some("PG"));
        assert!(items[1].content_rating.is_none());
    }

    #[test]
    fn episode_availability_follows_media_array() {
        let body = r#"{
            "MediaContainer": {
                "Metadata": [
                    {"title": "Pilot", "grandparentTitle": "Show", "parentIndex": 1, "index": 1,
                     "Media": [{"id": 5}]},
                    {"title": "Missing", "grandparentTitle": "Show", "parentIndex": 1, "index": 2}
                ]
            }
        }"#;
        let response: EpisodesResponse = serde_json::from_str(body).unwrap();
        let episodes = response.media_container.metadata;
        assert!(episodes[0].is_available());
        assert!(!episodes[1].is_available());
    }

    #[test]
    fn trailing_slash_on_base_url_is_tolerated() {
        let client = PlexClient::new("http://localhost:32400/", "token").unwrap();
        let url = client.endpoint("/identity").unwrap();
        assert_eq!(url.as_str(), "http://localhost:32400/identity");
    }

    #[test]
    fn base_url_path_prefix_is_preserved() {
        let client = PlexClient::new("http://localhost/plex", "token").unwrap();
        let url = client.endpoint("/identity").unwrap();
        assert_eq!(url.as_str(), "http://localhost/plex/identity");

        let client = PlexClient::new("http://localhost/plex/", "token").unwrap();
        let url = client.endpoint("/library/sections").unwrap();
        assert_eq!(url.as_str(), "http://localhost/plex/library/sections");
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        assert!(PlexClient::new("not a url", "token").is_err());
    }
}
