//! Shared TOML configuration for all of the toolbox binaries.
//!
//! One file (`plex_config.toml` by default) holds the connection settings for
//! every service. Sections are optional so that a config can carry only what
//! the tools in use actually need.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub plex: Option<PlexSettings>,
    pub radarr: Option<ArrSettings>,
    pub sonarr: Option<ArrSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlexSettings {
    pub base_url: String,
    pub token: String,
    pub library: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArrSettings {
    pub base_url: String,
    pub api_key: String,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(settings)
    }

    pub fn plex(&self) -> Result<&PlexSettings> {
        self.plex
            .as_ref()
            .context("Config file has no [plex] section")
    }

    pub fn radarr(&self) -> Result<&ArrSettings> {
        self.radarr
            .as_ref()
            .context("Config file has no [radarr] section")
    }

    pub fn sonarr(&self) -> Result<&ArrSettings> {
        self.sonarr
            .as_ref()
            .context("Config file has no [sonarr] section")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let settings: Settings = toml::from_str(
            r#"
            [plex]
            base_url = "http://localhost:32400"
            token = "abc123"
            library = "Movies"

            [radarr]
            base_url = "http://localhost:7878"
            api_key = "radarr-key"

            [sonarr]
            base_url = "http://localhost:8989"
            api_key = "sonarr-key"
            "#,
        )
        .unwrap();

        let plex = settings.plex().unwrap();
        assert_eq!(plex.base_url, "http://localhost:32400");
        assert_eq!(plex.token, "abc123");
        assert_eq!(plex.library.as_deref(), Some("Movies"));
        assert_eq!(settings.radarr().unwrap().api_key, "radarr-key");
        assert_eq!(settings.sonarr().unwrap().base_url, "http://localhost:8989");
    }

    #[test]
    fn partial_config_is_valid() {
        let settings: Settings = toml::from_str(
            r#"
            [plex]
            base_url = "http://localhost:32400"
            token = "abc123"
            "#,
        )
        .unwrap();

        assert!(settings.plex().is_ok());
        assert!(settings.plex().unwrap().library.is_none());
        assert!(settings.radarr().is_err());
        assert!(settings.sonarr().is_err());
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let err = Settings::load("/nonexistent/plex_config.toml").unwrap_err();
        assert!(err.to_string().contains("plex_config.toml"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[radarr]").unwrap();
        writeln!(file, "base_url = \"http://localhost:7878\"").unwrap();
        writeln!(file, "api_key = \"key\"").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.radarr().unwrap().base_url, "http://localhost:7878");
    }
}
