pub mod config;
pub mod logging;
pub mod plex;
pub mod radarr;
pub mod report;
pub mod rules;
pub mod sonarr;
pub mod stats;
