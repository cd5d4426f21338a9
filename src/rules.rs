//! Rating rules: an ordered list of (substring pattern, rating) pairs loaded
//! from a YAML file. The first rule whose pattern appears in a title wins.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct RatingRule {
    pub pattern: String,
    pub rating: String,
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet(Vec<RatingRule>);

#[derive(Debug, Default, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rating_rules: Vec<RatingRule>,
}

impl RuleSet {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let file: RulesFile = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;
        Ok(RuleSet(file.rating_rules))
    }

    /// First rule whose pattern is contained in the title, case-insensitively.
    /// Empty patterns never match.
    pub fn rating_for(&self, title: &str) -> Option<&str> {
        let title = title.to_lowercase();
        self.0
            .iter()
            .find(|rule| !rule.pattern.is_empty() && title.contains(&rule.pattern.to_lowercase()))
            .map(|rule| rule.rating.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
