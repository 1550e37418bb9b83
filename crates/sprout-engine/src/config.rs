use serde::{Deserialize, Serialize};

/// Configuration for an [`Engine`](crate::Engine).
///
/// Every field has a default, so a partial TOML or JSON document
/// deserializes into a complete configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Author recorded on new commits.
    pub author: String,
    /// Branch created by `git init`.
    pub default_branch: String,
    /// Number of timeline events kept before the oldest is evicted.
    pub timeline_capacity: usize,
    /// Commits shown by `git log` without `-n`.
    pub log_limit: usize,
    /// Scenario loaded when the engine starts.
    pub starting_scenario: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            author: "you".to_string(),
            default_branch: "main".to_string(),
            timeline_capacity: 100,
            log_limit: 10,
            starting_scenario: "starter".to_string(),
        }
    }
}

impl EngineConfig {
    /// Same configuration with a different commit author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Same configuration starting from another scenario.
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.starting_scenario = scenario.into();
        self
    }
}
