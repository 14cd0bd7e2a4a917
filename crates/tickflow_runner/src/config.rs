// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runner configuration loaded from a RON file.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// How many ticks to run
    pub ticks: u32,
    /// Write indented JSON
    pub pretty: bool,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            ticks: 1,
            pretty: false,
            log_filter: "info".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read config {}: {e}", path.display()))?;
        Self::from_ron(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))
    }

    /// Serialize to RON
    pub fn to_ron(&self) -> anyhow::Result<String> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.ticks, 1);
        assert!(!config.pretty);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = RunnerConfig::from_ron("(ticks: 8)").unwrap();
        assert_eq!(config.ticks, 8);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_serialization() {
        let config = RunnerConfig {
            ticks: 3,
            pretty: true,
            log_filter: "tickflow_graph=trace".to_string(),
        };
        let text = config.to_ron().unwrap();
        assert_eq!(RunnerConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runner.ron");
        std::fs::write(&path, "RunnerConfig(ticks: 5, pretty: true)").unwrap();

        let config = RunnerConfig::load(&path).unwrap();
        assert_eq!(config.ticks, 5);
        assert!(config.pretty);
    }

    #[test]
    fn test_load_reports_bad_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runner.ron");
        std::fs::write(&path, "(ticks: \"many\")").unwrap();
        assert!(RunnerConfig::load(&path).is_err());
    }
}
