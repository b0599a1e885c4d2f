//! Configuration management for the development host.
//!
//! This module handles loading, validation and CLI overrides of the host
//! configuration, stored as TOML. The plugin's own JSON configuration is
//! not read here; that is the plugin's business.

use crate::cli::CliArgs;
use crate::error::HostError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Host configuration loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Host settings
    pub host: HostSettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// What the host serves and which plugin it loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSettings {
    /// Game base directory handed to the plugin
    pub base_dir: String,
    /// Plugin library to load; the built-in plugin when absent
    #[serde(default)]
    pub plugin_path: Option<String>,
    /// Maps cycled through after the plugin loads
    #[serde(default)]
    pub maps: Vec<String>,
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            base_dir: "csgo".to_string(),
            plugin_path: None,
            maps: vec!["surf_utopia_v3".to_string()],
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl HostConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to that
    /// path and returns it.
    pub fn load_from_file(path: &Path) -> Result<Self, HostError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: HostConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = HostConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, toml_content)?;
            info!("Created default host configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(base_dir) = &args.base_dir {
            self.host.base_dir = base_dir.to_string_lossy().to_string();
        }

        if let Some(plugin_path) = &args.plugin_path {
            self.host.plugin_path = Some(plugin_path.to_string_lossy().to_string());
        }

        if !args.maps.is_empty() {
            self.host.maps = args.maps.clone();
        }

        if let Some(log_level) = &args.log_level {
            self.logging.level = log_level.clone();
        }

        if args.json_logs {
            self.logging.json_format = true;
        }
    }

    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(&self.host.base_dir)
    }

    pub fn plugin_path(&self) -> Option<PathBuf> {
        self.host.plugin_path.as_ref().map(PathBuf::from)
    }

    /// Validates the configuration for consistency and correctness.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, or an error string describing the issue.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.base_dir.is_empty() {
            return Err("Base directory cannot be empty".to_string());
        }

        if matches!(&self.host.plugin_path, Some(path) if path.is_empty()) {
            return Err("Plugin path cannot be empty when set".to_string());
        }

        if self.host.maps.iter().any(|map| map.trim().is_empty()) {
            return Err("Map names cannot be empty".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();

        assert_eq!(config.host.base_dir, "csgo");
        assert!(config.host.plugin_path.is_none());
        assert_eq!(config.host.maps, vec!["surf_utopia_v3"]);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");

        let config = HostConfig::load_from_file(&path).unwrap();
        assert_eq!(config, HostConfig::default());

        // Should create the file
        assert!(path.exists());
        assert_eq!(HostConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_existing_file() {
        let toml_content = r#"
[host]
base_dir = "/srv/game/csgo"
plugin_path = "/srv/plugins/libsurf_plugin.so"
maps = ["surf_mesa", "surf_kitsune"]

[logging]
level = "debug"
json_format = true
"#;

        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), toml_content).unwrap();

        let config = HostConfig::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config.base_dir(), PathBuf::from("/srv/game/csgo"));
        assert_eq!(
            config.plugin_path(),
            Some(PathBuf::from("/srv/plugins/libsurf_plugin.so"))
        );
        assert_eq!(config.host.maps, vec!["surf_mesa", "surf_kitsune"]);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_serde_deserialization_with_defaults() {
        let config: HostConfig = toml::from_str("[host]\nbase_dir = \"csgo\"\n").unwrap();

        assert!(config.host.plugin_path.is_none());
        assert!(config.host.maps.is_empty());
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_malformed_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "[host\nbase_dir = 1").unwrap();

        let err = HostConfig::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, HostError::ConfigParse(_)));
    }

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = HostConfig::default();
        let args = CliArgs::try_parse_from([
            "surf-host",
            "--base-dir",
            "/srv/game",
            "--plugin",
            "target/debug/libsurf_plugin.so",
            "--map",
            "surf_beginner",
            "--log-level",
            "trace",
            "--json-logs",
        ])
        .unwrap();

        config.apply_cli(&args);

        assert_eq!(config.host.base_dir, "/srv/game");
        assert_eq!(
            config.host.plugin_path.as_deref(),
            Some("target/debug/libsurf_plugin.so")
        );
        assert_eq!(config.host.maps, vec!["surf_beginner"]);
        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_validation() {
        let mut config = HostConfig::default();
        config.host.base_dir = String::new();
        assert!(config.validate().unwrap_err().contains("Base directory"));

        let mut config = HostConfig::default();
        config.host.plugin_path = Some(String::new());
        assert!(config.validate().is_err());

        let mut config = HostConfig::default();
        config.host.maps.push("  ".to_string());
        assert!(config.validate().is_err());

        let mut config = HostConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("Invalid log level"));
    }

    #[test]
    fn test_validation_valid_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let mut config = HostConfig::default();
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "Level '{}' should be valid", level);
        }
    }
}
