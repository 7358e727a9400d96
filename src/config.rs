//! Configuration management for `ClimaRisk`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::RiskError;
use crate::risk::{ConfidencePenalties, RiskConfig};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `ClimaRisk`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimaRiskConfig {
    /// Weights and alert thresholds handed to the engine
    pub scoring: RiskConfig,
    /// Confidence penalty table
    pub confidence: ConfidencePenalties,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ClimaRiskConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicit path must exist; the default locations are optional.
        let required = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if required || config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(required)
                    .format(config::FileFormat::Toml),
            );
        }

        // CLIMARISK_SCORING__THRESHOLDS__HSI=75 and friends
        builder = builder.add_source(
            Environment::with_prefix("CLIMARISK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", config_file.display()))?;

        let mut config: ClimaRiskConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("climarisk").join("config.toml"))
    }

    /// Apply default values to empty string settings
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.confidence.validate()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RiskError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RiskError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClimaRiskConfig::default();
        assert_eq!(config.scoring.thresholds.hsi, 70);
        assert_eq!(config.confidence.missing_all_pollutants, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = ClimaRiskConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_threshold_range() {
        let mut config = ClimaRiskConfig::default();
        config.scoring.thresholds.aqri = 101;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("cannot exceed 100"));
    }

    #[test]
    fn test_apply_defaults() {
        let mut config = ClimaRiskConfig::default();
        config.logging.level.clear();
        config.apply_defaults();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("climarisk-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[scoring.thresholds]\nhsi = 80\n\n[confidence]\nvery_far_station_penalty = 15\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = ClimaRiskConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.scoring.thresholds.hsi, 80);
        assert_eq!(config.scoring.thresholds.csi, 60);
        assert_eq!(config.confidence, ConfidencePenalties::legacy());
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_from_missing_explicit_path() {
        let path = std::env::temp_dir().join(format!("climarisk-missing-{}.toml", std::process::id()));
        assert!(!path.exists());

        let err = ClimaRiskConfig::load_from_path(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = ClimaRiskConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("climarisk"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
