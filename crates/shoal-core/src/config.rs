//! Configuration loading and typed config structures for Shoal.
//!
//! The project configuration lives in `shoal-config.yaml` at the workspace
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and a loader that reads the file. Every field has a default,
//! so an empty document (or no file at all) yields the standard model:
//! newborns wait 8 days, adults reproduce every 7 days.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SimulationError;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `shoal-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShoalConfig {
    /// Recurrence parameters.
    #[serde(default)]
    pub model: ModelConfig,

    /// Which horizons to solve and what to record.
    #[serde(default)]
    pub run: RunConfig,

    /// Input histogram and known answers.
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Export settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShoalConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml treats an empty document as null rather than an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Recurrence parameters.
///
/// An individual in age class `i` is `i` days away from reproducing. On
/// reproduction it resets to `repr_cycle` and a newborn appears at
/// `childhood`. Both are inclusive upper indices, so the population vector
/// has `childhood + 1` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ModelConfig {
    /// Age class of a newborn.
    #[serde(default = "default_childhood")]
    pub childhood: usize,

    /// Age class an individual resets to after reproducing.
    #[serde(default = "default_repr_cycle")]
    pub repr_cycle: usize,
}

impl ModelConfig {
    /// Build a model from explicit parameters, rejecting invalid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidModel`] if `repr_cycle > childhood`.
    pub fn new(childhood: usize, repr_cycle: usize) -> Result<Self, SimulationError> {
        let model = Self {
            childhood,
            repr_cycle,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check that the parameters describe a usable population vector.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidModel`] if `repr_cycle > childhood`
    /// or if `childhood + 1` does not fit in `usize`.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.repr_cycle > self.childhood {
            return Err(SimulationError::InvalidModel {
                reason: format!(
                    "repr_cycle ({}) must not exceed childhood ({})",
                    self.repr_cycle, self.childhood
                ),
            });
        }
        if self.childhood == usize::MAX {
            return Err(SimulationError::InvalidModel {
                reason: "childhood is too large".to_owned(),
            });
        }
        Ok(())
    }

    /// Number of age classes (`childhood + 1`).
    pub const fn age_classes(&self) -> usize {
        self.childhood.saturating_add(1)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            childhood: default_childhood(),
            repr_cycle: default_repr_cycle(),
        }
    }
}

/// Which horizons to solve and what to record along the way.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Day counts to derive closed forms for.
    #[serde(default = "default_horizons")]
    pub horizons: Vec<usize>,

    /// Record the per-day coefficient table.
    #[serde(default = "default_true")]
    pub generate_coefficients: bool,

    /// Print the total expression for every simulated day.
    #[serde(default)]
    pub print_expressions: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            horizons: default_horizons(),
            generate_coefficients: true,
            print_expressions: false,
        }
    }
}

/// Input histogram and known answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VerificationConfig {
    /// File with comma-separated initial ages (e.g. `3,4,3,1,2`).
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Expected population per horizon, keyed by day count.
    #[serde(default)]
    pub expected: BTreeMap<usize, u64>,
}

/// Export settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Where to write the JSON report; no export when unset.
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_childhood() -> usize {
    8
}

const fn default_repr_cycle() -> usize {
    6
}

fn default_horizons() -> Vec<usize> {
    vec![80, 256]
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ShoalConfig::default();
        assert_eq!(config.model.childhood, 8);
        assert_eq!(config.model.repr_cycle, 6);
        assert_eq!(config.model.age_classes(), 9);
        assert!(config.model.validate().is_ok());
        assert_eq!(config.run.horizons, vec![80, 256]);
        assert!(config.run.generate_coefficients);
        assert!(!config.run.print_expressions);
        assert!(config.verification.input.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
model:
  childhood: 4
  repr_cycle: 2

run:
  horizons: [10, 20]
  generate_coefficients: false
  print_expressions: true

verification:
  input: "data/sample.txt"
  expected:
    80: 5934
    256: 26984457539

output:
  report_path: "target/report.json"

logging:
  level: "debug"
"#;

        let config = ShoalConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.model, ModelConfig {
            childhood: 4,
            repr_cycle: 2,
        });
        assert_eq!(config.run.horizons, vec![10, 20]);
        assert!(!config.run.generate_coefficients);
        assert!(config.run.print_expressions);
        assert_eq!(
            config.verification.input,
            Some(PathBuf::from("data/sample.txt"))
        );
        assert_eq!(config.verification.expected.get(&256), Some(&26_984_457_539));
        assert_eq!(
            config.output.report_path,
            Some(PathBuf::from("target/report.json"))
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "model:\n  repr_cycle: 3\n";
        let config = ShoalConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.model.repr_cycle, 3);
        // Everything else uses defaults
        assert_eq!(config.model.childhood, 8);
        assert_eq!(config.run.horizons, vec![80, 256]);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = ShoalConfig::parse("");
        assert_eq!(config.ok(), Some(ShoalConfig::default()));
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        let config = ShoalConfig::parse("model: [unclosed");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn model_rejects_repr_cycle_above_childhood() {
        let result = ModelConfig::new(4, 5);
        assert!(matches!(result, Err(SimulationError::InvalidModel { .. })));
    }

    #[test]
    fn model_accepts_equal_bounds() {
        let result = ModelConfig::new(3, 3);
        assert!(result.is_ok());
        let result = ModelConfig::new(0, 0);
        assert_eq!(result.ok().map(|m| m.age_classes()), Some(1));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("shoal-config.yaml");
        if path.exists() {
            let config = ShoalConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
