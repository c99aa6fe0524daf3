//! Simulation configuration.
//!
//! The model itself consumes an already-materialized [`SimulationConfig`];
//! this module is the TOML surface that materializes one. A minimal file
//! looks like:
//!
//! ```toml
//! minimal_characteristic_length = 0.1
//! simulation_type = "EXPLOSION"
//! sat_type = "SC"
//! mass_conservation = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::SimulationKind;
use crate::satellite::SatKind;

/// Configuration for one breakup run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Smallest characteristic length to generate (m, > 0). Drives the
    /// fragment count, so small values mean large clouds.
    pub minimal_characteristic_length: f64,

    /// EXPLOSION or COLLISION.
    pub simulation_type: SimulationKind,

    /// Default category for satellites synthesized without an explicit
    /// type.
    #[serde(default = "default_sat_type")]
    pub sat_type: SatKind,

    /// Whether to trim or grow the cloud until its mass matches the
    /// input mass.
    #[serde(default)]
    pub mass_conservation: bool,
}

fn default_sat_type() -> SatKind {
    SatKind::Spacecraft
}

impl SimulationConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimulationConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the model relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimal_characteristic_length <= 0.0 {
            return Err(ConfigError::NonPositiveLength(
                self.minimal_characteristic_length,
            ));
        }
        Ok(())
    }
}

/// Errors from the configuration surface.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {}", path.display())]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML (including unrecognized
    /// simulation or satellite types)
    #[error("failed to parse config file {}", path.display())]
    Parse {
        /// Offending path
        path: PathBuf,
        /// Underlying parse error
        source: Box<toml::de::Error>,
    },

    /// The minimal characteristic length is not positive
    #[error("minimal_characteristic_length must be positive, got {0}")]
    NonPositiveLength(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config: SimulationConfig = toml::from_str(
            r#"
            minimal_characteristic_length = 0.1
            simulation_type = "COLLISION"
            sat_type = "RB"
            mass_conservation = true
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation_type, SimulationKind::Collision);
        assert_eq!(config.sat_type, SatKind::RocketBody);
        assert!(config.mass_conservation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_minimal_config_uses_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            minimal_characteristic_length = 0.5
            simulation_type = "EXPLOSION"
            "#,
        )
        .unwrap();
        assert_eq!(config.sat_type, SatKind::Spacecraft);
        assert!(!config.mass_conservation);
    }

    #[test]
    fn parse_rejects_unknown_simulation_type() {
        let result = toml::from_str::<SimulationConfig>(
            r#"
            minimal_characteristic_length = 0.1
            simulation_type = "DISASSEMBLY"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_unknown_sat_type() {
        let result = toml::from_str::<SimulationConfig>(
            r#"
            minimal_characteristic_length = 0.1
            simulation_type = "EXPLOSION"
            sat_type = "STATION"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_unknown_field() {
        let result = toml::from_str::<SimulationConfig>(
            r#"
            minimal_characteristic_length = 0.1
            simulation_type = "EXPLOSION"
            max_fragments = 10
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_non_positive_length() {
        let config: SimulationConfig = toml::from_str(
            r#"
            minimal_characteristic_length = 0.0
            simulation_type = "EXPLOSION"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveLength(_))
        ));
    }
}
