//! Satellite descriptors consumed by the breakup model.
//!
//! The model never constructs or mutates satellites; it only reads the
//! five quantities of the [`Satellite`] capability set. Anything that can
//! answer those five questions can be fragmented: a TLE-derived state, a
//! propagator snapshot, or a plain [`SatelliteRecord`] loaded from a TOML
//! file.
//!
//! # Example
//!
//! ```
//! use breakup::satellite::{SatKind, Satellite, SatelliteRecord};
//!
//! let sat = SatelliteRecord::new(SatKind::Spacecraft, 839.0);
//!
//! // Characteristic length defaults to the mass-derived convention.
//! assert!((sat.characteristic_length() - 3.525).abs() < 0.01);
//! ```

mod record;

pub use record::{SatelliteFile, SatelliteRecord};

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Satellite category used to select breakup distribution coefficients.
///
/// Only rocket bodies have their own coefficient set in the NASA model;
/// spacecraft, small objects, and debris all sample from the spacecraft
/// tables. [`SatKind::is_rocket_body`] is therefore the only distinction
/// the sampling code ever makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SatKind {
    /// Spent upper stage or booster casing
    #[serde(rename = "RB")]
    RocketBody,
    /// Intact payload spacecraft
    #[serde(rename = "SC")]
    Spacecraft,
    /// Small object (sub-8 cm regime)
    #[serde(rename = "SOC")]
    Soc,
    /// Debris from a previous fragmentation
    #[serde(rename = "DEB")]
    Debris,
}

impl SatKind {
    /// Whether this kind selects the rocket-body coefficient tables.
    pub fn is_rocket_body(self) -> bool {
        matches!(self, SatKind::RocketBody)
    }

    /// Short token used in configuration files and CLI arguments.
    pub fn token(self) -> &'static str {
        match self {
            SatKind::RocketBody => "RB",
            SatKind::Spacecraft => "SC",
            SatKind::Soc => "SOC",
            SatKind::Debris => "DEB",
        }
    }
}

impl fmt::Display for SatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error for an unrecognized satellite-type token.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown satellite type '{0}' (expected RB, SC, SOC, or DEB)")]
pub struct ParseSatKindError(pub String);

impl FromStr for SatKind {
    type Err = ParseSatKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RB" => Ok(SatKind::RocketBody),
            "SC" => Ok(SatKind::Spacecraft),
            "SOC" => Ok(SatKind::Soc),
            "DEB" => Ok(SatKind::Debris),
            _ => Err(ParseSatKindError(s.to_string())),
        }
    }
}

/// Read-only capability set the breakup engine consumes.
///
/// Positions are in km, velocities in km/s, mass in kg, and characteristic
/// length in m. Implementors own their state; the engine borrows it for
/// the duration of a single run.
pub trait Satellite {
    /// Position of the satellite at the event epoch (km).
    fn position(&self) -> Vector3<f64>;

    /// Velocity of the satellite at the event epoch (km/s).
    fn velocity(&self) -> Vector3<f64>;

    /// Total mass (kg).
    fn mass(&self) -> f64;

    /// Characteristic length (m).
    ///
    /// Defaults to the mass-derived convention of
    /// [`characteristic_length_from_mass`] when the implementor has no
    /// better estimate.
    fn characteristic_length(&self) -> f64 {
        characteristic_length_from_mass(self.mass())
    }

    /// Satellite category.
    fn kind(&self) -> SatKind;
}

/// Characteristic length (m) of a satellite known only by mass (kg).
///
/// Treats the satellite as a sphere of the standard-model reference
/// density: `L_c = (6m / (92.937·π))^(1/2.26)`.
pub fn characteristic_length_from_mass(mass: f64) -> f64 {
    ((6.0 * mass) / (92.937 * std::f64::consts::PI)).powf(1.0 / 2.26)
}
