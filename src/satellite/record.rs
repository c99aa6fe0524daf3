//! Concrete satellite records loadable from TOML files.

use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;

use super::{characteristic_length_from_mass, SatKind, Satellite};

/// A plain-data satellite descriptor.
///
/// This is the implementation of [`Satellite`] used by the CLI and tests.
/// Position and velocity default to the origin, and characteristic length
/// defaults to the mass-derived convention, so a record can be as small as
/// a bare mass.
///
/// # Example
///
/// ```
/// use breakup::satellite::{SatKind, Satellite, SatelliteRecord};
///
/// let sat = SatelliteRecord::new(SatKind::RocketBody, 1200.0)
///     .with_velocity([7.3, 0.0, 0.5])
///     .with_characteristic_length(4.0);
///
/// assert_eq!(sat.characteristic_length(), 4.0);
/// assert_eq!(sat.velocity().x, 7.3);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteRecord {
    /// Optional label used in CLI output.
    #[serde(default)]
    pub name: Option<String>,

    /// Satellite category token (RB, SC, SOC, DEB). May be omitted in
    /// files and filled from the configured default.
    #[serde(rename = "type", default)]
    kind: Option<SatKind>,

    /// Mass in kg.
    mass: f64,

    /// Position in km.
    #[serde(default = "origin")]
    position: [f64; 3],

    /// Velocity in km/s.
    #[serde(default = "origin")]
    velocity: [f64; 3],

    /// Characteristic length in m. Derived from mass when absent.
    #[serde(default)]
    characteristic_length: Option<f64>,
}

fn origin() -> [f64; 3] {
    [0.0; 3]
}

impl SatelliteRecord {
    /// Create a record at the origin with a mass-derived characteristic
    /// length.
    pub fn new(kind: SatKind, mass: f64) -> Self {
        Self {
            name: None,
            kind: Some(kind),
            mass,
            position: [0.0; 3],
            velocity: [0.0; 3],
            characteristic_length: None,
        }
    }

    /// Fill in the configured default category if the record came from a
    /// file without an explicit `type`.
    pub fn with_default_kind(mut self, kind: SatKind) -> Self {
        if self.kind.is_none() {
            self.kind = Some(kind);
        }
        self
    }

    /// Set the position (km).
    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }

    /// Set the velocity (km/s).
    pub fn with_velocity(mut self, velocity: [f64; 3]) -> Self {
        self.velocity = velocity;
        self
    }

    /// Override the mass-derived characteristic length (m).
    pub fn with_characteristic_length(mut self, length: f64) -> Self {
        self.characteristic_length = Some(length);
        self
    }
}

impl Satellite for SatelliteRecord {
    fn position(&self) -> Vector3<f64> {
        Vector3::from(self.position)
    }

    fn velocity(&self) -> Vector3<f64> {
        Vector3::from(self.velocity)
    }

    fn mass(&self) -> f64 {
        self.mass
    }

    fn characteristic_length(&self) -> f64 {
        self.characteristic_length
            .unwrap_or_else(|| characteristic_length_from_mass(self.mass))
    }

    fn kind(&self) -> SatKind {
        self.kind.unwrap_or(SatKind::Spacecraft)
    }
}

/// A TOML file holding one `[[satellite]]` table per satellite.
///
/// ```toml
/// [[satellite]]
/// name = "payload"
/// type = "SC"
/// mass = 839.0
/// velocity = [7.5, 0.0, 0.0]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteFile {
    /// Satellites in event order (target first for collisions).
    pub satellite: Vec<SatelliteRecord>,
}

impl SatelliteFile {
    /// Load satellite records from a TOML file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read satellite file: {}", path.display()))?;
        let file: SatelliteFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse satellite file: {}", path.display()))?;
        Ok(file)
    }
}
