//! Fragmentation event resolution.
//!
//! A [`SimulationKind`] plus the involved satellites resolve into an
//! [`Event`]: the regime-dependent constants (power-law exponent, ΔV
//! offsets, effective satellite class) together with the event's masses
//! and initial fragment count. All input validation happens here, before
//! the engine allocates anything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BreakupError;
use crate::satellite::{SatKind, Satellite};

/// Scaling factor `S` of the explosion fragment-count law. Unity for the
/// standard model.
const EXPLOSION_SCALING: f64 = 1.0;

/// Specific-energy threshold separating catastrophic from
/// non-catastrophic collisions (J/g).
const CATASTROPHIC_THRESHOLD: f64 = 40.0;

/// The kind of fragmentation event being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationKind {
    /// A single satellite fragments in place.
    #[serde(rename = "EXPLOSION")]
    Explosion,
    /// Two satellites collide.
    #[serde(rename = "COLLISION")]
    Collision,
}

impl SimulationKind {
    /// Number of satellites the event consumes.
    pub fn satellite_count(self) -> usize {
        match self {
            SimulationKind::Explosion => 1,
            SimulationKind::Collision => 2,
        }
    }
}

impl fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationKind::Explosion => f.write_str("explosion"),
            SimulationKind::Collision => f.write_str("collision"),
        }
    }
}

/// Collapse the four satellite categories into the two the distribution
/// tables distinguish.
fn effective_kind(kind: SatKind) -> SatKind {
    if kind.is_rocket_body() {
        SatKind::RocketBody
    } else {
        SatKind::Spacecraft
    }
}

/// Error for an unrecognized simulation-type token.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown simulation type '{0}' (expected EXPLOSION or COLLISION)")]
pub struct ParseSimulationKindError(pub String);

impl FromStr for SimulationKind {
    type Err = ParseSimulationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EXPLOSION" => Ok(SimulationKind::Explosion),
            "COLLISION" => Ok(SimulationKind::Collision),
            _ => Err(ParseSimulationKindError(s.to_string())),
        }
    }
}

/// A resolved fragmentation event.
///
/// Holds everything the sampling pipeline needs and nothing it doesn't:
/// the satellites themselves are consulted only once, at resolution time
/// (except for the parent position and velocity, which the engine reads
/// directly).
#[derive(Debug, Clone, Copy)]
pub struct Event {
    kind: SimulationKind,
    power_law_exponent: f64,
    delta_velocity_offset: [f64; 2],
    max_characteristic_length: f64,
    sat_kind: SatKind,
    input_mass: f64,
    fragment_count: usize,
    catastrophic: Option<bool>,
}

impl Event {
    /// Resolve an event from its kind and satellites.
    ///
    /// # Errors
    ///
    /// Returns [`BreakupError`] if the minimum characteristic length is
    /// not positive, the satellite count does not match the event kind,
    /// or any satellite mass is not positive.
    pub fn resolve(
        kind: SimulationKind,
        satellites: &[&dyn Satellite],
        min_characteristic_length: f64,
    ) -> Result<Self, BreakupError> {
        if min_characteristic_length <= 0.0 {
            return Err(BreakupError::InvalidCharacteristicLength(
                min_characteristic_length,
            ));
        }
        if satellites.len() != kind.satellite_count() {
            return Err(BreakupError::WrongSatelliteCount {
                kind,
                expected: kind.satellite_count(),
                got: satellites.len(),
            });
        }
        for sat in satellites {
            if sat.mass() <= 0.0 {
                return Err(BreakupError::NonPositiveMass(sat.mass()));
            }
        }

        match kind {
            SimulationKind::Explosion => Ok(Self::resolve_explosion(
                satellites[0],
                min_characteristic_length,
            )),
            SimulationKind::Collision => Ok(Self::resolve_collision(
                satellites[0],
                satellites[1],
                min_characteristic_length,
            )),
        }
    }

    fn resolve_explosion(sat: &dyn Satellite, min_characteristic_length: f64) -> Self {
        let count = 6.0 * EXPLOSION_SCALING * min_characteristic_length.powf(-1.6);

        Self {
            kind: SimulationKind::Explosion,
            power_law_exponent: -2.6,
            delta_velocity_offset: [0.2, 1.85],
            max_characteristic_length: sat.characteristic_length(),
            sat_kind: effective_kind(sat.kind()),
            input_mass: sat.mass(),
            fragment_count: count as usize,
            catastrophic: None,
        }
    }

    fn resolve_collision(
        a: &dyn Satellite,
        b: &dyn Satellite,
        min_characteristic_length: f64,
    ) -> Self {
        // Order the pair so `target` carries the larger characteristic
        // length; the classification formula treats the other satellite
        // as the projectile.
        let (target, projectile) = if b.characteristic_length() > a.characteristic_length() {
            (b, a)
        } else {
            (a, b)
        };

        let sat_kind = if a.kind().is_rocket_body() || b.kind().is_rocket_body() {
            SatKind::RocketBody
        } else {
            SatKind::Spacecraft
        };

        let delta_velocity = (target.velocity() - projectile.velocity()).norm();
        let catastrophic_ratio = (projectile.mass() * delta_velocity * delta_velocity)
            / (2.0 * target.mass() * 1000.0);

        let catastrophic = catastrophic_ratio >= CATASTROPHIC_THRESHOLD;
        // Non-catastrophic impacts only involve the projectile's momentum
        // worth of target mass; the count law sees that effective mass,
        // while conservation always targets the full system mass.
        let count_mass = if catastrophic {
            target.mass() + projectile.mass()
        } else {
            projectile.mass() * delta_velocity / 1000.0
        };

        let count = 0.1 * count_mass.powf(0.75) * min_characteristic_length.powf(-1.71);

        Self {
            kind: SimulationKind::Collision,
            power_law_exponent: -2.71,
            delta_velocity_offset: [0.9, 2.9],
            max_characteristic_length: target
                .characteristic_length()
                .max(projectile.characteristic_length()),
            sat_kind,
            input_mass: target.mass() + projectile.mass(),
            fragment_count: count as usize,
            catastrophic: Some(catastrophic),
        }
    }

    /// The event kind.
    pub fn kind(&self) -> SimulationKind {
        self.kind
    }

    /// Exponent of the characteristic-length power law (< −1).
    pub fn power_law_exponent(&self) -> f64 {
        self.power_law_exponent
    }

    /// `[slope, intercept]` of the ejection-velocity mean in `log₁₀(A/M)`.
    pub fn delta_velocity_offset(&self) -> [f64; 2] {
        self.delta_velocity_offset
    }

    /// Largest characteristic length (m) a fragment can take.
    pub fn max_characteristic_length(&self) -> f64 {
        self.max_characteristic_length
    }

    /// Effective satellite class selecting the distribution tables.
    pub fn sat_kind(&self) -> SatKind {
        self.sat_kind
    }

    /// Total system mass (kg) targeted by mass conservation.
    pub fn input_mass(&self) -> f64 {
        self.input_mass
    }

    /// Number of fragments to generate before mass conservation.
    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    /// Collision classification; `None` for explosions.
    pub fn catastrophic(&self) -> Option<bool> {
        self.catastrophic
    }
}
