//! The NASA standard breakup model.
//!
//! Given one satellite (explosion) or two (collision), the model
//! generates a population of debris fragments as a dense `[N, 7, 3]`
//! tensor of positions, characteristic lengths, A/M ratios, areas,
//! masses, and velocities.
//!
//! # Architecture
//!
//! - [`Event`]: resolved event constants and fragment count
//! - [`BreakupModel`]: the sampling engine
//! - [`DebrisCloud`]: the output tensor
//! - [`CloudSummary`]: reduced statistics for reporting
//! - [`distributions`], [`sampling`]: the coefficient tables and draw
//!   primitives, public for auditing against the published model
//!
//! # Example
//!
//! ```
//! use breakup::model::{BreakupModel, SimulationKind};
//! use breakup::satellite::{SatKind, SatelliteRecord};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let sat = SatelliteRecord::new(SatKind::Spacecraft, 839.0);
//! let model = BreakupModel::new(SimulationKind::Explosion, 1.0, false);
//!
//! let cloud = model.run(&[&sat], &mut StdRng::seed_from_u64(0)).unwrap();
//! assert_eq!(cloud.shape(), [6, 7, 3]);
//! ```

pub mod distributions;
pub mod sampling;

mod engine;
mod event;
mod summary;
mod tensor;

pub use engine::BreakupModel;
pub use event::{Event, ParseSimulationKindError, SimulationKind};
pub use summary::{CloudSummary, QuantitySummary};
pub use tensor::{field, DebrisCloud, FragmentRecord};

/// Errors rejecting a breakup run before any sampling happens.
#[derive(Debug, thiserror::Error)]
pub enum BreakupError {
    /// The configured minimum characteristic length is not positive
    #[error("minimum characteristic length must be positive, got {0} m")]
    InvalidCharacteristicLength(f64),

    /// The satellite count does not match the event kind
    #[error("a {kind} takes {expected} satellite(s), got {got}")]
    WrongSatelliteCount {
        /// Event kind being resolved
        kind: SimulationKind,
        /// Satellites the event kind consumes
        expected: usize,
        /// Satellites actually provided
        got: usize,
    },

    /// A satellite reported a non-positive mass
    #[error("satellite mass must be positive, got {0} kg")]
    NonPositiveMass(f64),
}
