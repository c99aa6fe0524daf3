//! NASA standard breakup model for on-orbit fragmentation events.
//!
//! Given one satellite (explosion) or two (collision), the model
//! generates the resulting debris cloud as a dense `[N, 7, 3]` tensor:
//! per fragment a position, characteristic length, area-to-mass ratio,
//! cross-sectional area, mass, and velocity. Fragment counts follow the
//! published power laws, A/M ratios the piecewise log-normal mixtures,
//! and ejection velocities an isotropic log-normal kick on top of the
//! parent state.
//!
//! # Quick Start
//!
//! ```
//! use breakup::model::{BreakupModel, SimulationKind, field};
//! use breakup::satellite::{SatKind, SatelliteRecord};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // An 839 kg spacecraft explodes; generate everything above 10 cm.
//! let sat = SatelliteRecord::new(SatKind::Spacecraft, 839.0)
//!     .with_velocity([0.0, 7.5, 0.0]);
//! let model = BreakupModel::new(SimulationKind::Explosion, 0.1, false);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let cloud = model.run(&[&sat], &mut rng).unwrap();
//!
//! assert_eq!(cloud.shape(), [238, 7, 3]);
//! assert!(cloud.scalar(0, field::MASS) > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`model`]: the breakup engine, event resolution, and output tensor
//! - [`satellite`]: the read-only satellite capability set
//! - [`config`]: the TOML configuration surface
//! - [`cli`], [`output`]: the command-line binary's surface

pub mod cli;
pub mod config;
pub mod model;
pub mod output;
pub mod satellite;

pub use config::SimulationConfig;
pub use model::{BreakupError, BreakupModel, DebrisCloud, Event, SimulationKind};
pub use satellite::{SatKind, Satellite};
