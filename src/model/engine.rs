//! The breakup engine.
//!
//! [`BreakupModel`] orchestrates a full fragmentation run: it resolves
//! the event, samples every fragment's characteristic length, A/M ratio,
//! area, and mass into the output tensor, optionally enforces mass
//! conservation, and finally assigns each surviving fragment an ejection
//! velocity on top of the parent state.
//!
//! # Determinism
//!
//! The engine owns no RNG; callers lend one exclusively to [`run`]. For a
//! fixed seed the serial path is bit-reproducible. [`run_parallel`]
//! shards the per-fragment loops across rayon workers, each chunk with an
//! independently seeded stream derived from the caller's seed, and is
//! reproducible for a fixed seed and chunk size (its streams differ from
//! the serial path's, so the two entry points produce different — equally
//! valid — clouds).
//!
//! [`run`]: BreakupModel::run
//! [`run_parallel`]: BreakupModel::run_parallel
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
//! let model = BreakupModel::new(SimulationKind::Explosion, 0.1, false);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let cloud = model.run(&[&sat], &mut rng).unwrap();
//! assert_eq!(cloud.shape(), [238, 7, 3]);
//! ```

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use super::event::{Event, SimulationKind};
use super::sampling;
use super::tensor::{blank_record, broadcast, field, store_vector, DebrisCloud, FragmentRecord};
use super::BreakupError;
use crate::config::SimulationConfig;
use crate::satellite::Satellite;

/// Standard deviation of the ejection-velocity magnitude in log₁₀ space.
const DELTA_V_SIGMA: f64 = 0.4;

/// Fragments per independently seeded RNG stream in the parallel path.
const PARALLEL_CHUNK: usize = 4096;

/// A configured breakup simulation.
#[derive(Debug, Clone, Copy)]
pub struct BreakupModel {
    kind: SimulationKind,
    min_characteristic_length: f64,
    mass_conservation: bool,
}

impl BreakupModel {
    /// Create a model from its three knobs.
    pub fn new(kind: SimulationKind, min_characteristic_length: f64, mass_conservation: bool) -> Self {
        Self {
            kind,
            min_characteristic_length,
            mass_conservation,
        }
    }

    /// Create a model from a loaded configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.simulation_type,
            config.minimal_characteristic_length,
            config.mass_conservation,
        )
    }

    /// The event kind this model simulates.
    pub fn kind(&self) -> SimulationKind {
        self.kind
    }

    /// The smallest characteristic length (m) generated.
    pub fn min_characteristic_length(&self) -> f64 {
        self.min_characteristic_length
    }

    /// Whether mass conservation is enforced.
    pub fn mass_conservation(&self) -> bool {
        self.mass_conservation
    }

    /// Resolve the event descriptor for the given satellites without
    /// sampling anything.
    pub fn event(&self, satellites: &[&dyn Satellite]) -> Result<Event, BreakupError> {
        Event::resolve(self.kind, satellites, self.min_characteristic_length)
    }

    /// Run the breakup and return the debris tensor.
    ///
    /// All validation happens before allocation; once sampling starts the
    /// run cannot fail. Mass conservation may shrink the cloud, in the
    /// extreme to shape `[0, 7, 3]`, which is returned rather than
    /// raised.
    ///
    /// # Errors
    ///
    /// Returns [`BreakupError`] for a non-positive minimum length, a
    /// satellite count that does not match the event kind, or a
    /// non-positive satellite mass.
    pub fn run<R: Rng + ?Sized>(
        &self,
        satellites: &[&dyn Satellite],
        rng: &mut R,
    ) -> Result<DebrisCloud, BreakupError> {
        let event = self.event(satellites)?;
        let position = satellites[0].position();
        let parent_velocity = satellites[0].velocity();

        let records = (0..event.fragment_count())
            .map(|_| self.sample_record(&event, position, rng))
            .collect();
        let mut cloud = DebrisCloud::from_records(records);

        if self.mass_conservation {
            self.conserve_mass(&mut cloud, &event, position, rng);
        }

        for record in cloud.records_mut() {
            assign_velocity(record, &event, parent_velocity, rng);
        }

        Ok(cloud)
    }

    /// Run the breakup with the per-fragment loops sharded across rayon
    /// workers.
    ///
    /// Each chunk of [`PARALLEL_CHUNK`] fragments samples from its own
    /// `StdRng` stream seeded from `seed`, so the result is reproducible
    /// for a fixed seed. Mass conservation stays serial on the master
    /// stream.
    ///
    /// # Errors
    ///
    /// Same as [`BreakupModel::run`].
    pub fn run_parallel(
        &self,
        satellites: &[&dyn Satellite],
        seed: u64,
    ) -> Result<DebrisCloud, BreakupError> {
        let event = self.event(satellites)?;
        let position = satellites[0].position();
        let parent_velocity = satellites[0].velocity();
        let mut master = StdRng::seed_from_u64(seed);

        let chunks = chunk_lengths(event.fragment_count());
        let seeded: Vec<(usize, u64)> = chunks.into_iter().map(|len| (len, master.gen())).collect();

        let records: Vec<FragmentRecord> = seeded
            .into_par_iter()
            .flat_map_iter(|(len, chunk_seed)| {
                let mut rng = StdRng::seed_from_u64(chunk_seed);
                (0..len)
                    .map(|_| self.sample_record(&event, position, &mut rng))
                    .collect::<Vec<_>>()
            })
            .collect();
        let mut cloud = DebrisCloud::from_records(records);

        if self.mass_conservation {
            self.conserve_mass(&mut cloud, &event, position, &mut master);
        }

        let velocity_seeds: Vec<u64> = chunk_lengths(cloud.len())
            .into_iter()
            .map(|_| master.gen())
            .collect();
        cloud
            .records_mut()
            .par_chunks_mut(PARALLEL_CHUNK)
            .zip(velocity_seeds)
            .for_each(|(records, chunk_seed)| {
                let mut rng = StdRng::seed_from_u64(chunk_seed);
                for record in records {
                    assign_velocity(record, &event, parent_velocity, &mut rng);
                }
            });

        Ok(cloud)
    }

    /// Sample one fragment record: position, length, A/M, area, mass.
    /// Velocity is assigned later, after mass conservation has settled
    /// which fragments survive.
    fn sample_record<R: Rng + ?Sized>(
        &self,
        event: &Event,
        position: Vector3<f64>,
        rng: &mut R,
    ) -> FragmentRecord {
        let mut record = blank_record();
        store_vector(&mut record, field::POSITION, position);

        let l_c = sampling::characteristic_length(
            self.min_characteristic_length,
            event.max_characteristic_length(),
            event.power_law_exponent(),
            rng,
        );
        broadcast(&mut record, field::CHARACTERISTIC_LENGTH, l_c);

        let am_ratio = sampling::area_to_mass_ratio(event.sat_kind(), l_c, rng);
        broadcast(&mut record, field::AM_RATIO, am_ratio);

        let area = sampling::cross_sectional_area(l_c);
        broadcast(&mut record, field::AREA, area);
        broadcast(&mut record, field::MASS, area / am_ratio);

        record
    }

    /// Nudge the total fragment mass toward the event's input mass.
    ///
    /// If the initial sum overshoots, fragments are dropped from the tail
    /// until the sum no longer exceeds the target. Otherwise fragments
    /// are synthesized and appended until the sum first exceeds the
    /// target, and the overshooting fragment is dropped again. Either way
    /// the post-condition is a soft lower bound: the sum does not exceed
    /// the input mass, and one more sampled fragment would have. No exact
    /// match is attempted.
    fn conserve_mass<R: Rng + ?Sized>(
        &self,
        cloud: &mut DebrisCloud,
        event: &Event,
        position: Vector3<f64>,
        rng: &mut R,
    ) {
        let mut total = cloud.total_mass();

        if total > event.input_mass() {
            while total > event.input_mass() && cloud.pop().is_some() {
                total = cloud.total_mass();
            }
        } else {
            while event.input_mass() > total {
                cloud.push(self.sample_record(event, position, rng));
                total = cloud.total_mass();
            }
            cloud.pop();
        }
    }
}

/// Assign the final velocity row: parent velocity plus an isotropic
/// ejection whose magnitude is log-normal in the fragment's A/M ratio.
fn assign_velocity<R: Rng + ?Sized>(
    record: &mut FragmentRecord,
    event: &Event,
    parent_velocity: Vector3<f64>,
    rng: &mut R,
) {
    let chi = record[field::AM_RATIO][0].log10();
    let [slope, intercept] = event.delta_velocity_offset();
    let mean = slope * chi + intercept;

    let n = Normal::new(mean, DELTA_V_SIGMA)
        .expect("invalid distribution parameters")
        .sample(rng);
    let speed = 10.0_f64.powf(n);

    let ejection = sampling::sphere_direction(rng) * speed;
    store_vector(record, field::VELOCITY, parent_velocity + ejection);
}

/// Split `count` fragments into chunks of at most [`PARALLEL_CHUNK`].
fn chunk_lengths(count: usize) -> Vec<usize> {
    let mut lengths = vec![PARALLEL_CHUNK; count / PARALLEL_CHUNK];
    if count % PARALLEL_CHUNK != 0 {
        lengths.push(count % PARALLEL_CHUNK);
    }
    lengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satellite::{SatKind, SatelliteRecord};

    fn reference_spacecraft() -> SatelliteRecord {
        SatelliteRecord::new(SatKind::Spacecraft, 839.0)
            .with_position([6778.0, 0.0, 0.0])
            .with_velocity([0.0, 7.5, 0.0])
    }

    fn bitwise_eq(a: &DebrisCloud, b: &DebrisCloud) -> bool {
        a.len() == b.len()
            && a.to_flat()
                .iter()
                .zip(b.to_flat())
                .all(|(x, y)| x.to_bits() == y.to_bits())
    }

    #[test]
    fn explosion_tensor_shape() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.1, false);
        let cloud = model.run(&[&sat], &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(cloud.shape(), [238, 7, 3]);
    }

    #[test]
    fn fragment_rows_are_physical() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.25, false);
        let cloud = model.run(&[&sat], &mut StdRng::seed_from_u64(2)).unwrap();

        let l_max = sat.characteristic_length();
        let floor = sampling::power_law_floor(0.25, l_max, -2.6);
        for i in 0..cloud.len() {
            let l_c = cloud.scalar(i, field::CHARACTERISTIC_LENGTH);
            assert!(l_c >= floor && l_c <= l_max, "l_c {} out of range", l_c);
            assert!(cloud.scalar(i, field::AM_RATIO) > 0.0);
            assert!(cloud.scalar(i, field::AREA) > 0.0);
            assert!(cloud.scalar(i, field::MASS) > 0.0);
        }
    }

    #[test]
    fn scalar_rows_broadcast_across_lanes() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.5, false);
        let cloud = model.run(&[&sat], &mut StdRng::seed_from_u64(3)).unwrap();

        for record in cloud.records() {
            for row in [
                field::CHARACTERISTIC_LENGTH,
                field::AM_RATIO,
                field::AREA,
                field::MASS,
            ] {
                assert_eq!(record[row][0], record[row][1]);
                assert_eq!(record[row][0], record[row][2]);
            }
            assert!(record[field::SENTINEL].iter().all(|v| v.is_nan()));
        }
    }

    #[test]
    fn fragments_inherit_parent_position() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.5, false);
        let cloud = model.run(&[&sat], &mut StdRng::seed_from_u64(4)).unwrap();

        for i in 0..cloud.len() {
            assert_eq!(cloud.vector(i, field::POSITION), sat.position());
        }
    }

    #[test]
    fn velocities_scatter_around_parent() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.5, false);
        let cloud = model.run(&[&sat], &mut StdRng::seed_from_u64(5)).unwrap();

        for i in 0..cloud.len() {
            let ejection = cloud.vector(i, field::VELOCITY) - sat.velocity();
            assert!(ejection.norm() > 0.0, "fragment {} got no ejection", i);
        }
    }

    #[test]
    fn fixed_seed_is_bit_reproducible() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.1, true);

        let a = model.run(&[&sat], &mut StdRng::seed_from_u64(42)).unwrap();
        let b = model.run(&[&sat], &mut StdRng::seed_from_u64(42)).unwrap();
        assert!(bitwise_eq(&a, &b));

        let c = model.run(&[&sat], &mut StdRng::seed_from_u64(43)).unwrap();
        assert!(!bitwise_eq(&a, &c));
    }

    #[test]
    fn mass_conservation_caps_total_mass() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.1, true);
        let cloud = model.run(&[&sat], &mut StdRng::seed_from_u64(6)).unwrap();

        assert!(!cloud.is_empty());
        assert!(
            cloud.total_mass() <= 839.0,
            "total mass {} exceeds input",
            cloud.total_mass()
        );
    }

    #[test]
    fn mass_conservation_can_empty_the_cloud() {
        // A milligram parent with a multi-metre characteristic length:
        // every sampled fragment outweighs the whole input, so
        // conservation strips the cloud bare.
        let sat = SatelliteRecord::new(SatKind::Spacecraft, 1e-6).with_characteristic_length(3.0);
        let model = BreakupModel::new(SimulationKind::Explosion, 0.5, true);
        let cloud = model.run(&[&sat], &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(cloud.shape(), [0, 7, 3]);
    }

    #[test]
    fn collision_run_matches_event_count() {
        let target = SatelliteRecord::new(SatKind::Spacecraft, 1000.0)
            .with_characteristic_length(4.0);
        let projectile = SatelliteRecord::new(SatKind::Spacecraft, 500.0)
            .with_characteristic_length(2.0)
            .with_velocity([10.0, 0.0, 0.0]);

        let model = BreakupModel::new(SimulationKind::Collision, 0.1, false);
        let cloud = model
            .run(&[&target, &projectile], &mut StdRng::seed_from_u64(8))
            .unwrap();
        assert_eq!(cloud.shape(), [17, 7, 3]);
    }

    #[test]
    fn parallel_run_is_reproducible() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.05, false);

        let a = model.run_parallel(&[&sat], 42).unwrap();
        let b = model.run_parallel(&[&sat], 42).unwrap();
        assert!(bitwise_eq(&a, &b));
    }

    #[test]
    fn parallel_run_upholds_fragment_invariants() {
        let sat = reference_spacecraft();
        let model = BreakupModel::new(SimulationKind::Explosion, 0.05, false);
        let serial = model.run(&[&sat], &mut StdRng::seed_from_u64(9)).unwrap();
        let parallel = model.run_parallel(&[&sat], 9).unwrap();

        // Same fragment count; different (equally valid) streams.
        assert_eq!(parallel.shape(), serial.shape());
        for i in 0..parallel.len() {
            assert!(parallel.scalar(i, field::MASS) > 0.0);
            assert!(parallel.scalar(i, field::AM_RATIO) > 0.0);
        }
    }

    #[test]
    fn chunk_lengths_cover_count() {
        assert_eq!(chunk_lengths(0), Vec::<usize>::new());
        assert_eq!(chunk_lengths(10), vec![10]);
        assert_eq!(chunk_lengths(PARALLEL_CHUNK), vec![PARALLEL_CHUNK]);
        assert_eq!(
            chunk_lengths(PARALLEL_CHUNK + 1),
            vec![PARALLEL_CHUNK, 1]
        );
    }
}
