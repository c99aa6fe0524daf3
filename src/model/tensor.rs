//! Dense `[N, 7, 3]` debris tensor.
//!
//! Downstream propagators consume the breakup output as a dense f64
//! tensor: one 7×3 record per fragment, scalar quantities broadcast
//! across the last axis so that every consumer can index `[:, k, 0]`
//! without caring which rows are vectors. The layout is legacy but it is
//! the observable interface, so it is preserved exactly.

use nalgebra::Vector3;
use serde::Serialize;

/// Row indices within a fragment record.
pub mod field {
    /// Reserved sentinel row, left as NaN.
    pub const SENTINEL: usize = 0;
    /// Fragment position (km).
    pub const POSITION: usize = 1;
    /// Characteristic length (m), broadcast.
    pub const CHARACTERISTIC_LENGTH: usize = 2;
    /// Area-to-mass ratio (m²/kg), broadcast.
    pub const AM_RATIO: usize = 3;
    /// Average cross-sectional area (m²), broadcast.
    pub const AREA: usize = 4;
    /// Mass (kg), broadcast.
    pub const MASS: usize = 5;
    /// Velocity (km/s).
    pub const VELOCITY: usize = 6;
}

/// One fragment record: 7 rows of 3 lanes.
pub type FragmentRecord = [[f64; 3]; 7];

/// A blank record with every lane set to NaN.
pub fn blank_record() -> FragmentRecord {
    [[f64::NAN; 3]; 7]
}

/// The debris cloud produced by a breakup run.
///
/// Owned exclusively by the engine while a run is in progress and handed
/// to the caller on return. Records are stored row-major, so
/// [`DebrisCloud::records`] exposes exactly the `[N, 7, 3]` layout.
#[derive(Debug, Clone, Serialize)]
pub struct DebrisCloud {
    records: Vec<FragmentRecord>,
}

impl DebrisCloud {
    /// An empty cloud of shape `[0, 7, 3]`.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// A cloud built from pre-sampled records.
    pub fn from_records(records: Vec<FragmentRecord>) -> Self {
        Self { records }
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the cloud holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tensor shape `[N, 7, 3]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.records.len(), 7, 3]
    }

    /// All records in `[N, 7, 3]` layout.
    pub fn records(&self) -> &[FragmentRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [FragmentRecord] {
        &mut self.records
    }

    pub(crate) fn push(&mut self, record: FragmentRecord) {
        self.records.push(record);
    }

    pub(crate) fn pop(&mut self) -> Option<FragmentRecord> {
        self.records.pop()
    }

    /// Scalar quantity of fragment `i` (lane 0 of the row).
    pub fn scalar(&self, i: usize, row: usize) -> f64 {
        self.records[i][row][0]
    }

    /// Vector quantity of fragment `i`.
    pub fn vector(&self, i: usize, row: usize) -> Vector3<f64> {
        Vector3::from(self.records[i][row])
    }

    /// Sum of all fragment masses (kg).
    pub fn total_mass(&self) -> f64 {
        self.records.iter().map(|r| r[field::MASS][0]).sum()
    }

    /// Flatten to a contiguous `N·7·3` buffer, row-major.
    pub fn to_flat(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.records.len() * 21);
        for record in &self.records {
            for row in record {
                flat.extend_from_slice(row);
            }
        }
        flat
    }
}

/// Broadcast a scalar across all three lanes of a record row.
pub(crate) fn broadcast(record: &mut FragmentRecord, row: usize, value: f64) {
    record[row] = [value; 3];
}

/// Store a vector quantity in a record row.
pub(crate) fn store_vector(record: &mut FragmentRecord, row: usize, value: Vector3<f64>) {
    record[row] = [value.x, value.y, value.z];
}
