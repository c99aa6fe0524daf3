//! Debris-cloud summary statistics.
//!
//! A full debris tensor can run to a million rows; the summary reduces it
//! to the numbers an analyst actually scans first: fragment count, mass
//! bookkeeping, and the distributions of characteristic length, A/M
//! ratio, and ejection speed.

use nalgebra::Vector3;
use serde::Serialize;

use super::event::Event;
use super::tensor::{field, DebrisCloud};

/// JSON-serializable summary of a breakup run.
#[derive(Debug, Clone, Serialize)]
pub struct CloudSummary {
    /// Number of surviving fragments
    pub fragment_count: usize,

    /// Sum of fragment masses (kg)
    pub total_mass_kg: f64,

    /// Mass conservation target (kg)
    pub input_mass_kg: f64,

    /// Collision classification; absent for explosions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catastrophic: Option<bool>,

    /// Characteristic length distribution (m)
    pub characteristic_length_m: QuantitySummary,

    /// Area-to-mass ratio distribution (m²/kg)
    pub area_to_mass_m2_per_kg: QuantitySummary,

    /// Ejection speed distribution relative to the parent (km/s)
    pub ejection_speed_kmps: QuantitySummary,
}

impl CloudSummary {
    /// Summarize a cloud against its event and the parent velocity the
    /// ejections were applied to.
    pub fn new(cloud: &DebrisCloud, event: &Event, parent_velocity: Vector3<f64>) -> Self {
        let lengths: Vec<f64> = (0..cloud.len())
            .map(|i| cloud.scalar(i, field::CHARACTERISTIC_LENGTH))
            .collect();
        let ratios: Vec<f64> = (0..cloud.len())
            .map(|i| cloud.scalar(i, field::AM_RATIO))
            .collect();
        let speeds: Vec<f64> = (0..cloud.len())
            .map(|i| (cloud.vector(i, field::VELOCITY) - parent_velocity).norm())
            .collect();

        Self {
            fragment_count: cloud.len(),
            total_mass_kg: cloud.total_mass(),
            input_mass_kg: event.input_mass(),
            catastrophic: event.catastrophic(),
            characteristic_length_m: QuantitySummary::of(&lengths),
            area_to_mass_m2_per_kg: QuantitySummary::of(&ratios),
            ejection_speed_kmps: QuantitySummary::of(&speeds),
        }
    }
}

/// Summary statistics for one sampled quantity.
#[derive(Debug, Clone, Serialize)]
pub struct QuantitySummary {
    /// Mean value
    pub mean: f64,

    /// Standard deviation
    pub std_dev: f64,

    /// 5th percentile
    pub percentile_5: f64,

    /// Median
    pub percentile_50: f64,

    /// 95th percentile
    pub percentile_95: f64,

    /// Minimum value
    pub min: f64,

    /// Maximum value
    pub max: f64,
}

impl QuantitySummary {
    /// Compute statistics over a sample set. All fields are 0 for an
    /// empty set.
    pub fn of(samples: &[f64]) -> Self {
        Self {
            mean: mean_of(samples),
            std_dev: std_dev_of(samples),
            percentile_5: percentile_of(samples, 5.0),
            percentile_50: percentile_of(samples, 50.0),
            percentile_95: percentile_of(samples, 95.0),
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

fn mean_of(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn std_dev_of(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mean = mean_of(samples);
    let variance =
        samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
    variance.sqrt()
}

/// Calculate percentile of a sample set.
fn percentile_of(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let p = percentile.clamp(0.0, 100.0) / 100.0;
    let idx = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
