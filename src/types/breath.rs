//! Breath-by-breath input record.

use serde::{Deserialize, Serialize};

/// Respiratory phase tag, when the caller's cart software supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Rest,
    Warmup,
    Exercise,
    Peak,
    Recovery,
}

/// One breath-by-breath (BxB) measurement.
///
/// Immutable and owned by the caller — the core only ever borrows slices of
/// breaths. `time_sec` is monotonic and unique within a test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breath {
    /// Seconds since test start.
    pub time_sec: f64,
    /// Workload in watts.
    pub power_w: f64,
    /// Oxygen uptake, mL/min.
    pub vo2_ml_min: f64,
    /// Carbon dioxide output, mL/min.
    pub vco2_ml_min: f64,
    pub heart_rate: f64,
    /// Respiratory exchange ratio, VCO2/VO2.
    pub rer: f64,
    /// Pre-computed fat oxidation, g/min.
    pub fat_ox_g_min: f64,
    /// Pre-computed carbohydrate oxidation, g/min.
    pub cho_ox_g_min: f64,
    pub phase: Option<Phase>,
    /// Subject body mass in kg, used to derive VO2/kg.
    pub body_mass_kg: Option<f64>,
}

impl Breath {
    /// VO2 relative to body mass (mL/kg/min), when mass is known.
    pub fn vo2_rel_ml_kg_min(&self) -> Option<f64> {
        self.body_mass_kg
            .filter(|m| *m > 0.0)
            .map(|m| self.vo2_ml_min / m)
    }
}
