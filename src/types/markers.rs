//! FatMax and Crossover markers.

use serde::{Deserialize, Serialize};

/// Maximum fat oxidation point and its surrounding zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatMaxMarker {
    #[serde(rename = "power")]
    pub power_w: i32,
    #[serde(rename = "mfo")]
    pub mfo_g_min: f64,
    #[serde(rename = "zone_min")]
    pub zone_min_w: i32,
    #[serde(rename = "zone_max")]
    pub zone_max_w: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfo_ci_lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfo_ci_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_ci_lower: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_ci_upper: Option<i32>,
}

/// A single fat/CHO sign-change point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossoverMarker {
    #[serde(rename = "power")]
    pub power_w: Option<i32>,
    pub fat_value: Option<f64>,
    pub cho_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl CrossoverMarker {
    /// The "no crossing found" marker.
    pub const NONE: Self = Self {
        power_w: None,
        fat_value: None,
        cho_value: None,
        confidence: None,
    };
}

/// Both markers plus the full ranked list of detected crossings.
///
/// `fat_max` is `None` exactly when `FatMaxUndefined` applied (§4.11): the
/// run still completes and `crossover`/`all_crossovers` are still reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetabolicMarkers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_max: Option<FatMaxMarker>,
    pub crossover: CrossoverMarker,
    pub all_crossovers: Vec<CrossoverMarker>,
}

/// VO2max metrics for the optional second (hybrid-protocol) window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vo2MaxMetrics {
    pub vo2_max: f64,
    pub vo2_max_rel: Option<f64>,
    pub hr_max: f64,
    pub time_sec: f64,
}
