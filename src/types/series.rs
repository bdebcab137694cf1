//! Processed points and the four series derived from them.

use serde::{Deserialize, Serialize};

/// One workload-indexed point in any of the four processed series.
///
/// Any channel may be null except `power_w`, which is the sort key. `count`
/// is populated for binned points (raw breath count in the bin) and left
/// `None` everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPoint {
    #[serde(rename = "power")]
    pub power_w: f64,
    pub fat_oxidation: Option<f64>,
    pub cho_oxidation: Option<f64>,
    pub rer: Option<f64>,
    pub vo2_rel: Option<f64>,
    pub vo2: Option<f64>,
    pub vco2: Option<f64>,
    pub hr: Option<f64>,
    pub count: Option<u32>,
}

impl ProcessedPoint {
    /// A point with every channel present and `count = None`.
    pub fn new(power_w: f64) -> Self {
        Self {
            power_w,
            fat_oxidation: None,
            cho_oxidation: None,
            rer: None,
            vo2_rel: None,
            vo2: None,
            vco2: None,
            hr: None,
            count: None,
        }
    }
}

/// The four series the pipeline produces, each sorted strictly ascending by
/// `power_w`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessedSeries {
    /// Pre-IQR-filter projection of the filtered breaths (auditable raw view).
    pub raw: Vec<ProcessedPoint>,
    pub binned: Vec<ProcessedPoint>,
    pub smoothed: Vec<ProcessedPoint>,
    pub trend: Vec<ProcessedPoint>,
}
