//! C2 — Raw Point Extractor: project filtered breaths into processed points.
//!
//! Pure projection; preserves ordering; never drops a breath.

use crate::types::{Breath, ProcessedPoint};

pub fn extract(breaths: &[Breath]) -> Vec<ProcessedPoint> {
    breaths
        .iter()
        .map(|b| ProcessedPoint {
            power_w: b.power_w,
            fat_oxidation: Some(b.fat_ox_g_min),
            cho_oxidation: Some(b.cho_ox_g_min),
            rer: Some(b.rer),
            vo2_rel: b.vo2_rel_ml_kg_min(),
            vo2: Some(b.vo2_ml_min),
            vco2: Some(b.vco2_ml_min),
            hr: Some(b.heart_rate),
            count: None,
        })
        .collect()
}
