//! C10 — Crossover Detector: find all fat/CHO sign-change points, rank by
//! confidence, and report the primary one.

use crate::types::{CrossoverMarker, ProcessedPoint};

/// All detected crossings, descending by confidence. The primary marker is
/// `all[0]`, or [`CrossoverMarker::NONE`] when `all` is empty.
pub fn detect(smoothed: &[ProcessedPoint]) -> Vec<CrossoverMarker> {
    let diffs: Vec<Option<f64>> = smoothed
        .iter()
        .map(|p| match (p.fat_oxidation, p.cho_oxidation) {
            (Some(fat), Some(cho)) => Some(fat - cho),
            _ => None,
        })
        .collect();

    let mut crossings = Vec::new();
    for i in 0..diffs.len().saturating_sub(1) {
        let (Some(d0), Some(d1)) = (diffs[i], diffs[i + 1]) else {
            continue;
        };
        if d0.signum() == d1.signum() || d0 == 0.0 {
            continue;
        }

        let x0 = smoothed[i].power_w;
        let x1 = smoothed[i + 1].power_w;
        // Zero of the line through (x0, d0) and (x1, d1).
        let t = d0 / (d0 - d1);
        let crossover_power = x0 + t * (x1 - x0);

        let fat0 = smoothed[i].fat_oxidation.expect("diffs[i] is Some");
        let fat1 = smoothed[i + 1].fat_oxidation.expect("diffs[i+1] is Some");
        let common_value = fat0 + t * (fat1 - fat0);

        crossings.push(CrossoverMarker {
            power_w: Some(crossover_power.round() as i32),
            fat_value: Some(common_value),
            cho_value: Some(common_value),
            confidence: Some((d0 - d1).abs()),
        });
    }

    crossings.sort_by(|a, b| {
        b.confidence
            .unwrap_or(0.0)
            .partial_cmp(&a.confidence.unwrap_or(0.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    crossings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(power: f64, fat: f64, cho: f64) -> ProcessedPoint {
        let mut p = ProcessedPoint::new(power);
        p.fat_oxidation = Some(fat);
        p.cho_oxidation = Some(cho);
        p
    }

    #[test]
    fn detects_a_single_crossover_between_flanking_points() {
        let smoothed = vec![
            point(100.0, 0.8, 0.2),
            point(110.0, 0.3, 0.7),
            point(120.0, 0.1, 0.9),
        ];
        let crossings = detect(&smoothed);
        assert_eq!(crossings.len(), 1);
        let power = crossings[0].power_w.unwrap();
        assert!(power > 100 && power < 110);
    }

    #[test]
    fn no_crossing_yields_empty_list() {
        let smoothed = vec![point(100.0, 0.8, 0.2), point(110.0, 0.7, 0.3)];
        assert!(detect(&smoothed).is_empty());
    }

    #[test]
    fn multiple_crossings_ranked_by_confidence() {
        let smoothed = vec![
            point(100.0, 0.5, 0.49), // near-tie crossing ahead, low confidence
            point(110.0, 0.49, 0.5),
            point(120.0, 0.1, 0.9), // high-confidence crossing
            point(130.0, 0.9, 0.1),
        ];
        let crossings = detect(&smoothed);
        assert!(crossings.len() >= 2);
        assert!(crossings[0].confidence.unwrap() >= crossings[1].confidence.unwrap());
    }
}
