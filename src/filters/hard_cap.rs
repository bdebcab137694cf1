//! C3 — Hard-Cap Filter: null out physiologically impossible oxidation
//! values. Points themselves are retained; only the offending channel is
//! nulled.

use crate::config::Config;
use crate::types::ProcessedPoint;

/// Applies the fat/CHO caps in place, returning `(fat_capped, cho_capped)`
/// counts for warning reporting.
pub fn apply(points: &mut [ProcessedPoint], config: &Config) -> (usize, usize) {
    if !config.physiological_cap_enabled {
        return (0, 0);
    }

    let mut fat_capped = 0;
    let mut cho_capped = 0;
    for point in points.iter_mut() {
        if let Some(fat) = point.fat_oxidation {
            if fat > config.fat_cap {
                point.fat_oxidation = None;
                fat_capped += 1;
            }
        }
        if let Some(cho) = point.cho_oxidation {
            if cho > config.cho_cap {
                point.cho_oxidation = None;
                cho_capped += 1;
            }
        }
    }
    (fat_capped, cho_capped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(fat: f64, cho: f64) -> ProcessedPoint {
        let mut p = ProcessedPoint::new(100.0);
        p.fat_oxidation = Some(fat);
        p.cho_oxidation = Some(cho);
        p
    }

    #[test]
    fn caps_are_applied_independently() {
        let mut points = vec![point(3.0, 1.0), point(0.5, 20.0)];
        let config = Config::default();
        let (fat_capped, cho_capped) = apply(&mut points, &config);
        assert_eq!(fat_capped, 1);
        assert_eq!(cho_capped, 1);
        assert!(points[0].fat_oxidation.is_none());
        assert_eq!(points[0].cho_oxidation, Some(1.0));
        assert_eq!(points[1].fat_oxidation, Some(0.5));
        assert!(points[1].cho_oxidation.is_none());
    }

    #[test]
    fn disabled_cap_is_a_no_op() {
        let mut points = vec![point(100.0, 100.0)];
        let mut config = Config::default();
        config.physiological_cap_enabled = false;
        let (fat_capped, cho_capped) = apply(&mut points, &config);
        assert_eq!((fat_capped, cho_capped), (0, 0));
        assert_eq!(points[0].fat_oxidation, Some(100.0));
    }
}
