//! VO2max metrics for the optional hybrid-protocol second window (§4.12,
//! `SPEC_FULL.md` §B). Independent of the primary window's FatMax/Crossover
//! computation.

use crate::types::{Breath, Vo2MaxMetrics};

pub fn compute(window_breaths: &[Breath]) -> Option<Vo2MaxMetrics> {
    let peak = window_breaths
        .iter()
        .max_by(|a, b| a.vo2_ml_min.partial_cmp(&b.vo2_ml_min).unwrap_or(std::cmp::Ordering::Equal))?;

    let hr_max = window_breaths
        .iter()
        .map(|b| b.heart_rate)
        .fold(f64::MIN, f64::max);

    Some(Vo2MaxMetrics {
        vo2_max: peak.vo2_ml_min,
        vo2_max_rel: peak.vo2_rel_ml_kg_min(),
        hr_max,
        time_sec: peak.time_sec,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    fn breath(t: f64, vo2: f64, hr: f64) -> Breath {
        Breath {
            time_sec: t,
            power_w: 250.0,
            vo2_ml_min: vo2,
            vco2_ml_min: vo2 * 1.05,
            heart_rate: hr,
            rer: 1.05,
            fat_ox_g_min: 0.05,
            cho_ox_g_min: 3.5,
            phase: Some(Phase::Peak),
            body_mass_kg: Some(70.0),
        }
    }

    #[test]
    fn reports_the_peak_vo2_and_its_timing() {
        let breaths = vec![breath(960.0, 3000.0, 170.0), breath(1000.0, 3500.0, 182.0), breath(1040.0, 3200.0, 178.0)];
        let metrics = compute(&breaths).unwrap();
        assert_eq!(metrics.vo2_max, 3500.0);
        assert_eq!(metrics.time_sec, 1000.0);
        assert_eq!(metrics.hr_max, 182.0);
        assert!((metrics.vo2_max_rel.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_window_yields_none() {
        assert!(compute(&[]).is_none());
    }
}
