//! Pipeline Regression Tests
//!
//! End-to-end scenarios run through `analyze()` against synthetic ramp-test
//! breath streams, exercising the window -> filter -> bin -> smooth -> trend
//! -> marker chain as a whole rather than stage-by-stage.

use metabolism_core::config::{Config, ProtocolType};
use metabolism_core::error::AnalysisError;
use metabolism_core::types::{Breath, Phase};
use metabolism_core::analyze;

/// A clean 0->peak_power W linear ramp over `duration_sec`, one breath every
/// `duration_sec / n` seconds.
fn ramp(n: usize, duration_sec: f64, peak_power: f64) -> Vec<Breath> {
    (0..n)
        .map(|i| {
            let frac = i as f64 / (n - 1) as f64;
            let power = peak_power * frac;
            let vo2 = 400.0 + power * 10.0;
            let vco2 = vo2 * (0.80 + 0.25 * frac);
            let fat = (0.5 - 0.45 * (frac - 0.3).abs()).max(0.0);
            let cho = (0.3 + 3.5 * frac).max(0.0);
            Breath {
                time_sec: frac * duration_sec,
                power_w: power,
                vo2_ml_min: vo2,
                vco2_ml_min: vco2,
                heart_rate: 70.0 + 100.0 * frac,
                rer: (vco2 / vo2).clamp(0.7, 1.3),
                fat_ox_g_min: fat,
                cho_ox_g_min: cho,
                phase: Some(if frac < 0.02 { Phase::Warmup } else { Phase::Exercise }),
                body_mass_kg: Some(75.0),
            }
        })
        .collect()
}

/// S1 — Ramp, clean: auto-window, ~30 bins over a 300 W span, FatMax inside
/// a broad physiological band, crossover strictly above FatMax.
#[test]
fn s1_ramp_clean_yields_fatmax_below_crossover() {
    let breaths = ramp(1200, 1200.0, 300.0);
    let config = Config::default();
    let result = analyze(&breaths, &config, 7).unwrap();

    assert!(result.trim_range.auto_detected);
    assert!(result.processed_series.binned.len() >= 20 && result.processed_series.binned.len() <= 31);

    let fat_max = result.metabolic_markers.fat_max.expect("fatmax should be defined on a clean ramp");
    assert!(fat_max.power_w > 20 && fat_max.power_w < 260);

    if let Some(crossover_power) = result.metabolic_markers.crossover.power_w {
        assert!(crossover_power as f64 > fat_max.power_w as f64);
    }
}

/// S2 — Spike injection: with hard-cap on, injected fat_ox spikes are nulled
/// before binning and FatMax stays close to the clean-ramp result.
#[test]
fn s2_hard_cap_absorbs_injected_spikes() {
    let mut spiked = ramp(1200, 1200.0, 300.0);
    for (i, b) in spiked.iter_mut().enumerate() {
        if i % 50 == 0 {
            b.fat_ox_g_min = 10.0;
        }
    }

    let config = Config::default();
    let clean = analyze(&ramp(1200, 1200.0, 300.0), &config, 7).unwrap();
    let with_spikes = analyze(&spiked, &config, 7).unwrap();

    let clean_fatmax = clean.metabolic_markers.fat_max.unwrap().power_w;
    let spiked_fatmax = with_spikes.metabolic_markers.fat_max.unwrap().power_w;
    assert!(
        (clean_fatmax - spiked_fatmax).abs() <= 5,
        "hard-cap should keep FatMax within 5W of the clean ramp, got clean={clean_fatmax} spiked={spiked_fatmax}"
    );

    assert!(with_spikes
        .processing_warnings
        .iter()
        .any(|w| w.starts_with("hard_cap:")));
}

/// S2 (regression leg) — disabling both the hard-cap and the IQR filter lets
/// the injected spikes reach binning and move FatMax noticeably.
#[test]
fn s2_disabling_filters_lets_spikes_shift_fatmax() {
    let mut spiked = ramp(1200, 1200.0, 300.0);
    for (i, b) in spiked.iter_mut().enumerate() {
        if i % 50 == 0 {
            b.fat_ox_g_min = 10.0;
        }
    }

    let mut config = Config::default();
    config.physiological_cap_enabled = false;
    config.outlier_enabled = false;

    let clean = analyze(&ramp(1200, 1200.0, 300.0), &config, 7).unwrap();
    let with_spikes = analyze(&spiked, &config, 7).unwrap();

    let clean_fatmax = clean.metabolic_markers.fat_max.map(|m| m.power_w).unwrap_or(0);
    let spiked_fatmax = with_spikes.metabolic_markers.fat_max.map(|m| m.power_w).unwrap_or(0);
    assert!(
        (clean_fatmax - spiked_fatmax).abs() > 10,
        "unfiltered spikes should shift FatMax by more than 10W, got clean={clean_fatmax} spiked={spiked_fatmax}"
    );
}

/// S3 — Short window rejection: a manual 120s window is below the 180s
/// minimum and fails window selection before any filtering runs.
#[test]
fn s3_short_manual_window_is_rejected() {
    let breaths = ramp(400, 1200.0, 300.0);
    let mut config = Config::default();
    config.trim_start_sec = Some(600.0);
    config.trim_end_sec = Some(720.0);

    let err = analyze(&breaths, &config, 1).unwrap_err();
    assert!(matches!(err, AnalysisError::WindowInvalid(_)));
}

/// S4 — Hybrid two-window: primary analysis and VO2max metrics are computed
/// from disjoint windows and neither affects the other.
#[test]
fn s4_hybrid_primary_and_vo2max_windows_are_independent() {
    let breaths = ramp(1200, 1200.0, 300.0);
    let mut config = Config::default();
    config.trim_start_sec = Some(60.0);
    config.trim_end_sec = Some(900.0);
    config.vo2max_start_sec = Some(960.0);
    config.vo2max_end_sec = Some(1140.0);

    let result = analyze(&breaths, &config, 3).unwrap();

    assert!(!result.trim_range.auto_detected);
    assert_eq!(result.trim_range.start_sec, 60.0);
    assert_eq!(result.trim_range.end_sec, 900.0);
    assert!(result.metabolic_markers.fat_max.is_some());

    let vo2max = result.vo2max_metrics.expect("vo2max window should yield metrics");
    assert!(vo2max.time_sec >= 960.0 && vo2max.time_sec <= 1140.0);
}

/// S5 — Sparse tail: a bin with fewer than `min_bin_count` breaths merges
/// into its neighbor rather than leaving a gap in the smoothed series.
#[test]
fn s5_sparse_tail_bin_merges_and_smoothed_series_has_no_gap() {
    let mut breaths = ramp(900, 900.0, 270.0);
    // Append two more breaths past the ramp's peak, landing in a 280-290W
    // bin that would otherwise be under min_bin_count on its own.
    let last_time = breaths.last().unwrap().time_sec;
    breaths.push(Breath {
        time_sec: last_time + 10.0,
        power_w: 282.0,
        vo2_ml_min: 3200.0,
        vco2_ml_min: 3100.0,
        heart_rate: 175.0,
        rer: 0.97,
        fat_ox_g_min: 0.1,
        cho_ox_g_min: 3.6,
        phase: Some(Phase::Exercise),
        body_mass_kg: Some(75.0),
    });
    breaths.push(Breath {
        time_sec: last_time + 20.0,
        power_w: 285.0,
        vo2_ml_min: 3250.0,
        vco2_ml_min: 3150.0,
        heart_rate: 177.0,
        rer: 0.98,
        fat_ox_g_min: 0.09,
        cho_ox_g_min: 3.7,
        phase: Some(Phase::Exercise),
        body_mass_kg: Some(75.0),
    });

    let mut config = Config::default();
    config.min_bin_count = 3;
    config.protocol_type = Some(ProtocolType::Ramp);

    let result = analyze(&breaths, &config, 5).unwrap();
    let binned_powers: Vec<f64> = result.processed_series.binned.iter().map(|p| p.power_w).collect();

    assert_eq!(result.processed_series.binned.len(), result.processed_series.smoothed.len());
    assert!(result
        .processed_series
        .smoothed
        .windows(2)
        .all(|w| w[1].power_w > w[0].power_w));
    assert!(!binned_powers.is_empty());
}
