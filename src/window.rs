//! C1 — Window Selector: choose the analyzable time window and apply
//! phase / min-power filters.

use crate::config::{Config, ProtocolType};
use crate::config::defaults::{
    recovery_cutoff_fraction, window_start_threshold_w, MIN_WINDOW_SECONDS,
};
use crate::error::AnalysisError;
use crate::types::{Breath, Phase, TrimRange};

/// Select the primary analysis window and apply phase/min-power filters.
///
/// Returns the filtered breaths (still sorted by `time_sec`, per the
/// caller's ordering) and a [`TrimRange`] describing the window used.
pub fn select(breaths: &[Breath], config: &Config) -> Result<(Vec<Breath>, TrimRange), AnalysisError> {
    let trim_range = resolve_trim_range(breaths, config)?;

    let mut filtered: Vec<Breath> = breaths
        .iter()
        .filter(|b| b.time_sec >= trim_range.start_sec && b.time_sec <= trim_range.end_sec)
        .copied()
        .collect();

    filtered.retain(|b| !is_excluded_phase(b.phase, config));

    if let Some(min_power) = config.min_power_w {
        filtered.retain(|b| b.power_w >= min_power);
    }

    Ok((filtered, trim_range))
}

/// Breaths inside the optional VO2max window, independent of the primary
/// window's filters (§4.1: caller-visible, does not affect the primary
/// window).
pub fn vo2max_window(breaths: &[Breath], config: &Config) -> Option<Vec<Breath>> {
    let (start, end) = (config.vo2max_start_sec?, config.vo2max_end_sec?);
    Some(
        breaths
            .iter()
            .filter(|b| b.time_sec >= start && b.time_sec <= end)
            .copied()
            .collect(),
    )
}

fn is_excluded_phase(phase: Option<Phase>, config: &Config) -> bool {
    match phase {
        Some(Phase::Rest) => config.exclude_rest,
        Some(Phase::Warmup) => config.exclude_warmup,
        Some(Phase::Recovery) => config.exclude_recovery,
        Some(Phase::Exercise) | Some(Phase::Peak) | None => false,
    }
}

fn resolve_trim_range(breaths: &[Breath], config: &Config) -> Result<TrimRange, AnalysisError> {
    if let (Some(start), Some(end)) = (config.trim_start_sec, config.trim_end_sec) {
        if end <= start {
            return Err(AnalysisError::WindowInvalid(format!(
                "trim_end_sec ({end}) must be greater than trim_start_sec ({start})"
            )));
        }
        if end - start < MIN_WINDOW_SECONDS {
            return Err(AnalysisError::WindowInvalid(format!(
                "window of {:.1}s is shorter than the minimum {:.0}s",
                end - start,
                MIN_WINDOW_SECONDS
            )));
        }
        if overlaps_vo2max(start, end, config) {
            return Err(AnalysisError::WindowInvalid(
                "primary window overlaps the configured vo2max window".to_string(),
            ));
        }
        let max_power_sec = max_power_time(breaths, start, end);
        return Ok(TrimRange {
            start_sec: start,
            end_sec: end,
            auto_detected: false,
            max_power_sec,
        });
    }

    auto_detect(breaths, config)
}

fn overlaps_vo2max(start: f64, end: f64, config: &Config) -> bool {
    match (config.vo2max_start_sec, config.vo2max_end_sec) {
        (Some(v_start), Some(v_end)) => start < v_end && v_start < end,
        _ => false,
    }
}

fn auto_detect(breaths: &[Breath], config: &Config) -> Result<TrimRange, AnalysisError> {
    if breaths.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "no breaths to auto-detect a window from".to_string(),
        ));
    }

    let start_threshold = window_start_threshold_w(config.protocol_type);
    let start_sec = breaths
        .iter()
        .find(|b| b.power_w > start_threshold)
        .map(|b| b.time_sec)
        .unwrap_or(breaths[0].time_sec);

    let peak = breaths
        .iter()
        .max_by(|a, b| a.power_w.partial_cmp(&b.power_w).unwrap_or(std::cmp::Ordering::Equal))
        .expect("breaths is non-empty");
    let max_power_sec = peak.time_sec;

    let last_sec = breaths
        .last()
        .expect("breaths is non-empty")
        .time_sec;
    let post_peak_span = (last_sec - max_power_sec).max(0.0);
    let cutoff_fraction = recovery_cutoff_fraction(config.protocol_type);
    let end_sec = max_power_sec + post_peak_span * cutoff_fraction;

    Ok(TrimRange {
        start_sec,
        end_sec,
        auto_detected: true,
        max_power_sec,
    })
}

fn max_power_time(breaths: &[Breath], start: f64, end: f64) -> f64 {
    breaths
        .iter()
        .filter(|b| b.time_sec >= start && b.time_sec <= end)
        .max_by(|a, b| a.power_w.partial_cmp(&b.power_w).unwrap_or(std::cmp::Ordering::Equal))
        .map(|b| b.time_sec)
        .unwrap_or(start)
}
