//! Top-level analysis result and its persisted form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

use super::markers::{MetabolicMarkers, Vo2MaxMetrics};
use super::series::ProcessedSeries;

/// Bump whenever any stage's numeric behavior changes. Gates persisted record
/// compatibility — see [`crate::storage::PersistenceLayer::load`].
pub const ALGORITHM_VERSION: &str = "1.2.0";

/// The auto-detected or manual analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimRange {
    pub start_sec: f64,
    pub end_sec: f64,
    pub auto_detected: bool,
    pub max_power_sec: f64,
}

/// Breath/point counts at a few pipeline checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_data_points: usize,
    pub exercise_data_points: usize,
    pub binned_data_points: usize,
}

/// The complete output of one `analyze` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub config: Config,
    pub processed_series: ProcessedSeries,
    pub metabolic_markers: MetabolicMarkers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vo2max_metrics: Option<Vo2MaxMetrics>,
    pub stats: Stats,
    pub trim_range: TrimRange,
    pub processing_warnings: Vec<String>,
    pub algorithm_version: String,
}

/// One stored record per test identity, upsert semantics.
///
/// Mirrors [`AnalysisResult`] one-to-one with `test_id`, `created_at`, and
/// `updated_at` added, the way the teacher's `StoredAnalysis` wraps a
/// `HealthAssessment` with a `stored_at` timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub test_id: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
