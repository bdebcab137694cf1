//! Shared data model: breath input, processed points/series, markers, and
//! the top-level result types.

mod breath;
mod markers;
mod result;
mod series;

pub use breath::{Breath, Phase};
pub use markers::{CrossoverMarker, FatMaxMarker, MetabolicMarkers, Vo2MaxMetrics};
pub use result::{AnalysisResult, PersistedRecord, Stats, TrimRange, ALGORITHM_VERSION};
pub use series::{ProcessedPoint, ProcessedSeries};
