//! Metabolism Analysis Core
//!
//! Converts noisy, breath-by-breath gas-exchange measurements from a
//! metabolic cart into a denoised fat/carbohydrate oxidation profile over
//! workload, and derives two clinically meaningful markers: FatMax (maximum
//! fat oxidation point and its surrounding zone) and Crossover (the
//! workload at which carbohydrate oxidation overtakes fat oxidation).
//!
//! ## Architecture
//!
//! - [`window`]: analyzable-window selection (auto-detect or manual trim)
//! - [`extract`]: breath -> processed-point projection
//! - [`filters`]: hard-cap, IQR outlier rejection, sliding-median smoothing
//! - [`binning`]: fixed-width workload bins with sparse-bin merging
//! - [`smoothing`]: adaptive-bandwidth local regression over the binned series
//! - [`trend`]: per-channel polynomial fit with cross-validated degree
//! - [`markers`]: FatMax and Crossover detection
//! - [`orchestrator`]: drives the above and assembles [`AnalysisResult`]
//! - [`storage`]: pluggable persistence for configuration + results
//!
//! The core performs no I/O and is synchronous; callers awaiting it from an
//! async context should do so on a worker thread.

pub mod binning;
pub mod config;
pub mod error;
pub mod extract;
pub mod filters;
pub mod markers;
pub mod numeric;
pub mod orchestrator;
pub mod smoothing;
pub mod storage;
pub mod trend;
pub mod types;
pub mod vo2max;
pub mod window;

pub use config::Config;
pub use error::{AnalysisError, PersistenceError};
pub use orchestrator::analyze;
pub use storage::PersistenceLayer;
pub use types::{
    AnalysisResult, Breath, CrossoverMarker, FatMaxMarker, MetabolicMarkers, Phase,
    ProcessedPoint, ProcessedSeries, Stats, TrimRange, ALGORITHM_VERSION,
};
