//! C9/C10 — FatMax and Crossover detection.

pub mod crossover;
pub mod fatmax;
