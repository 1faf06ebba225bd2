// src/analysis/mod.rs
//
// Doorway motion classification.
//
// Signal flow:
//   Scan targets → burst_accumulator → sample_filter ─┐
//                                                     ├→ tendency → occupancy
//                                      velocity ──────┘

pub mod burst_accumulator;
pub mod occupancy;
pub mod sample_filter;
pub mod tendency;
pub mod velocity;

pub use burst_accumulator::{
    select_best_target, AccumulatorConfig, AccumulatorState, BurstAccumulator,
};
pub use occupancy::{CrossingLabel, OccupancyTracker, Outcome};
pub use sample_filter::filter_burst;
pub use tendency::{classify_burst, TendencyClassifier, TendencyConfig};
pub use velocity::estimate_velocity;
