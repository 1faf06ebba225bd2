// src/lib.rs

pub mod analysis;
pub mod announce;
pub mod config;
pub mod pipeline;
pub mod prompt;
pub mod sensor;
pub mod types;

pub use analysis::{classify_burst, CrossingLabel, OccupancyTracker, Outcome};
pub use types::Config;
