// src/pipeline/mod.rs

pub mod counter_loop;
pub mod metrics;

pub use counter_loop::{CounterLoop, StopReason};
pub use metrics::{CounterMetrics, MetricsSummary};
