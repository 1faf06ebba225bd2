// src/pipeline/metrics.rs
//
// Counters for scans, bursts and outcomes. Cloning shares the same counters,
// so the caller can read a summary while the loop owns its copy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::CrossingLabel;

#[derive(Debug, Clone)]
pub struct CounterMetrics {
    pub total_scans: Arc<AtomicU64>,
    pub scans_with_target: Arc<AtomicU64>,
    pub bursts_sealed: Arc<AtomicU64>,
    pub bursts_filtered_out: Arc<AtomicU64>,
    pub bursts_discarded: Arc<AtomicU64>,
    pub entries: Arc<AtomicU64>,
    pub exits: Arc<AtomicU64>,
    pub ambiguous: Arc<AtomicU64>,
    pub started_at: Instant,
}

impl CounterMetrics {
    pub fn new() -> Self {
        Self {
            total_scans: Arc::new(AtomicU64::new(0)),
            scans_with_target: Arc::new(AtomicU64::new(0)),
            bursts_sealed: Arc::new(AtomicU64::new(0)),
            bursts_filtered_out: Arc::new(AtomicU64::new(0)),
            bursts_discarded: Arc::new(AtomicU64::new(0)),
            entries: Arc::new(AtomicU64::new(0)),
            exits: Arc::new(AtomicU64::new(0)),
            ambiguous: Arc::new(AtomicU64::new(0)),
            started_at: Instant::now(),
        }
    }

    pub fn inc(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_label(&self, label: CrossingLabel) {
        match label {
            CrossingLabel::Entry => self.inc(&self.entries),
            CrossingLabel::Exit => self.inc(&self.exits),
            CrossingLabel::Ambiguous => self.inc(&self.ambiguous),
        }
    }

    pub fn scan_rate(&self) -> f64 {
        let scans = self.total_scans.load(Ordering::Relaxed);
        let elapsed = self.started_at.elapsed().as_secs_f64();
        if elapsed > 0.01 {
            scans as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_scans: self.total_scans.load(Ordering::Relaxed),
            scans_with_target: self.scans_with_target.load(Ordering::Relaxed),
            bursts_sealed: self.bursts_sealed.load(Ordering::Relaxed),
            bursts_filtered_out: self.bursts_filtered_out.load(Ordering::Relaxed),
            bursts_discarded: self.bursts_discarded.load(Ordering::Relaxed),
            entries: self.entries.load(Ordering::Relaxed),
            exits: self.exits.load(Ordering::Relaxed),
            ambiguous: self.ambiguous.load(Ordering::Relaxed),
            scan_rate: self.scan_rate(),
            elapsed_secs: self.started_at.elapsed().as_secs_f64(),
        }
    }
}

impl Default for CounterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSummary {
    pub total_scans: u64,
    pub scans_with_target: u64,
    pub bursts_sealed: u64,
    pub bursts_filtered_out: u64,
    pub bursts_discarded: u64,
    pub entries: u64,
    pub exits: u64,
    pub ambiguous: u64,
    pub scan_rate: f64,
    pub elapsed_secs: f64,
}
