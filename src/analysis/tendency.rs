// src/analysis/tendency.rs
//
// Turns a filtered burst into a signed tendency:
//   > 0  someone walked out
//   < 0  someone walked in
//   = 0  nothing we trust enough to count

use super::sample_filter::filter_burst;
use super::velocity::estimate_velocity;
use tracing::debug;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct TendencyConfig {
    /// Maximum reachable lateral coordinate (cm) given the arena bounds
    pub max_lateral_extent: f64,
    /// |tendency| must exceed this for a one-sided burst to count
    pub tendency_lower_bound: f64,
    /// Samples with |y| at or below this (cm) are dead-zone noise
    pub ignored_length: f64,
}

impl Default for TendencyConfig {
    fn default() -> Self {
        Self {
            max_lateral_extent: crate::types::ArenaConfig::default().max_lateral_extent(),
            tendency_lower_bound: 0.1,
            ignored_length: 3.0,
        }
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

pub struct TendencyClassifier {
    config: TendencyConfig,
}

impl TendencyClassifier {
    pub fn new(config: TendencyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TendencyConfig {
        &self.config
    }

    /// Signed tendency of an already filtered burst.
    ///
    /// The slope is scaled by burst length and normalized by the arena width
    /// (`velocity · N / 2M`). A burst that spans both sides of the centerline
    /// always counts. A one-sided burst counts only when its magnitude is
    /// strictly above the lower bound, which covers a sensor that started
    /// recording mid-crossing.
    pub fn classify(&self, samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }

        let velocity = estimate_velocity(samples);
        let tendency =
            (velocity * samples.len() as f64) / (2.0 * self.config.max_lateral_extent);

        let positive_side = samples.iter().any(|&y| y > 0.0);
        let negative_side = samples.iter().any(|&y| y < 0.0);
        let crossed_both_sides = positive_side && negative_side;
        let above_lower_bound = tendency.abs() > self.config.tendency_lower_bound;

        debug!(
            "Burst n={} velocity={:.4} tendency={:.4} both_sides={} above_bound={}",
            samples.len(),
            velocity,
            tendency,
            crossed_both_sides,
            above_lower_bound
        );

        if crossed_both_sides || above_lower_bound {
            tendency
        } else {
            0.0
        }
    }

    /// Dead-zone filter followed by [`classify`](Self::classify).
    ///
    /// A raw burst that is entirely inside the dead-zone yields `0.0`.
    pub fn classify_burst(&self, raw: &[f64]) -> f64 {
        let filtered = filter_burst(raw, self.config.ignored_length);
        self.classify(&filtered)
    }
}

/// One-shot helper for callers that do not keep a classifier around.
pub fn classify_burst(raw: &[f64], config: &TendencyConfig) -> f64 {
    TendencyClassifier::new(config.clone()).classify_burst(raw)
}
