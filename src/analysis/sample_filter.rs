// src/analysis/sample_filter.rs

/// Drop samples inside the dead-zone around the doorway center.
///
/// A sample survives only when `|y| > ignored_length`. Order is preserved, so
/// the result is still suitable for regression. The result may be empty.
pub fn filter_burst(samples: &[f64], ignored_length: f64) -> Vec<f64> {
    samples
        .iter()
        .copied()
        .filter(|y| y.abs() > ignored_length)
        .collect()
}
