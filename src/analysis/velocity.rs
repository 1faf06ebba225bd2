// src/analysis/velocity.rs
//
// Closed-form least-squares slope over samples indexed by arrival order.

/// Slope `b` of the least-squares line `y = a + b·t`, with samples placed at
/// integer times `0..N`.
///
/// When `Σ i·yᵢ == 0` the result is `0.0`. That covers no samples, a single
/// sample and an all-zero series, but it is a sentinel for degenerate input and
/// not proof of a flat trend: a series whose weighted sum happens to cancel
/// (e.g. `[3, 0]`) also reports zero.
pub fn estimate_velocity(samples: &[f64]) -> f64 {
    let mut sum_y = 0.0f64;
    let mut sum_xy = 0.0f64;
    for (i, &y) in samples.iter().enumerate() {
        sum_y += y;
        sum_xy += i as f64 * y;
    }

    if sum_xy == 0.0 {
        return 0.0;
    }

    // sum_xy != 0 implies at least two samples, so the denominator is positive
    let n = samples.len() as f64;
    let sum_x = n * (n - 1.0) / 2.0;
    let sum_xx = n * (n - 1.0) * (2.0 * n - 1.0) / 6.0;

    (sum_xy - sum_x * sum_y / n) / (sum_xx - sum_x * sum_x / n)
}
