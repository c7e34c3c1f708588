//! Schwefel 1.2 test function

use ndarray::Array1;

/// Sum over i of (x_1 + ... + x_i)^2 - N-D unimodal, non-separable
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
/// Bounds: x_i in [-10, 10]
pub fn cumulative_sum_squares(x: &Array1<f64>) -> f64 {
    x.iter()
        .scan(0.0, |prefix, &xi| {
            *prefix += xi;
            Some(*prefix * *prefix)
        })
        .sum()
}
