//! Sphere test function

use ndarray::Array1;

/// Sum of squares (sphere) - N-D unimodal
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
/// Bounds: x_i in [-10, 10]
pub fn sum_of_squares(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}
