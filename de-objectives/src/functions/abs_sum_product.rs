//! Absolute sum plus absolute product

use ndarray::Array1;

/// |sum |x_i|| + |prod x_i| - N-D unimodal (Schwefel 2.22 shape)
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
/// Bounds: x_i in [-10, 10]
pub fn abs_sum_product(x: &Array1<f64>) -> f64 {
    let sum: f64 = x.iter().map(|v| v.abs()).sum();
    let product: f64 = x.iter().product();
    sum.abs() + product.abs()
}
