//! Residual of a small nonlinear system

use ndarray::Array1;

/// Squared residuals of the system
///   (2x + 3y)(x - y) = 2
///   3x + y = 5
/// Two global minima with f = 0, at x = (95 ± sqrt(401)) / 56, y = 5 - 3x.
/// Bounds: x_i in [-10, 10]
pub fn nonlinear_system(c: &Array1<f64>) -> f64 {
    let x = c[0];
    let y = c[1];
    let r1 = (2.0 * x + 3.0 * y) * (x - y) - 2.0;
    let r2 = 3.0 * x + y - 5.0;
    r1 * r1 + r2 * r2
}
