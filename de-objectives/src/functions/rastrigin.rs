//! Rastrigin test function

use ndarray::Array1;
use std::f64::consts::PI;

/// Rastrigin function - N-D multimodal
/// f(x) = 10 n + sum(x_i^2 - 10 cos(2 pi x_i))
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let a = 10.0;
    a * x.len() as f64
        + x.iter()
            .map(|&xi| xi * xi - a * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_rastrigin_known_properties() {
        crate::assert_known_minima("rastrigin");
        assert_abs_diff_eq!(rastrigin(&Array1::zeros(30)), 0.0, epsilon = 1e-9);
        // Integer points are local minima with value sum(x_i^2).
        assert_abs_diff_eq!(rastrigin(&array![1.0, -2.0]), 5.0, epsilon = 1e-9);
        // Half-integers sit on the ridges.
        assert_abs_diff_eq!(rastrigin(&array![0.5]), 20.25, epsilon = 1e-9);
    }
}
