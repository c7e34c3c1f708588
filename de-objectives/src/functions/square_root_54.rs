//! Square root of 54 as a minimization problem

use ndarray::Array1;

/// |x^2 - 54| - 1D
/// Global minima: f(x) = 0 at x = ±sqrt(54)
/// Bounds: x in [-10, 10]
pub fn square_root_54(x: &Array1<f64>) -> f64 {
    (x[0] * x[0] - 54.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_square_root_54_known_properties() {
        crate::assert_known_minima("square_root_54");
        assert_eq!(square_root_54(&array![7.0]), 5.0);
        assert_eq!(square_root_54(&array![0.0]), 54.0);
    }
}
