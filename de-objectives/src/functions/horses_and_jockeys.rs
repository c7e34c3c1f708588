//! Horses and jockeys puzzle

use ndarray::Array1;

/// Horses and jockeys: 36 heads and 100 legs in total.
/// f(h, j) = |36 - (h + j)| + |100 - (4h + 2j)|
/// Global minimum: f(x) = 0 at x = (14, 22)
/// Bounds: x_i in [0, 50]
pub fn horses_and_jockeys(x: &Array1<f64>) -> f64 {
    let horses = x[0];
    let jockeys = x[1];
    let heads = horses + jockeys;
    let legs = 4.0 * horses + 2.0 * jockeys;
    (36.0 - heads).abs() + (100.0 - legs).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_horses_and_jockeys_known_properties() {
        crate::assert_known_minima("horses_and_jockeys");
        // Right head count, 8 legs short.
        assert_eq!(horses_and_jockeys(&array![10.0, 26.0]), 8.0);
    }
}
