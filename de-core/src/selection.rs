use crate::objective::fitness_key;

/// Greedy one-to-one selection: the trial wins only if strictly better.
///
/// Ties keep the incumbent. NaN on either side ranks as `+inf`.
#[inline]
pub fn is_improvement(trial: f64, incumbent: f64) -> bool {
    fitness_key(trial) < fitness_key(incumbent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictly_better_wins() {
        assert!(is_improvement(0.5, 1.0));
        assert!(!is_improvement(1.5, 1.0));
    }

    #[test]
    fn test_tie_keeps_incumbent() {
        assert!(!is_improvement(1.0, 1.0));
        assert!(!is_improvement(0.0, -0.0));
        assert!(!is_improvement(f64::INFINITY, f64::INFINITY));
    }

    #[test]
    fn test_nan_incumbent_is_replaceable() {
        assert!(is_improvement(1e12, f64::NAN));
        assert!(!is_improvement(f64::NAN, 1e12));
        assert!(!is_improvement(f64::NAN, f64::NAN));
    }
}
