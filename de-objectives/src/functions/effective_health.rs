//! Effective health itemization problems.
//!
//! A character buys health at 2.5 gold per point and armor at 18 gold per
//! point. Effective health is `health * (100 + armor) / 100`; the objective
//! is its inverse, so lower is better. Spending more than the budget scores
//! a flat 1.0, far above any affordable build.

use ndarray::Array1;

const HEALTH_COST: f64 = 2.5;
const ARMOR_COST: f64 = 18.0;
const OVER_BUDGET: f64 = 1.0;

fn inverse_effective_health(
    x: &Array1<f64>,
    budget: f64,
    base_health: f64,
    base_armor: f64,
) -> f64 {
    let health = x[0];
    let armor = x[1];
    if health * HEALTH_COST + armor * ARMOR_COST > budget {
        return OVER_BUDGET;
    }
    let effective = (base_health + health) * (100.0 + base_armor + armor) / 100.0;
    1.0 / effective
}

/// 3600 gold, no base stats.
/// Global minimum: f(x) = 1/1620 at x = (1080, 50)
/// Bounds: x_i in [0, 1440]
pub fn effective_health_solo(x: &Array1<f64>) -> f64 {
    inverse_effective_health(x, 3600.0, 0.0, 0.0)
}

/// 720 gold on top of 1080 health and 10 armor.
/// Global minimum: f(x) = 1/1620 at x = (0, 40)
/// Bounds: x_i in [0, 288]
pub fn effective_health_early(x: &Array1<f64>) -> f64 {
    inverse_effective_health(x, 720.0, 1080.0, 10.0)
}

/// 1800 gold on top of 2000 health and 50 armor.
/// Global minimum: f(x) = 1/5000 at x = (0, 100)
/// Bounds: x_i in [0, 720]
pub fn effective_health_late(x: &Array1<f64>) -> f64 {
    inverse_effective_health(x, 1800.0, 2000.0, 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_effective_health_known_properties() {
        crate::assert_known_minima("effective_health_solo");
        crate::assert_known_minima("effective_health_early");
        crate::assert_known_minima("effective_health_late");
    }

    #[test]
    fn test_over_budget_is_flat() {
        assert_eq!(effective_health_solo(&array![1440.1, 0.0]), 1.0);
        assert_eq!(effective_health_early(&array![0.0, 41.0]), 1.0);
        assert_eq!(effective_health_late(&array![720.0, 1.0]), 1.0);
    }

    #[test]
    fn test_spending_the_budget_beats_saving_it() {
        let half = effective_health_solo(&array![540.0, 25.0]);
        let full = effective_health_solo(&array![1080.0, 50.0]);
        assert!(full < half);
        // No health at all gives infinite inverse effective health.
        assert!(effective_health_solo(&array![0.0, 100.0]).is_infinite());
    }
}
