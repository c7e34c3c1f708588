#![doc = include_str!("../README.md")]

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Plain objective signature shared by every function in this crate.
pub type ObjectiveFn = fn(&Array1<f64>) -> f64;

/// Metadata for an objective: search interval, known minima and shape.
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// Interval (min, max) applied to every dimension
    pub bounds: (f64, f64),
    /// Global minima locations and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    /// Description of the function
    pub description: String,
    /// Whether the function is multimodal
    pub multimodal: bool,
    /// Required dimension, `None` when any dimension works
    pub dimension: Option<usize>,
}

impl FunctionMetadata {
    /// Dimension to use when the caller asked for `requested`.
    ///
    /// Returns `None` if the function has a fixed dimension that differs.
    pub fn resolve_dimension(&self, requested: Option<usize>) -> Option<usize> {
        match (self.dimension, requested) {
            (Some(fixed), Some(d)) if fixed != d => None,
            (Some(fixed), _) => Some(fixed),
            (None, Some(d)) => Some(d),
            (None, None) => Some(10),
        }
    }
}

fn meta(
    name: &str,
    bounds: (f64, f64),
    global_minima: Vec<(Vec<f64>, f64)>,
    description: &str,
    multimodal: bool,
    dimension: Option<usize>,
) -> FunctionMetadata {
    FunctionMetadata {
        name: name.to_string(),
        bounds,
        global_minima,
        description: description.to_string(),
        multimodal,
        dimension,
    }
}

/// Get metadata for all available functions, keyed by name.
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let entries = vec![
        meta(
            "abs_sum_product",
            (-10.0, 10.0),
            vec![(vec![0.0, 0.0], 0.0)],
            "Sum of absolute values plus absolute product",
            false,
            None,
        ),
        meta(
            "beale",
            (-4.5, 4.5),
            vec![(vec![3.0, 0.5], 0.0)],
            "Beale function",
            false,
            Some(2),
        ),
        meta(
            "booth",
            (-10.0, 10.0),
            vec![(vec![1.0, 3.0], 0.0)],
            "Booth function",
            false,
            Some(2),
        ),
        meta(
            "cumulative_sum_squares",
            (-10.0, 10.0),
            vec![(vec![0.0, 0.0], 0.0)],
            "Sum of squared prefix sums (Schwefel 1.2)",
            false,
            None,
        ),
        meta(
            "effective_health_early",
            (0.0, 288.0),
            vec![(vec![0.0, 40.0], 1.0 / 1620.0)],
            "Inverse effective health with 720 gold on top of a 1080 health, 10 armor base",
            false,
            Some(2),
        ),
        meta(
            "effective_health_late",
            (0.0, 720.0),
            vec![(vec![0.0, 100.0], 1.0 / 5000.0)],
            "Inverse effective health with 1800 gold on top of a 2000 health, 50 armor base",
            false,
            Some(2),
        ),
        meta(
            "effective_health_solo",
            (0.0, 1440.0),
            vec![(vec![1080.0, 50.0], 1.0 / 1620.0)],
            "Inverse effective health bought with 3600 gold from nothing",
            false,
            Some(2),
        ),
        meta(
            "horses_and_jockeys",
            (0.0, 50.0),
            vec![(vec![14.0, 22.0], 0.0)],
            "36 heads and 100 legs shared by horses and jockeys",
            false,
            Some(2),
        ),
        meta(
            "matyas",
            (-10.0, 10.0),
            vec![(vec![0.0, 0.0], 0.0)],
            "Matyas function",
            false,
            Some(2),
        ),
        meta(
            "nonlinear_system",
            (-10.0, 10.0),
            vec![
                (vec![2.0540175784732284, -1.1620527354196852], 0.0),
                (vec![1.3388395643839144, 0.9834813068482564], 0.0),
            ],
            "Squared residuals of (2x+3y)(x-y)=2 and 3x+y=5",
            true,
            Some(2),
        ),
        meta(
            "rastrigin",
            (-5.12, 5.12),
            vec![(vec![0.0, 0.0], 0.0)],
            "Rastrigin function with a regular grid of local minima",
            true,
            None,
        ),
        meta(
            "square_root_54",
            (-10.0, 10.0),
            vec![
                (vec![54f64.sqrt()], 0.0),
                (vec![-(54f64.sqrt())], 0.0),
            ],
            "Distance of x^2 from 54",
            true,
            Some(1),
        ),
        meta(
            "sum_of_squares",
            (-10.0, 10.0),
            vec![(vec![0.0, 0.0], 0.0)],
            "Sphere function",
            false,
            None,
        ),
    ];

    entries
        .into_iter()
        .map(|m| (m.name.clone(), m))
        .collect()
}

/// Looks up a function by name.
pub fn get_function(name: &str) -> Option<ObjectiveFn> {
    let f: ObjectiveFn = match name {
        "abs_sum_product" => abs_sum_product,
        "beale" => beale,
        "booth" => booth,
        "cumulative_sum_squares" => cumulative_sum_squares,
        "effective_health_early" => effective_health_early,
        "effective_health_late" => effective_health_late,
        "effective_health_solo" => effective_health_solo,
        "horses_and_jockeys" => horses_and_jockeys,
        "matyas" => matyas,
        "nonlinear_system" => nonlinear_system,
        "rastrigin" => rastrigin,
        "square_root_54" => square_root_54,
        "sum_of_squares" => sum_of_squares,
        _ => return None,
    };
    Some(f)
}

/// All function names, sorted.
pub fn function_names() -> Vec<String> {
    let mut names: Vec<String> = get_function_metadata().into_keys().collect();
    names.sort();
    names
}

/// Checks that every recorded minimum lies inside the bounds and evaluates
/// to the recorded value.
#[cfg(test)]
pub(crate) fn assert_known_minima(name: &str) {
    let metadata = get_function_metadata();
    let meta = metadata
        .get(name)
        .unwrap_or_else(|| panic!("Function {name} should have metadata"));
    let f = get_function(name).unwrap_or_else(|| panic!("Function {name} should be registered"));
    let (lower, upper) = meta.bounds;

    for (coords, expected) in &meta.global_minima {
        if let Some(d) = meta.dimension {
            assert_eq!(coords.len(), d, "{name}: minimum has wrong dimension");
        }
        for &c in coords {
            assert!(
                (lower..=upper).contains(&c),
                "{name}: coordinate {c} outside [{lower}, {upper}]"
            );
        }
        let actual = f(&Array1::from_vec(coords.clone()));
        approx::assert_abs_diff_eq!(actual, *expected, epsilon = 1e-9);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_and_metadata_agree() {
        let metadata = get_function_metadata();
        assert_eq!(metadata.len(), 13);
        for name in function_names() {
            assert!(get_function(&name).is_some(), "{name} is not registered");
            assert_eq!(metadata[&name].name, name);
            assert!(!metadata[&name].global_minima.is_empty());
            let (lo, hi) = metadata[&name].bounds;
            assert!(lo < hi);
        }
        assert!(get_function("nope").is_none());
    }

    #[test]
    fn test_all_function_minima() {
        for name in function_names() {
            assert_known_minima(&name);
        }
    }

    #[test]
    fn test_resolve_dimension() {
        let metadata = get_function_metadata();
        let booth = &metadata["booth"];
        assert_eq!(booth.resolve_dimension(None), Some(2));
        assert_eq!(booth.resolve_dimension(Some(2)), Some(2));
        assert_eq!(booth.resolve_dimension(Some(5)), None);

        let sphere = &metadata["sum_of_squares"];
        assert_eq!(sphere.resolve_dimension(Some(100)), Some(100));
        assert_eq!(sphere.resolve_dimension(None), Some(10));
    }
}
