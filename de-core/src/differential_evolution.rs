use crate::objective::Objective;
use crate::{DEConfig, DEReport, DifferentialEvolution, Result};

/// Runs Differential Evolution optimization on an objective.
///
/// Builds a [`DifferentialEvolution`] from `config` and solves it in one
/// call. Plain closures `Fn(&Array1<f64>) -> f64 + Sync` are objectives;
/// wrap a fallible closure in [`Fallible`](crate::Fallible).
///
/// # Errors
///
/// Returns a configuration error if `config` is invalid, or
/// `DEError::Objective` if the objective fails during the run.
///
/// # Example
///
/// ```rust
/// use de_core::{differential_evolution, DEConfigBuilder};
/// use ndarray::Array1;
///
/// let config = DEConfigBuilder::new()
///     .dim(2)
///     .popsize(20)
///     .bounds(-5.0, 5.0)
///     .maxiter(200)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// let result = differential_evolution(&|x: &Array1<f64>| x[0].powi(2) + x[1].powi(2), config)
///     .expect("optimization failed");
///
/// assert!(result.fun < 0.01);
/// ```
pub fn differential_evolution<O>(func: &O, config: DEConfig) -> Result<DEReport>
where
    O: Objective + ?Sized,
{
    DifferentialEvolution::new(func, config)?.solve()
}
