use ndarray::{Array1, Array2};
use rayon::ThreadPool;
use rayon::prelude::*;

use crate::objective::Objective;
use crate::{DEError, Result};

/// Parallel evaluation configuration
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Enable parallel evaluation
    pub enabled: bool,
    /// Number of threads to use (None = use rayon default)
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_threads: None, // Use rayon's default (typically num_cpus)
        }
    }
}

impl ParallelConfig {
    /// Dedicated pool when a thread count is requested, `None` for rayon's global pool.
    pub(crate) fn build_pool(&self) -> Result<Option<ThreadPool>> {
        match self.num_threads {
            Some(n) if self.enabled => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .thread_name(|i| format!("de-worker-{i}"))
                .build()
                .map(Some)
                .map_err(|e| DEError::ThreadPool(e.to_string())),
            _ => Ok(None),
        }
    }

    /// Worker count the run will use.
    pub(crate) fn worker_count(&self, pool: Option<&ThreadPool>) -> usize {
        match (self.enabled, pool) {
            (false, _) => 1,
            (true, Some(pool)) => pool.current_num_threads(),
            (true, None) => rayon::current_num_threads(),
        }
    }
}

/// Runs `op` inside `pool` when one was built.
pub(crate) fn install<T, OP>(pool: Option<&ThreadPool>, op: OP) -> T
where
    OP: FnOnce() -> T + Send,
    T: Send,
{
    match pool {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Evaluate a population in parallel
///
/// # Arguments
/// * `population` - 2D array where each row is an individual
/// * `objective` - Function to evaluate each individual
/// * `config` - Parallel configuration
///
/// # Returns
/// Array of scores for each individual, or the first objective failure
pub(crate) fn evaluate_population<O>(
    population: &Array2<f64>,
    objective: &O,
    config: &ParallelConfig,
) -> Result<Array1<f64>>
where
    O: Objective + ?Sized,
{
    let npop = population.nrows();
    let eval = |i: usize| {
        let individual = population.row(i).to_owned();
        objective
            .evaluate(&individual)
            .map_err(|source| DEError::Objective {
                index: i,
                generation: None,
                source,
            })
    };

    if !config.enabled || npop < 4 {
        // Sequential evaluation for small populations or when disabled
        return (0..npop).map(eval).collect();
    }

    let scores = (0..npop).into_par_iter().map(eval).collect::<Result<Vec<f64>>>()?;
    Ok(Array1::from_vec(scores))
}
