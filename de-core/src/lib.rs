//! Parallel Differential Evolution kernel.
//!
//! This crate evolves a fixed-size population of real vectors inside a
//! uniform box `[min, max]^D` toward the minimum of a user objective. Each
//! generation draws one crossover rate and one mutation factor, then updates
//! every agent concurrently: three parents are sampled, a rand/1 mutant is
//! mixed with the agent by binomial crossover, and the trial replaces the
//! agent only if it scores strictly lower.
//!
//! # Features
//!
//! - Lock-free population updates across a rayon pool
//! - Independent, reproducible random stream per agent and generation
//! - Dithered mutation factor and crossover rate
//! - Progress callback with early stop, wall-clock limit
//! - NaN-tolerant selection
//!
//! # Example
//!
//! ```rust
//! use de_core::{DEConfigBuilder, differential_evolution};
//! use ndarray::Array1;
//!
//! // Minimize the sphere function: f(x) = sum(x_i^2)
//! let config = DEConfigBuilder::new()
//!     .dim(3)
//!     .popsize(30)
//!     .bounds(-5.0, 5.0)
//!     .maxiter(400)
//!     .seed(42)
//!     .build()
//!     .expect("invalid config");
//!
//! let sphere = |x: &Array1<f64>| x.iter().map(|&xi| xi * xi).sum::<f64>();
//! let result = differential_evolution(&sphere, config).expect("optimization should succeed");
//!
//! assert!(result.fun < 1e-3);
//! ```
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod error;
pub use error::{DEError, Result};

use std::fmt;
use std::time::{Duration, Instant};

use ndarray::{Array1, Array2};

/// Index of the smallest score.
mod argmin;
/// Search interval shared by all dimensions.
pub mod bounds;
/// One generation of mutation, crossover and selection.
pub mod generation;
/// Uniform random initialization.
mod init_random;
/// The objective contract.
pub mod objective;
/// Parallel population evaluation support.
pub mod parallel_eval;
/// Mutation factor and crossover rate settings.
pub mod params;
/// Parent index sampling.
pub mod parents;
/// Shared population storage.
pub mod population;
/// Ready-made progress callbacks.
pub mod progress;
/// Per-worker random streams.
mod rng;
/// Greedy selection rule.
pub mod selection;
/// Trial vector construction.
pub mod trial;

/// Convenience entry point.
pub mod differential_evolution;

pub use bounds::Bounds;
pub use differential_evolution::differential_evolution;
pub use generation::{GenerationContext, Updating, evolve_generation};
pub use objective::{Fallible, Objective, ObjectiveError, fitness_key};
pub use parallel_eval::ParallelConfig;
pub use params::{GenerationParams, Mutation, Recombination};
pub use parents::ParentSelection;
pub use population::{Agent, Population, PopulationStats};
pub use progress::CsvProgress;

use generation::evolve_generation as step;
use init_random::init_random;
use parallel_eval::{evaluate_population, install};
use rng::{master_rng, resolve_seed};

/// Callback function type
pub type CallbackFn = Box<dyn FnMut(&DEIntermediate) -> CallbackAction>;

/// Configuration for the Differential Evolution optimizer.
///
/// All fields are read-only for the duration of a run. Use
/// [`DEConfigBuilder`] for validated construction.
pub struct DEConfig {
    /// Dimension D of every candidate vector.
    pub dim: usize,
    /// Number of agents N.
    pub popsize: usize,
    /// Search interval applied to every dimension.
    pub bounds: Bounds,
    /// Number of generations to run.
    pub maxiter: usize,
    /// Mutation factor setting.
    pub mutation: Mutation,
    /// Crossover probability setting.
    pub recombination: Recombination,
    /// Parent sampling scheme.
    pub parents: ParentSelection,
    /// Visibility of replacements within a generation.
    pub updating: Updating,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
    /// Invoke the callback every `report_every` generations (and after the last one).
    pub report_every: usize,
    /// Optional progress callback (may stop early).
    pub callback: Option<CallbackFn>,
    /// Optional wall-clock budget, checked between generations.
    pub max_time: Option<Duration>,
    /// Parallel evaluation configuration.
    pub parallel: ParallelConfig,
}

impl Default for DEConfig {
    fn default() -> Self {
        Self {
            dim: 10,
            popsize: 50,
            bounds: Bounds::default(),
            maxiter: 1000,
            mutation: Mutation::default(),
            recombination: Recombination::default(),
            parents: ParentSelection::default(),
            updating: Updating::default(),
            seed: None,
            report_every: 100,
            callback: None,
            max_time: None,
            parallel: ParallelConfig::default(),
        }
    }
}

impl fmt::Debug for DEConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DEConfig")
            .field("dim", &self.dim)
            .field("popsize", &self.popsize)
            .field("bounds", &self.bounds)
            .field("maxiter", &self.maxiter)
            .field("mutation", &self.mutation)
            .field("recombination", &self.recombination)
            .field("parents", &self.parents)
            .field("updating", &self.updating)
            .field("seed", &self.seed)
            .field("report_every", &self.report_every)
            .field("callback", &self.callback.as_ref().map(|_| "FnMut"))
            .field("max_time", &self.max_time)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl DEConfig {
    /// Checks every setting.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found.
    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 {
            return Err(DEError::ZeroDimension);
        }
        let min = self.parents.min_population();
        if self.popsize < min {
            return Err(DEError::PopulationTooSmall {
                pop_size: self.popsize,
                min,
            });
        }
        if self.maxiter == 0 {
            return Err(DEError::ZeroGenerations);
        }
        if self.report_every == 0 {
            return Err(DEError::ZeroReportInterval);
        }
        self.bounds.validate()?;
        self.mutation.validate()?;
        self.recombination.validate()
    }
}

/// Fluent builder for `DEConfig` for ergonomic configuration.
///
/// # Example
///
/// ```rust
/// use de_core::{DEConfigBuilder, Mutation, Recombination};
///
/// let config = DEConfigBuilder::new()
///     .dim(100)
///     .popsize(200)
///     .bounds(-10.0, 10.0)
///     .maxiter(500)
///     .mutation(Mutation::Range { min: 0.2, max: 0.95 })
///     .recombination(Recombination::Range { min: 0.1, max: 1.0 })
///     .seed(42)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.popsize, 200);
/// ```
pub struct DEConfigBuilder {
    cfg: DEConfig,
}

impl Default for DEConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DEConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: DEConfig::default(),
        }
    }
    /// Sets the problem dimension.
    pub fn dim(mut self, v: usize) -> Self {
        self.cfg.dim = v;
        self
    }
    /// Sets the number of agents.
    pub fn popsize(mut self, v: usize) -> Self {
        self.cfg.popsize = v;
        self
    }
    /// Sets the search interval applied to every dimension.
    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.cfg.bounds = Bounds { min, max };
        self
    }
    /// Sets the number of generations.
    pub fn maxiter(mut self, v: usize) -> Self {
        self.cfg.maxiter = v;
        self
    }
    /// Sets the mutation factor configuration.
    pub fn mutation(mut self, v: Mutation) -> Self {
        self.cfg.mutation = v;
        self
    }
    /// Sets the crossover probability configuration.
    pub fn recombination(mut self, v: Recombination) -> Self {
        self.cfg.recombination = v;
        self
    }
    /// Sets the parent sampling scheme.
    pub fn parents(mut self, v: ParentSelection) -> Self {
        self.cfg.parents = v;
        self
    }
    /// Sets when replacements become visible to other agents.
    pub fn updating(mut self, v: Updating) -> Self {
        self.cfg.updating = v;
        self
    }
    /// Sets the random seed for reproducibility.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    /// Sets the reporting interval in generations.
    pub fn report_every(mut self, v: usize) -> Self {
        self.cfg.report_every = v;
        self
    }
    /// Sets the progress callback.
    pub fn callback(mut self, cb: CallbackFn) -> Self {
        self.cfg.callback = Some(cb);
        self
    }
    /// Sets a wall-clock budget for the run.
    pub fn max_time(mut self, v: Duration) -> Self {
        self.cfg.max_time = Some(v);
        self
    }
    /// Sets the parallel evaluation configuration.
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.cfg.parallel = parallel;
        self
    }
    /// Enables/disables parallel evaluation.
    pub fn enable_parallel(mut self, enable: bool) -> Self {
        self.cfg.parallel.enabled = enable;
        self
    }
    /// Sets the number of parallel threads.
    pub fn parallel_threads(mut self, num_threads: usize) -> Self {
        self.cfg.parallel.num_threads = Some(num_threads);
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`DEConfig::validate`].
    pub fn build(self) -> Result<DEConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All configured generations ran.
    MaxGenerations,
    /// The progress callback asked to stop.
    Callback,
    /// The wall-clock budget ran out.
    TimeLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxGenerations => f.write_str("maximum generations reached"),
            StopReason::Callback => f.write_str("stopped by callback"),
            StopReason::TimeLimit => f.write_str("time limit reached"),
        }
    }
}

/// Result/report of a DE optimization run.
#[derive(Clone)]
pub struct DEReport {
    /// Vector of the best agent.
    pub x: Array1<f64>,
    /// Score of the best agent.
    pub fun: f64,
    /// Number of generations performed.
    pub nit: usize,
    /// Number of objective evaluations performed.
    pub nfev: usize,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Human-readable status message.
    pub message: String,
    /// Wall-clock time of the whole run, initialization included.
    pub elapsed: Duration,
    /// Seed actually used (drawn from entropy when none was configured).
    pub seed: u64,
    /// Final population matrix (N x D).
    pub population: Array2<f64>,
    /// Scores of the final population.
    pub population_energies: Array1<f64>,
}

impl fmt::Debug for DEReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DEReport")
            .field("x", &format!("len={}", self.x.len()))
            .field("fun", &self.fun)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .field("stop_reason", &self.stop_reason)
            .field("message", &self.message)
            .field("elapsed", &self.elapsed)
            .field("seed", &self.seed)
            .field(
                "population",
                &format!("{}x{}", self.population.nrows(), self.population.ncols()),
            )
            .field(
                "population_energies",
                &format!("len={}", self.population_energies.len()),
            )
            .finish()
    }
}

/// Information passed to the callback at each reporting point.
#[derive(Debug, Clone)]
pub struct DEIntermediate {
    /// Generation just completed (zero-based).
    pub iter: usize,
    /// Mean of all current scores.
    pub mean: f64,
    /// Minimum of all current scores.
    pub fun: f64,
    /// Vector of the current best agent.
    pub x: Array1<f64>,
    /// Trials accepted during this generation.
    pub accepted: usize,
    /// Rates used during this generation.
    pub params: GenerationParams,
}

/// Action returned by callback to control optimization flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Continue optimization.
    Continue,
    /// Stop optimization after the current generation.
    Stop,
}

/// Differential Evolution optimizer.
///
/// Binds an objective to a configuration. Use [`DifferentialEvolution::new`]
/// to create an instance, adjust it with [`config_mut`](Self::config_mut),
/// then call [`solve`](Self::solve).
pub struct DifferentialEvolution<'a, O>
where
    O: Objective + ?Sized,
{
    func: &'a O,
    config: DEConfig,
}

impl<'a, O> DifferentialEvolution<'a, O>
where
    O: Objective + ?Sized,
{
    /// Creates a new DE optimizer for `func`.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found in `config`.
    pub fn new(func: &'a O, config: DEConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { func, config })
    }

    /// Read access to configuration
    pub fn config(&self) -> &DEConfig {
        &self.config
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut DEConfig {
        &mut self.config
    }

    /// Runs the optimization and returns a report.
    ///
    /// Exactly `maxiter` generations run, numbered `0..maxiter`, unless the
    /// callback or the time limit stops the loop earlier. Stopping always
    /// happens between generations.
    ///
    /// # Errors
    ///
    /// Returns a configuration error before any evaluation, or
    /// `DEError::Objective` as soon as the objective fails.
    pub fn solve(&mut self) -> Result<DEReport> {
        self.config.validate()?;
        let start = Instant::now();

        let func = self.func;
        let dim = self.config.dim;
        let npop = self.config.popsize;
        let maxiter = self.config.maxiter;
        let bounds = self.config.bounds;
        let parallel = self.config.parallel.clone();
        let seed = resolve_seed(self.config.seed);

        let pool = parallel.build_pool()?;
        log::info!(
            "DE start: dim={}, population={}, generations={}, bounds=[{}, {}], seed={}, workers={}",
            dim,
            npop,
            maxiter,
            bounds.min,
            bounds.max,
            seed,
            parallel.worker_count(pool.as_ref())
        );

        // Initialize population in [min, max] and score it
        let genes = init_random(npop, dim, &bounds, seed);
        let scores = install(pool.as_ref(), || {
            evaluate_population(&genes, func, &parallel)
        })?;
        let pop = Population::from_parts(&genes, &scores);
        let mut nfev = npop;

        let init_stats = pop.stats();
        log::debug!(
            "initial population: mean={:.6e}, minimum={:.6e}",
            init_stats.mean,
            init_stats.min
        );

        let mut master = master_rng(seed);
        let mut nit = 0;
        let mut stop_reason = StopReason::MaxGenerations;

        for generation in 0..maxiter {
            let params = GenerationParams::sample(
                &self.config.recombination,
                &self.config.mutation,
                &mut master,
            );
            let ctx = GenerationContext {
                generation,
                params,
                bounds,
                seed,
                parents: self.config.parents,
                updating: self.config.updating,
                parallel: parallel.enabled,
            };
            let accepted = install(pool.as_ref(), || step(&pop, func, &ctx))?;
            nit = generation + 1;
            nfev += npop;

            let last = nit == maxiter;
            if generation % self.config.report_every == 0 || last {
                let stats = pop.stats();
                log::debug!(
                    "generation {}: mean={:.6e}, minimum={:.6e}, accepted={}/{}, CR={:.3}, F={:.3}",
                    generation,
                    stats.mean,
                    stats.min,
                    accepted,
                    npop,
                    params.crossover,
                    params.mutation
                );
                if let Some(cb) = self.config.callback.as_mut() {
                    let (best_idx, _) = pop.best();
                    let intermediate = DEIntermediate {
                        iter: generation,
                        mean: stats.mean,
                        fun: stats.min,
                        x: pop.vector(best_idx),
                        accepted,
                        params,
                    };
                    if cb(&intermediate) == CallbackAction::Stop {
                        stop_reason = StopReason::Callback;
                        break;
                    }
                }
            }

            if !last
                && let Some(limit) = self.config.max_time
                && start.elapsed() >= limit
            {
                stop_reason = StopReason::TimeLimit;
                break;
            }
        }

        let (best_idx, best_f) = pop.best();
        let elapsed = start.elapsed();
        let message = format!("{} after {} generations", stop_reason, nit);
        log::info!(
            "DE finished: {}, best={:.6e}, evaluations={}, elapsed={:.3?}",
            message,
            best_f,
            nfev,
            elapsed
        );

        Ok(DEReport {
            x: pop.vector(best_idx),
            fun: best_f,
            nit,
            nfev,
            stop_reason,
            message,
            elapsed,
            seed,
            population: pop.genes(),
            population_energies: pop.scores(),
        })
    }
}
