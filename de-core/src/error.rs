//! Error types for the Differential Evolution optimizer.
//!
//! Configuration problems are reported before any objective evaluation takes
//! place; objective failures abort the run and carry the failing agent index.

use thiserror::Error;

use crate::objective::ObjectiveError;

/// Errors that can occur during Differential Evolution optimization.
#[derive(Debug, Error)]
pub enum DEError {
    /// The search interval is empty, inverted or not finite.
    #[error("invalid bounds: min ({min}) must be finite and < max ({max})")]
    InvalidBounds {
        /// The lower bound value
        min: f64,
        /// The upper bound value
        max: f64,
    },

    /// Problem dimension is zero.
    #[error("problem dimension must be > 0")]
    ZeroDimension,

    /// Population size is too small for the selected parent sampling.
    #[error("population size ({pop_size}) must be >= {min}")]
    PopulationTooSmall {
        /// The invalid population size
        pop_size: usize,
        /// Smallest size accepted by the parent selection scheme
        min: usize,
    },

    /// Generation count is zero.
    #[error("number of generations must be > 0")]
    ZeroGenerations,

    /// Reporting interval is zero.
    #[error("report interval must be > 0")]
    ZeroReportInterval,

    /// Mutation factor (or range) is empty or outside [0, 2].
    #[error("invalid mutation factor range [{min}, {max}) (must be non-empty within [0, 2])")]
    InvalidMutation {
        /// Lower end of the mutation factor range
        min: f64,
        /// Upper end of the mutation factor range
        max: f64,
    },

    /// Crossover rate (or range) is empty or outside [0, 1].
    #[error("invalid crossover rate range [{min}, {max}) (must be non-empty within [0, 1])")]
    InvalidCrossover {
        /// Lower end of the crossover rate range
        min: f64,
        /// Upper end of the crossover rate range
        max: f64,
    },

    /// The dedicated rayon pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// The objective function reported a failure.
    #[error("objective failed for agent {index}{}: {source}", generation_suffix(.generation))]
    Objective {
        /// Population index whose candidate was being evaluated
        index: usize,
        /// Generation in progress, `None` during initialization
        generation: Option<usize>,
        /// Error returned by the objective
        #[source]
        source: ObjectiveError,
    },
}

fn generation_suffix(generation: &Option<usize>) -> String {
    match generation {
        Some(g) => format!(" in generation {g}"),
        None => " during initialization".to_string(),
    }
}

/// A specialized `Result` type for DE operations.
pub type Result<T> = std::result::Result<T, DEError>;

impl DEError {
    /// Returns `true` if this is a bounds-related error.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, DEError::InvalidBounds { .. })
    }

    /// Returns `true` if this is a configuration-related error.
    ///
    /// Bounds errors are configuration errors too.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DEError::InvalidBounds { .. }
                | DEError::ZeroDimension
                | DEError::PopulationTooSmall { .. }
                | DEError::ZeroGenerations
                | DEError::ZeroReportInterval
                | DEError::InvalidMutation { .. }
                | DEError::InvalidCrossover { .. }
                | DEError::ThreadPool(_)
        )
    }

    /// Returns `true` if the objective function failed during the run.
    pub fn is_objective_error(&self) -> bool {
        matches!(self, DEError::Objective { .. })
    }
}
