//! The objective contract consumed by the optimizer.
//!
//! An objective is a pure function of a candidate vector. It is called
//! concurrently from several rayon workers, hence the `Sync` bound. Plain
//! closures and `fn` items returning `f64` are objectives out of the box;
//! fallible functions are adapted with [`Fallible`].

use ndarray::Array1;

/// Error type an objective may return to abort the run.
pub type ObjectiveError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A scalar function to be minimized.
///
/// Non-finite return values are accepted; NaN ranks as `+inf` (see
/// [`fitness_key`]). Returning `Err` stops the optimization and surfaces as
/// [`DEError::Objective`](crate::DEError::Objective).
pub trait Objective: Sync {
    /// Evaluates the objective at `x`.
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError>;
}

impl<F> Objective for F
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    #[inline]
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError> {
        Ok(self(x))
    }
}

/// Adapter for objectives that can fail.
///
/// ```rust
/// use de_core::{Fallible, Objective};
/// use ndarray::array;
///
/// let log_barrier = Fallible(|x: &ndarray::Array1<f64>| {
///     if x[0] <= 0.0 {
///         Err("log of non-positive value")
///     } else {
///         Ok(-x[0].ln())
///     }
/// });
/// assert!(log_barrier.evaluate(&array![1.0]).is_ok());
/// assert!(log_barrier.evaluate(&array![-1.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F, E> Objective for Fallible<F>
where
    F: Fn(&Array1<f64>) -> Result<f64, E> + Sync,
    E: Into<ObjectiveError>,
{
    #[inline]
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError> {
        (self.0)(x).map_err(Into::into)
    }
}

/// Ordering key for scores: NaN compares as `+inf`.
///
/// A raw NaN never compares less than anything, so an agent holding one
/// could never be replaced.
#[inline]
pub fn fitness_key(score: f64) -> f64 {
    if score.is_nan() { f64::INFINITY } else { score }
}
