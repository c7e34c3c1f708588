//! Shared population storage.
//!
//! Genes live in one contiguous row-major arena of `npop * dim` cells. Every
//! cell is an `f64` stored in an `AtomicU64` and accessed with `Relaxed`
//! ordering: during a generation each worker writes only the row it owns,
//! while parent rows are read without synchronization and may reflect the
//! previous or the current generation. The rayon join at the end of a
//! generation publishes all writes before the next one starts.

use ndarray::{Array1, Array2};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::argmin::argmin;

#[derive(Debug, Default)]
pub(crate) struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub(crate) fn new(v: f64) -> Self {
        Self(AtomicU64::new(v.to_bits()))
    }

    #[inline]
    pub(crate) fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub(crate) fn store(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Relaxed)
    }
}

/// One candidate solution copied out of the population.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Position in the search space.
    pub vector: Array1<f64>,
    /// Objective value of `vector`.
    pub score: f64,
}

/// Mean and minimum of the current scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    /// Arithmetic mean of all scores (may be non-finite).
    pub mean: f64,
    /// Smallest score, NaN ranking last.
    pub min: f64,
}

/// Fixed-size population of agents sharing one dimension.
#[derive(Debug)]
pub struct Population {
    dim: usize,
    genes: Box<[AtomicF64]>,
    scores: Box<[AtomicF64]>,
}

impl Population {
    /// Builds a population from a `npop x dim` gene matrix and matching scores.
    ///
    /// # Panics
    ///
    /// Panics if `scores.len()` differs from the number of rows.
    pub fn from_parts(genes: &Array2<f64>, scores: &Array1<f64>) -> Self {
        assert_eq!(
            genes.nrows(),
            scores.len(),
            "one score per agent is required"
        );
        Self {
            dim: genes.ncols(),
            genes: genes.iter().map(|&g| AtomicF64::new(g)).collect(),
            scores: scores.iter().map(|&s| AtomicF64::new(s)).collect(),
        }
    }

    /// Number of agents.
    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` when the population holds no agent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Dimension of every agent vector.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub(crate) fn gene(&self, agent: usize, j: usize) -> f64 {
        self.genes[agent * self.dim + j].load()
    }

    /// Current score of agent `i`.
    #[inline]
    pub fn score(&self, i: usize) -> f64 {
        self.scores[i].load()
    }

    /// Overwrites agent `i` with `vector` and its `score`.
    ///
    /// Only the worker owning index `i` in the current generation may call this.
    pub(crate) fn replace(&self, i: usize, vector: &Array1<f64>, score: f64) {
        let row = &self.genes[i * self.dim..(i + 1) * self.dim];
        for (cell, &v) in row.iter().zip(vector.iter()) {
            cell.store(v);
        }
        self.scores[i].store(score);
    }

    /// Copies agent `i` out of the population.
    pub fn agent(&self, i: usize) -> Agent {
        Agent {
            vector: self.vector(i),
            score: self.score(i),
        }
    }

    /// Copies the vector of agent `i`.
    pub fn vector(&self, i: usize) -> Array1<f64> {
        Array1::from_shape_fn(self.dim, |j| self.gene(i, j))
    }

    /// Snapshot of every gene as an `npop x dim` matrix.
    pub fn genes(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), self.dim), |(i, j)| self.gene(i, j))
    }

    /// Snapshot of every score.
    pub fn scores(&self) -> Array1<f64> {
        self.scores.iter().map(AtomicF64::load).collect()
    }

    /// Index and score of the best agent; first occurrence wins on ties.
    ///
    /// # Panics
    ///
    /// Panics on an empty population.
    pub fn best(&self) -> (usize, f64) {
        argmin(&self.scores())
    }

    /// Mean and minimum score.
    pub fn stats(&self) -> PopulationStats {
        let scores = self.scores();
        let mean = scores.mean().unwrap_or(f64::NAN);
        let (_, min) = argmin(&scores);
        PopulationStats { mean, min }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Population {
        let genes = array![[1.0, 2.0], [3.0, 4.0], [-1.0, 0.5]];
        let scores = array![5.0, 25.0, 1.25];
        Population::from_parts(&genes, &scores)
    }

    #[test]
    fn test_layout_round_trip() {
        let pop = sample();
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.dim(), 2);
        assert_eq!(pop.gene(1, 0), 3.0);
        assert_eq!(pop.gene(2, 1), 0.5);
        assert_eq!(pop.vector(0), array![1.0, 2.0]);
        assert_eq!(pop.genes(), array![[1.0, 2.0], [3.0, 4.0], [-1.0, 0.5]]);
    }

    #[test]
    fn test_replace_touches_only_one_row() {
        let pop = sample();
        pop.replace(1, &array![0.0, 0.0], 0.0);
        assert_eq!(
            pop.agent(1),
            Agent {
                vector: array![0.0, 0.0],
                score: 0.0
            }
        );
        assert_eq!(pop.vector(0), array![1.0, 2.0]);
        assert_eq!(pop.vector(2), array![-1.0, 0.5]);
        assert_eq!(pop.score(0), 5.0);
    }

    #[test]
    fn test_stats_and_best() {
        let pop = sample();
        let stats = pop.stats();
        approx::assert_relative_eq!(stats.mean, 31.25 / 3.0);
        assert_eq!(stats.min, 1.25);
        assert_eq!(pop.best(), (2, 1.25));
    }

    #[test]
    fn test_stats_with_nan_scores() {
        let genes = array![[0.0], [1.0], [2.0]];
        let scores = array![f64::NAN, 3.0, f64::NAN];
        let pop = Population::from_parts(&genes, &scores);
        let stats = pop.stats();
        assert_eq!(stats.min, 3.0);
        assert!(stats.mean.is_nan());
        assert_eq!(pop.best(), (1, 3.0));

        let all_nan = Population::from_parts(&array![[0.0]], &array![f64::NAN]);
        assert!(all_nan.stats().min.is_nan());
    }
}
