//! One generation of the evolutionary loop.
//!
//! Every index is updated independently: draw parents, build a trial by
//! mutation and binomial crossover, evaluate it, keep it if it is strictly
//! better. Updates run concurrently across the rayon pool and each one writes
//! only its own row of the population, so no lock is taken. The function
//! returns only after every index has been processed.

use ndarray::Array1;
use rayon::prelude::*;

use crate::bounds::Bounds;
use crate::objective::Objective;
use crate::params::GenerationParams;
use crate::parents::ParentSelection;
use crate::population::Population;
use crate::rng::stream_rng;
use crate::selection::is_improvement;
use crate::trial::{ParentView, build_trial};
use crate::{DEError, Result};

/// When replacements become visible to parent sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Updating {
    /// Parents are read from the live population: an update may see agents
    /// already replaced earlier in the same generation.
    #[default]
    Immediate,
    /// Parents are read from a copy taken at the start of the generation.
    /// Seeded runs are then reproducible regardless of thread count.
    Deferred,
}

/// Everything a generation step needs besides the population and objective.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext {
    /// Zero-based generation index.
    pub generation: usize,
    /// Crossover rate and mutation factor shared by the whole generation.
    pub params: GenerationParams,
    /// Search interval trials are clamped into.
    pub bounds: Bounds,
    /// Base seed of the run; per-index streams derive from it.
    pub seed: u64,
    /// Parent sampling scheme.
    pub parents: ParentSelection,
    /// Visibility of replacements within the generation.
    pub updating: Updating,
    /// Spread updates over the rayon pool.
    pub parallel: bool,
}

/// Runs one generation over `pop` and returns the number of accepted trials.
///
/// # Errors
///
/// Returns `DEError::Objective` if the objective fails for any trial. Updates
/// already in flight complete before the error is returned.
pub fn evolve_generation<O>(pop: &Population, objective: &O, ctx: &GenerationContext) -> Result<usize>
where
    O: Objective + ?Sized,
{
    let frozen;
    let view = match ctx.updating {
        Updating::Immediate => ParentView::Live(pop),
        Updating::Deferred => {
            frozen = pop.genes();
            ParentView::Frozen(&frozen)
        }
    };
    let npop = pop.len();
    let dim = pop.dim();

    if !ctx.parallel || npop < 4 {
        let mut trial = Array1::zeros(dim);
        let mut accepted = 0;
        for i in 0..npop {
            if update_agent(i, &mut trial, pop, &view, objective, ctx)? {
                accepted += 1;
            }
        }
        return Ok(accepted);
    }

    // One scratch trial per rayon job split, never shared between workers.
    (0..npop)
        .into_par_iter()
        .map_init(
            || Array1::zeros(dim),
            |trial, i| update_agent(i, trial, pop, &view, objective, ctx).map(usize::from),
        )
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

fn update_agent<O>(
    i: usize,
    trial: &mut Array1<f64>,
    pop: &Population,
    view: &ParentView<'_>,
    objective: &O,
    ctx: &GenerationContext,
) -> Result<bool>
where
    O: Objective + ?Sized,
{
    let mut rng = stream_rng(ctx.seed, ctx.generation as u64 + 1, i);
    let parents = ctx.parents.sample(i, pop.len(), &mut rng);
    build_trial(
        trial,
        i,
        parents,
        view,
        pop,
        &ctx.params,
        &ctx.bounds,
        &mut rng,
    );

    let score = objective
        .evaluate(trial)
        .map_err(|source| DEError::Objective {
            index: i,
            generation: Some(ctx.generation),
            source,
        })?;

    if is_improvement(score, pop.score(i)) {
        pop.replace(i, trial, score);
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fallible;
    use crate::init_random::init_random;
    use ndarray::{Array2, array};

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|&v| v * v).sum()
    }

    fn ctx(generation: usize, parallel: bool) -> GenerationContext {
        GenerationContext {
            generation,
            params: GenerationParams {
                crossover: 0.7,
                mutation: 0.6,
            },
            bounds: Bounds::new(-5.0, 5.0).unwrap(),
            seed: 1234,
            parents: ParentSelection::WithReplacement,
            updating: Updating::Immediate,
            parallel,
        }
    }

    fn population(npop: usize, dim: usize) -> Population {
        let genes = init_random(npop, dim, &Bounds::new(-5.0, 5.0).unwrap(), 1);
        let scores: Array1<f64> = genes.rows().into_iter().map(|r| sphere(&r.to_owned())).collect();
        Population::from_parts(&genes, &scores)
    }

    #[test]
    fn test_scores_never_increase_and_stay_in_bounds() {
        let pop = population(30, 4);
        for g in 0..50 {
            let before = pop.scores();
            evolve_generation(&pop, &sphere, &ctx(g, true)).unwrap();
            let after = pop.scores();
            assert_eq!(after.len(), 30);
            for (b, a) in before.iter().zip(after.iter()) {
                assert!(a <= b, "score went from {b} to {a} in generation {g}");
            }
            assert!(pop.genes().iter().all(|&x| (-5.0..=5.0).contains(&x)));
        }
    }

    #[test]
    fn test_scores_match_vectors() {
        let pop = population(20, 3);
        for g in 0..20 {
            evolve_generation(&pop, &sphere, &ctx(g, true)).unwrap();
        }
        for i in 0..pop.len() {
            let agent = pop.agent(i);
            assert_eq!(agent.score, sphere(&agent.vector));
        }
    }

    #[test]
    fn test_accepted_count_matches_changes() {
        let pop = population(16, 2);
        let before = pop.scores();
        let accepted = evolve_generation(&pop, &sphere, &ctx(0, false)).unwrap();
        let changed = before
            .iter()
            .zip(pop.scores().iter())
            .filter(|(b, a)| a != b)
            .count();
        assert_eq!(accepted, changed);
    }

    #[test]
    fn test_equal_trial_score_keeps_incumbent() {
        let genes = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let pop = Population::from_parts(&genes, &array![7.0, 7.0, 7.0, 7.0]);
        let constant = |_: &Array1<f64>| 7.0;
        let accepted = evolve_generation(&pop, &constant, &ctx(0, true)).unwrap();
        assert_eq!(accepted, 0);
        assert_eq!(pop.genes(), genes);
    }

    #[test]
    fn test_nan_incumbent_gets_replaced() {
        let genes = array![[1.0], [2.0], [3.0], [4.0]];
        let pop = Population::from_parts(&genes, &array![f64::NAN, 1.0, 1.0, 1.0]);
        let constant = |_: &Array1<f64>| 0.5;
        evolve_generation(&pop, &constant, &ctx(0, false)).unwrap();
        assert_eq!(pop.score(0), 0.5);
    }

    #[test]
    fn test_deferred_parallel_matches_sequential() {
        let run = |parallel: bool| {
            let pop = population(40, 5);
            for g in 0..25 {
                let mut c = ctx(g, parallel);
                c.updating = Updating::Deferred;
                evolve_generation(&pop, &sphere, &c).unwrap();
            }
            (pop.genes(), pop.scores())
        };
        assert_eq!(run(true), run(false));
    }

    #[test]
    fn test_objective_failure_aborts_generation() {
        let pop = population(12, 2);
        let failing = Fallible(|x: &Array1<f64>| {
            if x[0] > 0.0 {
                Err("positive coordinate")
            } else {
                Ok(x[0])
            }
        });
        let mut c = ctx(3, true);
        c.params.crossover = 1.0;
        let result = (0..100).try_for_each(|g| {
            c.generation = g;
            evolve_generation(&pop, &failing, &c).map(|_| ())
        });
        match result {
            Err(DEError::Objective { generation, .. }) => assert!(generation.is_some()),
            other => panic!("expected objective failure, got {other:?}"),
        }
    }

    /// Every agent starts at 20 outside [-10, 10], so a trial built only from
    /// start-of-generation parents is exactly `clamp(20) = 10`. A trial can
    /// hit 5 only via `10 + 0.5 * (10 - 20)`, which needs two parents already
    /// replaced in this same generation and one that is not.
    fn stale_population(npop: usize) -> Population {
        let genes = Array2::from_elem((npop, 2), 20.0);
        Population::from_parts(&genes, &Array1::from_elem(npop, 40.0))
    }

    fn outside_start_ctx(updating: Updating) -> GenerationContext {
        GenerationContext {
            params: GenerationParams {
                crossover: 1.0,
                mutation: 0.5,
            },
            bounds: Bounds::new(-10.0, 10.0).unwrap(),
            updating,
            ..ctx(0, false)
        }
    }

    #[test]
    fn test_deferred_reads_only_start_of_generation_parents() {
        let pop = stale_population(200);
        let l1 = |x: &Array1<f64>| x.iter().map(|v| v.abs()).sum::<f64>();
        let accepted = evolve_generation(&pop, &l1, &outside_start_ctx(Updating::Deferred)).unwrap();
        assert_eq!(accepted, 200);
        assert!(pop.genes().iter().all(|&g| g == 10.0));
    }

    #[test]
    fn test_immediate_reads_replacements_from_same_generation() {
        let pop = stale_population(200);
        let l1 = |x: &Array1<f64>| x.iter().map(|v| v.abs()).sum::<f64>();
        let accepted = evolve_generation(&pop, &l1, &outside_start_ctx(Updating::Immediate)).unwrap();
        assert_eq!(accepted, 200);
        let genes = pop.genes();
        assert!(genes.iter().all(|&g| g == 10.0 || g == 5.0));
        assert!(
            genes.iter().any(|&g| g == 5.0),
            "no trial was built from a parent replaced earlier in the generation"
        );
    }
}
