use ndarray::{Array1, Array2};
use rand::Rng;

use crate::bounds::Bounds;
use crate::params::GenerationParams;
use crate::population::Population;

/// Where parent genes are read from while building trials.
pub(crate) enum ParentView<'a> {
    /// The shared population, possibly already updated this generation.
    Live(&'a Population),
    /// A copy taken at the generation barrier.
    Frozen(&'a Array2<f64>),
}

impl ParentView<'_> {
    #[inline]
    pub(crate) fn gene(&self, agent: usize, j: usize) -> f64 {
        match self {
            ParentView::Live(pop) => pop.gene(agent, j),
            ParentView::Frozen(genes) => genes[(agent, j)],
        }
    }
}

/// `x0 + (x1 - x2) * factor`, clamped into `bounds`.
#[inline]
pub fn mutant_component(x0: f64, x1: f64, x2: f64, factor: f64, bounds: &Bounds) -> f64 {
    bounds.clamp(x0 + (x1 - x2) * factor)
}

/// Fills `trial` by binomial crossover between agent `target` and the rand/1
/// mutant of `parents`.
///
/// One uniform draw per dimension: below `params.crossover` the mutant value
/// is taken, otherwise the target's own value is copied through. No dimension
/// is forced to mutate.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_trial<R: Rng + ?Sized>(
    trial: &mut Array1<f64>,
    target: usize,
    [a, b, c]: [usize; 3],
    view: &ParentView<'_>,
    own: &Population,
    params: &GenerationParams,
    bounds: &Bounds,
    rng: &mut R,
) {
    for (j, t) in trial.iter_mut().enumerate() {
        *t = if rng.random::<f64>() < params.crossover {
            mutant_component(
                view.gene(a, j),
                view.gene(b, j),
                view.gene(c, j),
                params.mutation,
                bounds,
            )
        } else {
            own.gene(target, j)
        };
    }
}
