use ndarray::Array2;
use rand::Rng;

use crate::bounds::Bounds;
use crate::rng::stream_rng;

/// Uniform initial genes in `bounds`, one generator stream per agent.
pub(crate) fn init_random(npop: usize, dim: usize, bounds: &Bounds, base_seed: u64) -> Array2<f64> {
    let mut pop = Array2::<f64>::zeros((npop, dim));
    for (i, mut row) in pop.rows_mut().into_iter().enumerate() {
        let mut rng = stream_rng(base_seed, 0, i);
        for x in row.iter_mut() {
            let u: f64 = rng.random::<f64>();
            *x = bounds.clamp(bounds.min + u * bounds.span());
        }
    }
    pop
}
