use rand::Rng;
use rand::seq::index::sample;

/// How the three parents `a`, `b`, `c` of a trial vector are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParentSelection {
    /// Uniform draws with replacement; the target index itself is allowed.
    #[default]
    WithReplacement,
    /// Three pairwise distinct indices, all different from the target (classic rand/1).
    Distinct,
}

impl ParentSelection {
    /// Smallest population this scheme can sample from.
    pub fn min_population(&self) -> usize {
        match self {
            ParentSelection::WithReplacement => 1,
            ParentSelection::Distinct => 4,
        }
    }

    pub(crate) fn sample<R: Rng + ?Sized>(
        &self,
        target: usize,
        pool_size: usize,
        rng: &mut R,
    ) -> [usize; 3] {
        match self {
            ParentSelection::WithReplacement => [
                rng.random_range(0..pool_size),
                rng.random_range(0..pool_size),
                rng.random_range(0..pool_size),
            ],
            ParentSelection::Distinct => distinct_indices(target, pool_size, rng),
        }
    }
}

fn distinct_indices<R: Rng + ?Sized>(exclude: usize, pool_size: usize, rng: &mut R) -> [usize; 3] {
    debug_assert!(pool_size >= 4);
    // Sample from the pool without `exclude`, then shift indices past it back up.
    let picked = sample(rng, pool_size - 1, 3);
    let mut out = [0usize; 3];
    for (slot, idx) in out.iter_mut().zip(picked.iter()) {
        *slot = if idx >= exclude { idx + 1 } else { idx };
    }
    out
}
