use rand::SeedableRng;
use rand::rngs::StdRng;

/// Step reserved for the driver's own stream (generation-wide parameters).
const MASTER_STEP: u64 = u32::MAX as u64;

/// SplitMix64 step: advances `x` by the golden gamma and scrambles it.
#[inline]
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Independent generator for one unit of work.
///
/// `step` 0 seeds initialization, `step` g + 1 seeds generation g. Every
/// (step, index) pair gets its own stream, so no generator is ever shared
/// between workers and results do not depend on thread scheduling. The
/// triple is hashed component by component, so neighbouring seeds do not
/// reproduce each other's streams at shifted indices.
pub(crate) fn stream_rng(base_seed: u64, step: u64, index: usize) -> StdRng {
    let seed = splitmix64(splitmix64(splitmix64(base_seed) ^ step) ^ index as u64);
    StdRng::seed_from_u64(seed)
}

/// Generator used by the driver between generations.
pub(crate) fn master_rng(base_seed: u64) -> StdRng {
    stream_rng(base_seed, MASTER_STEP, 0)
}

/// Seed to use for a run: the configured one or a fresh draw from OS entropy.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
