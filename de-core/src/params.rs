use rand::Rng;

use crate::{DEError, Result};

/// Mutation setting: either a fixed factor or a uniform range (dithering).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    /// Fixed mutation factor F in [0, 2].
    Factor(f64),
    /// Dithering range [min, max) with 0 <= min < max <= 2, redrawn every generation.
    Range {
        /// Minimum mutation factor.
        min: f64,
        /// Maximum mutation factor (exclusive).
        max: f64,
    },
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::Range {
            min: 0.2,
            max: 0.95,
        }
    }
}

impl Mutation {
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Mutation::Factor(f) => f,
            Mutation::Range { min, max } => rng.random_range(min..max),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let (min, max) = match *self {
            Mutation::Factor(f) => (f, f),
            Mutation::Range { min, max } => (min, max),
        };
        let in_range = (0.0..=2.0).contains(&min) && (0.0..=2.0).contains(&max);
        let non_empty = matches!(self, Mutation::Factor(_)) || min < max;
        if in_range && non_empty {
            Ok(())
        } else {
            Err(DEError::InvalidMutation { min, max })
        }
    }
}

/// Crossover probability setting: fixed or redrawn every generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recombination {
    /// Fixed crossover probability CR in [0, 1].
    Rate(f64),
    /// Uniform range [min, max) with 0 <= min < max <= 1, redrawn every generation.
    Range {
        /// Minimum crossover probability.
        min: f64,
        /// Maximum crossover probability (exclusive).
        max: f64,
    },
}

impl Default for Recombination {
    fn default() -> Self {
        Recombination::Range { min: 0.1, max: 1.0 }
    }
}

impl Recombination {
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Recombination::Rate(cr) => cr,
            Recombination::Range { min, max } => rng.random_range(min..max),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let (min, max) = match *self {
            Recombination::Rate(cr) => (cr, cr),
            Recombination::Range { min, max } => (min, max),
        };
        let in_range = (0.0..=1.0).contains(&min) && (0.0..=1.0).contains(&max);
        let non_empty = matches!(self, Recombination::Rate(_)) || min < max;
        if in_range && non_empty {
            Ok(())
        } else {
            Err(DEError::InvalidCrossover { min, max })
        }
    }
}

/// Rates shared by every individual update of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Per-dimension probability of taking the mutant value.
    pub crossover: f64,
    /// Scale applied to the parent difference vector.
    pub mutation: f64,
}

impl GenerationParams {
    /// Draws the crossover rate first, then the mutation factor.
    pub(crate) fn sample<R: Rng + ?Sized>(
        recombination: &Recombination,
        mutation: &Mutation,
        rng: &mut R,
    ) -> Self {
        let crossover = recombination.sample(rng);
        let mutation = mutation.sample(rng);
        Self {
            crossover,
            mutation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_ranges_sample_inside() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = Mutation::default();
        let r = Recombination::default();
        for _ in 0..1000 {
            let p = GenerationParams::sample(&r, &m, &mut rng);
            assert!((0.1..1.0).contains(&p.crossover));
            assert!((0.2..0.95).contains(&p.mutation));
        }
    }

    #[test]
    fn test_fixed_values_are_returned_verbatim() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = GenerationParams::sample(
            &Recombination::Rate(0.9),
            &Mutation::Factor(0.5),
            &mut rng,
        );
        assert_eq!(p.crossover, 0.9);
        assert_eq!(p.mutation, 0.5);
    }

    #[test]
    fn test_validation() {
        assert!(Mutation::Factor(0.8).validate().is_ok());
        assert!(Mutation::Factor(2.5).validate().is_err());
        assert!(Mutation::Range { min: 0.5, max: 0.5 }.validate().is_err());
        assert!(Mutation::Range { min: 0.9, max: 0.2 }.validate().is_err());

        assert!(Recombination::Rate(1.0).validate().is_ok());
        assert!(Recombination::Rate(-0.1).validate().is_err());
        assert!(Recombination::Range { min: 0.3, max: 0.3 }.validate().is_err());
        assert!(Recombination::Range { min: 0.1, max: 1.2 }.validate().is_err());
        assert!(matches!(
            Recombination::Range { min: 0.6, max: 0.4 }.validate(),
            Err(DEError::InvalidCrossover { .. })
        ));
    }
}
