use crate::{DEError, Result};

/// Closed search interval `[min, max]` shared by every dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
        }
    }
}

impl Bounds {
    /// Creates a validated interval.
    ///
    /// # Errors
    ///
    /// Returns `DEError::InvalidBounds` unless both ends are finite and `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(DEError::InvalidBounds {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Clamps `x` into the interval.
    #[inline]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Returns `true` when `x` lies in `[min, max]`.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// Width of the interval.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
