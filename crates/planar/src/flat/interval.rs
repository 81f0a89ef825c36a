//! Closed numeric interval `[min, max]`.

use std::fmt;

use rand::Rng;

use crate::error::{GeomError, Result};

/// Closed interval with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// Smallest interval containing every value; fails on an empty input.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Result<Self> {
        let mut it = values.into_iter();
        let first = it.next().ok_or_else(|| GeomError::empty("interval values"))?;
        let (min, max) = it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Ok(Self { min, max })
    }

    /// Interval spanning two values in either order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive on both ends.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Inclusive overlap; touching endpoints count.
    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        self.max >= other.min && other.max >= self.min
    }

    #[inline]
    pub fn union(&self, other: &Interval) -> Interval {
        Interval {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Symmetric expansion by `pad` on both ends (negative shrinks, reordered if crossed).
    #[inline]
    pub fn padded(&self, pad: f64) -> Interval {
        Interval::new(self.min - pad, self.max + pad)
    }

    /// Uniform draw from `[min, max)`; a point interval returns `min`.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + self.length() * rng.gen::<f64>()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.min, self.max)
    }
}
