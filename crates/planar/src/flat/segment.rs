//! Finite line segment: projection and pairwise intersection.
//!
//! Intersection model
//! - Solve `a.start + k·A = b.start + l·B` for `k`, where `A`, `B` are the
//!   segment directions. The 2×2 solve branches on which component of `B` is
//!   zero so no division by zero can occur once `A ∦ B`.
//! - Parallel directions (within `GeomCfg::parallel_tol_deg`) report no
//!   intersection, including collinear overlap.
//! - A zero-length segment has no direction and never intersects.

use crate::cfg::GeomCfg;
use crate::crs::Crs;
use crate::error::{GeomError, Result};

use super::{FlatPoint, Vector};

/// Segment `start → end`; both ends share one tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    start: FlatPoint,
    end: FlatPoint,
}

impl LineSegment {
    pub fn new(start: FlatPoint, end: FlatPoint) -> Result<Self> {
        GeomError::check_same(start.crs(), end.crs())?;
        Ok(Self { start, end })
    }

    /// Caller guarantees equal tags.
    #[inline]
    pub(crate) fn new_unchecked(start: FlatPoint, end: FlatPoint) -> Self {
        debug_assert_eq!(start.crs(), end.crs());
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> FlatPoint {
        self.start
    }

    #[inline]
    pub fn end(&self) -> FlatPoint {
        self.end
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.start.crs()
    }

    /// Direction `end - start`.
    #[inline]
    pub fn vector(&self) -> Vector {
        self.start.delta(&self.end)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().size()
    }

    /// Closest point of the segment to `p` (tags must match).
    pub fn nearest_point_to(&self, p: &FlatPoint) -> Result<FlatPoint> {
        GeomError::check_same(self.crs(), p.crs())?;
        Ok(self.nearest_unchecked(p))
    }

    pub(crate) fn nearest_unchecked(&self, p: &FlatPoint) -> FlatPoint {
        let start_to_p = self.start.delta(p);
        let start_to_end = self.vector();
        let len = start_to_end.size();
        if len == 0.0 {
            return self.start;
        }
        // distance from start to the foot of the perpendicular
        let h = Vector::dot(start_to_p, start_to_end) / len;
        if h <= 0.0 {
            self.start
        } else if h < len {
            self.start + start_to_end.normalized() * h
        } else {
            self.end
        }
    }

    /// Intersection point with `other`, if the finite segments cross.
    pub fn intersection(&self, other: &LineSegment) -> Result<Option<FlatPoint>> {
        self.intersection_with(other, GeomCfg::default())
    }

    pub fn intersection_with(
        &self,
        other: &LineSegment,
        cfg: GeomCfg,
    ) -> Result<Option<FlatPoint>> {
        GeomError::check_same(self.crs(), other.crs())?;
        Ok(self.intersection_unchecked(other, cfg))
    }

    pub(crate) fn intersection_unchecked(
        &self,
        other: &LineSegment,
        cfg: GeomCfg,
    ) -> Option<FlatPoint> {
        let a = self.vector();
        let b = other.vector();
        if a.is_zero() || b.is_zero() || Vector::is_parallel(a, b, cfg.parallel_tol_deg) {
            return None;
        }
        let k = solve_k(&self.start, a, &other.start, b);
        let eps = cfg.point_eps;
        if !(-eps..=1.0 + eps).contains(&k) {
            return None;
        }
        let p = self.start + a * k;
        // k alone is not enough when B is axis-aligned; confirm p lies within b.
        let l = Vector::dot(other.start.delta(&p), b) / Vector::dot(b, b);
        if !(-eps..=1.0 + eps).contains(&l) {
            return None;
        }
        Some(p)
    }
}

/// `k` in `a0 + k·A = b0 + l·B`. Requires `A ∦ B`, both non-zero.
fn solve_k(a0: &FlatPoint, a: Vector, b0: &FlatPoint, b: Vector) -> f64 {
    if b.x() != 0.0 && b.y() != 0.0 {
        let dx = a0.x() - b0.x();
        let dy = a0.y() - b0.y();
        (dx / b.x() - dy / b.y()) / (a.y() / b.y() - a.x() / b.x())
    } else if b.x() == 0.0 {
        // b is vertical, so a.x != 0
        debug_assert!(a.x() != 0.0);
        (b0.x() - a0.x()) / a.x()
    } else {
        // b is horizontal, so a.y != 0
        debug_assert!(a.y() != 0.0);
        (b0.y() - a0.y()) / a.y()
    }
}
