//! Axis-aligned bounding box on a flat plane.

use std::fmt;

use rand::Rng;

use crate::crs::{Crs, Reproject};
use crate::error::{GeomError, Result};
use crate::geo::GeoBoundingBox;

use super::{FlatPoint, Interval};

/// Box `interval_x × interval_y` tagged with one `Crs`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatBoundingBox {
    x: Interval,
    y: Interval,
    crs: Crs,
}

impl FlatBoundingBox {
    /// Smallest box containing all points. Points must share one tag.
    pub fn from_points(points: &[FlatPoint]) -> Result<Self> {
        let first = points.first().ok_or_else(|| GeomError::empty("bounding box points"))?;
        let crs = first.crs();
        for p in points {
            GeomError::check_same(crs, p.crs())?;
        }
        Ok(Self {
            x: Interval::from_values(points.iter().map(|p| p.x()))?,
            y: Interval::from_values(points.iter().map(|p| p.y()))?,
            crs,
        })
    }

    pub fn from_intervals(x: Interval, y: Interval, crs: Crs) -> Result<Self> {
        if crs.is_ellipsoidal() {
            return Err(GeomError::UnsupportedCoordinateSystem {
                crs,
                reason: "flat bounding box needs a projected system",
            });
        }
        Ok(Self { x, y, crs })
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.crs
    }

    #[inline]
    pub fn interval_x(&self) -> Interval {
        self.x
    }

    #[inline]
    pub fn interval_y(&self) -> Interval {
        self.y
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x.min()
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x.max()
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y.min()
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y.max()
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x.length()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y.length()
    }

    pub fn bottom_left(&self) -> FlatPoint {
        FlatPoint::with_crs(self.left(), self.bottom(), self.crs)
    }

    pub fn top_right(&self) -> FlatPoint {
        FlatPoint::with_crs(self.right(), self.top(), self.crs)
    }

    /// Inclusive containment of raw coordinates (no tag check).
    #[inline]
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        self.x.contains(x) && self.y.contains(y)
    }

    pub fn contains(&self, p: &FlatPoint) -> Result<bool> {
        GeomError::check_same(self.crs, p.crs())?;
        Ok(self.contains_xy(p.x(), p.y()))
    }

    pub fn intersects(&self, other: &FlatBoundingBox) -> Result<bool> {
        GeomError::check_same(self.crs, other.crs)?;
        Ok(self.x.intersects(&other.x) && self.y.intersects(&other.y))
    }

    pub fn union(&self, other: &FlatBoundingBox) -> Result<FlatBoundingBox> {
        GeomError::check_same(self.crs, other.crs)?;
        Ok(Self {
            x: self.x.union(&other.x),
            y: self.y.union(&other.y),
            crs: self.crs,
        })
    }

    /// Expanded by `dx` left and right, `dy` top and bottom.
    pub fn padded(&self, dx: f64, dy: f64) -> FlatBoundingBox {
        Self {
            x: self.x.padded(dx),
            y: self.y.padded(dy),
            crs: self.crs,
        }
    }

    /// Uniform draw inside the box.
    pub fn pick_random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> FlatPoint {
        FlatPoint::with_crs(self.x.random(rng), self.y.random(rng), self.crs)
    }

    /// Reproject both corners and rebuild the box around them.
    pub fn transform<R: Reproject + ?Sized>(
        &self,
        target: Crs,
        reprojector: &R,
    ) -> Result<FlatBoundingBox> {
        if target == self.crs {
            return Ok(*self);
        }
        let bl = self.bottom_left().transform(target, reprojector)?;
        let tr = self.top_right().transform(target, reprojector)?;
        FlatBoundingBox::from_points(&[bl, tr])
    }

    /// Longitude/latitude box spanned by the reprojected corners.
    pub fn to_geo<R: Reproject + ?Sized>(&self, reprojector: &R) -> Result<GeoBoundingBox> {
        let bl = self.bottom_left().to_geo(reprojector)?;
        let tr = self.top_right().to_geo(reprojector)?;
        GeoBoundingBox::from_points(&[bl, tr])
    }
}

impl fmt::Display for FlatBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ X:{}, Y:{} ]", self.x, self.y)
    }
}
