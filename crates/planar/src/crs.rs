//! Coordinate reference tags and the reprojection capability.
//!
//! The kernel never reprojects on its own. Callers that hold mixed-tag input
//! pass an explicit `Reproject` implementation to `homogenize` or
//! `FlatPoint::transform`.

use std::fmt;

use crate::error::{GeomError, ReprojectionError, Result};
use crate::flat::FlatPoint;

/// Coordinate reference system attached to points and shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Crs {
    /// No coordinate system; plain Euclidean numbers.
    #[default]
    Untagged,
    /// WGS84 longitude/latitude (ellipsoidal).
    Epsg4326,
    /// Korea 2000 / Unified CS (flat).
    Epsg5179,
    /// Korea 2000 / Central Belt 2010 (flat).
    Epsg5186,
}

impl Crs {
    /// EPSG code, `None` for `Untagged`.
    pub fn srid(self) -> Option<u32> {
        match self {
            Crs::Untagged => None,
            Crs::Epsg4326 => Some(4326),
            Crs::Epsg5179 => Some(5179),
            Crs::Epsg5186 => Some(5186),
        }
    }

    #[inline]
    pub fn is_ellipsoidal(self) -> bool {
        matches!(self, Crs::Epsg4326)
    }

    /// Projected systems where Euclidean formulas apply directly.
    #[inline]
    pub fn is_flat(self) -> bool {
        matches!(self, Crs::Epsg5179 | Crs::Epsg5186)
    }
}

impl TryFrom<u32> for Crs {
    type Error = GeomError;

    fn try_from(srid: u32) -> Result<Self> {
        match srid {
            0 => Ok(Crs::Untagged),
            4326 => Ok(Crs::Epsg4326),
            5179 => Ok(Crs::Epsg5179),
            5186 => Ok(Crs::Epsg5186),
            other => Err(GeomError::OutOfRange {
                what: "srid",
                value: other as f64,
            }),
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.srid() {
            Some(code) => write!(f, "EPSG:{code}"),
            None => f.write_str("untagged"),
        }
    }
}

/// External reprojection service: `(x, y)` in `from` to `(x, y)` in `to`.
pub trait Reproject {
    fn reproject(
        &self,
        x: f64,
        y: f64,
        from: Crs,
        to: Crs,
    ) -> std::result::Result<(f64, f64), ReprojectionError>;
}

/// Reproject every point into `target`. Points already tagged `target` are copied as-is.
///
/// Untagged points cannot be moved between systems and fail.
pub fn homogenize<R: Reproject + ?Sized>(
    points: &[FlatPoint],
    target: Crs,
    reprojector: &R,
) -> Result<Vec<FlatPoint>> {
    if points.is_empty() {
        return Err(GeomError::empty("points"));
    }
    let moved = points.iter().filter(|p| p.crs() != target).count();
    if moved > 0 {
        tracing::debug!(moved, total = points.len(), %target, "homogenize");
    }
    points.iter().map(|p| p.transform(target, reprojector)).collect()
}
