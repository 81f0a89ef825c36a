//! Tagged point on a flat plane.

use std::fmt;
use std::ops::{Add, Sub};

use crate::crs::{Crs, Reproject};
use crate::error::{GeomError, ReprojectionError, Result};
use crate::geo::GeoPoint;

use super::Vector;

/// Point `(x, y)` in a flat (or untagged) coordinate system.
///
/// Equality compares the tag and both coordinates exactly; no reprojection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatPoint {
    x: f64,
    y: f64,
    crs: Crs,
}

impl FlatPoint {
    /// Untagged point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            crs: Crs::Untagged,
        }
    }

    /// Point in `crs`; ellipsoidal systems are rejected.
    pub fn tagged(x: f64, y: f64, crs: Crs) -> Result<Self> {
        if crs.is_ellipsoidal() {
            return Err(GeomError::UnsupportedCoordinateSystem {
                crs,
                reason: "flat point needs a projected system",
            });
        }
        Ok(Self { x, y, crs })
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Same coordinates under a different (already validated) tag.
    #[inline]
    pub(crate) fn with_crs(x: f64, y: f64, crs: Crs) -> Self {
        Self { x, y, crs }
    }

    /// Displacement `self → other`, ignoring tags. Callers check tags first.
    #[inline]
    pub(crate) fn delta(&self, other: &FlatPoint) -> Vector {
        Vector::new(other.x - self.x, other.y - self.y)
    }

    #[inline]
    pub(crate) fn dist_unchecked(&self, other: &FlatPoint) -> f64 {
        self.delta(other).size()
    }

    /// Displacement from `self` to `other`; tags must match.
    pub fn vector_to(&self, other: &FlatPoint) -> Result<Vector> {
        GeomError::check_same(self.crs, other.crs)?;
        Ok(self.delta(other))
    }

    /// Euclidean distance; tags must match.
    pub fn distance(&self, other: &FlatPoint) -> Result<f64> {
        GeomError::check_same(self.crs, other.crs)?;
        Ok(self.dist_unchecked(other))
    }

    pub fn midpoint(&self, other: &FlatPoint) -> Result<FlatPoint> {
        GeomError::check_same(self.crs, other.crs)?;
        Ok(*self + self.delta(other) * 0.5)
    }

    /// Reproject into `target` through an external capability.
    ///
    /// Identity when already tagged `target`; untagged points cannot move.
    pub fn transform<R: Reproject + ?Sized>(
        &self,
        target: Crs,
        reprojector: &R,
    ) -> Result<FlatPoint> {
        if self.crs == target {
            return Ok(*self);
        }
        if self.crs == Crs::Untagged {
            return Err(ReprojectionError::Untagged { which: "source" }.into());
        }
        if target == Crs::Untagged {
            return Err(ReprojectionError::Untagged { which: "target" }.into());
        }
        let (x, y) = reprojector.reproject(self.x, self.y, self.crs, target)?;
        FlatPoint::tagged(x, y, target)
    }

    /// Reproject onto WGS84 longitude/latitude.
    pub fn to_geo<R: Reproject + ?Sized>(&self, reprojector: &R) -> Result<GeoPoint> {
        if self.crs == Crs::Untagged {
            return Err(ReprojectionError::Untagged { which: "source" }.into());
        }
        let (lon, lat) = reprojector.reproject(self.x, self.y, self.crs, Crs::Epsg4326)?;
        GeoPoint::new(lon, lat)
    }

    /// `ST_Point(x,y)` or `ST_Point(x,y,srid)`.
    pub fn wkt(&self) -> String {
        match self.crs.srid() {
            Some(srid) => format!("ST_Point({},{},{})", self.x, self.y, srid),
            None => format!("ST_Point({},{})", self.x, self.y),
        }
    }

    /// Parse `"(x, y)"` / `"[x, y]"` into a point tagged `crs`.
    pub fn parse(s: &str, crs: Crs) -> Result<FlatPoint> {
        let (x, y) = super::vector::parse_pair(s).ok_or_else(|| GeomError::Parse {
            input: s.to_string(),
        })?;
        FlatPoint::tagged(x, y, crs)
    }
}

impl Add<Vector> for FlatPoint {
    type Output = FlatPoint;
    #[inline]
    fn add(self, v: Vector) -> FlatPoint {
        FlatPoint::with_crs(self.x + v.x(), self.y + v.y(), self.crs)
    }
}

impl Sub<Vector> for FlatPoint {
    type Output = FlatPoint;
    #[inline]
    fn sub(self, v: Vector) -> FlatPoint {
        self + (-v)
    }
}

impl fmt::Display for FlatPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::tests::ShiftReprojector;

    #[test]
    fn equality_requires_same_tag() {
        let a = FlatPoint::new(1.0, 2.0);
        let b = FlatPoint::tagged(1.0, 2.0, Crs::Epsg5179).unwrap();
        assert_ne!(a, b);
        assert_eq!(b, FlatPoint::tagged(1.0, 2.0, Crs::Epsg5179).unwrap());
    }

    #[test]
    fn ellipsoidal_tag_rejected() {
        let err = FlatPoint::tagged(127.0, 37.0, Crs::Epsg4326).unwrap_err();
        assert!(matches!(err, GeomError::UnsupportedCoordinateSystem { .. }));
    }

    #[test]
    fn distance_and_midpoint() {
        let a = FlatPoint::tagged(0.0, 0.0, Crs::Epsg5186).unwrap();
        let b = FlatPoint::tagged(3.0, 4.0, Crs::Epsg5186).unwrap();
        assert!((a.distance(&b).unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(a.midpoint(&b).unwrap(), FlatPoint::tagged(1.5, 2.0, Crs::Epsg5186).unwrap());
        assert_eq!(a + Vector::new(3.0, 4.0), b);
        assert_eq!(b - Vector::new(3.0, 4.0), a);
        let c = FlatPoint::tagged(3.0, 4.0, Crs::Epsg5179).unwrap();
        assert!(matches!(
            a.distance(&c),
            Err(GeomError::CoordinateSystemMismatch { .. })
        ));
    }

    #[test]
    fn wkt_and_display() {
        assert_eq!(FlatPoint::new(1.5, -2.0).wkt(), "ST_Point(1.5,-2)");
        let p = FlatPoint::tagged(10.0, 20.0, Crs::Epsg5179).unwrap();
        assert_eq!(p.wkt(), "ST_Point(10,20,5179)");
        assert_eq!(p.to_string(), "[10,20]");
        assert_eq!(FlatPoint::parse("(10, 20)", Crs::Epsg5179).unwrap(), p);
    }

    #[test]
    fn transform_through_capability() {
        let p = FlatPoint::tagged(2000.0, 0.0, Crs::Epsg5179).unwrap();
        let q = p.transform(Crs::Epsg5186, &ShiftReprojector).unwrap();
        assert_eq!(q, FlatPoint::tagged(1000.0, 500.0, Crs::Epsg5186).unwrap());
        assert_eq!(p.transform(Crs::Epsg5179, &ShiftReprojector).unwrap(), p);
        assert!(FlatPoint::new(0.0, 0.0)
            .transform(Crs::Epsg5179, &ShiftReprojector)
            .is_err());
    }

    #[test]
    fn to_geo_yields_validated_lon_lat() {
        let p = FlatPoint::tagged(127_000.0, 37_500.0, Crs::Epsg5179).unwrap();
        assert_eq!(p.to_geo(&ShiftReprojector).unwrap(), GeoPoint::new(127.0, 37.5).unwrap());
        let far = FlatPoint::tagged(127_000.0, 95_000.0, Crs::Epsg5179).unwrap();
        assert!(matches!(
            far.to_geo(&ShiftReprojector),
            Err(GeomError::OutOfRange { what: "latitude", .. })
        ));
        let other = FlatPoint::tagged(0.0, 0.0, Crs::Epsg5186).unwrap();
        assert!(matches!(other.to_geo(&ShiftReprojector), Err(GeomError::Reprojection(_))));
        assert!(FlatPoint::new(0.0, 0.0).to_geo(&ShiftReprojector).is_err());
    }
}
