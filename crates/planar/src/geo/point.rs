//! WGS84 longitude/latitude point.

use std::fmt;

use crate::crs::{Crs, Reproject};
use crate::error::{GeomError, Result};
use crate::flat::FlatPoint;

/// Mean earth radius used by the haversine distance, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Point on the WGS84 ellipsoid (`Crs::Epsg4326`).
///
/// `x` is longitude in `[-180, 180]`, `y` latitude in `[-90, 90]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeomError::OutOfRange {
                what: "longitude",
                value: longitude,
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeomError::OutOfRange {
                what: "latitude",
                value: latitude,
            });
        }
        Ok(Self {
            lon: longitude,
            lat: latitude,
        })
    }

    #[inline]
    pub(crate) fn new_unchecked(lon: f64, lat: f64) -> Self {
        debug_assert!((-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat));
        Self { lon, lat }
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.lon
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        Crs::Epsg4326
    }

    /// Great-circle distance in metres (haversine).
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let cos_lats = self.lat.to_radians().cos() * other.lat.to_radians().cos();
        let h = (d_lat / 2.0).sin().powi(2) + cos_lats * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
    }

    /// Project onto a flat system through an external capability.
    pub fn transform<R: Reproject + ?Sized>(
        &self,
        target: Crs,
        reprojector: &R,
    ) -> Result<FlatPoint> {
        if !target.is_flat() {
            return Err(GeomError::UnsupportedCoordinateSystem {
                crs: target,
                reason: "geographic points project onto flat systems only",
            });
        }
        let (x, y) = reprojector.reproject(self.lon, self.lat, Crs::Epsg4326, target)?;
        FlatPoint::tagged(x, y, target)
    }

    /// `ST_Point(lon,lat,4326)`.
    pub fn wkt(&self) -> String {
        format!("ST_Point({},{},4326)", self.lon, self.lat)
    }

    /// Parse `"(lon, lat)"` / `"[lon, lat]"`.
    pub fn parse(s: &str) -> Result<GeoPoint> {
        let (lon, lat) = crate::flat::parse_pair(s).ok_or_else(|| GeomError::Parse {
            input: s.to_string(),
        })?;
        GeoPoint::new(lon, lat)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lon, self.lat)
    }
}
