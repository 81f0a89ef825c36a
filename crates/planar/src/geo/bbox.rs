//! Longitude/latitude bounding box.
//!
//! Treated as a plain rectangle in degrees: no antimeridian wrapping.
//! Padding is clamped to the valid lon/lat ranges so every contained
//! position is a valid `GeoPoint`.

use std::fmt;

use rand::Rng;

use crate::crs::{Crs, Reproject};
use crate::error::{GeomError, Result};
use crate::flat::{FlatBoundingBox, Interval};

use super::GeoPoint;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBoundingBox {
    lon: Interval,
    lat: Interval,
}

impl GeoBoundingBox {
    pub fn from_points(points: &[GeoPoint]) -> Result<Self> {
        if points.is_empty() {
            return Err(GeomError::empty("bounding box points"));
        }
        Ok(Self {
            lon: Interval::from_values(points.iter().map(|p| p.longitude()))?,
            lat: Interval::from_values(points.iter().map(|p| p.latitude()))?,
        })
    }

    /// Box spanning two corners; both must be valid positions.
    pub fn from_corners(lon1: f64, lon2: f64, lat1: f64, lat2: f64) -> Result<Self> {
        let a = GeoPoint::new(lon1, lat1)?;
        let b = GeoPoint::new(lon2, lat2)?;
        Self::from_points(&[a, b])
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        Crs::Epsg4326
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.lon.min()
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.lon.max()
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.lat.min()
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.lat.max()
    }

    /// Longitude extent in degrees.
    #[inline]
    pub fn width(&self) -> f64 {
        self.lon.length()
    }

    /// Latitude extent in degrees.
    #[inline]
    pub fn height(&self) -> f64 {
        self.lat.length()
    }

    pub fn bottom_left(&self) -> GeoPoint {
        self.corner(self.left(), self.bottom())
    }

    pub fn top_right(&self) -> GeoPoint {
        self.corner(self.right(), self.top())
    }

    /// Bounds stay within range (see `padded`), so no validation is needed.
    fn corner(&self, lon: f64, lat: f64) -> GeoPoint {
        GeoPoint::new_unchecked(lon, lat)
    }

    pub fn contains(&self, p: &GeoPoint) -> bool {
        self.lon.contains(p.longitude()) && self.lat.contains(p.latitude())
    }

    pub fn intersects(&self, other: &GeoBoundingBox) -> bool {
        self.lon.intersects(&other.lon) && self.lat.intersects(&other.lat)
    }

    pub fn union(&self, other: &GeoBoundingBox) -> GeoBoundingBox {
        Self {
            lon: self.lon.union(&other.lon),
            lat: self.lat.union(&other.lat),
        }
    }

    /// Grown by `d_lon` / `d_lat` degrees on each side, clamped to the globe.
    pub fn padded(&self, d_lon: f64, d_lat: f64) -> GeoBoundingBox {
        let lon = self.lon.padded(d_lon);
        let lat = self.lat.padded(d_lat);
        Self {
            lon: Interval::new(lon.min().clamp(-180.0, 180.0), lon.max().clamp(-180.0, 180.0)),
            lat: Interval::new(lat.min().clamp(-90.0, 90.0), lat.max().clamp(-90.0, 90.0)),
        }
    }

    /// Uniform draw in degree space.
    pub fn pick_random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> GeoPoint {
        self.corner(self.lon.random(rng), self.lat.random(rng))
    }

    /// Flat box around the projected corners.
    pub fn transform<R: Reproject + ?Sized>(
        &self,
        target: Crs,
        reprojector: &R,
    ) -> Result<FlatBoundingBox> {
        let bl = self.bottom_left().transform(target, reprojector)?;
        let tr = self.top_right().transform(target, reprojector)?;
        FlatBoundingBox::from_points(&[bl, tr])
    }
}

impl fmt::Display for GeoBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ X:{}, Y:{} ]", self.lon, self.lat)
    }
}
