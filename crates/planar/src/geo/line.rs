//! Polyline of WGS84 points with great-circle length.

use std::fmt;
use std::ops::Index;
use std::sync::OnceLock;

use crate::error::{GeomError, Result};

use super::{polyline, GeoBoundingBox, GeoPoint};

/// Ordered `GeoPoint` sequence (always ≥ 2 points).
#[derive(Clone, Debug)]
pub struct GeoLine {
    points: Vec<GeoPoint>,
    bbox: GeoBoundingBox,
    length_m: OnceLock<f64>,
}

impl GeoLine {
    /// One point is duplicated into a zero-length line.
    pub fn new(mut points: Vec<GeoPoint>) -> Result<Self> {
        let first = *points.first().ok_or_else(|| GeomError::empty("line points"))?;
        if points.len() == 1 {
            points.push(first);
        }
        Ok(Self {
            bbox: GeoBoundingBox::from_points(&points)?,
            points,
            length_m: OnceLock::new(),
        })
    }

    /// Decode an encoded polyline string.
    pub fn from_polyline(encoded: &str) -> Result<Self> {
        Self::new(polyline::decode(encoded)?)
    }

    pub fn to_polyline(&self) -> Result<String> {
        polyline::encode(&self.points)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    #[inline]
    pub fn bounding_box(&self) -> GeoBoundingBox {
        self.bbox
    }

    /// Sum of haversine distances between consecutive points, in metres.
    pub fn length_m(&self) -> f64 {
        *self.length_m.get_or_init(|| {
            self.points
                .windows(2)
                .map(|w| w[0].distance_m(&w[1]))
                .sum()
        })
    }

    /// Collapse runs of identical consecutive points.
    pub fn remove_duplicated_points(points: &[GeoPoint]) -> Vec<GeoPoint> {
        let mut out = points.to_vec();
        out.dedup();
        out
    }

    pub fn reversed(&self) -> GeoLine {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            bbox: self.bbox,
            length_m: self.length_m.clone(),
        }
    }
}

impl PartialEq for GeoLine {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Index<usize> for GeoLine {
    type Output = GeoPoint;
    #[inline]
    fn index(&self, i: usize) -> &GeoPoint {
        &self.points[i]
    }
}

impl<'a> IntoIterator for &'a GeoLine {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for GeoLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}
