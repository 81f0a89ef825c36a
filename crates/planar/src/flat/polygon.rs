//! Simple polygon on a flat plane.
//!
//! Invariants
//! - At least three distinct vertices; consecutive duplicates are collapsed.
//! - The ring is closed internally (last vertex equals first).
//! - The closed ring does not intersect itself (checked at construction).
//! - Area and perimeter are computed once on first access.

use std::fmt;
use std::sync::OnceLock;

use rand::Rng;

use crate::cfg::GeomCfg;
use crate::crs::Crs;
use crate::error::{GeomError, Result};

use super::{FlatBoundingBox, FlatLine, FlatPoint};

/// Closed, non-self-intersecting ring of flat points.
#[derive(Clone, Debug)]
pub struct FlatPolygon {
    /// Closed ring: `ring[0] == ring[ring.len() - 1]`.
    ring: Vec<FlatPoint>,
    bbox: FlatBoundingBox,
    area: OnceLock<f64>,
    edge_length: OnceLock<f64>,
}

impl FlatPolygon {
    pub fn new(points: Vec<FlatPoint>) -> Result<Self> {
        Self::new_with(points, GeomCfg::default())
    }

    /// Like `new`, with explicit tolerances for the self-intersection check.
    pub fn new_with(points: Vec<FlatPoint>, cfg: GeomCfg) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeomError::InsufficientPoints {
                required: 3,
                got: points.len(),
            });
        }
        let mut ring = FlatLine::remove_duplicated_points(&points);
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(GeomError::InsufficientPoints {
                required: 3,
                got: ring.len(),
            });
        }
        ring.push(ring[0]);

        let closed = FlatLine::new(ring)?;
        if closed.has_self_intersection_with(cfg) {
            return Err(GeomError::SelfIntersectingPolygon);
        }
        Ok(Self {
            bbox: closed.bounding_box(),
            ring: closed.points().to_vec(),
            area: OnceLock::new(),
            edge_length: OnceLock::new(),
        })
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.ring[0].crs()
    }

    /// Number of distinct vertices (closing point excluded).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.ring.len() - 1
    }

    /// Vertices without the closing duplicate.
    #[inline]
    pub fn vertices(&self) -> &[FlatPoint] {
        &self.ring[..self.ring.len() - 1]
    }

    #[inline]
    pub fn bounding_box(&self) -> FlatBoundingBox {
        self.bbox
    }

    /// Signed shoelace sum: positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.ring
            .windows(2)
            .map(|w| w[0].x() * w[1].y() - w[1].x() * w[0].y())
            .sum::<f64>()
            / 2.0
    }

    /// Absolute shoelace area.
    pub fn area(&self) -> f64 {
        *self.area.get_or_init(|| self.signed_area().abs())
    }

    /// Perimeter.
    pub fn edge_length(&self) -> f64 {
        *self.edge_length.get_or_init(|| {
            self.ring
                .windows(2)
                .map(|w| w[0].dist_unchecked(&w[1]))
                .sum()
        })
    }

    /// Area centroid. Fails for zero-area (collinear) rings.
    pub fn centroid(&self) -> Result<FlatPoint> {
        if self.area() == 0.0 {
            return Err(GeomError::degenerate("centroid of zero-area polygon"));
        }
        let signed = self.signed_area();
        let (mut cx, mut cy) = (0.0, 0.0);
        for w in self.ring.windows(2) {
            let (p, q) = (w[0], w[1]);
            let cross = p.x() * q.y() - q.x() * p.y();
            cx += (p.x() + q.x()) * cross;
            cy += (p.y() + q.y()) * cross;
        }
        Ok(FlatPoint::with_crs(cx / (6.0 * signed), cy / (6.0 * signed), self.crs()))
    }

    /// Crossing-number test with a horizontal ray toward +x.
    ///
    /// Points on the bottom/left boundary count as inside, top/right as outside.
    pub fn contains(&self, p: &FlatPoint) -> Result<bool> {
        GeomError::check_same(self.crs(), p.crs())?;
        Ok(self.contains_unchecked(p))
    }

    fn contains_unchecked(&self, p: &FlatPoint) -> bool {
        let mut crossings = 0usize;
        for w in self.ring.windows(2) {
            let (a, b) = (w[0], w[1]);
            let spans = (a.y() <= p.y() && p.y() < b.y()) || (b.y() <= p.y() && p.y() < a.y());
            if !spans {
                continue;
            }
            let x_at = a.x() + (p.y() - a.y()) * (b.x() - a.x()) / (b.y() - a.y());
            if p.x() < x_at {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// Uniform interior point by rejection sampling from the bounding box.
    pub fn pick_random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<FlatPoint> {
        self.pick_random_point_with(rng, GeomCfg::default())
    }

    /// Gives up with `SamplingExhausted` after `cfg.max_sample_attempts` draws.
    pub fn pick_random_point_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        cfg: GeomCfg,
    ) -> Result<FlatPoint> {
        for _ in 0..cfg.max_sample_attempts {
            let p = self.bbox.pick_random_point(rng);
            if self.contains_unchecked(&p) {
                return Ok(p);
            }
        }
        tracing::warn!(
            attempts = cfg.max_sample_attempts,
            area = self.area(),
            "polygon rejection sampling exhausted"
        );
        Err(GeomError::SamplingExhausted {
            attempts: cfg.max_sample_attempts,
        })
    }
}

impl PartialEq for FlatPolygon {
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring
    }
}

impl fmt::Display for FlatPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.ring.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}
