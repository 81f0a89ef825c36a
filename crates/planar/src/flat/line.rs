//! Polyline on a flat plane.
//!
//! Purpose
//! - Ordered point sequence with length, nearest-point search, side test,
//!   trimming, densification and intersection queries.
//!
//! Invariants
//! - At least two points (a single input point is duplicated).
//! - All points share the line's `Crs`.
//! - Immutable; `length()` is computed once on first access.

use std::fmt;
use std::ops::Index;
use std::sync::OnceLock;

use crate::cfg::GeomCfg;
use crate::crs::Crs;
use crate::error::{GeomError, Result};

use super::{FlatBoundingBox, FlatPoint, LineSegment};

/// Nearest point of one segment to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestPoint {
    /// Segment index `i` (vertices `i` and `i + 1`).
    pub segment: usize,
    pub point: FlatPoint,
    pub distance: f64,
}

/// Polyline with a cached length.
#[derive(Clone, Debug)]
pub struct FlatLine {
    points: Vec<FlatPoint>,
    crs: Crs,
    bbox: FlatBoundingBox,
    length: OnceLock<f64>,
}

impl FlatLine {
    /// Build from points sharing one tag. One point is duplicated into a zero-length line.
    pub fn new(mut points: Vec<FlatPoint>) -> Result<Self> {
        let first = *points.first().ok_or_else(|| GeomError::empty("line points"))?;
        let bbox = FlatBoundingBox::from_points(&points)?;
        if points.len() == 1 {
            points.push(first);
        }
        Ok(Self {
            points,
            crs: first.crs(),
            bbox,
            length: OnceLock::new(),
        })
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Number of points (always ≥ 2).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[FlatPoint] {
        &self.points
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, FlatPoint> {
        self.points.iter()
    }

    #[inline]
    pub fn bounding_box(&self) -> FlatBoundingBox {
        self.bbox
    }

    /// Sum of consecutive distances.
    pub fn length(&self) -> f64 {
        *self.length.get_or_init(|| {
            self.points
                .windows(2)
                .map(|w| w[0].dist_unchecked(&w[1]))
                .sum()
        })
    }

    /// Collapse runs of identical consecutive points, keeping order.
    pub fn remove_duplicated_points(points: &[FlatPoint]) -> Vec<FlatPoint> {
        let mut out = points.to_vec();
        out.dedup();
        out
    }

    pub fn reversed(&self) -> FlatLine {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            crs: self.crs,
            bbox: self.bbox,
            length: self.length.clone(),
        }
    }

    /// Densify so consecutive points are at most `max_distance` apart.
    ///
    /// A segment of length `d > max_distance` gets `floor(d / max_distance)`
    /// extra points splitting it into equal parts.
    pub fn interpolate(&self, max_distance: f64) -> Result<FlatLine> {
        if !(max_distance.is_finite() && max_distance > 0.0) {
            return Err(GeomError::degenerate("interpolation distance must be positive"));
        }
        let extras: Vec<f64> = self
            .points
            .windows(2)
            .map(|w| {
                let d = w[0].dist_unchecked(&w[1]);
                if d > max_distance {
                    (d / max_distance).floor()
                } else {
                    0.0
                }
            })
            .collect();
        const TOO_MANY: &str = "interpolation needs more points than fit in memory";
        let total = extras.iter().sum::<f64>() + self.len() as f64;
        if !(total < usize::MAX as f64) {
            return Err(GeomError::degenerate(TOO_MANY));
        }
        let mut out = Vec::new();
        out.try_reserve_exact(total as usize).map_err(|_| GeomError::degenerate(TOO_MANY))?;
        out.push(self.points[0]);
        for (w, &extra) in self.points.windows(2).zip(&extras) {
            let (prev, next) = (w[0], w[1]);
            if extra > 0.0 {
                let extra = extra as usize;
                let d = prev.dist_unchecked(&next);
                let step = prev.delta(&next).normalized() * (d / (extra + 1) as f64);
                out.extend((1..=extra).map(|i| prev + step * i as f64));
            }
            out.push(next);
        }
        FlatLine::new(out)
    }

    /// Segments between adjacent points, in order.
    pub fn line_segments(&self) -> Vec<LineSegment> {
        self.points
            .windows(2)
            .map(|w| LineSegment::new_unchecked(w[0], w[1]))
            .collect()
    }

    /// Segment `i` (points `i` and `i + 1`), `i < len() - 1`.
    pub fn line_segment(&self, i: usize) -> Result<LineSegment> {
        if i + 1 >= self.points.len() {
            return Err(GeomError::IndexOutOfRange {
                index: i,
                len: self.points.len() - 1,
            });
        }
        Ok(LineSegment::new_unchecked(self.points[i], self.points[i + 1]))
    }

    /// Every segment whose projection of `target` attains the minimum distance.
    ///
    /// Ties are all returned, ordered by segment index.
    pub fn nearest_points(&self, target: &FlatPoint) -> Result<Vec<NearestPoint>> {
        GeomError::check_same(self.crs, target.crs())?;
        let candidates: Vec<NearestPoint> = self
            .line_segments()
            .iter()
            .enumerate()
            .map(|(segment, s)| {
                let point = s.nearest_unchecked(target);
                NearestPoint {
                    segment,
                    point,
                    distance: point.dist_unchecked(target),
                }
            })
            .collect();
        let min = candidates
            .iter()
            .map(|c| c.distance)
            .fold(f64::INFINITY, f64::min);
        Ok(candidates.into_iter().filter(|c| c.distance <= min).collect())
    }

    /// For each tied nearest segment: `(segment, true)` if `target` lies to its right.
    ///
    /// A point exactly on the line is reported as not on the right.
    pub fn is_point_on_the_right_side(&self, target: &FlatPoint) -> Result<Vec<(usize, bool)>> {
        let nearest = self.nearest_points(target)?;
        Ok(nearest
            .into_iter()
            .map(|n| {
                let direction = self.points[n.segment].delta(&self.points[n.segment + 1]);
                let to_target = n.point.delta(target);
                (n.segment, super::Vector::cross(to_target, direction) > 0.0)
            })
            .collect())
    }

    /// Section of the line between the projections of `start` and `end`,
    /// directed from `start` toward `end`.
    ///
    /// Ties pick the first nearest segment for `start` and the last for `end`.
    /// With `include_endpoints` the raw `start`/`end` are added at both ends.
    /// Consecutive duplicates are collapsed.
    pub fn trim(
        &self,
        start: &FlatPoint,
        end: &FlatPoint,
        include_endpoints: bool,
    ) -> Result<FlatLine> {
        let s = first_nearest(self.nearest_points(start)?)?;
        let e = last_nearest(self.nearest_points(end)?)?;

        let mut out = Vec::with_capacity(self.len() + 4);
        if include_endpoints {
            out.push(*start);
        }
        out.push(s.point);
        if s.segment < e.segment {
            out.extend_from_slice(&self.points[s.segment + 1..=e.segment]);
        } else if s.segment > e.segment {
            out.extend(self.points[e.segment + 1..=s.segment].iter().rev());
        }
        out.push(e.point);
        if include_endpoints {
            out.push(*end);
        }
        FlatLine::new(Self::remove_duplicated_points(&out))
    }

    /// True if any two non-adjacent segments intersect.
    ///
    /// Adjacency is taken after collapsing repeated vertices. Consecutive
    /// segments share an endpoint and are skipped. On a closed
    /// line (last point equals first) the first and last segments are
    /// adjacent as well.
    pub fn has_self_intersection(&self) -> bool {
        self.has_self_intersection_with(GeomCfg::default())
    }

    pub fn has_self_intersection_with(&self, cfg: GeomCfg) -> bool {
        // Repeated vertices would leave zero-length segments between real neighbours.
        let pts = Self::remove_duplicated_points(&self.points);
        let segs: Vec<LineSegment> = pts
            .windows(2)
            .map(|w| LineSegment::new_unchecked(w[0], w[1]))
            .collect();
        let n = segs.len();
        let closed = n > 2 && pts[0] == pts[n];
        for i in 0..n {
            for j in (i + 2)..n {
                if closed && i == 0 && j == n - 1 {
                    continue;
                }
                if segs[i].intersection_unchecked(&segs[j], cfg).is_some() {
                    tracing::debug!(i, j, "self intersection");
                    return true;
                }
            }
        }
        false
    }

    /// All pairwise segment intersections of `a` and `b`; tags must match.
    pub fn intersections(a: &FlatLine, b: &FlatLine) -> Result<Vec<FlatPoint>> {
        GeomError::check_same(a.crs, b.crs)?;
        let cfg = GeomCfg::default();
        let b_segs = b.line_segments();
        let mut out = Vec::with_capacity(a.len() + b.len());
        for sa in a.line_segments() {
            out.extend(b_segs.iter().filter_map(|sb| sa.intersection_unchecked(sb, cfg)));
        }
        Ok(out)
    }

    #[inline]
    pub fn intersections_with(&self, other: &FlatLine) -> Result<Vec<FlatPoint>> {
        Self::intersections(self, other)
    }
}

fn first_nearest(v: Vec<NearestPoint>) -> Result<NearestPoint> {
    v.into_iter().next().ok_or_else(|| GeomError::empty("nearest points"))
}

fn last_nearest(v: Vec<NearestPoint>) -> Result<NearestPoint> {
    v.into_iter().last().ok_or_else(|| GeomError::empty("nearest points"))
}

impl PartialEq for FlatLine {
    fn eq(&self, other: &Self) -> bool {
        self.crs == other.crs && self.points == other.points
    }
}

impl Index<usize> for FlatLine {
    type Output = FlatPoint;
    #[inline]
    fn index(&self, i: usize) -> &FlatPoint {
        &self.points[i]
    }
}

impl<'a> IntoIterator for &'a FlatLine {
    type Item = &'a FlatPoint;
    type IntoIter = std::slice::Iter<'a, FlatPoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for FlatLine {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> FlatPoint {
        FlatPoint::tagged(x, y, Crs::Epsg5179).unwrap()
    }

    fn line(pts: &[(f64, f64)]) -> FlatLine {
        FlatLine::new(pts.iter().map(|&(x, y)| p(x, y)).collect()).unwrap()
    }

    #[test]
    fn construction_rules() {
        assert!(matches!(FlatLine::new(vec![]), Err(GeomError::EmptyInput { .. })));
        let single = FlatLine::new(vec![p(1.0, 1.0)]).unwrap();
        assert_eq!(single.len(), 2);
        assert_eq!(single.length(), 0.0);
        let mixed = FlatLine::new(vec![p(0.0, 0.0), FlatPoint::new(1.0, 1.0)]);
        assert!(matches!(mixed, Err(GeomError::CoordinateSystemMismatch { .. })));
    }

    #[test]
    fn length_is_cached_and_reversal_invariant() {
        let l = line(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
        assert!((l.length() - 11.0).abs() < 1e-12);
        assert!((l.length() - l.reversed().length()).abs() < 1e-12);
        assert_eq!(l.reversed()[0], p(3.0, 10.0));
        assert_eq!(l.to_string(), "[[0,0],[3,4],[3,10]]");
    }

    #[test]
    fn duplicates_collapse_only_when_consecutive() {
        let pts = vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(0.0, 0.0)];
        let out = FlatLine::remove_duplicated_points(&pts);
        assert_eq!(out, vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0)]);
        assert!(FlatLine::remove_duplicated_points(&[]).is_empty());
    }

    #[test]
    fn interpolation_bounds_spacing() {
        let l = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 1.0)]);
        let dense = l.interpolate(3.0).unwrap();
        // 10 / 3 -> 3 extra points on the first segment, none on the second
        assert_eq!(dense.len(), 3 + 3);
        for w in dense.points().windows(2) {
            assert!(w[0].distance(&w[1]).unwrap() <= 3.0 + 1e-12);
        }
        assert_eq!(dense[0], p(0.0, 0.0));
        assert_eq!(dense[4], p(10.0, 0.0));
        assert_eq!(dense[5], p(10.0, 1.0));
        assert!((dense.length() - l.length()).abs() < 1e-9);
        assert!(l.interpolate(0.0).is_err());
    }

    #[test]
    fn interpolation_rejects_unbounded_output() {
        let l = line(&[(0.0, 0.0), (10.0, 0.0)]);
        for tiny in [1e-300, f64::MIN_POSITIVE] {
            let err = l.interpolate(tiny).unwrap_err();
            assert!(matches!(err, GeomError::DegenerateGeometry { .. }));
        }
    }

    #[test]
    fn segment_indexing() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(l.line_segments().len(), 2);
        let s = l.line_segment(1).unwrap();
        assert_eq!((s.start(), s.end()), (p(1.0, 0.0), p(1.0, 1.0)));
        assert!(matches!(
            l.line_segment(2),
            Err(GeomError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn nearest_points_returns_ties() {
        // Target is equally close to both legs of a right-angle corner
        let l = line(&[(-1.0, 0.0), (0.0, 0.0), (0.0, -1.0)]);
        let near = l.nearest_points(&p(1.0, 1.0)).unwrap();
        assert_eq!(near.len(), 2);
        assert_eq!((near[0].segment, near[1].segment), (0, 1));
        assert_eq!(near[0].point, p(0.0, 0.0));
        assert_eq!(near[0].distance, near[1].distance);

        let single = l.nearest_points(&p(-2.0, 0.5)).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].point, p(-1.0, 0.0));
    }

    #[test]
    fn right_side_follows_direction() {
        let l = line(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(l.is_point_on_the_right_side(&p(5.0, -1.0)).unwrap(), vec![(0, true)]);
        assert_eq!(l.is_point_on_the_right_side(&p(5.0, 1.0)).unwrap(), vec![(0, false)]);
        let back = l.reversed();
        assert_eq!(back.is_point_on_the_right_side(&p(5.0, 1.0)).unwrap(), vec![(0, true)]);
    }

    #[test]
    fn right_side_reports_every_tied_segment() {
        // east then north; both legs are equally near to either target
        let l = line(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        let outside = l.is_point_on_the_right_side(&p(3.0, -1.0)).unwrap();
        assert_eq!(outside, vec![(0, true), (1, true)]);
        let inside = l.is_point_on_the_right_side(&p(1.0, 1.0)).unwrap();
        assert_eq!(inside, vec![(0, false), (1, false)]);
    }

    #[test]
    fn trim_forward_backward_and_same_segment() {
        let l = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (20.0, 10.0)]);

        let fwd = l.trim(&p(2.0, 1.0), &p(11.0, 5.0), false).unwrap();
        assert_eq!(fwd.points(), &[p(2.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)]);

        let back = l.trim(&p(15.0, 11.0), &p(3.0, -1.0), true).unwrap();
        assert_eq!(
            back.points(),
            &[p(15.0, 11.0), p(15.0, 10.0), p(10.0, 10.0), p(10.0, 0.0), p(3.0, 0.0), p(3.0, -1.0)]
        );

        let same = l.trim(&p(8.0, 1.0), &p(4.0, 1.0), false).unwrap();
        assert_eq!(same.points(), &[p(8.0, 0.0), p(4.0, 0.0)]);
    }

    #[test]
    fn bowtie_self_intersects() {
        let bowtie = line(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
        assert!(bowtie.has_self_intersection());
        let zigzag = line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
        assert!(!zigzag.has_self_intersection());
        let ring = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        assert!(!ring.has_self_intersection());
    }

    #[test]
    fn repeated_vertices_keep_neighbours_adjacent() {
        let corner = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(!corner.has_self_intersection());
        let ring = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0), (0.0, 0.0)]);
        assert!(!ring.has_self_intersection());
        let bowtie = line(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
        assert!(bowtie.has_self_intersection());
    }

    #[test]
    fn cross_line_intersections() {
        let a = line(&[(0.0, 0.0), (4.0, 4.0), (8.0, 0.0)]);
        let b = line(&[(0.0, 2.0), (8.0, 2.0)]);
        let xs = a.intersections_with(&b).unwrap();
        assert_eq!(xs.len(), 2);
        assert!((xs[0].x() - 2.0).abs() < 1e-12 && (xs[1].x() - 6.0).abs() < 1e-12);
        let untagged =
            FlatLine::new(vec![FlatPoint::new(0.0, 0.0), FlatPoint::new(1.0, 1.0)]).unwrap();
        assert!(FlatLine::intersections(&a, &untagged).is_err());
    }
}
