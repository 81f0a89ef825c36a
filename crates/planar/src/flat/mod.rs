//! Flat-plane (Euclidean) primitives.
//!
//! Dependency order, leaves first: `Interval` → `Vector`/`FlatPoint` →
//! `FlatBoundingBox` → `LineSegment` → `FlatLine` → `FlatPolygon`.
//!
//! Invariants
//! - Points, boxes, lines and polygons carry one `Crs`; constructors reject
//!   mixed tags and ellipsoidal tags.
//! - Vectors are untagged displacements backed by `nalgebra::Vector2`.

mod bbox;
mod interval;
mod line;
mod point;
mod polygon;
mod segment;
mod vector;

pub use bbox::FlatBoundingBox;
pub use interval::Interval;
pub use line::{FlatLine, NearestPoint};
pub use point::FlatPoint;
pub use polygon::FlatPolygon;
pub use segment::LineSegment;
pub use vector::Vector;

pub(crate) use vector::parse_pair;

#[cfg(test)]
mod tests;
