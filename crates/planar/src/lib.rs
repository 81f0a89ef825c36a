//! Flat-plane geometry kernel with coordinate-system tagging.
//!
//! Layout
//! - `flat`: Euclidean primitives (interval, vector, point, box, segment,
//!   polyline, polygon) carrying a `Crs` tag.
//! - `geo`: longitude/latitude points, lines and boxes plus the Google
//!   polyline codec.
//! - `crs`: the tag enum and the consumed `Reproject` capability.
//!
//! Conventions
//! - Every shape is an immutable value. Derived quantities (length, area) are
//!   computed once on first access.
//! - Operations between two tagged values require equal tags. Reprojection is
//!   explicit only (`crs::homogenize`, `FlatPoint::transform`,
//!   `FlatPoint::to_geo`).
//! - Tolerances live in `GeomCfg`; plain methods use `GeomCfg::default()`.

pub mod cfg;
pub mod crs;
pub mod error;
pub mod flat;
pub mod geo;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::GeomCfg;
pub use crs::{homogenize, Crs, Reproject};
pub use error::{GeomError, ReprojectionError, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::GeomCfg;
    pub use crate::crs::{homogenize, Crs, Reproject};
    pub use crate::error::{GeomError, ReprojectionError};
    pub use crate::flat::{
        FlatBoundingBox, FlatLine, FlatPoint, FlatPolygon, Interval, LineSegment, Vector,
    };
    pub use crate::geo::{polyline, GeoBoundingBox, GeoLine, GeoPoint};
}
