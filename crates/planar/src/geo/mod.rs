//! Geographic (WGS84 longitude/latitude) values and the polyline codec.
//!
//! Invariants
//! - Every value here is implicitly tagged `Crs::Epsg4326`.
//! - Longitude is in `[-180, 180]`, latitude in `[-90, 90]`; constructors
//!   and the decoder reject anything else with `GeomError::OutOfRange`.
//! - Distances are great-circle metres; there is no geodesic segment math.

mod bbox;
mod line;
mod point;
pub mod polyline;

pub use bbox::GeoBoundingBox;
pub use line::GeoLine;
pub use point::{GeoPoint, EARTH_RADIUS_M};
