//! Error kinds surfaced by geometry operations.
//!
//! Every failure is local to the call that produced it and non-retryable:
//! the inputs themselves are invalid for the requested operation.

use thiserror::Error;

use crate::crs::Crs;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeomError>;

/// Errors produced by the geometry kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// A non-empty point or value collection was required.
    #[error("input is empty: {what}")]
    EmptyInput { what: &'static str },

    /// Fewer points than the shape requires.
    #[error("need at least {required} points, got {got}")]
    InsufficientPoints { required: usize, got: usize },

    /// Two operands carry different coordinate tags.
    #[error("coordinate systems differ: {left} vs {right}")]
    CoordinateSystemMismatch { left: Crs, right: Crs },

    /// The tag is not usable for this kind of value (flat vs ellipsoidal, or untagged).
    #[error("unsupported coordinate system {crs}: {reason}")]
    UnsupportedCoordinateSystem { crs: Crs, reason: &'static str },

    /// Polygon input whose closed ring crosses itself.
    #[error("polygon ring intersects itself")]
    SelfIntersectingPolygon,

    /// Zero-length vector, segment or zero-area shape fed into an operation that needs extent.
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: &'static str },

    /// Scalar division by zero.
    #[error("division of vector by zero")]
    DivideByZero,

    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Malformed polyline codec input.
    #[error("invalid polyline encoding at byte {position}: {reason}")]
    InvalidEncoding { position: usize, reason: String },

    #[error("cannot parse {input:?} as a coordinate pair")]
    Parse { input: String },

    /// Coordinate outside its valid domain (e.g. latitude beyond ±90).
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Rejection sampling gave up after the configured number of draws.
    #[error("no interior point found after {attempts} attempts")]
    SamplingExhausted { attempts: usize },

    #[error(transparent)]
    Reprojection(#[from] ReprojectionError),
}

/// Failure reported by a `Reproject` implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReprojectionError {
    #[error("no projection from {from} to {to}")]
    Unsupported { from: Crs, to: Crs },

    #[error("cannot reproject {which} value with no coordinate system")]
    Untagged { which: &'static str },

    #[error("projection {from} -> {to} failed: {reason}")]
    Failed { from: Crs, to: Crs, reason: String },
}

impl GeomError {
    pub(crate) fn empty(what: &'static str) -> Self {
        Self::EmptyInput { what }
    }

    pub(crate) fn degenerate(reason: &'static str) -> Self {
        Self::DegenerateGeometry { reason }
    }

    pub(crate) fn invalid_encoding(position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            position,
            reason: reason.into(),
        }
    }

    /// `Ok(())` when both tags agree.
    pub(crate) fn check_same(left: Crs, right: Crs) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Self::CoordinateSystemMismatch { left, right })
        }
    }
}
