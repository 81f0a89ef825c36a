//! Untagged 2D displacement vector.
//!
//! - Headings are clockwise degrees from local north `(0, 1)`, in `[0, 360)`.
//! - The zero vector is a valid value. It normalizes to itself, has heading 0,
//!   and is never parallel or orthogonal to anything.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use nalgebra::Vector2;

use crate::error::{GeomError, Result};

/// 2D vector `(x, y)` with derived Euclidean `size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    v: Vector2<f64>,
}

impl Vector {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            v: Vector2::new(x, y),
        }
    }

    /// Unit vector pointing along `heading` (clockwise degrees, 0 = +y).
    pub fn from_heading(heading: f64) -> Self {
        let rad = heading.rem_euclid(360.0).to_radians();
        Self::new(rad.sin(), rad.cos())
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            v: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.v.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.v.y
    }

    /// Euclidean length.
    #[inline]
    pub fn size(&self) -> f64 {
        self.v.norm()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.v.x == 0.0 && self.v.y == 0.0
    }

    #[inline]
    pub fn as_nalgebra(&self) -> Vector2<f64> {
        self.v
    }

    #[inline]
    pub fn dot(a: Vector, b: Vector) -> f64 {
        a.v.dot(&b.v)
    }

    /// z-component of the 3D cross product `a × b`.
    #[inline]
    pub fn cross(a: Vector, b: Vector) -> f64 {
        a.v.perp(&b.v)
    }

    /// Scalar division; fails when `a == 0`.
    pub fn try_div(self, a: f64) -> Result<Vector> {
        if a == 0.0 {
            return Err(GeomError::DivideByZero);
        }
        Ok(Self { v: self.v / a })
    }

    /// `|sin(angle)| < sin(tol)`. False whenever either vector is zero.
    pub fn is_parallel(a: Vector, b: Vector, tol_deg: f64) -> bool {
        if a.is_zero() || b.is_zero() {
            return false;
        }
        let sin_ab = (Self::cross(a, b) / (a.size() * b.size())).abs();
        sin_ab < tol_deg.abs().to_radians().sin()
    }

    /// `|cos(angle)| < sin(tol)`. False whenever either vector is zero.
    pub fn is_orthogonal(a: Vector, b: Vector, tol_deg: f64) -> bool {
        if a.is_zero() || b.is_zero() {
            return false;
        }
        let cos_ab = (Self::dot(a, b) / (a.size() * b.size())).abs();
        cos_ab < tol_deg.abs().to_radians().sin()
    }

    /// Smaller angle between `a` and `b` in degrees, `[0, 180]`; 0 if either is zero.
    pub fn angle_deg(a: Vector, b: Vector) -> f64 {
        if a.is_zero() || b.is_zero() {
            return 0.0;
        }
        let cos = (Self::dot(a, b) / a.size() / b.size()).clamp(-1.0, 1.0);
        cos.acos().to_degrees()
    }

    /// Unit vector in the same direction; the zero vector maps to itself.
    pub fn normalized(&self) -> Vector {
        let n = self.size();
        if n == 0.0 {
            *self
        } else {
            Self { v: self.v / n }
        }
    }

    /// Clockwise bearing from north in `[0, 360)`; 0 for the zero vector.
    pub fn heading(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let north = Vector::new(0.0, 1.0);
        let cos = Self::dot(north, self.normalized()).clamp(-1.0, 1.0);
        let deg = cos.acos().to_degrees();
        if self.v.x >= 0.0 {
            deg
        } else {
            // acos is two-valued; western half wraps around.
            (360.0 - deg) % 360.0
        }
    }

    /// Unit vector at `heading + degrees` (clockwise). Magnitude is not kept.
    ///
    /// The zero vector has no direction and is returned unchanged.
    pub fn rotated(&self, degrees: f64) -> Vector {
        if self.is_zero() {
            return *self;
        }
        Vector::from_heading(self.heading() + degrees)
    }

    /// Heading in `[0, 180)`: `x > 0`, or `x == 0 && y > 0`.
    #[inline]
    pub fn is_rightward_directed(&self) -> bool {
        self.v.x > 0.0 || (self.v.x == 0.0 && self.v.y > 0.0)
    }

    /// Self or its negation, whichever is rightward-directed.
    pub fn rightward_flipped(&self) -> Vector {
        if self.is_rightward_directed() {
            *self
        } else {
            -*self
        }
    }
}

impl From<Vector2<f64>> for Vector {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self { v }
    }
}

impl Neg for Vector {
    type Output = Vector;
    #[inline]
    fn neg(self) -> Vector {
        Self { v: -self.v }
    }
}

impl Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Self { v: self.v + rhs.v }
    }
}

impl Sub for Vector {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Self { v: self.v - rhs.v }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, a: f64) -> Vector {
        Self { v: self.v * a }
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;
    #[inline]
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.v.x, self.v.y)
    }
}

/// Parses `"x, y"`, `"(x, y)"` or `"[x, y]"`.
impl FromStr for Vector {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = parse_pair(s).ok_or_else(|| GeomError::Parse {
            input: s.to_string(),
        })?;
        Ok(Vector::new(x, y))
    }
}

/// Shared `"(x, y)"` parser for vectors and points.
pub(crate) fn parse_pair(s: &str) -> Option<(f64, f64)> {
    let trim: &[char] = &['(', ')', '[', ']', ' '];
    let inner = s.trim().trim_matches(trim);
    let mut parts = inner.split(',');
    let x = parts.next()?.trim().parse().ok()?;
    let y = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebra_basics() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(-3.0, 0.5);
        assert_eq!(a + b, Vector::new(-2.0, 2.5));
        assert_eq!(a - b, Vector::new(4.0, 1.5));
        assert_eq!(-a, Vector::new(-1.0, -2.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert!((Vector::dot(a, b) - (-2.0)).abs() < 1e-12);
        assert!((Vector::cross(a, b) - 6.5).abs() < 1e-12);
        assert!((Vector::new(3.0, 4.0).size() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn division_by_zero_fails() {
        let a = Vector::new(1.0, 2.0);
        assert_eq!(a.try_div(0.0), Err(GeomError::DivideByZero));
        assert_eq!(a.try_div(2.0).unwrap(), Vector::new(0.5, 1.0));
    }

    #[test]
    fn zero_vector_is_never_parallel_or_orthogonal() {
        let z = Vector::zero();
        let a = Vector::new(1.0, 0.0);
        assert!(!Vector::is_parallel(z, a, 10.0));
        assert!(!Vector::is_parallel(a, z, 10.0));
        assert!(!Vector::is_parallel(z, z, 10.0));
        assert!(!Vector::is_orthogonal(z, a, 10.0));
        assert!(!Vector::is_orthogonal(z, z, 10.0));
        assert_eq!(z.normalized(), z);
        assert_eq!(z.heading(), 0.0);
        assert_eq!(Vector::angle_deg(z, a), 0.0);
    }

    #[test]
    fn parallel_and_orthogonal_with_tolerance() {
        let a = Vector::new(1.0, 0.0);
        assert!(Vector::is_parallel(a, Vector::new(-5.0, 0.0), 0.001));
        assert!(!Vector::is_parallel(a, Vector::new(1.0, 0.1), 0.001));
        assert!(Vector::is_parallel(a, Vector::new(1.0, 0.1), 10.0));
        assert!(Vector::is_orthogonal(a, Vector::new(0.0, 2.0), 0.001));
        assert!(!Vector::is_orthogonal(a, Vector::new(1.0, 1.0), 0.001));
    }

    #[test]
    fn headings_cover_all_quadrants() {
        let cases = [
            ((0.0, 1.0), 0.0),
            ((1.0, 0.0), 90.0),
            ((0.0, -1.0), 180.0),
            ((-1.0, 0.0), 270.0),
            ((-1.0, 1.0), 315.0),
            ((1.0, -1.0), 135.0),
        ];
        for ((x, y), expected) in cases {
            let h = Vector::new(x, y).heading();
            assert!((h - expected).abs() < 1e-9, "({x},{y}) -> {h}");
            assert!((0.0..360.0).contains(&h));
        }
    }

    #[test]
    fn rotation_composes_headings() {
        let v = Vector::new(3.0, 3.0);
        let r = v.rotated(90.0);
        assert!((r.heading() - 135.0).abs() < 1e-9);
        assert!((r.size() - 1.0).abs() < 1e-12);
        let w = Vector::new(-1.0, 0.0).rotated(135.0);
        assert!((w.heading() - 45.0).abs() < 1e-9);
        assert!((Vector::from_heading(-90.0).heading() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn rightward_flip() {
        assert!(Vector::new(0.0, 1.0).is_rightward_directed());
        assert!(!Vector::new(0.0, -1.0).is_rightward_directed());
        assert!(!Vector::zero().is_rightward_directed());
        assert_eq!(Vector::new(-2.0, 1.0).rightward_flipped(), Vector::new(2.0, -1.0));
    }

    #[test]
    fn parse_forms() {
        assert_eq!("(1.5, -2)".parse::<Vector>().unwrap(), Vector::new(1.5, -2.0));
        assert_eq!("[3,4]".parse::<Vector>().unwrap(), Vector::new(3.0, 4.0));
        assert!("1,2,3".parse::<Vector>().is_err());
        assert!("a,b".parse::<Vector>().is_err());
    }
}
