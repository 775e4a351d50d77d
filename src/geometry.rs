use crate::Error;
use std::{
    fmt,
    ops::{Add, Mul, Sub},
    str::FromStr,
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;
pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Format floats in a compact way suitable for logging control points
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON {
        write!(f, "{}", value.trunc() as i64)
    } else if value_abs > 9999.0 || value_abs <= 0.0001 {
        write!(f, "{:.3e}", value)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        write!(f, "{}", (value * round).round() / round)
    }
}

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)?;
        Ok(())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Scalar {
        self.0[0]
    }

    /// Get `y` compenent of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Get length of the vector (distance from the origin)
    pub fn length(self) -> Scalar {
        let Self([x, y]) = self;
        x.hypot(y)
    }

    /// Distance between two points
    pub fn dist(self, other: Self) -> Scalar {
        (self - other).length()
    }

    /// Linear interpolation `(1 - t) * self + t * other`
    #[inline]
    pub fn lerp(self, other: Self, t: Scalar) -> Self {
        (1.0 - t) * self + t * other
    }

    /// Pixel that contains this point, `(row, col)` may be negative
    #[inline]
    pub fn pixel(self) -> (i64, i64) {
        (self.y().floor() as i64, self.x().floor() as i64)
    }

    /// Determine if self is close to the other within the margin of error
    pub fn is_close_to(self, other: Point, eps: Scalar) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < eps && (y0 - y1).abs() < eps
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(xy: (i32, i32)) -> Self {
        Self([xy.0 as Scalar, xy.1 as Scalar])
    }
}

/// Parse point from `x,y` (whitespace separated `x y` is accepted as well)
impl FromStr for Point {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPoint(text.to_string());
        let mut coords = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<Scalar>().map_err(|_| invalid()));
        let x = coords.next().ok_or_else(invalid)??;
        let y = coords.next().ok_or_else(invalid)??;
        if coords.next().is_some() || !x.is_finite() || !y.is_finite() {
            return Err(invalid());
        }
        Ok(Point::new(x, y))
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_point_parse() -> Result<(), Error> {
        assert_eq!("100,200".parse::<Point>()?, Point::new(100.0, 200.0));
        assert_eq!(" 1.5 -2".parse::<Point>()?, Point::new(1.5, -2.0));
        assert!("1".parse::<Point>().is_err());
        assert!("1,2,3".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
        assert!("inf,1".parse::<Point>().is_err());
        Ok(())
    }

    #[test]
    fn test_point_ops() {
        let p0 = Point::new(1.0, 2.0);
        let p1 = Point::new(4.0, 6.0);
        assert_approx_eq!(p0.dist(p1), 5.0);
        assert_eq!(p0.lerp(p1, 0.0), p0);
        assert_eq!(p0.lerp(p1, 1.0), p1);
        assert!(p0.lerp(p1, 0.5).is_close_to(Point::new(2.5, 4.0), 1e-12));
        assert_eq!(Point::new(-0.5, 3.7).pixel(), (3, -1));
        assert_eq!(format!("{:?}", Point::new(1.0, 0.25)), "1,0.25");
    }
}
