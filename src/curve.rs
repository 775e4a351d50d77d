//! Cubic bezier curve evaluation
//!
//! Two ways to find a point on the curve are provided, closed form polynomial
//! evaluation `Cubic::at` and de Casteljau's recursive reduction `casteljau`.
//! Both produce the same point up to floating point error.

use crate::{Error, Point, Scalar};
use smallvec::SmallVec;
use std::fmt;

/// Reduced sequence of control points, never spills to the heap for cubic curves
pub type Reduced = SmallVec<[Point; 4]>;

/// Cubic bezier curve
///
/// Polynimial form:
/// `(1 - t) ^ 3 * p0 + 3 * (1 - t) ^ 2 * t * p1 + 3 * (1 - t) * t ^ 2 * p2 + t ^ 3 * p3`
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cubic(pub [Point; 4]);

impl fmt::Debug for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cubic([p0, p1, p2, p3]) = self;
        write!(f, "Cubic {:?} {:?} {:?} {:?}", p0, p1, p2, p3)
    }
}

impl Cubic {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn points(&self) -> [Point; 4] {
        self.0
    }

    /// Point at which curve starts
    pub fn start(&self) -> Point {
        self.0[0]
    }

    /// Point at which curve ends
    pub fn end(&self) -> Point {
        self.0[3]
    }

    /// Evaluate curve at parameter value `t` in (0.0..=1.0) using the polynomial form
    pub fn at(&self, t: Scalar) -> Point {
        // at(t) =
        //   (1 - t) ^ 3 * p0 +
        //   3 * (1 - t) ^ 2 * t * p1 +
        //   3 * (1 - t) * t ^ 2 * p2 +
        //   t ^ 3 * p3
        let Self([p0, p1, p2, p3]) = *self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        let (t3, t_3) = (t2 * t1, t_2 * t_1);
        t_3 * p0 + 3.0 * t1 * t_2 * p1 + 3.0 * t2 * t_1 * p2 + t3 * p3
    }

    /// Evaluate curve at parameter value `t` with de Casteljau's algorithm
    pub fn casteljau_at(&self, t: Scalar) -> Point {
        // four points always reduce to exactly one
        casteljau(&self.0, t).unwrap_or_else(|| self.start())
    }

    /// Identical curve but directed from end to start, instead of start to end.
    pub fn reverse(&self) -> Self {
        let Self([p0, p1, p2, p3]) = *self;
        Self([p3, p2, p1, p0])
    }
}

impl TryFrom<&[Point]> for Cubic {
    type Error = Error;

    fn try_from(points: &[Point]) -> Result<Self, Self::Error> {
        match *points {
            [p0, p1, p2, p3] => Ok(Self([p0, p1, p2, p3])),
            _ if points.len() < 4 => Err(Error::IncompleteControlPoints {
                count: points.len(),
            }),
            _ => Err(Error::TooManyControlPoints),
        }
    }
}

/// Single round of de Casteljau's algorithm
///
/// Replaces each adjacent pair of points with `(1 - t) * p[i] + t * p[i + 1]`,
/// so the result is one point shorter than the input.
pub fn casteljau_reduce(points: &[Point], t: Scalar) -> Reduced {
    points
        .windows(2)
        .map(|pair| pair[0].lerp(pair[1], t))
        .collect()
}

/// Find point of the bezier curve defined by `points` at parameter `t`
///
/// Reduction is applied recursively until only one point is left, `None` is
/// returned only for an empty sequence.
pub fn casteljau(points: &[Point], t: Scalar) -> Option<Point> {
    match points {
        [] => None,
        [point] => Some(*point),
        _ => casteljau(&casteljau_reduce(points, t), t),
    }
}
