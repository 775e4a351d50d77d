//! Rendering session
//!
//! `RenderSession` owns everything needed to draw one curve: options, the
//! control points captured so far and the canvas. Control points are appended
//! one by one, once four of them are captured the curve can be rendered with
//! both rasterizers.
use crate::{
    CasteljauRasterizer, Canvas, Channel, ColorError, Cubic, Image, ImageMut, NaiveRasterizer,
    Point, RasterStats, Rasterizer, Rgb, Scalar, CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_STEP,
};
use smallvec::SmallVec;
use std::fmt;

/// Number of control points of the cubic bezier curve
pub const CONTROL_POINTS_COUNT: usize = 4;

/// Default radius of the control point marker
pub const DEFAULT_MARKER_RADIUS: Scalar = 3.0;

/// Half of the stroke width used to outline control point markers
const MARKER_HALF_STROKE: Scalar = 1.5;

#[derive(Debug)]
pub enum Error {
    /// Curve requested before all control points were captured
    IncompleteControlPoints { count: usize },
    /// More than four control points were provided
    TooManyControlPoints,
    /// Failed to parse control point
    InvalidPoint(String),
    /// Render options are not usable
    InvalidOptions { reason: String },
    /// Failed to parse color or channel
    Color(ColorError),
    /// JSON error
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// IO error propagated while reading or writing
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IncompleteControlPoints { count } => write!(
                f,
                "curve requires {} control points, only {} provided",
                CONTROL_POINTS_COUNT, count
            ),
            Error::TooManyControlPoints => write!(
                f,
                "curve accepts at most {} control points",
                CONTROL_POINTS_COUNT
            ),
            Error::InvalidPoint(text) => write!(f, "invalid point, expected `x,y`: {:?}", text),
            Error::InvalidOptions { reason } => write!(f, "invalid render options: {}", reason),
            Error::Color(error) => write!(f, "{}", error),
            #[cfg(feature = "serde")]
            Error::Json(error) => write!(f, "{}", error),
            Error::Io(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Color(error) => Some(error),
            #[cfg(feature = "serde")]
            Error::Json(error) => Some(error),
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<ColorError> for Error {
    fn from(error: ColorError) -> Self {
        Self::Color(error)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(error) => error,
            _ => Self::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}

/// Ordered set of up to four control points
///
/// Points are append only, the set is complete once it holds exactly four.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPoints {
    points: SmallVec<[Point; CONTROL_POINTS_COUNT]>,
}

impl ControlPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append control point, returns number of captured points
    pub fn push(&mut self, point: impl Into<Point>) -> Result<usize, Error> {
        let point = point.into();
        if self.is_complete() {
            tracing::debug!("[control_point] ignored {:?}, curve is complete", point);
            return Err(Error::TooManyControlPoints);
        }
        if !point.x().is_finite() || !point.y().is_finite() {
            return Err(Error::InvalidPoint(point.to_string()));
        }
        self.points.push(point);
        tracing::debug!(
            "[control_point] #{} at ({:?})",
            self.points.len(),
            point
        );
        Ok(self.points.len())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All four control points are captured
    pub fn is_complete(&self) -> bool {
        self.points.len() == CONTROL_POINTS_COUNT
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear()
    }

    /// Curve defined by the control points, fails if there are less than four of them
    pub fn cubic(&self) -> Result<Cubic, Error> {
        Cubic::try_from(self.as_slice())
    }
}

impl TryFrom<ControlPoints> for Cubic {
    type Error = Error;

    fn try_from(points: ControlPoints) -> Result<Self, Self::Error> {
        points.cubic()
    }
}

/// Options used by `RenderSession`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RenderOptions {
    /// Canvas width in pixels
    pub width: usize,
    /// Canvas height in pixels
    pub height: usize,
    /// Distance between consecutive values of the curve parameter
    pub step: Scalar,
    /// Channel updated by the polynomial rasterizer
    pub naive_channel: Channel,
    /// Channel updated by the anti-aliased de Casteljau rasterizer
    pub antialiased_channel: Channel,
    /// Initial color of the canvas
    pub background: Rgb,
    /// Color of the control point markers
    pub marker_color: Rgb,
    /// Radius of the control point markers
    pub marker_radius: Scalar,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            step: DEFAULT_STEP,
            naive_channel: Channel::Red,
            antialiased_channel: Channel::Green,
            background: Rgb::BLACK,
            marker_color: Rgb::WHITE,
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

impl RenderOptions {
    /// Check that options can be used for rendering
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: &str| {
            Err(Error::InvalidOptions {
                reason: reason.to_string(),
            })
        };
        if self.width == 0 || self.height == 0 {
            return invalid("canvas must not be empty");
        }
        if !self.step.is_finite() || self.step <= 0.0 || self.step > 1.0 {
            return invalid("step must be in (0, 1]");
        }
        if self.naive_channel == self.antialiased_channel {
            return invalid("rasterizers must use different channels");
        }
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return invalid("marker radius must be non-negative");
        }
        Ok(())
    }

    /// Load options from JSON, missing fields take default values
    #[cfg(feature = "serde")]
    pub fn from_json(reader: impl std::io::Read) -> Result<Self, Error> {
        let options: Self = serde_json::from_reader(reader)?;
        options.validate()?;
        Ok(options)
    }

    pub fn naive_rasterizer(&self) -> NaiveRasterizer {
        NaiveRasterizer::new(self.step, self.naive_channel)
    }

    pub fn casteljau_rasterizer(&self) -> CasteljauRasterizer {
        CasteljauRasterizer::new(self.step, self.antialiased_channel)
    }
}

/// State of a single curve rendering
#[derive(Debug, Clone)]
pub struct RenderSession {
    options: RenderOptions,
    points: ControlPoints,
    canvas: Canvas,
}

impl RenderSession {
    pub fn new(options: RenderOptions) -> Result<Self, Error> {
        options.validate()?;
        let background = options.background;
        let canvas = Canvas::new_with(options.height, options.width, |_, _| background);
        Ok(Self {
            options,
            points: ControlPoints::new(),
            canvas,
        })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn control_points(&self) -> &ControlPoints {
        &self.points
    }

    /// Capture next control point, points after the fourth are rejected
    pub fn push_point(&mut self, point: impl Into<Point>) -> Result<usize, Error> {
        self.points.push(point)
    }

    /// Enough control points were captured to render the curve
    pub fn is_ready(&self) -> bool {
        self.points.is_complete()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Draw filled disc in `marker_color` around each captured control point
    pub fn mark_control_points(&mut self) {
        let radius = self.options.marker_radius + MARKER_HALF_STROKE;
        let reach = radius.ceil() as i64;
        let color = self.options.marker_color;
        for point in self.points.as_slice() {
            let (row, col) = point.pixel();
            for d_row in -reach..=reach {
                for d_col in -reach..=reach {
                    let (row, col) = (row.saturating_add(d_row), col.saturating_add(d_col));
                    let center = Point::new(col as Scalar + 0.5, row as Scalar + 0.5);
                    if center.dist(*point) > radius {
                        continue;
                    }
                    if let Some(pixel) = self.canvas.pixel_mut(row, col) {
                        *pixel = color;
                    }
                }
            }
        }
    }

    /// Render the curve with the polynomial rasterizer first and with the
    /// anti-aliased de Casteljau rasterizer second.
    ///
    /// Fails if not all control points are captured yet. Control points are
    /// left untouched, so rendering can be repeated.
    pub fn render(&mut self) -> Result<[RasterStats; 2], Error> {
        let cubic = self.points.cubic()?;
        let naive = self.options.naive_rasterizer();
        let casteljau = self.options.casteljau_rasterizer();
        let rasterizers: [&dyn Rasterizer; 2] = [&naive, &casteljau];
        let mut stats = [RasterStats::default(); 2];
        for (rasterizer, stats) in rasterizers.iter().zip(stats.iter_mut()) {
            *stats = tracing::debug_span!("[render]", rasterizer = rasterizer.name())
                .in_scope(|| rasterizer.rasterize(cubic, &mut self.canvas));
        }
        tracing::debug!(
            "[render] {:?} on {}x{} canvas",
            cubic,
            self.canvas.width(),
            self.canvas.height()
        );
        Ok(stats)
    }
}
