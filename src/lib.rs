//! Small CPU rasterizer for a single cubic bezier curve.
//!
//! Main features:
//!  - Polynomial and de Casteljau evaluation of the curve
//!  - Naive single pixel and anti-aliased rasterization
//!  - BMP, PPM and PNG output
//!
#![deny(warnings)]

mod color;
mod curve;
mod geometry;
mod image;
mod rasterize;
mod render;
mod utils;

pub use color::{Channel, Color, ColorError, Rgb};
pub use curve::{casteljau, casteljau_reduce, Cubic, Reduced};
pub use geometry::{scalar_fmt, Point, Scalar, EPSILON, SQRT_2};
pub use image::{
    Canvas, Image, ImageIter, ImageMut, ImageOwned, Shape, CANVAS_HEIGHT, CANVAS_WIDTH,
};
pub use rasterize::{
    footprint_ratio, stamp_footprint, stamp_pixel, CasteljauRasterizer, NaiveRasterizer,
    RasterStats, Rasterizer,
};
pub use render::{
    ControlPoints, Error, RenderOptions, RenderSession, CONTROL_POINTS_COUNT,
    DEFAULT_MARKER_RADIUS,
};
pub use utils::{ParamSweep, DEFAULT_STEP};
