//! Curve rasterizers
//!
//! Both rasterizers sweep curve parameter `t` over `0.0..=1.0` and stamp every
//! sampled point into a single color channel of the canvas. Writes that fall
//! outside of the canvas are skipped.
use crate::{
    Channel, Cubic, ImageMut, ParamSweep, Point, Rgb, Scalar, DEFAULT_STEP, SQRT_2,
};

/// Counters collected while rasterizing a single curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Number of evaluated curve points
    pub samples: usize,
    /// Number of pixel writes that landed inside of the canvas
    pub written: usize,
    /// Number of pixel writes that were skipped because they were outside of the canvas
    pub clipped: usize,
}

/// Common interface for the curve rasterizers
pub trait Rasterizer {
    /// Name of the rasterizer, used for logging
    fn name(&self) -> &str;

    /// Channel updated by this rasterizer
    fn channel(&self) -> Channel;

    /// Draw curve into the image
    fn rasterize(&self, cubic: Cubic, img: &mut dyn ImageMut<Pixel = Rgb>) -> RasterStats;
}

/// Rasterizer that evaluates the polynomial form of the curve and sets a single
/// pixel to full intensity per sample, no anti-aliasing is done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaiveRasterizer {
    step: Scalar,
    channel: Channel,
}

impl NaiveRasterizer {
    pub fn new(step: Scalar, channel: Channel) -> Self {
        Self { step, channel }
    }
}

impl Default for NaiveRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_STEP, Channel::Red)
    }
}

impl Rasterizer for NaiveRasterizer {
    fn name(&self) -> &str {
        "naive"
    }

    fn channel(&self) -> Channel {
        self.channel
    }

    fn rasterize(&self, cubic: Cubic, img: &mut dyn ImageMut<Pixel = Rgb>) -> RasterStats {
        let mut stats = RasterStats::default();
        for t in ParamSweep::new(self.step) {
            stats.samples += 1;
            if stamp_pixel(img, cubic.at(t), self.channel) {
                stats.written += 1;
            } else {
                stats.clipped += 1;
            }
        }
        tracing::debug!(
            "[naive] samples={} written={} clipped={}",
            stats.samples,
            stats.written,
            stats.clipped
        );
        stats
    }
}

/// Rasterizer that finds curve points with de Casteljau's algorithm and draws
/// each one with a 3x3 anti-aliasing footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasteljauRasterizer {
    step: Scalar,
    channel: Channel,
}

impl CasteljauRasterizer {
    pub fn new(step: Scalar, channel: Channel) -> Self {
        Self { step, channel }
    }
}

impl Default for CasteljauRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_STEP, Channel::Green)
    }
}

impl Rasterizer for CasteljauRasterizer {
    fn name(&self) -> &str {
        "casteljau"
    }

    fn channel(&self) -> Channel {
        self.channel
    }

    fn rasterize(&self, cubic: Cubic, img: &mut dyn ImageMut<Pixel = Rgb>) -> RasterStats {
        let mut stats = RasterStats::default();
        for t in ParamSweep::new(self.step) {
            stats.samples += 1;
            let written = stamp_footprint(img, cubic.casteljau_at(t), self.channel);
            stats.written += written;
            stats.clipped += 9 - written;
        }
        tracing::debug!(
            "[casteljau] samples={} written={} clipped={}",
            stats.samples,
            stats.written,
            stats.clipped
        );
        stats
    }
}

/// Set channel of the pixel containing `point` to full intensity
///
/// Coordinates are truncated towards zero. Returns `false` if the pixel is
/// outside of the image.
pub fn stamp_pixel(img: &mut dyn ImageMut<Pixel = Rgb>, point: Point, channel: Channel) -> bool {
    if !point.x().is_finite() || !point.y().is_finite() {
        return false;
    }
    let row = point.y().trunc() as i64;
    let col = point.x().trunc() as i64;
    match img.pixel_mut(row, col) {
        Some(pixel) => {
            *pixel.channel_mut(channel) = 255;
            true
        }
        None => false,
    }
}

/// Coverage estimate of the pixel with center `center` by the curve point `point`
///
/// `1 - sqrt(2) * distance / 3`, it is not clamped and becomes negative once the
/// distance exceeds `3 / sqrt(2)`.
#[inline]
pub fn footprint_ratio(point: Point, center: Point) -> Scalar {
    1.0 - SQRT_2 * point.dist(center) / 3.0
}

/// Draw anti-aliased point into the 3x3 neighbourhood of the pixel containing it
///
/// Intensity of each pixel is `255 * footprint_ratio` combined with the current
/// value by taking the maximum, so overlapping footprints never darken a pixel.
/// Returns number of pixels inside of the image.
pub fn stamp_footprint(
    img: &mut dyn ImageMut<Pixel = Rgb>,
    point: Point,
    channel: Channel,
) -> usize {
    if !point.x().is_finite() || !point.y().is_finite() {
        return 0;
    }
    let (row, col) = point.pixel();
    let mut written = 0;
    for d_row in -1..=1 {
        for d_col in -1..=1 {
            let row = row.saturating_add(d_row);
            let col = col.saturating_add(d_col);
            let Some(pixel) = img.pixel_mut(row, col) else {
                continue;
            };
            let center = Point::new(col as Scalar + 0.5, row as Scalar + 0.5);
            let intensity = 255.0 * footprint_ratio(point, center);
            let value = pixel.channel_mut(channel);
            *value = (*value as Scalar).max(intensity) as u8;
            written += 1;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Canvas, Image};

    fn channel_at(img: &Canvas, row: usize, col: usize, channel: Channel) -> u8 {
        img.get(row, col).map_or(0, |p| p.channel(channel))
    }

    #[test]
    fn test_footprint_values() {
        let mut img = Canvas::new_default(5, 5);
        let written = stamp_footprint(&mut img, Point::new(2.5, 2.5), Channel::Green);
        assert_eq!(written, 9);
        // pixel center
        assert_eq!(channel_at(&img, 2, 2, Channel::Green), 255);
        // edge neighbours: 255 * (1 - sqrt(2) / 3)
        for (row, col) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_eq!(channel_at(&img, row, col, Channel::Green), 134);
        }
        // corner neighbours: 255 * (1 - 2 / 3)
        for (row, col) in [(1, 1), (1, 3), (3, 1), (3, 3)] {
            let value = channel_at(&img, row, col, Channel::Green);
            assert!((84..=85).contains(&value), "{}", value);
        }
        // outside of the footprint
        assert_eq!(channel_at(&img, 0, 0, Channel::Green), 0);
        assert_eq!(channel_at(&img, 2, 4, Channel::Green), 0);
        // other channels are untouched
        assert!(img.iter().all(|p| p.red() == 0 && p.blue() == 0));
    }

    #[test]
    fn test_footprint_max_combine() {
        let mut img = Canvas::new_with(3, 3, |_, _| Rgb::new(0, 200, 0));
        stamp_footprint(&mut img, Point::new(1.5, 1.5), Channel::Green);
        assert_eq!(channel_at(&img, 1, 1, Channel::Green), 255);
        assert_eq!(channel_at(&img, 0, 1, Channel::Green), 200);
        assert_eq!(channel_at(&img, 0, 0, Channel::Green), 200);
    }

    #[test]
    fn test_footprint_ratio_sign() {
        let p = Point::new(0.5, 0.5);
        assert_eq!(footprint_ratio(p, p), 1.0);
        assert!(footprint_ratio(p, Point::new(3.0, 0.5)) < 0.0);
    }

    #[test]
    fn test_footprint_bounds() {
        let mut img = Canvas::new_default(4, 4);
        assert_eq!(stamp_footprint(&mut img, Point::new(0.2, 0.3), Channel::Blue), 4);
        assert_eq!(stamp_footprint(&mut img, Point::new(3.9, 3.9), Channel::Blue), 4);
        assert_eq!(stamp_footprint(&mut img, Point::new(3.9, 1.5), Channel::Blue), 6);
        assert_eq!(stamp_footprint(&mut img, Point::new(-0.5, 1.5), Channel::Blue), 3);
        assert_eq!(stamp_footprint(&mut img, Point::new(-1.5, 1.5), Channel::Blue), 0);
        assert_eq!(stamp_footprint(&mut img, Point::new(-5.0, -5.0), Channel::Blue), 0);
        assert_eq!(
            stamp_footprint(&mut img, Point::new(Scalar::INFINITY, 1.0), Channel::Blue),
            0
        );
    }

    #[test]
    fn test_stamp_pixel() {
        let mut img = Canvas::new_default(4, 4);
        assert!(stamp_pixel(&mut img, Point::new(1.9, 2.1), Channel::Red));
        assert_eq!(img.get(2, 1), Some(&Rgb::new(255, 0, 0)));
        assert!(!stamp_pixel(&mut img, Point::new(4.0, 0.0), Channel::Red));
        assert!(!stamp_pixel(&mut img, Point::new(0.0, -1.5), Channel::Red));
        assert!(!stamp_pixel(&mut img, Point::new(Scalar::NAN, 0.0), Channel::Red));
        assert_eq!(img.iter().filter(|p| p.red() == 255).count(), 1);
    }

    #[test]
    fn test_naive_collinear() {
        let mut img = Canvas::new_default(10, 400);
        let cubic = Cubic::new((0.0, 0.0), (100.0, 0.0), (200.0, 0.0), (300.0, 0.0));
        let stats = NaiveRasterizer::default().rasterize(cubic, &mut img);
        assert_eq!(stats.samples, 1001);
        assert_eq!(stats.clipped, 0);
        for row in 0..img.height() {
            for col in 0..img.width() {
                let red = channel_at(&img, row, col, Channel::Red);
                let expected = if row == 0 && col <= 300 { 255 } else { 0 };
                assert_eq!(red, expected, "row={} col={}", row, col);
            }
        }
    }

    #[test]
    fn test_casteljau_collinear() {
        let mut img = Canvas::new_default(10, 400);
        let cubic = Cubic::new((0.0, 0.0), (100.0, 0.0), (200.0, 0.0), (300.0, 0.0));
        let stats = CasteljauRasterizer::default().rasterize(cubic, &mut img);
        assert_eq!(stats.samples, 1001);
        assert_eq!(stats.written + stats.clipped, 9 * 1001);
        for col in 1..300 {
            assert!(channel_at(&img, 0, col, Channel::Green) >= 190);
            assert!(channel_at(&img, 1, col, Channel::Green) > 0);
        }
        for row in 2..img.height() {
            for col in 0..img.width() {
                assert_eq!(channel_at(&img, row, col, Channel::Green), 0);
            }
        }
        assert!(img.iter().all(|p| p.red() == 0 && p.blue() == 0));
    }

    #[test]
    fn test_clipping() {
        // curve leaves the canvas through the top and left edges
        let cubic = Cubic::new((-50.0, -50.0), (699.9, 0.0), (699.9, 699.9), (0.0, 699.9));
        let mut img = Canvas::new_default(700, 700);
        let naive = NaiveRasterizer::default().rasterize(cubic, &mut img);
        assert!(naive.clipped > 0);
        assert_eq!(naive.written + naive.clipped, 1001);
        let casteljau = CasteljauRasterizer::default().rasterize(cubic, &mut img);
        assert!(casteljau.clipped > 0);
        assert_eq!(img.data().len(), 700 * 700);
    }
}
