use crate::{Color, Rgb};
use std::io::{self, Write};

/// Canvas both curve rasterizers draw into
pub type Canvas = ImageOwned<Rgb>;

/// Default canvas width
pub const CANVAS_WIDTH: usize = 700;
/// Default canvas height
pub const CANVAS_HEIGHT: usize = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
    /// How many elements we need to skip to get to the next row.
    pub row_stride: usize,
    /// How many elements we need to skip to get to the next column.
    pub col_stride: usize,
}

impl Shape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride + col * self.col_stride
    }

    #[inline]
    pub fn nth(&self, n: usize) -> Option<(usize, usize)> {
        if self.width == 0 {
            return None;
        }
        let row = n / self.width;
        let col = n - row * self.width;
        (row < self.height).then_some((row, col))
    }

    /// Determine if signed pixel coordinates are inside of the image
    #[inline]
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }
}

pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn shape(&self) -> Shape;

    fn width(&self) -> usize {
        self.shape().width
    }

    fn height(&self) -> usize {
        self.shape().height
    }

    /// Pixel at `(row, col)`, `None` if it is outside of the image
    fn get(&self, row: usize, col: usize) -> Option<&Self::Pixel> {
        let shape = self.shape();
        if row >= shape.height || col >= shape.width {
            return None;
        }
        self.data().get(shape.offset(row, col))
    }

    fn iter(&self) -> ImageIter<'_, Self::Pixel> {
        ImageIter {
            index: 0,
            shape: self.shape(),
            data: self.data(),
        }
    }

    /// Write image in the uncompressed 24-bit BMP format
    fn write_bmp(&self, mut out: impl Write) -> io::Result<()>
    where
        Self::Pixel: Color,
        Self: Sized,
    {
        let shape = self.shape();
        let (width, height) = (shape.width, shape.height);
        // rows are aligned to 4 bytes
        let row_size = (3 * width).div_ceil(4) * 4;
        let data_size = row_size * height;
        let header_size = 14 + 40;
        let file_size = header_size + data_size;
        let too_big = || io::Error::new(io::ErrorKind::InvalidInput, "image is too big for BMP");
        let file_size = u32::try_from(file_size).map_err(|_| too_big())?;
        let width_i32 = i32::try_from(width).map_err(|_| too_big())?;
        let height_i32 = i32::try_from(height).map_err(|_| too_big())?;

        // file header
        out.write_all(b"BM")?;
        out.write_all(&file_size.to_le_bytes())?;
        out.write_all(&0u32.to_le_bytes())?; // reserved
        out.write_all(&(header_size as u32).to_le_bytes())?;
        // info header
        out.write_all(&40u32.to_le_bytes())?;
        out.write_all(&width_i32.to_le_bytes())?;
        out.write_all(&height_i32.to_le_bytes())?; // positive height means bottom-up rows
        out.write_all(&1u16.to_le_bytes())?; // planes
        out.write_all(&24u16.to_le_bytes())?; // bits per pixel
        out.write_all(&0u32.to_le_bytes())?; // no compression
        out.write_all(&(data_size as u32).to_le_bytes())?;
        out.write_all(&2835i32.to_le_bytes())?; // 72 DPI
        out.write_all(&2835i32.to_le_bytes())?;
        out.write_all(&0u32.to_le_bytes())?; // palette size
        out.write_all(&0u32.to_le_bytes())?; // important colors

        let data = self.data();
        let mut row_buf = vec![0u8; row_size];
        for row in (0..height).rev() {
            for col in 0..width {
                let [r, g, b] = data[shape.offset(row, col)].to_rgb();
                row_buf[3 * col..3 * col + 3].copy_from_slice(&[b, g, r]);
            }
            out.write_all(&row_buf)?;
        }
        out.flush()
    }

    /// Write image in the binary PPM (P6) format
    fn write_ppm(&self, mut out: impl Write) -> io::Result<()>
    where
        Self::Pixel: Color,
        Self: Sized,
    {
        write!(out, "P6\n{} {}\n255\n", self.width(), self.height())?;
        for pixel in self.iter() {
            out.write_all(&pixel.to_rgb())?;
        }
        out.flush()
    }

    /// Write image in the PNG format
    #[cfg(feature = "png")]
    fn write_png(&self, out: impl Write) -> io::Result<()>
    where
        Self::Pixel: Color,
        Self: Sized,
    {
        let too_big = || io::Error::new(io::ErrorKind::InvalidInput, "image is too big for PNG");
        let width = u32::try_from(self.width()).map_err(|_| too_big())?;
        let height = u32::try_from(self.height()).map_err(|_| too_big())?;
        let mut encoder = png::Encoder::new(out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(io::Error::other)?;
        let data: Vec<u8> = self.iter().flat_map(|pixel| pixel.to_rgb()).collect();
        writer.write_image_data(&data).map_err(io::Error::other)?;
        writer.finish().map_err(io::Error::other)
    }
}

pub struct ImageIter<'a, P> {
    index: usize,
    shape: Shape,
    data: &'a [P],
}

impl<P> ImageIter<'_, P> {
    /// `(row, col)` of the pixel returned by the next call to `next`
    pub fn position(&self) -> (usize, usize) {
        self.shape.nth(self.index).unwrap_or((self.shape.height, 0))
    }
}

impl<'a, P> Iterator for ImageIter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        self.nth(0)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index += n + 1;
        let (row, col) = self.shape.nth(self.index - 1)?;
        self.data.get(self.shape.offset(row, col))
    }
}

pub trait ImageMut: Image {
    fn data_mut(&mut self) -> &mut [Self::Pixel];

    /// Mutable pixel at `(row, col)`, `None` if it is outside of the image
    fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Self::Pixel> {
        let shape = self.shape();
        if row >= shape.height || col >= shape.width {
            return None;
        }
        self.data_mut().get_mut(shape.offset(row, col))
    }

    /// Same as `get_mut` but accepts coordinates that might be negative
    fn pixel_mut(&mut self, row: i64, col: i64) -> Option<&mut Self::Pixel> {
        if !self.shape().contains(row, col) {
            return None;
        }
        self.get_mut(row as usize, col as usize)
    }

    /// Set all pixels of the image to `value`
    fn fill(&mut self, value: Self::Pixel)
    where
        Self::Pixel: Clone,
    {
        let shape = self.shape();
        let data = self.data_mut();
        for row in 0..shape.height {
            for col in 0..shape.width {
                data[shape.offset(row, col)] = value.clone();
            }
        }
    }

    fn clear(&mut self)
    where
        Self::Pixel: Default + Clone,
    {
        self.fill(Default::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOwned<P> {
    shape: Shape,
    data: Vec<P>,
}

impl<P> ImageOwned<P> {
    pub fn new_default(height: usize, width: usize) -> Self
    where
        P: Default,
    {
        Self::new_with(height, width, |_, _| Default::default())
    }

    pub fn new_with<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col))
            }
        }
        Self {
            shape: Shape {
                width,
                height,
                row_stride: width,
                col_stride: 1,
            },
            data,
        }
    }

    pub fn to_vec(self) -> Vec<P> {
        self.data
    }
}

impl ImageOwned<Rgb> {
    /// Raw `[r, g, b]` bytes of the image in row-major order
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

impl<C> ImageMut for ImageOwned<C> {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        &mut self.data
    }
}

impl<I> Image for &I
where
    I: Image + ?Sized,
{
    type Pixel = I::Pixel;

    fn shape(&self) -> Shape {
        (*self).shape()
    }

    fn data(&self) -> &[Self::Pixel] {
        (*self).data()
    }
}

impl<I> Image for &mut I
where
    I: Image + ?Sized,
{
    type Pixel = I::Pixel;

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn data(&self) -> &[Self::Pixel] {
        (**self).data()
    }
}

impl<I> ImageMut for &mut I
where
    I: ImageMut + ?Sized,
{
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        (**self).data_mut()
    }
}
