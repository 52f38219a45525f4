//! The single in-memory image type passed between pipeline stages.
//!
//! [`RasterImage`] wraps an RGBA8 buffer. Stages never mutate their input;
//! every transform returns a new image. Conversions to and from the
//! `image` crate are plain `From` impls so decoders and resamplers can be
//! used without copying through intermediate representations.

mod color;

pub use color::{ParseRgbError, Rgb};

use image::{DynamicImage, Rgba, RgbaImage};

/// A width x height grid of RGBA8 pixels, row-major.
///
/// Opaque sources simply carry alpha 255 everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    inner: RgbaImage,
}

impl RasterImage {
    /// Build an image from raw RGBA bytes.
    ///
    /// Returns `None` when `data.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, data).map(|inner| Self { inner })
    }

    /// Build an image where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        Self {
            inner: RgbaImage::from_pixel(width, height, Rgba(pixel)),
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        Self {
            inner: RgbaImage::from_fn(width, height, |x, y| Rgba(f(x, y))),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    /// True when the image has no pixels (either side is zero).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.inner.get_pixel(x, y).0
    }

    /// Iterate `(x, y, rgba)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [u8; 4])> + '_ {
        self.inner.enumerate_pixels().map(|(x, y, p)| (x, y, p.0))
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        self.inner.as_raw()
    }

    #[inline]
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.inner
    }

    #[inline]
    pub fn into_rgba(self) -> RgbaImage {
        self.inner
    }

    /// Produce a new image by transforming each pixel with its coordinates.
    pub fn map_pixels(&self, mut f: impl FnMut(u32, u32, [u8; 4]) -> [u8; 4]) -> Self {
        Self::from_fn(self.width(), self.height(), |x, y| f(x, y, self.pixel(x, y)))
    }

    /// Composite onto an opaque background color.
    ///
    /// Fully opaque pixels are returned unchanged; the result is opaque.
    pub fn flatten_onto(&self, background: Rgb) -> Self {
        let bg = background.to_bytes();
        self.map_pixels(|_, _, [r, g, b, a]| {
            if a == u8::MAX {
                return [r, g, b, a];
            }
            let blend = |c: u8, bg: u8| -> u8 {
                let a = a as u32;
                ((c as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
            };
            [blend(r, bg[0]), blend(g, bg[1]), blend(b, bg[2]), u8::MAX]
        })
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(inner: RgbaImage) -> Self {
        Self { inner }
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(image: DynamicImage) -> Self {
        Self {
            inner: image.into_rgba8(),
        }
    }
}

impl From<RasterImage> for RgbaImage {
    fn from(image: RasterImage) -> Self {
        image.inner
    }
}
