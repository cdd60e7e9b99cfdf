use image::{ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};

use super::{PixelFormat, PixelSource, PixelTarget};

/// Coefficients for luminance: Y = (77*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 77;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

fn luminance(color: Rgba<u8>) -> u8 {
    let [r, g, b, _] = color.0;
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8) as u8
}

/// 8-bit `image` pixel types usable as mask sources and render targets.
pub trait ChannelPixel: Pixel<Subpixel = u8> + Sync {
    /// Format of a buffer made of this pixel type
    const FORMAT: PixelFormat;

    /// Convert an RGBA color into this pixel type
    fn from_rgba(color: Rgba<u8>) -> Self;
}

impl ChannelPixel for Rgba<u8> {
    const FORMAT: PixelFormat = PixelFormat::RGBA8;

    fn from_rgba(color: Rgba<u8>) -> Self {
        color
    }
}

impl ChannelPixel for Rgb<u8> {
    const FORMAT: PixelFormat = PixelFormat::RGB8;

    fn from_rgba(color: Rgba<u8>) -> Self {
        let [r, g, b, _] = color.0;
        Rgb([r, g, b])
    }
}

impl ChannelPixel for Luma<u8> {
    const FORMAT: PixelFormat = PixelFormat::LUMA8;

    fn from_rgba(color: Rgba<u8>) -> Self {
        Luma([luminance(color)])
    }
}

impl ChannelPixel for LumaA<u8> {
    const FORMAT: PixelFormat = PixelFormat::LUMA_ALPHA8;

    fn from_rgba(color: Rgba<u8>) -> Self {
        LumaA([luminance(color), color[3]])
    }
}

impl<P: ChannelPixel> PixelSource for ImageBuffer<P, Vec<u8>> {
    fn size(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }

    fn format(&self) -> PixelFormat {
        P::FORMAT
    }

    fn pixel(&self, x: usize, y: usize) -> Rgba<u8> {
        self.get_pixel(x as u32, y as u32).to_rgba()
    }

    /// Round-trips `color` through `P`, dropping channels the format lacks.
    fn map_rgba(&self, color: Rgba<u8>) -> u32 {
        u32::from_le_bytes(P::from_rgba(color).to_rgba().0)
    }
}

impl<P: ChannelPixel> PixelTarget for ImageBuffer<P, Vec<u8>> {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba<u8>) {
        self.put_pixel(x as u32, y as u32, P::from_rgba(color));
    }
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn size(&self) -> (usize, usize) {
        (**self).size()
    }

    fn format(&self) -> PixelFormat {
        (**self).format()
    }

    fn pixel(&self, x: usize, y: usize) -> Rgba<u8> {
        (**self).pixel(x, y)
    }

    fn alpha(&self, x: usize, y: usize) -> u8 {
        (**self).alpha(x, y)
    }

    fn color_key(&self) -> Option<Rgba<u8>> {
        (**self).color_key()
    }

    fn raw(&self, x: usize, y: usize) -> u32 {
        (**self).raw(x, y)
    }

    fn map_rgba(&self, color: Rgba<u8>) -> u32 {
        (**self).map_rgba(color)
    }
}

/// Wraps a source and gives it an active color key.
#[derive(Debug, Clone)]
pub struct ColorKeyed<S> {
    source: S,
    key: Rgba<u8>,
}

impl<S> ColorKeyed<S> {
    /// Attach `key` to `source`
    pub fn new(source: S, key: Rgba<u8>) -> Self {
        Self { source, key }
    }

    /// The color key
    pub fn key(&self) -> Rgba<u8> {
        self.key
    }

    /// Borrow the wrapped source
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Unwrap the source
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: PixelSource> PixelSource for ColorKeyed<S> {
    fn size(&self) -> (usize, usize) {
        self.source.size()
    }

    fn format(&self) -> PixelFormat {
        self.source.format()
    }

    fn pixel(&self, x: usize, y: usize) -> Rgba<u8> {
        self.source.pixel(x, y)
    }

    fn alpha(&self, x: usize, y: usize) -> u8 {
        self.source.alpha(x, y)
    }

    fn color_key(&self) -> Option<Rgba<u8>> {
        Some(self.key)
    }

    fn raw(&self, x: usize, y: usize) -> u32 {
        self.source.raw(x, y)
    }

    fn map_rgba(&self, color: Rgba<u8>) -> u32 {
        self.source.map_rgba(color)
    }
}

impl<S: PixelTarget> PixelTarget for ColorKeyed<S> {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba<u8>) {
        self.source.set_pixel(x, y, color);
    }
}
