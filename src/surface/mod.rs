//! Pixel-source boundary
//!
//! Masks are built from, and rendered onto, any 2D pixel grid that implements
//! [`PixelSource`] / [`PixelTarget`]. Implementations are provided for the
//! 8-bit `image` buffers; anything else (an engine surface, a test double)
//! only needs the few methods below.

use image::Rgba;

/// `image` buffer implementations and the color-key wrapper
pub mod buffers;
/// Mask construction by alpha, color key or color distance
pub mod construct;
/// Painting masks onto pixel targets
pub mod render;

pub use buffers::{ChannelPixel, ColorKeyed};
pub use construct::{DEFAULT_ALPHA_THRESHOLD, DEFAULT_COLOR_THRESHOLD, from_surface, from_threshold};
pub use render::RenderOptions;

/// Channel arrangement of a pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single luminance channel
    Luma,
    /// Luminance plus alpha
    LumaAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
    /// Palette indices
    Indexed,
}

/// Describes how a source stores its pixels.
///
/// Two sources can exchange pixels verbatim only when their formats are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    /// Storage size of one pixel
    pub bits_per_pixel: u8,
    /// Channel arrangement
    pub layout: ChannelLayout,
    /// Whether pixels carry per-pixel alpha
    pub has_alpha: bool,
}

impl PixelFormat {
    /// 8-bit luminance
    pub const LUMA8: Self = Self::new(8, ChannelLayout::Luma, false);
    /// 8-bit luminance with 8-bit alpha
    pub const LUMA_ALPHA8: Self = Self::new(16, ChannelLayout::LumaAlpha, true);
    /// 24-bit RGB
    pub const RGB8: Self = Self::new(24, ChannelLayout::Rgb, false);
    /// 32-bit RGBA
    pub const RGBA8: Self = Self::new(32, ChannelLayout::Rgba, true);
    /// 8-bit palette indices
    pub const INDEXED8: Self = Self::new(8, ChannelLayout::Indexed, false);

    /// Create a format descriptor
    pub const fn new(bits_per_pixel: u8, layout: ChannelLayout, has_alpha: bool) -> Self {
        Self {
            bits_per_pixel,
            layout,
            has_alpha,
        }
    }
}

/// Read access to a 2D grid of pixels.
///
/// Coordinates passed to the per-pixel methods are always inside
/// [`PixelSource::size`].
pub trait PixelSource: Sync {
    /// `(width, height)` in pixels
    fn size(&self) -> (usize, usize);

    /// Storage format
    fn format(&self) -> PixelFormat;

    /// Color of the pixel at (x, y), with alpha 255 for opaque formats
    fn pixel(&self, x: usize, y: usize) -> Rgba<u8>;

    /// Alpha of the pixel at (x, y)
    fn alpha(&self, x: usize, y: usize) -> u8 {
        self.pixel(x, y)[3]
    }

    /// Active color key, if any
    fn color_key(&self) -> Option<Rgba<u8>> {
        None
    }

    /// Native pixel value; palette sources return the index
    fn raw(&self, x: usize, y: usize) -> u32 {
        u32::from_le_bytes(self.pixel(x, y).0)
    }

    /// Native value `color` would be stored as
    fn map_rgba(&self, color: Rgba<u8>) -> u32 {
        u32::from_le_bytes(color.0)
    }
}

/// A pixel grid that can also be written to.
pub trait PixelTarget: PixelSource {
    /// Store `color` at (x, y), converting it to the target's format
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba<u8>);
}
