use image::{Rgba, RgbaImage};
use tracing::warn;

use super::{PixelSource, PixelTarget};
use crate::error::{MaskError, MaskResult};
use crate::models::{Bitmask, Point, Rect};

/// How [`Bitmask::to_surface`] paints set and unset bits.
///
/// For each bit value the companion source wins where it covers the bit,
/// then the flat color; with neither, bits of that value are left untouched.
#[derive(Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Per-pixel colors for set bits, sampled at the bit's mask position
    pub set_source: Option<&'a dyn PixelSource>,
    /// Per-pixel colors for unset bits, sampled at the bit's mask position
    pub unset_source: Option<&'a dyn PixelSource>,
    /// Flat color for set bits
    pub set_color: Option<Rgba<u8>>,
    /// Flat color for unset bits
    pub unset_color: Option<Rgba<u8>>,
    /// Target position of the mask's top-left corner
    pub dest: Point,
    /// Part of the mask to paint, in mask coordinates; the whole mask if `None`
    pub area: Option<Rect>,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self {
            set_source: None,
            unset_source: None,
            set_color: Some(Rgba([255, 255, 255, 255])),
            unset_color: Some(Rgba([0, 0, 0, 255])),
            dest: Point::new(0, 0),
            area: None,
        }
    }
}

impl std::fmt::Debug for RenderOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("set_source", &self.set_source.map(|s| s.format()))
            .field("unset_source", &self.unset_source.map(|s| s.format()))
            .field("set_color", &self.set_color)
            .field("unset_color", &self.unset_color)
            .field("dest", &self.dest)
            .field("area", &self.area)
            .finish()
    }
}

/// Clip `[start, start + len)` to `[0, limit)`.
fn clip(start: i64, len: i64, limit: usize) -> std::ops::Range<usize> {
    let lo = start.clamp(0, limit as i64);
    let hi = (start + len).clamp(lo, limit as i64);
    lo as usize..hi as usize
}

fn sample(source: Option<&dyn PixelSource>, x: usize, y: usize) -> Option<Rgba<u8>> {
    let source = source?;
    let (width, height) = source.size();
    (x < width && y < height).then(|| source.pixel(x, y))
}

impl Bitmask {
    /// Render the mask into a new RGBA image of the mask's size.
    ///
    /// Pixels the options leave unpainted stay fully transparent.
    pub fn to_surface(&self, options: &RenderOptions<'_>) -> MaskResult<RgbaImage> {
        let (width, height) = self.size();
        let mut target = RgbaImage::new(width as u32, height as u32);
        self.to_surface_into(&mut target, options)?;
        Ok(target)
    }

    /// Render the mask onto an existing target.
    ///
    /// Fails with [`MaskError::FormatMismatch`] before touching the target if a
    /// companion source's format differs from the target's.
    #[tracing::instrument(level = "debug", skip_all, fields(size = ?self.size(), options = ?options))]
    pub fn to_surface_into<T: PixelTarget + ?Sized>(
        &self,
        target: &mut T,
        options: &RenderOptions<'_>,
    ) -> MaskResult<()> {
        let expected = target.format();
        for source in [options.set_source, options.unset_source].into_iter().flatten() {
            let found = source.format();
            if found != expected {
                warn!(?expected, ?found, "companion source format differs from target");
                return Err(MaskError::FormatMismatch { expected, found });
            }
        }

        let (width, height) = self.size();
        let area = options
            .area
            .unwrap_or(Rect::new(0, 0, width as i32, height as i32));
        let (target_w, target_h) = target.size();
        let (dx, dy) = (options.dest.x as i64, options.dest.y as i64);

        let rows = clip(area.y as i64, area.height as i64, height);
        let cols = clip(area.x as i64, area.width as i64, width);

        for y in rows {
            let ty = y as i64 + dy;
            if ty < 0 || ty >= target_h as i64 {
                continue;
            }
            let ty = ty as usize;
            for x in cols.clone() {
                let tx = x as i64 + dx;
                if tx < 0 || tx >= target_w as i64 {
                    continue;
                }
                let color = if self.get_bit(x, y) {
                    sample(options.set_source, x, y).or(options.set_color)
                } else {
                    sample(options.unset_source, x, y).or(options.unset_color)
                };
                if let Some(color) = color {
                    target.set_pixel(tx as usize, ty, color);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn diagonal() -> Bitmask {
        Bitmask::from_fn(3, 3, |x, y| x == y)
    }

    #[test]
    fn test_default_render() {
        let img = diagonal().to_surface(&RenderOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (3, 3));
        assert_eq!(*img.get_pixel(1, 1), WHITE);
        assert_eq!(*img.get_pixel(1, 0), BLACK);
    }

    #[test]
    fn test_skip_unset_bits() {
        let options = RenderOptions {
            unset_color: None,
            ..Default::default()
        };
        let img = diagonal().to_surface(&options).unwrap();
        assert_eq!(*img.get_pixel(2, 2), WHITE);
        assert_eq!(*img.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_dest_and_area_clip() {
        let mut target = RgbaImage::new(4, 4);
        let options = RenderOptions {
            dest: Point::new(2, -1),
            area: Some(Rect::new(0, 0, 2, 10)),
            ..Default::default()
        };
        diagonal().to_surface_into(&mut target, &options).unwrap();
        // Mask column 0..2 lands on target columns 2..4, mask row 0 is above the target.
        assert_eq!(*target.get_pixel(2, 0), BLACK);
        assert_eq!(*target.get_pixel(3, 0), WHITE);
        assert_eq!(*target.get_pixel(2, 1), BLACK);
        assert_eq!(*target.get_pixel(1, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*target.get_pixel(3, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_companion_source_colors() {
        let set_source = RgbaImage::from_fn(2, 2, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let options = RenderOptions {
            set_source: Some(&set_source),
            ..Default::default()
        };
        let img = diagonal().to_surface(&options).unwrap();
        assert_eq!(*img.get_pixel(1, 1), Rgba([1, 1, 7, 255]));
        // Outside the companion: flat color.
        assert_eq!(*img.get_pixel(2, 2), WHITE);
    }

    #[test]
    fn test_unset_source_colors() {
        let unset_source = RgbaImage::from_fn(2, 2, |x, y| Rgba([9, x as u8, y as u8, 200]));
        let options = RenderOptions {
            unset_source: Some(&unset_source),
            unset_color: Some(Rgba([1, 2, 3, 4])),
            ..Default::default()
        };
        let img = diagonal().to_surface(&options).unwrap();
        // Unset bits inside the companion take its pixel.
        assert_eq!(*img.get_pixel(1, 0), Rgba([9, 1, 0, 200]));
        assert_eq!(*img.get_pixel(0, 1), Rgba([9, 0, 1, 200]));
        // Outside it they fall back to the flat color.
        assert_eq!(*img.get_pixel(2, 0), Rgba([1, 2, 3, 4]));
        assert_eq!(*img.get_pixel(1, 2), Rgba([1, 2, 3, 4]));
        // Set bits are unaffected.
        assert_eq!(*img.get_pixel(1, 1), WHITE);
    }

    #[test]
    fn test_format_mismatch() {
        let rgb = RgbImage::from_pixel(3, 3, Rgb([1, 2, 3]));
        let options = RenderOptions {
            unset_source: Some(&rgb),
            ..Default::default()
        };
        let mut target = RgbaImage::new(3, 3);
        let err = diagonal().to_surface_into(&mut target, &options).unwrap_err();
        assert!(matches!(err, MaskError::FormatMismatch { .. }));
        assert!(target.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }
}
