use image::Rgba;
use tracing::debug;

use super::{ChannelLayout, PixelSource};
use crate::config;
use crate::models::Bitmask;

/// Default alpha cut-off for [`from_surface`]
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 127;

/// Default per-channel tolerance for [`from_threshold`]: exact RGB, any alpha
pub const DEFAULT_COLOR_THRESHOLD: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Build a mask from a pixel source's transparency.
///
/// With an active color key, every pixel that differs from the key is set.
/// Otherwise a pixel is set when its alpha is strictly above `threshold`.
#[tracing::instrument(level = "debug", skip_all, fields(size = ?source.size(), threshold = threshold))]
pub fn from_surface<S: PixelSource + ?Sized>(source: &S, threshold: u8) -> Bitmask {
    let (width, height) = source.size();
    let parallel = config::use_parallel(width, height);

    match source.color_key() {
        Some(key) => {
            let key = source.map_rgba(key);
            debug!(parallel, key, "building mask from color key");
            Bitmask::build_rows(width, height, parallel, |x, y| source.raw(x, y) != key)
        }
        None => {
            debug!(parallel, "building mask from alpha");
            Bitmask::build_rows(width, height, parallel, |x, y| source.alpha(x, y) > threshold)
        }
    }
}

/// Build a mask of the pixels that are close to a color.
///
/// A pixel is set when each of its RGBA channels differs from `color` by at
/// most the matching channel of `threshold`. When `other` is given, the
/// corresponding pixel of `other` replaces `color`; pixels `other` does not
/// cover never match.
///
/// For palette sources with `palette_colors == false` the raw palette values
/// are compared for equality instead of their colors.
#[tracing::instrument(level = "debug", skip_all, fields(
    size = ?source.size(),
    with_other = other.is_some(),
    palette_colors = palette_colors,
))]
pub fn from_threshold<S: PixelSource + ?Sized>(
    source: &S,
    color: Rgba<u8>,
    threshold: Rgba<u8>,
    other: Option<&dyn PixelSource>,
    palette_colors: bool,
) -> Bitmask {
    let (width, height) = source.size();
    let parallel = config::use_parallel(width, height);
    let compare_raw = source.format().layout == ChannelLayout::Indexed && !palette_colors;
    debug!(parallel, compare_raw, "building mask from color distance");

    let within = |pixel: Rgba<u8>, reference: Rgba<u8>| {
        pixel
            .0
            .iter()
            .zip(reference.0)
            .zip(threshold.0)
            .all(|((&p, r), t)| p.abs_diff(r) <= t)
    };

    match other {
        Some(other) => {
            let (other_w, other_h) = other.size();
            Bitmask::build_rows(width, height, parallel, |x, y| {
                if x >= other_w || y >= other_h {
                    return false;
                }
                if compare_raw {
                    source.raw(x, y) == other.raw(x, y)
                } else {
                    within(source.pixel(x, y), other.pixel(x, y))
                }
            })
        }
        None => {
            let raw_color = source.map_rgba(color);
            Bitmask::build_rows(width, height, parallel, |x, y| {
                if compare_raw {
                    source.raw(x, y) == raw_color
                } else {
                    within(source.pixel(x, y), color)
                }
            })
        }
    }
}
