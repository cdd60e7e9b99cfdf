use crate::connectivity::labeling::Labeling;
use crate::models::Bitmask;
use image::RgbaImage;
use std::path::Path;

/// Load an image file as an RGBA buffer, ready to use as a pixel source.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Summary statistics for a mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStats {
    /// Count of set bits.
    pub set_bits: usize,
    /// Total bits in the mask.
    pub total_bits: usize,
    /// Ratio of set bits to total bits.
    pub set_ratio: f64,
    /// Number of 8-connected components.
    pub components: usize,
    /// Size of the largest component.
    pub largest_component: usize,
}

/// Compute set-bit and component stats for a mask.
pub fn mask_stats(mask: &Bitmask) -> MaskStats {
    let set_bits = mask.count();
    let total_bits = mask.width() * mask.height();
    let set_ratio = if total_bits == 0 {
        0.0
    } else {
        set_bits as f64 / total_bits as f64
    };
    let labeling = Labeling::of(mask);
    let largest_component = labeling.largest().map_or(0, |l| labeling.size_of(l));
    MaskStats {
        set_bits,
        total_bits,
        set_ratio,
        components: labeling.count(),
        largest_component,
    }
}
