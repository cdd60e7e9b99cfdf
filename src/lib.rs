//! bitmask - pixel-perfect collision masks
//!
//! A dense, bit-packed 2D mask type with offset-aware overlap tests,
//! convolution, scaling and 8-connected component analysis, plus adapters
//! that build masks from pixel buffers and paint them back.
//!
//! ```
//! use bitmask::{Bitmask, Point};
//!
//! let player = Bitmask::filled(4, 4);
//! let mut wall = Bitmask::new(16, 16);
//! wall.draw(&Bitmask::filled(16, 2), (0, 14));
//!
//! assert_eq!(wall.overlap(&player, (3, 12)), Some(Point::new(3, 14)));
//! assert_eq!(wall.overlap_area(&player, (3, 12)), 8);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Connectivity analysis (components, moments, outlines)
pub mod connectivity;
/// Error types
pub mod error;
/// Core data structures (Bitmask, Point, Rect)
pub mod models;
/// Boolean and geometric operators between masks
pub mod ops;
/// Pixel-source traits and mask construction/rendering
pub mod surface;
/// Debugging helpers (image loading, mask statistics)
pub mod tools;

mod config;

pub use error::{MaskError, MaskResult};
pub use models::{Bitmask, Point, Rect};
pub use surface::{
    ColorKeyed, DEFAULT_ALPHA_THRESHOLD, DEFAULT_COLOR_THRESHOLD, PixelFormat, PixelSource,
    PixelTarget, RenderOptions, from_surface, from_threshold,
};
