//! Boolean and geometric operators on [`Bitmask`](crate::Bitmask)
//!
//! This module extends the mask type with:
//! - Offset-aware combinators (draw, erase) and overlap queries
//! - Nearest-neighbour scaling
//! - Convolution with optional accumulation into a caller-owned output

/// Draw, erase and overlap queries between two placed masks
pub mod overlap;
/// Mask convolution
pub mod convolve;
/// Nearest-neighbour resampling
pub mod scale;
