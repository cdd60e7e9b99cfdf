pub mod bitmask;
pub mod point;

pub use bitmask::Bitmask;
pub use point::{Point, Rect};
