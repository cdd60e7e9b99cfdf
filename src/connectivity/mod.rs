//! Connectivity and shape queries
//!
//! This module contains the 8-connected analysis of a mask:
//! - Scan-array union-find labeling (components, largest component, bounding rects)
//! - Centroid and principal-axis orientation from image moments
//! - Moore-neighbour boundary tracing

/// Component labeling and the queries built on it
pub mod labeling;
/// Centroid and orientation
pub mod moments;
/// Boundary tracing
pub mod outline;

mod union_find;
