//! Geometric primitives used by the reciprocal-frame passes.
//!
//! - [`Line`]: a finite line segment between two points
//! - [`intersection_line_line`]: closest points of two infinite lines
//! - [`intersection_segment_segment`]: the same, restricted to both segments
//!
//! Intersections are reported as *closest point pairs*. For coplanar,
//! crossing lines both points coincide; for skew lines they do not, and the
//! caller decides which of the two it wants.

mod line;

pub use line::{
    intersection_line_line, intersection_segment_segment, is_point_on_segment, Line,
    DEFAULT_TOLERANCE,
};
