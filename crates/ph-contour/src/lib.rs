//! Ordering and reduction of sprite edge cells into a polygon outline.
//!
//! Stages, in pipeline order:
//! - [`trace_contour`]: greedy 8-neighbour walk over an [`ph_mask::EdgePixelSet`].
//!   Tries right, down-right, down, down-left, left, up-left, up, up-right
//!   in raster terms ("down" is `+y` on the bottom-up grid) and takes the
//!   first unvisited edge cell. Filled regions are walked counter-clockwise
//!   with y up. Incomplete walks are
//!   reported through [`Contour::closed`] and [`Contour::unvisited`].
//! - [`optimize_corners`]: drops cyclically collinear points, never leaving
//!   fewer than three.
//! - [`simplify_douglas_peucker`]: open-polyline Douglas-Peucker in grid units.
//!
//! All stages are deterministic and allocate their scratch state per call.

mod corners;
mod simplify;
mod trace;

pub use corners::{COLLINEAR_EPS, optimize_corners};
pub use simplify::{segment_distance, simplify_douglas_peucker};
pub use trace::{Contour, trace_contour};
