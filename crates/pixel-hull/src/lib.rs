//! Umbrella crate for the `pixel-hull` workspace.
//!
//! Re-exports the grid primitives, the occupancy and edge stages, contour
//! tracing and reduction, and the collider pipeline built on top of them.

pub use ph_collider::*;
pub use ph_contour::*;
pub use ph_core::*;
pub use ph_mask::*;
