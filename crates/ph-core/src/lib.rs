//! Foundational types for pixel-art collision-shape extraction.
//!
//! ## Grid Orientation
//! Grids are indexed `(x, y)` with row `0` at the **bottom** of the sprite
//! region, so `y` grows upward like sprite-local space. Sources whose storage
//! is top-down flip rows before handing data to the pipeline.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over sub-rectangles of a larger atlas.

mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::{GridPoint, Point2f, Rect, Vec2f};
pub use image::{Image, ImageView};
