//! Collision-shape synthesis for pixel-art sprites.
//!
//! [`generate_collider`] runs the whole pipeline on one sprite region:
//!
//! 1. sample alpha values from a [`PixelSource`], going through a scoped
//!    [`StagingGuard`] when the storage is not directly readable;
//! 2. threshold into an occupancy grid, optionally filling single-cell gaps;
//! 3. collect edge cells and walk them into a contour;
//! 4. drop collinear points and simplify with Douglas-Peucker;
//! 5. map grid points into sprite-local units via [`SpriteGeometry`];
//! 6. emit a counter-clockwise [`ColliderSpec`], or a fallback box.
//!
//! Every failure degrades to the fallback box. The only condition surfaced to
//! callers is "no usable pixel data" ([`apply_collider`] returns `false`).
//! Per-stage counts are returned in an [`ExtractionReport`] and, when
//! [`ColliderSettings::debug_logs`] is set, logged through `log`.
//!
//! Calls are synchronous and keep no state between invocations. Two calls
//! that target the same host handle must be serialized by the caller.

mod analysis;
mod host;
mod mapping;
mod pipeline;
mod report;
mod sampler;
mod settings;
mod shape;

pub use analysis::{
    AlphaStats, DEFAULT_SWEEP_THRESHOLDS, SpriteAnalysis, ThresholdStep, alpha_stats,
    analyze_sprite, sweep_buffer, threshold_sweep,
};
pub use host::{ColliderHost, replace_collider};
pub use mapping::SpriteGeometry;
pub use pipeline::{
    ColliderOutcome, apply_collider, collider_from_buffer, generate_collider, trace_outline,
};
pub use report::{ExtractionReport, FallbackReason, Stage};
pub use sampler::{
    PixelBuffer, PixelSource, StagingGuard, StagingId, read_region, sample_region,
};
pub use settings::{ColliderKind, ColliderSettings, OpenContourPolicy};
pub use shape::{ColliderSpec, build_shape, fallback_box, into_ccw, is_degenerate, signed_area};
