use log::{debug, warn};
use ph_contour::{optimize_corners, simplify_douglas_peucker, trace_contour};
use ph_core::{GridPoint, Point2f};
use ph_mask::{OccupancyGrid, find_edge_cells};

use crate::host::{ColliderHost, replace_collider};
use crate::mapping::SpriteGeometry;
use crate::report::{ExtractionReport, FallbackReason, Stage};
use crate::sampler::{PixelBuffer, PixelSource, sample_region};
use crate::settings::{ColliderSettings, OpenContourPolicy};
use crate::shape::{ColliderSpec, build_shape, fallback_box};

#[derive(Debug, Clone, PartialEq)]
pub struct ColliderOutcome {
    pub spec: ColliderSpec,
    pub report: ExtractionReport,
}

impl ColliderOutcome {
    pub fn has_pixel_data(&self) -> bool {
        self.report.has_pixel_data()
    }
}

/// Never fails: every problem degrades to the fallback box, with the cause
/// recorded in [`ExtractionReport::fallback`].
pub fn generate_collider<S: PixelSource + ?Sized>(
    source: &S,
    geometry: &SpriteGeometry,
    settings: &ColliderSettings,
) -> ColliderOutcome {
    match sample_region(source, geometry.rect()) {
        Some(buffer) => collider_from_buffer(&buffer, geometry, settings),
        None => {
            let report = ExtractionReport {
                fallback: Some(FallbackReason::NoPixelData),
                ..ExtractionReport::default()
            };
            finish_fallback(report, geometry, settings)
        }
    }
}

pub fn collider_from_buffer(
    buffer: &PixelBuffer,
    geometry: &SpriteGeometry,
    settings: &ColliderSettings,
) -> ColliderOutcome {
    let mut report = ExtractionReport {
        sampled: Some((buffer.width(), buffer.height())),
        ..ExtractionReport::default()
    };

    if settings.debug_logs {
        debug!(
            "sampled {}x{} pixels at ({}, {}), alpha threshold {}",
            buffer.width(),
            buffer.height(),
            buffer.region.x,
            buffer.region.y,
            settings.alpha_threshold
        );
    }

    let outline = match trace_outline(buffer, geometry, settings, &mut report) {
        Ok(points) => points,
        Err(reason) => {
            report.fallback = Some(reason);
            return finish_fallback(report, geometry, settings);
        }
    };

    let local = geometry.map_points(&outline);
    if settings.debug_logs {
        log_local_bounds(&local, geometry);
    }

    match build_shape(local, settings.kind) {
        Ok(spec) => {
            report.final_points = spec.points().map_or(0, <[Point2f]>::len);
            if settings.debug_logs {
                debug!(
                    "built {} collider with {} points",
                    spec.kind_name(),
                    report.final_points
                );
            }
            ColliderOutcome { spec, report }
        }
        Err(reason) => {
            report.fallback = Some(reason);
            finish_fallback(report, geometry, settings)
        }
    }
}

/// Counts are written into `report` as each stage completes, so a failed run
/// still reports how far it got.
pub fn trace_outline(
    buffer: &PixelBuffer,
    geometry: &SpriteGeometry,
    settings: &ColliderSettings,
    report: &mut ExtractionReport,
) -> Result<Vec<GridPoint>, FallbackReason> {
    if buffer.width() == 0 || buffer.height() == 0 {
        return Err(FallbackReason::NoPixelData);
    }

    let mut grid = OccupancyGrid::from_alpha(&buffer.alpha.as_view(), settings.alpha_threshold);
    if settings.fill_holes {
        grid = grid.fill_single_holes();
    }
    report.occupied = grid.occupied_count();

    let edges = find_edge_cells(&grid);
    report.edge_cells = edges.len();
    if settings.debug_logs {
        debug!(
            "occupancy {}/{} cells, {} edge cells",
            report.occupied,
            buffer.width() * buffer.height(),
            report.edge_cells
        );
        if let Some((lo, hi)) = edges.bounds() {
            debug!(
                "edge cells span ({}, {})..({}, {})",
                lo.x, lo.y, hi.x, hi.y
            );
        }
    }
    if edges.is_empty() {
        warn!(
            "no edge pixels found above alpha threshold {}",
            settings.alpha_threshold
        );
        return Err(FallbackReason::NoEdgePixels);
    }

    let contour = trace_contour(&edges);
    report.traced = contour.len();
    report.closed = contour.closed;
    report.unvisited = contour.unvisited;
    if settings.debug_logs {
        debug!("ordered {} of {} edge cells", contour.len(), edges.len());
    }
    if contour.len() < 3 {
        return Err(FallbackReason::TooFewPoints {
            stage: Stage::Trace,
            count: contour.len(),
        });
    }
    if !contour.closed {
        warn!(
            "contour walk stopped open after {} points ({} edge cells unvisited)",
            contour.len(),
            contour.unvisited
        );
        if settings.open_contour == OpenContourPolicy::Fallback {
            return Err(FallbackReason::OpenContour {
                unvisited: contour.unvisited,
            });
        }
    }

    let mut points = contour.points;

    if settings.corner_optimization {
        points = optimize_corners(&points);
        report.after_corners = Some(points.len());
        if settings.debug_logs {
            debug!("after corner optimization: {} points", points.len());
        }
    }

    if settings.simplification_tolerance > 0.0 {
        let tolerance = geometry.local_to_pixels(settings.simplification_tolerance);
        points = simplify_douglas_peucker(&points, tolerance);
        report.after_simplify = Some(points.len());
        if settings.debug_logs {
            debug!(
                "after simplification ({tolerance:.3} px): {} points",
                points.len()
            );
        }
        if points.len() < 3 {
            return Err(FallbackReason::TooFewPoints {
                stage: Stage::Simplify,
                count: points.len(),
            });
        }
    }

    Ok(points)
}

/// Returns `false` only when no usable pixel data was available; a fallback
/// box is attached in that case too.
pub fn apply_collider<H, S>(
    host: &mut H,
    handle: H::Handle,
    source: &S,
    geometry: &SpriteGeometry,
    settings: &ColliderSettings,
) -> bool
where
    H: ColliderHost + ?Sized,
    S: PixelSource + ?Sized,
{
    let outcome = generate_collider(source, geometry, settings);
    let has_pixels = outcome.has_pixel_data();
    replace_collider(host, handle, outcome.spec);
    has_pixels
}

fn finish_fallback(
    mut report: ExtractionReport,
    geometry: &SpriteGeometry,
    settings: &ColliderSettings,
) -> ColliderOutcome {
    let half = geometry.half_extents();
    if settings.debug_logs {
        match report.fallback {
            Some(reason) => debug!(
                "fallback box {:.3}x{:.3}: {reason}",
                half.x * 2.0,
                half.y * 2.0
            ),
            None => debug!("fallback box {:.3}x{:.3}", half.x * 2.0, half.y * 2.0),
        }
    }

    report.final_points = 0;
    ColliderOutcome {
        spec: fallback_box(half),
        report,
    }
}

fn log_local_bounds(points: &[Point2f], geometry: &SpriteGeometry) {
    let Some(first) = points.first() else {
        return;
    };

    let (mut lo, mut hi) = (*first, *first);
    for p in points {
        lo.x = lo.x.min(p.x);
        lo.y = lo.y.min(p.y);
        hi.x = hi.x.max(p.x);
        hi.y = hi.y.max(p.y);
    }
    let half = geometry.half_extents();
    debug!(
        "outline bounds ({:.3}, {:.3})..({:.3}, {:.3}), sprite half extents ({:.3}, {:.3})",
        lo.x, lo.y, hi.x, hi.y, half.x, half.y
    );
}
