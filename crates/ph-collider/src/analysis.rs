use ph_core::ImageView;

use crate::mapping::SpriteGeometry;
use crate::pipeline::trace_outline;
use crate::report::ExtractionReport;
use crate::sampler::{PixelBuffer, PixelSource, sample_region};
use crate::settings::ColliderSettings;

pub const DEFAULT_SWEEP_THRESHOLDS: [u8; 6] = [0, 50, 100, 150, 200, 250];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlphaStats {
    pub min: u8,
    pub max: u8,
    pub mean: f32,
    pub transparent: usize,
    pub semi_transparent: usize,
    pub opaque: usize,
}

impl AlphaStats {
    pub fn total(&self) -> usize {
        self.transparent + self.semi_transparent + self.opaque
    }
}

pub fn alpha_stats(alpha: &ImageView<'_, u8>) -> AlphaStats {
    let mut stats = AlphaStats {
        min: u8::MAX,
        ..AlphaStats::default()
    };
    let mut sum = 0_u64;

    for row in alpha.rows() {
        for &a in row {
            stats.min = stats.min.min(a);
            stats.max = stats.max.max(a);
            sum += a as u64;
            match a {
                0 => stats.transparent += 1,
                255 => stats.opaque += 1,
                _ => stats.semi_transparent += 1,
            }
        }
    }

    let total = stats.total();
    if total == 0 {
        return AlphaStats::default();
    }
    stats.mean = (sum as f64 / total as f64) as f32;
    stats
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAnalysis {
    pub width: usize,
    pub height: usize,
    pub stats: AlphaStats,
}

pub fn analyze_sprite<S: PixelSource + ?Sized>(
    source: &S,
    geometry: &SpriteGeometry,
) -> Option<SpriteAnalysis> {
    let buffer = sample_region(source, geometry.rect())?;
    Some(SpriteAnalysis {
        width: buffer.width(),
        height: buffer.height(),
        stats: alpha_stats(&buffer.alpha.as_view()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStep {
    pub threshold: u8,
    pub edge_cells: usize,
    pub points: usize,
    pub closed: bool,
}

/// Traces the region once per threshold with corner removal and
/// simplification disabled. The region is sampled only once.
pub fn threshold_sweep<S: PixelSource + ?Sized>(
    source: &S,
    geometry: &SpriteGeometry,
    thresholds: &[u8],
) -> Option<Vec<ThresholdStep>> {
    let buffer = sample_region(source, geometry.rect())?;
    Some(sweep_buffer(&buffer, geometry, thresholds))
}

pub fn sweep_buffer(
    buffer: &PixelBuffer,
    geometry: &SpriteGeometry,
    thresholds: &[u8],
) -> Vec<ThresholdStep> {
    thresholds
        .iter()
        .map(|&threshold| {
            let settings = ColliderSettings::unreduced(threshold);
            let mut report = ExtractionReport::default();
            // Only the counts matter here; a fallback still leaves them filled.
            let _ = trace_outline(buffer, geometry, &settings, &mut report);
            ThresholdStep {
                threshold,
                edge_cells: report.edge_cells,
                points: report.traced,
                closed: report.closed,
            }
        })
        .collect()
}
