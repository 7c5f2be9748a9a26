use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Trace,
    Simplify,
    Finalize,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Simplify => "simplify",
            Self::Finalize => "finalize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Readback failed or the sprite region is empty.
    NoPixelData,
    NoEdgePixels,
    TooFewPoints { stage: Stage, count: usize },
    OpenContour { unvisited: usize },
    DegenerateArea,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPixelData => write!(f, "no usable pixel data"),
            Self::NoEdgePixels => write!(f, "no edge pixels above the alpha threshold"),
            Self::TooFewPoints { stage, count } => {
                write!(f, "only {count} points left after {}", stage.name())
            }
            Self::OpenContour { unvisited } => {
                write!(f, "contour walk did not close ({unvisited} edge cells unvisited)")
            }
            Self::DegenerateArea => write!(f, "polygon area is degenerate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionReport {
    pub sampled: Option<(usize, usize)>,
    pub occupied: usize,
    pub edge_cells: usize,
    pub traced: usize,
    pub closed: bool,
    pub unvisited: usize,
    pub after_corners: Option<usize>,
    pub after_simplify: Option<usize>,
    pub final_points: usize,
    pub fallback: Option<FallbackReason>,
}

impl ExtractionReport {
    pub fn has_pixel_data(&self) -> bool {
        self.sampled.is_some_and(|(w, h)| w > 0 && h > 0)
    }
}
