use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderKind {
    #[default]
    Polygon,
    EdgeLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenContourPolicy {
    #[default]
    Accept,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderSettings {
    pub kind: ColliderKind,
    /// Cells with alpha strictly above this are solid.
    pub alpha_threshold: u8,
    /// Douglas-Peucker tolerance in sprite-local units.
    pub simplification_tolerance: f32,
    pub corner_optimization: bool,
    pub fill_holes: bool,
    pub open_contour: OpenContourPolicy,
    pub debug_logs: bool,
}

impl Default for ColliderSettings {
    fn default() -> Self {
        Self {
            kind: ColliderKind::Polygon,
            alpha_threshold: 200,
            simplification_tolerance: 0.01,
            corner_optimization: true,
            fill_holes: true,
            open_contour: OpenContourPolicy::Accept,
            debug_logs: false,
        }
    }
}

impl ColliderSettings {
    pub fn precise() -> Self {
        Self {
            alpha_threshold: 220,
            simplification_tolerance: 0.005,
            ..Self::default()
        }
    }

    pub fn fast() -> Self {
        Self {
            alpha_threshold: 180,
            simplification_tolerance: 0.02,
            corner_optimization: false,
            fill_holes: false,
            ..Self::default()
        }
    }

    pub fn debug() -> Self {
        Self {
            debug_logs: true,
            ..Self::default()
        }
    }

    pub fn unreduced(alpha_threshold: u8) -> Self {
        Self {
            alpha_threshold,
            simplification_tolerance: 0.0,
            corner_optimization: false,
            ..Self::default()
        }
    }
}
