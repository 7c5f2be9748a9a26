use ph_core::{Point2f, Vec2f};

use crate::report::{FallbackReason, Stage};
use crate::settings::ColliderKind;

const DEGENERATE_AREA_FRAC: f64 = 1e-5;

#[derive(Debug, Clone, PartialEq)]
pub enum ColliderSpec {
    /// Closed polygon, counter-clockwise, at least three points.
    Polygon { points: Vec<Point2f> },
    /// Chain closed explicitly: the last point repeats the first.
    EdgeLoop { points: Vec<Point2f> },
    Box { half_extents: Vec2f },
}

impl ColliderSpec {
    pub fn is_box(&self) -> bool {
        matches!(self, Self::Box { .. })
    }

    pub fn points(&self) -> Option<&[Point2f]> {
        match self {
            Self::Polygon { points } | Self::EdgeLoop { points } => Some(points),
            Self::Box { .. } => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Polygon { .. } => "polygon",
            Self::EdgeLoop { .. } => "edge_loop",
            Self::Box { .. } => "box",
        }
    }
}

/// Shoelace area; positive for counter-clockwise winding (y up).
pub fn signed_area(points: &[Point2f]) -> f32 {
    signed_area_f64(points) as f32
}

fn signed_area_f64(points: &[Point2f]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice = 0.0_f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    twice * 0.5
}

pub fn is_degenerate(points: &[Point2f]) -> bool {
    if points.len() < 3 {
        return true;
    }

    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let bbox = (max_x - min_x) as f64 * (max_y - min_y) as f64;
    signed_area_f64(points).abs() <= DEGENERATE_AREA_FRAC * bbox
}

pub fn into_ccw(mut points: Vec<Point2f>) -> Vec<Point2f> {
    if signed_area_f64(&points) < 0.0 {
        points.reverse();
    }
    points
}

/// Fewer than three points, or a zero-area polygon, is reported as the reason
/// to fall back.
pub fn build_shape(
    points: Vec<Point2f>,
    kind: ColliderKind,
) -> Result<ColliderSpec, FallbackReason> {
    if points.len() < 3 {
        return Err(FallbackReason::TooFewPoints {
            stage: Stage::Finalize,
            count: points.len(),
        });
    }

    match kind {
        ColliderKind::Polygon => {
            if is_degenerate(&points) {
                return Err(FallbackReason::DegenerateArea);
            }
            Ok(ColliderSpec::Polygon {
                points: into_ccw(points),
            })
        }
        ColliderKind::EdgeLoop => {
            let mut points = into_ccw(points);
            points.push(points[0]);
            Ok(ColliderSpec::EdgeLoop { points })
        }
    }
}

pub fn fallback_box(half_extents: Vec2f) -> ColliderSpec {
    ColliderSpec::Box { half_extents }
}

#[cfg(test)]
mod tests {
    use ph_core::{Point2f, Vec2f};

    use super::{ColliderSpec, build_shape, fallback_box, into_ccw, is_degenerate, signed_area};
    use crate::report::{FallbackReason, Stage};
    use crate::settings::ColliderKind;

    fn pts(raw: &[(f32, f32)]) -> Vec<Point2f> {
        raw.iter().map(|&(x, y)| Point2f::new(x, y)).collect()
    }

    #[test]
    fn area_sign_tracks_winding() {
        let ccw = pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        let mut cw = ccw.clone();
        cw.reverse();

        assert!((signed_area(&ccw) - 2.0).abs() < 1e-6);
        assert!((signed_area(&cw) + 2.0).abs() < 1e-6);
        assert_eq!(into_ccw(cw), ccw);
    }

    #[test]
    fn clockwise_polygon_is_reversed() {
        let cw = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let spec = build_shape(cw, ColliderKind::Polygon).expect("usable polygon");
        let points = spec.points().expect("polygon has points");
        assert!(signed_area(points) > 0.0);
        assert_eq!(points[0], Point2f::new(1.0, 0.0));
    }

    #[test]
    fn edge_loop_repeats_first_point() {
        let ccw = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let spec = build_shape(ccw.clone(), ColliderKind::EdgeLoop).expect("usable loop");
        let ColliderSpec::EdgeLoop { points } = spec else {
            panic!("expected edge loop");
        };
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], points[3]);
        assert!(signed_area(&points[..3]) > 0.0);
    }

    #[test]
    fn degenerate_polygon_is_rejected() {
        let line = pts(&[(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.25, 0.25)]);
        assert!(is_degenerate(&line));
        assert_eq!(
            build_shape(line.clone(), ColliderKind::Polygon),
            Err(FallbackReason::DegenerateArea)
        );
        assert!(build_shape(line, ColliderKind::EdgeLoop).is_ok());
    }

    #[test]
    fn too_few_points_is_rejected() {
        let two = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(
            build_shape(two, ColliderKind::EdgeLoop),
            Err(FallbackReason::TooFewPoints {
                stage: Stage::Finalize,
                count: 2
            })
        );
    }

    #[test]
    fn fallback_box_shape() {
        let spec = fallback_box(Vec2f::new(0.5, 0.25));
        assert!(spec.is_box());
        assert_eq!(spec.kind_name(), "box");
        assert!(spec.points().is_none());
    }
}
