use ph_core::GridPoint;

pub const COLLINEAR_EPS: f32 = 0.1;

/// Drops collinear points, treating the sequence as a ring. If fewer than
/// three points would survive, the input is returned unchanged.
pub fn optimize_corners(points: &[GridPoint]) -> Vec<GridPoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let kept: Vec<GridPoint> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            (cur - prev).cross(next - cur).abs() >= COLLINEAR_EPS
        })
        .map(|i| points[i])
        .collect();

    if kept.len() < 3 {
        return points.to_vec();
    }

    kept
}
