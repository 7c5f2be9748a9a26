use ph_core::{GridPoint, Point2f};

/// Douglas-Peucker reduction of an **open** polyline from the first to the
/// last point; the closing edge back to the first point is never examined.
/// `tolerance <= 0` returns the input unchanged.
pub fn simplify_douglas_peucker(points: &[GridPoint], tolerance: f32) -> Vec<GridPoint> {
    let n = points.len();
    if n < 3 || tolerance <= 0.0 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0_usize, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let a = points[start].to_point2f();
        let b = points[end].to_point2f();

        let mut max_dist = 0.0_f32;
        let mut max_idx = start;
        for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = segment_distance(p.to_point2f(), a, b);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }

        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((max_idx, end));
            stack.push((start, max_idx));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter_map(|(&p, &k)| k.then_some(p))
        .collect()
}

pub fn segment_distance(p: Point2f, a: Point2f, b: Point2f) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let len = ab.norm();
    if len == 0.0 {
        return ap.norm();
    }

    let t = (ap.dot(ab) / len).clamp(0.0, len);
    let closest = a + ab * (t / len);
    p.distance(closest)
}
