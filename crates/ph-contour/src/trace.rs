use ph_core::{GridPoint, Image};
use ph_mask::EdgePixelSet;

// Neighbour order in raster terms (row index growing away from the start row):
// right, down-right, down, down-left, left, up-left, up, up-right. On the
// bottom-up grid "down" is +y, so the start row is never tried first.
const DX: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [i32; 8] = [0, 1, 1, 1, 0, -1, -1, -1];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    pub points: Vec<GridPoint>,
    /// Edge cells the walk never reached.
    pub unvisited: usize,
    /// Every edge cell was visited, there are at least three points and the
    /// last point is an 8-neighbour of the first.
    pub closed: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Greedy nearest-neighbour walk starting at the lowest, then leftmost, edge
/// cell. At each step the first unvisited edge cell in neighbour order is taken.
///
/// This is not a boundary follower: one-cell bottlenecks, branches and
/// disjoint components can end the walk early. Such walks are reported with
/// `closed == false` and a non-zero `unvisited` count; they are not repaired.
pub fn trace_contour(edges: &EdgePixelSet) -> Contour {
    let Some(start) = edges.lowest_leftmost() else {
        return Contour::default();
    };

    let mut visited = Image::new_fill(edges.width(), edges.height(), false);
    let mut points = Vec::with_capacity(edges.len());

    mark(&mut visited, start);
    points.push(start);

    let mut cur = start;
    while points.len() < edges.len() {
        let Some(next) = next_unvisited(cur, edges, &visited) else {
            break;
        };
        mark(&mut visited, next);
        points.push(next);
        cur = next;
    }

    let unvisited = edges.len() - points.len();
    let closed = unvisited == 0 && points.len() >= 3 && cur.is_adjacent8(start);

    Contour {
        points,
        unvisited,
        closed,
    }
}

fn next_unvisited(
    cur: GridPoint,
    edges: &EdgePixelSet,
    visited: &Image<bool>,
) -> Option<GridPoint> {
    (0..8)
        .map(|dir| cur.offset(DX[dir], DY[dir]))
        .find(|&p| edges.contains(p) && !is_marked(visited, p))
}

#[inline]
fn mark(visited: &mut Image<bool>, p: GridPoint) {
    *visited
        .get_mut(p.x as usize, p.y as usize)
        .expect("edge cells lie inside the grid") = true;
}

#[inline]
fn is_marked(visited: &Image<bool>, p: GridPoint) -> bool {
    visited
        .get(p.x as usize, p.y as usize)
        .copied()
        .unwrap_or(false)
}
