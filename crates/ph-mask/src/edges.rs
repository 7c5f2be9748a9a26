use ph_core::{GridPoint, Image};

use crate::occupancy::OccupancyGrid;

#[derive(Debug, Clone, PartialEq)]
pub struct EdgePixelSet {
    member: Image<bool>,
    points: Vec<GridPoint>,
}

impl EdgePixelSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn width(&self) -> usize {
        self.member.width()
    }

    pub fn height(&self) -> usize {
        self.member.height()
    }

    pub fn contains(&self, p: GridPoint) -> bool {
        if p.x < 0 || p.y < 0 {
            return false;
        }
        self.member
            .get(p.x as usize, p.y as usize)
            .copied()
            .unwrap_or(false)
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// Cell with minimal `y`, ties broken by minimal `x`.
    pub fn lowest_leftmost(&self) -> Option<GridPoint> {
        self.points.iter().copied().min_by_key(|p| (p.y, p.x))
    }

    pub fn bounds(&self) -> Option<(GridPoint, GridPoint)> {
        let first = *self.points.first()?;
        let (mut lo, mut hi) = (first, first);
        for p in &self.points {
            lo.x = lo.x.min(p.x);
            lo.y = lo.y.min(p.y);
            hi.x = hi.x.max(p.x);
            hi.y = hi.y.max(p.y);
        }
        Some((lo, hi))
    }
}

pub fn is_edge_cell(grid: &OccupancyGrid, x: usize, y: usize) -> bool {
    let (xi, yi) = (x as isize, y as isize);
    if !grid.is_occupied(xi, yi) {
        return false;
    }
    if x == 0 || y == 0 || x + 1 == grid.width() || y + 1 == grid.height() {
        return true;
    }

    !grid.is_occupied(xi - 1, yi)
        || !grid.is_occupied(xi + 1, yi)
        || !grid.is_occupied(xi, yi - 1)
        || !grid.is_occupied(xi, yi + 1)
}

pub fn find_edge_cells(grid: &OccupancyGrid) -> EdgePixelSet {
    let (w, h) = (grid.width(), grid.height());
    let mut member = Image::new_fill(w, h, false);
    let mut points = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if !is_edge_cell(grid, x, y) {
                continue;
            }
            *member.get_mut(x, y).expect("in-bounds write in find_edge_cells") = true;
            points.push(GridPoint::new(x as i32, y as i32));
        }
    }

    EdgePixelSet { member, points }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use ph_core::{GridPoint, Image};

    use super::{find_edge_cells, is_edge_cell};
    use crate::OccupancyGrid;

    fn filled(w: usize, h: usize) -> OccupancyGrid {
        OccupancyGrid::from_cells(Image::new_fill(w, h, true))
    }

    #[test]
    fn square_has_ring_of_edges() {
        let edges = find_edge_cells(&filled(4, 4));
        assert_eq!(edges.len(), 12);
        assert!(!edges.contains(GridPoint::new(1, 1)));
        assert!(!edges.contains(GridPoint::new(2, 2)));
        assert!(edges.contains(GridPoint::new(3, 0)));
        assert_eq!(edges.lowest_leftmost(), Some(GridPoint::new(0, 0)));
        assert_eq!(
            edges.bounds(),
            Some((GridPoint::new(0, 0), GridPoint::new(3, 3)))
        );
    }

    #[test]
    fn edge_points_satisfy_predicate_without_duplicates() {
        let mut cells = Image::new_fill(7, 6, false);
        for (x, y) in [(1, 1), (2, 1), (3, 1), (2, 2), (3, 2), (4, 2), (3, 3), (2, 4)] {
            *cells.get_mut(x, y).expect("in bounds") = true;
        }
        let grid = OccupancyGrid::from_cells(cells);
        let edges = find_edge_cells(&grid);

        let unique: HashSet<_> = edges.points().iter().copied().collect();
        assert_eq!(unique.len(), edges.len());
        for p in edges.points() {
            assert!(grid.is_occupied(p.x as isize, p.y as isize));
            assert!(is_edge_cell(&grid, p.x as usize, p.y as usize));
        }
    }

    #[test]
    fn empty_grid_has_no_edges() {
        let grid = OccupancyGrid::from_cells(Image::new_fill(5, 5, false));
        let edges = find_edge_cells(&grid);
        assert!(edges.is_empty());
        assert_eq!(edges.lowest_leftmost(), None);
        assert!(!edges.contains(GridPoint::new(-1, 0)));
    }
}
