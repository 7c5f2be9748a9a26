use ph_core::{Image, ImageView};

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    cells: Image<bool>,
}

impl OccupancyGrid {
    pub fn from_alpha(alpha: &ImageView<'_, u8>, threshold: u8) -> Self {
        let mut data = Vec::with_capacity(alpha.width() * alpha.height());
        for row in alpha.rows() {
            data.extend(row.iter().map(|&a| a > threshold));
        }

        Self {
            cells: Image::from_vec(alpha.width(), alpha.height(), data)
                .expect("one cell per alpha sample"),
        }
    }

    pub fn from_cells(cells: Image<bool>) -> Self {
        Self { cells }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Out-of-range coordinates read as unoccupied.
    pub fn is_occupied(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.cells
            .get(x as usize, y as usize)
            .copied()
            .unwrap_or(false)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.data().iter().filter(|&&c| c).count()
    }

    /// One pass of gap filling: an empty cell becomes occupied iff its four
    /// orthogonal neighbours are occupied in `self`. Reads only the input, so
    /// a freshly filled cell never enables another fill. Border cells are
    /// never filled.
    pub fn fill_single_holes(&self) -> Self {
        let mut out = self.cells.clone();
        let (w, h) = (self.width(), self.height());
        if w < 3 || h < 3 {
            return Self { cells: out };
        }

        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let (xi, yi) = (x as isize, y as isize);
                if self.is_occupied(xi, yi) {
                    continue;
                }

                let enclosed = self.is_occupied(xi - 1, yi)
                    && self.is_occupied(xi + 1, yi)
                    && self.is_occupied(xi, yi - 1)
                    && self.is_occupied(xi, yi + 1);
                if enclosed {
                    *out.get_mut(x, y).expect("in-bounds write in fill_single_holes") = true;
                }
            }
        }

        Self { cells: out }
    }
}
