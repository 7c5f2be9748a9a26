//! Binary occupancy helpers for sprite silhouettes.
//!
//! A cell is occupied iff its alpha is strictly greater than the threshold.
//! Hole filling is a single pass over 4-neighbourhoods and never iterates to
//! convergence. Edge cells are occupied cells that touch the grid border or an
//! unoccupied 4-neighbour.

mod edges;
mod occupancy;

pub use edges::{EdgePixelSet, find_edge_cells, is_edge_cell};
pub use occupancy::OccupancyGrid;
