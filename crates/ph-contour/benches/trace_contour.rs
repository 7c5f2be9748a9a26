use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ph_contour::{optimize_corners, simplify_douglas_peucker, trace_contour};
use ph_core::Image;
use ph_mask::{OccupancyGrid, find_edge_cells};

fn synthetic_blob(size: usize) -> OccupancyGrid {
    // Octagon-ish silhouette: a square with clipped corners.
    let cut = size / 4;
    let mut cells = Image::new_fill(size, size, false);
    for y in 0..size {
        for x in 0..size {
            let dx = x.min(size - 1 - x);
            let dy = y.min(size - 1 - y);
            if dx + dy >= cut {
                *cells.get_mut(x, y).expect("in bounds") = true;
            }
        }
    }
    OccupancyGrid::from_cells(cells)
}

fn bench_trace(c: &mut Criterion) {
    let grid = synthetic_blob(256);
    let edges = find_edge_cells(&grid);

    c.bench_function("ph_contour_trace_256", |b| {
        b.iter(|| {
            let contour = trace_contour(black_box(&edges));
            black_box(contour.len());
        });
    });

    let contour = trace_contour(&edges);
    c.bench_function("ph_contour_corners_simplify_256", |b| {
        b.iter(|| {
            let corners = optimize_corners(black_box(&contour.points));
            let simplified = simplify_douglas_peucker(&corners, black_box(1.0));
            black_box(simplified.len());
        });
    });
}

criterion_group!(benches, bench_trace);
criterion_main!(benches);
