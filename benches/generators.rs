use criterion::{criterion_group, criterion_main, Criterion};
use maze_game::{
    generators::{self, FirstNeighbourChooser, UniformChooser},
    grid::Grid,
    grid_dimensions::GridDimensions,
    units::{ColumnsCount, RowsCount},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn dims_32() -> GridDimensions {
    GridDimensions::new(RowsCount(32), ColumnsCount(32)).unwrap()
}

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let dims = dims_32();
    let mut rng = XorShiftRng::seed_from_u64(7);
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker(Grid::new(dims), UniformChooser::new(&mut rng)))
    });
}

fn bench_first_neighbour_maze_32(c: &mut Criterion) {
    let dims = dims_32();
    c.bench_function("first_neighbour_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker(Grid::new(dims), FirstNeighbourChooser))
    });
}

criterion_group!(benches,
    bench_recursive_backtracker_maze_32,
    bench_first_neighbour_maze_32
);
criterion_main!(benches);
