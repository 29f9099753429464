use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use maze_game::generators;
use maze_game::grid::Grid;
use maze_game::grid_dimensions::GridDimensions;
use maze_game::pathing::{self, Distances};
use maze_game::units::{ColumnsCount, RowsCount};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn large_maze() -> Grid {
    let dims = GridDimensions::new(RowsCount(350), ColumnsCount(350)).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(350);
    generators::generate_maze(dims, &mut rng)
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = large_maze();
        let start = g.index(250, 250).unwrap();
        b.iter(|| Distances::new(&g, start))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = large_maze();
        let start = g.index(250, 250).unwrap();
        let distances = Distances::new(&g, start).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let g = large_maze();
        let start = g.index(250, 250).unwrap();
        let distances = Distances::new(&g, start).unwrap();
        b.iter(|| pathing::shortest_path(&g, &distances, 0))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_points,
    bench_shortest_path
);
criterion_main!(benches);
