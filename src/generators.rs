use log::{debug, trace};
use rand::Rng;

use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;

/// Picks which of the candidate neighbours the backtracker carves into next.
pub trait NeighbourChooser {
    /// `candidates` is never empty and is in canonical top, right, bottom, left order.
    fn choose(&mut self, candidates: &[usize]) -> usize;
}

/// Uniformly random choice, what makes the maze a randomized depth first spanning tree.
#[derive(Debug)]
pub struct UniformChooser<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> UniformChooser<'a, R> {
    pub fn new(rng: &'a mut R) -> UniformChooser<'a, R> {
        UniformChooser { rng }
    }
}

impl<'a, R: Rng> NeighbourChooser for UniformChooser<'a, R> {
    fn choose(&mut self, candidates: &[usize]) -> usize {
        candidates[self.rng.gen_range(0..candidates.len())]
    }
}

/// Always the first candidate, giving a fully predictable maze.
#[derive(Debug, Copy, Clone, Default)]
pub struct FirstNeighbourChooser;

impl NeighbourChooser for FirstNeighbourChooser {
    fn choose(&mut self, candidates: &[usize]) -> usize {
        candidates[0]
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationStep {
    /// Carved a passage from `from` into the previously unvisited `to`.
    Advanced { from: usize, to: usize },
    /// Dead end, resumed from an earlier cell on the stack.
    Backtracked { to: usize },
    /// Every cell visited and the stack drained, visited flags have been reset.
    Finished,
}

/// The recursive backtracker maze generation algorithm, run with an explicit stack.
///
/// Starting from the first cell it keeps walking to a randomly chosen unvisited neighbour,
/// knocking down the wall between them. When a cell has no unvisited neighbours left it pops
/// back along the stack to the most recent cell that still does. Each cell is entered exactly
/// once, so exactly `cells - 1` passages are carved and the result is a perfect maze with long
/// twisty corridors and relatively few dead ends.
///
/// The generator holds the grid exclusively until `run` hands it back.
#[derive(Debug)]
pub struct RecursiveBacktracker<C: NeighbourChooser> {
    grid: Grid,
    chooser: C,
    current: usize,
    stack: Vec<usize>,
    finished: bool,
}

impl<C: NeighbourChooser> RecursiveBacktracker<C> {
    /// Takes a grid that is entirely unvisited.
    pub fn new(grid: Grid, chooser: C) -> RecursiveBacktracker<C> {
        assert!(!grid.is_any_visited(), "generation must start from an unvisited grid");
        let capacity = grid.size();
        RecursiveBacktracker {
            grid,
            chooser,
            current: 0,
            stack: Vec::with_capacity(capacity),
            finished: false,
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Advance the state machine by one transition.
    pub fn step(&mut self) -> GenerationStep {
        if self.finished {
            return GenerationStep::Finished;
        }

        let current = self.current;
        self.grid.cells_mut()[current].visited = true;

        let candidates = self.grid.neighbours_unvisited(current);
        if !candidates.is_empty() {
            let next = self.chooser.choose(&candidates);
            self.stack.push(current);
            self.grid
                .remove_walls(current, next)
                .expect("unvisited neighbours are always adjacent");
            self.grid.cells_mut()[next].visited = true;
            self.current = next;
            trace!("advanced {} -> {}", current, next);
            GenerationStep::Advanced { from: current, to: next }

        } else if let Some(previous) = self.stack.pop() {
            self.current = previous;
            trace!("backtracked {} -> {}", current, previous);
            GenerationStep::Backtracked { to: previous }

        } else {
            for cell in self.grid.cells_mut() {
                cell.visited = false;
            }
            self.finished = true;
            GenerationStep::Finished
        }
    }

    /// Step until finished and hand back the completed maze.
    pub fn run(mut self) -> Grid {
        while self.step() != GenerationStep::Finished {}
        debug!("generated maze: {} cells, {} passages",
               self.grid.size(),
               self.grid.passages_count());
        self.grid
    }
}

/// Carve a perfect maze into `grid` choosing neighbours with `chooser`.
pub fn recursive_backtracker<C: NeighbourChooser>(grid: Grid, chooser: C) -> Grid {
    RecursiveBacktracker::new(grid, chooser).run()
}

/// A fresh, fully carved random maze of the given dimensions.
pub fn generate_maze<R: Rng>(dimensions: GridDimensions, rng: &mut R) -> Grid {
    recursive_backtracker(Grid::new(dimensions), UniformChooser::new(rng))
}

#[cfg(test)]
mod tests {

    use std::collections::HashSet;

    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::cells::WallDirection;
    use crate::units::{ColumnsCount, RowsCount};

    fn dims(rows: usize, cols: usize) -> GridDimensions {
        GridDimensions::new(RowsCount(rows), ColumnsCount(cols)).unwrap()
    }

    fn arbitrary_dims(rows: u8, cols: u8) -> GridDimensions {
        dims(rows as usize % 12 + 1, cols as usize % 12 + 1)
    }

    #[test]
    fn first_neighbour_two_by_two_scenario() {
        let mut generator = RecursiveBacktracker::new(Grid::new(dims(2, 2)), FirstNeighbourChooser);

        let mut steps = vec![];
        loop {
            let step = generator.step();
            steps.push(step);
            if step == GenerationStep::Finished {
                break;
            }
        }

        // (0,0) -> (0,1) -> (1,1) -> (1,0), then unwind the stack
        assert_eq!(steps,
                   vec![GenerationStep::Advanced { from: 0, to: 1 },
                        GenerationStep::Advanced { from: 1, to: 3 },
                        GenerationStep::Advanced { from: 3, to: 2 },
                        GenerationStep::Backtracked { to: 3 },
                        GenerationStep::Backtracked { to: 1 },
                        GenerationStep::Backtracked { to: 0 },
                        GenerationStep::Finished]);

        let g = generator.run();
        assert_eq!(g.iter_passages().collect::<Vec<_>>(), vec![(0, 1), (1, 3), (2, 3)]);
        assert!(g.is_perfect_maze());
        assert!(!g.is_any_visited());

        let cell = |i: usize| g.cell(i).unwrap();
        assert!(!cell(0).has_wall(WallDirection::Right));
        assert!(cell(0).has_wall(WallDirection::Bottom));
        assert!(!cell(1).has_wall(WallDirection::Left));
        assert!(!cell(1).has_wall(WallDirection::Bottom));
        assert!(!cell(3).has_wall(WallDirection::Top));
        assert!(!cell(3).has_wall(WallDirection::Left));
        assert!(!cell(2).has_wall(WallDirection::Right));
        assert!(cell(2).has_wall(WallDirection::Top));
    }

    #[test]
    fn step_after_finish_stays_finished() {
        let mut generator = RecursiveBacktracker::new(Grid::new(dims(1, 2)), FirstNeighbourChooser);
        assert_eq!(generator.step(), GenerationStep::Advanced { from: 0, to: 1 });
        assert_eq!(generator.stack_depth(), 1);
        assert_eq!(generator.step(), GenerationStep::Backtracked { to: 0 });
        assert_eq!(generator.current(), 0);
        assert_eq!(generator.step(), GenerationStep::Finished);
        assert_eq!(generator.step(), GenerationStep::Finished);
        assert_eq!(generator.grid().passages_count(), 1);
    }

    #[test]
    fn single_cell_finishes_immediately() {
        let mut generator = RecursiveBacktracker::new(Grid::new(dims(1, 1)), FirstNeighbourChooser);
        assert_eq!(generator.step(), GenerationStep::Finished);
        let g = generator.run();
        assert_eq!(g.passages_count(), 0);
        assert!(!g.is_any_visited());
    }

    #[test]
    fn every_cell_entered_exactly_once() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let mut generator = RecursiveBacktracker::new(Grid::new(dims(9, 13)),
                                                      UniformChooser::new(&mut rng));
        let mut entered = HashSet::new();
        entered.insert(0);
        let mut advances = 0;
        loop {
            match generator.step() {
                GenerationStep::Advanced { to, .. } => {
                    advances += 1;
                    assert!(entered.insert(to), "cell {} entered twice", to);
                }
                GenerationStep::Backtracked { to } => assert!(entered.contains(&to)),
                GenerationStep::Finished => break,
            }
        }
        assert_eq!(advances, 9 * 13 - 1);
        assert_eq!(entered.len(), 9 * 13);
    }

    #[test]
    fn same_seed_same_maze() {
        let mut rng_a = XorShiftRng::seed_from_u64(42);
        let mut rng_b = XorShiftRng::seed_from_u64(42);
        let a = generate_maze(dims(15, 20), &mut rng_a);
        let b = generate_maze(dims(15, 20), &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn uniform_chooser_reaches_every_candidate() {
        let mut rng = XorShiftRng::seed_from_u64(3);
        let mut chooser = UniformChooser::new(&mut rng);
        let candidates = [10, 20, 30, 40];
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let pick = chooser.choose(&candidates);
            let slot = candidates.iter().position(|&c| c == pick).expect("picked a non candidate");
            counts[slot] += 1;
        }
        // roughly 1000 each
        assert!(counts.iter().all(|&n| n > 800 && n < 1200), "{:?}", counts);
    }

    #[test]
    fn spanning_tree_property() {
        fn p(rows: u8, cols: u8, seed: u64) -> bool {
            let d = arbitrary_dims(rows, cols);
            let g = generate_maze(d, &mut XorShiftRng::seed_from_u64(seed));
            let graph = g.passage_graph();
            graph.edge_count() == d.size().0 - 1 &&
            petgraph::algo::connected_components(&graph) == 1 &&
            !petgraph::algo::is_cyclic_undirected(&graph)
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn visited_reset_property() {
        fn p(rows: u8, cols: u8, seed: u64) -> bool {
            let g = generate_maze(arbitrary_dims(rows, cols), &mut XorShiftRng::seed_from_u64(seed));
            g.cells().iter().all(|cell| !cell.is_visited())
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn wall_symmetry_property() {
        fn p(rows: u8, cols: u8, seed: u64) -> TestResult {
            let g = generate_maze(arbitrary_dims(rows, cols), &mut XorShiftRng::seed_from_u64(seed));
            let pairs_match = (0..g.size()).all(|index| {
                WallDirection::ALL.iter().all(|&dir| {
                    match g.neighbour_at_direction(index, dir) {
                        Some(n) => {
                            g.cell(index).unwrap().has_wall(dir) ==
                            g.cell(n).unwrap().has_wall(dir.opposite())
                        }
                        None => g.cell(index).unwrap().has_wall(dir),
                    }
                })
            });
            TestResult::from_bool(pairs_match && g.has_symmetric_walls())
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult);
    }
}
