use fnv::FnvHashMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::grid::Grid;
use crate::grid_displays::GridDisplay;

/// Step counts from one start cell to every cell reachable through open passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start: usize,
    distances: FnvHashMap<usize, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill out from `start`. None if `start` is not a cell of `grid`.
    pub fn new(grid: &Grid, start: usize) -> Option<Distances> {

        if grid.cell(start).is_none() {
            return None;
        }

        let mut max = 0;
        let mut distances = FnvHashMap::with_capacity_and_hasher(grid.size(), Default::default());
        distances.insert(start, 0);

        // Every step costs one, so the first time a cell is reached is via its shortest route
        // and the map doubles as the visited set.
        let mut frontier = vec![start];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for &index in &frontier {
                let distance_to_cell = distances[&index];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link in grid.links(index) {
                    if !distances.contains_key(&link) {
                        distances.insert(link, distance_to_cell + 1);
                        new_frontier.push(link);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None when the cell is unreachable or not on the grid.
    #[inline(always)]
    pub fn distance_from_start_to(&self, index: usize) -> Option<u32> {
        self.distances.get(&index).cloned()
    }

    /// Every cell at the maximum distance, lowest index first.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[usize; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, &distance)| distance == furthest_distance)
            .map(|(&index, _)| index)
            .sorted()
            .collect()
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, index: usize) -> String {
        if let Some(d) = self.distances.get(&index) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

/// Walk back downhill from `end_point` to the start of `distances_from_start`.
///
/// The path runs start to end inclusive. None if the end is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: usize)
                     -> Option<Vec<usize>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current = end_point;

    while current != start {

        let closest_to_start = grid.links(current)
            .into_iter()
            .filter_map(|link| {
                distances_from_start.distance_from_start_to(link).map(|d| (link, d))
            })
            .min_by_key(|&(_, d)| d);

        match closest_to_start {
            Some((closer, closer_distance)) if closer_distance < current_distance => {
                current = closer;
                current_distance = closer_distance;
                path.push(current);
            }
            // No linked neighbour gets us any closer, the distances belong to another maze.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Route from the grid's start cell to its end cell.
pub fn solution_path(grid: &Grid) -> Option<Vec<usize>> {
    let distances = Distances::new(grid, grid.start_index())?;
    shortest_path(grid, &distances, grid.end_index())
}
