use std::fmt;

use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cell, WallDirection};
use crate::grid_dimensions::GridDimensions;
use crate::grid_displays::{BlankDisplay, GridDisplay};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

pub type IndexSmallVec = SmallVec<[usize; 4]>;

/// A rectangular lattice of cells, each carrying its own four walls.
///
/// The grid exclusively owns its cells. After generation the walls are treated as fixed,
/// only the visited scratch flag is touched by the generator.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<Cell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, passages: {:?}",
               self.rows(), self.columns(), self.passages_count())
    }
}

impl Grid {
    /// A fresh grid with every wall standing and nothing visited.
    pub fn new(dimensions: GridDimensions) -> Grid {
        let ColumnsCount(cols) = dimensions.columns();
        let NodesCount(cells_count) = dimensions.size();
        let cells = (0..cells_count)
            .map(|index| Cell::new(index / cols, index % cols))
            .collect();
        Grid::from_cells(dimensions, cells)
    }

    /// Adopt an existing set of cells.
    ///
    /// Panics if the cells do not exactly tile the dimensions in row-major order or if the wall
    /// state is one-sided, either is a programming error rather than a recoverable condition.
    pub fn from_cells(dimensions: GridDimensions, cells: Vec<Cell>) -> Grid {
        assert_eq!(cells.len(), dimensions.size().0,
                   "cell count does not match the grid dimensions");
        for (index, cell) in cells.iter().enumerate() {
            assert_eq!(dimensions.coordinate_index(cell.coordinate()), Some(index),
                       "cell {:?} is not at its row-major slot {}", cell.coordinate(), index);
        }
        let grid = Grid { dimensions, cells };
        assert!(grid.has_symmetric_walls(), "grid walls are not paired");
        grid
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    /// Linear index of (row, col), None when out of bounds.
    #[inline]
    pub fn index(&self, row: isize, col: isize) -> Option<usize> {
        self.dimensions.index(row, col)
    }

    #[inline]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn start_index(&self) -> usize {
        0
    }

    pub fn end_index(&self) -> usize {
        self.cells.len() - 1
    }

    /// The in-bounds cell index one step away in `direction`, whatever the wall state.
    pub fn neighbour_at_direction(&self, index: usize, direction: WallDirection) -> Option<usize> {
        self.dimensions
            .coordinate(index)
            .and_then(|coord| self.dimensions.coordinate_index(coord.offset(direction)))
    }

    /// All in-bounds neighbours in canonical order top, right, bottom, left.
    pub fn neighbours(&self, index: usize) -> IndexSmallVec {
        WallDirection::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(index, dir))
            .collect()
    }

    /// In-bounds neighbours not yet visited by a running generator, in canonical order.
    pub fn neighbours_unvisited(&self, index: usize) -> IndexSmallVec {
        WallDirection::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(index, dir))
            .filter(|&neighbour| !self.cells[neighbour].visited)
            .collect()
    }

    /// Neighbours reachable through an open wall, in canonical order.
    pub fn links(&self, index: usize) -> IndexSmallVec {
        match self.cells.get(index) {
            Some(cell) => {
                WallDirection::ALL
                    .iter()
                    .filter(|&&dir| !cell.has_wall(dir))
                    .filter_map(|&dir| self.neighbour_at_direction(index, dir))
                    .collect()
            }
            None => IndexSmallVec::new(),
        }
    }

    /// Is there an open passage between two cells?
    pub fn is_linked(&self, a: usize, b: usize) -> bool {
        match (self.dimensions.coordinate(a), self.dimensions.coordinate(b)) {
            (Some(a_coord), Some(b_coord)) => {
                WallDirection::between(a_coord, b_coord)
                    .map_or(false, |dir| !self.cells[a].has_wall(dir))
            }
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, index: usize, direction: WallDirection) -> bool {
        self.neighbour_at_direction(index, direction)
            .map_or(false, |neighbour| self.is_linked(index, neighbour))
    }

    /// Knock down the pair of walls shared by two adjacent cells.
    ///
    /// Removing an already open wall is a no-op.
    pub fn remove_walls(&mut self, current: usize, next: usize) -> Result<(), CellLinkError> {
        let (current_coord, next_coord) = match (self.dimensions.coordinate(current),
                                                 self.dimensions.coordinate(next)) {
            (Some(c), Some(n)) => (c, n),
            _ => return Err(CellLinkError::InvalidGridCoordinate),
        };
        if current == next {
            return Err(CellLinkError::SelfLink);
        }
        let shared = WallDirection::between(current_coord, next_coord)
            .ok_or(CellLinkError::NotAdjacent)?;

        self.cells[current].walls.open(shared);
        self.cells[next].walls.open(shared.opposite());
        Ok(())
    }

    /// Count of open passages, each shared wall pair counted once.
    pub fn passages_count(&self) -> usize {
        self.iter_passages().count()
    }

    /// Each open passage once, as a `(lower, higher)` index pair.
    pub fn iter_passages<'a>(&'a self) -> impl Iterator<Item = (usize, usize)> + 'a {
        // Looking only right and down visits every interior wall exactly once.
        (0..self.cells.len()).flat_map(move |index| {
            [WallDirection::Right, WallDirection::Bottom]
                .iter()
                .filter(move |&&dir| !self.cells[index].has_wall(dir))
                .filter_map(move |&dir| self.neighbour_at_direction(index, dir))
                .map(move |neighbour| (index, neighbour))
                .collect::<SmallVec<[(usize, usize); 2]>>()
        })
    }

    /// Every opened wall has its partner opened too, and no wall facing out of the
    /// lattice has been opened.
    pub fn has_symmetric_walls(&self) -> bool {
        (0..self.cells.len()).all(|index| {
            WallDirection::ALL.iter().all(|&dir| {
                let open = !self.cells[index].has_wall(dir);
                match self.neighbour_at_direction(index, dir) {
                    Some(neighbour) => open == !self.cells[neighbour].has_wall(dir.opposite()),
                    None => !open,
                }
            })
        })
    }

    pub fn is_any_visited(&self) -> bool {
        self.cells.iter().any(|cell| cell.visited)
    }

    /// Undirected graph with one node per cell and one edge per open passage.
    pub fn passage_graph(&self) -> UnGraph<(), ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.dimensions.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }
        for (a, b) in self.iter_passages() {
            let _ = graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        graph
    }

    /// Is the passage graph a spanning tree: connected, acyclic and `cells - 1` passages.
    pub fn is_perfect_maze(&self) -> bool {
        let graph = self.passage_graph();
        graph.edge_count() == self.size() - 1 && connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }

    /// Render the maze with box drawing characters, asking `display` for each cell's 3 glyph body.
    pub fn render_text(&self, display: &dyn GridDisplay) -> String {

        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let RowsCount(rows_count) = self.rows();
        let ColumnsCount(columns_count) = self.columns();
        let mut output = String::new();

        // The north most boundary is special cased, every other row draws its own south side.
        output.push_str(WALL_RD);
        for index in 0..columns_count {
            output.push_str(WALL_LR_3);
            if self.is_neighbour_linked(index, WallDirection::Right) {
                output.push_str(WALL_LR);
            } else if index == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for row in 0..rows_count {
            let is_last_row = row == rows_count - 1;

            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for col in 0..columns_count {
                let index = row * columns_count + col;
                let is_first_column = col == 0;
                let is_last_column = col == columns_count - 1;
                let east_open = self.is_neighbour_linked(index, WallDirection::Right);
                let south_open = self.is_neighbour_linked(index, WallDirection::Bottom);

                let body = display.render_cell_body(index);
                row_middle_section_render.push_str(&body);
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            self.neighbour_at_direction(index, WallDirection::Right)
                                .map_or(false,
                                        |c| self.is_neighbour_linked(c, WallDirection::Bottom));
                        let access_se_from_south =
                            self.neighbour_at_direction(index, WallDirection::Bottom)
                                .map_or(false,
                                        |c| self.is_neighbour_linked(c, WallDirection::Right));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };
                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render_text(&BlankDisplay))
    }
}
