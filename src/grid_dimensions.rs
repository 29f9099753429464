use crate::cells::GridCoordinate;
use crate::units::{CellSize, ColumnsCount, EdgesCount, Height, NodesCount, RowsCount, Width};

/// Fixed `rows x columns` shape of a rectangular maze lattice.
///
/// Cells are laid out row-major: the cell at (row, col) lives at `row * columns + col`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl GridDimensions {
    /// None when either side is zero, there is no maze without cells, or when the cell count
    /// does not fit in a `usize`.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Option<GridDimensions> {
        if rows.0 == 0 || columns.0 == 0 {
            return None;
        }
        rows.0.checked_mul(columns.0).map(|_| GridDimensions { rows, columns })
    }

    /// Derive the lattice from a window size and a square cell size, discarding any partial
    /// cell left over at the right or bottom edge.
    pub fn from_window(width: Width, height: Height, cell_size: CellSize) -> Option<GridDimensions> {
        if cell_size.0 == 0 {
            return None;
        }
        GridDimensions::new(RowsCount(height.0 / cell_size.0),
                            ColumnsCount(width.0 / cell_size.0))
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    /// Linear index of (row, col), or None when outside `[0, rows) x [0, columns)`.
    #[inline]
    pub fn index(&self, row: isize, col: isize) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows.0 || col as usize >= self.columns.0 {
            None
        } else {
            Some(row as usize * self.columns.0 + col as usize)
        }
    }

    #[inline]
    pub fn coordinate_index(&self, coord: GridCoordinate) -> Option<usize> {
        self.index(coord.row, coord.col)
    }

    /// Inverse of `index`.
    #[inline]
    pub fn coordinate(&self, index: usize) -> Option<GridCoordinate> {
        if index < self.size().0 {
            let row = index / self.columns.0;
            let col = index % self.columns.0;
            Some(GridCoordinate::new(row as isize, col as isize))
        } else {
            None
        }
    }

    /// Node count and an upper bound on the undirected edges between orthogonal neighbours.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (rows, cols) = (self.rows.0, self.columns.0);
        let edges = rows.saturating_mul(cols - 1).saturating_add(cols.saturating_mul(rows - 1));
        (self.size(), EdgesCount(edges))
    }
}
