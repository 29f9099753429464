use std::ops::{Index, IndexMut};

/// The four sides of a square cell.
///
/// The discriminants double as the wall slot index, so the declaration order is the
/// canonical neighbour order used everywhere: top, right, bottom, left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum WallDirection {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl WallDirection {
    /// Canonical evaluation order when enumerating a cell's neighbours.
    pub const ALL: [WallDirection; 4] = [WallDirection::Top,
                                         WallDirection::Right,
                                         WallDirection::Bottom,
                                         WallDirection::Left];

    /// The wall of the adjacent cell that faces back towards this one.
    pub fn opposite(self) -> WallDirection {
        match self {
            WallDirection::Top => WallDirection::Bottom,
            WallDirection::Right => WallDirection::Left,
            WallDirection::Bottom => WallDirection::Top,
            WallDirection::Left => WallDirection::Right,
        }
    }

    /// (row, column) step taken when crossing this wall.
    pub fn offset(self) -> (isize, isize) {
        match self {
            WallDirection::Top => (-1, 0),
            WallDirection::Right => (0, 1),
            WallDirection::Bottom => (1, 0),
            WallDirection::Left => (0, -1),
        }
    }

    /// Which wall of `from` is shared with `to`.
    ///
    /// Returns None unless the two coordinates differ by exactly one step along exactly one axis.
    pub fn between(from: GridCoordinate, to: GridCoordinate) -> Option<WallDirection> {
        let row_delta = from.row - to.row;
        let col_delta = from.col - to.col;
        match (row_delta, col_delta) {
            (0, 1) => Some(WallDirection::Left),
            (0, -1) => Some(WallDirection::Right),
            (1, 0) => Some(WallDirection::Top),
            (-1, 0) => Some(WallDirection::Bottom),
            _ => None,
        }
    }
}

/// Wall state of one cell, `true` meaning the wall is standing.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Walls([bool; 4]);

impl Walls {
    pub fn all_standing() -> Walls {
        Walls([true; 4])
    }

    #[inline]
    pub fn is_open(&self, direction: WallDirection) -> bool {
        !self[direction]
    }

    #[inline]
    pub fn open(&mut self, direction: WallDirection) {
        self[direction] = false;
    }

    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|&&standing| !standing).count()
    }

    pub fn as_array(&self) -> [bool; 4] {
        self.0
    }
}

impl Index<WallDirection> for Walls {
    type Output = bool;

    #[inline]
    fn index(&self, direction: WallDirection) -> &bool {
        &self.0[direction as usize]
    }
}

impl IndexMut<WallDirection> for Walls {
    #[inline]
    fn index_mut(&mut self, direction: WallDirection) -> &mut bool {
        &mut self.0[direction as usize]
    }
}

/// Position of a cell on the lattice.
///
/// Signed so that offsets past the top or left edge are representable and can be rejected by
/// a bounds check rather than wrapping.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: isize,
    pub col: isize,
}

impl GridCoordinate {
    pub fn new(row: isize, col: isize) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    /// Coordinate one cell away, not necessarily inside any grid.
    pub fn offset(self, direction: WallDirection) -> GridCoordinate {
        let (row_step, col_step) = direction.offset();
        GridCoordinate::new(self.row + row_step, self.col + col_step)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coordinate: GridCoordinate,
    pub walls: Walls,
    /// Generation scratch state. Always false outside of a running generator.
    pub(crate) visited: bool,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell {
            coordinate: GridCoordinate::new(row as isize, col as isize),
            walls: Walls::all_standing(),
            visited: false,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.coordinate.row as usize
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.coordinate.col as usize
    }

    #[inline]
    pub fn has_wall(&self, direction: WallDirection) -> bool {
        self.walls[direction]
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }
}
