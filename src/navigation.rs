use crate::cells::WallDirection;
use crate::grid::Grid;

/// A player's directional move request.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// The wall slot that has to be open for the move to go through.
    pub fn wall(self) -> WallDirection {
        match self {
            Direction::Up => WallDirection::Top,
            Direction::Right => WallDirection::Right,
            Direction::Down => WallDirection::Bottom,
            Direction::Left => WallDirection::Left,
        }
    }
}

/// Resolve a move from `current`.
///
/// Returns the neighbouring cell when the wall in `direction` is open, otherwise `current`
/// unchanged. A blocked move is not an error.
pub fn move_player(direction: Direction, current: usize, grid: &Grid) -> usize {
    let coord = match grid.cell(current) {
        Some(cell) if !cell.has_wall(direction.wall()) => cell.coordinate(),
        _ => return current,
    };
    let next = coord.offset(direction.wall());
    grid.index(next.row, next.col).unwrap_or(current)
}

#[inline]
pub fn is_goal(current: usize, end: usize) -> bool {
    current == end
}
