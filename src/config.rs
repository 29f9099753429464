use std::time::Duration;

use crate::grid_dimensions::GridDimensions;
use crate::units::{CellSize, Height, Width};

pub const DEFAULT_WINDOW_WIDTH: usize = 800;
pub const DEFAULT_WINDOW_HEIGHT: usize = 600;
pub const DEFAULT_CELL_SIZE: usize = 40;
pub const DEFAULT_FPS: u64 = 30;
pub const DEFAULT_WIN_PAUSE_MS: u64 = 2000;
pub const DEFAULT_INITIAL_SCORE: u32 = 1000;
pub const DEFAULT_SCORE_DECAY_PER_SECOND: u32 = 10;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ScoreConfig {
    pub initial_score: u32,
    pub decay_per_second: u32,
}

impl Default for ScoreConfig {
    fn default() -> ScoreConfig {
        ScoreConfig {
            initial_score: DEFAULT_INITIAL_SCORE,
            decay_per_second: DEFAULT_SCORE_DECAY_PER_SECOND,
        }
    }
}

/// Everything a game session is parameterised by, passed in explicitly.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GameConfig {
    pub window_width: Width,
    pub window_height: Height,
    pub cell_size: CellSize,
    pub fps: u64,
    pub win_pause: Duration,
    pub score: ScoreConfig,
    /// Fixed seed for reproducible mazes, a fresh one per maze otherwise.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            window_width: Width(DEFAULT_WINDOW_WIDTH),
            window_height: Height(DEFAULT_WINDOW_HEIGHT),
            cell_size: CellSize(DEFAULT_CELL_SIZE),
            fps: DEFAULT_FPS,
            win_pause: Duration::from_millis(DEFAULT_WIN_PAUSE_MS),
            score: ScoreConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// `ROWS = height / cell_size`, `COLS = width / cell_size`.
    /// None when the window cannot hold a single cell.
    pub fn grid_dimensions(&self) -> Option<GridDimensions> {
        GridDimensions::from_window(self.window_width, self.window_height, self.cell_size)
    }

    /// Target duration of one frame, at least one frame per second.
    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    #[test]
    fn default_grid_is_15_by_20() {
        let dims = GameConfig::default().grid_dimensions().unwrap();
        assert_eq!(dims.rows(), RowsCount(15));
        assert_eq!(dims.columns(), ColumnsCount(20));
    }

    #[test]
    fn tiny_window_has_no_grid() {
        let config = GameConfig { window_width: Width(39), ..GameConfig::default() };
        assert!(config.grid_dimensions().is_none());
    }

    #[test]
    fn frame_time_from_fps() {
        assert_eq!(GameConfig::default().frame_time(), Duration::from_micros(33_333));
        let zero_fps = GameConfig { fps: 0, ..GameConfig::default() };
        assert_eq!(zero_fps.frame_time(), Duration::from_secs(1));
    }
}
