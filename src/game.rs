use std::time::Duration;

use log::info;

use crate::config::ScoreConfig;
use crate::grid::Grid;
use crate::navigation::{self, Direction};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum RoundStatus {
    Playing,
    Won { elapsed: Duration, score: u32, moves: u32 },
}

/// One round of play on a finished maze.
///
/// Only the current position, the clock and the move counter change, the walls never do.
#[derive(Debug)]
pub struct GameState {
    grid: Grid,
    start: usize,
    end: usize,
    current: usize,
    elapsed: Duration,
    moves: u32,
    score_config: ScoreConfig,
    won: bool,
}

impl GameState {
    pub fn new(grid: Grid, score_config: ScoreConfig) -> GameState {
        let start = grid.start_index();
        let end = grid.end_index();
        info!("new round on a {}x{} maze", grid.rows().0, grid.columns().0);
        let mut state = GameState {
            grid,
            start,
            end,
            current: start,
            elapsed: Duration::from_secs(0),
            moves: 0,
            score_config,
            won: false,
        };
        state.check_goal();
        state
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Apply a move request. Blocked moves leave everything as it was.
    /// Returns whether the position changed.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        if self.won {
            return false;
        }
        let next = navigation::move_player(direction, self.current, &self.grid);
        if next == self.current {
            return false;
        }
        self.current = next;
        self.moves += 1;
        self.check_goal();
        true
    }

    /// Let time pass, the clock stops once the round is won.
    pub fn advance_time(&mut self, dt: Duration) {
        if !self.won {
            self.elapsed += dt;
        }
    }

    /// Initial score less the decay for each whole elapsed second, never below zero.
    pub fn score(&self) -> u32 {
        let seconds = self.elapsed.as_secs().min(u64::from(u32::MAX)) as u32;
        self.score_config
            .initial_score
            .saturating_sub(self.score_config.decay_per_second.saturating_mul(seconds))
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn status(&self) -> RoundStatus {
        if self.won {
            RoundStatus::Won {
                elapsed: self.elapsed,
                score: self.score(),
                moves: self.moves,
            }
        } else {
            RoundStatus::Playing
        }
    }

    fn check_goal(&mut self) {
        if !self.won && navigation::is_goal(self.current, self.end) {
            self.won = true;
            info!("maze solved in {:.1}s with {} moves, score {}",
                  self.elapsed.as_secs_f32(), self.moves, self.score());
        }
    }
}
