use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use log::warn;

use crate::game::{GameState, RoundStatus};
use crate::grid_dimensions::GridDimensions;
use crate::grid_displays::{LayeredDisplay, MarkersDisplay, PathDisplay};
use crate::units::{ColumnsCount, RowsCount};

pub const CONTROLS_HELP: &str = "arrows/hjkl/wasd move  p path  n new maze  q quit";

/// Raw mode on an alternate screen with the cursor hidden, restored on drop.
#[derive(Debug)]
pub struct TerminalSession<W: Write> {
    out: W,
}

impl<W: Write> TerminalSession<W> {
    pub fn start(mut out: W) -> io::Result<TerminalSession<W>> {
        terminal::enable_raw_mode()?;
        out.execute(EnterAlternateScreen)?;
        out.execute(Hide)?;
        out.execute(Clear(ClearType::All))?;
        Ok(TerminalSession { out })
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let restored = self.out
            .execute(Show)
            .and_then(|out| out.execute(LeaveAlternateScreen))
            .map(|_| ())
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(e) = restored {
            warn!("failed to restore the terminal: {}", e);
        }
    }
}

/// Terminal (columns, rows) needed to draw a maze of `dimensions`: the maze itself, the status
/// and help lines, and the row the win banner goes on.
pub fn frame_size(dimensions: GridDimensions) -> (usize, usize) {
    let ColumnsCount(cols) = dimensions.columns();
    let RowsCount(rows) = dimensions.rows();
    let maze_width = cols.saturating_mul(4).saturating_add(1);
    let width = maze_width.max(CONTROLS_HELP.chars().count());
    let height = rows.saturating_mul(2).saturating_add(4);
    (width, height)
}

/// Shrink `dimensions` until the whole frame fits a terminal of `columns` x `rows`.
/// None when not even a single cell maze fits.
pub fn fit_to_terminal(dimensions: GridDimensions,
                       columns: usize,
                       rows: usize)
                       -> Option<GridDimensions> {
    let max_cols = columns.saturating_sub(1) / 4;
    let max_rows = rows.saturating_sub(4) / 2;
    let fitted = GridDimensions::new(RowsCount(dimensions.rows().0.min(max_rows)),
                                     ColumnsCount(dimensions.columns().0.min(max_cols)))?;
    let (width, height) = frame_size(fitted);
    if width <= columns && height <= rows {
        Some(fitted)
    } else {
        None
    }
}

/// Text of one frame: the maze with start, end and player marked, then a status line.
pub fn frame_lines(state: &GameState, solution: Option<&[usize]>) -> Vec<String> {
    let display = LayeredDisplay::new(MarkersDisplay::new(state.start(),
                                                          state.end(),
                                                          Some(state.current())),
                                      solution.map(PathDisplay::new));
    let mut lines = state.grid()
        .render_text(&display)
        .lines()
        .map(String::from)
        .collect::<Vec<_>>();
    lines.push(status_line(state));
    lines
}

pub fn status_line(state: &GameState) -> String {
    format!("time {:>4}s  score {:>5}  moves {:>4}",
            state.elapsed().as_secs(),
            state.score(),
            state.moves())
}

pub fn win_message(status: RoundStatus) -> Option<String> {
    match status {
        RoundStatus::Won { elapsed, score, moves } => {
            Some(format!("Congratulations! You escaped the maze in {}s and {} moves, score {}",
                         elapsed.as_secs(),
                         moves,
                         score))
        }
        RoundStatus::Playing => None,
    }
}

/// Redraw the whole frame in place.
pub fn draw_frame<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    let status_row = lines.len().saturating_sub(1);
    for (row, line) in lines.iter().enumerate() {
        out.queue(MoveTo(0, row as u16))?;
        if row == status_row {
            out.queue(SetForegroundColor(Color::Cyan))?;
        }
        out.queue(Print(line))?;
        out.queue(Clear(ClearType::UntilNewLine))?;
    }
    out.queue(ResetColor)?;
    out.queue(MoveTo(0, lines.len() as u16))?;
    out.queue(Print(CONTROLS_HELP))?;
    out.queue(Clear(ClearType::UntilNewLine))?;
    out.flush()
}

/// Banner drawn under the maze when a round is won.
pub fn draw_banner<W: Write>(out: &mut W, row: usize, message: &str) -> io::Result<()> {
    out.queue(MoveTo(0, row as u16))?;
    out.queue(SetForegroundColor(Color::Green))?;
    out.queue(Print(message))?;
    out.queue(ResetColor)?;
    out.queue(Clear(ClearType::UntilNewLine))?;
    out.flush()
}

#[cfg(test)]
mod tests {

    use std::time::Duration;

    use rand::SeedableRng;

    use super::*;
    use crate::config::ScoreConfig;
    use crate::generators::{self, FirstNeighbourChooser};
    use crate::grid::Grid;
    use crate::navigation::Direction;
    use crate::pathing;

    fn scenario_state() -> GameState {
        let dims = GridDimensions::new(RowsCount(2), ColumnsCount(2)).unwrap();
        let grid = generators::recursive_backtracker(Grid::new(dims), FirstNeighbourChooser);
        GameState::new(grid, ScoreConfig::default())
    }

    #[test]
    fn frame_marks_player_and_end() {
        let state = scenario_state();
        let lines = frame_lines(&state, None);
        assert_eq!(lines,
                   vec!["┌───────┐".to_string(),
                        "│ @     │".to_string(),
                        "├───╴   │".to_string(),
                        "│     E │".to_string(),
                        "└───────┘".to_string(),
                        "time    0s  score  1000  moves    0".to_string()]);
    }

    #[test]
    fn frame_with_solution_path() {
        let mut state = scenario_state();
        state.apply_move(Direction::Right);
        let path = pathing::solution_path(state.grid()).unwrap();
        let lines = frame_lines(&state, Some(&path));
        assert_eq!(lines[1], "│ S   @ │");
        assert_eq!(lines[3], "│     E │");
        assert_eq!(lines[5], "time    0s  score  1000  moves    1");
    }

    #[test]
    fn win_message_only_when_won() {
        let mut state = scenario_state();
        assert_eq!(win_message(state.status()), None);
        state.advance_time(Duration::from_secs(3));
        state.apply_move(Direction::Right);
        state.apply_move(Direction::Down);
        assert_eq!(win_message(state.status()).unwrap(),
                   "Congratulations! You escaped the maze in 3s and 2 moves, score 970");
    }

    #[test]
    fn frame_size_matches_drawn_frame() {
        let config = crate::config::GameConfig::default();
        let dims = config.grid_dimensions().unwrap();
        assert_eq!(frame_size(dims), (81, 34));

        let mut rng = rand_xorshift::XorShiftRng::seed_from_u64(3);
        let state = GameState::new(generators::generate_maze(dims, &mut rng),
                                   ScoreConfig::default());
        let lines = frame_lines(&state, None);
        let widest = lines.iter().map(|line| line.chars().count()).max().unwrap();
        assert_eq!(widest, 81);
        // status and help lines plus the banner row below the maze
        assert_eq!(lines.len() + 2, 34);
    }

    #[test]
    fn default_maze_shrinks_to_a_standard_terminal() {
        let dims = crate::config::GameConfig::default().grid_dimensions().unwrap();
        let fitted = fit_to_terminal(dims, 80, 24).unwrap();
        assert_eq!((fitted.rows(), fitted.columns()), (RowsCount(10), ColumnsCount(19)));
        let (width, height) = frame_size(fitted);
        assert!(width <= 80 && height <= 24);

        // already fits, left alone
        assert_eq!(fit_to_terminal(dims, 200, 60), Some(dims));

        // too narrow for the help line or too short for one cell
        assert_eq!(fit_to_terminal(dims, 20, 24), None);
        assert_eq!(fit_to_terminal(dims, 80, 5), None);
    }

    #[test]
    fn draw_frame_writes_every_line() {
        let state = scenario_state();
        let lines = frame_lines(&state, None);
        let mut buffer: Vec<u8> = vec![];
        draw_frame(&mut buffer, &lines).expect("writing to a vec cannot fail");
        let written = String::from_utf8(buffer).unwrap();
        for line in &lines {
            assert!(written.contains(line.as_str()));
        }
        assert!(written.contains(CONTROLS_HELP));
    }
}
