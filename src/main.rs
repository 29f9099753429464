use std::{
    fs::File,
    io,
    io::prelude::*,
    thread,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};
use crossterm::terminal;
use docopt::Docopt;
use error_chain::bail;
use log::{info, warn};
use maze_game::{
    config::GameConfig,
    game::GameState,
    generators,
    grid::Grid,
    grid_dimensions::GridDimensions,
    grid_displays::{LayeredDisplay, MarkersDisplay, PathDisplay},
    input::{self, InputCommand},
    pathing,
    renderers::{self, TerminalSession},
    units::{CellSize, ColumnsCount, Height, RowsCount, Width},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;

const USAGE: &str = "Maze Game

Usage:
    maze_game_driver -h | --help
    maze_game_driver [play] [options]
    maze_game_driver print [--show-path] [--text-out=<path>] [options]

Options:
    -h --help              Show this screen.
    --width=<px>           Window width, the grid has width / cell-size columns [default: 800].
    --height=<px>          Window height, the grid has height / cell-size rows [default: 600].
    --cell-size=<px>       Side length of one square cell [default: 40].
    --fps=<n>              Frames drawn per second [default: 30].
    --win-pause-ms=<ms>    How long the win message stays up before the next maze [default: 2000].
    --seed=<n>             Seed the maze generator for a reproducible sequence of mazes.
    --show-path            Mark the route from the start to the end cell.
    --text-out=<path>      Output file path for a textual rendering of a maze.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.

Keys while playing: arrows, hjkl or wasd move, p toggles the route, n starts a new maze, q or Esc quits.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_play: bool,
    cmd_print: bool,
    flag_width: usize,
    flag_height: usize,
    flag_cell_size: usize,
    flag_fps: u64,
    flag_win_pause_ms: u64,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            Logger(::log::SetLoggerError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init()?;

    let config = game_config(&args);
    let dimensions = config.grid_dimensions()
        .ok_or("The window is too small to hold a single maze cell.")?;
    info!("maze of {} rows by {} columns", dimensions.rows().0, dimensions.columns().0);

    let mut rng = XorShiftRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));

    // `play` is also the mode when no command is given
    if args.cmd_print && !args.cmd_play {
        let grid = generators::generate_maze(dimensions, &mut rng);
        save_edges_if_requested(&grid, &args.flag_save_edges)?;
        print_maze(&grid, &args)
    } else {
        play(&config, dimensions, &mut rng, &args.flag_save_edges)
    }
}

fn game_config(args: &MazeArgs) -> GameConfig {
    let mut config = GameConfig {
        window_width: Width(args.flag_width),
        window_height: Height(args.flag_height),
        cell_size: CellSize(args.flag_cell_size),
        fps: args.flag_fps,
        win_pause: Duration::from_millis(args.flag_win_pause_ms),
        seed: args.flag_seed,
        ..GameConfig::default()
    };
    if config.fps == 0 {
        config.fps = 1;
    }
    config
}

fn play(config: &GameConfig,
        dimensions: GridDimensions,
        rng: &mut XorShiftRng,
        save_edges_path: &str)
        -> Result<()> {

    let (term_cols, term_rows) = terminal::size().chain_err(|| "Failed to read the terminal size")?;
    let dimensions = match renderers::fit_to_terminal(dimensions,
                                                      usize::from(term_cols),
                                                      usize::from(term_rows)) {
        Some(fitted) => fitted,
        None => {
            let (needed_cols, needed_rows) = renderers::frame_size(
                GridDimensions::new(RowsCount(1), ColumnsCount(1)).ok_or("empty maze")?);
            bail!("The terminal is {}x{}, at least {}x{} is needed to play.",
                  term_cols, term_rows, needed_cols, needed_rows);
        }
    };
    info!("playing on a {} rows by {} columns maze in a {}x{} terminal",
          dimensions.rows().0, dimensions.columns().0, term_cols, term_rows);
    if dimensions.size().0 == 1 {
        warn!("a single cell maze starts on its goal, every round is won immediately");
    }

    let mut session = TerminalSession::start(io::stdout())
        .chain_err(|| "Failed to set up the terminal")?;
    let frame_time = config.frame_time();

    'rounds: loop {
        let grid = generators::generate_maze(dimensions, rng);
        save_edges_if_requested(&grid, save_edges_path)?;
        let solution = pathing::solution_path(&grid);
        let mut state = GameState::new(grid, config.score);
        let mut show_solution = false;
        let mut last_frame = Instant::now();

        loop {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    match input::command_for_key(key) {
                        Some(InputCommand::Move(direction)) => {
                            let _ = state.apply_move(direction);
                        }
                        Some(InputCommand::ToggleSolution) => show_solution = !show_solution,
                        Some(InputCommand::NewMaze) => continue 'rounds,
                        Some(InputCommand::Quit) => return Ok(()),
                        None => {}
                    }
                }
            }

            let now = Instant::now();
            state.advance_time(now - last_frame);
            last_frame = now;

            let path = if show_solution { solution.as_deref() } else { None };
            let lines = renderers::frame_lines(&state, path);
            renderers::draw_frame(session.out(), &lines)?;

            if let Some(message) = renderers::win_message(state.status()) {
                renderers::draw_banner(session.out(), lines.len() + 1, &message)?;
                thread::sleep(config.win_pause);
                continue 'rounds;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
    }
}

fn print_maze(grid: &Grid, args: &MazeArgs) -> Result<()> {
    let path = if args.flag_show_path {
        pathing::solution_path(grid)
    } else {
        None
    };
    let display = LayeredDisplay::new(MarkersDisplay::new(grid.start_index(), grid.end_index(), None),
                                      path.as_deref().map(PathDisplay::new));
    let text = grid.render_text(&display);

    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_edges_if_requested(grid: &Grid, file_path: &str) -> Result<()> {
    if file_path.is_empty() {
        return Ok(());
    }

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", grid.size(), grid.passages_count()));
    for (src, dst) in grid.iter_passages() {
        graph_data.push_str(&format!("{} {}\n", src + 1, dst + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    Ok(())
}
