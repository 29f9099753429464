//! **maze_game** generates perfect mazes with a randomized depth first backtracker and lets a
//! player walk them from the first cell to the last.

pub mod cells;
pub mod config;
pub mod game;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod input;
pub mod navigation;
pub mod pathing;
pub mod renderers;
pub mod units;
