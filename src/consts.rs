//! Assorted constants & hard-coded configuration
use crate::game::{Cell, Direction};
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Width of the playfield, in playfield units
pub(crate) const WIDTH: i32 = 1000;

/// Height of the playfield, in playfield units
pub(crate) const HEIGHT: i32 = 600;

/// Side length of a single grid cell, in playfield units
pub(crate) const CELL_SIZE: i32 = 10;

/// The snake's cells at the start of a run, head first
pub(crate) const INITIAL_BODY: [Cell; 3] = [Cell::new(100, 50), Cell::new(90, 50), Cell::new(80, 50)];

/// The direction the snake faces at the start of a run
pub(crate) const INITIAL_DIRECTION: Direction = Direction::Right;

/// Points awarded for each piece of food eaten
pub(crate) const SCORE_INCREMENT: u32 = 10;

/// Ticks per second at the start of a run
pub(crate) const BASE_SPEED: u32 = 15;

/// Ticks per second can never exceed this
pub(crate) const MAX_SPEED: u32 = 30;

/// Ticks per second while the snake isn't moving (paused, not started, or
/// game over), so that input is still handled promptly
pub(crate) const IDLE_SPEED: u32 = 5;

/// How many random cells to try when placing food before giving up on
/// avoiding the snake
pub(crate) const MAX_SPAWN_ATTEMPTS: usize = 1000;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Color for the snake
pub(crate) const SNAKE_COLOR: Color = Color::Green;

/// Color for the food
pub(crate) const FOOD_COLOR: Color = Color::LightRed;

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the "game over" banner
pub(crate) const GAME_OVER_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

/// Name of the directory under the platform config/data directories
pub(crate) const APP_DIR: &str = "arcsnake";

/// Environment variable holding the log filter directives
pub(crate) const LOG_ENV_VAR: &str = "ARCSNAKE_LOG";
