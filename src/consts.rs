//! Assorted constants & hard-coded configuration
use crate::game::{Cell, Direction};
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Default width of the virtual canvas, in pixels
pub(crate) const CANVAS_WIDTH: u16 = 600;

/// Default height of the virtual canvas, in pixels
pub(crate) const CANVAS_HEIGHT: u16 = 600;

/// Default edge length of one grid cell, in canvas pixels
pub(crate) const CELL_SIZE: u16 = 20;

/// Time between ticks at the start of a game
pub(crate) const INITIAL_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// How much the tick interval shrinks each time the snake eats
pub(crate) const SPEEDUP_STEP: Duration = Duration::from_millis(2);

/// The snake's body at the start of a game, head first
pub(crate) const START_BODY: [Cell; 3] = [Cell::new(7, 5), Cell::new(6, 5), Cell::new(5, 5)];

/// The direction the snake faces at the start of a game
pub(crate) const START_DIRECTION: Direction = Direction::Right;

/// Where the food sits at the start of a game
pub(crate) const START_FOOD: Cell = Cell::new(10, 10);

/// Number of random draws made when relocating food before falling back to
/// picking among the free cells directly
pub(crate) const MAX_RANDOM_DRAWS: usize = 64;

/// Colour of the snake's head
pub(crate) const HEAD_COLOR: Color = Color::Blue;

/// Colour of the second, fourth, ... segments of the snake
pub(crate) const BODY_ODD_COLOR: Color = Color::LightCyan;

/// Colour of the third, fifth, ... segments of the snake
pub(crate) const BODY_EVEN_COLOR: Color = Color::LightBlue;

/// Colour of the food
pub(crate) const FOOD_COLOR: Color = Color::LightGreen;

/// Colour of the wall ring around the grid
pub(crate) const BORDER_COLOR: Color = Color::Gray;

/// Colour of the score and the game-over label
pub(crate) const TEXT_COLOR: Color = Color::White;

/// Glyphs for a square cell
pub(crate) const SQUARE_SYMBOLS: [char; 2] = ['█', '█'];

/// Glyphs for a circular cell
pub(crate) const CIRCLE_SYMBOLS: [char; 2] = ['◖', '◗'];

/// Label drawn over the grid once the game has ended
pub(crate) const GAME_OVER_TEXT: &str = " GAME OVER ";

/// Modifiers for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_MODIFIER: Modifier = Modifier::REVERSED;

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);
