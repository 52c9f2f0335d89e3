mod cell;
mod direction;
mod food;
mod grid;
pub(crate) mod schedule;
mod snake;
pub(crate) use self::cell::Cell;
pub(crate) use self::direction::Direction;
use self::food::Food;
pub(crate) use self::grid::{Grid, GridError};
use self::schedule::Schedule;
use self::snake::{Advance, Collision, Snake};
use crate::consts;
use crate::render::{Palette, Renderer, Shape};
use crossterm::event::KeyCode;
use rand::Rng;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Gameplay parameters fixed for the duration of a game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    grid: Grid,
    initial_tick_interval: Duration,
    speedup_step: Duration,
    min_tick_interval: Option<Duration>,
}

impl Settings {
    /// Construct a `Settings`, checking that the starting snake and the
    /// starting food both fit inside the interior of `grid`
    pub(crate) fn new(
        grid: Grid,
        initial_tick_interval: Duration,
        speedup_step: Duration,
        min_tick_interval: Option<Duration>,
    ) -> Result<Settings, SettingsError> {
        if let Some(&cell) = consts::START_BODY
            .iter()
            .chain([&consts::START_FOOD])
            .find(|&&c| !grid.is_interior(c))
        {
            return Err(SettingsError::StartOutsideInterior {
                cell,
                width: grid.width(),
                height: grid.height(),
            });
        }
        if initial_tick_interval.is_zero() {
            return Err(SettingsError::ZeroTickInterval);
        }
        Ok(Settings {
            grid,
            initial_tick_interval,
            speedup_step,
            min_tick_interval,
        })
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    /// Return the tick interval that follows `interval` after the snake
    /// eats.  Without a configured minimum the interval keeps shrinking
    /// until it reaches zero.
    fn sped_up(&self, interval: Duration) -> Duration {
        let next = interval.saturating_sub(self.speedup_step);
        match self.min_tick_interval {
            Some(floor) => next.max(floor.min(interval)),
            None => next,
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            grid: Grid::default(),
            initial_tick_interval: consts::INITIAL_TICK_INTERVAL,
            speedup_step: consts::SPEEDUP_STEP,
            min_tick_interval: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SettingsError {
    #[error("starting cell {cell} is not inside the interior of a {width}x{height} grid")]
    StartOutsideInterior { cell: Cell, width: u16, height: u16 },
    #[error("initial tick interval must be nonzero")]
    ZeroTickInterval,
}

/// Score, speed, and whether the game is still going
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    score: u32,
    tick_interval: Duration,
    status: Status,
}

impl GameState {
    fn new(settings: &Settings) -> GameState {
        GameState {
            score: 0,
            tick_interval: settings.initial_tick_interval,
            status: Status::Running,
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    fn record_meal(&mut self, settings: &Settings) {
        self.score = self.score.saturating_add(1);
        self.tick_interval = settings.sped_up(self.tick_interval);
    }

    /// End the game.  Once ended, a game stays ended with its first ending.
    fn end(&mut self, ending: Ending) {
        if self.is_running() {
            self.status = Status::Over(ending);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Running,
    Over(Ending),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    Wall,
    SelfCollision,
    /// The snake has filled the interior and there is nowhere left to put
    /// the food.
    BoardFilled,
}

impl From<Collision> for Ending {
    fn from(value: Collision) -> Ending {
        match value {
            Collision::Wall => Ending::Wall,
            Collision::SelfCollision => Ending::SelfCollision,
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ending::Wall => write!(f, "hit the wall"),
            Ending::SelfCollision => write!(f, "ran into itself"),
            Ending::BoardFilled => write!(f, "filled the board"),
        }
    }
}

/// A single game: the snake, the food, and the state they play out in
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    settings: Settings,
    palette: Palette,
    snake: Snake,
    food: Food,
    state: GameState,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(settings: Settings, palette: Palette) -> Self {
        Game::new_with_rng(settings, palette, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(settings: Settings, palette: Palette, rng: R) -> Game<R> {
        log::info!(
            "Starting new game on {}x{} grid",
            settings.grid.width(),
            settings.grid.height()
        );
        Game {
            rng,
            settings,
            palette,
            snake: Snake::starting(),
            food: Food::new(consts::START_FOOD),
            state: GameState::new(&settings),
        }
    }

    /// Run one tick: move the snake, then draw the resulting frame on `out`.
    ///
    /// Returns when the next tick should happen, or `Schedule::Halt` if the
    /// game is over.  Once a game is over, further ticks only redraw it.
    pub(crate) fn tick<D: Renderer>(&mut self, out: &mut D) -> Schedule {
        out.clear_frame();
        out.draw_score(self.state.score);
        if self.state.is_running() {
            self.advance();
        }
        for (i, &cell) in self.snake.body().iter().enumerate() {
            out.draw_cell(cell, self.palette.segment(i), Shape::Square);
        }
        out.draw_cell(self.food.position(), self.palette.food, Shape::Circle);
        out.draw_border();
        if self.state.is_running() {
            Schedule::After(self.state.tick_interval)
        } else {
            out.draw_terminal_overlay();
            Schedule::Halt
        }
    }

    fn advance(&mut self) {
        match self.snake.advance(self.settings.grid, self.food.position()) {
            Advance::Moved => (),
            Advance::Ate => {
                self.state.record_meal(&self.settings);
                log::debug!(
                    "Ate food at {}; score is now {}, tick interval {:?}",
                    self.food.position(),
                    self.state.score,
                    self.state.tick_interval
                );
                let occupied = self.snake.occupied();
                if self
                    .food
                    .relocate(&mut self.rng, self.settings.grid, &occupied)
                    .is_err()
                {
                    self.game_over(Ending::BoardFilled);
                }
            }
            Advance::Collided(collision) => self.game_over(collision.into()),
        }
    }

    fn game_over(&mut self, ending: Ending) {
        self.state.end(ending);
        log::info!(
            "Game over: snake {ending} at length {} with score {}",
            self.snake.len(),
            self.state.score
        );
    }
}

impl<R> Game<R> {
    /// Handle a key press.  The arrow keys steer the snake; anything else is
    /// ignored.
    pub(crate) fn on_key(&mut self, code: KeyCode) {
        if let Some(direction) = Direction::from_key_code(code) {
            self.snake.set_direction(direction);
        }
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub(crate) fn food(&self) -> &Food {
        &self.food
    }
}
