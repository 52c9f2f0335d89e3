//! Driving a game from tick to tick independently of how time passes
use super::Game;
use crate::render::Renderer;
use rand::Rng;
use std::time::Duration;

/// What a tick asks for next
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Schedule {
    /// Run the next tick after the given delay
    After(Duration),

    /// The game is over; run no more ticks
    Halt,
}

/// What a host reports back after waiting between ticks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Wait {
    /// The delay has passed; run the next tick
    Elapsed,

    /// The host wants to stop the game early
    Stop,
}

/// Why [`run()`] returned
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Flow {
    /// The game reached a terminal state
    Halted,

    /// The host stopped the game while it was still running
    Stopped,
}

/// The environment a game runs in: something that can show a finished frame
/// and wait out the time between ticks.
///
/// While waiting, a host feeds any input it receives to the game (via
/// [`Game::on_key()`]); input never reaches the game during a tick.
pub(crate) trait Host<D> {
    type Error;

    /// Show a frame that has just been drawn on `frame`
    fn present(&mut self, frame: &D) -> Result<(), Self::Error>;

    /// Wait for `delay` to pass, delivering input to `game` in the meantime
    fn wait<R: Rng>(&mut self, delay: Duration, game: &mut Game<R>) -> Result<Wait, Self::Error>;
}

/// Run `game` until it halts or `host` stops it.  Exactly one tick is in
/// progress at a time, and the next one is only scheduled after the
/// current one has been drawn and presented.
pub(crate) fn run<R, D, H>(game: &mut Game<R>, frame: &mut D, host: &mut H) -> Result<Flow, H::Error>
where
    R: Rng,
    D: Renderer,
    H: Host<D>,
{
    loop {
        let schedule = game.tick(frame);
        host.present(frame)?;
        match schedule {
            Schedule::After(delay) => {
                if host.wait(delay, game)? == Wait::Stop {
                    return Ok(Flow::Stopped);
                }
            }
            Schedule::Halt => return Ok(Flow::Halted),
        }
    }
}
