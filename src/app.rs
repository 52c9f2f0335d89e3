use crate::command::Command;
use crate::consts;
use crate::game::schedule::{run, Flow, Host, Wait};
use crate::game::{Game, Settings, Status};
use crate::render::{Palette, Screen};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    backend::Backend,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// The terminal application: plays games one after another until the user
/// quits
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    settings: Settings,
    palette: Palette,
}

impl App {
    pub(crate) fn new(settings: Settings, palette: Palette) -> App {
        App { settings, palette }
    }

    pub(crate) fn run<B: Backend>(self, terminal: Terminal<B>) -> io::Result<()> {
        let mut host = TerminalHost { terminal };
        loop {
            let mut game = Game::new(self.settings, self.palette);
            let mut screen = Screen::new(self.settings.grid(), self.palette);
            match run(&mut game, &mut screen, &mut host)? {
                Flow::Stopped => {
                    log::info!("Quit during game with score {}", game.state().score());
                    return Ok(());
                }
                Flow::Halted => {
                    let state = game.state();
                    if let Status::Over(ending) = state.status() {
                        log::info!(
                            "Game ended ({ending}) with score {} at {:?} per tick",
                            state.score(),
                            state.tick_interval()
                        );
                    }
                    host.show_game_over(&screen)?;
                    match host.await_choice()? {
                        Command::Restart => log::info!("Restarting"),
                        Command::Quit => return Ok(()),
                    }
                }
            }
        }
    }
}

/// Runs games on a real terminal in real time
#[derive(Debug)]
struct TerminalHost<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalHost<B> {
    /// Redraw the final frame of a game along with the keys for what to do
    /// next
    fn show_game_over(&mut self, screen: &Screen) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            screen.render(area, frame.buffer_mut());
            let hint = Line::from_iter([
                Span::raw(" Restart ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]);
            if let Some(y) = area.bottom().checked_sub(1) {
                hint.render(Rect { y, height: 1, ..area }, frame.buffer_mut());
            }
        })?;
        Ok(())
    }

    /// Block until the user picks a [`Command`]
    fn await_choice(&mut self) -> io::Result<Command> {
        loop {
            if let Some(cmd) = read()?
                .as_key_press_event()
                .and_then(Command::from_key_event)
            {
                return Ok(cmd);
            }
        }
    }
}

impl<B: Backend> Host<Screen> for TerminalHost<B> {
    type Error = io::Error;

    fn present(&mut self, screen: &Screen) -> io::Result<()> {
        self.terminal.draw(|frame| frame.render_widget(screen, frame.area()))?;
        Ok(())
    }

    fn wait<R: Rng>(&mut self, delay: Duration, game: &mut Game<R>) -> io::Result<Wait> {
        wait_for_keys(delay, game, |timeout| {
            if poll(timeout)? {
                read().map(Some)
            } else {
                Ok(None)
            }
        })
    }
}

/// Feed key presses to `game` until `delay` has passed or the user quits.
///
/// `next_event` is handed the time remaining and returns the next event to
/// arrive within it, or `None` if there was none.  It is always consulted at
/// least once, so input that is already pending is still delivered when
/// `delay` is zero.
fn wait_for_keys<R, F>(delay: Duration, game: &mut Game<R>, mut next_event: F) -> io::Result<Wait>
where
    R: Rng,
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    let deadline = Instant::now() + delay;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let Some(event) = next_event(remaining)? else {
            return Ok(Wait::Elapsed);
        };
        if let Some(ev) = event.as_key_press_event() {
            match Command::from_key_event(ev) {
                Some(Command::Quit) => return Ok(Wait::Stop),
                Some(Command::Restart) => (),
                None => game.on_key(ev.code),
            }
        }
    }
}
