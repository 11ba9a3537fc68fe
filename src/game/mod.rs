mod direction;
mod grid;
mod menu;
mod render;
mod scoring;
mod snake;
mod state;
mod timer;
use self::direction::Direction;
use self::menu::{Menu, MenuChoice};
use self::scoring::tick_interval;
use self::state::{GameState, Outcome};
use self::timer::Ticker;
use crate::app::Screen;
use crate::command::Command;
use crate::high_score::HighScoreStore;
use crate::options::Options;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::Frame;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The game proper: owns the state of the current (or most recent) game and
/// the timer that drives it, and moves between idle, running, and paused in
/// response to player input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    state: GameState,
    phase: Phase,
    options: Options,
    high_score: u32,
    store: HighScoreStore,
    menu: Menu,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(options: Options, store: HighScoreStore) -> Self {
        Game::new_with_rng(options, store, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(options: Options, store: HighScoreStore, mut rng: R) -> Game<R> {
        let high_score = match store.load() {
            Ok(score) => {
                debug!(score, path = ?store.path(), "loaded high score");
                score
            }
            Err(e) => {
                let e: &(dyn Error + 'static) = &e;
                warn!(error = e, "could not load high score; starting from 0");
                0
            }
        };
        let state = GameState::new(options.difficulty.base_interval(), &mut rng);
        Game {
            rng,
            state,
            phase: Phase::Idle { last_game: None },
            options,
            high_score,
            store,
            menu: Menu::new(),
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if let Phase::Running(ticker) = self.phase {
            let wait = ticker.remaining(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.on_timer(Instant::now());
                return Ok(None);
            }
        }
        Ok(self.handle_event(read()?, Instant::now()))
    }

    /// Start a new game, discarding whatever state is left over from the last
    /// one.  Does nothing if a game is already in progress.
    fn start(&mut self, now: Instant) {
        if self.running() {
            return;
        }
        let interval = self.options.difficulty.base_interval();
        self.state = GameState::new(interval, &mut self.rng);
        self.phase = Phase::Running(Ticker::start(interval, now));
        info!(difficulty = %self.options.difficulty, ?interval, "starting new game");
    }

    fn restart(&mut self, now: Instant) {
        self.start(now);
    }

    /// Called whenever the timer might be due
    fn on_timer(&mut self, now: Instant) {
        let Phase::Running(ref mut ticker) = self.phase else {
            return;
        };
        if ticker.fire(now) {
            self.tick(now);
        }
    }

    fn tick(&mut self, now: Instant) {
        let tick = self.state.step(&mut self.rng);
        if tick.ate {
            self.record_score();
        }
        if let Some(level) = tick.level_up {
            self.level_up(level, now);
        }
        if tick.outcome.is_terminal() {
            self.game_over(tick.outcome);
        }
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> Option<Screen> {
        if event == Event::FocusLost {
            if matches!(self.phase, Phase::Running(_)) {
                self.toggle_pause(now);
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        self.handle_command(cmd, now)
    }

    fn handle_command(&mut self, cmd: Command, now: Instant) -> Option<Screen> {
        match cmd {
            Command::Quit => return Some(Screen::Quit),
            Command::Pause => self.toggle_pause(now),
            Command::Start => self.start(now),
            Command::Restart => self.restart(now),
            Command::Up if self.running() => self.steer(Direction::Up),
            Command::Down if self.running() => self.steer(Direction::Down),
            Command::Left if self.running() => self.steer(Direction::Left),
            Command::Right if self.running() => self.steer(Direction::Right),
            _ if self.running() => (),
            _ => match self.menu.handle_command(cmd, &mut self.options)? {
                MenuChoice::Start => self.start(now),
                MenuChoice::Quit => return Some(Screen::Quit),
            },
        }
        None
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// When the timer is next due to fire, if it's active
    #[cfg(test)]
    fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Running(ticker) => Some(ticker.deadline()),
            _ => None,
        }
    }

    /// Is a game in progress, paused or not?
    fn running(&self) -> bool {
        matches!(self.phase, Phase::Running(_) | Phase::Paused)
    }

    fn toggle_pause(&mut self, now: Instant) {
        match self.phase {
            Phase::Running(_) => {
                self.phase = Phase::Paused;
                debug!("game paused");
            }
            Phase::Paused => {
                self.phase = Phase::Running(Ticker::start(self.state.interval, now));
                debug!("game resumed");
            }
            Phase::Idle { .. } => (),
        }
    }

    /// Queue up a change of direction for the next tick.  Reversing onto the
    /// snake's own neck is not allowed, and nothing changes while paused.
    fn steer(&mut self, direction: Direction) {
        if !matches!(self.phase, Phase::Running(_)) {
            return;
        }
        if !direction.is_opposite(self.state.direction) {
            self.state.next_direction = direction;
        }
    }

    fn record_score(&mut self) {
        let score = self.state.score();
        if score > self.high_score {
            self.high_score = score;
            debug!(score, "new high score");
            if let Err(e) = self.store.save(score) {
                let e: &(dyn Error + 'static) = &e;
                warn!(error = e, "could not save high score");
            }
        }
    }

    fn level_up(&mut self, level: u32, now: Instant) {
        let interval = tick_interval(self.options.difficulty.base_interval(), level);
        self.state.interval = interval;
        info!(level, ?interval, "level up");
        if matches!(self.phase, Phase::Running(_)) {
            // Replacing the ticker cancels the old one.
            self.phase = Phase::Running(Ticker::start(interval, now));
        }
    }

    fn game_over(&mut self, cause: Outcome) {
        let final_score = self.state.score();
        info!(?cause, final_score, level = self.state.level(), "game over");
        self.phase = Phase::Idle {
            last_game: Some(GameOver { final_score, cause }),
        };
        self.menu = Menu::new();
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    /// No game is in progress.  If a game has been played, `last_game`
    /// describes how it ended.
    Idle { last_game: Option<GameOver> },

    /// A game is in progress, advancing each time the ticker fires
    Running(Ticker),

    /// A game is in progress but the ticker has been cancelled
    Paused,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameOver {
    final_score: u32,
    cause: Outcome,
}
