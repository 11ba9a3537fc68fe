use crate::game::Game;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(game: Game) -> App {
        App {
            screen: Screen::Game(game),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        if let Screen::Game(ref game) = self.screen {
            terminal.draw(|frame| game.draw(frame))?;
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if let Screen::Game(ref mut game) = self.screen {
            if let Some(screen) = game.process_input()? {
                self.screen = screen;
            }
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Game(Game),
    Quit,
}
