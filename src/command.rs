use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Pause,
    Start,
    Restart,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'k') | KeyCode::Up => Some(Command::Up),
            KeyCode::Char('s' | 'j') | KeyCode::Down => Some(Command::Down),
            KeyCode::Char('a' | 'h') | KeyCode::Left => Some(Command::Left),
            KeyCode::Char('d' | 'l') | KeyCode::Right => Some(Command::Right),
            KeyCode::Enter => Some(Command::Enter),
            KeyCode::Char(' ' | 'p') => Some(Command::Pause),
            KeyCode::Char('n') => Some(Command::Start),
            KeyCode::Char('r') => Some(Command::Restart),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}
