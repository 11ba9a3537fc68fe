use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Gameplay options selectable from the menu
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    pub(crate) difficulty: Difficulty,
    pub(crate) show_grid: bool,
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Difficulty => self.difficulty.into(),
            OptKey::ShowGrid => self.show_grid.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Difficulty => {
                self.difficulty = value
                    .try_into()
                    .expect("Options::set(Difficulty, value) called with non-Difficulty value");
            }
            OptKey::ShowGrid => {
                self.show_grid = value
                    .try_into()
                    .expect("Options::set(ShowGrid, value) called with non-Bool value");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Difficulty,
    ShowGrid,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Difficulty => "Difficulty",
            OptKey::ShowGrid => "Grid Lines",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    Difficulty,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Bool(false) => write!(f, "   [ ]    "),
            OptValue::Bool(true) => write!(f, "   [✓]    "),
            OptValue::Difficulty(d) => {
                write!(
                    f,
                    "{left} {d:^6} {right}",
                    left = if d.can_decrease() { '◀' } else { '◁' },
                    right = if d.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

/// How fast the game starts out
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    /// The time between ticks on the first level
    pub(crate) fn base_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(200),
            Difficulty::Normal => Duration::from_millis(150),
            Difficulty::Hard => Duration::from_millis(100),
            Difficulty::Expert => Duration::from_millis(70),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Adjustable for Difficulty {
    fn increase(&mut self) {
        if let Some(d) = self.next() {
            *self = d;
        }
    }

    fn decrease(&mut self) {
        if let Some(d) = self.prev() {
            *self = d;
        }
    }

    fn toggle(&mut self) {
        *self = self.next().unwrap_or_else(Difficulty::min);
    }

    fn can_increase(&self) -> bool {
        *self != Difficulty::max()
    }

    fn can_decrease(&self) -> bool {
        *self != Difficulty::min()
    }
}
