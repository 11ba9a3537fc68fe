use crate::command::Command;
use crate::consts;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// The pop-up shown over the board while no game is in progress
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Menu {
    selection: MenuItem,
}

impl Menu {
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 1;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;
    #[allow(clippy::cast_possible_truncation)]
    const ITEM_QTY: u16 = MenuItem::LENGTH as u16;

    pub(super) fn new() -> Menu {
        Menu {
            selection: MenuItem::min(),
        }
    }

    /// The size of the pop-up, which grows to make room for the final score
    /// after a game has ended
    pub(super) fn size(final_score: Option<u32>) -> Size {
        let extra = if final_score.is_some() { 2 } else { 0 };
        Size {
            width: Self::WIDTH,
            height: Self::ITEM_QTY + extra + 2, /* for border */
        }
    }

    /// Handle a command.  Returns `Some` if the player activated the "start"
    /// or "quit" item.
    pub(super) fn handle_command(
        &mut self,
        cmd: Command,
        options: &mut Options,
    ) -> Option<MenuChoice> {
        match (cmd, self.selection) {
            (Command::Up, _) => {
                self.selection = self.selection.prev().unwrap_or_else(MenuItem::max);
            }
            (Command::Down, _) => {
                self.selection = self.selection.next().unwrap_or_else(MenuItem::min);
            }
            (Command::Enter, MenuItem::Start) => return Some(MenuChoice::Start),
            (Command::Enter, MenuItem::Quit) => return Some(MenuChoice::Quit),
            (Command::Left | Command::Right | Command::Enter, item) => {
                if let Some(key) = item.setting() {
                    let mut value = options.get(key);
                    match cmd {
                        Command::Left => value.decrease(),
                        Command::Right => value.increase(),
                        _ => value.toggle(),
                    }
                    options.set(key, value);
                }
            }
            _ => (),
        }
        None
    }

    #[cfg(test)]
    pub(super) fn selection(&self) -> MenuItem {
        self.selection
    }
}

impl Default for Menu {
    fn default() -> Menu {
        Menu::new()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum MenuChoice {
    Start,
    Quit,
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum MenuItem {
    Start,
    Difficulty,
    ShowGrid,
    Quit,
}

impl MenuItem {
    fn setting(self) -> Option<OptKey> {
        match self {
            MenuItem::Difficulty => Some(OptKey::Difficulty),
            MenuItem::ShowGrid => Some(OptKey::ShowGrid),
            MenuItem::Start | MenuItem::Quit => None,
        }
    }
}

/// A rendering of a [`Menu`] together with the options it edits
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct MenuView<'a> {
    pub(super) menu: &'a Menu,
    pub(super) options: &'a Options,
    pub(super) final_score: Option<u32>,
}

impl MenuView<'_> {
    fn item_line(&self, item: MenuItem) -> Line<'static> {
        let selected = item == self.menu.selection;
        let mut line = Line::default();
        line.push_span(if selected { "» " } else { "  " });
        match item {
            MenuItem::Start => {
                if self.final_score.is_some() {
                    line.push_span("Play Again (");
                    line.push_span(Span::styled("r", consts::KEY_STYLE));
                } else {
                    line.push_span("New Game (");
                    line.push_span(Span::styled("n", consts::KEY_STYLE));
                }
                line.push_span(")");
            }
            MenuItem::Difficulty | MenuItem::ShowGrid => {
                if let Some(key) = item.setting() {
                    line.push_span(format!(
                        "{key:lwidth$}{space:gutter$}{value}",
                        lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                        space = "",
                        gutter = usize::from(Menu::LABEL_VALUE_GUTTER),
                        value = self.options.get(key),
                    ));
                }
            }
            MenuItem::Quit => {
                line.push_span("Quit (");
                line.push_span(Span::styled("q", consts::KEY_STYLE));
                line.push_span(")");
            }
        }
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}

impl Widget for MenuView<'_> {
    /*
     * ┌──────── GAME OVER ────────┐
     * │ Final score: 120          │
     * │                           │
     * │ » Play Again (r)          │
     * │   Difficulty ◀ Normal ▶   │
     * │   Grid Lines    [ ]       │
     * │   Quit (q)                │
     * └───────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.final_score.is_some() {
            " GAME OVER "
        } else {
            " SNAKE "
        };
        let block = Block::bordered()
            .title(title)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(Menu::HORIZONTAL_PADDING))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let mut rows = inner.rows();
        if let Some(score) = self.final_score {
            if let Some(row) = rows.next() {
                Line::from(format!("Final score: {score}")).render(row, buf);
            }
            let _ = rows.next();
        }
        for (item, row) in MenuItem::iter().zip(rows) {
            self.item_line(item).render(row, buf);
        }
    }
}
