use super::grid::Cell;
use super::menu::{Menu, MenuView};
use super::state::Outcome;
use super::{Game, GameOver, Phase};
use crate::consts;
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
};

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const GRID_CELLS: u16 = consts::GRID_SIZE as u16;

/// Size of the board including its border
const BOARD_SIZE: Size = Size {
    width: GRID_CELLS * consts::CELL_WIDTH + 2,
    height: GRID_CELLS + 2,
};

impl<R> Widget for &Game<R> {
    /*
     *  Score: 0   Level: 1   High Score: 0
     *                    ┌──────────────────┐
     *                    │                  │
     *                    │      board       │
     *                    │                  │
     *                    └──────────────────┘
     *  Pause (Space)   Quit (q)
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [status_area, board_area, message_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);

        buf.set_style(status_area, consts::SCORE_BAR_STYLE);
        Line::from(format!(
            " Score: {}   Level: {}   High Score: {}",
            self.state.score(),
            self.state.level(),
            self.high_score
        ))
        .render(status_area, buf);

        let block_area = center_rect(board_area, BOARD_SIZE);
        Block::bordered().render(block_area, buf);
        let inner = block_area.inner(Margin::new(1, 1));
        let mut canvas = Canvas { area: inner, buf };
        if self.options.show_grid {
            for cell in Cell::all() {
                canvas.draw_cell(cell, consts::GRID_SYMBOL, consts::GRID_STYLE);
            }
        }
        for cell in self.state.snake.cells() {
            canvas.draw_cell(cell, consts::SNAKE_SYMBOL, consts::SNAKE_STYLE);
        }
        canvas.draw_cell(self.state.food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);

        let message = match self.phase {
            Phase::Running(_) => key_hints(&[("Pause", "Space"), ("Quit", "q")]),
            Phase::Paused => {
                PauseNotice.render(center_rect(inner, PauseNotice::SIZE), buf);
                key_hints(&[("Resume", "Space"), ("Quit", "q")])
            }
            Phase::Idle { last_game } => {
                if let Some(GameOver {
                    cause: Outcome::HitWall | Outcome::HitSelf,
                    ..
                }) = last_game
                {
                    // After hitting a wall, the head is off the board, so
                    // mark the last segment still on it.
                    if let Some(crash) = self.state.snake.cells().find(|c| c.in_bounds()) {
                        canvas.draw_cell(crash, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
                    }
                }
                let final_score = last_game.map(|g| g.final_score);
                MenuView {
                    menu: &self.menu,
                    options: &self.options,
                    final_score,
                }
                .render(center_rect(inner, Menu::size(final_score)), buf);
                key_hints(&[("Move", "↑↓"), ("Adjust", "←→"), ("Select", "Enter")])
            }
        };
        message.render(message_area, buf);
    }
}

/// Build a line of the form " Action (key)   Action (key)"
fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut line = Line::default();
    for (i, &(action, key)) in hints.iter().enumerate() {
        line.push_span(if i == 0 { " " } else { "   " });
        line.push_span(action);
        line.push_span(" (");
        line.push_span(Span::styled(key, consts::KEY_STYLE));
        line.push_span(")");
    }
    line
}

/// Draws board cells into a region of a buffer
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` in the first column of `cell`.  The cell's remaining
    /// column is left alone as a gap.  Cells off the board are skipped.
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        if !cell.in_bounds() {
            return;
        }
        let (Ok(col), Ok(row)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        let Some(x) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|c| self.area.x.checked_add(c))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if x >= self.area.right() || y >= self.area.bottom() {
            return;
        }
        if let Some(c) = self.buf.cell_mut((x, y)) {
            c.set_char(symbol);
            c.set_style(style);
        }
    }
}

/// The pop-up shown over the board while the game is paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PauseNotice;

impl PauseNotice {
    const SIZE: Size = Size {
        width: 18,
        height: 3,
    };
}

impl Widget for PauseNotice {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        Line::from_iter([
            Span::raw("Resume ("),
            Span::styled("Space", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(inner, buf);
    }
}
