use super::direction::Direction;
use super::grid::Cell;
use crate::consts;
use std::collections::VecDeque;

/// The body of the snake
///
/// Cells are stored head first.  A freshly-started snake lies horizontally in
/// the middle row with its head at the center of the board, facing right.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    cells: VecDeque<Cell>,
}

impl Snake {
    /// The cell on which a new snake's head is placed
    pub(crate) const START: Cell = Cell::new(consts::GRID_SIZE / 2, consts::GRID_SIZE / 2);

    /// The direction in which a new snake travels
    pub(crate) const START_DIRECTION: Direction = Direction::Right;

    pub(crate) fn new() -> Snake {
        let behind = Self::START_DIRECTION.reverse();
        let cells = std::iter::successors(Some(Self::START), |&c| Some(c.step(behind)))
            .take(consts::INITIAL_SNAKE_LENGTH)
            .collect();
        Snake { cells }
    }

    /// Construct a snake from its cells, head first.  Returns `None` if `cells`
    /// is empty.
    #[cfg(test)]
    pub(crate) fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Snake> {
        let cells = cells.into_iter().collect::<VecDeque<_>>();
        (!cells.is_empty()).then_some(Snake { cells })
    }

    pub(crate) fn head(&self) -> Cell {
        // A snake always has at least one cell.
        self.cells.front().copied().unwrap_or(Self::START)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Push a new head one cell ahead of the current one in `direction` and
    /// return it.  The tail is left in place; call [`Snake::drop_tail()`]
    /// unless the snake is growing.
    pub(crate) fn advance(&mut self, direction: Direction) -> Cell {
        let head = self.head().step(direction);
        self.cells.push_front(head);
        head
    }

    /// Remove the last cell, unless the head is all that's left
    pub(crate) fn drop_tail(&mut self) {
        if self.cells.len() > 1 {
            let _ = self.cells.pop_back();
        }
    }

    /// Does the head occupy the same cell as any other part of the snake?
    pub(crate) fn bites_itself(&self) -> bool {
        let head = self.head();
        self.cells.iter().skip(1).any(|&c| c == head)
    }
}

impl Default for Snake {
    fn default() -> Snake {
        Snake::new()
    }
}
