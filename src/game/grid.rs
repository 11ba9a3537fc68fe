use super::direction::Direction;
use crate::consts::GRID_SIZE;

/// A position on the board.  Coordinates are signed so that a head which has
/// just run off an edge can still be represented.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Is the cell on the board?  Edges do not wrap around.
    pub(crate) fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Return the neighboring cell in `direction`, whether or not it is on the
    /// board
    pub(crate) fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Iterate over every cell on the board, row by row
    pub(crate) fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Cell { x, y }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Cell::new(0, 0), true)]
    #[case(Cell::new(19, 19), true)]
    #[case(Cell::new(10, 10), true)]
    #[case(Cell::new(-1, 5), false)]
    #[case(Cell::new(5, -1), false)]
    #[case(Cell::new(20, 5), false)]
    #[case(Cell::new(5, 20), false)]
    fn test_in_bounds(#[case] cell: Cell, #[case] r: bool) {
        assert_eq!(cell.in_bounds(), r);
    }

    #[rstest]
    #[case(Direction::Up, Cell::new(4, 6))]
    #[case(Direction::Down, Cell::new(4, 8))]
    #[case(Direction::Left, Cell::new(3, 7))]
    #[case(Direction::Right, Cell::new(5, 7))]
    fn test_step(#[case] d: Direction, #[case] r: Cell) {
        assert_eq!(Cell::new(4, 7).step(d), r);
    }

    #[test]
    fn step_off_board() {
        let cell = Cell::new(0, 0).step(Direction::Left);
        assert_eq!(cell, Cell::new(-1, 0));
        assert!(!cell.in_bounds());
    }

    #[test]
    fn all_cells() {
        let cells = Cell::all().collect::<Vec<_>>();
        assert_eq!(cells.len(), 400);
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.get(1), Some(&Cell::new(1, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(19, 19)));
        assert!(cells.iter().all(|c| c.in_bounds()));
    }
}
