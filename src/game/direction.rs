/// A direction of travel, expressed on screen terms: `Up` decreases `y`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the unit `(dx, dy)` offset for moving one cell in this direction
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        self.reverse() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Direction::Down, true)]
    #[case(Direction::Down, Direction::Up, true)]
    #[case(Direction::Left, Direction::Right, true)]
    #[case(Direction::Right, Direction::Left, true)]
    #[case(Direction::Up, Direction::Up, false)]
    #[case(Direction::Up, Direction::Left, false)]
    #[case(Direction::Right, Direction::Down, false)]
    #[case(Direction::Left, Direction::Left, false)]
    fn test_is_opposite(#[case] a: Direction, #[case] b: Direction, #[case] r: bool) {
        assert_eq!(a.is_opposite(b), r);
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn reverse_negates_delta(#[case] d: Direction) {
        let (dx, dy) = d.delta();
        assert_eq!(d.reverse().delta(), (-dx, -dy));
        assert_eq!(dx.abs() + dy.abs(), 1);
    }
}
