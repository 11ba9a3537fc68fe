use super::direction::Direction;
use super::grid::Cell;
use super::scoring::Scoreboard;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use std::time::Duration;

/// Everything about a game in progress that changes from tick to tick
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    pub(crate) snake: Snake,

    /// The direction applied during the most recent tick
    pub(crate) direction: Direction,

    /// The direction that will be applied during the next tick
    pub(crate) next_direction: Direction,

    pub(crate) food: Cell,

    pub(crate) scoreboard: Scoreboard,

    /// Time between ticks
    pub(crate) interval: Duration,
}

impl GameState {
    /// Create the state for a new game ticking every `interval`
    pub(crate) fn new<R: Rng>(interval: Duration, rng: &mut R) -> GameState {
        let snake = Snake::new();
        // A fresh snake leaves most of the board free.
        let food = place_food(&snake, rng).unwrap_or(Cell::new(0, 0));
        GameState {
            snake,
            direction: Snake::START_DIRECTION,
            next_direction: Snake::START_DIRECTION,
            food,
            scoreboard: Scoreboard::new(),
            interval,
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub(crate) fn level(&self) -> u32 {
        self.scoreboard.level()
    }

    /// Advance the game by one tick: move the snake one cell, eat & replace
    /// the food if it's there, and check for collisions.
    pub(crate) fn step<R: Rng>(&mut self, rng: &mut R) -> Tick {
        self.direction = self.next_direction;
        let head = self.snake.advance(self.direction);
        let mut tick = Tick {
            ate: false,
            level_up: None,
            outcome: Outcome::Moved,
        };
        if head == self.food {
            tick.ate = true;
            tick.level_up = self.scoreboard.add_points(consts::POINTS_PER_FOOD);
            match place_food(&self.snake, rng) {
                Some(food) => self.food = food,
                None => {
                    tick.outcome = Outcome::BoardFull;
                    return tick;
                }
            }
        } else {
            self.snake.drop_tail();
        }
        if !head.in_bounds() {
            tick.outcome = Outcome::HitWall;
        } else if self.snake.bites_itself() {
            tick.outcome = Outcome::HitSelf;
        }
        tick
    }
}

/// What happened during a tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Tick {
    /// Did the snake eat the food?
    pub(crate) ate: bool,

    /// The new level, if eating raised it
    pub(crate) level_up: Option<u32>,

    pub(crate) outcome: Outcome,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// The snake moved and the game goes on
    Moved,

    /// The head left the board
    HitWall,

    /// The head ran into the rest of the snake
    HitSelf,

    /// The snake covers the whole board, leaving nowhere to put food
    BoardFull,
}

impl Outcome {
    pub(crate) fn is_terminal(self) -> bool {
        self != Outcome::Moved
    }
}

/// Choose a random on-board cell not occupied by `snake`.  A bounded number of
/// uniform draws is tried first; if they all land on the snake, the choice is
/// made uniformly among the free cells instead.  Returns `None` if there are
/// no free cells.
pub(crate) fn place_food<R: Rng>(snake: &Snake, rng: &mut R) -> Option<Cell> {
    for _ in 0..consts::FOOD_PLACEMENT_ATTEMPTS {
        let cell = Cell::new(
            rng.random_range(0..consts::GRID_SIZE),
            rng.random_range(0..consts::GRID_SIZE),
        );
        if !snake.contains(cell) {
            return Some(cell);
        }
    }
    Cell::all().filter(|&c| !snake.contains(c)).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;
    const INTERVAL: Duration = Duration::from_millis(150);

    fn new_state() -> (GameState, ChaCha12Rng) {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let state = GameState::new(INTERVAL, &mut rng);
        (state, rng)
    }

    #[test]
    fn fresh_state() {
        let (state, _) = new_state();
        assert_eq!(
            state.snake.cells().collect::<Vec<_>>(),
            [Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
        );
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.next_direction, Direction::Right);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.interval, INTERVAL);
        assert!(state.food.in_bounds());
        assert!(!state.snake.contains(state.food));
    }

    #[test]
    fn plain_move() {
        let (mut state, mut rng) = new_state();
        state.food = Cell::new(0, 0);
        let tick = state.step(&mut rng);
        assert_eq!(
            tick,
            Tick {
                ate: false,
                level_up: None,
                outcome: Outcome::Moved
            }
        );
        assert_eq!(
            state.snake.cells().collect::<Vec<_>>(),
            [Cell::new(11, 10), Cell::new(10, 10), Cell::new(9, 10)]
        );
        assert_eq!(state.food, Cell::new(0, 0));
    }

    #[test]
    fn applies_buffered_direction() {
        let (mut state, mut rng) = new_state();
        state.food = Cell::new(0, 0);
        state.next_direction = Direction::Down;
        let _ = state.step(&mut rng);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.snake.head(), Cell::new(10, 11));
    }

    #[test]
    fn eating_grows_and_scores() {
        let (mut state, mut rng) = new_state();
        state.food = Cell::new(11, 10);
        let tick = state.step(&mut rng);
        assert!(tick.ate);
        assert_eq!(tick.outcome, Outcome::Moved);
        assert_eq!(tick.level_up, None);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Cell::new(11, 10));
        assert_eq!(state.score(), 10);
        assert!(state.food.in_bounds());
        assert!(!state.snake.contains(state.food));
    }

    #[test]
    fn length_changes_only_by_eating() {
        let (mut state, mut rng) = new_state();
        for _ in 0..200 {
            // Wander in a square so as to stay on the board
            let head = state.snake.head();
            state.next_direction = match (head.x, head.y) {
                (x, 5) if x < 15 => Direction::Right,
                (15, y) if y < 15 => Direction::Down,
                (x, 15) if x > 5 => Direction::Left,
                (5, _) => Direction::Up,
                _ => state.direction,
            };
            if state.next_direction.is_opposite(state.direction) {
                state.next_direction = state.direction;
            }
            let before = state.snake.len();
            let food = state.food;
            let tick = state.step(&mut rng);
            if tick.outcome.is_terminal() {
                break;
            }
            let ate = state.snake.head() == food;
            assert_eq!(tick.ate, ate);
            assert_eq!(state.snake.len(), before + usize::from(ate));
            assert!(!state.snake.contains(state.food));
        }
    }

    #[test]
    fn level_up_reported() {
        let (mut state, mut rng) = new_state();
        state.scoreboard = Scoreboard::with_score(40);
        state.food = Cell::new(11, 10);
        let tick = state.step(&mut rng);
        assert_eq!(tick.level_up, Some(2));
        assert_eq!(state.score(), 50);
        assert_eq!(state.level(), 2);
    }

    #[rstest]
    #[case(Cell::new(19, 4), Direction::Right)]
    #[case(Cell::new(0, 4), Direction::Left)]
    #[case(Cell::new(7, 0), Direction::Up)]
    #[case(Cell::new(7, 19), Direction::Down)]
    fn wall_collision(#[case] head: Cell, #[case] direction: Direction) {
        let (mut state, mut rng) = new_state();
        let behind = direction.reverse();
        state.snake = Snake::from_cells([head, head.step(behind), head.step(behind).step(behind)])
            .unwrap();
        state.direction = direction;
        state.next_direction = direction;
        state.food = Cell::new(10, 10);
        let tick = state.step(&mut rng);
        assert_eq!(tick.outcome, Outcome::HitWall);
        assert!(!state.snake.head().in_bounds());
    }

    #[test]
    fn self_collision() {
        let (mut state, mut rng) = new_state();
        state.snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
            Cell::new(6, 4),
        ])
        .unwrap();
        state.direction = Direction::Up;
        state.next_direction = Direction::Right;
        state.food = Cell::new(0, 0);
        let tick = state.step(&mut rng);
        assert_eq!(tick.outcome, Outcome::HitSelf);
    }

    #[test]
    fn chasing_tail_is_safe() {
        let (mut state, mut rng) = new_state();
        state.snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
        ])
        .unwrap();
        state.direction = Direction::Up;
        state.next_direction = Direction::Right;
        state.food = Cell::new(0, 0);
        let tick = state.step(&mut rng);
        assert_eq!(tick.outcome, Outcome::Moved);
        assert_eq!(state.snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn food_avoids_snake_on_crowded_board() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let free = Cell::new(13, 17);
        let snake = Snake::from_cells(Cell::all().filter(|&c| c != free)).unwrap();
        assert_eq!(place_food(&snake, &mut rng), Some(free));
    }

    #[test]
    fn no_food_on_full_board() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = Snake::from_cells(Cell::all()).unwrap();
        assert_eq!(place_food(&snake, &mut rng), None);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let (mut state, mut rng) = new_state();
        let last = Cell::new(0, 0);
        // Every cell but (0, 0), with the head next to it
        let mut cells = Cell::all()
            .filter(|&c| c != last && c != Cell::new(1, 0))
            .collect::<Vec<_>>();
        cells.insert(0, Cell::new(1, 0));
        state.snake = Snake::from_cells(cells).unwrap();
        state.direction = Direction::Left;
        state.next_direction = Direction::Left;
        state.food = last;
        let tick = state.step(&mut rng);
        assert!(tick.ate);
        assert_eq!(tick.outcome, Outcome::BoardFull);
        assert_eq!(state.snake.len(), 400);
    }
}
