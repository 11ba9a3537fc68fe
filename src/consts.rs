//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of cells along each side of the (square) board
pub(crate) const GRID_SIZE: i32 = 20;

/// Number of terminal columns occupied by one board cell.  Segments and food
/// are drawn one column narrower than this, leaving a one-column gap.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Number of segments in a freshly-started snake
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded for eating one piece of food
pub(crate) const POINTS_PER_FOOD: u32 = 10;

/// The level goes up by one every this many points
pub(crate) const POINTS_PER_LEVEL: u32 = 50;

/// How much shorter the tick interval gets with each level above the first
pub(crate) const SPEEDUP_PER_LEVEL: Duration = Duration::from_millis(10);

/// The tick interval never drops below this, no matter the level
pub(crate) const MIN_TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Number of random draws made when placing food before falling back to a
/// scan of the whole board
pub(crate) const FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Glyph for the parts of the snake
pub(crate) const SNAKE_SYMBOL: char = '█';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph drawn in empty cells when grid lines are enabled
pub(crate) const GRID_SYMBOL: char = '·';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`GRID_SYMBOL`]
pub(crate) const GRID_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
