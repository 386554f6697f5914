#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Arcade engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! adapters to react to. Read-only snapshots expose the session to renderers.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical window title used by adapters.
pub const GAME_TITLE: &str = "Snake Arcade";

/// Number of segments a freshly initialised snake occupies.
pub const MIN_SNAKE_LENGTH: usize = 3;

/// Time without eating after which the combo counter resets.
pub const COMBO_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Highest combo multiplier a streak can reach.
pub const MAX_COMBO_MULTIPLIER: u32 = 5;

/// Lifecycle of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Title screen where the difficulty is chosen.
    Menu,
    /// Simulation advances on every tick.
    Playing,
    /// Simulation is frozen until the pause toggle is pressed again.
    Paused,
    /// The snake collided; the final score is on display.
    GameOver,
}

/// Difficulty presets selectable from the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Slow opening pace.
    Easy,
    /// Default pace.
    #[default]
    Normal,
    /// Fast opening pace.
    Hard,
}

impl Difficulty {
    /// Interval between snake steps at level one before any speed boost.
    #[must_use]
    pub const fn base_tick_interval(self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(250),
            Self::Normal => Duration::from_millis(200),
            Self::Hard => Duration::from_millis(150),
        }
    }
}

/// Commands that express every permissible session mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the snake turn on its next step.
    RequestDirection {
        /// Heading requested by the player.
        direction: Direction,
    },
    /// Toggles between playing and paused.
    TogglePause,
    /// Starts a game from the menu or returns to the menu after a game over.
    Confirm,
    /// Immediately starts a new game after a game over.
    Restart,
    /// Chooses the difficulty used by the next game.
    SelectDifficulty {
        /// Difficulty to apply.
        difficulty: Difficulty,
    },
    /// Seeds the best score recorded by previous sessions.
    RestoreHighScore {
        /// Previously persisted high score.
        high_score: u64,
    },
    /// Signals that the player wants to leave the game.
    Quit,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces a lifecycle transition.
    LifecycleChanged {
        /// State before the transition.
        from: Lifecycle,
        /// State after the transition.
        to: Lifecycle,
    },
    /// Confirms a new difficulty selection.
    DifficultySelected {
        /// Difficulty that will be used by the next game.
        difficulty: Difficulty,
    },
    /// Confirms that a turn request was accepted for the next step.
    HeadingQueued {
        /// Heading the snake will take on its next step.
        direction: Direction,
    },
    /// Confirms that the snake advanced one cell.
    SnakeAdvanced {
        /// Cell occupied by the head after the step.
        head: GridCoord,
    },
    /// Reports that the snake ate a food item.
    FoodEaten {
        /// Type of the food that was eaten.
        kind: FoodType,
        /// Cell the food occupied.
        cell: GridCoord,
        /// Points awarded for the food.
        points: u64,
    },
    /// Confirms that a new food item was placed.
    FoodSpawned {
        /// Cell the food occupies.
        cell: GridCoord,
        /// Type rolled for the food.
        kind: FoodType,
    },
    /// Reports that a power-up became active or had its expiry replaced.
    PowerUpActivated {
        /// Power-up that was activated.
        kind: PowerUpKind,
        /// Simulation time at which the power-up lapses.
        expires_at: Duration,
    },
    /// Reports that a power-up lapsed.
    PowerUpExpired {
        /// Power-up that expired.
        kind: PowerUpKind,
    },
    /// Announces that the player reached a new level.
    LevelAdvanced {
        /// Level reached.
        level: u32,
    },
    /// Announces the end of a game.
    GameOver {
        /// Summary of the finished game.
        summary: GameSummary,
    },
    /// Confirms that the player asked to quit.
    QuitRequested,
}

/// Cardinal headings available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
}

impl Direction {
    /// Returns the heading pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Column and row offsets of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location of a single grid cell.
///
/// Coordinates are signed because the head may step past an edge before the
/// collision check either reports a wall hit or wraps it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    x: i32,
    y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Reasons a grid size may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridSizeError {
    /// One of the dimensions cannot hold the initial snake.
    #[error("grid must be at least {min}x{min} cells (received {width}x{height})")]
    TooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Smallest permitted dimension.
        min: u32,
    },
}

/// Dimensions of the play field measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Play field used when no size is configured: 800x600 pixels of 20-pixel cells.
    pub const DEFAULT: Self = Self {
        width: 40,
        height: 30,
    };

    /// Creates a grid size, rejecting dimensions that cannot host the initial snake.
    pub fn new(width: u32, height: u32) -> Result<Self, GridSizeError> {
        let min = MIN_SNAKE_LENGTH as u32;
        if width < min || height < min {
            return Err(GridSizeError::TooSmall { width, height, min });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells, which also bounds the snake length.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the coordinate lies inside the play field.
    #[must_use]
    pub const fn contains(&self, cell: GridCoord) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Wraps the coordinate onto the opposite edge when it lies outside.
    #[must_use]
    pub fn wrap(&self, cell: GridCoord) -> GridCoord {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        GridCoord::new(cell.x.rem_euclid(width), cell.y.rem_euclid(height))
    }

    /// Cell at the centre of the grid, rounded toward the origin.
    #[must_use]
    pub const fn center(&self) -> GridCoord {
        GridCoord::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Timed modifiers granted by special food.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Shortens the interval between snake steps.
    Speed,
    /// Doubles the points awarded per food.
    DoubleScore,
    /// Lets the snake pass through walls and wrap to the opposite edge.
    Phase,
}

impl PowerUpKind {
    /// Every power-up in a stable order.
    pub const ALL: [Self; 3] = [Self::Speed, Self::DoubleScore, Self::Phase];

    /// How long the power-up stays active after being granted.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Speed => Duration::from_millis(3_000),
            Self::DoubleScore => Duration::from_millis(5_000),
            Self::Phase => Duration::from_millis(4_000),
        }
    }
}

/// How eating a food changes the snake's body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyEffect {
    /// Adds one tail segment.
    Grow,
    /// Removes up to the given number of tail segments.
    Shrink(usize),
}

/// Kinds of food the snake can eat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FoodType {
    /// Plain food.
    Normal,
    /// Grants a speed boost.
    Speed,
    /// Grants double score.
    Double,
    /// Worth five times the base score.
    Golden,
    /// Shortens the snake.
    Shrink,
    /// Grants wall phasing.
    Phase,
    /// Rare food worth ten times the base score.
    Mega,
}

/// Exclusive upper bounds of each food's bucket when rolling in `0..100`.
const FOOD_TABLE: [(u32, FoodType); 7] = [
    (50, FoodType::Normal),
    (65, FoodType::Speed),
    (75, FoodType::Double),
    (85, FoodType::Golden),
    (92, FoodType::Shrink),
    (98, FoodType::Phase),
    (100, FoodType::Mega),
];

impl FoodType {
    /// Every food type in table order.
    pub const ALL: [Self; 7] = [
        Self::Normal,
        Self::Speed,
        Self::Double,
        Self::Golden,
        Self::Shrink,
        Self::Phase,
        Self::Mega,
    ];

    /// Exclusive upper bound of the roll range used by [`FoodType::from_roll`].
    pub const ROLL_RANGE: u32 = 100;

    /// Maps a roll in `0..100` onto the cumulative probability table.
    ///
    /// Rolls at or above 100 saturate to the rarest bucket.
    #[must_use]
    pub fn from_roll(roll: u32) -> Self {
        FOOD_TABLE
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map_or(Self::Mega, |(_, kind)| *kind)
    }

    /// Draws a food type from the table using the provided random source.
    pub fn roll(random: &mut dyn RandomSource) -> Self {
        Self::from_roll(random.below(Self::ROLL_RANGE))
    }

    /// Multiple of the base score awarded before combo scaling.
    #[must_use]
    pub const fn score_factor(self) -> u32 {
        match self {
            Self::Normal | Self::Double => 1,
            Self::Speed => 2,
            Self::Shrink | Self::Phase => 3,
            Self::Golden => 5,
            Self::Mega => 10,
        }
    }

    /// Change applied to the snake's body.
    #[must_use]
    pub const fn body_effect(self) -> BodyEffect {
        match self {
            Self::Shrink => BodyEffect::Shrink(2),
            Self::Normal | Self::Speed | Self::Double | Self::Golden | Self::Phase | Self::Mega => {
                BodyEffect::Grow
            }
        }
    }

    /// Power-up granted by the food, if any.
    #[must_use]
    pub const fn power_up(self) -> Option<PowerUpKind> {
        match self {
            Self::Speed => Some(PowerUpKind::Speed),
            Self::Double => Some(PowerUpKind::DoubleScore),
            Self::Phase => Some(PowerUpKind::Phase),
            Self::Normal | Self::Golden | Self::Shrink | Self::Mega => None,
        }
    }

    /// Whether the food counts toward special-food statistics.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Uniform random integers consumed by the simulation.
pub trait RandomSource: fmt::Debug {
    /// Returns a uniformly distributed integer in `0..bound`.
    ///
    /// `bound` is always positive when called by the simulation.
    fn below(&mut self, bound: u32) -> u32;
}

/// What ended a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collision {
    /// The head left the grid without phase mode.
    Wall,
    /// The head ran into the snake's own body.
    SelfBite,
}

/// Summary of a finished game reported to statistics and persistence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSummary {
    /// What ended the game.
    pub cause: Collision,
    /// Final score.
    pub score: u64,
    /// Whether the score beat the previous high score.
    pub new_high_score: bool,
    /// Level reached.
    pub level: u32,
    /// Snake length when the game ended.
    pub length: usize,
    /// Foods eaten during the whole game.
    pub foods_eaten: u32,
    /// Foods other than [`FoodType::Normal`] eaten during the game.
    pub special_foods_eaten: u32,
    /// Longest combo streak reached.
    pub best_combo: u32,
    /// Simulated play time of the game.
    pub duration: Duration,
}

/// Immutable copy of the snake used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeSnapshot {
    /// Occupied cells, head first.
    pub segments: Vec<GridCoord>,
    /// Heading of the last step.
    pub heading: Direction,
    /// Heading that will be applied on the next step.
    pub pending_heading: Direction,
}

impl SnakeSnapshot {
    /// Cell occupied by the head.
    #[must_use]
    pub fn head(&self) -> Option<GridCoord> {
        self.segments.first().copied()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the snapshot holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Immutable copy of the food item used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoodSnapshot {
    /// Cell the food occupies.
    pub cell: GridCoord,
    /// Type of the food.
    pub kind: FoodType,
    /// Whether the food can currently be eaten.
    pub active: bool,
    /// Simulation time at which the food appeared.
    pub spawned_at: Duration,
}

/// State of one timed power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUpStatus {
    /// Power-up described by the status.
    pub kind: PowerUpKind,
    /// Whether the power-up is active.
    pub active: bool,
    /// Time left before the power-up lapses, zero when inactive.
    pub remaining: Duration,
}

/// Immutable copy of the power-up state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUpSnapshot {
    /// Status of every power-up in [`PowerUpKind::ALL`] order.
    pub statuses: [PowerUpStatus; 3],
    /// Foods eaten in the current streak.
    pub combo_count: u32,
    /// Multiplier derived from the streak.
    pub combo_multiplier: u32,
    /// Combined multiplier including double score.
    pub score_multiplier: u32,
}

impl PowerUpSnapshot {
    /// Whether the provided power-up is active.
    #[must_use]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.statuses
            .iter()
            .any(|status| status.kind == kind && status.active)
    }
}

/// Level bookkeeping exposed to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSnapshot {
    /// Current level, starting at one.
    pub level: u32,
    /// Foods eaten since the level started.
    pub foods_eaten: u32,
    /// Foods needed to reach the next level.
    pub required_foods: u32,
    /// Base points per food before multipliers.
    pub base_score_per_food: u32,
}

#[cfg(test)]
mod tests {
    use super::{
        BodyEffect, Collision, Direction, FoodType, GameSummary, GridCoord, GridSize,
        GridSizeError, PowerUpKind,
    };
    use std::time::Duration;

    #[test]
    fn opposite_directions_pair_up() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
        }
    }

    #[test]
    fn step_moves_one_cell() {
        let origin = GridCoord::new(4, 4);
        assert_eq!(origin.step(Direction::Up), GridCoord::new(4, 3));
        assert_eq!(origin.step(Direction::Down), GridCoord::new(4, 5));
        assert_eq!(origin.step(Direction::Left), GridCoord::new(3, 4));
        assert_eq!(origin.step(Direction::Right), GridCoord::new(5, 4));
    }

    #[test]
    fn grid_rejects_dimensions_below_snake_length() {
        assert_eq!(
            GridSize::new(2, 10),
            Err(GridSizeError::TooSmall {
                width: 2,
                height: 10,
                min: 3
            })
        );
        assert!(GridSize::new(3, 3).is_ok());
    }

    #[test]
    fn grid_wraps_every_edge() {
        let grid = GridSize::new(10, 8).expect("valid grid");
        assert_eq!(grid.wrap(GridCoord::new(-1, 3)), GridCoord::new(9, 3));
        assert_eq!(grid.wrap(GridCoord::new(10, 3)), GridCoord::new(0, 3));
        assert_eq!(grid.wrap(GridCoord::new(2, -1)), GridCoord::new(2, 7));
        assert_eq!(grid.wrap(GridCoord::new(2, 8)), GridCoord::new(2, 0));
        assert_eq!(grid.wrap(GridCoord::new(5, 5)), GridCoord::new(5, 5));
    }

    #[test]
    fn grid_contains_respects_bounds() {
        let grid = GridSize::DEFAULT;
        assert!(grid.contains(GridCoord::new(0, 0)));
        assert!(grid.contains(GridCoord::new(39, 29)));
        assert!(!grid.contains(GridCoord::new(40, 0)));
        assert!(!grid.contains(GridCoord::new(0, -1)));
        assert_eq!(grid.cell_count(), 1_200);
    }

    #[test]
    fn food_table_boundaries_match_buckets() {
        let expectations = [
            (0, FoodType::Normal),
            (49, FoodType::Normal),
            (50, FoodType::Speed),
            (64, FoodType::Speed),
            (65, FoodType::Double),
            (74, FoodType::Double),
            (75, FoodType::Golden),
            (84, FoodType::Golden),
            (85, FoodType::Shrink),
            (91, FoodType::Shrink),
            (92, FoodType::Phase),
            (97, FoodType::Phase),
            (98, FoodType::Mega),
            (99, FoodType::Mega),
        ];
        for (roll, expected) in expectations {
            assert_eq!(FoodType::from_roll(roll), expected, "roll {roll}");
        }
    }

    #[test]
    fn only_shrink_food_shrinks() {
        for kind in FoodType::ALL {
            let shrinks = matches!(kind.body_effect(), BodyEffect::Shrink(_));
            assert_eq!(shrinks, kind == FoodType::Shrink);
        }
    }

    #[test]
    fn power_up_foods_map_to_kinds() {
        assert_eq!(FoodType::Speed.power_up(), Some(PowerUpKind::Speed));
        assert_eq!(FoodType::Double.power_up(), Some(PowerUpKind::DoubleScore));
        assert_eq!(FoodType::Phase.power_up(), Some(PowerUpKind::Phase));
        assert_eq!(FoodType::Golden.power_up(), None);
        assert!(!FoodType::Normal.is_special());
        assert!(FoodType::Mega.is_special());
    }

    #[test]
    fn game_summary_round_trips_through_bincode() {
        let summary = GameSummary {
            cause: Collision::SelfBite,
            score: 1_250,
            new_high_score: true,
            level: 4,
            length: 17,
            foods_eaten: 22,
            special_foods_eaten: 9,
            best_combo: 6,
            duration: Duration::from_millis(93_500),
        };
        let bytes = bincode::serialize(&summary).expect("serialize");
        let restored: GameSummary = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, summary);
    }
}
