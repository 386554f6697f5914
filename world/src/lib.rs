#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Snake Arcade.
//!
//! The world owns the snake, the food item, the power-up timers, the score,
//! and the lifecycle. Every mutation goes through [`apply`], which reports its
//! consequences as [`Event`] values. Time only moves forward while a game is
//! being played, so pausing freezes power-up timers and the combo window.

mod food;
mod power_ups;
mod random;
mod snake;

use std::time::Duration;

use log::{debug, info};
use snake_arcade_core::{
    BodyEffect, Collision, Command, Difficulty, Event, FoodType, GameSummary, GridCoord, GridSize,
    Lifecycle, PowerUpKind, RandomSource,
};
use snake_arcade_system_progression::{score_for_food, tick_interval_for_level, LevelProgress};

pub use food::Food;
pub use power_ups::PowerUps;
pub use random::SeededRandom;
pub use snake::Snake;

/// Seed used when no explicit seed is configured.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_5A4E;

/// Parameters fixed for the lifetime of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    grid: GridSize,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration for the provided grid and seed.
    #[must_use]
    pub const fn new(grid: GridSize, rng_seed: u64) -> Self {
        Self { grid, rng_seed }
    }

    /// Dimensions of the play field.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Seed of the random stream used for food placement and types.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(GridSize::DEFAULT, DEFAULT_RNG_SEED)
    }
}

/// Represents the authoritative Snake Arcade session.
#[derive(Debug)]
pub struct World {
    grid: GridSize,
    lifecycle: Lifecycle,
    difficulty: Difficulty,
    snake: Snake,
    food: Food,
    power_ups: PowerUps,
    progress: LevelProgress,
    score: u64,
    high_score: u64,
    foods_eaten: u32,
    special_foods_eaten: u32,
    clock: Duration,
    session_started_at: Duration,
    last_move_at: Duration,
    quit_requested: bool,
    random: Box<dyn RandomSource>,
}

impl World {
    /// Creates a world on the menu screen using a seeded random stream.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_random(
            config.grid(),
            Box::new(SeededRandom::new(config.rng_seed())),
        )
    }

    /// Creates a world on the menu screen drawing from the provided source.
    #[must_use]
    pub fn with_random(grid: GridSize, random: Box<dyn RandomSource>) -> Self {
        let mut world = Self {
            grid,
            lifecycle: Lifecycle::Menu,
            difficulty: Difficulty::default(),
            snake: Snake::new(grid),
            food: Food::new(),
            power_ups: PowerUps::new(Duration::ZERO),
            progress: LevelProgress::new(),
            score: 0,
            high_score: 0,
            foods_eaten: 0,
            special_foods_eaten: 0,
            clock: Duration::ZERO,
            session_started_at: Duration::ZERO,
            last_move_at: Duration::ZERO,
            quit_requested: false,
            random,
        };
        let _ = world.place_food();
        world
    }

    fn set_lifecycle(&mut self, to: Lifecycle, out_events: &mut Vec<Event>) {
        let from = self.lifecycle;
        if from == to {
            return;
        }
        self.lifecycle = to;
        debug!("lifecycle {from:?} -> {to:?}");
        out_events.push(Event::LifecycleChanged { from, to });
    }

    fn start_game(&mut self, out_events: &mut Vec<Event>) {
        self.snake.init(self.grid);
        self.power_ups.reset(self.clock);
        self.progress = LevelProgress::new();
        self.score = 0;
        self.foods_eaten = 0;
        self.special_foods_eaten = 0;
        self.session_started_at = self.clock;
        self.last_move_at = self.clock;
        self.respawn_food(out_events);
        info!("starting {:?} game on a {} grid", self.difficulty, self.grid);
        self.set_lifecycle(Lifecycle::Playing, out_events);
    }

    fn place_food(&mut self) -> Option<(GridCoord, FoodType)> {
        if !self
            .food
            .spawn(self.grid, &self.snake, self.random.as_mut(), self.clock)
        {
            return None;
        }
        let kind = self.food.select_type(self.random.as_mut());
        Some((self.food.cell(), kind))
    }

    fn respawn_food(&mut self, out_events: &mut Vec<Event>) {
        match self.place_food() {
            Some((cell, kind)) => out_events.push(Event::FoodSpawned { cell, kind }),
            None => debug!("no free cell left for food"),
        }
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        let mut expired = Vec::new();
        self.power_ups.update(self.clock, &mut expired);
        out_events.extend(
            expired
                .into_iter()
                .map(|kind| Event::PowerUpExpired { kind }),
        );

        let interval = tick_interval_for_level(
            self.difficulty.base_tick_interval(),
            self.progress.level(),
            self.power_ups.is_active(PowerUpKind::Speed),
        );
        if self.clock.saturating_sub(self.last_move_at) < interval {
            return;
        }
        self.last_move_at = self.clock;

        self.snake.advance();
        let phase = self.power_ups.is_active(PowerUpKind::Phase);
        if let Some(cause) = self.snake.check_collision(self.grid, phase) {
            self.finish_game(cause, out_events);
            return;
        }

        let head = self.snake.head();
        out_events.push(Event::SnakeAdvanced { head });

        if self.food.check_collision(head) {
            self.consume_food(out_events);
        }
    }

    fn consume_food(&mut self, out_events: &mut Vec<Event>) {
        let kind = self.food.kind();
        let cell = self.food.cell();

        self.power_ups.register_food_eaten(self.clock);
        let multiplier = self.power_ups.score_multiplier();

        match kind.body_effect() {
            BodyEffect::Grow => self.snake.grow(),
            BodyEffect::Shrink(amount) => self.snake.shrink(amount),
        }

        let points = score_for_food(kind, self.progress.base_score_per_food(), multiplier);
        self.score = self.score.saturating_add(points);
        out_events.push(Event::FoodEaten { kind, cell, points });

        if let Some(power_up) = kind.power_up() {
            let expires_at = self.power_ups.activate(power_up, self.clock);
            out_events.push(Event::PowerUpActivated {
                kind: power_up,
                expires_at,
            });
        }

        self.respawn_food(out_events);

        self.foods_eaten = self.foods_eaten.saturating_add(1);
        if kind.is_special() {
            self.special_foods_eaten = self.special_foods_eaten.saturating_add(1);
        }

        if let Some(level) = self.progress.record_food() {
            info!("reached level {level}");
            out_events.push(Event::LevelAdvanced { level });
        }
    }

    fn finish_game(&mut self, cause: Collision, out_events: &mut Vec<Event>) {
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }

        let summary = GameSummary {
            cause,
            score: self.score,
            new_high_score,
            level: self.progress.level(),
            length: self.snake.len(),
            foods_eaten: self.foods_eaten,
            special_foods_eaten: self.special_foods_eaten,
            best_combo: self.power_ups.best_combo(),
            duration: self.clock.saturating_sub(self.session_started_at),
        };
        info!(
            "game over ({cause:?}) with score {} at level {}",
            summary.score, summary.level
        );
        self.set_lifecycle(Lifecycle::GameOver, out_events);
        out_events.push(Event::GameOver { summary });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            if world.lifecycle != Lifecycle::Playing {
                return;
            }
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
            world.step(out_events);
        }
        Command::RequestDirection { direction } => {
            if world.lifecycle == Lifecycle::Playing && world.snake.change_direction(direction) {
                out_events.push(Event::HeadingQueued { direction });
            }
        }
        Command::TogglePause => match world.lifecycle {
            Lifecycle::Playing => world.set_lifecycle(Lifecycle::Paused, out_events),
            Lifecycle::Paused => world.set_lifecycle(Lifecycle::Playing, out_events),
            Lifecycle::Menu | Lifecycle::GameOver => {}
        },
        Command::Confirm => match world.lifecycle {
            Lifecycle::Menu => world.start_game(out_events),
            Lifecycle::GameOver => world.set_lifecycle(Lifecycle::Menu, out_events),
            Lifecycle::Playing | Lifecycle::Paused => {}
        },
        Command::Restart => {
            if world.lifecycle == Lifecycle::GameOver {
                world.start_game(out_events);
            }
        }
        Command::SelectDifficulty { difficulty } => {
            if world.lifecycle == Lifecycle::Menu {
                world.difficulty = difficulty;
                out_events.push(Event::DifficultySelected { difficulty });
            }
        }
        Command::RestoreHighScore { high_score } => {
            world.high_score = world.high_score.max(high_score);
        }
        Command::Quit => {
            world.quit_requested = true;
            out_events.push(Event::QuitRequested);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use snake_arcade_core::{
        Difficulty, FoodSnapshot, GridSize, LevelSnapshot, Lifecycle, PowerUpSnapshot,
        SnakeSnapshot,
    };

    use super::World;

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(world: &World) -> Lifecycle {
        world.lifecycle
    }

    /// Difficulty used by the current or next game.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.difficulty
    }

    /// Dimensions of the play field.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid
    }

    /// Captures the snake.
    #[must_use]
    pub fn snake(world: &World) -> SnakeSnapshot {
        world.snake.snapshot()
    }

    /// Captures the food item.
    #[must_use]
    pub fn food(world: &World) -> FoodSnapshot {
        world.food.snapshot()
    }

    /// Captures power-up timers and the combo streak.
    #[must_use]
    pub fn power_ups(world: &World) -> PowerUpSnapshot {
        world.power_ups.snapshot(world.clock)
    }

    /// Captures level bookkeeping.
    #[must_use]
    pub fn level(world: &World) -> LevelSnapshot {
        world.progress.snapshot()
    }

    /// Score of the current or last game.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Best score known to the world, including restored ones.
    #[must_use]
    pub fn high_score(world: &World) -> u64 {
        world.high_score
    }

    /// Foods eaten during the current or last game.
    #[must_use]
    pub fn foods_eaten(world: &World) -> u32 {
        world.foods_eaten
    }

    /// Simulated play time of the current or last game.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.clock.saturating_sub(world.session_started_at)
    }

    /// Total simulated time since the world was created.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Whether the player asked to quit.
    #[must_use]
    pub fn quit_requested(world: &World) -> bool {
        world.quit_requested
    }
}
