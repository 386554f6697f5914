#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure level and scoring policy for Snake Arcade.
//!
//! The functions here map a level, a food type, and the active multipliers
//! onto step intervals, level thresholds, and points. [`LevelProgress`] carries
//! the per-game bookkeeping that the world advances as food is eaten.

use std::time::Duration;

use snake_arcade_core::{FoodType, LevelSnapshot};

/// Foods required to leave level one.
pub const INITIAL_REQUIRED_FOODS: u32 = 5;
/// Additional foods required by each subsequent level.
pub const REQUIRED_FOODS_STEP: u32 = 2;
/// Base points per food at level one.
pub const INITIAL_SCORE_PER_FOOD: u32 = 10;
/// Base points added per food on every level-up.
pub const SCORE_PER_FOOD_STEP: u32 = 2;
/// Reduction of the step interval per level.
pub const LEVEL_SPEEDUP: Duration = Duration::from_millis(10);
/// Shortest interval between two snake steps.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

const SPEED_BOOST_NUMERATOR: u32 = 3;
const SPEED_BOOST_DENOMINATOR: u32 = 5;

/// Foods needed to complete `level`: 5, 7, 9, 11, ...
///
/// Levels below one are treated as level one.
#[must_use]
pub fn required_foods_for_level(level: u32) -> u32 {
    let completed = level.max(1) - 1;
    INITIAL_REQUIRED_FOODS.saturating_add(completed.saturating_mul(REQUIRED_FOODS_STEP))
}

/// Interval between snake steps for `level` starting from the difficulty's `base`.
///
/// The interval shrinks by [`LEVEL_SPEEDUP`] per level and never drops below
/// [`MIN_TICK_INTERVAL`], including while the speed boost scales it by 3/5.
#[must_use]
pub fn tick_interval_for_level(base: Duration, level: u32, speed_boost: bool) -> Duration {
    let completed = level.max(1) - 1;
    let slowdown = LEVEL_SPEEDUP.saturating_mul(completed);
    let interval = base.saturating_sub(slowdown).max(MIN_TICK_INTERVAL);

    if speed_boost {
        (interval * SPEED_BOOST_NUMERATOR / SPEED_BOOST_DENOMINATOR).max(MIN_TICK_INTERVAL)
    } else {
        interval
    }
}

/// Points awarded for eating `kind`.
#[must_use]
pub fn score_for_food(kind: FoodType, base_score_per_food: u32, multiplier: u32) -> u64 {
    u64::from(base_score_per_food) * u64::from(kind.score_factor()) * u64::from(multiplier)
}

/// Per-game level bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelProgress {
    level: u32,
    required_foods: u32,
    foods_eaten: u32,
    base_score_per_food: u32,
}

impl LevelProgress {
    /// Creates the progress of a fresh game at level one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: 1,
            required_foods: required_foods_for_level(1),
            foods_eaten: 0,
            base_score_per_food: INITIAL_SCORE_PER_FOOD,
        }
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Foods eaten since the current level started.
    #[must_use]
    pub const fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    /// Foods needed to complete the current level.
    #[must_use]
    pub const fn required_foods(&self) -> u32 {
        self.required_foods
    }

    /// Base points per food before multipliers.
    #[must_use]
    pub const fn base_score_per_food(&self) -> u32 {
        self.base_score_per_food
    }

    /// Counts one eaten food and advances the level once the threshold is met.
    ///
    /// Returns the new level when an advance happened.
    pub fn record_food(&mut self) -> Option<u32> {
        self.foods_eaten = self.foods_eaten.saturating_add(1);
        if self.foods_eaten >= self.required_foods {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Moves to the next level and returns it.
    ///
    /// Recomputes the threshold, clears the per-level counter, and raises the
    /// base score per food.
    pub fn advance(&mut self) -> u32 {
        self.level = self.level.saturating_add(1);
        self.required_foods = required_foods_for_level(self.level);
        self.foods_eaten = 0;
        self.base_score_per_food = self.base_score_per_food.saturating_add(SCORE_PER_FOOD_STEP);
        self.level
    }

    /// Captures the progress for renderers.
    #[must_use]
    pub const fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            level: self.level,
            foods_eaten: self.foods_eaten,
            required_foods: self.required_foods,
            base_score_per_food: self.base_score_per_food,
        }
    }
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_foods_grow_by_two_per_level() {
        assert_eq!(required_foods_for_level(1), 5);
        assert_eq!(required_foods_for_level(2), 7);
        assert_eq!(required_foods_for_level(3), 9);
        assert_eq!(required_foods_for_level(0), 5);
    }

    #[test]
    fn record_food_advances_exactly_at_threshold() {
        let mut progress = LevelProgress::new();
        for _ in 0..4 {
            assert_eq!(progress.record_food(), None);
        }
        assert_eq!(progress.record_food(), Some(2));
        assert_eq!(progress.foods_eaten(), 0);
        assert_eq!(progress.required_foods(), 7);
        assert_eq!(progress.base_score_per_food(), 12);
    }
}
