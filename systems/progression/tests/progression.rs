use std::time::Duration;

use snake_arcade_core::{Difficulty, FoodType};
use snake_arcade_system_progression::{
    required_foods_for_level, score_for_food, tick_interval_for_level, LevelProgress,
    MIN_TICK_INTERVAL,
};

#[test]
fn tick_interval_decreases_with_level_until_floor() {
    let base = Difficulty::Normal.base_tick_interval();
    let mut previous = tick_interval_for_level(base, 1, false);
    assert_eq!(previous, Duration::from_millis(200));

    for level in 2..40 {
        let interval = tick_interval_for_level(base, level, false);
        assert!(interval <= previous, "level {level} slowed down");
        assert!(interval >= MIN_TICK_INTERVAL, "level {level} below floor");
        previous = interval;
    }

    assert_eq!(tick_interval_for_level(base, 16, false), MIN_TICK_INTERVAL);
    assert_eq!(tick_interval_for_level(base, 1_000, false), MIN_TICK_INTERVAL);
}

#[test]
fn speed_boost_scales_interval_and_respects_floor() {
    let base = Difficulty::Easy.base_tick_interval();
    assert_eq!(
        tick_interval_for_level(base, 1, true),
        Duration::from_millis(150)
    );
    assert_eq!(
        tick_interval_for_level(base, 3, true),
        Duration::from_millis(138)
    );
    assert_eq!(tick_interval_for_level(base, 30, true), MIN_TICK_INTERVAL);
}

#[test]
fn difficulty_sets_opening_pace() {
    assert_eq!(
        tick_interval_for_level(Difficulty::Easy.base_tick_interval(), 1, false),
        Duration::from_millis(250)
    );
    assert_eq!(
        tick_interval_for_level(Difficulty::Hard.base_tick_interval(), 2, false),
        Duration::from_millis(140)
    );
}

#[test]
fn score_scales_by_food_factor_and_multiplier() {
    assert_eq!(score_for_food(FoodType::Normal, 10, 1), 10);
    assert_eq!(score_for_food(FoodType::Speed, 10, 1), 20);
    assert_eq!(score_for_food(FoodType::Golden, 12, 2), 120);
    assert_eq!(score_for_food(FoodType::Shrink, 10, 3), 90);
    assert_eq!(score_for_food(FoodType::Mega, 14, 10), 1_400);
}

#[test]
fn required_foods_are_monotonic() {
    let mut previous = 0;
    for level in 1..100 {
        let required = required_foods_for_level(level);
        assert!(required > previous);
        previous = required;
    }
}

#[test]
fn advancing_resets_counter_and_raises_base_score() {
    let mut progress = LevelProgress::new();
    let _ = progress.record_food();
    let _ = progress.record_food();

    assert_eq!(progress.advance(), 2);
    let snapshot = progress.snapshot();
    assert_eq!(snapshot.level, 2);
    assert_eq!(snapshot.foods_eaten, 0);
    assert_eq!(snapshot.required_foods, required_foods_for_level(2));
    assert_eq!(snapshot.base_score_per_food, 12);

    assert_eq!(progress.advance(), 3);
    assert_eq!(progress.base_score_per_food(), 14);
    assert_eq!(progress.required_foods(), 9);
}
