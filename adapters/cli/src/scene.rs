//! Converts world queries into the renderer's scene description.

use snake_arcade_core::{GridSize, Lifecycle, PowerUpKind};
use snake_arcade_rendering::{
    body_color, food_color, head_color, palette, pulse_scale, AchievementGoal,
    FoodPresentation, GridPresentation, HudPresentation, Overlay, PowerUpIndicator,
    RenderingError, Scene, SegmentPresentation,
};
use snake_arcade_system_achievements::{Achievements, CATALOGUE};
use snake_arcade_world::{query, World};

use crate::session::LastGame;

/// Builds an empty scene sized for `grid`.
pub(crate) fn empty_scene(grid: GridSize) -> Result<Scene, RenderingError> {
    let grid = GridPresentation::new(
        grid.width(),
        grid.height(),
        GridPresentation::DEFAULT_CELL_LENGTH,
        palette::GRID_LINES,
    )?;
    Ok(Scene::new(grid))
}

/// Rewrites the dynamic parts of `scene` from the current world state.
pub(crate) fn populate(
    scene: &mut Scene,
    world: &World,
    achievements: &Achievements,
    last_game: Option<&LastGame>,
) {
    let snake = query::snake(world);
    let power_ups = query::power_ups(world);
    let level = query::level(world);
    let head = head_color(
        power_ups.is_active(PowerUpKind::Speed),
        power_ups.is_active(PowerUpKind::Phase),
    );

    scene.snake.clear();
    scene
        .snake
        .extend(snake.segments.iter().enumerate().map(|(index, cell)| {
            SegmentPresentation {
                column: cell.x(),
                row: cell.y(),
                color: if index == 0 {
                    head
                } else {
                    body_color(index, snake.len())
                },
                is_head: index == 0,
            }
        }));

    let food = query::food(world);
    scene.food = food.active.then(|| FoodPresentation {
        column: food.cell.x(),
        row: food.cell.y(),
        kind: food.kind,
        color: food_color(food.kind),
        scale: pulse_scale(query::clock(world).saturating_sub(food.spawned_at)),
    });

    scene.hud = HudPresentation {
        score: query::score(world),
        high_score: query::high_score(world),
        level: level.level,
        level_foods: level.foods_eaten,
        required_foods: level.required_foods,
        length: snake.len(),
        combo_multiplier: power_ups.combo_multiplier,
        difficulty: query::difficulty(world),
        elapsed: query::elapsed(world),
        power_ups: power_ups
            .statuses
            .iter()
            .filter(|status| status.active)
            .map(|status| PowerUpIndicator {
                kind: status.kind,
                remaining: status.remaining,
            })
            .collect(),
    };

    scene.overlay = match query::lifecycle(world) {
        Lifecycle::Menu => Some(Overlay::Menu {
            difficulty: query::difficulty(world),
            high_score: query::high_score(world),
        }),
        Lifecycle::Playing => None,
        Lifecycle::Paused => Some(Overlay::Paused),
        Lifecycle::GameOver => last_game.map(|last| Overlay::GameOver {
            score: last.summary.score,
            level: last.summary.level,
            length: last.summary.length,
            new_high_score: last.summary.new_high_score,
            games_played: achievements.stats().games_played,
            unlocked: last.unlocked.clone(),
            achievements_unlocked: achievements.unlocked_count(),
            achievements_total: CATALOGUE.len(),
            next_achievement: next_goal(achievements),
        }),
    };
}

/// Locked achievement with the highest completion, earliest in the catalogue on ties.
fn next_goal(achievements: &Achievements) -> Option<AchievementGoal> {
    achievements
        .statuses()
        .filter(|status| !status.progress.unlocked)
        .map(|status| (status.def.name, status.percent()))
        .fold(None, |best: Option<(&str, f32)>, (name, percent)| match best {
            Some((_, best_percent)) if best_percent >= percent => best,
            _ => Some((name, percent)),
        })
        .map(|(name, percent)| AchievementGoal {
            name: name.to_owned(),
            percent,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use snake_arcade_core::{Collision, Command, Event, GameSummary};
    use snake_arcade_system_achievements::{AchievementProgress, GameStats};
    use snake_arcade_world::{apply, Config};

    fn world() -> World {
        World::new(Config::new(GridSize::new(12, 8).expect("valid grid"), 3))
    }

    #[test]
    fn empty_scene_matches_grid_dimensions() {
        let scene = empty_scene(GridSize::new(12, 8).expect("valid grid")).expect("scene");
        assert_eq!(scene.grid.columns, 12);
        assert_eq!(scene.grid.rows, 8);
        assert_eq!(scene.total_width(), 12.0 * 20.0 + Scene::SIDE_PANEL_WIDTH);
        assert!(scene.snake.is_empty());
    }

    #[test]
    fn playing_world_draws_head_first_without_overlay() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::Confirm, &mut events);

        let mut scene = empty_scene(query::grid_size(&world)).expect("scene");
        populate(&mut scene, &world, &Achievements::new(), None);

        assert_eq!(scene.snake.len(), 3);
        assert!(scene.snake[0].is_head);
        assert_eq!((scene.snake[0].column, scene.snake[0].row), (6, 4));
        assert_eq!(scene.snake[0].color, palette::HEAD);
        assert!(scene.snake[1..].iter().all(|segment| !segment.is_head));
        assert!(scene.food.is_some());
        assert_eq!(scene.overlay, None);
        assert_eq!(scene.hud.length, 3);
        assert_eq!(scene.hud.required_foods, 5);
        assert!(scene.hud.power_ups.is_empty());
    }

    #[test]
    fn paused_world_shows_pause_overlay() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::Confirm, &mut events);
        apply(&mut world, Command::TogglePause, &mut events);

        let mut scene = empty_scene(query::grid_size(&world)).expect("scene");
        populate(&mut scene, &world, &Achievements::new(), None);
        assert_eq!(scene.overlay, Some(Overlay::Paused));
    }

    #[test]
    fn next_goal_picks_the_closest_locked_achievement() {
        let mut achievements = Achievements::restore(
            GameStats {
                games_played: 8,
                max_length: 5,
                ..GameStats::default()
            },
            &[],
        );
        // Progress is refreshed when the next game is recorded.
        let mut unlocked = Vec::new();
        achievements.handle(
            &[Event::GameOver {
                summary: GameSummary {
                    cause: Collision::Wall,
                    score: 0,
                    new_high_score: false,
                    level: 1,
                    length: 3,
                    foods_eaten: 0,
                    special_foods_eaten: 0,
                    best_combo: 0,
                    duration: Duration::ZERO,
                },
            }],
            &mut unlocked,
        );
        assert!(unlocked.is_empty());

        let goal = next_goal(&achievements).expect("locked achievements remain");
        assert_eq!(goal.name, "Persistent");
        assert!((goal.percent - 90.0).abs() < 1e-4);
    }

    #[test]
    fn next_goal_is_none_when_everything_is_unlocked() {
        let saved: Vec<_> = CATALOGUE
            .iter()
            .map(|def| AchievementProgress {
                name: def.name.to_owned(),
                unlocked: true,
                progress: def.target,
            })
            .collect();
        let achievements = Achievements::restore(GameStats::default(), &saved);
        assert_eq!(achievements.unlocked_count(), CATALOGUE.len());
        assert_eq!(next_goal(&achievements), None);
    }
}
