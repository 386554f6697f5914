use std::time::Duration;

use snake_arcade_core::{Command, Difficulty, Direction, Event, GridSize, Lifecycle};
use snake_arcade_world::{apply, query, Config, World};

const TURNS: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

fn replay(seed: u64) -> (Vec<Event>, u64, Vec<snake_arcade_core::GridCoord>) {
    let grid = GridSize::new(24, 16).expect("valid grid");
    let mut world = World::new(Config::new(grid, seed));
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::SelectDifficulty {
            difficulty: Difficulty::Hard,
        },
        &mut events,
    );
    apply(&mut world, Command::Confirm, &mut events);

    for step in 0..2_000_usize {
        if step % 5 == 0 {
            apply(
                &mut world,
                Command::RequestDirection {
                    direction: TURNS[(step / 5) % TURNS.len()],
                },
                &mut events,
            );
        }
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(50),
            },
            &mut events,
        );
        if query::lifecycle(&world) == Lifecycle::GameOver {
            apply(&mut world, Command::Restart, &mut events);
        }
    }

    (events, query::high_score(&world), query::snake(&world).segments)
}

#[test]
fn identical_seeds_replay_identically() {
    let first = replay(0xDEAD_BEEF);
    let second = replay(0xDEAD_BEEF);
    assert_eq!(first, second);
    assert!(first
        .0
        .iter()
        .any(|event| matches!(event, Event::SnakeAdvanced { .. })));
}

#[test]
fn seeds_change_food_placement() {
    let grid = GridSize::DEFAULT;
    let cells: Vec<_> = (0..8)
        .map(|seed| query::food(&World::new(Config::new(grid, seed))).cell)
        .collect();
    assert!(cells.iter().any(|cell| *cell != cells[0]));
}
