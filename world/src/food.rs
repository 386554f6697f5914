//! Food placement and consumption.

use std::{collections::HashSet, time::Duration};

use snake_arcade_core::{FoodSnapshot, FoodType, GridCoord, GridSize, RandomSource};

use crate::snake::Snake;

/// The single food item on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    cell: GridCoord,
    kind: FoodType,
    active: bool,
    spawned_at: Duration,
}

impl Food {
    /// Creates an inactive food item awaiting its first spawn.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: GridCoord::new(0, 0),
            kind: FoodType::Normal,
            active: false,
            spawned_at: Duration::ZERO,
        }
    }

    /// Places the food on a uniformly drawn cell the snake does not cover.
    ///
    /// Draws are rejected and repeated until a free cell comes up. When the
    /// snake covers the whole grid the food stays inactive and `false` is
    /// returned.
    pub fn spawn(
        &mut self,
        grid: GridSize,
        snake: &Snake,
        random: &mut dyn RandomSource,
        now: Duration,
    ) -> bool {
        let occupied: HashSet<GridCoord> = snake.segments().iter().copied().collect();
        if occupied.len() >= grid.cell_count() {
            self.active = false;
            return false;
        }

        loop {
            let cell = draw_cell(grid, random);
            if !occupied.contains(&cell) {
                self.cell = cell;
                self.active = true;
                self.spawned_at = now;
                return true;
            }
        }
    }

    /// Rolls a fresh type for the food from the probability table.
    pub fn select_type(&mut self, random: &mut dyn RandomSource) -> FoodType {
        self.kind = FoodType::roll(random);
        self.kind
    }

    /// Consumes the food when the head lands on it.
    ///
    /// Inactive food is never eaten and is left untouched.
    pub fn check_collision(&mut self, head: GridCoord) -> bool {
        if !self.active || head != self.cell {
            return false;
        }
        self.active = false;
        true
    }

    /// Cell the food occupies.
    #[must_use]
    pub const fn cell(&self) -> GridCoord {
        self.cell
    }

    /// Type of the food.
    #[must_use]
    pub const fn kind(&self) -> FoodType {
        self.kind
    }

    /// Whether the food is waiting to be eaten.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Captures the food for queries.
    #[must_use]
    pub const fn snapshot(&self) -> FoodSnapshot {
        FoodSnapshot {
            cell: self.cell,
            kind: self.kind,
            active: self.active,
            spawned_at: self.spawned_at,
        }
    }
}

impl Default for Food {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_cell(grid: GridSize, random: &mut dyn RandomSource) -> GridCoord {
    let x = random.below(grid.width());
    let y = random.below(grid.height());
    GridCoord::new(
        i32::try_from(x).unwrap_or(i32::MAX),
        i32::try_from(y).unwrap_or(i32::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arcade_core::Direction;

    #[derive(Debug)]
    struct Cycle {
        values: Vec<u32>,
        index: usize,
    }

    impl RandomSource for Cycle {
        fn below(&mut self, bound: u32) -> u32 {
            let value = self.values[self.index % self.values.len()];
            self.index += 1;
            value % bound
        }
    }

    #[test]
    fn spawn_rejects_cells_under_the_snake() {
        let grid = GridSize::new(10, 10).expect("valid grid");
        let snake = Snake::new(grid);
        let mut food = Food::new();
        // First draw lands on the head at (5, 5), second on a free cell.
        let mut random = Cycle {
            values: vec![5, 5, 1, 2],
            index: 0,
        };

        assert!(food.spawn(grid, &snake, &mut random, Duration::from_secs(2)));
        assert_eq!(food.cell(), GridCoord::new(1, 2));
        assert!(food.is_active());
        assert_eq!(food.snapshot().spawned_at, Duration::from_secs(2));
    }

    #[test]
    fn spawn_gives_up_when_grid_is_covered() {
        let grid = GridSize::new(3, 3).expect("valid grid");
        let body = vec![
            GridCoord::new(0, 0),
            GridCoord::new(1, 0),
            GridCoord::new(2, 0),
            GridCoord::new(2, 1),
            GridCoord::new(1, 1),
            GridCoord::new(0, 1),
            GridCoord::new(0, 2),
            GridCoord::new(1, 2),
            GridCoord::new(2, 2),
        ];
        let snake = Snake::from_segments(body, Direction::Left, grid).expect("fits grid");
        let mut food = Food::new();
        let mut random = Cycle {
            values: vec![0],
            index: 0,
        };

        assert!(!food.spawn(grid, &snake, &mut random, Duration::ZERO));
        assert!(!food.is_active());
    }

    #[test]
    fn inactive_food_is_never_eaten() {
        let mut food = Food::new();
        assert!(!food.check_collision(GridCoord::new(0, 0)));
        assert!(!food.is_active());
    }
}
