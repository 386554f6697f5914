//! Snake body, heading, and collision rules.

use snake_arcade_core::{
    Collision, Direction, GridCoord, GridSize, SnakeSnapshot, MIN_SNAKE_LENGTH,
};

/// Ordered body of the snake, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<GridCoord>,
    heading: Direction,
    pending_heading: Direction,
    capacity: usize,
}

impl Snake {
    /// Creates a snake in its starting position on the provided grid.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        let mut snake = Self {
            segments: Vec::with_capacity(MIN_SNAKE_LENGTH),
            heading: Direction::Right,
            pending_heading: Direction::Right,
            capacity: grid.cell_count(),
        };
        snake.init(grid);
        snake
    }

    /// Builds a snake from explicit segments, head first.
    ///
    /// Returns `None` when the body is shorter than the minimum length or does
    /// not fit on the grid.
    #[must_use]
    pub fn from_segments(
        segments: Vec<GridCoord>,
        heading: Direction,
        grid: GridSize,
    ) -> Option<Self> {
        let capacity = grid.cell_count();
        if segments.len() < MIN_SNAKE_LENGTH || segments.len() > capacity {
            return None;
        }
        Some(Self {
            segments,
            heading,
            pending_heading: heading,
            capacity,
        })
    }

    /// Resets the snake to three segments centred on the grid, heading right.
    pub fn init(&mut self, grid: GridSize) {
        let center = grid.center();
        self.capacity = grid.cell_count();
        self.segments.clear();
        self.segments.extend((0..MIN_SNAKE_LENGTH as i32).map(|offset| {
            GridCoord::new(center.x() - offset, center.y())
        }));
        self.heading = Direction::Right;
        self.pending_heading = Direction::Right;
    }

    /// Occupied cells, head first.
    #[must_use]
    pub fn segments(&self) -> &[GridCoord] {
        &self.segments
    }

    /// Cell occupied by the head.
    #[must_use]
    pub fn head(&self) -> GridCoord {
        self.segments[0]
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; a snake never has fewer than three segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Heading used by the last step.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Heading the next step will take.
    #[must_use]
    pub const fn pending_heading(&self) -> Direction {
        self.pending_heading
    }

    /// Reports whether any segment covers `cell`.
    #[must_use]
    pub fn occupies(&self, cell: GridCoord) -> bool {
        self.segments.contains(&cell)
    }

    /// Queues a turn for the next step.
    ///
    /// A request for the opposite of the current heading is dropped so the
    /// head cannot fold back onto the neck. Returns whether the request was kept.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if requested == self.heading.opposite() {
            return false;
        }
        self.pending_heading = requested;
        true
    }

    /// Commits the pending heading and moves every segment one cell forward.
    pub fn advance(&mut self) {
        self.heading = self.pending_heading;
        let next_head = self.head().step(self.heading);
        let len = self.segments.len();
        self.segments.copy_within(..len - 1, 1);
        self.segments[0] = next_head;
    }

    /// Checks the head against the walls and the rest of the body.
    ///
    /// With `phase_active` the head wraps to the opposite edge instead of
    /// hitting the wall. The body check runs after any wrap.
    pub fn check_collision(&mut self, grid: GridSize, phase_active: bool) -> Option<Collision> {
        let head = self.head();
        if !grid.contains(head) {
            if !phase_active {
                return Some(Collision::Wall);
            }
            self.segments[0] = grid.wrap(head);
        }

        let head = self.head();
        if self.segments[1..].contains(&head) {
            Some(Collision::SelfBite)
        } else {
            None
        }
    }

    /// Duplicates the tail segment, unless the snake already fills the grid.
    pub fn grow(&mut self) {
        if self.segments.len() >= self.capacity {
            return;
        }
        let tail = self.segments[self.segments.len() - 1];
        self.segments.push(tail);
    }

    /// Removes up to `amount` tail segments without going below three.
    pub fn shrink(&mut self, amount: usize) {
        let target = self
            .segments
            .len()
            .saturating_sub(amount)
            .max(MIN_SNAKE_LENGTH);
        self.segments.truncate(target);
    }

    /// Captures the snake for queries.
    #[must_use]
    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            segments: self.segments.clone(),
            heading: self.heading,
            pending_heading: self.pending_heading,
        }
    }
}
