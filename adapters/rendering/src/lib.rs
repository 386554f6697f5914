#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake Arcade adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use snake_arcade_core::{Difficulty, Direction, FoodType, PowerUpKind};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Palette shared by every backend.
pub mod palette {
    use super::Color;

    /// Window clear color.
    pub const BACKGROUND: Color = Color::from_rgb_u8(20, 20, 35);
    /// Faint grid lines drawn over the play field.
    pub const GRID_LINES: Color = Color::new(1.0, 1.0, 1.0, 0.04);
    /// Default head color.
    pub const HEAD: Color = Color::from_rgb_u8(100, 255, 100);
    /// Head color while the speed boost is active.
    pub const HEAD_SPEED: Color = Color::from_rgb_u8(255, 255, 100);
    /// Head color while phase mode is active.
    pub const HEAD_PHASE: Color = Color::from_rgb_u8(200, 100, 255);
    /// Outline drawn around each segment.
    pub const SEGMENT_BORDER: Color = Color::from_rgb_u8(0, 100, 0);
    /// Primary text color.
    pub const TEXT: Color = Color::from_rgb_u8(255, 255, 255);
    /// Secondary text color.
    pub const TEXT_DIM: Color = Color::from_rgb_u8(200, 200, 200);
    /// Highlight for combos and notable results.
    pub const HIGHLIGHT: Color = Color::from_rgb_u8(255, 255, 0);
    /// Achievement announcements.
    pub const GOLD: Color = Color::from_rgb_u8(255, 215, 0);
    /// Game over headline.
    pub const ALERT: Color = Color::from_rgb_u8(255, 100, 100);
    /// Dimming layer drawn below overlays.
    pub const SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.7);
}

/// Color used to draw a food of the given type.
#[must_use]
pub const fn food_color(kind: FoodType) -> Color {
    match kind {
        FoodType::Normal => Color::from_rgb_u8(0, 255, 0),
        FoodType::Speed => Color::from_rgb_u8(255, 255, 0),
        FoodType::Double => Color::from_rgb_u8(0, 255, 255),
        FoodType::Golden => Color::from_rgb_u8(255, 215, 0),
        FoodType::Shrink => Color::from_rgb_u8(255, 0, 255),
        FoodType::Phase => Color::from_rgb_u8(128, 0, 255),
        FoodType::Mega => Color::from_rgb_u8(255, 100, 100),
    }
}

/// Color of the head given the active movement power-ups.
#[must_use]
pub const fn head_color(speed_active: bool, phase_active: bool) -> Color {
    if speed_active {
        palette::HEAD_SPEED
    } else if phase_active {
        palette::HEAD_PHASE
    } else {
        palette::HEAD
    }
}

/// Color of the body segment at `index` in a snake of `length` segments.
///
/// Segments fade from bright to half-intensity green toward the tail.
#[must_use]
pub fn body_color(index: usize, length: usize) -> Color {
    let ratio = if length == 0 {
        0.0
    } else {
        index as f32 / length as f32
    };
    let green = (1.0 - ratio * 0.5).clamp(0.5, 1.0);
    Color::new(50.0 / 255.0, green, 50.0 / 255.0, 1.0)
}

/// Scale applied to the food square to make it pulse over time.
#[must_use]
pub fn pulse_scale(elapsed: Duration) -> f32 {
    const RADIANS_PER_SECOND: f32 = 6.0;
    const AMPLITUDE: f32 = 0.2;
    1.0 + AMPLITUDE * (elapsed.as_secs_f32() * RADIANS_PER_SECOND).sin()
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Heading requested on this frame, if any.
    pub direction: Option<Direction>,
    /// Whether the pause toggle was pressed.
    pub pause_toggle: bool,
    /// Whether the confirm key was pressed.
    pub confirm: bool,
    /// Whether the restart key was pressed.
    pub restart: bool,
    /// Difficulty picked on this frame, if any.
    pub difficulty: Option<Difficulty>,
    /// Whether the player asked to quit.
    pub quit: bool,
}

impl FrameInput {
    /// Returns `true` when no input was captured.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

/// Describes the cell grid of the play field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Side length of a single cell in pixels.
    pub cell_length: f32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl GridPresentation {
    /// Cell side length matching the classic 800x600 layout.
    pub const DEFAULT_CELL_LENGTH: f32 = 20.0;

    /// Creates a new grid descriptor.
    ///
    /// Returns an error when `cell_length` is not a positive, finite number.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        line_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
            line_color,
        })
    }

    /// Total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Top-left corner of the cell at `column`, `row`.
    #[must_use]
    pub fn cell_origin(&self, column: i32, row: i32) -> Vec2 {
        Vec2::new(column as f32, row as f32) * self.cell_length
    }

    /// Rectangle of a cell scaled around its centre.
    #[must_use]
    pub fn scaled_cell(&self, column: i32, row: i32, scale: f32) -> ScreenRect {
        let size = Vec2::splat(self.cell_length * scale);
        let centre = self.cell_origin(column, row) + Vec2::splat(self.cell_length * 0.5);
        ScreenRect {
            origin: centre - size * 0.5,
            size,
        }
    }
}

/// A single snake segment ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentPresentation {
    /// Column of the segment.
    pub column: i32,
    /// Row of the segment.
    pub row: i32,
    /// Fill color.
    pub color: Color,
    /// Whether the segment is the head.
    pub is_head: bool,
}

/// The food item ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodPresentation {
    /// Column of the food.
    pub column: i32,
    /// Row of the food.
    pub row: i32,
    /// Type of the food.
    pub kind: FoodType,
    /// Fill color.
    pub color: Color,
    /// Scale applied around the cell centre.
    pub scale: f32,
}

/// A line of text with its color.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Text to draw.
    pub text: String,
    /// Color of the text.
    pub color: Color,
}

impl TextLine {
    /// Creates a new text line.
    #[must_use]
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// A running power-up shown in the side panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUpIndicator {
    /// Power-up that is running.
    pub kind: PowerUpKind,
    /// Time left before it lapses.
    pub remaining: Duration,
}

impl PowerUpIndicator {
    fn line(&self) -> TextLine {
        let (label, color) = match self.kind {
            PowerUpKind::Speed => ("SPEED BOOST", food_color(FoodType::Speed)),
            PowerUpKind::DoubleScore => ("DOUBLE SCORE", food_color(FoodType::Double)),
            PowerUpKind::Phase => ("PHASE MODE", Color::from_rgb_u8(255, 0, 255)),
        };
        TextLine::new(
            format!("{label} {:.1}s", self.remaining.as_secs_f32()),
            color,
        )
    }
}

/// Heads-up display drawn in the side panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudPresentation {
    /// Current score.
    pub score: u64,
    /// Best score known.
    pub high_score: u64,
    /// Current level.
    pub level: u32,
    /// Foods eaten during the current level.
    pub level_foods: u32,
    /// Foods needed to finish the current level.
    pub required_foods: u32,
    /// Length of the snake.
    pub length: usize,
    /// Combo multiplier, shown when above one.
    pub combo_multiplier: u32,
    /// Difficulty of the session.
    pub difficulty: Difficulty,
    /// Play time of the current game.
    pub elapsed: Duration,
    /// Running power-ups.
    pub power_ups: Vec<PowerUpIndicator>,
}

impl HudPresentation {
    /// Text lines of the side panel, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<TextLine> {
        let mut lines = vec![
            TextLine::new(format!("Score: {}", self.score), palette::TEXT),
            TextLine::new(format!("Best: {}", self.high_score), palette::TEXT_DIM),
            TextLine::new(format!("Level: {}", self.level), palette::TEXT),
            TextLine::new(
                format!("Progress: {}/{}", self.level_foods, self.required_foods),
                Color::from_rgb_u8(200, 200, 255),
            ),
            TextLine::new(
                format!("Length: {}", self.length),
                Color::from_rgb_u8(200, 255, 200),
            ),
        ];
        if self.combo_multiplier > 1 {
            lines.push(TextLine::new(
                format!("Combo x{}", self.combo_multiplier),
                palette::HIGHLIGHT,
            ));
        }
        lines.extend(self.power_ups.iter().map(PowerUpIndicator::line));

        let seconds = self.elapsed.as_secs();
        lines.push(TextLine::new(
            format!("Time: {}:{:02}", seconds / 60, seconds % 60),
            Color::from_rgb_u8(200, 255, 200),
        ));
        lines.push(TextLine::new(
            format!("{:?}", self.difficulty),
            palette::TEXT_DIM,
        ));
        lines
    }
}

/// Full-screen message drawn over the play field.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    /// Title screen with the difficulty selection.
    Menu {
        /// Currently selected difficulty.
        difficulty: Difficulty,
        /// Best score known.
        high_score: u64,
    },
    /// The game is paused.
    Paused,
    /// The last game ended.
    GameOver {
        /// Final score.
        score: u64,
        /// Level reached.
        level: u32,
        /// Final snake length.
        length: usize,
        /// Whether the score is a new best.
        new_high_score: bool,
        /// Total games finished.
        games_played: u64,
        /// Achievements unlocked by the game.
        unlocked: Vec<String>,
        /// Achievements unlocked over all games.
        achievements_unlocked: usize,
        /// Size of the achievement catalogue.
        achievements_total: usize,
        /// Locked achievement closest to completion.
        next_achievement: Option<AchievementGoal>,
    },
}

/// Locked achievement shown as the next goal.
#[derive(Clone, Debug, PartialEq)]
pub struct AchievementGoal {
    /// Name of the achievement.
    pub name: String,
    /// Completion in percent.
    pub percent: f32,
}

impl Overlay {
    /// Text lines of the overlay, top to bottom. The first line is the headline.
    #[must_use]
    pub fn lines(&self) -> Vec<TextLine> {
        match self {
            Self::Menu {
                difficulty,
                high_score,
            } => {
                let mut lines = vec![
                    TextLine::new(snake_arcade_core::GAME_TITLE, palette::HIGHLIGHT),
                    TextLine::new("Select difficulty:", palette::TEXT),
                ];
                for (key, option) in [
                    (1, Difficulty::Easy),
                    (2, Difficulty::Normal),
                    (3, Difficulty::Hard),
                ] {
                    let color = if option == *difficulty {
                        palette::HIGHLIGHT
                    } else {
                        palette::TEXT_DIM
                    };
                    lines.push(TextLine::new(format!("{key}. {option:?}"), color));
                }
                lines.push(TextLine::new("Press SPACE to start", palette::TEXT));
                lines.push(TextLine::new(
                    format!("High score: {high_score}"),
                    palette::TEXT_DIM,
                ));
                lines
            }
            Self::Paused => vec![TextLine::new(
                "PAUSED - Press P to continue",
                palette::HIGHLIGHT,
            )],
            Self::GameOver {
                score,
                level,
                length,
                new_high_score,
                games_played,
                unlocked,
                achievements_unlocked,
                achievements_total,
                next_achievement,
            } => {
                let mut lines = vec![
                    TextLine::new("GAME OVER", palette::ALERT),
                    TextLine::new(format!("Final score: {score}"), palette::TEXT),
                    TextLine::new(format!("Level reached: {level}"), palette::TEXT),
                    TextLine::new(format!("Length: {length}"), palette::TEXT),
                    TextLine::new(
                        format!("Games played: {games_played}"),
                        palette::TEXT_DIM,
                    ),
                    TextLine::new(
                        format!("Achievements: {achievements_unlocked}/{achievements_total}"),
                        palette::TEXT_DIM,
                    ),
                ];
                if let Some(goal) = next_achievement {
                    lines.push(TextLine::new(
                        format!("Next: {} ({:.0}%)", goal.name, goal.percent),
                        palette::TEXT_DIM,
                    ));
                }
                lines.extend(
                    unlocked
                        .iter()
                        .map(|name| TextLine::new(format!("Achievement: {name}"), palette::GOLD)),
                );
                if *new_high_score {
                    lines.push(TextLine::new("NEW HIGH SCORE!", palette::HIGHLIGHT));
                }
                lines.push(TextLine::new(
                    "SPACE for menu, R to restart",
                    palette::TEXT_DIM,
                ));
                lines
            }
        }
    }
}

/// Scene description combining the grid, the snake, the food and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play field.
    pub grid: GridPresentation,
    /// Snake segments, head first.
    pub snake: Vec<SegmentPresentation>,
    /// Food item, when one is active.
    pub food: Option<FoodPresentation>,
    /// Side panel contents.
    pub hud: HudPresentation,
    /// Message drawn over the play field.
    pub overlay: Option<Overlay>,
}

impl Scene {
    /// Width of the side panel to the right of the play field.
    pub const SIDE_PANEL_WIDTH: f32 = 220.0;

    /// Creates an empty scene for the provided grid.
    #[must_use]
    pub fn new(grid: GridPresentation) -> Self {
        Self {
            grid,
            snake: Vec::new(),
            food: None,
            hud: HudPresentation::default(),
            overlay: None,
        }
    }

    /// Width of the entire scene including the side panel.
    #[must_use]
    pub fn total_width(&self) -> f32 {
        self.grid.width() + Self::SIDE_PANEL_WIDTH
    }

    /// Height of the entire scene.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.grid.height()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Snake Arcade scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, mutates the scene, and returns whether
    /// the backend should keep running.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive, finite side length.
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}
