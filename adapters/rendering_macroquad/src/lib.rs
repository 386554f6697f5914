#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake Arcade.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use log::info;
use macroquad::input::{is_key_pressed, KeyCode};
use snake_arcade_core::{Difficulty, Direction};
use snake_arcade_rendering::{
    palette, Color, FoodPresentation, FrameInput, GridPresentation, Presentation,
    RenderingBackend, Scene, ScreenRect, SegmentPresentation, TextLine,
};
use std::time::Duration;

const HUD_FONT_SIZE: f32 = 22.0;
const HUD_LINE_SPACING: f32 = 28.0;
const OVERLAY_FONT_SIZE: f32 = 26.0;
const HEADLINE_FONT_SIZE: f32 = 44.0;
const OVERLAY_LINE_SPACING: f32 = 34.0;
const PANEL_MARGIN: f32 = 20.0;

/// Keys observed on a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyObservations {
    /// `Up` or `W`.
    up: bool,
    /// `Down` or `S`.
    down: bool,
    /// `Left` or `A`.
    left: bool,
    /// `Right` or `D`.
    right: bool,
    /// `P` or `Escape`.
    pause: bool,
    /// `Space` or `Enter`.
    confirm: bool,
    /// `R`.
    restart: bool,
    /// `1`, `2` or `3`.
    difficulty: Option<Difficulty>,
    /// `Q`.
    quit: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        let difficulty = if is_key_pressed(KeyCode::Key1) {
            Some(Difficulty::Easy)
        } else if is_key_pressed(KeyCode::Key2) {
            Some(Difficulty::Normal)
        } else if is_key_pressed(KeyCode::Key3) {
            Some(Difficulty::Hard)
        } else {
            None
        };

        Self {
            up: is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
            down: is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
            left: is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            right: is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
            pause: is_key_pressed(KeyCode::P) || is_key_pressed(KeyCode::Escape),
            confirm: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
            restart: is_key_pressed(KeyCode::R),
            difficulty,
            quit: is_key_pressed(KeyCode::Q),
        }
    }
}

fn gather_frame_input_from_observations(keys: KeyObservations) -> FrameInput {
    // One heading per frame; vertical keys win ties.
    let direction = if keys.up {
        Some(Direction::Up)
    } else if keys.down {
        Some(Direction::Down)
    } else if keys.left {
        Some(Direction::Left)
    } else if keys.right {
        Some(Direction::Right)
    } else {
        None
    };

    FrameInput {
        direction,
        pause_toggle: keys.pause,
        confirm: keys.confirm,
        restart: keys.restart,
        difficulty: keys.difficulty,
        quit: keys.quit,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a frame and returns the average rate once a full second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.total_width().round() as i32,
            window_height: scene.total_height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let frame_input = gather_frame_input_from_observations(KeyObservations::poll());
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                if !update_scene(frame_dt, frame_input, &mut scene) {
                    break;
                }

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_grid_lines(&scene, &metrics);
                if let Some(food) = scene.food {
                    draw_food(&scene.grid, food, &metrics);
                }
                draw_snake(&scene.grid, &scene.snake, &metrics);
                draw_hud(&scene.hud.lines(), &metrics);
                if let Some(overlay) = &scene.overlay {
                    draw_overlay(&overlay.lines(), &metrics);
                }

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        info!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Placement of the scene on the current screen.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
    cell_step: f32,
    grid_size: Vec2,
    panel_origin: Vec2,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world_width = scene.total_width();
        let world_height = scene.total_height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        let offset = Vec2::new(
            ((screen_width - world_width * scale) * 0.5).max(0.0),
            ((screen_height - world_height * scale) * 0.5).max(0.0),
        );
        let grid_size = Vec2::new(scene.grid.width(), scene.grid.height()) * scale;

        Self {
            scale,
            offset,
            cell_step: scene.grid.cell_length * scale,
            grid_size,
            panel_origin: offset + Vec2::new(grid_size.x, 0.0),
        }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    fn rect_to_screen(&self, rect: ScreenRect) -> ScreenRect {
        ScreenRect {
            origin: self.to_screen(rect.origin),
            size: rect.size * self.scale,
        }
    }

    fn grid_centre(&self) -> Vec2 {
        self.offset + self.grid_size * 0.5
    }
}

fn draw_grid_lines(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(scene.grid.line_color);
    for column in 0..=scene.grid.columns {
        let x = metrics.offset.x + column as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            x,
            metrics.offset.y,
            x,
            metrics.offset.y + metrics.grid_size.y,
            1.0,
            color,
        );
    }
    for row in 0..=scene.grid.rows {
        let y = metrics.offset.y + row as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            metrics.offset.x,
            y,
            metrics.offset.x + metrics.grid_size.x,
            y,
            1.0,
            color,
        );
    }
}

fn draw_snake(
    grid: &GridPresentation,
    segments: &[SegmentPresentation],
    metrics: &SceneMetrics,
) {
    let border = to_macroquad_color(palette::SEGMENT_BORDER);
    let eye = macroquad::color::BLACK;
    // Tail first so the head is drawn on top when segments overlap after growth.
    for segment in segments.iter().rev() {
        let origin = metrics.to_screen(grid.cell_origin(segment.column, segment.row));
        let step = metrics.cell_step;
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            step,
            step,
            to_macroquad_color(segment.color),
        );
        macroquad::shapes::draw_rectangle_lines(origin.x, origin.y, step, step, 1.0, border);

        if segment.is_head {
            let eye_size = step * 0.2;
            let inset = step * 0.1;
            macroquad::shapes::draw_rectangle(
                origin.x + inset,
                origin.y + inset,
                eye_size,
                eye_size,
                eye,
            );
            macroquad::shapes::draw_rectangle(
                origin.x + step - inset - eye_size,
                origin.y + inset,
                eye_size,
                eye_size,
                eye,
            );
        }
    }
}

fn draw_food(grid: &GridPresentation, food: FoodPresentation, metrics: &SceneMetrics) {
    let rect = metrics.rect_to_screen(grid.scaled_cell(food.column, food.row, food.scale));
    let (origin, size) = (rect.origin, rect.size.x);
    let glow = 2.0 * metrics.scale;

    macroquad::shapes::draw_rectangle(
        origin.x - glow,
        origin.y - glow,
        size + glow * 2.0,
        size + glow * 2.0,
        to_macroquad_color(food.color.with_alpha(0.2)),
    );
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        size,
        size,
        to_macroquad_color(food.color),
    );
}

fn draw_hud(lines: &[TextLine], metrics: &SceneMetrics) {
    let x = metrics.panel_origin.x + PANEL_MARGIN * metrics.scale;
    let mut y = metrics.panel_origin.y + (PANEL_MARGIN + HUD_FONT_SIZE) * metrics.scale;
    for line in lines {
        draw_label(&line.text, x, y, HUD_FONT_SIZE * metrics.scale, line.color);
        y += HUD_LINE_SPACING * metrics.scale;
    }
}

fn draw_overlay(lines: &[TextLine], metrics: &SceneMetrics) {
    macroquad::shapes::draw_rectangle(
        metrics.offset.x,
        metrics.offset.y,
        metrics.grid_size.x,
        metrics.grid_size.y,
        to_macroquad_color(palette::SHADE),
    );

    let spacing = OVERLAY_LINE_SPACING * metrics.scale;
    let block_height = spacing * lines.len() as f32;
    let centre = metrics.grid_centre();
    let mut y = centre.y - block_height * 0.5 + spacing;

    for (index, line) in lines.iter().enumerate() {
        let font_size = if index == 0 {
            HEADLINE_FONT_SIZE
        } else {
            OVERLAY_FONT_SIZE
        } * metrics.scale;
        let width = macroquad::text::measure_text(&line.text, None, font_size as u16, 1.0).width;
        draw_label(&line.text, centre.x - width * 0.5, y, font_size, line.color);
        y += spacing;
    }
}

#[allow(unused_results)] // newer macroquad releases return the drawn text dimensions
fn draw_label(text: &str, x: f32, y: f32, font_size: f32, color: Color) {
    macroquad::text::draw_text(text, x, y, font_size, to_macroquad_color(color));
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
