#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Tiger Run.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The score panel uses Macroquad's immediate-mode UI module. All UI-specific
//! calls live inside the local `ui` module to avoid leaking Macroquad UI types
//! throughout the renderer.

mod ui;

use self::ui::{draw_hud_ui, HudUiContext};
use anyhow::Result;
use glam::Vec2;
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::{
    color::BLACK,
    input::{is_key_pressed, KeyCode},
};
use std::time::Duration;
use tiger_run_core::{CellCoord, CellKind, Direction, GamePhase};
use tiger_run_rendering::{
    facing_vector, FrameInput, GridPresentation, Palette, Presentation, RenderingBackend, Scene,
};

const START_PROMPT: &str = "Press Enter to start.";
const RESTART_PROMPT: &str = "Press Enter to play again.";

/// Keyboard state sampled once per frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardShortcuts {
    /// Whether the player asked to close the window.
    pub quit_requested: bool,
    /// Whether the player asked to start or restart a session.
    pub start_requested: bool,
    /// Direction pressed on this frame; the first match in `Direction::ALL` order wins.
    pub direction: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self::from_pressed(is_key_pressed)
    }

    /// Builds the shortcut state from a key predicate.
    #[must_use]
    pub fn from_pressed<F>(pressed: F) -> Self
    where
        F: Fn(KeyCode) -> bool,
    {
        let direction = Direction::ALL.into_iter().find(|&direction| {
            direction_keys(direction)
                .iter()
                .any(|&key| pressed(key))
        });

        Self {
            quit_requested: pressed(KeyCode::Escape) || pressed(KeyCode::Q),
            start_requested: pressed(KeyCode::Enter) || pressed(KeyCode::Space),
            direction,
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            direction: self.direction,
            start: self.start_requested,
        }
    }
}

fn direction_keys(direction: Direction) -> [KeyCode; 2] {
    match direction {
        Direction::Up => [KeyCode::Up, KeyCode::W],
        Direction::Down => [KeyCode::Down, KeyCode::S],
        Direction::Left => [KeyCode::Left, KeyCode::A],
        Direction::Right => [KeyCode::Right, KeyCode::D],
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
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
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { swap_interval } = self;

        let Presentation {
            window_title,
            clear_color,
            palette,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.grid.width().ceil() as i32,
            window_height: scene.grid.height_with_hud().ceil() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut clock = 0.0_f32;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time().max(0.0);
                clock += dt_seconds;
                update_scene(
                    Duration::from_secs_f32(dt_seconds),
                    keyboard.frame_input(),
                    &mut scene,
                );

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );

                draw_terrain(&scene, &metrics, &palette);
                draw_dollars(&scene, &metrics, &palette);
                if let Some(monkey) = scene.monkey {
                    draw_monkey(metrics.cell_center(&scene, monkey), &metrics, &palette);
                }
                draw_tiger(&scene, &metrics, &palette, clock);

                let score_line = scene.hud_line();
                {
                    let mut hud_ui = macroquad::ui::root_ui();
                    draw_hud_ui(
                        &mut hud_ui,
                        HudUiContext {
                            origin: MacroquadVec2::new(metrics.offset_x, metrics.offset_y),
                            size: MacroquadVec2::new(
                                metrics.grid_width_scaled,
                                metrics.hud_height_scaled,
                            ),
                            background,
                            text: to_macroquad_color(palette.text),
                            score_line: &score_line,
                            message: hud_message(&scene),
                        },
                    );
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn hud_message(scene: &Scene) -> Option<&str> {
    match scene.phase {
        GamePhase::NotStarted => Some(START_PROMPT),
        GamePhase::Won => scene.announcement.as_deref().or(Some(RESTART_PROMPT)),
        GamePhase::Playing => scene.announcement.as_deref(),
    }
}

#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    grid_offset_y: f32,
    grid_width_scaled: f32,
    hud_height_scaled: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let grid = scene.grid;
        let world_width = grid.width();
        let world_height = grid.height_with_hud();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        let offset_x = ((screen_width - world_width * scale) * 0.5).max(0.0);
        let offset_y = ((screen_height - world_height * scale) * 0.5).max(0.0);
        let cell_step = grid.cell_length * scale;
        let hud_height_scaled = cell_step * GridPresentation::HUD_CELL_LAYERS as f32;

        Self {
            scale,
            offset_x,
            offset_y,
            grid_offset_y: offset_y + hud_height_scaled,
            grid_width_scaled: world_width * scale,
            hud_height_scaled,
            cell_step,
        }
    }

    fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + world.x * self.scale,
            self.grid_offset_y + world.y * self.scale,
        )
    }

    fn cell_origin(&self, scene: &Scene, cell: CellCoord) -> Vec2 {
        self.to_screen(scene.grid.cell_origin(cell))
    }

    fn cell_center(&self, scene: &Scene, cell: CellCoord) -> Vec2 {
        self.to_screen(scene.grid.cell_center(cell))
    }
}

fn draw_terrain(scene: &Scene, metrics: &SceneMetrics, palette: &Palette) {
    for (cell, kind) in scene.terrain() {
        let origin = metrics.cell_origin(scene, cell);
        let color = match kind {
            CellKind::Wall => palette.wall,
            CellKind::Path => palette.path,
            CellKind::Bank => palette.bank,
        };
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            metrics.cell_step,
            metrics.cell_step,
            to_macroquad_color(color),
        );

        if kind == CellKind::Bank {
            let inset = metrics.cell_step * 0.2;
            macroquad::shapes::draw_rectangle_lines(
                origin.x + inset,
                origin.y + inset,
                metrics.cell_step - 2.0 * inset,
                metrics.cell_step - 2.0 * inset,
                (metrics.cell_step * 0.08).max(1.0),
                to_macroquad_color(palette.bank.lighten(0.5)),
            );
        }
    }
}

fn draw_dollars(scene: &Scene, metrics: &SceneMetrics, palette: &Palette) {
    if metrics.cell_step <= f32::EPSILON {
        return;
    }

    for dollar in &scene.dollars {
        let remaining = dollar_scale(dollar.fade);
        if remaining <= f32::EPSILON {
            continue;
        }

        let center = metrics.cell_center(scene, dollar.cell);
        let radius = metrics.cell_step * 0.3 * remaining;
        let color = palette.dollar.fade(remaining);
        macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(color));
        macroquad::shapes::draw_circle_lines(
            center.x,
            center.y,
            radius,
            (radius * 0.15).max(1.0),
            to_macroquad_color(color.lighten(0.6)),
        );
    }
}

/// Size factor of a dollar whose pickup fade has played `fade` of its length.
fn dollar_scale(fade: f32) -> f32 {
    (1.0 - fade).clamp(0.0, 1.0)
}

fn draw_monkey(center: Vec2, metrics: &SceneMetrics, palette: &Palette) {
    let radius = metrics.cell_step * 0.38;
    macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(palette.monkey));
    macroquad::shapes::draw_circle_lines(
        center.x,
        center.y,
        radius,
        (radius * 0.15).max(1.0),
        BLACK,
    );
}

fn draw_tiger(scene: &Scene, metrics: &SceneMetrics, palette: &Palette, clock: f32) {
    let center = metrics.cell_center(scene, scene.tiger.cell);
    let radius = metrics.cell_step * tiger_radius_factor(scene.tiger.moving, clock);
    let color = to_macroquad_color(palette.tiger);
    macroquad::shapes::draw_circle(center.x, center.y, radius, color);
    macroquad::shapes::draw_circle_lines(
        center.x,
        center.y,
        radius,
        (radius * 0.15).max(1.0),
        BLACK,
    );

    let nose = center + facing_vector(scene.tiger.facing) * radius * 0.7;
    macroquad::shapes::draw_circle(nose.x, nose.y, radius * 0.25, BLACK);
}

/// Radius of the tiger relative to a cell; pulses while the moving flag is raised.
fn tiger_radius_factor(moving: bool, clock: f32) -> f32 {
    if moving {
        0.4 + 0.04 * (clock * 30.0).sin()
    } else {
        0.4
    }
}

fn to_macroquad_color(color: tiger_run_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
