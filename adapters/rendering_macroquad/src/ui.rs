//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::Color,
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Snapshot of the score panel's layout and text for the current frame.
#[derive(Clone, Debug)]
pub(crate) struct HudUiContext<'a> {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Vec2,
    /// Panel dimensions in screen space.
    pub size: Vec2,
    /// Background colour of the panel.
    pub background: Color,
    /// Colour used for every label.
    pub text: Color,
    /// Score line produced by the scene.
    pub score_line: &'a str,
    /// Announcement or prompt shown below the score line.
    pub message: Option<&'a str>,
}

/// Renders the score panel for the current frame.
pub(crate) fn draw_hud_ui(ui: &mut Ui, context: HudUiContext<'_>) {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(context.text)
        .margin(RectOffset::new(12.0, 12.0, 4.0, 4.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(context.text)
        .text_color_hovered(context.text)
        .text_color_clicked(context.text)
        .margin(RectOffset::new(0.0, 0.0, 2.0, 2.0))
        .build();
    skin.label_style = label_style;

    ui.push_skin(&skin);

    let _ = ui.window(hash!("score_panel"), context.origin, context.size, |ui| {
        ui.label(None, context.score_line);
        if let Some(message) = context.message {
            ui.label(None, message);
        }
    });

    ui.pop_skin();
}
