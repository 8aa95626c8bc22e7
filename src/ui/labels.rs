//! Room labels drawn as screen-space text
//!
//! Labels are projected from world space every frame and drawn on the imgui
//! foreground draw list, so they always face the viewer and sit above the 3D
//! scene. Text is drawn at the UI font size; the outline is the text repeated
//! at small offsets in the outline colour.

use cgmath::Matrix4;

use crate::gfx::{
    camera::camera_utils::project_to_screen,
    color::Color,
    scene::node::{HorizontalAnchor, PlacedLabel, VerticalAnchor},
};

const OUTLINE_PX: f32 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLabel {
    pub text: String,
    /// Anchor point in pixels, origin top left
    pub position: [f32; 2],
    pub color: Color,
    pub outline_color: Color,
    pub has_outline: bool,
    pub anchor_x: HorizontalAnchor,
    pub anchor_y: VerticalAnchor,
}

impl ScreenLabel {
    /// Top-left corner of a text box of `size` pixels placed at the anchor
    pub fn top_left(&self, size: [f32; 2]) -> [f32; 2] {
        let x = match self.anchor_x {
            HorizontalAnchor::Left => self.position[0],
            HorizontalAnchor::Center => self.position[0] - size[0] * 0.5,
            HorizontalAnchor::Right => self.position[0] - size[0],
        };
        let y = match self.anchor_y {
            VerticalAnchor::Top => self.position[1],
            VerticalAnchor::Middle => self.position[1] - size[1] * 0.5,
            VerticalAnchor::Bottom => self.position[1] - size[1],
        };
        [x, y]
    }
}

/// Projects labels to the viewport; labels behind the camera are dropped
pub fn project_labels(
    labels: &[PlacedLabel],
    view_proj: Matrix4<f32>,
    viewport: [f32; 2],
) -> Vec<ScreenLabel> {
    labels
        .iter()
        .filter_map(|label| {
            let position = project_to_screen(view_proj, label.world_position, viewport)?;
            Some(ScreenLabel {
                text: label.text.clone(),
                position,
                color: label.color,
                outline_color: label.outline_color,
                has_outline: label.outline_width > 0.0,
                anchor_x: label.anchor_x,
                anchor_y: label.anchor_y,
            })
        })
        .collect()
}

pub fn draw_labels(ui: &imgui::Ui, labels: &[ScreenLabel]) {
    let draw_list = ui.get_foreground_draw_list();

    for label in labels {
        let size = ui.calc_text_size(&label.text);
        let [x, y] = label.top_left(size);

        if label.has_outline {
            let outline = label.outline_color.to_rgba(1.0);
            for (dx, dy) in [
                (-1.0, -1.0),
                (0.0, -1.0),
                (1.0, -1.0),
                (-1.0, 0.0),
                (1.0, 0.0),
                (-1.0, 1.0),
                (0.0, 1.0),
                (1.0, 1.0),
            ] {
                draw_list.add_text(
                    [x + dx * OUTLINE_PX, y + dy * OUTLINE_PX],
                    outline,
                    &label.text,
                );
            }
        }
        draw_list.add_text([x, y], label.color.to_rgba(1.0), &label.text);
    }
}
