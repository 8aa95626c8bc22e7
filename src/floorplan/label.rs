//! Room name labels

use cgmath::Vector3;

use crate::gfx::{
    color::Color,
    scene::node::{HorizontalAnchor, LabelNode, SceneNode, VerticalAnchor},
};

pub const LABEL_FONT_SIZE: f32 = 0.3;
pub const LABEL_OUTLINE_WIDTH: f32 = 0.02;

/// White, black-outlined billboard text centred on `position`
pub fn room_label(text: &str, position: Vector3<f32>) -> SceneNode {
    LabelNode {
        text: text.to_string(),
        position,
        font_size: LABEL_FONT_SIZE,
        color: Color::WHITE,
        outline_width: LABEL_OUTLINE_WIDTH,
        outline_color: Color::BLACK,
        anchor_x: HorizontalAnchor::Center,
        anchor_y: VerticalAnchor::Middle,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_style_is_fixed() {
        let node = room_label("Küche", Vector3::new(2.0, 2.5, 3.5));
        let SceneNode::Label(label) = node else {
            panic!("expected a label");
        };
        assert_eq!(label.text, "Küche");
        assert_eq!(label.font_size, LABEL_FONT_SIZE);
        assert_eq!(label.color, Color::WHITE);
        assert_eq!(label.outline_color, Color::BLACK);
        assert_eq!(label.anchor_x, HorizontalAnchor::Center);
        assert_eq!(label.anchor_y, VerticalAnchor::Middle);
    }
}
