//! Structural building blocks: walls, floors, doors and windows
//!
//! Each builder is a pure function from placement and dimensions to a small,
//! fixed set of primitives. Inputs are not validated.

use cgmath::Vector3;
use std::f32::consts::FRAC_PI_2;

use crate::gfx::{
    color::Color,
    scene::{
        material::MaterialDesc,
        node::{Group, MeshNode, SceneNode, Shape, Transform},
    },
};

pub const WALL_THICKNESS: f32 = 0.15;

const DOOR_LEAF: Color = Color::hex("#8B4513");
const BRASS: Color = Color::hex("#FFD700");
const GLASS: Color = Color::hex("#87CEEB");
const GLASS_OPACITY: f32 = 0.4;

/// A single wall slab of `width x height x WALL_THICKNESS`
pub fn wall(transform: Transform, width: f32, height: f32, color: Color) -> SceneNode {
    MeshNode::new(
        "wall",
        Shape::cuboid(width, height, WALL_THICKNESS),
        MaterialDesc::new(color),
    )
    .with_transform(transform)
    .casting_shadow()
    .receiving_shadow()
    .into()
}

/// A horizontal floor plane of `width x depth` centred on `position`
pub fn floor(position: Vector3<f32>, width: f32, depth: f32, color: Color) -> SceneNode {
    MeshNode::new(
        "floor",
        Shape::Plane {
            width,
            height: depth,
        },
        MaterialDesc::new(color),
    )
    .with_transform(Transform {
        position,
        rotation: Vector3::new(-FRAC_PI_2, 0.0, 0.0),
    })
    .receiving_shadow()
    .into()
}

/// Door leaf with a brass knob
pub fn door(transform: Transform) -> SceneNode {
    Group::new("door", transform)
        .with(
            MeshNode::new(
                "leaf",
                Shape::cuboid(1.0, 2.1, 0.1),
                MaterialDesc::new(DOOR_LEAF),
            )
            .casting_shadow(),
        )
        .with(
            MeshNode::new(
                "knob",
                Shape::Sphere { radius: 0.05 },
                MaterialDesc::new(BRASS)
                    .with_metalness(0.8)
                    .with_roughness(0.2),
            )
            .at(0.3, 0.0, 0.06),
        )
        .into()
}

/// Translucent pane framed by three mullion bars
pub fn window(transform: Transform) -> SceneNode {
    let bar = |y: f32| {
        MeshNode::new(
            "mullion",
            Shape::cuboid(1.6, 0.05, 0.12),
            MaterialDesc::new(Color::WHITE),
        )
        .at(0.0, y, 0.0)
    };

    Group::new("window", transform)
        .with(
            MeshNode::new(
                "pane",
                Shape::cuboid(1.5, 1.5, 0.1),
                MaterialDesc::new(GLASS).with_opacity(GLASS_OPACITY),
            )
            .casting_shadow(),
        )
        .with(bar(0.0))
        .with(bar(0.75))
        .with(bar(-0.75))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(node: &SceneNode) -> &Group {
        match node {
            SceneNode::Group(group) => group,
            other => panic!("expected a group, got {other:?}"),
        }
    }

    #[test]
    fn test_wall_is_one_shadowed_slab() {
        let node = wall(Transform::at(0.0, 1.4, -5.0), 8.0, 2.8, Color::WHITE);
        let SceneNode::Mesh(mesh) = &node else {
            panic!("wall should be a single mesh");
        };
        assert_eq!(mesh.shape, Shape::cuboid(8.0, 2.8, WALL_THICKNESS));
        assert_eq!(mesh.material.color, Color::WHITE);
        assert!(mesh.cast_shadow && mesh.receive_shadow);
    }

    #[test]
    fn test_floor_lies_flat_and_only_receives() {
        let node = floor(Vector3::new(0.0, 0.0, 0.0), 8.0, 10.0, Color::hex("#696969"));
        let SceneNode::Mesh(mesh) = &node else {
            panic!("floor should be a single mesh");
        };
        assert_eq!(mesh.transform.rotation.x, -FRAC_PI_2);
        assert!(!mesh.cast_shadow);
        assert!(mesh.receive_shadow);
    }

    #[test]
    fn test_door_is_leaf_and_knob() {
        let node = door(Transform::at(-1.0, 0.0, 2.0).rotated_y(FRAC_PI_2));
        let door = group(&node);
        assert_eq!(door.children.len(), 2);
        let knob = door.meshes().find(|m| m.name == "knob").expect("knob");
        assert_eq!(knob.transform.position, Vector3::new(0.3, 0.0, 0.06));
        assert_eq!(knob.material.metalness, 0.8);
        assert_eq!(knob.material.roughness, 0.2);
    }

    #[test]
    fn test_window_has_pane_and_three_bars() {
        let node = window(Transform::at(-4.0, 1.5, -3.0).rotated_y(FRAC_PI_2));
        let window = group(&node);
        assert_eq!(window.children_named("pane").count(), 1);
        assert_eq!(window.children_named("mullion").count(), 3);

        let pane = window.meshes().find(|m| m.name == "pane").expect("pane");
        assert!(pane.material.is_translucent());
        assert_eq!(pane.material.opacity, GLASS_OPACITY);

        let mut bar_heights: Vec<f32> = window
            .meshes()
            .filter(|m| m.name == "mullion")
            .map(|m| m.transform.position.y)
            .collect();
        bar_heights.sort_by(f32::total_cmp);
        assert_eq!(bar_heights, vec![-0.75, 0.0, 0.75]);
    }
}
