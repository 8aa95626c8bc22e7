//! The apartment layout
//!
//! A literal data table: every coordinate below is fixed. The display state only
//! picks the floor and wall colours and whether the `labels` section exists.
//!
//! The root group is split into named sections so callers can inspect it:
//! `structure` (floor and walls), `openings` (doors and windows), `furniture`,
//! and `labels` when visible.

use cgmath::Vector3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::gfx::{
    color::Color,
    scene::node::{Group, Transform},
};

use super::{
    furniture::{furniture, FurnitureKind},
    label::room_label,
    shapes::{door, floor, wall, window},
    state::DisplayState,
};

pub const ROOM_WIDTH: f32 = 8.0;
pub const ROOM_DEPTH: f32 = 10.0;
pub const WALL_HEIGHT: f32 = 2.8;

pub const STRUCTURE: &str = "structure";
pub const OPENINGS: &str = "openings";
pub const FURNITURE: &str = "furniture";
pub const LABELS: &str = "labels";

/// One furnishing: kind, position, Y rotation, base colour
pub struct Placement {
    pub kind: FurnitureKind,
    pub position: [f32; 3],
    pub rotation_y: f32,
    pub color: Color,
}

const fn place(kind: FurnitureKind, position: [f32; 3], rotation_y: f32, color: &str) -> Placement {
    Placement {
        kind,
        position,
        rotation_y,
        color: Color::hex(color),
    }
}

pub const FURNISHINGS: [Placement; 14] = [
    // Wohnzimmer
    place(FurnitureKind::Sofa, [2.5, 0.0, -3.0], -FRAC_PI_2, "#4A5568"),
    place(FurnitureKind::Tv, [-3.5, 1.2, -3.0], FRAC_PI_2, "#000000"),
    place(FurnitureKind::Table, [2.0, 0.0, -1.0], 0.0, "#8B4513"),
    place(FurnitureKind::Chair, [1.5, 0.0, -1.5], FRAC_PI_4, "#654321"),
    place(FurnitureKind::Chair, [2.5, 0.0, -0.5], -FRAC_PI_4, "#654321"),
    place(FurnitureKind::Chair, [1.5, 0.0, -0.5], 3.0 * FRAC_PI_4, "#654321"),
    place(FurnitureKind::Chair, [2.5, 0.0, -1.5], -FRAC_PI_4, "#654321"),
    // Schlafzimmer
    place(FurnitureKind::Bed, [-2.3, 0.0, -3.0], FRAC_PI_2, "#8B7D6B"),
    place(FurnitureKind::Wardrobe, [-3.2, 0.0, 0.5], FRAC_PI_2, "#8B4513"),
    place(FurnitureKind::Table, [-1.0, 0.0, 0.6], 0.0, "#A0522D"),
    place(FurnitureKind::Chair, [-1.0, 0.0, 1.2], PI, "#654321"),
    // Küche
    place(FurnitureKind::Kitchen, [2.3, 0.0, 3.5], PI, "#E0E0E0"),
    // Bad
    place(FurnitureKind::Bath, [-2.5, 0.0, 3.5], 0.0, "#FFFFFF"),
    place(FurnitureKind::Sink, [-1.0, 0.0, 4.5], 0.0, "#FFFFFF"),
];

pub const ROOM_NAMES: [(&str, [f32; 3]); 4] = [
    ("Wohnzimmer", [2.0, 2.5, -2.5]),
    ("Schlafzimmer", [-2.0, 2.5, -2.0]),
    ("Küche", [2.0, 2.5, 3.5]),
    ("Bad", [-2.0, 2.5, 3.5]),
];

/// Composes the whole apartment for one display state
pub fn apartment(state: &DisplayState) -> Group {
    let mut root = Group::new("apartment", Transform::identity())
        .with(structure(state.floor_color.color(), state.wall_color.color()))
        .with(openings())
        .with(furnishings());

    if state.labels_visible {
        root.push(labels());
    }
    root
}

fn structure(floor_color: Color, wall_color: Color) -> Group {
    let half_w = ROOM_WIDTH / 2.0;
    let half_d = ROOM_DEPTH / 2.0;
    let y = WALL_HEIGHT / 2.0;
    let slab = |transform: Transform, width: f32| wall(transform, width, WALL_HEIGHT, wall_color);

    Group::new(STRUCTURE, Transform::identity())
        .with(floor(Vector3::new(0.0, 0.0, 0.0), ROOM_WIDTH, ROOM_DEPTH, floor_color))
        // exterior
        .with(slab(Transform::at(0.0, y, -half_d), ROOM_WIDTH))
        .with(slab(Transform::at(0.0, y, half_d), ROOM_WIDTH))
        .with(slab(Transform::at(-half_w, y, 0.0).rotated_y(FRAC_PI_2), ROOM_DEPTH))
        .with(slab(Transform::at(half_w, y, 0.0).rotated_y(FRAC_PI_2), ROOM_DEPTH))
        // partitions
        .with(slab(Transform::at(0.0, y, -1.5).rotated_y(FRAC_PI_2), 3.0))
        .with(slab(Transform::at(-1.5, y, 2.0), 5.0))
}

fn openings() -> Group {
    let half_w = ROOM_WIDTH / 2.0;

    Group::new(OPENINGS, Transform::identity())
        .with(door(Transform::at(-1.0, 0.0, -1.5)))
        .with(door(Transform::at(-1.0, 0.0, 2.0).rotated_y(FRAC_PI_2)))
        .with(door(Transform::at(1.2, 0.0, 2.0).rotated_y(FRAC_PI_2)))
        .with(window(Transform::at(-half_w, 1.5, -3.0).rotated_y(FRAC_PI_2)))
        .with(window(Transform::at(-half_w, 1.5, 3.5).rotated_y(FRAC_PI_2)))
        .with(window(Transform::at(half_w, 1.5, -3.0).rotated_y(FRAC_PI_2)))
}

fn furnishings() -> Group {
    let mut group = Group::new(FURNITURE, Transform::identity());
    for item in &FURNISHINGS {
        let transform = Transform::new(item.position, [0.0, item.rotation_y, 0.0]);
        group.push(furniture(item.kind, transform, item.color));
    }
    group
}

fn labels() -> Group {
    let mut group = Group::new(LABELS, Transform::identity());
    for (name, position) in ROOM_NAMES {
        group.push(room_label(name, position.into()));
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floorplan::state::{FloorColor, WallColor};
    use crate::gfx::scene::node::{SceneNode, Shape};

    fn section<'a>(root: &'a Group, name: &str) -> &'a Group {
        root.child_group(name)
            .unwrap_or_else(|| panic!("missing section {name}"))
    }

    #[test]
    fn test_layout_counts_are_invariant() {
        for state in DisplayState::all() {
            let root = apartment(&state);
            let structure = section(&root, STRUCTURE);
            let openings = section(&root, OPENINGS);
            let furniture = section(&root, FURNITURE);

            assert_eq!(structure.children_named("floor").count(), 1);
            assert_eq!(structure.children_named("wall").count(), 6);
            assert_eq!(openings.children_named("door").count(), 3);
            assert_eq!(openings.children_named("window").count(), 3);
            assert_eq!(furniture.children.len(), 14);
        }
    }

    #[test]
    fn test_geometry_ignores_display_state() {
        let geometry = |state: &DisplayState| -> Vec<(Shape, [f32; 3])> {
            SceneNode::from(apartment(state))
                .flatten()
                .items
                .iter()
                .map(|item| (item.shape, item.world_position().into()))
                .collect()
        };

        let reference = geometry(&DisplayState::default());
        for state in DisplayState::all() {
            assert_eq!(geometry(&state), reference, "{state:?}");
        }
    }

    #[test]
    fn test_floor_takes_chosen_colour() {
        for color in FloorColor::ALL {
            let state = DisplayState {
                floor_color: color,
                ..DisplayState::default()
            };
            let root = apartment(&state);
            let floor = section(&root, STRUCTURE)
                .meshes()
                .find(|m| m.name == "floor")
                .expect("floor");
            assert_eq!(floor.material.color, color.color());
        }
    }

    #[test]
    fn test_every_wall_takes_chosen_colour_and_furniture_does_not() {
        let furniture_colours = |root: &Group| -> Vec<Color> {
            SceneNode::from(section(root, FURNITURE).clone())
                .flatten()
                .items
                .iter()
                .map(|item| item.material.color)
                .collect()
        };
        let reference = furniture_colours(&apartment(&DisplayState::default()));

        for color in WallColor::ALL {
            let state = DisplayState {
                wall_color: color,
                ..DisplayState::default()
            };
            let root = apartment(&state);
            let walls: Vec<_> = section(&root, STRUCTURE)
                .meshes()
                .filter(|m| m.name == "wall")
                .collect();
            assert_eq!(walls.len(), 6);
            assert!(walls.iter().all(|w| w.material.color == color.color()));
            assert_eq!(furniture_colours(&root), reference);
        }
    }

    #[test]
    fn test_labels_gate_as_a_unit() {
        for state in DisplayState::all() {
            let node = SceneNode::from(apartment(&state));
            if state.labels_visible {
                assert_eq!(node.label_count(), 4);
                let texts: Vec<String> = node.flatten().labels.into_iter().map(|l| l.text).collect();
                assert_eq!(texts, vec!["Wohnzimmer", "Schlafzimmer", "Küche", "Bad"]);
            } else {
                assert_eq!(node.label_count(), 0);
            }
        }
    }

    #[test]
    fn test_sofa_faces_the_tv() {
        let root = apartment(&DisplayState::default());
        let sofa = section(&root, FURNITURE)
            .child_group("sofa")
            .expect("sofa");
        assert_eq!(sofa.transform.position, Vector3::new(2.5, 0.0, -3.0));
        assert_eq!(sofa.children.len(), 4);
    }

    #[test]
    fn test_composition_is_pure() {
        for state in DisplayState::all() {
            assert_eq!(apartment(&state), apartment(&state));
        }
    }
}
