//! Furniture catalogue
//!
//! Nine fixed layouts keyed by [`FurnitureKind`]. Only the transform and base
//! colour vary per instance; some kinds override the base colour for parts that
//! always look the same (countertops, screens, handles).
//!
//! [`furniture_from_tag`] is the string entry point. An unknown tag builds
//! nothing and is not an error.

use std::{fmt, str::FromStr};

use crate::gfx::{
    color::Color,
    scene::{
        material::MaterialDesc,
        node::{Group, MeshNode, SceneNode, Shape, Transform},
    },
};

const HEADBOARD: Color = Color::hex("#654321");
const CABINET: Color = Color::hex("#E0E0E0");
const COUNTERTOP: Color = Color::hex("#8B4513");
const HOB: Color = Color::hex("#333333");
const TV_BODY: Color = Color::hex("#000000");
const TV_SCREEN: Color = Color::hex("#1a1a2e");
const WARDROBE: Color = Color::hex("#8B7355");
const BRASS: Color = Color::hex("#FFD700");
const PORCELAIN: Color = Color::hex("#FFFFFF");
const CHROME: Color = Color::hex("#C0C0C0");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FurnitureKind {
    Sofa,
    Bed,
    Table,
    Chair,
    Kitchen,
    Tv,
    Wardrobe,
    Bath,
    Sink,
}

impl FurnitureKind {
    pub const ALL: [FurnitureKind; 9] = [
        FurnitureKind::Sofa,
        FurnitureKind::Bed,
        FurnitureKind::Table,
        FurnitureKind::Chair,
        FurnitureKind::Kitchen,
        FurnitureKind::Tv,
        FurnitureKind::Wardrobe,
        FurnitureKind::Bath,
        FurnitureKind::Sink,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            FurnitureKind::Sofa => "sofa",
            FurnitureKind::Bed => "bed",
            FurnitureKind::Table => "table",
            FurnitureKind::Chair => "chair",
            FurnitureKind::Kitchen => "kitchen",
            FurnitureKind::Tv => "tv",
            FurnitureKind::Wardrobe => "wardrobe",
            FurnitureKind::Bath => "bath",
            FurnitureKind::Sink => "sink",
        }
    }

    /// Matches a tag exactly; anything else is `None`
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown furniture tag '{0}'")]
pub struct UnknownFurniture(pub String);

impl FromStr for FurnitureKind {
    type Err = UnknownFurniture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownFurniture(s.to_string()))
    }
}

/// Builds the fixed arrangement for `kind`, placed by `transform`
pub fn furniture(kind: FurnitureKind, transform: Transform, color: Color) -> Group {
    let parts = match kind {
        FurnitureKind::Sofa => sofa(color),
        FurnitureKind::Bed => bed(color),
        FurnitureKind::Table => table(color),
        FurnitureKind::Chair => chair(color),
        FurnitureKind::Kitchen => kitchen(),
        FurnitureKind::Tv => tv(),
        FurnitureKind::Wardrobe => wardrobe(),
        FurnitureKind::Bath => bath(),
        FurnitureKind::Sink => sink(),
    };

    let mut group = Group::new(kind.tag(), transform);
    for part in parts {
        group.push(part);
    }
    group
}

/// String-tag entry point; unknown tags render nothing
pub fn furniture_from_tag(tag: &str, transform: Transform, color: Color) -> Option<SceneNode> {
    FurnitureKind::from_tag(tag).map(|kind| furniture(kind, transform, color).into())
}

fn solid(name: &'static str, shape: Shape, color: Color) -> MeshNode {
    MeshNode::new(name, shape, MaterialDesc::new(color)).casting_shadow()
}

fn sofa(color: Color) -> Vec<MeshNode> {
    vec![
        solid("seat", Shape::cuboid(2.0, 0.6, 0.9), color).at(0.0, 0.3, 0.0),
        solid("back", Shape::cuboid(2.0, 0.6, 0.2), color).at(0.0, 0.6, -0.25),
        solid("arm", Shape::cuboid(0.1, 0.5, 0.9), color).at(-0.95, 0.45, 0.0),
        solid("arm", Shape::cuboid(0.1, 0.5, 0.9), color).at(0.95, 0.45, 0.0),
    ]
}

fn bed(color: Color) -> Vec<MeshNode> {
    vec![
        solid("frame", Shape::cuboid(2.0, 0.4, 2.2), color).at(0.0, 0.3, 0.0),
        solid("headboard", Shape::cuboid(2.0, 0.6, 0.2), HEADBOARD).at(0.0, 0.6, -1.0),
    ]
}

/// Four legs at `(±x, y, ±z)`
fn legs(radius: f32, height: f32, x: f32, z: f32, color: Color) -> [MeshNode; 4] {
    let leg = |lx: f32, lz: f32| {
        solid("leg", Shape::cylinder(radius, height), color).at(lx, height / 2.0, lz)
    };
    [leg(-x, -z), leg(x, -z), leg(-x, z), leg(x, z)]
}

fn table(color: Color) -> Vec<MeshNode> {
    let mut parts = vec![solid("top", Shape::cuboid(1.2, 0.05, 0.8), color).at(0.0, 0.4, 0.0)];
    parts.extend(legs(0.03, 0.4, 0.5, 0.35, color));
    parts
}

fn chair(color: Color) -> Vec<MeshNode> {
    let mut parts = vec![
        solid("seat", Shape::cuboid(0.45, 0.05, 0.45), color).at(0.0, 0.25, 0.0),
        solid("back", Shape::cuboid(0.45, 0.3, 0.05), color).at(0.0, 0.4, -0.2),
    ];
    parts.extend(legs(0.02, 0.25, 0.18, 0.18, color));
    parts
}

fn kitchen() -> Vec<MeshNode> {
    vec![
        solid("cabinet", Shape::cuboid(3.0, 0.9, 0.6), CABINET).at(0.0, 0.45, 0.0),
        solid("countertop", Shape::cuboid(3.0, 0.05, 0.6), COUNTERTOP).at(0.0, 0.95, 0.0),
        solid("hob", Shape::cylinder(0.2, 0.02), HOB).at(-0.8, 0.5, 0.2),
    ]
}

fn tv() -> Vec<MeshNode> {
    vec![
        solid("body", Shape::cuboid(1.5, 0.9, 0.05), TV_BODY),
        MeshNode::new(
            "screen",
            Shape::cuboid(1.4, 0.8, 0.01),
            MaterialDesc::new(TV_SCREEN).with_emission(TV_SCREEN, 0.3),
        )
        .at(0.0, 0.0, 0.03),
    ]
}

fn wardrobe() -> Vec<MeshNode> {
    let handle = |x: f32| {
        MeshNode::new(
            "handle",
            Shape::cylinder(0.03, 0.05),
            MaterialDesc::new(BRASS).with_metalness(0.8),
        )
        .casting_shadow()
        .at(x, 1.0, 0.31)
    };
    vec![
        solid("body", Shape::cuboid(1.5, 2.0, 0.6), WARDROBE).at(0.0, 1.0, 0.0),
        handle(-0.35),
        handle(0.35),
    ]
}

fn bath() -> Vec<MeshNode> {
    vec![solid("tub", Shape::cuboid(1.7, 0.6, 0.8), PORCELAIN).at(0.0, 0.3, 0.0)]
}

fn sink() -> Vec<MeshNode> {
    vec![
        solid("basin", Shape::cylinder(0.25, 0.15), PORCELAIN).at(0.0, 0.4, 0.0),
        MeshNode::new(
            "pedestal",
            Shape::cylinder(0.02, 0.4),
            MaterialDesc::new(CHROME).with_metalness(0.9),
        )
        .casting_shadow()
        .at(0.0, 0.2, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;
    use std::f32::consts::FRAC_PI_2;

    fn offsets(group: &Group) -> Vec<Vector3<f32>> {
        group.meshes().map(|m| m.transform.position).collect()
    }

    #[test]
    fn test_sofa_layout_ignores_colour() {
        let place = Transform::at(2.5, 0.0, -3.0).rotated_y(-FRAC_PI_2);
        let grey = furniture(FurnitureKind::Sofa, place, Color::hex("#4A5568"));
        let red = furniture(FurnitureKind::Sofa, place, Color::hex("#FF0000"));

        assert_eq!(grey.children.len(), 4);
        assert_eq!(grey.transform.position, Vector3::new(2.5, 0.0, -3.0));
        assert_eq!(
            offsets(&grey),
            vec![
                Vector3::new(0.0, 0.3, 0.0),
                Vector3::new(0.0, 0.6, -0.25),
                Vector3::new(-0.95, 0.45, 0.0),
                Vector3::new(0.95, 0.45, 0.0),
            ]
        );
        assert_eq!(offsets(&grey), offsets(&red));
        assert!(red.meshes().all(|m| m.material.color == Color::hex("#FF0000")));
    }

    #[test]
    fn test_part_counts_per_kind() {
        let expected = [
            (FurnitureKind::Sofa, 4),
            (FurnitureKind::Bed, 2),
            (FurnitureKind::Table, 5),
            (FurnitureKind::Chair, 6),
            (FurnitureKind::Kitchen, 3),
            (FurnitureKind::Tv, 2),
            (FurnitureKind::Wardrobe, 3),
            (FurnitureKind::Bath, 1),
            (FurnitureKind::Sink, 2),
        ];
        for (kind, count) in expected {
            let group = furniture(kind, Transform::identity(), Color::WHITE);
            assert_eq!(group.children.len(), count, "{kind}");
            assert_eq!(group.name, kind.tag());
        }
    }

    #[test]
    fn test_fixed_colours_override_base() {
        let base = Color::hex("#123456");

        let kitchen = furniture(FurnitureKind::Kitchen, Transform::identity(), base);
        assert!(kitchen.meshes().all(|m| m.material.color != base));
        let top = kitchen.meshes().find(|m| m.name == "countertop").unwrap();
        assert_eq!(top.material.color, COUNTERTOP);
        let hob = kitchen.meshes().find(|m| m.name == "hob").unwrap();
        assert_eq!(hob.material.color, HOB);

        let tv = furniture(FurnitureKind::Tv, Transform::identity(), base);
        let screen = tv.meshes().find(|m| m.name == "screen").unwrap();
        assert_eq!(screen.material.color, TV_SCREEN);
        assert_eq!(screen.material.emissive, TV_SCREEN);
        assert_eq!(screen.material.emissive_intensity, 0.3);
        assert!(!screen.cast_shadow);

        let bed = furniture(FurnitureKind::Bed, Transform::identity(), base);
        let colours: Vec<Color> = bed.meshes().map(|m| m.material.color).collect();
        assert_eq!(colours, vec![base, HEADBOARD]);
    }

    #[test]
    fn test_chair_legs_sit_on_the_floor() {
        let chair = furniture(FurnitureKind::Chair, Transform::identity(), Color::WHITE);
        let legs: Vec<&MeshNode> = chair.meshes().filter(|m| m.name == "leg").collect();
        assert_eq!(legs.len(), 4);
        for leg in legs {
            assert_eq!(leg.shape, Shape::cylinder(0.02, 0.25));
            assert_eq!(leg.transform.position.y, 0.125);
            assert_eq!(leg.transform.position.x.abs(), 0.18);
            assert_eq!(leg.transform.position.z.abs(), 0.18);
        }
    }

    #[test]
    fn test_unknown_tag_builds_nothing() {
        assert!(furniture_from_tag("lamp", Transform::identity(), Color::WHITE).is_none());
        assert!(furniture_from_tag("Sofa", Transform::identity(), Color::WHITE).is_none());
        assert!(furniture_from_tag("", Transform::identity(), Color::WHITE).is_none());
    }

    #[test]
    fn test_known_tags_round_trip() {
        for kind in FurnitureKind::ALL {
            assert_eq!(kind.tag().parse::<FurnitureKind>(), Ok(kind));
            let node = furniture_from_tag(kind.tag(), Transform::identity(), Color::WHITE)
                .expect("known tag");
            assert!(node.mesh_count() > 0);
        }
        assert_eq!(
            "lamp".parse::<FurnitureKind>(),
            Err(UnknownFurniture("lamp".to_string()))
        );
    }
}
