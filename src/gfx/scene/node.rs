//! Scene graph nodes
//!
//! The scene is a value-typed tree: [`Group`]s carry a transform and children,
//! [`MeshNode`]s pair a [`Shape`] with a [`MaterialDesc`], and [`LabelNode`]s hold
//! billboard text. Nothing here touches the GPU; [`SceneNode::flatten`] resolves the
//! tree into world-space [`DrawItem`]s and [`PlacedLabel`]s for the renderer.

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3, Vector4};

use crate::gfx::color::Color;

use super::material::MaterialDesc;

/// Position plus XYZ Euler rotation in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
}

impl Transform {
    pub fn new(position: [f32; 3], rotation: [f32; 3]) -> Self {
        Self {
            position: position.into(),
            rotation: rotation.into(),
        }
    }

    /// Translation only
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self::new([x, y, z], [0.0; 3])
    }

    pub fn identity() -> Self {
        Self::at(0.0, 0.0, 0.0)
    }

    /// Builder pattern: Set rotation about the Y axis
    pub fn rotated_y(mut self, angle: f32) -> Self {
        self.rotation.y = angle;
        self
    }

    /// Builder pattern: Set rotation about the X axis
    pub fn rotated_x(mut self, angle: f32) -> Self {
        self.rotation.x = angle;
        self
    }

    /// Local-to-parent matrix, `T * Rx * Ry * Rz`
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Unit mesh a shape is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Plane,
    Sphere,
    Cylinder,
}

/// Geometric primitive with its dimensions in metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box { width: f32, height: f32, depth: f32 },
    /// Lies in the local XY plane facing +Z
    Plane { width: f32, height: f32 },
    Sphere { radius: f32 },
    /// Axis along local Y
    Cylinder { radius: f32, height: f32 },
}

impl Shape {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Shape::Box {
            width,
            height,
            depth,
        }
    }

    pub fn cylinder(radius: f32, height: f32) -> Self {
        Shape::Cylinder { radius, height }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Box { .. } => ShapeKind::Cube,
            Shape::Plane { .. } => ShapeKind::Plane,
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Cylinder { .. } => ShapeKind::Cylinder,
        }
    }

    /// Scale applied to the unit mesh of [`Shape::kind`]
    pub fn scale(&self) -> Vector3<f32> {
        match *self {
            Shape::Box {
                width,
                height,
                depth,
            } => Vector3::new(width, height, depth),
            Shape::Plane { width, height } => Vector3::new(width, height, 1.0),
            Shape::Sphere { radius } => Vector3::new(radius, radius, radius),
            Shape::Cylinder { radius, height } => Vector3::new(radius, height, radius),
        }
    }
}

/// A single primitive with its material
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub name: &'static str,
    pub transform: Transform,
    pub shape: Shape,
    pub material: MaterialDesc,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshNode {
    pub fn new(name: &'static str, shape: Shape, material: MaterialDesc) -> Self {
        Self {
            name,
            transform: Transform::identity(),
            shape,
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    /// Builder pattern: Set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: Translate relative to the parent
    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    /// Builder pattern: Include in the shadow depth pass
    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    /// Builder pattern: Sample the shadow map when shading
    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Middle,
    Bottom,
}

/// Billboard text anchored at a point
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    pub text: String,
    pub position: Vector3<f32>,
    pub font_size: f32,
    pub color: Color,
    pub outline_width: f32,
    pub outline_color: Color,
    pub anchor_x: HorizontalAnchor,
    pub anchor_y: VerticalAnchor,
}

/// Transformed collection of child nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: &'static str,
    pub transform: Transform,
    pub children: Vec<SceneNode>,
}

impl Group {
    pub fn new(name: &'static str, transform: Transform) -> Self {
        Self {
            name,
            transform,
            children: Vec::new(),
        }
    }

    /// Builder pattern: Append a child
    pub fn with(mut self, child: impl Into<SceneNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn push(&mut self, child: impl Into<SceneNode>) {
        self.children.push(child.into());
    }

    /// First direct child group with the given name
    pub fn child_group(&self, name: &str) -> Option<&Group> {
        self.children.iter().find_map(|child| match child {
            SceneNode::Group(group) if group.name == name => Some(group),
            _ => None,
        })
    }

    /// Direct children whose name matches
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SceneNode> {
        self.children.iter().filter(move |child| child.name() == name)
    }

    /// Direct mesh children
    pub fn meshes(&self) -> impl Iterator<Item = &MeshNode> {
        self.children.iter().filter_map(|child| match child {
            SceneNode::Mesh(mesh) => Some(mesh),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Group(Group),
    Mesh(MeshNode),
    Label(LabelNode),
}

impl From<Group> for SceneNode {
    fn from(group: Group) -> Self {
        SceneNode::Group(group)
    }
}

impl From<MeshNode> for SceneNode {
    fn from(mesh: MeshNode) -> Self {
        SceneNode::Mesh(mesh)
    }
}

impl From<LabelNode> for SceneNode {
    fn from(label: LabelNode) -> Self {
        SceneNode::Label(label)
    }
}

impl SceneNode {
    pub fn name(&self) -> &str {
        match self {
            SceneNode::Group(group) => group.name,
            SceneNode::Mesh(mesh) => mesh.name,
            SceneNode::Label(label) => &label.text,
        }
    }

    /// Number of mesh primitives in this subtree
    pub fn mesh_count(&self) -> usize {
        match self {
            SceneNode::Group(group) => group.children.iter().map(SceneNode::mesh_count).sum(),
            SceneNode::Mesh(_) => 1,
            SceneNode::Label(_) => 0,
        }
    }

    /// Number of labels in this subtree
    pub fn label_count(&self) -> usize {
        match self {
            SceneNode::Group(group) => group.children.iter().map(SceneNode::label_count).sum(),
            SceneNode::Mesh(_) => 0,
            SceneNode::Label(_) => 1,
        }
    }

    /// Resolves the subtree into world-space draw items and labels
    pub fn flatten(&self) -> FlattenedScene {
        let mut out = FlattenedScene::default();
        self.flatten_into(Matrix4::identity(), &mut out);
        out
    }

    fn flatten_into(&self, parent: Matrix4<f32>, out: &mut FlattenedScene) {
        match self {
            SceneNode::Group(group) => {
                let world = parent * group.transform.matrix();
                for child in &group.children {
                    child.flatten_into(world, out);
                }
            }
            SceneNode::Mesh(mesh) => out.items.push(DrawItem {
                name: mesh.name,
                world: parent * mesh.transform.matrix(),
                shape: mesh.shape,
                material: mesh.material,
                cast_shadow: mesh.cast_shadow,
                receive_shadow: mesh.receive_shadow,
            }),
            SceneNode::Label(label) => {
                let p = parent * label.position.extend(1.0);
                out.labels.push(PlacedLabel {
                    text: label.text.clone(),
                    world_position: p.truncate(),
                    font_size: label.font_size,
                    color: label.color,
                    outline_width: label.outline_width,
                    outline_color: label.outline_color,
                    anchor_x: label.anchor_x,
                    anchor_y: label.anchor_y,
                });
            }
        }
    }
}

/// A primitive resolved to world space
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub name: &'static str,
    pub world: Matrix4<f32>,
    pub shape: Shape,
    pub material: MaterialDesc,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl DrawItem {
    /// World matrix including the shape's scale of its unit mesh
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let s = self.shape.scale();
        self.world * Matrix4::from_nonuniform_scale(s.x, s.y, s.z)
    }

    pub fn world_position(&self) -> Vector3<f32> {
        (self.world * Vector4::new(0.0, 0.0, 0.0, 1.0)).truncate()
    }
}

/// A label resolved to world space
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    pub world_position: Vector3<f32>,
    pub font_size: f32,
    pub color: Color,
    pub outline_width: f32,
    pub outline_color: Color,
    pub anchor_x: HorizontalAnchor,
    pub anchor_y: VerticalAnchor,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedScene {
    pub items: Vec<DrawItem>,
    pub labels: Vec<PlacedLabel>,
}

impl FlattenedScene {
    /// Items for the opaque pass
    pub fn opaque(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(|item| !item.material.is_translucent())
    }

    /// Items for the alpha-blended pass
    pub fn translucent(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(|item| item.material.is_translucent())
    }
}
