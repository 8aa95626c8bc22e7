//! # Scene Module
//!
//! The renderer-agnostic scene graph and its GPU counterpart.
//!
//! - [`node`] - groups, meshes and labels with local transforms
//! - [`material`] - standard-material description of a primitive
//! - [`vertex`] - vertex layout shared by every unit mesh
//! - [`object`] - per-item uniform buffers and draw helpers
//!
//! A [`node::Group`] is built by pure functions, then flattened into
//! [`node::DrawItem`]s and [`node::PlacedLabel`]s with world transforms baked
//! in. Only the flattened form is uploaded.

pub mod material;
pub mod node;
pub mod object;
pub mod vertex;

pub use material::MaterialDesc;
pub use node::{FlattenedScene, Group, LabelNode, MeshNode, SceneNode, Shape, ShapeKind, Transform};
pub use object::{DrawObject, MeshLibrary, Object};
pub use vertex::Vertex3D;
