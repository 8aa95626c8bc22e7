//! The apartment model: shape builders, furniture catalogue, layout, display
//! state and scene staging. Everything here is pure and renderer-agnostic.

pub mod apartment;
pub mod furniture;
pub mod label;
pub mod shapes;
pub mod staging;
pub mod state;

pub use apartment::apartment;
pub use furniture::{furniture, furniture_from_tag, FurnitureKind};
pub use label::room_label;
pub use shapes::{door, floor, wall, window};
pub use staging::{compose_scene, CameraSetup, FloorPlanScene, OrbitControlsConfig};
pub use state::{ControlAction, DisplayState, FloorColor, SceneController, WallColor};
