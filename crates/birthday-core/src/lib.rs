pub mod birthday2d;
pub mod bookmark;
pub mod camera;
pub mod color;
pub mod constants;
pub mod diagnostics;
pub mod easing;
pub mod error;
pub mod ground;
pub mod manifest;
pub mod mesh;
pub mod orbit;
pub mod overlay;
pub mod panel;
pub mod picking;
pub mod rig;
pub mod schedule;
pub mod sky;
pub mod tween;
pub mod viewer;
pub mod zoom;

pub use camera::*;
pub use constants::*;
pub use error::*;
pub use rig::{CameraOwner, CameraRig};
pub use schedule::{MessageQueue, SceneMessage};
pub use viewer::{UiEffect, Viewer};
pub use zoom::{ZoomController, ZoomEvent, ZoomPhase};
