//! Messages queued by event handlers and drained once per frame.

use crate::constants::*;
use crate::mesh::Aabb;
use crate::panel::{FieldId, Handle};
use glam::{Mat4, Quat, Vec3};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    House,
    Cat,
}

impl ModelKind {
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::House => "House",
            ModelKind::Cat => "Cat",
        }
    }

    /// HSL lightness multiplier applied to every material of the model.
    pub fn lighten(self) -> f32 {
        match self {
            ModelKind::House => HOUSE_LIGHTEN,
            ModelKind::Cat => CAT_LIGHTEN,
        }
    }

    /// Model-to-world transform, given the model's bounds in its own space.
    /// The cat is normalised so its largest side is `CAT_TARGET_EXTENT`.
    pub fn placement(self, local: &Aabb) -> Mat4 {
        match self {
            ModelKind::House => Mat4::from_scale_rotation_translation(
                Vec3::splat(HOUSE_SCALE),
                Quat::from_rotation_y(HOUSE_YAW),
                Vec3::new(0.0, HOUSE_Y, 0.0),
            ),
            ModelKind::Cat => {
                let extent = local.max_extent();
                let scale = if extent > f32::EPSILON {
                    CAT_TARGET_EXTENT / extent
                } else {
                    1.0
                };
                Mat4::from_scale_rotation_translation(
                    Vec3::splat(scale),
                    Quat::from_rotation_y(CAT_YAW),
                    CAT_POSITION,
                )
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneMessage {
    PointerDown { x: f32, y: f32, button: PointerButton, shift: bool },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerLeave,
    Wheel { delta_y: f32 },
    ExitRequested,
    Resize { width: u32, height: u32 },
    ToggleDebug,
    PanelEdit { field: FieldId, text: String },
    PanelNudge { handle: Handle, axis: usize, direction: f32 },
    PanelApply,
    PanelCapture,
    PanelSave,
    PanelLoad,
    ModelLoaded(ModelKind),
    ModelFailed { model: ModelKind, reason: String },
    Log(String),
}

impl SceneMessage {
    /// Global shortcuts: Ctrl+D toggles the debug log, Escape leaves the zoom.
    pub fn from_key(key: &str, ctrl: bool) -> Option<Self> {
        match key {
            "d" | "D" if ctrl => Some(SceneMessage::ToggleDebug),
            "Escape" => Some(SceneMessage::ExitRequested),
            _ => None,
        }
    }
}

/// Shared FIFO; clones refer to the same queue.
#[derive(Clone, Default)]
pub struct MessageQueue {
    inner: Rc<RefCell<VecDeque<SceneMessage>>>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, msg: SceneMessage) {
        self.inner.borrow_mut().push_back(msg);
    }

    /// Everything queued so far, oldest first. Messages pushed while the
    /// caller handles the batch wait for the next drain.
    pub fn drain(&self) -> Vec<SceneMessage> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    pub now_ms: f64,
    pub dt_sec: f32,
    pub elapsed_sec: f32,
}

/// Turns absolute frame timestamps into deltas.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    start_ms: Option<f64>,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, now_ms: f64) -> FrameTime {
        let start = *self.start_ms.get_or_insert(now_ms);
        let dt_ms = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);
        FrameTime {
            now_ms,
            dt_sec: (dt_ms / 1000.0) as f32,
            elapsed_sec: ((now_ms - start) / 1000.0) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_clones_share_storage() {
        let q = MessageQueue::new();
        let handler_side = q.clone();
        handler_side.push(SceneMessage::ToggleDebug);
        handler_side.push(SceneMessage::ExitRequested);
        assert_eq!(q.len(), 2);
        assert_eq!(q.drain(), vec![SceneMessage::ToggleDebug, SceneMessage::ExitRequested]);
        assert!(q.is_empty());
    }

    #[test]
    fn shortcuts() {
        assert_eq!(SceneMessage::from_key("d", true), Some(SceneMessage::ToggleDebug));
        assert_eq!(SceneMessage::from_key("D", true), Some(SceneMessage::ToggleDebug));
        assert_eq!(SceneMessage::from_key("d", false), None);
        assert_eq!(SceneMessage::from_key("Escape", false), Some(SceneMessage::ExitRequested));
    }

    #[test]
    fn cat_is_scaled_to_target_extent() {
        let local = Aabb {
            min: Vec3::new(-10.0, 0.0, -5.0),
            max: Vec3::new(10.0, 12.0, 5.0),
        };
        let world = local.transformed(ModelKind::Cat.placement(&local));
        assert!((world.size().y - 12.0 * CAT_TARGET_EXTENT / 20.0).abs() < 1e-4);
        assert!(world.center().distance(CAT_POSITION) < CAT_TARGET_EXTENT);
    }

    #[test]
    fn clock_reports_deltas() {
        let mut c = FrameClock::new();
        let a = c.advance(1000.0);
        assert_eq!(a.dt_sec, 0.0);
        assert_eq!(a.elapsed_sec, 0.0);
        let b = c.advance(1016.0);
        assert!((b.dt_sec - 0.016).abs() < 1e-6);
        assert!((b.elapsed_sec - 0.016).abs() < 1e-6);
    }
}
