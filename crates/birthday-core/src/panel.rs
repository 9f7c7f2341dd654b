//! Manual camera control panel.
//!
//! The panel mirrors the live camera in editable text fields. Every write
//! goes to the camera first and only then re-renders the fields from the
//! values actually applied, so the two never disagree; a failed write leaves
//! both untouched.

use crate::bookmark::{load_bookmark, save_bookmark, BookmarkStore, CameraBookmark};
use crate::error::{Result, SceneError};
use crate::rig::CameraRig;
use glam::Vec3;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    Position,
    Target,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    Position(usize),
    Target(usize),
    Step,
}

impl FieldId {
    pub const ALL: [FieldId; 7] = [
        FieldId::Position(0),
        FieldId::Position(1),
        FieldId::Position(2),
        FieldId::Target(0),
        FieldId::Target(1),
        FieldId::Target(2),
        FieldId::Step,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldId::Position(i) => ["position.x", "position.y", "position.z"][*i % 3],
            FieldId::Target(i) => ["target.x", "target.y", "target.z"][*i % 3],
            FieldId::Step => "step",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelFields {
    pub position: [String; 3],
    pub target: [String; 3],
    pub step: String,
}

impl PanelFields {
    fn render(position: Vec3, target: Vec3, step: f32) -> Self {
        Self {
            position: position.to_array().map(|v| v.to_string()),
            target: target.to_array().map(|v| v.to_string()),
            step: step.to_string(),
        }
    }

    pub fn get(&self, id: FieldId) -> &str {
        match id {
            FieldId::Position(i) => &self.position[i % 3],
            FieldId::Target(i) => &self.target[i % 3],
            FieldId::Step => &self.step,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ControlPanel {
    fields: PanelFields,
    step: f32,
    /// Fields typed into but not yet applied.
    edited: HashSet<FieldId>,
}

impl ControlPanel {
    pub fn new(rig: &CameraRig) -> Self {
        let step = crate::DEFAULT_PANEL_STEP;
        Self {
            fields: PanelFields::render(rig.pose().position, rig.orbit_target(), step),
            step,
            edited: HashSet::new(),
        }
    }

    pub fn fields(&self) -> &PanelFields {
        &self.fields
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Text typed by the operator; nothing is applied until [`Self::apply`].
    pub fn edit(&mut self, id: FieldId, text: impl Into<String>) {
        let text = text.into();
        self.edited.insert(id);
        self.set_text(id, text);
    }

    /// Copy the live camera into the fields, discarding unapplied edits.
    pub fn capture(&mut self, rig: &CameraRig) {
        self.show(rig.pose().position, rig.orbit_target(), self.step);
    }

    /// Like [`Self::capture`], but fields the operator is editing keep their text.
    pub fn refresh(&mut self, rig: &CameraRig) {
        let live = PanelFields::render(rig.pose().position, rig.orbit_target(), self.step);
        for id in FieldId::ALL {
            if !self.edited.contains(&id) {
                let text = live.get(id).to_string();
                self.set_text(id, text);
            }
        }
    }

    fn set_text(&mut self, id: FieldId, text: String) {
        match id {
            FieldId::Position(i) => self.fields.position[i % 3] = text,
            FieldId::Target(i) => self.fields.target[i % 3] = text,
            FieldId::Step => self.fields.step = text,
        }
    }

    fn show(&mut self, position: Vec3, target: Vec3, step: f32) {
        self.fields = PanelFields::render(position, target, step);
        self.edited.clear();
    }

    /// Parse every field and place the camera; all-or-nothing.
    pub fn apply(&mut self, rig: &mut CameraRig) -> Result<()> {
        let mut values = [0.0_f32; 7];
        for (slot, id) in values.iter_mut().zip(FieldId::ALL) {
            *slot = parse_field(id, self.fields.get(id))?;
        }
        let position = Vec3::new(values[0], values[1], values[2]);
        let target = Vec3::new(values[3], values[4], values[5]);
        let step = values[6];
        rig.place(position, target)?;
        self.step = step;
        self.show(position, target, step);
        log::info!("[panel] applied position={} target={}", position, target);
        Ok(())
    }

    /// Move the camera or its target by one step along `axis`.
    pub fn nudge(
        &mut self,
        rig: &mut CameraRig,
        handle: Handle,
        axis: usize,
        direction: f32,
    ) -> Result<()> {
        let mut position = rig.pose().position;
        let mut target = rig.orbit_target();
        let delta = self.step * direction.signum();
        match handle {
            Handle::Position => position[axis % 3] += delta,
            Handle::Target => target[axis % 3] += delta,
        }
        rig.place(position, target)?;
        self.show(position, target, self.step);
        Ok(())
    }

    pub fn bookmark(&self, rig: &CameraRig) -> CameraBookmark {
        CameraBookmark {
            position: rig.pose().position.to_array(),
            target: rig.orbit_target().to_array(),
            step: self.step,
        }
    }

    pub fn save(&self, rig: &CameraRig, store: &mut impl BookmarkStore) -> Result<()> {
        save_bookmark(store, &self.bookmark(rig))?;
        log::info!("[panel] bookmark saved");
        Ok(())
    }

    /// Restore the saved bookmark; `Ok(false)` if none exists.
    pub fn load(&mut self, rig: &mut CameraRig, store: &impl BookmarkStore) -> Result<bool> {
        let Some(b) = load_bookmark(store)? else {
            return Ok(false);
        };
        let position = Vec3::from_array(b.position);
        let target = Vec3::from_array(b.target);
        rig.place(position, target)?;
        self.step = b.step;
        self.show(position, target, b.step);
        log::info!("[panel] bookmark loaded");
        Ok(true)
    }
}

fn parse_field(id: FieldId, text: &str) -> Result<f32> {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SceneError::Field {
            name: id.name().to_string(),
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, CameraPose};
    use crate::error::CameraError;
    use crate::rig::CameraOwner;

    fn rig() -> CameraRig {
        let pose = CameraPose::looking_at(Vec3::new(0.0, 10.0, 50.0), Vec3::ZERO);
        let mut rig = CameraRig::new(Camera::new(pose, 1.0), Vec3::ZERO);
        rig.install_orbit();
        rig
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut rig = rig();
        let mut panel = ControlPanel::new(&rig);
        panel.edit(FieldId::Position(0), "5");
        panel.edit(FieldId::Step, "");
        let before = rig.pose();
        let err = panel.apply(&mut rig).unwrap_err();
        assert!(matches!(err, SceneError::Field { ref name, .. } if name == "step"));
        assert_eq!(rig.pose(), before);
    }

    #[test]
    fn fields_follow_capture() {
        let mut rig = rig();
        let mut panel = ControlPanel::new(&rig);
        panel.edit(FieldId::Target(2), "junk");
        panel.capture(&rig);
        assert_eq!(panel.fields().get(FieldId::Target(2)), "0");
        assert_eq!(panel.fields().get(FieldId::Position(1)), "10");
        rig.place(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO).unwrap();
        panel.capture(&rig);
        assert_eq!(panel.fields().position, ["1", "2", "3"].map(String::from));
    }

    #[test]
    fn refresh_leaves_edited_fields_alone() {
        let mut rig = rig();
        let mut panel = ControlPanel::new(&rig);
        panel.edit(FieldId::Position(2), "80");
        rig.place(Vec3::new(4.0, 5.0, 6.0), Vec3::ZERO).unwrap();
        panel.refresh(&rig);
        assert_eq!(panel.fields().position, ["4", "5", "80"].map(String::from));

        panel.apply(&mut rig).unwrap();
        assert_eq!(rig.pose().position, Vec3::new(4.0, 5.0, 80.0));
        rig.place(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO).unwrap();
        panel.refresh(&rig);
        assert_eq!(panel.fields().position, ["1", "1", "1"].map(String::from));
    }

    #[test]
    fn writes_refused_unless_orbit_owns_camera() {
        let mut rig = rig();
        let mut panel = ControlPanel::new(&rig);
        rig.hand_over(CameraOwner::Tween);
        let err = panel.nudge(&mut rig, Handle::Position, 0, 1.0).unwrap_err();
        assert_eq!(
            err,
            SceneError::Camera(CameraError::NotOwner {
                owner: CameraOwner::Tween,
                writer: CameraOwner::Orbit,
            })
        );
    }
}
