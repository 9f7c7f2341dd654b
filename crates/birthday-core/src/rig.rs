//! Single-writer ownership of the scene camera.
//!
//! The camera is written by exactly one authority at a time: the orbit
//! controller, the zoom tween, or nobody (`Locked`, while zoomed). The owner
//! token and the orbit controller's enabled flag change together in
//! [`CameraRig::hand_over`], so they cannot drift apart.

use crate::camera::{Camera, CameraPose};
use crate::error::CameraError;
use crate::orbit::OrbitController;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraOwner {
    Orbit,
    Tween,
    Locked,
}

/// Holder for the orbit controller, which may be installed after the first
/// frame has already asked it to enable or disable.
#[derive(Debug, Default)]
pub struct OrbitSlot {
    controller: Option<OrbitController>,
    enabled: bool,
}

impl OrbitSlot {
    pub fn install(&mut self, controller: OrbitController) {
        self.controller = Some(controller);
    }

    /// Accepted whether or not a controller is installed yet.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            if let Some(c) = self.controller.as_mut() {
                c.stop();
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The controller, only while it is enabled.
    pub fn active_mut(&mut self) -> Option<&mut OrbitController> {
        if self.enabled {
            self.controller.as_mut()
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct CameraRig {
    camera: Camera,
    owner: CameraOwner,
    orbit: OrbitSlot,
    orbit_target: Vec3,
}

impl CameraRig {
    pub fn new(camera: Camera, orbit_target: Vec3) -> Self {
        let mut orbit = OrbitSlot::default();
        orbit.set_enabled(true);
        Self {
            camera,
            owner: CameraOwner::Orbit,
            orbit,
            orbit_target,
        }
    }

    #[inline]
    pub fn owner(&self) -> CameraOwner {
        self.owner
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.camera.pose()
    }

    #[inline]
    pub fn orbit_target(&self) -> Vec3 {
        self.orbit_target
    }

    pub fn orbit(&self) -> &OrbitSlot {
        &self.orbit
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    /// Write the camera on behalf of `writer`; refused unless it owns the camera.
    pub fn write(&mut self, writer: CameraOwner, pose: CameraPose) -> Result<(), CameraError> {
        if writer != self.owner || writer == CameraOwner::Locked {
            return Err(CameraError::NotOwner {
                owner: self.owner,
                writer,
            });
        }
        self.camera.set_pose(pose);
        self.camera.refresh_matrices();
        Ok(())
    }

    /// Move ownership; the orbit controller is enabled exactly when it owns
    /// the camera.
    pub(crate) fn hand_over(&mut self, owner: CameraOwner) {
        self.owner = owner;
        self.orbit.set_enabled(owner == CameraOwner::Orbit);
    }

    /// Give the camera back to the orbit controller around `target`,
    /// keeping the current camera position.
    pub(crate) fn hand_to_orbit(&mut self, target: Vec3) {
        self.orbit_target = target;
        let position = self.camera.pose().position;
        if let Some(c) = self.orbit.controller.as_mut() {
            c.sync_to(position, target);
        }
        self.hand_over(CameraOwner::Orbit);
    }

    /// Install the interactive controller, seeded from the current camera.
    pub fn install_orbit(&mut self) {
        let controller = OrbitController::new(self.camera.pose().position, self.orbit_target);
        self.orbit.install(controller);
        let enabled = self.owner == CameraOwner::Orbit;
        self.orbit.set_enabled(enabled);
    }

    /// Input sink for pointer/wheel events; `None` unless orbit owns the camera.
    pub fn orbit_input(&mut self) -> Option<&mut OrbitController> {
        self.orbit.active_mut()
    }

    /// Place the camera and orbit target directly (control panel, bookmarks).
    pub fn place(&mut self, position: Vec3, target: Vec3) -> Result<(), CameraError> {
        self.write(CameraOwner::Orbit, CameraPose::looking_at(position, target))?;
        self.orbit_target = target;
        if let Some(c) = self.orbit.controller.as_mut() {
            c.sync_to(position, target);
        }
        Ok(())
    }

    /// One frame of orbit motion; no-op unless orbit owns the camera.
    pub fn tick_orbit(&mut self) -> bool {
        let Some(c) = self.orbit.active_mut() else {
            return false;
        };
        if !c.update() {
            return false;
        }
        let pose = c.pose();
        let target = c.target();
        self.orbit_target = target;
        self.write(CameraOwner::Orbit, pose).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn rig() -> CameraRig {
        CameraRig::new(Camera::new(CameraPose::default(), 1.5), HOME_TARGET)
    }

    #[test]
    fn only_the_owner_may_write() {
        let mut r = rig();
        let pose = CameraPose::looking_at(Vec3::ONE, Vec3::ZERO);
        assert!(r.write(CameraOwner::Tween, pose).is_err());
        assert!(r.write(CameraOwner::Orbit, pose).is_ok());
        r.hand_over(CameraOwner::Locked);
        assert!(r.write(CameraOwner::Locked, pose).is_err());
        assert!(r.write(CameraOwner::Orbit, pose).is_err());
    }

    #[test]
    fn enable_before_install_is_remembered() {
        let mut r = rig();
        r.hand_over(CameraOwner::Tween);
        assert!(r.orbit().controller.is_none());
        r.install_orbit();
        assert!(r.orbit().controller.is_some());
        assert!(!r.orbit().is_enabled());
        assert!(r.orbit_input().is_none());
        r.hand_to_orbit(HOME_TARGET);
        assert!(r.orbit().is_enabled());
        assert!(r.orbit_input().is_some());
    }

    #[test]
    fn orbit_tick_is_inert_without_controller() {
        let mut r = rig();
        assert!(!r.tick_orbit());
    }
}
