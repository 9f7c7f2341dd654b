//! Camera pose and projection shared by the web renderer and the state machine.
//!
//! Orientation follows the usual right-handed convention: the camera looks
//! down its local `-Z` with `+Y` up.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Position plus orientation, the value the zoom tween interpolates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl CameraPose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    /// Pose at `position` facing `target` with world `+Y` as up.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            orientation: look_rotation(target - position),
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_at(crate::HOME_POSITION, crate::HOME_TARGET)
    }
}

/// Rotation taking local `-Z` onto `forward`, keeping the horizon level.
pub fn look_rotation(forward: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = f.cross(Vec3::Y);
    if right.length_squared() < 1e-8 {
        // straight up or down: any horizontal right vector will do
        right = Vec3::X;
    }
    let right = right.normalize();
    let up = right.cross(f);
    Quat::from_mat3(&Mat3::from_cols(right, up, -f)).normalize()
}

/// Right-handed perspective camera with cached matrices.
///
/// Matrices are only recomputed by [`Camera::refresh_matrices`], so callers
/// that write the pose decide when the renderer sees the change.
#[derive(Clone, Debug)]
pub struct Camera {
    pose: CameraPose,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(pose: CameraPose, aspect: f32) -> Self {
        let mut cam = Self {
            pose,
            aspect: aspect.max(1e-3),
            fovy_radians: crate::FOV_Y_DEGREES.to_radians(),
            znear: crate::Z_NEAR,
            zfar: crate::Z_FAR,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        cam.refresh_matrices();
        cam
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub(crate) fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(1e-3);
        self.refresh_matrices();
    }

    pub fn refresh_matrices(&mut self) {
        self.view =
            Mat4::from_rotation_translation(self.pose.orientation, self.pose.position).inverse();
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}
