//! Interactive orbit navigation around a look-at target.
//!
//! Pointer deltas accumulate into pending rotate/pan/zoom amounts; `update`
//! applies a damped fraction of them once per frame and produces the camera
//! pose, so motion eases out after the pointer stops.

use crate::camera::CameraPose;
use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrbitController {
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    d_theta: f32,
    d_phi: f32,
    zoom_scale: f32,
    pan: Vec3,
    pub limits: OrbitLimits,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping: f32,
    fovy_radians: f32,
}

impl OrbitController {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let mut c = Self {
            target,
            radius: 1.0,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
            d_theta: 0.0,
            d_phi: 0.0,
            zoom_scale: 1.0,
            pan: Vec3::ZERO,
            limits: OrbitLimits::default(),
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            damping: ORBIT_DAMPING,
            fovy_radians: FOV_Y_DEGREES.to_radians(),
        };
        c.sync_to(position, target);
        c
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Re-derive the spherical state from an externally placed camera.
    /// Pending motion is dropped so the camera does not jump afterwards.
    pub fn sync_to(&mut self, position: Vec3, target: Vec3) {
        self.target = target;
        let offset = position - target;
        self.radius = offset.length().max(1e-4);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.stop();
    }

    /// Discard pending damped motion.
    pub fn stop(&mut self) {
        self.d_theta = 0.0;
        self.d_phi = 0.0;
        self.zoom_scale = 1.0;
        self.pan = Vec3::ZERO;
    }

    /// Pointer drag in pixels; `viewport_height` is the canvas height in pixels.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let tau = std::f32::consts::TAU;
        self.d_theta -= tau * dx_px / h * self.rotate_speed;
        self.d_phi -= tau * dy_px / h * self.rotate_speed;
    }

    /// Wheel input; negative `delta_y` moves the camera closer.
    pub fn zoom(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.zoom_scale *= step;
        } else if delta_y > 0.0 {
            self.zoom_scale /= step;
        }
    }

    /// Screen-space pan: the target follows the camera's right/up axes.
    pub fn pan(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let pose = self.pose();
        let world_per_px = 2.0 * self.radius * (self.fovy_radians * 0.5).tan() / h;
        self.pan += pose.right() * (-dx_px * world_per_px) + pose.up() * (dy_px * world_per_px);
    }

    /// Apply one frame of damped motion; returns whether anything moved.
    pub fn update(&mut self) -> bool {
        let k = self.damping;
        let moved = self.d_theta.abs() > 1e-6
            || self.d_phi.abs() > 1e-6
            || (self.zoom_scale - 1.0).abs() > 1e-6
            || self.pan.length_squared() > 1e-10;
        let l = self.limits;
        self.theta += self.d_theta * k;
        self.phi = clamp_from(self.phi + self.d_phi * k, self.phi, l.min_polar, l.max_polar);
        self.radius = clamp_from(
            self.radius * self.zoom_scale,
            self.radius,
            l.min_distance,
            l.max_distance,
        );
        self.target += self.pan * k;

        self.d_theta *= 1.0 - k;
        self.d_phi *= 1.0 - k;
        self.pan *= 1.0 - k;
        self.zoom_scale = 1.0;
        moved
    }

    pub fn position(&self) -> Vec3 {
        let s = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * s * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * s * self.theta.cos(),
            )
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::looking_at(self.position(), self.target)
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn polar(&self) -> f32 {
        self.phi
    }
}

/// Clamp `value` to `[lo, hi]`, widened to include `current`.
///
/// A camera placed outside the band by the panel or a bookmark is never
/// pulled onto it in one frame; it can only move back towards the band.
fn clamp_from(value: f32, current: f32, lo: f32, hi: f32) -> f32 {
    value.clamp(lo.min(current), hi.max(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_round_trips_position() {
        let c = OrbitController::new(HOME_POSITION, HOME_TARGET);
        assert!(c.position().abs_diff_eq(HOME_POSITION, 1e-3));
        assert_eq!(c.target(), HOME_TARGET);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut c = OrbitController::new(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO);
        for _ in 0..400 {
            c.zoom(-1.0);
            c.update();
        }
        assert!((c.distance() - ORBIT_MIN_DISTANCE).abs() < 1e-4);
        for _ in 0..400 {
            c.zoom(1.0);
            c.update();
        }
        assert!((c.distance() - ORBIT_MAX_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_never_leaves_band() {
        let mut c = OrbitController::new(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO);
        c.rotate(0.0, 10_000.0, 600.0);
        for _ in 0..200 {
            c.update();
            assert!(c.polar() >= ORBIT_MIN_POLAR - 1e-6);
            assert!(c.polar() <= ORBIT_MAX_POLAR + 1e-6);
        }
    }

    #[test]
    fn out_of_band_placement_does_not_snap() {
        // polar angle about 0.49π and distance 500, both past the limits
        let position = Vec3::new(0.0, 15.7, 499.75);
        let mut c = OrbitController::new(position, Vec3::ZERO);
        assert!(!c.update());
        assert!(c.position().abs_diff_eq(position, 1e-2));

        let (phi, radius) = (c.polar(), c.distance());
        c.rotate(3.0, 0.0, 600.0);
        c.update();
        assert!((c.polar() - phi).abs() < 1e-5);
        assert!((c.distance() - radius).abs() < 1e-3);

        // moving further out is refused, moving back in is allowed
        c.rotate(0.0, -30.0, 600.0);
        c.zoom(1.0);
        c.update();
        assert!(c.polar() <= phi + 1e-6);
        assert!(c.distance() <= radius + 1e-3);
        c.zoom(-1.0);
        c.update();
        assert!(c.distance() < radius);
    }

    #[test]
    fn damping_decays_to_rest() {
        let mut c = OrbitController::new(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO);
        c.rotate(50.0, 0.0, 600.0);
        let mut frames = 0;
        while c.update() {
            frames += 1;
            assert!(frames < 2000, "orbit never settled");
        }
        assert!(frames > 10);
    }

    #[test]
    fn pan_moves_target_sideways() {
        let mut c = OrbitController::new(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO);
        let before = c.target();
        c.pan(100.0, 0.0, 600.0);
        for _ in 0..500 {
            c.update();
        }
        let moved = c.target() - before;
        assert!(moved.length() > 0.1);
        assert!(moved.y.abs() < 1e-3);
    }
}
