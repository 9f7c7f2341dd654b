//! Screen-space picking against model bounds.

use crate::camera::Camera;
use crate::mesh::Aabb;
use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Pixel coordinates (origin top-left) to normalised device coordinates.
pub fn pixel_to_ndc(px: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        px.x / width.max(1.0) * 2.0 - 1.0,
        1.0 - px.y / height.max(1.0) * 2.0,
    )
}

/// World-space ray through the given NDC point.
pub fn screen_ray(camera: &Camera, ndc: Vec2) -> Ray {
    let inv = camera.view_proj().inverse();
    // wgpu clip space: depth 0 is the near plane
    let near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
    let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let near = near.truncate() / near.w;
    let far = far.truncate() / far.w;
    Ray {
        origin: near,
        dir: (far - near).normalize_or_zero(),
    }
}

/// Distance along `ray` to the first hit with `aabb`, slab method.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv = ray.dir.recip();
    let t0 = (aabb.min - ray.origin) * inv;
    let t1 = (aabb.max - ray.origin) * inv;
    let tmin = t0.min(t1).max_element();
    let tmax = t0.max(t1).min_element();
    if tmax < tmin.max(0.0) || tmax.is_nan() {
        return None;
    }
    Some(tmin.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraPose;

    #[test]
    fn centre_ray_follows_view_direction() {
        let pose = CameraPose::looking_at(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);
        let cam = Camera::new(pose, 1.0);
        let ray = screen_ray(&cam, Vec2::ZERO);
        assert!(ray.dir.abs_diff_eq(Vec3::NEG_Z, 1e-4));
        let b = Aabb { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) };
        let t = ray_aabb(&ray, &b).unwrap();
        assert!((ray.at(t).z - 1.0).abs() < 1e-2);
    }

    #[test]
    fn miss_and_inside() {
        let b = Aabb { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) };
        let away = Ray { origin: Vec3::new(0.0, 5.0, 0.0), dir: Vec3::Y };
        assert_eq!(ray_aabb(&away, &b), None);
        let inside = Ray { origin: Vec3::ZERO, dir: Vec3::X };
        assert_eq!(ray_aabb(&inside, &b), Some(0.0));
    }

    #[test]
    fn pixel_corners_map_to_ndc_corners() {
        assert_eq!(pixel_to_ndc(Vec2::ZERO, 200.0, 100.0), Vec2::new(-1.0, 1.0));
        assert_eq!(pixel_to_ndc(Vec2::new(200.0, 100.0), 200.0, 100.0), Vec2::new(1.0, -1.0));
    }
}
