//! Sunset sky decoration: pulsing sun, drifting clouds and falling snow.
//!
//! Generated once with whatever `Rng` the caller supplies and perturbed every
//! tick afterwards. None of it interacts with the camera.

use crate::constants::*;
use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use smallvec::SmallVec;

pub struct Sun {
    pub position: Vec3,
    pub radius: f32,
    pub emissive: f32,
}

impl Sun {
    pub fn new() -> Self {
        Self {
            position: SUN_POSITION,
            radius: SUN_RADIUS,
            emissive: SUN_BASE_INTENSITY,
        }
    }

    pub fn tick(&mut self, elapsed_sec: f32) {
        self.emissive = SUN_BASE_INTENSITY + (elapsed_sec * SUN_PULSE_RATE).sin() * SUN_PULSE_AMPLITUDE;
    }
}

impl Default for Sun {
    fn default() -> Self {
        Self::new()
    }
}

/// One sphere of a cloud, in cloud-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudPuff {
    pub offset: Vec3,
    pub radius: f32,
    pub opacity: f32,
}

const fn puff(x: f32, y: f32, z: f32, radius: f32, opacity: f32) -> CloudPuff {
    CloudPuff {
        offset: Vec3::new(x, y, z),
        radius,
        opacity,
    }
}

pub const CLOUD_PUFFS: [CloudPuff; 8] = [
    puff(0.0, 0.0, 0.0, 10.0, 0.9),
    puff(8.0, 0.0, 5.0, 8.0, 0.9),
    puff(-8.0, 0.0, 3.0, 9.0, 0.9),
    puff(5.0, 0.0, -7.0, 7.0, 0.85),
    puff(-5.0, 0.0, -5.0, 8.0, 0.85),
    // upper layer
    puff(0.0, 3.0, 0.0, 9.0, 0.8),
    puff(6.0, 2.0, 3.0, 7.0, 0.8),
    puff(-6.0, 2.0, 2.0, 8.0, 0.8),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PuffInstance {
    pub model: Mat4,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    /// Spawn position; seeds the bob and roll phases.
    pub origin: Vec3,
    pub position: Vec3,
    pub scale: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Cloud {
    pub fn new(origin: Vec3, scale: f32, yaw: f32) -> Self {
        Self {
            origin,
            position: origin,
            scale,
            yaw,
            roll: 0.0,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        let origin = Vec3::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * CLOUD_WRAP_X,
            90.0 + rng.gen::<f32>() * 40.0,
            -200.0 - rng.gen::<f32>() * 200.0,
        );
        let scale = 0.8 + rng.gen::<f32>() * 2.2;
        let yaw = rng.gen::<f32>() * std::f32::consts::TAU;
        Self::new(origin, scale, yaw)
    }

    /// Drift left, bob, roll; wrap to the right edge past the left bound.
    pub fn tick(&mut self, elapsed_sec: f32) {
        self.position.x -= CLOUD_DRIFT_PER_TICK;
        self.position.y += (elapsed_sec * 0.2 + self.origin.x * 0.1).sin() * CLOUD_BOB_AMPLITUDE;
        self.roll = (elapsed_sec * 0.1 + self.origin.y * 0.05).sin() * CLOUD_ROLL_AMPLITUDE;
        if self.position.x < -CLOUD_WRAP_X {
            self.position.x = CLOUD_WRAP_X;
        }
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.yaw) * Quat::from_rotation_z(self.roll),
            self.position,
        )
    }

    /// World transforms of the unit-sphere puffs making up this cloud.
    pub fn puff_instances(&self) -> SmallVec<[PuffInstance; 8]> {
        let base = self.transform();
        CLOUD_PUFFS
            .iter()
            .map(|p| PuffInstance {
                model: base * Mat4::from_scale_rotation_translation(
                    Vec3::splat(p.radius),
                    Quat::IDENTITY,
                    p.offset,
                ),
                opacity: p.opacity,
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snowflake {
    pub position: Vec3,
    pub fall: f32,
    pub sway_phase: f32,
    pub size: f32,
    pub color: usize,
}

impl Snowflake {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            position: Vec3::new(
                rng.gen_range(-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT),
                rng.gen_range(GROUND_Y..SNOW_TOP),
                rng.gen_range(-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT),
            ),
            fall: rng.gen_range(0.05..0.15),
            sway_phase: rng.gen_range(0.0..std::f32::consts::TAU),
            size: rng.gen_range(0.3..0.8),
            color: rng.gen_range(0..SNOW_COLORS.len()),
        }
    }

    pub fn tick(&mut self, elapsed_sec: f32) {
        self.position.y -= self.fall;
        self.position.x += (elapsed_sec * 0.5 + self.sway_phase).sin() * 0.05;
        if self.position.y < GROUND_Y {
            self.position.y = SNOW_TOP;
        }
    }
}

/// Everything animated above the ground.
pub struct Sky {
    pub sun: Sun,
    pub clouds: Vec<Cloud>,
    pub snow: Vec<Snowflake>,
}

impl Sky {
    pub fn generate(rng: &mut impl Rng, cloud_count: usize, snow_count: usize) -> Self {
        Self {
            sun: Sun::new(),
            clouds: (0..cloud_count).map(|_| Cloud::random(rng)).collect(),
            snow: (0..snow_count).map(|_| Snowflake::random(rng)).collect(),
        }
    }

    pub fn tick(&mut self, elapsed_sec: f32) {
        self.sun.tick(elapsed_sec);
        for c in &mut self.clouds {
            c.tick(elapsed_sec);
        }
        for f in &mut self.snow {
            f.tick(elapsed_sec);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sun_pulses_around_base() {
        let mut sun = Sun::new();
        for i in 0..100 {
            sun.tick(i as f32 * 0.37);
            assert!((sun.emissive - SUN_BASE_INTENSITY).abs() <= SUN_PULSE_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn generated_clouds_stay_in_spawn_box() {
        let mut rng = StdRng::seed_from_u64(7);
        let sky = Sky::generate(&mut rng, CLOUD_COUNT, 10);
        assert_eq!(sky.clouds.len(), CLOUD_COUNT);
        for c in &sky.clouds {
            assert!(c.position.x >= -CLOUD_WRAP_X && c.position.x < CLOUD_WRAP_X);
            assert!(c.position.y >= 90.0 && c.position.y < 130.0);
            assert!(c.position.z <= -200.0 && c.position.z > -400.0);
            assert!(c.scale >= 0.8 && c.scale < 3.0);
        }
    }

    #[test]
    fn each_cloud_has_eight_puffs() {
        let c = Cloud::new(Vec3::new(0.0, 100.0, -300.0), 2.0, 0.0);
        let puffs = c.puff_instances();
        assert_eq!(puffs.len(), 8);
        assert!(!puffs.spilled());
        let centre = puffs[0].model.transform_point3(Vec3::ZERO);
        assert!(centre.abs_diff_eq(c.position, 1e-4));
    }

    #[test]
    fn snow_wraps_from_floor_to_top() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut f = Snowflake::random(&mut rng);
        f.position.y = GROUND_Y + 0.01;
        f.tick(0.0);
        assert_eq!(f.position.y, SNOW_TOP);
    }
}
