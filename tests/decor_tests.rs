// Host-side tests for the animated decorations and the 2D birthday card.

use birthday_core::birthday2d::{CardLayout, Flame, ParticleField, PARTICLE_COUNT};
use birthday_core::ground::GroundTexture;
use birthday_core::sky::{Cloud, Sky};
use birthday_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn cloud_wraps_to_right_edge() {
    let mut c = Cloud::new(Vec3::new(0.0, 100.0, -250.0), 1.0, 0.0);
    c.position.x = -CLOUD_WRAP_X + 0.01;
    let y_before = c.position.y;
    c.tick(1.0);
    assert_eq!(c.position.x, CLOUD_WRAP_X);
    // bob and roll keep going from where they were
    assert!((c.position.y - y_before).abs() <= CLOUD_BOB_AMPLITUDE + 1e-6);
    assert!(c.roll.abs() <= CLOUD_ROLL_AMPLITUDE);
}

#[test]
fn wrap_moves_only_x() {
    let origin = Vec3::new(20.0, 110.0, -300.0);
    let mut wrapped = Cloud::new(origin, 1.5, 0.4);
    let mut twin = Cloud::new(origin, 1.5, 0.4);
    wrapped.position.x = -CLOUD_WRAP_X + 0.01;

    for step in 1..=3 {
        let t = step as f32 * 0.7;
        let (wy, ty) = (wrapped.position.y, twin.position.y);
        wrapped.tick(t);
        twin.tick(t);
        assert_eq!(wrapped.roll, twin.roll);
        assert_eq!(wrapped.position.y - wy, twin.position.y - ty);
        assert_eq!(wrapped.position.z, twin.position.z);
        assert_eq!(wrapped.origin, twin.origin);
    }
    assert!(wrapped.position.x > CLOUD_WRAP_X - 1.0);
}

#[test]
fn clouds_drift_left_every_tick() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut sky = Sky::generate(&mut rng, CLOUD_COUNT, 0);
    let before: Vec<f32> = sky.clouds.iter().map(|c| c.position.x).collect();
    sky.tick(0.5);
    for (c, x) in sky.clouds.iter().zip(before) {
        assert!(c.position.x < x || c.position.x == CLOUD_WRAP_X);
    }
}

#[test]
fn sun_pulses_around_base_intensity() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut sky = Sky::generate(&mut rng, 0, 0);
    for i in 0..200 {
        sky.tick(i as f32 * 0.25);
        let e = sky.sun.emissive;
        assert!((e - SUN_BASE_INTENSITY).abs() <= SUN_PULSE_AMPLITUDE + 1e-5);
    }
}

#[test]
fn snow_recycles_above_ground() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut sky = Sky::generate(&mut rng, 0, SNOW_COUNT);
    for i in 0..5000 {
        sky.tick(i as f32 / 60.0);
    }
    assert!(sky
        .snow
        .iter()
        .all(|f| f.position.y >= GROUND_Y && f.position.y <= SNOW_TOP));
}

#[test]
fn ground_texture_is_opaque_and_seeded() {
    let a = GroundTexture::generate(&mut StdRng::seed_from_u64(9), 64);
    let b = GroundTexture::generate(&mut StdRng::seed_from_u64(9), 64);
    assert_eq!(a.pixels, b.pixels);
    assert_eq!(a.pixels.len(), 64 * 64 * 4);
    assert!(a.pixels.chunks(4).all(|px| px[3] == 255));
}

#[test]
fn card_centres_cake_and_candle() {
    let l = CardLayout::new(1000.0, 800.0);
    assert_eq!(l.title, (500.0, 800.0 / 3.0));
    assert_eq!(l.cake.x + l.cake.w / 2.0, 500.0);
    assert_eq!(l.candle.y + l.candle.h, l.cake.y);
    assert_eq!(l.wick, (500.0, 360.0));
}

#[test]
fn flame_flickers_within_bounds() {
    for ms in (0..20_000).step_by(37) {
        let f = Flame::at(ms as f64);
        assert!((15.0..=25.0).contains(&f.height));
        assert!((12.0..=16.0).contains(&f.width));
        let [_, back] = f.outline((0.0, 0.0));
        // closes back on the wick
        assert_eq!(back[2], (0.0, 0.0));
    }
}

#[test]
fn particles_stay_on_canvas() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = ParticleField::spawn(&mut rng, PARTICLE_COUNT, 300.0, 200.0);
    assert_eq!(field.particles.len(), PARTICLE_COUNT);
    for _ in 0..1000 {
        field.step();
    }
    assert!(field
        .particles
        .iter()
        .all(|p| (0.0..=300.0).contains(&p.pos.x) && (0.0..=200.0).contains(&p.pos.y)));
}
