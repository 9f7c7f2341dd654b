//! Model of the 2D canvas birthday card: layout, flame flicker and the
//! confetti particles. Drawing itself lives in the web crate.

use glam::Vec2;
use rand::Rng;

pub const GRADIENT_TOP: &str = "#1a001a";
pub const GRADIENT_BOTTOM: &str = "#4d004d";
pub const TITLE: &str = "Happy Birthday!";
pub const TITLE_FONT: &str = "60px Arial";
pub const TITLE_SHADOW: &str = "#ff00ff";
pub const CAKE_COLOR: &str = "#a0522d";
pub const ICING_COLOR: &str = "#ff69b4";
pub const CANDLE_COLOR: &str = "#ffff00";
pub const FLAME_BASE_COLOR: &str = "#ff9900";
pub const FLAME_TIP_COLOR: &str = "#ff0000";
pub const GLOW_COLOR: &str = "rgba(255, 255, 0, 0.5)";
pub const PARTICLE_COUNT: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Positions derived from the canvas size; recomputed on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    pub width: f64,
    pub height: f64,
    pub title: (f64, f64),
    pub cake: Rect,
    pub icing: Rect,
    pub candle: Rect,
    /// Where the flame sits on the candle.
    pub wick: (f64, f64),
}

impl CardLayout {
    pub fn new(width: f64, height: f64) -> Self {
        let (cx, cy) = (width / 2.0, height / 2.0);
        Self {
            width,
            height,
            title: (cx, height / 3.0),
            cake: Rect { x: cx - 100.0, y: cy, w: 200.0, h: 100.0 },
            icing: Rect { x: cx - 110.0, y: cy, w: 220.0, h: 20.0 },
            candle: Rect { x: cx - 5.0, y: cy - 40.0, w: 10.0, h: 40.0 },
            wick: (cx, cy - 40.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flame {
    pub height: f64,
    pub width: f64,
}

impl Flame {
    /// Flicker at wall-clock `ms`.
    pub fn at(ms: f64) -> Self {
        let t = ms / 200.0;
        Self {
            height: 20.0 + t.sin() * 5.0,
            width: 14.0 + (t * 1.5).sin() * 2.0,
        }
    }

    /// Two cubic Béziers, wick to tip then back down the other side.
    /// Each entry is `(control1, control2, end)`.
    pub fn outline(&self, wick: (f64, f64)) -> [[(f64, f64); 3]; 2] {
        let (x, y) = wick;
        let half = self.width / 2.0;
        let h = self.height;
        [
            [(x - half, y - h / 3.0), (x - half, y - h * 2.0 / 3.0), (x, y - h)],
            [(x + half, y - h * 2.0 / 3.0), (x + half, y - h / 3.0), (x, y)],
        ]
    }

    /// Glow disc centre and radius.
    pub fn glow(&self, wick: (f64, f64)) -> ((f64, f64), f64) {
        ((wick.0, wick.1 - self.height / 2.0), self.height / 3.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub hue: f32,
}

impl Particle {
    pub fn color(&self) -> String {
        format!("hsl({}, 100%, 50%)", self.hue)
    }
}

pub struct ParticleField {
    pub particles: Vec<Particle>,
    width: f32,
    height: f32,
}

impl ParticleField {
    pub fn spawn(rng: &mut impl Rng, count: usize, width: f32, height: f32) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                pos: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
                vel: Vec2::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5)),
                size: rng.gen_range(1.0..6.0),
                hue: rng.gen_range(0.0..360.0),
            })
            .collect();
        Self { particles, width, height }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// One frame of motion; particles leaving an edge re-enter at the opposite one.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.pos += p.vel;
            if p.pos.x < 0.0 {
                p.pos.x = w;
            } else if p.pos.x > w {
                p.pos.x = 0.0;
            }
            if p.pos.y < 0.0 {
                p.pos.y = h;
            } else if p.pos.y > h {
                p.pos.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn flame_stays_in_band() {
        for i in 0..500 {
            let f = Flame::at(i as f64 * 37.0);
            assert!((15.0..=25.0).contains(&f.height));
            assert!((12.0..=16.0).contains(&f.width));
        }
    }

    #[test]
    fn flame_outline_closes_on_wick() {
        let f = Flame::at(0.0);
        let path = f.outline((100.0, 200.0));
        assert_eq!(path[0][2], (100.0, 200.0 - f.height));
        assert_eq!(path[1][2], (100.0, 200.0));
    }

    #[test]
    fn layout_centres_cake() {
        let l = CardLayout::new(800.0, 600.0);
        assert_eq!(l.cake.x + l.cake.w / 2.0, 400.0);
        assert_eq!(l.candle.y + l.candle.h, l.icing.y);
        assert_eq!(l.title, (400.0, 200.0));
    }

    #[test]
    fn particles_wrap_and_stay_inside() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::spawn(&mut rng, PARTICLE_COUNT, 320.0, 240.0);
        for _ in 0..1000 {
            field.step();
        }
        for p in &field.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 320.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 240.0);
            assert!(p.size >= 1.0 && p.size < 6.0);
        }
    }
}
