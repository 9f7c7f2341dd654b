//! Procedural ground texture: a flat base speckled with grains in three
//! tones plus a few faint scratches. Tiled across the ground plane.

use crate::color::palette;
use crate::constants::*;
use rand::Rng;

pub struct GroundTexture {
    pub size: u32,
    /// Tightly packed sRGB RGBA8, row-major.
    pub pixels: Vec<u8>,
}

fn rgba8(hex: &str) -> [u8; 4] {
    let [r, g, b] = palette(hex);
    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        255,
    ]
}

impl GroundTexture {
    pub fn generate(rng: &mut impl Rng, size: u32) -> Self {
        let base = rgba8(GROUND_COLOR);
        let mut tex = Self {
            size,
            pixels: base.repeat((size * size) as usize),
        };
        let (dark, mid, light) = (
            rgba8(GROUND_DARK),
            rgba8(GROUND_TEXTURE_COLOR),
            rgba8(GROUND_LIGHT),
        );
        let extent = size as f32;

        for _ in 0..GROUND_SPECKLES {
            let x = rng.gen::<f32>() * extent;
            let y = rng.gen::<f32>() * extent;
            let radius = 0.5 + rng.gen::<f32>() * 3.0;
            let pick = rng.gen::<f32>();
            let c = if pick < 0.3 {
                dark
            } else if pick < 0.7 {
                mid
            } else {
                light
            };
            tex.fill_disc(x, y, radius, c);
        }

        let stroke = rgba8(GROUND_STROKE);
        for _ in 0..GROUND_STROKES {
            let x0 = rng.gen::<f32>() * extent;
            let y0 = rng.gen::<f32>() * extent;
            let x1 = x0 + (rng.gen::<f32>() - 0.5) * 100.0;
            let y1 = y0 + (rng.gen::<f32>() - 0.5) * 100.0;
            tex.line(x0, y0, x1, y1, stroke);
        }
        tex
    }

    fn put(&mut self, x: i64, y: i64, c: [u8; 4]) {
        let s = self.size as i64;
        if x < 0 || y < 0 || x >= s || y >= s {
            return;
        }
        let i = ((y * s + x) * 4) as usize;
        self.pixels[i..i + 4].copy_from_slice(&c);
    }

    // Pixel centres inside the circle; always at least the centre pixel.
    fn fill_disc(&mut self, cx: f32, cy: f32, r: f32, c: [u8; 4]) {
        self.put(cx.floor() as i64, cy.floor() as i64, c);
        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.put(px, py, c);
                }
            }
        }
    }

    // Hairline; segments leaving the texture are clipped, not wrapped.
    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, c: [u8; 4]) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.put(x.floor() as i64, y.floor() as i64, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn texture_is_opaque_and_sized() {
        let mut rng = StdRng::seed_from_u64(11);
        let tex = GroundTexture::generate(&mut rng, 64);
        assert_eq!(tex.pixels.len(), 64 * 64 * 4);
        assert!(tex.pixels.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn speckles_use_palette_only() {
        let mut rng = StdRng::seed_from_u64(5);
        let tex = GroundTexture::generate(&mut rng, GROUND_TEXTURE_SIZE);
        let allowed = [
            rgba8(GROUND_COLOR),
            rgba8(GROUND_TEXTURE_COLOR),
            rgba8(GROUND_DARK),
            rgba8(GROUND_LIGHT),
            rgba8(GROUND_STROKE),
        ];
        let mut dark = 0;
        for p in tex.pixels.chunks(4) {
            let p = [p[0], p[1], p[2], p[3]];
            assert!(allowed.contains(&p));
            if p == allowed[2] {
                dark += 1;
            }
        }
        assert!(dark > 0);
    }

    #[test]
    fn same_seed_same_texture() {
        let a = GroundTexture::generate(&mut StdRng::seed_from_u64(9), 32);
        let b = GroundTexture::generate(&mut StdRng::seed_from_u64(9), 32);
        assert_eq!(a.pixels, b.pixels);
    }
}
