use rand::Rng;

use super::canvas::{Point, Size};
use super::palette::Palette;

pub const PARTICLE_COUNT: usize = 50;
pub const MIN_RADIUS: f32 = 2.0;
pub const MAX_RADIUS: f32 = 7.0;
pub const MAX_SPEED: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Point,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: String,
}

impl Particle {
    /// Moves by one velocity step, then reflects each velocity component
    /// whose axis is past the bounds and still heading outwards.
    ///
    /// No clamping: a particle may sit slightly outside the bounds for one
    /// frame before the flipped velocity brings it back.
    pub fn advance(&mut self, bounds: Size) {
        self.pos.x += self.vx;
        self.pos.y += self.vy;

        if (self.pos.x < 0.0 && self.vx < 0.0) || (self.pos.x > bounds.width && self.vx > 0.0) {
            self.vx = -self.vx;
        }
        if (self.pos.y < 0.0 && self.vy < 0.0) || (self.pos.y > bounds.height && self.vy > 0.0) {
            self.vy = -self.vy;
        }
    }
}

/// Exactly `PARTICLE_COUNT` particles, uniformly placed inside `bounds`.
pub fn spawn<R: Rng>(rng: &mut R, bounds: Size, palette: &Palette) -> Vec<Particle> {
    (0..PARTICLE_COUNT)
        .map(|i| Particle {
            pos: Point::new(
                uniform(rng, 0.0, bounds.width),
                uniform(rng, 0.0, bounds.height),
            ),
            radius: uniform(rng, MIN_RADIUS, MAX_RADIUS),
            vx: uniform(rng, -MAX_SPEED, MAX_SPEED),
            vy: uniform(rng, -MAX_SPEED, MAX_SPEED),
            color: palette.color_for(i).to_string(),
        })
        .collect()
}

// gen_range panics on an empty range, a zero-sized surface gives one
fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}
