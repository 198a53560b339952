// Shape generators: each one rewrites every position slot in the buffer.
// Particles are sampled independently, so every call produces a fresh cloud.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::particles::ParticleBuffer;

/// Which generator is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Heart,
    Ring,
    Burst,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Heart, Shape::Ring, Shape::Burst];

    /// Mode index -> shape (wraps, so any index is valid).
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        match self {
            Shape::Heart => 0,
            Shape::Ring => 1,
            Shape::Burst => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Heart => "HEART",
            Shape::Ring => "RING",
            Shape::Burst => "BURST",
        }
    }

    /// Run this shape's generator over the whole buffer.
    pub fn generate<R: Rng + ?Sized>(self, buf: &mut ParticleBuffer, rng: &mut R) {
        match self {
            Shape::Heart => generate_heart(buf, rng),
            Shape::Ring => generate_ring(buf, rng),
            Shape::Burst => generate_burst(buf, rng),
        }
    }
}

/// Heart curve outline in XY (doubled), random depth in [-5, 5).
/// Visual: a flat, noisy heart silhouette rather than a filled volume.
pub fn generate_heart<R: Rng + ?Sized>(buf: &mut ParticleBuffer, rng: &mut R) {
    for i in 0..buf.len() {
        let t = rng.gen_range(0.0..TAU);
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos();
        let z = rng.gen_range(-5.0..5.0);
        buf.set_position(i, Vec3::new(x * 2.0, y * 2.0, z));
    }
}

/// Flat annulus in XZ, radius in [40, 50), thin vertical jitter in [-2.5, 2.5).
pub fn generate_ring<R: Rng + ?Sized>(buf: &mut ParticleBuffer, rng: &mut R) {
    for i in 0..buf.len() {
        let angle = rng.gen_range(0.0..TAU);
        let radius = rng.gen_range(40.0..50.0);
        let y = rng.gen_range(-2.5..2.5);
        buf.set_position(i, Vec3::new(angle.cos() * radius, y, angle.sin() * radius));
    }
}

/// Solid sphere of radius 50. Radius is uniform in r (not r^3), so the
/// cloud is denser towards the centre.
pub fn generate_burst<R: Rng + ?Sized>(buf: &mut ParticleBuffer, rng: &mut R) {
    for i in 0..buf.len() {
        let r = rng.gen_range(0.0..50.0);
        let theta = rng.gen_range(0.0..TAU);
        let phi = rng.gen_range(0.0..PI);
        buf.set_position(
            i,
            Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.cos(),
                r * phi.sin() * theta.sin(),
            ),
        );
    }
}
