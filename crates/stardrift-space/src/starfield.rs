//! Procedural starfield generation: deterministic star placement in the
//! scene volume around the flight path.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Half-extent of the cubic volume stars are scattered through.
pub const STAR_FIELD_HALF_EXTENT: f32 = 50.0;

/// Star tint palette: white, warm white, cool white.
pub const STAR_PALETTE: [[f32; 3]; 3] = [
    [1.0, 1.0, 1.0],
    [1.0, 0.9, 0.9],
    [0.9, 0.9, 1.0],
];

/// A single star in the generated catalog.
#[derive(Clone, Debug)]
pub struct Star {
    /// World-space position inside the scene volume.
    pub position: glam::Vec3,
    /// Base size in world units, converted to a pixel size at draw time.
    pub size: f32,
    /// Intensity multiplier in [0.5, 1.0].
    pub brightness: f32,
    /// Tint picked from [`STAR_PALETTE`].
    pub color: [f32; 3],
}

/// Generates a deterministic star catalog from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
}

impl StarfieldGenerator {
    /// Create a new generator with the given seed and star count.
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self { seed, star_count }
    }

    /// Generate the star catalog. Deterministic for a given seed.
    pub fn generate(&self) -> Vec<Star> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut stars = Vec::with_capacity(self.star_count as usize);

        for _ in 0..self.star_count {
            let e = STAR_FIELD_HALF_EXTENT;
            let position = glam::Vec3::new(
                rng.random_range(-e..=e),
                rng.random_range(-e..=e),
                rng.random_range(-e..=e),
            );
            let size = rng.random_range(0.005..=0.03);
            let brightness = rng.random_range(0.5..=1.0);
            let color = STAR_PALETTE[rng.random_range(0..STAR_PALETTE.len())];

            stars.push(Star {
                position,
                size,
                brightness,
                color,
            });
        }

        stars
    }
}
