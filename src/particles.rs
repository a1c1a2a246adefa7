//! Ambient particle field
//!
//! A large fixed-count point cloud suggesting depth behind the hero mesh.
//! Positions and colors are set once at construction; the only per-tick
//! mutation is a whole-field rotation advancing by a fixed per-axis
//! increment. The increment is per tick, not time-scaled -- the drift is
//! slow enough that frame-rate dependence is invisible, and it keeps the
//! update free of any time plumbing.

use crate::math3d::Vec3;
use crate::util::Rng;

pub const PARTICLE_COUNT: usize = 15_000;
pub const FIELD_HALF_EXTENT: f32 = 60.0;

/// Fixed palette; each point picks one entry uniformly.
pub const PALETTE: [(u8, u8, u8); 4] = [
    (139, 92, 246),  // violet
    (56, 189, 248),  // sky
    (6, 182, 212),   // cyan
    (244, 114, 182), // pink
];

/// Per-axis rotation increment per tick
const ROTATE_STEP: Vec3 = Vec3::new(0.0004, 0.0007, 0.0002);

/// A single point: immutable position and color.
#[derive(Debug, Clone, Copy)]
pub struct ParticlePoint {
    pub pos: Vec3,
    pub color: (u8, u8, u8),
}

/// The whole field; owns the points and the current field rotation.
pub struct ParticleField {
    points: Vec<ParticlePoint>,
    rotation: Vec3,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self::with_count(PARTICLE_COUNT, FIELD_HALF_EXTENT, seed)
    }

    /// Construct with explicit count and cube half-extent.
    pub fn with_count(count: usize, half_extent: f32, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = Vec3::new(
                rng.range_f32(-half_extent, half_extent),
                rng.range_f32(-half_extent, half_extent),
                rng.range_f32(-half_extent, half_extent),
            );
            let color = PALETTE[rng.next_index(PALETTE.len())];
            points.push(ParticlePoint { pos, color });
        }
        Self {
            points,
            rotation: Vec3::zero(),
        }
    }

    /// Advance the whole-field rotation by one tick.
    pub fn advance(&mut self) {
        self.rotation = self.rotation + ROTATE_STEP;
    }

    pub fn points(&self) -> &[ParticlePoint] {
        &self.points
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }
}
