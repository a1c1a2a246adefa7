//! Noise-deformed hero mesh and its nested core layer.
//!
//! The outer blob is a fixed icosphere whose live vertex buffer is
//! recomputed in full every tick from 4D simplex noise: each vertex is
//! displaced along its own outward normal by the noise value sampled at
//! (base position * spatial scale, elapsed time * temporal rate). There is
//! no incremental update; the live buffer is always derived fresh from the
//! immutable base, so the surface motion is seamless and fully determined
//! by (seed, elapsed).
//!
//! The core is a smaller mesh nested inside the blob through an explicit
//! parent-child transform graph; it spins at a constant angular rate and
//! pulses on a sinusoid, with no dependency on the noise field.

use crate::math3d::{Mesh, Vec3};
use crate::simplex::SimplexNoise;

const BLOB_RADIUS: f32 = 8.0;
const BLOB_SUBDIVISIONS: u32 = 3;
const DISPLACEMENT_AMPLITUDE: f32 = 1.6;
const SPATIAL_SCALE: f64 = 0.12;
const TEMPORAL_RATE: f64 = 0.4;
// Slow drift of the whole blob node
const DRIFT_RATE: f32 = 0.05;

const CORE_RADIUS: f32 = 3.2;
const CORE_SPIN: Vec3 = Vec3::new(0.45, 0.7, 0.2);
const CORE_PULSE_DEPTH: f32 = 0.12;
const CORE_PULSE_RATE: f32 = 2.0;

/// One node of the parent-child transform graph: a rotation followed by a
/// uniform scale about the origin.
#[derive(Debug, Clone, Copy)]
pub struct TransformNode {
    pub rotation: Vec3,
    pub scale: f32,
}

impl TransformNode {
    pub const fn identity() -> Self {
        Self {
            rotation: Vec3::zero(),
            scale: 1.0,
        }
    }

    /// Apply this node's local transform to a point.
    #[inline]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        v.rotate_xyz(self.rotation) * self.scale
    }
}

/// The deforming hero mesh plus its nested core.
pub struct NoiseBlob {
    base: Vec<Vec3>,
    live: Vec<Vec3>,
    faces: Vec<[usize; 3]>,
    core: Mesh,
    outer_node: TransformNode,
    core_node: TransformNode,
    amplitude: f32,
}

impl NoiseBlob {
    pub fn new() -> Self {
        Self::with_amplitude(DISPLACEMENT_AMPLITUDE)
    }

    /// Construct with an explicit displacement amplitude.
    pub fn with_amplitude(amplitude: f32) -> Self {
        let mesh = Mesh::icosphere(BLOB_RADIUS, BLOB_SUBDIVISIONS);
        let live = mesh.vertices.clone();
        Self {
            base: mesh.vertices,
            live,
            faces: mesh.faces,
            core: Mesh::icosahedron(CORE_RADIUS),
            outer_node: TransformNode::identity(),
            core_node: TransformNode::identity(),
            amplitude,
        }
    }

    /// Recompute the live vertex buffer and both node transforms for the
    /// given elapsed time.
    pub fn advance(&mut self, noise: &SimplexNoise, elapsed: f32) {
        for (out, &orig) in self.live.iter_mut().zip(&self.base) {
            let n = noise.noise4d(
                f64::from(orig.x) * SPATIAL_SCALE,
                f64::from(orig.y) * SPATIAL_SCALE,
                f64::from(orig.z) * SPATIAL_SCALE,
                f64::from(elapsed) * TEMPORAL_RATE,
            );
            *out = orig + orig.normalize() * (n as f32 * self.amplitude);
        }

        self.outer_node.rotation = Vec3::new(0.0, elapsed * DRIFT_RATE, 0.0);

        // Core motion: constant-rate spin plus sinusoidal pulse, noise-free.
        self.core_node.rotation = CORE_SPIN * elapsed;
        self.core_node.scale = 1.0 + CORE_PULSE_DEPTH * (elapsed * CORE_PULSE_RATE).sin();
    }

    /// Live vertices in blob-local space (pre-transform).
    pub fn live_vertices(&self) -> &[Vec3] {
        &self.live
    }

    pub fn base_vertices(&self) -> &[Vec3] {
        &self.base
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn core(&self) -> &Mesh {
        &self.core
    }

    /// Blob-local point -> world, through the outer node.
    #[inline]
    pub fn outer_world(&self, v: Vec3) -> Vec3 {
        self.outer_node.apply(v)
    }

    /// Core-local point -> world: the core rides inside the outer node, so
    /// its local transform composes with the parent's.
    #[inline]
    pub fn core_world(&self, v: Vec3) -> Vec3 {
        self.outer_node.apply(self.core_node.apply(v))
    }

    pub fn core_node(&self) -> &TransformNode {
        &self.core_node
    }
}

impl Default for NoiseBlob {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amplitude_reproduces_base_buffer() {
        let noise = SimplexNoise::new(42);
        let mut blob = NoiseBlob::with_amplitude(0.0);
        for tick in 0..10 {
            blob.advance(&noise, tick as f32 * 0.016);
            assert_eq!(blob.live_vertices(), blob.base_vertices());
        }
    }

    #[test]
    fn live_buffer_is_rederived_each_tick() {
        // Returning to the same elapsed time returns the exact same surface:
        // no state accumulates between ticks.
        let noise = SimplexNoise::new(42);
        let mut blob = NoiseBlob::new();
        blob.advance(&noise, 1.25);
        let first: Vec<_> = blob.live_vertices().to_vec();
        blob.advance(&noise, 7.5);
        blob.advance(&noise, 1.25);
        assert_eq!(blob.live_vertices(), &first[..]);
    }

    #[test]
    fn displacement_is_along_vertex_normal() {
        let noise = SimplexNoise::new(42);
        let mut blob = NoiseBlob::new();
        blob.advance(&noise, 0.5);
        for (live, base) in blob.live_vertices().iter().zip(blob.base_vertices()) {
            let offset = *live - *base;
            if offset.length() > 1e-4 {
                // Offset must be parallel to the outward normal
                let cross = offset.cross(&base.normalize());
                assert!(cross.length() < 1e-3);
            }
            assert!(offset.length() <= DISPLACEMENT_AMPLITUDE * 1.05);
        }
    }

    #[test]
    fn core_motion_is_noise_independent() {
        // Two blobs driven by differently seeded noise still agree on the
        // core transform.
        let noise_a = SimplexNoise::new(1);
        let noise_b = SimplexNoise::new(2);
        let mut a = NoiseBlob::new();
        let mut b = NoiseBlob::new();
        a.advance(&noise_a, 3.7);
        b.advance(&noise_b, 3.7);
        assert_eq!(a.core_node().rotation, b.core_node().rotation);
        assert_eq!(a.core_node().scale, b.core_node().scale);
    }

    #[test]
    fn core_world_composes_parent_transform() {
        let noise = SimplexNoise::new(42);
        let mut blob = NoiseBlob::new();
        blob.advance(&noise, 2.0);
        let p = Vec3::new(1.0, 0.5, -0.25);
        let expected = blob.outer_world(blob.core_node().apply(p));
        assert!(blob.core_world(p).approx_eq(&expected, 1e-6));
    }

    #[test]
    fn core_pulse_stays_near_unit_scale() {
        let noise = SimplexNoise::new(42);
        let mut blob = NoiseBlob::new();
        for i in 0..200 {
            blob.advance(&noise, i as f32 * 0.1);
            let s = blob.core_node().scale;
            assert!(s >= 1.0 - CORE_PULSE_DEPTH - 1e-6);
            assert!(s <= 1.0 + CORE_PULSE_DEPTH + 1e-6);
        }
    }
}
