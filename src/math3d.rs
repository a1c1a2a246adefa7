//! 3D math for the backdrop scene
//!
//! Vector operations, Euler rotations, the icosphere base mesh, and the
//! camera-space transform used by the renderer.

use std::collections::HashMap;
use std::ops::{Add, Mul, Neg, Sub};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Normalize; the zero vector is returned unchanged.
    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            *self
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Approximate equality for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Rotate around X axis
    #[inline]
    pub fn rotate_x(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotate around Y axis
    #[inline]
    pub fn rotate_y(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Rotate around Z axis
    #[inline]
    pub fn rotate_z(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }

    /// Apply all three rotations in X, Y, Z order
    #[inline]
    pub fn rotate_xyz(&self, angles: Vec3) -> Self {
        self.rotate_x(angles.x).rotate_y(angles.y).rotate_z(angles.z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

// ============================================================================
// Camera space
// ============================================================================

/// Orthonormal camera basis; transforms world points into a space where the
/// view direction is +Z, ready for perspective projection.
#[derive(Debug, Clone, Copy)]
pub struct CameraBasis {
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl CameraBasis {
    /// Build a basis for an eye looking at `target` with world-up +Y.
    pub fn look_at(eye: Vec3, target: Vec3) -> Self {
        let world_up = Vec3::new(0.0, 1.0, 0.0);
        let forward = (target - eye).normalize();
        let mut right = forward.cross(&world_up);
        if right.length() < 1e-6 {
            // Looking straight up/down; any horizontal axis works
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        let right = right.normalize();
        let up = right.cross(&forward);
        Self { right, up, forward }
    }

    /// World point -> camera space (view direction along +Z).
    #[inline]
    pub fn to_camera(&self, point: Vec3, eye: Vec3) -> Vec3 {
        let rel = point - eye;
        Vec3::new(
            rel.dot(&self.right),
            rel.dot(&self.up),
            rel.dot(&self.forward),
        )
    }
}

/// Project a camera-space point to screen coordinates.
///
/// - `focal`: distance from eye to projection plane in pixels
/// - `cx`, `cy`: screen center
///
/// Returns None if the point is behind the camera.
#[inline]
pub fn project(point: Vec3, focal: f32, cx: f32, cy: f32) -> Option<(f32, f32)> {
    if point.z <= 0.0 {
        return None;
    }
    let scale = focal / point.z;
    Some((cx + point.x * scale, cy - point.y * scale))
}

// ============================================================================
// Mesh
// ============================================================================

/// A triangle mesh; `vertices` is the immutable base vertex set captured at
/// creation time.
#[derive(Clone)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Create an icosphere: an icosahedron subdivided `subdivisions` times,
    /// every vertex pushed out to `radius`.
    pub fn icosphere(radius: f32, subdivisions: u32) -> Self {
        // Midpoint helper; caches shared edges so subdivision does not
        // duplicate vertices.
        fn midpoint(
            vertices: &mut Vec<Vec3>,
            cache: &mut HashMap<(usize, usize), usize>,
            i0: usize,
            i1: usize,
            radius: f32,
        ) -> usize {
            let key = if i0 < i1 { (i0, i1) } else { (i1, i0) };
            if let Some(&idx) = cache.get(&key) {
                return idx;
            }
            let v0 = vertices[i0];
            let v1 = vertices[i1];
            let mid = Vec3::new(
                (v0.x + v1.x) / 2.0,
                (v0.y + v1.y) / 2.0,
                (v0.z + v1.z) / 2.0,
            )
            .normalize()
                * radius;
            let idx = vertices.len();
            vertices.push(mid);
            cache.insert(key, idx);
            idx
        }

        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let mut vertices = vec![
            Vec3::new(-1.0, t, 0.0).normalize() * radius,
            Vec3::new(1.0, t, 0.0).normalize() * radius,
            Vec3::new(-1.0, -t, 0.0).normalize() * radius,
            Vec3::new(1.0, -t, 0.0).normalize() * radius,
            Vec3::new(0.0, -1.0, t).normalize() * radius,
            Vec3::new(0.0, 1.0, t).normalize() * radius,
            Vec3::new(0.0, -1.0, -t).normalize() * radius,
            Vec3::new(0.0, 1.0, -t).normalize() * radius,
            Vec3::new(t, 0.0, -1.0).normalize() * radius,
            Vec3::new(t, 0.0, 1.0).normalize() * radius,
            Vec3::new(-t, 0.0, -1.0).normalize() * radius,
            Vec3::new(-t, 0.0, 1.0).normalize() * radius,
        ];

        let mut faces = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            let mut new_faces = Vec::with_capacity(faces.len() * 4);
            let mut cache: HashMap<(usize, usize), usize> = HashMap::new();

            for face in &faces {
                let [v0, v1, v2] = *face;
                let a = midpoint(&mut vertices, &mut cache, v0, v1, radius);
                let b = midpoint(&mut vertices, &mut cache, v1, v2, radius);
                let c = midpoint(&mut vertices, &mut cache, v2, v0, radius);

                new_faces.push([v0, a, c]);
                new_faces.push([v1, b, a]);
                new_faces.push([v2, c, b]);
                new_faces.push([a, b, c]);
            }

            faces = new_faces;
        }

        Self { vertices, faces }
    }

    /// Plain icosahedron (no subdivision); used for the core layer.
    pub fn icosahedron(radius: f32) -> Self {
        Self::icosphere(radius, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::zero().normalize(), Vec3::zero());
    }

    #[test]
    fn cross_is_orthogonal() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-2.0, 0.5, 4.0);
        let c = a.cross(&b);
        assert!(c.dot(&a).abs() < 1e-4);
        assert!(c.dot(&b).abs() < 1e-4);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let r = v.rotate_xyz(Vec3::new(0.3, -1.2, 2.5));
        assert!((r.length() - v.length()).abs() < 1e-4);
    }

    #[test]
    fn icosphere_tessellation_counts() {
        // 20 * 4^n faces; vertex count from Euler's formula (V = F/2 + 2)
        for (subdiv, faces, verts) in [(0, 20, 12), (1, 80, 42), (2, 320, 162), (3, 1280, 642)] {
            let m = Mesh::icosphere(8.0, subdiv);
            assert_eq!(m.faces.len(), faces);
            assert_eq!(m.vertices.len(), verts);
        }
    }

    #[test]
    fn icosphere_vertices_on_radius() {
        let m = Mesh::icosphere(8.0, 2);
        for v in &m.vertices {
            assert!((v.length() - 8.0).abs() < 1e-3);
        }
    }

    #[test]
    fn look_at_faces_target() {
        let eye = Vec3::new(3.0, -2.0, 26.0);
        let basis = CameraBasis::look_at(eye, Vec3::zero());
        // The origin lands on the +Z axis in camera space
        let origin_cam = basis.to_camera(Vec3::zero(), eye);
        assert!(origin_cam.x.abs() < 1e-4);
        assert!(origin_cam.y.abs() < 1e-4);
        assert!((origin_cam.z - eye.length()).abs() < 1e-3);
    }

    #[test]
    fn project_rejects_points_behind_camera() {
        assert!(project(Vec3::new(0.0, 0.0, -1.0), 400.0, 320.0, 240.0).is_none());
        assert!(project(Vec3::new(0.0, 0.0, 0.0), 400.0, 320.0, 240.0).is_none());
        let (sx, sy) = project(Vec3::new(0.0, 0.0, 10.0), 400.0, 320.0, 240.0).unwrap();
        assert_eq!((sx, sy), (320.0, 240.0));
    }
}
