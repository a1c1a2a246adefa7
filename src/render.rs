//! Software renderer collaborator
//!
//! Consumes the scene once per tick and draws it into the pixel buffer:
//! additive point sprites for the particle field, painter-sorted additive
//! polygon fill with normal-based lighting for the two meshes. The
//! renderer holds no state of its own; everything it needs is read from
//! the scene.

use crate::camera::Projection;
use crate::display::PixelBuffer;
use crate::math3d::{project, CameraBasis, Vec3};
use crate::scheduler::Backdrop;

/// Deep background tint
const CLEAR_COLOR: (u8, u8, u8) = (4, 4, 12);
/// Base tints for the translucent meshes
const BLOB_COLOR: (u8, u8, u8) = (96, 60, 220);
const CORE_COLOR: (u8, u8, u8) = (20, 160, 200);
/// Particles farther than this contribute nothing
const PARTICLE_FAR: f32 = 120.0;

/// Draw one complete frame of the scene.
pub fn draw(scene: &Backdrop, buffer: &mut PixelBuffer) {
    buffer.clear(CLEAR_COLOR.0, CLEAR_COLOR.1, CLEAR_COLOR.2);

    let eye = scene.camera().position();
    let basis = scene.camera().basis();
    let proj = scene.projection();

    draw_particles(scene, buffer, eye, basis, proj);

    // Blob first, core second: the core is smaller and sits inside, and
    // additive blending makes draw order between the two immaterial.
    let blob = scene.blob();
    let outer: Vec<Vec3> = blob
        .live_vertices()
        .iter()
        .map(|&v| basis.to_camera(blob.outer_world(v), eye))
        .collect();
    draw_mesh(buffer, &outer, blob.faces(), BLOB_COLOR, proj);

    let core: Vec<Vec3> = blob
        .core()
        .vertices
        .iter()
        .map(|&v| basis.to_camera(blob.core_world(v), eye))
        .collect();
    draw_mesh(buffer, &core, &blob.core().faces, CORE_COLOR, proj);
}

fn draw_particles(
    scene: &Backdrop,
    buffer: &mut PixelBuffer,
    eye: Vec3,
    basis: CameraBasis,
    proj: &Projection,
) {
    let (cx, cy) = proj.center();
    let focal = proj.focal();
    let rotation = scene.particles().rotation();

    for p in scene.particles().points() {
        let world = p.pos.rotate_xyz(rotation);
        let cam = basis.to_camera(world, eye);
        let Some((sx, sy)) = project(cam, focal, cx, cy) else {
            continue;
        };

        // Brightness falls off with distance, like the starfield it is
        let proximity = (1.0 - cam.z / PARTICLE_FAR).clamp(0.0, 1.0);
        let r = (p.color.0 as f32 * proximity) as u8;
        let g = (p.color.1 as f32 * proximity) as u8;
        let b = (p.color.2 as f32 * proximity) as u8;
        buffer.blend_pixel_additive(sx as i32, sy as i32, r, g, b);
    }
}

/// Painter-sorted additive mesh pass over camera-space vertices.
fn draw_mesh(
    buffer: &mut PixelBuffer,
    vertices: &[Vec3],
    faces: &[[usize; 3]],
    color: (u8, u8, u8),
    proj: &Projection,
) {
    let (cx, cy) = proj.center();
    let focal = proj.focal();

    // Sort faces back to front
    let mut face_depths: Vec<(usize, f32)> = faces
        .iter()
        .enumerate()
        .map(|(i, face)| {
            let center_z =
                (vertices[face[0]].z + vertices[face[1]].z + vertices[face[2]].z) / 3.0;
            (i, center_z)
        })
        .collect();
    face_depths.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut projected = Vec::with_capacity(3);
    for (face_idx, _depth) in face_depths {
        let face = &faces[face_idx];

        projected.clear();
        let mut visible = true;
        for &vi in face {
            if let Some(p) = project(vertices[vi], focal, cx, cy) {
                projected.push(p);
            } else {
                visible = false;
                break;
            }
        }
        if !visible {
            continue;
        }

        // Light from the viewer direction
        let v0 = vertices[face[0]];
        let v1 = vertices[face[1]];
        let v2 = vertices[face[2]];
        let normal = (v1 - v0).cross(&(v2 - v0)).normalize();
        let intensity = 0.25 + normal.z.abs() * 0.75;

        let r = (color.0 as f32 * intensity) as u8;
        let g = (color.1 as f32 * intensity) as u8;
        let b = (color.2 as f32 * intensity) as u8;
        buffer.fill_polygon_additive(&projected, r, g, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_a_frame_touches_the_buffer() {
        let mut scene = Backdrop::mount(42, 320, 240);
        scene.tick(1.0 / 60.0);
        let mut buffer = PixelBuffer::with_size(320, 240);
        draw(&scene, &mut buffer);
        // The clear tint alone guarantees non-zero bytes; the meshes must
        // brighten the center beyond it.
        let center = buffer.get_pixel(160, 120).unwrap();
        assert!(center.0 >= CLEAR_COLOR.0);
        assert!(center != CLEAR_COLOR, "mesh did not reach the viewport center");
    }

    #[test]
    fn drawing_does_not_mutate_scene() {
        let mut scene = Backdrop::mount(42, 320, 240);
        scene.tick(1.0 / 60.0);
        let live: Vec<_> = scene.blob().live_vertices().to_vec();
        let camera = scene.camera().position();
        let mut buffer = PixelBuffer::with_size(320, 240);
        draw(&scene, &mut buffer);
        draw(&scene, &mut buffer);
        assert_eq!(scene.blob().live_vertices(), &live[..]);
        assert_eq!(scene.camera().position(), camera);
    }
}
