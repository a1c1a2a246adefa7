//! Camera rig and projection
//!
//! The rig eases toward a pointer-derived target every tick and always
//! faces the scene origin, so pointer motion pans the view without ever
//! snapping. The projection owns the viewport-derived parameters and is
//! recomputed only on resize, never in the per-tick path.

use crate::math3d::{CameraBasis, Vec3};

const SMOOTHING: f32 = 0.05;
const PAN_RANGE: f32 = 6.0;
const CAMERA_DEPTH: f32 = 26.0;
const FOV_Y_DEGREES: f32 = 55.0;

/// Latest pointer position, as normalized offsets from the viewport center
/// in [-1, 1] on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub nx: f32,
    pub ny: f32,
}

impl PointerSample {
    /// Build from pixel coordinates and the current viewport size.
    pub fn from_viewport(x: i32, y: i32, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::default();
        }
        let half_w = width as f32 / 2.0;
        let half_h = height as f32 / 2.0;
        Self {
            nx: (x as f32 - half_w) / half_w,
            ny: (y as f32 - half_h) / half_h,
        }
    }
}

/// Smoothed viewpoint that follows pointer intent.
pub struct CameraRig {
    position: Vec3,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_DEPTH),
        }
    }

    /// One tick of exponential smoothing toward the pointer-derived target.
    pub fn advance(&mut self, pointer: PointerSample) {
        let target = Self::target_for(pointer);
        self.position = self.position + (target - self.position) * SMOOTHING;
    }

    /// Where the rig is heading for a given pointer sample.
    pub fn target_for(pointer: PointerSample) -> Vec3 {
        Vec3::new(
            pointer.nx * PAN_RANGE,
            -pointer.ny * PAN_RANGE,
            CAMERA_DEPTH,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Look-at basis toward the scene origin.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::look_at(self.position, Vec3::zero())
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Viewport-derived projection parameters.
///
/// Recomputed on resize only; a zero-area viewport is rejected and the
/// previous parameters stay in effect, so the aspect division can never
/// hit zero.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    width: u32,
    height: u32,
    aspect: f32,
    focal: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        let mut proj = Self {
            width: 1,
            height: 1,
            aspect: 1.0,
            focal: 1.0,
        };
        proj.resize(width, height);
        proj
    }

    /// Recompute for a new viewport. Zero-area viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.aspect = width as f32 / height as f32;
        let half_fov = FOV_Y_DEGREES.to_radians() / 2.0;
        self.focal = (height as f32 / 2.0) / half_fov.tan();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Distance from eye to the projection plane, in pixels.
    pub fn focal(&self) -> f32 {
        self.focal
    }

    /// Screen center
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}
