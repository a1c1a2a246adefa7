//! Frame scheduler and scene context
//!
//! `Backdrop` is the single explicit scene-context object: it owns the
//! noise generator, the deforming mesh, the particle field, the camera rig
//! and the projection, with a create (`mount`) / destroy (`teardown`)
//! lifecycle driven by the host shell. There is no module-level state.
//!
//! Pointer and resize notifications arrive as messages posted into bounded
//! single-slot mailboxes and are consumed exactly once, at the top of a
//! tick. Only the latest sample matters for smoothing, so last-write-wins
//! is the intended semantics; nothing can mutate scene state mid-tick.
//!
//! After `teardown()` returns, ticks and posts are no-ops: no further
//! state mutation is possible.

use crate::blob::NoiseBlob;
use crate::camera::{CameraRig, PointerSample, Projection};
use crate::particles::ParticleField;
use crate::simplex::SimplexNoise;

/// Bounded single-slot mailbox with last-write-wins semantics.
pub struct Mailbox<T> {
    slot: Option<T>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Post a message, replacing any unconsumed one.
    pub fn post(&mut self, value: T) {
        self.slot = Some(value);
    }

    /// Consume the pending message, if any.
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The animated scene: all state behind the hero banner.
pub struct Backdrop {
    noise: SimplexNoise,
    blob: NoiseBlob,
    particles: ParticleField,
    camera: CameraRig,
    projection: Projection,
    pointer_mail: Mailbox<PointerSample>,
    resize_mail: Mailbox<(u32, u32)>,
    pointer: PointerSample,
    elapsed: f32,
    alive: bool,
}

impl Backdrop {
    /// Build the scene. Geometry, particle cloud and noise tables are
    /// created once here; per-tick state is derived fresh every frame.
    pub fn mount(seed: u64, width: u32, height: u32) -> Self {
        Self {
            noise: SimplexNoise::new(seed),
            blob: NoiseBlob::new(),
            particles: ParticleField::new(seed),
            camera: CameraRig::new(),
            projection: Projection::new(width, height),
            pointer_mail: Mailbox::new(),
            resize_mail: Mailbox::new(),
            pointer: PointerSample::default(),
            elapsed: 0.0,
            alive: true,
        }
    }

    /// Post a pointer sample; dropped after teardown.
    pub fn post_pointer(&mut self, sample: PointerSample) {
        if self.alive {
            self.pointer_mail.post(sample);
        }
    }

    /// Post a viewport resize; dropped after teardown.
    pub fn post_resize(&mut self, width: u32, height: u32) {
        if self.alive {
            self.resize_mail.post((width, height));
        }
    }

    /// One animation tick: consume mailboxes, then advance the deformer,
    /// the secondary layer, the particle field and the camera.
    pub fn tick(&mut self, dt: f32) {
        if !self.alive {
            return;
        }

        if let Some(sample) = self.pointer_mail.take() {
            self.pointer = sample;
        }
        if let Some((w, h)) = self.resize_mail.take() {
            self.projection.resize(w, h);
        }

        self.elapsed += dt;
        self.blob.advance(&self.noise, self.elapsed);
        self.particles.advance();
        self.camera.advance(self.pointer);
    }

    /// Mark the scene dead. No tick executes and no post lands afterwards.
    pub fn teardown(&mut self) {
        self.alive = false;
        self.pointer_mail.take();
        self.resize_mail.take();
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn blob(&self) -> &NoiseBlob {
        &self.blob
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn pointer(&self) -> PointerSample {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn mailbox_is_last_write_wins() {
        let mut mail = Mailbox::new();
        mail.post(1);
        mail.post(2);
        mail.post(3);
        assert_eq!(mail.take(), Some(3));
        assert_eq!(mail.take(), None);
    }

    #[test]
    fn tick_consumes_pointer_once() {
        let mut scene = Backdrop::mount(42, 640, 480);
        scene.post_pointer(PointerSample { nx: 0.5, ny: 0.5 });
        scene.tick(DT);
        assert_eq!(scene.pointer(), PointerSample { nx: 0.5, ny: 0.5 });
        // No new post: the consumed sample stays in effect
        scene.tick(DT);
        assert_eq!(scene.pointer(), PointerSample { nx: 0.5, ny: 0.5 });
    }

    #[test]
    fn resize_is_applied_at_tick_boundary() {
        let mut scene = Backdrop::mount(42, 640, 480);
        scene.post_resize(800, 600);
        // Not applied until the next tick
        assert_eq!(scene.projection().width(), 640);
        scene.tick(DT);
        assert_eq!(scene.projection().width(), 800);
        assert_eq!(scene.projection().height(), 600);
    }

    #[test]
    fn tick_advances_elapsed_time() {
        let mut scene = Backdrop::mount(42, 640, 480);
        for _ in 0..10 {
            scene.tick(DT);
        }
        assert!((scene.elapsed() - 10.0 * DT).abs() < 1e-5);
    }

    #[test]
    fn teardown_stops_all_mutation() {
        let mut scene = Backdrop::mount(42, 640, 480);
        scene.tick(DT);
        scene.teardown();
        assert!(!scene.is_alive());

        let elapsed = scene.elapsed();
        let camera = scene.camera().position();
        let rotation = scene.particles().rotation();
        let live: Vec<_> = scene.blob().live_vertices().to_vec();

        // A stray tick signal and late event posts must land on nothing.
        scene.post_pointer(PointerSample { nx: 1.0, ny: 1.0 });
        scene.post_resize(100, 100);
        scene.tick(DT);

        assert_eq!(scene.elapsed(), elapsed);
        assert_eq!(scene.camera().position(), camera);
        assert_eq!(scene.particles().rotation(), rotation);
        assert_eq!(scene.blob().live_vertices(), &live[..]);
        assert_eq!(scene.projection().width(), 640);
    }

    #[test]
    fn particle_count_survives_ticking() {
        let mut scene = Backdrop::mount(42, 640, 480);
        let count = scene.particles().count();
        for _ in 0..30 {
            scene.tick(DT);
        }
        assert_eq!(scene.particles().count(), count);
    }

    #[test]
    fn identical_seeds_play_identical_scenes() {
        let mut a = Backdrop::mount(7, 640, 480);
        let mut b = Backdrop::mount(7, 640, 480);
        for _ in 0..5 {
            a.tick(DT);
            b.tick(DT);
        }
        assert_eq!(a.blob().live_vertices(), b.blob().live_vertices());
        assert_eq!(a.camera().position(), b.camera().position());
    }
}
