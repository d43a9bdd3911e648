// src/render/surface.rs
//
// What a host has to provide for a surface to be disintegrated.
//
// The crate never draws anything itself. A Surface hands out a snapshot
// of its current look, cuts that snapshot into per-triangle content,
// and then plays the scheduled curves on its own clock.

use super::particle::Particle;
use crate::models::Rect;

/// Called once by the renderer when every particle has finished.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

pub trait Surface {
    type Snapshot;
    type Content;

    // Logical bounds the mesh is built for.
    fn bounds(&self) -> Rect;

    // Device pixels per logical unit, used when cropping.
    fn scale_factor(&self) -> f32 {
        1.0
    }

    /// Captures the surface as it looks right now. `None` aborts the
    /// effect before anything on the surface changes.
    fn capture(&mut self) -> Option<Self::Snapshot>;

    /// Cuts the content under `pixel_rect` (device pixels) out of the snapshot.
    fn crop(&self, snapshot: &Self::Snapshot, pixel_rect: Rect) -> Option<Self::Content>;

    // Hide the original content while the particles play.
    fn hide_content(&mut self);

    /// Starts playing the particles. `on_finished` must be called once,
    /// no earlier than `finish_after` seconds from now.
    fn present(
        &mut self,
        particles: Vec<Particle<Self::Content>>,
        finish_after: f32,
        on_finished: Completion,
    );
}
