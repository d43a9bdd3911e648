// src/render/mod.rs
// The boundary between the pipeline and whatever actually draws the pieces.

pub mod particle;
pub mod surface;

pub use particle::Particle;
pub use surface::{Completion, Surface};
