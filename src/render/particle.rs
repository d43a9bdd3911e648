// src/render/particle.rs

use nannou::geom::Point2;

use crate::animation::AnimationDescriptor;
use crate::models::{Rect, Triangle};

// One flying piece as handed to the renderer.
#[derive(Debug, Clone)]
pub struct Particle<C> {
    pub triangle: Triangle,
    // Bounds of the seam-scaled triangle; the content covers exactly this.
    pub frame: Rect,
    // Seam-scaled vertices in frame-local coordinates.
    pub clip_path: [Point2; 3],
    pub content: C,
    pub animation: AnimationDescriptor,
}

impl<C> Particle<C> {
    pub fn new(triangle: Triangle, content: C, animation: AnimationDescriptor) -> Self {
        Self {
            frame: triangle.frame(),
            clip_path: triangle.clip_path(),
            triangle,
            content,
            animation,
        }
    }
}
