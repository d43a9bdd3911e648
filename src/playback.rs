// src/playback.rs
//
// Evaluates scheduled curves per frame for the demo window.

use nannou::geom::{pt2, Point2};
use shatter::animation::{AnimationDescriptor, CubicPath, PathTween, Tween};
use shatter::Particle;

#[derive(Debug, Clone, Copy)]
pub struct Pose {
    pub position: Point2,
    pub scale: f32,
    pub rotation: f32,
    pub opacity: f32,
}

pub fn pose_at(animation: &AnimationDescriptor, elapsed: f32) -> Pose {
    Pose {
        position: sample_path(&animation.position, elapsed),
        scale: sample(&animation.scale, elapsed),
        rotation: sample(&animation.rotation, elapsed),
        opacity: sample(&animation.opacity, elapsed),
    }
}

// Particle vertices at `elapsed`, still in surface coordinates.
pub fn vertices_at<C>(particle: &Particle<C>, pose: &Pose) -> [Point2; 3] {
    let origin = particle.frame.top_left();
    let anchor = particle.animation.anchor;
    let (sin, cos) = pose.rotation.sin_cos();
    particle.clip_path.map(|local| {
        let offset = (origin + local - anchor) * pose.scale;
        pose.position + pt2(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos)
    })
}

fn progress(begin: f32, duration: f32, elapsed: f32) -> f32 {
    if duration <= 0.0 {
        return if elapsed >= begin { 1.0 } else { 0.0 };
    }
    ((elapsed - begin) / duration).clamp(0.0, 1.0)
}

fn sample(tween: &Tween, elapsed: f32) -> f32 {
    let t = tween
        .easing
        .apply(progress(tween.timing.begin, tween.timing.duration, elapsed));
    tween.from + (tween.to - tween.from) * t
}

fn sample_path(tween: &PathTween, elapsed: f32) -> Point2 {
    let t = tween
        .easing
        .apply(progress(tween.timing.begin, tween.timing.duration, elapsed));
    bezier(&tween.path, t)
}

fn bezier(path: &CubicPath, t: f32) -> Point2 {
    let u = 1.0 - t;
    path.start * (u * u * u)
        + path.control1 * (3.0 * u * u * t)
        + path.control2 * (3.0 * u * t * t)
        + path.end * (t * t * t)
}
