// src/animation/descriptor.rs
//
// What one triangle does while it disintegrates.
// Times are in seconds relative to the moment the effect is dispatched.

use nannou::geom::Point2;
use serde::{Serialize, Serializer};

use super::easing::EasingType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
    pub begin: f32,
    pub duration: f32,
}

impl Timing {
    pub fn end(&self) -> f32 {
        self.begin + self.duration
    }
}

// A scalar channel (opacity, scale, rotation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tween {
    pub timing: Timing,
    pub from: f32,
    pub to: f32,
    pub easing: EasingType,
}

// Control points of a cubic Bézier in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicPath {
    #[serde(serialize_with = "serialize_point")]
    pub start: Point2,
    #[serde(serialize_with = "serialize_point")]
    pub control1: Point2,
    #[serde(serialize_with = "serialize_point")]
    pub control2: Point2,
    #[serde(serialize_with = "serialize_point")]
    pub end: Point2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathTween {
    pub timing: Timing,
    pub path: CubicPath,
    pub easing: EasingType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationDescriptor {
    /// Position of the triangle in the sorted mesh.
    pub index: usize,
    /// Staggered start of the fade, within `0..=max_begin_spread`.
    pub begin_offset: f32,
    pub duration: f32,
    #[serde(serialize_with = "serialize_point")]
    pub anchor: Point2,
    pub opacity: Tween,
    pub scale: Tween,
    /// Radians.
    pub rotation: Tween,
    pub position: PathTween,
}

impl AnimationDescriptor {
    pub fn timings(&self) -> [Timing; 4] {
        [
            self.opacity.timing,
            self.scale.timing,
            self.rotation.timing,
            self.position.timing,
        ]
    }

    // When the last channel of this triangle finishes.
    pub fn end_time(&self) -> f32 {
        self.timings()
            .iter()
            .map(Timing::end)
            .fold(0.0, f32::max)
    }
}

fn serialize_point<S: Serializer>(point: &Point2, serializer: S) -> Result<S::Ok, S::Error> {
    [point.x, point.y].serialize(serializer)
}
