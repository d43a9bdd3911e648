// src/services/plan.rs
//
// The whole disintegration computed in one go, without a surface.
// Handy for animators that live outside this crate: the plan
// serializes to JSON with every curve's control points.

use nannou::geom::Point2;
use rand::Rng;
use serde::{Serialize, Serializer};

use super::triangulator::Triangulator;
use crate::animation::{AnimationDescriptor, ScheduleConfig, Scheduler};
use crate::models::{Direction, Rect, Triangle};

#[derive(Debug, Clone, Serialize)]
pub struct PlannedPiece {
    #[serde(serialize_with = "serialize_triangle")]
    pub triangle: Triangle,
    pub frame: Rect,
    pub animation: AnimationDescriptor,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisintegrationPlan {
    pub bounds: Rect,
    pub direction: Direction,
    pub completion_delay: f32,
    pub pieces: Vec<PlannedPiece>,
}

impl DisintegrationPlan {
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn plan<R: Rng + ?Sized>(
    triangulator: &Triangulator,
    bounds: Rect,
    estimated_count: usize,
    direction: Direction,
    config: &ScheduleConfig,
    rng: &mut R,
) -> DisintegrationPlan {
    let triangles = triangulator.triangulate(bounds, estimated_count, direction, rng);
    let descriptors = Scheduler::new(config.clone()).schedule(&triangles, direction, &bounds, rng);

    let pieces = triangles
        .into_iter()
        .zip(descriptors)
        .map(|(triangle, animation)| PlannedPiece {
            frame: triangle.frame(),
            triangle,
            animation,
        })
        .collect();

    DisintegrationPlan {
        bounds,
        direction,
        completion_delay: config.completion_delay(),
        pieces,
    }
}

fn serialize_triangle<S: Serializer>(triangle: &Triangle, serializer: S) -> Result<S::Ok, S::Error> {
    let points: [[f32; 2]; 3] = triangle.vertices.map(|p: Point2| [p.x, p.y]);
    points.serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_plan_pairs_triangles_with_descriptors() {
        let bounds = Rect::from_size(200.0, 100.0);
        let plan = plan(
            &Triangulator::default(),
            bounds,
            50,
            Direction::UpperLeft,
            &ScheduleConfig::default(),
            &mut StdRng::seed_from_u64(12),
        );

        assert!(!plan.is_empty());
        for (i, piece) in plan.pieces.iter().enumerate() {
            assert_eq!(piece.animation.index, i);
            assert_eq!(piece.animation.anchor, piece.frame.center());
        }
    }

    #[test]
    fn test_plan_json() {
        let plan = plan(
            &Triangulator::default(),
            Rect::from_size(100.0, 100.0),
            4,
            Direction::LowerRight,
            &ScheduleConfig::default(),
            &mut StdRng::seed_from_u64(3),
        );
        let json = plan.to_json().expect("plan serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["direction"], "lower-right");
        assert_eq!(value["pieces"].as_array().map(Vec::len), Some(6));
        let path = &value["pieces"][0]["animation"]["position"]["path"];
        assert_eq!(path["start"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["pieces"][0]["animation"]["opacity"]["easing"], "ease-in");
    }

    #[test]
    fn test_empty_bounds_plan() {
        let plan = plan(
            &Triangulator::default(),
            Rect::from_size(0.0, 100.0),
            66,
            Direction::Up,
            &ScheduleConfig::default(),
            &mut StdRng::seed_from_u64(3),
        );
        assert!(plan.is_empty());
    }
}
