// src/animation/schedule.rs
//
// Assigns every triangle of a sorted mesh its fade, shrink, spin and
// flight path. Pieces earlier in the sort order start earlier, so the
// surface crumbles from the side facing the direction of travel.
//
// Each channel gets its own small timing jitter around the stagger so
// neighbouring pieces never move in lockstep.

use nannou::geom::{pt2, Point2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::descriptor::{AnimationDescriptor, CubicPath, PathTween, Timing, Tween};
use super::easing::EasingType;
use crate::models::{Direction, Rect, Triangle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub max_begin_spread: f32, // window the start times are spread over
    pub base_duration: f32,
    pub timing_jitter: f32, // +/- applied to every begin and duration
    pub scale_min: f32,
    pub scale_max: f32,
    pub rotation_min: f32, // radians
    pub rotation_max: f32,
    pub target_jitter: f32, // +/- per axis on the flight target
    pub control_point_fraction: f32, // of min(width, height)
    pub opacity_easing: EasingType,
    pub scale_easing: EasingType,
    pub rotation_easing: EasingType,
    pub position_easing: EasingType,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_begin_spread: 2.0,
            base_duration: 3.0,
            timing_jitter: 0.1,
            scale_min: 0.2,
            scale_max: 0.4,
            rotation_min: -0.5,
            rotation_max: 0.5,
            target_jitter: 20.0,
            control_point_fraction: 1.0 / 3.0,
            opacity_easing: EasingType::EaseIn,
            scale_easing: EasingType::Linear,
            rotation_easing: EasingType::Linear,
            position_easing: EasingType::EaseIn,
        }
    }
}

impl ScheduleConfig {
    /// Time after dispatch by which every piece has finished.
    pub fn completion_delay(&self) -> f32 {
        self.max_begin_spread + self.base_duration + 2.0 * self.timing_jitter
    }
}

pub struct Scheduler {
    pub config: ScheduleConfig,
}

impl Scheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn schedule<R: Rng + ?Sized>(
        &self,
        triangles: &[Triangle],
        direction: Direction,
        bounds: &Rect,
        rng: &mut R,
    ) -> Vec<AnimationDescriptor> {
        let count = triangles.len();
        let travel = direction.travel_vector(bounds);
        let control_range = bounds.shortest_side() * self.config.control_point_fraction;

        triangles
            .iter()
            .enumerate()
            .map(|(index, triangle)| {
                let stagger = index as f32 / count as f32 * self.config.max_begin_spread;
                self.describe(index, triangle, stagger, travel, control_range, rng)
            })
            .collect()
    }

    fn describe<R: Rng + ?Sized>(
        &self,
        index: usize,
        triangle: &Triangle,
        stagger: f32,
        travel: Point2,
        control_range: f32,
        rng: &mut R,
    ) -> AnimationDescriptor {
        let anchor = triangle.anchor();

        let opacity_timing = self.timing(stagger, rng);
        let opacity = Tween {
            timing: opacity_timing,
            from: 1.0,
            to: 0.0,
            easing: self.config.opacity_easing,
        };

        let scale_target = uniform(rng, self.config.scale_min, self.config.scale_max);
        let scale = Tween {
            timing: self.timing(stagger, rng),
            from: 1.0,
            to: scale_target,
            easing: self.config.scale_easing,
        };

        let rotation_target = uniform(rng, self.config.rotation_min, self.config.rotation_max);
        let rotation = Tween {
            timing: self.timing(stagger, rng),
            from: 0.0,
            to: rotation_target,
            easing: self.config.rotation_easing,
        };

        let target_jitter = self.config.target_jitter;
        let end = anchor
            + travel
            + pt2(
                uniform(rng, -target_jitter, target_jitter),
                uniform(rng, -target_jitter, target_jitter),
            );
        let control1 = anchor + random_offset(rng, control_range);
        let control2 = end + random_offset(rng, control_range);
        let position = PathTween {
            timing: self.timing(stagger, rng),
            path: CubicPath {
                start: anchor,
                control1,
                control2,
                end,
            },
            easing: self.config.position_easing,
        };

        AnimationDescriptor {
            index,
            begin_offset: opacity_timing.begin,
            duration: opacity_timing.duration,
            anchor,
            opacity,
            scale,
            rotation,
            position,
        }
    }

    // Begin is clamped into the spread window so nothing starts before
    // dispatch or after the last stagger slot.
    fn timing<R: Rng + ?Sized>(&self, stagger: f32, rng: &mut R) -> Timing {
        let jitter = self.config.timing_jitter;
        let spread = self.config.max_begin_spread.max(0.0);
        let begin = (stagger + uniform(rng, -jitter, jitter)).clamp(0.0, spread);
        let duration = (self.config.base_duration + uniform(rng, -jitter, jitter)).max(0.0);
        Timing { begin, duration }
    }
}

/// One descriptor per triangle, in the order given.
pub fn schedule<R: Rng + ?Sized>(
    triangles: &[Triangle],
    direction: Direction,
    bounds: &Rect,
    config: &ScheduleConfig,
    rng: &mut R,
) -> Vec<AnimationDescriptor> {
    Scheduler::new(config.clone()).schedule(triangles, direction, bounds, rng)
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

fn random_offset<R: Rng + ?Sized>(rng: &mut R, range: f32) -> Point2 {
    pt2(uniform(rng, -range, range), uniform(rng, -range, range))
}
