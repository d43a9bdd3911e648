pub mod descriptor;
pub mod easing;
pub mod schedule;

pub use descriptor::{AnimationDescriptor, CubicPath, PathTween, Timing, Tween};
pub use easing::EasingType;
pub use schedule::{schedule, ScheduleConfig, Scheduler};
