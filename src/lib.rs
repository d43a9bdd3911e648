// src/lib.rs
//
// shatter: break a rectangular surface into a triangle mesh and
// schedule the pieces to fly off in one of eight directions.

pub mod animation;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod utilities;

pub use animation::{AnimationDescriptor, ScheduleConfig};
pub use controllers::{Disintegrator, DisintegrationRequest, PipelineEvent, PipelineState};
pub use error::{ConfigError, DisintegrateError};
pub use models::{Direction, Rect, Triangle};
pub use render::{Completion, Particle, Surface};
pub use services::{triangulate, DiagonalSplit, Triangulator};
