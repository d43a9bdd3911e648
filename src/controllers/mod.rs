// src/controllers/mod.rs

pub mod disintegrator;

pub use disintegrator::{
    DisintegrationRequest, Disintegrator, PipelineEvent, PipelineState, RequestId,
    DEFAULT_TRIANGLE_COUNT,
};
