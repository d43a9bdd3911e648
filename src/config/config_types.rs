// src/config/config_types.rs
//
// Sections of config.toml. Every field has a default so a partial file works.

use serde::Deserialize;

use crate::models::Direction;
use crate::services::DiagonalSplit;
use crate::utilities::logging::LoggingConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    // device pixels per logical unit
    pub scale_factor: f32,
    // size of the checker tiles painted on the demo panel
    pub tile_size: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            tile_size: 40.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisintegrationConfig {
    pub estimated_triangle_count: usize,
    // Fixed seed for repeatable meshes; random when absent.
    pub seed: Option<u64>,
    pub split: DiagonalSplit,
    // Direction used when a request doesn't name one; random when absent.
    pub direction: Option<Direction>,
}

impl Default for DisintegrationConfig {
    fn default() -> Self {
        Self {
            estimated_triangle_count: 66,
            seed: None,
            split: DiagonalSplit::default(),
            direction: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: Option<String>,
}

impl LogConfig {
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.filter.clone(),
            ..LoggingConfig::default()
        }
    }
}
