// src/error.rs
//
// Error types for config loading and the disintegration pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Reasons a disintegration is abandoned before the surface is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisintegrateError {
    #[error("surface snapshot is unavailable")]
    SnapshotUnavailable,

    #[error("could not crop content for triangle {index}")]
    CropFailed { index: usize },
}
