// src/config/config_load.rs
//
// loading config.toml

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::config_types::{DisintegrationConfig, LogConfig, SurfaceConfig, WindowConfig};
use crate::animation::ScheduleConfig;
use crate::error::ConfigError;
use crate::services::Triangulator;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub surface: SurfaceConfig,
    pub disintegration: DisintegrationConfig,
    pub animation: ScheduleConfig,
    pub logging: LogConfig,
}

impl Config {
    /// Loads config.toml from beside the executable, falling back to the
    /// working directory.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::exe_dir_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Self::from_path(Path::new(CONFIG_FILE)),
        }
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            warn!("{}; using default configuration", err);
            Self::default()
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn exe_dir_path() -> Option<PathBuf> {
        let exe_path = std::env::current_exe().ok()?;
        Some(exe_path.parent()?.join(CONFIG_FILE))
    }

    pub fn triangulator(&self) -> Triangulator {
        Triangulator::new(self.disintegration.split)
    }

    pub fn rng(&self) -> StdRng {
        match self.disintegration.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingType;
    use crate::models::Direction;
    use crate::services::DiagonalSplit;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [disintegration]
            estimated_triangle_count = 120
            seed = 42
            split = "legacy"
            direction = "lower-left"

            [animation]
            base_duration = 1.5
            position_easing = "ease-in-out"
            "#,
        )
        .unwrap();

        assert_eq!(config.disintegration.estimated_triangle_count, 120);
        assert_eq!(config.disintegration.seed, Some(42));
        assert_eq!(config.disintegration.split, DiagonalSplit::Legacy);
        assert_eq!(config.disintegration.direction, Some(Direction::LowerLeft));
        assert_eq!(config.animation.base_duration, 1.5);
        assert_eq!(config.animation.max_begin_spread, 2.0);
        assert_eq!(config.animation.position_easing, EasingType::EaseInOut);
        assert_eq!(config.animation.opacity_easing, EasingType::EaseIn);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.surface.scale_factor, 1.0);
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.disintegration.estimated_triangle_count, 66);
        assert_eq!(config.disintegration.split, DiagonalSplit::Alternating);
        assert!((config.animation.completion_delay() - 5.2).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_rng_repeats() {
        use rand::Rng;
        let config: Config = toml::from_str("[disintegration]\nseed = 7").unwrap();
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = Path::new("definitely/not/here/config.toml");
        match Config::from_path(path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let dir = std::env::temp_dir().join("shatter-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        fs::write(&path, "[window\nwidth = ").unwrap();
        assert!(matches!(
            Config::from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
