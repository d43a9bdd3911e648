pub mod config_load;
pub mod config_types;

pub use config_load::{Config, CONFIG_FILE};
pub use config_types::{DisintegrationConfig, LogConfig, SurfaceConfig, WindowConfig};
