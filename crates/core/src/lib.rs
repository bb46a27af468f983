//! Climate API Core Library
//!
//! Shared pieces used by the API server:
//! - Configuration discovery and loading (XDG-compliant)
//! - Filesystem checks
//! - Application constants

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{is_file, path_exists};

/// Application name used for XDG and system config paths
pub const APP_NAME: &str = "climate-api";

/// Config file name searched for in each location
pub const CONFIG_FILE_NAME: &str = "climate.toml";

/// Environment variable holding an explicit config file path
pub const CONFIG_ENV_VAR: &str = "CLIMATE_API_CONFIG";

/// Default API port
pub const DEFAULT_PORT: u16 = 9900;

/// Default location of the observation database
pub const DEFAULT_DATABASE: &str = "./Resources/hawaii.sqlite";
