//! Configuration loading utilities
//!
//! The API reads settings from, in priority order:
//! 1. CLI arguments and their environment variables (handled by clap)
//! 2. A TOML config file found in one of the standard locations
//! 3. Built-in defaults

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Where a configuration was loaded from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path given on the command line or through the config env var
    Explicit(PathBuf),
    /// Found in the current working directory
    CurrentDir(PathBuf),
    /// Found under the XDG config home (~/.config/climate-api/)
    XdgConfig(PathBuf),
    /// Found under /etc/climate-api/
    System(PathBuf),
    /// Nothing found, defaults apply
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p.as_path()),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in the standard locations.
///
/// Search order: `env_var`, the current directory, the XDG config home, then
/// `/etc/climate-api/`. The first existing file wins.
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    let candidates = [
        env::var(env_var).ok().map(|p| ConfigSource::Explicit(p.into())),
        Some(ConfigSource::CurrentDir(PathBuf::from(filename))),
        xdg_config_path(filename).map(ConfigSource::XdgConfig),
        Some(ConfigSource::System(
            Path::new("/etc").join(APP_NAME).join(filename),
        )),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|source| {
            let found = source.path().is_some_and(Path::exists);
            if !found {
                debug!("no config at {}", source);
            }
            found
        })
        .unwrap_or(ConfigSource::Defaults)
}

fn xdg_config_path(filename: &str) -> Option<PathBuf> {
    let base = match env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) => PathBuf::from(xdg_config),
        Err(_) => PathBuf::from(env::var("HOME").ok()?).join(".config"),
    };
    Some(base.join(APP_NAME).join(filename))
}

/// Load and parse a TOML configuration file, falling back to `T::default()`
/// when the source is [`ConfigSource::Defaults`].
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    match source.path() {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(T::default()),
    }
}
