use std::{fmt::{self, Display}, path::Path};

use serde::Deserialize;

use crate::host::WorldRegistry;

/// Errors produced while reading a [`HostConfig`]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Host settings, read from a JSON file
#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    /// Worlds that are loaded on start-up
    #[serde(default = "default_worlds")]
    pub worlds: Vec<String>,

    /// World new locations are placed in
    #[serde(default = "default_world")]
    pub default_world: String,
}

fn default_worlds() -> Vec<String> {
    vec![default_world()]
}

fn default_world() -> String {
    String::from("world")
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            worlds: default_worlds(),
            default_world: default_world(),
        }
    }
}

impl HostConfig {
    /// Reads the config at `path`, falling back to the defaults if the file doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<HostConfig, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(target: "astraledit", "No config at {}, using defaults", path.display());
                Ok(HostConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Creates a registry with every configured world loaded
    pub fn registry(&self) -> WorldRegistry {
        let registry = WorldRegistry::new();
        for world in &self.worlds {
            registry.load_world(world.clone());
        }
        registry
    }
}
