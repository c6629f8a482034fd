//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/page-designer/page-designer.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `PAGE_DESIGNER_*` prefix, `__` between sections

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::EntryDefaults;

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

/// Where page content and the menu are kept.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process lifetime only
    #[default]
    Memory,
    /// Files under `data_dir`
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: default_data_dir(),
        }
    }
}

/// Defaults for entries created in the menu editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MenuConfig {
    pub default_name: String,
    pub default_link: Option<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        let defaults = EntryDefaults::default();
        Self {
            default_name: defaults.name,
            default_link: defaults.link,
        }
    }
}

impl MenuConfig {
    pub fn entry_defaults(&self) -> EntryDefaults {
        EntryDefaults {
            name: self.default_name.clone(),
            link: self.default_link.clone(),
        }
    }
}

/// Raw settings for intermediate parsing (all fields optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub server: RawServerConfig,
    pub storage: RawStorageConfig,
    pub menu: RawMenuConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStorageConfig {
    pub backend: Option<StorageBackend>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawMenuConfig {
    pub default_name: Option<String>,
    pub default_link: Option<String>,
}

/// Unified configuration for page-designer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub menu: MenuConfig,
}

/// Default data directory (platform data dir, or ./data).
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "page-designer")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Get the XDG config directory for page-designer.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "page-designer").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("page-designer.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ApplicationError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ApplicationError::Config {
                message: format!(
                    "invalid listen address {}:{}: {}",
                    self.server.host, self.server.port, e
                ),
            })
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let raw = self.storage.data_dir.to_string_lossy().to_string();
        let expanded = shellexpand::full(&raw)
            .map(|s| s.into_owned())
            .unwrap_or(raw);
        self.storage.data_dir = PathBuf::from(expanded);
    }

    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            server: ServerConfig {
                host: overlay
                    .server
                    .host
                    .clone()
                    .unwrap_or_else(|| self.server.host.clone()),
                port: overlay.server.port.unwrap_or(self.server.port),
            },
            storage: StorageConfig {
                backend: overlay.storage.backend.unwrap_or(self.storage.backend),
                data_dir: overlay
                    .storage
                    .data_dir
                    .clone()
                    .unwrap_or_else(|| self.storage.data_dir.clone()),
            },
            menu: MenuConfig {
                default_name: overlay
                    .menu
                    .default_name
                    .clone()
                    .unwrap_or_else(|| self.menu.default_name.clone()),
                default_link: overlay
                    .menu
                    .default_link
                    .clone()
                    .or_else(|| self.menu.default_link.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply PAGE_DESIGNER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("PAGE_DESIGNER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("server.host") {
            settings.server.host = val;
        }
        if let Ok(val) = config.get_string("server.port") {
            settings.server.port = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("PAGE_DESIGNER_SERVER__PORT={val}: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("storage.backend") {
            settings.storage.backend = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("storage.data_dir") {
            settings.storage.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("menu.default_name") {
            settings.menu.default_name = val;
        }
        if let Ok(val) = config.get_string("menu.default_link") {
            settings.menu.default_link = Some(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# page-designer configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/page-designer/page-designer.toml
#   Explicit: --config <file>
#   Env:      PAGE_DESIGNER_* variables, e.g. PAGE_DESIGNER_SERVER__PORT=8080

[server]
# host = "127.0.0.1"
# port = 3000

[storage]
# "memory" keeps content for the process lifetime only, "file" writes to data_dir
# backend = "memory"
# data_dir = "~/.local/share/page-designer"

[menu]
# Name and link of entries created in the menu editor
# default_name = "New Item"
# default_link = "#"
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
