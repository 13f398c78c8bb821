//! Configuration for the web UI host and plugin.
//!
//! The host configuration persists to disk as RON and supports CLI overrides
//! and hot-reload detection. The plugin's item settings are JSON, validated on
//! load, with migration of the deprecated `"icon"` frame key.

mod cli;
mod config;
mod error;
mod settings;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, GraphicsConfig, PluginsConfig, ScaleConfig, UiConfig, default_config_dir,
};
pub use error::ConfigError;
pub use settings::{SideBarItem, SpaceItem, WebUiSettings};
