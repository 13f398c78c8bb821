//! Host configuration with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Graphics settings shared by all world-space widgets.
    pub graphics: GraphicsConfig,
    /// GUI backend settings.
    pub ui: UiConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Per-plugin settings files.
    pub plugins: PluginsConfig,
}

/// Graphics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Global multiplier applied to every world-space widget.
    pub widget_scale: f64,
    /// Bounds of the observer-distance scale curve.
    pub observer_scale: ScaleConfig,
}

/// Observer-distance scaling bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScaleConfig {
    /// Observer distance in meters at which widgets have their baseline size.
    pub reference_distance: f64,
    /// Smallest distance factor (observer close by).
    pub min_factor: f64,
    /// Largest distance factor (observer far away).
    pub max_factor: f64,
}

/// GUI backend configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Upper bound for a panel's initial page load in milliseconds.
    /// `None` waits indefinitely.
    pub load_timeout_ms: Option<u64>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g., "debug", "info,nebula_web_ui=trace").
    pub log_level: String,
    /// Also write JSON logs to this file.
    pub log_file: Option<PathBuf>,
}

/// Locations of plugin settings files, relative to the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PluginsConfig {
    /// Settings of the web UI plugin.
    pub web_ui: PathBuf,
}

// --- Default implementations ---

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            widget_scale: 1.0,
            observer_scale: ScaleConfig::default(),
        }
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            reference_distance: 1000.0,
            min_factor: 1.0,
            max_factor: 1.0e6,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            web_ui: PathBuf::from("web-ui.json"),
        }
    }
}

/// Default configuration directory (`<platform config dir>/nebula`).
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nebula")
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject graphics settings the per-frame scale computation cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widget_scale = self.graphics.widget_scale;
        if !widget_scale.is_finite() || widget_scale <= 0.0 {
            return Err(invalid(
                "graphics",
                "widget_scale",
                format!("{widget_scale} must be finite and positive"),
            ));
        }

        let scale = &self.graphics.observer_scale;
        for (field, value) in [
            ("reference_distance", scale.reference_distance),
            ("min_factor", scale.min_factor),
            ("max_factor", scale.max_factor),
        ] {
            if !value.is_finite() {
                return Err(invalid(
                    "graphics.observer_scale",
                    field,
                    format!("{value} is not finite"),
                ));
            }
        }
        if scale.reference_distance <= 0.0 {
            return Err(invalid(
                "graphics.observer_scale",
                "reference_distance",
                format!("{} must be positive", scale.reference_distance),
            ));
        }
        if scale.min_factor <= 0.0 {
            return Err(invalid(
                "graphics.observer_scale",
                "min_factor",
                format!("{} must be positive", scale.min_factor),
            ));
        }
        if scale.min_factor > scale.max_factor {
            return Err(invalid(
                "graphics.observer_scale",
                "max_factor",
                format!(
                    "{} is below min_factor {}",
                    scale.max_factor, scale.min_factor
                ),
            ));
        }
        Ok(())
    }

    /// Path of the web UI settings file, resolved against `config_dir`.
    pub fn web_ui_settings_path(&self, config_dir: &Path) -> PathBuf {
        if self.plugins.web_ui.is_absolute() {
            self.plugins.web_ui.clone()
        } else {
            config_dir.join(&self.plugins.web_ui)
        }
    }
}

fn invalid(item: &str, field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidSetting {
        item: item.to_string(),
        field,
        reason,
    }
}
