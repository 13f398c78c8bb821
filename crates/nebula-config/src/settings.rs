//! Web UI plugin settings: side-bar tabs and HTML panels placed on bodies.
//!
//! Settings are JSON. On read every space item is validated; on write the
//! canonical key names are used.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A tab added to the host's side bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBarItem {
    /// Tab title.
    pub name: String,
    /// Material icon name.
    pub icon: String,
    /// HTML body of the tab, e.g. an `<iframe>`.
    pub html: String,
}

/// An HTML panel placed at a fixed geodetic position on a body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceItem {
    /// Name of the body the panel is placed on.
    pub center: String,
    /// Reference frame of that body.
    pub frame: String,
    /// Longitude in degrees, within \[-180, 180\].
    pub longitude: f64,
    /// Latitude in degrees, within \[-90, 90\].
    pub latitude: f64,
    /// Meters above the terrain surface.
    pub elevation: f64,
    /// Baseline for distance-based scaling.
    pub scale: f64,
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
    pub html: String,
}

/// All settings of the web UI plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebUiSettings {
    #[serde(rename = "sidebar-items")]
    pub sidebar_items: Vec<SideBarItem>,
    #[serde(rename = "space-items")]
    pub space_items: Vec<SpaceItem>,
}

#[derive(Deserialize)]
struct RawSettings {
    #[serde(default, rename = "sidebar-items")]
    sidebar_items: Vec<SideBarItem>,
    #[serde(default, rename = "space-items")]
    space_items: Vec<RawSpaceItem>,
}

#[derive(Deserialize)]
struct RawSpaceItem {
    center: String,
    #[serde(default)]
    frame: Option<String>,
    /// Older settings files stored the frame under this key.
    #[serde(default)]
    icon: Option<String>,
    longitude: f64,
    latitude: f64,
    elevation: f64,
    scale: f64,
    width: u32,
    height: u32,
    html: String,
}

/// Wrap a longitude outside \[-180, 180\] into \[-180, 180).
fn normalize_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

impl RawSpaceItem {
    fn validate(self, index: usize) -> Result<SpaceItem, ConfigError> {
        let item = format!("space-items[{index}]");
        let invalid = |field: &'static str, reason: String| ConfigError::InvalidSetting {
            item: item.clone(),
            field,
            reason,
        };

        let frame = match (self.frame, self.icon) {
            (Some(frame), None) => frame,
            (None, Some(icon)) => {
                log::warn!("{item}: key \"icon\" is deprecated, use \"frame\" instead");
                icon
            }
            (Some(frame), Some(icon)) => {
                if frame != icon {
                    log::warn!(
                        "{item}: both \"frame\" ({frame}) and deprecated \"icon\" ({icon}) set, using \"frame\""
                    );
                }
                frame
            }
            (None, None) => return Err(invalid("frame", "missing".to_string())),
        };

        if self.center.trim().is_empty() {
            return Err(invalid("center", "must not be empty".to_string()));
        }
        if frame.trim().is_empty() {
            return Err(invalid("frame", "must not be empty".to_string()));
        }

        for (field, value) in [
            ("longitude", self.longitude),
            ("latitude", self.latitude),
            ("elevation", self.elevation),
            ("scale", self.scale),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(invalid(
                "latitude",
                format!("{} is outside [-90, 90]", self.latitude),
            ));
        }
        if self.scale <= 0.0 {
            return Err(invalid("scale", format!("{} must be positive", self.scale)));
        }
        if self.width == 0 {
            return Err(invalid("width", "must be at least one pixel".to_string()));
        }
        if self.height == 0 {
            return Err(invalid("height", "must be at least one pixel".to_string()));
        }

        Ok(SpaceItem {
            center: self.center,
            frame,
            longitude: normalize_longitude(self.longitude),
            latitude: self.latitude,
            elevation: self.elevation,
            scale: self.scale,
            width: self.width,
            height: self.height,
            html: self.html,
        })
    }
}

impl WebUiSettings {
    /// Parse and validate settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = serde_json::from_str(json).map_err(ConfigError::JsonError)?;
        let space_items = raw
            .space_items
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            sidebar_items: raw.sidebar_items,
            space_items,
        })
    }

    /// Serialize to pretty-printed JSON using the canonical key names.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::JsonError)
    }

    /// Load settings from a JSON file. A missing file yields empty settings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No web UI settings at {}, using none", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded {} side-bar and {} space items from {}",
            settings.sidebar_items.len(),
            settings.space_items.len(),
            path.display()
        );
        Ok(settings)
    }

    /// Write settings to a JSON file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_settings)` if the file changed, `None` otherwise.
    pub fn reload(&self, path: &Path) -> Result<Option<Self>, ConfigError> {
        let new_settings = Self::load(path)?;
        if &new_settings != self {
            log::info!("Web UI settings reloaded with changes");
            Ok(Some(new_settings))
        } else {
            Ok(None)
        }
    }
}
