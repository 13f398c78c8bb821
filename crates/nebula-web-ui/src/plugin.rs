//! The web UI plugin: side-bar tabs plus HTML panels anchored on bodies.

use std::path::Path;
use std::time::Duration;

use nebula_config::{Config, WebUiSettings};
use tracing::{debug, info, warn};

use crate::error::PluginError;
use crate::host::{HostContext, Plugin};
use crate::item::PlacedSpaceItem;
use crate::placer::SpaceItemPlacer;
use crate::sidebar::SideBarRegistrar;
use crate::updater::ObserverRelativeUpdater;

/// Web UI plugin state.
///
/// Placed items keep their identity and order from `init` until `deinit`.
pub struct WebUiPlugin {
    settings: WebUiSettings,
    placer: SpaceItemPlacer,
    sidebar: SideBarRegistrar,
    items: Vec<PlacedSpaceItem>,
    initialized: bool,
}

impl WebUiPlugin {
    pub fn new(settings: WebUiSettings, load_timeout: Option<Duration>) -> Self {
        Self {
            settings,
            placer: SpaceItemPlacer::new(load_timeout),
            sidebar: SideBarRegistrar::new(),
            items: Vec::new(),
            initialized: false,
        }
    }

    /// Create the plugin with the panel load timeout from the host config.
    pub fn from_config(settings: WebUiSettings, config: &Config) -> Self {
        Self::new(
            settings,
            config.ui.load_timeout_ms.map(Duration::from_millis),
        )
    }

    pub fn settings(&self) -> &WebUiSettings {
        &self.settings
    }

    /// Placed items in configuration order. Empty before `init`.
    pub fn items(&self) -> &[PlacedSpaceItem] {
        &self.items
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Swap in new settings.
    ///
    /// Unchanged settings are a no-op. Otherwise, if the plugin is running, the
    /// new space items are checked against the registry first; on success the
    /// plugin is torn down and initialised again. Returns whether anything
    /// changed.
    ///
    /// If initialising with the new settings fails, the previous settings are
    /// put back and initialised again before the error is returned.
    pub fn reload(
        &mut self,
        settings: WebUiSettings,
        host: &mut HostContext<'_>,
    ) -> Result<bool, PluginError> {
        if settings == self.settings {
            debug!("Web UI settings unchanged, keeping placed items");
            return Ok(false);
        }

        if !self.initialized {
            debug!("Web UI settings changed before init, replacing");
            self.settings = settings;
            return Ok(true);
        }

        self.placer
            .check_frames(&settings.space_items, &*host.anchors)?;
        debug!("Web UI settings changed, re-initialising");
        self.deinit(host);
        let previous = std::mem::replace(&mut self.settings, settings);
        if let Err(err) = self.init(host) {
            warn!("Web UI reload failed, restoring previous settings: {err}");
            self.settings = previous;
            if let Err(restore) = self.init(host) {
                warn!("Failed to restore previous web UI items: {restore}");
            }
            return Err(err);
        }
        Ok(true)
    }

    /// Write the current settings as JSON.
    pub fn save(&self, path: &Path) -> Result<(), PluginError> {
        self.settings.save(path)?;
        info!("Saved web UI settings to {}", path.display());
        Ok(())
    }
}

impl Plugin for WebUiPlugin {
    fn init(&mut self, host: &mut HostContext<'_>) -> Result<(), PluginError> {
        if self.initialized {
            self.deinit(host);
        }

        self.sidebar
            .register_all(&self.settings.sidebar_items, &mut *host.gui);

        match self.placer.place_all(
            &self.settings.space_items,
            host.bodies,
            &mut *host.anchors,
            &mut *host.gui,
            &host.cursor,
        ) {
            Ok(items) => self.items = items,
            Err(err) => {
                self.sidebar.unregister_all(&mut *host.gui);
                return Err(err);
            }
        }

        self.initialized = true;
        info!(
            "Web UI initialised with {} side-bar tabs and {} space items",
            self.settings.sidebar_items.len(),
            self.items.len()
        );
        Ok(())
    }

    fn update(&mut self, host: &mut HostContext<'_>) {
        if !self.initialized {
            return;
        }
        let updater = ObserverRelativeUpdater::new(host.widget_scale, host.scale_policy);
        updater.update(
            &mut self.items,
            &*host.anchors,
            host.observer,
            host.simulation_time,
        );
    }

    fn deinit(&mut self, host: &mut HostContext<'_>) {
        if !self.initialized {
            return;
        }
        let count = self.items.len();
        while let Some(item) = self.items.pop() {
            item.release(&mut *host.anchors, &mut *host.gui);
        }
        self.sidebar.unregister_all(&mut *host.gui);
        self.initialized = false;
        info!("Web UI torn down, released {count} space items");
    }
}
