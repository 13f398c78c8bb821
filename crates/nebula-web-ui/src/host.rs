//! The contract between a host driver and its plugins.

use std::sync::Arc;

use nebula_geodesy::BodyLookup;
use nebula_scene::{AnchorRegistry, ObserverModel, ScalePolicy};
use nebula_ui::{CursorSink, GuiBackend};

use crate::error::PluginError;

/// Services and per-frame state the host lends to a plugin for one call.
pub struct HostContext<'a> {
    pub bodies: &'a dyn BodyLookup,
    pub anchors: &'a mut dyn AnchorRegistry,
    pub observer: &'a dyn ObserverModel,
    pub gui: &'a mut dyn GuiBackend,
    pub cursor: Arc<dyn CursorSink>,
    /// Current simulation time in seconds.
    pub simulation_time: f64,
    /// Global widget-scale multiplier from the graphics settings.
    pub widget_scale: f64,
    pub scale_policy: ScalePolicy,
}

/// A plugin driven by the host: initialised once, updated once per frame,
/// torn down once.
///
/// The host must not call [`update`](Plugin::update) before
/// [`init`](Plugin::init) has returned.
pub trait Plugin {
    fn init(&mut self, host: &mut HostContext<'_>) -> Result<(), PluginError>;

    /// Per-frame update. Must not fail; problems are contained and logged.
    fn update(&mut self, host: &mut HostContext<'_>);

    fn deinit(&mut self, host: &mut HostContext<'_>);
}
