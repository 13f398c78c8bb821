//! World-space HTML panels and the input/cursor services they hook into.

use std::time::Duration;

use cursor_icon::CursorIcon;
use glam::UVec2;
use nebula_scene::NodeId;

use crate::error::UiError;
use crate::sidebar::SideBar;

/// Called by a panel whenever the content under the pointer wants another cursor.
pub type CursorCallback = Box<dyn FnMut(CursorIcon) + Send>;

/// An offscreen HTML surface drawn onto a quad in the world.
pub trait Panel {
    /// Size of the surface in pixels.
    fn size(&self) -> UVec2;

    /// Whether the initial page load has completed.
    fn is_loaded(&self) -> bool;

    /// Block until the initial page load completes.
    ///
    /// `None` waits without limit.
    fn wait_until_loaded(&mut self, timeout: Option<Duration>) -> Result<(), UiError>;

    /// Replace the panel's HTML body. Requires a finished initial load.
    fn set_content(&mut self, html: &str) -> Result<(), UiError>;

    fn on_cursor_change(&mut self, callback: CursorCallback);

    /// Write linear instead of perspective depth so the quad sorts against
    /// planetary-scale geometry.
    fn set_use_linear_depth_buffer(&mut self, enable: bool);
}

/// Creates panels of a given pixel size.
pub trait PanelFactory {
    fn create_panel(&mut self, width: u32, height: u32) -> Result<Box<dyn Panel>, UiError>;
}

/// Scene nodes that react to pointer input.
pub trait InputRegistry {
    fn register_selectable(&mut self, node: NodeId);

    /// Returns `false` if the node was not registered.
    fn unregister_selectable(&mut self, node: NodeId) -> bool;
}

/// The host's pointer cursor.
pub trait CursorSink: Send + Sync {
    fn set_cursor(&self, icon: CursorIcon);
}

/// Everything a GUI backend offers to plugins placing panels and tabs.
pub trait GuiBackend: PanelFactory + InputRegistry + SideBar {}

impl<T: PanelFactory + InputRegistry + SideBar + ?Sized> GuiBackend for T {}
