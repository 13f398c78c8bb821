//! User-interface collaborators for world-space and side-bar HTML content.
//!
//! The traits describe what the rest of the engine needs from a GUI backend:
//! world-space panels that load HTML, a side bar that lists tabs, input picking
//! registration, and a cursor sink. [`HeadlessGui`] implements all of them in
//! memory for tests and headless runs.

mod error;
mod headless;
mod panel;
mod sidebar;

pub use cursor_icon::CursorIcon;
pub use error::UiError;
pub use headless::{HeadlessCursor, HeadlessGui, PanelRecord, SideBarTab};
pub use panel::{CursorCallback, CursorSink, GuiBackend, InputRegistry, Panel, PanelFactory};
pub use sidebar::SideBar;
