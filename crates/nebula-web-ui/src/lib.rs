//! HTML content anchored to celestial bodies and in the side bar.
//!
//! Space items are placed once at a geodetic position on their body, each
//! with its own anchor, transform, and HTML panel. Every tick their anchors
//! are rescaled by observer distance and yawed to face the observer, so the
//! panels stay legible from anywhere. Side-bar items are plain tabs.

mod error;
mod host;
mod item;
mod placer;
mod plugin;
mod sidebar;
mod updater;

pub use error::{PlacementError, PluginError};
pub use host::{HostContext, Plugin};
pub use item::{PIXELS_PER_UNIT, PlacedSpaceItem};
pub use placer::SpaceItemPlacer;
pub use plugin::WebUiPlugin;
pub use sidebar::SideBarRegistrar;
pub use updater::ObserverRelativeUpdater;
