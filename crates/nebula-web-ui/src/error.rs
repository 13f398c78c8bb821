//! Plugin error types.

use nebula_config::ConfigError;
use nebula_scene::SceneError;
use nebula_ui::UiError;

/// Why a single space item could not be placed.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// The scene rejected the item's center/frame.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The GUI backend failed to create or load the item's panel.
    #[error(transparent)]
    Ui(#[from] UiError),
}

/// Errors surfaced by the plugin lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// A space item failed to place. Nothing from the failed pass is left behind.
    #[error("failed to place space item {index} on {center}/{frame}: {source}")]
    Placement {
        index: usize,
        center: String,
        frame: String,
        #[source]
        source: PlacementError,
    },

    /// Settings could not be read or written.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
