//! UI error types.

use std::time::Duration;

/// Errors raised by GUI collaborators.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// The backend refused to create a panel.
    #[error("failed to create {width}x{height} panel: {reason}")]
    PanelCreation {
        width: u32,
        height: u32,
        reason: String,
    },

    /// The panel reported an error while loading its page.
    #[error("panel failed to load: {0}")]
    LoadFailed(String),

    /// The panel did not finish loading in time.
    #[error("panel did not finish loading within {0:?}")]
    LoadTimeout(Duration),

    /// The loader went away without reporting completion.
    #[error("panel loader disconnected before loading finished")]
    Disconnected,

    /// Content was pushed before the initial load completed.
    #[error("panel content set before initial load finished")]
    NotLoaded,
}
