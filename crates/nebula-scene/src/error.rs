//! Scene error types.

use crate::registry::AnchorId;

/// Errors raised by anchor creation and frame resolution.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A center or frame name that can never name a reference frame.
    #[error("invalid frame name {center:?}/{frame:?}: {reason}")]
    InvalidFrameName {
        center: String,
        frame: String,
        reason: &'static str,
    },

    /// The registry has no reference frame with this center/frame pair.
    #[error("unknown reference frame {center}/{frame}")]
    UnknownFrame { center: String, frame: String },

    /// The anchor was never registered, or has been unregistered.
    #[error("anchor {0} is not registered")]
    AnchorNotRegistered(AnchorId),

    /// The anchor has not been registered with any registry yet.
    #[error("anchor {center}/{frame} has no registry id")]
    Unregistered { center: String, frame: String },
}
