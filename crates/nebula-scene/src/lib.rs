//! Scene-side services for world-anchored content: celestial anchors attached to
//! named reference frames, the registry that resolves those frames over time,
//! the observer, and helpers that keep anchored content scaled and turned
//! relative to the observer.

mod anchor;
mod error;
mod frame;
mod observer;
mod observer_relative;
mod registry;
mod transform;

pub use anchor::CelestialAnchor;
pub use error::SceneError;
pub use frame::{FrameMotion, validate_frame_name};
pub use observer::{FixedObserver, ObserverModel};
pub use observer_relative::{ScalePolicy, scale_relative_to_observer, turn_to_observer};
pub use registry::{AnchorId, AnchorRegistry, FrameRegistry};
pub use transform::{DrawOrder, NodeId, TransformNode};
