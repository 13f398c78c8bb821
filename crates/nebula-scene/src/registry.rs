//! Anchor registry: resolves named reference frames and keeps track of which
//! anchors are live in the simulation.

use std::fmt;

use glam::{DAffine3, DVec3};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::anchor::CelestialAnchor;
use crate::error::SceneError;
use crate::frame::{FrameMotion, validate_frame_name};

/// Registry key of a live anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(u64);

impl AnchorId {
    /// Raw key value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of the mapping from named reference frames to live anchors.
///
/// Registration hands the registry a key, not the anchor: the anchor stays
/// owned by whoever created it and must be unregistered before it is dropped.
pub trait AnchorRegistry {
    /// Create an unregistered anchor in the given frame.
    ///
    /// Fails if the names are malformed or the frame is unknown.
    fn create_anchor(&self, center: &str, frame: &str) -> Result<CelestialAnchor, SceneError>;

    /// Make an anchor visible to the rest of the simulation.
    fn register(&mut self, anchor: &mut CelestialAnchor) -> AnchorId;

    /// Remove an anchor's registration. Returns `false` if it was not registered.
    fn unregister(&mut self, anchor: &mut CelestialAnchor) -> bool;

    /// Whether `id` refers to a live registration.
    fn is_registered(&self, id: AnchorId) -> bool;

    /// Body-to-world transform of a frame at `time`, if the frame is known.
    fn world_from_body(&self, center: &str, frame: &str, time: f64) -> Option<DAffine3>;

    /// Body-to-world transform of the frame a registered anchor lives in.
    fn anchor_frame_transform(
        &self,
        anchor: &CelestialAnchor,
        time: f64,
    ) -> Result<DAffine3, SceneError> {
        let id = anchor.id().ok_or_else(|| SceneError::Unregistered {
            center: anchor.center().to_string(),
            frame: anchor.frame().to_string(),
        })?;
        if !self.is_registered(id) {
            return Err(SceneError::AnchorNotRegistered(id));
        }
        self.world_from_body(anchor.center(), anchor.frame(), time)
            .ok_or_else(|| SceneError::UnknownFrame {
                center: anchor.center().to_string(),
                frame: anchor.frame().to_string(),
            })
    }

    /// World position of a registered anchor at `time`.
    fn anchor_world_position(
        &self,
        anchor: &CelestialAnchor,
        time: f64,
    ) -> Result<DVec3, SceneError> {
        let world_from_body = self.anchor_frame_transform(anchor, time)?;
        Ok(world_from_body.transform_point3(anchor.anchor_position()))
    }
}

#[derive(Clone, Debug)]
struct AnchorEntry {
    center: String,
    frame: String,
}

/// In-memory [`AnchorRegistry`] over a set of frames with known motion.
#[derive(Default)]
pub struct FrameRegistry {
    frames: FxHashMap<(String, String), FrameMotion>,
    anchors: FxHashMap<AnchorId, AnchorEntry>,
    next_id: u64,
}

impl FrameRegistry {
    /// Create a registry with no frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a reference frame.
    pub fn add_frame(
        &mut self,
        center: &str,
        frame: &str,
        motion: FrameMotion,
    ) -> Result<(), SceneError> {
        validate_frame_name(center, frame)?;
        self.frames
            .insert((center.to_string(), frame.to_string()), motion);
        Ok(())
    }

    /// Remove a reference frame. Anchors registered in it stay registered but
    /// no longer resolve.
    pub fn remove_frame(&mut self, center: &str, frame: &str) -> bool {
        self.frames
            .remove(&(center.to_string(), frame.to_string()))
            .is_some()
    }

    /// Number of live anchor registrations.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }
}

impl AnchorRegistry for FrameRegistry {
    fn create_anchor(&self, center: &str, frame: &str) -> Result<CelestialAnchor, SceneError> {
        validate_frame_name(center, frame)?;
        if !self
            .frames
            .contains_key(&(center.to_string(), frame.to_string()))
        {
            return Err(SceneError::UnknownFrame {
                center: center.to_string(),
                frame: frame.to_string(),
            });
        }
        Ok(CelestialAnchor::new(center, frame))
    }

    fn register(&mut self, anchor: &mut CelestialAnchor) -> AnchorId {
        if let Some(id) = anchor.id()
            && self.anchors.contains_key(&id)
        {
            return id;
        }

        let id = AnchorId(self.next_id);
        self.next_id += 1;
        self.anchors.insert(
            id,
            AnchorEntry {
                center: anchor.center().to_string(),
                frame: anchor.frame().to_string(),
            },
        );
        anchor.set_id(Some(id));
        debug!(
            "Registered anchor {id} in {}/{}",
            anchor.center(),
            anchor.frame()
        );
        id
    }

    fn unregister(&mut self, anchor: &mut CelestialAnchor) -> bool {
        let Some(id) = anchor.id() else {
            return false;
        };
        anchor.set_id(None);
        match self.anchors.remove(&id) {
            Some(entry) => {
                debug!("Unregistered anchor {id} from {}/{}", entry.center, entry.frame);
                true
            }
            None => false,
        }
    }

    fn is_registered(&self, id: AnchorId) -> bool {
        self.anchors.contains_key(&id)
    }

    fn world_from_body(&self, center: &str, frame: &str, time: f64) -> Option<DAffine3> {
        self.frames
            .get(&(center.to_string(), frame.to_string()))
            .map(|motion| motion.world_from_body(time))
    }
}
