//! Transform nodes hanging below anchors, and the draw-order buckets they sort into.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::{DAffine3, DQuat, DVec3};

/// Identity of a scene node, used by collaborators such as input picking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Sort buckets for drawing. Lower values draw first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawOrder {
    Stars = 100,
    Planets = 200,
    OpaqueItems = 300,
    Atmospheres = 400,
    TransparentItems = 500,
    Gui = 600,
}

/// A scale + rotation node attached below an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformNode {
    id: NodeId,
    /// Non-uniform scale applied before rotation.
    pub scale: DVec3,
    /// Rotation relative to the parent anchor.
    pub rotation: DQuat,
    /// Draw-order bucket for everything below this node.
    pub draw_order: DrawOrder,
}

impl TransformNode {
    /// Create an identity node in the opaque bucket.
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            scale: DVec3::ONE,
            rotation: DQuat::IDENTITY,
            draw_order: DrawOrder::OpaqueItems,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Multiply the node's scale component-wise.
    pub fn scale_by(&mut self, x: f64, y: f64, z: f64) {
        self.scale *= DVec3::new(x, y, z);
    }

    /// Post-multiply the node's rotation with an axis-angle rotation.
    pub fn rotate(&mut self, axis: DVec3, angle: f64) {
        let turn = DQuat::from_axis_angle(axis.normalize(), angle);
        self.rotation = (self.rotation * turn).normalize();
    }

    /// Transform from node-local to parent-anchor coordinates.
    pub fn matrix(&self) -> DAffine3 {
        DAffine3::from_rotation_translation(self.rotation, DVec3::ZERO)
            * DAffine3::from_scale(self.scale)
    }
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new()
    }
}
