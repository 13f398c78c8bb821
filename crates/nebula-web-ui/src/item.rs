//! A space item after placement: the scene objects it owns exclusively.

use glam::DVec3;
use nebula_scene::{AnchorRegistry, CelestialAnchor, TransformNode};
use nebula_ui::{InputRegistry, Panel};
use tracing::trace;

/// Panel pixels per simulation length unit.
pub const PIXELS_PER_UNIT: f64 = 1000.0;

/// A placed space item.
///
/// Owns its anchor, the transform below it, and the panel drawn by that
/// transform. The anchor registry only holds a key to the anchor, so the item
/// must be [`release`](Self::release)d to drop that key.
pub struct PlacedSpaceItem {
    anchor: CelestialAnchor,
    transform: TransformNode,
    panel: Box<dyn Panel>,
    scale: f64,
    /// Set while the anchor fails to resolve, so the warning is emitted once.
    pub(crate) stale: bool,
}

impl PlacedSpaceItem {
    pub(crate) fn new(
        anchor: CelestialAnchor,
        transform: TransformNode,
        panel: Box<dyn Panel>,
        scale: f64,
    ) -> Self {
        Self {
            anchor,
            transform,
            panel,
            scale,
            stale: false,
        }
    }

    pub fn anchor(&self) -> &CelestialAnchor {
        &self.anchor
    }

    pub(crate) fn anchor_mut(&mut self) -> &mut CelestialAnchor {
        &mut self.anchor
    }

    pub fn transform(&self) -> &TransformNode {
        &self.transform
    }

    pub fn panel(&self) -> &dyn Panel {
        self.panel.as_ref()
    }

    pub(crate) fn panel_mut(&mut self) -> &mut dyn Panel {
        self.panel.as_mut()
    }

    /// Baseline for distance-based scaling.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Anchor position in body-frame coordinates.
    pub fn position(&self) -> DVec3 {
        self.anchor.anchor_position()
    }

    /// Release everything in reverse creation order: input registration, panel,
    /// transform, anchor registration.
    pub fn release<A, I>(self, anchors: &mut A, input: &mut I)
    where
        A: AnchorRegistry + ?Sized,
        I: InputRegistry + ?Sized,
    {
        let Self {
            mut anchor,
            transform,
            panel,
            ..
        } = self;

        input.unregister_selectable(transform.id());
        drop(panel);
        drop(transform);
        anchors.unregister(&mut anchor);
        trace!("Released space item on {}/{}", anchor.center(), anchor.frame());
    }
}
