//! Per-tick observer-relative update of placed space items.

use nebula_scene::{
    AnchorRegistry, ObserverModel, ScalePolicy, SceneError, scale_relative_to_observer,
    turn_to_observer,
};
use tracing::{info, warn};

use crate::item::PlacedSpaceItem;

/// Rescales and yaws every placed item towards the observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverRelativeUpdater {
    pub widget_scale: f64,
    pub policy: ScalePolicy,
}

impl Default for ObserverRelativeUpdater {
    fn default() -> Self {
        Self {
            widget_scale: 1.0,
            policy: ScalePolicy::default(),
        }
    }
}

impl ObserverRelativeUpdater {
    pub fn new(widget_scale: f64, policy: ScalePolicy) -> Self {
        Self {
            widget_scale,
            policy,
        }
    }

    /// Update all items for simulation `time`: scale first, then turn.
    ///
    /// Items whose anchor no longer resolves are skipped with a single warning
    /// until they resolve again. Returns the number of items updated.
    pub fn update(
        &self,
        items: &mut [PlacedSpaceItem],
        anchors: &dyn AnchorRegistry,
        observer: &dyn ObserverModel,
        time: f64,
    ) -> usize {
        let mut updated = 0;
        for item in items.iter_mut() {
            match self.update_item(item, anchors, observer, time) {
                Ok(()) => {
                    if item.stale {
                        info!(
                            "Space item on {}/{} resolves again",
                            item.anchor().center(),
                            item.anchor().frame()
                        );
                        item.stale = false;
                    }
                    updated += 1;
                }
                Err(err) => {
                    if !item.stale {
                        warn!("Skipping space item update: {err}");
                        item.stale = true;
                    }
                }
            }
        }
        updated
    }

    fn update_item(
        &self,
        item: &mut PlacedSpaceItem,
        anchors: &dyn AnchorRegistry,
        observer: &dyn ObserverModel,
        time: f64,
    ) -> Result<(), SceneError> {
        let base_scale = item.scale();
        let anchor = item.anchor_mut();
        scale_relative_to_observer(
            anchor,
            anchors,
            observer,
            time,
            base_scale,
            self.widget_scale,
            &self.policy,
        )?;
        turn_to_observer(anchor, anchors, observer, time, false)
    }
}
