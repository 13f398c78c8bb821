//! One-time placement of configured space items.

use std::sync::Arc;
use std::time::Duration;

use nebula_config::SpaceItem;
use nebula_geodesy::{BodyLookup, GeodeticPosition, Radii, place};
use nebula_scene::{AnchorRegistry, DrawOrder, TransformNode};
use nebula_ui::{CursorSink, GuiBackend};
use tracing::{info, warn};

use crate::error::{PlacementError, PluginError};
use crate::item::{PIXELS_PER_UNIT, PlacedSpaceItem};

/// Places space items on their bodies and builds their panels.
#[derive(Clone, Debug, Default)]
pub struct SpaceItemPlacer {
    load_timeout: Option<Duration>,
}

impl SpaceItemPlacer {
    /// `load_timeout` bounds each panel's initial page load; `None` waits forever.
    pub fn new(load_timeout: Option<Duration>) -> Self {
        Self { load_timeout }
    }

    /// Place every item, in order.
    ///
    /// Returns once every panel has finished its initial load and received its
    /// HTML. The first failing item aborts the pass; items placed before it are
    /// released again so nothing is left registered.
    pub fn place_all(
        &self,
        items: &[SpaceItem],
        bodies: &dyn BodyLookup,
        anchors: &mut dyn AnchorRegistry,
        gui: &mut dyn GuiBackend,
        cursor: &Arc<dyn CursorSink>,
    ) -> Result<Vec<PlacedSpaceItem>, PluginError> {
        let mut placed = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self.place_one(item, bodies, anchors, gui, cursor) {
                Ok(placed_item) => placed.push(placed_item),
                Err(source) => {
                    warn!(
                        "Placing space item {index} on {}/{} failed: {source}",
                        item.center, item.frame
                    );
                    while let Some(done) = placed.pop() {
                        done.release(&mut *anchors, &mut *gui);
                    }
                    return Err(PluginError::Placement {
                        index,
                        center: item.center.clone(),
                        frame: item.frame.clone(),
                        source,
                    });
                }
            }
        }

        Ok(placed)
    }

    /// Check that every item's center/frame resolves, without registering
    /// anything.
    pub fn check_frames(
        &self,
        items: &[SpaceItem],
        anchors: &dyn AnchorRegistry,
    ) -> Result<(), PluginError> {
        for (index, item) in items.iter().enumerate() {
            if let Err(err) = anchors.create_anchor(&item.center, &item.frame) {
                return Err(PluginError::Placement {
                    index,
                    center: item.center.clone(),
                    frame: item.frame.clone(),
                    source: err.into(),
                });
            }
        }
        Ok(())
    }

    fn place_one(
        &self,
        item: &SpaceItem,
        bodies: &dyn BodyLookup,
        anchors: &mut dyn AnchorRegistry,
        gui: &mut dyn GuiBackend,
        cursor: &Arc<dyn CursorSink>,
    ) -> Result<PlacedSpaceItem, PlacementError> {
        let mut anchor = anchors.create_anchor(&item.center, &item.frame)?;
        anchor.set_anchor_position(anchor_position(item, bodies));
        anchors.register(&mut anchor);

        let transform = panel_transform(item.width, item.height);

        let panel = match gui.create_panel(item.width, item.height) {
            Ok(panel) => panel,
            Err(err) => {
                anchors.unregister(&mut anchor);
                return Err(err.into());
            }
        };
        gui.register_selectable(transform.id());

        let center_distance = anchor.anchor_position().length();
        let mut placed = PlacedSpaceItem::new(anchor, transform, panel, item.scale);

        if let Err(err) = self.load_panel(&mut placed, item, cursor) {
            placed.release(&mut *anchors, &mut *gui);
            return Err(err);
        }

        let size = placed.panel().size();
        info!(
            "Placed {}x{} space item on {}/{} at lon {:.4}, lat {:.4} ({:.1} m from center)",
            size.x,
            size.y,
            item.center,
            item.frame,
            item.longitude,
            item.latitude,
            center_distance
        );
        Ok(placed)
    }

    fn load_panel(
        &self,
        placed: &mut PlacedSpaceItem,
        item: &SpaceItem,
        cursor: &Arc<dyn CursorSink>,
    ) -> Result<(), PlacementError> {
        let panel = placed.panel_mut();
        panel.set_use_linear_depth_buffer(true);

        let sink = Arc::clone(cursor);
        panel.on_cursor_change(Box::new(move |icon| sink.set_cursor(icon)));

        if !panel.is_loaded() {
            panel.wait_until_loaded(self.load_timeout)?;
        }
        panel.set_content(&item.html)?;
        Ok(())
    }
}

/// Body-frame position of an item. Unknown bodies degrade to zero terrain
/// height and, failing radii as well, to the frame origin.
fn anchor_position(item: &SpaceItem, bodies: &dyn BodyLookup) -> glam::DVec3 {
    let position = GeodeticPosition::new(item.longitude, item.latitude, item.elevation);
    let lng_lat = position.lng_lat_radians();

    let height = bodies
        .surface_height(&item.center, lng_lat)
        .unwrap_or_else(|| {
            warn!(
                "Unknown body '{}', assuming zero terrain height at {position}",
                item.center
            );
            0.0
        });
    let radii = bodies.radii(&item.center).unwrap_or_else(|| {
        warn!("No radii for body '{}', placing at frame origin", item.center);
        Radii::ZERO
    });

    place(&position, radii, height)
}

/// Transform mapping a panel's pixels onto [`PIXELS_PER_UNIT`] and turning its
/// front face (local -Z) onto the anchor's +X.
fn panel_transform(width: u32, height: u32) -> TransformNode {
    let mut transform = TransformNode::new();
    transform.scale_by(
        f64::from(width) / PIXELS_PER_UNIT,
        f64::from(height) / PIXELS_PER_UNIT,
        1.0,
    );
    transform.rotate(glam::DVec3::Y, -std::f64::consts::FRAC_PI_2);
    transform.draw_order = DrawOrder::TransparentItems;
    transform
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_geodesy::{BodyCatalog, CelestialBody, TerrainParams};
    use nebula_scene::{FrameMotion, FrameRegistry};
    use nebula_ui::{HeadlessCursor, HeadlessGui, UiError};

    fn space_item(center: &str, frame: &str, longitude: f64, latitude: f64) -> SpaceItem {
        SpaceItem {
            center: center.to_string(),
            frame: frame.to_string(),
            longitude,
            latitude,
            elevation: 10.0,
            scale: 1.0,
            width: 800,
            height: 600,
            html: "<p>hi</p>".to_string(),
        }
    }

    struct Fixture {
        bodies: BodyCatalog,
        anchors: FrameRegistry,
        gui: HeadlessGui,
        cursor: Arc<dyn CursorSink>,
    }

    impl Fixture {
        fn new(gui: HeadlessGui) -> Self {
            let mut bodies = BodyCatalog::new();
            bodies.insert(CelestialBody::flat("Earth", Radii::new(6_378_137.0, 6_356_752.3)));
            bodies.insert(CelestialBody::with_terrain(
                "Moon",
                Radii::spherical(1_737_400.0),
                TerrainParams {
                    seed: 11,
                    amplitude: 1500.0,
                    ..Default::default()
                },
            ));

            let mut anchors = FrameRegistry::new();
            anchors
                .add_frame(
                    "Earth",
                    "IAU_Earth",
                    FrameMotion::rotating(glam::DVec3::ZERO, 86_164.0),
                )
                .unwrap();
            anchors
                .add_frame(
                    "Moon",
                    "IAU_Moon",
                    FrameMotion::fixed(glam::DVec3::new(3.844e8, 0.0, 0.0)),
                )
                .unwrap();
            anchors
                .add_frame("Vulcan", "IAU_Vulcan", FrameMotion::fixed(glam::DVec3::ZERO))
                .unwrap();

            Self {
                bodies,
                anchors,
                gui,
                cursor: Arc::new(HeadlessCursor::new()),
            }
        }

        fn place(
            &mut self,
            placer: &SpaceItemPlacer,
            items: &[SpaceItem],
        ) -> Result<Vec<PlacedSpaceItem>, PluginError> {
            placer.place_all(
                items,
                &self.bodies,
                &mut self.anchors,
                &mut self.gui,
                &self.cursor,
            )
        }
    }

    #[test]
    fn test_example_scenario_distance() {
        let mut fixture = Fixture::new(HeadlessGui::new());
        let placed = fixture
            .place(&SpaceItemPlacer::default(), &[space_item("Earth", "IAU_Earth", 0.0, 0.0)])
            .unwrap();
        let distance = placed[0].position().length();
        assert!(
            (distance - 6_378_147.0).abs() < 1e-3,
            "expected 6378147 m from center, got {distance}"
        );
    }

    #[test]
    fn test_order_preserved() {
        let mut fixture = Fixture::new(HeadlessGui::new());
        let items: Vec<SpaceItem> = (0..5)
            .map(|i| space_item("Earth", "IAU_Earth", i as f64 * 30.0, 0.0))
            .collect();
        let placed = fixture.place(&SpaceItemPlacer::default(), &items).unwrap();
        assert_eq!(placed.len(), items.len());
        for (item, placed) in items.iter().zip(&placed) {
            let lng = item.longitude.to_radians();
            let expected = glam::DVec3::new(lng.cos(), 0.0, lng.sin());
            assert!(
                (placed.position().normalize() - expected).length() < 1e-9,
                "item at lon {} placed out of order",
                item.longitude
            );
        }
    }

    #[test]
    fn test_empty_configuration() {
        let mut fixture = Fixture::new(HeadlessGui::new());
        let placed = fixture.place(&SpaceItemPlacer::default(), &[]).unwrap();
        assert!(placed.is_empty());
        assert_eq!(fixture.anchors.anchor_count(), 0);
    }

    #[test]
    fn test_unknown_body_degrades_to_zero_height() {
        let mut fixture = Fixture::new(HeadlessGui::new());
        let placed = fixture
            .place(&SpaceItemPlacer::default(), &[space_item("Vulcan", "IAU_Vulcan", 45.0, 45.0)])
            .unwrap();
        // No radii and no terrain: only the elevation remains.
        assert!((placed[0].position().length() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_terrain_height_is_added() {
        let mut fixture = Fixture::new(HeadlessGui::new());
        let item = space_item("Moon", "IAU_Moon", 12.0, -34.0);
        let placed = fixture.place(&SpaceItemPlacer::default(), &[item.clone()]).unwrap();

        let lng_lat = glam::DVec2::new(item.longitude.to_radians(), item.latitude.to_radians());
        let height = fixture.bodies.surface_height("Moon", lng_lat).unwrap();
        let expected = 1_737_400.0 + height + item.elevation;
        assert!((placed[0].position().length() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_panel_wiring() {
        let mut fixture = Fixture::new(HeadlessGui::new());
        let placed = fixture
            .place(&SpaceItemPlacer::default(), &[space_item("Earth", "IAU_Earth", 0.0, 0.0)])
            .unwrap();

        let record = &fixture.gui.panel_records()[0];
        assert!(record.loaded, "panel must be loaded before content is pushed");
        assert_eq!(record.content.as_deref(), Some("<p>hi</p>"));
        assert!(record.linear_depth);
        assert!(record.has_cursor_callback);
        assert!(fixture.gui.is_selectable(placed[0].transform().id()));
        assert_eq!(placed[0].panel().size(), glam::UVec2::new(800, 600));
        assert!(placed[0].panel().is_loaded());

        let transform = placed[0].transform();
        assert!((transform.scale - glam::DVec3::new(0.8, 0.6, 1.0)).length() < 1e-12);
        assert_eq!(transform.draw_order, DrawOrder::TransparentItems);
        let front = transform.rotation * glam::DVec3::NEG_Z;
        assert!((front - glam::DVec3::X).length() < 1e-12, "front face {front}");
    }

    #[test]
    fn test_unknown_frame_aborts_and_rolls_back() {
        let mut fixture = Fixture::new(HeadlessGui::new());
        let items = [
            space_item("Earth", "IAU_Earth", 0.0, 0.0),
            space_item("Earth", "IAU_Earth", 10.0, 0.0),
            space_item("Mars", "IAU_Mars", 0.0, 0.0),
        ];
        let result = fixture.place(&SpaceItemPlacer::default(), &items);
        assert!(matches!(
            result,
            Err(PluginError::Placement {
                index: 2,
                source: PlacementError::Scene(_),
                ..
            })
        ));
        assert_eq!(fixture.anchors.anchor_count(), 0);
        assert_eq!(fixture.gui.live_panel_count(), 0);
        assert_eq!(fixture.gui.selectable_count(), 0);
    }

    #[test]
    fn test_panel_creation_failure_releases_anchor() {
        let mut fixture = Fixture::new(HeadlessGui::new().with_creation_failure_at(1));
        let items = [
            space_item("Earth", "IAU_Earth", 0.0, 0.0),
            space_item("Earth", "IAU_Earth", 10.0, 0.0),
        ];
        let result = fixture.place(&SpaceItemPlacer::default(), &items);
        assert!(matches!(
            result,
            Err(PluginError::Placement {
                index: 1,
                source: PlacementError::Ui(UiError::PanelCreation { .. }),
                ..
            })
        ));
        assert_eq!(fixture.anchors.anchor_count(), 0);
        assert_eq!(fixture.gui.live_panel_count(), 0);
    }

    #[test]
    fn test_load_timeout_is_fatal() {
        let mut fixture = Fixture::new(HeadlessGui::new().with_stalled_loading());
        let placer = SpaceItemPlacer::new(Some(Duration::from_millis(20)));
        let result = fixture.place(&placer, &[space_item("Earth", "IAU_Earth", 0.0, 0.0)]);
        assert!(matches!(
            result,
            Err(PluginError::Placement {
                source: PlacementError::Ui(UiError::LoadTimeout(_)),
                ..
            })
        ));
        assert_eq!(fixture.anchors.anchor_count(), 0);
        assert_eq!(fixture.gui.selectable_count(), 0);
    }

    #[test]
    fn test_check_frames_does_not_register() {
        let fixture = Fixture::new(HeadlessGui::new());
        let placer = SpaceItemPlacer::default();
        let good = [space_item("Earth", "IAU_Earth", 0.0, 0.0)];
        assert!(placer.check_frames(&good, &fixture.anchors).is_ok());
        assert_eq!(fixture.anchors.anchor_count(), 0);

        let bad = [good[0].clone(), space_item("Mars", "IAU_Mars", 0.0, 0.0)];
        assert!(matches!(
            placer.check_frames(&bad, &fixture.anchors),
            Err(PluginError::Placement { index: 1, .. })
        ));
    }
}
