use super::{InsertOutcome, Panel};
use crate::geometry::{Orientation, PanelGeometry};
use crate::slot::{SlotHandle, Zone};
use eframe::egui::Pos2;
use log::debug;

/// How far past its edges a start/end zone still accepts a drop, in units
/// of `icon_size + edge_margin`.
const ZONE_TOLERANCE_FACTOR: f32 = 1.5;

impl Panel {
    /// Drops `item` into the center zone next to the slot under `point`
    /// (root coordinates).
    pub fn insert_at_coordinates(
        &mut self,
        geometry: &dyn PanelGeometry,
        item: SlotHandle,
        point: Pos2,
    ) -> InsertOutcome {
        let zone = Zone::Center;
        let local = pin_cross_axis(geometry, zone, geometry.map_to_zone(zone, point));
        let orientation = geometry.orientation();

        let candidate = match self.slot_near(geometry, zone, local) {
            Some(found) => found,
            None => {
                let slots = self.zone(zone);
                let past_end = orientation.primary(local)
                    > orientation.primary_len(geometry.zone_size(zone));
                let fallback = match (slots.first(), slots.last()) {
                    (Some(_), Some(last)) if past_end => Some(last.handle()),
                    (Some(first), _) => Some(first.handle()),
                    _ => None,
                };
                match fallback {
                    Some(handle) => handle,
                    None => return self.insert_at_index(zone, item, 0),
                }
            }
        };
        self.insert_next_to(geometry, zone, candidate, item, local)
    }

    /// Tries the start zone, then the end zone, then falls back to the
    /// center zone.
    pub fn insert_at_coordinates2(
        &mut self,
        geometry: &dyn PanelGeometry,
        item: SlotHandle,
        point: Pos2,
    ) -> InsertOutcome {
        for zone in [Zone::Start, Zone::End] {
            let local = geometry.map_to_zone(zone, point);
            let outcome = self.insert_at_zone_coordinates(geometry, zone, item, local);
            if !outcome.is_not_found() {
                return outcome;
            }
        }
        self.insert_at_coordinates(geometry, item, point)
    }

    /// Probes one zone with a point in that zone's coordinates. Reports
    /// [`InsertOutcome::NotFound`] when the point is not close enough to the
    /// zone for the drop to belong there.
    fn insert_at_zone_coordinates(
        &mut self,
        geometry: &dyn PanelGeometry,
        zone: Zone,
        item: SlotHandle,
        point: Pos2,
    ) -> InsertOutcome {
        let local = pin_cross_axis(geometry, zone, point);
        let orientation = geometry.orientation();

        let candidate = match self.slot_near(geometry, zone, local) {
            Some(found) => found,
            None => {
                let slots = self.zone(zone);
                let (Some(first), Some(last)) = (slots.first(), slots.last()) else {
                    return InsertOutcome::NotFound;
                };
                let coord = orientation.primary(local);
                let len = orientation.primary_len(geometry.zone_size(zone));
                let tolerance =
                    ZONE_TOLERANCE_FACTOR * (geometry.icon_size() + geometry.edge_margin());
                if coord >= 0.0 && coord - tolerance <= len {
                    last.handle()
                } else if (-tolerance..=tolerance).contains(&coord) {
                    first.handle()
                } else {
                    return InsertOutcome::NotFound;
                }
            }
        };
        self.insert_next_to(geometry, zone, candidate, item, local)
    }

    /// Slot under `point`, or the slot whose extent plus trailing spacing
    /// covers it when the point falls in a gap.
    fn slot_near(&self, geometry: &dyn PanelGeometry, zone: Zone, point: Pos2) -> Option<SlotHandle> {
        let slots = self.zone(zone);
        if let Some(hit) = geometry.slot_at(zone, point) {
            if slots.iter().any(|slot| slot.handle() == hit) {
                return Some(hit);
            }
            debug!("hit test returned {hit:?} which is not in the {zone} zone");
        }

        slots.iter().map(|slot| slot.handle()).find(|&handle| {
            let Some(rect) = geometry.slot_rect(zone, handle) else {
                return false;
            };
            match geometry.orientation() {
                Orientation::Horizontal => {
                    point.x >= rect.min.x
                        && point.x < rect.min.x + rect.width() + geometry.row_spacing(zone)
                }
                Orientation::Vertical => {
                    point.y >= rect.min.y
                        && point.y < rect.min.y + rect.height() + geometry.column_spacing(zone)
                }
            }
        })
    }

    fn insert_next_to(
        &mut self,
        geometry: &dyn PanelGeometry,
        zone: Zone,
        candidate: SlotHandle,
        item: SlotHandle,
        point: Pos2,
    ) -> InsertOutcome {
        if candidate == item {
            return InsertOutcome::AlreadyPositioned;
        }
        let Some(rect) = geometry.slot_rect(zone, candidate) else {
            debug!("no geometry for {candidate:?} in the {zone} zone");
            return InsertOutcome::NotFound;
        };
        let orientation = geometry.orientation();
        if orientation.primary(point) < orientation.primary(rect.center()) {
            self.insert_before(candidate, item)
        } else {
            self.insert_after(candidate, item)
        }
    }
}

/// Only the primary axis matters; the other coordinate is moved to the
/// middle of the zone so the hit test always lands on the row of slots.
fn pin_cross_axis(geometry: &dyn PanelGeometry, zone: Zone, point: Pos2) -> Pos2 {
    let size = geometry.zone_size(zone);
    match geometry.orientation() {
        Orientation::Horizontal => Pos2::new(point.x, size.y / 2.0),
        Orientation::Vertical => Pos2::new(size.x / 2.0, point.y),
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{handle, ids, panel_with};
    use super::*;
    use crate::config::{Alignment, PanelConfig};
    use crate::geometry::RectGeometry;
    use eframe::egui::{Rect, Vec2};

    const EXTENT: f32 = 40.0;
    const SPACING: f32 = 10.0;
    const THICKNESS: f32 = 50.0;

    /// Records the panel's current zones as rows of `EXTENT`-long slots.
    /// Zone frames: start [0, 200), center [300, 700), end [800, 1000).
    fn geometry_for(panel: &Panel, orientation: Orientation) -> RectGeometry {
        let mut geometry = RectGeometry::new(orientation, 48.0, 4.0);
        let frames = [(Zone::Start, 0.0, 200.0), (Zone::Center, 300.0, 400.0), (Zone::End, 800.0, 200.0)];
        for (zone, offset, len) in frames {
            let frame = match orientation {
                Orientation::Horizontal => {
                    Rect::from_min_size(Pos2::new(offset, 0.0), Vec2::new(len, THICKNESS))
                }
                Orientation::Vertical => {
                    Rect::from_min_size(Pos2::new(0.0, offset), Vec2::new(THICKNESS, len))
                }
            };
            geometry.set_zone_frame(zone, frame, SPACING);
            let handles: Vec<_> = panel.zone(zone).iter().map(|slot| slot.handle()).collect();
            geometry.record_row(zone, &handles, EXTENT, THICKNESS);
        }
        geometry
    }

    fn justified(applets: &[&str]) -> Panel {
        let mut panel = Panel::new(PanelConfig::default());
        for id in applets {
            panel.add_applet(id).unwrap();
        }
        panel.set_alignment(Alignment::Justify);
        panel
    }

    #[test]
    fn pointer_on_first_half_inserts_before() {
        let mut panel = panel_with(&["a", "b", "c"]);
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let c = handle(&panel, "c");

        // b occupies [350, 390) in root coordinates.
        let outcome = panel.insert_at_coordinates(&geometry, c, Pos2::new(355.0, 5.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(1));
        assert_eq!(ids(&panel, Zone::Center), vec!["a", "c", "b"]);
    }

    #[test]
    fn pointer_on_second_half_inserts_after() {
        let mut panel = panel_with(&["a", "b", "c"]);
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let a = handle(&panel, "a");

        let outcome = panel.insert_at_coordinates(&geometry, a, Pos2::new(385.0, 40.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(1));
        assert_eq!(ids(&panel, Zone::Center), vec!["b", "a", "c"]);
    }

    #[test]
    fn pointer_over_the_item_itself_is_already_positioned() {
        let mut panel = panel_with(&["a", "b"]);
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let b = handle(&panel, "b");
        let outcome = panel.insert_at_coordinates(&geometry, b, Pos2::new(360.0, 20.0));
        assert_eq!(outcome, InsertOutcome::AlreadyPositioned);
        assert_eq!(ids(&panel, Zone::Center), vec!["a", "b"]);
    }

    #[test]
    fn gap_between_slots_belongs_to_the_preceding_slot() {
        let mut panel = panel_with(&["a", "b", "c"]);
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let c = handle(&panel, "c");

        // Gap after a: [340, 350). Past a's midpoint, so c lands after a.
        let outcome = panel.insert_at_coordinates(&geometry, c, Pos2::new(345.0, 0.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(1));
        assert_eq!(ids(&panel, Zone::Center), vec!["a", "c", "b"]);
    }

    #[test]
    fn vertical_gap_scan_uses_the_vertical_extent() {
        let mut panel = panel_with(&["a", "b", "c"]);
        let mut geometry = RectGeometry::new(Orientation::Vertical, 48.0, 4.0);
        let frame = Rect::from_min_size(Pos2::new(0.0, 300.0), Vec2::new(300.0, 400.0));
        geometry.set_zone_frame(Zone::Center, frame, SPACING);
        // Slots hug the far edge, away from the pinned middle of the zone.
        for (index, id) in ["a", "b", "c"].into_iter().enumerate() {
            let min = Pos2::new(200.0, 300.0 + index as f32 * (EXTENT + SPACING));
            geometry.record_slot(
                Zone::Center,
                handle(&panel, id),
                Rect::from_min_size(min, Vec2::splat(EXTENT)),
            );
        }
        let a = handle(&panel, "a");

        // Local y 80 is in b's second half; comparing y against the slots'
        // x (200) would match nothing and fall back to a.
        let outcome = panel.insert_at_coordinates(&geometry, a, Pos2::new(10.0, 380.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(1));
        assert_eq!(ids(&panel, Zone::Center), vec!["b", "a", "c"]);
    }

    #[test]
    fn pointer_past_the_end_appends() {
        let mut panel = panel_with(&["a", "b", "c"]);
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let a = handle(&panel, "a");

        let outcome = panel.insert_at_coordinates(&geometry, a, Pos2::new(750.0, 0.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(2));
        assert_eq!(ids(&panel, Zone::Center), vec!["b", "c", "a"]);
    }

    #[test]
    fn pointer_before_the_start_prepends() {
        let mut panel = panel_with(&["a", "b", "c"]);
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let c = handle(&panel, "c");

        let outcome = panel.insert_at_coordinates(&geometry, c, Pos2::new(250.0, 0.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(0));
        assert_eq!(ids(&panel, Zone::Center), vec!["c", "a", "b"]);
    }

    #[test]
    fn drop_near_the_start_zone_lands_there() {
        let mut panel = justified(&["a", "b", "c"]);
        // start: | ; center: a b c ; end: |
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let b = handle(&panel, "b");

        // Past the splitter's midpoint (20) but inside the zone.
        let outcome = panel.insert_at_coordinates2(&geometry, b, Pos2::new(60.0, 10.0));
        assert!(matches!(outcome, InsertOutcome::FoundAt(index) if index == 1));
        assert_eq!(ids(&panel, Zone::Start), vec!["|", "b"]);
        assert_eq!(ids(&panel, Zone::Center), vec!["a", "c"]);
    }

    #[test]
    fn drop_just_before_the_start_zone_lands_first() {
        let mut panel = justified(&["a", "b"]);
        let mut geometry = geometry_for(&panel, Orientation::Horizontal);
        // Shift the start zone right so there is room before it.
        let frame = Rect::from_min_size(Pos2::new(100.0, 0.0), Vec2::new(150.0, THICKNESS));
        geometry.set_zone_frame(Zone::Start, frame, SPACING);
        let handles: Vec<_> = panel.zone(Zone::Start).iter().map(|slot| slot.handle()).collect();
        geometry.record_row(Zone::Start, &handles, EXTENT, THICKNESS);
        let a = handle(&panel, "a");

        // Local x = -30, within the 78px tolerance.
        let outcome = panel.insert_at_coordinates2(&geometry, a, Pos2::new(70.0, 0.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(0));
        assert_eq!(ids(&panel, Zone::Start), vec!["a", "|"]);
    }

    #[test]
    fn drop_near_the_end_zone_lands_there() {
        let mut panel = justified(&["a", "b"]);
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let a = handle(&panel, "a");

        // End splitter occupies [800, 840); its first half.
        let outcome = panel.insert_at_coordinates2(&geometry, a, Pos2::new(805.0, 0.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(0));
        assert_eq!(ids(&panel, Zone::End), vec!["a", "|"]);
    }

    #[test]
    fn drop_far_from_both_edges_falls_back_to_center() {
        let mut panel = justified(&["a", "b", "c"]);
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let a = handle(&panel, "a");

        // c occupies [400, 440) of the center zone; second half.
        let outcome = panel.insert_at_coordinates2(&geometry, a, Pos2::new(430.0, 0.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(2));
        assert_eq!(ids(&panel, Zone::Start), vec!["|"]);
        assert_eq!(ids(&panel, Zone::Center), vec!["b", "c", "a"]);
        assert_eq!(ids(&panel, Zone::End), vec!["|"]);
    }

    #[test]
    fn item_already_in_place_stops_the_zone_search() {
        let mut panel = justified(&["a", "b"]);
        let start_splitter = panel.zone(Zone::Start)[0].handle();
        panel.insert_after(start_splitter, handle(&panel, "a"));
        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let a = handle(&panel, "a");

        // a occupies [50, 90) of the start zone.
        let outcome = panel.insert_at_coordinates2(&geometry, a, Pos2::new(60.0, 0.0));
        assert_eq!(outcome, InsertOutcome::AlreadyPositioned);
        assert_eq!(ids(&panel, Zone::Start), vec!["|", "a"]);
    }

    #[test]
    fn emptied_center_accepts_drops_before_its_spacer() {
        let mut panel = justified(&["a"]);
        let start_splitter = panel.zone(Zone::Start)[0].handle();
        panel.insert_after(start_splitter, handle(&panel, "a"));
        // The emptied center zone got its spacer back.
        assert_eq!(ids(&panel, Zone::Center), vec!["~"]);

        let geometry = geometry_for(&panel, Orientation::Horizontal);
        let x = panel.create_applet("x").unwrap();
        let outcome = panel.insert_at_coordinates2(&geometry, x, Pos2::new(500.0, 0.0));
        assert_eq!(outcome, InsertOutcome::FoundAt(0));
        assert_eq!(ids(&panel, Zone::Center), vec!["x", "~"]);
    }
}
