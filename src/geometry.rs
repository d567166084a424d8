use crate::slot::{SlotHandle, Zone};
use eframe::egui::{Pos2, Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Coordinate along the direction slots are laid out in.
    pub fn primary(self, point: Pos2) -> f32 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    pub fn primary_len(self, size: Vec2) -> f32 {
        match self {
            Orientation::Horizontal => size.x,
            Orientation::Vertical => size.y,
        }
    }
}

/// Geometry services the host shell provides to coordinate based insertion.
///
/// Rectangles and hit-test points are expressed in the zone's own coordinate
/// space; [`PanelGeometry::map_to_zone`] converts from the panel root.
pub trait PanelGeometry {
    fn orientation(&self) -> Orientation;

    fn zone_size(&self, zone: Zone) -> Vec2;

    /// Gap between slots of a horizontal zone.
    fn row_spacing(&self, zone: Zone) -> f32;

    /// Gap between slots of a vertical zone.
    fn column_spacing(&self, zone: Zone) -> f32;

    fn slot_rect(&self, zone: Zone, slot: SlotHandle) -> Option<Rect>;

    /// Direct hit test; `None` when the point falls between slots.
    fn slot_at(&self, zone: Zone, point: Pos2) -> Option<SlotHandle>;

    fn map_to_zone(&self, zone: Zone, point: Pos2) -> Pos2;

    fn icon_size(&self) -> f32;

    /// Total margin the panel keeps at its length edges.
    fn edge_margin(&self) -> f32;
}

#[derive(Debug, Clone)]
pub struct ZoneRects {
    /// Zone frame in root coordinates.
    pub frame: Rect,
    pub row_spacing: f32,
    pub column_spacing: f32,
    slots: Vec<(SlotHandle, Rect)>,
}

impl Default for ZoneRects {
    fn default() -> Self {
        Self {
            frame: Rect::from_min_size(Pos2::ZERO, Vec2::ZERO),
            row_spacing: 0.0,
            column_spacing: 0.0,
            slots: Vec::new(),
        }
    }
}

impl ZoneRects {
    pub fn slots(&self) -> &[(SlotHandle, Rect)] {
        &self.slots
    }
}

/// [`PanelGeometry`] backed by rectangles recorded while the panel was last
/// painted.
#[derive(Debug, Clone)]
pub struct RectGeometry {
    pub orientation: Orientation,
    pub icon_size: f32,
    pub edge_margin: f32,
    zones: [ZoneRects; 3],
}

impl RectGeometry {
    pub fn new(orientation: Orientation, icon_size: f32, edge_margin: f32) -> Self {
        Self {
            orientation,
            icon_size,
            edge_margin,
            zones: Default::default(),
        }
    }

    pub fn zone(&self, zone: Zone) -> &ZoneRects {
        &self.zones[zone.index()]
    }

    /// Sets the zone frame and drops the slots recorded for it.
    pub fn set_zone_frame(&mut self, zone: Zone, frame: Rect, spacing: f32) {
        let rects = &mut self.zones[zone.index()];
        rects.frame = frame;
        rects.row_spacing = spacing;
        rects.column_spacing = spacing;
        rects.slots.clear();
    }

    /// Records a slot rectangle given in root coordinates.
    pub fn record_slot(&mut self, zone: Zone, slot: SlotHandle, rect: Rect) {
        let rects = &mut self.zones[zone.index()];
        let local = rect.translate(-rects.frame.min.to_vec2());
        rects.slots.push((slot, local));
    }

    /// Lays out `slots` one after another from the zone origin, each
    /// `extent` long along the primary axis and `thickness` across it.
    pub fn record_row(&mut self, zone: Zone, slots: &[SlotHandle], extent: f32, thickness: f32) {
        let orientation = self.orientation;
        let rects = &mut self.zones[zone.index()];
        let spacing = match orientation {
            Orientation::Horizontal => rects.row_spacing,
            Orientation::Vertical => rects.column_spacing,
        };
        let mut offset = 0.0;
        for &slot in slots {
            let rect = match orientation {
                Orientation::Horizontal => {
                    Rect::from_min_size(Pos2::new(offset, 0.0), Vec2::new(extent, thickness))
                }
                Orientation::Vertical => {
                    Rect::from_min_size(Pos2::new(0.0, offset), Vec2::new(thickness, extent))
                }
            };
            rects.slots.push((slot, rect));
            offset += extent + spacing;
        }
    }
}

impl PanelGeometry for RectGeometry {
    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn zone_size(&self, zone: Zone) -> Vec2 {
        self.zone(zone).frame.size()
    }

    fn row_spacing(&self, zone: Zone) -> f32 {
        self.zone(zone).row_spacing
    }

    fn column_spacing(&self, zone: Zone) -> f32 {
        self.zone(zone).column_spacing
    }

    fn slot_rect(&self, zone: Zone, slot: SlotHandle) -> Option<Rect> {
        self.zone(zone)
            .slots
            .iter()
            .find(|(handle, _)| *handle == slot)
            .map(|(_, rect)| *rect)
    }

    fn slot_at(&self, zone: Zone, point: Pos2) -> Option<SlotHandle> {
        self.zone(zone)
            .slots
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(handle, _)| *handle)
    }

    fn map_to_zone(&self, zone: Zone, point: Pos2) -> Pos2 {
        point - self.zone(zone).frame.min.to_vec2()
    }

    fn icon_size(&self) -> f32 {
        self.icon_size
    }

    fn edge_margin(&self) -> f32 {
        self.edge_margin
    }
}
