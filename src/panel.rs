mod coords;
mod insert;
mod persist;

use crate::config::{Alignment, PanelConfig};
use crate::ids::{AppletId, AppletIdError};
use crate::slot::{AppletSlot, Slot, SlotHandle, Zone};
use log::{debug, warn};
use std::collections::HashMap;
use thiserror::Error;

/// Result of an insertion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Nothing was moved: the target is unknown, the request is out of
    /// range, or the pointer is not over the tried zone.
    NotFound,
    /// The item already sits where it was asked to go.
    AlreadyPositioned,
    /// The item now sits at this index of its zone.
    FoundAt(usize),
}

impl InsertOutcome {
    pub fn is_not_found(self) -> bool {
        self == InsertOutcome::NotFound
    }
}

#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    InvalidId(#[from] AppletIdError),

    #[error("applet {0} is already part of the panel")]
    DuplicateApplet(AppletId),
}

/// Cached position of a slot, refreshed after every structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotIndex {
    pub zone: Zone,
    pub index: usize,
    /// Index in the start→center→end order, the spacer not counted.
    pub global: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Zone(Zone, usize),
    Holding(usize),
}

/// Applet arrangement of one panel: three zones, a holding area for
/// detached slots, and the persisted configuration they are reconciled with.
#[derive(Debug)]
pub struct Panel {
    zones: [Vec<Slot>; 3],
    holding: Vec<Slot>,
    spacer: SlotHandle,
    config: PanelConfig,
    next_handle: u64,
    restoring: bool,
    config_dirty: bool,
    indexes: HashMap<SlotHandle, SlotIndex>,
}

impl Panel {
    pub fn new(config: PanelConfig) -> Self {
        let spacer = SlotHandle(0);
        let mut panel = Self {
            zones: [Vec::new(), vec![Slot::spacer(spacer)], Vec::new()],
            holding: Vec::new(),
            spacer,
            config,
            next_handle: 1,
            restoring: false,
            config_dirty: false,
            indexes: HashMap::new(),
        };
        panel.refresh_indexes();
        panel
    }

    /// Builds a panel holding the host's applets and restores the persisted
    /// arrangement over them. Ids the panel cannot accept are skipped.
    pub fn load<'a>(config: PanelConfig, applets: impl IntoIterator<Item = &'a str>) -> Self {
        let mut panel = Self::new(config);
        panel.restoring = true;
        for id in applets {
            if let Err(err) = panel.add_applet(id) {
                warn!("skipping applet {id:?}: {err}");
            }
        }
        panel.restore();
        panel
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Returns whether the configuration changed since the last call.
    pub fn take_config_changes(&mut self) -> bool {
        std::mem::take(&mut self.config_dirty)
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    pub fn zone(&self, zone: Zone) -> &[Slot] {
        &self.zones[zone.index()]
    }

    pub fn holding(&self) -> &[Slot] {
        &self.holding
    }

    pub fn spacer(&self) -> SlotHandle {
        self.spacer
    }

    pub fn slot(&self, handle: SlotHandle) -> Option<&Slot> {
        self.zones
            .iter()
            .flatten()
            .chain(self.holding.iter())
            .find(|slot| slot.handle() == handle)
    }

    pub fn zone_of(&self, handle: SlotHandle) -> Option<Zone> {
        match self.locate(handle)? {
            Location::Zone(zone, _) => Some(zone),
            Location::Holding(_) => None,
        }
    }

    pub fn find_applet(&self, id: &AppletId) -> Option<SlotHandle> {
        self.zones
            .iter()
            .flatten()
            .chain(self.holding.iter())
            .find(|slot| slot.applet_id() == Some(id))
            .map(Slot::handle)
    }

    /// Applet ids in persisted read order.
    pub fn applet_ids(&self) -> Vec<&AppletId> {
        self.zones
            .iter()
            .flatten()
            .filter_map(Slot::applet_id)
            .collect()
    }

    pub fn slot_index(&self, handle: SlotHandle) -> Option<SlotIndex> {
        self.indexes.get(&handle).copied()
    }

    /// Host append: attaches a new applet at the end of the center zone.
    pub fn add_applet(&mut self, id: &str) -> Result<SlotHandle, PanelError> {
        let slot = self.new_applet_slot(id)?;
        let handle = slot.handle();
        self.append_to_center(slot);
        self.structure_changed();
        Ok(handle)
    }

    /// Creates an applet slot in the holding area, ready to be dropped into
    /// a zone by one of the insertion operations.
    pub fn create_applet(&mut self, id: &str) -> Result<SlotHandle, PanelError> {
        let slot = self.new_applet_slot(id)?;
        let handle = slot.handle();
        self.holding.push(slot);
        Ok(handle)
    }

    pub fn remove_applet(&mut self, id: &AppletId) -> bool {
        let Some(handle) = self.find_applet(id) else {
            debug!("remove_applet: {id} is not attached");
            return false;
        };
        self.take(handle);
        self.structure_changed();
        true
    }

    /// Inserts a splitter into the center zone, never past the spacer.
    pub fn add_splitter(&mut self, position: usize) -> SlotHandle {
        let handle = self.alloc_handle();
        let center = &mut self.zones[Zone::Center.index()];
        let limit = match center.last() {
            Some(last) if last.is_spacer() => center.len() - 1,
            _ => center.len(),
        };
        center.insert(position.min(limit), Slot::splitter(handle));
        self.structure_changed();
        handle
    }

    pub fn set_zoom_locked(&mut self, id: &AppletId, locked: bool) -> bool {
        self.update_applet(id, |applet| applet.zoom_locked = locked)
    }

    pub fn set_color_blocked(&mut self, id: &AppletId, blocked: bool) -> bool {
        self.update_applet(id, |applet| applet.color_blocked = blocked)
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        let was_justify = self.config.alignment.is_justify();
        self.config.alignment = alignment;
        if alignment.is_justify() && !was_justify {
            self.join_zones();
            self.add_splitter(0);
            let end = self.zones[Zone::Center.index()]
                .iter()
                .filter(|slot| !slot.is_spacer())
                .count();
            self.add_splitter(end);
            self.split_center();
        } else if was_justify && !alignment.is_justify() {
            self.join_zones();
            self.zones[Zone::Center.index()].retain(|slot| !slot.is_splitter());
            self.config.splitter_position = None;
            self.config.splitter_position2 = None;
        }
        self.structure_changed();
    }

    /// Moves everything before the first splitter (inclusive) into the start
    /// zone and everything from the second splitter on into the end zone.
    pub fn split_center_into_zones(&mut self) {
        self.split_center();
        self.structure_changed();
    }

    pub fn join_zones_into_center(&mut self) {
        self.join_zones();
        self.structure_changed();
    }

    pub fn refresh_indexes(&mut self) {
        self.indexes.clear();
        let mut global = 0;
        for zone in Zone::ALL {
            for (index, slot) in self.zones[zone.index()].iter().enumerate() {
                self.indexes
                    .insert(slot.handle(), SlotIndex { zone, index, global });
                if !slot.is_spacer() {
                    global += 1;
                }
            }
        }
    }

    fn split_center(&mut self) {
        let mut center = std::mem::take(&mut self.zones[Zone::Center.index()]);
        let spacer = match center.last() {
            Some(last) if last.is_spacer() => center.pop(),
            _ => None,
        };

        let mut start = Vec::new();
        if let Some(first) = center.iter().position(Slot::is_splitter) {
            let rest = center.split_off(first + 1);
            start = std::mem::replace(&mut center, rest);
        }
        let mut end = Vec::new();
        if let Some(second) = center.iter().position(Slot::is_splitter) {
            end = center.split_off(second);
        }
        center.extend(spacer);

        self.zones[Zone::Start.index()].extend(start);
        end.append(&mut self.zones[Zone::End.index()]);
        self.zones[Zone::End.index()] = end;
        self.zones[Zone::Center.index()] = center;
    }

    fn join_zones(&mut self) {
        let [start, center, end] = &mut self.zones;
        let spacer = match center.last() {
            Some(last) if last.is_spacer() => center.pop(),
            _ => None,
        };
        let mut joined = std::mem::take(start);
        joined.append(center);
        joined.append(end);
        joined.extend(spacer);
        *center = joined;
    }

    fn update_applet(&mut self, id: &AppletId, update: impl FnOnce(&mut AppletSlot)) -> bool {
        let applet = self
            .zones
            .iter_mut()
            .flatten()
            .chain(self.holding.iter_mut())
            .filter_map(Slot::as_applet_mut)
            .find(|applet| applet.id == *id);
        let Some(applet) = applet else {
            return false;
        };
        update(applet);
        if !self.restoring {
            self.save_options();
        }
        true
    }

    fn new_applet_slot(&mut self, id: &str) -> Result<Slot, PanelError> {
        let id = AppletId::new(id)?;
        if self.find_applet(&id).is_some() {
            return Err(PanelError::DuplicateApplet(id));
        }
        Ok(Slot::applet(self.alloc_handle(), id))
    }

    fn alloc_handle(&mut self) -> SlotHandle {
        let handle = SlotHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn locate(&self, handle: SlotHandle) -> Option<Location> {
        for zone in Zone::ALL {
            if let Some(index) = self.zones[zone.index()]
                .iter()
                .position(|slot| slot.handle() == handle)
            {
                return Some(Location::Zone(zone, index));
            }
        }
        self.holding
            .iter()
            .position(|slot| slot.handle() == handle)
            .map(Location::Holding)
    }

    /// Detaches a slot from wherever it lives.
    fn take(&mut self, handle: SlotHandle) -> Option<Slot> {
        match self.locate(handle)? {
            Location::Zone(zone, index) => Some(self.zones[zone.index()].remove(index)),
            Location::Holding(index) => Some(self.holding.remove(index)),
        }
    }

    /// Attaches a slot at the end of the center zone. A center zone holding
    /// nothing but the spacer parks the spacer first.
    fn append_to_center(&mut self, slot: Slot) {
        let center = &mut self.zones[Zone::Center.index()];
        if center.len() == 1 && center[0].is_spacer() {
            self.holding.push(center.remove(0));
        }
        let at = match center.last() {
            Some(last) if last.is_spacer() => center.len() - 1,
            _ => center.len(),
        };
        center.insert(at, slot);
    }

    /// Returns the parked spacer to an emptied center zone.
    fn settle_spacer(&mut self) {
        if !self.zones[Zone::Center.index()].is_empty() {
            return;
        }
        if let Some(index) = self.holding.iter().position(Slot::is_spacer) {
            let spacer = self.holding.remove(index);
            self.zones[Zone::Center.index()].push(spacer);
        }
    }

    fn structure_changed(&mut self) {
        self.settle_spacer();
        if self.restoring {
            return;
        }
        self.save();
        self.refresh_indexes();
    }
}
