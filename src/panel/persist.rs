use super::Panel;
use crate::ids::IdList;
use crate::slot::{AppletSlot, Slot, SlotKind, Zone};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

impl Panel {
    /// Rebuilds the arrangement from the persisted order.
    ///
    /// Applets named in `appletOrder` are attached in saved order, the rest
    /// follow in the order they were found (zones first, then applets still
    /// waiting in the holding area). In justify alignment the saved
    /// splitters are re-inserted, lowered by the number of saved ids before
    /// them that no longer resolve to an applet. The order is saved again
    /// afterwards so stale ids are dropped from configuration.
    pub fn restore(&mut self) {
        self.restoring = true;

        let order = self.config.applet_order.clone();
        let mut ranks: HashMap<&str, usize> = HashMap::with_capacity(order.len());
        for (rank, id) in order.entries().iter().enumerate() {
            ranks.insert(id.as_str(), rank);
        }

        let mut spacer = None;
        let mut known: Vec<(usize, Slot)> = Vec::new();
        let mut unordered: Vec<Slot> = Vec::new();
        let mut resolved: HashSet<usize> = HashSet::new();
        let (parked, held): (Vec<Slot>, Vec<Slot>) = std::mem::take(&mut self.holding)
            .into_iter()
            .partition(Slot::is_spacer);
        self.holding = parked;
        let mut detached: Vec<Slot> = Vec::new();
        for zone in Zone::ALL {
            detached.append(&mut self.zones[zone.index()]);
        }
        detached.extend(held);
        for slot in detached {
            let rank = match slot.kind() {
                SlotKind::Applet(applet) => ranks.get(applet.id.as_str()).copied(),
                SlotKind::Spacer => {
                    spacer = Some(slot);
                    continue;
                }
                SlotKind::Splitter => continue,
            };
            match rank {
                Some(rank) => {
                    resolved.insert(rank);
                    known.push((rank, slot));
                }
                None => unordered.push(slot),
            }
        }
        known.sort_by_key(|(rank, _)| *rank);

        self.zones[Zone::Center.index()].extend(spacer);
        let unordered_count = unordered.len();
        for slot in known.into_iter().map(|(_, slot)| slot).chain(unordered) {
            self.append_to_center(slot);
        }

        if self.config.alignment.is_justify() {
            let missing_before = |limit: usize| {
                (0..limit.min(order.len()))
                    .filter(|rank| !resolved.contains(rank))
                    .count()
            };
            let [first, second] = self.config.splitter_positions();
            if let Some(position) = first {
                let corrected = position - missing_before(position);
                debug!("restoring splitter {position} at {corrected}");
                self.add_splitter(corrected);
            }
            if let Some(position) = second {
                // The first splitter occupies one of the slots before this one.
                let preceding_ids = position.saturating_sub(usize::from(first.is_some()));
                let corrected = position - missing_before(preceding_ids);
                debug!("restoring splitter {position} at {corrected}");
                self.add_splitter(corrected);
            }
        }

        let stale = order.len() - resolved.len();
        if stale > 0 || unordered_count > 0 {
            info!(
                "normalizing applet order: {stale} stale id(s), {unordered_count} unordered applet(s)"
            );
        }

        self.save();
        self.restore_options();
        self.restoring = false;

        if self.config.alignment.is_justify() {
            self.split_center_into_zones();
        }
        self.settle_spacer();
        self.refresh_indexes();
    }

    /// Writes the current order, and in justify alignment the splitter
    /// positions, back to configuration.
    pub fn save(&mut self) {
        let justify = self.config.alignment.is_justify();
        let mut ids = Vec::new();
        let mut splitters = Vec::new();
        let mut offset = 0;

        for zone in Zone::ALL {
            let mut counted = 0;
            for (index, slot) in self.zones[zone.index()]
                .iter()
                .filter(|slot| !slot.is_spacer())
                .enumerate()
            {
                match slot.kind() {
                    SlotKind::Applet(applet) => ids.push(&applet.id),
                    SlotKind::Splitter if justify => splitters.push(offset + index),
                    _ => {}
                }
                counted += 1;
            }
            offset += counted;
        }

        if justify {
            if splitters.len() > 2 {
                debug!("only two splitters are persisted, dropping {}", splitters.len() - 2);
            }
            self.config.splitter_position = splitters.first().copied();
            self.config.splitter_position2 = splitters.get(1).copied();
        }
        self.config.applet_order = IdList::from_ids(ids);
        self.config_dirty = true;
        debug!(
            "saved applet order {:?}, splitters {:?}",
            self.config.applet_order.encode(),
            self.config.splitter_positions()
        );
    }

    /// Applies the persisted zoom-lock and color-block lists. Flags are only
    /// ever set here, never cleared.
    pub fn restore_options(&mut self) {
        let locked = self.config.locked_zoom_applets.clone();
        let blocked = self.config.user_blocks_colorizing_applets.clone();
        self.apply_option(&locked, |applet| applet.zoom_locked = true);
        self.apply_option(&blocked, |applet| applet.color_blocked = true);
    }

    pub fn save_options(&mut self) {
        self.config.locked_zoom_applets = self.flagged(|applet| applet.zoom_locked);
        self.config.user_blocks_colorizing_applets = self.flagged(|applet| applet.color_blocked);
        self.config_dirty = true;
    }

    fn apply_option(&mut self, list: &IdList, set: impl Fn(&mut AppletSlot)) {
        for entry in list.entries() {
            let matching = self
                .zones
                .iter_mut()
                .flatten()
                .filter_map(Slot::as_applet_mut)
                .filter(|applet| applet.id.as_str() == entry.as_str());
            for applet in matching {
                set(applet);
            }
        }
    }

    fn flagged(&self, flag: impl Fn(&AppletSlot) -> bool) -> IdList {
        IdList::from_ids(
            self.zones
                .iter()
                .flatten()
                .filter_map(Slot::as_applet)
                .filter(|applet| flag(applet))
                .map(|applet| &applet.id),
        )
    }
}
