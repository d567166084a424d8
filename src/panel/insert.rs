use super::{InsertOutcome, Location, Panel};
use crate::slot::{Slot, SlotHandle, Zone};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

impl Panel {
    /// Moves `item` into `target`'s zone, right before `target`.
    pub fn insert_before(&mut self, target: SlotHandle, item: SlotHandle) -> InsertOutcome {
        if target == item {
            return InsertOutcome::AlreadyPositioned;
        }
        let Some(zone) = self.zone_of(target) else {
            debug!("insert_before: target {target:?} is not in a zone");
            return InsertOutcome::NotFound;
        };
        self.insert_beside(zone, target, item, Side::Before)
    }

    /// Moves `item` into `target`'s zone, right after `target`. Nothing is
    /// ever placed after the spacer: asking for it lands the item before it.
    pub fn insert_after(&mut self, target: SlotHandle, item: SlotHandle) -> InsertOutcome {
        if target == item {
            return InsertOutcome::AlreadyPositioned;
        }
        let Some(Location::Zone(zone, index)) = self.locate(target) else {
            debug!("insert_after: target {target:?} is not in a zone");
            return InsertOutcome::NotFound;
        };
        if target == self.spacer {
            return self.insert_beside(zone, target, item, Side::Before);
        }
        let next = self.zones[zone.index()].get(index + 1).map(Slot::handle);
        if next == Some(item) {
            return InsertOutcome::AlreadyPositioned;
        }
        self.insert_beside(zone, target, item, Side::After)
    }

    /// Places `item` at `position` of `zone`.
    ///
    /// Negative positions, and positions past the end for anything but a
    /// splitter, leave the zone untouched.
    pub fn insert_at_index(&mut self, zone: Zone, item: SlotHandle, position: isize) -> InsertOutcome {
        let Some(slot) = self.slot(item) else {
            return InsertOutcome::NotFound;
        };
        if slot.is_spacer() {
            return InsertOutcome::NotFound;
        }
        let len = self.zones[zone.index()].len();
        let Ok(position) = usize::try_from(position) else {
            debug!("insert_at_index: negative position {position} in {zone} zone");
            return InsertOutcome::NotFound;
        };
        if position > len && !slot.is_splitter() {
            debug!("insert_at_index: position {position} past the {len} slots of {zone} zone");
            return InsertOutcome::NotFound;
        }

        let Some(slot) = self.take(item) else {
            return InsertOutcome::NotFound;
        };
        let spacer = self.spacer;
        let slots = &mut self.zones[zone.index()];
        let mut position = position;
        if slots.len() == 1 && slots[0].handle() == spacer {
            self.holding.push(slots.remove(0));
            position = 0;
        }

        let index = if position >= slots.len() {
            match slots.last() {
                Some(last) if last.handle() == spacer => slots.len() - 1,
                _ => slots.len(),
            }
        } else if slots[position].handle() == spacer {
            position.saturating_sub(1)
        } else {
            position
        };
        place(slots, index, slot);

        self.structure_changed();
        InsertOutcome::FoundAt(index)
    }

    fn insert_beside(&mut self, zone: Zone, target: SlotHandle, item: SlotHandle, side: Side) -> InsertOutcome {
        if item == self.spacer {
            debug!("the spacer is never moved");
            return InsertOutcome::NotFound;
        }
        let Some(slot) = self.take(item) else {
            debug!("insert: item {item:?} is unknown");
            return InsertOutcome::NotFound;
        };
        let slots = &mut self.zones[zone.index()];
        let Some(target_index) = slots.iter().position(|s| s.handle() == target) else {
            self.holding.push(slot);
            return InsertOutcome::NotFound;
        };
        let index = match side {
            Side::Before => target_index,
            Side::After => target_index + 1,
        };
        place(slots, index, slot);

        self.structure_changed();
        InsertOutcome::FoundAt(index)
    }
}

/// Detaches the tail of `slots` from `index` on, attaches `slot`, then
/// reattaches the tail in its original order.
fn place(slots: &mut Vec<Slot>, index: usize, slot: Slot) {
    let held = slots.split_off(index);
    slots.push(slot);
    slots.extend(held);
}
