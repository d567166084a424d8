use crate::ids::AppletId;
use std::fmt;

/// One of the three ordered containers of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Start,
    Center,
    End,
}

impl Zone {
    /// Persisted read order.
    pub const ALL: [Zone; 3] = [Zone::Start, Zone::Center, Zone::End];

    pub(crate) fn index(self) -> usize {
        match self {
            Zone::Start => 0,
            Zone::Center => 1,
            Zone::End => 2,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Start => "start",
            Zone::Center => "center",
            Zone::End => "end",
        };
        f.write_str(name)
    }
}

/// Panel-unique identity of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppletSlot {
    pub id: AppletId,
    pub zoom_locked: bool,
    pub color_blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    Applet(AppletSlot),
    Splitter,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    handle: SlotHandle,
    kind: SlotKind,
}

impl Slot {
    pub(crate) fn applet(handle: SlotHandle, id: AppletId) -> Self {
        Self {
            handle,
            kind: SlotKind::Applet(AppletSlot {
                id,
                zoom_locked: false,
                color_blocked: false,
            }),
        }
    }

    pub(crate) fn splitter(handle: SlotHandle) -> Self {
        Self {
            handle,
            kind: SlotKind::Splitter,
        }
    }

    pub(crate) fn spacer(handle: SlotHandle) -> Self {
        Self {
            handle,
            kind: SlotKind::Spacer,
        }
    }

    pub fn handle(&self) -> SlotHandle {
        self.handle
    }

    pub fn kind(&self) -> &SlotKind {
        &self.kind
    }

    pub fn as_applet(&self) -> Option<&AppletSlot> {
        match &self.kind {
            SlotKind::Applet(applet) => Some(applet),
            _ => None,
        }
    }

    pub(crate) fn as_applet_mut(&mut self) -> Option<&mut AppletSlot> {
        match &mut self.kind {
            SlotKind::Applet(applet) => Some(applet),
            _ => None,
        }
    }

    pub fn applet_id(&self) -> Option<&AppletId> {
        self.as_applet().map(|applet| &applet.id)
    }

    pub fn is_splitter(&self) -> bool {
        matches!(self.kind, SlotKind::Splitter)
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self.kind, SlotKind::Spacer)
    }
}
