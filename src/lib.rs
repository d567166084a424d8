//! Applet ordering for a three-zone dock panel.
//!
//! A [`Panel`] keeps the slots of the start, center and end zones in order,
//! reconciles them with the persisted [`PanelConfig`], and resolves drag and
//! drop gestures into moves, either from an index or from pointer
//! coordinates through a host supplied [`PanelGeometry`].

pub mod config;
pub mod geometry;
pub mod ids;
pub mod panel;
pub mod slot;

pub use config::{Alignment, PanelConfig};
pub use geometry::{Orientation, PanelGeometry, RectGeometry};
pub use ids::{AppletId, AppletIdError, IdList};
pub use panel::{InsertOutcome, Panel, PanelError, SlotIndex};
pub use slot::{AppletSlot, Slot, SlotHandle, SlotKind, Zone};
