mod config;
mod style;
mod ui;

pub use config::AppConfig;
use eframe::egui;
use log::{info, warn};
use panel_order::{Alignment, AppletId, Orientation, Panel, RectGeometry, SlotHandle};
use std::time::Instant;

pub const APP_DISPLAY_NAME: &str = "Panel Order";
pub const WINDOW_WIDTH: f32 = 960.0;
pub const WINDOW_HEIGHT: f32 = 180.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 140.0;
const MAX_APPLETS: usize = 24;

pub struct DockApp {
    panel: Panel,
    config: AppConfig,
    geometry: RectGeometry,
    dragging: Option<SlotHandle>,
    selected: Option<SlotHandle>,
    next_applet: usize,
    config_pending: bool,
    notice: Option<Notice>,
}

/// Short-lived message, drawn over the applet it concerns while that
/// applet is on the panel.
struct Notice {
    message: String,
    applet: Option<AppletId>,
    shown_at: Instant,
}

impl DockApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load();
        if let Some((w, h)) = config.last_size {
            let restored = sanitize_window_size(egui::vec2(w, h));
            cc.egui_ctx
                .send_viewport_cmd(egui::ViewportCommand::InnerSize(restored));
        }
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        let panel = Panel::load(
            config.panel.clone(),
            config.applets.iter().map(String::as_str),
        );
        info!(
            "Loaded {} applets, order {:?}",
            panel.applet_ids().len(),
            panel.config().applet_order.encode()
        );
        let icon_size = config.icon_size as f32;
        Self {
            panel,
            geometry: RectGeometry::new(Orientation::Horizontal, icon_size, style::EDGE_MARGIN),
            dragging: None,
            selected: None,
            next_applet: config.applets.len() + 1,
            config_pending: false,
            notice: None,
            config,
        }
    }

    fn add_applet(&mut self) {
        if self.config.applets.len() >= MAX_APPLETS {
            self.show_warning(format!("Max {MAX_APPLETS} applets"));
            return;
        }
        let id = loop {
            let candidate = format!("applet{}", self.next_applet);
            self.next_applet += 1;
            if !self.config.applets.contains(&candidate) {
                break candidate;
            }
        };
        match self.panel.add_applet(&id) {
            Ok(handle) => {
                self.config.applets.push(id);
                self.selected = Some(handle);
                self.config_pending = true;
            }
            Err(err) => {
                warn!("Failed to add applet {id:?}: {err}");
                self.show_warning(format!("Could not add {id}"));
            }
        }
    }

    fn remove_applet(&mut self, id: &AppletId) {
        if self.panel.remove_applet(id) {
            self.config.applets.retain(|applet| applet != id.as_str());
            self.config_pending = true;
            self.show_warning(format!("Removed {id}"));
        }
    }

    fn set_justify(&mut self, justify: bool) {
        let alignment = if justify {
            Alignment::Justify
        } else {
            Alignment::Center
        };
        self.panel.set_alignment(alignment);
    }

    /// Copies panel config changes into the app config and writes it out
    /// once no drag is in flight.
    fn sync_config(&mut self) {
        if self.panel.take_config_changes() {
            self.config.panel = self.panel.config().clone();
            self.config_pending = true;
        }
        if self.config_pending && self.dragging.is_none() {
            self.config.save();
            self.config_pending = false;
        }
    }

    fn show_warning<S: Into<String>>(&mut self, message: S) {
        self.notice = Some(Notice {
            message: message.into(),
            applet: None,
            shown_at: Instant::now(),
        });
    }

    fn show_applet_notice<S: Into<String>>(&mut self, id: &AppletId, message: S) {
        self.notice = Some(Notice {
            message: message.into(),
            applet: Some(id.clone()),
            shown_at: Instant::now(),
        });
    }

    /// Applies a flag change from the applet menu, telling the user when the
    /// applet went away while the menu was open.
    fn set_applet_flag(&mut self, id: &AppletId, flag: AppletFlag, value: bool) {
        let applied = match flag {
            AppletFlag::ZoomLock => self.panel.set_zoom_locked(id, value),
            AppletFlag::ColorBlock => self.panel.set_color_blocked(id, value),
        };
        if !applied {
            warn!("{flag:?} change for {id} ignored, applet is gone");
            self.show_warning(format!("{id} is no longer on the panel"));
        } else if value {
            self.show_applet_notice(id, flag.enabled_label());
        }
    }

    fn save_window_size(&mut self, size: egui::Vec2) {
        let size = sanitize_window_size(size);
        if self.config.last_size != Some((size.x, size.y)) {
            self.config.last_size = Some((size.x, size.y));
            self.config_pending = true;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppletFlag {
    ZoomLock,
    ColorBlock,
}

impl AppletFlag {
    fn enabled_label(self) -> &'static str {
        match self {
            AppletFlag::ZoomLock => "Zoom locked",
            AppletFlag::ColorBlock => "Colorizing blocked",
        }
    }
}

/// Keeps a restored window at least as large as the dock needs; a
/// non-finite side falls back to the default size.
pub(super) fn sanitize_window_size(size: egui::Vec2) -> egui::Vec2 {
    let side = |value: f32, fallback: f32, min: f32| {
        if value.is_finite() {
            value.max(min)
        } else {
            fallback
        }
    };
    egui::vec2(
        side(size.x, WINDOW_WIDTH, MIN_WINDOW_WIDTH),
        side(size.y, WINDOW_HEIGHT, MIN_WINDOW_HEIGHT),
    )
}
