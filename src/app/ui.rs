use super::style::{
    DockTheme, CONTENT_PADDING, ROUNDING, SLOT_SPACING, SPLITTER_EXTENT, TOOLBAR_HEIGHT,
};
use super::{AppletFlag, DockApp, Notice, APP_DISPLAY_NAME};
use eframe::egui;
use log::debug;
use panel_order::{AppletId, InsertOutcome, RectGeometry, SlotHandle, SlotKind, Zone};
use std::time::Duration;

const ZONE_GAP: f32 = 16.0;
const NOTICE_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone)]
enum SlotView {
    Applet {
        id: AppletId,
        zoom_locked: bool,
        color_blocked: bool,
    },
    Splitter,
    Spacer,
}

impl eframe::App for DockApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.save_window_size(rect.size());
        }

        let removed = self.draw_main_panel(ctx);
        if let Some(id) = removed {
            self.remove_applet(&id);
        }

        self.sync_config();
    }
}

impl DockApp {
    fn draw_main_panel(&mut self, ctx: &egui::Context) -> Option<AppletId> {
        let theme = DockTheme::default();
        let panel_frame = egui::Frame::none()
            .fill(egui::Color32::TRANSPARENT)
            .stroke(egui::Stroke::NONE);

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let panel_rect = response.rect;

                ui.painter().rect_filled(
                    panel_rect.expand(6.0),
                    ROUNDING + 6.0,
                    theme.panel_shadow,
                );
                ui.painter().rect_filled(panel_rect, ROUNDING, theme.panel_bg);
                ui.painter().rect_stroke(
                    panel_rect,
                    ROUNDING,
                    egui::Stroke::new(1.0, theme.panel_border),
                );

                let toolbar_rect = egui::Rect::from_min_size(
                    panel_rect.min,
                    egui::vec2(panel_rect.width(), TOOLBAR_HEIGHT),
                );
                let toolbar_inner = toolbar_rect.shrink2(egui::vec2(CONTENT_PADDING, 4.0));
                ui.allocate_new_ui(egui::UiBuilder::new().max_rect(toolbar_inner), |ui| {
                    self.draw_toolbar(ui)
                });

                let dock_rect = egui::Rect::from_min_max(
                    egui::pos2(
                        panel_rect.min.x + CONTENT_PADDING,
                        panel_rect.min.y + TOOLBAR_HEIGHT + CONTENT_PADDING,
                    ),
                    panel_rect.max - egui::vec2(CONTENT_PADDING, CONTENT_PADDING),
                );
                let removed = self.draw_dock(ui, ctx, dock_rect, &theme);

                self.draw_notice_overlay(ui, &theme);
                removed
            })
            .inner
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        style_compact_menu(ui);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(APP_DISPLAY_NAME).strong());
            ui.separator();
            if ui.button("Add applet").clicked() {
                self.add_applet();
            }

            let mut justify = self.panel.config().alignment.is_justify();
            if ui.checkbox(&mut justify, "Justify").changed() {
                self.set_justify(justify);
            }

            ui.separator();
            ui.weak(self.panel.config().applet_order.encode());
        });
    }

    /// Lays out the three zones, records their slots for hit testing and
    /// resolves an in-flight drag against them.
    fn draw_dock(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        dock_rect: egui::Rect,
        theme: &DockTheme,
    ) -> Option<AppletId> {
        let icon_size = self.config.icon_size as f32;
        let row_height = icon_size.min(dock_rect.height());
        let row = egui::Rect::from_center_size(
            dock_rect.center(),
            egui::vec2(dock_rect.width(), row_height),
        );

        let justify = self.panel.config().alignment.is_justify();
        let mut laid_out = Vec::new();
        for zone in Zone::ALL {
            let frame = zone_frame(row, zone, justify);
            self.geometry.set_zone_frame(zone, frame, SLOT_SPACING);
            if frame.width() > 0.0 {
                ui.painter().rect_filled(frame.expand(4.0), ROUNDING, theme.zone_bg);
            }
            if justify {
                ui.painter().text(
                    frame.center_top() - egui::vec2(0.0, 6.0),
                    egui::Align2::CENTER_BOTTOM,
                    zone.to_string(),
                    egui::FontId::proportional(11.0),
                    theme.zone_label,
                );
            }

            let views: Vec<(SlotHandle, SlotView)> = self
                .panel
                .zone(zone)
                .iter()
                .map(|slot| (slot.handle(), slot_view(slot.kind())))
                .collect();
            let extents: Vec<f32> = views
                .iter()
                .map(|(_, view)| slot_extent(view, icon_size))
                .collect();
            let total = extents.iter().sum::<f32>()
                + SLOT_SPACING * extents.len().saturating_sub(1) as f32;
            let mut x = match zone {
                Zone::Start => frame.left(),
                Zone::Center => frame.center().x - total / 2.0,
                Zone::End => frame.right() - total,
            };
            for ((handle, view), extent) in views.into_iter().zip(extents) {
                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, row.top()),
                    egui::vec2(extent, row_height),
                );
                self.geometry.record_slot(zone, handle, rect);
                laid_out.push((handle, view, rect));
                x += extent + SLOT_SPACING;
            }
        }

        let mut removed = None;
        for (handle, view, rect) in laid_out {
            let response = ui.interact(
                rect,
                egui::Id::new(("dock_slot", handle)),
                egui::Sense::click_and_drag(),
            );
            self.paint_slot(ui, &view, rect, &response, theme, handle);

            match view {
                SlotView::Spacer => {}
                SlotView::Splitter => {
                    if response.drag_started() {
                        self.dragging = Some(handle);
                    }
                }
                SlotView::Applet {
                    id,
                    zoom_locked,
                    color_blocked,
                } => {
                    let response = if self.dragging.is_none() {
                        response.on_hover_text(id.as_str())
                    } else {
                        response
                    };
                    if response.clicked() {
                        self.selected = Some(handle);
                    }
                    if response.drag_started() {
                        self.dragging = Some(handle);
                        self.selected = Some(handle);
                    }
                    response.context_menu(|ui| {
                        if self.draw_applet_menu(ui, &id, zoom_locked, color_blocked) {
                            removed = Some(id.clone());
                        }
                    });
                }
            }
        }

        self.update_drag(ctx);
        removed
    }

    fn update_drag(&mut self, ctx: &egui::Context) {
        let Some(item) = self.dragging else {
            return;
        };
        if !ctx.input(|i| i.pointer.primary_down()) {
            debug!("drag of {item:?} finished");
            self.dragging = None;
            return;
        }
        let Some(pointer) = ctx.input(|i| i.pointer.interact_pos()) else {
            return;
        };
        if let InsertOutcome::FoundAt(index) =
            self.panel
                .insert_at_coordinates2(&self.geometry, item, pointer)
        {
            debug!("dragged {item:?} to index {index}");
            ctx.request_repaint();
        }
    }

    fn paint_slot(
        &self,
        ui: &egui::Ui,
        view: &SlotView,
        rect: egui::Rect,
        response: &egui::Response,
        theme: &DockTheme,
        handle: SlotHandle,
    ) {
        let painter = ui.painter();
        match view {
            SlotView::Spacer => {
                painter.rect_stroke(rect, ROUNDING, egui::Stroke::new(1.0, theme.spacer));
            }
            SlotView::Splitter => {
                let color = if self.dragging == Some(handle) || response.hovered() {
                    theme.drop_hint
                } else {
                    theme.splitter
                };
                painter.line_segment(
                    [rect.center_top(), rect.center_bottom()],
                    egui::Stroke::new(3.0, color),
                );
            }
            SlotView::Applet {
                id,
                zoom_locked,
                color_blocked,
            } => {
                let fill = if self.dragging == Some(handle) || self.selected == Some(handle) {
                    theme.applet_selected
                } else if response.hovered() {
                    theme.applet_hover
                } else {
                    theme.applet_bg
                };
                painter.rect_filled(rect, ROUNDING, fill);
                painter.rect_stroke(rect, ROUNDING, egui::Stroke::new(1.0, theme.applet_border));
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    initials(id),
                    egui::FontId::proportional(rect.height() * 0.35),
                    theme.applet_text,
                );
                if *zoom_locked {
                    let mark = rect.left_top() + egui::vec2(7.0, 7.0);
                    painter.circle_filled(mark, 3.5, theme.zoom_lock_mark);
                }
                if *color_blocked {
                    let mark = rect.right_top() + egui::vec2(-7.0, 7.0);
                    painter.circle_filled(mark, 3.5, theme.color_block_mark);
                }
            }
        }
    }

    /// Returns true when the applet should be removed.
    fn draw_applet_menu(
        &mut self,
        ui: &mut egui::Ui,
        id: &AppletId,
        zoom_locked: bool,
        color_blocked: bool,
    ) -> bool {
        style_compact_menu(ui);
        ui.label(id.as_str());
        ui.separator();

        let mut locked = zoom_locked;
        if ui.checkbox(&mut locked, "Lock zoom").changed() {
            self.set_applet_flag(id, AppletFlag::ZoomLock, locked);
        }
        let mut blocked = color_blocked;
        if ui.checkbox(&mut blocked, "Block colorizing").changed() {
            self.set_applet_flag(id, AppletFlag::ColorBlock, blocked);
        }

        ui.separator();
        if ui.button("Remove").clicked() {
            ui.close_menu();
            return true;
        }
        false
    }

    /// Paints the current notice above its applet, or in the middle of the
    /// dock when it concerns no applet on the panel.
    fn draw_notice_overlay(&mut self, ui: &egui::Ui, theme: &DockTheme) {
        let Some(notice) = &self.notice else {
            return;
        };
        if notice.shown_at.elapsed() >= NOTICE_DURATION {
            self.notice = None;
            return;
        }

        let painter = ui.ctx().layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("dock_notice"),
        ));
        let galley = painter.layout_no_wrap(
            notice.message.clone(),
            egui::FontId::proportional(13.0),
            theme.toast_text,
        );
        let size = galley.size();
        let text_rect = match self.notice_anchor(notice) {
            Some(slot) => egui::Rect::from_center_size(
                slot.center_top() - egui::vec2(0.0, size.y / 2.0 + 12.0),
                size,
            ),
            None => egui::Rect::from_center_size(ui.clip_rect().center(), size),
        };
        let bubble = text_rect.expand(8.0);
        painter.rect_filled(bubble, 8.0, theme.toast_bg);
        painter.rect_stroke(bubble, 8.0, egui::Stroke::new(1.0, theme.applet_border));
        painter.galley(text_rect.min, galley, theme.toast_text);
        ui.ctx().request_repaint();
    }

    fn notice_anchor(&self, notice: &Notice) -> Option<egui::Rect> {
        let handle = self.panel.find_applet(notice.applet.as_ref()?)?;
        let zone = self.panel.zone_of(handle)?;
        slot_root_rect(&self.geometry, zone, handle)
    }
}

/// Rectangle a slot was last painted at, in root coordinates.
fn slot_root_rect(geometry: &RectGeometry, zone: Zone, handle: SlotHandle) -> Option<egui::Rect> {
    let rects = geometry.zone(zone);
    rects
        .slots()
        .iter()
        .find(|(slot, _)| *slot == handle)
        .map(|(_, rect)| rect.translate(rects.frame.min.to_vec2()))
}

/// Frame of one zone within the dock row. Start and end zones only take
/// room in justify alignment.
fn zone_frame(row: egui::Rect, zone: Zone, justify: bool) -> egui::Rect {
    if !justify {
        return match zone {
            Zone::Start => egui::Rect::from_min_size(row.left_top(), egui::vec2(0.0, row.height())),
            Zone::Center => row,
            Zone::End => egui::Rect::from_min_size(row.right_top(), egui::vec2(0.0, row.height())),
        };
    }
    let third = ((row.width() - 2.0 * ZONE_GAP) / 3.0).max(0.0);
    let left = match zone {
        Zone::Start => row.left(),
        Zone::Center => row.left() + third + ZONE_GAP,
        Zone::End => row.right() - third,
    };
    egui::Rect::from_min_size(egui::pos2(left, row.top()), egui::vec2(third, row.height()))
}

fn slot_view(kind: &SlotKind) -> SlotView {
    match kind {
        SlotKind::Applet(applet) => SlotView::Applet {
            id: applet.id.clone(),
            zoom_locked: applet.zoom_locked,
            color_blocked: applet.color_blocked,
        },
        SlotKind::Splitter => SlotView::Splitter,
        SlotKind::Spacer => SlotView::Spacer,
    }
}

fn slot_extent(view: &SlotView, icon_size: f32) -> f32 {
    match view {
        SlotView::Splitter => SPLITTER_EXTENT,
        SlotView::Applet { .. } | SlotView::Spacer => icon_size,
    }
}

fn initials(id: &AppletId) -> String {
    let text = id.as_str();
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    match text.chars().next() {
        Some(first) => format!("{}{digits}", first.to_ascii_uppercase()),
        None => digits,
    }
}

fn style_compact_menu(ui: &mut egui::Ui) {
    let style = ui.style_mut();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
}
