use eframe::egui::Color32;

pub const TOOLBAR_HEIGHT: f32 = 34.0;
pub const CONTENT_PADDING: f32 = 12.0;
pub const EDGE_MARGIN: f32 = 6.0;
pub const SLOT_SPACING: f32 = 8.0;
pub const SPLITTER_EXTENT: f32 = 10.0;
pub const ROUNDING: f32 = 10.0;

#[derive(Clone, Copy)]
pub struct DockTheme {
    pub panel_bg: Color32,
    pub panel_border: Color32,
    pub panel_shadow: Color32,
    pub zone_bg: Color32,
    pub zone_label: Color32,
    pub applet_bg: Color32,
    pub applet_hover: Color32,
    pub applet_selected: Color32,
    pub applet_border: Color32,
    pub applet_text: Color32,
    pub zoom_lock_mark: Color32,
    pub color_block_mark: Color32,
    pub splitter: Color32,
    pub spacer: Color32,
    pub drop_hint: Color32,
    pub toast_bg: Color32,
    pub toast_text: Color32,
}

impl Default for DockTheme {
    fn default() -> Self {
        Self {
            panel_bg: Color32::from_rgba_premultiplied(14, 20, 31, 220),
            panel_border: Color32::from_rgba_premultiplied(161, 179, 201, 36),
            panel_shadow: Color32::from_rgba_premultiplied(3, 8, 16, 75),
            zone_bg: Color32::from_rgba_premultiplied(21, 32, 48, 184),
            zone_label: Color32::from_rgba_premultiplied(205, 221, 238, 90),
            applet_bg: Color32::from_rgba_premultiplied(24, 36, 50, 230),
            applet_hover: Color32::from_rgba_premultiplied(35, 53, 74, 240),
            applet_selected: Color32::from_rgba_premultiplied(45, 104, 114, 240),
            applet_border: Color32::from_rgba_premultiplied(147, 169, 194, 78),
            applet_text: Color32::from_rgb(242, 248, 255),
            zoom_lock_mark: Color32::from_rgb(240, 196, 92),
            color_block_mark: Color32::from_rgb(232, 112, 112),
            splitter: Color32::from_rgba_premultiplied(93, 214, 189, 200),
            spacer: Color32::from_rgba_premultiplied(205, 221, 238, 60),
            drop_hint: Color32::from_rgba_premultiplied(93, 214, 189, 186),
            toast_bg: Color32::from_rgba_premultiplied(8, 12, 18, 236),
            toast_text: Color32::from_rgb(245, 250, 255),
        }
    }
}
