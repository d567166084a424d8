mod app;

use crate::app::{
    AppConfig, DockApp, APP_DISPLAY_NAME, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_HEIGHT,
    WINDOW_WIDTH,
};
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let startup_size = load_startup_window_size();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(startup_size)
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT])
            .with_resizable(true)
            .with_transparent(true)
            .with_visible(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_DISPLAY_NAME,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DockApp::new(cc)))
        }),
    )
}

fn load_startup_window_size() -> [f32; 2] {
    let config = AppConfig::load();
    if let Some((w, h)) = config.last_size {
        [
            sanitize_dimension(w, WINDOW_WIDTH, MIN_WINDOW_WIDTH),
            sanitize_dimension(h, WINDOW_HEIGHT, MIN_WINDOW_HEIGHT),
        ]
    } else {
        [WINDOW_WIDTH, WINDOW_HEIGHT]
    }
}

fn sanitize_dimension(value: f32, fallback: f32, min: f32) -> f32 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, 4096.0)
}
