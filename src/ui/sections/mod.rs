pub mod footer;
pub mod header;
pub mod hero;
pub mod pricing;
pub mod showcase;

use crate::ui::images::ImageState;
use crate::ui::widgets::image_placeholder;
use crate::ui::VibeHqApp;
use eframe::egui;

/// Draws the image behind `uri` scaled into `size`, or a placeholder frame.
pub fn image_slot(
    app: &mut VibeHqApp,
    ui: &mut egui::Ui,
    uri: &str,
    size: egui::Vec2,
    rounding: f32,
) -> egui::Response {
    let state = app
        .images
        .get(ui.ctx(), uri, app.runtime.handle(), &app.events);
    match state {
        ImageState::Ready(texture) => ui.add(
            egui::Image::new(&texture)
                .fit_to_exact_size(size)
                .maintain_aspect_ratio(false)
                .rounding(rounding),
        ),
        ImageState::Loading => image_placeholder(ui, size, "SYNCING..."),
        ImageState::Unavailable(reason) => image_placeholder(ui, size, &reason),
    }
}

/// Opens `url` in the system browser.
pub fn open_link(ctx: &egui::Context, url: &str) {
    log::info!("[ui] opening {}", url);
    ctx.open_url(egui::OpenUrl::new_tab(url));
}
