use eframe::egui;
use egui::vec2;

use super::image_slot;
use crate::ui::theme::*;
use crate::ui::widgets::*;
use crate::ui::VibeHqApp;

pub fn render(app: &mut VibeHqApp, ui: &mut egui::Ui, _ctx: &egui::Context) {
    ui.add_space(24.0);
    ui.columns(2, |cols| {
        let ui = &mut cols[0];
        ui.add_space(40.0);
        hud_label(ui, "// CREATIVE_TECHNOLOGIST");
        ui.label(
            egui::RichText::new("WE BUILD")
                .size(44.0)
                .strong()
                .color(TEXT_COLOR),
        );
        ui.label(
            egui::RichText::new("DIGITAL VIBES.")
                .size(44.0)
                .strong()
                .color(TEAL),
        );
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(
                "Interactive celebrations, cyber-noir stories and brand visuals, \
                 engineered to feel alive.",
            )
            .size(14.0)
            .color(TEXT_SOFT),
        );
        ui.add_space(20.0);
        ui.horizontal(|ui| {
            if neon_button(ui, "Commission a build", true).clicked() {
                app.contact.show();
            }
            if ghost_button(ui, "Talk to the mentor").clicked() {
                app.mentor_open = true;
            }
        });

        let ui = &mut cols[1];
        let hero = app.store.current().hero_image.clone();
        let width = ui.available_width().min(380.0);
        ui.vertical_centered(|ui| {
            image_slot(app, ui, &hero, vec2(width, width * 1.5), 24.0);
        });
    });
    ui.add_space(32.0);
}
