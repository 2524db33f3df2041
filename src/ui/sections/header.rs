use eframe::egui;
use egui::{vec2, CursorIcon, Sense};

use super::image_slot;
use crate::ui::theme::*;
use crate::ui::widgets::*;
use crate::ui::VibeHqApp;

pub fn render(app: &mut VibeHqApp, ui: &mut egui::Ui, _ctx: &egui::Context) {
    ui.horizontal(|ui| {
        let profile = app.store.current().profile_image.clone();
        image_slot(app, ui, &profile, vec2(36.0, 36.0), 18.0);
        ui.vertical(|ui| {
            ui.label(
                egui::RichText::new("VIBE HQ")
                    .size(16.0)
                    .strong()
                    .color(TEXT_COLOR),
            );
            hud_label(ui, "Auth: Level_Elite // Subject: Architect");
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let gear = ui
                .add(
                    egui::Label::new(egui::RichText::new("\u{2699}").size(18.0).color(TEXT_MUTED))
                        .sense(Sense::click()),
                )
                .on_hover_cursor(CursorIcon::PointingHand)
                .on_hover_text("Admin console");
            if gear.clicked() {
                app.open_admin();
            }
            ui.add_space(8.0);
            if neon_button(ui, "Start a vibe", true).clicked() {
                app.contact.show();
            }
            ui.add_space(8.0);
            status_dot(ui, status_color(&app.status_state), app.status_state == "busy");
            ui.label(
                egui::RichText::new(&app.status_text)
                    .size(10.0)
                    .color(TEXT_SOFT),
            );
        });
    });
}
