use eframe::egui;

use crate::ui::theme::*;
use crate::ui::widgets::*;
use crate::ui::VibeHqApp;

pub fn render(app: &mut VibeHqApp, ui: &mut egui::Ui, _ctx: &egui::Context) {
    ui.separator();
    ui.horizontal(|ui| {
        let now = chrono::Local::now();
        hud_label(ui, &format!("\u{00a9} {} Vibe Coding Protocol // System_Core: Active", now.format("%Y")));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            hud_label(ui, &format!("GRID_TIME {}", now.format("%Y.%m.%d // %H:%M")));
            ui.add_space(12.0);
            if ui
                .add(
                    egui::Label::new(egui::RichText::new("Contact").size(10.0).color(TEAL))
                        .sense(egui::Sense::click()),
                )
                .clicked()
            {
                app.contact.show();
            }
            ui.label(egui::RichText::new("|").size(10.0).color(TEXT_FAINT));
            if ui
                .add(
                    egui::Label::new(
                        egui::RichText::new("Matrix_Admin_Panel").size(10.0).color(TEXT_MUTED),
                    )
                    .sense(egui::Sense::click()),
                )
                .clicked()
            {
                app.open_admin();
            }
        });
    });
    ui.add_space(8.0);
}
