use eframe::egui;
use egui::{vec2, Stroke};
use std::path::PathBuf;

use super::sections::image_slot;
use super::theme::*;
use super::widgets::*;
use super::VibeHqApp;
use crate::ingest::ImageTarget;

pub fn render_window(app: &mut VibeHqApp, ctx: &egui::Context) {
    let mut open = app.admin_open;
    egui::Window::new("MATRIX_ADMIN_PANEL")
        .open(&mut open)
        .collapsible(false)
        .default_size(vec2(560.0, 640.0))
        .frame(egui::Frame::window(&ctx.style()).fill(PANEL_BG))
        .show(ctx, |ui| render(app, ui));
    if !open {
        app.close_admin();
    }
}

fn render(app: &mut VibeHqApp, ui: &mut egui::Ui) {
    hud_label(
        ui,
        "Drop an image file on the window to load it into the selected slot.",
    );
    ui.add_space(6.0);

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 48.0)
        .show(ui, |ui| {
            section_header(ui, "Character Bio-Data (Uploads)", TEAL);
            image_row(app, ui, ImageTarget::Profile);
            image_row(app, ui, ImageTarget::Hero);

            section_header(ui, "Environment Management", ORANGE);
            for n in 1..=3u8 {
                image_row(app, ui, ImageTarget::Project(n));
                let slot = &mut app.form.projects[usize::from(n) - 1];
                field(ui, "Live link", &mut slot.link, "https://...");
                ui.add_space(8.0);
            }

            section_header(ui, "System Manuals (URLs)", TEAL);
            field(
                ui,
                "Standard PDF",
                &mut app.form.standard_pdf_link,
                "https://.../standard.pdf",
            );
            field(
                ui,
                "Premium PDF",
                &mut app.form.premium_pdf_link,
                "https://.../premium.pdf",
            );
        });

    ui.separator();
    let dirty = app.form.is_dirty(app.store.current());
    ui.horizontal(|ui| {
        if neon_button(ui, "Save", dirty).clicked() {
            app.save_admin();
        }
        if ghost_button(ui, "Reset").clicked() {
            app.reset_admin();
        }
        if !app.ingest_inflight.is_empty() {
            ui.spinner();
            hud_label(ui, "ENCODING...");
        } else if dirty {
            hud_label(ui, "UNSAVED_CHANGES");
        }
    });
}

fn image_row(app: &mut VibeHqApp, ui: &mut egui::Ui, target: ImageTarget) {
    egui::Frame::none()
        .fill(CARD_BG)
        .stroke(Stroke::new(1.0, CARD_BORDER))
        .rounding(10.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let current = app.form.image(target).to_string();
                image_slot(app, ui, &current, vec2(56.0, 56.0), 8.0);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(target.label())
                                .size(12.0)
                                .strong()
                                .color(TEXT_COLOR),
                        );
                        ui.radio_value(&mut app.drop_target, target, "drop target");
                    });
                    let path = app.path_inputs.entry(target).or_default();
                    let busy = app.ingest_inflight.contains(&target);
                    let mut submit = false;
                    ui.horizontal(|ui| {
                        let resp = ui.add(
                            egui::TextEdit::singleline(path)
                                .hint_text("/path/to/image.png")
                                .desired_width(ui.available_width() - 70.0),
                        );
                        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            submit = true;
                        }
                        if ui
                            .add_enabled(!busy && !path.trim().is_empty(), egui::Button::new("Load"))
                            .clicked()
                        {
                            submit = true;
                        }
                    });
                    if submit && !busy {
                        let raw = path.trim().to_string();
                        if !raw.is_empty() {
                            app.start_ingest(target, PathBuf::from(raw));
                        }
                    }
                });
            });
        });
    ui.add_space(4.0);
}

