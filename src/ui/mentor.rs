use eframe::egui;
use egui::{vec2, Align2, Stroke};

use super::theme::*;
use super::widgets::*;
use super::VibeHqApp;
use crate::mentor::{ChatSession, Role};

const TYPING_LABEL: &str = "Manifesting...";

pub fn render_launcher(app: &mut VibeHqApp, ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("mentor_launcher"))
        .anchor(Align2::RIGHT_BOTTOM, vec2(-24.0, -24.0))
        .show(ctx, |ui| {
            let label = if app.mentor_open { "\u{2715}" } else { "AI" };
            let button = egui::Button::new(
                egui::RichText::new(label)
                    .size(14.0)
                    .strong()
                    .color(egui::Color32::BLACK),
            )
            .fill(TEAL)
            .rounding(28.0)
            .min_size(vec2(56.0, 56.0));
            if ui
                .add(button)
                .on_hover_text("Vibe Architect")
                .clicked()
            {
                app.mentor_open = !app.mentor_open;
            }
        });
}

pub fn render_window(app: &mut VibeHqApp, ctx: &egui::Context) {
    let mut open = app.mentor_open;
    egui::Window::new("VIBE_ARCHITECT")
        .open(&mut open)
        .collapsible(false)
        .anchor(Align2::RIGHT_BOTTOM, vec2(-24.0, -96.0))
        .default_size(vec2(380.0, 480.0))
        .frame(egui::Frame::window(&ctx.style()).fill(PANEL_BG))
        .show(ctx, |ui| render(app, ui));
    if !open {
        app.mentor_open = false;
    }
}

fn render(app: &mut VibeHqApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        status_dot(ui, if app.mentor.is_streaming() { ORANGE } else { GREEN }, app.mentor.is_streaming());
        hud_label(
            ui,
            if app.mentor_online() {
                "NEURAL_LINK ACTIVE"
            } else {
                "NEURAL_LINK OFFLINE (no API key)"
            },
        );
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 52.0)
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let typing = typing_indicator(&app.mentor);
            let last = app.mentor.transcript().len().saturating_sub(1);
            for (i, turn) in app.mentor.transcript().iter().enumerate() {
                if let (Some(label), true) = (typing, i == last) {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        hud_label(ui, label);
                    });
                    continue;
                }
                bubble(ui, turn.role, &turn.text);
            }
        });

    ui.separator();
    let mut send = false;
    ui.horizontal(|ui| {
        let resp = ui.add(
            egui::TextEdit::singleline(app.mentor.input_mut())
                .hint_text("Ask the architect...")
                .desired_width(ui.available_width() - 64.0),
        );
        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = !app.mentor.input().trim().is_empty();
            resp.request_focus();
        }
        if neon_button(ui, "Send", app.mentor.can_submit()).clicked() {
            send = true;
        }
    });
    if send {
        app.submit_mentor();
    }
}

/// Label shown in place of the placeholder turn until the first chunk lands.
pub fn typing_indicator(session: &ChatSession) -> Option<&'static str> {
    session.awaiting_first_chunk().then_some(TYPING_LABEL)
}

fn bubble(ui: &mut egui::Ui, role: Role, text: &str) {
    let (align, fill, color) = match role {
        Role::User => (egui::Align::Max, TEAL_DIM, TEXT_COLOR),
        Role::Assistant => (egui::Align::Min, CARD_BG, TEXT_SOFT),
    };
    ui.with_layout(egui::Layout::top_down(align), |ui| {
        egui::Frame::none()
            .fill(fill)
            .stroke(Stroke::new(1.0, CARD_BORDER))
            .rounding(12.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(280.0);
                ui.label(egui::RichText::new(text).size(12.0).color(color));
            });
    });
    ui.add_space(4.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::StreamUpdate;

    #[test]
    fn typing_indicator_shows_until_first_chunk() {
        let mut session = ChatSession::new();
        assert_eq!(typing_indicator(&session), None);

        *session.input_mut() = "Build me a grid.".into();
        let generation = session.submit().unwrap().generation;
        assert_eq!(typing_indicator(&session), Some("Manifesting..."));

        session.apply(generation, StreamUpdate::Chunk("Gr".into()));
        assert_eq!(typing_indicator(&session), None);
    }
}
