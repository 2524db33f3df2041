use eframe::egui;
use egui::{vec2, CursorIcon, Sense, Stroke};

use super::{image_slot, open_link};
use crate::ui::theme::*;
use crate::ui::widgets::*;
use crate::ui::VibeHqApp;

const CARD_WIDTH: f32 = 220.0;

pub fn render(app: &mut VibeHqApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    section_header(ui, "Showcase", TEAL);
    ui.add_space(8.0);
    ui.horizontal_top(|ui| {
        for (n, card) in (1u8..).zip(PROJECT_CARDS.iter()) {
            let Some(slot) = app.store.current().project(n).cloned() else {
                continue;
            };
            let link = slot.live_link().map(str::to_string);

            let frame = egui::Frame::none()
                .fill(CARD_BG)
                .stroke(Stroke::new(1.0, CARD_BORDER))
                .rounding(28.0)
                .inner_margin(10.0);
            let inner = frame.show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                image_slot(app, ui, &slot.image, vec2(CARD_WIDTH, CARD_WIDTH * 2.0), 20.0);
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(card.tag.to_uppercase())
                        .monospace()
                        .size(9.0)
                        .color(card.color),
                );
                ui.label(
                    egui::RichText::new(card.title)
                        .size(15.0)
                        .strong()
                        .color(TEXT_COLOR),
                );
                ui.label(egui::RichText::new(card.desc).size(11.0).color(TEXT_MUTED));
                if link.is_none() {
                    hud_label(ui, "LINK_PENDING");
                }
            });

            let response = ui.interact(
                inner.response.rect,
                ui.id().with(("showcase_card", n)),
                Sense::click(),
            );
            if let Some(url) = &link {
                let response = response.on_hover_cursor(CursorIcon::PointingHand);
                if response.clicked() {
                    open_link(ctx, url);
                }
            }
            ui.add_space(12.0);
        }
    });
    ui.add_space(32.0);
}
