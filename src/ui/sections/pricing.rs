use eframe::egui;
use egui::Stroke;

use super::open_link;
use crate::settings::PLACEHOLDER_LINK;
use crate::ui::theme::*;
use crate::ui::widgets::*;
use crate::ui::VibeHqApp;

struct Tier {
    name: &'static str,
    blurb: &'static str,
    accent: egui::Color32,
}

const TIERS: [Tier; 2] = [
    Tier {
        name: "Standard_Manual",
        blurb: "Single-page experience, one revision cycle.",
        accent: TEAL,
    },
    Tier {
        name: "Premium_Manual",
        blurb: "Multi-scene build with custom motion and domain setup.",
        accent: ORANGE,
    },
];

/// Link a download button should open, if any.
pub fn download_target(link: &str) -> Option<&str> {
    let link = link.trim();
    (!link.is_empty() && link != PLACEHOLDER_LINK).then_some(link)
}

pub fn render(app: &mut VibeHqApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    section_header(ui, "Investment", ORANGE);
    ui.add_space(8.0);
    let links = {
        let s = app.store.current();
        [s.standard_pdf_link.clone(), s.premium_pdf_link.clone()]
    };
    ui.columns(2, |cols| {
        for ((ui, tier), link) in cols.iter_mut().zip(TIERS.iter()).zip(links.iter()) {
            egui::Frame::none()
                .fill(CARD_BG)
                .stroke(Stroke::new(1.0, CARD_BORDER))
                .rounding(16.0)
                .inner_margin(18.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new(tier.name.to_uppercase())
                            .size(18.0)
                            .strong()
                            .color(tier.accent),
                    );
                    ui.label(egui::RichText::new(tier.blurb).size(12.0).color(TEXT_SOFT));
                    ui.add_space(10.0);
                    let target = download_target(link);
                    let resp = neon_button(ui, "Download", target.is_some());
                    if let Some(url) = target {
                        if resp.clicked() {
                            open_link(ctx, url);
                        }
                    } else {
                        resp.on_disabled_hover_text("No rate card uploaded yet");
                    }
                });
        }
    });
    ui.add_space(32.0);
}
