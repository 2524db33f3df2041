use eframe::egui;
use egui::{pos2, vec2, Color32, CursorIcon, FontId, Rect, Sense, Stroke};

use super::theme::*;

/// Glowing accent bar followed by an uppercase heading.
pub fn section_header(ui: &mut egui::Ui, text: &str, accent: Color32) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(24.0, 12.0), Sense::hover());
        let y = rect.center().y;
        ui.painter().line_segment(
            [pos2(rect.min.x, y), pos2(rect.max.x, y)],
            Stroke::new(2.0, accent),
        );
        ui.painter().line_segment(
            [pos2(rect.min.x, y), pos2(rect.max.x, y)],
            Stroke::new(6.0, accent.gamma_multiply(0.2)),
        );
        ui.label(
            egui::RichText::new(text.to_uppercase())
                .size(11.0)
                .strong()
                .color(TEXT_COLOR),
        );
    });
    ui.add_space(4.0);
}

pub fn hud_label(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.label(
        egui::RichText::new(text)
            .monospace()
            .size(9.0)
            .color(TEXT_MUTED),
    )
}

pub fn field(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) -> egui::Response {
    ui.label(egui::RichText::new(label).size(11.0).color(TEXT_MUTED));
    ui.visuals_mut().extreme_bg_color = INPUT_BG;
    ui.add(
        egui::TextEdit::singleline(value)
            .font(FontId::monospace(12.0))
            .text_color(TEXT_COLOR)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    )
}

/// Filled teal call-to-action button.
pub fn neon_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    let button = egui::Button::new(
        egui::RichText::new(text.to_uppercase())
            .size(11.0)
            .strong()
            .color(Color32::BLACK),
    )
    .fill(if enabled { TEAL } else { TEAL_DIM })
    .rounding(10.0)
    .min_size(vec2(0.0, 34.0));
    ui.add_enabled(enabled, button)
        .on_hover_cursor(CursorIcon::PointingHand)
}

/// Outlined secondary button.
pub fn ghost_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let button = egui::Button::new(
        egui::RichText::new(text)
            .monospace()
            .size(10.0)
            .color(TEXT_SOFT),
    )
    .fill(CARD_BG)
    .stroke(Stroke::new(1.0, CARD_BORDER))
    .rounding(16.0)
    .min_size(vec2(0.0, 30.0));
    ui.add(button).on_hover_cursor(CursorIcon::PointingHand)
}

pub fn status_dot(ui: &mut egui::Ui, color: Color32, pulse: bool) {
    let (rect, _) = ui.allocate_exact_size(vec2(8.0, 8.0), Sense::hover());
    let alpha = if pulse {
        let t = ui.input(|i| i.time) as f32;
        0.55 + 0.45 * (t * 3.0).sin().abs()
    } else {
        1.0
    };
    ui.painter()
        .circle_filled(rect.center(), 3.0, color.gamma_multiply(alpha));
    if pulse {
        ui.ctx().request_repaint_after(std::time::Duration::from_millis(50));
    }
}

/// Frame drawn where an image is missing or still loading.
pub fn image_placeholder(ui: &mut egui::Ui, size: egui::Vec2, caption: &str) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    if ui.is_rect_visible(rect) {
        ui.painter().rect(rect, 12.0, CARD_BG, Stroke::new(1.0, CARD_BORDER));
        let inner = Rect::from_center_size(rect.center(), size * 0.6);
        ui.painter().line_segment(
            [inner.left_top(), inner.right_bottom()],
            Stroke::new(0.5, TEXT_FAINT),
        );
        ui.painter().line_segment(
            [inner.right_top(), inner.left_bottom()],
            Stroke::new(0.5, TEXT_FAINT),
        );
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            caption,
            FontId::monospace(9.0),
            TEXT_MUTED,
        );
    }
    response
}
