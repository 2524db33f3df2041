use eframe::egui;
use egui::{pos2, vec2, Align2, FontId, Rect, Stroke};

use super::theme::*;

pub const BOOT_DURATION_SECS: f64 = 3.5;
const PROGRESS_STEP_SECS: f64 = 0.025;
const LOG_STEP_SECS: f64 = 0.5;
const LOG_WINDOW: usize = 4;

const SYSTEM_MESSAGES: [&str; 6] = [
    "Initializing Grid...",
    "Syncing Bio-Data...",
    "Vibe Protocol Loaded.",
    "Bypassing Security...",
    "Accessing Cyber-Core...",
    "Establishing Uplink...",
];

/// Timeline of the boot splash, driven by seconds since launch.
pub struct BootSequence {
    started_at: f64,
}

impl BootSequence {
    pub fn new(started_at: f64) -> Self {
        Self { started_at }
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    /// Percent complete: one point per 25 ms, capped at 100.
    pub fn progress(&self, now: f64) -> u32 {
        ((self.elapsed(now) / PROGRESS_STEP_SECS).floor() as u32).min(100)
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.elapsed(now) >= BOOT_DURATION_SECS
    }

    /// Most recent log lines, oldest first. A new line appears every 500 ms.
    pub fn log_lines(&self, now: f64) -> Vec<&'static str> {
        let emitted = (self.elapsed(now) / LOG_STEP_SECS).floor() as usize;
        let first = emitted.saturating_sub(LOG_WINDOW);
        (first..emitted)
            .map(|i| SYSTEM_MESSAGES[(i * 5 + 1) % SYSTEM_MESSAGES.len()])
            .collect()
    }
}

pub fn render(boot: &BootSequence, ui: &mut egui::Ui, now: f64) {
    let rect = ui.max_rect();
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

    // Binary rain columns.
    let columns = 15;
    let col_w = rect.width() / columns as f32;
    for c in 0..columns {
        let speed = 120.0 + (c * 37 % 90) as f32;
        let offset = ((now as f32 * speed) + c as f32 * 211.0) % (rect.height() + 400.0) - 400.0;
        let x = rect.min.x + col_w * (c as f32 + 0.5);
        for row in 0..24 {
            let y = rect.min.y + offset + row as f32 * 16.0;
            if y < rect.min.y || y > rect.max.y {
                continue;
            }
            let bit = if (c * 7 + row * 3 + (now * 4.0) as usize) % 2 == 0 { "0" } else { "1" };
            painter.text(
                pos2(x, y),
                Align2::CENTER_CENTER,
                bit,
                FontId::monospace(11.0),
                TEAL.gamma_multiply(0.18),
            );
        }
    }

    let center = rect.center();
    painter.text(
        center - vec2(0.0, 60.0),
        Align2::CENTER_CENTER,
        "VIBE HQ",
        FontId::proportional(42.0),
        TEXT_COLOR,
    );

    let progress = boot.progress(now);
    let bar = Rect::from_center_size(center, vec2(320.0, 4.0));
    painter.rect_filled(bar, 2.0, CARD_BG);
    let mut fill = bar;
    fill.set_width(bar.width() * progress as f32 / 100.0);
    painter.rect_filled(fill, 2.0, TEAL);
    painter.rect_stroke(bar.expand(3.0), 4.0, Stroke::new(0.5, TEAL_DIM));
    painter.text(
        bar.right_bottom() + vec2(0.0, 14.0),
        Align2::RIGHT_CENTER,
        format!("{}%", progress),
        FontId::monospace(10.0),
        TEAL,
    );

    for (i, line) in boot.log_lines(now).iter().enumerate() {
        painter.text(
            pos2(bar.min.x, bar.max.y + 36.0 + i as f32 * 16.0),
            Align2::LEFT_CENTER,
            format!("> {}", line),
            FontId::monospace(10.0),
            TEXT_MUTED,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_advances_one_percent_per_25ms_and_caps() {
        let boot = BootSequence::new(10.0);
        assert_eq!(boot.progress(9.0), 0);
        assert_eq!(boot.progress(10.0), 0);
        assert_eq!(boot.progress(10.5), 20);
        assert_eq!(boot.progress(12.5), 100);
        assert_eq!(boot.progress(13.4), 100);
    }

    #[test]
    fn completes_at_three_and_a_half_seconds() {
        let boot = BootSequence::new(0.0);
        assert!(!boot.is_complete(3.49));
        assert!(boot.is_complete(3.5));
    }

    #[test]
    fn log_keeps_last_four_lines() {
        let boot = BootSequence::new(0.0);
        assert!(boot.log_lines(0.4).is_empty());
        assert_eq!(boot.log_lines(1.1).len(), 2);
        let late = boot.log_lines(3.2);
        assert_eq!(late.len(), 4);
        assert!(late.iter().all(|l| SYSTEM_MESSAGES.contains(l)));
        assert_eq!(&boot.log_lines(3.2)[1..], &boot.log_lines(3.7)[..3]);
    }
}
