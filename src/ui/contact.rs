use eframe::egui;

use super::theme::*;
use super::widgets::*;
use super::VibeHqApp;

const SENDING_SECS: f64 = 1.8;
const SENT_LINGER_SECS: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactStatus {
    Idle,
    Sending { since: f64 },
    Sent { since: f64 },
}

/// Contact modal with a simulated transmission; nothing leaves the machine.
pub struct ContactForm {
    pub open: bool,
    pub name: String,
    pub channel: String,
    pub message: String,
    pub status: ContactStatus,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            open: false,
            name: String::new(),
            channel: String::new(),
            message: String::new(),
            status: ContactStatus::Idle,
        }
    }
}

impl ContactForm {
    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn submit(&mut self, now: f64) -> bool {
        if self.status != ContactStatus::Idle || self.message.trim().is_empty() {
            return false;
        }
        self.status = ContactStatus::Sending { since: now };
        true
    }

    /// Advances the simulated send. Returns true when the modal closes.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.status {
            ContactStatus::Sending { since } if now - since >= SENDING_SECS => {
                self.status = ContactStatus::Sent { since: now };
                false
            }
            ContactStatus::Sent { since } if now - since >= SENT_LINGER_SECS => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status != ContactStatus::Idle
    }
}

pub fn render_modal(app: &mut VibeHqApp, ctx: &egui::Context, now: f64) {
    if !app.contact.open {
        return;
    }
    if app.contact.tick(now) {
        app.set_status("Transmission complete", "ok");
        return;
    }
    if app.contact.is_busy() {
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    let mut open = true;
    egui::Window::new("SECURE_CHANNEL")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .default_width(420.0)
        .frame(egui::Frame::window(&ctx.style()).fill(PANEL_BG))
        .show(ctx, |ui| match app.contact.status {
            ContactStatus::Sent { .. } => {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label(egui::RichText::new("SIGNAL TRANSMITTED").size(18.0).color(TEAL));
                    hud_label(ui, "Our architecture team will manifest shortly.");
                    ui.add_space(24.0);
                });
            }
            status => {
                let sending = matches!(status, ContactStatus::Sending { .. });
                ui.add_enabled_ui(!sending, |ui| {
                    field(ui, "Identity", &mut app.contact.name, "Your name");
                    ui.add_space(4.0);
                    field(ui, "Comm_Link", &mut app.contact.channel, "email or WhatsApp");
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new("Manifesto_Details").size(11.0).color(TEXT_MUTED));
                    ui.add(
                        egui::TextEdit::multiline(&mut app.contact.message)
                            .desired_rows(4)
                            .desired_width(f32::INFINITY)
                            .hint_text("Describe the experience you want to manifest..."),
                    );
                });
                ui.add_space(8.0);
                let label = if sending { "Transmitting..." } else { "Initialize Direct Uplink" };
                if neon_button(ui, label, !sending && !app.contact.message.trim().is_empty())
                    .clicked()
                {
                    app.contact.submit(now);
                }
            }
        });
    if !open && !app.contact.is_busy() {
        app.contact.open = false;
    }
}
