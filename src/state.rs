use crate::ingest::ImageTarget;
use eframe::egui;
use std::sync::mpsc::Sender;

/// Events sent from background tasks to the UI.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ImageIngested { target: ImageTarget, data_uri: String },
    ImageRejected { target: ImageTarget, message: String },
    RemoteImageLoaded { uri: String, bytes: Vec<u8> },
    RemoteImageFailed { uri: String, message: String },
    MentorChunk { generation: u64, text: String },
    MentorFinished { generation: u64 },
    MentorFailed { generation: u64, reason: String },
}

/// Sender half handed to background tasks. Wakes the UI after every event so
/// streamed text shows up without waiting for input.
#[derive(Clone)]
pub struct EventSink {
    tx: Sender<AppEvent>,
    ctx: Option<egui::Context>,
}

impl EventSink {
    pub fn new(tx: Sender<AppEvent>, ctx: egui::Context) -> Self {
        Self { tx, ctx: Some(ctx) }
    }

    #[cfg(test)]
    pub fn detached(tx: Sender<AppEvent>) -> Self {
        Self { tx, ctx: None }
    }

    pub fn send(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("[events] UI receiver dropped, event discarded");
            return;
        }
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }
}
