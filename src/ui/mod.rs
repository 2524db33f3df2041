pub mod admin;
pub mod contact;
pub mod form_state;
pub mod images;
pub mod loader;
pub mod mentor;
pub mod sections;
pub mod theme;
pub mod widgets;

use crate::config::MentorConfig;
use crate::ingest::{spawn_ingest, ImageTarget};
use crate::mentor::gemini::spawn_stream;
use crate::mentor::{ChatSession, GeminiClient, StreamUpdate};
use crate::settings::SettingsStore;
use crate::state::{AppEvent, EventSink};
use eframe::egui;
use egui::vec2;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver as EventReceiver, Sender as EventSender};
use std::sync::Arc;
use std::time::Duration;

use contact::ContactForm;
use form_state::AdminForm;
use images::ImageCache;
use loader::BootSequence;
use theme::*;

pub struct VibeHqApp {
    pub event_rx: EventReceiver<AppEvent>,
    pub events: EventSink,
    pub runtime: Arc<tokio::runtime::Runtime>,
    pub store: SettingsStore,
    pub mentor: ChatSession,
    pub gemini: Option<GeminiClient>,
    pub images: ImageCache,
    pub boot: BootSequence,
    pub booted: bool,

    pub status_text: String,
    pub status_state: String,
    // Error auto-recovery
    pub error_time: Option<std::time::Instant>,

    pub admin_open: bool,
    pub mentor_open: bool,
    pub contact: ContactForm,

    // Admin console
    pub form: AdminForm,
    pub path_inputs: HashMap<ImageTarget, String>,
    pub ingest_inflight: HashSet<ImageTarget>,
    pub drop_target: ImageTarget,
}

impl VibeHqApp {
    pub fn new(
        event_tx: EventSender<AppEvent>,
        event_rx: EventReceiver<AppEvent>,
        runtime: Arc<tokio::runtime::Runtime>,
        store: SettingsStore,
        config: &MentorConfig,
        egui_ctx: egui::Context,
    ) -> Self {
        let gemini = match GeminiClient::new(config) {
            Ok(client) => {
                if !client.has_api_key() {
                    log::warn!("[mentor] GEMINI_API_KEY not set; the mentor will report a desync");
                }
                Some(client)
            }
            Err(e) => {
                log::error!("[mentor] client setup failed: {}", e);
                None
            }
        };
        let form = AdminForm::from_settings(store.current());
        let boot_start = egui_ctx.input(|i| i.time);

        Self {
            event_rx,
            events: EventSink::new(event_tx, egui_ctx),
            runtime,
            store,
            mentor: ChatSession::new(),
            gemini,
            images: ImageCache::new(),
            boot: BootSequence::new(boot_start),
            booted: false,
            status_text: "Ready".into(),
            status_state: "idle".into(),
            error_time: None,
            admin_open: false,
            mentor_open: false,
            contact: ContactForm::default(),
            form,
            path_inputs: HashMap::new(),
            ingest_inflight: HashSet::new(),
            drop_target: ImageTarget::Profile,
        }
    }

    pub fn set_status(&mut self, text: &str, state: &str) {
        self.status_text = text.into();
        self.status_state = state.into();
        if state == "error" {
            self.error_time = Some(std::time::Instant::now());
        } else {
            self.error_time = None;
        }
    }

    pub fn mentor_online(&self) -> bool {
        self.gemini.as_ref().is_some_and(GeminiClient::has_api_key)
    }

    pub fn open_admin(&mut self) {
        self.form = AdminForm::from_settings(self.store.current());
        self.path_inputs.clear();
        self.admin_open = true;
    }

    /// Closes the console and drops unsaved edits.
    pub fn close_admin(&mut self) {
        self.form.reset(self.store.current());
        self.admin_open = false;
        self.prune_images();
    }

    /// Discards unsaved edits but keeps the console open.
    pub fn reset_admin(&mut self) {
        self.form.reset(self.store.current());
        self.path_inputs.clear();
        self.prune_images();
        self.set_status("Edits discarded", "idle");
    }

    pub fn save_admin(&mut self) {
        let patch = self.form.to_patch(self.store.current());
        if !patch.is_empty() {
            self.store.update(patch);
        }
        match self.store.persist_error().map(str::to_string) {
            Some(e) => self.set_status(&format!("Save failed: {}", e), "error"),
            None => self.set_status("Settings saved", "ok"),
        }
        self.close_admin();
    }

    pub fn start_ingest(&mut self, target: ImageTarget, path: PathBuf) {
        if !self.ingest_inflight.insert(target) {
            return;
        }
        self.set_status(&format!("Encoding {}...", target.label()), "busy");
        spawn_ingest(self.runtime.handle(), path, target, self.events.clone());
    }

    pub fn submit_mentor(&mut self) {
        let Some(request) = self.mentor.submit() else {
            return;
        };
        match (&self.gemini, self.mentor_online()) {
            (Some(client), true) => spawn_stream(
                self.runtime.handle(),
                client.clone(),
                request,
                self.events.clone(),
            ),
            _ => {
                self.mentor.apply(
                    request.generation,
                    StreamUpdate::Failed("no Gemini API key configured".into()),
                );
            }
        }
    }

    fn prune_images(&mut self) {
        let s = self.store.current();
        let live = [
            s.hero_image.as_str(),
            s.profile_image.as_str(),
            s.project1.image.as_str(),
            s.project2.image.as_str(),
            s.project3.image.as_str(),
        ];
        self.images.retain_only(live);
    }

    fn process_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::ImageIngested { target, data_uri } => {
                    self.ingest_inflight.remove(&target);
                    self.path_inputs.remove(&target);
                    self.form.set_image(target, data_uri);
                    if !self.admin_open {
                        self.admin_open = true;
                    }
                    self.set_status(&format!("{} ready, save to publish", target.label()), "ok");
                }
                AppEvent::ImageRejected { target, message } => {
                    self.ingest_inflight.remove(&target);
                    self.set_status(&format!("{}: {}", target.label(), message), "error");
                }
                AppEvent::RemoteImageLoaded { uri, bytes } => {
                    self.images.on_remote_loaded(ctx, uri, &bytes);
                }
                AppEvent::RemoteImageFailed { uri, message } => {
                    self.images.on_remote_failed(uri, message);
                }
                AppEvent::MentorChunk { generation, text } => {
                    self.mentor.apply(generation, StreamUpdate::Chunk(text));
                }
                AppEvent::MentorFinished { generation } => {
                    self.mentor.apply(generation, StreamUpdate::Finished);
                }
                AppEvent::MentorFailed { generation, reason } => {
                    self.mentor.apply(generation, StreamUpdate::Failed(reason));
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(path) = dropped.into_iter().find_map(|f| f.path) else {
            return;
        };
        if !self.admin_open {
            self.open_admin();
        }
        log::info!("[ui] file dropped for {}: {}", self.drop_target.label(), path.display());
        self.start_ingest(self.drop_target, path);
    }

    fn apply_appearance(&self, ctx: &egui::Context) {
        let mut style = egui::Style::default();
        style.spacing.item_spacing = vec2(8.0, 6.0);
        style.spacing.button_padding = vec2(10.0, 5.0);
        style.spacing.interact_size.y = 24.0;
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = PAGE_BG;
        visuals.window_fill = PANEL_BG;
        visuals.extreme_bg_color = INPUT_BG;
        visuals.selection.bg_fill = TEAL_DIM;
        visuals.hyperlink_color = TEAL_HOVER;
        style.visuals = visuals;
        ctx.set_style(style);
    }

    fn render_page(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(PANEL_BG).inner_margin(12.0))
            .show(ctx, |ui| sections::header::render(self, ui, ctx));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(PAGE_BG).inner_margin(24.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        sections::hero::render(self, ui, ctx);
                        sections::showcase::render(self, ui, ctx);
                        sections::pricing::render(self, ui, ctx);
                        sections::footer::render(self, ui, ctx);
                    });
            });

        mentor::render_launcher(self, ctx);
        if self.mentor_open {
            mentor::render_window(self, ctx);
        }
        if self.admin_open {
            admin::render_window(self, ctx);
        }
        let now = ctx.input(|i| i.time);
        contact::render_modal(self, ctx, now);
    }
}

impl eframe::App for VibeHqApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events(ctx);

        let now = ctx.input(|i| i.time);
        if !self.booted {
            if self.boot.is_complete(now) {
                log::info!("[ui] boot sequence complete");
                self.booted = true;
                self.apply_appearance(ctx);
            } else {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none())
                    .show(ctx, |ui| loader::render(&self.boot, ui, now));
                ctx.request_repaint_after(Duration::from_millis(25));
                return;
            }
        }

        // Auto-recover from error after 4s
        if let Some(t) = self.error_time {
            if t.elapsed() > Duration::from_secs(4) && self.status_state == "error" {
                self.set_status("Ready", "idle");
            }
        }

        self.handle_dropped_files(ctx);
        self.render_page(ctx);

        if self.mentor.is_streaming() || !self.ingest_inflight.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(33));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::DESYNC_MESSAGE;
    use crate::settings::STORAGE_KEY;
    use crate::storage::memory::MemoryStore;

    fn app_with(storage: MemoryStore) -> VibeHqApp {
        let (tx, rx) = std::sync::mpsc::channel();
        let runtime = Arc::new(tokio::runtime::Runtime::new().unwrap());
        let store = SettingsStore::load(Box::new(storage));
        VibeHqApp::new(
            tx,
            rx,
            runtime,
            store,
            &MentorConfig::default(),
            egui::Context::default(),
        )
    }

    #[test]
    fn ingested_image_waits_for_save() {
        let storage = MemoryStore::default();
        let mut app = app_with(storage.clone());
        let ctx = egui::Context::default();
        app.open_admin();
        app.ingest_inflight.insert(ImageTarget::Hero);
        app.events.send(AppEvent::ImageIngested {
            target: ImageTarget::Hero,
            data_uri: "data:image/png;base64,HERO".into(),
        });
        app.process_events(&ctx);

        assert!(app.ingest_inflight.is_empty());
        assert_eq!(app.form.hero_image, "data:image/png;base64,HERO");
        assert_ne!(app.store.current().hero_image, "data:image/png;base64,HERO");
        assert_eq!(storage.write_count(), 0);

        app.save_admin();
        assert!(!app.admin_open);
        assert_eq!(app.store.current().hero_image, "data:image/png;base64,HERO");
        assert_eq!(storage.write_count(), 1);
        let saved = storage.entries.lock().unwrap().get(STORAGE_KEY).cloned().unwrap();
        assert!(saved.contains("data:image/png;base64,HERO"));
        assert_eq!(app.status_state, "ok");
    }

    #[test]
    fn rejected_image_reports_and_leaves_form_alone() {
        let mut app = app_with(MemoryStore::default());
        let ctx = egui::Context::default();
        let before = app.form.clone();
        app.events.send(AppEvent::ImageRejected {
            target: ImageTarget::Project(1),
            message: "not an image".into(),
        });
        app.process_events(&ctx);

        assert_eq!(app.form, before);
        assert_eq!(app.status_state, "error");
        assert!(app.status_text.contains("not an image"));
    }

    #[test]
    fn failed_save_is_reported_but_kept_in_memory() {
        let storage = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let mut app = app_with(storage);
        app.open_admin();
        app.form.premium_pdf_link = "https://cdn.example/premium.pdf".into();
        app.save_admin();

        assert_eq!(app.store.current().premium_pdf_link, "https://cdn.example/premium.pdf");
        assert_eq!(app.status_state, "error");
        assert!(app.status_text.starts_with("Save failed"));
    }

    #[test]
    fn closing_console_discards_edits() {
        let mut app = app_with(MemoryStore::default());
        app.open_admin();
        app.form.standard_pdf_link = "https://draft.example".into();
        app.close_admin();
        assert_eq!(app.form, AdminForm::from_settings(app.store.current()));
    }

    #[test]
    fn discarded_previews_leave_the_image_cache() {
        let mut app = app_with(MemoryStore::default());
        let ctx = egui::Context::default();
        let preview = "data:image/png;base64,AAA";
        app.open_admin();
        app.form.set_image(ImageTarget::Project(2), preview.into());
        let _ = app.images.get(&ctx, preview, app.runtime.handle(), &app.events);
        assert!(app.images.is_cached(preview));

        app.reset_admin();
        assert!(!app.images.is_cached(preview));
        assert!(app.admin_open);

        let _ = app.images.get(&ctx, preview, app.runtime.handle(), &app.events);
        app.close_admin();
        assert!(!app.images.is_cached(preview));
    }

    #[test]
    fn mentor_without_key_reports_desync() {
        let mut app = app_with(MemoryStore::default());
        assert!(!app.mentor_online());
        *app.mentor.input_mut() = "Build me a grid.".into();
        app.submit_mentor();

        let transcript = app.mentor.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].text, DESYNC_MESSAGE);
        assert!(!app.mentor.is_streaming());
        assert!(app.mentor.input().is_empty());
    }

    #[test]
    fn stale_mentor_events_are_ignored() {
        let mut app = app_with(MemoryStore::default());
        let ctx = egui::Context::default();
        app.events.send(AppEvent::MentorChunk {
            generation: 7,
            text: "ghost".into(),
        });
        app.process_events(&ctx);
        assert_eq!(app.mentor.transcript().len(), 1);
    }
}
