#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod ingest;
mod mentor;
mod settings;
mod state;
mod storage;
mod ui;

use config::MentorConfig;
use eframe::egui;
use egui::{vec2, ViewportBuilder};
use settings::SettingsStore;
use state::AppEvent;
use std::path::PathBuf;
use std::sync::Arc;
use storage::FileStore;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = MentorConfig::from_env();
    let storage_path = config::storage_path().unwrap_or_else(|e| {
        log::warn!("[vibehq] {}; storing settings in the working directory", e);
        PathBuf::from("vibehq-storage.json")
    });
    let file_store = FileStore::new(storage_path);
    log::info!("[vibehq] settings file: {}", file_store.path().display());
    let store = SettingsStore::load(Box::new(file_store));

    let (event_tx, event_rx) = std::sync::mpsc::channel::<AppEvent>();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => Arc::new(rt),
        Err(e) => {
            log::error!("[vibehq] failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let vp = ViewportBuilder::default()
        .with_title("VIBE HQ")
        .with_inner_size(vec2(1280.0, 860.0))
        .with_min_inner_size(vec2(900.0, 600.0))
        .with_drag_and_drop(true);

    let native_options = eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    };

    log::info!("[vibehq] starting eframe (mentor model {})", config.model);

    let result = eframe::run_native(
        "VIBE HQ",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(ui::VibeHqApp::new(
                event_tx,
                event_rx,
                runtime,
                store,
                &config,
                cc.egui_ctx.clone(),
            )))
        }),
    );
    if let Err(e) = result {
        log::error!("[vibehq] window failed: {}", e);
        std::process::exit(1);
    }
}
