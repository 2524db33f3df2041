use crate::ingest::decode_data_uri;
use crate::state::{AppEvent, EventSink};
use eframe::egui;
use egui::{ColorImage, TextureHandle, TextureOptions};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

const REMOTE_FETCH_TIMEOUT_SECS: u64 = 20;

/// How an image reference from the settings is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    Inline(&'a str),
    Remote(&'a str),
    Missing,
}

pub fn classify(uri: &str) -> ImageRef<'_> {
    let uri = uri.trim();
    if uri.starts_with("data:") {
        ImageRef::Inline(uri)
    } else if uri.starts_with("http://") || uri.starts_with("https://") {
        ImageRef::Remote(uri)
    } else {
        ImageRef::Missing
    }
}

enum Slot {
    Loading,
    Ready(TextureHandle),
    Failed(String),
}

pub enum ImageState {
    Ready(TextureHandle),
    Loading,
    Unavailable(String),
}

/// Textures keyed by image reference. Remote images are fetched once.
pub struct ImageCache {
    slots: HashMap<String, Slot>,
    http: reqwest::Client,
}

impl ImageCache {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REMOTE_FETCH_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[images] http client setup failed, using defaults: {}", e);
                reqwest::Client::new()
            });
        Self {
            slots: HashMap::new(),
            http,
        }
    }

    pub fn get(
        &mut self,
        ctx: &egui::Context,
        uri: &str,
        runtime: &tokio::runtime::Handle,
        events: &EventSink,
    ) -> ImageState {
        let key = uri.trim();
        if let Some(slot) = self.slots.get(key) {
            return match slot {
                Slot::Loading => ImageState::Loading,
                Slot::Ready(tex) => ImageState::Ready(tex.clone()),
                Slot::Failed(msg) => ImageState::Unavailable(msg.clone()),
            };
        }
        match classify(key) {
            ImageRef::Missing => ImageState::Unavailable("NO_SIGNAL".into()),
            ImageRef::Inline(data_uri) => {
                let slot = match decode_data_uri(data_uri) {
                    Some((_, bytes)) => match load_texture(ctx, key, &bytes) {
                        Ok(tex) => Slot::Ready(tex),
                        Err(e) => Slot::Failed(e),
                    },
                    None => Slot::Failed("invalid data uri".into()),
                };
                self.slots.insert(key.to_string(), slot);
                self.get(ctx, key, runtime, events)
            }
            ImageRef::Remote(url) => {
                self.slots.insert(key.to_string(), Slot::Loading);
                self.fetch(runtime, url.to_string(), events.clone());
                ImageState::Loading
            }
        }
    }

    fn fetch(&self, runtime: &tokio::runtime::Handle, uri: String, events: EventSink) {
        let http = self.http.clone();
        runtime.spawn(async move {
            let result = async {
                let response = http.get(&uri).send().await?.error_for_status()?;
                response.bytes().await
            }
            .await;
            match result {
                Ok(bytes) => events.send(AppEvent::RemoteImageLoaded {
                    uri,
                    bytes: bytes.to_vec(),
                }),
                Err(e) => {
                    log::warn!("[images] fetch {} failed: {}", uri, e);
                    events.send(AppEvent::RemoteImageFailed {
                        uri,
                        message: "UPLINK_LOST".into(),
                    });
                }
            }
        });
    }

    pub fn on_remote_loaded(&mut self, ctx: &egui::Context, uri: String, bytes: &[u8]) {
        let slot = match load_texture(ctx, &uri, bytes) {
            Ok(tex) => Slot::Ready(tex),
            Err(e) => {
                log::warn!("[images] {} is not decodable: {}", uri, e);
                Slot::Failed(e)
            }
        };
        self.slots.insert(uri, slot);
    }

    pub fn on_remote_failed(&mut self, uri: String, message: String) {
        self.slots.insert(uri, Slot::Failed(message));
    }

    #[cfg(test)]
    pub fn is_cached(&self, uri: &str) -> bool {
        self.slots.contains_key(uri.trim())
    }

    /// Drops textures for references no longer shown anywhere.
    pub fn retain_only<'a>(&mut self, live: impl IntoIterator<Item = &'a str>) {
        let live: HashSet<&str> = live.into_iter().map(str::trim).collect();
        self.slots.retain(|key, _| live.contains(key.as_str()));
    }
}

fn load_texture(ctx: &egui::Context, name: &str, bytes: &[u8]) -> Result<TextureHandle, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("decode failed: {}", e))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    let color = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], img.as_raw());
    // Data URIs make long names; keep the debug label short.
    let label: String = name.chars().take(64).collect();
    Ok(ctx.load_texture(label, color, TextureOptions::LINEAR))
}
