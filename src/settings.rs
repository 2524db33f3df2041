use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};

/// Key the settings snapshot is persisted under. Shared with the web build's
/// local-storage entry so an exported snapshot can be dropped in as-is.
pub const STORAGE_KEY: &str = "vibe_hq_settings_v3";

/// Placeholder link used by the defaults; it never opens anything.
pub const PLACEHOLDER_LINK: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSlot {
    pub image: String,
    pub link: String,
}

impl ProjectSlot {
    fn new(image: &str, link: &str) -> Self {
        Self {
            image: image.into(),
            link: link.into(),
        }
    }

    /// The link to open when the card is clicked, if one was configured.
    pub fn live_link(&self) -> Option<&str> {
        let link = self.link.trim();
        if link.is_empty() || link == PLACEHOLDER_LINK {
            None
        } else {
            Some(link)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub hero_image: String,
    pub profile_image: String,
    pub project1: ProjectSlot,
    pub project2: ProjectSlot,
    pub project3: ProjectSlot,
    pub standard_pdf_link: String,
    pub premium_pdf_link: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hero_image: "https://picsum.photos/800/1200?random=1".into(),
            profile_image: "https://picsum.photos/200/200?random=10".into(),
            project1: ProjectSlot::new("https://picsum.photos/400/800?random=1", PLACEHOLDER_LINK),
            project2: ProjectSlot::new("https://picsum.photos/400/800?random=2", PLACEHOLDER_LINK),
            project3: ProjectSlot::new("https://picsum.photos/400/800?random=3", PLACEHOLDER_LINK),
            standard_pdf_link: PLACEHOLDER_LINK.into(),
            premium_pdf_link: PLACEHOLDER_LINK.into(),
        }
    }
}

impl Settings {
    /// Project slot by its 1-based position on the page.
    pub fn project(&self, n: u8) -> Option<&ProjectSlot> {
        match n {
            1 => Some(&self.project1),
            2 => Some(&self.project2),
            3 => Some(&self.project3),
            _ => None,
        }
    }

    /// Shallow merge: supplied fields replace ours, project slots are replaced whole.
    pub fn merged(&self, patch: SettingsPatch) -> Settings {
        Settings {
            hero_image: patch.hero_image.unwrap_or_else(|| self.hero_image.clone()),
            profile_image: patch
                .profile_image
                .unwrap_or_else(|| self.profile_image.clone()),
            project1: patch.project1.unwrap_or_else(|| self.project1.clone()),
            project2: patch.project2.unwrap_or_else(|| self.project2.clone()),
            project3: patch.project3.unwrap_or_else(|| self.project3.clone()),
            standard_pdf_link: patch
                .standard_pdf_link
                .unwrap_or_else(|| self.standard_pdf_link.clone()),
            premium_pdf_link: patch
                .premium_pdf_link
                .unwrap_or_else(|| self.premium_pdf_link.clone()),
        }
    }
}

/// A partial settings value. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub hero_image: Option<String>,
    pub profile_image: Option<String>,
    pub project1: Option<ProjectSlot>,
    pub project2: Option<ProjectSlot>,
    pub project3: Option<ProjectSlot>,
    pub standard_pdf_link: Option<String>,
    pub premium_pdf_link: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }

    pub fn set_project(&mut self, n: u8, slot: ProjectSlot) {
        match n {
            1 => self.project1 = Some(slot),
            2 => self.project2 = Some(slot),
            3 => self.project3 = Some(slot),
            _ => log::warn!("[settings] ignoring patch for unknown project slot {}", n),
        }
    }
}

/// Owns the committed settings and the storage they are persisted to.
pub struct SettingsStore {
    current: Settings,
    storage: Box<dyn KeyValueStore>,
    persist_error: Option<String>,
}

impl SettingsStore {
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let current = match storage.get(STORAGE_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Settings>(&text) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("[settings] failed to load settings, using defaults: {}", e);
                    Settings::default()
                }
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                log::warn!("[settings] storage unavailable, using defaults: {}", e);
                Settings::default()
            }
        };
        Self {
            current,
            storage,
            persist_error: None,
        }
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// The only mutation path. The merged value is committed in memory even when
    /// the write fails; the failure is kept in `persist_error`.
    pub fn update(&mut self, patch: SettingsPatch) -> Settings {
        let merged = self.current.merged(patch);
        self.current = merged.clone();
        match self.persist(&merged) {
            Ok(()) => self.persist_error = None,
            Err(e) => {
                log::error!("[settings] save failed: {}", e);
                self.persist_error = Some(e);
            }
        }
        merged
    }

    pub fn persist_error(&self) -> Option<&str> {
        self.persist_error.as_deref()
    }

    fn persist(&mut self, settings: &Settings) -> Result<(), String> {
        let json = serde_json::to_string(settings)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        self.storage
            .set(STORAGE_KEY, &json)
            .map_err(|e| format!("Failed to write settings: {}", e))
    }
}
