use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Everything the mentor needs to reach Gemini.
#[derive(Debug, Clone)]
pub struct MentorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub request_timeout: Duration,
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base: DEFAULT_API_BASE.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl MentorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs = match non_empty("VIBEHQ_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => secs.clamp(1, 600),
                Err(_) => {
                    log::warn!(
                        "[config] ignoring VIBEHQ_REQUEST_TIMEOUT_SECS={:?}, using {}s",
                        raw,
                        DEFAULT_REQUEST_TIMEOUT_SECS
                    );
                    DEFAULT_REQUEST_TIMEOUT_SECS
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model: non_empty("VIBEHQ_GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: non_empty("VIBEHQ_GEMINI_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Location of the key/value storage file.
pub fn storage_path() -> Result<PathBuf, String> {
    if let Some(dir) = std::env::var_os("VIBEHQ_DATA_DIR").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir).join("storage.json"));
    }
    if let Some(dir) = dirs::data_local_dir() {
        return Ok(dir.join("VibeHQ").join("storage.json"));
    }
    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".vibehq").join("storage.json"));
    }
    Err("Failed to resolve data directory".into())
}
