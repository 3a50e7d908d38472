use std::{fs, path::Path};

use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CONFIG_FILE: &str = "booking.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: 10,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

pub fn load_settings(path: &Path) -> Settings {
    let file = fs::read_to_string(path).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the config file, then the environment. Later env names win.
fn resolve_settings(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(file_cfg) = file.and_then(|raw| toml::from_str::<FileSettings>(raw).ok()) {
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs.filter(|secs| *secs > 0) {
            settings.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("BOOKING_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    // Zero and unparseable timeouts are ignored.
    if let Some(secs) = env("APP__REQUEST_TIMEOUT_SECS")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
    {
        settings.request_timeout_secs = secs;
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url);
    settings
}

pub fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim().trim_end_matches('/');

    if raw.is_empty() {
        return Settings::default().api_base_url;
    }

    if raw.contains("://") {
        return raw.to_string();
    }

    format!("http://{raw}")
}
