use log::Level;
use web_sys::{window, Storage};

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Backend API port (e.g., 3000)
    pub api_port: u16,

    /// API path prefix (e.g., "/api/v1")
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,

    /// Overrides every stage duration served by the backend, in milliseconds
    pub stage_duration_ms: Option<u64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 3000,
            api_path: "/api/v1".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
            stage_duration_ms: None,
        }
    }
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                settings.apply_storage(&storage);
            }
        }

        settings
    }

    fn apply_storage(&mut self, storage: &Storage) {
        let read = |key: &str| storage.get_item(&format!("fincast_{}", key)).ok().flatten();

        if let Some(api_host) = read("api_host") {
            self.api_host = api_host;
        }
        if let Some(port) = read("api_port").and_then(|v| v.parse::<u16>().ok()) {
            self.api_port = port;
        }
        if let Some(api_path) = read("api_path") {
            self.api_path = api_path;
        }
        if let Some(use_https) = read("api_use_https") {
            self.api_use_https = use_https.to_lowercase() == "true";
        }
        if let Some(level) = read("log_level").as_deref().and_then(parse_level) {
            self.log_level = level;
        }
        if let Some(duration) = read("toast_duration_ms").and_then(|v| v.parse::<u32>().ok()) {
            self.toast_duration_ms = duration;
        }
        // Zero would make the pipeline invalid, so it is ignored
        self.stage_duration_ms = read("stage_duration_ms")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0);
    }

    /// Get the base API URL (protocol + host + port)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_base_url(), "http://localhost:3000/api/v1");
        assert_eq!(
            settings.api_url("/dashboard"),
            "http://localhost:3000/api/v1/dashboard"
        );

        let secure = AppSettings {
            api_use_https: true,
            api_host: "fincast.example.com".to_string(),
            api_port: 443,
            ..AppSettings::default()
        };
        assert_eq!(secure.api_base_url(), "https://fincast.example.com:443/api/v1");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some(Level::Debug));
        assert_eq!(parse_level("warn"), Some(Level::Warn));
        assert_eq!(parse_level("verbose"), None);
    }
}
