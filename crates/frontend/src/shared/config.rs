//! Конфигурация клиента.
//!
//! Resolved once in the wasm start function and stored process-wide, so API
//! helpers outside the component tree can reach it. Components read the same
//! value through context.

use crate::shared::query::QueryClientConfig;
use crate::shared::theme::Theme;
use leptos::prelude::*;
use once_cell::sync::OnceCell;

/// `<meta name="wb-api-base" content="https://api.example.com">` overrides the API origin
pub const API_BASE_META: &str = "wb-api-base";

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix of every `/api/...` path; empty means same origin
    pub api_base: String,
    pub default_theme: Theme,
    pub log_level: log::Level,
    /// Rows per feed page
    pub page_size: u32,
    pub toast_duration_ms: u32,
    pub query: QueryClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            default_theme: Theme::Light,
            log_level: if cfg!(debug_assertions) {
                log::Level::Debug
            } else {
                log::Level::Info
            },
            page_size: 30,
            toast_duration_ms: 4000,
            query: QueryClientConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads overrides from the host page
    pub fn from_document() -> Self {
        let meta = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| {
                d.query_selector(&format!("meta[name=\"{}\"]", API_BASE_META))
                    .ok()
                    .flatten()
            })
            .and_then(|el| el.get_attribute("content"));
        Self {
            api_base: resolve_api_base(meta.as_deref()),
            ..Self::default()
        }
    }
}

/// Trailing slashes are dropped so paths can always start with `/`
pub fn resolve_api_base(meta: Option<&str>) -> String {
    meta.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// First call wins; later calls are ignored
pub fn init(config: AppConfig) -> &'static AppConfig {
    if CONFIG.set(config).is_err() {
        log::warn!("AppConfig already initialised");
    }
    app_config()
}

pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_else(|| app_config().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_base() {
        assert_eq!(resolve_api_base(None), "");
        assert_eq!(resolve_api_base(Some("  ")), "");
        assert_eq!(
            resolve_api_base(Some("https://api.example.com/")),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.page_size, 30);
        assert_eq!(config.query.stale_time_ms, 10_000);
        assert_eq!(config.query.gc_time_ms, 86_400_000);
    }
}
