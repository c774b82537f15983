//! `[app]` section of the web configuration

use serde::{Deserialize, Serialize};
use vterm_service::templates::CacheKeyPolicy;

/// Web-specific settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSettings {
    /// Base URL of the API process, exposed to pages as `api`
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Stylesheet cache-busting version, exposed to pages as `css_version`
    #[serde(default = "default_css_version")]
    pub css_version: String,

    /// How compiled pages are keyed in the template cache
    #[serde(default)]
    pub cache_key: CacheKeyPolicy,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            css_version: default_css_version(),
            cache_key: CacheKeyPolicy::default(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:4001".to_string()
}

fn default_css_version() -> String {
    "1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::{providers::Serialized, Figment};

    #[test]
    fn test_defaults() {
        let settings = WebSettings::default();
        assert_eq!(settings.api_url, "http://localhost:4001");
        assert_eq!(settings.css_version, "1");
        assert_eq!(settings.cache_key, CacheKeyPolicy::Composition);
    }

    #[test]
    fn test_cache_key_from_config() {
        let settings: WebSettings = Figment::new()
            .merge(Serialized::defaults(WebSettings::default()))
            .merge(Serialized::global("cache_key", "page"))
            .extract()
            .unwrap();
        assert_eq!(settings.cache_key, CacheKeyPolicy::Page);
        assert_eq!(settings.css_version, "1");
    }
}
