//! Configuration management using Figment
//!
//! Configuration is layered with the following precedence (highest to lowest):
//! 1. Whatever the binary merges last (command-line flags)
//! 2. `STRIPE_KEY` / `STRIPE_SECRET`
//! 3. Environment variables (prefix `VTERM_`, nested keys separated by `__`,
//!    e.g. `VTERM_SERVICE__PORT=4000`)
//! 4. Current working directory: ./config.toml
//! 5. XDG config directory: ~/.config/vterm/{service_name}/config.toml
//! 6. System directory: /etc/vterm/{service_name}/config.toml
//! 7. Defaults supplied by the binary

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "VTERM_";

/// Main configuration structure
///
/// `T` is the application-specific `[app]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config<T = ()> {
    /// Service configuration
    pub service: ServiceConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,

    /// Payment provider credentials
    #[serde(default)]
    pub stripe: StripeConfig,

    /// Application-specific settings
    #[serde(default)]
    pub app: T,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error) or an EnvFilter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Environment (development, production, maintenance)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Time allowed to produce a response, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Time allowed to receive a request body, in seconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

impl ServiceConfig {
    /// Service defaults with the given name and port.
    pub fn new(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port,
            log_level: default_log_level(),
            environment: default_environment(),
            timeout_secs: default_timeout(),
            read_timeout_secs: default_read_timeout(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// Enable compression
    #[serde(default = "default_true")]
    pub compression: bool,

    /// Cross-origin policy; no CORS layer is installed when absent
    #[serde(default)]
    pub cors: Option<CorsConfig>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            compression: true,
            cors: None,
        }
    }
}

/// Cross-origin resource sharing policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins are allowed when their scheme is listed (e.g. "https", "http")
    #[serde(default = "default_cors_schemes")]
    pub allowed_origin_schemes: Vec<String>,

    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,

    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,

    #[serde(default)]
    pub allow_credentials: bool,

    /// Preflight cache duration in seconds
    #[serde(default = "default_cors_max_age")]
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin_schemes: default_cors_schemes(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            allow_credentials: false,
            max_age_secs: default_cors_max_age(),
        }
    }
}

impl CorsConfig {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

/// Payment provider credentials, read from `STRIPE_KEY` / `STRIPE_SECRET`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct StripeConfig {
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub secret: String,
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("key", &self.key)
            .field("secret", &if self.secret.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_read_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_body_limit_mb() -> usize {
    10 // 10 MB
}

fn default_cors_schemes() -> Vec<String> {
    vec!["https".to_string(), "http".to_string()]
}

fn default_cors_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_cors_headers() -> Vec<String> {
    ["Accept", "Authorization", "Content-Type", "X-CSRF-Token"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_cors_max_age() -> u64 {
    300
}

impl<T> Config<T>
where
    T: Serialize + DeserializeOwned + Clone + Default,
{
    /// Configuration with the given service defaults and a default `[app]` section.
    pub fn with_service(service: ServiceConfig) -> Self {
        Self {
            service,
            middleware: MiddlewareConfig::default(),
            stripe: StripeConfig::default(),
            app: T::default(),
        }
    }

    /// Figment layering `defaults` under the standard config files and the
    /// environment.
    ///
    /// Merge further providers (e.g. parsed command-line flags) on top, then
    /// call [`Config::extract`].
    pub fn figment(defaults: Self) -> Figment {
        let config_paths = Self::find_config_paths(&defaults.service.name);

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        Self::layered(defaults, &config_paths)
    }

    /// Figment layering `defaults` under one explicit config file and the
    /// environment.
    pub fn figment_from(defaults: Self, path: impl AsRef<Path>) -> Figment {
        Self::layered(defaults, &[path.as_ref().to_path_buf()])
    }

    /// Extract a configuration from a prepared figment.
    pub fn extract(figment: Figment) -> Result<Self> {
        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from defaults, config files and the environment.
    pub fn load(defaults: Self) -> Result<Self> {
        Self::extract(Self::figment(defaults))
    }

    fn layered(defaults: Self, config_paths: &[PathBuf]) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(defaults));

        // Lowest priority first so higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["STRIPE_KEY", "STRIPE_SECRET"])
                    .map(|key| key.as_str().replacen('_', ".", 1).into()),
            )
    }

    /// Candidate config files for a service, highest priority first:
    /// 1. Current working directory
    /// 2. XDG config directory
    /// 3. System directory
    fn find_config_paths(service_name: &str) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix("vterm");
        if let Some(path) = xdg_dirs.find_config_file(Path::new(service_name).join("config.toml")) {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc/vterm").join(service_name).join("config.toml"));

        paths
    }
}

impl<T> Config<T> {
    /// Whether the service runs in the "production" environment.
    pub fn is_production(&self) -> bool {
        self.service.environment == "production"
    }
}

impl<T: Default> Default for Config<T> {
    fn default() -> Self {
        Self {
            service: ServiceConfig::new("vterm-service", default_port()),
            middleware: MiddlewareConfig::default(),
            stripe: StripeConfig::default(),
            app: T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct AppSection {
        #[serde(default)]
        api_url: String,
    }

    #[test]
    fn test_default_config() {
        let config = Config::<()>::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.service.environment, "development");
        assert!(config.middleware.cors.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_default_cors_policy() {
        let cors = CorsConfig::default();
        assert_eq!(cors.allowed_origin_schemes, vec!["https", "http"]);
        assert_eq!(cors.allowed_methods.len(), 5);
        assert!(cors.allowed_headers.contains(&"X-CSRF-Token".to_string()));
        assert!(!cors.allow_credentials);
        assert_eq!(cors.max_age(), Duration::from_secs(300));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "vterm-web.toml",
                "[service]\nname = \"vterm-web\"\nport = 5000\nenvironment = \"production\"\n\n[app]\napi_url = \"https://api.example.com\"",
            )?;

            let defaults = Config::<AppSection>::with_service(ServiceConfig::new("vterm-web", 4000));
            let config = Config::<AppSection>::extract(Config::figment_from(defaults, "vterm-web.toml")).unwrap();

            assert_eq!(config.service.port, 5000);
            assert!(config.is_production());
            assert_eq!(config.app.api_url, "https://api.example.com");
            assert_eq!(config.service.timeout_secs, 30);
            Ok(())
        });
    }

    #[test]
    fn test_later_provider_wins() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("VTERM_SERVICE__PORT", "4555");

            let defaults = Config::<AppSection>::with_service(ServiceConfig::new("vterm-web", 4000));
            let figment = Config::figment_from(defaults, "missing.toml")
                .merge(Serialized::globals(serde_json::json!({ "service": { "port": 4100 } })));

            let config = Config::<AppSection>::extract(figment).unwrap();
            assert_eq!(config.service.port, 4100);
            assert_eq!(config.service.name, "vterm-web");
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "vterm-web.toml",
                "[service]\nname = \"vterm-web\"\nport = 5000\n",
            )?;
            jail.set_env("VTERM_SERVICE__PORT", "4555");
            jail.set_env("VTERM_APP__API_URL", "https://api.example.com");

            let defaults = Config::<AppSection>::with_service(ServiceConfig::new("vterm-web", 4000));
            let config = Config::<AppSection>::extract(Config::figment_from(defaults, "vterm-web.toml")).unwrap();

            assert_eq!(config.service.port, 4555);
            assert_eq!(config.service.name, "vterm-web");
            assert_eq!(config.app.api_url, "https://api.example.com");
            Ok(())
        });
    }

    #[test]
    fn test_stripe_credentials_from_raw_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STRIPE_KEY", "pk_test_123");
            jail.set_env("STRIPE_SECRET", "sk_test_456");

            let defaults = Config::<()>::with_service(ServiceConfig::new("vterm-api", 4001));
            let config = Config::<()>::extract(Config::figment_from(defaults, "missing.toml")).unwrap();

            assert_eq!(config.stripe.key, "pk_test_123");
            assert_eq!(config.stripe.secret, "sk_test_456");
            assert_eq!(config.service.port, 4001);
            Ok(())
        });
    }

    #[test]
    fn test_stripe_secret_is_redacted() {
        let stripe = StripeConfig {
            key: "pk_test".to_string(),
            secret: "sk_test".to_string(),
        };
        let debug = format!("{:?}", stripe);
        assert!(debug.contains("pk_test"));
        assert!(!debug.contains("sk_test"));
    }
}
