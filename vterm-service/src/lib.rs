//! # vterm-service
//!
//! Shared runtime for the virtual terminal web and API processes.
//!
//! ## Features
//!
//! - **Template composition**: MiniJinja pages assembled from a base layout,
//!   partials and a page document, cached per composition
//! - **Middleware stack**: request tracking, panic recovery, body limits,
//!   timeouts, compression and CORS
//! - **Configuration**: Figment layering of defaults, config files, the
//!   environment and command-line flags
//! - **Health checks**: Liveness probe
//! - **Graceful shutdown**: Proper signal handling (SIGTERM, SIGINT)
//!
//! ## Example
//!
//! ```rust,no_run
//! use vterm_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::<()>::load(Config::with_service(ServiceConfig::new("vterm-api", 4001)))?;
//!
//!     init_tracing(&config);
//!
//!     let app = Router::new()
//!         .route("/health", get(health))
//!         .with_state(ServiceInfo::new(config.service.name.clone()));
//!
//!     Server::new(config).serve(app).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod templates;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        Config, CorsConfig, MiddlewareConfig, ServiceConfig, StripeConfig, ENV_PREFIX,
    };
    pub use crate::error::{Error, Result};
    pub use crate::health::{health, HealthResponse, ServiceInfo};
    pub use crate::middleware::{
        cors_layer, request_id_layer, request_id_propagation_layer, sensitive_headers_layer,
        SENSITIVE_HEADERS,
    };
    pub use crate::observability::init_tracing;
    pub use crate::server::Server;
    pub use crate::templates::{
        CacheKeyPolicy, CacheMode, RenderDefaults, RenderError, Renderer, RequestContext,
        TemplateData, TemplateFunctions, TemplateStore,
    };

    pub use axum::{
        extract::{FromRef, State},
        response::{Html, IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
}
