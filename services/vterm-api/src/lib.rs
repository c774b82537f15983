//! Virtual terminal payment API

use axum::{extract::FromRef, routing::get, Router};
use vterm_service::{
    config::{Config, CorsConfig, ServiceConfig},
    health::{health, ServiceInfo},
};

pub mod handlers;
pub mod models;

/// Shared application state
#[derive(Clone)]
pub struct ApiState {
    pub info: ServiceInfo,
}

impl FromRef<ApiState> for ServiceInfo {
    fn from_ref(state: &ApiState) -> Self {
        state.info.clone()
    }
}

/// Built-in API configuration: port 4001, five second request timeout and
/// the browser-facing CORS policy.
pub fn default_config() -> Config {
    let mut service = ServiceConfig::new("vterm-api", 4001);
    service.timeout_secs = 5;

    let mut config = Config::with_service(service);
    config.middleware.cors = Some(CorsConfig::default());
    config
}

/// API routes
pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/payment-intent",
            get(handlers::get_payment_intent).post(handlers::create_payment_intent),
        )
        .route("/health", get(health))
        .with_state(state)
}
