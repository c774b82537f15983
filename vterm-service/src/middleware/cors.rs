//! Cross-origin policy built from [`CorsConfig`]

use http::{request::Parts, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Build a CORS layer allowing origins whose scheme is listed in the policy.
///
/// Unparseable methods and header names are skipped with a warning.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let prefixes: Vec<String> = config
        .allowed_origin_schemes
        .iter()
        .map(|scheme| format!("{}://", scheme.to_ascii_lowercase()))
        .collect();

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| match method.parse() {
            Ok(method) => Some(method),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS method: {}", method);
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|header| match header.parse() {
            Ok(header) => Some(header),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS header: {}", header);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| prefixes.iter().any(|prefix| origin.starts_with(prefix)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.allow_credentials)
        .max_age(config.max_age())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use http::{header, Request};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(&CorsConfig::default()))
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_https_origin_is_allowed() {
        let response = app().oneshot(preflight("https://shop.example")).await.unwrap();
        let headers = response.headers();

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://shop.example");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "300");
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_other_scheme_is_rejected() {
        let response = app().oneshot(preflight("ftp://files.example")).await.unwrap();
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let config = CorsConfig {
            allowed_methods: vec!["GET".to_string(), "NOT A METHOD".to_string()],
            allowed_headers: vec!["Content-Type".to_string(), "bad header".to_string()],
            ..CorsConfig::default()
        };
        // Must not panic
        let _layer = cors_layer(&config);
    }
}
