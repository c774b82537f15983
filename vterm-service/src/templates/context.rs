//! Per-request data handed to a compiled template.
//!
//! [`TemplateData`] is what the template sees; [`RequestContext`] is what the
//! renderer knows about the inbound request when it fills in defaults.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::request::Parts;
use serde::Serialize;

/// Data bundle available to every page.
///
/// Handlers fill the typed maps and message fields; the renderer adds the
/// process-wide defaults before execution.
///
/// # Example
///
/// ```rust
/// use vterm_service::templates::TemplateData;
///
/// let data = TemplateData::new()
///     .with_string("merchant", "Corner Shop")
///     .with_int("amount", 1999)
///     .with_flash("Payment captured");
///
/// assert_eq!(data.string_map.get("merchant").map(String::as_str), Some("Corner Shop"));
/// assert_eq!(data.flash, "Payment captured");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    pub string_map: HashMap<String, String>,
    pub int_map: HashMap<String, i64>,
    pub float_map: HashMap<String, f32>,

    /// Arbitrary values for anything the typed maps do not cover.
    pub data: HashMap<String, serde_json::Value>,

    /// CSRF token for form protection.
    pub csrf_token: String,

    /// Transient user messages, by severity.
    pub flash: String,
    pub warning: String,
    pub error: String,

    pub is_authenticated: bool,

    /// Base address of the API process.
    pub api: String,

    /// Cache-busting tag appended to asset URLs.
    pub css_version: String,

    /// Path of the request being rendered.
    pub current_path: String,
}

impl TemplateData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.string_map.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.int_map.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_float(mut self, key: impl Into<String>, value: f32) -> Self {
        self.float_map.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_csrf(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = token.into();
        self
    }

    #[must_use]
    pub fn with_flash(mut self, message: impl Into<String>) -> Self {
        self.flash = message.into();
        self
    }

    #[must_use]
    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.warning = message.into();
        self
    }

    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = message.into();
        self
    }

    #[must_use]
    pub fn with_auth(mut self, is_authenticated: bool) -> Self {
        self.is_authenticated = is_authenticated;
        self
    }
}

/// What the renderer knows about the inbound request.
///
/// Usable directly as an axum extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub path: String,
    pub request_id: Option<String>,
}

impl RequestContext {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            request_id: None,
        }
    }

    #[must_use]
    pub fn from_parts(parts: &Parts) -> Self {
        let request_id = parts
            .headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Self {
            path: parts.uri.path().to_string(),
            request_id,
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_data_builder() {
        let data = TemplateData::new()
            .with_string("name", "terminal")
            .with_int("amount", 500)
            .with_float("rate", 0.5)
            .with_data("items", serde_json::json!(["a", "b"]))
            .with_csrf("token123")
            .with_auth(true);

        assert_eq!(data.string_map.get("name"), Some(&"terminal".to_string()));
        assert_eq!(data.int_map.get("amount"), Some(&500));
        assert_eq!(data.float_map.get("rate"), Some(&0.5));
        assert_eq!(data.data.get("items"), Some(&serde_json::json!(["a", "b"])));
        assert_eq!(data.csrf_token, "token123");
        assert!(data.is_authenticated);
    }

    #[test]
    fn test_request_context_from_parts() {
        let request = http::Request::builder()
            .uri("/virtual-terminal?x=1")
            .header("x-request-id", "req-42")
            .body(())
            .unwrap();
        let (parts, _) = request.into_parts();

        let ctx = RequestContext::from_parts(&parts);
        assert_eq!(ctx.path, "/virtual-terminal");
        assert_eq!(ctx.request_id.as_deref(), Some("req-42"));
    }

    #[tokio::test]
    async fn test_request_context_extractor() {
        let request = http::Request::builder().uri("/health").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let ctx = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx, RequestContext::new("/health"));
    }
}
