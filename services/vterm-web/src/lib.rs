//! Virtual terminal web front end
//!
//! Pages are composed from the documents under `templates/`, which are
//! embedded into the binary at build time.

use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use rust_embed::Embed;
use vterm_service::{
    config::Config,
    error::Result,
    health::{health, ServiceInfo},
    templates::{helpers, CacheMode, RenderDefaults, Renderer, TemplateFunctions, TemplateStore},
};

pub mod handlers;
pub mod settings;

pub use settings::WebSettings;

/// Template documents shipped with the web process
#[derive(Embed)]
#[folder = "templates/"]
pub struct WebTemplates;

/// Shared application state
#[derive(Clone)]
pub struct WebState {
    pub renderer: Arc<Renderer>,
    pub info: ServiceInfo,
}

impl WebState {
    pub fn new(renderer: Renderer, info: ServiceInfo) -> Self {
        Self {
            renderer: Arc::new(renderer),
            info,
        }
    }
}

impl FromRef<WebState> for Arc<Renderer> {
    fn from_ref(state: &WebState) -> Self {
        state.renderer.clone()
    }
}

impl FromRef<WebState> for ServiceInfo {
    fn from_ref(state: &WebState) -> Self {
        state.info.clone()
    }
}

/// Snapshot of the embedded template documents.
pub fn load_templates() -> Result<TemplateStore> {
    TemplateStore::from_embedded::<WebTemplates>()
}

/// Helper functions available to every page.
pub fn template_functions() -> TemplateFunctions {
    TemplateFunctions::new()
        .with("format_amount", minijinja::Value::from_function(helpers::format_amount))
        .with("classes", minijinja::Value::from_function(helpers::classes))
}

/// Renderer configured from the web settings.
///
/// Cached compositions are reused only in production.
pub fn build_renderer(config: &Config<WebSettings>) -> Result<Renderer> {
    let store = load_templates()?;

    tracing::info!("Loaded {} template documents", store.len());

    let renderer = Renderer::builder(store)
        .functions(template_functions())
        .cache_key_policy(config.app.cache_key)
        .mode(CacheMode::for_environment(&config.service.environment))
        .defaults(RenderDefaults {
            api: config.app.api_url.clone(),
            css_version: config.app.css_version.clone(),
        })
        .build();

    Ok(renderer)
}

/// Web routes
pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/virtual-terminal", get(handlers::virtual_terminal))
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use vterm_service::templates::{
        CacheKeyPolicy, RequestContext, LAYOUT_DOCUMENT,
    };

    fn web_config(environment: &str) -> Config<WebSettings> {
        let mut config = Config::<WebSettings>::default();
        config.service.name = "vterm-web".to_string();
        config.service.environment = environment.to_string();
        config.app.api_url = "api.test:4001".to_string();
        config
    }

    fn state_for(renderer: Renderer) -> WebState {
        WebState::new(renderer, ServiceInfo::new("vterm-web"))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_embedded_templates() {
        let store = load_templates().unwrap();
        assert!(store.load(LAYOUT_DOCUMENT).is_ok());
        assert!(store.load("terminal.page.html").is_ok());
        assert!(store.load("alert.partial.html").is_ok());
        assert_eq!(store.pages(), vec!["terminal".to_string()]);
    }

    #[test]
    fn test_every_page_composes() {
        let renderer = build_renderer(&web_config("development")).unwrap();
        let store = load_templates().unwrap();
        for page in store.pages() {
            renderer
                .composer()
                .compose(&page, handlers::terminal::TERMINAL_PARTIALS)
                .unwrap();
        }
    }

    #[test]
    fn test_renderer_follows_environment() {
        let production = build_renderer(&web_config("production")).unwrap();
        assert_eq!(production.mode(), CacheMode::Reuse);

        let development = build_renderer(&web_config("development")).unwrap();
        assert_eq!(development.mode(), CacheMode::Recompose);
    }

    #[test]
    fn test_cache_key_policy_from_settings() {
        let mut config = web_config("production");
        config.app.cache_key = CacheKeyPolicy::Page;
        let renderer = build_renderer(&config).unwrap();
        assert_eq!(renderer.cache().policy(), CacheKeyPolicy::Page);
    }

    #[test]
    fn test_terminal_page_defaults() {
        let renderer = build_renderer(&web_config("development")).unwrap();
        let mut out = Vec::new();
        renderer
            .render(
                &mut out,
                &RequestContext::new("/virtual-terminal"),
                "terminal",
                None,
                &["alert"],
            )
            .unwrap();

        let html = String::from_utf8(out).unwrap();
        assert!(html.contains("<title>Virtual Terminal</title>"));
        assert!(html.contains("app.css?v=1"));
        assert!(html.contains(r#"const API = "api.test:4001";"#));
        assert!(html.contains("Minimum charge 0.50 USD"));
        assert!(html.contains(r#"class="nav-link active""#));
        assert!(html.contains("alert-danger d-none"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[tokio::test]
    async fn test_virtual_terminal_route() {
        let renderer = build_renderer(&web_config("production")).unwrap();
        let state = state_for(renderer);
        let renderer = state.renderer.clone();
        let app = routes(state);

        let (status, content_type, body) = get_body(app.clone(), "/virtual-terminal").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains("Virtual Terminal"));
        assert!(body.contains("card-element"));
        assert!(body.contains(r#"const API = "api.test:4001";"#));
        assert!(body.contains("/api/payment-intent"));
        assert!(body.trim_end().ends_with("</html>"));

        get_body(app, "/virtual-terminal").await;
        assert_eq!(renderer.compositions(), 1);
    }

    #[tokio::test]
    async fn test_render_failure_returns_partial_body() {
        // No alert partial in the store
        let store = TemplateStore::from_documents([
            (LAYOUT_DOCUMENT, "<html>{% block content %}{% endblock %}</html>"),
            ("terminal.page.html", "{% block content %}terminal{% endblock %}"),
        ]);
        let app = routes(state_for(Renderer::builder(store).build()));

        let (status, content_type, body) = get_body(app, "/virtual-terminal").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_execution_failure_keeps_written_output() {
        let store = TemplateStore::from_documents([
            (LAYOUT_DOCUMENT, "<html>{% block content %}{% endblock %}</html>"),
            ("terminal.page.html", "{% block content %}{{ missing.field }}{% endblock %}"),
            ("alert.partial.html", ""),
        ]);
        let app = routes(state_for(Renderer::builder(store).build()));

        let (status, _, body) = get_body(app, "/virtual-terminal").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>");
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = routes(state_for(build_renderer(&web_config("development")).unwrap()));

        let (status, _, body) = get_body(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""status":"healthy""#));
        assert!(body.contains(r#""service":"vterm-web""#));
    }
}
