use std::sync::Arc;

use axum::{extract::State, response::Html};
use vterm_service::templates::{Renderer, RequestContext};

/// Page shown by [`virtual_terminal`].
pub const TERMINAL_PAGE: &str = "terminal";

/// Partials composed into the terminal page.
pub const TERMINAL_PARTIALS: &[&str] = &["alert"];

/// Virtual terminal page
///
/// Render failures are logged and whatever was written before the failure is
/// returned as-is.
pub async fn virtual_terminal(
    State(renderer): State<Arc<Renderer>>,
    request: RequestContext,
) -> Html<Vec<u8>> {
    let mut body = Vec::new();

    if let Err(e) = renderer.render(&mut body, &request, TERMINAL_PAGE, None, TERMINAL_PARTIALS) {
        tracing::error!(
            page = TERMINAL_PAGE,
            request_id = request.request_id.as_deref().unwrap_or_default(),
            missing_template = e.is_not_found(),
            "{}",
            e
        );
    }

    Html(body)
}
