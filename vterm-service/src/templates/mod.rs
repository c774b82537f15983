//! Page template composition and caching.
//!
//! Pages are assembled at runtime from named documents with MiniJinja:
//!
//! - **Store**: an immutable snapshot of documents, usually embedded in the
//!   binary with `rust-embed`
//! - **Composer**: chains the base layout, optional partials and one page into
//!   a single compiled template
//! - **Cache**: memoizes compiled templates for the life of the process
//! - **Renderer**: decides between cache and composer, injects defaults and
//!   streams output
//!
//! # Document layout
//!
//! ```text
//! templates/
//!   base.layout.html        the HTML shell, declares blocks
//!   alert.partial.html      block definitions shared by several pages
//!   terminal.page.html      block definitions for one screen
//! ```
//!
//! Pages and partials only define blocks. The composer wires inheritance as
//! `layout <- partials (in the order given) <- page`, so a block defined by a
//! later partial overrides an earlier one and the page overrides them all.
//!
//! ```html
//! <!-- base.layout.html -->
//! <!DOCTYPE html>
//! <html>
//!   <head><link rel="stylesheet" href="/static/app.css?v={{ css_version }}"></head>
//!   <body>
//!     {% block alerts %}{% endblock %}
//!     {% block content %}{% endblock %}
//!   </body>
//! </html>
//! ```
//!
//! # Handler usage
//!
//! ```rust,ignore
//! use vterm_service::templates::{Renderer, RequestContext, TemplateData};
//!
//! async fn terminal(State(renderer): State<Arc<Renderer>>, ctx: RequestContext) -> Html<Vec<u8>> {
//!     let mut body = Vec::new();
//!     if let Err(e) = renderer.render(&mut body, &ctx, "terminal", None, &["alert"]) {
//!         tracing::error!("{}", e);
//!     }
//!     Html(body)
//! }
//! ```

mod cache;
mod composer;
mod context;
mod error;
mod functions;
pub mod helpers;
mod renderer;
mod store;

pub use cache::{CacheKey, CacheKeyPolicy, TemplateCache};
pub use composer::{CompiledTemplate, TemplateComposer};
pub use context::{RequestContext, TemplateData};
pub use error::{CompositionError, NotFoundError, RenderError};
pub use functions::TemplateFunctions;
pub use renderer::{CacheMode, RenderDefaults, Renderer, RendererBuilder};
pub use store::{page_document, partial_document, TemplateDocument, TemplateStore, LAYOUT_DOCUMENT};
