//! Entry point handlers use to produce page output.

use std::io::Write;
use std::sync::Arc;

use super::cache::{CacheKeyPolicy, TemplateCache};
use super::composer::{CompiledTemplate, TemplateComposer};
use super::context::{RequestContext, TemplateData};
use super::error::RenderError;
use super::functions::TemplateFunctions;
use super::store::TemplateStore;

/// Whether cached compositions are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Serve a cached composition when one exists (production).
    Reuse,
    /// Recompose from source on every render (development).
    #[default]
    Recompose,
}

impl CacheMode {
    /// `Reuse` in production, `Recompose` everywhere else.
    #[must_use]
    pub fn for_environment(environment: &str) -> Self {
        if environment == "production" {
            CacheMode::Reuse
        } else {
            CacheMode::Recompose
        }
    }
}

/// Process-wide values injected into every [`TemplateData`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDefaults {
    pub api: String,
    pub css_version: String,
}

/// Renders pages, composing or reusing cached templates per [`CacheMode`].
///
/// # Example
///
/// ```rust
/// use vterm_service::templates::{CacheMode, RequestContext, Renderer, TemplateStore};
///
/// let store = TemplateStore::from_documents([
///     ("base.layout.html", "<body>{% block content %}{% endblock %}</body>"),
///     ("home.page.html", "{% block content %}hi {{ string_map.name }}{% endblock %}"),
/// ]);
/// let renderer = Renderer::builder(store).mode(CacheMode::Reuse).build();
///
/// let mut out = Vec::new();
/// let data = vterm_service::templates::TemplateData::new().with_string("name", "Ada");
/// renderer
///     .render(&mut out, &RequestContext::new("/"), "home", Some(data), &[])
///     .unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "<body>hi Ada</body>");
/// ```
#[derive(Debug)]
pub struct Renderer {
    composer: TemplateComposer,
    mode: CacheMode,
    defaults: RenderDefaults,
}

impl Renderer {
    pub fn builder(store: TemplateStore) -> RendererBuilder {
        RendererBuilder::new(store)
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    pub fn cache(&self) -> &TemplateCache {
        self.composer.cache()
    }

    pub fn composer(&self) -> &TemplateComposer {
        &self.composer
    }

    /// Number of compositions performed so far.
    pub fn compositions(&self) -> u64 {
        self.composer.compositions()
    }

    /// Render `page` with `partials` into `out`.
    ///
    /// Output is streamed; when execution fails midway whatever was already
    /// written stays in `out`.
    pub fn render<W: Write>(
        &self,
        out: W,
        request: &RequestContext,
        page: &str,
        data: Option<TemplateData>,
        partials: &[&str],
    ) -> Result<(), RenderError> {
        let template = self.template_for(page, partials)?;

        let data = self.add_default_data(data.unwrap_or_default(), request);

        template
            .render_to(&data, out)
            .map_err(|source| RenderError::Execution {
                page: page.to_string(),
                source,
            })
    }

    /// Fill process-wide fields the handler left empty.
    pub fn add_default_data(&self, mut data: TemplateData, request: &RequestContext) -> TemplateData {
        if data.api.is_empty() {
            data.api.clone_from(&self.defaults.api);
        }
        if data.css_version.is_empty() {
            data.css_version.clone_from(&self.defaults.css_version);
        }
        if data.current_path.is_empty() {
            data.current_path.clone_from(&request.path);
        }
        data
    }

    fn template_for(&self, page: &str, partials: &[&str]) -> Result<Arc<CompiledTemplate>, RenderError> {
        if self.mode == CacheMode::Reuse {
            let key = self.cache().key(page, partials);
            if let Some(template) = self.cache().get(&key) {
                tracing::debug!(page, "Template cache hit");
                return Ok(template);
            }
            tracing::debug!(page, "Template cache miss");
        }

        Ok(self.composer.compose(page, partials)?)
    }
}

/// Builder for [`Renderer`].
pub struct RendererBuilder {
    store: TemplateStore,
    functions: TemplateFunctions,
    policy: CacheKeyPolicy,
    mode: CacheMode,
    defaults: RenderDefaults,
}

impl RendererBuilder {
    fn new(store: TemplateStore) -> Self {
        Self {
            store,
            functions: TemplateFunctions::new(),
            policy: CacheKeyPolicy::default(),
            mode: CacheMode::default(),
            defaults: RenderDefaults::default(),
        }
    }

    #[must_use]
    pub fn functions(mut self, functions: TemplateFunctions) -> Self {
        self.functions = functions;
        self
    }

    #[must_use]
    pub fn cache_key_policy(mut self, policy: CacheKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: CacheMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn defaults(mut self, defaults: RenderDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn build(self) -> Renderer {
        let composer = TemplateComposer::new(
            Arc::new(self.store),
            Arc::new(TemplateCache::new(self.policy)),
            self.functions,
        );

        Renderer {
            composer,
            mode: self.mode,
            defaults: self.defaults,
        }
    }
}
