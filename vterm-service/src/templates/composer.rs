//! Composition of layout, partials and page into one executable template.
//!
//! A composition is an inheritance chain: the layout is the root, each partial
//! extends the document before it, and the page extends the last partial (or
//! the layout when there are none). Page and partial documents only define
//! blocks. Because the most derived definition of a block wins, the order of
//! partials decides which definition is rendered.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use minijinja::Environment;
use serde::Serialize;

use super::cache::TemplateCache;
use super::error::CompositionError;
use super::functions::TemplateFunctions;
use super::store::{page_document, partial_document, TemplateStore, LAYOUT_DOCUMENT};

/// A parsed, directly executable composition.
pub struct CompiledTemplate {
    page: String,
    documents: Vec<String>,
    env: Environment<'static>,
}

impl CompiledTemplate {
    /// Logical page name this template renders.
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Document names in chain order: layout, partials, page.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Logical partial names this template was composed with, in order.
    pub fn partials(&self) -> Vec<&str> {
        let last = self.documents.len() - 1;
        self.documents[1..last]
            .iter()
            .filter_map(|name| name.strip_suffix(".partial.html"))
            .collect()
    }

    /// Execute against `ctx`, streaming output into `out`.
    ///
    /// Output written before a failure stays in `out`.
    pub fn render_to<S: Serialize, W: Write>(&self, ctx: S, out: W) -> Result<(), minijinja::Error> {
        let entry = self
            .documents
            .last()
            .map(String::as_str)
            .unwrap_or(LAYOUT_DOCUMENT);
        let template = self.env.get_template(entry)?;
        template.render_captured_to(ctx, out)?;
        Ok(())
    }
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("page", &self.page)
            .field("documents", &self.documents)
            .finish()
    }
}

/// Builds compositions from a [`TemplateStore`] and records them in a
/// [`TemplateCache`].
pub struct TemplateComposer {
    store: Arc<TemplateStore>,
    cache: Arc<TemplateCache>,
    functions: TemplateFunctions,
    compositions: AtomicU64,
}

impl TemplateComposer {
    pub fn new(
        store: Arc<TemplateStore>,
        cache: Arc<TemplateCache>,
        functions: TemplateFunctions,
    ) -> Self {
        Self {
            store,
            cache,
            functions,
            compositions: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Number of successful compositions so far.
    pub fn compositions(&self) -> u64 {
        self.compositions.load(Ordering::Relaxed)
    }

    /// Compose `page` with `partials` and cache the result.
    ///
    /// Nothing is cached when a document is missing or fails to parse.
    pub fn compose(
        &self,
        page: &str,
        partials: &[&str],
    ) -> Result<Arc<CompiledTemplate>, CompositionError> {
        let mut names = Vec::with_capacity(partials.len() + 2);
        names.push(LAYOUT_DOCUMENT.to_string());
        names.extend(partials.iter().map(|partial| partial_document(partial)));
        names.push(page_document(page));

        let documents = names
            .iter()
            .map(|name| self.store.load(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut env = Environment::new();
        self.functions.install(&mut env);

        let mut parent: Option<&str> = None;
        for document in &documents {
            let source = match parent {
                Some(parent) => format!("{{% extends {} %}}{}", string_literal(parent), document.source()),
                None => document.source().to_string(),
            };
            env.add_template_owned(document.name().to_string(), source)
                .map_err(|source| CompositionError::Parse {
                    document: document.name().to_string(),
                    source,
                })?;
            parent = Some(document.name());
        }

        let compiled = Arc::new(CompiledTemplate {
            page: page.to_string(),
            documents: names,
            env,
        });

        self.cache
            .put(self.cache.key(page, partials), Arc::clone(&compiled));
        self.compositions.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            page,
            partials = ?partials,
            "Composed page template"
        );

        Ok(compiled)
    }
}

/// Quote `value` as a template string literal.
fn string_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

impl fmt::Debug for TemplateComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateComposer")
            .field("documents", &self.store.len())
            .field("functions", &self.functions)
            .field("compositions", &self.compositions())
            .finish()
    }
}
