//! Read-only snapshot of template documents.
//!
//! Documents are captured once at startup, usually from files embedded into
//! the binary with `rust-embed`, and never change afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_embed::RustEmbed;

use super::error::NotFoundError;
use crate::error::{Error, Result};

/// Name of the outermost layout every page extends.
pub const LAYOUT_DOCUMENT: &str = "base.layout.html";

const PAGE_SUFFIX: &str = ".page.html";
const PARTIAL_SUFFIX: &str = ".partial.html";

/// Document name for a page, e.g. `terminal` -> `terminal.page.html`.
#[must_use]
pub fn page_document(page: &str) -> String {
    format!("{page}{PAGE_SUFFIX}")
}

/// Document name for a partial, e.g. `alert` -> `alert.partial.html`.
#[must_use]
pub fn partial_document(partial: &str) -> String {
    format!("{partial}{PARTIAL_SUFFIX}")
}

/// An immutable named template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    name: Arc<str>,
    source: Arc<str>,
}

impl TemplateDocument {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Named documents available to the composer.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    documents: BTreeMap<String, TemplateDocument>,
}

impl TemplateStore {
    /// Build a store from `(name, source)` pairs.
    ///
    /// A later pair with the same name replaces an earlier one.
    pub fn from_documents<I, N, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<str>,
    {
        let documents = documents
            .into_iter()
            .map(|(name, source)| {
                let name = name.into();
                let document = TemplateDocument {
                    name: Arc::from(name.as_str()),
                    source: Arc::from(source.as_ref()),
                };
                (name, document)
            })
            .collect();

        Self { documents }
    }

    /// Snapshot every file of an embedded folder.
    ///
    /// Fails if a file is not valid UTF-8.
    pub fn from_embedded<E: RustEmbed>() -> Result<Self> {
        let mut documents = Vec::new();

        for name in E::iter() {
            let Some(file) = E::get(&name) else {
                continue;
            };
            let source = String::from_utf8(file.data.into_owned()).map_err(|e| {
                Error::Internal(format!("Template '{}' is not valid UTF-8: {}", name, e))
            })?;
            documents.push((name.into_owned(), source));
        }

        let store = Self::from_documents(documents);
        tracing::debug!("Loaded {} template documents", store.len());
        Ok(store)
    }

    /// Look up a document by its logical name.
    pub fn load(&self, name: &str) -> std::result::Result<TemplateDocument, NotFoundError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| NotFoundError::new(name))
    }

    /// All document names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Logical names of every page document (suffix stripped), sorted.
    pub fn pages(&self) -> Vec<String> {
        self.names()
            .filter_map(|name| name.strip_suffix(PAGE_SUFFIX))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
