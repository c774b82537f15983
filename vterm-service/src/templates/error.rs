//! Errors raised while loading, composing and executing page templates.
//!
//! The three kinds nest: a missing document is a [`NotFoundError`], which
//! surfaces through [`CompositionError`], which in turn surfaces through
//! [`RenderError`]. Nothing here is retried; the handler decides what to log
//! and what the client sees.

use thiserror::Error;

/// No document with the requested name exists in the template snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Template document not found: {name}")]
pub struct NotFoundError {
    /// Logical document name that was requested
    pub name: String,
}

impl NotFoundError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Failure to combine layout, partials and page into one executable template.
#[derive(Debug, Error)]
pub enum CompositionError {
    /// A referenced layout, partial or page document is missing
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A document in the chain failed to parse
    #[error("Failed to parse template '{document}': {source}")]
    Parse {
        document: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Failure to produce page output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Recomposition failed before anything was written
    #[error("Failed to compose page: {0}")]
    Composition(#[from] CompositionError),

    /// Executing the compiled template failed, possibly after partial output
    #[error("Failed to execute page '{page}': {source}")]
    Execution {
        page: String,
        #[source]
        source: minijinja::Error,
    },
}

impl RenderError {
    /// Whether the root cause is a missing template document.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RenderError::Composition(CompositionError::NotFound(_))
        )
    }
}
