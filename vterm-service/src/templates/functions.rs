//! Registry of helper functions callable from templates.
//!
//! The registry is handed to the composer once and installed as globals into
//! every composition, so adding a helper never touches composition logic.

use std::collections::BTreeMap;

use minijinja::{Environment, Value};

/// Name -> callable map installed into every composed template.
///
/// ```rust
/// use minijinja::Value;
/// use vterm_service::templates::{helpers, TemplateFunctions};
///
/// let functions = TemplateFunctions::new()
///     .with("format_amount", Value::from_function(helpers::format_amount));
/// assert!(functions.contains("format_amount"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateFunctions {
    functions: BTreeMap<String, Value>,
}

impl TemplateFunctions {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable under `name`, replacing any earlier one.
    ///
    /// Build the value with [`Value::from_function`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, function: Value) -> Self {
        self.functions.insert(name.into(), function);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub(crate) fn install(&self, env: &mut Environment<'static>) {
        for (name, function) in &self.functions {
            env.add_global(name.clone(), function.clone());
        }
    }
}
