//! Process-wide memo of compiled page templates.
//!
//! Entries are never evicted. Reads and writes go through a sharded
//! concurrent map, so renders of different pages never wait on each other and
//! two writers of the same key resolve as last-write-wins.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::composer::CompiledTemplate;

/// How a cache key is derived from a render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKeyPolicy {
    /// Page name plus the ordered partial list.
    #[default]
    Composition,
    /// Page name only. A page rendered with different partial sets shares one
    /// entry, so a cached composition may carry other partials than requested.
    Page,
}

/// Identity of one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    page: String,
    partials: Option<Vec<String>>,
}

impl CacheKey {
    pub fn page(&self) -> &str {
        &self.page
    }
}

/// Compiled templates keyed by page identity.
#[derive(Debug, Default)]
pub struct TemplateCache {
    policy: CacheKeyPolicy,
    entries: DashMap<CacheKey, Arc<CompiledTemplate>>,
}

impl TemplateCache {
    pub fn new(policy: CacheKeyPolicy) -> Self {
        Self {
            policy,
            entries: DashMap::new(),
        }
    }

    pub fn policy(&self) -> CacheKeyPolicy {
        self.policy
    }

    /// Key for a page rendered with the given partials under this cache's policy.
    pub fn key(&self, page: &str, partials: &[&str]) -> CacheKey {
        let partials = match self.policy {
            CacheKeyPolicy::Composition => {
                Some(partials.iter().map(|p| (*p).to_string()).collect())
            }
            CacheKeyPolicy::Page => None,
        };
        CacheKey {
            page: page.to_string(),
            partials,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<CompiledTemplate>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Store a compiled template, replacing any previous entry for `key`.
    pub fn put(&self, key: CacheKey, template: Arc<CompiledTemplate>) {
        self.entries.insert(key, template);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
