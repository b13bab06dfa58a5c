//! Render cache for templates.
//!
//! Provides a shared cache of rendered output keyed by a fingerprint of the
//! source text and render settings.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::TemplateResult;
use crate::hash::template_fingerprint;
use crate::parse::MarkupParser;
use crate::render::RenderConfig;
use crate::shield::PlaceholderMap;
use crate::template::KdlTemplate;

#[cfg(feature = "kdl")]
use crate::parse::KdlParser;

// =============================================================================
// Cache Key
// =============================================================================

/// Cache key: blake3 fingerprint of source + render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    /// Create a key for a template source rendered with `config`.
    pub fn for_template(source: &str, config: &RenderConfig) -> Self {
        Self(template_fingerprint(source, config))
    }

    /// Create a key from a raw fingerprint.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw fingerprint.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

// =============================================================================
// Cache Entry
// =============================================================================

/// A rendered template with hit tracking.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The template source this entry was rendered from.
    pub source: Arc<str>,
    /// Settings this entry was rendered with.
    pub config: RenderConfig,
    /// The rendered HTML.
    pub output: Arc<str>,
    /// Directives that were shielded during rendering.
    pub tokens: PlaceholderMap,
    /// Number of lookups served from this entry.
    pub hits: u64,
}

impl CacheEntry {
    /// Create a new cache entry with no hits.
    pub fn new(
        source: impl Into<Arc<str>>,
        config: RenderConfig,
        output: impl Into<Arc<str>>,
        tokens: PlaceholderMap,
    ) -> Self {
        Self {
            source: source.into(),
            config,
            output: output.into(),
            tokens,
            hits: 0,
        }
    }

    /// Check if this entry was rendered from exactly `source` and `config`.
    ///
    /// Keys are 64-bit fingerprints, so a key match alone is not identity.
    pub fn matches(&self, source: &str, config: &RenderConfig) -> bool {
        &*self.source == source && &self.config == config
    }
}

impl From<KdlTemplate> for CacheEntry {
    fn from(template: KdlTemplate) -> Self {
        let source = Arc::<str>::from(template.source());
        let config = template.config().clone();
        let (output, tokens) = template.into_parts();
        Self::new(source, config, output, tokens)
    }
}

// =============================================================================
// Template Cache
// =============================================================================

/// Non-thread-safe template cache.
pub type TemplateCache = FxHashMap<CacheKey, CacheEntry>;

/// Thread-safe shared template cache bound to one parser.
///
/// Uses `parking_lot::RwLock` for better performance under contention.
/// Cloning the handle shares the same storage and parser.
pub struct SharedTemplateCache<M> {
    parser: Arc<M>,
    inner: Arc<RwLock<TemplateCache>>,
}

impl<M> SharedTemplateCache<M> {
    /// Create a new empty cache rendering with `parser`.
    pub fn new(parser: M) -> Self {
        Self {
            parser: Arc::new(parser),
            inner: Arc::default(),
        }
    }

    /// The parser every miss is rendered with.
    pub fn parser(&self) -> &M {
        &self.parser
    }

    /// Execute a closure with read access to the cache.
    pub fn with_read<R>(&self, f: impl FnOnce(&TemplateCache) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with write access to the cache.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut TemplateCache) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Get a clone of a cached entry.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.with_read(|c| c.get(key).cloned())
    }

    /// Insert or update a cache entry.
    pub fn insert(&self, key: CacheKey, entry: CacheEntry) {
        self.with_write(|c| {
            c.insert(key, entry);
        });
    }

    /// Remove an entry from the cache.
    pub fn remove(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.with_write(|c| c.remove(key))
    }

    /// Check if the cache contains a key.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.with_read(|c| c.contains_key(key))
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.with_read(|c| c.len())
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all entries from the cache.
    pub fn clear(&self) {
        self.with_write(|c| c.clear());
    }
}

impl<M: MarkupParser> SharedTemplateCache<M> {
    /// Return the cached output for `source`, rendering it on a miss.
    ///
    /// Failed renders are not cached; the error is returned as is.
    pub fn get_or_render(&self, source: &str, config: &RenderConfig) -> TemplateResult<Arc<str>> {
        let key = CacheKey::for_template(source, config);

        let hit = self.with_write(|c| {
            c.get_mut(&key)
                .filter(|entry| entry.matches(source, config))
                .map(|entry| {
                    entry.hits += 1;
                    Arc::clone(&entry.output)
                })
        });
        if let Some(output) = hit {
            tracing::trace!(%key, "template cache hit");
            return Ok(output);
        }

        tracing::trace!(%key, "template cache miss");
        let template = KdlTemplate::with_parser(&*self.parser, source, config.clone())?;
        let entry = CacheEntry::from(template);
        let output = Arc::clone(&entry.output);
        self.insert(key, entry);
        Ok(output)
    }
}

impl<M> Clone for SharedTemplateCache<M> {
    fn clone(&self) -> Self {
        Self {
            parser: Arc::clone(&self.parser),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M> std::fmt::Debug for SharedTemplateCache<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTemplateCache")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "kdl")]
impl Default for SharedTemplateCache<KdlParser> {
    fn default() -> Self {
        Self::new(KdlParser)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::TemplateError;
    use crate::node::{Document, Node};

    type FnParser = fn(&str) -> TemplateResult<Document>;

    fn entry(source: &str, output: &str) -> CacheEntry {
        CacheEntry::new(source, RenderConfig::COMPACT, output, PlaceholderMap::new())
    }

    #[test]
    fn test_cache_key() {
        let a = CacheKey::for_template("div", &RenderConfig::PRETTY);
        let b = CacheKey::for_template("div", &RenderConfig::PRETTY);
        assert_eq!(a, b);
        assert_eq!(a.to_string().len(), 16);
        assert_eq!(CacheKey::from_raw(a.as_raw()), a);
    }

    #[test]
    fn test_shared_cache() {
        let parser: FnParser = |_| Ok(Document::default());
        let cache = SharedTemplateCache::new(parser);
        let key = CacheKey::from_raw(7);
        cache.insert(key, entry("p", "<p></p>"));
        assert!(cache.contains(&key));
        assert_eq!(cache.len(), 1);

        // clones share storage
        let handle = cache.clone();
        handle.remove(&key);
        assert!(!cache.contains(&key));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_render_renders_once() {
        let calls = Cell::new(0);
        let parser = |_: &str| -> TemplateResult<Document> {
            calls.set(calls.get() + 1);
            Ok(Document::new([Node::new("p").arg("__JINJA_0__")]))
        };

        let cache = SharedTemplateCache::new(parser);
        let config = RenderConfig::COMPACT;
        let first = cache.get_or_render("p \"{{ x }}\"", &config).unwrap();
        let second = cache.get_or_render("p \"{{ x }}\"", &config).unwrap();

        assert_eq!(&*first, "<p>{{ x }}</p>");
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);

        let key = CacheKey::for_template("p \"{{ x }}\"", &config);
        let entry = cache.get(&key).unwrap();
        assert_eq!(entry.hits, 1);
        assert_eq!(&*entry.source, "p \"{{ x }}\"");
        assert_eq!(entry.tokens.get("__JINJA_0__"), Some("{{ x }}"));
    }

    #[test]
    fn test_each_cache_renders_with_its_own_parser() {
        let a: FnParser = |_| Ok(Document::new([Node::new("a")]));
        let b: FnParser = |_| Ok(Document::new([Node::new("b")]));
        let cache_a = SharedTemplateCache::new(a);
        let cache_b = SharedTemplateCache::new(b);

        let first = cache_a.get_or_render("x", &RenderConfig::COMPACT).unwrap();
        let second = cache_b.get_or_render("x", &RenderConfig::COMPACT).unwrap();
        assert_eq!(&*first, "<a></a>");
        assert_eq!(&*second, "<b></b>");

        // a clone keeps the parser it was built with
        let again = cache_a.clone().get_or_render("x", &RenderConfig::COMPACT).unwrap();
        assert_eq!(&*again, "<a></a>");
    }

    #[test]
    fn test_colliding_key_is_not_served() {
        let parser: FnParser = |_| Ok(Document::new([Node::new("fresh")]));
        let cache = SharedTemplateCache::new(parser);
        let config = RenderConfig::COMPACT;
        let key = CacheKey::for_template("x", &config);

        // another source stored under the same key
        cache.insert(key, entry("y", "<stale></stale>"));
        let output = cache.get_or_render("x", &config).unwrap();
        assert_eq!(&*output, "<fresh></fresh>");

        let stored = cache.get(&key).unwrap();
        assert_eq!(&*stored.source, "x");
        assert_eq!(stored.hits, 0);
    }

    #[test]
    fn test_entry_matches_source_and_config() {
        let e = entry("div", "<div></div>");
        assert!(e.matches("div", &RenderConfig::COMPACT));
        assert!(!e.matches("div", &RenderConfig::PRETTY));
        assert!(!e.matches("span", &RenderConfig::COMPACT));
    }

    #[test]
    fn test_get_or_render_does_not_cache_errors() {
        let parser: FnParser = |_| Err(TemplateError::parse("bad"));
        let cache = SharedTemplateCache::new(parser);
        assert!(cache.get_or_render("div {", &RenderConfig::PRETTY).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_is_send_sync() {
        static_assertions::assert_impl_all!(SharedTemplateCache<FnParser>: Send, Sync, Clone);
    }

    #[cfg(feature = "kdl")]
    #[test]
    fn test_default_cache_uses_kdl() {
        let cache: SharedTemplateCache<KdlParser> = SharedTemplateCache::default();
        let html = cache.get_or_render("p \"{{ name }}\"", &RenderConfig::COMPACT).unwrap();
        assert_eq!(&*html, "<p>{{ name }}</p>");
    }
}
