//! Time- and size-bounded memoization of resolved documentation.
//!
//! Entries expire `ttl` after they are written and the least recently used
//! entry is evicted once `capacity` is reached. Loading is single-flight per
//! URL: concurrent lookups of a URL that is not cached share one resolution.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::OnceCell;

use crate::fetch::ContentFetcher;
use crate::resolver::DocumentationResolver;

#[derive(Debug, Clone)]
struct CacheEntry {
    html: String,
    created_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() < ttl
    }
}

pub struct DocumentationCache<F> {
    resolver: DocumentationResolver<F>,
    ttl: Duration,
    entries: Mutex<LruCache<String, CacheEntry>>,
    // Lock order: `in_flight` before `entries`.
    in_flight: Mutex<HashMap<String, Arc<OnceCell<String>>>>,
}

impl<F: ContentFetcher> DocumentationCache<F> {
    /// A capacity of zero is treated as one.
    pub fn new(resolver: DocumentationResolver<F>, ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            resolver,
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolver(&self) -> &DocumentationResolver<F> {
        &self.resolver
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached HTML for `url`, resolving it first when it is missing or stale.
    ///
    /// Fallback fragments are cached exactly like real content. If the caller
    /// running a load is cancelled, the next waiter for that URL takes the load over.
    pub async fn get(&self, url: &str) -> String {
        if let Some(html) = self.fresh(url) {
            tracing::debug!("Documentation cache hit for {}", url);
            return html;
        }

        let cell = {
            let mut in_flight = lock(&self.in_flight);
            // A load may have finished between the check above and taking the lock.
            if let Some(html) = self.fresh(url) {
                return html;
            }
            in_flight
                .entry(url.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let html = cell
            .get_or_init(|| async {
                tracing::debug!("Documentation cache miss for {}, resolving", url);
                let html = self.resolver.resolve(url).await;
                self.store(url, &html);
                html
            })
            .await
            .clone();

        let mut in_flight = lock(&self.in_flight);
        if let Some(current) = in_flight.get(url)
            && Arc::ptr_eq(current, &cell)
        {
            in_flight.remove(url);
        }
        html
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a fresh entry exists for `url`. Does not touch recency.
    pub fn contains(&self, url: &str) -> bool {
        lock(&self.entries).peek(url).is_some_and(|entry| entry.is_fresh(self.ttl))
    }

    fn fresh(&self, url: &str) -> Option<String> {
        let mut entries = lock(&self.entries);
        let expired = match entries.get(url) {
            Some(entry) if entry.is_fresh(self.ttl) => return Some(entry.html.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            tracing::debug!("Documentation cache entry for {} expired", url);
            entries.pop(url);
        }
        None
    }

    fn store(&self, url: &str, html: &str) {
        let entry = CacheEntry {
            html: html.to_string(),
            created_at: Instant::now(),
        };
        if let Some((evicted, _)) = lock(&self.entries).push(url.to_string(), entry)
            && evicted != url
        {
            tracing::debug!("Evicted {} from the documentation cache", evicted);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
