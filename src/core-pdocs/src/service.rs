//! Inbound entry point: the resolution cache composed with the standard pipeline.

use crate::cache::DocumentationCache;
use crate::common::{github_config::GithubCredentials, settings::ResolverSettings};
use crate::errors::Result;
use crate::extractors::ExtractorRegistry;
use crate::fetch::{ContentFetcher, HttpFetcher};
use crate::fragments::{external_documentation, no_documentation_found};
use crate::resolver::DocumentationResolver;

pub struct DocumentationService<F> {
    cache: DocumentationCache<F>,
}

impl DocumentationService<HttpFetcher> {
    /// Reads [`ResolverSettings`] and [`GithubCredentials`] from the environment.
    pub fn from_env() -> Result<Self> {
        let settings = ResolverSettings::from_env()?;
        let credentials = GithubCredentials::from_env();
        let fetcher = HttpFetcher::new(&settings)?;
        Self::new(&settings, &credentials, fetcher)
    }
}

impl<F: ContentFetcher> DocumentationService<F> {
    pub fn new(settings: &ResolverSettings, credentials: &GithubCredentials, fetcher: F) -> Result<Self> {
        let resolver = DocumentationResolver::new(ExtractorRegistry::new(settings, credentials)?, fetcher);
        Ok(Self {
            cache: DocumentationCache::new(resolver, settings.cache_ttl, settings.cache_capacity),
        })
    }

    pub fn cache(&self) -> &DocumentationCache<F> {
        &self.cache
    }

    /// Embeddable HTML for a plugin's documentation `url`. Always returns a fragment.
    ///
    /// Blank and unrecognized URLs are answered directly; everything else goes
    /// through the cache.
    pub async fn resolve_documentation(&self, url: &str) -> String {
        if url.trim().is_empty() {
            return no_documentation_found();
        }
        if !self.cache.resolver().is_recognized(url) {
            tracing::debug!("No extractor recognizes {}", url);
            return external_documentation(url);
        }
        self.cache.get(url).await
    }
}
