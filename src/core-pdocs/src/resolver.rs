//! Picks an extractor, fetches, cleans, and absorbs every failure into a renderable fragment.

use crate::common::{github_config::GithubCredentials, settings::ResolverSettings};
use crate::errors::Result;
use crate::extractors::{Extracted, ExtractorRegistry};
use crate::fetch::{ContentFetcher, HttpFetcher, redact_url};
use crate::fragments::{external_documentation, no_documentation_found};

pub struct DocumentationResolver<F> {
    registry: ExtractorRegistry,
    fetcher: F,
}

impl DocumentationResolver<HttpFetcher> {
    /// Standard extractor registry over a real HTTP client.
    pub fn http(settings: &ResolverSettings, credentials: &GithubCredentials) -> Result<Self> {
        Ok(Self::new(
            ExtractorRegistry::new(settings, credentials)?,
            HttpFetcher::new(settings)?,
        ))
    }
}

impl<F: ContentFetcher> DocumentationResolver<F> {
    pub fn new(registry: ExtractorRegistry, fetcher: F) -> Self {
        Self { registry, fetcher }
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn is_recognized(&self, url: &str) -> bool {
        self.registry.is_recognized(url)
    }

    /// Resolves `url` to an HTML fragment. Never fails:
    /// - blank URL: the "no documentation" notice, nothing fetched,
    /// - unrecognized URL, fetch failure, or malformed upstream content: a link to `url`,
    /// - zero search results: the "no documentation" notice,
    /// - otherwise the cleaned content.
    pub async fn resolve(&self, url: &str) -> String {
        if url.trim().is_empty() {
            return no_documentation_found();
        }
        let Some(selection) = self.registry.select(url) else {
            return external_documentation(url);
        };

        let fetched = match self.fetcher.fetch(&selection.request).await {
            Ok(fetched) => fetched,
            Err(error) => {
                tracing::warn!(
                    "Unable to fetch documentation for {} from {}: {}",
                    url,
                    redact_url(&selection.request.url),
                    error
                );
                return external_documentation(url);
            }
        };

        match selection.extractor.extract_html(&fetched.body, url, &selection.matched) {
            Ok(Extracted::Content(html)) => html,
            Ok(Extracted::NoDocumentation) => {
                tracing::debug!("No {} documentation found for {}", selection.extractor.kind(), url);
                no_documentation_found()
            }
            Err(error) => {
                tracing::warn!(
                    "Unexpected {} content for {} (fetched from {}): {}",
                    selection.extractor.kind(),
                    url,
                    redact_url(&fetched.url),
                    error
                );
                external_documentation(url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::confluence_search_url;
    use crate::fetch::mock::MockFetcher;
    use crate::fragments::NO_DOCUMENTATION_FOUND;

    fn resolver(fetcher: MockFetcher) -> DocumentationResolver<MockFetcher> {
        let registry = ExtractorRegistry::new(&ResolverSettings::default(), &GithubCredentials::default()).unwrap();
        DocumentationResolver::new(registry, fetcher)
    }

    #[tokio::test]
    async fn test_blank_url_fetches_nothing() {
        let resolver = resolver(MockFetcher::new());
        assert_eq!(resolver.resolve("").await, NO_DOCUMENTATION_FOUND);
        assert_eq!(resolver.resolve("  \t").await, NO_DOCUMENTATION_FOUND);
        assert_eq!(resolver.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_unrecognized_url_links_out() {
        let resolver = resolver(MockFetcher::new());
        assert_eq!(resolver.resolve("https://www.example.com").await, external_documentation("https://www.example.com"));
        assert_eq!(resolver.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_links_out() {
        let url = "https://wiki.jenkins.io/display/JENKINS/Git+Plugin";
        let mut fetcher = MockFetcher::new();
        fetcher.add_status(&confluence_search_url("https://wiki.jenkins.io", "Git+Plugin"), 500);
        let resolver = resolver(fetcher);
        assert_eq!(resolver.resolve(url).await, external_documentation(url));
        assert_eq!(resolver.fetcher().calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_content_links_out() {
        let url = "https://wiki.jenkins.io/x/GAAHAQ";
        let resolver = resolver(MockFetcher::with_body(url, "<html><body><p>Log in</p></body></html>"));
        assert_eq!(resolver.resolve(url).await, external_documentation(url));
    }
}
