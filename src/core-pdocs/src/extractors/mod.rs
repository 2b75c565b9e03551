//! Turn a recognized documentation URL into an API request and, once fetched,
//! into clean embeddable HTML.

mod confluence_api;
mod confluence_direct;
mod github;

pub use confluence_api::{ConfluenceApiExtractor, confluence_search_url};
pub use confluence_direct::{ConfluenceDirectExtractor, DEFAULT_WIKI_PATH};
pub use github::{GITHUB_HTML_MEDIA_TYPE, GithubContentsExtractor, GithubExtractor, GithubReadmeExtractor};

use crate::common::{github_config::GithubCredentials, settings::ResolverSettings};
use crate::errors::Result;
use crate::fetch::FetchRequest;
use crate::matchers::{MatchResult, SourceKind};

/// Outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Content(String),
    /// The source answered but holds no page for this URL.
    NoDocumentation,
}

/// One documentation source: recognition, request construction, and cleanup.
pub trait Extractor: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn find(&self, url: &str) -> Option<MatchResult>;

    /// API URL to fetch for a match, or `None` when this source can't be queried.
    fn api_url(&self, matched: &MatchResult) -> Option<String>;

    /// Headers needed for content negotiation or authentication.
    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Cleans the fetched `content` for the documentation `url` it was fetched for.
    ///
    /// # Errors
    ///
    /// [`crate::DocsError::MalformedContent`] (or a decoding error) when the content
    /// doesn't have the expected structure.
    fn extract_html(&self, content: &str, url: &str, matched: &MatchResult) -> Result<Extracted>;
}

/// The extractor chosen for a URL, with its match and the request to send.
pub struct Selection<'a> {
    pub extractor: &'a dyn Extractor,
    pub matched: MatchResult,
    pub request: FetchRequest,
}

/// Extractors in registration order. The first that both matches a URL and can
/// build an API URL for it wins.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// ConfluenceApi, ConfluenceDirect, GithubReadme, GithubContents.
    pub fn new(settings: &ResolverSettings, credentials: &GithubCredentials) -> Result<Self> {
        Ok(Self::from_extractors(vec![
            Box::new(ConfluenceApiExtractor::new(&settings.wiki_hosts, &settings.wiki_base_url)?),
            Box::new(ConfluenceDirectExtractor::new(&settings.wiki_hosts, &settings.wiki_base_url)?),
            Box::new(GithubReadmeExtractor::readme(
                &settings.github_default_branch,
                credentials.clone(),
                &settings.github_api_base,
            )?),
            Box::new(GithubContentsExtractor::contents(credentials.clone(), &settings.github_api_base)?),
        ]))
    }

    pub fn from_extractors(extractors: Vec<Box<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    pub fn kinds(&self) -> Vec<SourceKind> {
        self.extractors.iter().map(|e| e.kind()).collect()
    }

    pub fn select(&self, url: &str) -> Option<Selection<'_>> {
        self.extractors.iter().find_map(|extractor| {
            let matched = extractor.find(url)?;
            let api_url = extractor.api_url(&matched)?;
            tracing::debug!("{} extractor selected for {}", extractor.kind(), url);
            Some(Selection {
                extractor: extractor.as_ref(),
                matched,
                request: FetchRequest::new(api_url).with_headers(extractor.headers()),
            })
        })
    }

    pub fn is_recognized(&self, url: &str) -> bool {
        self.select(url).is_some()
    }
}
