use crate::clean::clean_wiki_content;
use crate::errors::Result;
use crate::extractors::{Extracted, Extractor};
use crate::matchers::{ConfluenceDirectMatcher, MatchResult, SourceKind, UrlMatcher};

/// Base path for relative wiki links when the page URL doesn't name a space.
pub const DEFAULT_WIKI_PATH: &str = "/display/JENKINS/";

/// Non-standard wiki URLs (`/x/<id>`, `/pages/viewpage.action?pageId=…`), scraped as HTML.
pub struct ConfluenceDirectExtractor {
    matcher: ConfluenceDirectMatcher,
    wiki_base_url: String,
}

impl ConfluenceDirectExtractor {
    pub fn new(hosts: &[String], wiki_base_url: &str) -> Result<Self> {
        Ok(Self {
            matcher: ConfluenceDirectMatcher::new(hosts, wiki_base_url)?,
            wiki_base_url: wiki_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Extractor for ConfluenceDirectExtractor {
    fn kind(&self) -> SourceKind {
        self.matcher.kind()
    }

    fn find(&self, url: &str) -> Option<MatchResult> {
        self.matcher.find(url)
    }

    fn api_url(&self, matched: &MatchResult) -> Option<String> {
        match matched {
            MatchResult::ConfluenceDirect { url } => Some(url.clone()),
            _ => None,
        }
    }

    fn extract_html(&self, content: &str, _url: &str, _matched: &MatchResult) -> Result<Extracted> {
        let html = clean_wiki_content(content, &self.wiki_base_url, DEFAULT_WIKI_PATH)?;
        Ok(Extracted::Content(html))
    }
}
