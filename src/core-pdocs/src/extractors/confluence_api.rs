use serde::Deserialize;

use crate::clean::{clean_wiki_content, wrap_in_wiki_content};
use crate::errors::Result;
use crate::extractors::{Extracted, Extractor};
use crate::matchers::{ConfluenceApiMatcher, MatchResult, SourceKind, UrlMatcher};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<WikiPage>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    #[serde(rename = "_links", default)]
    links: PageLinks,
    body: PageBody,
}

#[derive(Debug, Default, Deserialize)]
struct PageLinks {
    #[serde(default)]
    webui: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageBody {
    view: PageView,
}

#[derive(Debug, Deserialize)]
struct PageView {
    value: String,
}

/// REST search-by-title endpoint. `title` is inserted as it appears in the page URL.
pub fn confluence_search_url(wiki_base_url: &str, title: &str) -> String {
    format!("{wiki_base_url}/rest/api/content?expand=body.view&title={title}")
}

/// `/display/<space>/<title>` pages, fetched through the Confluence REST API.
pub struct ConfluenceApiExtractor {
    matcher: ConfluenceApiMatcher,
    wiki_base_url: String,
}

impl ConfluenceApiExtractor {
    pub fn new(hosts: &[String], wiki_base_url: &str) -> Result<Self> {
        Ok(Self {
            matcher: ConfluenceApiMatcher::new(hosts)?,
            wiki_base_url: wiki_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Extractor for ConfluenceApiExtractor {
    fn kind(&self) -> SourceKind {
        self.matcher.kind()
    }

    fn find(&self, url: &str) -> Option<MatchResult> {
        self.matcher.find(url)
    }

    fn api_url(&self, matched: &MatchResult) -> Option<String> {
        match matched {
            MatchResult::ConfluenceTitle { title, .. } => Some(confluence_search_url(&self.wiki_base_url, title)),
            _ => None,
        }
    }

    fn extract_html(&self, content: &str, url: &str, matched: &MatchResult) -> Result<Extracted> {
        let response: SearchResponse = serde_json::from_str(content)?;
        let Some(first) = response.results.first() else {
            return Ok(Extracted::NoDocumentation);
        };
        // the title search also returns localized copies of the page; keep the one the URL points at
        let page = response
            .results
            .iter()
            .find(|page| {
                page.links
                    .webui
                    .as_deref()
                    .is_some_and(|webui| !webui.is_empty() && url.contains(webui))
            })
            .unwrap_or(first);

        let path = match matched {
            MatchResult::ConfluenceTitle { space, .. } => format!("/display/{space}/"),
            _ => super::DEFAULT_WIKI_PATH.to_string(),
        };
        let html = clean_wiki_content(&wrap_in_wiki_content(&page.body.view.value), &self.wiki_base_url, &path)?;
        Ok(Extracted::Content(html))
    }
}
