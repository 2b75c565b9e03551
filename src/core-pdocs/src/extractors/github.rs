use url::form_urlencoded;

use crate::clean::clean_github_content;
use crate::common::github_config::GithubCredentials;
use crate::errors::{DocsError, Result};
use crate::extractors::{Extracted, Extractor};
use crate::matchers::{GithubContentsMatcher, GithubReadmeMatcher, MatchResult, SourceKind, UrlMatcher};

/// Asks the GitHub API for rendered HTML instead of raw markdown.
pub const GITHUB_HTML_MEDIA_TYPE: &str = "application/vnd.github.v3.html";

/// GitHub README or file contents, rendered to HTML by the GitHub API.
///
/// Without a client id or token no API URL is produced, so the URL is treated as
/// unrecognized and linked to rather than fetched anonymously.
pub struct GithubExtractor<M> {
    matcher: M,
    credentials: GithubCredentials,
    api_base: String,
}

pub type GithubReadmeExtractor = GithubExtractor<GithubReadmeMatcher>;
pub type GithubContentsExtractor = GithubExtractor<GithubContentsMatcher>;

impl GithubExtractor<GithubReadmeMatcher> {
    pub fn readme(default_branch: &str, credentials: GithubCredentials, api_base: &str) -> Result<Self> {
        Ok(Self::with_matcher(GithubReadmeMatcher::new(default_branch)?, credentials, api_base))
    }
}

impl GithubExtractor<GithubContentsMatcher> {
    pub fn contents(credentials: GithubCredentials, api_base: &str) -> Result<Self> {
        Ok(Self::with_matcher(GithubContentsMatcher::new()?, credentials, api_base))
    }
}

impl<M: UrlMatcher> GithubExtractor<M> {
    pub fn with_matcher(matcher: M, credentials: GithubCredentials, api_base: &str) -> Self {
        Self {
            matcher,
            credentials,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

impl<M: UrlMatcher> Extractor for GithubExtractor<M> {
    fn kind(&self) -> SourceKind {
        self.matcher.kind()
    }

    fn find(&self, url: &str) -> Option<MatchResult> {
        self.matcher.find(url)
    }

    fn api_url(&self, matched: &MatchResult) -> Option<String> {
        if !self.credentials.is_configured() {
            return None;
        }
        let location = matched.github()?;

        let mut query = form_urlencoded::Serializer::new(String::new());
        let endpoint = match location.file_path() {
            Some(path) => {
                query.append_pair("ref", location.branch());
                format!("contents/{path}")
            }
            None => {
                if location.has_explicit_branch() {
                    query.append_pair("ref", location.branch());
                }
                "readme".to_string()
            }
        };
        for (key, value) in self.credentials.query_pairs() {
            query.append_pair(key, value);
        }
        let query = query.finish();

        let mut api_url = format!(
            "{}/repos/{}/{}/{}",
            self.api_base,
            location.org(),
            location.repo(),
            endpoint
        );
        if !query.is_empty() {
            api_url.push('?');
            api_url.push_str(&query);
        }
        Some(api_url)
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Accept".to_string(), GITHUB_HTML_MEDIA_TYPE.to_string())];
        headers.extend(self.credentials.authorization_header());
        headers
    }

    fn extract_html(&self, content: &str, url: &str, matched: &MatchResult) -> Result<Extracted> {
        let location = matched
            .github()
            .ok_or_else(|| DocsError::MalformedContent(format!("Invalid github URL {url}")))?;
        Ok(Extracted::Content(clean_github_content(content, location)?))
    }
}
