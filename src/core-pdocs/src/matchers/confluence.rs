use regex::Regex;

use crate::errors::{DocsError, Result};
use crate::matchers::{MatchResult, SourceKind, UrlMatcher};

fn host_alternation(hosts: &[String]) -> Result<String> {
    if hosts.is_empty() {
        return Err(DocsError::Config("at least one wiki host is required".to_string()));
    }
    Ok(hosts.iter().map(|h| regex::escape(h)).collect::<Vec<_>>().join("|"))
}

/// `https?://<wiki-host>/display/<space>/<title>/?`, case-insensitive.
#[derive(Debug, Clone)]
pub struct ConfluenceApiMatcher {
    pattern: Regex,
}

impl ConfluenceApiMatcher {
    pub fn new(hosts: &[String]) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(?i)^https?://(?:{})/display/([^/?#]+)/([^/?#]+)/?$",
            host_alternation(hosts)?
        ))?;
        Ok(Self { pattern })
    }
}

impl UrlMatcher for ConfluenceApiMatcher {
    fn kind(&self) -> SourceKind {
        SourceKind::ConfluenceApi
    }

    fn find(&self, url: &str) -> Option<MatchResult> {
        let captures = self.pattern.captures(url)?;
        Some(MatchResult::ConfluenceTitle {
            space: captures[1].to_string(),
            title: captures[2].to_string(),
        })
    }
}

/// Any URL on a wiki host, e.g. `/x/<id>` short links or `/pages/viewpage.action?pageId=…`.
/// The host is rewritten onto the canonical wiki origin; path and query are kept.
#[derive(Debug, Clone)]
pub struct ConfluenceDirectMatcher {
    pattern: Regex,
    base_url: String,
}

impl ConfluenceDirectMatcher {
    pub fn new(hosts: &[String], base_url: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(?i)^https?://(?:{})((?:[/?#].*)?)$",
            host_alternation(hosts)?
        ))?;
        Ok(Self {
            pattern,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl UrlMatcher for ConfluenceDirectMatcher {
    fn kind(&self) -> SourceKind {
        SourceKind::ConfluenceDirect
    }

    fn find(&self, url: &str) -> Option<MatchResult> {
        let captures = self.pattern.captures(url)?;
        Some(MatchResult::ConfluenceDirect {
            url: format!("{}{}", self.base_url, &captures[1]),
        })
    }
}
