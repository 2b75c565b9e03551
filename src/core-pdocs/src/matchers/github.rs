use regex::Regex;

use crate::errors::Result;
use crate::matchers::{MatchResult, SourceKind, UrlMatcher};

/// A document inside a GitHub repository. Immutable once matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubLocation {
    org: String,
    repo: String,
    branch: String,
    /// True when the URL named the branch rather than relying on the default.
    explicit_branch: bool,
    /// Directory within the repository, with leading and trailing slash.
    directory: String,
    /// Path of the file within the repository; `None` for the README.
    file_path: Option<String>,
}

impl GithubLocation {
    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn has_explicit_branch(&self) -> bool {
        self.explicit_branch
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }
}

/// `https?://github.com/<org>/<repo>(.git|/tree/<branch>)?/?`
#[derive(Debug, Clone)]
pub struct GithubReadmeMatcher {
    pattern: Regex,
    default_branch: String,
}

impl GithubReadmeMatcher {
    pub fn new(default_branch: &str) -> Result<Self> {
        let pattern = Regex::new(r"^https?://github\.com/([^/]+)/([^/.]+)(?:\.git|/tree/([^/]+))?/?$")?;
        Ok(Self {
            pattern,
            default_branch: default_branch.to_string(),
        })
    }
}

impl UrlMatcher for GithubReadmeMatcher {
    fn kind(&self) -> SourceKind {
        SourceKind::GithubReadme
    }

    fn find(&self, url: &str) -> Option<MatchResult> {
        let captures = self.pattern.captures(url)?;
        let branch = captures.get(3).map(|m| m.as_str().to_string());
        Some(MatchResult::Github(GithubLocation {
            org: captures[1].to_string(),
            repo: captures[2].to_string(),
            explicit_branch: branch.is_some(),
            branch: branch.unwrap_or_else(|| self.default_branch.clone()),
            directory: "/".to_string(),
            file_path: None,
        }))
    }
}

/// `https?://github.com/<org>/<repo>/blob/<branch>/<path>.(md|adoc)`
#[derive(Debug, Clone)]
pub struct GithubContentsMatcher {
    pattern: Regex,
}

impl GithubContentsMatcher {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"^https?://github\.com/([^/]+)/([^/.]+)/blob/([^/]+)/(.+\.(?:md|adoc))$")?;
        Ok(Self { pattern })
    }
}

impl UrlMatcher for GithubContentsMatcher {
    fn kind(&self) -> SourceKind {
        SourceKind::GithubContents
    }

    fn find(&self, url: &str) -> Option<MatchResult> {
        let captures = self.pattern.captures(url)?;
        let file_path = captures[4].to_string();
        let directory = match file_path.rfind('/') {
            Some(index) => format!("/{}", &file_path[..=index]),
            None => "/".to_string(),
        };
        Some(MatchResult::Github(GithubLocation {
            org: captures[1].to_string(),
            repo: captures[2].to_string(),
            branch: captures[3].to_string(),
            explicit_branch: true,
            directory,
            file_path: Some(file_path),
        }))
    }
}
