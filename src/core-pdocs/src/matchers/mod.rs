//! URL recognition: one matcher per documentation source.

mod confluence;
mod github;

pub use confluence::{ConfluenceApiMatcher, ConfluenceDirectMatcher};
pub use github::{GithubContentsMatcher, GithubLocation, GithubReadmeMatcher};

/// The four supported documentation sources, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    ConfluenceApi,
    ConfluenceDirect,
    GithubReadme,
    GithubContents,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfluenceApi => write!(f, "confluence-api"),
            Self::ConfluenceDirect => write!(f, "confluence-direct"),
            Self::GithubReadme => write!(f, "github-readme"),
            Self::GithubContents => write!(f, "github-contents"),
        }
    }
}

/// Structural pieces pulled out of a recognized documentation URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// `/display/<space>/<title>` page, looked up through the REST title search.
    ConfluenceTitle { space: String, title: String },
    /// Any other wiki page, scraped as-is from the canonical wiki origin.
    ConfluenceDirect { url: String },
    Github(GithubLocation),
}

impl MatchResult {
    pub fn github(&self) -> Option<&GithubLocation> {
        match self {
            Self::Github(location) => Some(location),
            _ => None,
        }
    }
}

/// Decides whether a URL belongs to one source. A failed match is `None`, never a default.
pub trait UrlMatcher: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn find(&self, url: &str) -> Option<MatchResult>;

    fn is_match(&self, url: &str) -> bool {
        self.find(url).is_some()
    }
}
