//! Tunables for the resolution pipeline.

use std::time::Duration;

use crate::common::env_value::{TimeUnit, env_duration, env_list, env_positive, env_string};
use crate::errors::Result;

/// Entries expire this long after they were written.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);
/// Maximum number of distinct documentation URLs kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;
/// Applied to connecting and to the whole request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_WIKI_BASE_URL: &str = "https://wiki.jenkins.io";
pub const DEFAULT_WIKI_HOSTS: &[&str] = &["wiki.jenkins.io", "wiki.jenkins-ci.org"];
pub const DEFAULT_GITHUB_BRANCH: &str = "master";
pub const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub http_timeout: Duration,
    /// Canonical wiki origin, no trailing slash.
    pub wiki_base_url: String,
    /// Host names that are recognized as the wiki.
    pub wiki_hosts: Vec<String>,
    /// Branch used when a GitHub URL does not name one.
    pub github_default_branch: String,
    pub github_api_base: String,
    pub user_agent: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            wiki_base_url: DEFAULT_WIKI_BASE_URL.to_string(),
            wiki_hosts: DEFAULT_WIKI_HOSTS.iter().map(|h| h.to_string()).collect(),
            github_default_branch: DEFAULT_GITHUB_BRANCH.to_string(),
            github_api_base: GITHUB_API_BASE.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl ResolverSettings {
    /// Reads the DOCS_* environment variables, using the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            cache_ttl: env_duration(TimeUnit::Seconds, "DOCS_CACHE_TTL_SECS", defaults.cache_ttl.as_secs())?,
            cache_capacity: env_positive("DOCS_CACHE_CAPACITY", defaults.cache_capacity)?,
            http_timeout: env_duration(
                TimeUnit::Milliseconds,
                "DOCS_HTTP_TIMEOUT_MS",
                defaults.http_timeout.as_millis() as u64,
            )?,
            wiki_base_url: env_string("DOCS_WIKI_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.wiki_base_url),
            wiki_hosts: env_list("DOCS_WIKI_HOSTS", DEFAULT_WIKI_HOSTS),
            github_default_branch: env_string("DOCS_GITHUB_DEFAULT_BRANCH").unwrap_or(defaults.github_default_branch),
            github_api_base: defaults.github_api_base,
            user_agent: env_string("DOCS_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    pub fn with_cache(mut self, ttl: Duration, capacity: usize) -> Self {
        self.cache_ttl = ttl;
        self.cache_capacity = capacity;
        self
    }
}

fn default_user_agent() -> String {
    format!("plugin-docs/{}", env!("CARGO_PKG_VERSION"))
}
