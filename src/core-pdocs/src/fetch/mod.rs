//! HTTP retrieval of raw documentation content.

#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;

use async_trait::async_trait;
use reqwest::Client;

use crate::common::settings::ResolverSettings;
use crate::errors::{DocsError, Result};

/// `url` without its query string, for logs and error messages.
/// GitHub API URLs carry the client secret as a query parameter.
pub fn redact_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// One outbound GET: the API URL plus the headers the extractor asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// Fully buffered body of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub url: String,
    pub body: String,
}

/// Performs the GET for a [`FetchRequest`]. Non-2xx statuses and blank bodies are errors.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<Fetched>;
}

/// [`ContentFetcher`] backed by a shared `reqwest` client with bounded timeouts.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &ResolverSettings) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(settings.http_timeout)
            .timeout(settings.http_timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Fetched> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| DocsError::Http(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DocsError::Status {
                url: redact_url(&request.url).to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| DocsError::Http(e.without_url()))?;
        if body.trim().is_empty() {
            return Err(DocsError::EmptyBody(redact_url(&request.url).to_string()));
        }
        tracing::debug!("Fetched {} bytes from {}", body.len(), redact_url(&request.url));
        Ok(Fetched {
            url: request.url.clone(),
            body,
        })
    }
}
