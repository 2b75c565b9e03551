//! Mock fetcher for testing
//!
//! Serves canned bodies keyed by request URL and counts every call,
//! without making real HTTP requests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::{DocsError, Result};
use crate::fetch::{ContentFetcher, FetchRequest, Fetched, redact_url};

/// Mock fetcher for testing
///
/// Can be configured to:
/// - Return a body for an exact URL
/// - Answer a URL with an HTTP status error
/// - Delay every response, to widen race windows in concurrency tests
///
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct MockFetcher {
    bodies: HashMap<String, String>,
    statuses: HashMap<String, u16>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    calls_by_url: Mutex<HashMap<String, usize>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers `url` with `body`
    pub fn with_body(url: &str, body: &str) -> Self {
        let mut fetcher = Self::new();
        fetcher.add_body(url, body);
        fetcher
    }

    pub fn add_body(&mut self, url: &str, body: &str) {
        self.bodies.insert(url.to_string(), body.to_string());
    }

    pub fn add_status(&mut self, url: &str, status: u16) {
        self.statuses.insert(url.to_string(), status);
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = Some(delay);
    }

    /// Total number of fetches, successful or not
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls_by_url
            .lock()
            .map(|calls| calls.get(url).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Fetched> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls_by_url.lock() {
            *calls.entry(request.url.clone()).or_insert(0) += 1;
        }
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = self.statuses.get(&request.url) {
            return Err(DocsError::Status {
                url: redact_url(&request.url).to_string(),
                status: *status,
            });
        }
        match self.bodies.get(&request.url) {
            Some(body) if body.trim().is_empty() => Err(DocsError::EmptyBody(redact_url(&request.url).to_string())),
            Some(body) => Ok(Fetched {
                url: request.url.clone(),
                body: body.clone(),
            }),
            None => Err(DocsError::Status {
                url: redact_url(&request.url).to_string(),
                status: 404,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_counts_calls() {
        let mut fetcher = MockFetcher::with_body("https://a.example", "<p>a</p>");
        fetcher.add_status("https://b.example", 503);

        let ok = fetcher.fetch(&FetchRequest::new("https://a.example")).await.unwrap();
        assert_eq!(ok.body, "<p>a</p>");
        assert!(matches!(
            fetcher.fetch(&FetchRequest::new("https://b.example")).await,
            Err(DocsError::Status { status: 503, .. })
        ));
        assert!(matches!(
            fetcher.fetch(&FetchRequest::new("https://c.example")).await,
            Err(DocsError::Status { status: 404, .. })
        ));

        assert_eq!(fetcher.calls(), 3);
        assert_eq!(fetcher.calls_for("https://a.example"), 1);
        assert_eq!(fetcher.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_status_error_hides_query_string() {
        let url = "https://api.github.com/repos/o/r/readme?client_id=id&client_secret=s3cr3t";
        let mut fetcher = MockFetcher::new();
        fetcher.add_status(url, 403);

        let error = fetcher.fetch(&FetchRequest::new(url)).await.unwrap_err();
        assert!(matches!(error, DocsError::Status { status: 403, .. }));
        assert!(!error.to_string().contains("s3cr3t"), "{error}");
        assert_eq!(fetcher.calls_for(url), 1);
    }
}
