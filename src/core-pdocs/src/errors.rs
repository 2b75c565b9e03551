//! Error types for the documentation resolution pipeline.

use thiserror::Error;

/// Main error type for documentation resolution operations.
///
/// None of these escape [`crate::DocumentationService::resolve_documentation`]:
/// the resolver turns every failure into one of the benign fallback fragments.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Transport failure: connect, timeout, or body read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("Unable to get content from {url} - returned status code {status}")]
    Status { url: String, status: u16 },

    /// Upstream answered 2xx with a blank body.
    #[error("Empty response body from {0}")]
    EmptyBody(String),

    /// The fetch succeeded but the expected structure is missing.
    #[error("Malformed upstream content: {0}")]
    MalformedContent(String),

    /// JSON decoding error
    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// HTML serialization error
    #[error("HTML serialization error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized HTML was not UTF-8
    #[error("HTML encoding error: {0}")]
    Html(#[from] std::string::FromUtf8Error),

    /// An environment variable holds an unusable value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Type alias for Result with DocsError
pub type Result<T> = std::result::Result<T, DocsError>;
