//! Resolves plugin documentation URLs (Confluence wiki pages, GitHub READMEs and
//! repository documents) into clean, embeddable HTML fragments.

pub mod cache;
pub mod clean;
pub mod common;
pub mod errors;
pub mod extractors;
pub mod fetch;
pub mod fragments;
pub mod matchers;
pub mod resolver;
pub mod service;

pub use cache::DocumentationCache;
pub use common::{github_config::GithubCredentials, logging::setup_logging, settings::ResolverSettings};
pub use errors::{DocsError, Result};
pub use extractors::{Extracted, Extractor, ExtractorRegistry};
pub use fetch::{ContentFetcher, FetchRequest, Fetched, HttpFetcher};
pub use fragments::{external_documentation, no_documentation_found};
pub use matchers::{GithubLocation, MatchResult, SourceKind, UrlMatcher};
pub use resolver::DocumentationResolver;
pub use service::DocumentationService;
