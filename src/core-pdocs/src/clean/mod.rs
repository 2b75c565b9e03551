//! Shared HTML cleanup used by the extractors.

pub mod confluence;
pub mod dom;
pub mod github;
pub mod links;

pub use confluence::{WIKI_CONTENT_CLASS, clean_wiki_content, wrap_in_wiki_content};
pub use github::{BOOTSTRAP_PADDING_5, GithubHosts, clean_github_content};
pub use links::{absolutize, convert_links, convert_links_to_absolute, replace_attribute};
