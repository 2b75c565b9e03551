//! The two benign fragments every failure degrades to.

use crate::clean::dom;
use crate::errors::{DocsError, Result};

pub const EXTERNAL_DOCUMENTATION_PREFIX: &str = "Documentation for this plugin is here: ";
pub const NO_DOCUMENTATION_FOUND: &str = "<div>No documentation for this plugin could be found</div>";

const EXTERNAL_LINK_TEMPLATE: &str = r#"<div>Documentation for this plugin is here: <a href="">link</a></div>"#;

pub fn no_documentation_found() -> String {
    NO_DOCUMENTATION_FOUND.to_string()
}

/// Explanatory sentence followed by a link to `url`. Text and attribute are HTML-escaped.
///
/// ```
/// # use core_pdocs::external_documentation;
/// assert_eq!(
///     external_documentation("https://www.example.com"),
///     r#"<div>Documentation for this plugin is here: <a href="https://www.example.com">https://www.example.com</a></div>"#
/// );
/// ```
pub fn external_documentation(url: &str) -> String {
    render_external_link(url).unwrap_or_else(|error| {
        tracing::warn!("Unable to render documentation link for {}: {}", url, error);
        format!("<div>{}</div>", EXTERNAL_DOCUMENTATION_PREFIX.trim_end())
    })
}

fn render_external_link(url: &str) -> Result<String> {
    let document = dom::parse(EXTERNAL_LINK_TEMPLATE);
    let body = dom::elements_by_tag(&document.document, "body")
        .into_iter()
        .next()
        .ok_or_else(|| DocsError::MalformedContent("link template has no body".to_string()))?;
    let link = dom::elements_by_tag(&body, "a")
        .into_iter()
        .next()
        .ok_or_else(|| DocsError::MalformedContent("link template has no anchor".to_string()))?;
    dom::set_attr(&link, "href", url);
    dom::set_text(&link, url);
    dom::inner_html(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_documentation_escapes() {
        assert_eq!(
            external_documentation(r#"https://example.com/?a=1&b="2""#),
            concat!(
                r#"<div>Documentation for this plugin is here: "#,
                r#"<a href="https://example.com/?a=1&amp;b=&quot;2&quot;">"#,
                r#"https://example.com/?a=1&amp;b="2"</a></div>"#
            )
        );
    }

    #[test]
    fn test_no_documentation_found() {
        assert_eq!(
            no_documentation_found(),
            "<div>No documentation for this plugin could be found</div>"
        );
    }
}
