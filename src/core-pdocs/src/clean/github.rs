//! Cleanup of the rendered HTML returned by the GitHub contents/readme API.

use markup5ever_rcdom::Handle;

use crate::clean::{dom, links};
use crate::errors::{DocsError, Result};
use crate::matchers::GithubLocation;

/// Bootstrap class setting `!important` padding, which fights the catalog's own layout.
pub const BOOTSTRAP_PADDING_5: &str = "p-5";
/// GitHub prefixes rendered ids with this, which breaks in-page anchors.
const USER_CONTENT_PREFIX: &str = "user-content-";
const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Where relative references inside a GitHub document point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubHosts {
    /// Page links, e.g. `https://github.com/<org>/<repo>/blob/<branch>`.
    pub documentation: String,
    /// Images and other binary assets, served raw.
    pub assets: String,
}

impl GithubHosts {
    pub fn for_location(location: &GithubLocation) -> Self {
        Self {
            documentation: format!(
                "https://github.com/{}/{}/blob/{}",
                location.org(),
                location.repo(),
                location.branch()
            ),
            assets: format!(
                "https://cdn.jsdelivr.net/gh/{}/{}@{}",
                location.org(),
                location.repo(),
                location.branch()
            ),
        }
    }
}

/// Takes the first element of `<body>` as the document root, then:
/// - removes the top-level heading when it is the only `<h1>`,
/// - strips the `user-content-` id prefix,
/// - drops the [`BOOTSTRAP_PADDING_5`] class,
/// - removes comments,
/// - resolves `href` against the documentation host and `src` against the asset host.
///
/// Returns the root element's outer HTML.
pub fn clean_github_content(content: &str, location: &GithubLocation) -> Result<String> {
    let document = dom::parse(content);
    let root = dom::elements_by_tag(&document.document, "body")
        .first()
        .and_then(|body| dom::element_children(body).into_iter().next())
        .ok_or_else(|| DocsError::MalformedContent("GitHub content has no element in its body".to_string()))?;

    let top_level_headings = dom::elements_by_tag(&root, "h1");
    if let [heading] = top_level_headings.as_slice() {
        dom::remove(heading);
    }

    strip_user_content_ids(&root);

    let mut padded = dom::elements_by_class(&root, BOOTSTRAP_PADDING_5);
    if dom::has_class(&root, BOOTSTRAP_PADDING_5) {
        padded.push(root.clone());
    }
    for element in padded {
        dom::remove_class(&element, BOOTSTRAP_PADDING_5);
    }

    dom::remove_comments(&root);

    let hosts = GithubHosts::for_location(location);
    links::convert_links(&root, &hosts.documentation, &hosts.assets, location.directory());
    dom::outer_html(&root)
}

fn strip_user_content_ids(root: &Handle) {
    for element in dom::descendants(root) {
        let is_anchor_target = HEADINGS.iter().any(|h| dom::is_element(&element, h)) || dom::is_element(&element, "a");
        if !is_anchor_target {
            continue;
        }
        if let Some(id) = dom::attr(&element, "id")
            && id.contains(USER_CONTENT_PREFIX)
        {
            dom::set_attr(&element, "id", &id.replace(USER_CONTENT_PREFIX, ""));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{GithubContentsMatcher, GithubReadmeMatcher, UrlMatcher};
    use indoc::indoc;

    fn readme_location() -> GithubLocation {
        GithubReadmeMatcher::new("master")
            .unwrap()
            .find("https://github.com/jenkinsci/labelled-steps-plugin")
            .unwrap()
            .github()
            .unwrap()
            .clone()
    }

    const README: &str = indoc! {r##"
        <div id="readme" class="md" data-path="README.md"><article class="markdown-body entry-content container-lg p-5" itemprop="text">
        <h1><a id="user-content-labelled-steps" class="anchor" href="#labelled-steps"></a>Labelled Steps</h1>
        <p><a href="#usage">Jump to usage</a>, <a href="/docs/CHANGELOG.md">changelog</a>, <a href="CONTRIBUTING.md">contributing</a>.</p>
        <h2 id="user-content-usage">Usage</h2>
        <p><img src="docs/images/step.png" alt="step"> <img src="https://ci.jenkins.io/badge.svg"></p>
        <!-- comment -->
        </article></div>
    "##};

    #[test]
    fn test_clean_readme() {
        let cleaned = clean_github_content(README, &readme_location()).unwrap();
        assert!(!cleaned.contains("<h1"));
        assert!(!cleaned.contains("p-5"));
        assert!(!cleaned.contains("user-content-"));
        assert!(!cleaned.contains("<!--"));
        assert!(cleaned.starts_with(r#"<div id="readme""#));
        assert!(cleaned.contains(r##"<a href="#usage">"##));
        assert!(cleaned.contains(r#"<h2 id="usage">Usage</h2>"#));
        assert!(cleaned.contains(
            r#"href="https://github.com/jenkinsci/labelled-steps-plugin/blob/master/docs/CHANGELOG.md""#
        ));
        assert!(cleaned.contains(
            r#"href="https://github.com/jenkinsci/labelled-steps-plugin/blob/master/CONTRIBUTING.md""#
        ));
        assert!(cleaned.contains(
            r#"src="https://cdn.jsdelivr.net/gh/jenkinsci/labelled-steps-plugin@master/docs/images/step.png""#
        ));
        assert!(cleaned.contains(r#"src="https://ci.jenkins.io/badge.svg""#));
        assert!(cleaned.contains(r#"class="markdown-body entry-content container-lg""#));
    }

    #[test]
    fn test_multiple_top_level_headings_are_kept() {
        let html = "<div><h1>One</h1><p>x</p><h1>Two</h1></div>";
        let cleaned = clean_github_content(html, &readme_location()).unwrap();
        assert_eq!(cleaned, "<div><h1>One</h1><p>x</p><h1>Two</h1></div>");
    }

    #[test]
    fn test_contents_directory_is_used_for_relative_links() {
        let location = GithubContentsMatcher::new()
            .unwrap()
            .find("https://github.com/jenkinsci/folder-auth-plugin/blob/v1.2/docs/rest-api.adoc")
            .unwrap()
            .github()
            .unwrap()
            .clone();
        let html = r#"<div><a href="usage.adoc">u</a><img src="images/a.png"><a href="/README.md">r</a></div>"#;
        let cleaned = clean_github_content(html, &location).unwrap();
        assert_eq!(
            cleaned,
            concat!(
                r#"<div><a href="https://github.com/jenkinsci/folder-auth-plugin/blob/v1.2/docs/usage.adoc">u</a>"#,
                r#"<img src="https://cdn.jsdelivr.net/gh/jenkinsci/folder-auth-plugin@v1.2/docs/images/a.png">"#,
                r#"<a href="https://github.com/jenkinsci/folder-auth-plugin/blob/v1.2/README.md">r</a></div>"#
            )
        );
    }

    #[test]
    fn test_clean_github_content_is_idempotent() {
        let once = clean_github_content(README, &readme_location()).unwrap();
        let twice = clean_github_content(&once, &readme_location()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let result = clean_github_content("just text", &readme_location());
        assert!(matches!(result, Err(DocsError::MalformedContent(_))));
    }
}
