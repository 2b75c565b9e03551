//! End-to-end resolution through `DocumentationService` with canned upstream responses.

use core_pdocs::extractors::confluence_search_url;
use core_pdocs::fetch::mock::MockFetcher;
use core_pdocs::fragments::NO_DOCUMENTATION_FOUND;
use core_pdocs::{DocumentationService, GithubCredentials, ResolverSettings, external_documentation};
use scraper::{Html, Selector};

const WIKI_BASE: &str = "https://wiki.jenkins.io";
const GIT_PLUGIN: &str = "https://wiki.jenkins.io/display/JENKINS/Git+Plugin";
const JCASC: &str = "https://github.com/jenkinsci/configuration-as-code-plugin";
const JCASC_README_API: &str =
    "https://api.github.com/repos/jenkinsci/configuration-as-code-plugin/readme?client_id=id&client_secret=secret";

const WIKI_PAGE: &str = include_str!("fixtures/wiki_page.html");
const CONFLUENCE_SEARCH: &str = include_str!("fixtures/confluence_search.json");
const GITHUB_README: &str = include_str!("fixtures/github_readme.html");

fn service(fetcher: MockFetcher) -> DocumentationService<MockFetcher> {
    DocumentationService::new(
        &ResolverSettings::default(),
        &GithubCredentials::with_client("id", "secret"),
        fetcher,
    )
    .unwrap()
}

fn fetches(service: &DocumentationService<MockFetcher>) -> usize {
    service.cache().resolver().fetcher().calls()
}

/// Every `href` and `src` attribute value in the fragment.
fn link_values(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let mut values = Vec::new();
    for attribute in ["href", "src"] {
        let selector = Selector::parse(&format!("[{attribute}]")).unwrap();
        for element in fragment.select(&selector) {
            if let Some(value) = element.value().attr(attribute) {
                values.push(value.to_string());
            }
        }
    }
    values
}

fn assert_no_root_relative_links(html: &str) {
    for value in link_values(html) {
        assert!(!value.starts_with('/'), "link left relative: {value}");
    }
}

#[tokio::test]
async fn test_empty_url_has_no_documentation() {
    let service = service(MockFetcher::new());
    assert_eq!(service.resolve_documentation("").await, NO_DOCUMENTATION_FOUND);
    assert_eq!(fetches(&service), 0);
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn test_unrecognized_url_links_to_itself() {
    let service = service(MockFetcher::new());
    let html = service.resolve_documentation("https://www.example.com").await;
    assert_eq!(
        html,
        r#"<div>Documentation for this plugin is here: <a href="https://www.example.com">https://www.example.com</a></div>"#
    );
    assert_eq!(fetches(&service), 0);
    assert!(!service.cache().contains("https://www.example.com"));
}

#[tokio::test]
async fn test_confluence_page_is_cleaned() {
    let service = service(MockFetcher::with_body(
        &confluence_search_url(WIKI_BASE, "Git+Plugin"),
        CONFLUENCE_SEARCH,
    ));
    let html = service.resolve_documentation(GIT_PLUGIN).await;

    let fragment = Html::parse_fragment(&html);
    assert_eq!(fragment.select(&Selector::parse(".toc").unwrap()).count(), 0);
    assert!(!html.contains("Plugin Information"));
    assert!(html.contains(r#"<a href="https://wiki.jenkins.io/display/JENKINS/Git+Client+Plugin">"#));
    assert!(html.contains(r#"src="https://wiki.jenkins.io/download/attachments/37749162/git-config.png""#));
    assert!(html.contains(r#"<a href="http://git-scm.com/">"#));
    assert_no_root_relative_links(&html);
}

#[tokio::test]
async fn test_confluence_alias_host_is_scraped_from_canonical_host() {
    let url = "https://wiki.jenkins-ci.org/pages/viewpage.action?pageId=37749162";
    let service = service(MockFetcher::with_body(
        "https://wiki.jenkins.io/pages/viewpage.action?pageId=37749162",
        WIKI_PAGE,
    ));
    let html = service.resolve_documentation(url).await;

    assert!(!html.contains("Plugin Information"));
    assert!(!html.contains("class=\"toc\""));
    assert!(!html.contains("JENKINS-1234"));
    assert!(!html.contains("Dashboard"));
    assert!(!html.contains("<!--"));
    assert!(html.contains(r#"<a href="https://wiki.jenkins.io/display/JENKINS/Git+Client+Plugin">"#));
    assert!(html.contains(r#"<a href="https://wiki.jenkins.io/display/JENKINS/Pipeline+Plugin">"#));
    assert!(html.contains(r#"src="https://wiki.jenkins.io/images/icons/star.png""#));
    assert_no_root_relative_links(&html);
}

#[tokio::test]
async fn test_github_readme_is_cleaned() {
    let service = service(MockFetcher::with_body(JCASC_README_API, GITHUB_README));
    let html = service.resolve_documentation(JCASC).await;

    let fragment = Html::parse_fragment(&html);
    assert_eq!(fragment.select(&Selector::parse("h1").unwrap()).count(), 0);
    assert_eq!(fragment.select(&Selector::parse(".p-5").unwrap()).count(), 0);
    assert!(!html.contains("user-content-"));
    assert!(html.contains(r#"<h2 id="getting-started">"#));

    let blob = format!("{JCASC}/blob/master/");
    assert!(html.contains(&format!(r#"href="{blob}docs/seed-jobs.md""#)));
    assert!(html.contains(&format!(r#"href="{blob}docs/usageScenarios.md""#)));
    assert!(html.contains(&format!(r#"href="{blob}plugin/src/main/webapp/img/logo-head.svg""#)));
    assert!(html.contains(
        r#"src="https://cdn.jsdelivr.net/gh/jenkinsci/configuration-as-code-plugin@master/plugin/src/main/webapp/img/logo-head.svg""#
    ));
    for href in link_values(&html) {
        assert!(
            href.starts_with('#') || href.starts_with("https://"),
            "unexpected link: {href}"
        );
    }
    assert_no_root_relative_links(&html);
}

#[tokio::test]
async fn test_github_request_asks_for_html() {
    let service = service(MockFetcher::with_body(JCASC_README_API, GITHUB_README));
    service.resolve_documentation(JCASC).await;

    let requests = service.cache().resolver().fetcher().requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.iter().any(|(name, value)| name == "Accept" && value.contains("html")));
}

#[tokio::test]
async fn test_github_without_credentials_links_out() {
    let service = DocumentationService::new(
        &ResolverSettings::default(),
        &GithubCredentials::default(),
        MockFetcher::with_body(JCASC_README_API, GITHUB_README),
    )
    .unwrap();
    assert_eq!(service.resolve_documentation(JCASC).await, external_documentation(JCASC));
    assert_eq!(fetches(&service), 0);
}

#[tokio::test]
async fn test_zero_search_results_have_no_documentation() {
    let service = service(MockFetcher::with_body(
        &confluence_search_url(WIKI_BASE, "Git+Plugin"),
        r#"{"results": [], "start": 0, "limit": 25, "size": 0}"#,
    ));
    assert_eq!(service.resolve_documentation(GIT_PLUGIN).await, NO_DOCUMENTATION_FOUND);
}

#[tokio::test]
async fn test_upstream_error_links_out() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_status(JCASC_README_API, 403);
    let service = service(fetcher);
    assert_eq!(service.resolve_documentation(JCASC).await, external_documentation(JCASC));
}

#[tokio::test]
async fn test_empty_upstream_body_links_out() {
    let service = service(MockFetcher::with_body(&confluence_search_url(WIKI_BASE, "Git+Plugin"), "  "));
    assert_eq!(service.resolve_documentation(GIT_PLUGIN).await, external_documentation(GIT_PLUGIN));
}

#[tokio::test]
async fn test_invalid_search_json_links_out() {
    let service = service(MockFetcher::with_body(
        &confluence_search_url(WIKI_BASE, "Git+Plugin"),
        "<html>maintenance</html>",
    ));
    assert_eq!(service.resolve_documentation(GIT_PLUGIN).await, external_documentation(GIT_PLUGIN));
}
