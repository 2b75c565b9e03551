//! Rewrites relative `href`/`src` values to absolute URLs.

use markup5ever_rcdom::Handle;

use crate::clean::dom;

/// Schemes kept as they are. Any other value, `javascript:` included, is treated as
/// a path relative to the page.
const ABSOLUTE_SCHEMES: &[&str] = &["http:", "https:", "mailto:", "data:"];

/// Resolves `value` against `host` (scheme + host, no trailing slash) and `path`
/// (directory with leading and trailing slash).
///
/// Returns `None` when the value is already absolute, an in-page anchor, or empty.
///
/// ```
/// # use core_pdocs::clean::absolutize;
/// let host = "https://wiki.jenkins.io";
/// assert_eq!(absolutize("/x/abc", host, "/display/JENKINS/").as_deref(), Some("https://wiki.jenkins.io/x/abc"));
/// assert_eq!(absolutize("Other+Page", host, "/display/JENKINS/").as_deref(), Some("https://wiki.jenkins.io/display/JENKINS/Other+Page"));
/// assert_eq!(absolutize("#usage", host, "/"), None);
/// assert_eq!(absolutize("https://example.com", host, "/"), None);
/// ```
pub fn absolutize(value: &str, host: &str, path: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.starts_with('#') || has_absolute_scheme(value) {
        return None;
    }
    if let Some(rest) = value.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if value.starts_with('/') {
        return Some(format!("{host}{value}"));
    }
    Some(format!("{host}{path}{value}"))
}

fn has_absolute_scheme(value: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Applies [`absolutize`] to one attribute of one element.
pub fn replace_attribute(element: &Handle, attribute_name: &str, host: &str, path: &str) {
    if let Some(value) = dom::attr(element, attribute_name)
        && let Some(absolute) = absolutize(&value, host, path)
    {
        dom::set_attr(element, attribute_name, &absolute);
    }
}

/// Rewrites every `href` against `link_host` and every `src` against `asset_host`.
pub fn convert_links(root: &Handle, link_host: &str, asset_host: &str, path: &str) {
    let mut nodes = dom::descendants(root);
    nodes.insert(0, root.clone());
    for node in nodes {
        replace_attribute(&node, "href", link_host, path);
        replace_attribute(&node, "src", asset_host, path);
    }
}

/// Same host for links and assets.
pub fn convert_links_to_absolute(root: &Handle, host: &str, path: &str) {
    convert_links(root, host, host, path);
}
