//! Cleanup shared by both Confluence extractors.

use std::rc::Rc;

use markup5ever_rcdom::Handle;

use crate::clean::{dom, links};
use crate::errors::{DocsError, Result};

/// Class of the container holding the authored wiki page.
pub const WIKI_CONTENT_CLASS: &str = "wiki-content";
const PLUGIN_INFORMATION: &str = "Plugin Information";
const TOC_CLASS: &str = "toc";
const JIRA_ISSUES_CLASS: &str = "jira-issues";

/// Wraps a bare page body so [`clean_wiki_content`] can find its container.
pub fn wrap_in_wiki_content(html: &str) -> String {
    format!("<body class={WIKI_CONTENT_CLASS}>{html}</body>")
}

/// Extracts the wiki-content container from raw wiki HTML and strips the
/// generated parts:
/// - the `<table>` around any cell mentioning "Plugin Information",
/// - `.toc` tables of contents,
/// - `.jira-issues` macros,
/// - comments.
///
/// Every remaining relative `href`/`src` is resolved against `host` + `path`.
/// Returns the inner HTML of the container.
///
/// # Errors
///
/// [`DocsError::MalformedContent`] when the content is blank or has no wiki-content container.
pub fn clean_wiki_content(content: &str, host: &str, path: &str) -> Result<String> {
    if content.trim().is_empty() {
        return Err(DocsError::MalformedContent("can't clean empty wiki content".to_string()));
    }
    let document = dom::parse(content);
    let Some(wiki_content) = dom::first_by_class(&document.document, WIKI_CONTENT_CLASS) else {
        return Err(DocsError::MalformedContent(format!("{WIKI_CONTENT_CLASS} not found in content")));
    };

    remove_plugin_information(&wiki_content);
    for generated in dom::elements_by_class(&wiki_content, TOC_CLASS) {
        dom::remove(&generated);
    }
    for macro_block in dom::elements_by_class(&wiki_content, JIRA_ISSUES_CLASS) {
        dom::remove(&macro_block);
    }
    dom::remove_comments(&wiki_content);

    links::convert_links_to_absolute(&wiki_content, host, path);
    dom::inner_html(&wiki_content)
}

fn remove_plugin_information(wiki_content: &Handle) {
    let mut tables: Vec<Handle> = Vec::new();
    let cells: Vec<Handle> = dom::descendants(wiki_content)
        .into_iter()
        .filter(|node| is_cell(node) && dom::text_content(node).contains(PLUGIN_INFORMATION))
        .collect();
    for cell in cells.iter() {
        // an enclosing layout cell also "contains" the text of the panel nested in it
        let has_matching_inner_cell = dom::descendants(cell)
            .iter()
            .any(|inner| cells.iter().any(|c| Rc::ptr_eq(c, inner)));
        if has_matching_inner_cell {
            continue;
        }
        if let Some(table) = dom::ancestor_by_tag(cell, "table", wiki_content)
            && !tables.iter().any(|t| Rc::ptr_eq(t, &table))
        {
            tables.push(table);
        }
    }
    for table in tables {
        dom::remove(&table);
    }
}

fn is_cell(node: &Handle) -> bool {
    dom::is_element(node, "th") || dom::is_element(node, "td")
}
