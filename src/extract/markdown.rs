//! Markdown rendering and the per-page scrape pipeline

use html2md::parse_html;
use scraper::{Html, Node};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::extract::config::TagPolicy;
use crate::extract::error::ExtractError;
use crate::extract::sanitizer::clean_html;

/// Scrape output for a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// URL of the page
    pub url: String,

    /// The page HTML after sanitizing
    pub html: String,

    /// The sanitized HTML converted to Markdown
    pub markdown: String,
}

/// Convert already sanitized HTML to Markdown.
///
/// Comments are dropped first; the conversion itself is html2md's, which
/// emits fenced code blocks and pipe tables.
pub fn render_markdown(sanitized_html: &str) -> String {
    let without_comments = strip_comments(sanitized_html);
    parse_html(&without_comments).trim().to_string()
}

/// Sanitize `html` with `policy`, then convert it to Markdown
pub fn html_to_markdown(html: &str, policy: &TagPolicy) -> Result<String, ExtractError> {
    let cleaned = clean_html(html, policy)?;
    Ok(render_markdown(&cleaned))
}

/// Run the full pipeline for one fetched page
#[instrument(skip(html, policy))]
pub fn scrape_page(url: &str, html: &str, policy: &TagPolicy) -> Result<ScrapedPage, ExtractError> {
    let cleaned = clean_html(html, policy)?;
    let markdown = render_markdown(&cleaned);
    debug!(
        "Scraped {}: {} bytes of HTML, {} bytes of Markdown",
        url,
        cleaned.len(),
        markdown.len()
    );

    Ok(ScrapedPage {
        url: url.to_string(),
        html: cleaned,
        markdown,
    })
}

fn strip_comments(html: &str) -> String {
    let mut fragment = Html::parse_fragment(html);
    let comments: Vec<_> = fragment
        .tree
        .nodes()
        .filter(|n| matches!(n.value(), Node::Comment(_)))
        .map(|n| n.id())
        .collect();
    if comments.is_empty() {
        return html.to_string();
    }

    for id in comments {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }
    fragment.root_element().inner_html()
}
