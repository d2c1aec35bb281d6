//! HTML sanitizing: strip page chrome and normalize images before conversion

use ego_tree::{NodeId, NodeRef, Tree};
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::StrTendril;
use html5ever::{LocalName, Namespace, QualName};
use regex::RegexBuilder;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, instrument};

use crate::extract::config::{ALWAYS_REMOVED_TAGS, EXCLUDE_NON_MAIN_TAGS, TagPolicy};
use crate::extract::error::ExtractError;

/// Parse `html` as a full document and clean it with `policy`
pub fn clean_html(html: &str, policy: &TagPolicy) -> Result<String, ExtractError> {
    let mut document = Html::parse_document(html);
    clean_document(&mut document, policy)
}

/// Clean an already parsed document in place and serialize the result.
///
/// Steps run in a fixed order, each seeing the previous one's removals:
///
/// 1. narrow the body to clones of the include matches (if any)
/// 2. drop script, style, noscript and meta
/// 3. apply the policy's exclude entries
/// 4. main-content pass over the chrome catalogue
/// 5. point each `img[srcset]` at its highest-density source
/// 6. strip every `class` attribute
///
/// The document element itself is never removed; a selector that matches it
/// only affects its descendants.
///
/// # Errors
///
/// An invalid selector or wildcard pattern is reported before any output is
/// produced. A serialization failure is fatal to the call.
#[instrument(skip_all, fields(only_main_content = policy.only_main_content))]
pub fn clean_document(document: &mut Html, policy: &TagPolicy) -> Result<String, ExtractError> {
    if !policy.include_selectors.is_empty() {
        keep_only_included(document, &policy.include_selectors)?;
    }

    let ids = select_ids(document, &parse_selector(ALWAYS_REMOVED_TAGS)?);
    let removed = detach_all(document, ids);
    debug!("Removed {} script/style/noscript/meta elements", removed);

    for entry in &policy.exclude_selectors {
        let ids = exclude_matches(document, entry)?;
        let removed = detach_all(document, ids);
        if removed > 0 {
            debug!("Exclude '{}' removed {} elements", entry, removed);
        }
    }

    if policy.only_main_content {
        remove_page_chrome(document, &policy.force_include_selectors)?;
    }

    resolve_srcsets(document)?;
    strip_class_attributes(document);

    serialize_document(document)
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Ids of attached elements matching `selector`
fn select_ids(document: &Html, selector: &Selector) -> Vec<NodeId> {
    document
        .root_element()
        .select(selector)
        .map(|el| el.id())
        .collect()
}

/// Detach every node in `ids`, skipping the document element
fn detach_all(document: &mut Html, ids: Vec<NodeId>) -> usize {
    let root = document.root_element().id();
    let mut removed = 0;
    for id in ids.into_iter().filter(|id| *id != root) {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
            removed += 1;
        }
    }
    removed
}

/// Resolve one exclude entry to the elements it removes.
///
/// `*text*` is a case-insensitive pattern on the tag name, `*.name` removes
/// by class, anything else is a CSS selector.
fn exclude_matches(document: &Html, entry: &str) -> Result<Vec<NodeId>, ExtractError> {
    if entry.len() > 1 && entry.starts_with('*') && entry.ends_with('*') {
        let pattern = RegexBuilder::new(&entry[1..entry.len() - 1])
            .case_insensitive(true)
            .build()?;
        return Ok(document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| pattern.is_match(el.value().name()))
            .map(|el| el.id())
            .collect());
    }

    let selector = match entry.strip_prefix("*.") {
        Some(class) => parse_selector(&format!(".{}", class))?,
        None => parse_selector(entry)?,
    };
    Ok(select_ids(document, &selector))
}

/// Remove the chrome catalogue, sparing any element that shelters a
/// force-include match among its descendants
fn remove_page_chrome(document: &mut Html, force_include: &[String]) -> Result<(), ExtractError> {
    let shelters = force_include
        .iter()
        .map(|s| parse_selector(s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut removed = 0;
    for entry in EXCLUDE_NON_MAIN_TAGS {
        let selector = parse_selector(entry)?;
        let ids: Vec<NodeId> = document
            .root_element()
            .select(&selector)
            .filter(|el| {
                !shelters
                    .iter()
                    .any(|s| el.select(s).any(|found| found.id() != el.id()))
            })
            .map(|el| el.id())
            .collect();
        removed += detach_all(document, ids);
    }
    debug!("Main-content pass removed {} elements", removed);
    Ok(())
}

/// Owned copy of a subtree, used to clone nodes within the same tree
struct Snapshot {
    value: Node,
    children: Vec<Snapshot>,
}

impl Snapshot {
    fn of(node: NodeRef<'_, Node>) -> Self {
        Self {
            value: node.value().clone(),
            children: node.children().map(Snapshot::of).collect(),
        }
    }

    fn graft(self, tree: &mut Tree<Node>, parent: NodeId) {
        let Some(mut parent) = tree.get_mut(parent) else {
            return;
        };
        let id = parent.append(self.value).id();
        for child in self.children {
            child.graft(tree, id);
        }
    }
}

/// Replace the body's content with one `<div>` holding clones of every
/// element matched by `selectors`, in selector order
fn keep_only_included(document: &mut Html, selectors: &[String]) -> Result<(), ExtractError> {
    let mut kept = Vec::new();
    for s in selectors {
        let selector = parse_selector(s)?;
        kept.extend(
            document
                .root_element()
                .select(&selector)
                .map(|el| Snapshot::of(*el)),
        );
    }

    let body_selector = parse_selector("body")?;
    let Some(body) = document.root_element().select(&body_selector).next() else {
        return Ok(());
    };
    let body_id = body.id();
    let children: Vec<NodeId> = body.children().map(|c| c.id()).collect();
    for id in children {
        if let Some(mut child) = document.tree.get_mut(id) {
            child.detach();
        }
    }

    let container = Snapshot {
        value: container_element()?,
        children: kept,
    };
    debug!("Keeping {} included elements", container.children.len());
    container.graft(&mut document.tree, body_id);
    Ok(())
}

fn container_element() -> Result<Node, ExtractError> {
    let fragment = Html::parse_fragment("<div></div>");
    let div = parse_selector("div")?;
    fragment
        .select(&div)
        .next()
        .map(|el| Node::Element(el.value().clone()))
        .ok_or_else(|| ExtractError::InvalidSelector {
            selector: "div".to_string(),
            reason: "container element could not be built".to_string(),
        })
}

/// Point every `img[srcset]` at the highest-density candidate
fn resolve_srcsets(document: &mut Html) -> Result<(), ExtractError> {
    let selector = parse_selector("img[srcset]")?;
    let updates: Vec<(NodeId, String)> = document
        .root_element()
        .select(&selector)
        .filter_map(|img| {
            let element = img.value();
            let best = best_source(element.attr("srcset")?, element.attr("src"))?;
            Some((img.id(), best))
        })
        .collect();

    for (id, src) in updates {
        if let Some(mut node) = document.tree.get_mut(id) {
            if let Node::Element(element) = node.value() {
                let key = QualName::new(None, Namespace::from(""), LocalName::from("src"));
                element.attrs.insert(key, StrTendril::from_slice(&src));
            }
        }
    }
    Ok(())
}

/// Pick the highest-density URL from a `srcset` list.
///
/// Only `url Nx` candidates count; an unparseable density counts as 1. The
/// existing `src` joins as a density-1 candidate behind the explicit ones.
/// Returns `None` when the list has no usable candidate.
pub(crate) fn best_source(srcset: &str, src: Option<&str>) -> Option<String> {
    let mut candidates: Vec<(&str, f64)> = srcset
        .split(',')
        .filter_map(|candidate| {
            let mut parts = candidate.split_whitespace();
            let url = parts.next()?;
            let density = parts.next()?.strip_suffix('x')?;
            let density = density
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite() && *d > 0.0)
                .unwrap_or(1.0);
            Some((url, density))
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }
    if let Some(src) = src.filter(|s| !s.is_empty()) {
        candidates.push((src, 1.0));
    }

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.first().map(|(url, _)| url.to_string())
}

fn strip_class_attributes(document: &mut Html) {
    let ids: Vec<NodeId> = document.tree.nodes().map(|n| n.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            if let Node::Element(element) = node.value() {
                element.attrs.retain(|name, _| &*name.local != "class");
            }
        }
    }
}

fn serialize_document(document: &Html) -> Result<String, ExtractError> {
    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    serialize(&mut buf, document, opts)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_policy() -> TagPolicy {
        TagPolicy::builder()
            .exclude_selectors(Vec::new())
            .only_main_content(false)
            .build()
    }

    #[test]
    fn test_default_policy_strips_chrome() {
        let html = r#"<html><head><title>T</title></head><body>
            <nav><a href="/">Home</a></nav>
            <article><h1>Title</h1><p>Body text</p></article>
            <footer>Copyright</footer>
            <div class="cookie">Accept cookies</div>
        </body></html>"#;

        let cleaned = clean_html(html, &TagPolicy::default()).unwrap();
        assert!(cleaned.contains("<h1>Title</h1>"));
        assert!(cleaned.contains("Body text"));
        assert!(!cleaned.contains("Home"));
        assert!(!cleaned.contains("Copyright"));
        assert!(!cleaned.contains("Accept cookies"));
        assert!(!cleaned.contains("<title>"));
    }

    #[test]
    fn test_scripts_and_styles_always_removed() {
        let html = r#"<html><head><meta charset="utf-8"><style>p{}</style></head><body>
            <script>alert(1)</script><noscript>enable js</noscript><p>Keep</p>
        </body></html>"#;

        let cleaned = clean_html(html, &bare_policy()).unwrap();
        assert!(cleaned.contains("<p>Keep</p>"));
        assert!(!cleaned.contains("alert"));
        assert!(!cleaned.contains("enable js"));
        assert!(!cleaned.contains("<style>"));
        assert!(!cleaned.contains("<meta"));
    }

    #[test]
    fn test_include_selectors_narrow_body() {
        let html = r#"<html><body>
            <nav>Menu</nav>
            <article id="post"><p>First</p></article>
            <aside>Related</aside>
            <section class="extra"><p>Second</p></section>
        </body></html>"#;
        let policy = TagPolicy::builder()
            .include_selectors(vec!["article".to_string(), ".extra".to_string()])
            .exclude_selectors(Vec::new())
            .only_main_content(false)
            .build();

        let cleaned = clean_html(html, &policy).unwrap();
        assert!(cleaned.contains(
            r#"<body><div><article id="post"><p>First</p></article><section><p>Second</p></section></div></body>"#
        ));
        assert!(!cleaned.contains("Menu"));
        assert!(!cleaned.contains("Related"));
    }

    #[test]
    fn test_wildcard_tag_pattern() {
        let html = r#"<html><body>
            <header>Top</header><site-header>Custom</site-header><p>Content</p>
        </body></html>"#;
        let policy = TagPolicy::builder()
            .exclude_selectors(vec!["*HEADER*".to_string()])
            .only_main_content(false)
            .build();

        let cleaned = clean_html(html, &policy).unwrap();
        assert!(!cleaned.contains("Top"));
        assert!(!cleaned.contains("Custom"));
        assert!(cleaned.contains("<p>Content</p>"));
    }

    #[test]
    fn test_wildcard_class_pattern() {
        let html = r#"<html><body>
            <div class="promo big">Buy now</div><p class="lead">Content</p>
        </body></html>"#;
        let policy = TagPolicy::builder()
            .exclude_selectors(vec!["*.promo".to_string()])
            .only_main_content(false)
            .build();

        let cleaned = clean_html(html, &policy).unwrap();
        assert!(!cleaned.contains("Buy now"));
        assert!(cleaned.contains("<p>Content</p>"));
    }

    #[test]
    fn test_force_include_shelters_wrapper() {
        let html = r#"<html><body>
            <div class="sidebar"><div id="main"><p>Real content</p></div></div>
            <div class="sidebar"><p>Links</p></div>
        </body></html>"#;
        let policy = TagPolicy::builder()
            .exclude_selectors(Vec::new())
            .only_main_content(true)
            .build();

        let cleaned = clean_html(html, &policy).unwrap();
        assert!(cleaned.contains("Real content"));
        assert!(!cleaned.contains("Links"));
    }

    #[test]
    fn test_exclude_selectors_do_not_honor_force_include() {
        let html = r#"<html><body>
            <div class="sidebar"><div id="main"><p>Real content</p></div></div>
        </body></html>"#;

        let cleaned = clean_html(html, &TagPolicy::default()).unwrap();
        assert!(!cleaned.contains("Real content"));
    }

    #[test]
    fn test_srcset_picks_highest_density() {
        let html = r#"<html><body>
            <img src="fallback.jpg" srcset="a.jpg 1x, b.jpg 2x">
        </body></html>"#;

        let cleaned = clean_html(html, &bare_policy()).unwrap();
        assert!(cleaned.contains(r#"src="b.jpg""#));
        assert!(!cleaned.contains(r#"src="fallback.jpg""#));
    }

    #[test]
    fn test_malformed_srcset_leaves_image_untouched() {
        let html = r#"<html><body>
            <img src="fallback.jpg" srcset="a.jpg, b.jpg 480w">
        </body></html>"#;

        let cleaned = clean_html(html, &bare_policy()).unwrap();
        assert!(cleaned.contains(r#"src="fallback.jpg""#));
    }

    #[test]
    fn test_best_source() {
        assert_eq!(
            best_source("a.jpg 1x, b.jpg 3x, c.jpg 2x", Some("d.jpg")).as_deref(),
            Some("b.jpg")
        );
        // Explicit candidates win ties against src
        assert_eq!(best_source("a.jpg 1x", Some("d.jpg")).as_deref(), Some("a.jpg"));
        // Unparseable density counts as 1
        assert_eq!(best_source("a.jpg ?x", Some("d.jpg")).as_deref(), Some("a.jpg"));
        assert_eq!(best_source("a.jpg zx, b.jpg 2x", None).as_deref(), Some("b.jpg"));
        // Descriptors must end in a lowercase x
        assert_eq!(best_source("a.jpg 2X", None), None);
        assert_eq!(best_source("a.jpg 1.5x, b.jpg 1x", None).as_deref(), Some("a.jpg"));
        assert_eq!(best_source("", Some("d.jpg")), None);
        assert_eq!(best_source("a.jpg 480w", Some("d.jpg")), None);
    }

    #[test]
    fn test_class_attributes_stripped() {
        let html = r#"<html class="no-js"><body class="page">
            <div class="wrapper"><p class="lead" id="intro">Text</p></div>
        </body></html>"#;

        let cleaned = clean_html(html, &bare_policy()).unwrap();
        assert!(!cleaned.contains("class="));
        assert!(cleaned.contains(r#"<p id="intro">Text</p>"#));
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let policy = TagPolicy::builder()
            .exclude_selectors(vec!["div[[".to_string()])
            .build();

        match clean_html("<p>x</p>", &policy) {
            Err(ExtractError::InvalidSelector { selector, .. }) => assert_eq!(selector, "div[["),
            other => panic!("Expected InvalidSelector, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_wildcard_pattern_is_reported() {
        let policy = TagPolicy::builder()
            .exclude_selectors(vec!["*(*".to_string()])
            .build();

        assert!(matches!(
            clean_html("<p>x</p>", &policy),
            Err(ExtractError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_selector_matching_nothing_is_noop() {
        let policy = TagPolicy::builder()
            .exclude_selectors(vec!["#does-not-exist".to_string()])
            .only_main_content(false)
            .build();

        let cleaned = clean_html("<html><body><p>Same</p></body></html>", &policy).unwrap();
        assert_eq!(cleaned, "<html><head></head><body><p>Same</p></body></html>");
    }

    #[test]
    fn test_document_element_is_never_removed() {
        let policy = TagPolicy::builder()
            .exclude_selectors(vec!["html".to_string(), "p".to_string()])
            .only_main_content(false)
            .build();

        let cleaned = clean_html("<html><body><p>Gone</p></body></html>", &policy).unwrap();
        assert_eq!(cleaned, "<html><head></head><body></body></html>");
    }

    #[test]
    fn test_clean_document_handle() {
        let mut document = Html::parse_document("<html><body><nav>x</nav><p>y</p></body></html>");
        let cleaned = clean_document(&mut document, &TagPolicy::default()).unwrap();
        assert_eq!(cleaned, "<html><body><p>y</p></body></html>");
    }
}
