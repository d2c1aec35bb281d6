//! Site tree construction from a flat URL list

use tracing::{debug, instrument};

use super::parser::{ParsedUrl, parse_url};
use super::trie::{PrefixTrie, TrieNode};
use super::{NodeKind, TreeNode, rejoin_segments};

/// Build a site tree from a list of absolute URLs.
///
/// Malformed URLs are skipped. The longest common segment prefix of the
/// remaining URLs becomes a single root folder; when the URLs share nothing
/// (different origins) the top-level items are returned as a forest. A lone
/// URL keeps its last segment out of the prefix so it still renders as a
/// folder holding one file.
#[instrument(skip_all, fields(urls = urls.len()))]
pub fn build_tree<S: AsRef<str>>(urls: &[S]) -> Vec<TreeNode> {
    let parsed: Vec<ParsedUrl> = urls
        .iter()
        .map(|u| parse_url(u.as_ref()))
        .filter(|p| p.valid)
        .collect();

    if parsed.is_empty() {
        debug!("No valid URLs to build a tree from");
        return Vec::new();
    }

    let mut lcp = longest_common_prefix(parsed.iter().map(|p| p.segments.as_slice()));
    if parsed.len() == 1 && lcp.len() > 1 {
        lcp.pop();
    }
    debug!(
        "{} valid of {} URLs, common prefix has {} segments",
        parsed.len(),
        urls.len(),
        lcp.len()
    );

    let mut trie = PrefixTrie::new();
    for url in &parsed {
        trie.insert(&url.segments[lcp.len()..], &url.original_url);
    }

    let mut path = lcp.clone();
    let forest = trie_to_tree(trie.root(), &mut path);

    if lcp.is_empty() {
        return forest;
    }

    let name = match lcp.as_slice() {
        [.., last] if lcp.len() > 1 => last.clone(),
        _ => "/".to_string(),
    };
    vec![TreeNode {
        id: rejoin_segments(&lcp),
        name,
        kind: NodeKind::Folder,
        children: (!forest.is_empty()).then_some(forest),
        checked: false,
    }]
}

/// Longest sequence of segments that prefixes every input, compared exactly
fn longest_common_prefix<'a, I>(mut paths: I) -> Vec<String>
where
    I: Iterator<Item = &'a [String]>,
{
    let Some(first) = paths.next() else {
        return Vec::new();
    };

    let mut len = first.len();
    for path in paths {
        len = first
            .iter()
            .zip(path)
            .take(len)
            .take_while(|(a, b)| a == b)
            .count();
        if len == 0 {
            break;
        }
    }
    first[..len].to_vec()
}

/// Render the children of `node`; `path` holds the segments walked so far
/// and is restored before returning.
fn trie_to_tree(node: &TrieNode, path: &mut Vec<String>) -> Vec<TreeNode> {
    node.children()
        .iter()
        .map(|child| {
            path.push(child.segment.clone());

            // A page that prefixes deeper pages is a folder but keeps its own URL
            let id = match (&child.source_url, child.is_terminal) {
                (Some(url), true) => url.clone(),
                _ => rejoin_segments(path),
            };
            let (kind, children) = if child.has_children() {
                (NodeKind::Folder, Some(trie_to_tree(child, path)))
            } else {
                (NodeKind::File, None)
            };

            path.pop();
            TreeNode {
                id,
                name: if child.segment.is_empty() {
                    "/".to_string()
                } else {
                    child.segment.clone()
                },
                kind,
                children,
                checked: false,
            }
        })
        .collect()
}
