//! URL parsing into tree segments

use tracing::trace;
use url::Url;

/// A URL split into the segments used as trie keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// `segments[0]` is the origin, the rest are non-empty path components
    pub segments: Vec<String>,

    /// The URL exactly as it was given
    pub original_url: String,

    /// False when the input is not an absolute URL; `segments` is then empty
    pub valid: bool,
}

impl ParsedUrl {
    fn invalid(raw: &str) -> Self {
        Self {
            segments: Vec::new(),
            original_url: raw.to_string(),
            valid: false,
        }
    }
}

/// Parse a raw URL into an origin segment followed by its path segments.
///
/// Query string and fragment are kept verbatim on the last path segment, or
/// become a segment of their own when the path is empty, so a page with a
/// query never collapses onto its origin. Never fails: anything that is not
/// an absolute URL comes back with `valid = false`.
pub fn parse_url(raw: &str) -> ParsedUrl {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            trace!("Skipping malformed URL '{}': {}", raw, e);
            return ParsedUrl::invalid(raw);
        }
    };

    let mut segments = vec![origin_of(&parsed)];
    let mut path: Vec<String> = parsed
        .path()
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let suffix = query_and_fragment(&parsed);
    if !suffix.is_empty() {
        match path.last_mut() {
            Some(last) => last.push_str(&suffix),
            None => path.push(suffix),
        }
    }

    segments.append(&mut path);
    ParsedUrl {
        segments,
        original_url: raw.to_string(),
        valid: true,
    }
}

/// `scheme://host[:port]`, the port only when it is not the scheme default
fn origin_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}

fn query_and_fragment(url: &Url) -> String {
    let mut suffix = String::new();
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        suffix.push('?');
        suffix.push_str(query);
    }
    if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
        suffix.push('#');
        suffix.push_str(fragment);
    }
    suffix
}
