//! # Tag Policy Module
//!
//! Configuration for the HTML sanitizer: which elements to keep, which to
//! strip, and whether to run the main-content pass. Follows the same builder
//! pattern as the rest of the crate's configuration.
//!
//! ## Selector Forms
//!
//! - Literal CSS selectors (`nav`, `.sidebar`, `#footer`)
//! - Wildcard tag patterns (`*banner*`), matched case-insensitively against
//!   the tag name only
//! - Wildcard class patterns (`*.promo`), removing every element with that class

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Chrome and boilerplate selectors stripped by default
pub const EXCLUDE_NON_MAIN_TAGS: &[&str] = &[
    "footer",
    "nav",
    "aside",
    ".header",
    ".top",
    "#navbar",
    "navbar",
    ".navbar",
    "#sidebar",
    "sidebar",
    ".sidebar",
    ".footer",
    ".bottom",
    "#footer",
    ".side",
    ".aside",
    ".overlay",
    ".ad",
    ".ads",
    ".advert",
    "#ad",
    ".lang-selector",
    ".language",
    "#language-selector",
    ".social",
    ".social-media",
    ".social-links",
    "#social",
    ".menu",
    ".navigation",
    "#nav",
    ".breadcrumbs",
    "#breadcrumbs",
    ".share",
    "#share",
    ".widget",
    "#widget",
    ".cookie",
    "#cookie",
    "img",
    "svg",
    "head",
];

/// Containers that keep an otherwise-excluded wrapper alive
pub const FORCE_INCLUDE_MAIN_TAGS: &[&str] = &["#main"];

/// Elements removed regardless of policy
pub const ALWAYS_REMOVED_TAGS: &str = "script, style, noscript, meta";

fn owned(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(|s| s.to_string()).collect()
}

/// Which elements the sanitizer keeps and removes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPolicy {
    /// Selectors or wildcard patterns for elements to remove
    #[serde(rename = "excludeTags", default = "default_exclude")]
    pub exclude_selectors: Vec<String>,

    /// When non-empty, only elements matching these selectors are kept
    #[serde(rename = "includeTags", default)]
    pub include_selectors: Vec<String>,

    /// Selectors that shelter a wrapper from the main-content pass
    #[serde(rename = "forceIncludeTags", default = "default_force_include")]
    pub force_include_selectors: Vec<String>,

    /// Strip the chrome catalogue unless it wraps a force-include element
    #[serde(default = "default_only_main_content")]
    pub only_main_content: bool,
}

fn default_exclude() -> Vec<String> {
    owned(EXCLUDE_NON_MAIN_TAGS)
}

fn default_force_include() -> Vec<String> {
    owned(FORCE_INCLUDE_MAIN_TAGS)
}

fn default_only_main_content() -> bool {
    true
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self {
            exclude_selectors: default_exclude(),
            include_selectors: Vec::new(),
            force_include_selectors: default_force_include(),
            only_main_content: default_only_main_content(),
        }
    }
}

impl TagPolicy {
    /// Create a new builder
    pub fn builder() -> TagPolicyBuilder {
        TagPolicyBuilder::new()
    }

    /// Parse a policy from its JSON form (`includeTags`, `excludeTags`,
    /// `onlyMainContent`); missing fields take the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builder for TagPolicy
#[derive(Debug, Default)]
pub struct TagPolicyBuilder {
    policy: TagPolicy,
}

impl TagPolicyBuilder {
    /// Create a new builder with the default policy
    pub fn new() -> Self {
        Self {
            policy: TagPolicy::default(),
        }
    }

    /// Replace the exclude selectors
    pub fn exclude_selectors(mut self, selectors: Vec<String>) -> Self {
        self.policy.exclude_selectors = selectors;
        self
    }

    /// Replace the include selectors
    pub fn include_selectors(mut self, selectors: Vec<String>) -> Self {
        self.policy.include_selectors = selectors;
        self
    }

    /// Replace the force-include selectors
    pub fn force_include_selectors(mut self, selectors: Vec<String>) -> Self {
        self.policy.force_include_selectors = selectors;
        self
    }

    /// Set whether to run the main-content pass
    pub fn only_main_content(mut self, only_main_content: bool) -> Self {
        self.policy.only_main_content = only_main_content;
        self
    }

    /// Build the policy
    pub fn build(self) -> TagPolicy {
        self.policy
    }
}
