//! # Content Extraction Module
//!
//! This module turns raw page HTML into content-focused Markdown. It is the
//! scrape half of the crate: the crawler hands over a page's HTML and URL,
//! and gets back the sanitized HTML and its Markdown rendering.
//!
//! ## Key Components
//!
//! - `TagPolicy`: Which elements to keep or strip, with a builder
//! - `clean_html` / `clean_document`: Strip page chrome, resolve `srcset`, drop classes
//! - `render_markdown`: Convert sanitized HTML to Markdown
//! - `scrape_page`: The full sanitize-then-convert pipeline for one page
//!
//! ## Features
//!
//! - Default catalogue of boilerplate selectors (navigation, footers, ads, cookie banners)
//! - Wildcard tag and class patterns alongside plain CSS selectors
//! - Main-content pass that spares wrappers around `#main`
//! - Responsive images collapsed to their highest-density source
//!
//! Every call works on its own document; nothing is shared between calls.

mod config;
mod error;
mod markdown;
mod sanitizer;

pub use config::{
    ALWAYS_REMOVED_TAGS, EXCLUDE_NON_MAIN_TAGS, FORCE_INCLUDE_MAIN_TAGS, TagPolicy,
    TagPolicyBuilder,
};
pub use error::ExtractError;
pub use markdown::{ScrapedPage, html_to_markdown, render_markdown, scrape_page};
pub use sanitizer::{clean_document, clean_html};
