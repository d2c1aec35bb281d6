//! # sitemark - Site Trees and Clean Markdown from Crawl Results
//!
//! This crate holds the self-contained transformations a crawling service
//! applies to its results. The crawl itself (scheduling, fetching, sitemaps,
//! retries) belongs to the crawler; sitemark takes what it produces and
//! shapes it for presentation and storage.
//!
//! ## Features
//!
//! - Site tree: group a flat list of crawled URLs into folders and pages,
//!   folding the shared prefix into a single root
//! - Content extraction: strip navigation, ads and other chrome from page
//!   HTML and convert what remains to Markdown
//! - Pure, synchronous functions with no shared state, safe to call from
//!   any number of threads
//! - `tracing` instrumentation; the caller chooses the subscriber
//!
//! ## Example
//!
//! ```rust
//! use sitemark::extract::{TagPolicy, scrape_page};
//! use sitemark::tree::build_tree;
//!
//! fn main() -> sitemark::Result<()> {
//!     let tree = build_tree(&["https://a.com/docs/intro", "https://a.com/docs/setup"]);
//!     assert_eq!(tree[0].id, "https://a.com/docs");
//!
//!     let page = scrape_page(
//!         "https://a.com/docs/intro",
//!         "<html><body><nav>Menu</nav><p>Welcome</p></body></html>",
//!         &TagPolicy::default(),
//!     )?;
//!     assert_eq!(page.markdown, "Welcome");
//!     Ok(())
//! }
//! ```

mod error;

pub mod extract;
pub mod tree;

pub use error::{Error, Result};

/// Re-export of the most used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::extract::{ScrapedPage, TagPolicy, scrape_page};
    pub use crate::tree::{NodeKind, TreeNode, build_tree};
}
