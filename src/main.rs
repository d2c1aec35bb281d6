//! # sitemark CLI
//!
//! Command-line access to the two sitemark transformations.
//!
//! - `tree`: Build a site tree from a newline-separated URL list
//! - `scrape`: Sanitize a saved HTML page and print it as Markdown
//!
//! Both subcommands print plain text by default and JSON with `--format json`.

mod telemetry;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sitemark::extract::{TagPolicy, scrape_page};
use sitemark::tree::{TreeNode, build_tree};
use tracing::{debug, instrument};

#[derive(Parser)]
#[command(author, version, about = "Site trees and clean Markdown from crawl results", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a site tree from a list of URLs
    Tree(TreeArgs),

    /// Convert a saved HTML page to Markdown
    Scrape(ScrapeArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Args, Debug)]
struct TreeArgs {
    /// File with one URL per line (stdin when omitted)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// HTML file to convert (stdin when omitted)
    input: Option<PathBuf>,

    /// URL the page was fetched from
    #[arg(short, long, default_value = "about:blank")]
    url: String,

    /// CSS selectors to keep (comma-separated)
    #[arg(short, long)]
    include: Option<String>,

    /// CSS selectors or wildcard patterns to remove (comma-separated)
    #[arg(short, long)]
    exclude: Option<String>,

    /// Skip the main-content pass
    #[arg(long)]
    all_content: bool,

    /// JSON policy file (includeTags, excludeTags, onlyMainContent)
    #[arg(long, conflicts_with_all = ["include", "exclude", "all_content"])]
    policy: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing_subscriber(cli.verbose);

    match cli.command {
        Commands::Tree(args) => tree_command(args),
        Commands::Scrape(args) => scrape_command(args),
    }
}

#[instrument]
fn tree_command(args: TreeArgs) -> anyhow::Result<()> {
    let input = read_input(args.input.as_deref())?;
    let urls: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();
    debug!("Read {} URLs", urls.len());

    let tree = build_tree(&urls);
    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
        Format::Text => {
            let mut out = String::new();
            render_tree(&tree, 0, &mut out);
            print!("{}", out);
        }
    }
    Ok(())
}

#[instrument]
fn scrape_command(args: ScrapeArgs) -> anyhow::Result<()> {
    let policy = match &args.policy {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read policy {}", path.display()))?;
            TagPolicy::from_json(&json)?
        }
        None => {
            let mut builder = TagPolicy::builder().only_main_content(!args.all_content);
            if let Some(include) = &args.include {
                builder = builder.include_selectors(split_list(include));
            }
            if let Some(exclude) = &args.exclude {
                builder = builder.exclude_selectors(split_list(exclude));
            }
            builder.build()
        }
    };

    let html = read_input(args.input.as_deref())?;
    let page = scrape_page(&args.url, &html, &policy)?;

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        Format::Text => println!("{}", page.markdown),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn render_tree(nodes: &[TreeNode], depth: usize, out: &mut String) {
    for node in nodes {
        let marker = if node.is_folder() { "▸" } else { "•" };
        out.push_str(&format!("{}{} {}  ({})\n", "  ".repeat(depth), marker, node.name, node.id));
        render_tree(node.children(), depth + 1, out);
    }
}
