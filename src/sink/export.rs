// src/sink/export.rs
// =============================================================================
// This module turns the collected URL set into shareable output.
//
// Two formats:
// - A plain text file, one URL per line, sorted lexicographically
//   (easy to diff between runs, easy to feed into other tools)
// - A JSON summary for --json (total count plus the sorted list)
//
// Rust concepts:
// - Sorting: HashSet has no order, so we sort on the way out
// - serde derive: #[derive(Serialize)] generates the JSON conversion
// =============================================================================

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::traverse::ArticleUrlSet;

// The collected set in stable lexicographic order
//
// Every output path (text file, JSON, download batch) goes through this
// so runs against the same archive produce identical output.
pub(crate) fn sorted_urls(articles: &ArticleUrlSet) -> Vec<String> {
    let mut urls: Vec<String> = articles.iter().cloned().collect();
    urls.sort_unstable();
    urls
}

// Writes the final URL set to a text file, one URL per line
pub fn write_url_list(articles: &ArticleUrlSet, path: &Path) -> Result<()> {
    let mut contents = String::new();
    for url in sorted_urls(articles) {
        contents.push_str(&url);
        contents.push('\n');
    }

    fs::write(path, contents).map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))
}

// The run summary printed by --json
//
// #[derive(Serialize)] lets serde_json turn this into
// {"total": 2, "urls": ["...", "..."]}
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub urls: Vec<String>,
}

impl RunSummary {
    pub fn from_articles(articles: &ArticleUrlSet) -> Self {
        let urls = sorted_urls(articles);
        Self {
            total: urls.len(),
            urls,
        }
    }
}
