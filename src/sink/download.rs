// src/sink/download.rs
// =============================================================================
// This module mirrors collected URLs to local disk.
//
// How it works:
// 1. Derive a filename for each URL from the last segment of its path
//    (appending .html when the segment has no such suffix)
// 2. Skip URLs whose file already exists in the output directory
// 3. Invoke wget, one URL at a time, to do the actual transfer
// 4. Count failures per URL and keep going - one dead article should
//    not abort the rest of the batch
//
// Why shell out to wget instead of reusing our HTTP client?
// - wget is the tool archivists already trust for mirroring
// - Its behavior (timeouts, retries, TLS quirks) is battle-tested
// - The scraper's job ends at producing the URL set; mirroring is
//   delegated
//
// Rust concepts:
// - tokio::process::Command: Spawning child processes without blocking
//   the async runtime
// - PathBuf/Path: OS-aware path manipulation
// - match guards: Distinguishing "wget failed" from "wget missing"
// =============================================================================

use anyhow::{anyhow, Result};
use std::path::Path;
use tokio::process::Command;
use url::Url;

use super::export::sorted_urls;
use crate::traverse::ArticleUrlSet;

// What happened to one batch of downloads
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// URLs fetched to disk by wget
    pub downloaded: usize,
    /// URLs skipped because their file already existed
    pub skipped: usize,
    /// URLs whose download failed (reported, not fatal)
    pub failed: usize,
}

// Downloads every collected URL into the output directory
//
// Failures are aggregated into the report instead of aborting the batch;
// only being unable to create the output directory is an error, because
// then no download could succeed anyway.
pub async fn download_all(articles: &ArticleUrlSet, output_dir: &Path) -> Result<DownloadReport> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| anyhow!("Failed to create {}: {}", output_dir.display(), e))?;

    let mut report = DownloadReport::default();

    // Sorted order keeps reruns and their logs comparable
    for url in sorted_urls(articles) {
        let target = output_dir.join(derive_filename(&url));

        if target.exists() {
            println!("⏭️  Already have {}, skipping", target.display());
            report.skipped += 1;
            continue;
        }

        match run_wget(&url, &target).await {
            Ok(()) => {
                println!("⬇️  Downloaded {}", url);
                report.downloaded += 1;
            }
            Err(e) => {
                eprintln!("❌ {}: {}", url, e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

// Derives a local filename from a URL
//
// The name is the last segment of the URL path (query string and
// fragment excluded), with .html appended unless the segment already
// ends in .html.
//
// Examples:
//   "https://a.com/blog/my-post/" -> "my-post.html"
//   "https://a.com/blog/doc.html" -> "doc.html" (no double suffix)
//   "https://a.com/"              -> "index.html"
fn derive_filename(url: &str) -> String {
    // A trailing slash would leave us with an empty last segment
    let trimmed = url.trim_end_matches('/');

    // Prefer proper URL parsing so "?id=7" never ends up in a filename;
    // fall back to plain string splitting for unparseable input
    let last_segment = match Url::parse(trimmed) {
        Ok(parsed) => parsed.path().rsplit('/').next().unwrap_or("").to_string(),
        Err(_) => trimmed.rsplit('/').next().unwrap_or("").to_string(),
    };

    if last_segment.is_empty() {
        // The site root has no path segment to name the file after
        return "index.html".to_string();
    }

    if last_segment.ends_with(".html") {
        last_segment
    } else {
        format!("{}.html", last_segment)
    }
}

// Runs one wget transfer into the target file
//
// The caller has already checked that the target doesn't exist, so we
// pin the output name with -O rather than relying on wget's own
// no-clobber handling.
async fn run_wget(url: &str, target: &Path) -> Result<()> {
    let output = Command::new("wget")
        .arg("-q")
        .arg("-O")
        .arg(target)
        .arg(url)
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => {
            // With -O wget leaves an empty file behind on failure;
            // remove it so a rerun retries instead of skipping
            let _ = std::fs::remove_file(target);
            let stderr = String::from_utf8_lossy(&out.stderr);
            Err(anyhow!("wget exited with {}: {}", out.status, stderr.trim()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(anyhow!("wget not found (is it installed?)"))
        }
        Err(e) => Err(anyhow!("Failed to run wget: {}", e)),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is tokio::process::Command?
//    - The async twin of std::process::Command
//    - .output().await waits for the child without blocking the runtime
//
// 2. What is a match guard?
//    - The `if` inside a match arm: `Ok(out) if out.status.success()`
//    - Lets one pattern split on a runtime condition
//
// 3. Why does run_wget take the target path instead of deriving it?
//    - The caller needs the path too, for the existence check
//    - Deriving it twice would invite the two copies to drift apart
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        assert_eq!(derive_filename("https://a.com/blog/my-post/"), "my-post.html");
    }

    #[test]
    fn test_html_suffix_not_doubled() {
        assert_eq!(derive_filename("https://a.com/blog/doc.html"), "doc.html");
    }

    #[test]
    fn test_suffix_added_to_bare_segment() {
        assert_eq!(derive_filename("https://a.com/blog/my-post"), "my-post.html");
    }

    #[test]
    fn test_query_string_excluded() {
        assert_eq!(derive_filename("https://a.com/story?id=7"), "story.html");
    }

    #[test]
    fn test_site_root_becomes_index() {
        assert_eq!(derive_filename("https://a.com/"), "index.html");
    }

    #[tokio::test]
    async fn test_existing_file_skipped_without_running_wget() {
        let dir = std::env::temp_dir().join("archive-scraper-download-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("my-post.html"), "cached copy").unwrap();

        let articles: ArticleUrlSet = ["https://a.com/blog/my-post/".to_string()]
            .into_iter()
            .collect();

        let report = download_all(&articles, &dir).await.unwrap();

        assert_eq!(
            report,
            DownloadReport {
                downloaded: 0,
                skipped: 1,
                failed: 0
            }
        );
        // The cached copy is untouched
        assert_eq!(
            std::fs::read_to_string(dir.join("my-post.html")).unwrap(),
            "cached copy"
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
