// src/extract/links.rs
// =============================================================================
// This module pulls URLs out of parsed archive pages.
//
// We use the `scraper` crate which:
// - Supports CSS selectors for finding elements (tags, classes, attributes,
//   combinators - whatever the user passes as --target-selector)
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve relative hrefs against the page they appeared on
// - Normalize URLs the same way a browser would
//
// Rust concepts:
// - HashSet: Deduplicated collection of found URLs
// - Option<T>: For hrefs that may be missing or unresolvable
// - Iterators: For walking selector matches in document order
// =============================================================================

use anyhow::{anyhow, Result};
use scraper::Selector;
use std::collections::HashSet;
use url::Url;

use crate::fetch::ParsedPage;

// Parses a user-supplied CSS selector
//
// Selector strings come straight from the command line, so a parse
// failure is a configuration error we report before fetching anything.
//
// Example:
//   parse_selector("h2.entry-title a") -> Ok(Selector)
//   parse_selector("h2..") -> Err("Invalid CSS selector ...")
pub fn parse_selector(input: &str) -> Result<Selector> {
    Selector::parse(input).map_err(|e| anyhow!("Invalid CSS selector '{}': {}", input, e))
}

// Extracts all matching links from a page
//
// Parameters:
//   page: the parsed page to search
//   selector: which anchors count as articles (e.g. "h2.entry-title a")
//   base_url: the URL of the page itself (for resolving relative links)
//
// Returns: HashSet<String> of absolute URLs
//
// Matches without an href, and hrefs that cannot be resolved, are
// silently skipped - a half-broken listing page is normal on old
// archives and shouldn't end the run.
//
// Example:
//   html = "<a class='post' href='/story-1'>One</a>"
//   selector = "a.post", base_url = "https://example.com/archive"
//   result = {"https://example.com/story-1"}
pub fn extract_links(page: &ParsedPage, selector: &Selector, base_url: &str) -> HashSet<String> {
    let mut found = HashSet::new();

    // Parse the base URL once so every href can be joined against it
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(_) => {
            // Without a valid base we can't resolve relative links
            eprintln!("Warning: Invalid base URL: {}", base_url);
            return found;
        }
    };

    for element in page.document().select(selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_url(&base, href) {
                found.insert(absolute_url);
            }
        }
    }

    found
}

// Finds the single "next page" link, if the page has one
//
// Parameters:
//   page: the parsed page to search
//   selector: which anchor is the next-page link (e.g. "a.next.page-numbers")
//   base_url: the URL of the page itself
//
// Returns: Some(absolute_url) of the first match in document order,
// or None when nothing matches or the match has no usable href.
// "No next link" is how a next-mode traversal ends normally.
pub fn find_next_url(page: &ParsedPage, selector: &Selector, base_url: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;

    // .next() takes the first match in document order; extra matches
    // further down the page are ignored
    let element = page.document().select(selector).next()?;
    let href = element.value().attr("href")?;

    resolve_url(&base, href)
}

// Resolves a possibly-relative URL to an absolute URL
//
// Parameters:
//   base: the base URL (the current page)
//   href: the href value (might be relative, might be absolute)
//
// Returns: Some(absolute_url) or None if invalid
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    // Try to parse href as a URL
    // If it's already absolute (has a scheme), this works
    // If it's relative, this fails, so we join it with base
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => {
            // Likely a relative URL, try joining with base
            match base.join(href) {
                Ok(url) => Some(url.to_string()),
                Err(_) => None, // Invalid URL, skip it
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why HashSet instead of Vec?
//    - Archive pages repeat links (sticky posts, sidebars, pagination)
//    - A set deduplicates as we insert, which is exactly the semantics
//      the collected result needs
//
// 2. What does document order mean for find_next_url?
//    - select() yields matches in the order they appear in the HTML
//    - .next() on that iterator is therefore "the first one on the page"
//
// 3. Why is the selector a parameter instead of a constant?
//    - Every archive marks up its listings differently
//    - The user tells us what an article anchor looks like on their site
//    - That's also why parse_selector returns Result: user input can be
//      malformed, and we'd rather fail before the first request
//
// 4. What does url.join() do?
//    - Resolves relative URLs the way a browser does
//    - Keeps query strings and fragments intact
//    - Example: "https://example.com/a/" + "../b?x=1" =
//      "https://example.com/b?x=1"
// -----------------------------------------------------------------------------
