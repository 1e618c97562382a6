// src/traverse/next_link.rs
// =============================================================================
// This module follows "next page" links from page to page.
//
// How it works:
// 1. Start at the given URL
// 2. Fetch the page and extract article links
// 3. Find the single "next" anchor (e.g. "a.next.page-numbers") and
//    resolve its href against the current page
// 4. Repeat until there is no next link, a fetch fails, a page is empty,
//    or the next link points somewhere we've already been
//
// Cycle protection:
// - Archives sometimes link their last page back to itself (or back to
//   page 1). Every fetched URL goes into a visited set, and a next link
//   that lands on a visited URL ends the run instead of looping forever.
//
// Rust concepts:
// - HashSet: O(1) membership checks for the visited set
// - Option<String>: "no next link" is a value, not an error
// - while let: Loop while there is a current URL to process
// =============================================================================

use std::collections::HashSet;

use scraper::Selector;

use super::{absorb_found, ArticleUrlSet, StopReason, Traversal, TraversalObserver};
use crate::extract;
use crate::fetch::PageSource;

// Follows the next-page chain from a starting URL
pub struct NextLinkTraversal {
    start_url: String,
    target_selector: Selector,
    next_selector: Selector,
}

impl NextLinkTraversal {
    pub fn new(start_url: String, target_selector: Selector, next_selector: Selector) -> Self {
        Self {
            start_url,
            target_selector,
            next_selector,
        }
    }
}

impl Traversal for NextLinkTraversal {
    async fn run<S: PageSource>(
        &self,
        source: &S,
        observer: &mut dyn TraversalObserver,
    ) -> ArticleUrlSet {
        let mut articles = ArticleUrlSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = Some(self.start_url.clone());

        while let Some(url) = current {
            // insert() returns false when the URL was already in the set,
            // which catches both self-referential next links and longer
            // cycles before any repeat fetch happens
            if !visited.insert(url.clone()) {
                observer.stopped(&StopReason::AlreadyVisited { url });
                break;
            }

            observer.page_started(&url);

            let doc = match source.fetch(&url).await {
                Ok(doc) => doc,
                Err(e) => {
                    observer.stopped(&StopReason::FetchFailed {
                        url,
                        message: e.to_string(),
                    });
                    break;
                }
            };

            let found = extract::extract_links(&doc, &self.target_selector, &url);
            if found.is_empty() {
                observer.stopped(&StopReason::NoLinksFound { url });
                break;
            }
            absorb_found(&mut articles, found, observer);

            // The next link is resolved against the page it appeared on,
            // so relative hrefs like "page/2/" work
            current = extract::find_next_url(&doc, &self.next_selector, &url);
            if current.is_none() {
                observer.stopped(&StopReason::NoNextLink);
            }
        }

        articles
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `while let Some(url) = current` do?
//    - Loops as long as current holds a URL, moving it into `url`
//    - Setting current to None (no next link) ends the loop naturally
//
// 2. Why check visited before fetching instead of after?
//    - The invariant is "never fetch the same URL twice"
//    - Checking first means a cycle costs zero extra requests
//
// 3. Why does AlreadyVisited exist as its own stop reason?
//    - A cycle and a missing next link both end the run, but they say
//      different things about the archive; the observer keeps them apart
// -----------------------------------------------------------------------------
