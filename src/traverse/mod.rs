// src/traverse/mod.rs
// =============================================================================
// This module contains the traversal engine - the heart of the scraper.
//
// Submodules:
// - observer: Reports traversal events (pages, finds, stop decisions)
// - numbered: Walks a numbered page sequence ("?page=1", "?page=2", ...)
// - next_link: Follows the "next page" anchor from page to page
//
// Both strategies drive the same fetch -> parse -> extract -> dedup loop;
// they only differ in how the next page URL is chosen and when to stop.
// The Traversal trait is the common interface, selected by CLI subcommand.
//
// Rust concepts:
// - Traits: A shared capability (run) with two implementations
// - HashSet: Deduplicated accumulation of found URLs
// - Type aliases: ArticleUrlSet names the result collection
// =============================================================================

mod next_link;
mod numbered;
mod observer;

// Re-export public items from submodules
pub use next_link::NextLinkTraversal;
pub use numbered::NumberedTraversal;
pub use observer::{ConsoleObserver, StopReason, TraversalObserver};

use std::collections::HashSet;

use crate::fetch::PageSource;

// The accumulated result of a traversal run: absolute article URLs,
// deduplicated by exact string equality. Grows while the run proceeds,
// never shrinks, and is handed to the sinks when the run stops.
pub type ArticleUrlSet = HashSet<String>;

// A page-discovery strategy
//
// run() drives repeated fetch/extract cycles against the given page
// source and returns whatever accumulated before a stop condition hit.
// Failures never escape a run: a dead page or an empty page simply ends
// the traversal, and the caller still gets the URLs collected so far.
pub trait Traversal {
    async fn run<S: PageSource>(
        &self,
        source: &S,
        observer: &mut dyn TraversalObserver,
    ) -> ArticleUrlSet;
}

// Folds one page's extracted links into the accumulated set
//
// Only URLs we haven't seen on an earlier page are reported to the
// observer, so the "Found:" log lines match the final set exactly.
fn absorb_found(
    articles: &mut ArticleUrlSet,
    found: HashSet<String>,
    observer: &mut dyn TraversalObserver,
) {
    for url in found {
        if articles.insert(url.clone()) {
            observer.url_found(&url);
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of an if/else in main?
//    - Each mode stays independently testable
//    - Adding a third strategy later means one new impl, not a bigger
//      conditional
//
// 2. Why does run() not return Result?
//    - Stop conditions (end bound, dead page, empty page) are normal
//      outcomes, not errors
//    - The accumulated set is always a valid answer, even when the run
//      ended early
//
// 3. Why &mut dyn TraversalObserver?
//    - dyn = dynamic dispatch: any observer implementation fits
//    - The console observer prints; the test observer records
//    - &mut because observers accumulate state (the recorder's vectors)
// -----------------------------------------------------------------------------

// Canned pages and a recording observer for exercising traversals offline.
// Shared by the numbered and next-link test modules.
#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use anyhow::{anyhow, Result};

    use super::{StopReason, TraversalObserver};
    use crate::fetch::{PageSource, ParsedPage};

    // A fake page source backed by a URL -> HTML map
    //
    // Unknown URLs behave like a dead page (fetch failure), and every
    // fetch is logged so tests can assert exact attempt counts and order.
    pub struct FakePages {
        pages: HashMap<String, String>,
        fetches: RefCell<Vec<String>>,
    }

    impl FakePages {
        pub fn new() -> Self {
            Self {
                pages: HashMap::new(),
                fetches: RefCell::new(Vec::new()),
            }
        }

        // Builder-style: add a canned page
        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.borrow().len()
        }

        pub fn fetched(&self) -> Vec<String> {
            self.fetches.borrow().clone()
        }
    }

    impl PageSource for FakePages {
        async fn fetch(&self, url: &str) -> Result<ParsedPage> {
            self.fetches.borrow_mut().push(url.to_string());
            match self.pages.get(url) {
                Some(html) => Ok(ParsedPage::from_html(html)),
                None => Err(anyhow!("Error accessing {}: HTTP 404 Not Found", url)),
            }
        }
    }

    // Records every traversal event instead of printing it
    #[derive(Default)]
    pub struct RecordingObserver {
        pub pages: Vec<String>,
        pub found: Vec<String>,
        pub stops: Vec<StopReason>,
    }

    impl TraversalObserver for RecordingObserver {
        fn page_started(&mut self, url: &str) {
            self.pages.push(url.to_string());
        }

        fn url_found(&mut self, url: &str) {
            self.found.push(url.to_string());
        }

        fn stopped(&mut self, reason: &StopReason) {
            self.stops.push(reason.clone());
        }
    }
}
