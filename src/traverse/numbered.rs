// src/traverse/numbered.rs
// =============================================================================
// This module walks a numbered page sequence.
//
// How it works:
// 1. Start at the configured start page
// 2. Substitute the page number into the URL template
//    (page 1 may use an alternate URL - many archives leave the number
//    off their first page, e.g. /blog/ vs /blog/page/2/)
// 3. Fetch the page and extract article links
// 4. Stop on: end bound passed, fetch failure, or an empty page
// 5. Otherwise accumulate the links and move to the next number
//
// A fetch failure and an empty page both mean "we walked off the end of
// the archive" here. The run ends quietly and returns what it collected.
//
// Rust concepts:
// - Option<u32>: The end bound is optional
// - loop + break: The stop conditions all exit the same loop
// - String::replace: Template substitution
// =============================================================================

use anyhow::{anyhow, Result};
use scraper::Selector;

use super::{absorb_found, ArticleUrlSet, StopReason, Traversal, TraversalObserver};
use crate::extract;
use crate::fetch::PageSource;

// The placeholder users put in the URL template,
// e.g. "https://example.com/blog/page/{page}/"
pub const PAGE_PLACEHOLDER: &str = "{page}";

// Walks pages start, start+1, start+2, ... until a stop condition hits
pub struct NumberedTraversal {
    url_template: String,
    start_page: u32,
    end_page: Option<u32>,
    alt_first_page: Option<String>,
    target_selector: Selector,
}

impl NumberedTraversal {
    // Builds the traversal, validating the template up front
    //
    // The template must contain the {page} placeholder. The one exception:
    // starting at page 1 with an alternate first-page URL, because then at
    // least the first request has somewhere to go. This check runs before
    // any network activity - a bad template is a configuration error, not
    // a traversal outcome.
    pub fn new(
        url_template: String,
        start_page: u32,
        end_page: Option<u32>,
        alt_first_page: Option<String>,
        target_selector: Selector,
    ) -> Result<Self> {
        if !url_template.contains(PAGE_PLACEHOLDER)
            && !(start_page == 1 && alt_first_page.is_some())
        {
            return Err(anyhow!(
                "In numbers mode the URL must contain '{}', \
                 or --alt-first-page must be provided when starting at page 1",
                PAGE_PLACEHOLDER
            ));
        }

        Ok(Self {
            url_template,
            start_page,
            end_page,
            alt_first_page,
            target_selector,
        })
    }

    // The URL to fetch for a given page number
    //
    // Page 1 uses the alternate URL verbatim when one is configured;
    // every other page substitutes the number into the template.
    fn page_url(&self, page: u32) -> String {
        if page == 1 {
            if let Some(alt) = &self.alt_first_page {
                return alt.clone();
            }
        }
        self.url_template.replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

impl Traversal for NumberedTraversal {
    async fn run<S: PageSource>(
        &self,
        source: &S,
        observer: &mut dyn TraversalObserver,
    ) -> ArticleUrlSet {
        let mut articles = ArticleUrlSet::new();
        let mut page = self.start_page;

        loop {
            // Stop condition 1: walked past the end bound (if one is set)
            if let Some(end) = self.end_page {
                if page > end {
                    observer.stopped(&StopReason::EndOfRange);
                    break;
                }
            }

            let url = self.page_url(page);
            observer.page_started(&url);

            // Stop condition 2: the page could not be fetched
            // Past the last page most archives 404, so this doubles as
            // the natural end when no --end was given
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

            // Stop condition 3: nothing matched the target selector
            let found = extract::extract_links(&doc, &self.target_selector, &url);
            if found.is_empty() {
                observer.stopped(&StopReason::NoLinksFound { url });
                break;
            }

            absorb_found(&mut articles, found, observer);
            page += 1;
        }

        articles
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why validate in new() instead of run()?
//    - A missing placeholder means the user's command line is wrong
//    - We want to tell them before the first request goes out, not after
//
// 2. Why does the loop check the end bound FIRST?
//    - With --start 3 --end 2 the run makes zero requests
//    - With --end 5 the run makes exactly 5 - start + 1 requests
//      (absent an earlier stop), which is what users expect the bound
//      to mean
//
// 3. Why break instead of return inside the loop?
//    - All stop conditions funnel to the same place: return the
//      accumulated set as a successful result
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::parse_selector;
    use crate::traverse::testing::{FakePages, RecordingObserver};

    // A listing page with one article link per href
    fn listing(hrefs: &[&str]) -> String {
        hrefs
            .iter()
            .map(|href| format!(r#"<h2 class="entry-title"><a href="{}">post</a></h2>"#, href))
            .collect()
    }

    fn traversal(
        template: &str,
        start: u32,
        end: Option<u32>,
        alt: Option<&str>,
    ) -> NumberedTraversal {
        NumberedTraversal::new(
            template.to_string(),
            start,
            end,
            alt.map(|s| s.to_string()),
            parse_selector("h2.entry-title a").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_placeholder_rejected() {
        let result = NumberedTraversal::new(
            "https://example.com/archive".to_string(),
            1,
            None,
            None,
            parse_selector("a").unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_alt_first_page_excuses_missing_placeholder() {
        let result = NumberedTraversal::new(
            "https://example.com/archive".to_string(),
            1,
            None,
            Some("https://example.com/special".to_string()),
            parse_selector("a").unwrap(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_alt_first_page_does_not_excuse_later_start() {
        // Starting at page 2 never touches the alternate URL, so the
        // template still needs its placeholder
        let result = NumberedTraversal::new(
            "https://example.com/archive".to_string(),
            2,
            None,
            Some("https://example.com/special".to_string()),
            parse_selector("a").unwrap(),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_end_bound_caps_fetch_attempts() {
        let source = FakePages::new()
            .with_page("https://x/page/1/", &listing(&["/a"]))
            .with_page("https://x/page/2/", &listing(&["/b"]))
            .with_page("https://x/page/3/", &listing(&["/c"]))
            // Page 4 exists, but the bound must keep us away from it
            .with_page("https://x/page/4/", &listing(&["/d"]));
        let mut observer = RecordingObserver::default();

        let articles = traversal("https://x/page/{page}/", 1, Some(3), None)
            .run(&source, &mut observer)
            .await;

        assert_eq!(source.fetch_count(), 3);
        assert_eq!(articles.len(), 3);
        assert!(!articles.contains("https://x/d"));
        assert_eq!(observer.stops, vec![StopReason::EndOfRange]);
    }

    #[tokio::test]
    async fn test_empty_page_stops_the_run() {
        let source = FakePages::new()
            .with_page("https://x/page/1/", &listing(&["/a", "/b"]))
            .with_page("https://x/page/2/", &listing(&["/c"]))
            .with_page("https://x/page/3/", "<p>nothing matches here</p>");
        let mut observer = RecordingObserver::default();

        let articles = traversal("https://x/page/{page}/", 1, None, None)
            .run(&source, &mut observer)
            .await;

        // Page 3 was fetched (that's how we learn it's empty) but
        // contributed nothing, and nothing past it was attempted
        assert_eq!(source.fetch_count(), 3);
        assert_eq!(articles.len(), 3);
        assert_eq!(
            observer.stops,
            vec![StopReason::NoLinksFound {
                url: "https://x/page/3/".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_accumulated_results() {
        // Page 2 is not in the map, so fetching it fails
        let source = FakePages::new().with_page("https://x/page/1/", &listing(&["/a"]));
        let mut observer = RecordingObserver::default();

        let articles = traversal("https://x/page/{page}/", 1, None, None)
            .run(&source, &mut observer)
            .await;

        assert_eq!(articles.len(), 1);
        assert!(articles.contains("https://x/a"));
        assert!(matches!(
            observer.stops.as_slice(),
            [StopReason::FetchFailed { url, .. }] if url == "https://x/page/2/"
        ));
    }

    #[tokio::test]
    async fn test_alternate_url_fetched_for_page_one() {
        let source = FakePages::new()
            .with_page("https://x/special", &listing(&["/a"]))
            .with_page("https://x/page/2/", &listing(&["/b"]));
        let mut observer = RecordingObserver::default();

        let articles = traversal(
            "https://x/page/{page}/",
            1,
            Some(2),
            Some("https://x/special"),
        )
        .run(&source, &mut observer)
        .await;

        // First fetch is the alternate URL verbatim, then back to the
        // template for page 2
        assert_eq!(
            source.fetched(),
            vec!["https://x/special", "https://x/page/2/"]
        );
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_links_counted_once() {
        // "/a" appears on both pages (a sticky post)
        let source = FakePages::new()
            .with_page("https://x/page/1/", &listing(&["/a", "/b"]))
            .with_page("https://x/page/2/", &listing(&["/a", "/c"]));
        let mut observer = RecordingObserver::default();

        let articles = traversal("https://x/page/{page}/", 1, Some(2), None)
            .run(&source, &mut observer)
            .await;

        assert_eq!(articles.len(), 3);
        // The observer only hears about each URL once
        assert_eq!(observer.found.len(), 3);
    }

    #[tokio::test]
    async fn test_start_past_end_makes_no_requests() {
        let source = FakePages::new().with_page("https://x/page/3/", &listing(&["/a"]));
        let mut observer = RecordingObserver::default();

        let articles = traversal("https://x/page/{page}/", 3, Some(2), None)
            .run(&source, &mut observer)
            .await;

        assert_eq!(source.fetch_count(), 0);
        assert!(articles.is_empty());
        assert_eq!(observer.stops, vec![StopReason::EndOfRange]);
    }
}
