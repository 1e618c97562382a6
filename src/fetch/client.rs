// src/fetch/client.rs
// =============================================================================
// This module fetches archive pages and parses them into documents.
//
// Key functionality:
// - Makes a single HTTP GET per page with a fixed browser User-Agent
// - Parses the response body into a DOM using the scraper crate
// - Sleeps for the configured rate-limit delay after EVERY attempt,
//   whether it succeeded or failed (polite crawling)
// - No retries: one failed fetch ends the current traversal run
//
// Politeness:
// - The post-fetch sleep throttles our request cadence toward the target
//   server regardless of outcome. Traversal code must never skip it.
//
// Rust concepts:
// - Traits: PageSource is the seam between traversal and the network,
//   so tests can swap in canned pages instead of real HTTP
// - async/await: For network I/O and async sleeping
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

// A fixed, realistic browser User-Agent
// Some archive hosts refuse requests that identify as a script
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/115 Safari/537.36";

// How long we wait for a single page before giving up
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// A fetched page, parsed into a DOM
//
// The handle is opaque on purpose: it is produced by the fetcher, handed
// to the extractor for one traversal step, and then dropped. Nothing else
// should hold on to it.
pub struct ParsedPage {
    document: Html,
}

impl ParsedPage {
    // Parses raw HTML into a page
    //
    // Parsing itself never fails - html5ever recovers from broken markup
    // the same way a browser does
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    // Gives the extractor access to the underlying DOM
    pub(crate) fn document(&self) -> &Html {
        &self.document
    }
}

// Anything that can turn a URL into a parsed page
//
// The traversal strategies only talk to this trait. In production it's
// PageFetcher (real HTTP); in tests it's a map of canned HTML so the
// traversal loops can be exercised without a network.
pub trait PageSource {
    async fn fetch(&self, url: &str) -> Result<ParsedPage>;
}

// Fetches pages over HTTP with a fixed delay after every request
pub struct PageFetcher {
    client: Client,
    delay: Duration,
}

impl PageFetcher {
    // Creates a fetcher with the given rate limit (seconds between requests)
    //
    // Returns an error for a negative rate limit or if the HTTP client
    // cannot be constructed. Both are configuration problems we want to
    // surface before any network activity happens.
    pub fn new(rate_limit_secs: f64) -> Result<Self> {
        // The check also rejects NaN, which Duration::from_secs_f64
        // would panic on
        if !rate_limit_secs.is_finite() || rate_limit_secs < 0.0 {
            return Err(anyhow!(
                "Rate limit must be a non-negative number of seconds, got {}",
                rate_limit_secs
            ));
        }

        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            delay: Duration::from_secs_f64(rate_limit_secs),
        })
    }

    // One GET attempt: transport errors and non-success statuses both
    // come back as Err, carrying the detail for the log
    async fn attempt(&self, url: &str) -> Result<ParsedPage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Error accessing {}: {}", url, e))?;

        // reqwest follows redirects for us, so by the time we see the
        // status it should be 2xx; anything else ends the traversal run
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Error accessing {}: HTTP {}", url, status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Error reading {}: {}", url, e))?;

        Ok(ParsedPage::from_html(&body))
    }
}

impl PageSource for PageFetcher {
    // Fetches one page, then sleeps for the rate-limit delay
    //
    // The sleep is unconditional: it happens on success AND on failure,
    // even though a failed fetch ends the run and the caller discards the
    // result. Politeness toward the server does not depend on our luck.
    async fn fetch(&self, url: &str) -> Result<ParsedPage> {
        let outcome = self.attempt(url).await;
        tokio::time::sleep(self.delay).await;
        outcome
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait for fetching?
//    - The traversal logic doesn't care where pages come from
//    - PageSource lets tests substitute canned HTML for real HTTP
//    - This is dependency injection, Rust style
//
// 2. What is Duration::from_secs_f64?
//    - Builds a Duration from a floating point number of seconds
//    - Lets users write --rate-limit 0.5 for half a second
//    - Panics on negative input, which is why we validate first
//
// 3. Why sleep AFTER the attempt instead of before?
//    - The delay rate-limits our cadence between requests
//    - Sleeping after means even the final (failed) request is followed
//      by a pause, matching how the tool has always behaved
//
// 4. Why no retries?
//    - A dead page usually means we walked off the end of the archive
//    - The traversal treats a failed fetch as "stop here" and returns
//      everything collected so far
// -----------------------------------------------------------------------------
