// src/traverse/observer.rs
// =============================================================================
// This module reports what a traversal run is doing.
//
// Instead of calling a global logger from inside the traversal loops,
// every event (page visited, URL discovered, decision to stop) goes
// through a TraversalObserver that the caller injects. The CLI installs
// ConsoleObserver; tests install a recorder and assert on the events.
//
// Rust concepts:
// - Traits: The observer is a capability, not a concrete type
// - Enums: StopReason names each way a run can end
// - match: Turning stop reasons into user-facing messages
// =============================================================================

// Why a traversal run ended
//
// All of these are normal terminations: the run returns whatever it
// accumulated, and none of them propagate as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Numbered mode walked past the configured end page
    EndOfRange,
    /// A page could not be fetched (network error or bad HTTP status)
    FetchFailed { url: String, message: String },
    /// The target selector matched nothing - end of the archive
    NoLinksFound { url: String },
    /// Next-link mode found no "next page" anchor
    NoNextLink,
    /// The next link pointed at a page we already fetched (a cycle)
    AlreadyVisited { url: String },
}

// Receives traversal events as they happen
pub trait TraversalObserver {
    /// A page is about to be fetched
    fn page_started(&mut self, url: &str);

    /// An article URL entered the result set for the first time
    fn url_found(&mut self, url: &str);

    /// The run decided to stop
    fn stopped(&mut self, reason: &StopReason);
}

// Prints traversal progress to the terminal
pub struct ConsoleObserver;

impl TraversalObserver for ConsoleObserver {
    fn page_started(&mut self, url: &str) {
        println!("🔍 Scraping: {}", url);
    }

    fn url_found(&mut self, url: &str) {
        println!("   Found: {}", url);
    }

    fn stopped(&mut self, reason: &StopReason) {
        match reason {
            StopReason::EndOfRange => {
                println!("🏁 Reached the configured end page. Stopping.");
            }
            StopReason::FetchFailed { message, .. } => {
                // The message already names the URL; stderr keeps it out
                // of any stdout the user might be piping
                eprintln!("⚠️  {}", message);
            }
            StopReason::NoLinksFound { url } => {
                println!("📭 No articles found on {}. Stopping.", url);
            }
            StopReason::NoNextLink => {
                println!("🏁 No next-page link found. Stopping.");
            }
            StopReason::AlreadyVisited { url } => {
                println!("🔁 Next link points back to {}. Stopping.", url);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not just println! inside the traversal loops?
//    - Tests would have nothing to assert against
//    - The observer makes every stop decision a visible, recordable event
//
// 2. What does { url: String, message: String } inside an enum mean?
//    - Enum variants can carry data, like small structs
//    - FetchFailed carries both which page died and why
//
// 3. What is the `..` in `FetchFailed { message, .. }`?
//    - Pattern matching shorthand: bind `message`, ignore the rest
// -----------------------------------------------------------------------------
