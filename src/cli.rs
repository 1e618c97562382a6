// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The two traversal modes are subcommands (numbers, next); the flags both
// modes share live in SharedArgs and are flattened into each one.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "archive-scraper",
    version = "1.0.0",
    about = "Collect article URLs from paginated web archives",
    long_about = "archive-scraper walks a web archive either by following its 'next page' \
                  links or by iterating numbered pages, collects every article URL matching \
                  a CSS selector, and can export the list to a text file or download each \
                  page with wget."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (numbers, next)
//
// Each variant is one traversal mode; the fields inside each variant
// become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Iterate numbered pages by substituting a counter into a URL template
    ///
    /// Example: archive-scraper numbers "https://example.com/page/{page}/"
    ///          --target-selector "h2.entry-title a" --end 10
    Numbers {
        /// URL template containing a '{page}' placeholder
        /// (e.g. "https://example.com/blog/page/{page}/")
        ///
        /// This is a positional argument (required, no flag needed)
        url_template: String,

        /// Page number to start from
        #[arg(long, default_value_t = 1)]
        start: u32,

        /// Page number to stop after (keeps going until a dead or empty
        /// page when omitted)
        #[arg(long)]
        end: Option<u32>,

        /// URL to fetch for page 1 instead of the template
        /// (for archives whose first page carries no number)
        #[arg(long)]
        alt_first_page: Option<String>,

        // Flags shared by both modes, merged in by clap
        #[command(flatten)]
        shared: SharedArgs,
    },

    /// Follow the "next page" link from page to page
    ///
    /// Example: archive-scraper next "https://example.com/archive/"
    ///          --target-selector "h2.entry-title a"
    Next {
        /// URL of the first archive page
        ///
        /// This is a positional argument (required)
        start_url: String,

        /// CSS selector for the single next-page anchor
        #[arg(long, default_value = "a.next.page-numbers")]
        next_selector: String,

        #[command(flatten)]
        shared: SharedArgs,
    },
}

// Options common to both traversal modes
//
// #[command(flatten)] splices these into each subcommand, so users see
// one flat flag list per mode
#[derive(Args, Debug)]
pub struct SharedArgs {
    /// CSS selector for the article anchors to collect
    /// (e.g. "h2.entry-title a")
    #[arg(long)]
    pub target_selector: String,

    /// Seconds to wait after every request (politeness delay)
    #[arg(long, default_value_t = 1.0)]
    pub rate_limit: f64,

    /// Write the collected URLs, one per line, to this file
    #[arg(long)]
    pub output_txt: Option<PathBuf>,

    /// Download every collected URL with wget
    #[arg(long)]
    pub download: bool,

    /// Directory for downloaded pages
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Print the run summary as JSON instead of the plain count
    #[arg(long)]
    pub json: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why subcommands instead of a --use flag?
//    - Each mode has arguments the other doesn't (--end vs --next-selector)
//    - Subcommands let clap reject meaningless combinations for us
//
// 2. What does #[command(flatten)] do?
//    - Inlines SharedArgs' fields into the subcommand's argument list
//    - One definition, both modes get the flags
//
// 3. Why PathBuf instead of String for paths?
//    - PathBuf is the owned OS-path type; it handles platform quirks
//      (separators, non-UTF-8 names) that a plain String would mangle
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_mode_defaults() {
        let cli = Cli::try_parse_from([
            "archive-scraper",
            "next",
            "https://example.com/archive/",
            "--target-selector",
            "h2.entry-title a",
        ])
        .unwrap();

        match cli.command {
            Commands::Next {
                start_url,
                next_selector,
                shared,
            } => {
                assert_eq!(start_url, "https://example.com/archive/");
                assert_eq!(next_selector, "a.next.page-numbers");
                assert_eq!(shared.rate_limit, 1.0);
                assert!(!shared.download);
                assert_eq!(shared.output_dir, PathBuf::from("output"));
            }
            _ => panic!("expected next subcommand"),
        }
    }

    #[test]
    fn test_numbers_mode_bounds() {
        let cli = Cli::try_parse_from([
            "archive-scraper",
            "numbers",
            "https://example.com/page/{page}/",
            "--start",
            "2",
            "--end",
            "5",
            "--target-selector",
            "a.post",
            "--rate-limit",
            "0.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Numbers {
                url_template,
                start,
                end,
                alt_first_page,
                shared,
            } => {
                assert_eq!(url_template, "https://example.com/page/{page}/");
                assert_eq!(start, 2);
                assert_eq!(end, Some(5));
                assert_eq!(alt_first_page, None);
                assert_eq!(shared.rate_limit, 0.5);
            }
            _ => panic!("expected numbers subcommand"),
        }
    }

    #[test]
    fn test_target_selector_is_required() {
        let result = Cli::try_parse_from([
            "archive-scraper",
            "next",
            "https://example.com/archive/",
        ]);
        assert!(result.is_err());
    }
}
