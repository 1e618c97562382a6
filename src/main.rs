// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the configured traversal strategy (numbered or next-link),
//    validating selectors and the URL template BEFORE any request
// 3. Run the traversal to collect the article URL set
// 4. Hand the set to the sinks (summary, text export, wget downloads)
// 5. Exit with proper code (0 = success, 1 = download failures, 2 = error)
//
// Rust concepts:
// - async/await: The traversal and downloads run on the tokio runtime
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod extract; // src/extract/ - link extraction from parsed pages
mod fetch; // src/fetch/ - rate-limited page fetching
mod sink; // src/sink/ - text export, JSON summary, wget downloads
mod traverse; // src/traverse/ - the two traversal strategies

// Import items we need from our modules
use cli::{Cli, Commands, SharedArgs};
use fetch::PageFetcher;
use traverse::{ArticleUrlSet, ConsoleObserver, NextLinkTraversal, NumberedTraversal, Traversal};

use clap::Parser; // Parser trait enables the parse() method

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Configuration problems and unexpected errors land here,
            // always before any page was fetched
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = run completed
//   Ok(1) = run completed but some downloads failed
//   Err   = configuration or unexpected error (exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which traversal mode was requested. Everything fallible
    // here (selector parsing, template validation, client construction)
    // happens before the first request goes out.
    match cli.command {
        Commands::Numbers {
            url_template,
            start,
            end,
            alt_first_page,
            shared,
        } => {
            let target_selector = extract::parse_selector(&shared.target_selector)?;
            let traversal =
                NumberedTraversal::new(url_template, start, end, alt_first_page, target_selector)?;
            let fetcher = PageFetcher::new(shared.rate_limit)?;

            let articles = traversal.run(&fetcher, &mut ConsoleObserver).await;
            finish(articles, &shared).await
        }
        Commands::Next {
            start_url,
            next_selector,
            shared,
        } => {
            let target_selector = extract::parse_selector(&shared.target_selector)?;
            let next_selector = extract::parse_selector(&next_selector)?;
            let traversal = NextLinkTraversal::new(start_url, target_selector, next_selector);
            let fetcher = PageFetcher::new(shared.rate_limit)?;

            let articles = traversal.run(&fetcher, &mut ConsoleObserver).await;
            finish(articles, &shared).await
        }
    }
}

// Hands the final URL set to the configured sinks and picks the exit code
//
// The traversal itself never fails; from here on the only interesting
// outcomes are sink errors and the count of failed downloads.
async fn finish(articles: ArticleUrlSet, shared: &SharedArgs) -> Result<i32> {
    print_summary(&articles, shared.json)?;

    if let Some(path) = &shared.output_txt {
        sink::write_url_list(&articles, path)?;
        println!("📝 Wrote {} URL(s) to {}", articles.len(), path.display());
    }

    if shared.download {
        println!(
            "\n⬇️  Downloading {} URL(s) to {}...",
            articles.len(),
            shared.output_dir.display()
        );

        let report = sink::download_all(&articles, &shared.output_dir).await?;

        println!(
            "📊 Downloads: {} fetched, {} skipped, {} failed",
            report.downloaded, report.skipped, report.failed
        );

        if report.failed > 0 {
            return Ok(1); // Exit code 1 = some downloads failed
        }
    }

    Ok(0)
}

// Prints the run summary either as a plain count or as JSON
fn print_summary(articles: &ArticleUrlSet, json: bool) -> Result<()> {
    if json {
        // Serialize the sorted set to JSON and print
        let summary = sink::RunSummary::from_articles(articles);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n📊 Total unique articles collected: {}", articles.len());
    }
    Ok(())
}
