// src/fetch/mod.rs
// =============================================================================
// This module handles fetching archive pages over HTTP.
//
// Submodules:
// - client: Rate-limited page fetching with a browser User-Agent
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod client;

// Re-export public items from submodules
// This lets users write `fetch::PageFetcher` instead of
// `fetch::client::PageFetcher`
pub use client::{PageFetcher, PageSource, ParsedPage};
