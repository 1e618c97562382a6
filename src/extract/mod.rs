// src/extract/mod.rs
// =============================================================================
// This module extracts article links from parsed archive pages.
//
// Submodules:
// - links: CSS-selector based extraction and URL resolution
//
// This file (mod.rs) is the module root - it exports the public API that
// the traversal strategies use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod links;

// Re-export public items from submodules
pub use links::{extract_links, find_next_url, parse_selector};
