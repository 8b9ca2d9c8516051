//! Foundation types for the pegtree loader.
//!
//! This module provides the pieces every other module builds on:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - Domain constants (bundled grammar directory, search-path variable,
//!   rule separators, transparent action names)
//!
//! This module has NO dependencies on other pegtree modules.

pub mod constants;

pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
