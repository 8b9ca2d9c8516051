//! Grammar loading: file search, reading, caching.

mod cache;
mod error;
mod loader;
mod options;
mod search_path;

pub use cache::{CacheKey, GrammarCache};
pub use error::LoadError;
pub use loader::GrammarLoader;
pub use options::{Encoding, LoadOptions, parse_search_path};
pub use search_path::{ResolvedGrammar, SearchPath, builtin_grammar_dir, is_inline_source};
