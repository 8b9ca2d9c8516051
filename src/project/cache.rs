//! Compiled-grammar cache.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHasher};

use super::search_path::ResolvedGrammar;
use crate::peg::Grammar;

/// Identity of a cached grammar.
///
/// Files are keyed by absolute path and modification time, so an edited file
/// gets a fresh entry. Inline text is keyed by the text itself. Pure and full
/// compilations of the same source are separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    File {
        path: PathBuf,
        mtime_nanos: u128,
        pure_peg: bool,
    },
    Inline {
        text: String,
        pure_peg: bool,
    },
}

impl CacheKey {
    pub fn file(resolved: &ResolvedGrammar, pure_peg: bool) -> Self {
        Self::File {
            path: resolved.path.clone(),
            mtime_nanos: resolved.mtime_nanos(),
            pure_peg,
        }
    }

    pub fn inline(text: &str, pure_peg: bool) -> Self {
        Self::Inline {
            text: text.to_string(),
            pure_peg,
        }
    }

    pub fn is_pure(&self) -> bool {
        match self {
            Self::File { pure_peg, .. } | Self::Inline { pure_peg, .. } => *pure_peg,
        }
    }
}

/// `path:mtime` for files and `hash:0` for inline text, with `:pure`
/// appended in pure mode.
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File {
                path, mtime_nanos, ..
            } => write!(f, "{}:{}", path.display(), mtime_nanos)?,
            Self::Inline { text, .. } => {
                let mut hasher = FxHasher::default();
                text.hash(&mut hasher);
                write!(f, "{:016x}:0", hasher.finish())?;
            }
        }
        if self.is_pure() {
            f.write_str(":pure")?;
        }
        Ok(())
    }
}

/// Process-lifetime store of compiled grammars.
///
/// Entries are never evicted. The lock is held across lookup and compilation,
/// so a key is compiled at most once even under concurrent loads.
#[derive(Debug, Default)]
pub struct GrammarCache {
    entries: Mutex<FxHashMap<CacheKey, Arc<Grammar>>>,
}

impl GrammarCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Grammar>> {
        self.entries.lock().get(key).cloned()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Return the grammar stored under `key`, or build, store and return it.
    ///
    /// Nothing is stored when `build` fails.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: CacheKey,
        build: impl FnOnce() -> Result<Grammar, E>,
    ) -> Result<Arc<Grammar>, E> {
        let mut entries = self.entries.lock();
        if let Some(grammar) = entries.get(&key) {
            tracing::debug!(key = %key, "grammar cache hit");
            return Ok(Arc::clone(grammar));
        }

        tracing::debug!(key = %key, "grammar cache miss");
        let grammar = Arc::new(build()?);
        entries.insert(key, Arc::clone(&grammar));
        Ok(grammar)
    }
}
