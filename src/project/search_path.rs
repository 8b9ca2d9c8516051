//! Locating grammar files.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::error::LoadError;
use super::options::LoadOptions;
use crate::base::constants::{BUILTIN_GRAMMAR_DIR, RULE_SEPARATORS};

/// Whether `source` is grammar text rather than a file name.
///
/// Text is inline when a rule separator occurs past its first character.
pub fn is_inline_source(source: &str) -> bool {
    RULE_SEPARATORS
        .iter()
        .any(|sep| source.find(sep).is_some_and(|i| i > 0))
}

/// Discover the bundled grammar directory.
///
/// Searches next to the current executable first, then falls back to the
/// directory shipped with the crate sources.
pub fn builtin_grammar_dir() -> PathBuf {
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
    {
        let next_to_exe = exe_dir.join(BUILTIN_GRAMMAR_DIR);
        if next_to_exe.is_dir() {
            return next_to_exe;
        }
    }

    Path::new(env!("CARGO_MANIFEST_DIR")).join(BUILTIN_GRAMMAR_DIR)
}

/// A grammar file found on the search path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGrammar {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Last modification time
    pub modified: SystemTime,
}

impl ResolvedGrammar {
    /// Modification time in nanoseconds since the epoch (0 when earlier).
    pub fn mtime_nanos(&self) -> u128 {
        self.modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    }
}

/// Ordered list of directories a grammar name is looked up in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Build the search order for one load.
    ///
    /// 1. the directory of `options.basepath`, or the working directory
    /// 2. the directory of `caller_file`
    /// 3. the bundled grammar directory
    /// 4. `options.search_path`
    pub fn new(options: &LoadOptions, caller_file: Option<&Path>) -> Self {
        let mut dirs = Vec::new();

        match &options.basepath {
            Some(basepath) => dirs.push(parent_dir(basepath)),
            None => dirs.push(PathBuf::new()),
        }
        if let Some(caller_file) = caller_file {
            dirs.push(parent_dir(caller_file));
        }
        dirs.push(builtin_grammar_dir());
        dirs.extend(
            options
                .search_path
                .iter()
                .filter(|dir| !dir.as_os_str().is_empty())
                .cloned(),
        );

        Self { dirs }
    }

    /// Search an explicit list of directories.
    pub fn from_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// The first directory holding a file `name` wins.
    pub fn find(&self, name: &str) -> Result<ResolvedGrammar, LoadError> {
        for dir in &self.dirs {
            let candidate = dir.join(name);
            tracing::trace!(candidate = %candidate.display(), "probing grammar path");
            if !candidate.is_file() {
                continue;
            }

            let modified = candidate
                .metadata()
                .and_then(|m| m.modified())
                .map_err(|e| LoadError::io(&candidate, e))?;
            let path = std::path::absolute(&candidate).map_err(|e| LoadError::io(&candidate, e))?;
            tracing::debug!(name, path = %path.display(), "found grammar");
            return Ok(ResolvedGrammar { path, modified });
        }

        Err(LoadError::NotFound {
            name: name.to_string(),
            searched: self.dirs.clone(),
        })
    }
}

/// Absolute parent directory of `path`, or the working directory.
fn parent_dir(path: &Path) -> PathBuf {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
