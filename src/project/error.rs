//! Errors that abort a grammar load.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while locating or reading a grammar.
///
/// Problems inside the grammar itself are not errors here: syntax errors mark
/// the loaded [`crate::peg::Grammar`] as errored and compilation anomalies
/// become diagnostics.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No search directory holds a file with this name.
    #[error("grammar not found: {name} (searched {})", display_paths(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },

    /// The grammar file exists but could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid in the requested encoding.
    #[error("{} is not valid {encoding}", .path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// The requested encoding label is not supported.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the grammar could not be located at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| {
            if p.as_os_str().is_empty() {
                ".".to_string()
            } else {
                p.display().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
