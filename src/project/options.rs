//! Grammar loading options

use std::path::PathBuf;

use super::error::LoadError;
use crate::base::constants::{GRAMMAR_PATH_ENV, SEARCH_PATH_SEPARATOR};

/// Text encoding of grammar files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8, a leading byte-order mark is stripped
    #[default]
    Utf8Sig,
    /// UTF-8, a byte-order mark is kept as text
    Utf8,
}

impl Encoding {
    /// Look up an encoding by its conventional label.
    pub fn from_label(label: &str) -> Result<Self, LoadError> {
        match label.to_ascii_lowercase().as_str() {
            "utf-8-sig" | "utf_8_sig" | "utf-8_sig" => Ok(Self::Utf8Sig),
            "utf-8" | "utf8" | "utf_8" => Ok(Self::Utf8),
            _ => Err(LoadError::UnsupportedEncoding(label.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8Sig => "utf-8-sig",
            Self::Utf8 => "utf-8",
        }
    }

    /// Decode raw file bytes, or `None` when they are not valid in this encoding.
    pub fn decode(&self, bytes: Vec<u8>) -> Option<String> {
        let text = String::from_utf8(bytes).ok()?;
        match self {
            Self::Utf8Sig => match text.strip_prefix('\u{FEFF}') {
                Some(stripped) => Some(stripped.to_string()),
                None => Some(text),
            },
            Self::Utf8 => Some(text),
        }
    }
}

/// Options for loading a grammar
///
/// `search_path` starts out with the directories listed in the `GRAMMAR`
/// environment variable; [`LoadOptions::with_search_path`] appends to them.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Compile a pure recognizer: no tree construction, no actions
    pub pure_peg: bool,
    /// Path the grammar is loaded relative to; its parent directory is
    /// searched first
    pub basepath: Option<PathBuf>,
    /// Encoding of grammar files
    pub encoding: Encoding,
    /// Source identifier reported for inline grammar text
    pub urn: Option<String>,
    /// Extra directories searched after the built-in ones
    pub search_path: Vec<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        let env = std::env::var(GRAMMAR_PATH_ENV).ok();
        Self::with_env_search_path(env.as_deref())
    }
}

impl LoadOptions {
    /// Default options, searching the `GRAMMAR` directories last.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with `search_path` taken from a `GRAMMAR`-style value
    /// instead of the process environment.
    pub fn with_env_search_path(value: Option<&str>) -> Self {
        Self {
            pure_peg: false,
            basepath: None,
            encoding: Encoding::default(),
            urn: None,
            search_path: value.map(parse_search_path).unwrap_or_default(),
        }
    }

    pub fn with_pure_peg(mut self, pure_peg: bool) -> Self {
        self.pure_peg = pure_peg;
        self
    }

    pub fn with_basepath(mut self, basepath: impl Into<PathBuf>) -> Self {
        self.basepath = Some(basepath.into());
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_urn(mut self, urn: impl Into<String>) -> Self {
        self.urn = Some(urn.into());
        self
    }

    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_path.push(dir.into());
        self
    }
}

/// Split a `:`-separated directory list, skipping empty entries.
pub fn parse_search_path(value: &str) -> Vec<PathBuf> {
    value
        .split(SEARCH_PATH_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}
