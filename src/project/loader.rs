//! Loading grammars by name or inline text.

use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

use super::cache::{CacheKey, GrammarCache};
use super::error::LoadError;
use super::options::{Encoding, LoadOptions};
use super::search_path::{ResolvedGrammar, SearchPath, is_inline_source};
use crate::compile::GrammarRegistry;
use crate::parser::{DiagnosticCode, DiagnosticCollector, DiagnosticSink, GrammarParser};
use crate::peg::Grammar;

/// URN reported for inline text when nothing better is known
const INLINE_URN: &str = "<inline>";

/// Loads and caches grammars.
///
/// The loader owns the meta-grammar parser `P` and a cache that may be shared
/// with other loaders.
pub struct GrammarLoader<P> {
    parser: P,
    cache: Arc<GrammarCache>,
}

impl<P: GrammarParser> GrammarLoader<P> {
    /// Create a loader with a private cache.
    pub fn new(parser: P) -> Self {
        Self::with_cache(parser, Arc::new(GrammarCache::new()))
    }

    pub fn with_cache(parser: P, cache: Arc<GrammarCache>) -> Self {
        Self { parser, cache }
    }

    pub fn cache(&self) -> &Arc<GrammarCache> {
        &self.cache
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Load a grammar from a file name or inline text.
    ///
    /// Text containing a rule separator past its first character is compiled
    /// directly. Anything else is a file name looked up on the search path,
    /// which includes the directory of the calling source file.
    ///
    /// The calling file is the path the compiler recorded for it, usually
    /// relative to the package root. It resolves against the current working
    /// directory, so that search step only finds grammars when the process
    /// runs from the package root, as `cargo test` and `cargo run` do. Use
    /// [`GrammarLoader::load_from`] with an absolute path otherwise.
    #[track_caller]
    pub fn load(&self, source: &str, options: &LoadOptions) -> Result<Arc<Grammar>, LoadError> {
        let caller = Location::caller();
        self.load_from(source, options, Some(Path::new(caller.file())))
    }

    /// Like [`GrammarLoader::load`] with an explicit calling file. Its
    /// directory is searched right after the basepath directory.
    pub fn load_from(
        &self,
        source: &str,
        options: &LoadOptions,
        caller_file: Option<&Path>,
    ) -> Result<Arc<Grammar>, LoadError> {
        if is_inline_source(source) {
            let urn = inline_urn(options, caller_file);
            let key = CacheKey::inline(source, options.pure_peg);
            return self
                .cache
                .get_or_try_insert_with(key, || Ok(self.compile_text(source, &urn, options.pure_peg)));
        }

        let resolved = SearchPath::new(options, caller_file).find(source)?;
        self.load_resolved(&resolved, options)
    }

    /// Load the grammar file at `path` without searching.
    pub fn load_path(&self, path: &Path, options: &LoadOptions) -> Result<Arc<Grammar>, LoadError> {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let resolved = SearchPath::from_dirs([dir]).find(&name)?;
        self.load_resolved(&resolved, options)
    }

    fn load_resolved(
        &self,
        resolved: &ResolvedGrammar,
        options: &LoadOptions,
    ) -> Result<Arc<Grammar>, LoadError> {
        let key = CacheKey::file(resolved, options.pure_peg);
        self.cache.get_or_try_insert_with(key, || {
            let text = read_grammar(&resolved.path, options.encoding)?;
            let urn = resolved.path.display().to_string();
            Ok(self.compile_text(&text, &urn, options.pure_peg))
        })
    }

    /// Parse and compile `text` without touching the cache.
    ///
    /// A source with syntax errors yields an errored grammar with no rules.
    pub fn compile_text(&self, text: &str, urn: &str, pure_peg: bool) -> Grammar {
        let parse = self.parser.parse(text, urn);
        let mut grammar = Grammar::new(urn);

        let file = match parse.source_file() {
            Some(file) if parse.ok() => file,
            _ => {
                let mut diagnostics = DiagnosticCollector::new();
                for err in &parse.errors {
                    diagnostics.error(DiagnosticCode::E0201, err.range, err.message.clone());
                }
                if parse.errors.is_empty() {
                    diagnostics.error(
                        DiagnosticCode::E0201,
                        parse.syntax().text_range(),
                        "grammar tree has no source root".to_string(),
                    );
                }
                tracing::error!(
                    urn,
                    errors = diagnostics.error_count(),
                    "{}",
                    DiagnosticCode::E0201.default_message()
                );
                grammar.mark_error();
                grammar.set_diagnostics(diagnostics.into_diagnostics());
                return grammar;
            }
        };

        let mut registry = GrammarRegistry::new(grammar, pure_peg);
        registry.load(&file);
        registry.finalize()
    }
}

fn inline_urn(options: &LoadOptions, caller_file: Option<&Path>) -> String {
    if let Some(urn) = &options.urn {
        return urn.clone();
    }
    options
        .basepath
        .as_deref()
        .or(caller_file)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| INLINE_URN.to_string())
}

fn read_grammar(path: &Path, encoding: Encoding) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    encoding.decode(bytes).ok_or_else(|| LoadError::Decode {
        path: path.to_path_buf(),
        encoding: encoding.label(),
    })
}
