//! Fixtures for loader tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pegtree::parser::Parse;
use pegtree::project::GrammarLoader;

use super::line_parser::parse_lines;

pub type LineParser = fn(&str, &str) -> Parse;

/// A loader with a private cache, parsing with [`parse_lines`].
pub fn line_loader() -> GrammarLoader<LineParser> {
    GrammarLoader::new(parse_lines as LineParser)
}

/// Write `text` to `dir/name` and return the path.
pub fn write_grammar(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// Rewrite `path` and move its modification time forward.
pub fn rewrite_grammar(path: &Path, text: &str) {
    let before = fs::metadata(path).unwrap().modified().unwrap();
    fs::write(path, text).unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(before + Duration::from_secs(10)).unwrap();
}
