//! Locating, reading and caching grammar files.

use std::path::PathBuf;
use std::sync::Arc;

use pegtree::parser::DiagnosticCode;
use pegtree::peg::ParsingExpression;
use pegtree::project::{Encoding, LoadError, LoadOptions};

use crate::helpers::loader_helpers::{line_loader, rewrite_grammar, write_grammar};

#[test]
fn test_load_relative_to_basepath() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_grammar(dir.path(), "a.tpeg", "A = 'a' B\nB = [b]");
    let options = LoadOptions::new().with_basepath(dir.path().join("main.tpeg"));

    let grammar = line_loader().load("a.tpeg", &options).unwrap();

    assert_eq!(grammar.urn(), path.display().to_string());
    assert_eq!(grammar.rule_names().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(grammar.get("B"), Some(&ParsingExpression::char("b")));
}

#[test]
fn test_reload_returns_cached_grammar() {
    let dir = tempfile::tempdir().unwrap();
    write_grammar(dir.path(), "a.tpeg", "A = 'a'");
    let options = LoadOptions::new().with_basepath(dir.path().join("main.tpeg"));
    let loader = line_loader();

    let first = loader.load("a.tpeg", &options).unwrap();
    let second = loader.load("a.tpeg", &options).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.cache().len(), 1);
}

#[test]
fn test_changed_mtime_gives_new_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_grammar(dir.path(), "a.tpeg", "A = 'old'");
    let options = LoadOptions::new().with_basepath(dir.path().join("main.tpeg"));
    let loader = line_loader();

    let old = loader.load("a.tpeg", &options).unwrap();
    rewrite_grammar(&path, "A = 'new'");
    let new = loader.load("a.tpeg", &options).unwrap();

    assert!(!Arc::ptr_eq(&old, &new));
    assert_eq!(old.get("A"), Some(&ParsingExpression::char("old")));
    assert_eq!(new.get("A"), Some(&ParsingExpression::char("new")));
    assert_eq!(loader.cache().len(), 2);
}

#[test]
fn test_pure_and_full_are_cached_separately() {
    let dir = tempfile::tempdir().unwrap();
    write_grammar(dir.path(), "a.tpeg", "A = 'a'");
    let full = LoadOptions::new().with_basepath(dir.path().join("main.tpeg"));
    let pure = full.clone().with_pure_peg(true);
    let loader = line_loader();

    let a = loader.load("a.tpeg", &full).unwrap();
    let b = loader.load("a.tpeg", &pure).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(loader.cache().len(), 2);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let options = LoadOptions::new().with_basepath(dir.path().join("main.tpeg"));

    let err = line_loader().load("missing.tpeg", &options).unwrap_err();

    match &err {
        LoadError::NotFound { name, searched } => {
            assert_eq!(name, "missing.tpeg");
            assert_eq!(searched[0], dir.path().to_path_buf());
        }
        other => panic!("expected NotFound, got {other}"),
    }
    assert!(err.to_string().starts_with("grammar not found: missing.tpeg"));
}

#[test]
fn test_syntax_error_is_cached_as_errored_grammar() {
    let dir = tempfile::tempdir().unwrap();
    write_grammar(dir.path(), "bad.tpeg", "A = 'a'\n???\n");
    let options = LoadOptions::new().with_basepath(dir.path().join("main.tpeg"));
    let loader = line_loader();

    let grammar = loader.load("bad.tpeg", &options).unwrap();
    assert!(grammar.has_error());
    assert!(grammar.is_empty());
    assert_eq!(grammar.diagnostics()[0].code, DiagnosticCode::E0201);

    let again = loader.load("bad.tpeg", &options).unwrap();
    assert!(Arc::ptr_eq(&grammar, &again));
}

#[test]
fn test_inline_text_is_compiled_and_cached() {
    let options = LoadOptions::new().with_urn("inline:calc");
    let loader = line_loader();

    let grammar = loader.load("A = 'x' B?\nB = 'y'", &options).unwrap();
    let again = loader.load("A = 'x' B?\nB = 'y'", &options).unwrap();

    assert_eq!(grammar.urn(), "inline:calc");
    assert_eq!(grammar.len(), 2);
    assert!(Arc::ptr_eq(&grammar, &again));
}

#[test]
fn test_search_path_directories() {
    let base = tempfile::tempdir().unwrap();
    let extra = tempfile::tempdir().unwrap();
    write_grammar(extra.path(), "lib.tpeg", "Lib = .");
    let options = LoadOptions::new()
        .with_basepath(base.path().join("main.tpeg"))
        .with_search_path(extra.path());

    let grammar = line_loader().load("lib.tpeg", &options).unwrap();
    assert!(grammar.contains("Lib"));
}

#[test]
fn test_basepath_directory_shadows_search_path() {
    let base = tempfile::tempdir().unwrap();
    let extra = tempfile::tempdir().unwrap();
    write_grammar(base.path(), "a.tpeg", "A = 'base'");
    write_grammar(extra.path(), "a.tpeg", "A = 'extra'");
    let options = LoadOptions::new()
        .with_basepath(base.path().join("main.tpeg"))
        .with_search_path(extra.path());

    let grammar = line_loader().load("a.tpeg", &options).unwrap();
    assert_eq!(grammar.get("A"), Some(&ParsingExpression::char("base")));
}

#[test]
fn test_caller_directory_is_searched() {
    let grammar = line_loader()
        .load("caller_fixture.tpeg", &LoadOptions::new())
        .unwrap();

    assert!(!grammar.has_error());
    assert_eq!(grammar.start_rule(), Some("Greeting"));
}

#[test]
fn test_absolute_caller_file_is_searched() {
    let base = tempfile::tempdir().unwrap();
    let caller_dir = tempfile::tempdir().unwrap();
    let path = write_grammar(caller_dir.path(), "beside.tpeg", "Beside = 'b'");
    let options = LoadOptions::new().with_basepath(base.path().join("main.tpeg"));
    let caller_file = caller_dir.path().join("caller.rs");

    let grammar = line_loader()
        .load_from("beside.tpeg", &options, Some(&caller_file))
        .unwrap();
    assert_eq!(grammar.urn(), path.display().to_string());

    let err = line_loader()
        .load_from("beside.tpeg", &options, None)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_bundled_grammar_directory_is_searched() {
    let grammar = line_loader()
        .load("math.tpeg", &LoadOptions::new())
        .unwrap();

    let expected: PathBuf = [env!("CARGO_MANIFEST_DIR"), "grammar", "math.tpeg"]
        .iter()
        .collect();
    assert_eq!(grammar.urn(), expected.display().to_string());
}

#[test]
fn test_byte_order_mark() {
    let dir = tempfile::tempdir().unwrap();
    write_grammar(dir.path(), "bom.tpeg", "\u{FEFF}A = 'a'");
    let options = LoadOptions::new().with_basepath(dir.path().join("main.tpeg"));

    let stripped = line_loader().load("bom.tpeg", &options).unwrap();
    assert!(stripped.contains("A"));

    // kept as text, the mark is not part of a valid rule name
    let kept = line_loader()
        .load("bom.tpeg", &options.with_encoding(Encoding::Utf8))
        .unwrap();
    assert!(kept.has_error());
}

#[test]
fn test_load_path_reads_file_directly() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_grammar(dir.path(), "direct.tpeg", "D = 'd'*");
    let loader = line_loader();

    let grammar = loader.load_path(&path, &LoadOptions::new()).unwrap();
    assert!(grammar.contains("D"));

    let by_name = loader
        .load("direct.tpeg", &LoadOptions::new().with_basepath(&path))
        .unwrap();
    assert!(Arc::ptr_eq(&grammar, &by_name));
}
