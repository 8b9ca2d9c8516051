//! Sharing one grammar cache between loaders and threads.

use std::sync::Arc;
use std::thread;

use pegtree::project::{CacheKey, GrammarCache, GrammarLoader, LoadOptions};

use crate::helpers::line_parser::parse_lines;
use crate::helpers::loader_helpers::{LineParser, write_grammar};

#[test]
fn test_loaders_share_a_cache() {
    let cache = Arc::new(GrammarCache::new());
    let first = GrammarLoader::with_cache(parse_lines as LineParser, Arc::clone(&cache));
    let second = GrammarLoader::with_cache(parse_lines as LineParser, Arc::clone(&cache));
    let options = LoadOptions::new().with_urn("shared");

    let a = first.load("A = 'a'", &options).unwrap();
    let b = second.load("A = 'a'", &options).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(cache.contains(&CacheKey::inline("A = 'a'", false)));
}

#[test]
fn test_concurrent_loads_compile_once() {
    let dir = tempfile::tempdir().unwrap();
    write_grammar(dir.path(), "a.tpeg", "A = 'a' A?");
    let options = LoadOptions::new().with_basepath(dir.path().join("main.tpeg"));
    let loader = GrammarLoader::new(parse_lines as LineParser);

    let grammars: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| loader.load("a.tpeg", &options).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for grammar in &grammars[1..] {
        assert!(Arc::ptr_eq(&grammars[0], grammar));
    }
    assert_eq!(loader.cache().len(), 1);
}

#[test]
fn test_distinct_grammars_have_distinct_ids() {
    let loader = GrammarLoader::new(parse_lines as LineParser);
    let options = LoadOptions::new();

    let a = loader.load("A = B\nB = 'b'", &options).unwrap();
    let b = loader.load("A = B\nB = 'c'", &options).unwrap();
    assert_ne!(a.id(), b.id());

    // a reference only resolves within its own grammar
    let reference = a.get("A").unwrap().as_name_ref().unwrap();
    assert!(a.resolve(reference).is_some());
    assert!(b.resolve(reference).is_none());
}
