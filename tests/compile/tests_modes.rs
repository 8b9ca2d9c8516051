//! Full tree-building compilation versus pure recognizers.

use pegtree::parser::{DiagnosticCode, ExprBuilder, Parse, SourceBuilder};
use pegtree::peg::{Grammar, ParsingExpression};
use pegtree::project::GrammarLoader;

/// A grammar exercising every tree-construction construct.
fn tree_grammar(_text: &str, _urn: &str) -> Parse {
    let mut source = SourceBuilder::new();
    source
        .rule("Sum", |e| {
            e.seq(|e| {
                e.name("Value").many(|e| {
                    e.fold(Some("left"), Some("Add"), |e| {
                        e.seq(|e| {
                            e.char("+").edge("right", |e| {
                                e.name("Value");
                            });
                        });
                    });
                });
            });
        })
        .rule("Value", |e| {
            e.node(Some("Int"), |e| {
                e.one_many(|e| {
                    e.class("0-9");
                });
            });
        })
        .rule("Decl", |e| {
            e.seq(|e| {
                e.func("symbol", |e| {
                    e.name("Ident");
                })
                .func("exists", |e| {
                    e.name("Ident");
                });
            });
        })
        .rule("Ident", |e| {
            e.alt(|e| {
                e.class("a-z").class("A-Z");
            });
        });
    source.finish()
}

fn compile(pure_peg: bool) -> Grammar {
    GrammarLoader::new(tree_grammar).compile_text("", "modes", pure_peg)
}

#[test]
fn test_full_mode_builds_tree_construction() {
    let grammar = compile(false);

    assert_eq!(
        grammar.get("Sum").unwrap().to_string(),
        "Value ^left: { '+' right: Value #Add }*"
    );
    assert_eq!(grammar.get("Value").unwrap().to_string(), "{ [0-9]+ #Int }");
    assert_eq!(
        grammar.get("Decl").unwrap().to_string(),
        "@symbol(Ident) @exists(Ident)"
    );
}

#[test]
fn test_pure_mode_keeps_only_recognition() {
    let grammar = compile(true);

    assert_eq!(grammar.get("Sum").unwrap().to_string(), "Value ('+' Value)*");
    assert_eq!(grammar.get("Value").unwrap().to_string(), "[0-9]+");
    assert_eq!(grammar.get("Decl").unwrap().to_string(), "Ident ''");
}

#[test]
fn test_pure_mode_warns_about_dropped_actions() {
    let full = compile(false);
    let pure = compile(true);

    assert!(full
        .diagnostics()
        .iter()
        .all(|d| d.code != DiagnosticCode::W0103));
    let dropped: Vec<_> = pure
        .diagnostics()
        .iter()
        .filter(|d| d.code == DiagnosticCode::W0103)
        .collect();
    assert_eq!(dropped.len(), 1);
    assert!(dropped[0].message.contains("@exists"));
}

#[test]
fn test_full_recognizer_matches_pure_compilation() {
    let full = compile(false);
    let pure = compile(true);

    for (name, expr) in full.rules() {
        let pure_expr = pure.get(name).unwrap();
        // references carry their grammar's id, so compare printed forms
        assert_eq!(expr.recognizer().to_string(), pure_expr.to_string(), "rule {name}");
    }
}

#[test]
fn test_unordered_choice_degrades_with_warning() {
    for pure_peg in [false, true] {
        let grammar = compile(pure_peg);
        assert_eq!(
            grammar.get("Ident"),
            Some(&ParsingExpression::ore([
                ParsingExpression::Range {
                    chars: "".into(),
                    ranges: "az".into()
                },
                ParsingExpression::Range {
                    chars: "".into(),
                    ranges: "AZ".into()
                },
            ]))
        );
        let alt: Vec<_> = grammar
            .diagnostics()
            .iter()
            .filter(|d| d.code == DiagnosticCode::W0102)
            .collect();
        assert_eq!(alt.len(), 1);
        assert_eq!(alt[0].message, "unordered choice is not supported");
    }
}

#[test]
fn test_action_keeps_source_range() {
    let mut source = SourceBuilder::new();
    let build = |e: &mut ExprBuilder<'_>| {
        e.func("scope", |e| {
            e.any();
        });
    };
    source.rule("A", build);
    let parse = source.finish();
    let text = parse.syntax().text().to_string();

    let loader = GrammarLoader::new(move |_: &str, _: &str| parse.clone());
    let grammar = loader.compile_text(&text, "range", false);
    match grammar.get("A").unwrap() {
        ParsingExpression::Action { range, .. } => {
            assert_eq!(&text[*range], "@scope(.)");
        }
        other => panic!("expected Action, got {other}"),
    }
}
