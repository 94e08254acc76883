//! End-to-end compilation tests.
//!
//! These run whole source files through `compile` and check the shape of
//! the emitted JavaScript.

use cleanscript_compiler::compiler::helpers::{DEEP_EQUALS, ITERABLE, MEMBERSHIP, RANGE};
use cleanscript_compiler::{CompileError, DiagnosticKind, compile};
use std::fs;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

#[test]
fn test_inventory_fixture_compiles() {
    let js = compile(&fixture("inventory.csc")).expect("fixture should compile");

    assert!(js.starts_with("\"use strict\";\n"));
    let helpers = format!("{MEMBERSHIP}{ITERABLE}{RANGE}{DEEP_EQUALS}");
    assert!(js.contains(&helpers), "helpers missing or out of order");

    assert!(js.contains("const LOW_STOCK = 5;"));
    assert!(js.contains("class Perishable extends Item {"));
    assert!(js.contains("    async expire() {"));
    assert!(js.contains("        count = Number(count);"));
    assert!(js.contains("function lowStock(items, ...names) {"));
    assert!(js.contains("    names = names.length > 0 ? names : [\"none\"];"));
    assert!(js.contains("let names = shelf.map(function (i) { return i.name; });"));
    assert!(js.contains("let middle = names.slice(1, names.length);"));
    assert!(js.contains("[].splice.apply(names, [0, 1].concat([\"pear\"]));"));
    assert!(js.contains("let halves = Math.floor(9 / 2);"));
    assert!(js.contains("} else if (item.count === 0) {"));
    assert!(js.contains("if ($_in(\"apple\", names) && $_deepEquals(middle, names)) {"));
    assert!(js.contains("console.log(typeof module);"));
}

#[test]
fn test_inventory_fixture_braces_balance() {
    let js = compile(&fixture("inventory.csc")).expect("fixture should compile");
    let body = js.rsplit(DEEP_EQUALS).next().unwrap_or_default();
    let opens = body.matches('{').count();
    let closes = body.matches('}').count();
    assert_eq!(opens, closes);
}

#[test]
fn test_no_helpers_when_unused() {
    let js = compile("let total = price * quantity;\n").unwrap();
    assert_eq!(js, "\"use strict\";\nlet total = price * quantity;\n");
}

#[test]
fn test_multiple_lexical_errors() {
    let err = compile("x = 1__2;\ny = $;\nz = \"open\n").unwrap_err();
    let CompileError::Lex(diagnostics) = &err else {
        panic!("Expected lexical errors, got {err:?}");
    };
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Invalid numeric separator.",
            "Unexpected character.",
            "Unterminated string."
        ]
    );
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::Lex));
}

#[test]
fn test_syntax_errors_keep_going() {
    let source = "let = 1;\nif x y:\n    a;\nb = );\nc;\n";
    let err = compile(source).unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
    let lines: Vec<usize> = err.diagnostics().iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn test_tab_indentation_rejected() {
    let err = compile("if x:\n\ty;\n").unwrap_err();
    assert_eq!(
        err.diagnostics()[0].message,
        "Tabs are not allowed in indentation."
    );
}

#[test]
fn test_diagnostic_display() {
    let err = compile("x = ;").unwrap_err();
    assert_eq!(
        err.diagnostics()[0].to_string(),
        "[Line: 1] Error at \";\": Expect expression."
    );
}

#[test]
fn test_independent_compiles_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = if i % 2 == 0 { "x in y;\n" } else { "z;\n" };
                compile(source).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let js = handle.join().unwrap();
        assert_eq!(js.contains("function $_in"), i % 2 == 0);
    }
}
