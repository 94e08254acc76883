//! Statement parsing utilities and documentation.
//!
//! This module documents the statement parsing logic found in `parser.rs`.
//!
//! ## Statement Types
//!
//! | Statement | Method |
//! |-----------|--------|
//! | `var` / `let` / `const` | `parse_variable_declaration` |
//! | Function | `parse_function` |
//! | Class | `parse_class_declaration` |
//! | If / elif / else | `parse_if_statement` |
//! | For-in | `parse_for_statement` |
//! | While | `parse_while_statement` |
//! | Do-while | `parse_do_statement` |
//! | Switch | `parse_switch_statement` |
//! | Try | `parse_try_statement` |
//! | `JSRAW` | `parse_raw_passthrough` |
//! | Return / Yield / Throw / Break / Continue | inline in `parse_statement` |
//! | Nested block | inline in `parse_statement` |
//! | Expression | `parse_expression_statement` |
//!
//! ## Bodies
//!
//! Every compound statement introduces its body with `:`. The body is
//! either an indented block or a single inline statement, and an inline
//! statement may still be followed by an indented block:
//!
//! ```text
//! if ready:
//!     start();
//!
//! if ready: start();
//!
//! while busy: tick();
//!     log("tick");
//! ```
//!
//! ## Functions and Parameters
//!
//! ```text
//! function add(a, b = 1): return a + b;
//! async function *stream(Number -> limit, *rest):
//!     yield limit;
//! ```
//!
//! `*name` collects the remaining arguments and must come last.
//! `castFn -> name` passes the argument through `castFn` on entry.
//!
//! ## Error Recovery
//!
//! After a syntax error the parser skips to the next `;`, the next statement
//! keyword, or the end of the enclosing block, then continues.

// This module serves as documentation. The actual implementation is in parser.rs.

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::Scanner;
    use crate::parser::{Parsed, Parser};

    fn parse(src: &str) -> Parsed {
        Parser::new(Scanner::new(src).tokenize().tokens).parse()
    }

    fn parse_ok(src: &str) -> Vec<Stmt> {
        let parsed = parse(src);
        assert!(!parsed.had_error(), "errors: {:?}", parsed.errors);
        parsed.program.body
    }

    #[test]
    fn test_return_without_value() {
        let body = parse_ok("function f: return;");
        let Stmt::Function(func) = &body[0] else {
            panic!("Expected function");
        };
        assert_eq!(func.body.body[0], Stmt::Return(None));
    }

    #[test]
    fn test_yield_and_throw() {
        let body = parse_ok("function *g:\n    yield;\n    throw err;\n");
        let Stmt::Function(func) = &body[0] else {
            panic!("Expected function");
        };
        assert!(matches!(func.body.body[0], Stmt::Yield(None)));
        assert!(matches!(func.body.body[1], Stmt::Throw(_)));
    }

    #[test]
    fn test_break_and_continue() {
        let body = parse_ok("while true:\n    break;\n    continue;\n");
        let Stmt::While(stmt) = &body[0] else {
            panic!("Expected while");
        };
        assert_eq!(stmt.body.body, vec![Stmt::Break, Stmt::Continue]);
    }

    #[test]
    fn test_nested_blocks() {
        let body = parse_ok("if a:\n    if b:\n        c;\n    d;\ne;\n");
        assert_eq!(body.len(), 2);
        let Stmt::If(outer) = &body[0] else {
            panic!("Expected if");
        };
        assert_eq!(outer.then_branch.body.len(), 2);
    }

    #[test]
    fn test_class_extends_keyword() {
        let body = parse_ok("class A extends B:\n    function constructor: super();\n");
        let Stmt::Class(class) = &body[0] else {
            panic!("Expected class");
        };
        assert!(matches!(class.superclass, Some(Expr::Variable(ref id)) if id.name == "B"));
    }

    #[test]
    fn test_empty_class() {
        let body = parse_ok("class Marker:\nx;\n");
        assert!(matches!(body[0], Stmt::Class(ref c) if c.methods.is_empty()));
    }

    #[test]
    fn test_catch_without_name() {
        let body = parse_ok("try: risky();\ncatch: recover();\n");
        let Stmt::Try(stmt) = &body[0] else {
            panic!("Expected try");
        };
        assert!(stmt.handler.as_ref().is_some_and(|h| h.param.is_none()));
    }

    #[test]
    fn test_do_requires_while() {
        let parsed = parse("do: x++;\ny;\n");
        assert_eq!(parsed.errors[0].message, "Expect 'while' after do body.");
    }

    #[test]
    fn test_switch_rejects_other_statements() {
        let parsed = parse("switch x:\n    y;\n");
        assert_eq!(
            parsed.errors[0].message,
            "Expect 'case' or 'default' in switch body."
        );
    }

    #[test]
    fn test_duplicate_default() {
        let parsed = parse("switch x:\n    default: a;\n    default: b;\n");
        assert_eq!(parsed.errors[0].message, "Duplicate default case in switch.");
    }

    #[test]
    fn test_missing_colon() {
        let parsed = parse("if x\n    y;\n");
        assert_eq!(parsed.errors[0].message, "Expect ':' after if condition.");
    }

    #[test]
    fn test_jsraw_requires_string() {
        let parsed = parse("JSRAW 42;");
        assert_eq!(parsed.errors[0].message, "Expect string after JSRAW.");
    }

    #[test]
    fn test_recovery_skips_whole_nested_block() {
        let parsed = parse("if x y:\n    a;\n    b;\nc;\n");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.program.body, vec![Stmt::Expression(Expr::Variable(Identifier::new("c", 4)))]);
    }

    #[test]
    fn test_errors_reported_in_source_order() {
        let parsed = parse("a = ;\nif :\n    b;\nc = );\n");
        let lines: Vec<_> = parsed.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }
}
