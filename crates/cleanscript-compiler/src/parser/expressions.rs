//! Expression parsing utilities and documentation.
//!
//! This module documents the expression parsing logic found in `parser.rs`.
//! Expression parsing uses recursive descent with operator precedence.
//!
//! ## Precedence Table (lowest to highest)
//!
//! | Precedence | Operators | Method |
//! |------------|-----------|--------|
//! | 1 | `=` | `parse_assignment` |
//! | 2 | `or` | `parse_or` |
//! | 3 | `and` | `parse_and` |
//! | 4 | `in` | `parse_membership` |
//! | 5 | `then` `else` | `parse_ternary` |
//! | 6 | `==` `!=` | `parse_equality` |
//! | 7 | `<` `>` `<=` `>=` | `parse_comparison` |
//! | 8 | `\|` `^` | `parse_bitwise_or` |
//! | 9 | `&` | `parse_bitwise_and` |
//! | 10 | `<<` `>>` | `parse_shift` |
//! | 11 | `+` `-` | `parse_additive` |
//! | 12 | `*` `/` `//` `%` | `parse_multiplicative` |
//! | 13 | `**` (right-associative) | `parse_exponent` |
//! | 14 | `not` `!` `-` `~` `++` `--` | `parse_unary` |
//! | 15 | `new` `await` `typeof` `void` `delete` | `parse_keyword_prefix` |
//! | 16 | `()` `.` `[]` `++` `--` (postfix) | `parse_call` |
//! | 17 | primary | `parse_primary` |
//!
//! The right operand of `in` and both ternary branches are parsed at the
//! equality level.
//!
//! ## Primary Expressions
//!
//! - Identifiers: `foo`, `bar`
//! - Literals: `42`, `"hello"`, `true`, `null`, `undefined`
//! - Regex literals: `r"/ab+c/gi"`
//! - Array literals: `[1, 2, 3]`
//! - Dictionary literals: `{a: 1, "b": 2, shorthand}`
//! - Lambdas: `lambda x, y: x + y`, `async lambda: fetch(url)`
//! - Parenthesized: `(a + b)`
//!
//! Array and dictionary literals may span several lines; the indentation
//! tokens between their brackets are ignored.
//!
//! ## Subscripts and Slices
//!
//! ```text
//! items[i]       -> index
//! items[1:3]     -> slice with both bounds
//! items[:3]      -> slice from the start
//! items[1:]      -> slice to the end
//! ```
//!
//! ## Assignment Targets
//!
//! | Left side | Node produced |
//! |-----------|---------------|
//! | `name` | `Assign` |
//! | `obj.name` | `Set` |
//! | `obj[i]`, `obj[a:b]` | `AssignSubscript` |
//!
//! Anything else is reported as an invalid assignment target.

// This module serves as documentation. The actual implementation is in parser.rs.

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::Scanner;
    use crate::parser::Parser;

    fn parse_expr(src: &str) -> Expr {
        let source = format!("{src};");
        let parsed = Parser::new(Scanner::new(&source).tokenize().tokens).parse();
        assert!(!parsed.had_error(), "errors: {:?}", parsed.errors);
        match parsed.program.body.into_iter().next() {
            Some(Stmt::Expression(expr)) => expr,
            other => panic!("Expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_number() {
        assert!(matches!(parse_expr("42"), Expr::Literal(Literal::Number(_))));
    }

    #[test]
    fn test_parse_identifier() {
        assert!(matches!(parse_expr("foo"), Expr::Variable(_)));
    }

    #[test]
    fn test_parse_this_is_a_variable() {
        assert!(matches!(parse_expr("this"), Expr::Variable(ref id) if id.name == "this"));
    }

    #[test]
    fn test_parse_grouping() {
        assert!(matches!(parse_expr("(1 + 2)"), Expr::Grouping(_)));
    }

    #[test]
    fn test_floor_division() {
        assert!(matches!(parse_expr("7 // 2"), Expr::Binary(ref b) if b.operator == BinaryOperator::FloorDiv));
    }

    #[test]
    fn test_shift_and_bitwise() {
        assert!(matches!(parse_expr("a << 2 & b"), Expr::Binary(ref b) if b.operator == BinaryOperator::BitAnd));
        assert!(matches!(parse_expr("a ^ b"), Expr::Binary(ref b) if b.operator == BinaryOperator::BitXor));
    }

    #[test]
    fn test_unary_binds_tighter_than_exponent() {
        let Expr::Binary(bin) = parse_expr("-a ** 2") else {
            panic!("Expected binary");
        };
        assert_eq!(bin.operator, BinaryOperator::Exp);
        assert!(matches!(*bin.left, Expr::Unary(_)));
    }

    #[test]
    fn test_ternary_binds_tighter_than_and() {
        let Expr::Logical(logical) = parse_expr("a and b then c else d") else {
            panic!("Expected logical");
        };
        assert!(matches!(*logical.right, Expr::Ternary(_)));
    }

    #[test]
    fn test_or_is_lowest_binary() {
        assert!(matches!(parse_expr("a or b and c"), Expr::Logical(ref l) if l.operator == LogicalOperator::Or));
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let Expr::Assign(assign) = parse_expr("a = b = 1") else {
            panic!("Expected assignment");
        };
        assert!(matches!(*assign.value, Expr::Assign(_)));
    }

    #[test]
    fn test_keyword_property_names() {
        assert!(matches!(parse_expr("p.then"), Expr::Get(ref g) if g.name.name == "then"));
        assert!(matches!(parse_expr("p.finally"), Expr::Get(ref g) if g.name.name == "finally"));
    }

    #[test]
    fn test_new_with_member_callee() {
        let Expr::New(inner) = parse_expr("new a.B(1)") else {
            panic!("Expected new");
        };
        assert!(matches!(*inner, Expr::Call(_)));
    }

    #[test]
    fn test_multiline_call_arguments() {
        let Expr::Call(call) = parse_expr("f(\n    1,\n    2\n)") else {
            panic!("Expected call");
        };
        assert_eq!(call.arguments.len(), 2);
    }

    #[test]
    fn test_computed_dictionary_key() {
        let Expr::DictionaryLiteral(entries) = parse_expr("{[k]: 1, \"s\": 2}") else {
            panic!("Expected dictionary");
        };
        assert!(matches!(entries[0].key, Expr::ArrayLiteral(_)));
        assert!(matches!(entries[1].key, Expr::Literal(Literal::String(_))));
    }

    #[test]
    fn test_lambda_with_cast_and_wildcard() {
        let Expr::Lambda(lambda) = parse_expr("lambda String -> *parts: parts") else {
            panic!("Expected lambda");
        };
        assert_eq!(lambda.params[0].kind, ParameterKind::Wildcard);
        assert!(lambda.params[0].cast.is_some());
    }

    #[test]
    fn test_r_alone_is_a_variable() {
        assert!(matches!(parse_expr("r"), Expr::Variable(_)));
    }
}
