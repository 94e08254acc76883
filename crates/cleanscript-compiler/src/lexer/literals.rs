//! Literal scanning documentation.
//!
//! This module documents the literal scanning logic in `scanner.rs`.
//!
//! ## Numeric Literals
//!
//! Method: `scan_number`
//!
//! ```text
//! 42          -> 42
//! 3.25        -> 3.25
//! 1_000_000   -> 1000000 (single underscores separate digits)
//! 1__0        -> error: Invalid numeric separator.
//! 1_          -> error: Invalid numeric separator.
//! ```
//!
//! There are no hex, octal, binary or exponent forms. A `.` only starts a
//! fraction when a digit follows, so `1.toString` scans as `1` `.` `toString`.
//!
//! ## String Literals
//!
//! Method: `scan_string`
//!
//! `"double"`, `'single'` and `` `backtick` `` strings are all plain
//! strings; backticks do not interpolate. Strings may span lines.
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\n` | Newline |
//! | `\r` | Carriage return |
//! | `\t` | Tab |
//! | `\0` | NUL |
//! | `\x` | Any other character `x` verbatim |
//!
//! ## Regular Expressions
//!
//! Regex literals are written `r"/pattern/flags"`. The scanner sees an
//! identifier `r` followed by a string; the parser joins the two.
//!
//! ## Identifiers
//!
//! Method: `scan_identifier`
//!
//! ASCII letters, digits and `_`, not starting with a digit. Reserved words
//! are looked up with `TokenKind::keyword`; `constructor` is never reserved.

// This module serves as documentation. The actual implementation is in scanner.rs.

#[cfg(test)]
mod tests {
    use crate::lexer::{Scanner, TokenKind};

    fn scan_single(src: &str) -> TokenKind {
        Scanner::new(src)
            .tokenize()
            .tokens
            .into_iter()
            .next()
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    #[test]
    fn test_integer() {
        assert!(matches!(scan_single("0"), TokenKind::Number(n) if n == 0.0));
        assert!(matches!(scan_single("123"), TokenKind::Number(n) if n == 123.0));
    }

    #[test]
    fn test_fraction() {
        assert!(matches!(scan_single("0.5"), TokenKind::Number(n) if n == 0.5));
    }

    #[test]
    fn test_separators() {
        assert!(matches!(scan_single("10_000"), TokenKind::Number(n) if n == 10000.0));
    }

    #[test]
    fn test_backtick_string_is_plain() {
        assert_eq!(scan_single("`${x}`"), TokenKind::String("${x}".into()));
    }

    #[test]
    fn test_unknown_escape_is_kept() {
        assert_eq!(scan_single(r#""\q""#), TokenKind::String("q".into()));
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(scan_single(r"'it\'s'"), TokenKind::String("it's".into()));
    }

    #[test]
    fn test_identifier_with_digits() {
        assert_eq!(scan_single("_x1"), TokenKind::Identifier("_x1".into()));
    }

    #[test]
    fn test_dollar_is_not_identifier() {
        let result = Scanner::new("$_in").tokenize();
        assert!(result.had_error());
    }

    #[test]
    fn test_regex_scans_as_identifier_and_string() {
        let kinds: Vec<_> = Scanner::new(r#"r"/a+/g""#)
            .tokenize()
            .tokens
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier("r".into()),
                TokenKind::String("/a+/g".into()),
                TokenKind::Eof,
            ]
        );
    }
}
