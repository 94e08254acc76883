//! The scanner that produces tokens from source text.

use tracing::debug;

use super::{Span, Token, TokenKind};
use crate::error::Diagnostic;

/// A scanner that tokenizes Cleanscript source code.
///
/// Indentation is tracked with a stack of widths that starts at `[0]`.
/// After every newline the leading spaces of the next line are counted: a
/// wider line pushes its width and emits one [`TokenKind::Indent`], a
/// narrower line pops every wider level and emits one [`TokenKind::Dedent`]
/// per pop. Blank lines and lines holding only a `#` comment do not take
/// part in the measurement.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    start: usize,
    line: usize,
    indent_stack: Vec<usize>,
    tokens: Vec<Token>,
    errors: Vec<Diagnostic>,
}

/// Output of [`Scanner::tokenize`].
#[derive(Debug, Clone)]
pub struct Tokenized {
    /// Every token scanned, always terminated by [`TokenKind::Eof`]
    pub tokens: Vec<Token>,
    /// Problems recorded while scanning
    pub errors: Vec<Diagnostic>,
}

impl Tokenized {
    /// Returns true if any lexical error was recorded.
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            start: 0,
            line: 1,
            indent_stack: vec![0],
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scans the whole source.
    ///
    /// Never fails: malformed input is recorded in [`Tokenized::errors`] and
    /// scanning resumes with the next character. Indentation levels still
    /// open at the end of input are closed before the final `Eof`.
    pub fn tokenize(mut self) -> Tokenized {
        while self.peek().is_some() {
            self.start = self.current_pos;
            self.scan_token();
        }

        self.start = self.current_pos;
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.add_layout(TokenKind::Dedent);
        }
        self.add_layout(TokenKind::Eof);

        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            lines = self.line,
            "tokenized source"
        );

        Tokenized {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let Some((_pos, ch)) = self.advance() else {
            return;
        };
        let line = self.line;

        let kind = match ch {
            // Whitespace
            ' ' | '\r' | '\t' => return,
            '\n' => {
                self.line += 1;
                self.scan_indentation();
                return;
            }

            // Comments
            '#' => {
                self.skip_comment();
                return;
            }

            // Single-character tokens
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '~' => TokenKind::Tilde,
            '%' => TokenKind::Percent,
            '&' => TokenKind::Ampersand,
            '|' => TokenKind::Pipe,
            '^' => TokenKind::Caret,

            // Multi-character tokens
            '+' => self.scan_plus(),
            '-' => self.scan_minus(),
            '*' => self.scan_star(),
            '/' => self.scan_slash(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equal(),
            '!' => self.scan_bang(),

            // String literals
            '"' | '\'' | '`' => match self.scan_string(ch) {
                Some(kind) => kind,
                None => return,
            },

            // Numbers
            '0'..='9' => match self.scan_number() {
                Some(kind) => kind,
                None => return,
            },

            // Identifiers and keywords
            _ if is_id_start(ch) => self.scan_identifier(),

            _ => {
                self.report(line, &ch.to_string(), "Unexpected character.");
                return;
            }
        };

        self.add_token(kind, line);
    }

    fn add_token(&mut self, kind: TokenKind, line: usize) {
        let lexeme = &self.source[self.start..self.current_pos];
        self.tokens.push(Token::new(
            kind,
            lexeme,
            Span::new(self.start, self.current_pos),
            line,
        ));
    }

    fn add_layout(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(
            kind,
            "",
            Span::new(self.current_pos, self.current_pos),
            self.line,
        ));
    }

    fn report(&mut self, line: usize, lexeme: &str, message: &str) {
        self.errors.push(Diagnostic::lex(line, lexeme, message));
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = pos + ch.len_utf8();
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map(|(_, ch)| ch)
    }

    /// Measures the indentation of the line that starts at the cursor.
    fn scan_indentation(&mut self) {
        let line = self.line;
        let mut width = 0;
        let mut saw_tab = false;

        loop {
            match self.peek() {
                // Blank line: no layout change
                Some('\r' | '\n') => return,
                Some('#') if self.peek_next() != Some('*') => return,
                Some(' ') => {
                    self.advance();
                    width += 1;
                }
                Some('\t') => {
                    self.advance();
                    width += 1;
                    if !saw_tab {
                        saw_tab = true;
                        self.report(line, "\\t", "Tabs are not allowed in indentation.");
                    }
                }
                _ => break,
            }
        }

        self.start = self.current_pos;
        let top = self.indent_stack.last().copied().unwrap_or(0);
        if width > top {
            self.indent_stack.push(width);
            self.add_layout(TokenKind::Indent);
        } else {
            while self.indent_stack.last().is_some_and(|&level| level > width) {
                self.indent_stack.pop();
                self.add_layout(TokenKind::Dedent);
            }
        }
    }

    fn skip_comment(&mut self) {
        if self.peek() != Some('*') {
            // Line comment: skip until end of line
            while let Some(ch) = self.peek() {
                if ch == '\n' {
                    break;
                }
                self.advance();
            }
            return;
        }

        // Block comment: skip until *#
        let line = self.line;
        self.advance();
        loop {
            match self.advance() {
                None => {
                    self.report(line, "#*", "Unterminated block comment.");
                    return;
                }
                Some((_, '\n')) => self.line += 1,
                Some((_, '*')) if self.peek() == Some('#') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
            }
        }
    }

    fn scan_plus(&mut self) -> TokenKind {
        if self.peek() == Some('+') {
            self.advance();
            TokenKind::PlusPlus
        } else {
            TokenKind::Plus
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        match self.peek() {
            Some('-') => {
                self.advance();
                TokenKind::MinusMinus
            }
            Some('>') => {
                self.advance();
                TokenKind::Arrow
            }
            _ => TokenKind::Minus,
        }
    }

    fn scan_star(&mut self) -> TokenKind {
        if self.peek() == Some('*') {
            self.advance();
            TokenKind::StarStar
        } else {
            TokenKind::Star
        }
    }

    fn scan_slash(&mut self) -> TokenKind {
        if self.peek() == Some('/') {
            self.advance();
            TokenKind::SlashSlash
        } else {
            TokenKind::Slash
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        match self.peek() {
            Some('<') => {
                self.advance();
                TokenKind::LeftShift
            }
            Some('=') => {
                self.advance();
                TokenKind::LessThanEqual
            }
            _ => TokenKind::LessThan,
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        match self.peek() {
            Some('>') => {
                self.advance();
                TokenKind::RightShift
            }
            Some('=') => {
                self.advance();
                TokenKind::GreaterThanEqual
            }
            _ => TokenKind::GreaterThan,
        }
    }

    fn scan_equal(&mut self) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            TokenKind::EqualEqual
        } else {
            TokenKind::Equal
        }
    }

    fn scan_bang(&mut self) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            TokenKind::NotEqual
        } else {
            TokenKind::Bang
        }
    }

    fn scan_string(&mut self, quote: char) -> Option<TokenKind> {
        let line = self.line;
        let mut value = String::new();

        loop {
            match self.advance() {
                None => {
                    self.report(line, &quote.to_string(), "Unterminated string.");
                    return None;
                }
                Some((_, ch)) if ch == quote => break,
                Some((_, '\n')) => {
                    self.line += 1;
                    value.push('\n');
                }
                Some((_, '\\')) => {
                    // Handle escape sequences
                    if let Some((_, escaped)) = self.advance() {
                        match escaped {
                            'n' => value.push('\n'),
                            'r' => value.push('\r'),
                            't' => value.push('\t'),
                            '0' => value.push('\0'),
                            '\n' => {
                                self.line += 1;
                                value.push('\n');
                            }
                            _ => value.push(escaped),
                        }
                    }
                }
                Some((_, ch)) => value.push(ch),
            }
        }

        Some(TokenKind::String(value))
    }

    fn scan_number(&mut self) -> Option<TokenKind> {
        let line = self.line;
        let mut valid = self.scan_digits();

        // Fractional part
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            valid &= self.scan_digits();
        }

        let lexeme = &self.source[self.start..self.current_pos];
        if !valid {
            let lexeme = lexeme.to_string();
            self.report(line, &lexeme, "Invalid numeric separator.");
            return None;
        }

        let digits: String = lexeme.chars().filter(|&c| c != '_').collect();
        match digits.parse::<f64>() {
            Ok(value) => Some(TokenKind::Number(value)),
            Err(_) => {
                let lexeme = lexeme.to_string();
                self.report(line, &lexeme, "Invalid number.");
                None
            }
        }
    }

    /// Consumes a run of digits with single `_` separators.
    ///
    /// Returns false if a separator was doubled or not followed by a digit.
    fn scan_digits(&mut self) -> bool {
        let mut valid = true;
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.advance();
                }
                Some('_') => {
                    self.advance();
                    if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        valid = false;
                    }
                }
                _ => return valid,
            }
        }
    }

    fn scan_identifier(&mut self) -> TokenKind {
        while let Some(ch) = self.peek() {
            if is_id_continue(ch) {
                self.advance();
            } else {
                break;
            }
        }

        let name = &self.source[self.start..self.current_pos];
        TokenKind::keyword(name).unwrap_or_else(|| TokenKind::Identifier(name.to_string()))
    }
}

fn is_id_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_id_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .tokenize()
            .tokens
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_simple_statement() {
        assert_eq!(
            kinds("var x = 42;"),
            vec![
                TokenKind::Var,
                ident("x"),
                TokenKind::Equal,
                TokenKind::Number(42.0),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("== != <= >= << >> ** // ++ -- ->"),
            vec![
                TokenKind::EqualEqual,
                TokenKind::NotEqual,
                TokenKind::LessThanEqual,
                TokenKind::GreaterThanEqual,
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::StarStar,
                TokenKind::SlashSlash,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::Arrow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_indent_and_dedent() {
        let source = "if x:\n    y;\nz;";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::If,
                ident("x"),
                TokenKind::Colon,
                TokenKind::Indent,
                ident("y"),
                TokenKind::Semicolon,
                TokenKind::Dedent,
                ident("z"),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_multiple_dedents() {
        let source = "a:\n  b:\n    c;\nd;";
        let dedents = kinds(source)
            .iter()
            .filter(|k| **k == TokenKind::Dedent)
            .count();
        assert_eq!(dedents, 2);
    }

    #[test]
    fn test_dedent_between_levels_closes_block() {
        let source = "if a:\n    b;\n  c;";
        let result = Scanner::new(source).tokenize();
        assert!(result.errors.is_empty());
        let kinds: Vec<_> = result.tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::If,
                ident("a"),
                TokenKind::Colon,
                TokenKind::Indent,
                ident("b"),
                TokenKind::Semicolon,
                TokenKind::Dedent,
                ident("c"),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_open_levels_closed_at_end() {
        let tokens = kinds("if x:\n    if y:\n        z;");
        let indents = tokens.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = tokens.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, 2);
        assert_eq!(dedents, 2);
        assert_eq!(tokens.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn test_blank_lines_do_not_change_indentation() {
        let with_blank = kinds("if x:\n    a;\n\n    \n    b;\n");
        let without_blank = kinds("if x:\n    a;\n    b;\n");
        assert_eq!(with_blank, without_blank);
    }

    #[test]
    fn test_crlf_blank_lines() {
        let tokens = kinds("a;\r\n\r\nb;\r\n");
        assert!(!tokens.contains(&TokenKind::Indent));
        assert!(!tokens.contains(&TokenKind::Dedent));
    }

    #[test]
    fn test_comment_line_does_not_change_indentation() {
        let tokens = kinds("a;\n        # note\nb;");
        assert_eq!(
            tokens,
            vec![
                ident("a"),
                TokenKind::Semicolon,
                ident("b"),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tab_indentation_is_an_error() {
        let result = Scanner::new("if x:\n\ty;").tokenize();
        assert!(result.had_error());
        assert_eq!(result.errors[0].line, 2);
    }

    #[test]
    fn test_string_delimiters() {
        assert_eq!(
            kinds(r#""a" 'b' `c`"#),
            vec![
                TokenKind::String("a".into()),
                TokenKind::String("b".into()),
                TokenKind::String("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\nb\"c""#)[0],
            TokenKind::String("a\nb\"c".into())
        );
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let result = Scanner::new("\"a\nb\" x").tokenize();
        assert_eq!(result.tokens[0].line, 1);
        assert_eq!(result.tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let result = Scanner::new("\"abc").tokenize();
        assert!(result.had_error());
        assert_eq!(result.errors[0].message, "Unterminated string.");
    }

    #[test]
    fn test_numbers() {
        assert!(matches!(kinds("42")[0], TokenKind::Number(n) if n == 42.0));
        assert!(matches!(kinds("3.25")[0], TokenKind::Number(n) if n == 3.25));
        assert!(matches!(kinds("1_000_000")[0], TokenKind::Number(n) if n == 1_000_000.0));
        assert!(matches!(kinds("1_0.2_5")[0], TokenKind::Number(n) if n == 10.25));
    }

    #[test]
    fn test_number_followed_by_dot_method() {
        assert_eq!(
            kinds("1.a"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Dot,
                ident("a"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_doubled_separator_is_an_error() {
        let result = Scanner::new("1__0;").tokenize();
        assert!(result.had_error());
        assert_eq!(result.errors[0].lexeme, "1__0");
    }

    #[test]
    fn test_trailing_separator_is_an_error() {
        assert!(Scanner::new("1_;").tokenize().had_error());
    }

    #[test]
    fn test_comments() {
        assert_eq!(kinds("# hello\nx"), vec![ident("x"), TokenKind::Eof]);
        assert_eq!(kinds("#* a\nb *# x"), vec![ident("x"), TokenKind::Eof]);
    }

    #[test]
    fn test_block_comment_counts_lines() {
        let result = Scanner::new("#* a\nb\n*# x").tokenize();
        assert_eq!(result.tokens[0].line, 3);
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert!(Scanner::new("#* never closed").tokenize().had_error());
    }

    #[test]
    fn test_keywords_and_constructor() {
        assert_eq!(
            kinds("elif constructor lambda"),
            vec![
                TokenKind::Elif,
                ident("constructor"),
                TokenKind::Lambda,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character_continues() {
        let result = Scanner::new("a @ b").tokenize();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].lexeme, "@");
        let kinds: Vec<_> = result.tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ident("a"), ident("b"), TokenKind::Eof]);
    }

    #[test]
    fn test_lexemes_and_lines() {
        let result = Scanner::new("a\nfoo >= 2").tokenize();
        let foo = &result.tokens[1];
        assert_eq!(foo.lexeme, "foo");
        assert_eq!(foo.line, 2);
        assert_eq!(result.tokens[2].lexeme, ">=");
    }
}
