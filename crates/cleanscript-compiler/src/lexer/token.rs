//! Token definitions for the Cleanscript lexer.

/// A span in the source code, representing a range of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A token produced by the lexer.
///
/// Literal values (numbers and strings) travel inside [`TokenKind`]; the
/// `lexeme` is always the exact source text the token was scanned from.
/// Synthesized layout tokens have an empty lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Exact source text of the token
    pub lexeme: String,
    /// The span in the source code
    pub span: Span,
    /// 1-based line the token starts on
    pub line: usize,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            line,
        }
    }
}

/// The different kinds of tokens in Cleanscript.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal with separators removed
    Number(f64),
    /// String literal with escapes decoded
    String(String),

    // Identifiers and Keywords
    /// Identifier
    Identifier(String),

    // Keywords
    And,
    Async,
    Await,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Default,
    Delete,
    Do,
    Elif,
    Else,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    In,
    /// `JSRAW`, raw JavaScript passthrough
    JsRaw,
    Lambda,
    Let,
    New,
    Not,
    Null,
    Or,
    Return,
    Switch,
    Then,
    Throw,
    True,
    Try,
    Typeof,
    Undefined,
    Var,
    Void,
    While,
    Yield,

    // Punctuators
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// .
    Dot,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// :
    Colon,
    /// ->
    Arrow,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// **
    StarStar,
    /// /
    Slash,
    /// //
    SlashSlash,
    /// %
    Percent,
    /// ++
    PlusPlus,
    /// --
    MinusMinus,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// &
    Ampersand,
    /// |
    Pipe,
    /// ^
    Caret,
    /// !
    Bang,
    /// ~
    Tilde,
    /// <
    LessThan,
    /// >
    GreaterThan,
    /// <=
    LessThanEqual,
    /// >=
    GreaterThanEqual,
    /// ==
    EqualEqual,
    /// !=
    NotEqual,
    /// =
    Equal,

    // Layout
    /// Indentation grew
    Indent,
    /// Indentation shrank by one level
    Dedent,

    // Special
    /// End of file
    Eof,
}

impl TokenKind {
    /// Looks up a reserved word.
    ///
    /// `constructor` is deliberately absent so it always scans as an
    /// identifier and can name a class method.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "and" => TokenKind::And,
            "async" => TokenKind::Async,
            "await" => TokenKind::Await,
            "break" => TokenKind::Break,
            "case" => TokenKind::Case,
            "catch" => TokenKind::Catch,
            "class" => TokenKind::Class,
            "const" => TokenKind::Const,
            "continue" => TokenKind::Continue,
            "default" => TokenKind::Default,
            "delete" => TokenKind::Delete,
            "do" => TokenKind::Do,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "extends" => TokenKind::Extends,
            "false" => TokenKind::False,
            "finally" => TokenKind::Finally,
            "for" => TokenKind::For,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "in" => TokenKind::In,
            "JSRAW" => TokenKind::JsRaw,
            "lambda" => TokenKind::Lambda,
            "let" => TokenKind::Let,
            "new" => TokenKind::New,
            "not" => TokenKind::Not,
            "null" => TokenKind::Null,
            "or" => TokenKind::Or,
            "return" => TokenKind::Return,
            "switch" => TokenKind::Switch,
            "then" => TokenKind::Then,
            "throw" => TokenKind::Throw,
            "true" => TokenKind::True,
            "try" => TokenKind::Try,
            "typeof" => TokenKind::Typeof,
            "undefined" => TokenKind::Undefined,
            "var" => TokenKind::Var,
            "void" => TokenKind::Void,
            "while" => TokenKind::While,
            "yield" => TokenKind::Yield,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns true if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Async
                | TokenKind::Await
                | TokenKind::Break
                | TokenKind::Case
                | TokenKind::Catch
                | TokenKind::Class
                | TokenKind::Const
                | TokenKind::Continue
                | TokenKind::Default
                | TokenKind::Delete
                | TokenKind::Do
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::Extends
                | TokenKind::False
                | TokenKind::Finally
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::In
                | TokenKind::JsRaw
                | TokenKind::Lambda
                | TokenKind::Let
                | TokenKind::New
                | TokenKind::Not
                | TokenKind::Null
                | TokenKind::Or
                | TokenKind::Return
                | TokenKind::Switch
                | TokenKind::Then
                | TokenKind::Throw
                | TokenKind::True
                | TokenKind::Try
                | TokenKind::Typeof
                | TokenKind::Undefined
                | TokenKind::Var
                | TokenKind::Void
                | TokenKind::While
                | TokenKind::Yield
        )
    }

    /// Returns true for the synthesized indentation tokens.
    pub fn is_layout(&self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Dedent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Span Tests ====================

    #[test]
    fn test_span_new() {
        let span = Span::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
    }

    // ==================== Token Tests ====================

    #[test]
    fn test_token_new() {
        let token = Token::new(TokenKind::Number(42.0), "42", Span::new(0, 2), 1);
        assert_eq!(token.kind, TokenKind::Number(42.0));
        assert_eq!(token.lexeme, "42");
        assert_eq!(token.span, Span::new(0, 2));
        assert_eq!(token.line, 1);
    }

    // ==================== Keyword Tests ====================

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("elif"), Some(TokenKind::Elif));
        assert_eq!(TokenKind::keyword("then"), Some(TokenKind::Then));
        assert_eq!(TokenKind::keyword("lambda"), Some(TokenKind::Lambda));
        assert_eq!(TokenKind::keyword("JSRAW"), Some(TokenKind::JsRaw));
        assert_eq!(TokenKind::keyword("undefined"), Some(TokenKind::Undefined));
    }

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(TokenKind::keyword("jsraw"), None);
        assert_eq!(TokenKind::keyword("If"), None);
    }

    #[test]
    fn test_constructor_is_not_reserved() {
        assert_eq!(TokenKind::keyword("constructor"), None);
    }

    #[test]
    fn test_every_reserved_word_is_keyword() {
        for word in [
            "and", "in", "class", "else", "false", "for", "function", "if", "elif", "then",
            "null", "undefined", "or", "return", "yield", "throw", "true", "var", "let", "const",
            "new", "do", "while", "break", "continue", "switch", "case", "async", "default",
            "extends", "try", "catch", "finally", "JSRAW", "lambda", "await", "not", "typeof",
            "void", "delete",
        ] {
            let kind = TokenKind::keyword(word).unwrap_or(TokenKind::Eof);
            assert!(kind.is_keyword(), "{word} should be a keyword");
        }
    }

    #[test]
    fn test_identifier_is_not_keyword() {
        assert!(!TokenKind::Identifier("foo".into()).is_keyword());
    }

    // ==================== Layout Tests ====================

    #[test]
    fn test_is_layout() {
        assert!(TokenKind::Indent.is_layout());
        assert!(TokenKind::Dedent.is_layout());
        assert!(!TokenKind::Semicolon.is_layout());
    }
}
