//! Lexical analysis (tokenization) for Cleanscript source code.
//!
//! The lexer transforms Cleanscript source text into a flat vector of
//! tokens, synthesizing `Indent`/`Dedent` tokens from leading whitespace so
//! the parser never has to look at columns.
//!
//! ## Structure
//!
//! - `scanner.rs` - Main `Scanner` struct that produces tokens
//! - `token.rs` - `Token` and `TokenKind` definitions, reserved words
//!
//! ## Documentation Submodules
//!
//! - `operators` - Multi-character operator scanning
//! - `literals` - Number, string, and identifier literals
//!
//! ## Usage
//!
//! ```rust
//! use cleanscript_compiler::lexer::{Scanner, TokenKind};
//!
//! let result = Scanner::new("if ready:\n    go();\n").tokenize();
//! assert!(!result.had_error());
//! assert!(result.tokens.iter().any(|t| t.kind == TokenKind::Indent));
//! ```

mod scanner;
mod token;

// Documentation and test submodules
pub mod literals;
pub mod operators;

pub use scanner::{Scanner, Tokenized};
pub use token::{Span, Token, TokenKind};
