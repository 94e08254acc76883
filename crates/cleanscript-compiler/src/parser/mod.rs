//! Parser for Cleanscript source code.
//!
//! Transforms the lexer's token vector into an Abstract Syntax Tree (AST).
//!
//! ## Structure
//!
//! - `parser` - Main recursive descent parser implementation
//!
//! ## Documentation Submodules
//!
//! The following submodules provide documentation and additional tests
//! for specific parsing areas:
//!
//! - `statements` - Statement parsing (if, for, while, etc.)
//! - `expressions` - Expression parsing (operators, literals, calls)
//!
//! ## Usage
//!
//! ```rust
//! use cleanscript_compiler::lexer::Scanner;
//! use cleanscript_compiler::parser::Parser;
//!
//! let tokens = Scanner::new("let x = 1 + 2;").tokenize().tokens;
//! let parsed = Parser::new(tokens).parse();
//! assert!(!parsed.had_error());
//! assert_eq!(parsed.program.body.len(), 1);
//! ```

mod parser;

// Documentation and test submodules
pub mod expressions;
pub mod statements;

pub use parser::{Parsed, Parser};
