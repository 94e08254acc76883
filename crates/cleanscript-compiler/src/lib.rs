// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # cleanscript-compiler
//!
//! A compiler from Cleanscript, an indentation-sensitive scripting language,
//! to JavaScript.
//!
//! ## Overview
//!
//! The pipeline has three stages, each in its own module:
//! - [`lexer`]: source text to tokens, with `Indent`/`Dedent` synthesized
//!   from leading whitespace
//! - [`parser`]: tokens to an [`ast::Program`], with panic-mode recovery so
//!   one run reports many errors
//! - [`compiler`]: AST to JavaScript, prepending only the runtime helpers
//!   the program actually uses
//!
//! ## Quick Start
//!
//! ```rust
//! let js = cleanscript_compiler::compile("x = 7 // 2;\n").unwrap();
//! assert!(js.contains("x = Math.floor(7 / 2);"));
//! ```
//!
//! Every call builds its own scanner, parser and generator, so independent
//! compiles may run on different threads without coordination.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;

pub use compiler::Compiler;
pub use error::{CompileError, Diagnostic, DiagnosticKind, Result};

use tracing::debug;

/// Compiles Cleanscript source text to JavaScript.
///
/// If the lexer records any error the parser is not run, and if the parser
/// records any error no code is generated. In both cases the returned
/// [`CompileError`] carries every diagnostic of the failing stage.
///
/// # Examples
///
/// ```rust
/// use cleanscript_compiler::{compile, CompileError};
///
/// assert!(compile("print(\"hi\");").is_ok());
/// assert!(matches!(compile("x = \"open"), Err(CompileError::Lex(_))));
/// assert!(matches!(compile("x = ;"), Err(CompileError::Parse(_))));
/// ```
pub fn compile(source: &str) -> Result<String> {
    let tokenized = lexer::Scanner::new(source).tokenize();
    if tokenized.had_error() {
        debug!(errors = tokenized.errors.len(), "lexing failed");
        return Err(CompileError::Lex(tokenized.errors));
    }
    debug!(tokens = tokenized.tokens.len(), "lexed source");

    let parsed = parser::Parser::new(tokenized.tokens).parse();
    if parsed.had_error() {
        debug!(errors = parsed.errors.len(), "parsing failed");
        return Err(CompileError::Parse(parsed.errors));
    }
    debug!(statements = parsed.program.body.len(), "parsed program");

    Ok(Compiler::new().compile(&parsed.program))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_success() {
        let js = compile("let x = 1;\n").unwrap();
        assert_eq!(js, "\"use strict\";\nlet x = 1;\n");
    }

    #[test]
    fn test_lex_errors_stop_the_pipeline() {
        // The stray `)` would be a syntax error, but parsing never starts.
        let err = compile("x = 1__0);\n").unwrap_err();
        let CompileError::Lex(diagnostics) = err else {
            panic!("Expected lexical failure");
        };
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Invalid numeric separator.");
    }

    #[test]
    fn test_parse_errors_reported_together() {
        let err = compile("a = ;\nb = ;\n").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
        assert_eq!(err.diagnostics().len(), 2);
    }
}
