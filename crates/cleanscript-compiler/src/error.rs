// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Diagnostics and error types for the compiler pipeline.
//!
//! Neither the lexer nor the parser stops at the first problem. Each stage
//! records a [`Diagnostic`] per problem and keeps going; the driver then
//! refuses to run the next stage if anything was recorded and hands the
//! caller a [`CompileError`] holding every diagnostic of the failing stage.

use std::fmt;
use thiserror::Error;

/// Result type for whole-pipeline operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Which stage produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Recorded while scanning characters into tokens
    Lex,
    /// Recorded while building the syntax tree
    Parse,
}

/// A single problem found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stage that reported the problem
    pub kind: DiagnosticKind,
    /// Human readable description
    pub message: String,
    /// 1-based source line
    pub line: usize,
    /// Offending text, empty at end of input
    pub lexeme: String,
}

impl Diagnostic {
    /// Creates a lexer diagnostic.
    pub fn lex(line: usize, lexeme: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Lex,
            message: message.into(),
            line,
            lexeme: lexeme.into(),
        }
    }

    /// Creates a parser diagnostic.
    pub fn parse(line: usize, lexeme: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Parse,
            message: message.into(),
            line,
            lexeme: lexeme.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lexeme.is_empty() {
            write!(f, "[Line: {}] Error at end: {}", self.line, self.message)
        } else {
            write!(
                f,
                "[Line: {}] Error at \"{}\": {}",
                self.line, self.lexeme, self.message
            )
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Compilation failed; no JavaScript was produced.
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    /// The source could not be tokenized
    #[error("{} lexical error(s); first: {}", .0.len(), first(.0))]
    Lex(Vec<Diagnostic>),

    /// The token stream could not be parsed
    #[error("{} syntax error(s); first: {}", .0.len(), first(.0))]
    Parse(Vec<Diagnostic>),
}

impl CompileError {
    /// Every diagnostic recorded by the failing stage, in source order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CompileError::Lex(diagnostics) | CompileError::Parse(diagnostics) => diagnostics,
        }
    }
}

fn first(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}
