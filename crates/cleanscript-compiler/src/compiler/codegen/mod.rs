//! Code generation from AST to JavaScript text.
//!
//! This module contains the [`Compiler`], which walks a parsed program once,
//! depth-first and left to right, and emits JavaScript. Per-call state (the
//! helper flags, the strict-mode switch and the counter used for synthesized
//! names) lives in a private `Generator` built by [`Compiler::compile`] and
//! dropped when it returns.

mod expressions;
mod output;
mod statements;


use tracing::debug;

use crate::ast::*;
use crate::compiler::helpers::{HelperFlags, STRICT_PRAGMA};

use output::CodeBuffer;

/// Compiles a Cleanscript AST to JavaScript.
#[derive(Debug, Default, Clone, Copy)]
pub struct Compiler;

impl Compiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self
    }

    /// Generates JavaScript for `program`.
    ///
    /// The output starts with the `"use strict";` pragma (unless the program
    /// opens with the `"unstrict"` directive), followed by the runtime
    /// helpers the program uses, followed by the program itself.
    pub fn compile(&self, program: &Program) -> String {
        let mut generator = Generator::new();

        let body = match program.body.split_first() {
            Some((first, rest)) => match directive(first) {
                Some(Directive::Unstrict) => {
                    generator.strict = false;
                    rest
                }
                Some(Directive::UseStrict) => rest,
                None => program.body.as_slice(),
            },
            None => program.body.as_slice(),
        };

        for stmt in body {
            generator.statement(stmt);
        }

        debug!(
            strict = generator.strict,
            helpers = ?generator.helpers,
            "generated JavaScript"
        );

        generator.finish()
    }
}

enum Directive {
    UseStrict,
    Unstrict,
}

/// Recognizes a leading `"use strict";` or `"unstrict";` statement.
fn directive(stmt: &Stmt) -> Option<Directive> {
    match stmt {
        Stmt::Expression(Expr::Literal(Literal::String(text))) => match text.as_str() {
            "use strict" => Some(Directive::UseStrict),
            "unstrict" => Some(Directive::Unstrict),
            _ => None,
        },
        _ => None,
    }
}

/// Mutable state for one compile call.
struct Generator {
    out: CodeBuffer,
    helpers: HelperFlags,
    strict: bool,
    next_id: usize,
}

impl Generator {
    fn new() -> Self {
        Self {
            out: CodeBuffer::new(),
            helpers: HelperFlags::default(),
            strict: true,
            next_id: 0,
        }
    }

    /// Returns a number unique within this compile, for synthesized names.
    fn fresh_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Renders a parameter list and the body prologue it needs.
    ///
    /// Wildcard defaults come first in the prologue, then casts in
    /// declaration order.
    fn parameters(&mut self, params: &[Parameter]) -> (String, Vec<String>) {
        let mut rendered = Vec::with_capacity(params.len());
        let mut defaults = Vec::new();
        let mut casts = Vec::new();

        for param in params {
            let name = &param.name.name;
            match (param.kind, &param.default) {
                (ParameterKind::Standard, Some(default)) => {
                    rendered.push(format!("{name} = {}", self.expression(default)));
                }
                (ParameterKind::Standard, None) => rendered.push(name.clone()),
                (ParameterKind::Wildcard, default) => {
                    rendered.push(format!("...{name}"));
                    if let Some(default) = default {
                        defaults.push(format!(
                            "{name} = {name}.length > 0 ? {name} : {};",
                            self.operand(default)
                        ));
                    }
                }
            }
            if let Some(cast) = &param.cast {
                casts.push(format!("{name} = {}({name});", cast.name));
            }
        }

        defaults.extend(casts);
        (rendered.join(", "), defaults)
    }

    fn finish(self) -> String {
        let mut code = String::new();
        if self.strict {
            code.push_str(STRICT_PRAGMA);
        }
        code.push_str(&self.helpers.prologue());
        code.push_str(&self.out.finish());
        code
    }
}
