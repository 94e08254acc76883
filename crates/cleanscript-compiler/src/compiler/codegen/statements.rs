//! Statement lowering.
//!
//! ## Statement Lowering Overview
//!
//! | Statement | JavaScript | Notes |
//! |-----------|------------|-------|
//! | `var/let/const` | same keyword | one name per declaration |
//! | `if/elif/else` | `if / else if / else` | |
//! | `while` | `while (c) {}` | |
//! | `do: ... while c;` | `do {} while (c);` | |
//! | `for x in e:` | counted `for` over `$_createIterable(e)` | raises the iterable flag |
//! | `switch` | `switch` with `break;` after every case | no fallthrough |
//! | `try` | `try/catch/finally` | `else` uses a synthesized flag |
//! | function | `function name() {}` | parameter prologue first |
//! | class | `class A extends B {}` | methods only |
//! | `JSRAW "code";` | `code` | copied untouched |
//!
//! ## For Loops
//!
//! ```text
//! for item in items:
//!     use(item);
//!
//! for (let $_i0 = 0, $_seq0 = $_createIterable(items); $_i0 < $_seq0.length; $_i0++) {
//!     let item = $_seq0[$_i0];
//!     use(item);
//! }
//! ```
//!
//! ## Try / Else
//!
//! The else body must run only when the protected block finished without
//! throwing, so a flag is set before the block and cleared on entry to the
//! catch body:
//!
//! ```text
//! {
//!     let $_ok0 = true;
//!     try { ... } catch (e) { $_ok0 = false; ... }
//!     if ($_ok0) { ...else body... }
//! }
//! ```
//!
//! With a `finally` the outer braces become `try { ... } finally { ... }`.
//! With no `catch` the synthesized handler rethrows after clearing the flag.

use super::Generator;
use crate::ast::*;

impl Generator {
    pub(super) fn statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => {
                let text = self.expression(expr);
                if needs_statement_parens(&text) {
                    self.out.line(&format!("({text});"));
                } else {
                    self.out.line(&format!("{text};"));
                }
            }
            Stmt::RawPassthrough(code) => self.out.raw(code),
            Stmt::Function(func) => self.function(func),
            Stmt::Return(value) => match value {
                Some(value) => {
                    let value = self.expression(value);
                    self.out.line(&format!("return {value};"));
                }
                None => self.out.line("return;"),
            },
            Stmt::Throw(value) => {
                let value = self.expression(value);
                self.out.line(&format!("throw {value};"));
            }
            Stmt::Yield(value) => match value {
                Some(value) => {
                    let value = self.expression(value);
                    self.out.line(&format!("yield {value};"));
                }
                None => self.out.line("yield;"),
            },
            Stmt::Class(class) => self.class(class),
            Stmt::Block(block) => {
                self.out.open("");
                self.block(block);
                self.out.close();
            }
            Stmt::While(stmt) => {
                let condition = self.expression(&stmt.condition);
                self.out.open(&format!("while ({condition})"));
                self.block(&stmt.body);
                self.out.close();
            }
            Stmt::Do(stmt) => {
                self.out.open("do");
                self.block(&stmt.body);
                let condition = self.expression(&stmt.condition);
                self.out.close_with(&format!(" while ({condition});"));
            }
            Stmt::For(stmt) => self.for_in(stmt),
            Stmt::Try(stmt) => self.try_statement(stmt),
            Stmt::If(stmt) => self.if_statement(stmt),
            Stmt::Switch(stmt) => self.switch(stmt),
            Stmt::Break => self.out.line("break;"),
            Stmt::Continue => self.out.line("continue;"),
            Stmt::Var(decl) => self.declaration("var", decl),
            Stmt::Let(decl) => self.declaration("let", decl),
            Stmt::Const(decl) => self.declaration("const", decl),
        }
    }

    fn block(&mut self, block: &Block) {
        for stmt in &block.body {
            self.statement(stmt);
        }
    }

    fn declaration(&mut self, keyword: &str, decl: &VariableDeclaration) {
        let name = &decl.name.name;
        match &decl.init {
            Some(init) => {
                let init = self.expression(init);
                self.out.line(&format!("{keyword} {name} = {init};"));
            }
            None => self.out.line(&format!("{keyword} {name};")),
        }
    }

    fn function(&mut self, func: &FunctionDeclaration) {
        let (params, prologue) = self.parameters(&func.params);
        let header = format!(
            "{}function{} {}({params})",
            if func.is_async { "async " } else { "" },
            if func.is_generator { "*" } else { "" },
            func.name.name,
        );
        self.function_body(&header, &prologue, &func.body);
    }

    fn method(&mut self, method: &FunctionDeclaration) {
        let (params, prologue) = self.parameters(&method.params);
        let header = format!(
            "{}{}{}({params})",
            if method.is_async { "async " } else { "" },
            if method.is_generator { "*" } else { "" },
            method.name.name,
        );
        self.function_body(&header, &prologue, &method.body);
    }

    fn function_body(&mut self, header: &str, prologue: &[String], body: &Block) {
        self.out.open(header);
        for line in prologue {
            self.out.line(line);
        }
        self.block(body);
        self.out.close();
    }

    fn class(&mut self, class: &ClassDeclaration) {
        let header = match &class.superclass {
            Some(superclass) => {
                let superclass = self.member_object(superclass);
                format!("class {} extends {superclass}", class.name.name)
            }
            None => format!("class {}", class.name.name),
        };

        self.out.open(&header);
        for method in &class.methods {
            self.method(method);
        }
        self.out.close();
    }

    fn if_statement(&mut self, stmt: &IfStatement) {
        let condition = self.expression(&stmt.condition);
        self.out.open(&format!("if ({condition})"));
        self.block(&stmt.then_branch);

        for branch in &stmt.elif_branches {
            let condition = self.expression(&branch.condition);
            self.out.reopen(&format!("else if ({condition})"));
            self.block(&branch.body);
        }

        if let Some(else_branch) = &stmt.else_branch {
            self.out.reopen("else");
            self.block(else_branch);
        }
        self.out.close();
    }

    fn for_in(&mut self, stmt: &ForStatement) {
        self.helpers.iterable = true;
        let id = self.fresh_id();
        let iterable = self.expression(&stmt.iterable);
        let (index, seq) = (format!("$_i{id}"), format!("$_seq{id}"));

        self.out.open(&format!(
            "for (let {index} = 0, {seq} = $_createIterable({iterable}); {index} < {seq}.length; {index}++)"
        ));
        self.out
            .line(&format!("let {} = {seq}[{index}];", stmt.name.name));
        self.block(&stmt.body);
        self.out.close();
    }

    fn switch(&mut self, stmt: &SwitchStatement) {
        let discriminant = self.expression(&stmt.discriminant);
        self.out.open(&format!("switch ({discriminant})"));

        for case in &stmt.cases {
            let test = self.expression(&case.test);
            self.out.open(&format!("case {test}:"));
            self.block(&case.body);
            self.out.close_with(" break;");
        }

        if let Some(default) = &stmt.default {
            self.out.open("default:");
            self.block(default);
            self.out.close();
        }
        self.out.close();
    }

    fn try_statement(&mut self, stmt: &TryStatement) {
        match &stmt.else_branch {
            Some(else_branch) => self.try_with_else(stmt, else_branch),
            None => self.plain_try(stmt),
        }
    }

    fn plain_try(&mut self, stmt: &TryStatement) {
        self.out.open("try");
        self.block(&stmt.body);

        if let Some(handler) = &stmt.handler {
            self.out.reopen(&catch_header(handler.param.as_ref()));
            self.block(&handler.body);
        }

        match &stmt.finalizer {
            Some(finalizer) => {
                self.out.reopen("finally");
                self.block(finalizer);
            }
            // `try` alone is not valid JavaScript.
            None if stmt.handler.is_none() => self.out.reopen("catch"),
            None => {}
        }
        self.out.close();
    }

    fn try_with_else(&mut self, stmt: &TryStatement, else_branch: &Block) {
        let id = self.fresh_id();
        let flag = format!("$_ok{id}");

        self.out
            .open(if stmt.finalizer.is_some() { "try" } else { "" });
        self.out.line(&format!("let {flag} = true;"));

        self.out.open("try");
        self.block(&stmt.body);
        match &stmt.handler {
            Some(handler) => {
                self.out.reopen(&catch_header(handler.param.as_ref()));
                self.out.line(&format!("{flag} = false;"));
                self.block(&handler.body);
            }
            None => {
                let error = format!("$_e{id}");
                self.out.reopen(&format!("catch ({error})"));
                self.out.line(&format!("{flag} = false;"));
                self.out.line(&format!("throw {error};"));
            }
        }
        self.out.close();

        self.out.open(&format!("if ({flag})"));
        self.block(else_branch);
        self.out.close();

        if let Some(finalizer) = &stmt.finalizer {
            self.out.reopen("finally");
            self.block(finalizer);
        }
        self.out.close();
    }
}

fn catch_header(param: Option<&Identifier>) -> String {
    match param {
        Some(param) => format!("catch ({})", param.name),
        None => "catch".to_string(),
    }
}

/// An expression statement starting with one of these would be read as a
/// block or a function declaration.
fn needs_statement_parens(text: &str) -> bool {
    ["{", "function ", "async function "]
        .iter()
        .any(|prefix| text.starts_with(prefix))
}
