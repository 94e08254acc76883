//! The main parser implementation.

use std::mem;

use tracing::debug;

use crate::ast::*;
use crate::error::Diagnostic;
use crate::lexer::{Span, Token, TokenKind};

type ParseResult<T> = Result<T, Diagnostic>;

/// A recursive descent parser for Cleanscript.
///
/// The parser never stops at the first problem. A failing statement is
/// recorded, the token stream is resynchronized at the next statement
/// boundary, and parsing carries on so one run reports every independent
/// error.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<Diagnostic>,
}

/// Output of [`Parser::parse`].
#[derive(Debug, Clone)]
pub struct Parsed {
    /// The statements that parsed cleanly
    pub program: Program,
    /// Problems recorded while parsing
    pub errors: Vec<Diagnostic>,
}

impl Parsed {
    /// Returns true if any syntax error was recorded.
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Parser {
    /// Creates a new parser over a token vector.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.kind == TokenKind::Eof) {
            let (end, line) = tokens
                .last()
                .map(|t| (t.span.end, t.line))
                .unwrap_or((0, 1));
            tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end), line));
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    /// Parses the whole token stream into a Program AST node.
    pub fn parse(mut self) -> Parsed {
        let mut body = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.recovering_declaration() {
                body.push(stmt);
            }
        }

        debug!(
            statements = body.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        Parsed {
            program: Program { body },
            errors: self.errors,
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Parses one declaration, recording and recovering from any error.
    fn recovering_declaration(&mut self) -> Option<Stmt> {
        let start = self.current;
        match self.parse_declaration() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.recover(err, start);
                None
            }
        }
    }

    fn recover(&mut self, err: Diagnostic, start: usize) {
        debug!(line = err.line, message = %err.message, "recovering from syntax error");
        self.errors.push(err);
        self.synchronize();
        if self.current == start && !self.is_at_end() {
            self.advance();
        }
    }

    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        match &self.peek().kind {
            TokenKind::Class => self.parse_class_declaration(),
            TokenKind::Function => {
                self.advance();
                Ok(Stmt::Function(self.parse_function(false)?))
            }
            TokenKind::Async if self.check_next(&TokenKind::Function) => {
                self.advance(); // consume 'async'
                self.advance(); // consume 'function'
                Ok(Stmt::Function(self.parse_function(true)?))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                self.parse_variable_declaration()
            }
            _ => self.parse_statement(),
        }
    }

    fn parse_variable_declaration(&mut self) -> ParseResult<Stmt> {
        let keyword = self.advance().kind;
        let name = self.expect_identifier("Expect variable name.")?;

        let init = if self.matches(&TokenKind::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        if keyword == TokenKind::Const && init.is_none() {
            return Err(self.error_at_current("Expect '=' after const name."));
        }

        self.expect(&TokenKind::Semicolon, "Expect ';' after variable declaration.")?;

        let declaration = VariableDeclaration { name, init };
        Ok(match keyword {
            TokenKind::Var => Stmt::Var(declaration),
            TokenKind::Let => Stmt::Let(declaration),
            _ => Stmt::Const(declaration),
        })
    }

    /// Parses a function after its `function` keyword.
    fn parse_function(&mut self, is_async: bool) -> ParseResult<FunctionDeclaration> {
        let is_generator = self.matches(&TokenKind::Star);
        let name = self.expect_identifier("Expect function name.")?;

        let params = if self.matches(&TokenKind::LeftParen) {
            let params = self.parse_parameters(&TokenKind::RightParen)?;
            self.expect(&TokenKind::RightParen, "Expect ')' after parameters.")?;
            params
        } else {
            Vec::new()
        };

        let body = self.parse_body("before function body")?;

        Ok(FunctionDeclaration {
            name,
            params,
            body,
            is_async,
            is_generator,
        })
    }

    fn parse_parameters(&mut self, terminator: &TokenKind) -> ParseResult<Vec<Parameter>> {
        let mut params = Vec::new();

        if self.check(terminator) {
            return Ok(params);
        }

        loop {
            let param = self.parse_parameter()?;
            let is_wildcard = param.kind == ParameterKind::Wildcard;
            params.push(param);

            if !self.matches(&TokenKind::Comma) {
                break;
            }
            if is_wildcard {
                return Err(self.error_at_current("Wildcard parameter must be the last parameter."));
            }
        }

        Ok(params)
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let cast = if self.check_identifier() && self.check_next(&TokenKind::Arrow) {
            let cast = self.expect_identifier("Expect cast function name.")?;
            self.advance(); // consume '->'
            Some(cast)
        } else {
            None
        };

        let kind = if self.matches(&TokenKind::Star) {
            ParameterKind::Wildcard
        } else {
            ParameterKind::Standard
        };

        let name = self.expect_identifier("Expect parameter name.")?;

        let default = if self.matches(&TokenKind::Equal) {
            Some(self.parse_unary()?)
        } else {
            None
        };

        Ok(Parameter {
            name,
            kind,
            default,
            cast,
        })
    }

    fn parse_class_declaration(&mut self) -> ParseResult<Stmt> {
        self.advance(); // consume 'class'
        let name = self.expect_identifier("Expect class name.")?;

        let superclass = if self.matches(&TokenKind::LeftParen) {
            let superclass = self.parse_call()?;
            self.expect(&TokenKind::RightParen, "Expect ')' after superclass.")?;
            Some(superclass)
        } else if self.matches(&TokenKind::Extends) {
            Some(self.parse_call()?)
        } else {
            None
        };

        self.expect(&TokenKind::Colon, "Expect ':' before class body.")?;

        let mut methods = Vec::new();
        if self.matches(&TokenKind::Indent) {
            while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
                let start = self.current;
                match self.parse_method() {
                    Ok(method) => methods.push(method),
                    Err(err) => self.recover(err, start),
                }
            }
            self.matches(&TokenKind::Dedent);
        }

        Ok(Stmt::Class(ClassDeclaration {
            name,
            superclass,
            methods,
        }))
    }

    fn parse_method(&mut self) -> ParseResult<FunctionDeclaration> {
        let is_async = self.matches(&TokenKind::Async);
        self.expect(&TokenKind::Function, "Expect method declaration in class body.")?;
        self.parse_function(is_async)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match &self.peek().kind {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Return => {
                self.advance();
                let value = self.parse_optional_value("Expect ';' after return value.")?;
                Ok(Stmt::Return(value))
            }
            TokenKind::Yield => {
                self.advance();
                let value = self.parse_optional_value("Expect ';' after yield value.")?;
                Ok(Stmt::Yield(value))
            }
            TokenKind::Throw => {
                self.advance();
                let value = self.parse_expression()?;
                self.expect(&TokenKind::Semicolon, "Expect ';' after thrown value.")?;
                Ok(Stmt::Throw(value))
            }
            TokenKind::Break => {
                self.advance();
                self.expect(&TokenKind::Semicolon, "Expect ';' after 'break'.")?;
                Ok(Stmt::Break)
            }
            TokenKind::Continue => {
                self.advance();
                self.expect(&TokenKind::Semicolon, "Expect ';' after 'continue'.")?;
                Ok(Stmt::Continue)
            }
            TokenKind::JsRaw => self.parse_raw_passthrough(),
            TokenKind::Indent => {
                self.advance();
                Ok(Stmt::Block(self.parse_block()))
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses an indented block after its `Indent` token.
    ///
    /// Errors inside the block are recorded statement by statement, so this
    /// never fails.
    fn parse_block(&mut self) -> Block {
        let mut body = Vec::new();

        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            if let Some(stmt) = self.recovering_declaration() {
                body.push(stmt);
            }
        }
        self.matches(&TokenKind::Dedent);

        Block::new(body)
    }

    /// Parses `: <body>`.
    ///
    /// The body is an indented block, or one inline declaration optionally
    /// followed by an indented block.
    fn parse_body(&mut self, context: &str) -> ParseResult<Block> {
        self.expect(&TokenKind::Colon, &format!("Expect ':' {context}."))?;

        if self.matches(&TokenKind::Indent) {
            return Ok(self.parse_block());
        }

        let mut body = vec![self.parse_declaration()?];
        if self.matches(&TokenKind::Indent) {
            body.extend(self.parse_block().body);
        }
        Ok(Block::new(body))
    }

    fn parse_if_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // consume 'if'
        let condition = self.parse_expression()?;
        let then_branch = self.parse_body("after if condition")?;

        let mut elif_branches = Vec::new();
        while self.matches(&TokenKind::Elif) {
            let condition = self.parse_expression()?;
            let body = self.parse_body("after elif condition")?;
            elif_branches.push(ElifBranch { condition, body });
        }

        let else_branch = if self.matches(&TokenKind::Else) {
            Some(self.parse_body("after 'else'")?)
        } else {
            None
        };

        Ok(Stmt::If(IfStatement {
            condition,
            then_branch,
            elif_branches,
            else_branch,
        }))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // consume 'for'
        let name = self.expect_identifier("Expect loop variable name.")?;
        self.expect(&TokenKind::In, "Expect 'in' after loop variable.")?;
        let iterable = self.parse_expression()?;
        let body = self.parse_body("after for clause")?;

        Ok(Stmt::For(ForStatement {
            name,
            iterable,
            body,
        }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // consume 'while'
        let condition = self.parse_expression()?;
        let body = self.parse_body("after while condition")?;
        Ok(Stmt::While(WhileStatement { condition, body }))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // consume 'do'
        let body = self.parse_body("after 'do'")?;
        self.expect(&TokenKind::While, "Expect 'while' after do body.")?;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon, "Expect ';' after do-while condition.")?;
        Ok(Stmt::Do(DoStatement { body, condition }))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // consume 'switch'
        let discriminant = self.parse_expression()?;
        self.expect(&TokenKind::Colon, "Expect ':' after switch value.")?;
        self.expect(&TokenKind::Indent, "Expect indented cases after switch.")?;

        let mut cases = Vec::new();
        let mut default = None;

        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            if self.matches(&TokenKind::Case) {
                let test = self.parse_expression()?;
                let body = self.parse_body("after case value")?;
                cases.push(SwitchCase { test, body });
            } else if self.matches(&TokenKind::Default) {
                let keyword = self.previous().clone();
                let body = self.parse_body("after 'default'")?;
                if default.replace(body).is_some() {
                    self.errors
                        .push(self.error_at(&keyword, "Duplicate default case in switch."));
                }
            } else {
                return Err(self.error_at_current("Expect 'case' or 'default' in switch body."));
            }
        }
        self.matches(&TokenKind::Dedent);

        Ok(Stmt::Switch(SwitchStatement {
            discriminant,
            cases,
            default,
        }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // consume 'try'
        let body = self.parse_body("after 'try'")?;

        let handler = if self.matches(&TokenKind::Catch) {
            let param = if self.check_identifier() {
                Some(self.expect_identifier("Expect catch variable name.")?)
            } else {
                None
            };
            let body = self.parse_body("after catch clause")?;
            Some(CatchClause { param, body })
        } else {
            None
        };

        let else_branch = if self.matches(&TokenKind::Else) {
            Some(self.parse_body("after 'else'")?)
        } else {
            None
        };

        let finalizer = if self.matches(&TokenKind::Finally) {
            Some(self.parse_body("after 'finally'")?)
        } else {
            None
        };

        Ok(Stmt::Try(TryStatement {
            body,
            handler,
            else_branch,
            finalizer,
        }))
    }

    fn parse_raw_passthrough(&mut self) -> ParseResult<Stmt> {
        self.advance(); // consume 'JSRAW'
        if !matches!(self.peek().kind, TokenKind::String(_)) {
            return Err(self.error_at_current("Expect string after JSRAW."));
        }
        let code = quoted_source(&self.advance()).to_string();
        self.expect(&TokenKind::Semicolon, "Expect ';' after raw code.")?;
        Ok(Stmt::RawPassthrough(code))
    }

    fn parse_optional_value(&mut self, message: &str) -> ParseResult<Option<Expr>> {
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semicolon, message)?;
        Ok(value)
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_or()?;

        if !self.matches(&TokenKind::Equal) {
            return Ok(expr);
        }

        let equals = self.previous().clone();
        let value = Box::new(self.parse_assignment()?);

        Ok(match expr {
            Expr::Variable(name) => Expr::Assign(AssignExpression { name, value }),
            Expr::Get(get) => Expr::Set(SetExpression {
                object: get.object,
                name: get.name,
                value,
            }),
            Expr::Subscript(subscript) => Expr::AssignSubscript(AssignSubscriptExpression {
                object: subscript.object,
                index: subscript.index,
                value,
            }),
            other => {
                self.errors
                    .push(self.error_at(&equals, "Invalid assignment target."));
                other
            }
        })
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;

        while self.matches(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = Expr::Logical(LogicalExpression {
                left: Box::new(left),
                operator: LogicalOperator::Or,
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_membership()?;

        while self.matches(&TokenKind::And) {
            let right = self.parse_membership()?;
            left = Expr::Logical(LogicalExpression {
                left: Box::new(left),
                operator: LogicalOperator::And,
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_membership(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_ternary()?;

        while self.matches(&TokenKind::In) {
            let right = self.parse_equality()?;
            left = binary(left, BinaryOperator::In, right);
        }

        Ok(left)
    }

    fn parse_ternary(&mut self) -> ParseResult<Expr> {
        let condition = self.parse_equality()?;

        if !self.matches(&TokenKind::Then) {
            return Ok(condition);
        }

        let then_branch = self.parse_equality()?;
        let else_branch = if self.matches(&TokenKind::Else) {
            Some(Box::new(self.parse_equality()?))
        } else {
            None
        };

        Ok(Expr::Ternary(TernaryExpression {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
        }))
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;

        loop {
            let operator = match &self.peek().kind {
                TokenKind::EqualEqual => BinaryOperator::Equal,
                TokenKind::NotEqual => BinaryOperator::NotEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            left = binary(left, operator, right);
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_bitwise_or()?;

        loop {
            let operator = match &self.peek().kind {
                TokenKind::LessThan => BinaryOperator::LessThan,
                TokenKind::LessThanEqual => BinaryOperator::LessThanEqual,
                TokenKind::GreaterThan => BinaryOperator::GreaterThan,
                TokenKind::GreaterThanEqual => BinaryOperator::GreaterThanEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_bitwise_or()?;
            left = binary(left, operator, right);
        }

        Ok(left)
    }

    fn parse_bitwise_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_bitwise_and()?;

        loop {
            let operator = match &self.peek().kind {
                TokenKind::Pipe => BinaryOperator::BitOr,
                TokenKind::Caret => BinaryOperator::BitXor,
                _ => break,
            };
            self.advance();
            let right = self.parse_bitwise_and()?;
            left = binary(left, operator, right);
        }

        Ok(left)
    }

    fn parse_bitwise_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_shift()?;

        while self.matches(&TokenKind::Ampersand) {
            let right = self.parse_shift()?;
            left = binary(left, BinaryOperator::BitAnd, right);
        }

        Ok(left)
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_additive()?;

        loop {
            let operator = match &self.peek().kind {
                TokenKind::LeftShift => BinaryOperator::LeftShift,
                TokenKind::RightShift => BinaryOperator::RightShift,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = binary(left, operator, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let operator = match &self.peek().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(left, operator, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_exponent()?;

        loop {
            let operator = match &self.peek().kind {
                TokenKind::Star => BinaryOperator::Mul,
                TokenKind::Slash => BinaryOperator::Div,
                TokenKind::SlashSlash => BinaryOperator::FloorDiv,
                TokenKind::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_exponent()?;
            left = binary(left, operator, right);
        }

        Ok(left)
    }

    /// `**` is right-associative: `2 ** 3 ** 2` is `2 ** (3 ** 2)`.
    fn parse_exponent(&mut self) -> ParseResult<Expr> {
        let base = self.parse_unary()?;

        if self.matches(&TokenKind::StarStar) {
            let exponent = self.parse_exponent()?;
            return Ok(binary(base, BinaryOperator::Exp, exponent));
        }

        Ok(base)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let operator = match &self.peek().kind {
            TokenKind::Not | TokenKind::Bang => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Minus,
            TokenKind::Tilde => UnaryOperator::BitwiseNot,
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let token = self.advance();
                let target = self.parse_unary()?;
                self.check_update_target(&target, &token);
                return Ok(Expr::PrefixIncrement(UpdateExpression {
                    operator: update_operator(&token.kind),
                    target: Box::new(target),
                }));
            }
            _ => return self.parse_keyword_prefix(),
        };

        self.advance();
        let argument = self.parse_unary()?;
        Ok(Expr::Unary(UnaryExpression {
            operator,
            argument: Box::new(argument),
        }))
    }

    /// `new`, `await`, `typeof`, `void` and `delete`.
    fn parse_keyword_prefix(&mut self) -> ParseResult<Expr> {
        let wrap: fn(Box<Expr>) -> Expr = match &self.peek().kind {
            TokenKind::New => {
                self.advance();
                return Ok(Expr::New(Box::new(self.parse_keyword_prefix()?)));
            }
            TokenKind::Await => Expr::Await,
            TokenKind::Typeof => Expr::Typeof,
            TokenKind::Void => Expr::Void,
            TokenKind::Delete => Expr::Delete,
            _ => return self.parse_call(),
        };

        self.advance();
        Ok(wrap(Box::new(self.parse_unary()?)))
    }

    fn parse_call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.matches(&TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.matches(&TokenKind::Dot) {
                let name = self.expect_property_name()?;
                expr = Expr::Get(GetExpression {
                    object: Box::new(expr),
                    name,
                });
            } else if self.matches(&TokenKind::LeftBracket) {
                let index = self.parse_subscript_index()?;
                self.expect(&TokenKind::RightBracket, "Expect ']' after subscript.")?;
                expr = Expr::Subscript(SubscriptExpression {
                    object: Box::new(expr),
                    index,
                });
            } else if self.check(&TokenKind::PlusPlus) || self.check(&TokenKind::MinusMinus) {
                let token = self.advance();
                self.check_update_target(&expr, &token);
                expr = Expr::PostfixIncrement(UpdateExpression {
                    operator: update_operator(&token.kind),
                    target: Box::new(expr),
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        self.skip_layout();
        if !self.check(&TokenKind::RightParen) {
            loop {
                self.skip_layout();
                arguments.push(self.parse_expression()?);
                self.skip_layout();
                if !self.matches(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.skip_layout();
        self.expect(&TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call(CallExpression {
            callee: Box::new(callee),
            arguments,
        }))
    }

    fn parse_subscript_index(&mut self) -> ParseResult<SubscriptIndex> {
        let start = if self.check(&TokenKind::Colon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        if !self.matches(&TokenKind::Colon) {
            return Ok(SubscriptIndex {
                start,
                colon: false,
                end: None,
            });
        }

        let end = if self.check(&TokenKind::RightBracket) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        Ok(SubscriptIndex {
            start,
            colon: true,
            end,
        })
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        let expr = match &token.kind {
            TokenKind::False => Expr::Literal(Literal::Boolean(false)),
            TokenKind::True => Expr::Literal(Literal::Boolean(true)),
            TokenKind::Null => Expr::Literal(Literal::Null),
            TokenKind::Undefined => Expr::Literal(Literal::Undefined),
            TokenKind::Number(value) => Expr::Literal(Literal::Number(*value)),
            TokenKind::String(value) => Expr::Literal(Literal::String(value.clone())),
            TokenKind::Identifier(name) => {
                self.advance();
                if name == "r" && self.regex_follows(&token) {
                    return self.parse_regex();
                }
                return Ok(Expr::Variable(Identifier::new(name.clone(), token.line)));
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::Grouping(Box::new(expr)));
            }
            TokenKind::LeftBracket => {
                self.advance();
                return self.parse_array_literal();
            }
            TokenKind::LeftBrace => {
                self.advance();
                return self.parse_dictionary_literal();
            }
            TokenKind::Lambda => {
                self.advance();
                return self.parse_lambda(false);
            }
            TokenKind::Async => {
                self.advance();
                self.expect(&TokenKind::Lambda, "Expect 'lambda' after 'async'.")?;
                return self.parse_lambda(true);
            }
            TokenKind::Indent => return Err(self.error_at(&token, "Unexpected indent.")),
            TokenKind::Dedent => return Err(self.error_at(&token, "Unexpected dedent.")),
            _ => return Err(self.error_at(&token, "Expect expression.")),
        };

        self.advance();
        Ok(expr)
    }

    /// True when `r` is immediately followed by a string token.
    fn regex_follows(&self, r: &Token) -> bool {
        matches!(self.peek().kind, TokenKind::String(_)) && self.peek().span.start == r.span.end
    }

    fn parse_regex(&mut self) -> ParseResult<Expr> {
        let token = self.advance();
        if !matches!(token.kind, TokenKind::String(_)) {
            return Err(self.error_at(&token, "Expect regex string."));
        }

        match split_regex(quoted_source(&token)) {
            Some((pattern, flags)) => Ok(Expr::Literal(Literal::Regex { pattern, flags })),
            None => Err(self.error_at(&token, "Invalid regex pattern provided.")),
        }
    }

    fn parse_lambda(&mut self, is_async: bool) -> ParseResult<Expr> {
        let params = self.parse_parameters(&TokenKind::Colon)?;
        self.expect(&TokenKind::Colon, "Expect ':' after lambda parameters.")?;
        let body = self.parse_expression()?;

        Ok(Expr::Lambda(LambdaExpression {
            params,
            body: Box::new(body),
            is_async,
        }))
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let mut elements = Vec::new();

        self.skip_layout();
        while !self.check(&TokenKind::RightBracket) && !self.is_at_end() {
            elements.push(self.parse_expression()?);
            self.skip_layout();
            if !self.matches(&TokenKind::Comma) {
                break;
            }
            self.skip_layout();
        }
        self.expect(&TokenKind::RightBracket, "Expect ']' after array elements.")?;

        Ok(Expr::ArrayLiteral(elements))
    }

    fn parse_dictionary_literal(&mut self) -> ParseResult<Expr> {
        let mut entries = Vec::new();

        self.skip_layout();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            let key = self.parse_expression()?;

            let value = if self.matches(&TokenKind::Colon) {
                self.skip_layout();
                self.parse_expression()?
            } else if matches!(key, Expr::Variable(_)) {
                key.clone()
            } else {
                return Err(self.error_at_current("Expect ':' after dictionary key."));
            };
            entries.push(DictionaryEntry { key, value });

            self.skip_layout();
            if !self.matches(&TokenKind::Comma) {
                break;
            }
            self.skip_layout();
        }
        self.expect(&TokenKind::RightBrace, "Expect '}' after dictionary entries.")?;

        Ok(Expr::DictionaryLiteral(entries))
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.current.min(last)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.peek().kind) == mem::discriminant(kind)
    }

    fn check_next(&self, kind: &TokenKind) -> bool {
        self.tokens
            .get(self.current + 1)
            .is_some_and(|t| mem::discriminant(&t.kind) == mem::discriminant(kind))
    }

    fn check_identifier(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Identifier(_))
    }

    fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn expect_identifier(&mut self, message: &str) -> ParseResult<Identifier> {
        let token = self.peek();
        if let TokenKind::Identifier(name) = &token.kind {
            let identifier = Identifier::new(name.clone(), token.line);
            self.advance();
            Ok(identifier)
        } else {
            Err(self.error_at_current(message))
        }
    }

    /// Property names after `.` may be keywords, as in `promise.then`.
    fn expect_property_name(&mut self) -> ParseResult<Identifier> {
        let token = self.peek();
        match &token.kind {
            TokenKind::Identifier(name) => {
                let identifier = Identifier::new(name.clone(), token.line);
                self.advance();
                Ok(identifier)
            }
            kind if kind.is_keyword() => {
                let identifier = Identifier::new(token.lexeme.clone(), token.line);
                self.advance();
                Ok(identifier)
            }
            _ => Err(self.error_at_current("Expect property name after '.'.")),
        }
    }

    fn skip_layout(&mut self) {
        while self.peek().kind.is_layout() {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check_update_target(&mut self, target: &Expr, operator: &Token) {
        if !matches!(target, Expr::Variable(_) | Expr::Get(_) | Expr::Subscript(_)) {
            self.errors
                .push(self.error_at(operator, "Invalid increment target."));
        }
    }

    fn error_at(&self, token: &Token, message: &str) -> Diagnostic {
        let lexeme = match token.kind {
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            _ => token.lexeme.as_str(),
        };
        Diagnostic::parse(token.line, lexeme, message)
    }

    fn error_at_current(&self, message: &str) -> Diagnostic {
        self.error_at(self.peek(), message)
    }

    /// Skips tokens until a likely statement boundary.
    ///
    /// Stops after a `;`, before a statement keyword, or before the `Dedent`
    /// that closes the block being recovered in. Blocks opened while skipping
    /// are skipped whole.
    fn synchronize(&mut self) {
        let mut depth = 0usize;

        while !self.is_at_end() {
            match &self.peek().kind {
                TokenKind::Semicolon => {
                    self.advance();
                    if depth == 0 {
                        return;
                    }
                }
                TokenKind::Indent => {
                    self.advance();
                    depth += 1;
                }
                TokenKind::Dedent => {
                    if depth == 0 {
                        return;
                    }
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                kind if depth == 0 && starts_statement(kind) => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}

fn starts_statement(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Class
            | TokenKind::Function
            | TokenKind::Async
            | TokenKind::Var
            | TokenKind::Let
            | TokenKind::Const
            | TokenKind::For
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::Switch
            | TokenKind::Try
            | TokenKind::Return
            | TokenKind::Yield
            | TokenKind::Throw
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::JsRaw
    )
}

fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary(BinaryExpression {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

fn update_operator(kind: &TokenKind) -> UpdateOperator {
    if *kind == TokenKind::MinusMinus {
        UpdateOperator::Decrement
    } else {
        UpdateOperator::Increment
    }
}

/// The text between a string token's quotes, escapes left undecoded.
fn quoted_source(token: &Token) -> &str {
    let lexeme = token.lexeme.as_str();
    lexeme
        .get(1..lexeme.len().saturating_sub(1))
        .unwrap_or_default()
}

/// Splits `/pattern/flags` and validates both halves.
///
/// Flags must be distinct letters from `dgimsuy`. The pattern must not be
/// empty, must balance its groups and character classes, must not end in a
/// lone backslash, and must not open with a quantifier.
fn split_regex(source: &str) -> Option<(String, String)> {
    let body = source.strip_prefix('/')?;
    let close = body.rfind('/')?;
    let (pattern, flags) = (&body[..close], &body[close + 1..]);

    let mut seen = String::new();
    for flag in flags.chars() {
        if !"dgimsuy".contains(flag) || seen.contains(flag) {
            return None;
        }
        seen.push(flag);
    }

    if pattern.is_empty() || pattern.starts_with(['*', '+', '?']) {
        return None;
    }

    let mut chars = pattern.chars();
    let mut depth = 0usize;
    let mut in_class = false;
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                chars.next()?;
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }

    if depth != 0 || in_class {
        return None;
    }

    Some((pattern.to_string(), flags.to_string()))
}
