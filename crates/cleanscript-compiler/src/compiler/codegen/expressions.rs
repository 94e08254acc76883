//! Expression lowering.
//!
//! Expressions render to a single line of JavaScript. Operands that are
//! themselves operator expressions are parenthesized, so the tree's shape
//! survives JavaScript's own precedence table:
//!
//! ```text
//! a < b | c          ->  a < (b | c)
//! -a ** 2            ->  (-a) ** 2
//! a and b then c     ->  a && (b ? c : undefined)
//! ```
//!
//! ## Lowering Table
//!
//! | Source | JavaScript | Helper flag |
//! |--------|------------|-------------|
//! | `a == b` | `a === b` | |
//! | `a == b` (both non-literal) | `$_deepEquals(a, b)` | `deep_equals` |
//! | `a != b` (both non-literal) | `!$_deepEquals(a, b)` | `deep_equals` |
//! | `a // b` | `Math.floor(a / b)` | |
//! | `a in b` | `$_in(a, b)` | `membership` |
//! | `a and b` / `a or b` | `a && b` / `a \|\| b` | |
//! | `not a` | `!a` | |
//! | `c then a else b` | `c ? a : b` | |
//! | `a[lo:hi]` | `a.slice(lo, hi)` | |
//! | `a[lo:hi] = v` | `[].splice.apply(a, [lo, hi - lo].concat(v))` | |
//! | `range(n)` | `range(n)` | `range` |
//! | `lambda x: e` | `function (x) { return e; }` | |

use super::Generator;
use crate::ast::*;

impl Generator {
    pub(super) fn expression(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Assign(assign) => {
                let value = self.expression(&assign.value);
                format!("{} = {value}", assign.name.name)
            }
            Expr::Binary(binary) => self.binary(binary),
            Expr::Ternary(ternary) => {
                let condition = self.operand(&ternary.condition);
                let then_branch = self.operand(&ternary.then_branch);
                let else_branch = match &ternary.else_branch {
                    Some(else_branch) => self.operand(else_branch),
                    None => "undefined".to_string(),
                };
                format!("{condition} ? {then_branch} : {else_branch}")
            }
            Expr::Lambda(lambda) => self.lambda(lambda),
            Expr::Call(call) => {
                if matches!(&*call.callee, Expr::Variable(id) if id.name == "range") {
                    self.helpers.range = true;
                }
                let callee = self.member_object(&call.callee);
                let arguments = self.list(&call.arguments);
                format!("{callee}({arguments})")
            }
            Expr::Get(get) => {
                let object = self.member_object(&get.object);
                format!("{object}.{}", get.name.name)
            }
            Expr::Set(set) => {
                let object = self.member_object(&set.object);
                let value = self.expression(&set.value);
                format!("{object}.{} = {value}", set.name.name)
            }
            Expr::Grouping(inner) => format!("({})", self.expression(inner)),
            Expr::Literal(literal) => literal_text(literal),
            Expr::ArrayLiteral(elements) => format!("[{}]", self.list(elements)),
            Expr::DictionaryLiteral(entries) => {
                let entries: Vec<String> = entries
                    .iter()
                    .map(|entry| {
                        let key = self.expression(&entry.key);
                        let value = self.expression(&entry.value);
                        format!("{key}: {value}")
                    })
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            Expr::Subscript(subscript) => self.subscript(&subscript.object, &subscript.index),
            Expr::AssignSubscript(assign) => {
                self.assign_subscript(&assign.object, &assign.index, &assign.value)
            }
            Expr::Logical(logical) => {
                let left = self.operand(&logical.left);
                let right = self.operand(&logical.right);
                let operator = match logical.operator {
                    LogicalOperator::And => "&&",
                    LogicalOperator::Or => "||",
                };
                format!("{left} {operator} {right}")
            }
            Expr::Unary(unary) => {
                let argument = self.operand(&unary.argument);
                let operator = match unary.operator {
                    UnaryOperator::Not => "!",
                    UnaryOperator::Minus => "-",
                    UnaryOperator::BitwiseNot => "~",
                };
                format!("{operator}{argument}")
            }
            Expr::PostfixIncrement(update) => {
                let target = self.expression(&update.target);
                format!("{target}{}", update_text(update.operator))
            }
            Expr::PrefixIncrement(update) => {
                let target = self.expression(&update.target);
                format!("{}{target}", update_text(update.operator))
            }
            Expr::Variable(id) => id.name.clone(),
            Expr::Await(inner) => format!("await {}", self.operand(inner)),
            Expr::New(inner) => format!("new {}", self.member_object(inner)),
            Expr::Typeof(inner) => format!("typeof {}", self.operand(inner)),
            Expr::Void(inner) => format!("void {}", self.operand(inner)),
            Expr::Delete(inner) => format!("delete {}", self.operand(inner)),
        }
    }

    /// Renders `expr`, parenthesized if it is an operator expression.
    pub(super) fn operand(&mut self, expr: &Expr) -> String {
        let text = self.expression(expr);
        if is_compound(expr) {
            format!("({text})")
        } else {
            text
        }
    }

    /// Renders the object of a member access, call or `new`.
    pub(super) fn member_object(&mut self, expr: &Expr) -> String {
        let text = self.expression(expr);
        if is_compound(expr) || matches!(expr, Expr::Literal(Literal::Number(_))) {
            format!("({text})")
        } else {
            text
        }
    }

    fn list(&mut self, items: &[Expr]) -> String {
        items
            .iter()
            .map(|item| self.expression(item))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn binary(&mut self, binary: &BinaryExpression) -> String {
        let (left, right) = (&*binary.left, &*binary.right);

        match binary.operator {
            BinaryOperator::Equal | BinaryOperator::NotEqual if is_deep_comparison(binary) => {
                self.helpers.deep_equals = true;
                let call = format!(
                    "$_deepEquals({}, {})",
                    self.expression(left),
                    self.expression(right)
                );
                if binary.operator == BinaryOperator::NotEqual {
                    format!("!{call}")
                } else {
                    call
                }
            }
            BinaryOperator::FloorDiv => {
                let left = self.operand(left);
                let right = self.operand(right);
                format!("Math.floor({left} / {right})")
            }
            BinaryOperator::In => {
                self.helpers.membership = true;
                let left = self.expression(left);
                let right = self.expression(right);
                format!("$_in({left}, {right})")
            }
            operator => {
                let left = self.operand(left);
                let right = self.operand(right);
                format!("{left} {} {right}", operator_text(operator))
            }
        }
    }

    fn lambda(&mut self, lambda: &LambdaExpression) -> String {
        let (params, prologue) = self.parameters(&lambda.params);
        let body = self.expression(&lambda.body);
        let mut statements = prologue;
        statements.push(format!("return {body};"));

        format!(
            "{}function ({params}) {{ {} }}",
            if lambda.is_async { "async " } else { "" },
            statements.join(" ")
        )
    }

    fn subscript(&mut self, object: &Expr, index: &SubscriptIndex) -> String {
        let target = self.member_object(object);

        if !index.colon {
            let index = self.bound(&index.start, "0");
            return format!("{target}[{index}]");
        }

        let start = self.bound(&index.start, "0");
        let end = self.bound(&index.end, &format!("{target}.length"));
        format!("{target}.slice({start}, {end})")
    }

    fn assign_subscript(&mut self, object: &Expr, index: &SubscriptIndex, value: &Expr) -> String {
        let target = self.member_object(object);
        let value = self.expression(value);

        if !index.colon {
            let index = self.bound(&index.start, "0");
            return format!("{target}[{index}] = {value}");
        }

        let range = match (&index.start, &index.end) {
            (Some(start), Some(end)) => {
                let start = self.operand(start);
                let end = self.operand(end);
                format!("{start}, {end} - {start}")
            }
            (None, Some(end)) => format!("0, {}", self.expression(end)),
            (Some(start), None) => {
                let start = self.operand(start);
                format!("{start}, {target}.length - {start}")
            }
            (None, None) => format!("0, {target}.length"),
        };
        format!("[].splice.apply({target}, [{range}].concat({value}))")
    }

    fn bound(&mut self, bound: &Option<Box<Expr>>, fallback: &str) -> String {
        match bound {
            Some(expr) => self.expression(expr),
            None => fallback.to_string(),
        }
    }
}

/// Whether `expr` needs parentheses when used as an operand.
fn is_compound(expr: &Expr) -> bool {
    match expr {
        Expr::Assign(_)
        | Expr::Set(_)
        | Expr::AssignSubscript(_)
        | Expr::Ternary(_)
        | Expr::Lambda(_)
        | Expr::Logical(_)
        | Expr::Unary(_)
        | Expr::PrefixIncrement(_)
        | Expr::Await(_)
        | Expr::New(_)
        | Expr::Typeof(_)
        | Expr::Void(_)
        | Expr::Delete(_) => true,
        // These lower to calls.
        Expr::Binary(binary) => match binary.operator {
            BinaryOperator::FloorDiv | BinaryOperator::In => false,
            BinaryOperator::Equal => !is_deep_comparison(binary),
            _ => true,
        },
        _ => false,
    }
}

/// `==` and `!=` compare structurally when neither side is a literal.
fn is_deep_comparison(binary: &BinaryExpression) -> bool {
    !binary.left.is_literal() && !binary.right.is_literal()
}

fn operator_text(operator: BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::Add => "+",
        BinaryOperator::Sub => "-",
        BinaryOperator::Mul => "*",
        BinaryOperator::Div | BinaryOperator::FloorDiv => "/",
        BinaryOperator::Mod => "%",
        BinaryOperator::Exp => "**",
        BinaryOperator::Equal => "===",
        BinaryOperator::NotEqual => "!==",
        BinaryOperator::LessThan => "<",
        BinaryOperator::LessThanEqual => "<=",
        BinaryOperator::GreaterThan => ">",
        BinaryOperator::GreaterThanEqual => ">=",
        BinaryOperator::LeftShift => "<<",
        BinaryOperator::RightShift => ">>",
        BinaryOperator::BitAnd => "&",
        BinaryOperator::BitOr => "|",
        BinaryOperator::BitXor => "^",
        BinaryOperator::In => "in",
    }
}

fn update_text(operator: UpdateOperator) -> &'static str {
    match operator {
        UpdateOperator::Increment => "++",
        UpdateOperator::Decrement => "--",
    }
}

fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::Number(value) if value.is_finite() => value.to_string(),
        Literal::Number(_) => "Infinity".to_string(),
        Literal::String(text) => serde_json::Value::String(text.clone()).to_string(),
        Literal::Boolean(value) => value.to_string(),
        Literal::Null => "null".to_string(),
        Literal::Undefined => "undefined".to_string(),
        Literal::Regex { pattern, flags } => format!("/{}/{flags}", escape_regex(pattern)),
    }
}

/// Escapes bare `/` and line breaks so the pattern survives as a literal.
fn escape_regex(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    let mut backslash = false;

    for c in pattern.chars() {
        match c {
            '/' if !backslash => escaped.push_str("\\/"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
        backslash = c == '\\' && !backslash;
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Box<Expr> {
        Box::new(Expr::Variable(Identifier::new(name, 1)))
    }

    fn number(value: f64) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Number(value)))
    }

    #[test]
    fn test_number_text() {
        assert_eq!(literal_text(&Literal::Number(1.0)), "1");
        assert_eq!(literal_text(&Literal::Number(0.25)), "0.25");
        assert_eq!(literal_text(&Literal::Number(f64::INFINITY)), "Infinity");
    }

    #[test]
    fn test_string_text_is_quoted() {
        assert_eq!(
            literal_text(&Literal::String("say \"hi\"\n".into())),
            r#""say \"hi\"\n""#
        );
    }

    #[test]
    fn test_regex_slashes_escaped_once() {
        assert_eq!(escape_regex("a/b"), "a\\/b");
        assert_eq!(escape_regex("a\\/b"), "a\\/b");
        assert_eq!(escape_regex("a\\\\/b"), "a\\\\\\/b");
    }

    #[test]
    fn test_deep_comparison_needs_two_non_literals() {
        let deep = BinaryExpression {
            left: var("a"),
            operator: BinaryOperator::Equal,
            right: var("b"),
        };
        let shallow = BinaryExpression {
            left: var("a"),
            operator: BinaryOperator::Equal,
            right: number(1.0),
        };
        assert!(is_deep_comparison(&deep));
        assert!(!is_deep_comparison(&shallow));
        assert!(!is_compound(&Expr::Binary(deep)));
        assert!(is_compound(&Expr::Binary(shallow)));
    }

    #[test]
    fn test_calls_are_not_compound() {
        let call = Expr::Call(CallExpression {
            callee: var("f"),
            arguments: vec![],
        });
        assert!(!is_compound(&call));
        assert!(is_compound(&Expr::Await(Box::new(call))));
    }
}
