//! Abstract Syntax Tree (AST) definitions for Cleanscript.
//!
//! Every node owns its children outright; the tree has no sharing and no
//! back-references. Statement bodies are [`Block`]s whatever their source
//! form (indented block, inline statement, or both).

/// A complete Cleanscript program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The statements in the program
    pub body: Vec<Stmt>,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The name of the identifier
    pub name: String,
    /// Source line the name appeared on
    pub line: usize,
}

impl Identifier {
    /// Creates a new identifier.
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// A sequence of statements forming a body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// The statements, in order
    pub body: Vec<Stmt>,
}

impl Block {
    /// Creates a block from a statement list.
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

// ============================================================================
// Statements
// ============================================================================

/// A Cleanscript statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Expression statement `expr;`
    Expression(Expr),
    /// `JSRAW "code";` copied to the output untouched
    RawPassthrough(String),
    /// Function declaration
    Function(FunctionDeclaration),
    /// `return [expr];`
    Return(Option<Expr>),
    /// `throw expr;`
    Throw(Expr),
    /// `yield [expr];`
    Yield(Option<Expr>),
    /// Class declaration
    Class(ClassDeclaration),
    /// Nested block opened by unexpected indentation
    Block(Block),
    /// `while cond:`
    While(WhileStatement),
    /// `do: ... while cond;`
    Do(DoStatement),
    /// `for name in iterable:`
    For(ForStatement),
    /// `try:` with optional catch, else and finally
    Try(TryStatement),
    /// `if cond:` with elif/else chain
    If(IfStatement),
    /// `switch expr:` with cases
    Switch(SwitchStatement),
    /// `break;`
    Break,
    /// `continue;`
    Continue,
    /// `var name [= init];`
    Var(VariableDeclaration),
    /// `let name [= init];`
    Let(VariableDeclaration),
    /// `const name = init;`, the parser guarantees an initializer
    Const(VariableDeclaration),
}

/// A single-name variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// The identifier being declared
    pub name: Identifier,
    /// Optional initializer expression
    pub init: Option<Expr>,
}

/// A function declaration or class method.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// The function name
    pub name: Identifier,
    /// The parameters
    pub params: Vec<Parameter>,
    /// The function body
    pub body: Block,
    /// Whether this is an async function
    pub is_async: bool,
    /// Whether this is a generator function
    pub is_generator: bool,
}

/// How a parameter receives its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// One positional argument
    Standard,
    /// `*name`: every remaining argument, as an array
    Wildcard,
}

/// A function, method or lambda parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name
    pub name: Identifier,
    /// Standard or wildcard
    pub kind: ParameterKind,
    /// Default value expression
    pub default: Option<Expr>,
    /// Function applied to the argument on entry (`castFn -> name`)
    pub cast: Option<Identifier>,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    /// Class name
    pub name: Identifier,
    /// Optional superclass expression
    pub superclass: Option<Expr>,
    /// Methods, in source order
    pub methods: Vec<FunctionDeclaration>,
}

/// A while loop.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// The loop condition
    pub condition: Expr,
    /// The loop body
    pub body: Block,
}

/// A do-while loop.
#[derive(Debug, Clone, PartialEq)]
pub struct DoStatement {
    /// The loop body
    pub body: Block,
    /// The loop condition, tested after each pass
    pub condition: Expr,
}

/// A `for name in iterable` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// Loop variable bound to each element
    pub name: Identifier,
    /// The collection being iterated
    pub iterable: Expr,
    /// The loop body
    pub body: Block,
}

/// A try statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    /// The protected block
    pub body: Block,
    /// Optional catch clause
    pub handler: Option<CatchClause>,
    /// Runs only if the protected block completed without throwing
    pub else_branch: Option<Block>,
    /// Optional finally block
    pub finalizer: Option<Block>,
}

/// A catch clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Optional name bound to the thrown value
    pub param: Option<Identifier>,
    /// The catch body
    pub body: Block,
}

/// An if statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The test expression
    pub condition: Expr,
    /// The consequent block
    pub then_branch: Block,
    /// `elif` branches, in order
    pub elif_branches: Vec<ElifBranch>,
    /// The `else` block
    pub else_branch: Option<Block>,
}

/// One `elif cond:` branch.
#[derive(Debug, Clone, PartialEq)]
pub struct ElifBranch {
    /// The test expression
    pub condition: Expr,
    /// The branch body
    pub body: Block,
}

/// A switch statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// The value being switched on
    pub discriminant: Expr,
    /// The `case` arms, in order
    pub cases: Vec<SwitchCase>,
    /// The `default` arm
    pub default: Option<Block>,
}

/// A single `case value:` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// The value compared against the discriminant
    pub test: Expr,
    /// The arm body
    pub body: Block,
}

// ============================================================================
// Expressions
// ============================================================================

/// A Cleanscript expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name = value`
    Assign(AssignExpression),
    /// Binary operator expression
    Binary(BinaryExpression),
    /// `cond then a [else b]`
    Ternary(TernaryExpression),
    /// `[async] lambda params: expr`
    Lambda(LambdaExpression),
    /// Function call
    Call(CallExpression),
    /// Property read `object.name`
    Get(GetExpression),
    /// Property write `object.name = value`
    Set(SetExpression),
    /// Parenthesized expression
    Grouping(Box<Expr>),
    /// Literal value
    Literal(Literal),
    /// `[a, b, c]`
    ArrayLiteral(Vec<Expr>),
    /// `{key: value, shorthand}`
    DictionaryLiteral(Vec<DictionaryEntry>),
    /// `object[index]` or `object[lo:hi]`
    Subscript(SubscriptExpression),
    /// `object[index] = value` or `object[lo:hi] = value`
    AssignSubscript(AssignSubscriptExpression),
    /// `and` / `or`
    Logical(LogicalExpression),
    /// Prefix operator expression
    Unary(UnaryExpression),
    /// `target++` / `target--`
    PostfixIncrement(UpdateExpression),
    /// `++target` / `--target`
    PrefixIncrement(UpdateExpression),
    /// Variable reference
    Variable(Identifier),
    /// `await expr`
    Await(Box<Expr>),
    /// `new expr`
    New(Box<Expr>),
    /// `typeof expr`
    Typeof(Box<Expr>),
    /// `void expr`
    Void(Box<Expr>),
    /// `delete expr`
    Delete(Box<Expr>),
}

impl Expr {
    /// Returns true for literal nodes.
    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
    /// `true` / `false`
    Boolean(bool),
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `r"/pattern/flags"`
    Regex {
        /// Pattern source between the slashes
        pattern: String,
        /// Flag letters
        flags: String,
    },
}

/// Variable assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpression {
    /// Assigned variable
    pub name: Identifier,
    /// Assigned value
    pub value: Box<Expr>,
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// Left operand
    pub left: Box<Expr>,
    /// The operator
    pub operator: BinaryOperator,
    /// Right operand
    pub right: Box<Expr>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,
    /// // (floor division)
    FloorDiv,
    /// %
    Mod,
    /// **
    Exp,
    /// ==
    Equal,
    /// !=
    NotEqual,
    /// <
    LessThan,
    /// <=
    LessThanEqual,
    /// >
    GreaterThan,
    /// >=
    GreaterThanEqual,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    BitXor,
    /// in (membership)
    In,
}

/// Ternary `cond then a [else b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpression {
    /// The test
    pub condition: Box<Expr>,
    /// Value when the test holds
    pub then_branch: Box<Expr>,
    /// Value otherwise; `undefined` when absent
    pub else_branch: Option<Box<Expr>>,
}

/// An anonymous function.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpression {
    /// The parameters
    pub params: Vec<Parameter>,
    /// The returned expression
    pub body: Box<Expr>,
    /// Whether this is `async lambda`
    pub is_async: bool,
}

/// A function call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// The called expression
    pub callee: Box<Expr>,
    /// Argument expressions
    pub arguments: Vec<Expr>,
}

/// Property read.
#[derive(Debug, Clone, PartialEq)]
pub struct GetExpression {
    /// The object
    pub object: Box<Expr>,
    /// Property name
    pub name: Identifier,
}

/// Property write.
#[derive(Debug, Clone, PartialEq)]
pub struct SetExpression {
    /// The object
    pub object: Box<Expr>,
    /// Property name
    pub name: Identifier,
    /// Assigned value
    pub value: Box<Expr>,
}

/// One dictionary literal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    /// Key expression, emitted as written
    pub key: Expr,
    /// Value expression; equal to the key for shorthand entries
    pub value: Expr,
}

/// Subscript index or slice.
///
/// `a[i]` is `{ start: Some(i), colon: false, end: None }`; slices set
/// `colon` and leave out whichever bound was omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptIndex {
    /// Index, or slice lower bound
    pub start: Option<Box<Expr>>,
    /// Whether this is a slice
    pub colon: bool,
    /// Slice upper bound
    pub end: Option<Box<Expr>>,
}

/// Subscript read.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpression {
    /// The subscripted object
    pub object: Box<Expr>,
    /// Index or slice
    pub index: SubscriptIndex,
}

/// Subscript write.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignSubscriptExpression {
    /// The subscripted object
    pub object: Box<Expr>,
    /// Index or slice
    pub index: SubscriptIndex,
    /// Assigned value
    pub value: Box<Expr>,
}

/// A logical expression.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    /// Left operand
    pub left: Box<Expr>,
    /// The operator
    pub operator: LogicalOperator,
    /// Right operand
    pub right: Box<Expr>,
}

/// Logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// and
    And,
    /// or
    Or,
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// The operator
    pub operator: UnaryOperator,
    /// The operand
    pub argument: Box<Expr>,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `not` / `!`
    Not,
    /// -
    Minus,
    /// ~
    BitwiseNot,
}

/// Increment or decrement of an assignable target.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// `++` or `--`
    pub operator: UpdateOperator,
    /// Variable, property or subscript being updated
    pub target: Box<Expr>,
}

/// Update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    /// ++
    Increment,
    /// --
    Decrement,
}
