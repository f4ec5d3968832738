use std::fmt;

use bitflags::bitflags;

/// A type annotation as written in source code.
///
/// Every declaration, parameter, function return and cast names one of these.
/// The same enum doubles as the runtime type tag of an
/// [`Object`](crate::interpreter::value::core::Object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `int`: 64-bit signed integer.
    Int,
    /// `float`: 64-bit floating point.
    Float,
    /// `bool` / `boolean`.
    Bool,
    /// `string`.
    Str,
    /// `char`: a single Unicode scalar value.
    Char,
    /// `void`: the absence of a value.
    Void,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Str => "string",
            Self::Char => "char",
            Self::Void => "void",
        };
        write!(f, "{name}")
    }
}

bitflags! {
    /// Modifiers attached to a variable declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Specifiers: u8 {
        /// The binding cannot be reassigned after initialization.
        const CONSTANT = 0b0000_0001;
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every variant records the source line of the token that introduced it, so
/// runtime faults can be reported as `file:line`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal, identifier, call, cast or parenthesized expression.
    Primary {
        /// The primary payload.
        value: Primary,
        /// Line number in the source code.
        line:  usize,
    },
    /// A prefix operator applied to one operand.
    Unary {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Expr>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation such as `a + b` or `a << b`.
    Binary {
        /// Left-hand operand.
        left:  Box<Expr>,
        /// The operator.
        op:    BinaryOperator,
        /// Right-hand operand.
        right: Box<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Simple or compound assignment to a named variable.
    Assignment {
        /// Name of the variable being written.
        target: String,
        /// `=` or one of the compound operators.
        op:     AssignOperator,
        /// The right-hand side; may itself be an assignment.
        value:  Box<Expr>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Returns the source line this expression starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Primary { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Assignment { line, .. } => *line,
        }
    }
}

/// The leaves and atoms of the expression grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer literal.
    Int(i64),
    /// A floating-point literal.
    Float(f64),
    /// `true` or `false`.
    Bool(bool),
    /// A string literal with escapes already resolved.
    Str(String),
    /// A character literal.
    Char(char),
    /// A variable reference.
    Identifier(String),
    /// A parenthesized expression.
    Nested(Box<Expr>),
    /// A call of a user-defined function.
    Call {
        /// Name of the function.
        name:      String,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Expr>,
    },
    /// `cast<type>(expr)`.
    Cast {
        /// The type to convert to.
        target: ValueType,
        /// The converted expression.
        expr:   Box<Expr>,
    },
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `!`
    Not,
    /// `~`
    BitNot,
}

/// Infix operators, grouped by the precedence level that parses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&&`
    And,
    /// `||`
    Or,
}

/// `=` and the compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOperator {
    /// `=`
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`
    Mod,
}

impl AssignOperator {
    /// The binary operator a compound assignment applies, if any.
    #[must_use]
    pub const fn binary(self) -> Option<BinaryOperator> {
        match self {
            Self::Assign => None,
            Self::Add => Some(BinaryOperator::Add),
            Self::Sub => Some(BinaryOperator::Sub),
            Self::Mul => Some(BinaryOperator::Mul),
            Self::Div => Some(BinaryOperator::Div),
            Self::Mod => Some(BinaryOperator::Mod),
        }
    }
}

/// `name: [constant] type [= initializer];`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    /// Name of the variable.
    pub name:        String,
    /// Declared type.
    pub ty:          ValueType,
    /// Modifiers such as `constant`.
    pub specifiers:  Specifiers,
    /// Optional initializer expression.
    pub initializer: Option<Expr>,
    /// Line number in the source code.
    pub line:        usize,
}

/// `name: func(params) [-> type] { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDeclaration {
    /// Name of the function.
    pub name:        String,
    /// Declared return type; `void` when omitted.
    pub return_type: ValueType,
    /// Parameters in call order. They never carry initializers.
    pub params:      Vec<VarDeclaration>,
    /// The function body.
    pub body:        Scope,
    /// Line number in the source code.
    pub line:        usize,
}

/// A braced block of declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Line of the opening brace.
    pub line:         usize,
}

/// Position of a node in an `if` / `elif` / `else` chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// The head of the chain.
    If,
    /// A conditional continuation.
    Elif,
    /// The unconditional tail.
    Else,
}

/// One link of a conditional chain.
///
/// The chain is a singly linked list: the `if` node owns the first `elif`
/// through `next`, and so on down to an optional `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalStatement {
    /// Which kind of branch this link is.
    pub kind:      BranchKind,
    /// The condition; `None` only for `else`.
    pub condition: Option<Expr>,
    /// The branch body.
    pub body:      Scope,
    /// The following branch, if any.
    pub next:      Option<Box<ConditionalStatement>>,
    /// Line number in the source code.
    pub line:      usize,
}

/// `for init; condition; step { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// The loop variable declaration.
    pub initializer: VarDeclaration,
    /// Checked before every iteration.
    pub condition:   Expr,
    /// Evaluated after every iteration.
    pub step:        Expr,
    /// The loop body.
    pub body:        Scope,
    /// Line number in the source code.
    pub line:        usize,
}

/// `break` or `remit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    /// Leaves the innermost loop.
    Break,
    /// Leaves the innermost conditional body.
    Remit,
}

/// A declaration or statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// A variable declaration.
    Var(VarDeclaration),
    /// A function declaration.
    Func(FuncDeclaration),
    /// An expression evaluated for its effects.
    Expression {
        /// The expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `print a, b, c;`
    Print {
        /// Printed expressions, in order.
        expressions: Vec<Expr>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A nested block.
    Scope(Scope),
    /// An `if` chain.
    Conditional(ConditionalStatement),
    /// `while condition { body }`
    While {
        /// Checked before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Scope,
        /// Line number in the source code.
        line:      usize,
    },
    /// A `for` loop.
    For(ForLoop),
    /// `return [expr];`
    Return {
        /// The returned value, if any.
        expr: Option<Expr>,
        /// Line number in the source code.
        line: usize,
    },
    /// `break;` or `remit;`
    Controller {
        /// Which controller.
        kind: ControllerKind,
        /// Line number in the source code.
        line: usize,
    },
}

impl Declaration {
    /// Returns the source line this declaration starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Var(VarDeclaration { line, .. })
            | Self::Func(FuncDeclaration { line, .. })
            | Self::Scope(Scope { line, .. })
            | Self::Conditional(ConditionalStatement { line, .. })
            | Self::For(ForLoop { line, .. })
            | Self::Expression { line, .. }
            | Self::Print { line, .. }
            | Self::While { line, .. }
            | Self::Return { line, .. }
            | Self::Controller { line, .. } => *line,
        }
    }
}

/// The root of a parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    /// Name of the source file, used in diagnostics.
    pub file:         String,
    /// Top-level declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual,
            Mod, Mul, NotEqual, Or, ShiftLeft, ShiftRight, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for AssignOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.binary() {
            Some(op) => write!(f, "{op}="),
            None => write!(f, "="),
        }
    }
}

/// Expressions render as S-expressions: `(+ 1 (* 2 3))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary { value, .. } => write!(f, "{value}"),
            Self::Unary { op, expr, .. } => write!(f, "({op} {expr})"),
            Self::Binary { left, op, right, .. } => write!(f, "({op} {left} {right})"),
            Self::Assignment { target, op, value, .. } => write!(f, "({op} {target} {value})"),
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Nested(expr) => write!(f, "(group {expr})"),
            Self::Call { name, arguments } => {
                write!(f, "(call {name}")?;
                for argument in arguments {
                    write!(f, " {argument}")?;
                }
                write!(f, ")")
            },
            Self::Cast { target, expr } => write!(f, "(cast {target} {expr})"),
        }
    }
}

impl fmt::Display for VarDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constant = if self.specifiers.contains(Specifiers::CONSTANT) { "constant " } else { "" };
        write!(f, "(var {} {constant}{}", self.name, self.ty)?;
        if let Some(init) = &self.initializer {
            write!(f, " {init}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(block")?;
        for declaration in &self.declarations {
            write!(f, " {declaration}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for ConditionalStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.condition) {
            (BranchKind::Else, _) | (_, None) => write!(f, "(else {})", self.body)?,
            (BranchKind::If, Some(c)) => write!(f, "(if {c} {})", self.body)?,
            (BranchKind::Elif, Some(c)) => write!(f, "(elif {c} {})", self.body)?,
        }
        if let Some(next) = &self.next {
            write!(f, " {next}")?;
        }
        Ok(())
    }
}

/// Declarations render in the same S-expression style; used by `--ast`.
impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(var) => write!(f, "{var}"),
            Self::Func(func) => {
                write!(f, "(func {} (", func.name)?;
                for (i, param) in func.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") {} {})", func.return_type, func.body)
            },
            Self::Expression { expr, .. } => write!(f, "{expr}"),
            Self::Print { expressions, .. } => {
                write!(f, "(print")?;
                for expr in expressions {
                    write!(f, " {expr}")?;
                }
                write!(f, ")")
            },
            Self::Scope(scope) => write!(f, "{scope}"),
            Self::Conditional(chain) => write!(f, "{chain}"),
            Self::While { condition, body, .. } => write!(f, "(while {condition} {body})"),
            Self::For(l) => {
                write!(f, "(for {} {} {} {})", l.initializer, l.condition, l.step, l.body)
            },
            Self::Return { expr: Some(expr), .. } => write!(f, "(return {expr})"),
            Self::Return { expr: None, .. } => write!(f, "(return)"),
            Self::Controller { kind: ControllerKind::Break, .. } => write!(f, "(break)"),
            Self::Controller { kind: ControllerKind::Remit, .. } => write!(f, "(remit)"),
        }
    }
}
