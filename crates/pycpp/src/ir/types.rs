//! IR type definitions.
//!
//! These types describe C++ program structure independently of both the
//! Python syntax tree and the final text. Every node kind has a fixed field
//! order; traversal, printing and equality all follow it. Nodes carry no
//! behavior beyond their shape and a few read-only helpers.

use std::fmt;

/// Type of a declared name, parameter or function result.
///
/// Named types keep their source spelling (`int`, `list[str]`); the backend
/// maps them to target type names at emission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrType {
    /// No annotation was present; the target compiler infers the type.
    Inferred,
    /// A source type name with its type arguments.
    Named { name: String, args: Vec<IrType> },
}

impl IrType {
    /// A named type without type arguments.
    pub fn named(name: &str) -> Self {
        IrType::Named {
            name: name.to_string(),
            args: Vec::new(),
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Inferred => write!(f, "<inferred>"),
            IrType::Named { name, args } if args.is_empty() => write!(f, "{name}"),
            IrType::Named { name, args } => {
                write!(f, "{name}[")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Literal value carried by a literal expression.
#[derive(Debug, Clone, PartialEq)]
pub enum IrLiteral {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    /// Python `None`.
    Null,
}

/// Binary operators of the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,

    // Bitwise
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,

    // Logical
    And,
    Or,

    // Comparisons
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Unary operators of the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Plus,
    Not,
    BitNot,
}

/// IR expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum IrExpr {
    Literal(IrLiteral),

    Identifier(String),

    Unary {
        op: UnOp,
        operand: Box<IrExpr>,
    },

    Binary {
        op: BinOp,
        lhs: Box<IrExpr>,
        rhs: Box<IrExpr>,
    },

    /// `target = value`, or `target op= value` when `op` is set.
    Assignment {
        target: String,
        op: Option<BinOp>,
        value: Box<IrExpr>,
    },

    Call {
        callee: String,
        args: Vec<IrExpr>,
    },
}

impl IrExpr {
    pub fn identifier(name: &str) -> Self {
        IrExpr::Identifier(name.to_string())
    }

    pub fn int(value: i64) -> Self {
        IrExpr::Literal(IrLiteral::Int(value))
    }

    pub fn binary(op: BinOp, lhs: IrExpr, rhs: IrExpr) -> Self {
        IrExpr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IrBlock {
    pub statements: Vec<IrStmt>,
}

impl IrBlock {
    pub fn new(statements: Vec<IrStmt>) -> Self {
        IrBlock { statements }
    }
}

/// How a `for` loop iterates.
#[derive(Debug, Clone, PartialEq)]
pub enum ForHeader {
    /// Placeholder left by control-flow lowering: iterate `target` over a
    /// general iterable. Must be replaced before emission.
    Unresolved { target: String, iterable: IrExpr },

    /// `for (init; cond; update)`.
    Counted {
        init: Box<IrStmt>,
        cond: IrExpr,
        update: IrExpr,
    },

    /// `for (auto var : iterable)`.
    Ranged { var: String, iterable: IrExpr },
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct IrParam {
    pub name: String,
    pub ty: IrType,
}

/// A complete function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct IrFunction {
    pub name: String,
    pub return_type: IrType,
    pub params: Vec<IrParam>,
    pub body: IrBlock,
}

/// IR statements. Each kind is emitted as a complete statement or block
/// without looking at its siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum IrStmt {
    If {
        cond: IrExpr,
        then_block: IrBlock,
        /// `None` means no else branch at all, which is not the same as an
        /// empty one.
        else_block: Option<IrBlock>,
    },

    While {
        cond: IrExpr,
        body: IrBlock,
    },

    For {
        header: ForHeader,
        body: IrBlock,
    },

    Return {
        value: Option<IrExpr>,
    },

    Function(IrFunction),

    /// Introduce and bind a new name.
    Declaration {
        ty: IrType,
        target: String,
        value: IrExpr,
    },

    /// Rebind an existing name; carries no type.
    Assign {
        target: String,
        value: IrExpr,
    },

    Expr(IrExpr),

    /// `#include <path>`.
    Include {
        path: String,
    },

    /// Multi-line comment.
    Comment {
        text: String,
    },

    Break,

    Continue,
}

impl IrStmt {
    /// Short kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            IrStmt::If { .. } => "if",
            IrStmt::While { .. } => "while",
            IrStmt::For { .. } => "for",
            IrStmt::Return { .. } => "return",
            IrStmt::Function(_) => "function",
            IrStmt::Declaration { .. } => "declaration",
            IrStmt::Assign { .. } => "assign",
            IrStmt::Expr(_) => "expression",
            IrStmt::Include { .. } => "include",
            IrStmt::Comment { .. } => "comment",
            IrStmt::Break => "break",
            IrStmt::Continue => "continue",
        }
    }
}

/// The IR of one source file: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslationUnit {
    pub items: Vec<IrStmt>,
}
