//! Source syntax tree.
//!
//! A generic rendering of Python's `ast` module, produced by an external
//! front end and handed to the core as-is. Field names follow the Python
//! classes so that a front end can fill them without a mapping table.
//!
//! Node kinds the pipeline does not translate are kept as `Other { kind }`
//! so that lowering can name them when it rejects them.

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

/// Source statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FunctionDef(FunctionDef),
    Return {
        value: Option<Expr>,
    },
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    AnnAssign {
        target: Expr,
        annotation: Expr,
        value: Option<Expr>,
    },
    AugAssign {
        target: Expr,
        op: Operator,
        value: Expr,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    Import {
        names: Vec<Alias>,
    },
    ImportFrom {
        module: Option<String>,
        names: Vec<Alias>,
    },
    Expr {
        value: Expr,
    },
    Pass,
    Break,
    Continue,
    /// Any statement kind outside the supported subset, by Python class name.
    Other {
        kind: String,
    },
}

impl Stmt {
    /// Convenience constructor for `name = value`.
    pub fn assign(name: &str, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![Expr::name(name)],
            value,
        }
    }

    /// Convenience constructor for an expression statement.
    pub fn expr(value: Expr) -> Self {
        Stmt::Expr { value }
    }

    /// Python class name of this statement kind.
    pub fn kind(&self) -> &str {
        match self {
            Stmt::FunctionDef(_) => "FunctionDef",
            Stmt::Return { .. } => "Return",
            Stmt::Assign { .. } => "Assign",
            Stmt::AnnAssign { .. } => "AnnAssign",
            Stmt::AugAssign { .. } => "AugAssign",
            Stmt::If { .. } => "If",
            Stmt::While { .. } => "While",
            Stmt::For { .. } => "For",
            Stmt::Import { .. } => "Import",
            Stmt::ImportFrom { .. } => "ImportFrom",
            Stmt::Expr { .. } => "Expr",
            Stmt::Pass => "Pass",
            Stmt::Break => "Break",
            Stmt::Continue => "Continue",
            Stmt::Other { kind } => kind,
        }
    }
}

/// A `def` statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionDef {
    pub name: String,
    pub args: Arguments,
    pub body: Vec<Stmt>,
    pub decorator_list: Vec<Expr>,
    pub returns: Option<Expr>,
}

/// Parameter list of a function, split the way Python's `ast.arguments` is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    pub posonlyargs: Vec<Arg>,
    pub args: Vec<Arg>,
    pub vararg: Option<Arg>,
    pub kwonlyargs: Vec<Arg>,
    pub kw_defaults: Vec<Option<Expr>>,
    pub kwarg: Option<Arg>,
    pub defaults: Vec<Expr>,
}

impl Arguments {
    /// Plain positional parameters with no defaults.
    pub fn positional(args: Vec<Arg>) -> Self {
        Arguments {
            args,
            ..Default::default()
        }
    }
}

/// A single parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub arg: String,
    pub annotation: Option<Expr>,
}

impl Arg {
    pub fn new(name: &str, annotation: Option<Expr>) -> Self {
        Arg {
            arg: name.to_string(),
            annotation,
        }
    }
}

/// `name as asname` in an import statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

/// Source expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant {
        value: Constant,
    },
    Name {
        id: String,
    },
    BinOp {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    BoolOp {
        op: BoolOperator,
        values: Vec<Expr>,
    },
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOperator>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
    },
    Tuple {
        elts: Vec<Expr>,
    },
    List {
        elts: Vec<Expr>,
    },
    Starred {
        value: Box<Expr>,
    },
    /// Any expression kind outside the supported subset, by Python class name.
    Other {
        kind: String,
    },
}

impl Expr {
    pub fn name(id: &str) -> Self {
        Expr::Name { id: id.to_string() }
    }

    pub fn int(value: i64) -> Self {
        Expr::Constant {
            value: Constant::Int(value),
        }
    }

    pub fn str(value: &str) -> Self {
        Expr::Constant {
            value: Constant::Str(value.to_string()),
        }
    }

    pub fn binop(left: Expr, op: Operator, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Positional call of a plain function name.
    pub fn call(func: &str, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(Expr::name(func)),
            args,
            keywords: Vec::new(),
        }
    }

    /// Python class name of this expression kind.
    pub fn kind(&self) -> &str {
        match self {
            Expr::Constant { .. } => "Constant",
            Expr::Name { .. } => "Name",
            Expr::BinOp { .. } => "BinOp",
            Expr::UnaryOp { .. } => "UnaryOp",
            Expr::BoolOp { .. } => "BoolOp",
            Expr::Compare { .. } => "Compare",
            Expr::Call { .. } => "Call",
            Expr::Attribute { .. } => "Attribute",
            Expr::Subscript { .. } => "Subscript",
            Expr::Tuple { .. } => "Tuple",
            Expr::List { .. } => "List",
            Expr::Starred { .. } => "Starred",
            Expr::Other { kind } => kind,
        }
    }
}

/// `keyword=value` in a call.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    /// `None` for `**mapping` arguments.
    pub arg: Option<String>,
    pub value: Expr,
}

/// Literal constant values.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Binary arithmetic and bitwise operators.
///
/// Variant names describe the operation rather than copying Python's class
/// names, so that diagnostics read naturally (`Pow` is `Power`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    FloorDivision,
    MatrixMultiplication,
    LeftShift,
    RightShift,
    BitOr,
    BitXor,
    BitAnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Invert,
    Not,
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}
