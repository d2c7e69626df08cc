//! Syntax tree reader.
//!
//! The core never reads Python source text. An external front end parses it
//! and hands over a JSON rendering of Python's `ast` module: every node is an
//! object whose `"_type"` key holds the Python class name and whose other keys
//! are that class's fields. Keys the core does not use (`lineno`, `ctx`,
//! `type_comment`, ...) are ignored.
//!
//! ```text
//! {"_type": "Module", "body": [
//!     {"_type": "Assign",
//!      "targets": [{"_type": "Name", "id": "y"}],
//!      "value": {"_type": "Constant", "value": 5}}
//! ]}
//! ```
//!
//! Statement and expression kinds outside the supported subset are kept as
//! `Other { kind }` nodes; rejecting them is the lowering pass's job.

use crate::error::TranspileError;
use crate::syntax::*;
use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;

/// Read a module from its JSON rendering.
pub fn parse_module_json(source: &str) -> Result<Module> {
    let value: Value = serde_json::from_str(source).context("syntax tree is not valid JSON")?;
    parse_module(&value)
}

/// Read a module from an already-decoded JSON value.
pub fn parse_module(value: &Value) -> Result<Module> {
    let kind = node_type(value)?;
    if kind != "Module" {
        bail!("expected a Module node at the root, found {kind}");
    }
    Ok(Module {
        body: parse_body(value, "body")?,
    })
}

fn node_type(value: &Value) -> Result<&str> {
    value
        .get("_type")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("node has no \"_type\" key: {value}"))
}

fn field<'a>(node: &'a Value, name: &str) -> Result<&'a Value> {
    node.get(name)
        .ok_or_else(|| anyhow!("missing field \"{name}\""))
}

/// A field that is either absent or `null`.
fn optional_field<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
    node.get(name).filter(|v| !v.is_null())
}

fn string_field(node: &Value, name: &str) -> Result<String> {
    field(node, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("field \"{name}\" is not a string"))
}

/// A list-valued field; absent means empty.
fn list_field<'a>(node: &'a Value, name: &str) -> Result<&'a [Value]> {
    match optional_field(node, name) {
        None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => bail!("field \"{name}\" is not a list"),
    }
}

fn parse_body(node: &Value, name: &str) -> Result<Vec<Stmt>> {
    list_field(node, name)?
        .iter()
        .enumerate()
        .map(|(idx, stmt)| parse_stmt(stmt).with_context(|| format!("in {name}[{idx}]")))
        .collect()
}

fn parse_exprs(node: &Value, name: &str) -> Result<Vec<Expr>> {
    list_field(node, name)?.iter().map(parse_expr).collect()
}

fn boxed_expr(node: &Value, name: &str) -> Result<Box<Expr>> {
    Ok(Box::new(parse_expr(field(node, name)?)?))
}

fn optional_expr(node: &Value, name: &str) -> Result<Option<Expr>> {
    optional_field(node, name).map(parse_expr).transpose()
}

fn parse_stmt(node: &Value) -> Result<Stmt> {
    let kind = node_type(node)?;
    let stmt = match kind {
        "FunctionDef" => Stmt::FunctionDef(parse_function_def(node)?),
        "Return" => Stmt::Return {
            value: optional_expr(node, "value")?,
        },
        "Assign" => Stmt::Assign {
            targets: parse_exprs(node, "targets")?,
            value: parse_expr(field(node, "value")?)?,
        },
        "AnnAssign" => Stmt::AnnAssign {
            target: parse_expr(field(node, "target")?)?,
            annotation: parse_expr(field(node, "annotation")?)?,
            value: optional_expr(node, "value")?,
        },
        "AugAssign" => Stmt::AugAssign {
            target: parse_expr(field(node, "target")?)?,
            op: parse_operator(field(node, "op")?)?,
            value: parse_expr(field(node, "value")?)?,
        },
        "If" => Stmt::If {
            test: parse_expr(field(node, "test")?)?,
            body: parse_body(node, "body")?,
            orelse: parse_body(node, "orelse")?,
        },
        "While" => Stmt::While {
            test: parse_expr(field(node, "test")?)?,
            body: parse_body(node, "body")?,
            orelse: parse_body(node, "orelse")?,
        },
        "For" => Stmt::For {
            target: parse_expr(field(node, "target")?)?,
            iter: parse_expr(field(node, "iter")?)?,
            body: parse_body(node, "body")?,
            orelse: parse_body(node, "orelse")?,
        },
        "Import" => Stmt::Import {
            names: parse_aliases(node)?,
        },
        "ImportFrom" => Stmt::ImportFrom {
            module: optional_field(node, "module")
                .and_then(Value::as_str)
                .map(str::to_string),
            names: parse_aliases(node)?,
        },
        "Expr" => Stmt::Expr {
            value: parse_expr(field(node, "value")?)?,
        },
        "Pass" => Stmt::Pass,
        "Break" => Stmt::Break,
        "Continue" => Stmt::Continue,
        other => Stmt::Other {
            kind: other.to_string(),
        },
    };
    Ok(stmt)
}

fn parse_function_def(node: &Value) -> Result<FunctionDef> {
    let name = string_field(node, "name")?;
    let args = match optional_field(node, "args") {
        Some(args) => parse_arguments(args).with_context(|| format!("in parameters of {name}"))?,
        None => Arguments::default(),
    };
    Ok(FunctionDef {
        body: parse_body(node, "body").with_context(|| format!("in body of {name}"))?,
        decorator_list: parse_exprs(node, "decorator_list")?,
        returns: optional_expr(node, "returns")?,
        args,
        name,
    })
}

fn parse_arguments(node: &Value) -> Result<Arguments> {
    let args = |name: &str| -> Result<Vec<Arg>> {
        list_field(node, name)?.iter().map(parse_arg).collect()
    };
    let kw_defaults = list_field(node, "kw_defaults")?
        .iter()
        .map(|v| {
            if v.is_null() {
                Ok(None)
            } else {
                parse_expr(v).map(Some)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Arguments {
        posonlyargs: args("posonlyargs")?,
        args: args("args")?,
        vararg: optional_field(node, "vararg").map(parse_arg).transpose()?,
        kwonlyargs: args("kwonlyargs")?,
        kw_defaults,
        kwarg: optional_field(node, "kwarg").map(parse_arg).transpose()?,
        defaults: parse_exprs(node, "defaults")?,
    })
}

fn parse_arg(node: &Value) -> Result<Arg> {
    Ok(Arg {
        arg: string_field(node, "arg")?,
        annotation: optional_expr(node, "annotation")?,
    })
}

fn parse_aliases(node: &Value) -> Result<Vec<Alias>> {
    list_field(node, "names")?
        .iter()
        .map(|alias| {
            Ok(Alias {
                name: string_field(alias, "name")?,
                asname: optional_field(alias, "asname")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect()
}

fn parse_expr(node: &Value) -> Result<Expr> {
    let kind = node_type(node)?;
    let expr = match kind {
        "Constant" => Expr::Constant {
            value: parse_constant(node.get("value").unwrap_or(&Value::Null))?,
        },
        // Pre-3.8 front ends emit dedicated literal nodes.
        "Num" => Expr::Constant {
            value: parse_constant(field(node, "n")?)?,
        },
        "Str" => Expr::Constant {
            value: parse_constant(field(node, "s")?)?,
        },
        "NameConstant" => Expr::Constant {
            value: parse_constant(node.get("value").unwrap_or(&Value::Null))?,
        },
        "Name" => Expr::Name {
            id: string_field(node, "id")?,
        },
        "BinOp" => Expr::BinOp {
            left: boxed_expr(node, "left")?,
            op: parse_operator(field(node, "op")?)?,
            right: boxed_expr(node, "right")?,
        },
        "UnaryOp" => Expr::UnaryOp {
            op: parse_unary_operator(field(node, "op")?)?,
            operand: boxed_expr(node, "operand")?,
        },
        "BoolOp" => Expr::BoolOp {
            op: match node_type(field(node, "op")?)? {
                "And" => BoolOperator::And,
                "Or" => BoolOperator::Or,
                other => bail!("unknown boolean operator {other}"),
            },
            values: parse_exprs(node, "values")?,
        },
        "Compare" => Expr::Compare {
            left: boxed_expr(node, "left")?,
            ops: list_field(node, "ops")?
                .iter()
                .map(parse_cmp_operator)
                .collect::<Result<_>>()?,
            comparators: parse_exprs(node, "comparators")?,
        },
        "Call" => Expr::Call {
            func: boxed_expr(node, "func")?,
            args: parse_exprs(node, "args")?,
            keywords: list_field(node, "keywords")?
                .iter()
                .map(|kw| {
                    Ok(Keyword {
                        arg: optional_field(kw, "arg")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        value: parse_expr(field(kw, "value")?)?,
                    })
                })
                .collect::<Result<_>>()?,
        },
        "Attribute" => Expr::Attribute {
            value: boxed_expr(node, "value")?,
            attr: string_field(node, "attr")?,
        },
        "Subscript" => {
            // Python < 3.9 wraps the slice in an Index node.
            let slice = field(node, "slice")?;
            let slice = if node_type(slice)? == "Index" {
                field(slice, "value")?
            } else {
                slice
            };
            Expr::Subscript {
                value: boxed_expr(node, "value")?,
                slice: Box::new(parse_expr(slice)?),
            }
        }
        "Tuple" => Expr::Tuple {
            elts: parse_exprs(node, "elts")?,
        },
        "List" => Expr::List {
            elts: parse_exprs(node, "elts")?,
        },
        "Starred" => Expr::Starred {
            value: boxed_expr(node, "value")?,
        },
        other => Expr::Other {
            kind: other.to_string(),
        },
    };
    Ok(expr)
}

fn parse_constant(value: &Value) -> Result<Constant> {
    let constant = match value {
        Value::Null => Constant::None,
        Value::Bool(b) => Constant::Bool(*b),
        Value::Number(n) => {
            // Numbers keep their source text, so integer kind is decided by it.
            let text = n.to_string();
            if text.contains(['.', 'e', 'E']) {
                let f = n
                    .as_f64()
                    .ok_or_else(|| anyhow!("numeric literal {n} is not representable"))?;
                Constant::Float(f)
            } else {
                let i = n.as_i64().ok_or_else(|| {
                    TranspileError::unsupported("integer_literal_out_of_range")
                })?;
                Constant::Int(i)
            }
        }
        Value::String(s) => Constant::Str(s.clone()),
        other => bail!("unsupported constant value {other}"),
    };
    Ok(constant)
}

fn parse_operator(node: &Value) -> Result<Operator> {
    let op = match node_type(node)? {
        "Add" => Operator::Add,
        "Sub" => Operator::Subtract,
        "Mult" => Operator::Multiply,
        "Div" => Operator::Divide,
        "Mod" => Operator::Modulo,
        "Pow" => Operator::Power,
        "FloorDiv" => Operator::FloorDivision,
        "MatMult" => Operator::MatrixMultiplication,
        "LShift" => Operator::LeftShift,
        "RShift" => Operator::RightShift,
        "BitOr" => Operator::BitOr,
        "BitXor" => Operator::BitXor,
        "BitAnd" => Operator::BitAnd,
        other => bail!("unknown binary operator {other}"),
    };
    Ok(op)
}

fn parse_unary_operator(node: &Value) -> Result<UnaryOperator> {
    let op = match node_type(node)? {
        "Invert" => UnaryOperator::Invert,
        "Not" => UnaryOperator::Not,
        "UAdd" => UnaryOperator::Plus,
        "USub" => UnaryOperator::Minus,
        other => bail!("unknown unary operator {other}"),
    };
    Ok(op)
}

fn parse_cmp_operator(node: &Value) -> Result<CmpOperator> {
    let op = match node_type(node)? {
        "Eq" => CmpOperator::Eq,
        "NotEq" => CmpOperator::NotEq,
        "Lt" => CmpOperator::Lt,
        "LtE" => CmpOperator::LtE,
        "Gt" => CmpOperator::Gt,
        "GtE" => CmpOperator::GtE,
        "Is" => CmpOperator::Is,
        "IsNot" => CmpOperator::IsNot,
        "In" => CmpOperator::In,
        "NotIn" => CmpOperator::NotIn,
        other => bail!("unknown comparison operator {other}"),
    };
    Ok(op)
}
