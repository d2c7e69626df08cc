//! C++ backend: maps IR types, literals and operators onto C++17 spellings.

use crate::backend::Backend;
use crate::error::{Result, TranspileError};
use crate::ir::*;
use heck::ToSnakeCase;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Source type name → (C++ name, number of required type arguments).
static TYPE_MAP: Lazy<HashMap<&'static str, (&'static str, usize)>> = Lazy::new(|| {
    HashMap::from([
        ("str", ("std::string", 0)),
        ("int", ("int", 0)),
        ("float", ("float", 0)),
        ("bool", ("bool", 0)),
        ("list", ("std::vector", 1)),
        ("set", ("std::set", 1)),
        ("dict", ("std::map", 2)),
    ])
});

/// Only valid as a return type, where it becomes `void`.
const NONE_TYPE: &str = "None";

/// C++ backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppBackend;

impl CppBackend {
    pub fn new() -> Self {
        CppBackend
    }
}

impl Backend for CppBackend {
    fn type_name(&self, ty: &IrType) -> Result<String> {
        let IrType::Named { name, args } = ty else {
            return Ok("auto".to_string());
        };
        if name == NONE_TYPE {
            return Err(TranspileError::unsupported("none_type_outside_return"));
        }
        let Some(&(cpp_name, arity)) = TYPE_MAP.get(name.as_str()) else {
            return Err(TranspileError::unsupported(format!(
                "unmapped_type_{}",
                name.to_snake_case()
            )));
        };
        if args.len() != arity {
            return Err(TranspileError::unsupported(format!(
                "{}_type_arguments",
                name.to_snake_case()
            )));
        }
        if arity == 0 {
            return Ok(cpp_name.to_string());
        }
        let args = args
            .iter()
            .map(|arg| self.type_name(arg))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{cpp_name}<{}>", args.join(", ")))
    }

    fn return_type_name(&self, ty: &IrType) -> Result<String> {
        match ty {
            IrType::Named { name, args } if name == NONE_TYPE && args.is_empty() => {
                Ok("void".to_string())
            }
            other => self.type_name(other),
        }
    }

    fn literal(&self, lit: &IrLiteral) -> String {
        match lit {
            IrLiteral::Int(v) => v.to_string(),
            IrLiteral::Float(v) => float_literal(*v),
            IrLiteral::Str(s) => string_literal(s),
            IrLiteral::Bool(true) => "true".to_string(),
            IrLiteral::Bool(false) => "false".to_string(),
            IrLiteral::Null => "nullptr".to_string(),
        }
    }

    fn binary_operator(&self, op: BinOp) -> &'static str {
        match op {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }

    fn unary_operator(&self, op: UnOp) -> &'static str {
        match op {
            UnOp::Neg => "-",
            UnOp::Plus => "+",
            UnOp::Not => "!",
            UnOp::BitNot => "~",
        }
    }
}

/// Emit a float literal, handling NaN and infinity special values.
fn float_literal(value: f64) -> String {
    if value.is_nan() {
        "NAN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "INFINITY".to_string()
        } else {
            "-INFINITY".to_string()
        }
    } else {
        // Debug keeps a fractional part or exponent, so the literal stays
        // floating point.
        format!("{value:?}")
    }
}

fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                // Octal escapes stop after three digits.
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
