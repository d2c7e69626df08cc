//! Source operator → IR operator table.
//!
//! Operators with no direct C++ counterpart are rejected and named after
//! their variant in snake case (`FloorDivision` → `floor_division`).

use crate::error::{Result, TranspileError};
use crate::ir::types::{BinOp, UnOp};
use crate::syntax::{BoolOperator, CmpOperator, Operator, UnaryOperator};
use heck::ToSnakeCase;
use std::fmt::Debug;

pub(super) fn binary_operator(op: Operator) -> Result<BinOp> {
    Ok(match op {
        Operator::Add => BinOp::Add,
        Operator::Subtract => BinOp::Sub,
        Operator::Multiply => BinOp::Mul,
        Operator::Divide => BinOp::Div,
        Operator::Modulo => BinOp::Rem,
        Operator::LeftShift => BinOp::Shl,
        Operator::RightShift => BinOp::Shr,
        Operator::BitAnd => BinOp::BitAnd,
        Operator::BitOr => BinOp::BitOr,
        Operator::BitXor => BinOp::BitXor,
        Operator::Power | Operator::FloorDivision | Operator::MatrixMultiplication => {
            return Err(unsupported_operator(op))
        }
    })
}

pub(super) fn unary_operator(op: UnaryOperator) -> UnOp {
    match op {
        UnaryOperator::Minus => UnOp::Neg,
        UnaryOperator::Plus => UnOp::Plus,
        UnaryOperator::Not => UnOp::Not,
        UnaryOperator::Invert => UnOp::BitNot,
    }
}

pub(super) fn bool_operator(op: BoolOperator) -> BinOp {
    match op {
        BoolOperator::And => BinOp::And,
        BoolOperator::Or => BinOp::Or,
    }
}

pub(super) fn comparison_operator(op: CmpOperator) -> Result<BinOp> {
    Ok(match op {
        CmpOperator::Eq => BinOp::Eq,
        CmpOperator::NotEq => BinOp::Ne,
        CmpOperator::Lt => BinOp::Lt,
        CmpOperator::LtE => BinOp::Le,
        CmpOperator::Gt => BinOp::Gt,
        CmpOperator::GtE => BinOp::Ge,
        CmpOperator::Is | CmpOperator::IsNot | CmpOperator::In | CmpOperator::NotIn => {
            return Err(unsupported_operator(op))
        }
    })
}

fn unsupported_operator(op: impl Debug) -> TranspileError {
    TranspileError::unsupported(format!("{op:?}").to_snake_case())
}
