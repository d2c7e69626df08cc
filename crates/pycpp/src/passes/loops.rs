//! Loop header resolution.
//!
//! Replaces every `ForHeader::Unresolved` left by control-flow lowering:
//! `range(...)` iterables become counted loops, anything else becomes a
//! range-based loop over the iterable.

use crate::error::{Result, TranspileError};
use crate::ir::*;

/// Resolves every loop header in `unit`.
pub fn resolve(unit: TranslationUnit) -> Result<TranslationUnit> {
    let items = resolve_stmts(unit.items)?;
    Ok(TranslationUnit { items })
}

fn resolve_stmts(stmts: Vec<IrStmt>) -> Result<Vec<IrStmt>> {
    stmts.into_iter().map(resolve_stmt).collect()
}

fn resolve_block(block: IrBlock) -> Result<IrBlock> {
    Ok(IrBlock::new(resolve_stmts(block.statements)?))
}

fn resolve_stmt(stmt: IrStmt) -> Result<IrStmt> {
    Ok(match stmt {
        IrStmt::For { header, body } => IrStmt::For {
            header: resolve_header(header)?,
            body: resolve_block(body)?,
        },
        IrStmt::If {
            cond,
            then_block,
            else_block,
        } => IrStmt::If {
            cond,
            then_block: resolve_block(then_block)?,
            else_block: else_block.map(resolve_block).transpose()?,
        },
        IrStmt::While { cond, body } => IrStmt::While {
            cond,
            body: resolve_block(body)?,
        },
        IrStmt::Function(func) => IrStmt::Function(IrFunction {
            body: resolve_block(func.body)?,
            ..func
        }),
        other => other,
    })
}

fn resolve_header(header: ForHeader) -> Result<ForHeader> {
    match header {
        ForHeader::Unresolved {
            target,
            iterable: IrExpr::Call { callee, args },
        } if callee == "range" => counted(target, args),
        ForHeader::Unresolved { target, iterable } => Ok(ForHeader::Ranged {
            var: target,
            iterable,
        }),
        resolved => Ok(resolved),
    }
}

/// `range(stop)`, `range(start, stop)` or `range(start, stop, step)`.
fn counted(var: String, args: Vec<IrExpr>) -> Result<ForHeader> {
    let mut args = args.into_iter();
    let (start, stop, step) = match (args.next(), args.next(), args.next(), args.next()) {
        (Some(stop), None, None, None) => (IrExpr::int(0), stop, 1),
        (Some(start), Some(stop), None, None) => (start, stop, 1),
        (Some(start), Some(stop), Some(step), None) => (start, stop, literal_step(&step)?),
        _ => return Err(TranspileError::unsupported("range_arity")),
    };

    // The comparison direction depends on the sign of the step, so it must
    // be known here.
    let (cond_op, update_op, magnitude) = if step > 0 {
        (BinOp::Lt, BinOp::Add, step)
    } else {
        let magnitude = step
            .checked_neg()
            .ok_or_else(|| TranspileError::unsupported("range_step_overflow"))?;
        (BinOp::Gt, BinOp::Sub, magnitude)
    };

    Ok(ForHeader::Counted {
        init: Box::new(IrStmt::Declaration {
            ty: IrType::named("int"),
            target: var.clone(),
            value: start,
        }),
        cond: IrExpr::binary(cond_op, IrExpr::Identifier(var.clone()), stop),
        update: IrExpr::Assignment {
            target: var,
            op: Some(update_op),
            value: Box::new(IrExpr::int(magnitude)),
        },
    })
}

fn literal_step(step: &IrExpr) -> Result<i64> {
    let value = match step {
        IrExpr::Literal(IrLiteral::Int(n)) => *n,
        IrExpr::Unary {
            op: UnOp::Neg,
            operand,
        } => match operand.as_ref() {
            IrExpr::Literal(IrLiteral::Int(n)) => n
                .checked_neg()
                .ok_or_else(|| TranspileError::unsupported("range_step_overflow"))?,
            _ => return Err(TranspileError::unsupported("non_literal_range_step")),
        },
        _ => return Err(TranspileError::unsupported("non_literal_range_step")),
    };
    if value == 0 {
        return Err(TranspileError::unsupported("zero_range_step"));
    }
    Ok(value)
}
