//! Scope tracking and declaration resolution.
//!
//! Decides, for every assignment, whether it introduces a new name (and so
//! becomes a typed declaration) or rebinds a name already declared in the
//! current frame (a plain assignment).
//!
//! Frames exist only at function boundaries. Assignments inside if/while/for
//! bodies resolve against the enclosing function's frame, and a name bound
//! only in an outer frame is a new binding in the inner one (shadowing).

use super::core::IrBuilder;
use crate::error::{Result, TranspileError};
use crate::ir::types::*;
use crate::syntax::{Arg, Constant, Expr};
use heck::ToSnakeCase;
use std::collections::HashMap;

/// Stack of name → type frames. The bottom frame is the module scope and is
/// never popped.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<HashMap<String, IrType>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(super) fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub(super) fn pop(&mut self) {
        debug_assert!(self.frames.len() > 1, "module scope must not be popped");
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Register `name` in the innermost frame.
    pub(super) fn bind(&mut self, name: &str, ty: IrType) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), ty);
        }
    }

    /// Drop `name` from the innermost frame.
    pub(super) fn unbind(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.remove(name);
        }
    }

    pub fn is_bound_in_current(&self, name: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.contains_key(name))
    }

    /// Resolve `name` innermost-first.
    pub fn lookup(&self, name: &str) -> Option<&IrType> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of resolving an assignment target.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Binding {
    /// First binding in the current frame; needs a declaration of this type.
    New(IrType),
    /// Already bound in the current frame; plain assignment.
    Existing,
}

impl IrBuilder {
    /// Classify an assignment to `name` and register new bindings.
    pub(super) fn resolve_binding(
        &mut self,
        name: &str,
        annotation: Option<&Expr>,
    ) -> Result<Binding> {
        if self.scopes.is_bound_in_current(name) {
            return Ok(Binding::Existing);
        }
        let ty = self.resolve_type(name, annotation)?;
        self.scopes.bind(name, ty.clone());
        Ok(Binding::New(ty))
    }

    /// Register a function parameter in the current frame.
    pub(super) fn bind_parameter(&mut self, arg: &Arg) -> Result<IrParam> {
        self.check_identifier(&arg.arg)?;
        let ty = self.resolve_type(&arg.arg, arg.annotation.as_ref())?;
        self.scopes.bind(&arg.arg, ty.clone());
        Ok(IrParam {
            name: arg.arg.clone(),
            ty,
        })
    }

    /// Register a loop variable. Its type is decided by the loop header, so
    /// strict mode does not apply. Returns true when the name was not bound
    /// before; the caller unbinds it again after the loop body.
    pub(super) fn bind_loop_variable(&mut self, name: &str) -> bool {
        if self.scopes.is_bound_in_current(name) {
            return false;
        }
        self.scopes.bind(name, IrType::Inferred);
        true
    }

    /// Annotation if present, else the inferred marker (or a failure in
    /// strict mode).
    fn resolve_type(&self, name: &str, annotation: Option<&Expr>) -> Result<IrType> {
        match annotation {
            Some(annotation) => type_from_annotation(annotation),
            None if self.options.strict_type_inference => {
                Err(TranspileError::TypeInferenceFailure(name.to_string()))
            }
            None => Ok(IrType::Inferred),
        }
    }
}

/// Convert a type annotation expression into an IR type.
///
/// Accepts `int`, `list[int]`, `dict[str, float]`, dotted names such as
/// `array.array`, `None`, and string forward references.
pub(super) fn type_from_annotation(annotation: &Expr) -> Result<IrType> {
    match annotation {
        Expr::Name { id } => Ok(IrType::named(id)),
        Expr::Constant {
            value: Constant::None,
        } => Ok(IrType::named("None")),
        Expr::Constant {
            value: Constant::Str(name),
        } => Ok(IrType::named(name)),
        Expr::Attribute { .. } => Ok(IrType::named(&dotted_name(annotation)?)),
        Expr::Subscript { value, slice } => {
            let IrType::Named { name, .. } = type_from_annotation(value)? else {
                return Err(TranspileError::unsupported("annotation_subscript"));
            };
            let args = match slice.as_ref() {
                Expr::Tuple { elts } => elts
                    .iter()
                    .map(type_from_annotation)
                    .collect::<Result<Vec<_>>>()?,
                single => vec![type_from_annotation(single)?],
            };
            Ok(IrType::Named { name, args })
        }
        other => Err(TranspileError::unsupported(format!(
            "annotation_{}",
            other.kind().to_snake_case()
        ))),
    }
}

fn dotted_name(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Name { id } => Ok(id.clone()),
        Expr::Attribute { value, attr } => Ok(format!("{}.{}", dotted_name(value)?, attr)),
        other => Err(TranspileError::unsupported(format!(
            "annotation_{}",
            other.kind().to_snake_case()
        ))),
    }
}
