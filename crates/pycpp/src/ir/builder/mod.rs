//! Python syntax tree → IR translation.
//!
//! One walk over the module decides scopes and declarations, lowers control
//! flow and converts expressions. The result is a fresh [`TranslationUnit`];
//! the input tree is never modified.

mod control;
mod core;
mod function;
mod operators;
mod scope;
mod translate;

pub use self::core::IrBuilder;
pub use translate::UMBRELLA_INCLUDE;

use crate::error::Result;
use crate::ir::types::TranslationUnit;
use crate::syntax::Module;
use crate::TranspileOptions;

/// Translate a parsed module into IR.
///
/// Loop headers are left unresolved; run the IR passes before emission.
pub fn build_translation_unit(
    module: &Module,
    options: &TranspileOptions,
) -> Result<TranslationUnit> {
    let mut builder = IrBuilder::new(options);
    builder.lower_module(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranspileError;
    use crate::ir::types::*;
    use crate::keywords::Dialect;
    use crate::syntax::{Arg, Arguments, Expr, FunctionDef, Operator, Stmt};

    fn module(body: Vec<Stmt>) -> Module {
        Module { body }
    }

    fn function(name: &str, args: Vec<Arg>, body: Vec<Stmt>) -> Stmt {
        Stmt::FunctionDef(FunctionDef {
            name: name.to_string(),
            args: Arguments::positional(args),
            body,
            ..Default::default()
        })
    }

    fn build(body: Vec<Stmt>) -> Result<TranslationUnit> {
        build_translation_unit(&module(body), &TranspileOptions::default())
    }

    fn strict() -> TranspileOptions {
        TranspileOptions {
            strict_type_inference: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_binding_declares_then_assigns() {
        let unit = build(vec![
            Stmt::assign("y", Expr::int(5)),
            Stmt::assign("y", Expr::int(6)),
        ])
        .unwrap();

        assert_eq!(
            unit.items,
            vec![
                IrStmt::Declaration {
                    ty: IrType::Inferred,
                    target: "y".to_string(),
                    value: IrExpr::int(5),
                },
                IrStmt::Assign {
                    target: "y".to_string(),
                    value: IrExpr::int(6),
                },
            ]
        );
    }

    #[test]
    fn test_function_with_annotated_parameter() {
        let unit = build(vec![function(
            "f",
            vec![Arg::new("x", Some(Expr::name("int")))],
            vec![Stmt::Return {
                value: Some(Expr::name("x")),
            }],
        )])
        .unwrap();

        let [IrStmt::Function(func)] = unit.items.as_slice() else {
            panic!("expected a single function, got {:?}", unit.items);
        };
        assert_eq!(func.name, "f");
        assert_eq!(func.return_type, IrType::Inferred);
        assert_eq!(
            func.params,
            vec![IrParam {
                name: "x".to_string(),
                ty: IrType::named("int"),
            }]
        );
        assert_eq!(
            func.body.statements,
            vec![IrStmt::Return {
                value: Some(IrExpr::identifier("x")),
            }]
        );
    }

    #[test]
    fn test_function_scope_shadows_module_binding() {
        let unit = build(vec![
            Stmt::assign("x", Expr::int(1)),
            function("f", vec![], vec![Stmt::assign("x", Expr::int(2))]),
        ])
        .unwrap();

        let IrStmt::Function(func) = &unit.items[1] else {
            panic!("expected function");
        };
        assert!(matches!(
            func.body.statements[0],
            IrStmt::Declaration { .. }
        ));
        assert_eq!(func.return_type, IrType::named("None"));
    }

    #[test]
    fn test_scope_depth_restored_after_failure() {
        let mut builder = IrBuilder::new(&TranspileOptions::default());
        let failing = module(vec![function(
            "f",
            vec![],
            vec![Stmt::expr(Expr::binop(
                Expr::int(2),
                Operator::Power,
                Expr::int(3),
            ))],
        )]);

        let err = builder.lower_module(&failing).unwrap_err();
        assert_eq!(err, TranspileError::unsupported("power"));
        assert_eq!(builder.scope_depth(), 1);
    }

    #[test]
    fn test_unsupported_operators_are_named() {
        let err = build(vec![Stmt::assign(
            "z",
            Expr::binop(Expr::name("a"), Operator::FloorDivision, Expr::name("b")),
        )])
        .unwrap_err();
        assert_eq!(err, TranspileError::unsupported("floor_division"));
    }

    #[test]
    fn test_unsupported_parameters() {
        let with_default = Stmt::FunctionDef(FunctionDef {
            name: "f".to_string(),
            args: Arguments {
                args: vec![Arg::new("x", None)],
                defaults: vec![Expr::int(1)],
                ..Default::default()
            },
            body: vec![Stmt::Pass],
            ..Default::default()
        });
        assert_eq!(
            build(vec![with_default]).unwrap_err(),
            TranspileError::unsupported("default_parameter")
        );

        let variadic = Stmt::FunctionDef(FunctionDef {
            name: "f".to_string(),
            args: Arguments {
                vararg: Some(Arg::new("args", None)),
                ..Default::default()
            },
            body: vec![Stmt::Pass],
            ..Default::default()
        });
        assert_eq!(
            build(vec![variadic]).unwrap_err(),
            TranspileError::unsupported("variadic_parameter")
        );
    }

    #[test]
    fn test_reserved_identifiers_by_dialect() {
        let body = vec![Stmt::assign("class", Expr::int(1))];
        assert_eq!(
            build(body.clone()).unwrap_err(),
            TranspileError::ReservedIdentifierCollision {
                name: "class".to_string(),
                dialect: Dialect::Full,
            }
        );

        let narrow = TranspileOptions {
            dialect: Dialect::Narrow,
            ..Default::default()
        };
        assert!(build_translation_unit(&module(body), &narrow).is_ok());

        let err = build(vec![Stmt::assign("x", Expr::name("new"))]).unwrap_err();
        assert!(matches!(
            err,
            TranspileError::ReservedIdentifierCollision { ref name, .. } if name == "new"
        ));
    }

    #[test]
    fn test_every_keyword_is_rejected_by_default() {
        let keywords = crate::keywords::C_KEYWORDS
            .iter()
            .chain(crate::keywords::CPP_KEYWORDS);
        for name in keywords {
            let err = build(vec![Stmt::assign(name, Expr::int(0))]).unwrap_err();
            assert!(
                matches!(err, TranspileError::ReservedIdentifierCollision { .. }),
                "`{name}` was accepted"
            );
        }
    }

    #[test]
    fn test_strict_mode_requires_annotations() {
        let body = vec![Stmt::assign("x", Expr::int(1))];
        assert_eq!(
            build_translation_unit(&module(body), &strict()).unwrap_err(),
            TranspileError::TypeInferenceFailure("x".to_string())
        );

        let annotated = vec![Stmt::AnnAssign {
            target: Expr::name("x"),
            annotation: Expr::name("int"),
            value: Some(Expr::int(1)),
        }];
        let unit = build_translation_unit(&module(annotated), &strict()).unwrap();
        assert_eq!(
            unit.items[0],
            IrStmt::Declaration {
                ty: IrType::named("int"),
                target: "x".to_string(),
                value: IrExpr::int(1),
            }
        );

        let returns_unannotated = vec![function(
            "g",
            vec![],
            vec![Stmt::Return {
                value: Some(Expr::int(1)),
            }],
        )];
        assert_eq!(
            build_translation_unit(&module(returns_unannotated), &strict()).unwrap_err(),
            TranspileError::TypeInferenceFailure("g".to_string())
        );
    }

    #[test]
    fn test_entry_guard_and_imports() {
        let guard = Stmt::If {
            test: Expr::Compare {
                left: Box::new(Expr::name("__name__")),
                ops: vec![crate::syntax::CmpOperator::Eq],
                comparators: vec![Expr::str("__main__")],
            },
            body: vec![Stmt::expr(Expr::call("main", vec![]))],
            orelse: vec![],
        };
        let import = |name: &str| Stmt::Import {
            names: vec![crate::syntax::Alias {
                name: name.to_string(),
                asname: None,
            }],
        };

        let unit = build(vec![import("sys"), import("math"), guard]).unwrap();
        assert_eq!(
            unit.items,
            vec![IrStmt::Include {
                path: UMBRELLA_INCLUDE.to_string(),
            }]
        );
    }

    #[test]
    fn test_docstrings_become_comments() {
        let unit = build(vec![
            Stmt::expr(Expr::str("Module doc.")),
            function("f", vec![], vec![Stmt::expr(Expr::str("Does f.")), Stmt::Pass]),
        ])
        .unwrap();

        assert_eq!(
            unit.items[0],
            IrStmt::Comment {
                text: "Module doc.".to_string()
            }
        );
        assert_eq!(
            unit.items[1],
            IrStmt::Comment {
                text: "Does f.".to_string()
            }
        );
        let IrStmt::Function(func) = &unit.items[2] else {
            panic!("expected function");
        };
        assert!(func.body.statements.is_empty());
    }

    #[test]
    fn test_for_loop_left_unresolved() {
        let unit = build(vec![Stmt::For {
            target: Expr::name("i"),
            iter: Expr::call("range", vec![Expr::int(3)]),
            body: vec![Stmt::expr(Expr::call("print", vec![Expr::name("i")]))],
            orelse: vec![],
        }])
        .unwrap();

        let IrStmt::For { header, body } = &unit.items[0] else {
            panic!("expected for loop");
        };
        assert_eq!(
            header,
            &ForHeader::Unresolved {
                target: "i".to_string(),
                iterable: IrExpr::Call {
                    callee: "range".to_string(),
                    args: vec![IrExpr::int(3)],
                },
            }
        );
        assert_eq!(body.statements.len(), 1);
    }

    #[test]
    fn test_loop_variable_does_not_outlive_loop() {
        let counted = || Stmt::For {
            target: Expr::name("i"),
            iter: Expr::call("range", vec![Expr::int(3)]),
            body: vec![Stmt::Pass],
            orelse: vec![],
        };

        // def f():
        //     for i in range(3): pass
        //     i = 5
        let unit = build(vec![function(
            "f",
            vec![],
            vec![counted(), Stmt::assign("i", Expr::int(5))],
        )])
        .unwrap();
        let IrStmt::Function(func) = &unit.items[0] else {
            panic!("expected function");
        };
        assert_eq!(
            func.body.statements[1],
            IrStmt::Declaration {
                ty: IrType::Inferred,
                target: "i".to_string(),
                value: IrExpr::int(5),
            }
        );

        // A name bound before the loop keeps its binding afterwards.
        let unit = build(vec![
            Stmt::assign("i", Expr::int(0)),
            counted(),
            Stmt::assign("i", Expr::int(5)),
        ])
        .unwrap();
        assert_eq!(
            unit.items[2],
            IrStmt::Assign {
                target: "i".to_string(),
                value: IrExpr::int(5),
            }
        );
    }

    #[test]
    fn test_nested_definitions_and_else_clauses_rejected() {
        let nested = function("outer", vec![], vec![function("inner", vec![], vec![Stmt::Pass])]);
        assert_eq!(
            build(vec![nested]).unwrap_err(),
            TranspileError::unsupported("nested_function")
        );

        let while_else = Stmt::While {
            test: Expr::name("c"),
            body: vec![Stmt::Break],
            orelse: vec![Stmt::Pass],
        };
        assert_eq!(
            build(vec![while_else]).unwrap_err(),
            TranspileError::unsupported("while_else")
        );

        assert_eq!(
            build(vec![Stmt::Other {
                kind: "ClassDef".to_string()
            }])
            .unwrap_err(),
            TranspileError::unsupported("class_def")
        );
    }

    #[test]
    fn test_composed_construct_names_are_snake_case() {
        let tuple_target = Stmt::For {
            target: Expr::Tuple {
                elts: vec![Expr::name("k"), Expr::name("v")],
            },
            iter: Expr::name("pairs"),
            body: vec![Stmt::Pass],
            orelse: vec![],
        };
        assert_eq!(
            build(vec![tuple_target]).unwrap_err(),
            TranspileError::unsupported("for_target_tuple")
        );

        let subscript_target = Stmt::Assign {
            targets: vec![Expr::Subscript {
                value: Box::new(Expr::name("xs")),
                slice: Box::new(Expr::int(0)),
            }],
            value: Expr::int(1),
        };
        assert_eq!(
            build(vec![subscript_target]).unwrap_err(),
            TranspileError::unsupported("assignment_to_subscript")
        );
    }

    #[test]
    fn test_print_lowers_to_stream() {
        let unit = build(vec![Stmt::expr(Expr::call(
            "print",
            vec![Expr::name("a"), Expr::name("b")],
        ))])
        .unwrap();

        let expected = IrExpr::binary(
            BinOp::Shl,
            IrExpr::binary(
                BinOp::Shl,
                IrExpr::binary(
                    BinOp::Shl,
                    IrExpr::binary(
                        BinOp::Shl,
                        IrExpr::identifier("std::cout"),
                        IrExpr::identifier("a"),
                    ),
                    IrExpr::Literal(IrLiteral::Str(" ".to_string())),
                ),
                IrExpr::identifier("b"),
            ),
            IrExpr::identifier("std::endl"),
        );
        assert_eq!(unit.items, vec![IrStmt::Expr(expected)]);
    }

    #[test]
    fn test_aug_assign_requires_binding() {
        let err = build(vec![Stmt::AugAssign {
            target: Expr::name("n"),
            op: Operator::Add,
            value: Expr::int(1),
        }])
        .unwrap_err();
        assert_eq!(
            err,
            TranspileError::unsupported("augmented_assignment_to_unbound_name")
        );

        let unit = build(vec![
            Stmt::assign("n", Expr::int(0)),
            Stmt::AugAssign {
                target: Expr::name("n"),
                op: Operator::Add,
                value: Expr::int(1),
            },
        ])
        .unwrap();
        assert_eq!(
            unit.items[1],
            IrStmt::Expr(IrExpr::Assignment {
                target: "n".to_string(),
                op: Some(BinOp::Add),
                value: Box::new(IrExpr::int(1)),
            })
        );
    }
}
