//! Type checker integration tests
//!
//! The checker walks the same AST as the interpreter with the same binding
//! discipline; these tests pin the per-construct rules and the agreement
//! between the two passes over a shared corpus.

use skiff::{Interpreter, TypeError};

/// Helper to type-check source code
fn check(source: &str) -> Result<(), TypeError> {
    let statements = skiff::parse(source).expect("program should parse");
    skiff::check::check(&statements)
}

/// Helper to check that checking fails
fn check_err(source: &str) -> TypeError {
    check(source).expect_err("program should fail the type check")
}

// ==================== Declarations ====================

#[test]
fn declaration_accepts_matching_initializer() {
    assert!(check("var x: float = 1;").is_ok());
    assert!(check(r#"var s: string = "hi";"#).is_ok());
    assert!(check("var b: bool = true;").is_ok());
    assert!(check("var c: char = 'c';").is_ok());
    assert!(check("var n: void = nil;").is_ok());
}

#[test]
fn declaration_rejects_mismatched_initializer() {
    assert!(matches!(
        check_err(r#"var x: float = "s";"#),
        TypeError::Declaration { .. }
    ));
    assert!(matches!(
        check_err("var b: bool = 1;"),
        TypeError::Declaration { .. }
    ));
}

#[test]
fn declaration_type_flows_to_later_uses() {
    assert!(check("var x: float = 1; x + 2;").is_ok());
    assert!(matches!(
        check_err(r#"var x: float = 1; x + true;"#),
        TypeError::Operand { .. }
    ));
}

// ==================== Assignment ====================

#[test]
fn assignment_requires_the_recorded_type() {
    assert!(check("var x: float = 1; x = 2;").is_ok());
    assert!(matches!(
        check_err(r#"var x: float = 1; x = "s";"#),
        TypeError::Assignment { .. }
    ));
}

#[test]
fn assignment_to_undeclared_name_is_undefined() {
    assert!(matches!(
        check_err("ghost = 1;"),
        TypeError::UndefinedSymbol { .. }
    ));
}

#[test]
fn reference_to_undeclared_name_is_undefined() {
    assert!(matches!(
        check_err("print ghost;"),
        TypeError::UndefinedSymbol { .. }
    ));
}

// ==================== Operators ====================

#[test]
fn plus_is_textual_when_either_side_is() {
    assert!(check(r#""a" + 1;"#).is_ok());
    assert!(check(r#"1 + "a";"#).is_ok());
    assert!(check(r#"var s: string = "n = " + 1;"#).is_ok());
}

#[test]
fn plus_otherwise_requires_numbers() {
    assert!(check("1 + 2;").is_ok());
    assert!(matches!(
        check_err("1 + true;"),
        TypeError::Operand { .. }
    ));
    assert!(matches!(
        check_err("true + false;"),
        TypeError::Operand { .. }
    ));
}

#[test]
fn arithmetic_requires_one_shared_non_textual_type() {
    assert!(check("3 - 1;").is_ok());
    assert!(matches!(
        check_err(r#"1 - "a";"#),
        TypeError::Operand { .. }
    ));
    assert!(matches!(
        check_err(r#""a" - "b";"#),
        TypeError::Operand { .. }
    ));
}

#[test]
fn comparisons_yield_bool() {
    assert!(check("var b: bool = 1 < 2;").is_ok());
    assert!(matches!(
        check_err(r#"1 < "a";"#),
        TypeError::Operand { .. }
    ));
}

#[test]
fn equality_requires_matching_types_and_yields_bool() {
    assert!(check("var b: bool = 1 == 2;").is_ok());
    assert!(check(r#"var b: bool = "a" == "b";"#).is_ok());
    assert!(matches!(
        check_err(r#"1 == "a";"#),
        TypeError::Operand { .. }
    ));
}

#[test]
fn unary_minus_requires_a_number() {
    assert!(check("-1;").is_ok());
    assert!(matches!(
        check_err("-true;"),
        TypeError::UnaryOperand { .. }
    ));
}

#[test]
fn bang_accepts_anything_and_yields_bool() {
    assert!(check("var b: bool = !1;").is_ok());
    assert!(check(r#"var b: bool = !"s";"#).is_ok());
}

#[test]
fn logicals_require_matching_operands() {
    assert!(check("1 or 2;").is_ok());
    assert!(check("var x: float = 1 and 2;").is_ok());
    assert!(matches!(
        check_err(r#"1 or "a";"#),
        TypeError::Operand { .. }
    ));
}

#[test]
fn ternary_branches_must_agree() {
    assert!(check("var x: float = true ? 1 : 2;").is_ok());
    assert!(matches!(
        check_err(r#"true ? 1 : "a";"#),
        TypeError::Branch { .. }
    ));
}

#[test]
fn comma_takes_the_right_operand_type() {
    assert!(check(r#"var x: float = ("a", 1);"#).is_ok());
}

// ==================== Scoping ====================

#[test]
fn block_declarations_leak_into_the_enclosing_sequence() {
    assert!(check("{ var x: float = 1; } x + 1;").is_ok());
}

#[test]
fn shadowing_changes_the_recorded_type() {
    assert!(check(
        r#"var x: float = 1; var x: string = "s"; var y: string = x;"#
    )
    .is_ok());
}

#[test]
fn branch_declarations_do_not_leak() {
    assert!(matches!(
        check_err("if (true) var z: float = 1; z + 1;"),
        TypeError::UndefinedSymbol { .. }
    ));
}

// ==================== Functions ====================

#[test]
fn call_yields_the_declared_return_type() {
    assert!(check(
        "fun add(a: float, b: float): float { a + b; } \
         var y: float = add(1, 2);"
    )
    .is_ok());
}

#[test]
fn call_arguments_are_checked_positionally() {
    let err = check_err(
        "fun add(a: float, b: float): float { a + b; } \
         add(1, \"two\");",
    );
    match err {
        TypeError::Argument {
            index, ..
        } => assert_eq!(index, 2),
        other => panic!("expected argument mismatch, got {:?}", other),
    }
}

#[test]
fn call_arity_is_checked() {
    assert!(matches!(
        check_err("fun f(a: float): float { a; } f();"),
        TypeError::Arity { .. }
    ));
}

#[test]
fn calling_a_non_function_is_rejected() {
    assert!(matches!(
        check_err("var x: float = 1; x(2);"),
        TypeError::NotCallable { .. }
    ));
}

#[test]
fn function_bodies_are_checked_without_being_called() {
    assert!(matches!(
        check_err("fun bad(): float { 1 + true; }"),
        TypeError::Operand { .. }
    ));
}

#[test]
fn parameters_are_typed_inside_the_body() {
    assert!(matches!(
        check_err(r#"fun f(a: float): float { a + "s"; }"#),
        TypeError::Operand { .. }
    ));
}

#[test]
fn recursion_typechecks_through_the_name_binding() {
    assert!(check(
        "fun fib(n: float): float { n < 2 ? n : fib(n - 1) + fib(n - 2); } \
         fib(10);"
    )
    .is_ok());
}

// ==================== Round trip with the interpreter ====================

/// Programs that must pass the checker and run without a runtime error.
const WELL_TYPED: &[&str] = &[
    "var x: float = 1; x = x + 1; print x;",
    r#"var s: string = "a" + 1; print s;"#,
    "var x: float = 1; { var x: float = 2; } print x;",
    "var i: float = 0; while (i < 3) i = i + 1; print i;",
    "var i: float = 0; var t: float = 0; for (i = 0; i < 4; i = i + 1) t = t + i; print t;",
    "fun add(a: float, b: float): float { a + b; } print add(2, 3);",
    "fun fib(n: float): float { n < 2 ? n : fib(n - 1) + fib(n - 2); } print fib(8);",
    "var b: bool = 1 < 2; print b and true;",
    "var x: float = true ? 1 : 2; print x;",
];

/// Programs that both passes must reject: a static error and, when run
/// unchecked, a runtime error on the same construct.
const ILL_TYPED: &[&str] = &[
    "1 + true;",
    r#""a" - "b";"#,
    "-true;",
    "var x: float = 1; x(2);",
    "fun f(a: float): float { a; } f(1, 2);",
    "print ghost;",
    "ghost = 1;",
];

#[test]
fn well_typed_corpus_passes_both_evaluators() {
    for source in WELL_TYPED {
        let statements = skiff::parse(source).expect("program should parse");
        skiff::check::check(&statements)
            .unwrap_or_else(|e| panic!("checker rejected {:?}: {}", source, e));
        let mut interpreter = Interpreter::new();
        interpreter
            .interpret(&statements)
            .unwrap_or_else(|e| panic!("interpreter rejected {:?}: {}", source, e));
    }
}

#[test]
fn ill_typed_corpus_fails_both_evaluators() {
    for source in ILL_TYPED {
        let statements = skiff::parse(source).expect("program should parse");
        assert!(
            skiff::check::check(&statements).is_err(),
            "checker accepted {:?}",
            source
        );
        let mut interpreter = Interpreter::new();
        assert!(
            interpreter.interpret(&statements).is_err(),
            "interpreter accepted {:?}",
            source
        );
    }
}

// ==================== REPL-style threading ====================

#[test]
fn check_with_threads_the_environment_across_runs() {
    use skiff::check::{TypeChecker, TypeEnv};

    let mut checker = TypeChecker::new();
    let first = skiff::parse("var x: float = 1;").unwrap();
    let (_, env) = checker.check_with(&first, TypeEnv::new()).unwrap();

    let second = skiff::parse("x + 1;").unwrap();
    assert!(checker.check_with(&second, env.clone()).is_ok());

    let third = skiff::parse(r#"x + "s";"#).unwrap();
    assert!(checker.check_with(&third, env).is_err());
}
