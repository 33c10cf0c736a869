#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::{buffer_sink, EvalError};
use pretty_assertions::assert_eq;

/// Append an operation with parameters under `parent`.
fn node(store: &Store, parent: Option<OpId>, opcode: Opcode, params: &[(&str, &str)]) -> OpId {
    let id = store.append(&opcode, parent).unwrap();
    for (key, value) in params {
        store.set_parameter(id, key, value).unwrap();
    }
    id
}

fn interpreter(store: &Store) -> Interpreter<'_> {
    InterpreterBuilder::new(store).mode(EvalMode::TestRun).build()
}

fn run(store: &Store) -> String {
    let mut interp = interpreter(store);
    interp.run().unwrap();
    interp.captured_output()
}

fn run_unwinding(store: &Store) -> String {
    let mut interp = InterpreterBuilder::new(store)
        .mode(EvalMode::TestRun)
        .return_mode(ReturnMode::Unwind)
        .build();
    interp.run().unwrap();
    interp.captured_output()
}

fn run_err(store: &Store) -> EvalError {
    interpreter(store).run().unwrap_err()
}

// Straight-line programs

#[test]
fn assign_then_print() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Assign, &[("var_name", "x"), ("value", "5")]);
    node(&store, None, Opcode::Print, &[("value", "$x")]);
    assert_eq!(run(&store), "5\n");
}

#[test]
fn empty_program_does_nothing() {
    let store = Store::in_memory().unwrap();
    let mut interp = interpreter(&store);
    assert_eq!(interp.run().unwrap(), None);
    assert_eq!(interp.captured_output(), "");
}

#[test]
fn root_operations_run_in_sequence_order() {
    let store = Store::in_memory().unwrap();
    let second = store.create_operation(&Opcode::Print, None, 2).unwrap();
    store.set_parameter(second, "value", "second").unwrap();
    let first = store.create_operation(&Opcode::Print, None, 1).unwrap();
    store.set_parameter(first, "value", "first").unwrap();
    assert_eq!(run(&store), "first\nsecond\n");
}

#[test]
fn quotes_in_literals_are_printed() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Print, &[("value", "\"hi\"")]);
    assert_eq!(run(&store), "\"hi\"\n");
}

#[test]
fn div_prints_as_float() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Div, &[("left", "4"), ("right", "2"), ("result", "q")]);
    node(&store, None, Opcode::Print, &[("value", "$q")]);
    let mut interp = interpreter(&store);
    interp.run().unwrap();
    assert_eq!(interp.global("q"), Some(&Value::Float(2.0)));
    assert_eq!(interp.captured_output(), "2.0\n");
}

#[test]
fn binary_result_is_optional() {
    let store = Store::in_memory().unwrap();
    let add = node(&store, None, Opcode::Add, &[("left", "2"), ("right", "3")]);
    let op = store.operation(add).unwrap().unwrap();
    let mut interp = interpreter(&store);
    assert_eq!(interp.execute(EnvId::ROOT, &op).unwrap(), Some(Value::Int(5)));
    assert_eq!(interp.environments().depth(), 1);
    assert_eq!(interp.global("result"), None);
}

#[test]
fn comparison_results_print_as_booleans() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Eq, &[("left", "2"), ("right", "2.0"), ("result", "same")]);
    node(&store, None, Opcode::Gt, &[("left", "1"), ("right", "2"), ("result", "bigger")]);
    node(&store, None, Opcode::Print, &[("value", "$same")]);
    node(&store, None, Opcode::Print, &[("value", "$bigger")]);
    assert_eq!(run(&store), "true\nfalse\n");
}

#[test]
fn return_at_root_stops_the_program() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Print, &[("value", "a")]);
    node(&store, None, Opcode::Return, &[("value", "7")]);
    node(&store, None, Opcode::Print, &[("value", "b")]);
    let mut interp = interpreter(&store);
    assert_eq!(interp.run().unwrap(), Some(Value::Int(7)));
    assert_eq!(interp.captured_output(), "a\n");
}

#[test]
fn unknown_and_reserved_opcodes_are_ignored() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Unknown("frobnicate".to_string()), &[("value", "1")]);
    node(&store, None, Opcode::Break, &[]);
    node(&store, None, Opcode::Continue, &[]);
    node(&store, None, Opcode::Print, &[("value", "ok")]);
    assert_eq!(run(&store), "ok\n");
}

#[test]
fn stray_else_at_root_is_skipped() {
    let store = Store::in_memory().unwrap();
    let otherwise = node(&store, None, Opcode::Else, &[]);
    node(&store, Some(otherwise), Opcode::Print, &[("value", "never")]);
    node(&store, None, Opcode::Print, &[("value", "ok")]);
    assert_eq!(run(&store), "ok\n");
}

// Conditionals

/// `if $cond { print then; return 1 } else { print else; return 0 }; print after`
fn if_else_program(condition: &str) -> Store {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Lt, &[("left", "1"), ("right", "2"), ("result", "yes")]);
    let branch = node(&store, None, Opcode::If, &[("condition", condition)]);
    node(&store, Some(branch), Opcode::Print, &[("value", "then")]);
    node(&store, Some(branch), Opcode::Return, &[("value", "1")]);
    let otherwise = node(&store, Some(branch), Opcode::Else, &[]);
    node(&store, Some(otherwise), Opcode::Print, &[("value", "else")]);
    node(&store, Some(otherwise), Opcode::Return, &[("value", "0")]);
    node(&store, None, Opcode::Print, &[("value", "after")]);
    store
}

#[test]
fn if_return_does_not_stop_the_enclosing_block() {
    let store = if_else_program("$yes");
    assert_eq!(run(&store), "then\nafter\n");
}

#[test]
fn false_condition_takes_else() {
    let store = if_else_program("false");
    assert_eq!(run(&store), "else\nafter\n");
}

#[test]
fn if_without_else_is_skipped_when_false() {
    let store = Store::in_memory().unwrap();
    let branch = node(&store, None, Opcode::If, &[("condition", "0")]);
    node(&store, Some(branch), Opcode::Print, &[("value", "then")]);
    node(&store, None, Opcode::Print, &[("value", "after")]);
    assert_eq!(run(&store), "after\n");
}

#[test]
fn first_else_wins() {
    let store = Store::in_memory().unwrap();
    let branch = node(&store, None, Opcode::If, &[("condition", "")]);
    let first = node(&store, Some(branch), Opcode::Else, &[]);
    node(&store, Some(first), Opcode::Print, &[("value", "first")]);
    let second = node(&store, Some(branch), Opcode::Else, &[]);
    node(&store, Some(second), Opcode::Print, &[("value", "second")]);
    assert_eq!(run(&store), "first\n");
}

#[test]
fn branch_bindings_are_local() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Assign, &[("var_name", "x"), ("value", "1")]);
    let branch = node(&store, None, Opcode::If, &[("condition", "true")]);
    node(&store, Some(branch), Opcode::Assign, &[("var_name", "x"), ("value", "2")]);
    node(&store, Some(branch), Opcode::Assign, &[("var_name", "y"), ("value", "3")]);
    node(&store, Some(branch), Opcode::Print, &[("value", "$x")]);
    node(&store, None, Opcode::Print, &[("value", "$x")]);

    let mut interp = interpreter(&store);
    interp.run().unwrap();
    assert_eq!(interp.captured_output(), "2\n1\n");
    assert_eq!(interp.global("x"), Some(&Value::Int(1)));
    assert_eq!(interp.global("y"), None);
    assert_eq!(interp.environments().depth(), 1);
}

// Loops

#[test]
fn while_with_false_condition_never_runs() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Assign, &[("var_name", "go"), ("value", "false")]);
    let body = node(&store, None, Opcode::While, &[("condition", "$go")]);
    node(&store, Some(body), Opcode::Print, &[("value", "tick")]);
    node(&store, None, Opcode::Print, &[("value", "done")]);
    assert_eq!(run(&store), "done\n");
}

#[test]
fn while_condition_ignores_body_bindings() {
    // The body rebinds `go`, but only in its own iteration scope; the loop
    // is ended by an unwinding return.
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Assign, &[("var_name", "go"), ("value", "true")]);
    let body = node(&store, None, Opcode::While, &[("condition", "$go")]);
    node(&store, Some(body), Opcode::Assign, &[("var_name", "go"), ("value", "false")]);
    node(&store, Some(body), Opcode::Print, &[("value", "$go")]);
    node(&store, Some(body), Opcode::Return, &[]);
    node(&store, None, Opcode::Print, &[("value", "unreachable")]);

    let mut interp = InterpreterBuilder::new(&store)
        .mode(EvalMode::TestRun)
        .return_mode(ReturnMode::Unwind)
        .build();
    assert_eq!(interp.run().unwrap(), None);
    assert_eq!(interp.captured_output(), "false\n");
    assert_eq!(interp.global("go"), Some(&Value::Bool(true)));
}

#[test]
fn for_visits_each_character() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Assign, &[("var_name", "word"), ("value", "abc")]);
    let body = node(&store, None, Opcode::For, &[("collection", "$word"), ("iterator", "ch")]);
    node(&store, Some(body), Opcode::Print, &[("value", "$ch")]);

    let mut interp = interpreter(&store);
    interp.run().unwrap();
    assert_eq!(interp.captured_output(), "a\nb\nc\n");
    assert_eq!(interp.global("ch"), None);
}

#[test]
fn for_iterations_do_not_share_bindings() {
    let store = Store::in_memory().unwrap();
    let body = node(&store, None, Opcode::For, &[("collection", "xy"), ("iterator", "ch")]);
    let seen = node(&store, Some(body), Opcode::If, &[("condition", "$ch")]);
    node(&store, Some(seen), Opcode::Print, &[("value", "$ch")]);
    node(&store, Some(body), Opcode::Assign, &[("var_name", "last"), ("value", "$ch")]);
    node(&store, None, Opcode::Print, &[("value", "$last")]);

    assert!(matches!(
        run_err(&store),
        EvalError::UnboundVariable { name } if name == "last"
    ));
}

#[test]
fn for_over_a_number_is_an_error() {
    let store = Store::in_memory().unwrap();
    let body = node(&store, None, Opcode::For, &[("collection", "12"), ("iterator", "d")]);
    node(&store, Some(body), Opcode::Print, &[("value", "$d")]);
    assert!(matches!(run_err(&store), EvalError::NotIterable { type_name: "int" }));
}

#[test]
fn shallow_return_only_ends_the_iteration() {
    let store = Store::in_memory().unwrap();
    let body = node(&store, None, Opcode::For, &[("collection", "ab"), ("iterator", "ch")]);
    node(&store, Some(body), Opcode::Print, &[("value", "$ch")]);
    node(&store, Some(body), Opcode::Return, &[]);
    node(&store, Some(body), Opcode::Print, &[("value", "skipped")]);
    node(&store, None, Opcode::Print, &[("value", "done")]);
    assert_eq!(run(&store), "a\nb\ndone\n");
}

#[test]
fn unwinding_return_ends_the_loop() {
    let store = Store::in_memory().unwrap();
    let body = node(&store, None, Opcode::For, &[("collection", "ab"), ("iterator", "ch")]);
    node(&store, Some(body), Opcode::Print, &[("value", "$ch")]);
    node(&store, Some(body), Opcode::Return, &[]);
    node(&store, None, Opcode::Print, &[("value", "done")]);
    assert_eq!(run_unwinding(&store), "a\n");
}

// Functions

#[test]
fn call_binds_result_in_caller_scope() {
    let store = Store::in_memory().unwrap();
    let def = node(&store, None, Opcode::Function, &[("name", "twice"), ("params", "x")]);
    node(&store, Some(def), Opcode::Mul, &[("left", "$x"), ("right", "2"), ("result", "y")]);
    node(&store, Some(def), Opcode::Return, &[("value", "$y")]);
    node(&store, None, Opcode::Call, &[("name", "twice"), ("args", "21"), ("result", "r")]);
    node(&store, None, Opcode::Print, &[("value", "$r")]);

    let mut interp = interpreter(&store);
    interp.run().unwrap();
    assert_eq!(interp.captured_output(), "42\n");
    assert_eq!(interp.global("y"), None);
    assert!(matches!(interp.global("twice"), Some(Value::Function(f)) if f.body == def));
}

#[test]
fn function_body_is_not_run_at_definition() {
    let store = Store::in_memory().unwrap();
    let def = node(&store, None, Opcode::Function, &[("name", "f")]);
    node(&store, Some(def), Opcode::Print, &[("value", "inside")]);
    assert_eq!(run(&store), "");
}

#[test]
fn call_without_return_leaves_result_unbound() {
    let store = Store::in_memory().unwrap();
    let def = node(&store, None, Opcode::Function, &[("name", "hello")]);
    node(&store, Some(def), Opcode::Print, &[("value", "hi")]);
    node(&store, None, Opcode::Call, &[("name", "hello"), ("result", "r")]);

    let mut interp = interpreter(&store);
    interp.run().unwrap();
    assert_eq!(interp.captured_output(), "hi\n");
    assert_eq!(interp.global("r"), None);
}

#[test]
fn extra_args_are_ignored() {
    let store = Store::in_memory().unwrap();
    let def = node(&store, None, Opcode::Function, &[("name", "show"), ("params", "a, b")]);
    node(&store, Some(def), Opcode::Print, &[("value", "$a")]);
    node(&store, Some(def), Opcode::Print, &[("value", "$b")]);
    node(&store, None, Opcode::Call, &[("name", "show"), ("args", "1, 2, 3")]);
    assert_eq!(run(&store), "1\n2\n");
}

#[test]
fn missing_args_leave_params_unbound() {
    let store = Store::in_memory().unwrap();
    let def = node(&store, None, Opcode::Function, &[("name", "show"), ("params", "a,b")]);
    node(&store, Some(def), Opcode::Print, &[("value", "$a")]);
    node(&store, Some(def), Opcode::Print, &[("value", "$b")]);
    node(&store, None, Opcode::Call, &[("name", "show"), ("args", "1")]);

    let mut interp = interpreter(&store);
    let err = interp.run().unwrap_err();
    assert!(matches!(err, EvalError::UnboundVariable { name } if name == "b"));
    assert_eq!(interp.captured_output(), "1\n");
}

#[test]
fn empty_arg_keeps_its_position() {
    let store = Store::in_memory().unwrap();
    let def = node(&store, None, Opcode::Function, &[("name", "f"), ("params", "a,b,c")]);
    node(&store, Some(def), Opcode::Print, &[("value", "$c")]);
    node(&store, Some(def), Opcode::Print, &[("value", "$b")]);
    node(&store, None, Opcode::Call, &[("name", "f"), ("args", "1,,3")]);

    assert_eq!(run(&store), "3\n\n");
}

#[test]
fn calls_see_the_callers_scope() {
    let store = Store::in_memory().unwrap();
    let show = node(&store, None, Opcode::Function, &[("name", "show")]);
    node(&store, Some(show), Opcode::Print, &[("value", "$secret")]);
    let outer = node(&store, None, Opcode::Function, &[("name", "outer")]);
    node(&store, Some(outer), Opcode::Assign, &[("var_name", "secret"), ("value", "s")]);
    node(&store, Some(outer), Opcode::Call, &[("name", "show")]);
    node(&store, None, Opcode::Call, &[("name", "outer")]);

    let mut interp = interpreter(&store);
    interp.run().unwrap();
    assert_eq!(interp.captured_output(), "s\n");
    assert_eq!(interp.global("secret"), None);
}

#[test]
fn forward_call_fails_before_definition() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Call, &[("name", "later")]);
    node(&store, None, Opcode::Function, &[("name", "later")]);
    assert!(matches!(
        run_err(&store),
        EvalError::UnboundVariable { name } if name == "later"
    ));
}

#[test]
fn calling_a_non_function() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Assign, &[("var_name", "f"), ("value", "3")]);
    node(&store, None, Opcode::Call, &[("name", "f")]);
    assert!(matches!(
        run_err(&store),
        EvalError::NotAFunction { name, type_name: "int" } if name == "f"
    ));
}

/// `fact(n, acc)`: prints the product at the base case instead of returning.
#[test]
fn recursive_factorial_with_accumulator() {
    let store = Store::in_memory().unwrap();
    let fact = node(&store, None, Opcode::Function, &[("name", "fact"), ("params", "n, acc")]);
    node(&store, Some(fact), Opcode::Lt, &[("left", "$n"), ("right", "2"), ("result", "small")]);
    let base = node(&store, Some(fact), Opcode::If, &[("condition", "$small")]);
    node(&store, Some(base), Opcode::Print, &[("value", "$acc")]);
    let step = node(&store, Some(base), Opcode::Else, &[]);
    node(&store, Some(step), Opcode::Sub, &[("left", "$n"), ("right", "1"), ("result", "m")]);
    node(&store, Some(step), Opcode::Mul, &[("left", "$acc"), ("right", "$n"), ("result", "a")]);
    node(&store, Some(step), Opcode::Call, &[("name", "fact"), ("args", "$m, $a")]);
    node(&store, None, Opcode::Call, &[("name", "fact"), ("args", "5, 1")]);

    assert_eq!(run(&store), "120\n");
}

/// `fact(n)`: `if n < 2 { return 1 }; return n * fact(n - 1)`.
fn returning_factorial() -> Store {
    let store = Store::in_memory().unwrap();
    let fact = node(&store, None, Opcode::Function, &[("name", "fact"), ("params", "n")]);
    node(&store, Some(fact), Opcode::Lt, &[("left", "$n"), ("right", "2"), ("result", "small")]);
    let base = node(&store, Some(fact), Opcode::If, &[("condition", "$small")]);
    node(&store, Some(base), Opcode::Return, &[("value", "1")]);
    node(&store, Some(fact), Opcode::Sub, &[("left", "$n"), ("right", "1"), ("result", "m")]);
    node(&store, Some(fact), Opcode::Call, &[("name", "fact"), ("args", "$m"), ("result", "r")]);
    node(&store, Some(fact), Opcode::Mul, &[("left", "$n"), ("right", "$r"), ("result", "out")]);
    node(&store, Some(fact), Opcode::Return, &[("value", "$out")]);
    node(&store, None, Opcode::Call, &[("name", "fact"), ("args", "5"), ("result", "answer")]);
    node(&store, None, Opcode::Print, &[("value", "$answer")]);
    store
}

#[test]
fn unwinding_factorial_returns_120() {
    let store = returning_factorial();
    assert_eq!(run_unwinding(&store), "120\n");
}

#[test]
fn shallow_factorial_never_reaches_its_base_case() {
    // The nested `return 1` ends only the `if` body, so the recursion runs
    // past zero until the call-depth bound stops it.
    let store = returning_factorial();
    assert!(matches!(
        run_err(&store),
        EvalError::RecursionLimitExceeded { limit: 500 }
    ));
}

#[test]
fn recursion_limit_is_configurable() {
    let store = Store::in_memory().unwrap();
    let def = node(&store, None, Opcode::Function, &[("name", "forever")]);
    node(&store, Some(def), Opcode::Call, &[("name", "forever")]);
    node(&store, None, Opcode::Call, &[("name", "forever")]);

    let mut interp = InterpreterBuilder::new(&store)
        .mode(EvalMode::TestRun)
        .max_call_depth(10)
        .build();
    assert!(matches!(
        interp.run(),
        Err(EvalError::RecursionLimitExceeded { limit: 10 })
    ));
    assert_eq!(interp.environments().depth(), 1);
}

// Failures

#[test]
fn missing_parameter_names_the_operation() {
    let store = Store::in_memory().unwrap();
    let print = node(&store, None, Opcode::Print, &[]);
    assert!(matches!(
        run_err(&store),
        EvalError::MissingParameter { op, opcode: Opcode::Print, key: "value" } if op == print
    ));
}

#[test]
fn unbound_reference_aborts_the_run() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Print, &[("value", "before")]);
    node(&store, None, Opcode::Print, &[("value", "$nope")]);
    node(&store, None, Opcode::Print, &[("value", "after")]);

    let mut interp = interpreter(&store);
    assert!(interp.run().is_err());
    assert_eq!(interp.captured_output(), "before\n");
}

#[test]
fn string_arithmetic_is_rejected() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Add, &[("left", "a"), ("right", "1")]);
    assert!(matches!(run_err(&store), EvalError::TypeMismatch { operation: "add", .. }));
}

// Configuration

#[test]
fn explicit_output_sink_is_shared() {
    let store = Store::in_memory().unwrap();
    node(&store, None, Opcode::Print, &[("value", "shared")]);
    let sink = buffer_sink();
    let mut interp = InterpreterBuilder::new(&store).output(sink.clone()).build();
    interp.run().unwrap();
    assert_eq!(sink.captured(), "shared\n");
    assert_eq!(interp.mode(), EvalMode::Interpret);
    assert_eq!(interp.return_mode(), ReturnMode::Shallow);
}

#[test]
fn scope_guard_releases_on_drop() {
    let store = Store::in_memory().unwrap();
    let mut interp = interpreter(&store);
    {
        let mut scoped = interp.scoped(EnvId::ROOT);
        let env = scoped.env();
        scoped.envs.bind(env, "temp", Value::Int(1));
        assert_eq!(scoped.environments().depth(), 2);
    }
    assert_eq!(interp.environments().depth(), 1);
    assert_eq!(interp.global("temp"), None);
}
