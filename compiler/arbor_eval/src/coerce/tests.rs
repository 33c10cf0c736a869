#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::EvalError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn root() -> Environments {
    Environments::new()
}

#[test]
fn integers() {
    let envs = root();
    assert_eq!(coerce(&envs, EnvId::ROOT, "5").unwrap(), Value::Int(5));
    assert_eq!(coerce(&envs, EnvId::ROOT, "-12").unwrap(), Value::Int(-12));
}

#[test]
fn floats() {
    let envs = root();
    assert_eq!(coerce(&envs, EnvId::ROOT, "2.5").unwrap(), Value::Float(2.5));
    assert_eq!(coerce(&envs, EnvId::ROOT, "1e3").unwrap(), Value::Float(1000.0));
}

#[test]
fn integer_wins_over_float() {
    let envs = root();
    assert_eq!(coerce(&envs, EnvId::ROOT, "10").unwrap(), Value::Int(10));
}

#[test]
fn booleans_are_exact() {
    let envs = root();
    assert_eq!(coerce(&envs, EnvId::ROOT, "true").unwrap(), Value::Bool(true));
    assert_eq!(coerce(&envs, EnvId::ROOT, "false").unwrap(), Value::Bool(false));
    assert_eq!(coerce(&envs, EnvId::ROOT, "True").unwrap(), Value::str("True"));
}

#[test]
fn strings_keep_their_quotes() {
    let envs = root();
    assert_eq!(
        coerce(&envs, EnvId::ROOT, "\"hello world\"").unwrap(),
        Value::str("\"hello world\"")
    );
}

#[test]
fn variable_reference_resolves_through_chain() {
    let mut envs = root();
    envs.bind(EnvId::ROOT, "n", Value::Int(5));
    let child = envs.child(EnvId::ROOT);
    assert_eq!(coerce(&envs, child, "$n").unwrap(), Value::Int(5));
}

#[test]
fn numeric_text_ignores_same_named_variable() {
    let mut envs = root();
    envs.bind(EnvId::ROOT, "123", Value::str("shadow"));
    assert_eq!(coerce(&envs, EnvId::ROOT, "123").unwrap(), Value::Int(123));
    assert_eq!(coerce(&envs, EnvId::ROOT, "$123").unwrap(), Value::str("shadow"));
}

#[test]
fn unbound_reference_fails() {
    let envs = root();
    let err = coerce(&envs, EnvId::ROOT, "$missing").unwrap_err();
    assert!(matches!(err, EvalError::UnboundVariable { name } if name == "missing"));
}

#[test]
fn list_splitting() {
    let entries: Vec<_> = split_list(" a, b ,,c ").collect();
    assert_eq!(entries, vec!["a", "b", "", "c"]);
    assert_eq!(split_list("").collect::<Vec<_>>(), vec![""]);
}

proptest! {
    #[test]
    fn plain_text_is_returned_unchanged(raw in "[^$][ -~]{0,20}") {
        prop_assume!(raw.parse::<i64>().is_err());
        prop_assume!(raw.parse::<f64>().is_err());
        prop_assume!(raw != "true" && raw != "false");

        let envs = root();
        prop_assert_eq!(coerce(&envs, EnvId::ROOT, &raw).unwrap(), Value::Str(raw.clone()));
    }

    #[test]
    fn reference_equals_lookup(name in "[a-z_][a-z0-9_]{0,10}", n in any::<i64>()) {
        let mut envs = root();
        envs.bind(EnvId::ROOT, name.clone(), Value::Int(n));
        let child = envs.child(EnvId::ROOT);

        let reference = format!("${name}");
        prop_assert_eq!(
            coerce(&envs, child, &reference).ok(),
            envs.lookup(child, &name).cloned()
        );
    }

    #[test]
    fn reference_to_unbound_name_fails(name in "[a-z_][a-z0-9_]{0,10}") {
        let envs = root();
        let reference = format!("${name}");
        let is_unbound = matches!(
            coerce(&envs, EnvId::ROOT, &reference),
            Err(EvalError::UnboundVariable { .. })
        );
        prop_assert!(is_unbound);
    }
}
