//! Unit tests for value parsing and kind coercion.

use rstest::rstest;

use super::{Coercer, OptionKind, Value};

#[rstest]
#[case("3000", Value::Integer(3000))]
#[case("-4", Value::Integer(-4))]
#[case("1.5", Value::Float(1.5))]
#[case("0x10", Value::Integer(16))]
#[case("1e3", Value::Float(1000.0))]
#[case("abc", Value::Text("abc".into()))]
#[case("", Value::Text(String::new()))]
#[case("inf", Value::Text("inf".into()))]
fn tokens_become_numbers_when_numeric(#[case] token: &str, #[case] expected: Value) {
    assert_eq!(Value::from_token(token), expected);
}

#[rstest]
#[case(Value::Bool(false), false)]
#[case(Value::Bool(true), true)]
#[case(Value::Integer(0), true)]
#[case(Value::Text(String::new()), true)]
#[case(Value::List(Vec::new()), true)]
fn only_false_is_falsy(#[case] value: Value, #[case] truthy: bool) {
    assert_eq!(value.is_truthy(), truthy);
}

#[rstest]
#[case(Some(Value::Bool(true)), OptionKind::Flag)]
#[case(Some(Value::Text("x".into())), OptionKind::Text)]
#[case(Some(Value::from(vec!["a"])), OptionKind::List)]
#[case(Some(Value::Integer(1)), OptionKind::Numeric)]
#[case(Some(Value::Float(1.5)), OptionKind::Numeric)]
#[case(None, OptionKind::Any)]
fn kind_is_inferred_from_default(#[case] default: Option<Value>, #[case] expected: OptionKind) {
    assert_eq!(OptionKind::infer(default.as_ref()), expected);
}

#[test]
fn list_kind_wraps_scalars() {
    let wrapped = OptionKind::List.normalise(Value::Text("a".into()));
    assert_eq!(wrapped, Value::from(vec!["a"]));
}

#[test]
fn text_kind_stringifies_numbers() {
    assert_eq!(
        OptionKind::Text.normalise(Value::Integer(8080)),
        Value::Text("8080".into())
    );
}

#[test]
fn numeric_coercion_truncates_floats_only() {
    assert_eq!(OptionKind::Numeric.coerce(Value::Float(3.7)), Value::Integer(3));
    assert_eq!(OptionKind::Numeric.coerce(Value::Bool(true)), Value::Bool(true));
}

#[test]
fn custom_coercer_runs_after_kind_coercion() {
    let double = Coercer::custom(|value| match value {
        Value::Integer(n) => Value::Integer(n * 2),
        other => other,
    });
    assert_eq!(
        double.apply(OptionKind::Numeric, Value::Float(2.9)),
        Value::Integer(4)
    );
}

#[test]
fn repeated_values_collect_into_a_list() {
    let mut value = Value::Text("a".into());
    value.push(Value::Text("b".into()));
    value.push(Value::Integer(3));
    assert_eq!(
        value,
        Value::List(vec!["a".into(), "b".into(), Value::Integer(3)])
    );
}

#[test]
fn defaults_serialise_as_json_literals() -> serde_json::Result<()> {
    assert_eq!(serde_json::to_string(&Value::from("def value"))?, "\"def value\"");
    assert_eq!(serde_json::to_string(&Value::Integer(3000))?, "3000");
    assert_eq!(serde_json::to_string(&Value::from(vec!["a", "b"]))?, "[\"a\",\"b\"]");
    Ok(())
}
