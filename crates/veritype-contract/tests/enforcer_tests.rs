use super::*;
use veritype_solver::{ObjectValue, Value};

#[test]
fn test_check_args_passes_and_fails() {
    let interner = TypeInterner::new();
    let contract = Contract::new()
        .param("count", TypeId::INT)
        .param("label", TypeId::STR);
    let enforcer = Enforcer::new(VerifyConfig::default());

    let count = Value::Int(3);
    let label = Value::from("widget");
    assert!(
        enforcer
            .check_args(&interner, &contract, &[("count", &count), ("label", &label)])
            .is_ok()
    );

    let bad = Value::from("three");
    let err = enforcer
        .check_args(&interner, &contract, &[("count", &bad), ("label", &label)])
        .unwrap_err();
    assert_eq!(
        err,
        ContractViolation::Parameter {
            name: "count".to_string(),
            expected: "int".to_string(),
            actual: "str".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "incorrect type for count: expected int, got str"
    );
}

#[test]
fn test_unconstrained_args_pass_unexamined() {
    let interner = TypeInterner::new();
    let contract = Contract::new().param("count", TypeId::INT);
    let enforcer = Enforcer::new(VerifyConfig::default());

    let count = Value::Int(3);
    let extra = Value::Nil;
    assert!(
        enforcer
            .check_args(&interner, &contract, &[("count", &count), ("extra", &extra)])
            .is_ok()
    );
}

#[test]
fn test_check_return() {
    let interner = TypeInterner::new();
    let contract = Contract::new().returns(TypeId::BOOL);
    let enforcer = Enforcer::new(VerifyConfig::default());

    assert!(
        enforcer
            .check_return(&interner, &contract, &Value::Bool(true))
            .is_ok()
    );
    let err = enforcer
        .check_return(&interner, &contract, &Value::Int(1))
        .unwrap_err();
    assert_eq!(
        err,
        ContractViolation::Return {
            expected: "bool".to_string(),
            actual: "int".to_string(),
        }
    );

    // No return descriptor means any result is acceptable.
    let unconstrained = Contract::new().param("x", TypeId::INT);
    assert!(
        enforcer
            .check_return(&interner, &unconstrained, &Value::Nil)
            .is_ok()
    );
}

#[test]
fn test_composite_descriptors_in_contracts() {
    let interner = TypeInterner::new();
    let int_or_str = interner.union(&[TypeId::INT, TypeId::STR]).unwrap();
    let named = interner.has_attrs(&[("name", TypeId::STR)]).unwrap();
    let contract = Contract::new().param("key", int_or_str).param("owner", named);
    let enforcer = Enforcer::new(VerifyConfig::default());

    let person = interner.class("Person", None);
    let key = Value::from("k1");
    let owner = Value::Object(ObjectValue::new(person).attr("name", Value::from("alice")));
    assert!(
        enforcer
            .check_args(&interner, &contract, &[("key", &key), ("owner", &owner)])
            .is_ok()
    );

    let nameless = Value::Object(ObjectValue::new(person));
    let err = enforcer
        .check_args(&interner, &contract, &[("key", &key), ("owner", &nameless)])
        .unwrap_err();
    let ContractViolation::Parameter { name, expected, actual } = err else {
        panic!("expected a parameter violation");
    };
    assert_eq!(name, "owner");
    assert_eq!(expected, "HasAttrs[name: str]");
    assert_eq!(actual, "Person");
}

#[test]
fn test_disabled_enforcer_skips_checks() {
    let interner = TypeInterner::new();
    let contract = Contract::new().param("count", TypeId::INT).returns(TypeId::BOOL);
    let enforcer = Enforcer::new(VerifyConfig { enabled: false });

    let bad = Value::from("three");
    assert!(
        enforcer
            .check_args(&interner, &contract, &[("count", &bad)])
            .is_ok()
    );
    assert!(
        enforcer
            .check_return(&interner, &contract, &Value::Int(1))
            .is_ok()
    );
    let result = enforcer
        .call(&interner, &contract, &[("count", &bad)], || Value::Nil)
        .unwrap();
    assert_eq!(result, Value::Nil);
}

#[test]
fn test_call_checks_both_sides() {
    let interner = TypeInterner::new();
    let contract = Contract::new().param("n", TypeId::INT).returns(TypeId::INT);
    let enforcer = Enforcer::new(VerifyConfig::default());

    let n = Value::Int(20);
    let result = enforcer
        .call(&interner, &contract, &[("n", &n)], || Value::Int(21))
        .unwrap();
    assert_eq!(result, Value::Int(21));

    // A bad argument fails before the function runs.
    let bad = Value::from("x");
    let mut ran = false;
    let err = enforcer.call(&interner, &contract, &[("n", &bad)], || {
        ran = true;
        Value::Int(0)
    });
    assert!(err.is_err());
    assert!(!ran);

    // A bad result fails after.
    let err = enforcer
        .call(&interner, &contract, &[("n", &n)], || Value::from("oops"))
        .unwrap_err();
    assert!(matches!(err, ContractViolation::Return { .. }));
}

#[test]
fn test_repeated_param_replaces_descriptor() {
    let interner = TypeInterner::new();
    let contract = Contract::new()
        .param("x", TypeId::INT)
        .param("x", TypeId::STR);
    let enforcer = Enforcer::new(VerifyConfig::default());

    let s = Value::from("a");
    assert!(
        enforcer
            .check_args(&interner, &contract, &[("x", &s)])
            .is_ok()
    );
    let i = Value::Int(1);
    assert!(
        enforcer
            .check_args(&interner, &contract, &[("x", &i)])
            .is_err()
    );
}
