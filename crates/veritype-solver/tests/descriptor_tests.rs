use super::*;

#[test]
fn test_facade_parameterize_once() {
    let interner = TypeInterner::new();

    let union = Union::new();
    union
        .parameterize(&interner, &[TypeId::INT, TypeId::STR])
        .unwrap();
    let err = union
        .parameterize(&interner, &[TypeId::FLOAT])
        .unwrap_err();
    assert_eq!(err, TypeError::AlreadyParameterized { kind: "union" });

    let eq = Comparison::eq();
    eq.parameterize(&interner, 10i64).unwrap();
    let err = eq.parameterize(&interner, 11i64).unwrap_err();
    assert!(err.is_construction());

    let tuple = Tuple::of(&interner, &[TupleItem::Ty(TypeId::INT)]).unwrap();
    let err = tuple
        .parameterize(&interner, &[TupleItem::Ty(TypeId::STR)])
        .unwrap_err();
    assert_eq!(err, TypeError::AlreadyParameterized { kind: "tuple" });
}

#[test]
fn test_blank_facade_queries_are_usage_errors() {
    let interner = TypeInterner::new();

    let blank = Union::new();
    let err = blank.membership(&interner, &Value::Int(1)).unwrap_err();
    assert!(err.is_usage());
    let err = blank.is_subtype_of(&interner, &TypeId::INT).unwrap_err();
    assert!(err.is_usage());
    assert!(blank.type_id().is_err());

    // A blank *other* operand is just as much a usage error.
    let parameterized = Callable::of(&interner, &[TypeId::INT, TypeId::BOOL]).unwrap();
    let err = parameterized
        .is_subtype_of(&interner, &Callable::new())
        .unwrap_err();
    assert_eq!(err, TypeError::Unparameterized { kind: "callable" });
}

#[test]
fn test_union_facade_unwraps_single_member() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);
    let dog = interner.class("Dog", Some(animal));

    let union = Union::of(&interner, &[dog, animal]).unwrap();
    assert_eq!(union.type_id().unwrap(), animal);

    let single = Union::of(&interner, &[TypeId::INT]).unwrap();
    assert_eq!(single.type_id().unwrap(), TypeId::INT);
}

#[test]
fn test_structural_equality_through_type_id() {
    let interner = TypeInterner::new();

    let a = Union::of(&interner, &[TypeId::INT, TypeId::STR]).unwrap();
    let b = Union::of(&interner, &[TypeId::STR, TypeId::INT]).unwrap();
    assert_eq!(a.type_id().unwrap(), b.type_id().unwrap());
}

#[test]
fn test_misplaced_open_marker_fails() {
    let interner = TypeInterner::new();

    let err = Tuple::of(
        &interner,
        &[
            TupleItem::Ty(TypeId::INT),
            TupleItem::Etc,
            TupleItem::Ty(TypeId::STR),
        ],
    )
    .unwrap_err();
    assert_eq!(err, TypeError::MisplacedEtc { kind: "tuple" });

    let err = Record::of(
        &interner,
        &[RecordItem::Etc, RecordItem::Field("x", TypeId::INT)],
    )
    .unwrap_err();
    assert_eq!(err, TypeError::MisplacedEtc { kind: "record" });
}

#[test]
fn test_trailing_open_marker_builds_open_shapes() {
    let interner = TypeInterner::new();

    let open = Tuple::of(
        &interner,
        &[TupleItem::Ty(TypeId::INT), TupleItem::Etc],
    )
    .unwrap();
    let triple = Value::seq([Value::Int(1), Value::from("a"), Value::Int(2)]);
    assert!(open.membership(&interner, &triple).unwrap());

    let open = Record::of(
        &interner,
        &[RecordItem::Field("x", TypeId::INT), RecordItem::Etc],
    )
    .unwrap();
    let extra = Value::map([("x", Value::Int(1)), ("z", Value::Int(9))]);
    assert!(open.membership(&interner, &extra).unwrap());
}

#[test]
fn test_empty_parameterizations_fail() {
    let interner = TypeInterner::new();

    assert!(Union::of(&interner, &[]).is_err());
    assert!(Intersection::of(&interner, &[]).is_err());
    assert!(Tuple::of(&interner, &[]).is_err());
    assert!(Record::of(&interner, &[]).is_err());
    assert!(HasAttrs::of(&interner, &[]).is_err());
    assert!(Callable::of(&interner, &[]).is_err());
}

#[test]
fn test_comparison_facade_membership_and_subtype() {
    let interner = TypeInterner::new();

    let ge = Comparison::ge();
    ge.parameterize(&interner, 10i64).unwrap();
    assert!(ge.membership(&interner, &Value::Int(10)).unwrap());
    assert!(ge.membership(&interner, &Value::Int(11)).unwrap());
    assert!(!ge.membership(&interner, &Value::Int(9)).unwrap());

    // Comparison descriptors refuse the lattice: false, not an error.
    let other = Comparison::ge();
    other.parameterize(&interner, 10i64).unwrap();
    assert_eq!(ge.is_subtype_of(&interner, &other), Ok(false));
    assert_eq!(ge.is_subtype_of(&interner, &TypeId::INT), Ok(false));
}

#[test]
fn test_satisfies_contract_validation() {
    let interner = TypeInterner::new();

    // Accepts one `any`, returns bool: fine.
    let good = Predicate::new(
        Signature::new(vec![ParamInfo::typed(TypeId::ANY)], Some(TypeId::BOOL)),
        |v| v.as_scalar().is_some(),
    );
    assert!(Satisfies::of(&interner, good).is_ok());

    // An undeclared parameter annotation is compatible with anything.
    let untyped = Predicate::new(
        Signature::new(vec![ParamInfo::untyped()], Some(TypeId::BOOL)),
        |_| true,
    );
    assert!(Satisfies::of(&interner, untyped).is_ok());

    // Demands an int, but will be handed arbitrary values: rejected.
    let narrow = Predicate::new(
        Signature::new(vec![ParamInfo::typed(TypeId::INT)], Some(TypeId::BOOL)),
        |_| true,
    );
    assert_eq!(
        Satisfies::of(&interner, narrow).unwrap_err(),
        TypeError::PredicateContract
    );

    // Takes no argument at all: rejected.
    let nullary = Predicate::new(Signature::new(vec![], Some(TypeId::BOOL)), |_| true);
    assert!(Satisfies::of(&interner, nullary).is_err());

    // Returns something that is not bool: rejected.
    let wrong_ret = Predicate::new(
        Signature::new(vec![ParamInfo::typed(TypeId::ANY)], Some(TypeId::INT)),
        |_| true,
    );
    assert!(Satisfies::of(&interner, wrong_ret).is_err());
}

#[test]
fn test_atomic_types_are_descriptors() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);
    let dog = interner.class("Dog", Some(animal));

    assert!(dog.membership(&interner, &Value::Object(ObjectValue::new(dog))).unwrap());
    assert!(dog.is_subtype_of(&interner, &animal).unwrap());
    assert!(!animal.is_subtype_of(&interner, &dog).unwrap());
}

#[test]
fn test_error_display() {
    let err = TypeError::AlreadyParameterized { kind: "union" };
    assert_eq!(err.to_string(), "cannot re-parameterize an existing union");
    let err = TypeError::Unparameterized { kind: "callable" };
    assert_eq!(err.to_string(), "cannot use an unparameterized callable");
}
