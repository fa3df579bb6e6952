use super::*;

#[test]
fn test_reflexivity_and_top() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);

    assert!(is_subtype_of(&interner, animal, animal));
    assert!(is_subtype_of(&interner, animal, TypeId::ANY));
    assert!(is_subtype_of(&interner, TypeId::NONE, TypeId::ANY));
    assert!(!is_subtype_of(&interner, TypeId::ANY, animal));
}

#[test]
fn test_nominal_base_chain() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);
    let dog = interner.class("Dog", Some(animal));
    let puppy = interner.class("Puppy", Some(dog));

    assert!(is_subtype_of(&interner, puppy, animal));
    assert!(is_subtype_of(&interner, dog, animal));
    assert!(!is_subtype_of(&interner, animal, dog));
    // Distinct registrations with the same name are distinct types.
    let other_dog = interner.class("Dog", Some(animal));
    assert_ne!(dog, other_dog);
    assert!(!is_subtype_of(&interner, dog, other_dog));
}

#[test]
fn test_union_subtype_rules() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);
    let dog = interner.class("Dog", Some(animal));
    let cat = interner.class("Cat", Some(animal));

    let pets = interner.union(&[dog, cat]).unwrap();
    let wider = interner.union(&[dog, cat, TypeId::INT]).unwrap();

    // A non-union is under a union when it is under some member.
    assert!(is_subtype_of(&interner, dog, pets));
    assert!(!is_subtype_of(&interner, TypeId::STR, pets));
    // A union is covered only when all of its alternatives are.
    assert!(is_subtype_of(&interner, pets, animal));
    assert!(!is_subtype_of(&interner, wider, animal));
    // Union vs union recurses member-wise.
    assert!(is_subtype_of(&interner, pets, wider));
    assert!(!is_subtype_of(&interner, wider, pets));
}

#[test]
fn test_intersection_subtype_rules() {
    let interner = TypeInterner::new();
    let named = interner.has_attrs(&[("name", TypeId::STR)]).unwrap();
    let aged = interner.has_attrs(&[("age", TypeId::INT)]).unwrap();
    let both = interner.intersection(&[named, aged]).unwrap();

    // Under an intersection means under every member.
    assert!(is_subtype_of(&interner, both, named));
    assert!(is_subtype_of(&interner, both, aged));
    assert!(!is_subtype_of(&interner, named, both));

    // Intersection vs intersection: every member of the target must be
    // covered by some member of the source.
    let sized = interner.has_attrs(&[("size", TypeId::INT)]).unwrap();
    let three = interner.intersection(&[named, aged, sized]).unwrap();
    assert!(is_subtype_of(&interner, three, both));
    assert!(!is_subtype_of(&interner, both, three));
}

#[test]
fn test_tuple_subtype() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);
    let dog = interner.class("Dog", Some(animal));

    let pair = interner.tuple(&[animal, TypeId::INT], true).unwrap();
    let dog_pair = interner.tuple(&[dog, TypeId::INT], true).unwrap();
    let open_head = interner.tuple(&[animal], false).unwrap();

    // Positions are covariant.
    assert!(is_subtype_of(&interner, dog_pair, pair));
    assert!(!is_subtype_of(&interner, pair, dog_pair));
    // An open target accepts longer tuples.
    assert!(is_subtype_of(&interner, dog_pair, open_head));
    // A strict target requires a strict source of the same length.
    assert!(!is_subtype_of(&interner, open_head, pair));
    let triple = interner
        .tuple(&[dog, TypeId::INT, TypeId::STR], true)
        .unwrap();
    assert!(!is_subtype_of(&interner, triple, pair));
    assert!(is_subtype_of(&interner, triple, open_head));
    // The native sequence type is under every tuple descriptor.
    assert!(is_subtype_of(&interner, TypeId::SEQUENCE, pair));
}

#[test]
fn test_record_subtype() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);
    let dog = interner.class("Dog", Some(animal));

    let point = interner
        .record(&[("x", animal), ("y", TypeId::INT)], true)
        .unwrap();
    let dog_point = interner
        .record(&[("x", dog), ("y", TypeId::INT)], true)
        .unwrap();
    let open_x = interner.record(&[("x", animal)], false).unwrap();

    assert!(is_subtype_of(&interner, dog_point, point));
    assert!(!is_subtype_of(&interner, point, dog_point));
    assert!(is_subtype_of(&interner, dog_point, open_x));
    assert!(!is_subtype_of(&interner, open_x, point));
    // Keys are matched by name, not position.
    let swapped = interner
        .record(&[("y", TypeId::INT), ("x", dog)], true)
        .unwrap();
    assert!(is_subtype_of(&interner, swapped, point));
    // The native mapping type is under every record descriptor.
    assert!(is_subtype_of(&interner, TypeId::MAPPING, point));
}

#[test]
fn test_has_attrs_subtype() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);
    let dog = interner.class("Dog", Some(animal));

    let named = interner.has_attrs(&[("name", animal)]).unwrap();
    let dog_named = interner
        .has_attrs(&[("name", dog), ("age", TypeId::INT)])
        .unwrap();

    assert!(is_subtype_of(&interner, dog_named, named));
    assert!(!is_subtype_of(&interner, named, dog_named));
    // Only structural types relate to structural types.
    assert!(!is_subtype_of(&interner, TypeId::MAPPING, named));
}

#[test]
fn test_callable_subtype_variance() {
    let interner = TypeInterner::new();
    let animal = interner.class("Animal", None);
    let dog = interner.class("Dog", Some(animal));

    let take_dog_give_animal = interner.callable(&[dog, animal]).unwrap();
    let take_animal_give_dog = interner.callable(&[animal, dog]).unwrap();

    // Broader parameter, narrower return: a valid substitute.
    assert!(is_subtype_of(
        &interner,
        take_animal_give_dog,
        take_dog_give_animal
    ));
    assert!(!is_subtype_of(
        &interner,
        take_dog_give_animal,
        take_animal_give_dog
    ));
    // Arity must match exactly.
    let unary = interner.callable(&[animal, dog]).unwrap();
    let binary = interner.callable(&[animal, animal, dog]).unwrap();
    assert!(!is_subtype_of(&interner, binary, unary));
    // The native callable type is under every callable descriptor.
    assert!(is_subtype_of(&interner, TypeId::FUNCTION, take_dog_give_animal));
}

#[test]
fn test_comparison_types_never_in_lattice() {
    let interner = TypeInterner::new();
    let eq10 = interner.compare(CompareOp::Eq, Scalar::Int(10));
    let ge5 = interner.compare(CompareOp::Ge, Scalar::Int(5));

    // Always false, even reflexively.
    assert!(!is_subtype_of(&interner, eq10, eq10));
    assert!(!is_subtype_of(&interner, eq10, ge5));
    assert!(!is_subtype_of(&interner, TypeId::INT, eq10));
    assert!(!is_subtype_of(&interner, eq10, TypeId::INT));
    assert!(!is_subtype_of(&interner, eq10, TypeId::ANY));
}

#[test]
fn test_predicate_types_never_in_lattice() {
    let interner = TypeInterner::new();
    let sig = Signature::new(vec![ParamInfo::typed(TypeId::ANY)], Some(TypeId::BOOL));
    let positive = interner
        .satisfies(Predicate::new(sig, |v| {
            matches!(v.as_scalar(), Some(Scalar::Int(n)) if n > 0)
        }))
        .unwrap();

    assert!(!is_subtype_of(&interner, positive, TypeId::ANY));
    assert!(!is_subtype_of(&interner, TypeId::INT, positive));
}

#[test]
fn test_union_of_structural_members() {
    let interner = TypeInterner::new();
    let pair = interner.tuple(&[TypeId::INT, TypeId::INT], true).unwrap();
    let point = interner.record(&[("x", TypeId::FLOAT)], true).unwrap();
    let either = interner.union(&[pair, point]).unwrap();

    assert!(is_subtype_of(&interner, pair, either));
    assert!(is_subtype_of(&interner, point, either));
    // The native sequence type is under the tuple member.
    assert!(is_subtype_of(&interner, TypeId::SEQUENCE, either));
}
