//! Runtime type-algebra engine.
//!
//! Composable type descriptors — unions, intersections, tuples, records,
//! structural-attribute types, callable signatures and value predicates —
//! with two universal relations evaluated over them:
//!
//! - **membership**: does a value belong to a type?
//! - **subtyping**: is every member of type A also a member of type B?
//!
//! Types are interned ([`TypeId`]) so equality is O(1) and structural;
//! construction is the only mutation point and produces immutable values,
//! which can therefore be queried concurrently without synchronization.
//! Values participate through the [`Inspect`] capability trait rather than
//! reflection; [`Value`] is the built-in dynamic value.
//!
//! Union and intersection construction minimizes the member set to an
//! antichain under the subtype order, and a one-member composite collapses
//! to that member. Callable checking applies real variance rules: covariant
//! returns, contravariant parameters.

pub mod descriptor;
mod errors;
pub mod format;
mod intern;
mod membership;
mod subtype;
pub mod types;
pub mod value;

pub use descriptor::{
    Callable, Comparison, HasAttrs, Intersection, Record, RecordItem, Satisfies, Tuple,
    TupleItem, TypeDescriptor, Union,
};
pub use errors::TypeError;
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use membership::{TypeJudge, is_member};
pub use subtype::{SubtypeChecker, is_subtype_of};
pub use types::{
    AttrShape, AttrShapeId, CallableShape, CallableShapeId, ClassDef, ClassId, CompareOp,
    FieldInfo, PredicateId, RecordShape, RecordShapeId, TupleShape, TupleShapeId, TypeId,
    TypeKey, TypeListId,
};
pub use value::{
    Inspect, ObjectValue, OrderedFloat, ParamInfo, Predicate, Scalar, Signature, Value,
};

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod intern_tests;
#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod subtype_tests;
#[cfg(test)]
#[path = "../tests/membership_tests.rs"]
mod membership_tests;
#[cfg(test)]
#[path = "../tests/descriptor_tests.rs"]
mod descriptor_tests;
