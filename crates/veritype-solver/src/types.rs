//! Core type representation.
//!
//! Every descriptor in the algebra is an interned [`TypeId`]. The stored
//! payload is a [`TypeKey`]; aggregate payloads (tuples, records, callables)
//! live in side tables addressed by shape ids so that `TypeKey` stays a
//! small, hashable value.
//!
//! Structural equality falls out of interning: two descriptors of the same
//! kind with the same normalized payload receive the same `TypeId`, so type
//! equality is an integer comparison and `TypeId` can be used as a map key.

use crate::value::Scalar;
use veritype_common::Atom;

/// An interned type.
///
/// `TypeId`s are only produced by [`crate::TypeInterner`]; the constants
/// below are the intrinsic nominal types pre-registered by
/// [`crate::TypeInterner::new`], in registration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The universal top type; every value is a member and every type is a
    /// subtype.
    pub const ANY: Self = Self(0);
    /// The null/unit type; the single nil value is its only member.
    pub const NONE: Self = Self(1);
    pub const BOOL: Self = Self(2);
    pub const INT: Self = Self(3);
    pub const FLOAT: Self = Self(4);
    pub const STR: Self = Self(5);
    /// The native ordered-sequence type. Also the nominal type reported by
    /// sequence values; a subtype of every tuple descriptor.
    pub const SEQUENCE: Self = Self(6);
    /// The native keyed-mapping type; a subtype of every record descriptor.
    pub const MAPPING: Self = Self(7);
    /// The native callable type; a subtype of every callable descriptor.
    pub const FUNCTION: Self = Self(8);
}

/// Index into the interner's nominal class table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassId(pub u32);

/// Index into the interner's member-list table (union/intersection members).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleShapeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordShapeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrShapeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableShapeId(pub u32);

/// Index into the interner's predicate table.
///
/// Predicates are opaque functions, so `Satisfies` types have identity
/// rather than structural equality: every registered predicate gets a fresh
/// id and therefore a distinct `TypeId`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PredicateId(pub u32);

/// Interned payload of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// A nominal (atomic) type: intrinsic or user-registered class.
    Class(ClassId),
    /// Union of a minimal antichain of member types.
    Union(TypeListId),
    /// Intersection of a minimal antichain of member types.
    Intersection(TypeListId),
    Tuple(TupleShapeId),
    Record(RecordShapeId),
    HasAttrs(AttrShapeId),
    Callable(CallableShapeId),
    /// Value-comparison leaf: `op` applied between a candidate value and the
    /// scalar payload.
    Compare(CompareOp, Scalar),
    /// Arbitrary-predicate leaf.
    Satisfies(PredicateId),
}

/// A nominal class: a name and an optional base class.
///
/// The subtype chain is rooted at [`TypeId::ANY`]; a class with no base is a
/// direct subtype of `ANY` only.
#[derive(Clone, Debug)]
pub struct ClassDef {
    pub name: Atom,
    pub base: Option<TypeId>,
}

/// Payload of a tuple descriptor: per-position types plus strictness.
///
/// Strict tuples require exactly `elems.len()` elements; open tuples require
/// at least that many, trailing elements unconstrained.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleShape {
    pub elems: Vec<TypeId>,
    pub strict: bool,
}

/// One named field of a record or structural-attribute descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub name: Atom,
    pub type_id: TypeId,
}

/// Payload of a record descriptor.
///
/// Fields are sorted by name atom for canonical identity; declared order is
/// not significant. Matching is key-addressed, never positional.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordShape {
    pub fields: Vec<FieldInfo>,
    pub strict: bool,
}

impl RecordShape {
    /// Look up a field by name. Fields are sorted by atom.
    pub fn field(&self, name: Atom) -> Option<&FieldInfo> {
        self.fields
            .binary_search_by_key(&name, |f| f.name)
            .ok()
            .map(|idx| &self.fields[idx])
    }
}

/// Payload of a structural-attribute descriptor. Always open: undeclared
/// attributes are irrelevant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrShape {
    pub fields: Vec<FieldInfo>,
}

impl AttrShape {
    pub fn field(&self, name: Atom) -> Option<&FieldInfo> {
        self.fields
            .binary_search_by_key(&name, |f| f.name)
            .ok()
            .map(|idx| &self.fields[idx])
    }
}

/// Payload of a callable descriptor: expected positional parameter types and
/// the expected return type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableShape {
    pub params: Vec<TypeId>,
    pub ret: TypeId,
}

/// Fixed operator of a comparison descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
}

impl CompareOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::Eq => "Eq",
            Self::Ne => "Ne",
            Self::Ge => "Ge",
            Self::Gt => "Gt",
            Self::Le => "Le",
            Self::Lt => "Lt",
        }
    }

    /// Apply the operator between a candidate value and the descriptor
    /// payload. Incomparable operands (e.g. a string against an int under an
    /// ordering operator) yield `false`, except `Ne` which holds whenever
    /// equality does not.
    pub fn apply(self, lhs: &Scalar, rhs: &Scalar) -> bool {
        use std::cmp::Ordering;
        match self {
            Self::Eq => lhs.value_eq(rhs),
            Self::Ne => !lhs.value_eq(rhs),
            Self::Ge => matches!(
                lhs.value_cmp(rhs),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::Gt => matches!(lhs.value_cmp(rhs), Some(Ordering::Greater)),
            Self::Le => matches!(lhs.value_cmp(rhs), Some(Ordering::Less | Ordering::Equal)),
            Self::Lt => matches!(lhs.value_cmp(rhs), Some(Ordering::Less)),
        }
    }
}
