//! Value inspection.
//!
//! The engine never reflects over host values. Instead, anything that wants
//! to be checked implements [`Inspect`], a capability trait with one view
//! per descriptor family: a scalar view for comparison types, an
//! ordered-sequence view for tuples, a keyed-map view for records, an
//! attribute view for structural types and a registered [`Signature`] for
//! callables. A view that is not offered simply fails membership for the
//! corresponding descriptor kind.
//!
//! [`Value`] is the built-in dynamic value used by the contract layer and
//! the tests; host aggregates are free to implement `Inspect` directly.

use crate::types::TypeId;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// `f64` with total equality and hashing, so float payloads can be interned.
///
/// `-0.0` is canonicalized to `0.0` and all NaNs to one bit pattern;
/// ordering uses `total_cmp`.
#[derive(Copy, Clone, Debug)]
pub struct OrderedFloat(pub f64);

impl OrderedFloat {
    fn canonical_bits(self) -> u64 {
        if self.0.is_nan() {
            f64::NAN.to_bits()
        } else if self.0 == 0.0 {
            0.0f64.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for OrderedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scalar payload of a comparison descriptor, and the scalar view of a
/// value.
///
/// The derived `PartialEq`/`Hash` are structural and kind-sensitive — that
/// is the identity used for interning (`Eq[1]` and `Eq[1.0]` are distinct
/// descriptors). Runtime comparison goes through [`Scalar::value_eq`] and
/// [`Scalar::value_cmp`], which compare ints and floats numerically.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(OrderedFloat),
    Str(Arc<str>),
}

impl Scalar {
    pub fn float(v: f64) -> Self {
        Self::Float(OrderedFloat(v))
    }

    pub fn str(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }

    /// Runtime ordering between two scalars; `None` when incomparable.
    pub fn value_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.0.partial_cmp(&b.0),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(&b.0),
            (Self::Float(a), Self::Int(b)) => a.0.partial_cmp(&(*b as f64)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Runtime equality; cross-kind numerics compare numerically.
    pub fn value_eq(&self, other: &Self) -> bool {
        matches!(self.value_cmp(other), Some(Ordering::Equal))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::str(v)
    }
}

/// One positional parameter of a registered callable signature: an optional
/// declared type annotation and whether a default value exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParamInfo {
    pub annotation: Option<TypeId>,
    pub has_default: bool,
}

impl ParamInfo {
    /// Parameter with a declared type and no default.
    pub fn typed(annotation: TypeId) -> Self {
        Self {
            annotation: Some(annotation),
            has_default: false,
        }
    }

    /// Parameter with no declared type; compatible with any expected type.
    pub fn untyped() -> Self {
        Self {
            annotation: None,
            has_default: false,
        }
    }

    /// Mark the parameter as having a default value.
    pub fn optional(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Registered signature of a callable value.
///
/// The host ecosystem has no reflection over anonymous callables, so any
/// callable that is to be checked against a callable descriptor carries this
/// lightweight signature descriptor instead: positional parameters in order
/// and an optional declared return type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<ParamInfo>,
    pub ret: Option<TypeId>,
}

impl Signature {
    pub fn new(params: Vec<ParamInfo>, ret: Option<TypeId>) -> Self {
        Self { params, ret }
    }
}

/// A user predicate for `Satisfies` descriptors: the function itself plus
/// its registered signature, which construction validates against the
/// "accepts one `any`, returns `bool`" contract.
#[derive(Clone)]
pub struct Predicate {
    pub sig: Signature,
    pub func: Arc<dyn Fn(&dyn Inspect) -> bool + Send + Sync>,
}

impl Predicate {
    pub fn new(
        sig: Signature,
        func: impl Fn(&dyn Inspect) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            sig,
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("sig", &self.sig).finish()
    }
}

/// Capability views a value can offer to the membership judge.
///
/// Every method except [`Inspect::type_of`] defaults to "view not offered".
pub trait Inspect {
    /// Nominal type of the value (a class `TypeId`).
    fn type_of(&self) -> TypeId;

    /// Scalar view, consumed by comparison descriptors.
    fn as_scalar(&self) -> Option<Scalar> {
        None
    }

    /// Ordered-sequence view, consumed by tuple descriptors.
    fn elements(&self) -> Option<Vec<&dyn Inspect>> {
        None
    }

    /// Number of entries in the keyed-map view, when the value is a mapping.
    fn field_count(&self) -> Option<usize> {
        None
    }

    /// Keyed-map lookup, consumed by record descriptors.
    fn field(&self, _key: &str) -> Option<&dyn Inspect> {
        None
    }

    /// Attribute lookup, consumed by structural descriptors.
    fn attr(&self, _name: &str) -> Option<&dyn Inspect> {
        None
    }

    /// Registered signature, consumed by callable descriptors. `None` means
    /// the value is not invocable.
    fn signature(&self) -> Option<&Signature> {
        None
    }
}

/// Built-in dynamic value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(IndexMap<String, Value>),
    Object(ObjectValue),
    Func(Signature),
}

/// An instance of a registered nominal class with named attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    pub class: TypeId,
    pub attrs: IndexMap<String, Value>,
}

impl ObjectValue {
    pub fn new(class: TypeId) -> Self {
        Self {
            class,
            attrs: IndexMap::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: Value) -> Self {
        self.attrs.insert(name.to_string(), value);
        self
    }
}

impl Value {
    pub fn seq(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Seq(items.into_iter().collect())
    }

    pub fn map<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}

impl Inspect for Value {
    fn type_of(&self) -> TypeId {
        match self {
            Self::Nil => TypeId::NONE,
            Self::Bool(_) => TypeId::BOOL,
            Self::Int(_) => TypeId::INT,
            Self::Float(_) => TypeId::FLOAT,
            Self::Str(_) => TypeId::STR,
            Self::Seq(_) => TypeId::SEQUENCE,
            Self::Map(_) => TypeId::MAPPING,
            Self::Object(obj) => obj.class,
            Self::Func(_) => TypeId::FUNCTION,
        }
    }

    fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Bool(v) => Some(Scalar::Bool(*v)),
            Self::Int(v) => Some(Scalar::Int(*v)),
            Self::Float(v) => Some(Scalar::float(*v)),
            Self::Str(v) => Some(Scalar::str(v)),
            _ => None,
        }
    }

    fn elements(&self) -> Option<Vec<&dyn Inspect>> {
        match self {
            Self::Seq(items) => Some(items.iter().map(|v| v as &dyn Inspect).collect()),
            _ => None,
        }
    }

    fn field_count(&self) -> Option<usize> {
        match self {
            Self::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    fn field(&self, key: &str) -> Option<&dyn Inspect> {
        match self {
            Self::Map(entries) => entries.get(key).map(|v| v as &dyn Inspect),
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Option<&dyn Inspect> {
        match self {
            Self::Object(obj) => obj.attrs.get(name).map(|v| v as &dyn Inspect),
            _ => None,
        }
    }

    fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Func(sig) => Some(sig),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}
