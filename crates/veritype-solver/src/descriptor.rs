//! Per-kind descriptor facades.
//!
//! The engine proper works on always-parameterized [`TypeId`]s. These
//! facades are the public construction surface: each kind starts blank,
//! accepts exactly one `parameterize` call, and surfaces the two universal
//! operations through [`TypeDescriptor`]. A second parameterization is a
//! construction error; querying a blank facade is a usage error — including
//! when the blank facade is the *other* operand of a subtype query.
//!
//! Atomic types need no facade: `TypeId` implements [`TypeDescriptor`]
//! directly and is always parameterized.

use crate::errors::TypeError;
use crate::intern::TypeInterner;
use crate::membership;
use crate::subtype;
use crate::types::{CompareOp, TypeId};
use crate::value::{Inspect, Predicate, Scalar};
use std::sync::OnceLock;

/// One-shot parameterization cell shared by all facades.
#[derive(Debug)]
struct ParamCell {
    kind: &'static str,
    ty: OnceLock<TypeId>,
}

impl ParamCell {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            ty: OnceLock::new(),
        }
    }

    /// Reject re-parameterization before the caller spends any work.
    fn check_blank(&self) -> Result<(), TypeError> {
        if self.ty.get().is_some() {
            return Err(TypeError::AlreadyParameterized { kind: self.kind });
        }
        Ok(())
    }

    fn fill(&self, ty: TypeId) -> Result<TypeId, TypeError> {
        self.ty
            .set(ty)
            .map_err(|_| TypeError::AlreadyParameterized { kind: self.kind })?;
        Ok(ty)
    }

    fn get(&self) -> Result<TypeId, TypeError> {
        self.ty
            .get()
            .copied()
            .ok_or(TypeError::Unparameterized { kind: self.kind })
    }
}

/// The two universal operations every descriptor exposes.
///
/// Equality and hashing of descriptors are defined through `type_id()`:
/// interning makes them structural, and querying identity of a blank facade
/// surfaces the usage error instead of a silent `false`.
pub trait TypeDescriptor {
    /// The interned type, or a usage error for a blank facade.
    fn type_id(&self) -> Result<TypeId, TypeError>;

    /// Does `value` belong to this type?
    fn membership(&self, db: &TypeInterner, value: &dyn Inspect) -> Result<bool, TypeError> {
        Ok(membership::is_member(db, value, self.type_id()?))
    }

    /// Is this type a subtype of `other`?
    fn is_subtype_of(
        &self,
        db: &TypeInterner,
        other: &dyn TypeDescriptor,
    ) -> Result<bool, TypeError> {
        Ok(subtype::is_subtype_of(db, self.type_id()?, other.type_id()?))
    }
}

/// Atomic types are descriptors in their own right.
impl TypeDescriptor for TypeId {
    fn type_id(&self) -> Result<TypeId, TypeError> {
        Ok(*self)
    }
}

macro_rules! facade {
    ($name:ident, $kind:literal) => {
        impl $name {
            pub fn new() -> Self {
                Self {
                    cell: ParamCell::new($kind),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl TypeDescriptor for $name {
            fn type_id(&self) -> Result<TypeId, TypeError> {
                self.cell.get()
            }
        }
    };
}

/// Union facade.
#[derive(Debug)]
pub struct Union {
    cell: ParamCell,
}

facade!(Union, "union");

impl Union {
    pub fn parameterize(&self, db: &TypeInterner, members: &[TypeId]) -> Result<TypeId, TypeError> {
        self.cell.check_blank()?;
        self.cell.fill(db.union(members)?)
    }

    /// Construct and parameterize in one step.
    pub fn of(db: &TypeInterner, members: &[TypeId]) -> Result<Self, TypeError> {
        let union = Self::new();
        union.parameterize(db, members)?;
        Ok(union)
    }
}

/// Intersection facade.
#[derive(Debug)]
pub struct Intersection {
    cell: ParamCell,
}

facade!(Intersection, "intersection");

impl Intersection {
    pub fn parameterize(&self, db: &TypeInterner, members: &[TypeId]) -> Result<TypeId, TypeError> {
        self.cell.check_blank()?;
        self.cell.fill(db.intersection(members)?)
    }

    pub fn of(db: &TypeInterner, members: &[TypeId]) -> Result<Self, TypeError> {
        let intersection = Self::new();
        intersection.parameterize(db, members)?;
        Ok(intersection)
    }
}

/// One item of a tuple parameterization.
#[derive(Copy, Clone, Debug)]
pub enum TupleItem {
    Ty(TypeId),
    /// Open-ended marker; must be the final item.
    Etc,
}

/// Tuple facade.
#[derive(Debug)]
pub struct Tuple {
    cell: ParamCell,
}

facade!(Tuple, "tuple");

impl Tuple {
    pub fn parameterize(&self, db: &TypeInterner, items: &[TupleItem]) -> Result<TypeId, TypeError> {
        self.cell.check_blank()?;
        let mut elems = Vec::with_capacity(items.len());
        let mut strict = true;
        for item in items {
            if !strict {
                return Err(TypeError::MisplacedEtc { kind: "tuple" });
            }
            match item {
                TupleItem::Ty(ty) => elems.push(*ty),
                TupleItem::Etc => strict = false,
            }
        }
        self.cell.fill(db.tuple(&elems, strict)?)
    }

    pub fn of(db: &TypeInterner, items: &[TupleItem]) -> Result<Self, TypeError> {
        let tuple = Self::new();
        tuple.parameterize(db, items)?;
        Ok(tuple)
    }
}

/// One item of a record parameterization.
#[derive(Copy, Clone, Debug)]
pub enum RecordItem<'a> {
    Field(&'a str, TypeId),
    /// Open-ended marker; must be the final item.
    Etc,
}

/// Record facade.
#[derive(Debug)]
pub struct Record {
    cell: ParamCell,
}

facade!(Record, "record");

impl Record {
    pub fn parameterize(
        &self,
        db: &TypeInterner,
        items: &[RecordItem<'_>],
    ) -> Result<TypeId, TypeError> {
        self.cell.check_blank()?;
        let mut fields = Vec::with_capacity(items.len());
        let mut strict = true;
        for item in items {
            if !strict {
                return Err(TypeError::MisplacedEtc { kind: "record" });
            }
            match item {
                RecordItem::Field(name, ty) => fields.push((*name, *ty)),
                RecordItem::Etc => strict = false,
            }
        }
        self.cell.fill(db.record(&fields, strict)?)
    }

    pub fn of(db: &TypeInterner, items: &[RecordItem<'_>]) -> Result<Self, TypeError> {
        let record = Self::new();
        record.parameterize(db, items)?;
        Ok(record)
    }
}

/// Structural-attribute facade.
#[derive(Debug)]
pub struct HasAttrs {
    cell: ParamCell,
}

facade!(HasAttrs, "structural type");

impl HasAttrs {
    pub fn parameterize(
        &self,
        db: &TypeInterner,
        fields: &[(&str, TypeId)],
    ) -> Result<TypeId, TypeError> {
        self.cell.check_blank()?;
        self.cell.fill(db.has_attrs(fields)?)
    }

    pub fn of(db: &TypeInterner, fields: &[(&str, TypeId)]) -> Result<Self, TypeError> {
        let has_attrs = Self::new();
        has_attrs.parameterize(db, fields)?;
        Ok(has_attrs)
    }
}

/// Callable facade. The trailing type is the return type.
#[derive(Debug)]
pub struct Callable {
    cell: ParamCell,
}

facade!(Callable, "callable");

impl Callable {
    pub fn parameterize(&self, db: &TypeInterner, types: &[TypeId]) -> Result<TypeId, TypeError> {
        self.cell.check_blank()?;
        self.cell.fill(db.callable(types)?)
    }

    pub fn of(db: &TypeInterner, types: &[TypeId]) -> Result<Self, TypeError> {
        let callable = Self::new();
        callable.parameterize(db, types)?;
        Ok(callable)
    }
}

/// Comparison facade; the operator is fixed at creation, the scalar payload
/// at parameterization.
#[derive(Debug)]
pub struct Comparison {
    op: CompareOp,
    cell: ParamCell,
}

impl Comparison {
    fn with_op(op: CompareOp) -> Self {
        Self {
            op,
            cell: ParamCell::new("comparison type"),
        }
    }

    pub fn eq() -> Self {
        Self::with_op(CompareOp::Eq)
    }

    pub fn ne() -> Self {
        Self::with_op(CompareOp::Ne)
    }

    pub fn ge() -> Self {
        Self::with_op(CompareOp::Ge)
    }

    pub fn gt() -> Self {
        Self::with_op(CompareOp::Gt)
    }

    pub fn le() -> Self {
        Self::with_op(CompareOp::Le)
    }

    pub fn lt() -> Self {
        Self::with_op(CompareOp::Lt)
    }

    pub fn parameterize(
        &self,
        db: &TypeInterner,
        value: impl Into<Scalar>,
    ) -> Result<TypeId, TypeError> {
        self.cell.check_blank()?;
        self.cell.fill(db.compare(self.op, value.into()))
    }
}

impl TypeDescriptor for Comparison {
    fn type_id(&self) -> Result<TypeId, TypeError> {
        self.cell.get()
    }
}

/// Predicate facade.
#[derive(Debug)]
pub struct Satisfies {
    cell: ParamCell,
}

facade!(Satisfies, "predicate type");

impl Satisfies {
    pub fn parameterize(
        &self,
        db: &TypeInterner,
        predicate: Predicate,
    ) -> Result<TypeId, TypeError> {
        self.cell.check_blank()?;
        self.cell.fill(db.satisfies(predicate)?)
    }

    pub fn of(db: &TypeInterner, predicate: Predicate) -> Result<Self, TypeError> {
        let satisfies = Self::new();
        satisfies.parameterize(db, predicate)?;
        Ok(satisfies)
    }
}
