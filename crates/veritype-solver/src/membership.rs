//! Membership checking: "does this value belong to this type?"
//!
//! The judge walks a descriptor's payload against the capability views the
//! value offers through [`Inspect`]. A value that does not offer the view a
//! descriptor family needs (no sequence view for a tuple, no registered
//! signature for a callable, ...) is simply not a member.

use crate::intern::TypeInterner;
use crate::subtype::SubtypeChecker;
use crate::types::{TypeId, TypeKey};
use crate::value::{Inspect, Signature};

/// Membership judge with a subtype checker for the variance rules that
/// callable membership needs.
pub struct TypeJudge<'a> {
    db: &'a TypeInterner,
    subtype: SubtypeChecker<'a>,
}

impl<'a> TypeJudge<'a> {
    pub fn new(db: &'a TypeInterner) -> Self {
        Self {
            db,
            subtype: SubtypeChecker::new(db),
        }
    }

    /// Check whether `value` is a member of `ty`.
    pub fn is_member(&mut self, value: &dyn Inspect, ty: TypeId) -> bool {
        let Some(key) = self.db.lookup(ty) else {
            return false;
        };
        match key {
            // Nominal membership: the value's own type reaches the class.
            TypeKey::Class(_) => self.subtype.is_subtype(value.type_of(), ty),
            TypeKey::Union(list) => {
                let members = self.db.type_list(list);
                members.iter().any(|&m| self.is_member(value, m))
            }
            TypeKey::Intersection(list) => {
                let members = self.db.type_list(list);
                members.iter().all(|&m| self.is_member(value, m))
            }
            TypeKey::Tuple(shape) => {
                let Some(elems) = value.elements() else {
                    return false;
                };
                let shape = self.db.tuple_shape(shape);
                if elems.len() < shape.elems.len() {
                    return false;
                }
                if shape.strict && elems.len() != shape.elems.len() {
                    return false;
                }
                elems
                    .iter()
                    .zip(shape.elems.iter())
                    .all(|(&v, &t)| self.is_member(v, t))
            }
            TypeKey::Record(shape) => {
                let Some(count) = value.field_count() else {
                    return false;
                };
                let shape = self.db.record_shape(shape);
                if count < shape.fields.len() {
                    return false;
                }
                if shape.strict && count != shape.fields.len() {
                    return false;
                }
                shape.fields.iter().all(|f| {
                    let name = self.db.resolve_atom(f.name);
                    match value.field(&name) {
                        Some(v) => self.is_member(v, f.type_id),
                        None => false,
                    }
                })
            }
            TypeKey::HasAttrs(shape) => {
                let shape = self.db.attr_shape(shape);
                shape.fields.iter().all(|f| {
                    let name = self.db.resolve_atom(f.name);
                    match value.attr(&name) {
                        Some(v) => self.is_member(v, f.type_id),
                        None => false,
                    }
                })
            }
            TypeKey::Callable(shape) => {
                let Some(sig) = value.signature() else {
                    return false;
                };
                let shape = self.db.callable_shape(shape);
                signature_conforms(&mut self.subtype, sig, &shape.params, shape.ret)
            }
            TypeKey::Compare(op, payload) => match value.as_scalar() {
                Some(scalar) => op.apply(&scalar, &payload),
                None => false,
            },
            TypeKey::Satisfies(id) => (self.db.predicate(id).func)(value),
        }
    }
}

/// Check a registered signature against an expected callable contract.
///
/// Variance rules:
/// - a declared return annotation must be a subtype of the expected return
///   (covariant — the candidate may promise something more specific);
/// - each expected parameter type must be a subtype of the corresponding
///   declared parameter annotation (contravariant — the candidate may accept
///   something broader); undeclared annotations are compatible with
///   anything;
/// - the candidate must have a parameter for every expected type, and any
///   parameters beyond the expected count must all carry defaults.
pub(crate) fn signature_conforms(
    checker: &mut SubtypeChecker<'_>,
    sig: &Signature,
    expected_params: &[TypeId],
    expected_ret: TypeId,
) -> bool {
    if let Some(declared) = sig.ret {
        if !checker.is_subtype(declared, expected_ret) {
            return false;
        }
    }
    let mut positional = sig.params.iter();
    for &expected in expected_params {
        match positional.next() {
            None => return false,
            Some(param) => {
                if let Some(annotation) = param.annotation {
                    if !checker.is_subtype(expected, annotation) {
                        return false;
                    }
                }
            }
        }
    }
    positional.all(|p| p.has_default)
}

/// Convenience one-shot membership query.
pub fn is_member(db: &TypeInterner, value: &dyn Inspect, ty: TypeId) -> bool {
    TypeJudge::new(db).is_member(value, ty)
}
