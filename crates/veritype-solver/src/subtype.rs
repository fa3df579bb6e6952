//! Subtype checking.
//!
//! `a <: b` means every value that is a member of `a` is a member of `b`.
//! The checker memoizes results per instance; descriptors are acyclic by
//! construction (a composite can only reference types interned before it),
//! so no cycle detection is needed.
//!
//! Rule order matters and mirrors the lattice design:
//!
//! 1. Comparison and predicate descriptors are leaves — any subtype query
//!    touching one returns `false`, even reflexively. This is a deliberate
//!    design choice, not an error path.
//! 2. Reflexivity and the universal top type.
//! 3. Union/intersection decomposition.
//! 4. Structural rules (tuple, record, has-attrs, callable) with their
//!    native-type special cases and variance directions.
//! 5. Nominal base-chain walk.

use crate::intern::TypeInterner;
use crate::types::{TypeId, TypeKey};
use rustc_hash::FxHashMap;

/// Memoizing subtype checker over a shared interner.
pub struct SubtypeChecker<'a> {
    db: &'a TypeInterner,
    cache: FxHashMap<(TypeId, TypeId), bool>,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(db: &'a TypeInterner) -> Self {
        Self {
            db,
            cache: FxHashMap::default(),
        }
    }

    /// Check `a <: b`.
    pub fn is_subtype(&mut self, a: TypeId, b: TypeId) -> bool {
        if let Some(&hit) = self.cache.get(&(a, b)) {
            return hit;
        }
        let result = self.compute(a, b);
        self.cache.insert((a, b), result);
        result
    }

    fn compute(&mut self, a: TypeId, b: TypeId) -> bool {
        let (Some(ka), Some(kb)) = (self.db.lookup(a), self.db.lookup(b)) else {
            return false;
        };

        // Leaves never participate in the lattice.
        if is_leaf(&ka) || is_leaf(&kb) {
            return false;
        }
        if a == b || b == TypeId::ANY {
            return true;
        }

        // A union is covered only when all of its alternatives are.
        if let TypeKey::Union(list) = ka {
            let members = self.db.type_list(list);
            return members.iter().all(|&m| self.is_subtype(m, b));
        }
        // A non-union is under a union when it is under some member.
        if let TypeKey::Union(list) = kb {
            let members = self.db.type_list(list);
            return members.iter().any(|&m| self.is_subtype(a, m));
        }
        // Under an intersection means under every member.
        if let TypeKey::Intersection(list) = kb {
            let members = self.db.type_list(list);
            return members.iter().all(|&m| self.is_subtype(a, m));
        }
        // An intersection is under a type when some member already is.
        if let TypeKey::Intersection(list) = ka {
            let members = self.db.type_list(list);
            return members.iter().any(|&m| self.is_subtype(m, b));
        }

        match kb {
            TypeKey::Tuple(shape_b) => {
                // The native sequence type is under every tuple descriptor.
                if self.nominal_reaches(a, TypeId::SEQUENCE) {
                    return true;
                }
                let TypeKey::Tuple(shape_a) = ka else {
                    return false;
                };
                let sup = self.db.tuple_shape(shape_b);
                let sub = self.db.tuple_shape(shape_a);
                if sub.elems.len() < sup.elems.len() {
                    return false;
                }
                if sup.strict && (!sub.strict || sub.elems.len() != sup.elems.len()) {
                    return false;
                }
                // Positions are covariant.
                sub.elems
                    .iter()
                    .zip(sup.elems.iter())
                    .all(|(&sa, &sb)| self.is_subtype(sa, sb))
            }
            TypeKey::Record(shape_b) => {
                // The native mapping type is under every record descriptor.
                if self.nominal_reaches(a, TypeId::MAPPING) {
                    return true;
                }
                let TypeKey::Record(shape_a) = ka else {
                    return false;
                };
                let sup = self.db.record_shape(shape_b);
                let sub = self.db.record_shape(shape_a);
                if sub.fields.len() < sup.fields.len() {
                    return false;
                }
                if sup.strict && (!sub.strict || sub.fields.len() != sup.fields.len()) {
                    return false;
                }
                // Keys are matched by name, covariantly.
                sup.fields.iter().all(|f| match sub.field(f.name) {
                    Some(sf) => self.is_subtype(sf.type_id, f.type_id),
                    None => false,
                })
            }
            TypeKey::HasAttrs(shape_b) => {
                let TypeKey::HasAttrs(shape_a) = ka else {
                    return false;
                };
                let sup = self.db.attr_shape(shape_b);
                let sub = self.db.attr_shape(shape_a);
                sup.fields.iter().all(|f| match sub.field(f.name) {
                    Some(sf) => self.is_subtype(sf.type_id, f.type_id),
                    None => false,
                })
            }
            TypeKey::Callable(shape_b) => {
                // The native callable type is under every callable descriptor.
                if self.nominal_reaches(a, TypeId::FUNCTION) {
                    return true;
                }
                let TypeKey::Callable(shape_a) = ka else {
                    return false;
                };
                let sup = self.db.callable_shape(shape_b);
                let sub = self.db.callable_shape(shape_a);
                if sub.params.len() != sup.params.len() {
                    return false;
                }
                // Covariant return, contravariant parameters.
                if !self.is_subtype(sub.ret, sup.ret) {
                    return false;
                }
                sup.params
                    .iter()
                    .zip(sub.params.iter())
                    .all(|(&pb, &pa)| self.is_subtype(pb, pa))
            }
            TypeKey::Class(_) => self.nominal_reaches(a, b),
            // Union/Intersection/Compare/Satisfies targets were handled above.
            _ => false,
        }
    }

    /// Walk `from`'s nominal base chain looking for `target`. Non-class
    /// types have no base chain and only match themselves.
    fn nominal_reaches(&self, from: TypeId, target: TypeId) -> bool {
        let mut cur = from;
        loop {
            if cur == target {
                return true;
            }
            match self.db.lookup(cur) {
                Some(TypeKey::Class(id)) => match self.db.class_def(id).base {
                    Some(base) => cur = base,
                    None => return false,
                },
                _ => return false,
            }
        }
    }
}

fn is_leaf(key: &TypeKey) -> bool {
    matches!(key, TypeKey::Compare(..) | TypeKey::Satisfies(..))
}

/// Convenience one-shot subtype query.
pub fn is_subtype_of(db: &TypeInterner, a: TypeId, b: TypeId) -> bool {
    SubtypeChecker::new(db).is_subtype(a, b)
}
