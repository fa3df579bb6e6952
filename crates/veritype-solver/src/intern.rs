//! Type interning and descriptor construction.
//!
//! [`TypeInterner`] owns every type in the algebra. Construction is the only
//! mutation point: each constructor validates and normalizes its payload and
//! returns a fully-formed immutable [`TypeId`], or fails outright — partial
//! construction is never observable. All methods take `&self`; the interner
//! is internally synchronized and can be shared across threads.
//!
//! Union and intersection construction performs antichain minimization here,
//! so an interned member list never contains a member that is a subtype of
//! another member (union) or a supertype of another member (intersection).

use crate::errors::TypeError;
use crate::membership::signature_conforms;
use crate::subtype::SubtypeChecker;
use crate::types::{
    AttrShape, AttrShapeId, CallableShape, CallableShapeId, ClassDef, ClassId, CompareOp,
    FieldInfo, PredicateId, RecordShape, RecordShapeId, TupleShape, TupleShapeId, TypeId,
    TypeKey, TypeListId,
};
use crate::value::{Predicate, Scalar};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};
use veritype_common::{Atom, Interner};

/// Deduplicating store for one family of shapes.
struct ShapeTable<T> {
    items: RwLock<Vec<Arc<T>>>,
    map: DashMap<Arc<T>, u32, FxBuildHasher>,
}

impl<T: Eq + Hash> ShapeTable<T> {
    fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            map: DashMap::default(),
        }
    }

    fn intern(&self, shape: T) -> u32 {
        if let Some(id) = self.map.get(&shape) {
            return *id;
        }
        let mut items = self.items.write().expect("shape table lock poisoned");
        if let Some(id) = self.map.get(&shape) {
            return *id;
        }
        let id = u32::try_from(items.len()).expect("shape table overflow");
        let arc = Arc::new(shape);
        items.push(Arc::clone(&arc));
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Arc<T> {
        let items = self.items.read().expect("shape table lock poisoned");
        Arc::clone(&items[id as usize])
    }
}

/// The type store and descriptor factory.
pub struct TypeInterner {
    strings: Interner,
    keys: RwLock<Vec<TypeKey>>,
    key_map: DashMap<TypeKey, TypeId, FxBuildHasher>,
    lists: RwLock<Vec<Arc<[TypeId]>>>,
    list_map: DashMap<Arc<[TypeId]>, TypeListId, FxBuildHasher>,
    tuples: ShapeTable<TupleShape>,
    records: ShapeTable<RecordShape>,
    attrs: ShapeTable<AttrShape>,
    callables: ShapeTable<CallableShape>,
    classes: RwLock<Vec<ClassDef>>,
    predicates: RwLock<Vec<Arc<Predicate>>>,
}

impl TypeInterner {
    /// Create an interner with the intrinsic nominal types pre-registered.
    pub fn new() -> Self {
        let interner = Self {
            strings: Interner::new(),
            keys: RwLock::new(Vec::new()),
            key_map: DashMap::default(),
            lists: RwLock::new(Vec::new()),
            list_map: DashMap::default(),
            tuples: ShapeTable::new(),
            records: ShapeTable::new(),
            attrs: ShapeTable::new(),
            callables: ShapeTable::new(),
            classes: RwLock::new(Vec::new()),
            predicates: RwLock::new(Vec::new()),
        };
        // Registration order must match the TypeId constants.
        let intrinsics = [
            ("object", TypeId::ANY),
            ("NoneType", TypeId::NONE),
            ("bool", TypeId::BOOL),
            ("int", TypeId::INT),
            ("float", TypeId::FLOAT),
            ("str", TypeId::STR),
            ("sequence", TypeId::SEQUENCE),
            ("mapping", TypeId::MAPPING),
            ("function", TypeId::FUNCTION),
        ];
        for (name, expected) in intrinsics {
            let id = interner.class(name, None);
            debug_assert_eq!(id, expected);
        }
        interner
    }

    fn intern_key(&self, key: TypeKey) -> TypeId {
        if let Some(id) = self.key_map.get(&key) {
            return *id;
        }
        let mut keys = self.keys.write().expect("type table lock poisoned");
        if let Some(id) = self.key_map.get(&key) {
            return *id;
        }
        let id = TypeId(u32::try_from(keys.len()).expect("type table overflow"));
        keys.push(key.clone());
        self.key_map.insert(key, id);
        id
    }

    fn intern_list(&self, members: Vec<TypeId>) -> TypeListId {
        if let Some(id) = self.list_map.get(members.as_slice()) {
            return *id;
        }
        let mut lists = self.lists.write().expect("list table lock poisoned");
        if let Some(id) = self.list_map.get(members.as_slice()) {
            return *id;
        }
        let id = TypeListId(u32::try_from(lists.len()).expect("list table overflow"));
        let arc: Arc<[TypeId]> = members.into();
        lists.push(Arc::clone(&arc));
        self.list_map.insert(arc, id);
        id
    }

    /// Intern a string.
    pub fn intern_string(&self, s: &str) -> Atom {
        self.strings.intern(s)
    }

    /// Resolve an interned string.
    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.strings.resolve(atom)
    }

    /// Register a fresh nominal class. Classes have identity, not structure:
    /// two registrations with the same name are distinct types.
    pub fn class(&self, name: &str, base: Option<TypeId>) -> TypeId {
        let name = self.strings.intern(name);
        let mut classes = self.classes.write().expect("class table lock poisoned");
        let id = ClassId(u32::try_from(classes.len()).expect("class table overflow"));
        classes.push(ClassDef { name, base });
        drop(classes);
        self.intern_key(TypeKey::Class(id))
    }

    /// Construct a union of the given member types.
    ///
    /// Nested unions are flattened one level; the flat candidate list is
    /// reduced to a minimal antichain: a candidate that is a subtype of a
    /// kept member is dropped, and a kept member that is a subtype of a
    /// candidate is evicted. A single surviving member is returned unwrapped
    /// rather than as a one-element union.
    pub fn union(&self, members: &[TypeId]) -> Result<TypeId, TypeError> {
        let flat = self.flatten(members, |key| match key {
            TypeKey::Union(list) => Some(*list),
            _ => None,
        });
        let mut checker = SubtypeChecker::new(self);
        let mut kept: SmallVec<[TypeId; 8]> = SmallVec::new();
        'next: for candidate in flat {
            let mut i = 0;
            while i < kept.len() {
                if checker.is_subtype(candidate, kept[i]) {
                    trace!(candidate = ?candidate, covered_by = ?kept[i], "union: dropping covered candidate");
                    continue 'next;
                }
                if checker.is_subtype(kept[i], candidate) {
                    trace!(evicted = ?kept[i], broader = ?candidate, "union: evicting narrower member");
                    kept.remove(i);
                } else {
                    i += 1;
                }
            }
            kept.push(candidate);
        }
        self.finish_composite(kept, "union", TypeKey::Union)
    }

    /// Construct an intersection of the given member types.
    ///
    /// The dual of [`TypeInterner::union`]: a candidate is dropped when a
    /// kept member is already a subtype of it (something more specific is
    /// present), and a kept member broader than the candidate is evicted.
    pub fn intersection(&self, members: &[TypeId]) -> Result<TypeId, TypeError> {
        let flat = self.flatten(members, |key| match key {
            TypeKey::Intersection(list) => Some(*list),
            _ => None,
        });
        let mut checker = SubtypeChecker::new(self);
        let mut kept: SmallVec<[TypeId; 8]> = SmallVec::new();
        'next: for candidate in flat {
            let mut i = 0;
            while i < kept.len() {
                if checker.is_subtype(kept[i], candidate) {
                    trace!(candidate = ?candidate, implied_by = ?kept[i], "intersection: dropping implied candidate");
                    continue 'next;
                }
                if checker.is_subtype(candidate, kept[i]) {
                    trace!(evicted = ?kept[i], narrower = ?candidate, "intersection: evicting broader member");
                    kept.remove(i);
                } else {
                    i += 1;
                }
            }
            kept.push(candidate);
        }
        self.finish_composite(kept, "intersection", TypeKey::Intersection)
    }

    /// Flatten one level of nested composites and deduplicate, preserving
    /// first-seen order.
    fn flatten(
        &self,
        members: &[TypeId],
        as_composite: impl Fn(&TypeKey) -> Option<TypeListId>,
    ) -> SmallVec<[TypeId; 8]> {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        let mut push = |id: TypeId, flat: &mut SmallVec<[TypeId; 8]>| {
            if !flat.contains(&id) {
                flat.push(id);
            }
        };
        for &member in members {
            match self.lookup(member).as_ref().and_then(&as_composite) {
                Some(list) => {
                    for &inner in self.type_list(list).iter() {
                        push(inner, &mut flat);
                    }
                }
                None => push(member, &mut flat),
            }
        }
        flat
    }

    fn finish_composite(
        &self,
        mut kept: SmallVec<[TypeId; 8]>,
        kind: &'static str,
        wrap: impl FnOnce(TypeListId) -> TypeKey,
    ) -> Result<TypeId, TypeError> {
        match kept.len() {
            0 => Err(TypeError::EmptyParameterization { kind }),
            1 => Ok(kept[0]),
            _ => {
                // Canonical member order makes construction order-independent.
                kept.sort_unstable();
                debug!(kind, members = kept.len(), "interning composite");
                let list = self.intern_list(kept.into_vec());
                Ok(self.intern_key(wrap(list)))
            }
        }
    }

    /// Construct a tuple descriptor. `strict` requires exact arity at
    /// membership; open tuples accept trailing unconstrained elements.
    pub fn tuple(&self, elems: &[TypeId], strict: bool) -> Result<TypeId, TypeError> {
        if elems.is_empty() {
            return Err(TypeError::EmptyParameterization { kind: "tuple" });
        }
        let shape = TupleShape {
            elems: elems.to_vec(),
            strict,
        };
        let id = TupleShapeId(self.tuples.intern(shape));
        Ok(self.intern_key(TypeKey::Tuple(id)))
    }

    /// Construct a record descriptor from named fields. Duplicate names keep
    /// the last occurrence; fields are sorted by name atom for canonical
    /// identity (declared order is presentation-only).
    pub fn record(&self, fields: &[(&str, TypeId)], strict: bool) -> Result<TypeId, TypeError> {
        let fields = self.normalize_fields(fields);
        if fields.is_empty() {
            return Err(TypeError::EmptyParameterization { kind: "record" });
        }
        let id = RecordShapeId(self.records.intern(RecordShape { fields, strict }));
        Ok(self.intern_key(TypeKey::Record(id)))
    }

    /// Construct a structural-attribute descriptor. Always open: undeclared
    /// attributes never affect membership.
    pub fn has_attrs(&self, fields: &[(&str, TypeId)]) -> Result<TypeId, TypeError> {
        let fields = self.normalize_fields(fields);
        if fields.is_empty() {
            return Err(TypeError::EmptyParameterization {
                kind: "structural type",
            });
        }
        let id = AttrShapeId(self.attrs.intern(AttrShape { fields }));
        Ok(self.intern_key(TypeKey::HasAttrs(id)))
    }

    fn normalize_fields(&self, fields: &[(&str, TypeId)]) -> Vec<FieldInfo> {
        let mut out: Vec<FieldInfo> = Vec::with_capacity(fields.len());
        for &(name, type_id) in fields {
            let name = self.strings.intern(name);
            match out.iter_mut().find(|f| f.name == name) {
                Some(existing) => existing.type_id = type_id,
                None => out.push(FieldInfo { name, type_id }),
            }
        }
        out.sort_unstable_by_key(|f| f.name);
        out
    }

    /// Construct a callable descriptor. The trailing type is the return
    /// type; all preceding types are expected positional parameter types.
    pub fn callable(&self, types: &[TypeId]) -> Result<TypeId, TypeError> {
        let Some((&ret, params)) = types.split_last() else {
            return Err(TypeError::EmptyParameterization { kind: "callable" });
        };
        let shape = CallableShape {
            params: params.to_vec(),
            ret,
        };
        let id = CallableShapeId(self.callables.intern(shape));
        Ok(self.intern_key(TypeKey::Callable(id)))
    }

    /// Construct a comparison descriptor.
    pub fn compare(&self, op: CompareOp, value: Scalar) -> TypeId {
        self.intern_key(TypeKey::Compare(op, value))
    }

    /// Register a predicate descriptor.
    ///
    /// The predicate's own signature must conform to the
    /// `Callable[any, bool]` contract, checked with the same variance rules
    /// as callable membership.
    pub fn satisfies(&self, predicate: Predicate) -> Result<TypeId, TypeError> {
        let mut checker = SubtypeChecker::new(self);
        if !signature_conforms(&mut checker, &predicate.sig, &[TypeId::ANY], TypeId::BOOL) {
            debug!("rejecting predicate with non-conforming signature");
            return Err(TypeError::PredicateContract);
        }
        let mut predicates = self
            .predicates
            .write()
            .expect("predicate table lock poisoned");
        let id = PredicateId(u32::try_from(predicates.len()).expect("predicate table overflow"));
        predicates.push(Arc::new(predicate));
        drop(predicates);
        Ok(self.intern_key(TypeKey::Satisfies(id)))
    }

    /// Payload of an interned type.
    pub fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        let keys = self.keys.read().expect("type table lock poisoned");
        keys.get(id.0 as usize).cloned()
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        let lists = self.lists.read().expect("list table lock poisoned");
        Arc::clone(&lists[id.0 as usize])
    }

    pub fn tuple_shape(&self, id: TupleShapeId) -> Arc<TupleShape> {
        self.tuples.get(id.0)
    }

    pub fn record_shape(&self, id: RecordShapeId) -> Arc<RecordShape> {
        self.records.get(id.0)
    }

    pub fn attr_shape(&self, id: AttrShapeId) -> Arc<AttrShape> {
        self.attrs.get(id.0)
    }

    pub fn callable_shape(&self, id: CallableShapeId) -> Arc<CallableShape> {
        self.callables.get(id.0)
    }

    pub fn class_def(&self, id: ClassId) -> ClassDef {
        let classes = self.classes.read().expect("class table lock poisoned");
        classes[id.0 as usize].clone()
    }

    pub fn predicate(&self, id: PredicateId) -> Arc<Predicate> {
        let predicates = self
            .predicates
            .read()
            .expect("predicate table lock poisoned");
        Arc::clone(&predicates[id.0 as usize])
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}
