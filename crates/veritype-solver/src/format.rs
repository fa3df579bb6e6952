//! Human-readable rendering of types for diagnostics.

use crate::intern::TypeInterner;
use crate::types::{TypeId, TypeKey};

/// Formats interned types as `Union[int, str]`, `Tuple[int, ...]`,
/// `Record[x: int]`, `Callable[int, bool]`, `Ge[10]` and so on; nominal
/// classes render as their bare name.
pub struct TypeFormatter<'a> {
    db: &'a TypeInterner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a TypeInterner) -> Self {
        Self { db }
    }

    pub fn format(&self, ty: TypeId) -> String {
        let Some(key) = self.db.lookup(ty) else {
            return "<unknown>".to_string();
        };
        match key {
            TypeKey::Class(id) => self.db.resolve_atom(self.db.class_def(id).name).to_string(),
            TypeKey::Union(list) => format!("Union[{}]", self.format_members(list)),
            TypeKey::Intersection(list) => {
                format!("Intersection[{}]", self.format_members(list))
            }
            TypeKey::Tuple(id) => {
                let shape = self.db.tuple_shape(id);
                let mut parts: Vec<String> =
                    shape.elems.iter().map(|&e| self.format(e)).collect();
                if !shape.strict {
                    parts.push("...".to_string());
                }
                format!("Tuple[{}]", parts.join(", "))
            }
            TypeKey::Record(id) => {
                let shape = self.db.record_shape(id);
                let mut parts: Vec<String> = shape
                    .fields
                    .iter()
                    .map(|f| {
                        format!(
                            "{}: {}",
                            self.db.resolve_atom(f.name),
                            self.format(f.type_id)
                        )
                    })
                    .collect();
                if !shape.strict {
                    parts.push("...".to_string());
                }
                format!("Record[{}]", parts.join(", "))
            }
            TypeKey::HasAttrs(id) => {
                let shape = self.db.attr_shape(id);
                let parts: Vec<String> = shape
                    .fields
                    .iter()
                    .map(|f| {
                        format!(
                            "{}: {}",
                            self.db.resolve_atom(f.name),
                            self.format(f.type_id)
                        )
                    })
                    .collect();
                format!("HasAttrs[{}]", parts.join(", "))
            }
            TypeKey::Callable(id) => {
                let shape = self.db.callable_shape(id);
                let mut parts: Vec<String> =
                    shape.params.iter().map(|&p| self.format(p)).collect();
                parts.push(self.format(shape.ret));
                format!("Callable[{}]", parts.join(", "))
            }
            TypeKey::Compare(op, value) => format!("{}[{}]", op.name(), value),
            TypeKey::Satisfies(_) => "Satisfies[<predicate>]".to_string(),
        }
    }

    fn format_members(&self, list: crate::types::TypeListId) -> String {
        self.db
            .type_list(list)
            .iter()
            .map(|&m| self.format(m))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
