//! String interning.
//!
//! Field names, attribute names and class names are interned into `Atom`s so
//! that type payloads can be compared and hashed as plain `u32`s. The
//! interner is internally synchronized: all methods take `&self`, so a shared
//! instance can be used from multiple threads.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::RwLock;

/// An interned string handle.
///
/// Two `Atom`s from the same `Interner` are equal iff the strings they were
/// interned from are equal. Ordering follows interning order, not lexical
/// order; sort by resolved string where lexical order matters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(pub u32);

/// Deduplicating string store.
pub struct Interner {
    map: DashMap<Arc<str>, Atom, rustc_hash::FxBuildHasher>,
    strings: RwLock<Vec<Arc<str>>>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            map: DashMap::default(),
            strings: RwLock::new(Vec::new()),
        }
    }

    /// Intern a string, returning a stable handle for it.
    pub fn intern(&self, s: &str) -> Atom {
        if let Some(atom) = self.map.get(s) {
            return *atom;
        }
        let arc: Arc<str> = Arc::from(s);
        let mut strings = self.strings.write().expect("interner lock poisoned");
        // Re-check under the write lock: another thread may have won the race.
        if let Some(atom) = self.map.get(s) {
            return *atom;
        }
        let atom = Atom(u32::try_from(strings.len()).expect("interner overflow"));
        strings.push(Arc::clone(&arc));
        self.map.insert(arc, atom);
        atom
    }

    /// Resolve a handle back to its string.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        let strings = self.strings.read().expect("interner lock poisoned");
        Arc::clone(&strings[atom.0 as usize])
    }

    pub fn len(&self) -> usize {
        self.strings.read().expect("interner lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
