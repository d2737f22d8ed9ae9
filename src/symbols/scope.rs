use crate::base::Name;
use indexmap::IndexMap;

use super::symbol::SymbolId;

/// One stack frame of the scoped symbol table: a name → symbol mapping,
/// insertion-ordered so diagnostics and any future AST-printing walk
/// declarations in the order the author wrote them.
///
/// Trimmed down from a typical parent/children/bindings scope shape: this
/// front end's scopes don't track imports or a child-scope list, only the
/// active bindings.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: IndexMap<Name, SymbolId>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &Name) -> Option<SymbolId> {
        self.bindings.get(name).copied()
    }

    pub fn insert(&mut self, name: Name, id: SymbolId) {
        self.bindings.insert(name, id);
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.bindings.contains_key(name)
    }
}
