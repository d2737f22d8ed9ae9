use crate::base::{Location, Name};
use crate::diagnostics::{Diagnostic, ErrorCode};

use super::scope::Scope;
use super::symbol::{Symbol, SymbolId, SymbolKind};

/// The scoped symbol table: a non-empty stack of case-insensitively-keyed
/// scopes, backed by a single arena of `Symbol`s so `SymbolId`s stay valid
/// across `push`/`pop`.
///
/// The root scope is pushed by [`SymbolTable::new`] and can never be
/// popped — `pop` on a table with only the root scope left is a logic
/// error in the caller (every structured statement that pushes must also
/// pop), so it panics rather than silently doing nothing.
pub struct SymbolTable {
    arena: Vec<Symbol>,
    stack: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            stack: vec![Scope::new()],
        }
    }

    pub fn push(&mut self) {
        self.stack.push(Scope::new());
    }

    pub fn pop(&mut self) {
        assert!(
            self.stack.len() > 1,
            "the root scope must never be popped"
        );
        self.stack.pop();
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.arena[id.index()]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.arena[id.index()]
    }

    /// Insert `name` in the current (innermost) scope.
    ///
    /// Returns the new symbol's id and, when applicable, a diagnostic:
    /// `RedeclarationInSameScope` (error) if `name` already exists in the
    /// current scope, or `ShadowingInOuterScope` (warning) if `name` exists
    /// only in an ancestor scope. The insertion happens either way — a
    /// redeclaration still needs *some* id to attach to the AST node, and a
    /// shadowing declaration is semantically valid.
    pub fn insert_local(
        &mut self,
        name: Name,
        kind: SymbolKind,
        location: Location,
    ) -> (SymbolId, Option<Diagnostic>) {
        let diagnostic = if self.current_scope().contains(&name) {
            Some(Diagnostic::new(
                location,
                ErrorCode::RedeclarationInSameScope,
                format!("`{name}` is already declared in this scope"),
                name.as_str(),
            ))
        } else if self.lookup_above(&name).is_some() {
            Some(Diagnostic::new(
                location,
                ErrorCode::ShadowingInOuterScope,
                format!("`{name}` shadows a declaration in an enclosing scope"),
                name.as_str(),
            ))
        } else {
            None
        };

        let id = SymbolId::new(self.arena.len());
        self.arena.push(Symbol::new(name.clone(), kind, location));
        self.current_scope_mut().insert(name, id);
        (id, diagnostic)
    }

    pub fn lookup_local(&self, name: &Name) -> Option<SymbolId> {
        self.current_scope().get(name)
    }

    /// Walk from the current scope toward the root, returning the first
    /// match.
    pub fn lookup_any(&self, name: &Name) -> Option<SymbolId> {
        self.stack.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Walk from the *parent* of the current scope toward the root,
    /// skipping the current scope. Used to decide whether an insertion
    /// shadows an ancestor.
    pub fn lookup_above(&self, name: &Name) -> Option<SymbolId> {
        self.stack
            .iter()
            .rev()
            .skip(1)
            .find_map(|scope| scope.get(name))
    }

    fn current_scope(&self) -> &Scope {
        self.stack.last().expect("scope stack is never empty")
    }

    fn current_scope_mut(&mut self) -> &mut Scope {
        self.stack.last_mut().expect("scope stack is never empty")
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, Interner};

    fn loc() -> Location {
        Location::new(FileId::new(0), 1, 1)
    }

    #[test]
    fn redeclaration_in_same_scope_is_an_error() {
        let mut interner = Interner::new();
        let mut table = SymbolTable::new();
        let x = interner.intern("x");
        let (_, first) = table.insert_local(x.clone(), SymbolKind::Variable, loc());
        assert!(first.is_none());
        let (_, second) = table.insert_local(x, SymbolKind::Variable, loc());
        assert_eq!(second.unwrap().code, ErrorCode::RedeclarationInSameScope);
    }

    #[test]
    fn shadowing_ancestor_is_a_warning() {
        let mut interner = Interner::new();
        let mut table = SymbolTable::new();
        let x = interner.intern("x");
        table.insert_local(x.clone(), SymbolKind::Variable, loc());
        table.push();
        let (_, diag) = table.insert_local(x, SymbolKind::Variable, loc());
        assert_eq!(diag.unwrap().code, ErrorCode::ShadowingInOuterScope);
    }

    #[test]
    fn lookup_any_walks_toward_root() {
        let mut interner = Interner::new();
        let mut table = SymbolTable::new();
        let x = interner.intern("x");
        let (id, _) = table.insert_local(x.clone(), SymbolKind::Variable, loc());
        table.push();
        assert_eq!(table.lookup_local(&x), None);
        assert_eq!(table.lookup_any(&x), Some(id));
    }

    #[test]
    #[should_panic]
    fn popping_the_root_scope_panics() {
        let mut table = SymbolTable::new();
        table.pop();
    }

    #[test]
    fn distinct_branches_do_not_collide() {
        // Two sibling scopes each declaring the same name is fine.
        let mut interner = Interner::new();
        let mut table = SymbolTable::new();
        let q = interner.intern("q");

        table.push();
        let (_, d1) = table.insert_local(q.clone(), SymbolKind::Variable, loc());
        assert!(d1.is_none());
        table.pop();

        table.push();
        let (_, d2) = table.insert_local(q, SymbolKind::Variable, loc());
        assert!(d2.is_none());
        table.pop();
    }
}
