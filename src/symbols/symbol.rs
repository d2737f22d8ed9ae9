use crate::base::{Location, Name};
use crate::semantic::types::DataType;

/// An index into a [`crate::symbols::SymbolTable`]'s symbol arena. Cheap to
/// copy; AST nodes that bind a name (variable/function/procedure
/// declarations, and resolved identifier references) carry a `SymbolId`
/// rather than the `Symbol` itself, so the mutable record lives in exactly
/// one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// What role a name plays. `Declared` is the transient state before a
/// variable has been given a value, or before a function's return slot has
/// been assigned; every other kind is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Declared,
    Variable,
    Array,
    Parameter,
    Procedure,
    Function,
}

/// A declared name's full record: its spelling, role, parameter count, type,
/// and where it was declared.
///
/// The declaration site is recorded as a [`Location`] rather than a live
/// back-reference to the owning AST node: the node that declares a name
/// instead stores the name's `SymbolId` forward, so lookups only ever
/// travel node → symbol, never the other way around, and nothing in the
/// table needs to borrow into the AST it was built alongside. `kind`,
/// `arity`, and `data_type` are mutated in place as the parser and later
/// semantic passes refine them.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: Name,
    pub kind: SymbolKind,
    pub arity: usize,
    pub data_type: DataType,
    pub declared_at: Location,
}

impl Symbol {
    pub fn new(name: Name, kind: SymbolKind, declared_at: Location) -> Self {
        Self {
            name,
            kind,
            arity: 0,
            data_type: DataType::Unknown,
            declared_at,
        }
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }
}
