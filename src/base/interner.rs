use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// An interned, case-preserving identifier.
///
/// COSY identifiers are matched case-insensitively everywhere they are
/// looked up, but diagnostics and generated output must echo the spelling
/// the author actually wrote. `Name` keeps both: the original
/// spelling for display, and a case-folded key for comparison/hashing so it
/// can be used directly as a scope-table key.
#[derive(Debug, Clone)]
pub struct Name {
    spelling: Rc<str>,
    key: Rc<str>,
}

impl Name {
    fn new(spelling: Rc<str>) -> Self {
        let key: Rc<str> = spelling.to_ascii_lowercase().into();
        Self { spelling, key }
    }

    /// The identifier exactly as written in source.
    pub fn as_str(&self) -> &str {
        &self.spelling
    }

    /// The case-folded form used for comparison and hashing.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Name {}

impl std::hash::Hash for Name {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling)
    }
}

/// Deduplicates identifier spellings so equal identifiers share one
/// allocation. Keys on the original spelling (not the case-folded form) so
/// two differently cased spellings of the same identifier are both
/// preserved for display.
#[derive(Debug, Default)]
pub struct Interner {
    strings: HashSet<Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            strings: HashSet::new(),
        }
    }

    pub fn intern(&mut self, text: &str) -> Name {
        let spelling = match self.strings.get(text) {
            Some(existing) => Rc::clone(existing),
            None => {
                let rc: Rc<str> = Rc::from(text);
                self.strings.insert(Rc::clone(&rc));
                rc
            }
        };
        Name::new(spelling)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_compare_case_insensitively() {
        let mut interner = Interner::new();
        let a = interner.intern("Total");
        let b = interner.intern("TOTAL");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Total");
        assert_eq!(b.as_str(), "TOTAL");
    }

    #[test]
    fn interning_deduplicates_identical_spellings() {
        let mut interner = Interner::new();
        interner.intern("x");
        interner.intern("x");
        assert_eq!(interner.len(), 1);
    }
}
