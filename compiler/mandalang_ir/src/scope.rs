//! Lexical scopes: a name-to-symbol mapping chained to an outer scope.

use rustc_hash::FxHashMap;

use crate::arena::{Arena, Id};
use crate::name::Name;
use crate::symbol::SymbolId;

pub type ScopeId = Id<Scope>;

#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, SymbolId>,
    pub parent: Option<ScopeId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Scope { bindings: FxHashMap::default(), parent }
    }

    pub fn local(&self, name: Name) -> Option<SymbolId> {
        self.bindings.get(&name).copied()
    }

    /// Binds `name` to `symbol`, failing if `name` is already bound locally.
    pub fn define(&mut self, name: Name, symbol: SymbolId) -> Result<(), ()> {
        if self.bindings.contains_key(&name) {
            return Err(());
        }
        self.bindings.insert(name, symbol);
        Ok(())
    }

    /// Replaces the local binding of `name`, or inserts it if absent. Used for top-level
    /// `let`/`type` redefinition (§4.6): the caller mutates the existing symbol's payload in
    /// place so existing IR that resolved to it observes the change, then calls `rebind` only
    /// if no symbol existed yet.
    pub fn rebind(&mut self, name: Name, symbol: SymbolId) {
        self.bindings.insert(name, symbol);
    }

    /// Copies every binding from `other` into `self`, failing on the first local duplicate
    /// (module-import semantics, §3).
    pub fn import_all(&mut self, other: &Scope) -> Result<(), Name> {
        for (&name, &symbol) in &other.bindings {
            if self.bindings.contains_key(&name) {
                return Err(name);
            }
            self.bindings.insert(name, symbol);
        }
        Ok(())
    }
}

/// Arena of scopes, one per fragment (plus the module's single persistent global scope).
pub type ScopePool = Arena<Scope>;

/// Walks outward from `start`, looking up `name` in each scope until found or the chain ends.
pub fn lookup(pool: &ScopePool, start: ScopeId, name: Name) -> Option<SymbolId> {
    let mut current = Some(start);
    while let Some(id) = current {
        let scope = &pool[id];
        if let Some(symbol) = scope.local(name) {
            return Some(symbol);
        }
        current = scope.parent;
    }
    None
}
