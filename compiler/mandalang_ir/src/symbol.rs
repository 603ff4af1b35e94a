//! Symbols: the things a [`crate::scope::Scope`] binds names to.

use crate::arena::{Arena, Id};
use crate::name::Name;
use crate::node::NodeId;
use crate::types::Type;
use crate::value::Value;

pub type SymbolId = Id<Symbol>;

/// What a symbol is bound to. See spec §3.
#[derive(Clone, Debug)]
pub enum SymbolKind {
    /// A fully computed runtime value (top-level bindings, literals, `self`).
    Value(Value),
    /// An unevaluated IR root. Top-level `let`-forms retain their body here so later references
    /// re-evaluate it rather than capturing one frozen value (unused in this design — top-level
    /// `let` stores a `Value` per §4.6 step 4 — but a fragment's internal non-parameter name
    /// bindings, if any, would use this kind).
    Expression(NodeId),
    /// An IR root that denotes a type, pending evaluation by a `type` definition.
    TypeExpression(NodeId),
    /// A resolved type descriptor (prelude primitives, completed `type` definitions).
    Type(Type),
    /// A function parameter: its left-to-right index and a type slot filled in by the solver.
    FnParameter { index: u32, ty: Option<Type> },
    /// The automatic `self` binding inside a function's own scope (§3 invariant 4): its body is
    /// the function's `ResolvedFunctionLit` node, and its type slot is filled in by the solver
    /// once the enclosing function's composite type is known.
    SelfFunction { body: NodeId, ty: Option<Type> },
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: Name,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: Name, kind: SymbolKind) -> Self {
        Symbol { name, kind }
    }
}

/// Arena of symbols. A fragment owns one for the symbols it introduces; the module owns a
/// separate "common pool" for top-level rebindings (`let` and `_`) so those symbols outlive any
/// single fragment (§3).
pub type SymbolPool = Arena<Symbol>;
