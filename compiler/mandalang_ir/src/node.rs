//! The single-node-variant IR shared by the parser, resolver, type solver and evaluator.
//!
//! A [`Node`] is a fixed `{ kind, line, ty }` record stored in a [`crate::Arena`] and addressed
//! by [`NodeId`]. Pipeline stages rewrite `kind` in place — the node's identity and position in
//! the arena never change, so a [`NodeId`] captured before resolution is still valid after
//! typing. This is the idiomatic-Rust rendition of "a mutable discriminant on a fixed node shape"
//! (spec §9): no raw pointers, no unsafe reinterpretation of a payload union.

use crate::arena::Id;
use crate::name::Name;
use crate::scope::ScopeId;
use crate::symbol::SymbolId;
use crate::types::Type;

pub type NodeId = Id<Node>;

/// Arithmetic operator family, shared by the generic and the monomorphic IR kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Comparison operator family, shared by the generic and the monomorphic IR kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CmpOp {
    EqualsTo,
    NotEqualsTo,
    GreaterThan,
    GreaterOrEquals,
    LessThan,
    LessOrEquals,
}

/// A single IR node. `ty` starts `None` and is filled in by the type solver (§4.4); once solved,
/// invariant 1 (§8) requires every reachable node to have `ty.is_some()`.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub line: u32,
    pub ty: Option<Type>,
}

impl Node {
    pub fn new(kind: NodeKind, line: u32) -> Self {
        Node { kind, line, ty: None }
    }
}

/// A function literal's parameter: a declared name plus a type-expression child node, resolved
/// in turn by the resolver and solved by the type solver.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: Name,
    pub type_expr: NodeId,
}

/// A function literal's parameter once the resolver has bound it to a `fn_parameter` symbol.
#[derive(Clone, Debug)]
pub struct ResolvedParam {
    pub symbol: SymbolId,
    pub type_expr: NodeId,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    // -- Leaves --
    IntLiteral(i64),
    FloatLiteral(f64),
    /// An unresolved identifier occurrence. Must not survive the resolver (invariant 1).
    Name(Name),
    /// A resolved identifier occurrence: a direct index to its defining symbol, plus the
    /// function-nesting depth computed by the resolver for `fn_parameter` occurrences (always
    /// `0` for non-parameter symbols).
    ResolvedName { symbol: SymbolId, depth: u32 },

    // -- Generic operators (pre-solve) --
    Negate(NodeId),
    BooleanNot(NodeId),
    Arith(ArithOp, NodeId, NodeId),
    Compare(CmpOp, NodeId, NodeId),
    /// Short-circuit `&&`; never rewritten by the solver.
    BooleanAnd(NodeId, NodeId),
    /// Short-circuit `||`; never rewritten by the solver.
    BooleanOr(NodeId, NodeId),

    // -- Monomorphic operators (post-solve) --
    IntegerNegate(NodeId),
    FloatingPointNegate(NodeId),
    IntegerArith(ArithOp, NodeId, NodeId),
    FloatingPointArith(ArithOp, NodeId, NodeId),
    IntegerCompare(CmpOp, NodeId, NodeId),
    FloatingPointCompare(CmpOp, NodeId, NodeId),
    BooleanEqualsTo(NodeId, NodeId),
    BooleanNotEqualsTo(NodeId, NodeId),

    // -- Structural --
    Subexpression(NodeId),
    Conditional { cond: NodeId, then_branch: NodeId, else_branch: NodeId },

    /// `fn (T1 x1, ...) -> R body`, before resolution.
    FunctionLit { params: Vec<Param>, result_ty: NodeId, body: NodeId },
    /// After resolution: parameters bound to `fn_parameter` symbols, plus the scope allocated
    /// for this function's body (carrying the automatic `self` binding, §3 invariant 4) and the
    /// `self` symbol itself, so the solver can fill its type without re-deriving it by name.
    ResolvedFunctionLit {
        params: Vec<ResolvedParam>,
        result_ty: NodeId,
        body: NodeId,
        scope: ScopeId,
        self_symbol: SymbolId,
    },

    /// `callee(args...)`, before resolution.
    FunctionCall { callee: NodeId, args: Vec<NodeId> },
    /// After resolution: callee and every argument have themselves been resolved.
    ResolvedFunctionCall { callee: NodeId, args: Vec<NodeId> },

    // -- Type expressions --
    TypeFunction { params: Vec<NodeId>, result: NodeId },
    TypeVector { elem: NodeId },
}

impl NodeKind {
    /// True for the unresolved leaf/structural kinds that invariant 1 (§8) forbids past the
    /// resolver.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, NodeKind::Name(_) | NodeKind::FunctionLit { .. } | NodeKind::FunctionCall { .. })
    }

    /// True for the generic numeric/comparison kinds that invariant 2 (§8) forbids past the
    /// solver (`&&`/`||` are intentionally excluded: they are never rewritten, per §4.4).
    pub fn is_generic_operator(&self) -> bool {
        matches!(self, NodeKind::Negate(_) | NodeKind::Arith(..) | NodeKind::Compare(..))
    }
}
