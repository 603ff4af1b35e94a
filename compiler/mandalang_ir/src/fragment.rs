//! A fragment: the IR produced by compiling one input line.
//!
//! A fragment owns only the node arena its own IR needs, plus its source text. It is created
//! fresh for every line (§4.6), mutated in place while the pipeline runs, and then either
//! discarded (on any stage failure) or retained forever inside the owning [`crate::Module`] (on
//! a successful definition). Fragments are never mutated after acceptance.
//!
//! Symbols, scopes, and composite types are *not* fragment-owned: a `let`/`type` definition's
//! symbol must outlive the fragment that introduced it (later fragments resolve names and
//! compare types against it), and a function's inner scope must chain up to the module's single
//! persistent global scope. All three live in pools owned by `Module` and shared across every
//! fragment for the module's lifetime; the resolver and solver take those pools as separate
//! arguments alongside the fragment being processed.

use crate::arena::{Arena, Id};
use crate::node::{Node, NodeId};

pub struct Fragment {
    pub source: String,
    pub nodes: Arena<Node>,
    /// The root node produced by the parser, once parsing succeeds.
    pub root: Option<NodeId>,
}

impl Fragment {
    pub fn new(source: impl Into<String>) -> Self {
        Fragment { source: source.into(), nodes: Arena::new(), root: None }
    }

    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        self.nodes.alloc(node)
    }
}

/// A handle into the module's pool of fragments (§3). A function value's body is addressed as
/// `(FragmentId, NodeId)` rather than a bare `NodeId` so a closure created on one input line
/// stays resolvable once evaluation has moved on to a later line's fragment.
pub type FragmentId = Id<Fragment>;

/// Every fragment the module has ever parsed, appended to for the module's whole lifetime (§3):
/// a definition's fragment must stay reachable for as long as its bound symbol is, and since the
/// pool never frees a slot individually, allocating eagerly for every line — including a bare
/// expression that turns out not to be retained by any symbol — costs a little unused memory but
/// never invalidates a `FragmentId` handed out earlier.
pub type FragmentPool = Arena<Fragment>;
