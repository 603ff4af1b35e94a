//! Mandalang IR - arena-allocated intermediate representation, types, symbols and scopes.
//!
//! This crate holds the data shared by every later pipeline stage (parser, resolver, type
//! solver, evaluator): the [`Arena`]/[`Id`] index-arena primitive, interned [`Name`]s, the
//! [`Type`]/[`CompositeType`] type language, the single-node-variant [`Node`]/[`NodeKind`] IR,
//! [`Symbol`]/[`Scope`], runtime [`Value`]s, and the [`Fragment`] that owns one line's worth of
//! arenas.
//!
//! # Design
//!
//! Every cross-reference (IR-to-IR, IR-to-symbol, symbol-to-scope, type-to-composite) is a
//! `Copy`-able index, never a pointer or a `Box`. A [`Fragment`]'s arenas are append-only; a
//! stage that rewrites a node's `kind` does so in place (same [`node::NodeId`]), so indices
//! captured by an earlier stage stay valid for every later one.

mod arena;
mod fragment;
mod name;
mod node;
mod scope;
mod symbol;
mod types;
mod value;

pub use arena::{Arena, Id};
pub use fragment::{Fragment, FragmentId, FragmentPool};
pub use name::{Name, NameInterner};
pub use node::{ArithOp, CmpOp, Node, NodeId, NodeKind, Param, ResolvedParam};
pub use scope::{lookup, Scope, ScopeId, ScopePool};
pub use symbol::{Symbol, SymbolId, SymbolKind, SymbolPool};
pub use types::{CompositeId, CompositeType, CompositeTypePool, Type, DEFAULT_MAX_FUNCTION_PARAMS};
pub use value::{BuiltinError, BuiltinFn, FunctionBody, FunctionValue, Value};
