//! Mandalang engine: the persistent [`Module`], its prelude and configuration, and the
//! [`Engine`] façade a host embeds.
//!
//! This crate wires the four pipeline crates (`mandalang_lexer`, `mandalang_parse`,
//! `mandalang_resolve`, `mandalang_types`, `mandalang_eval`) into the per-line algorithm of §4.6:
//! parse a fragment, resolve and solve it against the module's shared symbol/scope pools,
//! evaluate bare expressions immediately, and retain a definition's fragment forever so its
//! bound value or type stays valid for every later line.

mod engine;
mod limits;
mod module;
mod outcome;
mod prelude;
mod render;

pub use engine::Engine;
pub use limits::Limits;
pub use module::Module;
pub use outcome::{Binding, Outcome};

pub use mandalang_diagnostic::{ErrorKind, MandaError, Result};
pub use mandalang_ir::{FunctionValue, Type, Value};
