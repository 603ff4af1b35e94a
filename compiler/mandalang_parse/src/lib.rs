//! Recursive-descent parser turning one line of source text into the generic, pre-resolution IR.
//!
//! The grammar is split by production family, mirroring the precedence ladder in the language
//! reference: [`grammar_top`] dispatches `let`/`type`/bare-expression lines, [`grammar_expr`]
//! climbs from `expr` down to `primary`, and [`grammar_type`] parses type expressions wherever
//! they're needed (parameter headers, `type` definitions, `fn`/`vector` type syntax).

mod grammar_expr;
mod grammar_top;
mod grammar_type;
mod parser;

pub use grammar_top::{parse_top_level, ParsedTop};
pub use parser::Parser;
