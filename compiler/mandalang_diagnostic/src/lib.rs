//! Mandalang Diagnostic - shared error taxonomy for every pipeline stage.
//!
//! This crate is deliberately small: a phase-grouped [`ErrorKind`] enumeration and a
//! [`MandaError`] envelope carrying a kind, an optional line number, and optional detail text.
//! There is no pretty-printer, no terminal color, no SARIF/JSON emitter here — formatting beyond
//! the canonical `[error] <message>` line is a collaborator's concern, not this crate's.

mod error;
mod error_kind;

pub use error::{MandaError, Result, MAX_DETAIL_BYTES};
pub use error_kind::ErrorKind;
