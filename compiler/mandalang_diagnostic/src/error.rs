use std::fmt;

use crate::ErrorKind;

/// Detail text is capped at this many bytes, matching the fixed-size detail buffer the design
/// this taxonomy is drawn from uses for the offending character/identifier.
pub const MAX_DETAIL_BYTES: usize = 64;

/// A structured pipeline error: a kind, an optional 1-based source line, and optional detail.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MandaError {
    pub kind: ErrorKind,
    pub line: Option<u32>,
    pub detail: Option<String>,
}

impl MandaError {
    pub fn new(kind: ErrorKind) -> Self {
        MandaError { kind, line: None, detail: None }
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let mut detail = detail.into();
        if detail.len() > MAX_DETAIL_BYTES {
            let mut cut = MAX_DETAIL_BYTES;
            while !detail.is_char_boundary(cut) {
                cut -= 1;
            }
            detail.truncate(cut);
        }
        self.detail = Some(detail);
        self
    }
}

impl fmt::Display for MandaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[error] {}", self.kind)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for MandaError {}

pub type Result<T> = std::result::Result<T, MandaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_canonical_error_line() {
        let err = MandaError::new(ErrorKind::OperandsShouldHaveSameType);
        assert_eq!(err.to_string(), "[error] Operands should have same type");
    }

    #[test]
    fn renders_with_detail() {
        let err = MandaError::new(ErrorKind::UnknownName)
            .with_line(3)
            .with_detail("frobnicate");
        assert_eq!(err.to_string(), "[error] Unknown name (frobnicate)");
    }

    #[test]
    fn truncates_overlong_detail() {
        let long = "x".repeat(200);
        let err = MandaError::new(ErrorKind::InvalidCharacter).with_detail(long);
        assert_eq!(err.detail.unwrap().len(), MAX_DETAIL_BYTES);
    }
}
