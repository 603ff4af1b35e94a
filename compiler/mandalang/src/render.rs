//! Canonical textual rendering of values and types (§6): `true`/`false` for booleans, decimal for
//! numbers (doubles always carry at least one fractional digit), and the function's type for
//! functions.

use std::fmt::Write as _;

use mandalang_ir::{CompositeTypePool, Type, Value};

pub(crate) fn render_value(value: &Value, composites: &CompositeTypePool) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => render_float(*f),
        Value::Boolean(b) => b.to_string(),
        Value::Function(func) => composites.display(func.ty),
    }
}

pub(crate) fn render_type(ty: Type, composites: &CompositeTypePool) -> String {
    composites.display(ty)
}

/// Rust's `Display` for `f64` omits the fractional part for whole numbers (`1.0` prints as `1`);
/// the surface language always shows at least one fractional digit for doubles, so whole values
/// are forced to one decimal place and everything else uses the default formatting.
fn render_float(f: f64) -> String {
    let mut buf = String::new();
    if f.is_finite() && f.fract() == 0.0 {
        let _ = write!(buf, "{f:.1}");
    } else {
        let _ = write!(buf, "{f}");
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_renders_as_decimal() {
        assert_eq!(render_value(&Value::Integer(-7), &CompositeTypePool::new()), "-7");
    }

    #[test]
    fn whole_float_keeps_a_fractional_digit() {
        assert_eq!(render_value(&Value::Float(2.0), &CompositeTypePool::new()), "2.0");
    }

    #[test]
    fn fractional_float_renders_as_is() {
        assert_eq!(render_value(&Value::Float(2.5), &CompositeTypePool::new()), "2.5");
    }

    #[test]
    fn boolean_renders_lowercase() {
        assert_eq!(render_value(&Value::Boolean(true), &CompositeTypePool::new()), "true");
        assert_eq!(render_value(&Value::Boolean(false), &CompositeTypePool::new()), "false");
    }

    #[test]
    fn infinite_float_uses_default_display() {
        assert_eq!(render_value(&Value::Float(f64::INFINITY), &CompositeTypePool::new()), "inf");
    }
}
