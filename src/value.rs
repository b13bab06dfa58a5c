//! Argument and property values
//!
//! The scalar values a markup node can carry. Rendering only ever needs
//! their textual form, plus a special case for booleans in properties.

use std::fmt;

use compact_str::CompactString;

// =============================================================================
// Value
// =============================================================================

/// A positional argument or property value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(CompactString),
    Integer(i128),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
        }
    }
}

/// Integral floats keep a `.0` so `1.0` does not collapse into `1`.
/// Very large and very small magnitudes switch to exponent form with a
/// signed two-digit exponent: `1e+20`, `1.5e-05`.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let abs = x.abs();
    if !x.is_finite() || abs == 0.0 || (1e-4..1e16).contains(&abs) {
        return if x.is_finite() && x.fract() == 0.0 {
            write!(f, "{x:.1}")
        } else {
            write!(f, "{x}")
        };
    }

    let sci = format!("{x:e}");
    match sci.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
            Err(_) => f.write_str(&sci),
        },
        None => f.write_str(&sci),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<CompactString> for Value {
    fn from(s: CompactString) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i.into())
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::from(-7i64).to_string(), "-7");
        assert_eq!(Value::from(99.99).to_string(), "99.99");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_float_exponent_form() {
        assert_eq!(Value::from(1e20).to_string(), "1e+20");
        assert_eq!(Value::from(1e16).to_string(), "1e+16");
        assert_eq!(Value::from(-2.5e17).to_string(), "-2.5e+17");
        assert_eq!(Value::from(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Value::from(1e-100).to_string(), "1e-100");
        // just inside the plain range
        assert_eq!(Value::from(1e15).to_string(), "1000000000000000.0");
        assert_eq!(Value::from(0.0001).to_string(), "0.0001");
        assert_eq!(Value::from(0.0).to_string(), "0.0");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Integer(3));
    }
}
