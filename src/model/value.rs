//! Model value representation
//!
//! Operands arrive as literal strings. [`Value::from_literal`] coerces the ones
//! that read as numbers so that heaps order `10` after `9`, and leaves
//! everything else as text.
//!
//! # Ordering
//!
//! Values have a total order used by the heap: numbers first, compared
//! numerically across `Int` and `Float`, then strings compared
//! lexicographically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single element stored in a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Coerce an operand literal into a value
    pub fn from_literal(literal: &str) -> Self {
        let literal = literal.trim();
        if let Ok(n) = literal.parse::<i64>() {
            return Value::Int(n);
        }
        // f64 parsing also accepts "inf" and "NaN", which are identifiers here
        if literal.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
        {
            if let Ok(x) = literal.parse::<f64>() {
                if x.is_finite() {
                    return Value::Float(x);
                }
            }
        }
        Value::Str(literal.to_string())
    }

    /// Get the integer value, returns None if not an Int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Str(_) => None,
        }
    }

    /// Total order: numbers before strings
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Str(_), _) => Ordering::Greater,
            (_, Value::Str(_)) => Ordering::Less,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::from_literal("10"), Value::Int(10));
        assert_eq!(Value::from_literal(" -3 "), Value::Int(-3));
        assert_eq!(Value::from_literal("2.5"), Value::Float(2.5));
        assert_eq!(Value::from_literal("apple"), Value::Str("apple".to_string()));
    }

    #[test]
    fn test_special_floats_stay_text() {
        assert_eq!(Value::from_literal("NaN"), Value::Str("NaN".to_string()));
        assert_eq!(Value::from_literal("inf"), Value::Str("inf".to_string()));
        assert_eq!(Value::from_literal("1e999"), Value::Str("1e999".to_string()));
    }

    #[test]
    fn test_total_order() {
        let mut values = vec![
            Value::Str("b".to_string()),
            Value::Int(10),
            Value::Float(9.5),
            Value::Str("a".to_string()),
            Value::Int(-1),
        ];
        values.sort_by(|a, b| a.total_cmp(b));
        let shown: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(shown, vec!["-1", "9.5", "10", "a", "b"]);
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Value::Int(4).as_int(), Some(4));
        assert_eq!(Value::Float(4.0).as_int(), None);
        assert!(Value::Float(4.0).is_numeric());
        assert!(!Value::Str("4x".to_string()).is_numeric());
    }
}
