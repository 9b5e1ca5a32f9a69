//! Typed option values and the text coercion rules the menu applies to user input.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoercionError;

/// Declared type of an option, fixed when the option is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptionKind {
    Int,
    Float,
    Bool,
    #[default]
    String,
    /// Free text, optionally restricted to a list of allowed values.
    Choice,
}

impl OptionKind {
    /// Value used when an option is registered without a default.
    #[must_use]
    pub fn empty_value(self) -> Value {
        match self {
            OptionKind::Int => Value::Int(0),
            OptionKind::Float => Value::Float(0.0),
            OptionKind::Bool => Value::Bool(false),
            OptionKind::String | OptionKind::Choice => Value::Str(String::new()),
        }
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, OptionKind::Int | OptionKind::Float)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OptionKind::Int => "int",
            OptionKind::Float => "float",
            OptionKind::Bool => "bool",
            OptionKind::String => "string",
            OptionKind::Choice => "choice",
        };
        write!(f, "{label}")
    }
}

impl FromStr for OptionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" => Ok(OptionKind::Int),
            "float" => Ok(OptionKind::Float),
            "bool" => Ok(OptionKind::Bool),
            "string" | "str" => Ok(OptionKind::String),
            "choice" => Ok(OptionKind::Choice),
            other => Err(format!("unknown option type '{other}'")),
        }
    }
}

/// Current value of an option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// True only for the empty string, which the menu treats as "unset".
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{}", float_text(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

// Floats keep a fractional part so "44.0" never reads back as an int.
fn float_text(n: f64) -> String {
    let text = n.to_string();
    if text.chars().all(|c| c.is_ascii_digit() || c == '-') {
        format!("{text}.0")
    } else {
        text
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Convert a raw value to `kind`.
///
/// Text is parsed; values that already have a type are converted when the
/// conversion is lossless (ints widen to floats, integral floats narrow to ints).
///
/// # Errors
///
/// Returns a [`CoercionError`] naming the raw input when it does not fit `kind`.
pub fn coerce(kind: OptionKind, raw: &Value) -> Result<Value, CoercionError> {
    match (kind, raw) {
        (OptionKind::Int, Value::Int(n)) => Ok(Value::Int(*n)),
        (OptionKind::Int, Value::Float(n)) => {
            if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
                Ok(Value::Int(*n as i64))
            } else {
                Err(not_a_number(raw))
            }
        }
        (OptionKind::Int, Value::Bool(b)) => Ok(Value::Int(i64::from(*b))),
        (OptionKind::Float, Value::Float(n)) if n.is_finite() => Ok(Value::Float(*n)),
        (OptionKind::Float, Value::Float(_)) => Err(not_a_number(raw)),
        (OptionKind::Float, Value::Int(n)) => Ok(Value::Float(*n as f64)),
        (OptionKind::Float, Value::Bool(b)) => Ok(Value::Float(f64::from(u8::from(*b)))),
        (OptionKind::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),
        (OptionKind::Bool, Value::Int(n)) => Ok(Value::Bool(*n != 0)),
        (OptionKind::Bool, Value::Float(n)) => Ok(Value::Bool(*n != 0.0)),
        (_, Value::Str(text)) => coerce_text(kind, text),
        (OptionKind::String | OptionKind::Choice, other) => Ok(Value::Str(other.to_string())),
    }
}

/// Parse user-entered text as a value of `kind`.
///
/// # Errors
///
/// Returns [`CoercionError::NotANumber`] or [`CoercionError::NotABool`] when the
/// text cannot be read as the requested type.
pub fn coerce_text(kind: OptionKind, text: &str) -> Result<Value, CoercionError> {
    match kind {
        OptionKind::Int => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| CoercionError::NotANumber {
                input: text.to_string(),
            }),
        // `nan` and `inf` parse as f64 but have no stable text form.
        OptionKind::Float => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Float(n)),
            _ => Err(CoercionError::NotANumber {
                input: text.to_string(),
            }),
        },
        OptionKind::Bool => parse_bool(text).map(Value::Bool),
        OptionKind::String | OptionKind::Choice => Ok(Value::Str(text.to_string())),
    }
}

fn parse_bool(text: &str) -> Result<bool, CoercionError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "off" | "0" => Ok(false),
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        _ => Err(CoercionError::NotABool {
            input: text.to_string(),
        }),
    }
}

fn not_a_number(raw: &Value) -> CoercionError {
    CoercionError::NotANumber {
        input: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(OptionKind::Int, "5", Value::Int(5))]
    #[case(OptionKind::Int, " -12 ", Value::Int(-12))]
    #[case(OptionKind::Float, "60.5", Value::Float(60.5))]
    #[case(OptionKind::Float, "3", Value::Float(3.0))]
    #[case(OptionKind::Bool, "yes", Value::Bool(true))]
    #[case(OptionKind::Bool, "False", Value::Bool(false))]
    #[case(OptionKind::Bool, "", Value::Bool(false))]
    #[case(OptionKind::String, "  keep spaces ", Value::Str("  keep spaces ".into()))]
    #[case(OptionKind::Choice, "green", Value::Str("green".into()))]
    fn coerce_text_accepts(#[case] kind: OptionKind, #[case] text: &str, #[case] expected: Value) {
        assert_eq!(coerce_text(kind, text), Ok(expected));
    }

    #[rstest]
    #[case(OptionKind::Int, "abc")]
    #[case(OptionKind::Int, "1.5")]
    #[case(OptionKind::Float, "one")]
    #[case(OptionKind::Float, "nan")]
    #[case(OptionKind::Float, "inf")]
    #[case(OptionKind::Float, "-Infinity")]
    #[case(OptionKind::Bool, "maybe")]
    fn coerce_text_rejects(#[case] kind: OptionKind, #[case] text: &str) {
        let err = coerce_text(kind, text).expect_err("input should be rejected");
        assert!(err.to_string().contains(text), "message should name input: {err}");
    }

    #[test]
    fn coerce_converts_typed_values_losslessly() {
        assert_eq!(coerce(OptionKind::Float, &Value::Int(4)), Ok(Value::Float(4.0)));
        assert_eq!(coerce(OptionKind::Int, &Value::Float(44.0)), Ok(Value::Int(44)));
        assert!(coerce(OptionKind::Int, &Value::Float(44.5)).is_err());
        assert!(coerce(OptionKind::Float, &Value::Float(f64::NAN)).is_err());
        assert!(coerce(OptionKind::Float, &Value::Float(f64::INFINITY)).is_err());
        assert_eq!(coerce(OptionKind::Bool, &Value::Int(0)), Ok(Value::Bool(false)));
        assert_eq!(
            coerce(OptionKind::String, &Value::Float(2.0)),
            Ok(Value::Str("2.0".into()))
        );
    }

    #[test]
    fn float_display_keeps_fraction() {
        assert_eq!(Value::Float(44.0).to_string(), "44.0");
        assert_eq!(Value::Float(60.5).to_string(), "60.5");
        assert_eq!(Value::Float(-3.0).to_string(), "-3.0");
    }

    #[test]
    fn kind_parses_from_names() {
        assert_eq!("INT".parse::<OptionKind>(), Ok(OptionKind::Int));
        assert_eq!("str".parse::<OptionKind>(), Ok(OptionKind::String));
        assert!("complex".parse::<OptionKind>().is_err());
        assert_eq!(OptionKind::Choice.to_string(), "choice");
    }

    #[test]
    fn empty_values_match_kind() {
        assert_eq!(OptionKind::Int.empty_value(), Value::Int(0));
        assert_eq!(OptionKind::Bool.empty_value(), Value::Bool(false));
        assert!(OptionKind::Choice.empty_value().is_unset());
    }

    fn round_trips(kind: OptionKind, value: Value) {
        assert_eq!(coerce_text(kind, &value.to_string()), Ok(value));
    }

    proptest! {
        #[test]
        fn int_values_round_trip(n in any::<i64>()) {
            round_trips(OptionKind::Int, Value::Int(n));
        }

        #[test]
        fn float_values_round_trip(n in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            round_trips(OptionKind::Float, Value::Float(n));
        }

        #[test]
        fn bool_values_round_trip(b in any::<bool>()) {
            round_trips(OptionKind::Bool, Value::Bool(b));
        }

        #[test]
        fn string_values_round_trip(s in ".*") {
            round_trips(OptionKind::String, Value::Str(s));
        }
    }
}
