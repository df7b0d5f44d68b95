// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolved configuration values.
//!
//! Raw property text is always a string, but resolution may yield something
//! richer: `${count}` whose raw text is `#{21*2}` resolves to the integer 42, and
//! `#{split("a,b", ",")}` resolves to a sequence. [`Value`] carries whatever the
//! resolver produced, and [`FromValue`] converts it into the caller's type.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A resolved configuration value.
///
/// Converting a value to text (its [`Display`](fmt::Display) form) is what the
/// template engine does when a value is spliced into surrounding text.
/// Sequences are rendered comma-joined so they survive a round trip through
/// `split`.
///
/// # Examples
///
/// ```
/// use extcfg::domain::Value;
///
/// assert_eq!(Value::Int(42).to_string(), "42");
/// assert_eq!(Value::Float(7.5).to_string(), "7.5");
/// assert_eq!(Value::Float(5.0).to_string(), "5.0");
/// let seq = Value::Seq(vec![Value::from("dev"), Value::from("test")]);
/// assert_eq!(seq.to_string(), "dev,test");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// No value; renders as the empty string.
    #[default]
    Empty,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
}

/// The shape a caller asks a value to be coerced to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Textual form.
    String,
    /// Boolean, accepting `true/yes/on/1` and `false/no/off/0`.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// Sequence; text is split on `,`.
    Seq,
}

impl Value {
    /// Returns the string slice if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value is textual.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// A short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Seq(_) => "sequence",
        }
    }

    /// Infers a scalar from raw property text.
    ///
    /// `true`/`false` become booleans, decimal integers become `Int`, decimal
    /// numbers with a fraction or exponent become `Float`, and everything else
    /// stays a string.
    ///
    /// ```
    /// use extcfg::domain::Value;
    ///
    /// assert_eq!(Value::infer("8080"), Value::Int(8080));
    /// assert_eq!(Value::infer("2.5"), Value::Float(2.5));
    /// assert_eq!(Value::infer("true"), Value::Bool(true));
    /// assert_eq!(Value::infer("inf"), Value::from("inf"));
    /// ```
    pub fn infer(raw: &str) -> Value {
        match raw {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Int(n);
        }
        let numeric = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
            && raw.chars().any(|c| c.is_ascii_digit());
        if numeric {
            if let Ok(f) = raw.parse::<f64>() {
                return Value::Float(f);
            }
        }
        Value::String(raw.to_string())
    }

    /// Coerces this value to the requested kind.
    ///
    /// `key` names the property or expression for error messages.
    pub fn coerce(self, kind: ValueKind, key: &str) -> Result<Value> {
        Ok(match kind {
            ValueKind::String => Value::String(self.to_string()),
            ValueKind::Bool => Value::Bool(bool::from_value(self, key)?),
            ValueKind::Int => Value::Int(i64::from_value(self, key)?),
            ValueKind::Float => Value::Float(f64::from_value(self, key)?),
            ValueKind::Seq => Value::Seq(Vec::<Value>::from_value(self, key)?),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            // `{:?}` keeps the fraction, so `5.0` reads back as a float
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => f.write_str(s),
            Value::Seq(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

/// Conversion from a resolved [`Value`] into a caller's type.
///
/// `key` names what was resolved and is only used in error messages.
pub trait FromValue: Sized {
    /// Converts `value`, failing with [`ConfigError::TypeConversion`].
    fn from_value(value: Value, key: &str) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value, _key: &str) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for String {
    fn from_value(value: Value, _key: &str) -> Result<Self> {
        Ok(match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

impl FromValue for bool {
    fn from_value(value: Value, key: &str) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Int(n) => Ok(n != 0),
            Value::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => s
                    .parse::<bool>()
                    .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
            },
            other => Err(ConfigError::conversion(
                key,
                "bool",
                format!("cannot convert {} to a boolean", other.type_name()),
            )),
        }
    }
}

macro_rules! impl_from_value_for_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: Value, key: &str) -> Result<Self> {
                    match value {
                        Value::Int(n) => <$t>::try_from(n).map_err(|e| ConfigError::TypeConversion {
                            key: key.to_string(),
                            target_type: stringify!($t).to_string(),
                            source: Box::new(e),
                        }),
                        Value::String(s) => s
                            .parse::<$t>()
                            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
                        other => Err(ConfigError::conversion(
                            key,
                            stringify!($t),
                            format!("cannot convert {} to an integer", other.type_name()),
                        )),
                    }
                }
            }
        )*
    };
}

impl_from_value_for_int!(i16, i32, i64, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value, key: &str) -> Result<Self> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(n) => Ok(n as f64),
            Value::String(s) => s
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
            other => Err(ConfigError::conversion(
                key,
                "f64",
                format!("cannot convert {} to a float", other.type_name()),
            )),
        }
    }
}

/// Integers are read as milliseconds, matching the `time.*` expression constants.
impl FromValue for Duration {
    fn from_value(value: Value, key: &str) -> Result<Self> {
        let millis = u64::from_value(value, key)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Sequences convert element-wise; text is split on `,`, and empty text is an empty list.
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value, key: &str) -> Result<Self> {
        match value {
            Value::Seq(items) => items.into_iter().map(|v| T::from_value(v, key)).collect(),
            Value::Empty => Ok(Vec::new()),
            Value::String(s) if s.is_empty() => Ok(Vec::new()),
            Value::String(s) => s
                .split(',')
                .map(|part| T::from_value(Value::String(part.trim().to_string()), key))
                .collect(),
            scalar => Ok(vec![T::from_value(scalar, key)?]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Empty.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(-0.25).to_string(), "-0.25");
        assert_eq!(Value::from("text").to_string(), "text");
    }

    #[test]
    fn test_display_sequence() {
        let value = Value::from(vec!["prod", "live"]);
        assert_eq!(value.to_string(), "prod,live");
    }

    #[test]
    fn test_whole_float_text_stays_float() {
        for x in [5.0, -3.0, 1e20, 0.1] {
            assert_eq!(Value::infer(&Value::Float(x).to_string()), Value::Float(x));
        }
    }

    #[test]
    fn test_infer() {
        assert_eq!(Value::infer("42"), Value::Int(42));
        assert_eq!(Value::infer("-1.5e3"), Value::Float(-1500.0));
        assert_eq!(Value::infer("false"), Value::Bool(false));
        assert_eq!(Value::infer("localhost"), Value::from("localhost"));
        assert_eq!(Value::infer(""), Value::from(""));
        assert_eq!(Value::infer("1.2.3"), Value::from("1.2.3"));
        assert_eq!(Value::infer("-"), Value::from("-"));
    }

    #[test]
    fn test_bool_variants() {
        for val in ["true", "True", "yes", "ON", "1"] {
            assert!(bool::from_value(Value::from(val), "k").unwrap(), "{}", val);
        }
        for val in ["false", "No", "off", "0"] {
            assert!(!bool::from_value(Value::from(val), "k").unwrap(), "{}", val);
        }
        assert!(bool::from_value(Value::from("maybe"), "k").is_err());
        assert!(bool::from_value(Value::Bool(true), "k").unwrap());
    }

    #[test]
    fn test_int_conversion() {
        assert_eq!(i32::from_value(Value::Int(42), "k").unwrap(), 42);
        assert_eq!(i64::from_value(Value::from("-42"), "k").unwrap(), -42);
        assert!(u32::from_value(Value::Int(-1), "k").is_err());
        assert!(i32::from_value(Value::from("3.14"), "k").is_err());
        assert!(i32::from_value(Value::Float(1.0), "k").is_err());
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(f64::from_value(Value::Float(3.5), "k").unwrap(), 3.5);
        assert_eq!(f64::from_value(Value::Int(2), "k").unwrap(), 2.0);
        assert_eq!(f64::from_value(Value::from("2.25"), "k").unwrap(), 2.25);
        assert!(f64::from_value(Value::from("abc"), "k").is_err());
    }

    #[test]
    fn test_string_conversion_of_non_string() {
        assert_eq!(String::from_value(Value::Int(7), "k").unwrap(), "7");
    }

    #[test]
    fn test_duration_conversion() {
        assert_eq!(
            Duration::from_value(Value::Int(1500), "k").unwrap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_vec_conversion() {
        let seq = Value::from(vec!["a", "b"]);
        assert_eq!(
            Vec::<String>::from_value(seq, "k").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            Vec::<i32>::from_value(Value::from("1, 2,3"), "k").unwrap(),
            vec![1, 2, 3]
        );
        assert!(Vec::<String>::from_value(Value::from(""), "k")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_coerce() {
        assert_eq!(
            Value::from("8080").coerce(ValueKind::Int, "k").unwrap(),
            Value::Int(8080)
        );
        assert_eq!(
            Value::Int(1).coerce(ValueKind::String, "k").unwrap(),
            Value::from("1")
        );
        assert!(Value::from("x").coerce(ValueKind::Float, "k").is_err());
    }

    #[test]
    fn test_parse_through_string() {
        let text = String::from_value(Value::from("127.0.0.1"), "k").unwrap();
        let ip: IpAddr = text.parse().unwrap();
        assert_eq!(ip.to_string(), "127.0.0.1");
    }
}
