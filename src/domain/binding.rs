// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema descriptors for binding a group of properties at once.
//!
//! Instead of reflecting over a caller's struct, the caller describes the
//! fields it wants and receives a map of typed values back:
//!
//! ```
//! use extcfg::domain::{FieldSpec, Value, ValueKind};
//!
//! let schema = [
//!     FieldSpec::new("host", ValueKind::String).with_default("localhost"),
//!     FieldSpec::new("port", ValueKind::Int).with_default(5432i64),
//!     FieldSpec::new("user", ValueKind::String),
//! ];
//! assert_eq!(schema[1].default, Some(Value::Int(5432)));
//! ```

use crate::domain::value::{Value, ValueKind};

/// Describes one field to bind under a key prefix.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// Field name, appended to the prefix with a dot.
    pub name: String,
    /// The kind the resolved value is coerced to.
    pub kind: ValueKind,
    /// Used when no source provides the field. Fields without a default are
    /// omitted from the result when absent.
    pub default: Option<Value>,
}

impl FieldSpec {
    /// Creates a descriptor without a default.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Sets the value used when the field is absent.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}
