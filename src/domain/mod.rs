// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! Keys, resolved values, binding descriptors and the error taxonomy. Nothing
//! here touches the file system or the process environment.

pub mod binding;
pub mod config_key;
pub mod errors;
pub mod value;

// Re-export commonly used types
pub use binding::FieldSpec;
pub use config_key::ConfigKey;
pub use errors::{ConfigError, Result};
pub use value::{FromValue, Value, ValueKind};
