// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Every failure the resolver can produce is a variant of [`ConfigError`]. All of
//! them are fatal to the call that raised them; callers decide whether to abort.
//! The only place failures are absorbed is a lenient
//! [`ExpressionProcessor`](crate::text::ExpressionProcessor), which leaves the
//! offending placeholder text untouched instead.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// # Examples
///
/// ```
/// use extcfg::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::PropertyNotFound {
///         key: "database.host".to_string(),
///     })
/// }
/// assert!(lookup().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A placeholder or lookup named a key no source provides, and no default was given.
    #[error("No value present for {key}")]
    PropertyNotFound {
        /// The key that was not found
        key: String,
    },

    /// The expression evaluator rejected a snippet.
    #[error("Cannot evaluate expression {expression}: {message}")]
    ExpressionEvaluation {
        /// The expression text handed to the evaluator
        expression: String,
        /// The evaluator's diagnostic
        message: String,
    },

    /// Template resolution kept producing new placeholders without settling.
    #[error("Resolution of '{input}' did not converge after {passes} passes")]
    ResolutionDidNotConverge {
        /// The text that was being resolved
        input: String,
        /// Number of passes performed before giving up
        passes: usize,
    },

    /// A configuration location maps to no known file format.
    #[error(
        "Cannot load from {location} as '{extension}' file type is not supported. \
         Use '/' at the end for a directory, or an extension hint like [.properties]"
    )]
    UnsupportedSourceType {
        /// The offending location
        location: String,
        /// The derived extension, empty when there was none
        extension: String,
    },

    /// A location string is malformed or names something that cannot be loaded.
    #[error("Invalid location {location}: {message}")]
    InvalidLocation {
        /// The offending location
        location: String,
        /// What is wrong with it
        message: String,
    },

    /// Failed to convert a resolved value to the requested type.
    #[error("Failed to convert value for '{key}' to type {target_type}: {source}")]
    TypeConversion {
        /// The key or expression being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An existing configuration file could not be read.
    #[error("Cannot read {path}: {source}")]
    ResourceIo {
        /// The file path
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was read but its content could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A derived property source failed to produce a value.
    #[error("Property source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConfigError {
    /// Creates a TypeConversion error from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversion error from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversion error from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversion error with a plain message as its cause.
    pub fn conversion(key: impl Into<String>, target_type: &str, message: impl Into<String>) -> Self {
        let message: String = message.into();
        ConfigError::TypeConversion {
            key: key.into(),
            target_type: target_type.to_string(),
            source: message.into(),
        }
    }

    /// Whether a lenient processor may swallow this error and keep the literal text.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConfigError::PropertyNotFound { .. } | ConfigError::ExpressionEvaluation { .. }
        )
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
