// SPDX-License-Identifier: MIT OR Apache-2.0

//! Java-style `.properties` file parser.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigParser;
use std::collections::HashMap;

/// Parser for `key=value` / `key: value` property files.
///
/// Comments (`#`, `!`), line continuations and escapes follow the usual
/// `.properties` rules. Keys are already flat and are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::PropertiesParser;
/// use extcfg::ports::ConfigParser;
///
/// let result = PropertiesParser::new().parse("# comment\nserver.port = 8080\n").unwrap();
/// assert_eq!(result["server.port"], "8080");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertiesParser;

impl PropertiesParser {
    /// Creates a new properties parser.
    pub fn new() -> Self {
        PropertiesParser
    }
}

impl ConfigParser for PropertiesParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        java_properties::read(content.as_bytes()).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse properties: {}", e),
            source: None,
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["properties"]
    }
}
