// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the text of a
//! configuration file into a flat key-value map.

use crate::domain::Result;
use std::collections::HashMap;

/// A trait for parsing configuration files.
///
/// # Key Format
///
/// Parsers flatten nested structures using dot notation and sequences using
/// bracketed indices. A YAML structure like:
///
/// ```yaml
/// database:
///   hosts:
///     - db1
///     - db2
///   port: 5432
/// ```
///
/// is parsed into:
/// - `database.hosts[0]` -> `"db1"`
/// - `database.hosts[1]` -> `"db2"`
/// - `database.port` -> `"5432"`
///
/// Flat formats are returned as-is.
///
/// # Examples
///
/// ```rust
/// use extcfg::ports::ConfigParser;
/// use extcfg::domain::Result;
/// use std::collections::HashMap;
///
/// struct LineParser;
///
/// impl ConfigParser for LineParser {
///     fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["env"]
///     }
/// }
///
/// let parser = LineParser;
/// assert!(parser.supports(".env"));
/// assert_eq!(parser.parse("a = 1").unwrap()["a"], "1");
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a flat key-value map.
    ///
    /// # Returns
    ///
    /// * `Ok(HashMap<String, String>)` - The parsed configuration as key-value pairs
    /// * `Err(ConfigError::ParseError)` - The content is malformed
    fn parse(&self, content: &str) -> Result<HashMap<String, String>>;

    /// Returns the file extensions (without the leading dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];

    /// Whether this parser handles `extension`, with or without a leading dot.
    fn supports(&self, extension: &str) -> bool {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
