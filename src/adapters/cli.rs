// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument capture.
//!
//! Arguments become the "Application parameters" source, which outranks
//! every other source in the environment.

use crate::adapters::MapPropertySource;
use std::collections::HashMap;

/// Name of the property source built from command-line arguments.
pub const APPLICATION_PARAMETERS: &str = "Application parameters";

/// Collects `-key=value` / `--key=value` arguments.
///
/// The value part is optional: `--verbose` yields `verbose = ""`. Arguments
/// that do not start with a dash are ignored, and a repeated key keeps its
/// last value.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::CommandLineAdapter;
/// use extcfg::ports::PropertySource;
///
/// let args = vec!["--server.port=9090", "-verbose", "positional"];
/// let source = CommandLineAdapter::from_args(args).into_source();
///
/// assert_eq!(source.property("server.port").unwrap(), "9090");
/// assert_eq!(source.property("verbose").unwrap(), "");
/// assert!(!source.has_property("positional"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    /// Parsed configuration values
    values: HashMap<String, String>,
}

impl CommandLineAdapter {
    /// Creates an adapter with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `args`.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut adapter = Self::new();
        for arg in args {
            adapter.parse_arg(arg.as_ref());
        }
        adapter
    }

    /// Parses the process's arguments, skipping the program name.
    pub fn from_env_args() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// The parsed key-value pairs.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Converts the parsed arguments into the "Application parameters" source.
    pub fn into_source(self) -> MapPropertySource {
        MapPropertySource::from_map(APPLICATION_PARAMETERS, self.values)
    }

    fn parse_arg(&mut self, arg: &str) {
        let Some(body) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
            return;
        };
        let (key, value) = body.split_once('=').unwrap_or((body, ""));
        let key = key.trim();
        if key.is_empty() || key.starts_with('-') || key.contains(char::is_whitespace) {
            tracing::debug!("Ignoring malformed argument {:?}", arg);
            return;
        }
        self.values.insert(key.to_string(), value.to_string());
    }
}
