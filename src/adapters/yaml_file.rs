// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration file parser.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigParser;
use serde_yaml::Value as YamlValue;
use std::collections::HashMap;

/// YAML parser implementation.
///
/// Nested mappings are flattened with dot notation and sequences with
/// bracketed indices. Scalars are kept as their text; `null` becomes the
/// empty string.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::YamlParser;
/// use extcfg::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let yaml_content = "database:\n  host: localhost\n  replicas:\n    - db1\n    - db2";
/// let result = parser.parse(yaml_content).unwrap();
/// assert_eq!(result.get("database.host"), Some(&"localhost".to_string()));
/// assert_eq!(result.get("database.replicas[1]"), Some(&"db2".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Flattens a YAML value into `result`, with `prefix` as the key so far.
    fn flatten_yaml(value: &YamlValue, prefix: &str, result: &mut HashMap<String, String>) {
        match value {
            YamlValue::Mapping(map) => {
                for (key, val) in map {
                    let Some(key) = Self::key_text(key) else {
                        tracing::debug!("Skipping non-scalar YAML key under {:?}", prefix);
                        continue;
                    };
                    let new_prefix = if prefix.is_empty() {
                        key
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    Self::flatten_yaml(val, &new_prefix, result);
                }
            }
            YamlValue::Sequence(seq) => {
                for (i, val) in seq.iter().enumerate() {
                    Self::flatten_yaml(val, &format!("{}[{}]", prefix, i), result);
                }
            }
            YamlValue::Tagged(tagged) => Self::flatten_yaml(&tagged.value, prefix, result),
            scalar if !prefix.is_empty() => {
                result.insert(prefix.to_string(), Self::scalar_text(scalar));
            }
            _ => {}
        }
    }

    fn key_text(key: &YamlValue) -> Option<String> {
        match key {
            YamlValue::String(s) => Some(s.clone()),
            YamlValue::Number(n) => Some(n.to_string()),
            YamlValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn scalar_text(value: &YamlValue) -> String {
        match value {
            YamlValue::String(s) => s.clone(),
            YamlValue::Number(n) => n.to_string(),
            YamlValue::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let value: YamlValue =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut result = HashMap::new();
        Self::flatten_yaml(&value, "", &mut result);
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
