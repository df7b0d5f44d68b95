// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory property source.

use crate::domain::{ConfigError, Result};
use crate::ports::{PropertyLookup, PropertySource};
use std::collections::HashMap;

/// An enumerable property source backed by a hash map.
///
/// Every file-backed source, the captured command line and the captured
/// environment end up as one of these.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::MapPropertySource;
/// use extcfg::ports::PropertySource;
///
/// let source = MapPropertySource::new("defaults")
///     .with_property("server.port", "8080");
///
/// assert!(source.has_property("server.port"));
/// assert_eq!(source.property("server.port").unwrap(), "8080");
/// assert!(!source.is_derived());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapPropertySource {
    name: String,
    properties: HashMap<String, String>,
}

impl MapPropertySource {
    /// Creates an empty source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }

    /// Creates a source holding `properties`.
    pub fn from_map(name: impl Into<String>, properties: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Adds or replaces a property, builder style.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Adds or replaces a property.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Raw value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Raw value of `key` when present and not blank.
    pub(crate) fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the source holds no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl PropertySource for MapPropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    fn property(&self, key: &str) -> Result<String> {
        self.properties
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::PropertyNotFound {
                key: key.to_string(),
            })
    }

    fn properties(&self) -> Option<&HashMap<String, String>> {
        Some(&self.properties)
    }
}

impl PropertyLookup for MapPropertySource {
    fn lookup_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.properties.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let source = MapPropertySource::new("empty");
        assert_eq!(source.name(), "empty");
        assert!(source.is_empty());
        assert!(!source.has_property("a"));
        assert!(matches!(
            source.property("a"),
            Err(ConfigError::PropertyNotFound { key }) if key == "a"
        ));
    }

    #[test]
    fn test_set_property_replaces() {
        let mut source = MapPropertySource::new("test").with_property("a", "1");
        source.set_property("a", "2");
        assert_eq!(source.len(), 1);
        assert_eq!(source.property("a").unwrap(), "2");
    }

    #[test]
    fn test_empty_value_is_present() {
        let source = MapPropertySource::new("test").with_property("a", "");
        assert!(source.has_property("a"));
        assert_eq!(source.property("a").unwrap(), "");
        assert_eq!(source.non_empty("a"), None);
    }

    #[test]
    fn test_enumerable() {
        let map = HashMap::from([("k".to_string(), "v".to_string())]);
        let source = MapPropertySource::from_map("file.yml", map);
        assert!(!source.is_derived());
        assert_eq!(source.properties().map(HashMap::len), Some(1));
        assert_eq!(source.lookup_raw("k").unwrap(), Some("v".to_string()));
        assert_eq!(source.lookup_raw("x").unwrap(), None);
    }
}
