// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived source decoding `base64:`-prefixed values.

use crate::domain::{ConfigError, Result};
use crate::ports::{EnumerableSources, PropertySource};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;

/// Name of the Base64 decoding source.
pub const BASE64_SOURCE_NAME: &str = "Base64PropertySource";

const PREFIX: &str = "base64:";

/// Decodes values stored as `base64:<payload>` in the enumerable sources.
///
/// The prefix is matched case-insensitively and trailing CR/LF characters of
/// the decoded text are dropped. Registered after the file sources, it takes
/// precedence over them, so a key whose highest-ranked stored value carries
/// the prefix reads back decoded.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::{Base64PropertySource, MapPropertySource};
/// use extcfg::ports::{EnumerableSources, PropertySource};
/// use std::sync::Arc;
///
/// let sources: Vec<Arc<dyn PropertySource>> = vec![Arc::new(
///     MapPropertySource::new("secrets").with_property("db.password", "base64:czNjcjN0"),
/// )];
/// let view = EnumerableSources::new(&sources);
///
/// let decoder = Base64PropertySource::new();
/// assert!(decoder.has_property_within("db.password", &view));
/// assert_eq!(decoder.property_within("db.password", &view).unwrap(), "s3cr3t");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Base64PropertySource;

impl Base64PropertySource {
    /// Creates the source.
    pub fn new() -> Self {
        Base64PropertySource
    }

    fn payload(raw: &str) -> Option<&str> {
        let head = raw.get(..PREFIX.len())?;
        head.eq_ignore_ascii_case(PREFIX).then(|| &raw[PREFIX.len()..])
    }

    fn decode(key: &str, payload: &str) -> Result<String> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ConfigError::SourceError {
                source_name: BASE64_SOURCE_NAME.to_string(),
                message: format!("Cannot decode value of {}", key),
                source: Some(Box::new(e)),
            })?;
        let text = String::from_utf8(bytes).map_err(|e| ConfigError::SourceError {
            source_name: BASE64_SOURCE_NAME.to_string(),
            message: format!("Decoded value of {} is not UTF-8", key),
            source: Some(Box::new(e)),
        })?;
        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl PropertySource for Base64PropertySource {
    fn name(&self) -> &str {
        BASE64_SOURCE_NAME
    }

    /// Without a view of the other sources there is nothing to decode.
    fn has_property(&self, _key: &str) -> bool {
        false
    }

    fn property(&self, key: &str) -> Result<String> {
        Err(ConfigError::PropertyNotFound {
            key: key.to_string(),
        })
    }

    fn properties(&self) -> Option<&HashMap<String, String>> {
        None
    }

    fn has_property_within(&self, key: &str, sources: &EnumerableSources<'_>) -> bool {
        matches!(sources.raw_property(key), Ok(Some(raw)) if Self::payload(&raw).is_some())
    }

    fn property_within(&self, key: &str, sources: &EnumerableSources<'_>) -> Result<String> {
        let raw = sources
            .raw_property(key)?
            .ok_or_else(|| ConfigError::PropertyNotFound {
                key: key.to_string(),
            })?;
        match Self::payload(&raw) {
            Some(payload) => Self::decode(key, payload),
            None => Err(ConfigError::PropertyNotFound {
                key: key.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MapPropertySource;
    use std::sync::Arc;

    fn sources() -> Vec<Arc<dyn PropertySource>> {
        vec![
            Arc::new(
                MapPropertySource::new("low")
                    .with_property("shadowed", "base64:aGlkZGVu")
                    .with_property("plain", "text"),
            ),
            Arc::new(
                MapPropertySource::new("high")
                    .with_property("shadowed", "visible")
                    .with_property("upper", "Base64:aGVsbG8K")
                    .with_property("crlf", "BASE64:bGluZQ0KDQo=")
                    .with_property("broken", "base64:@@@"),
            ),
        ]
    }

    #[test]
    fn test_decodes_prefixed_values() {
        let sources = sources();
        let view = EnumerableSources::new(&sources);
        let decoder = Base64PropertySource::new();

        assert!(decoder.has_property_within("upper", &view));
        assert_eq!(decoder.property_within("upper", &view).unwrap(), "hello");
        assert_eq!(decoder.property_within("crlf", &view).unwrap(), "line");
    }

    #[test]
    fn test_only_highest_precedence_value_counts() {
        let sources = sources();
        let view = EnumerableSources::new(&sources);
        let decoder = Base64PropertySource::new();

        assert!(!decoder.has_property_within("shadowed", &view));
        assert!(!decoder.has_property_within("plain", &view));
        assert!(!decoder.has_property_within("absent", &view));
    }

    #[test]
    fn test_malformed_payload() {
        let sources = sources();
        let view = EnumerableSources::new(&sources);
        let decoder = Base64PropertySource::new();

        assert!(decoder.has_property_within("broken", &view));
        assert!(matches!(
            decoder.property_within("broken", &view),
            Err(ConfigError::SourceError { .. })
        ));
    }

    #[test]
    fn test_standalone_lookup_finds_nothing() {
        let decoder = Base64PropertySource::new();
        assert!(decoder.is_derived());
        assert!(!decoder.has_property("upper"));
        assert!(decoder.property("upper").is_err());
    }
}
