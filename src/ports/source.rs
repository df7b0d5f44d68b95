// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property source trait definition.
//!
//! A property source is a named provider of raw, unresolved string values. There
//! are two flavours:
//!
//! - **enumerable** sources hold a full key→value map (files, CLI arguments,
//!   in-memory maps) and return it from [`PropertySource::properties`];
//! - **derived** sources compute values on demand (decoders, random
//!   generators) and return `None` there. They carry logic rather than data, so
//!   an [`Environment`](crate::service::Environment) keeps them when it is
//!   rebuilt.

use crate::domain::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// A trait for property sources.
///
/// Implementations must uphold one invariant: whenever `has_property(key)`
/// returns `true`, `property(key)` must succeed (and likewise for the
/// `*_within` pair).
///
/// # Examples
///
/// ```rust
/// use extcfg::ports::PropertySource;
/// use extcfg::domain::{ConfigError, Result};
/// use std::collections::HashMap;
///
/// struct Hostname;
///
/// impl PropertySource for Hostname {
///     fn name(&self) -> &str {
///         "hostname"
///     }
///
///     fn has_property(&self, key: &str) -> bool {
///         key == "host.name"
///     }
///
///     fn property(&self, key: &str) -> Result<String> {
///         if self.has_property(key) {
///             Ok("build-agent-7".to_string())
///         } else {
///             Err(ConfigError::PropertyNotFound { key: key.to_string() })
///         }
///     }
///
///     fn properties(&self) -> Option<&HashMap<String, String>> {
///         None
///     }
/// }
///
/// assert!(Hostname.is_derived());
/// assert_eq!(Hostname.property("host.name").unwrap(), "build-agent-7");
/// ```
pub trait PropertySource: Send + Sync {
    /// Returns the name of this source, used for logging and introspection.
    fn name(&self) -> &str;

    /// Whether this source provides `key`.
    fn has_property(&self, key: &str) -> bool;

    /// Returns the raw value for `key`.
    ///
    /// Fails with [`ConfigError::PropertyNotFound`](crate::domain::ConfigError::PropertyNotFound)
    /// when the key is absent.
    fn property(&self, key: &str) -> Result<String>;

    /// Returns the full key set, or `None` for a derived source.
    fn properties(&self) -> Option<&HashMap<String, String>>;

    /// Whether this source computes its values instead of storing them.
    fn is_derived(&self) -> bool {
        self.properties().is_none()
    }

    /// Like [`has_property`](Self::has_property), with the registered enumerable
    /// sources visible.
    ///
    /// Decorators that reinterpret values held elsewhere (for instance a
    /// `base64:` prefix) override this pair; everyone else inherits the
    /// plain methods.
    fn has_property_within(&self, key: &str, _sources: &EnumerableSources<'_>) -> bool {
        self.has_property(key)
    }

    /// Like [`property`](Self::property), with the registered enumerable
    /// sources visible.
    fn property_within(&self, key: &str, _sources: &EnumerableSources<'_>) -> Result<String> {
        self.property(key)
    }
}

/// A read-only view over registered sources in precedence order, skipping
/// derived ones.
#[derive(Clone, Copy)]
pub struct EnumerableSources<'a> {
    /// Registered sources in registration order.
    sources: &'a [Arc<dyn PropertySource>],
}

impl<'a> EnumerableSources<'a> {
    /// Wraps sources given in registration order (last registered wins).
    pub fn new(sources: &'a [Arc<dyn PropertySource>]) -> Self {
        Self { sources }
    }

    /// Returns the highest-precedence enumerable source that has `key`.
    pub fn find(&self, key: &str) -> Option<&'a dyn PropertySource> {
        self.sources
            .iter()
            .rev()
            .filter(|source| !source.is_derived())
            .find(|source| source.has_property(key))
            .map(|source| &**source)
    }

    /// Returns the raw value of `key` from the highest-precedence enumerable source.
    pub fn raw_property(&self, key: &str) -> Result<Option<String>> {
        self.find(key).map(|source| source.property(key)).transpose()
    }
}

/// Raw (unresolved) lookup of a key through some precedence chain.
///
/// This is what the expression engine asks when it meets `${key}`.
pub trait PropertyLookup {
    /// Returns the raw value of `key`, or `None` when nothing provides it.
    fn lookup_raw(&self, key: &str) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;

    struct TestSource {
        name: &'static str,
        values: Option<HashMap<String, String>>,
    }

    impl TestSource {
        fn enumerable(name: &'static str, key: &str, value: &str) -> Self {
            let mut values = HashMap::new();
            values.insert(key.to_string(), value.to_string());
            Self {
                name,
                values: Some(values),
            }
        }

        fn derived(name: &'static str) -> Self {
            Self { name, values: None }
        }
    }

    impl PropertySource for TestSource {
        fn name(&self) -> &str {
            self.name
        }

        fn has_property(&self, key: &str) -> bool {
            match &self.values {
                Some(values) => values.contains_key(key),
                None => true,
            }
        }

        fn property(&self, key: &str) -> Result<String> {
            match &self.values {
                Some(values) => values
                    .get(key)
                    .cloned()
                    .ok_or_else(|| ConfigError::PropertyNotFound {
                        key: key.to_string(),
                    }),
                None => Ok("computed".to_string()),
            }
        }

        fn properties(&self) -> Option<&HashMap<String, String>> {
            self.values.as_ref()
        }
    }

    #[test]
    fn test_is_derived() {
        assert!(TestSource::derived("d").is_derived());
        assert!(!TestSource::enumerable("e", "k", "v").is_derived());
    }

    #[test]
    fn test_within_defaults_to_plain_lookup() {
        let source = TestSource::enumerable("e", "k", "v");
        let view = EnumerableSources::new(&[]);
        assert!(source.has_property_within("k", &view));
        assert_eq!(source.property_within("k", &view).unwrap(), "v");
    }

    #[test]
    fn test_view_prefers_last_registered_and_skips_derived() {
        let sources: Vec<Arc<dyn PropertySource>> = vec![
            Arc::new(TestSource::enumerable("first", "k", "one")),
            Arc::new(TestSource::enumerable("second", "k", "two")),
            Arc::new(TestSource::derived("derived")),
        ];
        let view = EnumerableSources::new(&sources);
        assert_eq!(view.find("k").map(|s| s.name()), Some("second"));
        assert_eq!(view.raw_property("k").unwrap(), Some("two".to_string()));
        assert_eq!(view.raw_property("missing").unwrap(), None);
    }

    #[test]
    fn test_property_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PropertySource>();
    }
}
