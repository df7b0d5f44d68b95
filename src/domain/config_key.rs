// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype.
//!
//! Keys are dot-joined paths (`server.port`, `servers[0].host`). Besides wrapping
//! the string, `ConfigKey` knows how to translate itself into the form an
//! operating-system environment variable would carry.

use std::fmt;

/// A type-safe wrapper for configuration keys.
///
/// # Examples
///
/// ```
/// use extcfg::domain::ConfigKey;
///
/// let key = ConfigKey::from("server.port");
/// assert_eq!(key.as_str(), "server.port");
/// assert_eq!(key.env_var_canonical_form(), "SERVER_PORT");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Joins a child segment onto this key with a dot.
    ///
    /// An empty key yields the child unchanged.
    ///
    /// ```
    /// use extcfg::domain::ConfigKey;
    ///
    /// assert_eq!(ConfigKey::from("db").child("host").as_str(), "db.host");
    /// assert_eq!(ConfigKey::from("").child("host").as_str(), "host");
    /// ```
    pub fn child(&self, segment: &str) -> ConfigKey {
        if self.0.is_empty() {
            ConfigKey(segment.to_string())
        } else {
            ConfigKey(format!("{}.{}", self.0, segment))
        }
    }

    /// Translates the key into environment-variable naming.
    ///
    /// `.`, `[` and `]` become `_`, `-` is deleted, and the result is
    /// upper-cased, so `spring.main.log-startup-info` becomes
    /// `SPRING_MAIN_LOGSTARTUPINFO` and `servers[0]` becomes `SERVERS_0_`.
    pub fn env_var_canonical_form(&self) -> String {
        self.0
            .chars()
            .filter_map(|c| match c {
                '.' | '[' | ']' => Some('_'),
                '-' => None,
                other => Some(other),
            })
            .collect::<String>()
            .to_uppercase()
    }

    /// Returns the key with its first character lower-cased.
    pub fn decapitalized(&self) -> ConfigKey {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => ConfigKey(first.to_lowercase().chain(chars).collect()),
            None => ConfigKey(String::new()),
        }
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
