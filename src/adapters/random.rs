// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived source producing random values.

use crate::domain::{ConfigError, Result};
use crate::ports::PropertySource;
use once_cell::sync::Lazy;
use rand::distr::Alphanumeric;
use rand::Rng;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Name of the random value source.
pub const RANDOM_SOURCE_NAME: &str = "RandomValuePropertySource";

/// Largest accepted byte count or string length (prevents DoS)
const MAX_RANDOM_LENGTH: usize = 1024 * 1024;

/// Bytes produced by a bare `random.value`.
const DEFAULT_VALUE_BYTES: usize = 8;

static RANDOM_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^random\.(?:(?P<uuid>uuid)",
        r"|string\((?P<size>\d+)\)",
        r"|(?P<value>value)(?:\((?P<bytes>\d+)\))?",
        r"|(?P<kind>int64|int)(?:\((?:(?P<min>-?\d+),)?(?P<max>-?\d+)\))?)$",
    ))
    .expect("random key pattern is valid")
});

/// What a `random.*` key asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RandomRequest {
    Uuid,
    String(usize),
    Value(usize),
    Int(Option<(i64, i64)>),
    Int64(Option<(i64, i64)>),
}

impl RandomRequest {
    fn parse(key: &str) -> Option<Self> {
        let caps = RANDOM_KEY.captures(key)?;
        if caps.name("uuid").is_some() {
            return Some(RandomRequest::Uuid);
        }
        if let Some(size) = caps.name("size") {
            return size.as_str().parse().ok().map(RandomRequest::String);
        }
        if caps.name("value").is_some() {
            let bytes = match caps.name("bytes") {
                Some(bytes) => bytes.as_str().parse().ok()?,
                None => DEFAULT_VALUE_BYTES,
            };
            return Some(RandomRequest::Value(bytes));
        }
        let range = match caps.name("max") {
            Some(max) => {
                let min = match caps.name("min") {
                    Some(min) => min.as_str().parse().ok()?,
                    None => 0,
                };
                Some((min, max.as_str().parse().ok()?))
            }
            None => None,
        };
        match caps.name("kind")?.as_str() {
            "int" => Some(RandomRequest::Int(range)),
            _ => Some(RandomRequest::Int64(range)),
        }
    }
}

/// Answers `random.*` keys with freshly generated values.
///
/// | key                        | value                                  |
/// |----------------------------|----------------------------------------|
/// | `random.uuid`              | version 4 UUID                         |
/// | `random.value[(bytes)]`    | hex string of `bytes` (default 8) bytes |
/// | `random.int[([min,]max)]`  | 32-bit integer in `[min, max)`         |
/// | `random.int64[([min,]max)]`| 64-bit integer in `[min, max)`         |
/// | `random.string(len)`       | alphanumeric string of `len` chars     |
///
/// Every lookup produces a new value.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::RandomValuePropertySource;
/// use extcfg::ports::PropertySource;
///
/// let source = RandomValuePropertySource::new();
/// let n: i64 = source.property("random.int(10,20)").unwrap().parse().unwrap();
/// assert!((10..20).contains(&n));
/// assert!(!source.has_property("random.bogus"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RandomValuePropertySource;

impl RandomValuePropertySource {
    /// Creates the source.
    pub fn new() -> Self {
        RandomValuePropertySource
    }

    fn failure(key: &str, message: impl Into<String>) -> ConfigError {
        ConfigError::SourceError {
            source_name: RANDOM_SOURCE_NAME.to_string(),
            message: format!("{}: {}", key, message.into()),
            source: None,
        }
    }

    fn check_length(key: &str, length: usize) -> Result<usize> {
        if length > MAX_RANDOM_LENGTH {
            return Err(Self::failure(
                key,
                format!("length {} exceeds {}", length, MAX_RANDOM_LENGTH),
            ));
        }
        Ok(length)
    }

    fn in_range(key: &str, min: i64, max: i64) -> Result<i64> {
        if max <= min {
            return Err(Self::failure(key, format!("invalid range [{}, {})", min, max)));
        }
        Ok(rand::rng().random_range(min..max))
    }
}

impl PropertySource for RandomValuePropertySource {
    fn name(&self) -> &str {
        RANDOM_SOURCE_NAME
    }

    fn has_property(&self, key: &str) -> bool {
        RandomRequest::parse(key).is_some()
    }

    fn property(&self, key: &str) -> Result<String> {
        let request = RandomRequest::parse(key).ok_or_else(|| ConfigError::PropertyNotFound {
            key: key.to_string(),
        })?;

        let value = match request {
            RandomRequest::Uuid => uuid::Uuid::new_v4().to_string(),
            RandomRequest::String(len) => {
                let len = Self::check_length(key, len)?;
                rand::rng()
                    .sample_iter(&Alphanumeric)
                    .take(len)
                    .map(char::from)
                    .collect()
            }
            RandomRequest::Value(bytes) => {
                let mut buf = vec![0u8; Self::check_length(key, bytes)?];
                rand::rng().fill(&mut buf[..]);
                buf.iter().fold(String::with_capacity(buf.len() * 2), |mut hex, b| {
                    let _ = write!(hex, "{:02x}", b);
                    hex
                })
            }
            RandomRequest::Int(None) => rand::random::<i32>().to_string(),
            RandomRequest::Int(Some((min, max))) => {
                if i32::try_from(min).is_err() || i32::try_from(max).is_err() {
                    return Err(Self::failure(key, "bounds do not fit a 32-bit integer"));
                }
                Self::in_range(key, min, max)?.to_string()
            }
            RandomRequest::Int64(None) => rand::random::<i64>().to_string(),
            RandomRequest::Int64(Some((min, max))) => Self::in_range(key, min, max)?.to_string(),
        };
        Ok(value)
    }

    fn properties(&self) -> Option<&HashMap<String, String>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(RandomRequest::parse("random.uuid"), Some(RandomRequest::Uuid));
        assert_eq!(RandomRequest::parse("random.string(12)"), Some(RandomRequest::String(12)));
        assert_eq!(RandomRequest::parse("random.value"), Some(RandomRequest::Value(8)));
        assert_eq!(RandomRequest::parse("random.value(3)"), Some(RandomRequest::Value(3)));
        assert_eq!(RandomRequest::parse("random.int"), Some(RandomRequest::Int(None)));
        assert_eq!(RandomRequest::parse("random.int(5)"), Some(RandomRequest::Int(Some((0, 5)))));
        assert_eq!(
            RandomRequest::parse("random.int64(-5,5)"),
            Some(RandomRequest::Int64(Some((-5, 5))))
        );
        assert_eq!(RandomRequest::parse("random.string"), None);
        assert_eq!(RandomRequest::parse("random.int(a)"), None);
        assert_eq!(RandomRequest::parse("server.random.uuid"), None);
        assert_eq!(RandomRequest::parse("random.int64(99999999999999999999)"), None);
    }

    #[test]
    fn test_derived() {
        let source = RandomValuePropertySource::new();
        assert!(source.is_derived());
        assert!(source.properties().is_none());
        assert_eq!(source.name(), RANDOM_SOURCE_NAME);
    }

    #[test]
    fn test_uuid() {
        let source = RandomValuePropertySource::new();
        let first = source.property("random.uuid").unwrap();
        let second = source.property("random.uuid").unwrap();

        let parsed = uuid::Uuid::parse_str(&first).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(first, second);
    }

    #[test]
    fn test_string_and_value() {
        let source = RandomValuePropertySource::new();

        let s = source.property("random.string(16)").unwrap();
        assert_eq!(s.len(), 16);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));

        let v = source.property("random.value").unwrap();
        assert_eq!(v.len(), 16);
        assert!(v.chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(source.property("random.value(4)").unwrap().len(), 8);
    }

    #[test]
    fn test_ranges() {
        let source = RandomValuePropertySource::new();
        for _ in 0..100 {
            let n: i64 = source.property("random.int(-3,3)").unwrap().parse().unwrap();
            assert!((-3..3).contains(&n));
            let n: i64 = source.property("random.int64(7)").unwrap().parse().unwrap();
            assert!((0..7).contains(&n));
        }
        let n: i64 = source.property("random.int").unwrap().parse().unwrap();
        assert!(i32::try_from(n).is_ok());
    }

    #[test]
    fn test_invalid_requests() {
        let source = RandomValuePropertySource::new();
        assert!(matches!(
            source.property("random.int(5,5)"),
            Err(ConfigError::SourceError { .. })
        ));
        assert!(matches!(
            source.property("random.int(0,4294967296)"),
            Err(ConfigError::SourceError { .. })
        ));
        assert!(matches!(
            source.property("random.string(99999999)"),
            Err(ConfigError::SourceError { .. })
        ));
        assert!(matches!(
            source.property("random.nothing"),
            Err(ConfigError::PropertyNotFound { .. })
        ));
    }
}
