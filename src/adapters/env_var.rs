// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable capture.
//!
//! Variables become the "Environment variables" source, second only to the
//! command line. Keys are stored verbatim; the environment additionally
//! answers dotted keys through their canonical form (`server.port` is
//! looked up as `SERVER_PORT`).

use crate::adapters::MapPropertySource;
use std::collections::HashMap;
use std::env;

/// Name of the property source built from environment variables.
pub const ENVIRONMENT_VARIABLES: &str = "Environment variables";

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Captures environment variables once, at construction.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::EnvVarAdapter;
/// use extcfg::ports::PropertySource;
///
/// let source = EnvVarAdapter::from_vars([("SERVER_PORT", "8081")]).into_source();
/// assert_eq!(source.property("SERVER_PORT").unwrap(), "8081");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvVarAdapter {
    /// Captured variables
    values: HashMap<String, String>,
}

impl EnvVarAdapter {
    /// Creates an adapter that holds no variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the given `(name, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = HashMap::new();

        for (key, value) in vars {
            let (key, value) = (key.into(), value.into());
            // Validate input sizes to prevent DoS
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }
            if key.is_empty() {
                continue;
            }
            values.insert(key, value);
        }

        tracing::debug!("Captured {} environment variables", values.len());

        Self { values }
    }

    /// Captures the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(env::vars())
    }

    /// The captured variables.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Converts the captured variables into the "Environment variables" source.
    pub fn into_source(self) -> MapPropertySource {
        MapPropertySource::from_map(ENVIRONMENT_VARIABLES, self.values)
    }
}
