// SPDX-License-Identifier: MIT OR Apache-2.0

//! The environment: ranked property sources plus the expression processor.

use crate::adapters::MapPropertySource;
use crate::domain::{ConfigError, ConfigKey, FieldSpec, FromValue, Result, Value};
use crate::ports::{ConfigParser, EnumerableSources, PropertyLookup, PropertySource};
use crate::service::EnvironmentBuilder;
use crate::text::ExpressionProcessor;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// The profile every environment starts with.
pub const DEFAULT_PROFILE: &str = "default";

/// Splits a comma-separated list, dropping blank entries.
pub(crate) fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolved configuration for one process.
///
/// A key is looked up, in order, in:
///
/// 1. the command-line arguments;
/// 2. the environment variables, first verbatim, then in canonical form
///    (`server.port` → `SERVER_PORT`);
/// 3. the registered sources, most recently registered first.
///
/// The raw value found is then run through the [`ExpressionProcessor`], so
/// values may reference other keys with `${...}` and compute with `#{...}`.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::MapPropertySource;
/// use extcfg::service::Environment;
/// use std::sync::Arc;
///
/// # fn main() -> extcfg::domain::Result<()> {
/// let mut env = Environment::builder()
///     .args(["--server.port=9090"])
///     .env_vars([("SERVER_HOST", "example.org")])
///     .build()?;
/// env.add_property_source(Arc::new(
///     MapPropertySource::new("defaults")
///         .with_property("server.port", "8080")
///         .with_property("server.url", "http://${server.host}:${server.port}"),
/// ));
///
/// assert_eq!(env.property("server.url")?, "http://example.org:9090");
/// assert_eq!(env.value::<i64>("#{${server.port} + 1}")?, 9091);
/// # Ok(())
/// # }
/// ```
pub struct Environment {
    pub(crate) active_profiles: Vec<String>,
    pub(crate) params: MapPropertySource,
    pub(crate) environ: MapPropertySource,
    pub(crate) sources: Vec<Arc<dyn PropertySource>>,
    pub(crate) processor: ExpressionProcessor,
    pub(crate) parsers: Vec<Box<dyn ConfigParser>>,
    pub(crate) bootstrap_profiles: String,
}

impl Environment {
    /// Starts building an environment.
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::new()
    }

    /// Builds an environment from the process's arguments and variables.
    pub fn from_process() -> Result<Self> {
        EnvironmentBuilder::new().from_process().build()
    }

    /// Creates an environment with nothing discovered yet.
    pub(crate) fn new(
        params: MapPropertySource,
        environ: MapPropertySource,
        processor: ExpressionProcessor,
        parsers: Vec<Box<dyn ConfigParser>>,
        bootstrap_profiles: String,
    ) -> Self {
        Self {
            active_profiles: vec![DEFAULT_PROFILE.to_string()],
            params,
            environ,
            sources: Vec::new(),
            processor,
            parsers,
            bootstrap_profiles,
        }
    }

    /// The fully resolved value of `key`, as text.
    pub fn property(&self, key: &str) -> Result<String> {
        Ok(self.resolve_key(key)?.to_string())
    }

    /// Like [`property`](Self::property), falling back to `default` when no
    /// source has `key`.
    pub fn property_or(&self, key: &str, default: &str) -> Result<String> {
        match self.lookup_raw(key)? {
            Some(raw) => Ok(self.processor.process(&raw, self)?.to_string()),
            None => Ok(default.to_string()),
        }
    }

    /// The resolved value of `key`, converted to `T`.
    ///
    /// ```rust
    /// use extcfg::service::Environment;
    /// use std::time::Duration;
    ///
    /// # fn main() -> extcfg::domain::Result<()> {
    /// let env = Environment::builder()
    ///     .args(["--timeout=#{2 * time.Second}", "--debug=on"])
    ///     .build()?;
    /// assert_eq!(env.property_as::<Duration>("timeout")?, Duration::from_secs(2));
    /// assert!(env.property_as::<bool>("debug")?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn property_as<T: FromValue>(&self, key: &str) -> Result<T> {
        T::from_value(self.resolve_key(key)?, key)
    }

    /// Whether any source provides `key`.
    pub fn has_property(&self, key: &str) -> bool {
        matches!(self.lookup_raw(key), Ok(Some(_)))
    }

    /// Resolves an arbitrary template and converts the result to `T`.
    pub fn value<T: FromValue>(&self, expression: &str) -> Result<T> {
        T::from_value(self.resolve(expression)?, expression)
    }

    /// Resolves an arbitrary template.
    pub fn resolve(&self, text: &str) -> Result<Value> {
        self.processor.process(text, self)
    }

    /// Active profiles in activation order; the last one wins.
    pub fn active_profiles(&self) -> &[String] {
        &self.active_profiles
    }

    /// Registered sources, highest precedence first.
    ///
    /// The command-line and environment sources are not part of this list;
    /// see [`params`](Self::params) and [`environ`](Self::environ).
    pub fn property_sources(&self) -> Vec<&dyn PropertySource> {
        self.sources.iter().rev().map(|source| &**source).collect()
    }

    /// The command-line source.
    pub fn params(&self) -> &MapPropertySource {
        &self.params
    }

    /// The environment-variable source.
    pub fn environ(&self) -> &MapPropertySource {
        &self.environ
    }

    /// Registers `source` above every source registered so far.
    ///
    /// Enumerable sources are placed below the derived ones (decoders,
    /// random values), so a `base64:` value added here is still decoded.
    pub fn add_property_source(&mut self, source: Arc<dyn PropertySource>) {
        if source.is_derived() {
            self.register(source);
            return;
        }
        let index = self
            .sources
            .iter()
            .rposition(|existing| !existing.is_derived())
            .map_or(0, |i| i + 1);
        debug!("Registering property source {} at {}", source.name(), index);
        self.sources.insert(index, source);
    }

    /// The expression processor.
    pub fn processor(&self) -> &ExpressionProcessor {
        &self.processor
    }

    /// The expression processor, for switching modes or defining bindings.
    pub fn processor_mut(&mut self) -> &mut ExpressionProcessor {
        &mut self.processor
    }

    /// Binds `key` in the expression context.
    pub fn define(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.processor.define(key, value);
    }

    /// Switches to `default` plus `profiles` and rediscovers configuration files.
    ///
    /// Nothing happens if those profiles are already active. Otherwise every
    /// enumerable source is dropped, discovery runs again with the captured
    /// command line and environment, and derived sources are re-registered in
    /// their original order. Profiles given on the command line or through
    /// `PROFILES_ACTIVE` still take precedence over `profiles`.
    pub fn set_active_profiles(&mut self, profiles: &str) -> Result<()> {
        let requested: Vec<String> = std::iter::once(DEFAULT_PROFILE.to_string())
            .chain(split_list(profiles))
            .collect();
        if requested == self.active_profiles {
            debug!("Profiles {:?} already active", requested);
            return Ok(());
        }

        info!("Rebuilding environment for profiles '{}'", profiles);
        let derived: Vec<_> = self
            .sources
            .iter()
            .filter(|source| source.is_derived())
            .cloned()
            .collect();
        self.sources.clear();
        self.processor.reset();
        self.active_profiles = vec![DEFAULT_PROFILE.to_string()];
        self.bootstrap_profiles = profiles.to_string();

        self.load_application_configuration()?;
        for source in derived {
            self.register(source);
        }
        Ok(())
    }

    /// Resolves a group of fields under `prefix`.
    ///
    /// Each field is looked up as `prefix.name`, then as `prefix.nAME` with
    /// the first letter lower-cased. Found values are resolved and coerced to
    /// the field's kind; missing ones take the field default or are left out.
    ///
    /// ```rust
    /// use extcfg::domain::{FieldSpec, Value, ValueKind};
    /// use extcfg::service::Environment;
    ///
    /// # fn main() -> extcfg::domain::Result<()> {
    /// let env = Environment::builder()
    ///     .args(["--db.host=localhost", "--db.port=5432"])
    ///     .build()?;
    /// let db = env.bind("db", &[
    ///     FieldSpec::new("Host", ValueKind::String),
    ///     FieldSpec::new("port", ValueKind::Int),
    ///     FieldSpec::new("pool", ValueKind::Int).with_default(10i64),
    /// ])?;
    /// assert_eq!(db["Host"], Value::from("localhost"));
    /// assert_eq!(db["port"], Value::Int(5432));
    /// assert_eq!(db["pool"], Value::Int(10));
    /// # Ok(())
    /// # }
    /// ```
    pub fn bind(&self, prefix: &str, schema: &[FieldSpec]) -> Result<HashMap<String, Value>> {
        let base = ConfigKey::from(prefix);
        let mut bound = HashMap::with_capacity(schema.len());

        for field in schema {
            let exact = base.child(&field.name);
            let lowered = base.child(ConfigKey::from(field.name.as_str()).decapitalized().as_str());
            let found = match self.lookup_raw(exact.as_str())? {
                Some(raw) => Some((exact.clone(), raw)),
                None => self.lookup_raw(lowered.as_str())?.map(|raw| (lowered, raw)),
            };

            let value = match found {
                Some((key, raw)) => self
                    .processor
                    .process(&raw, self)?
                    .coerce(field.kind, key.as_str())?,
                None => match &field.default {
                    Some(default) => default.clone().coerce(field.kind, exact.as_str())?,
                    None => {
                        debug!("No value for {}, leaving it unbound", exact);
                        continue;
                    }
                },
            };
            bound.insert(field.name.clone(), value);
        }
        Ok(bound)
    }

    fn resolve_key(&self, key: &str) -> Result<Value> {
        let raw = self
            .lookup_raw(key)?
            .ok_or_else(|| ConfigError::PropertyNotFound {
                key: key.to_string(),
            })?;
        self.processor.process(&raw, self)
    }
}

impl PropertyLookup for Environment {
    fn lookup_raw(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.params.get(key) {
            return Ok(Some(value.to_string()));
        }
        if let Some(value) = self.environ.get(key) {
            return Ok(Some(value.to_string()));
        }
        let canonical = ConfigKey::from(key).env_var_canonical_form();
        if let Some(value) = self.environ.get(&canonical) {
            return Ok(Some(value.to_string()));
        }

        let view = EnumerableSources::new(&self.sources);
        for source in self.sources.iter().rev() {
            if source.has_property_within(key, &view) {
                return source.property_within(key, &view).map(Some);
            }
        }
        Ok(None)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("active_profiles", &self.active_profiles)
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("strict", &self.processor.is_strict())
            .finish()
    }
}
