// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for [`Environment`].

use crate::adapters::{CommandLineAdapter, EnvVarAdapter};
use crate::domain::Result;
use crate::ports::{ConfigParser, ExpressionEvaluator};
use crate::service::Environment;
use crate::text::ExpressionProcessor;
use tracing::info;

/// Builder for creating an [`Environment`].
///
/// Nothing is captured from the running process unless
/// [`from_process`](Self::from_process) is called, which keeps tests
/// independent of the host environment.
///
/// # Examples
///
/// ```rust
/// use extcfg::service::EnvironmentBuilder;
///
/// # fn main() -> extcfg::domain::Result<()> {
/// let env = EnvironmentBuilder::new()
///     .args(["--app.name=demo"])
///     .profiles("dev")
///     .build()?;
/// assert_eq!(env.property("app.name")?, "demo");
/// assert_eq!(env.active_profiles(), ["default", "dev"]);
/// # Ok(())
/// # }
/// ```
pub struct EnvironmentBuilder {
    args: Vec<String>,
    env_vars: Vec<(String, String)>,
    profiles: String,
    evaluator: Option<Box<dyn ExpressionEvaluator>>,
    parsers: Vec<Box<dyn ConfigParser>>,
    strict: bool,
    default_decorators: bool,
}

impl EnvironmentBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            env_vars: Vec::new(),
            profiles: String::new(),
            evaluator: None,
            parsers: Vec::new(),
            strict: true,
            default_decorators: true,
        }
    }

    /// Uses `args` as the command line (without the program name).
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Uses `vars` as the process environment.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Captures the running process's arguments and environment.
    pub fn from_process(self) -> Self {
        self.args(std::env::args().skip(1)).env_vars(std::env::vars())
    }

    /// Profiles to activate when neither the command line nor the
    /// environment names any.
    pub fn profiles(mut self, profiles: impl Into<String>) -> Self {
        self.profiles = profiles.into();
        self
    }

    /// Replaces the `evalexpr` evaluator.
    pub fn evaluator(mut self, evaluator: Box<dyn ExpressionEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Adds a file parser, consulted before the built-in ones.
    pub fn parser(mut self, parser: Box<dyn ConfigParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    /// Whether unresolvable placeholders are errors (the default) or are
    /// left as literal text.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Skips registering the random-value and Base64 sources.
    pub fn without_default_decorators(mut self) -> Self {
        self.default_decorators = false;
        self
    }

    /// Captures the inputs, discovers configuration files and registers the
    /// default decorators.
    pub fn build(self) -> Result<Environment> {
        let environ = EnvVarAdapter::from_vars(self.env_vars).into_source();
        let params = CommandLineAdapter::from_args(self.args).into_source();

        let mut parsers = self.parsers;
        #[cfg(feature = "yaml")]
        parsers.push(Box::new(crate::adapters::YamlParser::new()));
        #[cfg(feature = "properties")]
        parsers.push(Box::new(crate::adapters::PropertiesParser::new()));

        let processor = match self.evaluator {
            Some(evaluator) => ExpressionProcessor::with_evaluator(self.strict, evaluator),
            None => ExpressionProcessor::new(self.strict),
        };

        let mut environment = Environment::new(params, environ, processor, parsers, self.profiles);
        environment.load_application_configuration()?;

        if self.default_decorators {
            #[cfg(feature = "random")]
            environment.add_property_source(std::sync::Arc::new(
                crate::adapters::RandomValuePropertySource::new(),
            ));
            #[cfg(feature = "base64")]
            environment.add_property_source(std::sync::Arc::new(
                crate::adapters::Base64PropertySource::new(),
            ));
        }

        info!("Active profiles: {:?}", environment.active_profiles());
        Ok(environment)
    }
}

impl Default for EnvironmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
