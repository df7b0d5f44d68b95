// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered, profile-aware externalized configuration.
//!
//! Values are gathered from ranked sources (command-line arguments,
//! environment variables, profile-specific configuration files, and sources
//! registered in code) and read through one placeholder and expression
//! syntax that resolves nested references to a fixed point.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`Value`, `ConfigKey`, `FieldSpec`, errors)
//! - **Ports**: Trait definitions (`PropertySource`, `ConfigParser`, `ExpressionEvaluator`)
//! - **Adapters**: Implementations (map sources, CLI/env capture, YAML and
//!   properties parsers, the `evalexpr` evaluator, random and Base64 sources)
//! - **Text**: The template engine and the `${...}` / `#{...}` expression language
//! - **Service**: The [`Environment`](service::Environment) that ties everything together
//!
//! # Placeholders and expressions
//!
//! - `${key}` is replaced by the value of `key`; `${key:default}` falls back
//!   to `default` when no source has `key`.
//! - `#{expr}` is evaluated; a lone expression keeps its type, so
//!   `#{21 * 2}` is the integer 42 while `n=#{21 * 2}` is the text `n=42`.
//! - `###{expr}###` is the same for expressions that need braces.
//!
//! Values are resolved again after substitution until nothing changes, so
//! `a=${b}` with `b=c` reads as `c`.
//!
//! # Configuration files
//!
//! By default `./application.{yml,yaml,properties}` and the same names under
//! `./config/` are loaded, followed by `application-{profile}.*` for every
//! active profile. The search is driven by these keys, read from the command
//! line first and the environment second:
//!
//! | argument                       | variable                     |
//! |--------------------------------|------------------------------|
//! | `--profiles.active`            | `PROFILES_ACTIVE`            |
//! | `--config.name`                | `CONFIG_NAME`                |
//! | `--config.location`            | `CONFIG_LOCATION`            |
//! | `--config.additional-location` | `CONFIG_ADDITIONAL_LOCATION` |
//!
//! # Feature Flags
//!
//! - `yaml`: YAML configuration files (default)
//! - `properties`: `.properties` configuration files (default)
//! - `random`: `random.*` keys (default)
//! - `base64`: decoding of `base64:`-prefixed values (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use extcfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let env = Environment::from_process()?;
//!
//! let port: u16 = env.property_as("server.port")?;
//! let url = env.property_or("server.url", "http://localhost")?;
//! if env.matches_profiles(&["prod & !eu"])? {
//!     println!("serving {} on {}", url, port);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod text;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{CommandLineAdapter, EnvVarAdapter, EvalexprEvaluator, MapPropertySource};
    pub use crate::domain::{ConfigError, ConfigKey, FieldSpec, FromValue, Result, Value, ValueKind};
    pub use crate::ports::{ConfigParser, ExpressionEvaluator, PropertyLookup, PropertySource};
    pub use crate::service::{Environment, EnvironmentBuilder};
    pub use crate::text::{ExpressionProcessor, TemplateProcessor};

    // Re-export adapters based on feature flags
    #[cfg(feature = "base64")]
    pub use crate::adapters::Base64PropertySource;
    #[cfg(feature = "properties")]
    pub use crate::adapters::PropertiesParser;
    #[cfg(feature = "random")]
    pub use crate::adapters::RandomValuePropertySource;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
