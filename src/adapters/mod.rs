// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing port implementations.
//!
//! Property sources, file parsers and the expression evaluator live here.
//! The optional ones are gated behind the cargo feature of the same name.

pub mod cli;
pub mod env_var;
pub mod evalexpr;
pub mod map_source;

#[cfg(feature = "base64")]
pub mod base64;
#[cfg(feature = "properties")]
pub mod properties_file;
#[cfg(feature = "random")]
pub mod random;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub use cli::CommandLineAdapter;
pub use env_var::EnvVarAdapter;
pub use self::evalexpr::EvalexprEvaluator;
pub use map_source::MapPropertySource;

#[cfg(feature = "base64")]
pub use self::base64::Base64PropertySource;
#[cfg(feature = "properties")]
pub use properties_file::PropertiesParser;
#[cfg(feature = "random")]
pub use random::RandomValuePropertySource;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlParser;
