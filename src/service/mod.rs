// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer composing sources, discovery and resolution.
//!
//! [`Environment`] is the entry point: build one with [`EnvironmentBuilder`],
//! then read values through it.

pub mod builder;
pub mod discovery;
pub mod environment;
pub mod global;
pub mod profiles;

// Re-export commonly used types
pub use builder::EnvironmentBuilder;
pub use discovery::{CONFIG_IMPORT_KEY, DEFAULT_CONFIG_NAME, DEFAULT_LOCATION, PROFILES_ACTIVE_KEY};
pub use environment::{Environment, DEFAULT_PROFILE};
