// SPDX-License-Identifier: MIT OR Apache-2.0

//! A process-wide environment for code that cannot have one passed in.
//!
//! Install it once at startup; it cannot be replaced afterwards.
//!
//! ```rust
//! use extcfg::service::{global, Environment};
//!
//! # fn main() -> extcfg::domain::Result<()> {
//! let env = Environment::builder().args(["--app.name=demo"]).build()?;
//! if global::install(env).is_ok() {
//!     let env = global::environment().expect("installed above");
//!     assert_eq!(env.property("app.name")?, "demo");
//! }
//! # Ok(())
//! # }
//! ```

use crate::service::Environment;
use once_cell::sync::OnceCell;

static ENVIRONMENT: OnceCell<Environment> = OnceCell::new();

/// Installs `environment` as the process-wide one.
///
/// Hands `environment` back if one was installed before.
pub fn install(environment: Environment) -> Result<&'static Environment, Environment> {
    ENVIRONMENT
        .try_insert(environment)
        .map_err(|(_, rejected)| rejected)
}

/// The process-wide environment, if installed.
pub fn environment() -> Option<&'static Environment> {
    ENVIRONMENT.get()
}
