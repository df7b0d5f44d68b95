// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for extcfg.
//!
//! This example demonstrates:
//! - Building an environment from the process's arguments and variables
//! - Retrieving configuration values with type conversions
//! - Placeholders, defaults and expressions
//! - Using default values for missing keys
//!
//! To run this example:
//! ```bash
//! # Set some environment variables
//! export APP_NAME="MyApplication"
//! export DATABASE_PORT="5432"
//!
//! # Run the example, overriding a value on the command line
//! cargo run --example basic_usage -- --enable.debug=true
//! ```

use extcfg::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== extcfg: Basic Usage ===\n");

    let mut env = Environment::from_process()?;

    // Lowest precedence: defaults registered in code
    env.add_property_source(Arc::new(
        MapPropertySource::new("defaults")
            .with_property("database.host", "localhost")
            .with_property("database.port", "3000")
            .with_property("database.url", "postgres://${database.host}:${database.port}/app")
            .with_property("api.timeout", "#{30 * time.Second}")
            .with_property("api.retries", "3"),
    ));

    println!("Active profiles: {:?}\n", env.active_profiles());

    // Example 1: String values
    println!("--- Example 1: String Values ---");
    println!("app.name = {}", env.property_or("app.name", "DefaultApp")?);

    // Example 2: Typed values (DATABASE_PORT overrides the default)
    println!("\n--- Example 2: Typed Values ---");
    let port: u16 = env.property_as("database.port")?;
    let debug = env.property_as::<bool>("enable.debug").unwrap_or(false);
    println!("database.port = {} (as u16)", port);
    println!("enable.debug = {} (as bool)", debug);

    // Example 3: Placeholders resolve against every source
    println!("\n--- Example 3: Placeholders ---");
    println!("database.url = {}", env.property("database.url")?);
    println!("cache.url = {}", env.value::<String>("${cache.url:redis://localhost:6379}")?);

    // Example 4: Expressions keep their type
    println!("\n--- Example 4: Expressions ---");
    let timeout: Duration = env.property_as("api.timeout")?;
    let budget: i64 = env.value("#{api.retries * 2 + 1}")?;
    println!("api.timeout = {:?}", timeout);
    println!("attempt budget = {}", budget);

    // Example 5: Missing keys
    println!("\n--- Example 5: Missing Keys ---");
    match env.property("missing.key") {
        Ok(value) => println!("missing.key = {}", value),
        Err(e) => println!("missing.key: {}", e),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
