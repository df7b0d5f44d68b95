// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile-specific configuration files.
//!
//! Writes a small configuration tree to a temporary directory, then loads it
//! under different profiles.
//!
//! ```bash
//! cargo run --example profiles
//! ```

use extcfg::prelude::*;
use std::fs;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let dir = std::env::temp_dir().join(format!("extcfg-profiles-{}", std::process::id()));
    fs::create_dir_all(dir.join("config"))?;
    fs::write(
        dir.join("application.yml"),
        "server:\n  port: 8080\n  host: localhost\nconfig.import: shared.properties\n",
    )?;
    fs::write(dir.join("shared.properties"), "greeting=hello from ${server.host}\n")?;
    fs::write(dir.join("application-prod.yml"), "server:\n  host: prod.example.org\n")?;
    fs::write(dir.join("config/application-prod.properties"), "server.port=443\n")?;

    let location = format!("--config.location={}/", dir.to_string_lossy());
    let mut env = Environment::builder().args([location]).build()?;
    show(&env)?;

    env.set_active_profiles("prod")?;
    show(&env)?;

    if env.matches_profiles(&["prod & !eu"])? {
        println!("production outside the EU");
    }

    fs::remove_dir_all(&dir)?;
    Ok(())
}

fn show(env: &Environment) -> Result<()> {
    println!("profiles {:?}", env.active_profiles());
    println!("  server.port = {}", env.property_as::<u16>("server.port")?);
    println!("  greeting    = {}", env.property("greeting")?);
    for source in env.property_sources() {
        println!("  source: {}", source.name());
    }
    Ok(())
}
