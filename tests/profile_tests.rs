// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for profile activation and profile expressions.

use extcfg::prelude::*;

fn environment_with(args: &[&str], vars: &[(&str, &str)], profiles: &str) -> Environment {
    Environment::builder()
        .args(args.iter().copied())
        .env_vars(vars.iter().copied())
        .profiles(profiles)
        .without_default_decorators()
        .build()
        .unwrap()
}

#[test]
fn test_default_profile_is_always_first() {
    let env = environment_with(&[], &[], "");
    assert_eq!(env.active_profiles(), ["default"]);

    let env = environment_with(&[], &[], "dev, local");
    assert_eq!(env.active_profiles(), ["default", "dev", "local"]);
}

#[test]
fn test_profile_source_precedence() {
    let env = environment_with(&["--profiles.active=cli"], &[("PROFILES_ACTIVE", "env")], "code");
    assert_eq!(env.active_profiles(), ["default", "cli"]);

    let env = environment_with(&[], &[("PROFILES_ACTIVE", "env")], "code");
    assert_eq!(env.active_profiles(), ["default", "env"]);
}

#[test]
fn test_matches_profiles() {
    let env = environment_with(&["--profiles.active=prod,us-east"], &[], "");

    assert!(env.matches_profiles(&["prod"]).unwrap());
    assert!(env.matches_profiles(&["default"]).unwrap());
    assert!(env.matches_profiles(&["prod & us-east"]).unwrap());
    assert!(env.matches_profiles(&["prod & !eu"]).unwrap());
    assert!(env.matches_profiles(&["(dev | test) | prod"]).unwrap());
    assert!(!env.matches_profiles(&["dev", "test & prod"]).unwrap());
    assert!(env.matches_profiles(&["dev", "prod"]).unwrap());
    assert!(env.matches_profiles(&[]).unwrap());
}

#[test]
fn test_matches_profiles_after_switch() {
    let mut env = environment_with(&[], &[], "dev");
    assert!(env.matches_profiles(&["dev"]).unwrap());

    env.set_active_profiles("prod").unwrap();
    assert!(env.matches_profiles(&["prod & !dev"]).unwrap());
}

#[test]
fn test_cli_profiles_survive_switch() {
    let mut env = environment_with(&["--profiles.active=cli"], &[], "");
    env.set_active_profiles("prod").unwrap();
    assert_eq!(env.active_profiles(), ["default", "cli"]);
}

#[test]
fn test_malformed_profile_expression() {
    let env = environment_with(&[], &[], "dev");
    assert!(env.matches_profiles(&["dev |"]).is_err());
    assert!(env.matches_profiles(&["(dev"]).is_err());
}
