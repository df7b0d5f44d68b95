// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for placeholder and expression resolution.

mod common;

use common::CountingEvaluator;
use extcfg::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn environment(strict: bool) -> Environment {
    let mut env = Environment::builder()
        .strict(strict)
        .without_default_decorators()
        .build()
        .unwrap();
    env.add_property_source(Arc::new(
        MapPropertySource::new("values")
            .with_property("a", "${b}")
            .with_property("b", "c")
            .with_property("count", "#{21*2}")
            .with_property("name", "world")
            .with_property("greeting", "hello ${name}")
            .with_property("loop.a", "${loop.b}")
            .with_property("loop.b", "${loop.a}")
            .with_property("self", "${self}")
            .with_property("broken", "#{1 +}"),
    ));
    env
}

#[test]
fn test_typed_whole_expression() {
    let env = environment(true);
    assert_eq!(env.resolve("#{21*2}").unwrap(), Value::Int(42));
    assert_eq!(env.resolve("prefix #{21*2}").unwrap(), Value::from("prefix 42"));
    assert_eq!(env.resolve("#{1 > 0}").unwrap(), Value::Bool(true));
}

#[test]
fn test_property_holding_an_expression() {
    let env = environment(true);
    assert_eq!(env.property_as::<i64>("count").unwrap(), 42);
    assert_eq!(env.resolve("${count}").unwrap(), Value::Int(42));
}

#[test]
fn test_nested_references() {
    let env = environment(true);
    assert_eq!(env.property("a").unwrap(), "c");
    assert_eq!(env.property("greeting").unwrap(), "hello world");
    assert_eq!(env.value::<String>("${greeting}!").unwrap(), "hello world!");
}

#[test]
fn test_defaults() {
    let env = environment(true);
    assert_eq!(env.value::<String>("${missing:fallback}").unwrap(), "fallback");
    assert_eq!(env.value::<String>("${missing:}").unwrap(), "");
    assert_eq!(env.value::<String>("${missing:${name}}").unwrap(), "world");
    assert_eq!(env.value::<String>("${ name :unused}").unwrap(), "world");
}

#[test]
fn test_strict_mode_fails_on_missing_key() {
    let env = environment(true);
    assert!(matches!(
        env.resolve("x=${nope}"),
        Err(ConfigError::PropertyNotFound { key }) if key == "nope"
    ));
    assert!(matches!(
        env.property("broken"),
        Err(ConfigError::ExpressionEvaluation { .. })
    ));
}

#[test]
fn test_lenient_mode_keeps_placeholder_text() {
    let env = environment(false);
    assert_eq!(env.value::<String>("x=${nope}").unwrap(), "x=${nope}");
    assert_eq!(env.property("broken").unwrap(), "#{1 +}");
    assert_eq!(
        env.value::<String>("${nope} and ${name}").unwrap(),
        "${nope} and world"
    );
}

#[test]
fn test_lenient_mode_still_reports_divergence() {
    let env = environment(false);
    assert!(matches!(
        env.property("loop.a"),
        Err(ConfigError::ResolutionDidNotConverge { .. })
    ));
}

#[test]
fn test_switching_modes() {
    let mut env = environment(true);
    assert!(env.resolve("${nope}").is_err());

    env.processor_mut().set_strict(false);
    assert_eq!(env.value::<String>("${nope}").unwrap(), "${nope}");
}

#[test]
fn test_cyclic_references_do_not_converge() {
    let env = environment(true);
    assert!(matches!(
        env.property("loop.a"),
        Err(ConfigError::ResolutionDidNotConverge { .. })
    ));
    assert!(matches!(
        env.property("self"),
        Err(ConfigError::ResolutionDidNotConverge { .. })
    ));
}

#[test]
fn test_brace_expressions() {
    let env = environment(true);
    assert_eq!(env.resolve("###{ len(\"{${name}}\") }###").unwrap(), Value::Int(7));
    assert_eq!(env.value::<String>("[###{ 1 + 1 }###]").unwrap(), "[2]");
}

#[test]
fn test_time_constants() {
    let env = environment(true);
    assert_eq!(env.value::<i64>("#{time.Minute}").unwrap(), 60_000);
    assert_eq!(
        env.value::<Duration>("#{90 * time.Second}").unwrap(),
        Duration::from_secs(90)
    );
}

#[test]
fn test_defined_bindings() {
    let mut env = environment(true);
    env.define("factor", 3i64);
    assert_eq!(env.value::<i64>("#{factor * 5}").unwrap(), 15);
}

#[test]
fn test_split_builtin() {
    let env = environment(true);
    let parts: Vec<String> = env.value("#{split(\"a,b,c\", \",\")}").unwrap();
    assert_eq!(parts, vec!["a", "b", "c"]);
}

#[test]
fn test_literal_text_skips_evaluator() {
    let counter = CountingEvaluator::new();
    let env = Environment::builder()
        .evaluator(Box::new(counter.clone()))
        .without_default_decorators()
        .build()
        .unwrap();

    assert_eq!(env.value::<String>("just text").unwrap(), "just text");
    assert_eq!(env.value::<String>("").unwrap(), "");
    assert_eq!(counter.calls(), 0);

    assert_eq!(env.value::<i64>("#{2 + 2}").unwrap(), 4);
    assert_eq!(counter.calls(), 1);
}

#[test]
fn test_expression_processor_on_its_own() {
    let source = MapPropertySource::new("standalone")
        .with_property("host", "localhost")
        .with_property("port", "8080");
    let processor = ExpressionProcessor::new(true);

    assert_eq!(
        processor.process("${host}:${port}", &source).unwrap(),
        Value::from("localhost:8080")
    );
    assert!(ExpressionProcessor::contains_placeholder("${host}"));
    assert!(ExpressionProcessor::contains_placeholder("#{1}"));
    assert!(!ExpressionProcessor::contains_placeholder("plain $ text"));
}

#[test]
fn test_whole_floats_survive_splicing() {
    let mut env = environment(true);
    env.add_property_source(Arc::new(
        MapPropertySource::new("ratios").with_property("ratio", "#{10 / 2.0}"),
    ));

    assert_eq!(env.resolve("${ratio}").unwrap(), Value::Float(5.0));
    assert_eq!(env.value::<String>("x=${ratio}").unwrap(), "x=5.0");
    assert_eq!(env.resolve("#{${ratio} / 2}").unwrap(), Value::Float(2.5));
}
