// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placeholder and expression resolution.
//!
//! Three forms are recognised inside any string:
//!
//! - `${key}` and `${key:default}`: property placeholders, looked up through a
//!   [`PropertyLookup`]. Found values are scanned again, so a value may itself
//!   contain placeholders.
//! - `#{expression}`: an inline expression handed to the
//!   [`ExpressionEvaluator`].
//! - `###{expression}###`: the same, for bodies that need braces of their own.
//!
//! Placeholders nested inside an expression or another placeholder are
//! resolved first.
//!
//! Identifiers in an expression body are bound from the same lookup as
//! `${...}`, so `#{server.port + 1}` and `${server.port}` always agree.
//! Explicit [`define`](ExpressionProcessor::define) bindings take priority.

use crate::adapters::EvalexprEvaluator;
use crate::domain::{ConfigError, Result, Value};
use crate::ports::{ExpressionEvaluator, PropertyLookup};
use crate::text::{Capture, TemplateProcessor};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, warn};

static EXPRESSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?ms)###\{(?P<complex>(?:[^$#]\{|[^{])*?)\}###",
        r"|#\{(?P<expr>(?:[^$#]\{|[^{])*?)\}",
        r"|\$\{(?P<prop>(?:[^$#:]\{|[^{}:])*)(?::(?P<default>(?:[^$#]\{|[^{])*?))?\}",
    ))
    .expect("expression pattern is valid")
});

// String literals are matched so that their contents are skipped.
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|\b(?P<ident>[A-Za-z_][A-Za-z0-9_.]*)"#)
        .expect("identifier pattern is valid")
});

/// Nesting limit when an identifier's value needs resolving itself.
const MAX_BINDING_DEPTH: usize = 16;

/// Built-in duration constants, in milliseconds.
const TIME_CONSTANTS: [(&str, i64); 7] = [
    ("time.Nanosecond", 0),
    ("time.Microsecond", 0),
    ("time.Millisecond", 1),
    ("time.Second", 1_000),
    ("time.Minute", 60_000),
    ("time.Hour", 3_600_000),
    ("time.Day", 86_400_000),
];

/// Resolves `${...}`, `#{...}` and `###{...}###` in strings.
///
/// In strict mode any unresolvable placeholder or failing expression aborts
/// processing. In lenient mode those are logged and left in the output as
/// literal text; other failures still abort.
///
/// # Examples
///
/// ```
/// use extcfg::adapters::MapPropertySource;
/// use extcfg::domain::Value;
/// use extcfg::text::ExpressionProcessor;
///
/// let source = MapPropertySource::new("test")
///     .with_property("a", "3")
///     .with_property("b", "${a}");
/// let processor = ExpressionProcessor::new(true);
///
/// assert_eq!(processor.process("#{${b} * 2}", &source).unwrap(), Value::Int(6));
/// assert_eq!(processor.process("x=${missing:none}", &source).unwrap(), Value::from("x=none"));
/// ```
pub struct ExpressionProcessor {
    template: TemplateProcessor,
    context: HashMap<String, Value>,
    evaluator: Box<dyn ExpressionEvaluator>,
    strict: bool,
}

impl ExpressionProcessor {
    /// Creates a processor backed by the `evalexpr` evaluator.
    pub fn new(strict: bool) -> Self {
        Self::with_evaluator(strict, Box::new(EvalexprEvaluator::new()))
    }

    /// Creates a processor backed by `evaluator`.
    pub fn with_evaluator(strict: bool, evaluator: Box<dyn ExpressionEvaluator>) -> Self {
        let mut processor = Self {
            template: TemplateProcessor::from_regex(EXPRESSION_PATTERN.clone()),
            context: HashMap::new(),
            evaluator,
            strict,
        };
        processor.install_builtins();
        processor
    }

    /// Whether `text` contains anything this processor would try to resolve.
    pub fn contains_placeholder(text: &str) -> bool {
        EXPRESSION_PATTERN.is_match(text)
    }

    /// Whether unresolvable placeholders are errors.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Switches between strict and lenient mode.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Binds `key` in the expression context, replacing any earlier binding.
    ///
    /// Defined keys shadow properties of the same name inside expressions.
    pub fn define(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.context.insert(key.into(), value.into());
    }

    /// Removes every user binding. The `time.*` constants are kept.
    pub fn reset(&mut self) {
        self.context.clear();
        self.install_builtins();
    }

    /// The current expression context.
    pub fn context(&self) -> &HashMap<String, Value> {
        &self.context
    }

    /// Evaluates a bare expression against the context.
    pub fn evaluate(&self, source: &str) -> Result<Value> {
        self.evaluator.evaluate(source, &self.context)
    }

    /// Resolves `input` to a fixed point.
    ///
    /// A lone placeholder or expression keeps the type the evaluator
    /// produced; anything else comes back as a string.
    pub fn process(&self, input: &str, lookup: &dyn PropertyLookup) -> Result<Value> {
        self.process_at(input, lookup, 0)
    }

    fn process_at(&self, input: &str, lookup: &dyn PropertyLookup, depth: usize) -> Result<Value> {
        self.template
            .process(input, |capture| self.resolve(capture, lookup, depth))
    }

    /// The context for `source`: explicit bindings plus every identifier
    /// the lookup can answer, resolved.
    fn bindings(
        &self,
        source: &str,
        lookup: &dyn PropertyLookup,
        depth: usize,
    ) -> Result<HashMap<String, Value>> {
        let mut context = self.context.clone();
        for caps in IDENTIFIER.captures_iter(source) {
            let Some(ident) = caps.name("ident") else {
                continue;
            };
            let name = ident.as_str().trim_end_matches('.');
            if context.contains_key(name) {
                continue;
            }
            let Some(raw) = lookup.lookup_raw(name)? else {
                continue;
            };
            if !Self::contains_placeholder(&raw) {
                context.insert(name.to_string(), Value::infer(&raw));
                continue;
            }
            if depth >= MAX_BINDING_DEPTH {
                return Err(ConfigError::ResolutionDidNotConverge {
                    input: source.to_string(),
                    passes: depth,
                });
            }
            match self.process_at(&raw, lookup, depth + 1) {
                Ok(Value::String(text)) => {
                    context.insert(name.to_string(), Value::infer(&text));
                }
                Ok(value) => {
                    context.insert(name.to_string(), value);
                }
                Err(e) if e.is_recoverable() => {
                    debug!("Leaving {} unbound: {}", name, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(context)
    }

    fn install_builtins(&mut self) {
        for (name, millis) in TIME_CONSTANTS {
            self.context.insert(name.to_string(), Value::Int(millis));
        }
    }

    fn resolve(
        &self,
        capture: &Capture<'_>,
        lookup: &dyn PropertyLookup,
        depth: usize,
    ) -> Result<Option<Value>> {
        match self.resolve_capture(capture, lookup, depth) {
            Ok(value) => Ok(Some(value)),
            Err(e) if !self.strict && e.is_recoverable() => {
                warn!("Leaving {} unresolved: {}", capture.expr(), e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn resolve_capture(
        &self,
        capture: &Capture<'_>,
        lookup: &dyn PropertyLookup,
        depth: usize,
    ) -> Result<Value> {
        if let Some(key) = capture.named("prop") {
            let key = key.trim();
            if let Some(raw) = lookup.lookup_raw(key)? {
                return Ok(Value::String(raw));
            }
            return match capture.named("default") {
                Some(default) => Ok(Value::from(default)),
                None => Err(ConfigError::PropertyNotFound {
                    key: key.to_string(),
                }),
            };
        }

        let source = capture
            .named("expr")
            .or_else(|| capture.named("complex"))
            .unwrap_or_default();
        let context = self.bindings(source, lookup, depth)?;
        self.evaluator.evaluate(source, &context)
    }
}
