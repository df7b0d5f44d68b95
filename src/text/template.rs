// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive find-and-replace driven by one compiled pattern.

use crate::domain::{ConfigError, Result, Value};
use crate::text::Capture;
use regex::Regex;
use std::collections::HashSet;

/// Upper bound on resolution passes before giving up.
pub const MAX_PASSES: usize = 32;

/// Replaces every match of a pattern with whatever a resolver callback returns,
/// and repeats until nothing is left to resolve.
///
/// The resolver sees one [`Capture`] at a time and answers with
/// `Ok(Some(value))` to substitute `value`, `Ok(None)` to leave the matched
/// text untouched, or an error to abort the whole call.
///
/// # Whole-string matches
///
/// When the text being scanned is exactly one match, a non-string value from
/// the resolver is returned as-is. Anywhere else values are spliced in their
/// textual form, so `${count}` may yield an integer while `n=${count}` always
/// yields a string.
///
/// # Termination
///
/// A pass in which the resolver substituted nothing ends processing. A pass
/// that reproduces text seen before, or running past the pass limit, fails
/// with [`ConfigError::ResolutionDidNotConverge`].
///
/// # Examples
///
/// ```
/// use extcfg::text::TemplateProcessor;
/// use extcfg::domain::Value;
///
/// let processor = TemplateProcessor::new(r"<(?P<n>\d+)>").unwrap();
/// let doubled = processor
///     .process("a<2> b<<4>>", |c| {
///         let n: i64 = c.named("n").unwrap_or("0").parse().unwrap_or(0);
///         Ok(Some(Value::Int(n * 2)))
///     })
///     .unwrap();
/// assert_eq!(doubled, Value::from("a4 b16"));
/// ```
#[derive(Debug, Clone)]
pub struct TemplateProcessor {
    pattern: Regex,
    max_passes: usize,
}

impl TemplateProcessor {
    /// Compiles `pattern` in multi-line, dot-matches-newline mode unless it
    /// sets its own flags with a leading `(?`.
    pub fn new(pattern: &str) -> Result<Self> {
        let source = if pattern.starts_with("(?") {
            pattern.to_string()
        } else {
            format!("(?ms){}", pattern)
        };
        let pattern = Regex::new(&source).map_err(|e| ConfigError::ParseError {
            message: format!("Invalid template pattern {}", source),
            source: Some(Box::new(e)),
        })?;
        Ok(Self::from_regex(pattern))
    }

    /// Uses an already compiled pattern as-is.
    pub fn from_regex(pattern: Regex) -> Self {
        Self {
            pattern,
            max_passes: MAX_PASSES,
        }
    }

    /// Overrides the pass limit.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Whether `input` contains at least one match.
    pub fn is_match(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }

    /// Resolves `input` to a fixed point.
    pub fn process<F>(&self, input: &str, resolve: F) -> Result<Value>
    where
        F: FnMut(&Capture<'_>) -> Result<Option<Value>>,
    {
        self.process_recursive(input, true, resolve)
    }

    /// Resolves `input`, either to a fixed point or, with `recursive` off, in
    /// exactly one pass.
    pub fn process_recursive<F>(&self, input: &str, recursive: bool, mut resolve: F) -> Result<Value>
    where
        F: FnMut(&Capture<'_>) -> Result<Option<Value>>,
    {
        if input.is_empty() {
            return Ok(Value::String(String::new()));
        }

        let mut text = input.to_string();
        let mut seen = HashSet::new();
        seen.insert(text.clone());

        for pass in 1..=self.max_passes {
            let captures: Vec<_> = self.pattern.captures_iter(&text).collect();
            if captures.is_empty() {
                return Ok(Value::String(text));
            }
            let whole = captures.len() == 1
                && captures[0].get(0).map_or(false, |m| m.len() == text.len());

            let mut resolved = String::with_capacity(text.len());
            let mut last = 0;
            let mut substituted = false;
            for captures in captures {
                let capture = Capture::new(captures);
                let range = capture.range();
                resolved.push_str(&text[last..range.start]);
                match resolve(&capture)? {
                    Some(value) if whole && !value.is_string() => return Ok(value),
                    Some(value) => {
                        substituted = true;
                        resolved.push_str(&value.to_string());
                    }
                    None => resolved.push_str(capture.expr()),
                }
                last = range.end;
            }
            resolved.push_str(&text[last..]);

            if !recursive || !substituted {
                return Ok(Value::String(resolved));
            }
            if !seen.insert(resolved.clone()) {
                return Err(ConfigError::ResolutionDidNotConverge {
                    input: input.to_string(),
                    passes: pass,
                });
            }
            text = resolved;
        }

        Err(ConfigError::ResolutionDidNotConverge {
            input: input.to_string(),
            passes: self.max_passes,
        })
    }
}
