// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boolean profile expressions.
//!
//! A profile expression combines profile names with `&`, `|`, `!` and
//! parentheses: `prod & !eu`, `(dev | test) & local`. Names are replaced by
//! whether that profile is active, the connectives by the evaluator's `&&`
//! and `||`, and the result is handed to the expression evaluator.

use crate::domain::{ConfigError, Result, Value};
use crate::service::Environment;
use crate::text::{Capture, TemplateProcessor};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static PROFILE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<word>[\w.-]+)|(?P<sign>\W)").expect("profile token pattern is valid")
});

fn rewrite(capture: &Capture<'_>, active: &HashSet<&str>) -> Value {
    if let Some(word) = capture.named("word") {
        return Value::Bool(active.contains(word));
    }
    match capture.named("sign") {
        Some("&") => Value::from("&&"),
        Some("|") => Value::from("||"),
        _ => Value::from(capture.expr()),
    }
}

impl Environment {
    /// Whether any of `expressions` holds for the active profiles.
    ///
    /// An empty list always matches.
    ///
    /// ```rust
    /// use extcfg::service::Environment;
    ///
    /// # fn main() -> extcfg::domain::Result<()> {
    /// let env = Environment::builder().profiles("dev,local").build()?;
    /// assert!(env.matches_profiles(&["dev & local"])?);
    /// assert!(env.matches_profiles(&["prod", "!prod & dev"])?);
    /// assert!(!env.matches_profiles(&["dev & !local"])?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn matches_profiles(&self, expressions: &[&str]) -> Result<bool> {
        if expressions.is_empty() {
            return Ok(true);
        }

        let active: HashSet<&str> = self.active_profiles.iter().map(String::as_str).collect();
        let template = TemplateProcessor::from_regex(PROFILE_TOKEN.clone());

        for expression in expressions {
            let rewritten = template
                .process_recursive(expression, false, |capture| Ok(Some(rewrite(capture, &active))))?
                .to_string();
            match self.processor.evaluate(&rewritten)? {
                Value::Bool(true) => return Ok(true),
                Value::Bool(false) => {}
                other => {
                    return Err(ConfigError::ExpressionEvaluation {
                        expression: expression.to_string(),
                        message: format!("expected a boolean, got {}", other.type_name()),
                    })
                }
            }
        }
        Ok(false)
    }
}
