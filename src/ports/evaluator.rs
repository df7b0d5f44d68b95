// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expression evaluator trait definition.
//!
//! The body of an `#{...}` or `###{...}###` block is handed to an
//! [`ExpressionEvaluator`] together with the processor's context. The crate
//! ships an implementation backed by `evalexpr`
//! ([`EvalexprEvaluator`](crate::adapters::EvalexprEvaluator)); anything else
//! can be plugged in through this trait.

use crate::domain::{Result, Value};
use std::collections::HashMap;

/// Evaluates expression source text against a set of named bindings.
///
/// Boolean connectives must be spelled `&&`, `||` and `!`, and the literals
/// `true`/`false` must be recognised: profile expressions are rewritten into
/// that form before evaluation.
///
/// # Examples
///
/// ```rust
/// use extcfg::ports::ExpressionEvaluator;
/// use extcfg::domain::{Result, Value};
/// use std::collections::HashMap;
///
/// struct Echo;
///
/// impl ExpressionEvaluator for Echo {
///     fn evaluate(&self, source: &str, _context: &HashMap<String, Value>) -> Result<Value> {
///         Ok(Value::from(source.trim()))
///     }
/// }
///
/// assert_eq!(Echo.evaluate(" x ", &HashMap::new()).unwrap(), Value::from("x"));
/// ```
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluates `source` with `context` as its variable environment.
    ///
    /// Failures are reported as
    /// [`ConfigError::ExpressionEvaluation`](crate::domain::ConfigError::ExpressionEvaluation).
    fn evaluate(&self, source: &str, context: &HashMap<String, Value>) -> Result<Value>;
}
