// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expression evaluator backed by the `evalexpr` crate.

use crate::domain::{ConfigError, Result, Value};
use crate::ports::ExpressionEvaluator;
use evalexpr::{
    ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError, EvalexprResult,
    Function, HashMapContext, Value as ExprValue,
};
use std::collections::HashMap;

/// Evaluates expressions with `evalexpr`.
///
/// Context keys become variables (dotted names such as `server.port` are
/// valid identifiers). On top of the `evalexpr` builtins a
/// `split(text, separator)` function returns a tuple of substrings.
///
/// # Examples
///
/// ```rust
/// use extcfg::adapters::EvalexprEvaluator;
/// use extcfg::domain::Value;
/// use extcfg::ports::ExpressionEvaluator;
/// use std::collections::HashMap;
///
/// let context = HashMap::from([("server.port".to_string(), Value::Int(8080))]);
/// let result = EvalexprEvaluator::new().evaluate("server.port + 1", &context).unwrap();
/// assert_eq!(result, Value::Int(8081));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvalexprEvaluator;

impl EvalexprEvaluator {
    /// Creates a new evaluator.
    pub fn new() -> Self {
        EvalexprEvaluator
    }
}

impl ExpressionEvaluator for EvalexprEvaluator {
    fn evaluate(&self, source: &str, context: &HashMap<String, Value>) -> Result<Value> {
        let failure = |e: EvalexprError| ConfigError::ExpressionEvaluation {
            expression: source.trim().to_string(),
            message: e.to_string(),
        };

        let mut bindings = HashMapContext::new();
        for (name, value) in context {
            bindings
                .set_value(name.clone(), to_expr_value(value))
                .map_err(failure)?;
        }
        bindings
            .set_function("split".to_string(), Function::new(split))
            .map_err(failure)?;

        evalexpr::eval_with_context(source, &bindings)
            .map(from_expr_value)
            .map_err(failure)
    }
}

fn split(argument: &ExprValue) -> EvalexprResult<ExprValue> {
    let arguments = argument.as_fixed_len_tuple(2)?;
    let text = arguments[0].as_string()?;
    let separator = arguments[1].as_string()?;
    Ok(ExprValue::Tuple(
        text.split(separator.as_str())
            .map(|part| ExprValue::String(part.to_string()))
            .collect(),
    ))
}

fn to_expr_value(value: &Value) -> ExprValue {
    match value {
        Value::Empty => ExprValue::Empty,
        Value::Bool(b) => ExprValue::Boolean(*b),
        Value::Int(i) => ExprValue::Int(*i),
        Value::Float(f) => ExprValue::Float(*f),
        Value::String(s) => ExprValue::String(s.clone()),
        Value::Seq(items) => ExprValue::Tuple(items.iter().map(to_expr_value).collect()),
    }
}

#[allow(unreachable_patterns)]
fn from_expr_value(value: ExprValue) -> Value {
    match value {
        ExprValue::Empty => Value::Empty,
        ExprValue::Boolean(b) => Value::Bool(b),
        ExprValue::Int(i) => Value::Int(i),
        ExprValue::Float(f) => Value::Float(f),
        ExprValue::String(s) => Value::String(s),
        ExprValue::Tuple(items) => Value::Seq(items.into_iter().map(from_expr_value).collect()),
        _ => Value::Empty,
    }
}
