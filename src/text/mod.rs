// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text processing.
//!
//! [`TemplateProcessor`] is a generic, pattern-driven fixed-point rewriter;
//! [`ExpressionProcessor`] builds the `${...}` / `#{...}` language on top of it.

pub mod capture;
pub mod expression;
pub mod template;

pub use capture::Capture;
pub use expression::ExpressionProcessor;
pub use template::{TemplateProcessor, MAX_PASSES};
