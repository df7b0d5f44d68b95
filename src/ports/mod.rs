// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams of the resolver: where properties come from,
//! how files are parsed, and what evaluates expression blocks. Adapters in the
//! adapters layer implement them.

pub mod evaluator;
pub mod parser;
pub mod source;

// Re-export commonly used types
pub use evaluator::ExpressionEvaluator;
pub use parser::ConfigParser;
pub use source::{EnumerableSources, PropertyLookup, PropertySource};
