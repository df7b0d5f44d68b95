// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by the integration tests.

use extcfg::domain::{Result, Value};
use extcfg::ports::ExpressionEvaluator;
use extcfg::adapters::EvalexprEvaluator;
use extcfg::service::{Environment, EnvironmentBuilder};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// A throwaway directory of configuration files.
pub struct ConfigTree {
    dir: TempDir,
}

#[allow(dead_code)]
impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Writes `content` to `relative`, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Creates an empty directory at `relative`.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.dir.path().join(relative)).unwrap();
        self
    }

    /// The root of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `relative` inside the tree, with forward slashes.
    pub fn join(&self, relative: &str) -> String {
        format!("{}/{}", self.path().to_string_lossy().replace('\\', "/"), relative)
    }

    /// The root of the tree as a directory location.
    pub fn location(&self) -> String {
        self.join("")
    }

    /// A builder searching only this tree, without default decorators.
    pub fn builder(&self) -> EnvironmentBuilder {
        Environment::builder()
            .args([format!("--config.location={}", self.location())])
            .without_default_decorators()
    }

    /// A builder searching only this tree, plus extra arguments.
    pub fn builder_with_args(&self, args: &[&str]) -> EnvironmentBuilder {
        let mut all = vec![format!("--config.location={}", self.location())];
        all.extend(args.iter().map(|arg| arg.to_string()));
        Environment::builder().args(all).without_default_decorators()
    }

    /// Builds an environment searching only this tree.
    pub fn build(&self) -> Result<Environment> {
        self.builder().build()
    }
}

/// Wraps the `evalexpr` evaluator and counts calls.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CountingEvaluator {
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingEvaluator {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of evaluations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExpressionEvaluator for CountingEvaluator {
    fn evaluate(&self, source: &str, context: &HashMap<String, Value>) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        EvalexprEvaluator::new().evaluate(source, context)
    }
}
