//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use loginprobe::infrastructure::random::{SeededRandom, SequenceRandom};
use loginprobe::{AnalysisOrchestrator, PatternRegistry};

/// Sample login pages covered by the built-in knowledge base
pub const KNOWN_URLS: [&str; 5] = [
    "https://github.com/login",
    "https://www.notion.so/login",
    "https://www.dropbox.com/login",
    "https://slack.com/signin",
    "https://trello.com/login",
];

/// Orchestrator over the built-in registry whose random source always
/// returns `value`.
pub fn constant_orchestrator(value: f64) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(
        PatternRegistry::builtin(),
        Arc::new(SequenceRandom::constant(value)),
    )
}

/// Orchestrator over the built-in registry with a seeded random source.
pub fn seeded_orchestrator(seed: u64) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(PatternRegistry::builtin(), Arc::new(SeededRandom::new(seed)))
}

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Knowledge base document with a single custom domain.
pub const SINGLE_PATTERN_YAML: &str = r##"
version: 1
patterns:
  login.acme.test:
    username: { selector: "#acme-user", confidence: 0.9, type: email, label: Email }
    password: { selector: "#acme-pass", confidence: 0.93, type: password }
    submit: { selector: "#acme-go", confidence: 0.85, type: button, label: Go }
    authMethods: [Email/Password]
    specificSelectors:
      username: ["#acme-user", '[name="email"]']
      password: ["#acme-pass"]
      submit: ["#acme-go", 'button[type="submit"]']
"##;
