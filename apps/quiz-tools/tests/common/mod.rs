//! Common test utilities for integration tests.
//!
//! Every test gets its own scratch directory so tests can run in parallel.

pub mod fixtures;

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Scratch directory removed when the context is dropped.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("quiz-tools-test-")
            .tempdir()
            .expect("Failed to create test directory");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into the scratch directory and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir().join(name)).expect("Failed to read file")
    }
}

/// Captured output of a command as text.
pub fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("output is not UTF-8")
}
